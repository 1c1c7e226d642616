//! # API
//!
//! HTTP layer over the [`Notifier`](dispatcher::Notifier).
//!
//! Endpoints:
//! - `POST /notifications` - accept `{"channels": [...], "message": "..."}` for delivery
//! - `GET  /channels` - list registered channel names
//! - `GET  /health` - liveness probe

pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
