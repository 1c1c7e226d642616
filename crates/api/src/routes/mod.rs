pub mod channels;
pub mod health;
pub mod notifications;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the complete API router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(notifications::router())
        .merge(channels::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
