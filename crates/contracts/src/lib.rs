//! # Contracts
//!
//! Frozen interface contracts shared by every crate in the workspace.
//! Business crates depend on this crate only; reverse dependencies are prohibited.
//!
//! ## Contents
//! - [`Notification`]: the unit of work moving through the dispatch queue
//! - [`NotificationRequest`]: validated submission payload from the HTTP layer
//! - [`DeliveryBackend`]: capability interface implemented by every channel
//! - [`ServiceSettings`]: configuration blueprint produced by the config loader

mod backend;
mod error;
mod notification;
mod settings;

pub use backend::*;
pub use error::*;
pub use notification::*;
pub use settings::*;
