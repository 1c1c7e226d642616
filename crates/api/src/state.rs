//! Shared application state for the axum server.

use std::sync::Arc;

use dispatcher::Notifier;

/// Application state shared across all route handlers via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub notifier: Arc<Notifier>,
}

impl AppState {
    pub fn new(notifier: Arc<Notifier>) -> Self {
        Self { notifier }
    }
}
