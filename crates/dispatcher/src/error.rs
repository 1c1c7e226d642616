//! Dispatcher error types

use contracts::ContractError;
use thiserror::Error;

/// Dispatcher-specific errors
#[derive(Debug, Error)]
pub enum DispatcherError {
    /// A backend with this name is already registered
    #[error("backend '{name}' already exists")]
    DuplicateBackend { name: String },

    /// No backend registered for the channel
    #[error("backend '{channel}' not found")]
    BackendNotFound { channel: String },

    /// A single delivery attempt failed
    #[error("delivery via '{backend}' failed: {source}")]
    DeliveryFailed {
        backend: String,
        #[source]
        source: ContractError,
    },

    /// Every allowed attempt failed
    #[error("failed to deliver to '{channel}' after {attempts} attempts: {last_error}")]
    RetryExhausted {
        channel: String,
        attempts: u32,
        #[source]
        last_error: ContractError,
    },

    /// Backend creation from configuration failed
    #[error("failed to create backend '{name}': {message}")]
    BackendCreation { name: String, message: String },

    /// The dispatch queue no longer accepts notifications
    #[error("dispatch queue closed")]
    QueueClosed,
}

impl DispatcherError {
    /// Create a backend creation error
    pub fn backend_creation(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BackendCreation {
            name: name.into(),
            message: message.into(),
        }
    }
}
