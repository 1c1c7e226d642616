//! Delivery backend implementations
//!
//! Contains LogBackend, EmailBackend, and SlackBackend.

mod email;
mod log;
mod slack;

pub use self::email::EmailBackend;
pub use self::log::LogBackend;
pub use self::slack::SlackBackend;

use std::sync::Arc;

use contracts::{BackendConfig, BackendType, DeliveryBackend};
use tracing::instrument;

use crate::error::DispatcherError;

/// Create a backend from configuration
#[instrument(
    name = "dispatcher_create_backend",
    skip(config),
    fields(backend = %config.name, backend_type = ?config.backend_type)
)]
pub fn create_backend(config: &BackendConfig) -> Result<Arc<dyn DeliveryBackend>, DispatcherError> {
    match config.backend_type {
        BackendType::Log => Ok(Arc::new(LogBackend::new(&config.name))),
        BackendType::Email => {
            let backend = EmailBackend::from_params(&config.name, &config.params)
                .map_err(|e| DispatcherError::backend_creation(&config.name, e.to_string()))?;
            Ok(Arc::new(backend))
        }
        BackendType::Slack => {
            let backend = SlackBackend::from_params(&config.name, &config.params)
                .map_err(|e| DispatcherError::backend_creation(&config.name, e.to_string()))?;
            Ok(Arc::new(backend))
        }
    }
}
