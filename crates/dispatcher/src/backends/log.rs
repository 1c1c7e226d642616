//! LogBackend - logs messages via tracing

use async_trait::async_trait;
use contracts::{ContractError, DeliveryBackend};
use tracing::{info, instrument};

/// Backend that only logs, useful for debugging a channel
pub struct LogBackend {
    name: String,
}

impl LogBackend {
    /// Create a new LogBackend with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl DeliveryBackend for LogBackend {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(name = "log_backend_send", skip(self, message), fields(backend = %self.name))]
    async fn send(&self, message: &str) -> Result<(), ContractError> {
        info!(
            backend = %self.name,
            bytes = message.len(),
            message = %message,
            "Notification logged"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_log_backend_send() {
        let backend = LogBackend::new("test_log");
        assert!(backend.send("hello").await.is_ok());
    }

    #[test]
    fn test_log_backend_name() {
        let backend = LogBackend::new("my_logger");
        assert_eq!(backend.name(), "my_logger");
    }
}
