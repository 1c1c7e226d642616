//! Layered error definitions
//!
//! Categorized by source: config / backend / general

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Backend Errors =====
    /// Delivery attempt rejected or failed in transport
    #[error("backend '{backend_name}' delivery error: {message}")]
    BackendDelivery {
        backend_name: String,
        message: String,
    },

    /// Backend could not be constructed or connected
    #[error("backend '{backend_name}' connection error: {message}")]
    BackendConnection {
        backend_name: String,
        message: String,
    },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create backend delivery error
    pub fn backend_delivery(backend_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BackendDelivery {
            backend_name: backend_name.into(),
            message: message.into(),
        }
    }

    /// Create backend connection error
    pub fn backend_connection(
        backend_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::BackendConnection {
            backend_name: backend_name.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ContractError::backend_delivery("Slack", "request failed: invalid_token");
        assert_eq!(
            err.to_string(),
            "backend 'Slack' delivery error: request failed: invalid_token"
        );

        let err = ContractError::config_validation("dispatch.workers", "must be > 0");
        assert!(err.to_string().contains("dispatch.workers"));
    }
}
