//! ServiceSettings - Config Loader output
//!
//! Describes the full service configuration: HTTP binding, dispatch pool, delivery backends.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Configuration version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceSettings {
    /// Configuration version
    #[serde(default)]
    pub version: ConfigVersion,

    /// HTTP server binding
    #[serde(default)]
    pub server: ServerConfig,

    /// Worker pool and retry settings
    #[serde(default)]
    pub dispatch: DispatchConfig,

    /// Delivery backends to register at startup
    #[serde(default)]
    pub backends: Vec<BackendConfig>,
}

/// HTTP server binding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_host")]
    pub host: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Worker pool and retry settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Number of concurrent delivery workers
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Dispatch queue capacity; producers block when it is full
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// Fixed delay between delivery attempts, in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl DispatchConfig {
    /// Retry delay as a `Duration`
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            queue_capacity: default_queue_capacity(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

fn default_workers() -> usize {
    5
}

fn default_queue_capacity() -> usize {
    100
}

fn default_retry_delay_ms() -> u64 {
    1000
}

/// Delivery backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Backend name, the channel name producers address
    pub name: String,

    /// Backend type
    pub backend_type: BackendType,

    /// Type-specific parameters
    #[serde(default)]
    pub params: HashMap<String, String>,
}

/// Backend type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendType {
    /// Log-only output
    Log,
    /// Simulated email delivery
    Email,
    /// Slack incoming webhook
    Slack,
}

impl ServiceSettings {
    /// Backends of the given type
    pub fn backends_of_type(&self, backend_type: BackendType) -> impl Iterator<Item = &BackendConfig> {
        self.backends
            .iter()
            .filter(move |backend| backend.backend_type == backend_type)
    }

    /// Point every slack backend at `url`
    pub fn override_slack_webhook(&mut self, url: &str) {
        for backend in &mut self.backends {
            if backend.backend_type == BackendType::Slack {
                backend
                    .params
                    .insert("webhook_url".to_string(), url.to_string());
            }
        }
    }
}
