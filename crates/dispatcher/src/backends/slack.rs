//! SlackBackend - posts messages to a Slack incoming webhook

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use contracts::{ContractError, DeliveryBackend};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::{debug, info, instrument};

/// Default channel name for Slack delivery
pub const DEFAULT_SLACK_NAME: &str = "Slack";

/// JSON body accepted by Slack incoming webhooks
#[derive(Debug, Serialize)]
struct PostMessageRequest<'a> {
    text: &'a str,
}

/// Backend that sends each message as a Slack webhook post
#[derive(Debug, Clone)]
pub struct SlackBackend {
    name: String,
    webhook_url: String,
    /// HTTP client (reused for connection pooling)
    client: Client,
}

impl SlackBackend {
    /// Create a Slack backend named "Slack" posting to `webhook_url`
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self::with_client(webhook_url, Client::new())
    }

    /// Create with a caller-provided HTTP client
    pub fn with_client(webhook_url: impl Into<String>, client: Client) -> Self {
        Self {
            name: DEFAULT_SLACK_NAME.to_string(),
            webhook_url: webhook_url.into(),
            client,
        }
    }

    /// Override the channel name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Create from params (for factory)
    ///
    /// Params: `webhook_url` (required), `timeout_ms` (optional HTTP client timeout).
    #[instrument(name = "slack_backend_from_params", skip(name, params))]
    pub fn from_params(
        name: impl Into<String>,
        params: &HashMap<String, String>,
    ) -> Result<Self, ContractError> {
        let name = name.into();
        let webhook_url = params.get("webhook_url").ok_or_else(|| {
            ContractError::backend_connection(&name, "missing 'webhook_url' parameter")
        })?;

        let mut builder = Client::builder();
        if let Some(raw) = params.get("timeout_ms") {
            let timeout_ms: u64 = raw.parse().map_err(|e| {
                ContractError::backend_connection(&name, format!("invalid timeout_ms '{}': {}", raw, e))
            })?;
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        let client = builder
            .build()
            .map_err(|e| ContractError::backend_connection(&name, e.to_string()))?;

        debug!(backend = %name, "SlackBackend configured");
        Ok(Self::with_client(webhook_url, client).with_name(name))
    }

    pub fn webhook_url(&self) -> &str {
        &self.webhook_url
    }
}

#[async_trait]
impl DeliveryBackend for SlackBackend {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(name = "slack_backend_send", skip(self, message), fields(backend = %self.name))]
    async fn send(&self, message: &str) -> Result<(), ContractError> {
        let response = self
            .client
            .post(&self.webhook_url)
            .json(&PostMessageRequest { text: message })
            .send()
            .await
            .map_err(|e| ContractError::backend_delivery(&self.name, e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response
                .text()
                .await
                .map_err(|e| ContractError::backend_delivery(&self.name, e.to_string()))?;
            return Err(ContractError::backend_delivery(
                &self.name,
                format!("request failed: {}", body),
            ));
        }

        info!(backend = %self.name, message = %message, "Slack message sent");
        Ok(())
    }
}
