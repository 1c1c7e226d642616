//! EmailBackend - simulated email delivery

use std::collections::HashMap;

use async_trait::async_trait;
use contracts::{ContractError, DeliveryBackend};
use tracing::{info, instrument};

/// Default channel name for email delivery
pub const DEFAULT_EMAIL_NAME: &str = "Email";

/// Backend that "sends" an email by logging recipient and message
///
/// No SMTP transport is involved; every send succeeds.
pub struct EmailBackend {
    name: String,
    to: String,
}

impl EmailBackend {
    /// Create an email backend named "Email" for the given recipient
    pub fn new(to: impl Into<String>) -> Self {
        Self {
            name: DEFAULT_EMAIL_NAME.to_string(),
            to: to.into(),
        }
    }

    /// Override the channel name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Create from params (for factory)
    ///
    /// Params: `to` (required) recipient address.
    pub fn from_params(
        name: impl Into<String>,
        params: &HashMap<String, String>,
    ) -> Result<Self, ContractError> {
        let name = name.into();
        let to = params
            .get("to")
            .ok_or_else(|| ContractError::backend_connection(&name, "missing 'to' parameter"))?;

        Ok(Self::new(to).with_name(name))
    }

    pub fn recipient(&self) -> &str {
        &self.to
    }
}

#[async_trait]
impl DeliveryBackend for EmailBackend {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(name = "email_backend_send", skip(self, message), fields(backend = %self.name))]
    async fn send(&self, message: &str) -> Result<(), ContractError> {
        info!(to = %self.to, message = %message, "Sending email");
        Ok(())
    }
}
