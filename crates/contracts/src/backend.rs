//! DeliveryBackend trait - Dispatcher output interface
//!
//! Defines the abstract interface for delivery channels.

use async_trait::async_trait;

use crate::ContractError;

/// Delivery capability
///
/// All channel implementations must implement this trait. Backends are shared
/// by every worker through `Arc<dyn DeliveryBackend>`, so `send` takes `&self`.
#[async_trait]
pub trait DeliveryBackend: Send + Sync {
    /// Backend name; the registry key and the channel name producers address
    fn name(&self) -> &str;

    /// Deliver one message
    ///
    /// # Errors
    /// Returns a delivery error (should include context); the caller decides whether to retry
    async fn send(&self, message: &str) -> Result<(), ContractError>;
}
