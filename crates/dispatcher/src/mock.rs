//! Scripted backend for unit tests

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use contracts::{ContractError, DeliveryBackend};

/// Backend that fails a fixed number of times before succeeding
pub struct MockBackend {
    name: String,
    failures_before_success: u32,
    calls: Arc<AtomicU32>,
}

impl MockBackend {
    pub fn succeeding(name: impl Into<String>) -> Self {
        Self::failing_times(name, 0)
    }

    pub fn failing_times(name: impl Into<String>, failures: u32) -> Self {
        Self {
            name: name.into(),
            failures_before_success: failures,
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    pub fn always_failing(name: impl Into<String>) -> Self {
        Self::failing_times(name, u32::MAX)
    }

    /// Shared send-call counter
    pub fn calls(&self) -> Arc<AtomicU32> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl DeliveryBackend for MockBackend {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send(&self, _message: &str) -> Result<(), ContractError> {
        let previous = self.calls.fetch_add(1, Ordering::SeqCst);
        if previous < self.failures_before_success {
            return Err(ContractError::backend_delivery(&self.name, "some error"));
        }
        Ok(())
    }
}
