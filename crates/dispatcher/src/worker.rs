//! Worker - drains the dispatch queue and runs the retry protocol
//!
//! Per-notification state machine:
//!
//! ```text
//! Queued -> Resolving -+-> BackendNotFound                (terminal, no attempt)
//!                      +-> Sending -+-> Delivered         (terminal)
//!                                   +-> Sending           (retry after fixed delay)
//!                                   +-> RetryExhausted    (terminal, after MAX_ATTEMPTS)
//! ```

use std::sync::Arc;
use std::time::Duration;

use contracts::{DeliveryBackend, Notification};
use observability::{OUTCOME_BACKEND_NOT_FOUND, OUTCOME_DELIVERED, OUTCOME_RETRY_EXHAUSTED};
use tracing::{debug, error, info, instrument, warn};

use crate::error::DispatcherError;
use crate::metrics::DispatchMetrics;
use crate::queue::DispatchQueue;
use crate::registry::BackendRegistry;

/// Total delivery attempts per notification (one initial send plus two retries)
pub const MAX_ATTEMPTS: u32 = 3;

/// Fixed-delay retry policy shared by every worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    /// `MAX_ATTEMPTS` attempts separated by `delay`
    pub fn fixed(delay: Duration) -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            delay,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Delay in whole milliseconds, saturating for log fields
    pub fn delay_ms(&self) -> u64 {
        u64::try_from(self.delay.as_millis()).unwrap_or(u64::MAX)
    }
}

/// Terminal outcome of one notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// Backend accepted the message
    Delivered { attempts: u32 },
    /// No backend registered for the channel; nothing was sent
    BackendNotFound,
    /// Every allowed attempt failed
    RetryExhausted { attempts: u32 },
}

impl DeliveryOutcome {
    /// Send attempts made for this notification
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Delivered { attempts } | Self::RetryExhausted { attempts } => *attempts,
            Self::BackendNotFound => 0,
        }
    }

    /// Metric label for this outcome
    pub fn label(&self) -> &'static str {
        match self {
            Self::Delivered { .. } => OUTCOME_DELIVERED,
            Self::BackendNotFound => OUTCOME_BACKEND_NOT_FOUND,
            Self::RetryExhausted { .. } => OUTCOME_RETRY_EXHAUSTED,
        }
    }
}

/// A queue consumer
///
/// Holds its index plus shared handles to the queue, the registry and the retry policy.
pub struct Worker {
    id: usize,
    queue: Arc<DispatchQueue>,
    registry: Arc<BackendRegistry>,
    retry: RetryPolicy,
    metrics: Arc<DispatchMetrics>,
}

impl Worker {
    pub fn new(
        id: usize,
        queue: Arc<DispatchQueue>,
        registry: Arc<BackendRegistry>,
        retry: RetryPolicy,
        metrics: Arc<DispatchMetrics>,
    ) -> Self {
        Self {
            id,
            queue,
            registry,
            retry,
            metrics,
        }
    }

    /// Consume notifications until the queue is closed and drained
    #[instrument(name = "notifier_worker_loop", skip(self), fields(worker_id = self.id))]
    pub async fn run(self) {
        debug!(worker_id = self.id, "Worker started");

        while let Some(notification) = self.queue.dequeue().await {
            observability::record_queue_depth(self.queue.len());
            self.handle(notification).await;
        }

        debug!(worker_id = self.id, "Worker stopped");
    }

    /// Process one notification to a terminal outcome and report it
    #[instrument(
        name = "notifier_worker_handle",
        skip(self, notification),
        fields(worker_id = self.id, channel = %notification.channel)
    )]
    pub async fn handle(&self, notification: Notification) -> DeliveryOutcome {
        debug!(
            worker_id = self.id,
            channel = %notification.channel,
            "Processing notification"
        );

        let outcome = match self.registry.resolve(&notification.channel) {
            Err(e) => {
                self.metrics.inc_not_found_count();
                error!(
                    worker_id = self.id,
                    channel = %notification.channel,
                    error = %e,
                    "Dropping notification for unknown channel"
                );
                DeliveryOutcome::BackendNotFound
            }
            Ok(backend) => match self.send_with_retry(backend.as_ref(), &notification).await {
                Ok(attempts) => {
                    self.metrics.inc_delivered_count();
                    info!(
                        worker_id = self.id,
                        channel = %notification.channel,
                        attempts,
                        "Notification delivered"
                    );
                    DeliveryOutcome::Delivered { attempts }
                }
                Err(e) => {
                    self.metrics.inc_exhausted_count();
                    error!(
                        worker_id = self.id,
                        channel = %notification.channel,
                        error = %e,
                        "Failed to send notification after multiple tries"
                    );
                    DeliveryOutcome::RetryExhausted {
                        attempts: self.retry.max_attempts(),
                    }
                }
            },
        };

        observability::record_delivery_outcome(&notification.channel, outcome.label());
        outcome
    }

    /// Send to `backend`, retrying with the fixed delay
    ///
    /// Returns the number of attempts on success.
    ///
    /// # Errors
    /// `RetryExhausted` once all `max_attempts` sends failed.
    async fn send_with_retry(
        &self,
        backend: &dyn DeliveryBackend,
        notification: &Notification,
    ) -> Result<u32, DispatcherError> {
        let max_attempts = self.retry.max_attempts();
        let mut attempt = 0;

        loop {
            attempt += 1;

            let source = match backend.send(&notification.message).await {
                Ok(()) => {
                    observability::record_delivery_attempt(&notification.channel, true);
                    return Ok(attempt);
                }
                Err(source) => source,
            };

            observability::record_delivery_attempt(&notification.channel, false);
            self.metrics.inc_failed_attempt_count();

            if attempt >= max_attempts {
                return Err(DispatcherError::RetryExhausted {
                    channel: notification.channel.clone(),
                    attempts: attempt,
                    last_error: source,
                });
            }

            let failure = DispatcherError::DeliveryFailed {
                backend: backend.name().to_string(),
                source,
            };
            warn!(
                worker_id = self.id,
                channel = %notification.channel,
                attempt,
                max_attempts,
                retry_in_ms = self.retry.delay_ms(),
                error = %failure,
                "Delivery attempt failed, retrying"
            );
            tokio::time::sleep(self.retry.delay()).await;
        }
    }
}
