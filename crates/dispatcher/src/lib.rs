//! # Dispatcher
//!
//! Notification dispatch engine.
//!
//! Responsibilities:
//! - Map channel names to delivery backends ([`BackendRegistry`])
//! - Buffer pending notifications with backpressure ([`DispatchQueue`])
//! - Drain the queue with a pool of workers running the retry protocol ([`Worker`])
//! - Expose submission, registration and introspection through [`Notifier`]
//!
//! Submission is fire-and-forget: delivery outcomes are reported through
//! logs and metrics only.

pub mod backends;
pub mod dispatcher;
pub mod error;
pub mod metrics;
pub mod queue;
pub mod registry;
pub mod worker;

#[cfg(test)]
mod mock;

pub use contracts::{DeliveryBackend, Notification};
pub use backends::{create_backend, EmailBackend, LogBackend, SlackBackend};
pub use dispatcher::{create_notifier, Notifier, NotifierConfig};
pub use error::DispatcherError;
pub use metrics::{DispatchMetrics, MetricsSnapshot};
pub use queue::DispatchQueue;
pub use registry::BackendRegistry;
pub use worker::{DeliveryOutcome, RetryPolicy, Worker, MAX_ATTEMPTS};
