//! Notifier - facade over the registry, the dispatch queue and the worker pool

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use contracts::{BackendConfig, DeliveryBackend, DispatchConfig, Notification};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

use crate::backends::create_backend;
use crate::error::DispatcherError;
use crate::metrics::{DispatchMetrics, MetricsSnapshot};
use crate::queue::DispatchQueue;
use crate::registry::BackendRegistry;
use crate::worker::{RetryPolicy, Worker};

/// Notifier configuration
#[derive(Debug, Clone)]
pub struct NotifierConfig {
    /// Dispatch queue capacity
    pub queue_capacity: usize,
    /// Fixed delay between delivery attempts
    pub retry_delay: Duration,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self::from(&DispatchConfig::default())
    }
}

impl From<&DispatchConfig> for NotifierConfig {
    fn from(config: &DispatchConfig) -> Self {
        Self {
            queue_capacity: config.queue_capacity,
            retry_delay: config.retry_delay(),
        }
    }
}

/// Notification dispatcher
///
/// Submission is fire-and-forget: `submit` returns once notifications are
/// buffered, and workers report outcomes through logs and metrics only.
pub struct Notifier {
    registry: Arc<BackendRegistry>,
    queue: Arc<DispatchQueue>,
    retry: RetryPolicy,
    metrics: Arc<DispatchMetrics>,
    workers: Mutex<Vec<JoinHandle<()>>>,
    next_worker_id: AtomicUsize,
}

impl Notifier {
    /// Create a notifier with no backends and no running workers
    pub fn new(config: NotifierConfig) -> Self {
        Self {
            registry: Arc::new(BackendRegistry::new()),
            queue: Arc::new(DispatchQueue::new(config.queue_capacity)),
            retry: RetryPolicy::fixed(config.retry_delay),
            metrics: Arc::new(DispatchMetrics::new()),
            workers: Mutex::new(Vec::new()),
            next_worker_id: AtomicUsize::new(0),
        }
    }

    /// Spawn `worker_count` workers on the shared queue
    ///
    /// Each call adds workers; nothing guards against calling it twice.
    /// Must be called from within a Tokio runtime.
    #[instrument(name = "notifier_start", skip(self))]
    pub fn start(&self, worker_count: usize) {
        let mut workers = self.workers.lock().unwrap_or_else(PoisonError::into_inner);

        for _ in 0..worker_count {
            let id = self.next_worker_id.fetch_add(1, Ordering::Relaxed);
            let worker = Worker::new(
                id,
                Arc::clone(&self.queue),
                Arc::clone(&self.registry),
                self.retry,
                Arc::clone(&self.metrics),
            );
            workers.push(tokio::spawn(worker.run()));
            observability::record_worker_started();
        }

        info!(
            started = worker_count,
            total = workers.len(),
            retry_delay_ms = self.retry.delay_ms(),
            "Workers started"
        );
    }

    /// Buffer notifications for delivery, in order
    ///
    /// Waits while the queue is full. Delivery outcomes are never returned.
    ///
    /// # Errors
    /// `QueueClosed` after [`shutdown`](Self::shutdown).
    pub async fn submit<I>(&self, notifications: I) -> Result<(), DispatcherError>
    where
        I: IntoIterator<Item = Notification>,
    {
        for notification in notifications {
            let channel = notification.channel.clone();
            self.queue.enqueue([notification]).await?;
            self.metrics.inc_submitted_count();
            observability::record_submitted(&channel);
        }
        observability::record_queue_depth(self.queue.len());
        Ok(())
    }

    /// Register a delivery backend under its name
    ///
    /// # Errors
    /// `DuplicateBackend` if the name is already registered.
    pub fn register_backend(&self, backend: Arc<dyn DeliveryBackend>) -> Result<(), DispatcherError> {
        self.registry.register(backend)
    }

    /// Names of all registered channels, in no particular order
    pub fn channel_names(&self) -> Vec<String> {
        self.registry.names()
    }

    /// Notifications waiting in the queue
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn queue_capacity(&self) -> usize {
        self.queue.capacity()
    }

    /// Workers whose task is still running
    pub fn running_workers(&self) -> usize {
        self.workers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|handle| !handle.is_finished())
            .count()
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Snapshot of dispatch counters
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Close the queue and wait for workers to drain what is already buffered
    ///
    /// Intended for process exit; further submissions fail with `QueueClosed`.
    #[instrument(name = "notifier_shutdown", skip(self))]
    pub async fn shutdown(&self) {
        self.queue.close();

        let workers = std::mem::take(
            &mut *self.workers.lock().unwrap_or_else(PoisonError::into_inner),
        );
        info!(
            workers = workers.len(),
            pending = self.queue.len(),
            "Draining dispatch queue"
        );

        for handle in workers {
            if let Err(e) = handle.await {
                error!(error = ?e, "Worker task panicked");
            }
        }

        debug!("Notifier shutdown complete");
    }
}

/// Convenience function to create a notifier from configuration
///
/// Every backend is built from its config and registered. A backend whose name
/// is already taken is skipped with a warning; the first registration wins.
///
/// # Errors
/// `BackendCreation` if a backend cannot be built from its parameters.
#[instrument(name = "notifier_create", skip(dispatch, backends), fields(backend_count = backends.len()))]
pub fn create_notifier(
    dispatch: &DispatchConfig,
    backends: &[BackendConfig],
) -> Result<Notifier, DispatcherError> {
    let notifier = Notifier::new(NotifierConfig::from(dispatch));

    for config in backends {
        let backend = create_backend(config)?;
        match notifier.register_backend(backend) {
            Ok(()) => {
                info!(backend = %config.name, backend_type = ?config.backend_type, "Backend registered");
            }
            Err(e @ DispatcherError::DuplicateBackend { .. }) => {
                warn!(error = %e, "Skipping backend");
            }
            Err(e) => return Err(e),
        }
    }

    Ok(notifier)
}
