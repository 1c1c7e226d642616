//! Dispatch counters for in-process introspection

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters shared by every worker of one notifier
#[derive(Debug, Default)]
pub struct DispatchMetrics {
    /// Notifications accepted into the queue
    submitted_count: AtomicU64,
    /// Notifications delivered
    delivered_count: AtomicU64,
    /// Individual failed send attempts
    failed_attempt_count: AtomicU64,
    /// Notifications dropped because no backend matched the channel
    not_found_count: AtomicU64,
    /// Notifications abandoned after the last attempt failed
    exhausted_count: AtomicU64,
}

impl DispatchMetrics {
    /// Create new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submitted_count(&self) -> u64 {
        self.submitted_count.load(Ordering::Relaxed)
    }

    pub fn inc_submitted_count(&self) {
        self.submitted_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn delivered_count(&self) -> u64 {
        self.delivered_count.load(Ordering::Relaxed)
    }

    pub fn inc_delivered_count(&self) {
        self.delivered_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn failed_attempt_count(&self) -> u64 {
        self.failed_attempt_count.load(Ordering::Relaxed)
    }

    pub fn inc_failed_attempt_count(&self) {
        self.failed_attempt_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn not_found_count(&self) -> u64 {
        self.not_found_count.load(Ordering::Relaxed)
    }

    pub fn inc_not_found_count(&self) {
        self.not_found_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn exhausted_count(&self) -> u64 {
        self.exhausted_count.load(Ordering::Relaxed)
    }

    pub fn inc_exhausted_count(&self) {
        self.exhausted_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot of all counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            submitted_count: self.submitted_count(),
            delivered_count: self.delivered_count(),
            failed_attempt_count: self.failed_attempt_count(),
            not_found_count: self.not_found_count(),
            exhausted_count: self.exhausted_count(),
        }
    }
}

/// Snapshot of dispatch counters (for reporting)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub submitted_count: u64,
    pub delivered_count: u64,
    pub failed_attempt_count: u64,
    pub not_found_count: u64,
    pub exhausted_count: u64,
}

impl MetricsSnapshot {
    /// Notifications that reached a terminal outcome
    pub fn completed_count(&self) -> u64 {
        self.delivered_count + self.not_found_count + self.exhausted_count
    }
}
