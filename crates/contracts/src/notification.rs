//! Notification - the unit of dispatch work
//!
//! A `Notification` is created by the producer at submission time, buffered in
//! the dispatch queue, and discarded once a worker has finished with it.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A (channel, message) pair queued for delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Name of the target delivery backend
    pub channel: String,

    /// Message payload handed to the backend
    pub message: String,
}

impl Notification {
    /// Create a new notification
    pub fn new(channel: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            message: message.into(),
        }
    }
}

/// Submission payload accepted by the HTTP layer
///
/// One request addresses several channels with a single message.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct NotificationRequest {
    /// Target channel names
    #[serde(default)]
    #[validate(length(min = 1, message = "at least one channel is required"))]
    pub channels: Vec<String>,

    /// Message to deliver on every channel
    #[serde(default)]
    #[validate(length(min = 1, message = "message cannot be empty"))]
    pub message: String,
}

impl NotificationRequest {
    /// Expand the request into one notification per channel, preserving channel order
    pub fn into_notifications(self) -> Vec<Notification> {
        let message = self.message;
        self.channels
            .into_iter()
            .map(|channel| Notification::new(channel, message.clone()))
            .collect()
    }
}
