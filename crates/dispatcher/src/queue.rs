//! DispatchQueue - bounded FIFO between submission and workers
//!
//! Multi-producer, multi-consumer. A full queue blocks producers until a
//! worker frees a slot; nothing is dropped.

use async_channel::{bounded, Receiver, Sender};
use contracts::Notification;

use crate::error::DispatcherError;

/// Bounded notification buffer shared by producers and workers
#[derive(Debug)]
pub struct DispatchQueue {
    tx: Sender<Notification>,
    rx: Receiver<Notification>,
    capacity: usize,
}

impl DispatchQueue {
    /// Create a queue holding at most `capacity` pending notifications
    ///
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, rx) = bounded(capacity);
        Self { tx, rx, capacity }
    }

    /// Append notifications to the tail, in order
    ///
    /// Waits for free space whenever the queue is full.
    ///
    /// # Errors
    /// `QueueClosed` once [`close`](Self::close) has been called; items
    /// before the failing one stay queued.
    pub async fn enqueue<I>(&self, items: I) -> Result<usize, DispatcherError>
    where
        I: IntoIterator<Item = Notification>,
    {
        let mut count = 0;
        for item in items {
            self.tx
                .send(item)
                .await
                .map_err(|_| DispatcherError::QueueClosed)?;
            count += 1;
        }
        Ok(count)
    }

    /// Pop the head, waiting while the queue is empty
    ///
    /// Returns `None` only after the queue is closed and fully drained.
    pub async fn dequeue(&self) -> Option<Notification> {
        self.rx.recv().await.ok()
    }

    /// Number of notifications currently buffered
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Stop accepting new notifications; buffered ones remain dequeueable
    ///
    /// Returns `false` if the queue was already closed.
    pub fn close(&self) -> bool {
        self.tx.close()
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    fn notification(channel: &str, message: &str) -> Notification {
        Notification::new(channel, message)
    }

    #[tokio::test]
    async fn test_fifo_order() {
        let queue = DispatchQueue::new(10);
        let items = vec![
            notification("foo", "1"),
            notification("bar", "2"),
            notification("baz", "3"),
        ];

        assert_eq!(queue.enqueue(items.clone()).await.unwrap(), 3);
        assert_eq!(queue.len(), 3);

        for expected in items {
            assert_eq!(queue.dequeue().await, Some(expected));
        }
        assert!(queue.is_empty());
    }

    #[tokio::test]
    async fn test_full_queue_blocks_producer() {
        let queue = Arc::new(DispatchQueue::new(2));
        queue
            .enqueue(vec![notification("a", "1"), notification("a", "2")])
            .await
            .unwrap();

        let producer = {
            let queue = Arc::clone(&queue);
            tokio::spawn(async move { queue.enqueue(vec![notification("a", "3")]).await })
        };

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!producer.is_finished(), "producer should wait for space");
        assert_eq!(queue.len(), 2);

        assert_eq!(queue.dequeue().await.unwrap().message, "1");
        producer.await.unwrap().unwrap();
        assert_eq!(queue.len(), 2);
    }

    #[tokio::test]
    async fn test_close_drains_then_ends() {
        let queue = DispatchQueue::new(4);
        queue.enqueue(vec![notification("a", "1")]).await.unwrap();

        assert!(queue.close());
        assert!(queue.is_closed());
        assert!(matches!(
            queue.enqueue(vec![notification("a", "2")]).await,
            Err(DispatcherError::QueueClosed)
        ));

        assert_eq!(queue.dequeue().await.unwrap().message, "1");
        assert_eq!(queue.dequeue().await, None);
    }

    #[test]
    fn test_zero_capacity_is_raised() {
        let queue = DispatchQueue::new(0);
        assert_eq!(queue.capacity(), 1);
    }
}
