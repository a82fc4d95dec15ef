//! Single-slot latest-value publisher.
//!
//! Each publication overwrites the slot. A subscriber that falls behind never
//! sees a backlog, only the newest value the next time it looks. Built on
//! `tokio::sync::watch`, which has exactly these semantics.
//!
//! Publishers sharing a [`PublishClock`] stamp each publication from one
//! counter, so the order of publications across several publishers can be
//! read back afterwards.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// Monotonic counter shared by publishers. Stamps start at 1.
#[derive(Debug, Clone, Default)]
pub struct PublishClock {
    next: Arc<AtomicU64>,
}

impl PublishClock {
    pub fn new() -> Self {
        Self::default()
    }

    fn tick(&self) -> u64 {
        self.next.fetch_add(1, Ordering::SeqCst) + 1
    }
}

/// Write side, owned by a single writer.
#[derive(Debug)]
pub struct LatestPublisher<T> {
    tx: watch::Sender<Option<T>>,
    published: AtomicU64,
    clock: PublishClock,
    /// Stamp of the latest publication, 0 before the first.
    last_stamp: AtomicU64,
}

impl<T: Clone> LatestPublisher<T> {
    /// A publisher with no value yet. Subscribers see nothing until the first
    /// publication.
    pub fn new() -> Self {
        Self::from_slot(None)
    }

    /// A publisher starting at `initial`. The initial value does not count as
    /// a publication.
    pub fn with_initial(initial: T) -> Self {
        Self::from_slot(Some(initial))
    }

    fn from_slot(slot: Option<T>) -> Self {
        let (tx, _) = watch::channel(slot);
        Self {
            tx,
            published: AtomicU64::new(0),
            clock: PublishClock::new(),
            last_stamp: AtomicU64::new(0),
        }
    }

    /// Stamp publications from `clock` instead of a private one.
    pub fn with_clock(mut self, clock: PublishClock) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the current value and wake every subscriber, even when the new
    /// value equals the old one.
    ///
    /// Count and stamp are updated before subscribers are woken.
    pub fn publish(&self, value: T) {
        self.last_stamp.store(self.clock.tick(), Ordering::SeqCst);
        self.published.fetch_add(1, Ordering::SeqCst);
        self.tx.send_replace(Some(value));
    }

    pub fn latest(&self) -> Option<T> {
        self.tx.borrow().clone()
    }

    /// Number of `publish` calls so far.
    pub fn publish_count(&self) -> u64 {
        self.published.load(Ordering::SeqCst)
    }

    /// Clock stamp of the latest publication.
    pub fn last_stamp(&self) -> Option<u64> {
        match self.last_stamp.load(Ordering::SeqCst) {
            0 => None,
            stamp => Some(stamp),
        }
    }

    /// New read-only handle. The current value counts as already seen.
    pub fn subscribe(&self) -> Subscription<T> {
        Subscription {
            rx: self.tx.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl<T: Clone> Default for LatestPublisher<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Read side of a [`LatestPublisher`].
#[derive(Debug, Clone)]
pub struct Subscription<T> {
    rx: watch::Receiver<Option<T>>,
}

impl<T: Clone> Subscription<T> {
    pub fn latest(&self) -> Option<T> {
        self.rx.borrow().clone()
    }

    /// Wait for a publication not yet seen by this subscription.
    ///
    /// Returns `None` once the publisher is gone.
    pub async fn next(&mut self) -> Option<T> {
        loop {
            self.rx.changed().await.ok()?;
            if let Some(value) = self.rx.borrow_and_update().clone() {
                return Some(value);
            }
        }
    }

    /// Wait until the current value satisfies `pred`, checking the current
    /// value first.
    ///
    /// Returns `None` if the publisher goes away first.
    pub async fn wait_for<F>(&mut self, mut pred: F) -> Option<T>
    where
        F: FnMut(&T) -> bool,
    {
        loop {
            let current = self.rx.borrow_and_update().clone();
            if let Some(value) = current.filter(|v| pred(v)) {
                return Some(value);
            }
            self.rx.changed().await.ok()?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_empty_publisher() {
        let publisher: LatestPublisher<u32> = LatestPublisher::new();
        assert_eq!(publisher.latest(), None);
        assert_eq!(publisher.subscribe().latest(), None);
        assert_eq!(publisher.publish_count(), 0);
    }

    #[test]
    fn test_initial_value_is_not_a_publication() {
        let publisher = LatestPublisher::with_initial("start");
        assert_eq!(publisher.latest(), Some("start"));
        assert_eq!(publisher.publish_count(), 0);
    }

    #[test]
    fn test_publish_without_subscribers() {
        let publisher = LatestPublisher::new();
        publisher.publish(1);
        publisher.publish(2);
        assert_eq!(publisher.latest(), Some(2));
        assert_eq!(publisher.publish_count(), 2);
    }

    #[tokio::test]
    async fn test_slow_subscriber_sees_only_newest() {
        let publisher = LatestPublisher::new();
        let mut sub = publisher.subscribe();

        publisher.publish(1);
        publisher.publish(2);
        publisher.publish(3);

        assert_eq!(sub.next().await, Some(3));
        let pending = tokio::time::timeout(Duration::from_millis(20), sub.next()).await;
        assert!(pending.is_err(), "no backlog expected");
    }

    #[tokio::test]
    async fn test_equal_values_still_notify() {
        let publisher = LatestPublisher::with_initial(7);
        let mut sub = publisher.subscribe();

        publisher.publish(7);
        assert_eq!(sub.next().await, Some(7));
        publisher.publish(7);
        assert_eq!(sub.next().await, Some(7));
        assert_eq!(publisher.publish_count(), 2);
    }

    #[tokio::test]
    async fn test_next_returns_none_when_publisher_dropped() {
        let publisher: LatestPublisher<u8> = LatestPublisher::new();
        let mut sub = publisher.subscribe();
        drop(publisher);
        assert_eq!(sub.next().await, None);
    }

    #[tokio::test]
    async fn test_wait_for_checks_current_value() {
        let publisher = LatestPublisher::with_initial(5);
        let mut sub = publisher.subscribe();
        assert_eq!(sub.wait_for(|v| *v == 5).await, Some(5));
    }

    #[tokio::test]
    async fn test_wait_for_future_value() {
        let publisher = std::sync::Arc::new(LatestPublisher::with_initial(0));
        let mut sub = publisher.subscribe();

        let writer = publisher.clone();
        tokio::spawn(async move {
            for i in 1..=10 {
                writer.publish(i);
                tokio::task::yield_now().await;
            }
        });

        assert_eq!(sub.wait_for(|v| *v == 10).await, Some(10));
    }

    #[test]
    fn test_shared_clock_orders_publications() {
        let clock = PublishClock::new();
        let numbers = LatestPublisher::new().with_clock(clock.clone());
        let words = LatestPublisher::with_initial("idle").with_clock(clock);
        assert_eq!(numbers.last_stamp(), None);
        assert_eq!(words.last_stamp(), None);

        numbers.publish(1);
        words.publish("busy");
        numbers.publish(2);

        assert_eq!(words.last_stamp(), Some(2));
        assert_eq!(numbers.last_stamp(), Some(3));
    }

    #[test]
    fn test_subscriber_count() {
        let publisher: LatestPublisher<u8> = LatestPublisher::new();
        let a = publisher.subscribe();
        let _b = a.clone();
        assert_eq!(publisher.subscriber_count(), 2);
    }
}
