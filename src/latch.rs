//! # Shutdown Latch
//!
//! A one-shot countdown signal. The lifecycle service counts it down on
//! `close()`; any number of other tasks can wait for it to reach zero.
//!
//! ```rust,ignore
//! let latch = ShutdownLatch::new();
//! let waiter = latch.clone();
//! tokio::spawn(async move { service.close().await });
//! assert!(waiter.wait_timeout(Duration::from_secs(1)).await);
//! ```
//!
//! The latch never blocks the writer. Counting down a released latch does
//! nothing. Waiters pick their own timeout via [`ShutdownLatch::wait_timeout`].

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

/// Cloneable handle to a shared countdown.
///
/// All clones observe the same count. The count lives in a `watch` channel
/// so waiters are woken exactly when it changes.
#[derive(Debug, Clone)]
pub struct ShutdownLatch {
    count: Arc<watch::Sender<usize>>,
}

impl ShutdownLatch {
    /// Creates a latch with a count of one.
    pub fn new() -> Self {
        Self::with_count(1)
    }

    /// Creates a latch that is released after `count` calls to [`count_down`](Self::count_down).
    pub fn with_count(count: usize) -> Self {
        let (sender, _) = watch::channel(count);
        Self {
            count: Arc::new(sender),
        }
    }

    /// Decrements the count.
    ///
    /// Returns `true` if this call changed the count, `false` if the latch was
    /// already released.
    pub fn count_down(&self) -> bool {
        self.count.send_if_modified(|count| {
            if *count == 0 {
                return false;
            }
            *count -= 1;
            true
        })
    }

    /// Current count.
    pub fn count(&self) -> usize {
        *self.count.borrow()
    }

    pub fn is_released(&self) -> bool {
        self.count() == 0
    }

    /// Waits until the count reaches zero.
    pub async fn wait(&self) {
        let mut receiver = self.count.subscribe();
        // The sender lives as long as `self`, so the channel cannot close here.
        let _ = receiver.wait_for(|count| *count == 0).await;
    }

    /// Waits up to `timeout` for the count to reach zero.
    ///
    /// Returns `true` if the latch was released in time.
    pub async fn wait_timeout(&self, timeout: Duration) -> bool {
        tokio::time::timeout(timeout, self.wait()).await.is_ok()
    }
}

impl Default for ShutdownLatch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_latch_starts_at_one() {
        let latch = ShutdownLatch::new();
        assert_eq!(latch.count(), 1);
        assert!(!latch.is_released());
    }

    #[test]
    fn test_count_down_releases_once() {
        let latch = ShutdownLatch::new();

        assert!(latch.count_down());
        assert!(latch.is_released());

        // Already released: no-op, no panic, no block
        assert!(!latch.count_down());
        assert!(!latch.count_down());
        assert_eq!(latch.count(), 0);
    }

    #[test]
    fn test_clones_share_count() {
        let latch = ShutdownLatch::with_count(2);
        let other = latch.clone();

        other.count_down();
        assert_eq!(latch.count(), 1);
        latch.count_down();
        assert!(other.is_released());
    }

    #[tokio::test]
    async fn test_wait_returns_immediately_when_released() {
        let latch = ShutdownLatch::new();
        latch.count_down();
        assert!(latch.wait_timeout(Duration::from_millis(10)).await);
    }

    #[tokio::test]
    async fn test_wait_times_out_when_never_released() {
        let latch = ShutdownLatch::new();
        assert!(!latch.wait_timeout(Duration::from_millis(50)).await);
    }

    #[tokio::test]
    async fn test_waiter_on_other_task_is_released() {
        let latch = ShutdownLatch::new();
        let waiter = latch.clone();

        let handle = tokio::spawn(async move { waiter.wait_timeout(Duration::from_secs(1)).await });

        tokio::time::sleep(Duration::from_millis(10)).await;
        latch.count_down();

        assert!(handle.await.unwrap());
    }
}
