//! Transient "just added" feedback tracker.
//!
//! Purely cosmetic state keyed by product id, decoupled from cart
//! correctness: the marker set drives optimistic UI feedback and nothing
//! else. Each marker is cleared by its own cancelable timer; a repeated
//! `mark_added` for the same id supersedes the pending removal so an old
//! timer can never clear feedback that a newer add is still showing.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::task::JoinHandle;
use tracing::trace;

struct TimerEntry {
    generation: u64,
    handle: JoinHandle<()>,
}

pub struct FeedbackTracker {
    /// Marker set: product id -> generation of the add that placed it.
    recent: Arc<DashMap<String, u64>>,
    /// Pending removals, one cancelable timer per product id.
    timers: Arc<DashMap<String, TimerEntry>>,
    generation: AtomicU64,
    ttl: Duration,
}

impl FeedbackTracker {
    pub fn new(ttl: Duration) -> Self {
        Self {
            recent: Arc::new(DashMap::new()),
            timers: Arc::new(DashMap::new()),
            generation: AtomicU64::new(0),
            ttl,
        }
    }

    /// Marks `product_id` as just added and schedules the marker's removal
    /// after the configured delay.
    ///
    /// Calling again for the same id before the delay elapses cancels the
    /// pending removal and anchors a fresh one to this call. The expiry task
    /// only clears state belonging to its own generation, so a superseded
    /// timer that has already woken cannot corrupt newer feedback.
    pub fn mark_added(&self, product_id: &str) {
        let generation = self.generation.fetch_add(1, Ordering::Relaxed);
        self.recent.insert(product_id.to_string(), generation);

        let recent = Arc::clone(&self.recent);
        let timers = Arc::clone(&self.timers);
        let key = product_id.to_string();
        let ttl = self.ttl;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            recent.remove_if(&key, |_, marked| *marked == generation);
            timers.remove_if(&key, |_, entry| entry.generation == generation);
            trace!(product_id = %key, "feedback marker expired");
        });

        if let Some(previous) = self
            .timers
            .insert(product_id.to_string(), TimerEntry { generation, handle })
        {
            previous.handle.abort();
        }
    }

    /// Whether `product_id` is currently marked as just added.
    pub fn is_recent(&self, product_id: &str) -> bool {
        self.recent.contains_key(product_id)
    }

    /// All currently marked product ids.
    pub fn recent_ids(&self) -> Vec<String> {
        self.recent.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Cancels the pending removal for `product_id` and drops its marker.
    pub fn cancel(&self, product_id: &str) {
        if let Some((_, entry)) = self.timers.remove(product_id) {
            entry.handle.abort();
        }
        self.recent.remove(product_id);
    }

    /// Cancels every pending timer and clears all markers. Used on teardown
    /// so no stale timer fires afterwards.
    pub fn shutdown(&self) {
        for entry in self.timers.iter() {
            entry.value().handle.abort();
        }
        self.timers.clear();
        self.recent.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{advance, Duration};

    // Let spawned expiry tasks run after the clock moved.
    async fn settle() {
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
    }

    fn tracker() -> FeedbackTracker {
        FeedbackTracker::new(Duration::from_secs(2))
    }

    #[tokio::test(start_paused = true)]
    async fn marker_expires_after_the_delay() {
        let feedback = tracker();
        feedback.mark_added("p1");
        // Let the just-spawned expiry task register its timer before the
        // paused clock advances, so its deadline anchors at t=0.
        settle().await;
        assert!(feedback.is_recent("p1"));

        advance(Duration::from_millis(1900)).await;
        settle().await;
        assert!(feedback.is_recent("p1"));

        advance(Duration::from_millis(200)).await;
        settle().await;
        assert!(!feedback.is_recent("p1"));
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_mark_is_anchored_to_the_second_call() {
        let feedback = tracker();

        feedback.mark_added("p1");
        settle().await;
        advance(Duration::from_millis(500)).await;
        feedback.mark_added("p1");
        settle().await;

        // 1.9s after the second call (2.4s after the first): still present.
        advance(Duration::from_millis(1900)).await;
        settle().await;
        assert!(feedback.is_recent("p1"));

        // 2.1s after the second call: gone.
        advance(Duration::from_millis(200)).await;
        settle().await;
        assert!(!feedback.is_recent("p1"));
    }

    #[tokio::test(start_paused = true)]
    async fn markers_are_independent_per_product() {
        let feedback = tracker();

        feedback.mark_added("p1");
        settle().await;
        advance(Duration::from_millis(1500)).await;
        feedback.mark_added("p2");
        settle().await;

        advance(Duration::from_millis(600)).await;
        settle().await;
        assert!(!feedback.is_recent("p1"));
        assert!(feedback.is_recent("p2"));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_drops_the_marker_immediately() {
        let feedback = tracker();
        feedback.mark_added("p1");

        feedback.cancel("p1");
        assert!(!feedback.is_recent("p1"));

        // The aborted timer must not resurrect or clear anything later.
        advance(Duration::from_secs(3)).await;
        settle().await;
        assert!(!feedback.is_recent("p1"));
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_cancels_all_pending_timers() {
        let feedback = tracker();
        feedback.mark_added("p1");
        feedback.mark_added("p2");

        feedback.shutdown();
        assert!(feedback.recent_ids().is_empty());

        advance(Duration::from_secs(3)).await;
        settle().await;
        assert!(feedback.recent_ids().is_empty());
    }
}
