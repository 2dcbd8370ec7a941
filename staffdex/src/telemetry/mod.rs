//! Service telemetry for observability and diagnostics.
//!
//! Lock-free atomic counters recorded by the consistency engine and the
//! upstream client, copied out as a point-in-time snapshot for logging
//! or display.
//!
//! ```text
//! Engine / Client ----> DirectoryMetrics ----> MetricsSnapshot
//!                       (atomic counters)      (point-in-time copy)
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters recorded across the service. All methods are cheap enough
/// to call on every operation.
#[derive(Debug, Default)]
pub struct DirectoryMetrics {
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    full_refreshes: AtomicU64,
    upstream_calls: AtomicU64,
    upstream_retries: AtomicU64,
}

impl DirectoryMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// A read was served entirely from cache.
    pub fn cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// A read missed the cache or found it incomplete.
    pub fn cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    /// A full discard-and-repopulate refresh ran.
    pub fn full_refresh(&self) {
        self.full_refreshes.fetch_add(1, Ordering::Relaxed);
    }

    /// One HTTP attempt was issued upstream (retries count separately).
    pub fn upstream_call(&self) {
        self.upstream_calls.fetch_add(1, Ordering::Relaxed);
    }

    /// An attempt yielded no data and a retry was scheduled.
    pub fn upstream_retry(&self) {
        self.upstream_retries.fetch_add(1, Ordering::Relaxed);
    }

    /// Copies the current counter values.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
            full_refreshes: self.full_refreshes.load(Ordering::Relaxed),
            upstream_calls: self.upstream_calls.load(Ordering::Relaxed),
            upstream_retries: self.upstream_retries.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`DirectoryMetrics`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub full_refreshes: u64,
    pub upstream_calls: u64,
    pub upstream_retries: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_accumulate() {
        let metrics = DirectoryMetrics::new();

        metrics.cache_hit();
        metrics.cache_hit();
        metrics.cache_miss();
        metrics.full_refresh();
        metrics.upstream_call();
        metrics.upstream_retry();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.cache_hits, 2);
        assert_eq!(snapshot.cache_misses, 1);
        assert_eq!(snapshot.full_refreshes, 1);
        assert_eq!(snapshot.upstream_calls, 1);
        assert_eq!(snapshot.upstream_retries, 1);
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let metrics = DirectoryMetrics::new();
        let before = metrics.snapshot();
        metrics.cache_hit();
        let after = metrics.snapshot();

        assert_eq!(before.cache_hits, 0);
        assert_eq!(after.cache_hits, 1);
    }
}
