//! Harness counters
//!
//! - Counters only, monotonic
//! - Reset only when a new registry is created (once per run)

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Counters for a single harness run
#[derive(Debug, Default)]
pub struct HarnessMetrics {
    /// ResultSource fetches issued
    fetches: AtomicU64,
    /// Query texts sent to the storage session
    queries: AtomicU64,
    /// Rows bulk-inserted into the session relation
    rows_inserted: AtomicU64,
    /// Individual comparator evaluations
    comparisons: AtomicU64,
    /// Pairs that passed the assertion matrix
    pairs_checked: AtomicU64,
    /// Randomized fetches redrawn after a collision
    resamples: AtomicU64,
}

impl HarnessMetrics {
    /// Create a new registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_fetches(&self) {
        self.fetches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_queries(&self) {
        self.queries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_rows_inserted(&self, rows: u64) {
        self.rows_inserted.fetch_add(rows, Ordering::Relaxed);
    }

    pub fn add_comparisons(&self, count: u64) {
        self.comparisons.fetch_add(count, Ordering::Relaxed);
    }

    pub fn increment_pairs_checked(&self) {
        self.pairs_checked.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_resamples(&self) {
        self.resamples.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all counters as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            fetches: self.fetches.load(Ordering::Relaxed),
            queries: self.queries.load(Ordering::Relaxed),
            rows_inserted: self.rows_inserted.load(Ordering::Relaxed),
            comparisons: self.comparisons.load(Ordering::Relaxed),
            pairs_checked: self.pairs_checked.load(Ordering::Relaxed),
            resamples: self.resamples.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub fetches: u64,
    pub queries: u64,
    pub rows_inserted: u64,
    pub comparisons: u64,
    pub pairs_checked: u64,
    pub resamples: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registry_has_zero_values() {
        let snapshot = HarnessMetrics::new().snapshot();
        assert_eq!(snapshot.fetches, 0);
        assert_eq!(snapshot.queries, 0);
        assert_eq!(snapshot.comparisons, 0);
        assert_eq!(snapshot.resamples, 0);
    }

    #[test]
    fn test_increment_counters() {
        let metrics = HarnessMetrics::new();

        metrics.increment_fetches();
        metrics.increment_fetches();
        metrics.increment_queries();
        metrics.add_rows_inserted(5);
        metrics.add_comparisons(8);
        metrics.increment_pairs_checked();
        metrics.increment_resamples();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.fetches, 2);
        assert_eq!(snapshot.queries, 1);
        assert_eq!(snapshot.rows_inserted, 5);
        assert_eq!(snapshot.comparisons, 8);
        assert_eq!(snapshot.pairs_checked, 1);
        assert_eq!(snapshot.resamples, 1);
    }

    #[test]
    fn test_snapshot_serializes() {
        let metrics = HarnessMetrics::new();
        metrics.add_comparisons(80);
        let json = serde_json::to_value(metrics.snapshot()).unwrap();
        assert_eq!(json["comparisons"], 80);
    }
}
