//! # Metrics Trait Hierarchy
//!
//! Mirrors the cache trait design by separating *recording*, *snapshotting*
//! and *export* into small traits, so policy code never depends on how the
//! numbers are consumed.
//!
//! ```text
//!                  ┌─────────────────────────────┐
//!                  │     CoreMetricsRecorder     │
//!                  │  get_hit / get_miss         │
//!                  │  upsert_new / upsert_update │
//!                  │  evicted / remove / clear   │
//!                  └──────────────┬──────────────┘
//!                    ┌────────────┴────────────┐
//!                    ▼                         ▼
//!           ┌─────────────────┐       ┌─────────────────┐
//!           │ LruMetrics      │       │ LfuMetrics      │
//!           │ Recorder        │       │ Recorder        │
//!           └─────────────────┘       └─────────────────┘
//!
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │    │ MetricsExporter<S>           │
//!   │ (tests, dashboards)          │    │ (production monitoring)      │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```

/// Common counters for both policies.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_upsert_new(&mut self);
    fn record_upsert_update(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_remove(&mut self);
    fn record_clear(&mut self);
}

/// Metrics for LRU behavior (recency order).
pub trait LruMetricsRecorder: CoreMetricsRecorder {
    fn record_move_to_front(&mut self);
}

/// Metrics for LFU behavior (frequency order).
pub trait LfuMetricsRecorder: CoreMetricsRecorder {
    /// An id moved from bucket `f` to bucket `f + 1`.
    fn record_promotion(&mut self);
    /// The minimum frequency had to be recomputed after a removal.
    fn record_min_frequency_rescan(&mut self);
}

/// Snapshot provider for tests and dashboards.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Export/publish metrics to production monitoring backends.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
