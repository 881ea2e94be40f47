/// Counters shared by both policies, captured at one point in time.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct CacheMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub upsert_calls: u64,
    pub upsert_new: u64,
    pub upsert_updates: u64,

    pub evicted_entries: u64,
    pub removals: u64,
    pub clears: u64,

    // gauges captured at snapshot time
    pub cache_len: usize,
    pub capacity: usize,
}

impl CacheMetricsSnapshot {
    /// `get_hits / get_calls`, or `0.0` before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        if self.get_calls == 0 {
            0.0
        } else {
            self.get_hits as f64 / self.get_calls as f64
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct LruMetricsSnapshot {
    pub core: CacheMetricsSnapshot,
    pub moves_to_front: u64,
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct LfuMetricsSnapshot {
    pub core: CacheMetricsSnapshot,
    pub promotions: u64,
    pub min_frequency_rescans: u64,
}
