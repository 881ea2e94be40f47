use crate::metrics::snapshot::{CacheMetricsSnapshot, LfuMetricsSnapshot, LruMetricsSnapshot};
use crate::metrics::traits::{CoreMetricsRecorder, LfuMetricsRecorder, LruMetricsRecorder};

#[derive(Debug, Default, Clone)]
pub struct CacheMetrics {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub upsert_calls: u64,
    pub upsert_new: u64,
    pub upsert_updates: u64,
    pub evicted_entries: u64,
    pub removals: u64,
    pub clears: u64,
}

impl CacheMetrics {
    pub fn new() -> CacheMetrics {
        Self::default()
    }

    pub fn snapshot(&self, cache_len: usize, capacity: usize) -> CacheMetricsSnapshot {
        CacheMetricsSnapshot {
            get_calls: self.get_calls,
            get_hits: self.get_hits,
            get_misses: self.get_misses,
            upsert_calls: self.upsert_calls,
            upsert_new: self.upsert_new,
            upsert_updates: self.upsert_updates,
            evicted_entries: self.evicted_entries,
            removals: self.removals,
            clears: self.clears,
            cache_len,
            capacity,
        }
    }
}

impl CoreMetricsRecorder for CacheMetrics {
    fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }

    fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }

    fn record_upsert_new(&mut self) {
        self.upsert_calls += 1;
        self.upsert_new += 1;
    }

    fn record_upsert_update(&mut self) {
        self.upsert_calls += 1;
        self.upsert_updates += 1;
    }

    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }

    fn record_remove(&mut self) {
        self.removals += 1;
    }

    fn record_clear(&mut self) {
        self.clears += 1;
    }
}

#[derive(Debug, Default, Clone)]
pub struct LruMetrics {
    pub core: CacheMetrics,
    pub moves_to_front: u64,
}

impl LruMetrics {
    pub fn snapshot(&self, cache_len: usize, capacity: usize) -> LruMetricsSnapshot {
        LruMetricsSnapshot {
            core: self.core.snapshot(cache_len, capacity),
            moves_to_front: self.moves_to_front,
        }
    }
}

impl CoreMetricsRecorder for LruMetrics {
    fn record_get_hit(&mut self) {
        self.core.record_get_hit();
    }

    fn record_get_miss(&mut self) {
        self.core.record_get_miss();
    }

    fn record_upsert_new(&mut self) {
        self.core.record_upsert_new();
    }

    fn record_upsert_update(&mut self) {
        self.core.record_upsert_update();
    }

    fn record_evicted_entry(&mut self) {
        self.core.record_evicted_entry();
    }

    fn record_remove(&mut self) {
        self.core.record_remove();
    }

    fn record_clear(&mut self) {
        self.core.record_clear();
    }
}

impl LruMetricsRecorder for LruMetrics {
    fn record_move_to_front(&mut self) {
        self.moves_to_front += 1;
    }
}

#[derive(Debug, Default, Clone)]
pub struct LfuMetrics {
    pub core: CacheMetrics,
    pub promotions: u64,
    pub min_frequency_rescans: u64,
}

impl LfuMetrics {
    pub fn snapshot(&self, cache_len: usize, capacity: usize) -> LfuMetricsSnapshot {
        LfuMetricsSnapshot {
            core: self.core.snapshot(cache_len, capacity),
            promotions: self.promotions,
            min_frequency_rescans: self.min_frequency_rescans,
        }
    }
}

impl CoreMetricsRecorder for LfuMetrics {
    fn record_get_hit(&mut self) {
        self.core.record_get_hit();
    }

    fn record_get_miss(&mut self) {
        self.core.record_get_miss();
    }

    fn record_upsert_new(&mut self) {
        self.core.record_upsert_new();
    }

    fn record_upsert_update(&mut self) {
        self.core.record_upsert_update();
    }

    fn record_evicted_entry(&mut self) {
        self.core.record_evicted_entry();
    }

    fn record_remove(&mut self) {
        self.core.record_remove();
    }

    fn record_clear(&mut self) {
        self.core.record_clear();
    }
}

impl LfuMetricsRecorder for LfuMetrics {
    fn record_promotion(&mut self) {
        self.promotions += 1;
    }

    fn record_min_frequency_rescan(&mut self) {
        self.min_frequency_rescans += 1;
    }
}
