//! Least Frequently Used (LFU) entity cache.
//!
//! Evicts the entity with the fewest recorded accesses. Among equally
//! frequent entities the one that has sat at that frequency longest goes
//! first. Frequencies start at 1 on admission and grow by one on every `get`
//! hit and every `upsert` of a resident id; they are never aged.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────────────┐
//! │                         LfuCore<ID, T> Layout                         │
//! │                                                                       │
//! │   entities: FxHashMap<ID, T>          buckets: FrequencyBuckets<ID>   │
//! │   ┌──────┬──────────────┐                                             │
//! │   │ id   │ entity       │             freq 1: [4] ─► [9]              │
//! │   ├──────┼──────────────┤                     ▲ oldest                │
//! │   │ 4    │ (4, "d")     │             freq 3: [2]                     │
//! │   │ 9    │ (9, "i")     │                                             │
//! │   │ 2    │ (2, "b")     │             min_freq: Some(1)               │
//! │   └──────┴──────────────┘                                             │
//! └───────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The buckets carry each id's frequency, so they double as the
//! id -> frequency map. `min_freq` always equals the lowest non-empty bucket
//! and is `None` exactly when the cache is empty.
//!
//! ## Operations
//!
//! | Operation | Effect                                                  | Time |
//! |-----------|---------------------------------------------------------|------|
//! | `get`     | hit: move id from bucket f to the back of bucket f + 1  | O(1) |
//! | `upsert`  | resident: replace value, then as `get`                  | O(1) |
//! |           | new at capacity: evict front of bucket `min_freq`       | O(1) |
//! | `remove`  | erase id; step the minimum up the bucket chain         | O(1) |
//!
//! ## Example
//!
//! ```
//! use idcache::policy::lfu::LfuCache;
//! use idcache::traits::EntityCache;
//!
//! let cache = LfuCache::new(2);
//! cache.upsert((1, "one"));
//! cache.upsert((2, "two"));
//! cache.get(&1);
//! cache.get(&1);
//! cache.upsert((3, "three"));
//!
//! assert_eq!(cache.get(&2), None);
//! assert_eq!(cache.get(&1), Some((1, "one")));
//! assert_eq!(cache.get(&3), Some((3, "three")));
//! ```

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::ds::FrequencyBuckets;
use crate::error::InvariantError;
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::LfuMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LfuMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{CoreMetricsRecorder, LfuMetricsRecorder, MetricsSnapshotProvider};
use crate::traits::{CoreCache, EntityCache, HasId, LfuCacheTrait, MutableCache};

const POLICY: &str = "lfu";

/// Single-threaded LFU core.
pub struct LfuCore<ID, T> {
    entities: FxHashMap<ID, T>,
    buckets: FrequencyBuckets<ID>,
    min_freq: Option<u64>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: LfuMetrics,
}

impl<ID, T> LfuCore<ID, T>
where
    ID: Eq + Hash + Clone,
    T: HasId<ID>,
{
    /// Creates an empty core holding at most `capacity` entities.
    ///
    /// # Example
    ///
    /// ```
    /// use idcache::policy::lfu::LfuCore;
    /// use idcache::traits::{CoreCache, LfuCacheTrait};
    ///
    /// let cache: LfuCore<u64, (u64, String)> = LfuCore::new(16);
    /// assert_eq!(cache.capacity(), 16);
    /// assert_eq!(cache.min_frequency(), None);
    /// ```
    pub fn new(capacity: usize) -> Self {
        LfuCore {
            entities: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            buckets: FrequencyBuckets::with_capacity(capacity),
            min_freq: None,
            capacity,
            #[cfg(feature = "metrics")]
            metrics: LfuMetrics::default(),
        }
    }

    /// Ids at `freq`, oldest arrival first.
    pub fn bucket_ids(&self, freq: u64) -> Vec<ID> {
        self.buckets.iter_bucket(freq).cloned().collect()
    }

    /// Verifies that entities, buckets and the tracked minimum agree.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.entities.len() != self.buckets.len() {
            return Err(InvariantError::new(format!(
                "{} entities but {} ids in frequency buckets",
                self.entities.len(),
                self.buckets.len()
            )));
        }
        if self.entities.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "{} resident entities exceed capacity {}",
                self.entities.len(),
                self.capacity
            )));
        }
        for (id, entity) in &self.entities {
            if self.buckets.frequency_of(id).is_none() {
                return Err(InvariantError::new("resident id has no frequency bucket"));
            }
            if entity.id() != *id {
                return Err(InvariantError::new(
                    "entity carries a different id than its map key",
                ));
            }
        }
        let lowest = self.buckets.lowest_frequency();
        if self.min_freq != lowest {
            return Err(InvariantError::new(format!(
                "tracked minimum frequency {:?} differs from lowest bucket {:?}",
                self.min_freq, lowest
            )));
        }
        Ok(())
    }

    /// Moves `id` from its bucket to the next one.
    fn touch(&mut self, id: &ID) {
        self.buckets
            .touch(id)
            .expect("resident id has a frequency");
        self.min_freq = self.buckets.lowest_frequency();

        #[cfg(feature = "metrics")]
        self.metrics.record_promotion();
    }

    fn evict_lfu(&mut self) {
        let freq = self
            .min_freq
            .expect("full lfu cache tracks a minimum frequency");
        let victim = self
            .buckets
            .pop_front(freq)
            .expect("minimum frequency bucket is non-empty");
        // The caller admits the new id at frequency 1 and resets the minimum.
        self.entities.remove(&victim);

        #[cfg(feature = "metrics")]
        self.metrics.record_evicted_entry();

        tracing::debug!(
            target: "idcache",
            policy = POLICY,
            frequency = freq,
            len = self.entities.len(),
            capacity = self.capacity,
            "evicted least frequently used entity"
        );
    }

    #[cfg(debug_assertions)]
    fn validate_invariants(&self) {
        self.buckets.debug_validate_invariants();
        debug_assert_eq!(self.entities.len(), self.buckets.len());
        debug_assert!(self.entities.len() <= self.capacity);
        debug_assert_eq!(self.min_freq.is_some(), !self.entities.is_empty());
    }
}

impl<ID, T> CoreCache<ID, T> for LfuCore<ID, T>
where
    ID: Eq + Hash + Clone,
    T: HasId<ID>,
{
    fn upsert(&mut self, entity: T) {
        if self.capacity == 0 {
            return;
        }
        let id = entity.id();

        if let Some(slot) = self.entities.get_mut(&id) {
            #[cfg(feature = "metrics")]
            self.metrics.record_upsert_update();

            *slot = entity;
            self.touch(&id);
        } else {
            #[cfg(feature = "metrics")]
            self.metrics.record_upsert_new();

            if self.entities.len() >= self.capacity {
                self.evict_lfu();
            }
            self.entities.insert(id.clone(), entity);
            self.buckets.push_back(1, id);
            self.min_freq = Some(1);
        }

        #[cfg(debug_assertions)]
        self.validate_invariants();
    }

    fn get(&mut self, id: &ID) -> Option<&T> {
        if !self.entities.contains_key(id) {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            tracing::trace!(target: "idcache", policy = POLICY, hit = false, "cache miss");
            return None;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();
        tracing::trace!(target: "idcache", policy = POLICY, hit = true, "cache hit");

        self.touch(id);
        self.entities.get(id)
    }

    #[inline]
    fn contains(&self, id: &ID) -> bool {
        self.entities.contains_key(id)
    }

    #[inline]
    fn len(&self) -> usize {
        self.entities.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        tracing::debug!(
            target: "idcache",
            policy = POLICY,
            dropped = self.entities.len(),
            "cleared cache"
        );
        self.entities.clear();
        self.buckets.clear();
        self.min_freq = None;
    }
}

impl<ID, T> MutableCache<ID, T> for LfuCore<ID, T>
where
    ID: Eq + Hash + Clone,
    T: HasId<ID>,
{
    fn remove(&mut self, id: &ID) -> Option<T> {
        let entity = self.entities.remove(id)?;
        let freq = self
            .buckets
            .frequency_of(id)
            .expect("resident id has a frequency");
        self.buckets.remove(freq, id);

        #[cfg(feature = "metrics")]
        self.metrics.record_remove();

        if self.min_freq == Some(freq) && self.buckets.is_bucket_empty(freq) {
            // The bucket chain already stepped to the next higher frequency.
            self.min_freq = self.buckets.lowest_frequency();

            #[cfg(feature = "metrics")]
            self.metrics.record_min_frequency_rescan();
        }

        #[cfg(debug_assertions)]
        self.validate_invariants();

        Some(entity)
    }
}

impl<ID, T> LfuCacheTrait<ID, T> for LfuCore<ID, T>
where
    ID: Eq + Hash + Clone,
    T: HasId<ID>,
{
    fn peek_lfu(&self) -> Option<&T> {
        let id = self.buckets.front(self.min_freq?)?;
        self.entities.get(id)
    }

    fn frequency(&self, id: &ID) -> Option<u64> {
        self.buckets.frequency_of(id)
    }

    fn min_frequency(&self) -> Option<u64> {
        self.min_freq
    }
}

impl<ID, T> Extend<T> for LfuCore<ID, T>
where
    ID: Eq + Hash + Clone,
    T: HasId<ID>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for entity in iter {
            self.upsert(entity);
        }
    }
}

impl<ID, T> fmt::Debug for LfuCore<ID, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LfuCore")
            .field("len", &self.entities.len())
            .field("capacity", &self.capacity)
            .field("min_freq", &self.min_freq)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "metrics")]
impl<ID, T> LfuCore<ID, T> {
    pub fn metrics_snapshot(&self) -> LfuMetricsSnapshot {
        self.metrics.snapshot(self.entities.len(), self.capacity)
    }
}

#[cfg(feature = "metrics")]
impl<ID, T> MetricsSnapshotProvider<LfuMetricsSnapshot> for LfuCore<ID, T> {
    fn snapshot(&self) -> LfuMetricsSnapshot {
        self.metrics_snapshot()
    }
}

/// Thread-safe LFU cache.
///
/// Clones share the same underlying core.
pub struct LfuCache<ID, T> {
    inner: Arc<Mutex<LfuCore<ID, T>>>,
}

impl<ID, T> Clone for LfuCache<ID, T> {
    fn clone(&self) -> Self {
        LfuCache {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<ID, T> fmt::Debug for LfuCache<ID, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let core = self.inner.lock();
        f.debug_struct("LfuCache")
            .field("len", &core.entities.len())
            .field("capacity", &core.capacity)
            .finish_non_exhaustive()
    }
}

impl<ID, T> LfuCache<ID, T>
where
    ID: Eq + Hash + Clone,
    T: HasId<ID>,
{
    /// Creates an empty cache holding at most `capacity` entities.
    pub fn new(capacity: usize) -> Self {
        LfuCache {
            inner: Arc::new(Mutex::new(LfuCore::new(capacity))),
        }
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    /// Checks residency without recording an access.
    pub fn contains(&self, id: &ID) -> bool {
        self.inner.lock().contains(id)
    }

    /// Access count of `id`, if resident.
    pub fn frequency(&self, id: &ID) -> Option<u64> {
        self.inner.lock().frequency(id)
    }

    /// Runs `f` with exclusive access to the core.
    pub fn with_core<R>(&self, f: impl FnOnce(&mut LfuCore<ID, T>) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

impl<ID, T> EntityCache<ID, T> for LfuCache<ID, T>
where
    ID: Eq + Hash + Clone + Send,
    T: HasId<ID> + Clone + Send,
{
    fn upsert(&self, entity: T) {
        self.inner.lock().upsert(entity);
    }

    fn get(&self, id: &ID) -> Option<T> {
        self.inner.lock().get(id).cloned()
    }

    fn remove(&self, id: &ID) {
        self.inner.lock().remove(id);
    }

    fn size(&self) -> usize {
        self.inner.lock().len()
    }

    fn clear(&self) {
        self.inner.lock().clear();
    }
}

#[cfg(feature = "metrics")]
impl<ID, T> LfuCache<ID, T> {
    pub fn metrics_snapshot(&self) -> LfuMetricsSnapshot {
        self.inner.lock().metrics_snapshot()
    }
}

#[cfg(feature = "metrics")]
impl<ID, T> MetricsSnapshotProvider<LfuMetricsSnapshot> for LfuCache<ID, T> {
    fn snapshot(&self) -> LfuMetricsSnapshot {
        self.metrics_snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(capacity: usize, ids: &[u32]) -> LfuCore<u32, (u32, u32)> {
        let mut cache = LfuCore::new(capacity);
        for &id in ids {
            cache.upsert((id, id * 10));
        }
        cache
    }

    mod basic_behavior {
        use super::*;

        #[test]
        fn test_new_entity_starts_at_frequency_one() {
            let cache = filled(3, &[1, 2]);
            assert_eq!(cache.frequency(&1), Some(1));
            assert_eq!(cache.frequency(&2), Some(1));
            assert_eq!(cache.min_frequency(), Some(1));
            assert_eq!(cache.bucket_ids(1), vec![1, 2]);
        }

        #[test]
        fn test_get_increments_frequency() {
            let mut cache = filled(3, &[1, 2]);
            assert_eq!(cache.get(&1), Some(&(1, 10)));
            assert_eq!(cache.get(&1), Some(&(1, 10)));

            assert_eq!(cache.frequency(&1), Some(3));
            assert_eq!(cache.frequency(&2), Some(1));
            assert_eq!(cache.min_frequency(), Some(1));
        }

        #[test]
        fn test_get_missing_changes_nothing() {
            let mut cache = filled(3, &[1]);
            assert_eq!(cache.get(&7), None);
            assert_eq!(cache.frequency(&1), Some(1));
            assert_eq!(cache.len(), 1);
        }

        #[test]
        fn test_upsert_existing_replaces_and_counts_access() {
            let mut cache = filled(3, &[1]);
            cache.upsert((1, 99));

            assert_eq!(cache.len(), 1);
            assert_eq!(cache.frequency(&1), Some(2));
            assert_eq!(cache.get(&1), Some(&(1, 99)));
        }

        #[test]
        fn test_remove_returns_entity() {
            let mut cache = filled(3, &[1, 2]);
            assert_eq!(cache.remove(&1), Some((1, 10)));
            assert_eq!(cache.remove(&1), None);
            assert_eq!(cache.frequency(&1), None);
            assert_eq!(cache.len(), 1);
        }

        #[test]
        fn test_clear_resets_minimum() {
            let mut cache = filled(3, &[1, 2, 3]);
            cache.get(&1);
            cache.clear();

            assert!(cache.is_empty());
            assert_eq!(cache.min_frequency(), None);
            assert_eq!(cache.peek_lfu(), None);
            assert_eq!(cache.capacity(), 3);
        }
    }

    mod lfu_operations {
        use super::*;

        #[test]
        fn test_evicts_least_frequent() {
            let mut cache = filled(2, &[1, 2]);
            cache.get(&1);
            cache.upsert((3, 30));

            assert!(cache.contains(&1));
            assert!(!cache.contains(&2));
            assert!(cache.contains(&3));
        }

        #[test]
        fn test_tie_break_evicts_oldest_at_frequency() {
            let mut cache = filled(3, &[1, 2, 3]);
            cache.upsert((4, 40));
            assert!(!cache.contains(&1));

            cache.upsert((5, 50));
            assert!(!cache.contains(&2));
            assert_eq!(cache.bucket_ids(1), vec![3, 5]);
        }

        #[test]
        fn test_tie_break_uses_arrival_at_frequency_not_admission() {
            let mut cache = filled(3, &[1, 2, 3]);
            cache.get(&2);
            cache.get(&1);
            cache.get(&3);
            // all at frequency 2, reached in order 2, 1, 3
            assert_eq!(cache.bucket_ids(2), vec![2, 1, 3]);
            assert_eq!(cache.min_frequency(), Some(2));

            cache.upsert((4, 40));
            assert!(!cache.contains(&2));
            assert!(cache.contains(&1));
            assert!(cache.contains(&3));
        }

        #[test]
        fn test_get_hit_scenario() {
            let mut cache = LfuCore::new(2);
            cache.upsert((1, "one"));
            cache.upsert((2, "two"));
            cache.get(&1);
            cache.get(&1);
            cache.upsert((3, "three"));

            assert_eq!(cache.get(&2), None);
            assert!(cache.get(&1).is_some());
            assert!(cache.get(&3).is_some());
        }

        #[test]
        fn test_newcomer_is_next_victim() {
            let mut cache = filled(2, &[1, 2]);
            cache.get(&1);
            cache.get(&2);
            cache.upsert((3, 30));
            cache.upsert((4, 40));

            assert!(!cache.contains(&3));
            assert!(cache.contains(&4));
            assert_eq!(cache.min_frequency(), Some(1));
        }

        #[test]
        fn test_minimum_follows_promotion() {
            let mut cache = filled(2, &[1]);
            cache.get(&1);
            assert_eq!(cache.min_frequency(), Some(2));
            cache.get(&1);
            assert_eq!(cache.min_frequency(), Some(3));
            assert_eq!(cache.peek_lfu(), Some(&(1, 10)));
        }

        #[test]
        fn test_peek_lfu_does_not_touch() {
            let cache = filled(3, &[5, 6]);
            assert_eq!(cache.peek_lfu(), Some(&(5, 50)));
            assert_eq!(cache.frequency(&5), Some(1));
        }
    }

    mod edge_cases {
        use super::*;

        #[test]
        fn test_zero_capacity_admits_nothing() {
            let mut cache = LfuCore::new(0);
            cache.upsert((1, "one"));
            assert_eq!(cache.len(), 0);
            assert_eq!(cache.get(&1), None);
            assert_eq!(cache.min_frequency(), None);
        }

        #[test]
        fn test_remove_last_minimum_moves_minimum_up() {
            let mut cache = filled(3, &[1, 2]);
            cache.get(&2);
            cache.get(&2);
            cache.remove(&1);

            assert_eq!(cache.min_frequency(), Some(3));
            cache.check_invariants().unwrap();

            cache.upsert((3, 30));
            cache.upsert((4, 40));
            cache.upsert((5, 50));
            assert!(cache.contains(&2));
            assert!(!cache.contains(&3));
        }

        #[test]
        fn test_remove_only_entity_leaves_no_minimum() {
            let mut cache = filled(2, &[1]);
            cache.get(&1);
            cache.remove(&1);
            assert_eq!(cache.min_frequency(), None);
            assert!(cache.is_empty());
        }

        #[test]
        fn test_remove_above_minimum_keeps_minimum() {
            let mut cache = filled(3, &[1, 2]);
            cache.get(&2);
            cache.remove(&2);
            assert_eq!(cache.min_frequency(), Some(1));
        }

        #[test]
        fn test_eviction_with_distinct_frequencies() {
            // entity i sits alone at frequency i + 1
            let mut cache = filled(4, &[0, 1, 2, 3]);
            for i in 0..4u32 {
                for _ in 0..i {
                    cache.get(&i);
                }
            }
            assert_eq!(cache.min_frequency(), Some(1));

            cache.upsert((100, 0));
            assert!(!cache.contains(&0));
            assert_eq!(cache.min_frequency(), Some(1));
            cache.check_invariants().unwrap();

            for id in 101..110 {
                cache.upsert((id, 0));
                assert!(!cache.contains(&(id - 1)));
                assert_eq!(cache.frequency(&id), Some(1));
                cache.check_invariants().unwrap();
            }
            for i in 1..4u32 {
                assert_eq!(cache.frequency(&i), Some(u64::from(i) + 1));
            }

            cache.remove(&109);
            assert_eq!(cache.min_frequency(), Some(2));
            cache.check_invariants().unwrap();
        }

        #[test]
        fn test_refill_after_clear_does_not_evict() {
            let mut cache = filled(2, &[1, 2]);
            cache.clear();
            cache.extend([(3, 0), (4, 0)]);
            assert!(cache.contains(&3));
            assert!(cache.contains(&4));
            assert_eq!(cache.len(), 2);
        }
    }

    mod state_consistency {
        use super::*;

        #[test]
        fn test_invariants_hold_through_mixed_ops() {
            let mut cache = LfuCore::new(4);
            for i in 0..48u32 {
                cache.upsert((i % 9, i));
                if i % 2 == 0 {
                    cache.get(&(i % 5));
                }
                if i % 5 == 0 {
                    cache.remove(&(i % 7));
                }
                cache.check_invariants().unwrap();
            }
        }

        #[cfg(feature = "metrics")]
        #[test]
        fn test_metrics_track_outcomes() {
            let mut cache = filled(2, &[1, 2]);
            cache.get(&1);
            cache.get(&3);
            cache.upsert((2, 0));
            cache.upsert((3, 30));
            cache.remove(&3);

            let snap = cache.metrics_snapshot();
            assert_eq!(snap.core.get_hits, 1);
            assert_eq!(snap.core.get_misses, 1);
            assert_eq!(snap.core.upsert_new, 3);
            assert_eq!(snap.core.upsert_updates, 1);
            assert_eq!(snap.core.evicted_entries, 1);
            assert_eq!(snap.core.removals, 1);
            assert_eq!(snap.promotions, 2);
            assert_eq!(snap.min_frequency_rescans, 1);
        }
    }

    mod shared_cache {
        use super::*;

        #[test]
        fn test_clones_share_state() {
            let cache = LfuCache::new(2);
            let other = cache.clone();

            cache.upsert((1, "one"));
            other.get(&1);
            assert_eq!(cache.frequency(&1), Some(2));
            assert!(other.contains(&1));
        }

        #[test]
        fn test_with_core_exposes_inspection() {
            let cache = LfuCache::new(2);
            cache.upsert((1, 'a'));
            cache.upsert((2, 'b'));
            cache.get(&2);

            let next = cache.with_core(|core| core.peek_lfu().copied());
            assert_eq!(next, Some((1, 'a')));
        }
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;
        use std::collections::HashMap;

        #[derive(Debug, Clone)]
        enum Op {
            Upsert(u8),
            Get(u8),
            Remove(u8),
        }

        fn op_strategy() -> impl Strategy<Value = Op> {
            prop_oneof![
                4 => any::<u8>().prop_map(|k| Op::Upsert(k % 12)),
                5 => any::<u8>().prop_map(|k| Op::Get(k % 12)),
                1 => any::<u8>().prop_map(|k| Op::Remove(k % 12)),
            ]
        }

        /// Reference model: frequency plus the tick at which the id reached it.
        #[derive(Default)]
        struct Model {
            entries: HashMap<u8, (u64, u64)>,
            tick: u64,
        }

        impl Model {
            fn stamp(&mut self) -> u64 {
                self.tick += 1;
                self.tick
            }

            fn touch(&mut self, k: u8) {
                let tick = self.stamp();
                if let Some(entry) = self.entries.get_mut(&k) {
                    *entry = (entry.0 + 1, tick);
                }
            }

            fn victim(&self) -> Option<u8> {
                self.entries
                    .iter()
                    .min_by_key(|(_, entry)| **entry)
                    .map(|(&k, _)| k)
            }
        }

        proptest! {
            #[test]
            fn prop_matches_frequency_model(
                capacity in 1usize..6,
                ops in prop::collection::vec(op_strategy(), 0..200)
            ) {
                let mut cache = LfuCore::new(capacity);
                let mut model = Model::default();

                for op in ops {
                    match op {
                        Op::Upsert(k) => {
                            if model.entries.contains_key(&k) {
                                model.touch(k);
                            } else {
                                if model.entries.len() == capacity {
                                    let victim = model.victim().unwrap();
                                    model.entries.remove(&victim);
                                }
                                let tick = model.stamp();
                                model.entries.insert(k, (1, tick));
                            }
                            cache.upsert((k, ()));
                        }
                        Op::Get(k) => {
                            let hit = cache.get(&k).is_some();
                            prop_assert_eq!(hit, model.entries.contains_key(&k));
                            model.touch(k);
                        }
                        Op::Remove(k) => {
                            let removed = cache.remove(&k).is_some();
                            prop_assert_eq!(removed, model.entries.remove(&k).is_some());
                        }
                    }

                    prop_assert!(cache.len() <= capacity);
                    prop_assert!(cache.check_invariants().is_ok());
                    prop_assert_eq!(cache.len(), model.entries.len());
                    for (k, &(freq, _)) in &model.entries {
                        prop_assert_eq!(cache.frequency(k), Some(freq));
                    }
                }
            }
        }
    }
}
