//! Least Recently Used (LRU) entity cache.
//!
//! Evicts the entity that was touched longest ago. A touch is a `get` hit or
//! an `upsert` of a resident id.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────────────┐
//! │                         LruCore<ID, T> Layout                         │
//! │                                                                       │
//! │   index: FxHashMap<ID, ListHandle>      list: IntrusiveList<T>        │
//! │   ┌──────────┬──────────┐                                             │
//! │   │  id      │  handle  │               head (MRU)                    │
//! │   ├──────────┼──────────┤                  │                          │
//! │   │  7       │  h_0     │──────────────►  [7] ◄──► [3] ◄──► [12]      │
//! │   │  3       │  h_1     │──────────────────────────┘          ▲       │
//! │   │  12      │  h_2     │─────────────────────────────────────┘       │
//! │   └──────────┴──────────┘                                tail (LRU)   │
//! └───────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The list owns the entities; the index only maps ids to handles. Every
//! handle in the index resolves to a linked entry of the list and every
//! linked entry is indexed under its own id.
//!
//! ## Operations
//!
//! | Operation | Effect                                                | Time |
//! |-----------|-------------------------------------------------------|------|
//! | `get`     | hit: move entry to head                               | O(1) |
//! | `upsert`  | resident: replace in place, move to head              | O(1) |
//! |           | new at capacity: pop tail, then push at head          | O(1) |
//! | `remove`  | unlink and free entry, drop index mapping             | O(1) |
//! | `clear`   | drop everything, handles become stale                 | O(n) |
//!
//! ## Thread Safety
//!
//! - [`LruCore`]: not synchronized; needs `&mut self` for lookups
//! - [`LruCache`]: `Arc<parking_lot::Mutex<LruCore>>`, cheap to clone, every
//!   call holds the lock for its whole duration
//!
//! ## Example
//!
//! ```
//! use idcache::policy::lru::LruCache;
//! use idcache::traits::EntityCache;
//!
//! let cache = LruCache::new(2);
//! cache.upsert((1, "one"));
//! cache.upsert((2, "two"));
//! cache.get(&1);
//! cache.upsert((3, "three"));
//!
//! assert_eq!(cache.get(&2), None);
//! assert_eq!(cache.get(&1), Some((1, "one")));
//! assert_eq!(cache.size(), 2);
//! ```

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::ds::{IntrusiveList, ListHandle};
use crate::error::InvariantError;
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::LruMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LruMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{CoreMetricsRecorder, LruMetricsRecorder, MetricsSnapshotProvider};
use crate::traits::{CoreCache, EntityCache, HasId, LruCacheTrait, MutableCache};

const POLICY: &str = "lru";

/// Single-threaded LRU core.
pub struct LruCore<ID, T> {
    index: FxHashMap<ID, ListHandle>,
    list: IntrusiveList<T>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: LruMetrics,
}

impl<ID, T> LruCore<ID, T>
where
    ID: Eq + Hash + Clone,
    T: HasId<ID>,
{
    /// Creates an empty core holding at most `capacity` entities.
    ///
    /// A capacity of 0 creates a cache that admits nothing.
    ///
    /// # Example
    ///
    /// ```
    /// use idcache::policy::lru::LruCore;
    /// use idcache::traits::CoreCache;
    ///
    /// let cache: LruCore<u64, (u64, String)> = LruCore::new(100);
    /// assert_eq!(cache.capacity(), 100);
    /// assert!(cache.is_empty());
    /// ```
    pub fn new(capacity: usize) -> Self {
        LruCore {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            list: IntrusiveList::with_capacity(capacity),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: LruMetrics::default(),
        }
    }

    /// Ids from most to least recently used.
    ///
    /// # Example
    ///
    /// ```
    /// use idcache::policy::lru::LruCore;
    /// use idcache::traits::CoreCache;
    ///
    /// let mut cache = LruCore::new(3);
    /// cache.upsert((1, ()));
    /// cache.upsert((2, ()));
    /// cache.get(&1);
    ///
    /// assert_eq!(cache.recency_order(), vec![1, 2]);
    /// ```
    pub fn recency_order(&self) -> Vec<ID> {
        self.list.iter().map(|entity| entity.id()).collect()
    }

    /// Verifies that the index and the recency list describe the same set.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.index.len() != self.list.len() {
            return Err(InvariantError::new(format!(
                "index holds {} ids but the recency list links {} entries",
                self.index.len(),
                self.list.len()
            )));
        }
        if self.index.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "{} resident entities exceed capacity {}",
                self.index.len(),
                self.capacity
            )));
        }
        for (id, &handle) in &self.index {
            if !self.list.is_linked(handle) {
                return Err(InvariantError::new(
                    "index refers to an entry missing from the recency list",
                ));
            }
            let entity = self
                .list
                .get(handle)
                .map_err(|err| InvariantError::new(format!("unresolvable handle: {err}")))?;
            if entity.id() != *id {
                return Err(InvariantError::new(
                    "indexed entry carries a different id than its index key",
                ));
            }
        }
        Ok(())
    }

    fn evict_lru(&mut self) {
        let evicted = self
            .list
            .pop_back()
            .expect("full lru cache has a tail entry");
        self.index.remove(&evicted.id());

        #[cfg(feature = "metrics")]
        self.metrics.record_evicted_entry();

        tracing::debug!(
            target: "idcache",
            policy = POLICY,
            len = self.index.len(),
            capacity = self.capacity,
            "evicted least recently used entity"
        );
    }

    #[cfg(debug_assertions)]
    fn validate_invariants(&self) {
        self.list.debug_validate_invariants();
        debug_assert_eq!(self.index.len(), self.list.len());
        debug_assert!(self.index.len() <= self.capacity);
    }
}

impl<ID, T> CoreCache<ID, T> for LruCore<ID, T>
where
    ID: Eq + Hash + Clone,
    T: HasId<ID>,
{
    fn upsert(&mut self, entity: T) {
        if self.capacity == 0 {
            return;
        }
        let id = entity.id();

        if let Some(&handle) = self.index.get(&id) {
            #[cfg(feature = "metrics")]
            {
                self.metrics.record_upsert_update();
                self.metrics.record_move_to_front();
            }

            *self
                .list
                .get_mut(handle)
                .expect("indexed handle resolves in the recency list") = entity;
            self.list
                .move_to_front(handle)
                .expect("indexed handle belongs to the recency list");
        } else {
            #[cfg(feature = "metrics")]
            self.metrics.record_upsert_new();

            if self.index.len() >= self.capacity {
                self.evict_lru();
            }
            let handle = self.list.push_front(entity);
            self.index.insert(id, handle);
        }

        #[cfg(debug_assertions)]
        self.validate_invariants();
    }

    fn get(&mut self, id: &ID) -> Option<&T> {
        let Some(&handle) = self.index.get(id) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            tracing::trace!(target: "idcache", policy = POLICY, hit = false, "cache miss");
            return None;
        };

        #[cfg(feature = "metrics")]
        {
            self.metrics.record_get_hit();
            self.metrics.record_move_to_front();
        }
        tracing::trace!(target: "idcache", policy = POLICY, hit = true, "cache hit");

        self.list
            .move_to_front(handle)
            .expect("indexed handle belongs to the recency list");
        self.list.get(handle).ok()
    }

    #[inline]
    fn contains(&self, id: &ID) -> bool {
        self.index.contains_key(id)
    }

    #[inline]
    fn len(&self) -> usize {
        self.index.len()
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
            dropped = self.index.len(),
            "cleared cache"
        );
        self.index.clear();
        self.list.clear();
    }
}

impl<ID, T> MutableCache<ID, T> for LruCore<ID, T>
where
    ID: Eq + Hash + Clone,
    T: HasId<ID>,
{
    fn remove(&mut self, id: &ID) -> Option<T> {
        let handle = self.index.remove(id)?;

        #[cfg(feature = "metrics")]
        self.metrics.record_remove();

        let entity = self
            .list
            .remove(handle)
            .expect("indexed handle belongs to the recency list");

        #[cfg(debug_assertions)]
        self.validate_invariants();

        Some(entity)
    }
}

impl<ID, T> LruCacheTrait<ID, T> for LruCore<ID, T>
where
    ID: Eq + Hash + Clone,
    T: HasId<ID>,
{
    fn peek_lru(&self) -> Option<&T> {
        self.list.back().ok()
    }

    fn recency_rank(&self, id: &ID) -> Option<usize> {
        if !self.index.contains_key(id) {
            return None;
        }
        self.list.iter().position(|entity| entity.id() == *id)
    }
}

impl<ID, T> Extend<T> for LruCore<ID, T>
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

impl<ID, T> fmt::Debug for LruCore<ID, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCore")
            .field("len", &self.index.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "metrics")]
impl<ID, T> LruCore<ID, T> {
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        self.metrics.snapshot(self.index.len(), self.capacity)
    }
}

#[cfg(feature = "metrics")]
impl<ID, T> MetricsSnapshotProvider<LruMetricsSnapshot> for LruCore<ID, T> {
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.metrics_snapshot()
    }
}

/// Thread-safe LRU cache.
///
/// Clones share the same underlying core.
pub struct LruCache<ID, T> {
    inner: Arc<Mutex<LruCore<ID, T>>>,
}

impl<ID, T> Clone for LruCache<ID, T> {
    fn clone(&self) -> Self {
        LruCache {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<ID, T> fmt::Debug for LruCache<ID, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let core = self.inner.lock();
        f.debug_struct("LruCache")
            .field("len", &core.index.len())
            .field("capacity", &core.capacity)
            .finish_non_exhaustive()
    }
}

impl<ID, T> LruCache<ID, T>
where
    ID: Eq + Hash + Clone,
    T: HasId<ID>,
{
    /// Creates an empty cache holding at most `capacity` entities.
    pub fn new(capacity: usize) -> Self {
        LruCache {
            inner: Arc::new(Mutex::new(LruCore::new(capacity))),
        }
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    /// Checks residency without touching the entity.
    pub fn contains(&self, id: &ID) -> bool {
        self.inner.lock().contains(id)
    }

    /// Ids from most to least recently used.
    pub fn recency_order(&self) -> Vec<ID> {
        self.inner.lock().recency_order()
    }

    /// Runs `f` with exclusive access to the core.
    ///
    /// # Example
    ///
    /// ```
    /// use idcache::policy::lru::LruCache;
    /// use idcache::traits::{EntityCache, LruCacheTrait};
    ///
    /// let cache = LruCache::new(4);
    /// cache.upsert((1, 'a'));
    /// cache.upsert((2, 'b'));
    ///
    /// let next = cache.with_core(|core| core.peek_lru().copied());
    /// assert_eq!(next, Some((1, 'a')));
    /// ```
    pub fn with_core<R>(&self, f: impl FnOnce(&mut LruCore<ID, T>) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

impl<ID, T> EntityCache<ID, T> for LruCache<ID, T>
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
impl<ID, T> LruCache<ID, T> {
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        self.inner.lock().metrics_snapshot()
    }
}

#[cfg(feature = "metrics")]
impl<ID, T> MetricsSnapshotProvider<LruMetricsSnapshot> for LruCache<ID, T> {
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.metrics_snapshot()
    }
}
