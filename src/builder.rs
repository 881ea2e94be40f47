//! Unified cache builder for both eviction policies.
//!
//! Picks one policy at construction time and hands back a [`Cache`] that
//! callers can hold regardless of which policy was chosen.
//!
//! ## Example
//!
//! ```rust
//! use idcache::builder::{CacheBuilder, CachePolicy};
//! use idcache::traits::EntityCache;
//!
//! let cache = CacheBuilder::new(100).build::<u64, (u64, String)>(CachePolicy::Lru);
//! cache.upsert((1, "hello".to_string()));
//! assert_eq!(cache.get(&1), Some((1, "hello".to_string())));
//! ```

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use crate::error::ConfigError;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::CacheMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::MetricsSnapshotProvider;
use crate::policy::lfu::LfuCache;
use crate::policy::lru::LruCache;
use crate::traits::{EntityCache, HasId};

/// Available cache eviction policies.
///
/// Parsing is case-insensitive; display uses the upper-case names.
///
/// ```
/// use idcache::builder::CachePolicy;
///
/// assert_eq!("lru".parse::<CachePolicy>().unwrap(), CachePolicy::Lru);
/// assert_eq!(CachePolicy::Lfu.to_string(), "LFU");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CachePolicy {
    /// Least Recently Used eviction.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "LRU", alias = "lru", alias = "Lru"))]
    Lru,
    /// Least Frequently Used eviction (bucket-based, FIFO among ties).
    #[cfg_attr(feature = "serde", serde(rename = "LFU", alias = "lfu", alias = "Lfu"))]
    Lfu,
}

impl CachePolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            CachePolicy::Lru => "LRU",
            CachePolicy::Lfu => "LFU",
        }
    }
}

impl fmt::Display for CachePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CachePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name.eq_ignore_ascii_case("lru") {
            Ok(CachePolicy::Lru)
        } else if name.eq_ignore_ascii_case("lfu") {
            Ok(CachePolicy::Lfu)
        } else {
            Err(ConfigError::new(format!("unknown cache policy: {s}")))
        }
    }
}

/// Cache wrapper that dispatches to the chosen policy.
///
/// Cloning is cheap; clones share the same cache.
pub struct Cache<ID, T> {
    inner: CacheInner<ID, T>,
}

enum CacheInner<ID, T> {
    Lru(LruCache<ID, T>),
    Lfu(LfuCache<ID, T>),
}

impl<ID, T> Clone for Cache<ID, T> {
    fn clone(&self) -> Self {
        let inner = match &self.inner {
            CacheInner::Lru(lru) => CacheInner::Lru(lru.clone()),
            CacheInner::Lfu(lfu) => CacheInner::Lfu(lfu.clone()),
        };
        Cache { inner }
    }
}

impl<ID, T> fmt::Debug for Cache<ID, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            CacheInner::Lru(lru) => f.debug_tuple("Cache").field(lru).finish(),
            CacheInner::Lfu(lfu) => f.debug_tuple("Cache").field(lfu).finish(),
        }
    }
}

impl<ID, T> Cache<ID, T>
where
    ID: Eq + Hash + Clone,
    T: HasId<ID>,
{
    /// Policy this cache was built with.
    pub fn policy(&self) -> CachePolicy {
        match &self.inner {
            CacheInner::Lru(_) => CachePolicy::Lru,
            CacheInner::Lfu(_) => CachePolicy::Lfu,
        }
    }

    pub fn capacity(&self) -> usize {
        match &self.inner {
            CacheInner::Lru(lru) => lru.capacity(),
            CacheInner::Lfu(lfu) => lfu.capacity(),
        }
    }

    /// Checks residency without recording an access.
    pub fn contains(&self, id: &ID) -> bool {
        match &self.inner {
            CacheInner::Lru(lru) => lru.contains(id),
            CacheInner::Lfu(lfu) => lfu.contains(id),
        }
    }
}

impl<ID, T> EntityCache<ID, T> for Cache<ID, T>
where
    ID: Eq + Hash + Clone + Send,
    T: HasId<ID> + Clone + Send,
{
    fn upsert(&self, entity: T) {
        match &self.inner {
            CacheInner::Lru(lru) => lru.upsert(entity),
            CacheInner::Lfu(lfu) => lfu.upsert(entity),
        }
    }

    fn get(&self, id: &ID) -> Option<T> {
        match &self.inner {
            CacheInner::Lru(lru) => lru.get(id),
            CacheInner::Lfu(lfu) => lfu.get(id),
        }
    }

    fn remove(&self, id: &ID) {
        match &self.inner {
            CacheInner::Lru(lru) => lru.remove(id),
            CacheInner::Lfu(lfu) => lfu.remove(id),
        }
    }

    fn size(&self) -> usize {
        match &self.inner {
            CacheInner::Lru(lru) => lru.size(),
            CacheInner::Lfu(lfu) => lfu.size(),
        }
    }

    fn clear(&self) {
        match &self.inner {
            CacheInner::Lru(lru) => lru.clear(),
            CacheInner::Lfu(lfu) => lfu.clear(),
        }
    }
}

#[cfg(feature = "metrics")]
impl<ID, T> Cache<ID, T> {
    /// Counters common to both policies.
    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        match &self.inner {
            CacheInner::Lru(lru) => lru.metrics_snapshot().core,
            CacheInner::Lfu(lfu) => lfu.metrics_snapshot().core,
        }
    }
}

#[cfg(feature = "metrics")]
impl<ID, T> MetricsSnapshotProvider<CacheMetricsSnapshot> for Cache<ID, T> {
    fn snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics_snapshot()
    }
}

/// Builder for creating cache instances.
#[derive(Debug, Clone, Copy)]
pub struct CacheBuilder {
    capacity: usize,
}

impl CacheBuilder {
    /// Create a new cache builder with the specified capacity.
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Build a cache with the specified policy.
    ///
    /// # Type Parameters
    ///
    /// - `ID`: Entity id, must be `Eq + Hash + Clone`
    /// - `T`: Entity type, must implement [`HasId<ID>`]
    ///
    /// # Example
    ///
    /// ```rust
    /// use idcache::builder::{CacheBuilder, CachePolicy};
    ///
    /// let lru = CacheBuilder::new(100).build::<u64, (u64, String)>(CachePolicy::Lru);
    /// let lfu = CacheBuilder::new(100).build::<u64, (u64, String)>(CachePolicy::Lfu);
    ///
    /// assert_eq!(lru.policy(), CachePolicy::Lru);
    /// assert_eq!(lfu.capacity(), 100);
    /// ```
    pub fn build<ID, T>(self, policy: CachePolicy) -> Cache<ID, T>
    where
        ID: Eq + Hash + Clone,
        T: HasId<ID>,
    {
        tracing::debug!(
            target: "idcache",
            policy = %policy,
            capacity = self.capacity,
            "building cache"
        );

        let inner = match policy {
            CachePolicy::Lru => CacheInner::Lru(LruCache::new(self.capacity)),
            CachePolicy::Lfu => CacheInner::Lfu(LfuCache::new(self.capacity)),
        };

        Cache { inner }
    }
}
