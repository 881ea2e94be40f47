//! # Cache Trait Hierarchy
//!
//! Every cache in this crate stores *entities*: values that carry their own
//! identifier through [`HasId`]. The contract is split in two layers.
//!
//! ```text
//!     ┌───────────────────────────────────────┐
//!     │        CoreCache<ID, T>  (&mut self)  │   single-threaded policy cores
//!     │  upsert / get / contains / len /      │   (LruCore, LfuCore)
//!     │  capacity / clear                     │
//!     └───────────────────┬───────────────────┘
//!                         │
//!     ┌───────────────────▼───────────────────┐
//!     │       MutableCache<ID, T>             │   remove(&ID) -> Option<T>
//!     └───────┬───────────────────────┬───────┘
//!             │                       │
//!  ┌──────────▼─────────┐   ┌─────────▼──────────┐
//!  │ LruCacheTrait      │   │ LfuCacheTrait      │
//!  │ peek_lru           │   │ peek_lfu           │
//!  │ recency_rank       │   │ frequency          │
//!  └────────────────────┘   │ min_frequency      │
//!                           └────────────────────┘
//!
//!     ┌───────────────────────────────────────┐
//!     │     EntityCache<ID, T>  (&self)       │   thread-safe caches
//!     │  upsert / get / remove / size / clear │   (LruCache, LfuCache, Cache)
//!     └───────────────────────────────────────┘
//! ```
//!
//! The cores are what the policies implement; [`EntityCache`] is what an
//! interception layer holds. It serializes every call behind one lock per
//! instance and hands out clones of resident entities, so it is object safe
//! and can be stored as `Box<dyn EntityCache<ID, T>>`.
//!
//! | Trait            | Receiver    | Purpose                                   |
//! |------------------|-------------|-------------------------------------------|
//! | `HasId`          | -           | Entity exposes a stable identifier        |
//! | `CoreCache`      | `&mut self` | Universal cache operations                |
//! | `MutableCache`   | `&mut self` | Removal by id                             |
//! | `LruCacheTrait`  | `&self`     | Recency inspection                        |
//! | `LfuCacheTrait`  | `&self`     | Frequency inspection                      |
//! | `EntityCache`    | `&self`     | Shared, internally locked cache contract  |

/// An entity that exposes a stable identifier.
///
/// The id must not change while the entity is cached.
///
/// # Example
///
/// ```
/// use idcache::traits::HasId;
///
/// #[derive(Clone)]
/// struct News {
///     id: u64,
///     title: String,
/// }
///
/// impl HasId<u64> for News {
///     fn id(&self) -> u64 {
///         self.id
///     }
/// }
///
/// let news = News { id: 7, title: "hello".into() };
/// assert_eq!(news.id(), 7);
/// ```
pub trait HasId<ID> {
    fn id(&self) -> ID;
}

/// Plain `(id, value)` pairs are entities keyed by their first element.
impl<ID, V> HasId<ID> for (ID, V)
where
    ID: Clone,
{
    fn id(&self) -> ID {
        self.0.clone()
    }
}

/// Core cache operations that all policy cores support.
///
/// # Example
///
/// ```
/// use idcache::policy::lru::LruCore;
/// use idcache::traits::CoreCache;
///
/// fn warm<C: CoreCache<u64, (u64, String)>>(cache: &mut C, rows: &[(u64, String)]) {
///     for row in rows {
///         cache.upsert(row.clone());
///     }
/// }
///
/// let mut cache = LruCore::new(100);
/// warm(&mut cache, &[(1, "one".to_string()), (2, "two".to_string())]);
/// assert_eq!(cache.len(), 2);
/// ```
pub trait CoreCache<ID, T> {
    /// Inserts `entity`, or replaces the resident entity with the same id.
    ///
    /// A replacement counts as an access. Admitting a new id into a full
    /// cache evicts exactly one entity first. With capacity 0 this is a no-op.
    fn upsert(&mut self, entity: T);

    /// Returns the resident entity and records the access.
    ///
    /// Use [`contains`](Self::contains) to test residency without affecting
    /// eviction order.
    ///
    /// # Example
    ///
    /// ```
    /// use idcache::policy::lfu::LfuCore;
    /// use idcache::traits::CoreCache;
    ///
    /// let mut cache = LfuCore::new(10);
    /// cache.upsert((1, "value"));
    ///
    /// assert_eq!(cache.get(&1), Some(&(1, "value")));
    /// assert_eq!(cache.get(&99), None);
    /// ```
    fn get(&mut self, id: &ID) -> Option<&T>;

    /// Checks residency without updating access state.
    fn contains(&self, id: &ID) -> bool;

    /// Returns the number of resident entities.
    fn len(&self) -> usize;

    /// Returns `true` if nothing is resident.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the fixed capacity.
    fn capacity(&self) -> usize;

    /// Drops every entity; the cache behaves as if newly constructed.
    fn clear(&mut self);
}

/// Cores that support removal by id.
///
/// # Example
///
/// ```
/// use idcache::policy::lru::LruCore;
/// use idcache::traits::{CoreCache, MutableCache};
///
/// let mut cache = LruCore::new(10);
/// cache.upsert((1, "value"));
///
/// assert_eq!(cache.remove(&1), Some((1, "value")));
/// assert_eq!(cache.remove(&1), None);
/// ```
pub trait MutableCache<ID, T>: CoreCache<ID, T> {
    /// Removes the entity with `id`, returning it if it was resident.
    fn remove(&mut self, id: &ID) -> Option<T>;
}

/// Recency inspection for LRU cores.
pub trait LruCacheTrait<ID, T>: MutableCache<ID, T> {
    /// Next eviction candidate, without touching it.
    fn peek_lru(&self) -> Option<&T>;

    /// Position of `id` in recency order (0 = most recently used).
    ///
    /// O(n); intended for diagnostics and tests.
    fn recency_rank(&self, id: &ID) -> Option<usize>;
}

/// Frequency inspection for LFU cores.
///
/// # Example
///
/// ```
/// use idcache::policy::lfu::LfuCore;
/// use idcache::traits::{CoreCache, LfuCacheTrait};
///
/// let mut cache = LfuCore::new(4);
/// cache.upsert((1, 'a'));
/// cache.get(&1);
/// cache.get(&1);
///
/// assert_eq!(cache.frequency(&1), Some(3));
/// assert_eq!(cache.min_frequency(), Some(3));
/// ```
pub trait LfuCacheTrait<ID, T>: MutableCache<ID, T> {
    /// Next eviction candidate, without touching it.
    fn peek_lfu(&self) -> Option<&T>;

    /// Access count of `id` (1 right after admission).
    fn frequency(&self, id: &ID) -> Option<u64>;

    /// The tracked minimum frequency among resident ids.
    fn min_frequency(&self) -> Option<u64>;
}

/// Thread-safe cache contract.
///
/// Every call takes the instance lock for its whole duration; reads are as
/// exclusive as writes because a lookup updates ranking state.
///
/// # Example
///
/// ```
/// use idcache::builder::{CacheBuilder, CachePolicy};
/// use idcache::traits::EntityCache;
///
/// let cache: Box<dyn EntityCache<u64, (u64, String)>> =
///     Box::new(CacheBuilder::new(2).build::<u64, (u64, String)>(CachePolicy::Lfu));
///
/// cache.upsert((1, "one".to_string()));
/// assert_eq!(cache.get(&1), Some((1, "one".to_string())));
/// cache.remove(&1);
/// assert_eq!(cache.size(), 0);
/// ```
pub trait EntityCache<ID, T>: Send + Sync {
    /// Inserts or replaces an entity; see [`CoreCache::upsert`].
    fn upsert(&self, entity: T);

    /// Returns a clone of the resident entity and records the access.
    fn get(&self, id: &ID) -> Option<T>;

    /// Removes the entity with `id`; absent ids are ignored.
    fn remove(&self, id: &ID);

    /// Number of resident entities.
    fn size(&self) -> usize;

    /// Drops every entity.
    fn clear(&self);
}
