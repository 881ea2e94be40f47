//! Eviction policies.
//!
//! | Policy | Core      | Thread-safe | Evicts                                   |
//! |--------|-----------|-------------|------------------------------------------|
//! | LRU    | `LruCore` | `LruCache`  | least recently touched entity            |
//! | LFU    | `LfuCore` | `LfuCache`  | least frequently touched; oldest on ties |
//!
//! The cores implement [`CoreCache`](crate::traits::CoreCache) and are not
//! synchronized. The caches wrap one core in a `parking_lot::Mutex` and
//! implement [`EntityCache`](crate::traits::EntityCache).

pub mod lfu;
pub mod lru;
