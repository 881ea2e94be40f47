//! idcache: fixed-capacity, in-process entity caches with LRU and LFU
//! eviction.
//!
//! Entities carry their own identifier ([`traits::HasId`]). Each cache holds
//! at most `capacity` of them and evicts by its policy when a new id arrives
//! at a full cache.
//!
//! ```
//! use idcache::prelude::*;
//!
//! let cache = CacheConfig::from_parts(Some("LFU"), Some(2))
//!     .unwrap()
//!     .build::<u64, (u64, &str)>();
//!
//! cache.upsert((1, "a"));
//! cache.upsert((2, "b"));
//! cache.get(&1);
//! cache.upsert((3, "c"));
//!
//! assert_eq!(cache.get(&2), None);
//! assert_eq!(cache.size(), 2);
//! ```

pub mod builder;
pub mod config;
pub mod ds;
pub mod error;
pub mod policy;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;
