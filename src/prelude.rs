pub use crate::builder::{Cache, CacheBuilder, CachePolicy};
pub use crate::config::CacheConfig;
pub use crate::ds::{FrequencyBuckets, IntrusiveList, ListHandle, SlotArena, SlotId};
pub use crate::error::{ConfigError, InvariantError, ListError};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::CacheMetricsSnapshot;
pub use crate::policy::lfu::{LfuCache, LfuCore};
pub use crate::policy::lru::{LruCache, LruCore};
pub use crate::traits::{
    CoreCache, EntityCache, HasId, LfuCacheTrait, LruCacheTrait, MutableCache,
};
