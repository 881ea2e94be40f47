//! Construction-time cache configuration.
//!
//! A [`CacheConfig`] names one policy and a capacity. Missing values fall back
//! to [`CachePolicy::Lru`] and [`DEFAULT_CAPACITY`]. A capacity of 0 is valid
//! and yields a cache that admits nothing.
//!
//! With the `serde` feature the config deserializes from the usual shape of a
//! settings section:
//!
//! ```text
//! { "type": "LFU", "capacity": 500 }
//! ```

use std::hash::Hash;

use crate::builder::{Cache, CacheBuilder, CachePolicy};
use crate::error::ConfigError;
use crate::traits::HasId;

/// Capacity used when none is configured.
pub const DEFAULT_CAPACITY: usize = 100;

/// Policy selector plus capacity.
///
/// # Example
///
/// ```
/// use idcache::builder::CachePolicy;
/// use idcache::config::CacheConfig;
/// use idcache::traits::EntityCache;
///
/// let config = CacheConfig::default()
///     .with_policy(CachePolicy::Lfu)
///     .with_capacity(2);
/// let cache = config.build::<u32, (u32, &str)>();
///
/// cache.upsert((1, "one"));
/// assert_eq!(cache.size(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct CacheConfig {
    #[cfg_attr(feature = "serde", serde(rename = "type", alias = "policy"))]
    pub policy: CachePolicy,
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            policy: CachePolicy::Lru,
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl CacheConfig {
    pub fn with_policy(mut self, policy: CachePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Resolves raw settings, e.g. values read from the environment.
    ///
    /// `None` means "not configured" and takes the default. An unknown policy
    /// name is an error.
    ///
    /// # Example
    ///
    /// ```
    /// use idcache::builder::CachePolicy;
    /// use idcache::config::{CacheConfig, DEFAULT_CAPACITY};
    ///
    /// let config = CacheConfig::from_parts(Some("lfu"), None).unwrap();
    /// assert_eq!(config.policy, CachePolicy::Lfu);
    /// assert_eq!(config.capacity, DEFAULT_CAPACITY);
    ///
    /// assert!(CacheConfig::from_parts(Some("fifo"), Some(10)).is_err());
    /// ```
    pub fn from_parts(policy: Option<&str>, capacity: Option<usize>) -> Result<Self, ConfigError> {
        let defaults = CacheConfig::default();
        let policy = match policy {
            Some(name) => name.parse()?,
            None => defaults.policy,
        };
        Ok(CacheConfig {
            policy,
            capacity: capacity.unwrap_or(defaults.capacity),
        })
    }

    /// Builds an empty cache with this policy and capacity.
    pub fn build<ID, T>(&self) -> Cache<ID, T>
    where
        ID: Eq + Hash + Clone,
        T: HasId<ID>,
    {
        CacheBuilder::new(self.capacity).build(self.policy)
    }
}
