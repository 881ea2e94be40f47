//! Error types for the idcache library.
//!
//! ## Key Components
//!
//! - [`ListError`]: Misuse of an [`IntrusiveList`](crate::ds::IntrusiveList)
//!   (empty-container access, stale or foreign handles). These are logic
//!   errors; the cache policies treat them as bugs and panic.
//! - [`InvariantError`]: Returned when internal data-structure invariants are
//!   violated (`check_invariants` methods on the policy cores).
//! - [`ConfigError`]: Returned when cache configuration is invalid
//!   (e.g. an unknown policy name).
//!
//! A lookup that finds nothing is never an error; it is `None`.
//!
//! ## Example Usage
//!
//! ```
//! use idcache::builder::CachePolicy;
//! use idcache::error::ConfigError;
//!
//! let policy: Result<CachePolicy, ConfigError> = "LFU".parse();
//! assert_eq!(policy, Ok(CachePolicy::Lfu));
//!
//! let bad = "MRU".parse::<CachePolicy>();
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ListError
// ---------------------------------------------------------------------------

/// Error returned by [`IntrusiveList`](crate::ds::IntrusiveList) operations
/// that were called in a state they do not support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListError {
    /// `front`, `back` or `pop_back` on a list with no linked entries.
    Empty,
    /// The handle was issued by a different list instance.
    ForeignHandle,
    /// The entry behind the handle has already been removed.
    StaleHandle,
    /// `push_front_existing` on an entry that is still linked.
    AlreadyLinked,
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ListError::Empty => "list is empty",
            ListError::ForeignHandle => "handle belongs to a different list",
            ListError::StaleHandle => "handle refers to a removed entry",
            ListError::AlreadyLinked => "entry is already linked",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for ListError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Produced by `check_invariants` methods on the policy cores
/// (e.g. [`LfuCore::check_invariants`](crate::policy::lfu::LfuCore::check_invariants)).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by policy-name parsing and
/// [`CacheConfig::from_parts`](crate::config::CacheConfig::from_parts).
/// Carries a human-readable description of which parameter failed validation.
///
/// # Example
///
/// ```
/// use idcache::config::CacheConfig;
///
/// let err = CacheConfig::from_parts(Some("ARC"), None).unwrap_err();
/// assert!(err.to_string().contains("ARC"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
