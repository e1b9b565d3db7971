//! Configuration for the Least Frequently Used (LFU) cache.
//!
//! # Examples
//!
//! ```
//! use freq_cache::config::LfuCacheConfig;
//! use freq_cache::LfuCache;
//!
//! let config = LfuCacheConfig { capacity: 100 };
//! let cache: LfuCache<String, i32> = LfuCache::init(config, None);
//! assert!(cache.is_empty());
//! ```

use core::fmt;

/// Configuration for an LFU (Least Frequently Used) cache.
///
/// # Fields
///
/// - `capacity`: Maximum number of entries the cache can hold. The bound is
///   fixed for the lifetime of the cache.
///
/// A capacity of `0` is accepted and produces a cache that never retains
/// anything: every `put` hands its pair straight back to the caller.
///
/// # Examples
///
/// ```
/// use freq_cache::config::LfuCacheConfig;
/// use freq_cache::LfuCache;
///
/// let config = LfuCacheConfig { capacity: 0 };
/// let mut cache: LfuCache<&str, i32> = LfuCache::init(config, None);
/// assert_eq!(cache.put("a", 1), Some(("a", 1)));
/// assert!(cache.is_empty());
/// ```
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LfuCacheConfig {
    /// Maximum number of key-value pairs the cache can hold
    pub capacity: usize,
}

impl LfuCacheConfig {
    /// Returns `true` if a cache built from this config can retain entries.
    #[inline]
    pub fn retains_entries(&self) -> bool {
        self.capacity > 0
    }
}

impl fmt::Debug for LfuCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LfuCacheConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}
