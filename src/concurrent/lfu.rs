//! Concurrent LFU Cache Implementation
//!
//! A thread-safe LFU cache: one [`LfuSegment`] guarded by one
//! `parking_lot::Mutex`. This is the multi-threaded counterpart to
//! [`LfuCache`](crate::LfuCache) and follows exactly the same eviction rules.
//!
//! ```text
//! ┌────────────────────────────────────────────┐
//! │             ConcurrentLfuCache             │
//! │                                            │
//! │   ┌──────────┐     ┌────────────────────┐  │
//! │   │  Mutex   │────▶│     LfuSegment     │  │
//! │   └──────────┘     │  map + buckets +   │  │
//! │                    │  min_frequency     │  │
//! │                    └────────────────────┘  │
//! └────────────────────────────────────────────┘
//! ```
//!
//! # Thread Safety
//!
//! `ConcurrentLfuCache` is `Send + Sync` whenever its key, value and hasher
//! are `Send`, and can be shared via `Arc`.

extern crate alloc;

use crate::config::LfuCacheConfig;
use crate::error::InvariantError;
use crate::lfu::LfuSegment;
use crate::metrics::CacheMetrics;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use parking_lot::Mutex;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;

/// A thread-safe LFU cache guarded by a single lock.
pub struct ConcurrentLfuCache<K, V, S = DefaultHashBuilder> {
    inner: Mutex<LfuSegment<K, V, S>>,
}

impl<K, V> ConcurrentLfuCache<K, V, DefaultHashBuilder>
where
    K: Hash + Eq + Clone + Send,
    V: Clone + Send,
{
    /// Creates a new concurrent LFU cache with the specified capacity.
    pub fn new(capacity: usize) -> Self {
        Self::init(LfuCacheConfig { capacity }, None)
    }
}

impl<K, V, S> ConcurrentLfuCache<K, V, S>
where
    K: Hash + Eq + Clone + Send,
    V: Clone + Send,
    S: BuildHasher + Send,
{
    /// Creates a new concurrent LFU cache from a config and an optional hash builder.
    pub fn init(config: LfuCacheConfig, hasher: Option<S>) -> Self
    where
        S: Default,
    {
        Self::with_hasher(config, hasher.unwrap_or_default())
    }

    /// Creates a new concurrent LFU cache with a custom hasher.
    pub fn with_hasher(config: LfuCacheConfig, hash_builder: S) -> Self {
        Self {
            inner: Mutex::new(LfuSegment::with_hasher(config, hash_builder)),
        }
    }

    /// Returns the maximum number of entries the cache can hold.
    pub fn capacity(&self) -> usize {
        self.inner.lock().cap()
    }

    /// Returns the number of entries in the cache.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns `true` if the cache contains no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Gets a value from the cache, raising its frequency.
    ///
    /// This clones the value to avoid holding the lock. For zero-copy access,
    /// use `get_with()` instead.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().get(key).cloned()
    }

    /// Gets a value and applies a function to it while holding the lock.
    ///
    /// The access counts as a touch, exactly like `get()`.
    pub fn get_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&V) -> R,
    {
        self.inner.lock().get(key).map(f)
    }

    /// Returns a copy of the value without touching the key.
    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().peek(key).cloned()
    }

    /// Inserts a key-value pair into the cache.
    ///
    /// Returns the displaced pair: the old value on overwrite, the evicted
    /// entry when the cache was full, or the pair itself at zero capacity.
    pub fn put(&self, key: K, value: V) -> Option<(K, V)> {
        self.inner.lock().put(key, value)
    }

    /// Removes a key from the cache, returning the value if it existed.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().remove(key)
    }

    /// Removes and returns the current eviction candidate.
    pub fn pop(&self) -> Option<(K, V)> {
        self.inner.lock().pop()
    }

    /// Returns `true` if the cache contains the key. Does not touch it.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().contains(key)
    }

    /// Returns the key's current frequency without touching it.
    pub fn frequency<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().frequency(key)
    }

    /// Returns the lowest live frequency, or `None` when empty.
    pub fn min_frequency(&self) -> Option<usize> {
        self.inner.lock().min_frequency()
    }

    /// Clears all entries from the cache.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Verifies the internal invariants of the cache under the lock.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.inner.lock().check_invariants()
    }
}

impl<K, V, S> CacheMetrics for ConcurrentLfuCache<K, V, S>
where
    K: Hash + Eq + Clone + Send,
    V: Clone + Send,
    S: BuildHasher + Send,
{
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.inner.lock().metrics().metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        "ConcurrentLFU"
    }
}

impl<K, V, S> core::fmt::Debug for ConcurrentLfuCache<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ConcurrentLfuCache")
            .field("inner", &*self.inner.lock())
            .finish()
    }
}
