//! Least Frequently Used Cache Implementation.
//!
//! The LFU cache evicts the entry with the lowest access frequency when a new
//! key arrives at a full cache. Ties are broken by recency: among the keys at
//! the lowest frequency, the one that reached that frequency first goes.
//!
//! # How It Works
//!
//! ```text
//!   map: K ──▶ CacheEntry { value, frequency, node }
//!
//!   buckets (one list per non-empty frequency, oldest at the front):
//!
//!     1 ──▶ HEAD ⇄ d ⇄ e ⇄ TAIL      ◀── min_frequency
//!     2 ──▶ HEAD ⇄ b ⇄ TAIL
//!     5 ──▶ HEAD ⇄ a ⇄ c ⇄ TAIL
//! ```
//!
//! - **Touch** (`get`, `get_mut`, `put` on a live key): unlink the key from
//!   bucket `f`, append it to the back of bucket `f + 1`. If bucket `f` is left
//!   empty it is dropped, and if it was the minimum the marker moves to `f + 1`.
//! - **Insert**: append the key to bucket 1 and reset the marker to 1.
//! - **Evict**: pop the front of the bucket named by the marker.
//!
//! `get` and `put` are a constant number of hash lookups and list relinks.
//!
//! # Minimum-frequency marker
//!
//! A touch moves a key up exactly one level, so when it empties the minimum
//! bucket the new minimum is `f + 1`. A new key resets the marker to 1.
//! `remove` and `pop` can leave a gap and recompute the marker from the
//! remaining buckets.

extern crate alloc;

use crate::config::LfuCacheConfig;
use crate::entry::CacheEntry;
use crate::error::InvariantError;
use crate::list::List;
use crate::metrics::{CacheMetrics, LfuCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::mem;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Frequency level to the list of keys currently at that level.
type Buckets<K> = HashMap<usize, List<K>>;

/// Reports a broken cross-structure invariant and aborts the operation.
#[cold]
#[track_caller]
fn invariant_violation(args: fmt::Arguments<'_>) -> ! {
    log::error!("lfu invariant violated: {}", args);
    panic!("lfu invariant violated: {}", args);
}

/// Internal LFU segment containing the actual cache algorithm.
///
/// This is shared between `LfuCache` (single-threaded) and
/// `ConcurrentLfuCache` (multi-threaded). All algorithm logic is
/// implemented here to avoid code duplication.
pub(crate) struct LfuSegment<K, V, S = DefaultHashBuilder> {
    /// Configuration for the LFU cache
    config: LfuCacheConfig,

    /// Lowest frequency with a non-empty bucket; meaningless while empty
    min_frequency: usize,

    /// Map from keys to their value, frequency and bucket position
    map: HashMap<K, CacheEntry<V>, S>,

    /// Map from frequency to the keys at that frequency, oldest first
    buckets: Buckets<K>,

    /// Metrics for tracking cache performance and frequency distribution
    metrics: LfuCacheMetrics,
}

impl<K: Hash + Eq, V, S: BuildHasher> LfuSegment<K, V, S> {
    /// Creates a new LFU segment from a config and hash builder.
    pub(crate) fn with_hasher(config: LfuCacheConfig, hash_builder: S) -> Self {
        if config.retains_entries() {
            log::debug!("lfu cache created with capacity {}", config.capacity);
        } else {
            log::debug!("lfu cache created with zero capacity; it will retain nothing");
        }
        LfuSegment {
            config,
            min_frequency: 1,
            map: HashMap::with_hasher(hash_builder),
            buckets: Buckets::default(),
            metrics: LfuCacheMetrics::new(),
        }
    }

    /// Returns the maximum number of key-value pairs the segment can hold.
    #[inline]
    pub(crate) fn cap(&self) -> usize {
        self.config.capacity
    }

    /// Returns the current number of key-value pairs in the segment.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the segment contains no key-value pairs.
    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns a reference to the metrics for this segment.
    #[inline]
    pub(crate) fn metrics(&self) -> &LfuCacheMetrics {
        &self.metrics
    }

    /// Returns the minimum-frequency marker, or `None` while empty.
    #[inline]
    pub(crate) fn min_frequency(&self) -> Option<usize> {
        (!self.is_empty()).then_some(self.min_frequency)
    }

    fn sync_levels(&mut self) {
        let min = self.min_frequency();
        self.metrics.update_frequency_levels(self.buckets.len(), min);
    }

    /// Moves a live key from bucket `f` to the back of bucket `f + 1`.
    fn touch<Q>(&mut self, key: &Q) -> Option<&mut CacheEntry<V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let entry = self.map.get_mut(key)?;
        let old_frequency = entry.frequency();

        let Some(bucket) = self.buckets.get_mut(&old_frequency) else {
            invariant_violation(format_args!("no bucket for frequency {old_frequency}"));
        };
        let stored_key = match bucket.remove(entry.node) {
            Ok(stored_key) => stored_key,
            Err(err) => {
                invariant_violation(format_args!("key not in bucket {old_frequency}: {err}"))
            }
        };
        let emptied = bucket.is_empty();

        let new_frequency = entry.meta.touch();
        if emptied {
            self.buckets.remove(&old_frequency);
            log::trace!("frequency bucket {} emptied", old_frequency);
            if old_frequency == self.min_frequency {
                self.min_frequency = new_frequency;
            }
        }

        entry.node = self
            .buckets
            .entry(new_frequency)
            .or_default()
            .push_back(stored_key);

        self.metrics.record_frequency_increment(new_frequency);
        self.metrics
            .update_frequency_levels(self.buckets.len(), Some(self.min_frequency));
        Some(entry)
    }

    /// Returns a reference to the value corresponding to the key.
    pub(crate) fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        if !self.map.contains_key(key) {
            self.metrics.core.record_miss();
            return None;
        }
        self.metrics.core.record_hit();
        self.touch(key).map(|entry| &entry.value)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        if !self.map.contains_key(key) {
            self.metrics.core.record_miss();
            return None;
        }
        self.metrics.core.record_hit();
        self.touch(key).map(|entry| &mut entry.value)
    }

    /// Returns the value without touching the key.
    pub(crate) fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.get(key).map(|entry| &entry.value)
    }

    /// Returns `true` if the key is live, without touching it.
    pub(crate) fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.contains_key(key)
    }

    /// Returns the key's current frequency, without touching it.
    pub(crate) fn frequency<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.get(key).map(CacheEntry::frequency)
    }

    /// Inserts a key-value pair into the segment.
    ///
    /// Returns the displaced pair: the old value when `key` was live, the
    /// evicted entry when room had to be made, or the rejected pair itself
    /// when the capacity is zero.
    pub(crate) fn put(&mut self, key: K, value: V) -> Option<(K, V)>
    where
        K: Clone,
    {
        if let Some(entry) = self.touch(&key) {
            let old_value = mem::replace(&mut entry.value, value);
            self.metrics.core.record_update();
            return Some((key, old_value));
        }

        if !self.config.retains_entries() {
            log::debug!("zero-capacity lfu cache rejected an insert");
            self.metrics.core.record_rejection();
            return Some((key, value));
        }

        let evicted = if self.len() >= self.cap() {
            let (frequency, evicted_key, evicted_value) = self.take_eviction_candidate();
            log::trace!("evicted entry at frequency {}", frequency);
            self.metrics.core.record_eviction();
            Some((evicted_key, evicted_value))
        } else {
            None
        };

        let node = self.buckets.entry(1).or_default().push_back(key.clone());
        self.map.insert(key, CacheEntry::new(value, node));
        self.min_frequency = 1;

        self.metrics.core.record_insertion();
        self.sync_levels();
        evicted
    }

    /// Unlinks the front of the minimum bucket and drops its record.
    ///
    /// Must only be called on a non-empty segment. The marker is left as is.
    fn take_eviction_candidate(&mut self) -> (usize, K, V) {
        let frequency = self.min_frequency;
        let Some(bucket) = self.buckets.get_mut(&frequency) else {
            invariant_violation(format_args!("no bucket at minimum frequency {frequency}"));
        };
        let key = match bucket.remove_front() {
            Ok(key) => key,
            Err(err) => invariant_violation(format_args!("minimum bucket {frequency}: {err}")),
        };
        if bucket.is_empty() {
            self.buckets.remove(&frequency);
            log::trace!("frequency bucket {} emptied", frequency);
        }
        let Some(entry) = self.map.remove(&key) else {
            invariant_violation(format_args!("bucket {frequency} held a key with no record"));
        };
        (frequency, key, entry.value)
    }

    /// Recomputes the marker after an explicit removal emptied a bucket.
    fn refresh_min_frequency(&mut self) {
        self.min_frequency = self.buckets.keys().copied().min().unwrap_or(1);
    }

    /// Removes a key from the segment, returning the value if the key was present.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let entry = self.map.remove(key)?;
        let frequency = entry.frequency();

        let Some(bucket) = self.buckets.get_mut(&frequency) else {
            invariant_violation(format_args!("no bucket for frequency {frequency}"));
        };
        if let Err(err) = bucket.remove(entry.node) {
            invariant_violation(format_args!("key not in bucket {frequency}: {err}"));
        }
        if bucket.is_empty() {
            self.buckets.remove(&frequency);
            if frequency == self.min_frequency {
                self.refresh_min_frequency();
            }
        }

        self.metrics.core.record_removal();
        self.sync_levels();
        Some(entry.value)
    }

    /// Removes and returns the eviction candidate (least frequently used item).
    ///
    /// Among several items at the lowest frequency, the one that reached that
    /// frequency first is returned.
    pub(crate) fn pop(&mut self) -> Option<(K, V)> {
        if self.is_empty() {
            return None;
        }
        let (frequency, key, value) = self.take_eviction_candidate();
        if !self.buckets.contains_key(&frequency) {
            self.refresh_min_frequency();
        }

        self.metrics.core.record_removal();
        self.sync_levels();
        Some((key, value))
    }

    /// Clears the segment, removing all key-value pairs.
    pub(crate) fn clear(&mut self) {
        self.map.clear();
        self.buckets.clear();
        self.min_frequency = 1;
        self.sync_levels();
    }

    /// Verifies the relationships between the key map, the buckets and the
    /// minimum-frequency marker.
    pub(crate) fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.map.len() > self.config.capacity {
            return Err(InvariantError::new(format!(
                "{} live keys exceed capacity {}",
                self.map.len(),
                self.config.capacity
            )));
        }

        let mut bucketed = 0;
        for (&frequency, bucket) in &self.buckets {
            if bucket.is_empty() {
                return Err(InvariantError::new(format!("bucket {frequency} is empty")));
            }
            bucket.check_invariants()?;
            bucketed += bucket.len();

            for key in bucket.iter() {
                let Some(entry) = self.map.get(key) else {
                    return Err(InvariantError::new(format!(
                        "bucket {frequency} holds a key with no record"
                    )));
                };
                if entry.frequency() != frequency {
                    return Err(InvariantError::new(format!(
                        "key at frequency {} sits in bucket {frequency}",
                        entry.frequency()
                    )));
                }
                if bucket.get(entry.node) != Some(key) {
                    return Err(InvariantError::new(format!(
                        "recorded position is stale in bucket {frequency}"
                    )));
                }
            }
        }

        if bucketed != self.map.len() {
            return Err(InvariantError::new(format!(
                "{bucketed} bucketed keys but {} records",
                self.map.len()
            )));
        }

        let lowest = self.buckets.keys().copied().min();
        if lowest.is_some() && lowest != Some(self.min_frequency) {
            return Err(InvariantError::new(format!(
                "marker is {} but lowest bucket is {:?}",
                self.min_frequency, lowest
            )));
        }
        Ok(())
    }
}

// Implement Debug for LfuSegment manually so it does not require K, V or S: Debug
impl<K, V, S> fmt::Debug for LfuSegment<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LfuSegment")
            .field("capacity", &self.config.capacity)
            .field("len", &self.map.len())
            .field("min_frequency", &self.min_frequency)
            .field("levels", &self.buckets.len())
            .finish()
    }
}

/// An implementation of a Least Frequently Used (LFU) cache.
///
/// The cache tracks the frequency of access for each item and evicts the least
/// frequently used item when a new key arrives at capacity. In case of a tie in
/// frequency, the least recently used item among those with the same frequency
/// is evicted.
///
/// `LfuCache` does no locking of its own: every operation that changes state
/// takes `&mut self`. Share it across threads behind a lock, or use
/// `ConcurrentLfuCache` (feature `concurrent`).
///
/// # Examples
///
/// ```
/// use freq_cache::LfuCache;
///
/// let mut cache = LfuCache::new(3);
///
/// cache.put("a", 1);
/// cache.put("b", 2);
/// cache.put("c", 3);
///
/// // Access "a" twice and "b" once
/// assert_eq!(cache.get(&"a"), Some(&1));
/// assert_eq!(cache.get(&"a"), Some(&1));
/// assert_eq!(cache.get(&"b"), Some(&2));
///
/// // "c" has the lowest frequency and is evicted
/// assert_eq!(cache.put("d", 4), Some(("c", 3)));
/// assert_eq!(cache.get(&"c"), None);
/// ```
#[derive(Debug)]
pub struct LfuCache<K, V, S = DefaultHashBuilder> {
    segment: LfuSegment<K, V, S>,
}

impl<K: Hash + Eq, V, S: BuildHasher> LfuCache<K, V, S> {
    /// Creates a new LFU cache with the specified capacity and hash builder.
    ///
    /// # Examples
    ///
    /// ```
    /// use freq_cache::LfuCache;
    /// use std::collections::hash_map::RandomState;
    ///
    /// let cache: LfuCache<&str, u32, _> = LfuCache::with_hasher(10, RandomState::new());
    /// assert_eq!(cache.cap(), 10);
    /// ```
    pub fn with_hasher(capacity: usize, hash_builder: S) -> Self {
        Self::init_with_hasher(LfuCacheConfig { capacity }, hash_builder)
    }

    /// Creates a new LFU cache from a config and an optional hash builder.
    ///
    /// When `hasher` is `None` the hash builder's `Default` is used.
    ///
    /// # Examples
    ///
    /// ```
    /// use freq_cache::config::LfuCacheConfig;
    /// use freq_cache::LfuCache;
    ///
    /// let cache: LfuCache<String, i32> = LfuCache::init(LfuCacheConfig { capacity: 16 }, None);
    /// assert_eq!(cache.cap(), 16);
    /// ```
    pub fn init(config: LfuCacheConfig, hasher: Option<S>) -> Self
    where
        S: Default,
    {
        Self::init_with_hasher(config, hasher.unwrap_or_default())
    }

    fn init_with_hasher(config: LfuCacheConfig, hash_builder: S) -> Self {
        Self {
            segment: LfuSegment::with_hasher(config, hash_builder),
        }
    }

    /// Returns the maximum number of key-value pairs the cache can hold.
    #[inline]
    pub fn cap(&self) -> usize {
        self.segment.cap()
    }

    /// Returns the current number of key-value pairs in the cache.
    #[inline]
    pub fn len(&self) -> usize {
        self.segment.len()
    }

    /// Returns `true` if the cache contains no key-value pairs.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segment.is_empty()
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the cache's key type, but
    /// [`Hash`] and [`Eq`] on the borrowed form *must* match those for
    /// the key type.
    ///
    /// Accessing an item increases its frequency by one and makes it the most
    /// recent item at its new frequency.
    #[inline]
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// Accessing an item increases its frequency count.
    #[inline]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.get_mut(key)
    }

    /// Returns a reference to the value without updating its frequency.
    #[inline]
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.peek(key)
    }

    /// Returns `true` if the cache holds the key. Does not update its frequency.
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.contains(key)
    }

    /// Returns how many times the key has been accessed since it was inserted.
    ///
    /// The insert itself counts, so a fresh key reports 1.
    #[inline]
    pub fn frequency<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.frequency(key)
    }

    /// Returns the lowest frequency held by any key, or `None` when empty.
    #[inline]
    pub fn min_frequency(&self) -> Option<usize> {
        self.segment.min_frequency()
    }

    /// Inserts a key-value pair into the cache.
    ///
    /// If the cache already contained this key, the key is touched exactly
    /// like [`get`](Self::get) and its value is replaced; the old pair is
    /// returned. Otherwise, if the cache is at capacity, the least frequently
    /// used item is evicted and returned. In case of a tie in frequency, the
    /// least recently used item among those with the same frequency is evicted.
    ///
    /// New items are inserted with a frequency of 1. A zero-capacity cache
    /// stores nothing and returns the pair it was given.
    #[inline]
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)>
    where
        K: Clone,
    {
        self.segment.put(key, value)
    }

    /// Removes a key from the cache, returning the value at the key if the key was previously in the cache.
    #[inline]
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.remove(key)
    }

    /// Removes and returns the eviction candidate (least frequently used item).
    ///
    /// # Examples
    ///
    /// ```
    /// use freq_cache::LfuCache;
    ///
    /// let mut cache = LfuCache::new(2);
    /// cache.put("a", 1);
    /// cache.put("b", 2);
    /// cache.get(&"a");
    ///
    /// assert_eq!(cache.pop(), Some(("b", 2)));
    /// assert_eq!(cache.pop(), Some(("a", 1)));
    /// assert_eq!(cache.pop(), None);
    /// ```
    #[inline]
    pub fn pop(&mut self) -> Option<(K, V)> {
        self.segment.pop()
    }

    /// Clears the cache, removing all key-value pairs.
    #[inline]
    pub fn clear(&mut self) {
        self.segment.clear()
    }

    /// Returns the LFU metrics collected so far.
    #[inline]
    pub fn lfu_metrics(&self) -> &LfuCacheMetrics {
        self.segment.metrics()
    }

    /// Verifies the internal invariants of the cache.
    ///
    /// Walks every bucket, so this is O(n). Intended for tests and debugging.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.segment.check_invariants()
    }
}

impl<K: Hash + Eq, V> LfuCache<K, V> {
    /// Creates a new LFU cache with the specified capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use freq_cache::LfuCache;
    ///
    /// let cache: LfuCache<&str, u32> = LfuCache::new(10);
    /// assert_eq!(cache.cap(), 10);
    /// ```
    pub fn new(capacity: usize) -> LfuCache<K, V, DefaultHashBuilder> {
        LfuCache::init(LfuCacheConfig { capacity }, None)
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> CacheMetrics for LfuCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.segment.metrics().metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.segment.metrics().algorithm_name()
    }
}
