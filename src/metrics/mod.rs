//! Cache Metrics System
//!
//! Provides metrics reporting for the cache through a `BTreeMap` of named
//! counters and rates. The cache updates its metrics as a side effect of every
//! operation; callers read them through the [`CacheMetrics`] trait.
//!
//! # Why BTreeMap over HashMap?
//!
//! - **Deterministic ordering**: Metrics always appear in consistent order
//! - **Reproducible output**: Two runs of the same workload print the same report
//! - **Better debugging**: Consistent output makes logs more readable
//!
//! The performance difference is negligible with ~15 metric keys.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

pub mod lfu;

pub use lfu::LfuCacheMetrics;

/// Counters common to any bounded cache.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CoreCacheMetrics {
    /// Total number of lookups (`get`/`get_mut`) made against the cache
    pub requests: u64,

    /// Number of lookups that found their key
    pub cache_hits: u64,

    /// Number of brand-new keys admitted into the cache
    pub insertions: u64,

    /// Number of `put` calls that overwrote the value of a live key
    pub updates: u64,

    /// Number of entries pushed out to make room for a new key
    pub evictions: u64,

    /// Number of entries taken out explicitly (`remove`/`pop`)
    pub removals: u64,

    /// Number of `put` calls refused because the cache has zero capacity
    pub rejections: u64,
}

impl CoreCacheMetrics {
    /// Creates a zeroed set of counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a lookup that found its key.
    pub fn record_hit(&mut self) {
        self.requests += 1;
        self.cache_hits += 1;
    }

    /// Records a lookup that did not find its key.
    ///
    /// Misses are derived as `requests - cache_hits`.
    pub fn record_miss(&mut self) {
        self.requests += 1;
    }

    /// Records the admission of a new key.
    pub fn record_insertion(&mut self) {
        self.insertions += 1;
    }

    /// Records an in-place overwrite of a live key's value.
    pub fn record_update(&mut self) {
        self.updates += 1;
    }

    /// Records a capacity-driven eviction.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Records an explicit removal.
    pub fn record_removal(&mut self) {
        self.removals += 1;
    }

    /// Records a `put` refused by a zero-capacity cache.
    pub fn record_rejection(&mut self) {
        self.rejections += 1;
    }

    /// Number of lookups that missed.
    pub fn cache_misses(&self) -> u64 {
        self.requests - self.cache_hits
    }

    /// Fraction of lookups that hit, between 0.0 and 1.0 (0.0 with no requests).
    pub fn hit_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_hits as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Fraction of lookups that missed, between 0.0 and 1.0 (0.0 with no requests).
    pub fn miss_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_misses() as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Convert core metrics to a BTreeMap for reporting
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();

        metrics.insert("cache_hits".to_string(), self.cache_hits as f64);
        metrics.insert("cache_misses".to_string(), self.cache_misses() as f64);
        metrics.insert("evictions".to_string(), self.evictions as f64);
        metrics.insert("insertions".to_string(), self.insertions as f64);
        metrics.insert("rejections".to_string(), self.rejections as f64);
        metrics.insert("removals".to_string(), self.removals as f64);
        metrics.insert("requests".to_string(), self.requests as f64);
        metrics.insert("updates".to_string(), self.updates as f64);

        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("miss_rate".to_string(), self.miss_rate());

        if self.insertions > 0 {
            metrics.insert(
                "eviction_rate".to_string(),
                self.evictions as f64 / self.insertions as f64,
            );
        }

        metrics
    }
}

/// Uniform interface for reading a cache's metrics.
pub trait CacheMetrics {
    /// Returns all metrics as key-value pairs in deterministic order.
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Algorithm name for identification (e.g. "LFU").
    fn algorithm_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_metrics_rates() {
        let mut core = CoreCacheMetrics::new();
        assert_eq!(core.hit_rate(), 0.0);
        assert_eq!(core.miss_rate(), 0.0);

        core.record_hit();
        core.record_hit();
        core.record_hit();
        core.record_miss();
        assert_eq!(core.requests, 4);
        assert_eq!(core.cache_misses(), 1);
        assert_eq!(core.hit_rate(), 0.75);
        assert_eq!(core.miss_rate(), 0.25);
    }

    #[test]
    fn test_core_metrics_btreemap() {
        let mut core = CoreCacheMetrics::new();
        core.record_insertion();
        core.record_insertion();
        core.record_eviction();
        core.record_update();
        core.record_removal();
        core.record_rejection();

        let map = core.to_btreemap();
        assert_eq!(map["insertions"], 2.0);
        assert_eq!(map["evictions"], 1.0);
        assert_eq!(map["eviction_rate"], 0.5);
        assert_eq!(map["updates"], 1.0);
        assert_eq!(map["removals"], 1.0);
        assert_eq!(map["rejections"], 1.0);

        let keys: alloc::vec::Vec<_> = map.keys().cloned().collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }
}
