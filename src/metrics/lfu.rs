//! LFU Cache Metrics
//!
//! Metrics specific to the LFU (Least Frequently Used) cache algorithm.

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// LFU-specific metrics (extends CoreCacheMetrics)
///
/// Focuses on how keys are spread over frequency levels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LfuCacheMetrics {
    /// Core metrics common to all cache algorithms
    pub core: CoreCacheMetrics,

    /// Minimum-frequency marker after the last operation (0 when empty)
    pub min_frequency: u64,

    /// Highest frequency any entry has reached since the cache was created
    pub max_frequency: u64,

    /// Total number of frequency increments (every touch raises one key by one)
    pub total_frequency_increments: u64,

    /// Number of non-empty frequency buckets after the last operation
    pub active_frequency_levels: u64,
}

impl LfuCacheMetrics {
    /// Creates a zeroed set of LFU metrics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a frequency increment
    ///
    /// # Arguments
    /// * `new_frequency` - The frequency the touched key moved to
    pub fn record_frequency_increment(&mut self, new_frequency: usize) {
        self.total_frequency_increments += 1;
        self.max_frequency = self.max_frequency.max(new_frequency as u64);
    }

    /// Records the bucket layout after an operation
    ///
    /// # Arguments
    /// * `levels` - Number of non-empty frequency buckets
    /// * `min_frequency` - Current minimum-frequency marker, `None` when empty
    pub fn update_frequency_levels(&mut self, levels: usize, min_frequency: Option<usize>) {
        self.active_frequency_levels = levels as u64;
        self.min_frequency = min_frequency.map_or(0, |f| f as u64);
        if let Some(f) = min_frequency {
            self.max_frequency = self.max_frequency.max(f as u64);
        }
    }

    /// Average number of increments per hit (0.0 with no hits)
    pub fn average_frequency(&self) -> f64 {
        if self.core.cache_hits > 0 {
            self.total_frequency_increments as f64 / self.core.cache_hits as f64
        } else {
            0.0
        }
    }

    /// Spread between the highest frequency reached and the current minimum
    pub fn frequency_range(&self) -> u64 {
        self.max_frequency.saturating_sub(self.min_frequency)
    }

    /// Converts LFU metrics to a BTreeMap for reporting
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();

        metrics.insert("min_frequency".to_string(), self.min_frequency as f64);
        metrics.insert("max_frequency".to_string(), self.max_frequency as f64);
        metrics.insert("frequency_range".to_string(), self.frequency_range() as f64);
        metrics.insert(
            "total_frequency_increments".to_string(),
            self.total_frequency_increments as f64,
        );
        metrics.insert(
            "active_frequency_levels".to_string(),
            self.active_frequency_levels as f64,
        );
        metrics.insert("average_frequency".to_string(), self.average_frequency());

        metrics
    }
}

impl CacheMetrics for LfuCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "LFU"
    }
}
