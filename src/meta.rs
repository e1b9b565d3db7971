//! Per-Entry Frequency Metadata
//!
//! The LFU cache tracks one counter per live key. A key enters the cache at
//! frequency 1 and every touch (a `get`, `get_mut`, or a `put` on a key that
//! is already present) raises it by exactly one. Nothing ever lowers it.
//!
//! # Usage
//!
//! ```
//! use freq_cache::meta::LfuMeta;
//!
//! let mut meta = LfuMeta::default();
//! assert_eq!(meta.frequency, 1);
//!
//! assert_eq!(meta.touch(), 2);
//! assert_eq!(meta.frequency, 2);
//! ```

/// Frequency metadata for an LFU cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LfuMeta {
    /// Number of accesses since insertion, counting the insert itself.
    pub frequency: usize,
}

impl LfuMeta {
    /// Creates metadata with the specified frequency.
    #[inline]
    pub fn new(frequency: usize) -> Self {
        Self { frequency }
    }

    /// Records one access and returns the new frequency.
    #[inline]
    pub fn touch(&mut self) -> usize {
        self.frequency = self.frequency.saturating_add(1);
        self.frequency
    }
}

impl Default for LfuMeta {
    /// A freshly inserted key has been accessed once.
    fn default() -> Self {
        Self::new(1)
    }
}
