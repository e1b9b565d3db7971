//! Cache Entry Record
//!
//! The LFU cache keeps three facts about every live key: its value, its
//! current frequency, and where its node sits inside the bucket list for that
//! frequency. Instead of three maps that must be kept in lockstep, all three
//! live in one [`CacheEntry`] stored under the key in a single hash map, so a
//! key can never be present in one index and missing from another.
//!
//! ```text
//!   map: K ──▶ CacheEntry { value, meta.frequency = f, node }
//!                                               │
//!   buckets: f ──▶ List<K>  HEAD ⇄ … ⇄ [node] ⇄ … ⇄ TAIL
//! ```

use crate::list::NodeRef;
use crate::meta::LfuMeta;
use core::fmt;

/// Record stored for every live key.
pub(crate) struct CacheEntry<V> {
    /// The cached value.
    pub(crate) value: V,

    /// Access frequency; equals the key of the bucket that holds `node`.
    pub(crate) meta: LfuMeta,

    /// Position of the key inside its bucket list.
    pub(crate) node: NodeRef,
}

impl<V> CacheEntry<V> {
    /// Creates the record for a freshly inserted key.
    #[inline]
    pub(crate) fn new(value: V, node: NodeRef) -> Self {
        Self {
            value,
            meta: LfuMeta::default(),
            node,
        }
    }

    #[inline]
    pub(crate) fn frequency(&self) -> usize {
        self.meta.frequency
    }
}

impl<V: fmt::Debug> fmt::Debug for CacheEntry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheEntry")
            .field("value", &self.value)
            .field("frequency", &self.meta.frequency)
            .finish()
    }
}
