#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Eviction order
//!
//! ```text
//!   1. lowest frequency wins          a=3  b=2  c=1   ──▶ evict c
//!   2. ties: oldest arrival wins      d=1  e=1        ──▶ evict d
//! ```
//!
//! Frequency starts at 1 when a key is inserted and rises by one on every
//! `get`, `get_mut`, or `put` to a key that is already present. Inside one
//! frequency level keys are kept in the order they reached that level.
//!
//! ## Performance Characteristics
//!
//! | Operation | Time |
//! |-----------|------|
//! | `get` / `get_mut` | O(1) |
//! | `put` | O(1) |
//! | `remove` / `pop` | O(1), plus O(levels) when the lowest level empties |
//! | `check_invariants` | O(n) |
//!
//! ## Code Example
//!
//! ```rust
//! use freq_cache::LfuCache;
//! use freq_cache::config::LfuCacheConfig;
//!
//! let config = LfuCacheConfig { capacity: 2 };
//! let mut cache: LfuCache<&str, i32> = LfuCache::init(config, None);
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");      // "a" now has frequency 2
//! cache.put("c", 3);    // "b" evicted (frequency 1)
//! assert!(cache.get(&"b").is_none());
//! ```
//!
//! ## The bucket list
//!
//! Each frequency level is an [`list::List`]: an index-linked doubly linked
//! list with permanent head and tail sentinels. Handles ([`list::NodeRef`])
//! carry a generation, so a handle to a removed node is rejected instead of
//! silently aliasing whatever reuses its slot.
//!
//! ```rust
//! use freq_cache::list::List;
//!
//! let mut list = List::new();
//! list.push_back(1);
//! let middle = list.push_back(2);
//! list.push_back(3);
//!
//! assert_eq!(list.remove(middle), Ok(2));
//! assert!(list.remove(middle).is_err());
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 3]);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `hashbrown` | ✓ | Use hashbrown for `no_std` hash maps |
//! | `std` | | Enable standard library features |
//! | `concurrent` | | Thread-safe [`ConcurrentLfuCache`](concurrent::ConcurrentLfuCache) (uses parking_lot) |
//! | `nightly` | | Nightly-only optimizations |

#![no_std]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(any(feature = "std", not(feature = "hashbrown")))]
extern crate std;

/// Error types for list operations and invariant checks.
pub mod error;

/// Frequency metadata carried by each cache entry.
pub mod meta;

/// Per-key record combining value, frequency and bucket position.
pub(crate) mod entry;

/// Index-linked doubly linked list with head and tail sentinels.
///
/// Used by the cache as the ordered bucket of keys for one frequency level.
/// It is public so the list can be used and tested on its own.
pub mod list;

/// Cache configuration structures.
pub mod config;

/// Least Frequently Used (LFU) cache implementation.
///
/// Provides a fixed-size cache that evicts the least frequently used items
/// when capacity is reached. Items are tracked by their access frequency.
pub mod lfu;

/// Cache metrics system.
///
/// Provides counters for lookups, insertions and evictions plus LFU-specific
/// frequency statistics, reported through a common trait.
pub mod metrics;

/// Concurrent cache implementations.
///
/// Provides a thread-safe LFU cache that serializes all access through one lock.
///
/// Available when the `concurrent` feature is enabled.
#[cfg(feature = "concurrent")]
pub mod concurrent;

pub use config::LfuCacheConfig;
pub use error::{InvariantError, ListError};
pub use lfu::LfuCache;
pub use list::{List, NodeRef};
pub use meta::LfuMeta;
pub use metrics::{CacheMetrics, LfuCacheMetrics};

#[cfg(feature = "concurrent")]
pub use concurrent::ConcurrentLfuCache;
