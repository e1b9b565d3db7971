//! Cache Configuration Module
//!
//! Configuration structs have all public fields for simple instantiation:
//!
//! - **Simple**: Just create the struct with all fields set
//! - **Type safety**: All parameters must be provided at construction
//! - **No boilerplate**: No constructors or builder methods needed
//!
//! | Config | Cache | Description |
//! |--------|-------|-------------|
//! | `LfuCacheConfig` | [`LfuCache`](crate::LfuCache) | Least Frequently Used |
//!
//! The concurrent cache (requires the `concurrent` feature) takes the same
//! `LfuCacheConfig`; it guards one cache with one lock, so there is nothing
//! extra to configure.
//!
//! # Examples
//!
//! ```
//! use freq_cache::config::LfuCacheConfig;
//! use freq_cache::LfuCache;
//!
//! let config = LfuCacheConfig { capacity: 1000 };
//! let cache: LfuCache<String, i32> = LfuCache::init(config, None);
//! assert_eq!(cache.cap(), 1000);
//! ```

pub mod lfu;

pub use lfu::LfuCacheConfig;
