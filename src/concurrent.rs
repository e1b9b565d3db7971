//! Concurrent Cache Implementations
//!
//! This module provides a thread-safe wrapper around the LFU algorithm for
//! sharing one cache between threads.
//!
//! # Architecture
//!
//! The whole cache sits behind a single `parking_lot::Mutex`. Every operation
//! takes the lock for its full duration, so each call is one atomic
//! transaction over the key map, the frequency buckets and the
//! minimum-frequency marker.
//!
//! ## Why Mutex Instead of RwLock?
//!
//! An LFU `get()` is a write: it raises the key's frequency and moves the key
//! into another bucket. A read lock would never be enough, so `Mutex` is used
//! for its lower overhead.
//!
//! ## Why One Lock Instead of Segments?
//!
//! Partitioning keys across independently locked segments would turn eviction
//! into a per-segment decision: a full segment would evict its own least
//! frequently used key even while a colder key lived in another segment. A
//! single lock keeps the eviction choice global.
//!
//! # Example
//!
//! ```rust
//! use freq_cache::concurrent::ConcurrentLfuCache;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let cache = Arc::new(ConcurrentLfuCache::new(1000));
//!
//! let handles: Vec<_> = (0..4).map(|t| {
//!     let cache = Arc::clone(&cache);
//!     thread::spawn(move || {
//!         for i in 0..100 {
//!             let key = format!("key_{}_{}", t, i);
//!             cache.put(key.clone(), i);
//!             let _ = cache.get(&key);
//!         }
//!     })
//! }).collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(cache.len(), 400);
//! ```
//!
//! # Zero-Copy Access
//!
//! `get()` clones the value so the lock is released before returning. Use
//! `get_with()` to work on the value while the lock is held instead:
//!
//! ```rust
//! use freq_cache::concurrent::ConcurrentLfuCache;
//!
//! let cache = ConcurrentLfuCache::new(10);
//! cache.put("numbers", vec![1, 2, 3]);
//!
//! let total = cache.get_with(&"numbers", |v| v.iter().sum::<i32>());
//! assert_eq!(total, Some(6));
//! ```

mod lfu;

pub use self::lfu::ConcurrentLfuCache;
