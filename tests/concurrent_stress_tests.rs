//! Stress Tests for Shared Caches
//!
//! These tests verify thread safety and the structural invariants under high
//! contention, both for `ConcurrentLfuCache` and for a plain `LfuCache`
//! guarded by an external lock.

use freq_cache::LfuCache;
use scoped_threadpool::Pool;
use std::sync::Mutex;

const NUM_THREADS: u32 = 8;
const OPS_PER_THREAD: usize = 2_000;

#[test]
fn test_mutex_guarded_cache_on_scoped_pool() {
    let cache = Mutex::new(LfuCache::new(64));
    let mut pool = Pool::new(NUM_THREADS);

    pool.scoped(|scope| {
        for t in 0..NUM_THREADS as usize {
            let cache = &cache;
            scope.execute(move || {
                for i in 0..OPS_PER_THREAD {
                    let key = (t * 31 + i) % 128;
                    let mut guard = cache.lock().unwrap();
                    if i % 4 == 0 {
                        guard.put(key, i);
                    } else {
                        let _ = guard.get(&key);
                    }
                }
            });
        }
    });

    let guard = cache.lock().unwrap();
    assert!(guard.len() <= 64);
    assert!(guard.check_invariants().is_ok());
}

#[cfg(feature = "concurrent")]
mod concurrent {
    use super::{NUM_THREADS, OPS_PER_THREAD};
    use freq_cache::ConcurrentLfuCache;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn stress_mixed_operations() {
        let cache: Arc<ConcurrentLfuCache<usize, usize>> = Arc::new(ConcurrentLfuCache::new(100));
        let evictions = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..NUM_THREADS as usize)
            .map(|t| {
                let cache = Arc::clone(&cache);
                let evictions = Arc::clone(&evictions);
                thread::spawn(move || {
                    for i in 0..OPS_PER_THREAD {
                        let key = (t * OPS_PER_THREAD + i) % 500;
                        match i % 5 {
                            0 | 1 => {
                                if let Some((evicted, _)) = cache.put(key, i) {
                                    if evicted != key {
                                        evictions.fetch_add(1, Ordering::Relaxed);
                                    }
                                }
                            }
                            2 | 3 => {
                                let _ = cache.get(&key);
                            }
                            _ => {
                                let _ = cache.remove(&key);
                            }
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert!(cache.len() <= 100);
        assert!(evictions.load(Ordering::Relaxed) > 0);
        assert!(cache.check_invariants().is_ok());
    }

    #[test]
    fn stress_hot_keys_survive() {
        let cache: Arc<ConcurrentLfuCache<usize, usize>> = Arc::new(ConcurrentLfuCache::new(10));
        for hot in 0..5 {
            cache.put(hot, hot);
            for _ in 0..1_000 {
                cache.get(&hot);
            }
        }

        let handles: Vec<_> = (0..NUM_THREADS as usize)
            .map(|t| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..OPS_PER_THREAD {
                        cache.put(1_000 + t * OPS_PER_THREAD + i, i);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        // Cold one-shot keys never reach frequency 1000, so they always lose.
        for hot in 0..5 {
            assert!(cache.contains(&hot), "hot key {hot} was evicted");
        }
        assert_eq!(cache.len(), 10);
    }
}
