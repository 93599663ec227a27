// ==============================================
// CONCURRENT LRU CACHE TESTS (integration)
// ==============================================
//
// Multi-threaded exercises for ConcurrentLruCache. These require real
// threads and cannot live inline with the policy core.

#![cfg(feature = "concurrency")]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use lrukit::policy::lru::ConcurrentLruCache;

#[test]
fn concurrent_inserts_respect_capacity() {
    let cache: Arc<ConcurrentLruCache<u64, u64>> = Arc::new(ConcurrentLruCache::new(64).unwrap());
    let threads = 4;
    let per_thread = 500u64;
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads as u64)
        .map(|t| {
            let cache = Arc::clone(&cache);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..per_thread {
                    let key = t * per_thread + i;
                    cache.insert(key, key * 10);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(cache.len(), 64);
    assert_eq!(cache.capacity(), 64);
}

#[test]
fn mixed_readers_and_writers_stay_consistent() {
    let cache: Arc<ConcurrentLruCache<u64, String>> =
        Arc::new(ConcurrentLruCache::new(32).unwrap());
    for k in 0..32u64 {
        cache.insert(k, format!("v{}", k));
    }

    let barrier = Arc::new(Barrier::new(3));

    let writer = {
        let cache = Arc::clone(&cache);
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            for i in 0..1_000u64 {
                cache.insert(100 + (i % 50), format!("w{}", i));
            }
        })
    };

    let getter = {
        let cache = Arc::clone(&cache);
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            let mut hits = 0u64;
            for i in 0..1_000u64 {
                if cache.get(&(i % 64)).is_some() {
                    hits += 1;
                }
            }
            hits
        })
    };

    let peeker = {
        let cache = Arc::clone(&cache);
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            for i in 0..1_000u64 {
                let _ = cache.peek(&(i % 64));
                let _ = cache.contains(&(i % 64));
                assert!(cache.len() <= cache.capacity());
            }
        })
    };

    writer.join().unwrap();
    let _hits = getter.join().unwrap();
    peeker.join().unwrap();

    assert!(cache.len() <= cache.capacity());
}

#[test]
fn value_handles_outlive_eviction() {
    let cache: Arc<ConcurrentLruCache<u64, Vec<u8>>> =
        Arc::new(ConcurrentLruCache::new(8).unwrap());
    cache.insert(1, vec![0xAB; 1024]);

    let held = cache.get(&1).unwrap();

    // Churn the cache until key 1 is long gone.
    for k in 100..200u64 {
        cache.insert(k, vec![0; 16]);
    }
    assert!(!cache.contains(&1));

    // The Arc handed out earlier is still intact.
    assert_eq!(held.len(), 1024);
    assert!(held.iter().all(|&b| b == 0xAB));
}

#[test]
fn eviction_listener_counts_under_contention() {
    let evictions = Arc::new(AtomicU64::new(0));
    let cache: Arc<ConcurrentLruCache<u64, u64>> = Arc::new(ConcurrentLruCache::new(16).unwrap());
    {
        let evictions = Arc::clone(&evictions);
        cache.set_eviction_listener(Box::new(move |_key, _value| {
            evictions.fetch_add(1, Ordering::Relaxed);
        }));
    }

    let threads = 4;
    let per_thread = 250u64;
    let barrier = Arc::new(Barrier::new(threads));
    let handles: Vec<_> = (0..threads as u64)
        .map(|t| {
            let cache = Arc::clone(&cache);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..per_thread {
                    cache.insert(t * per_thread + i, i);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    // Every key was distinct: total inserts minus resident entries evicted.
    let total = threads as u64 * per_thread;
    assert_eq!(evictions.load(Ordering::Relaxed), total - cache.len() as u64);
}

#[test]
fn clones_share_the_same_cache() {
    let cache: ConcurrentLruCache<u64, u64> = ConcurrentLruCache::new(8).unwrap();
    let clone = cache.clone();

    cache.insert(1, 10);
    assert_eq!(clone.get(&1).map(|v| *v), Some(10));

    clone.remove(&1);
    assert!(!cache.contains(&1));
}
