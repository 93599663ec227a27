#![no_main]

use libfuzzer_sys::fuzz_target;
use lrukit::policy::lru::LruCache;
use lrukit::traits::{CoreCache, LruCacheTrait, MutableCache};

// Fuzz arbitrary operation sequences against the cache invariants.
//
// The first byte selects a capacity in 1..=16; the rest drive insert, get,
// peek, remove, touch, pop_lru, and clear with small keys so collisions and
// evictions happen constantly.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let capacity = usize::from(data[0] % 16) + 1;
    let mut cache: LruCache<u8, u16> = match LruCache::new(capacity) {
        Ok(cache) => cache,
        Err(_) => unreachable!("capacity is always >= 1"),
    };

    let mut idx = 1;
    while idx + 1 < data.len() {
        let op = data[idx] % 8;
        let key = data[idx + 1] % 24;
        let value = u16::from(data[idx + 1]);

        match op {
            0 | 1 => {
                cache.insert(key, value);
                // The inserted key is resident and MRU.
                assert!(cache.contains(&key));
                assert_eq!(cache.recency_rank(&key), Some(0));
            },
            2 => {
                let was_present = cache.contains(&key);
                let got = cache.get(&key).copied();
                assert_eq!(got.is_some(), was_present);
                if was_present {
                    assert_eq!(cache.recency_rank(&key), Some(0));
                }
            },
            3 => {
                // Peek must not disturb recency.
                let rank_before = cache.recency_rank(&key);
                let _ = cache.peek(&key);
                assert_eq!(cache.recency_rank(&key), rank_before);
            },
            4 => {
                let was_present = cache.contains(&key);
                assert_eq!(cache.remove(&key).is_some(), was_present);
                assert!(!cache.contains(&key));
            },
            5 => {
                let was_present = cache.contains(&key);
                assert_eq!(cache.touch(&key), was_present);
            },
            6 => {
                let len_before = cache.len();
                let victim = cache.peek_lru().map(|(k, _)| *k);
                let popped = cache.pop_lru();
                assert_eq!(popped.map(|(k, _)| k), victim);
                if victim.is_some() {
                    assert_eq!(cache.len(), len_before - 1);
                }
            },
            _ => {
                cache.clear();
                assert!(cache.is_empty());
            },
        }

        assert!(cache.len() <= cache.capacity());
        cache.check_invariants().expect("cache invariants violated");

        idx += 2;
    }
});
