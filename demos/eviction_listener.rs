use lrukit::builder::CacheBuilder;
use lrukit::policy::lru::LruCache;
use lrukit::traits::CoreCache;

fn main() {
    let mut cache: LruCache<u32, String> = CacheBuilder::new(2)
        .eviction_listener(|key: &u32, value: &String| {
            println!("evicted {} => {}", key, value);
        })
        .try_build()
        .expect("capacity is positive");

    for (key, value) in [(1, "alpha"), (2, "beta"), (3, "gamma"), (4, "delta")] {
        cache.insert(key, value.to_string());
    }

    println!("resident: {}", cache.len());
}

// Expected output:
// evicted 1 => alpha
// evicted 2 => beta
// resident: 2
