use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use lrukit::policy::lru::LruCache;
use lrukit::traits::{CoreCache, LruCacheTrait};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn filled_cache(capacity: usize) -> LruCache<u64, u64> {
    let mut cache = LruCache::new(capacity).unwrap();
    for i in 0..capacity as u64 {
        cache.insert(i, i);
    }
    cache
}

fn bench_insert_get(c: &mut Criterion) {
    c.bench_function("lru_insert_get", |b| {
        b.iter_batched(
            || filled_cache(1024),
            |mut cache| {
                for i in 0..1024u64 {
                    cache.insert(std::hint::black_box(i + 10_000), i);
                    let _ = std::hint::black_box(cache.get(&std::hint::black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_eviction_churn(c: &mut Criterion) {
    c.bench_function("lru_eviction_churn", |b| {
        b.iter_batched(
            || filled_cache(1024),
            |mut cache| {
                for i in 0..4096u64 {
                    cache.insert(std::hint::black_box(10_000 + i), i);
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_touch_hotset(c: &mut Criterion) {
    c.bench_function("lru_touch_hotset", |b| {
        b.iter_batched(
            || filled_cache(4096),
            |mut cache| {
                for i in 0..4096u64 {
                    let _ = std::hint::black_box(cache.touch(&std::hint::black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_pop_lru_drain(c: &mut Criterion) {
    c.bench_function("lru_pop_lru_drain", |b| {
        b.iter_batched(
            || filled_cache(1024),
            |mut cache| {
                while let Some(entry) = cache.pop_lru() {
                    std::hint::black_box(entry);
                }
            },
            BatchSize::SmallInput,
        )
    });
}

// Skewed mixed workload: 80% reads over a hot subset, 20% inserts of new
// keys, the shape a buffer-pool cache actually sees.
fn bench_mixed_skewed(c: &mut Criterion) {
    c.bench_function("lru_mixed_skewed", |b| {
        b.iter_batched(
            || {
                let ops: Vec<(bool, u64)> = {
                    let mut rng = StdRng::seed_from_u64(99);
                    (0..4096)
                        .map(|_| {
                            if rng.gen_bool(0.8) {
                                (true, rng.gen_range(0..256u64))
                            } else {
                                (false, rng.gen_range(0..1 << 20))
                            }
                        })
                        .collect()
                };
                (filled_cache(1024), ops)
            },
            |(mut cache, ops)| {
                for (is_read, key) in ops {
                    if is_read {
                        let _ = std::hint::black_box(cache.get(&key));
                    } else {
                        cache.insert(key, key);
                    }
                }
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_insert_get,
    bench_eviction_churn,
    bench_touch_hotset,
    bench_pop_lru_drain,
    bench_mixed_skewed
);
criterion_main!(benches);
