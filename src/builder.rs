//! Cache builder: capacity plus optional knobs, fallible at build time.
//!
//! ## Example
//!
//! ```rust
//! use lrukit::builder::CacheBuilder;
//! use lrukit::policy::lru::LruCache;
//! use lrukit::traits::CoreCache;
//!
//! let mut cache: LruCache<u64, String> = CacheBuilder::new(100).try_build().unwrap();
//! cache.insert(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some(&"hello".to_string()));
//! ```

use std::hash::Hash;

use crate::error::InvalidCapacity;
use crate::policy::lru::{EvictionListener, LruCache};

/// Builder for [`LruCache`] instances.
///
/// Capacity validation happens in [`try_build`](CacheBuilder::try_build), so
/// an invalid configuration is caught exactly once, at the end.
pub struct CacheBuilder<K, V>
where
    K: Eq + Hash + Clone,
{
    capacity: usize,
    prealloc: bool,
    listener: Option<EvictionListener<K, V>>,
}

impl<K, V> CacheBuilder<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Starts a builder for a cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            prealloc: true,
            listener: None,
        }
    }

    /// Controls up-front allocation of the index and node arena.
    ///
    /// Defaults to `true`. With `false`, memory grows on demand, which trades
    /// a smaller idle footprint for possible latency spikes while warming.
    pub fn prealloc(mut self, prealloc: bool) -> Self {
        self.prealloc = prealloc;
        self
    }

    /// Installs a hook that observes capacity-pressure evictions.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::builder::CacheBuilder;
    /// use lrukit::policy::lru::LruCache;
    /// use lrukit::traits::CoreCache;
    /// use std::sync::mpsc;
    ///
    /// let (tx, rx) = mpsc::channel();
    /// let mut cache: LruCache<u32, &str> = CacheBuilder::new(1)
    ///     .eviction_listener(move |key, _value| tx.send(*key).unwrap())
    ///     .try_build()
    ///     .unwrap();
    ///
    /// cache.insert(1, "a");
    /// cache.insert(2, "b");
    /// assert_eq!(rx.try_recv(), Ok(1));
    /// ```
    pub fn eviction_listener(mut self, listener: impl FnMut(&K, &V) + Send + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    /// Builds the cache.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCapacity`] when the configured capacity is zero.
    pub fn try_build(self) -> Result<LruCache<K, V>, InvalidCapacity> {
        LruCache::with_options(self.capacity, self.prealloc, self.listener)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::CoreCache;

    #[test]
    fn builds_with_defaults() {
        let cache: LruCache<u64, String> = CacheBuilder::new(10).try_build().unwrap();
        assert_eq!(cache.capacity(), 10);
        assert!(cache.is_empty());
    }

    #[test]
    fn zero_capacity_fails_at_build() {
        let result: Result<LruCache<u64, String>, _> = CacheBuilder::new(0).try_build();
        assert_eq!(result.unwrap_err().requested(), 0);
    }

    #[test]
    fn prealloc_false_still_behaves_correctly() {
        let mut cache: LruCache<u32, u32> =
            CacheBuilder::new(2).prealloc(false).try_build().unwrap();
        cache.insert(1, 10);
        cache.insert(2, 20);
        cache.insert(3, 30);

        assert_eq!(cache.len(), 2);
        assert!(!cache.contains(&1));
        cache.check_invariants().unwrap();
    }

    #[test]
    fn listener_from_builder_observes_evictions() {
        use std::sync::mpsc;

        let (tx, rx) = mpsc::channel();
        let mut cache: LruCache<u32, u32> = CacheBuilder::new(2)
            .eviction_listener(move |key, value| tx.send((*key, *value)).unwrap())
            .try_build()
            .unwrap();

        cache.insert(1, 10);
        cache.insert(2, 20);
        cache.insert(3, 30);

        assert_eq!(rx.try_recv(), Ok((1, 10)));
    }
}
