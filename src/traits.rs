//! # Cache Trait Hierarchy
//!
//! Defines the trait seams for the cache: universal operations every bounded
//! cache supports, arbitrary key removal, and the recency-specific surface of
//! an LRU policy.
//!
//! ```text
//!   ┌─────────────────────────────────────────┐
//!   │            CoreCache<K, V>              │
//!   │                                         │
//!   │  insert(&mut, K, V) → Option<V>         │
//!   │  get(&mut, &K) → Option<&V>             │
//!   │  contains(&, &K) → bool                 │
//!   │  len(&) → usize                         │
//!   │  is_empty(&) → bool                     │
//!   │  capacity(&) → usize                    │
//!   │  clear(&mut)                            │
//!   └──────────────────┬──────────────────────┘
//!                      │
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │           MutableCache<K, V>            │
//!   │                                         │
//!   │  remove(&mut, &K) → Option<V>           │
//!   │  remove_batch(&mut, &[K])               │
//!   └──────────────────┬──────────────────────┘
//!                      │
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │          LruCacheTrait<K, V>            │
//!   │                                         │
//!   │  pop_lru(&mut) → Option<(K, V)>         │
//!   │  peek_lru(&) → Option<(&K, &V)>         │
//!   │  touch(&mut, &K) → bool                 │
//!   │  recency_rank(&, &K) → Option<usize>    │
//!   └─────────────────────────────────────────┘
//! ```
//!
//! Splitting the hierarchy keeps generic call sites honest: code that only
//! warms a cache takes `CoreCache`, code that invalidates takes
//! `MutableCache`, and code that reasons about eviction order takes
//! [`LruCacheTrait`].

/// Core cache operations that any bounded cache supports.
///
/// # Example
///
/// ```
/// use lrukit::policy::lru::LruCache;
/// use lrukit::traits::CoreCache;
///
/// fn warm<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, String)]) {
///     for (key, value) in data {
///         cache.insert(*key, value.clone());
///     }
/// }
///
/// let mut cache = LruCache::new(16).unwrap();
/// warm(&mut cache, &[(1, "one".to_string()), (2, "two".to_string())]);
/// assert_eq!(cache.len(), 2);
/// ```
pub trait CoreCache<K, V> {
    /// Inserts a key-value pair, returning the previous value if the key
    /// already existed.
    ///
    /// When the cache is full and `key` is new, the least recently used entry
    /// is evicted to make room.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    /// use lrukit::traits::CoreCache;
    ///
    /// let mut cache = LruCache::new(8).unwrap();
    /// assert_eq!(cache.insert(1, "first"), None);
    /// assert_eq!(cache.insert(1, "second"), Some("first"));
    /// ```
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Returns a reference to the value for `key`, counting the read as a
    /// use.
    ///
    /// A miss is a normal outcome, not an error, and leaves eviction order
    /// untouched. Use [`contains`](Self::contains) to test existence without
    /// refreshing recency.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    /// use lrukit::traits::CoreCache;
    ///
    /// let mut cache = LruCache::new(8).unwrap();
    /// cache.insert(1, "value");
    /// assert_eq!(cache.get(&1), Some(&"value"));
    /// assert_eq!(cache.get(&99), None);
    /// ```
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Checks whether `key` is present without updating access state.
    fn contains(&self, key: &K) -> bool;

    /// Returns the current number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if the cache holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum number of entries the cache can hold.
    fn capacity(&self) -> usize;

    /// Removes all entries.
    fn clear(&mut self);
}

/// Caches that support arbitrary key-based removal.
///
/// # Example
///
/// ```
/// use lrukit::policy::lru::LruCache;
/// use lrukit::traits::{CoreCache, MutableCache};
///
/// fn invalidate<C: MutableCache<u64, &'static str>>(cache: &mut C, keys: &[u64]) {
///     for key in keys {
///         cache.remove(key);
///     }
/// }
///
/// let mut cache = LruCache::new(8).unwrap();
/// cache.insert(1, "one");
/// cache.insert(2, "two");
/// invalidate(&mut cache, &[1]);
/// assert!(!cache.contains(&1));
/// assert!(cache.contains(&2));
/// ```
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes `key` and returns its value if it existed.
    ///
    /// `is_some()` on the result answers "did the key exist". Removal does
    /// not disturb the relative order of the remaining entries.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes several keys, returning each outcome in input order.
    ///
    /// The default implementation loops over [`remove`](Self::remove).
    fn remove_batch(&mut self, keys: &[K]) -> Vec<Option<V>> {
        keys.iter().map(|k| self.remove(k)).collect()
    }
}

/// Recency-specific operations of an LRU cache.
///
/// Entries are totally ordered by recency of access; the least recently
/// accessed entry is the next eviction victim.
///
/// # Example
///
/// ```
/// use lrukit::policy::lru::LruCache;
/// use lrukit::traits::{CoreCache, LruCacheTrait};
///
/// let mut cache = LruCache::new(3).unwrap();
/// cache.insert(1, "first");
/// cache.insert(2, "second");
/// cache.insert(3, "third");
///
/// // Reading key 1 makes it MRU, so key 2 becomes the victim.
/// cache.get(&1);
/// assert_eq!(cache.peek_lru().map(|(k, _)| *k), Some(2));
///
/// let (key, _) = cache.pop_lru().unwrap();
/// assert_eq!(key, 2);
/// ```
pub trait LruCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least recently used entry.
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Returns the least recently used entry without removing it or
    /// refreshing its recency.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Marks `key` as most recently used without reading its value.
    ///
    /// Returns `true` if the key was present.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    /// use lrukit::traits::{CoreCache, LruCacheTrait};
    ///
    /// let mut cache = LruCache::new(2).unwrap();
    /// cache.insert(1, "a");
    /// cache.insert(2, "b");
    ///
    /// assert!(cache.touch(&1));
    /// cache.insert(3, "c"); // evicts key 2, not the touched key 1
    /// assert!(cache.contains(&1));
    /// assert!(!cache.contains(&2));
    /// assert!(!cache.touch(&99));
    /// ```
    fn touch(&mut self, key: &K) -> bool;

    /// Returns the recency rank of `key`: 0 is most recent, `len() - 1` is
    /// the eviction victim.
    ///
    /// O(n) list scan; intended for diagnostics and tests, not hot paths.
    fn recency_rank(&self, key: &K) -> Option<usize>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimal vector-backed implementation to pin down the trait contract
    // independent of the real policy.
    struct VecCache {
        data: Vec<(u32, String)>,
        capacity: usize,
    }

    impl CoreCache<u32, String> for VecCache {
        fn insert(&mut self, key: u32, value: String) -> Option<String> {
            if let Some((_, existing)) = self.data.iter_mut().find(|(k, _)| *k == key) {
                return Some(std::mem::replace(existing, value));
            }
            if self.data.len() >= self.capacity {
                self.data.remove(0);
            }
            self.data.push((key, value));
            None
        }

        fn get(&mut self, key: &u32) -> Option<&String> {
            let pos = self.data.iter().position(|(k, _)| k == key)?;
            let entry = self.data.remove(pos);
            self.data.push(entry);
            self.data.last().map(|(_, v)| v)
        }

        fn contains(&self, key: &u32) -> bool {
            self.data.iter().any(|(k, _)| k == key)
        }

        fn len(&self) -> usize {
            self.data.len()
        }

        fn capacity(&self) -> usize {
            self.capacity
        }

        fn clear(&mut self) {
            self.data.clear();
        }
    }

    impl MutableCache<u32, String> for VecCache {
        fn remove(&mut self, key: &u32) -> Option<String> {
            let pos = self.data.iter().position(|(k, _)| k == key)?;
            Some(self.data.remove(pos).1)
        }
    }

    #[test]
    fn insert_returns_previous_value() {
        let mut cache = VecCache {
            data: Vec::new(),
            capacity: 2,
        };
        assert_eq!(cache.insert(1, "a".into()), None);
        assert_eq!(cache.insert(1, "b".into()), Some("a".to_string()));
    }

    #[test]
    fn is_empty_tracks_len_default() {
        let mut cache = VecCache {
            data: Vec::new(),
            capacity: 2,
        };
        assert!(cache.is_empty());
        cache.insert(1, "a".into());
        assert!(!cache.is_empty());
    }

    #[test]
    fn remove_batch_preserves_input_order() {
        let mut cache = VecCache {
            data: Vec::new(),
            capacity: 4,
        };
        cache.insert(1, "one".into());
        cache.insert(2, "two".into());
        cache.insert(3, "three".into());

        let removed = cache.remove_batch(&[1, 99, 3]);
        assert_eq!(
            removed,
            vec![Some("one".to_string()), None, Some("three".to_string())]
        );
        assert_eq!(cache.len(), 1);
    }
}
