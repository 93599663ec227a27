//! # Least Recently Used (LRU) cache
//!
//! Bounded key-value store that evicts the least recently used entry when a
//! new key arrives at capacity. A successful read counts as a use.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────┐
//!   │                        LruCache<K, V>                        │
//!   │                                                              │
//!   │   ┌──────────────────────────────────────────────────────┐   │
//!   │   │  FxHashMap<K, SlotId>  (index into the list arena)   │   │
//!   │   │                                                      │   │
//!   │   │   key_1 ──┐      key_2 ──┐      key_3 ──┐            │   │
//!   │   └───────────┼──────────────┼──────────────┼────────────┘   │
//!   │               ▼              ▼              ▼                │
//!   │   ┌──────────────────────────────────────────────────────┐   │
//!   │   │  RecencyList<Entry<K, V>>  (arena-backed links)      │   │
//!   │   │                                                      │   │
//!   │   │  head ──► [k1, v1] ◄──► [k2, v2] ◄──► [k3, v3] ◄── tail │
//!   │   │           (MRU)                        (LRU)         │   │
//!   │   └──────────────────────────────────────────────────────┘   │
//!   └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Entries own their key and value inside the list node; the index maps a
//! cloned key to the node's [`SlotId`]. Index-based addressing keeps the
//! whole structure in safe Rust: there are no raw pointers and no ownership
//! cycles to break.
//!
//! ## Operations
//!
//! | Method                      | Complexity | Recency effect           |
//! |-----------------------------|------------|--------------------------|
//! | `new(capacity)`             | O(1)       | -                        |
//! | `insert(k, v)`              | O(1)*      | entry becomes MRU        |
//! | `get(&k)`                   | O(1)       | entry becomes MRU        |
//! | `peek(&k)`                  | O(1)       | none                     |
//! | `contains(&k)`              | O(1)       | none                     |
//! | `remove(&k)`                | O(1)       | others keep their order  |
//! | `pop_lru()` / `peek_lru()`  | O(1)       | none                     |
//! | `touch(&k)`                 | O(1)       | entry becomes MRU        |
//! | `recency_rank(&k)`          | O(n)       | none                     |
//!
//! \* amortized; an insert at capacity first unlinks the tail.
//!
//! ## Eviction notification
//!
//! An optional [`EvictionListener`] fires synchronously right before an entry
//! is unlinked due to capacity pressure. Explicit `remove`, `pop_lru`, and
//! `clear` do not notify: the caller initiated those.
//!
//! ## Thread safety
//!
//! - [`LruCache`]: **not** thread-safe; single-threaded core.
//! - [`ConcurrentLruCache`] (feature `concurrency`): one coarse-grained
//!   `parking_lot::Mutex` held for the duration of each call. Even `peek`
//!   must serialize: reads share no lock because `get` reorders and the
//!   metrics cells are not atomic. Values are handed out as `Arc<V>` clones
//!   so callers never borrow across the lock.

use std::fmt;
use std::hash::Hash;
use std::mem;

use rustc_hash::FxHashMap;

use crate::ds::recency_list::RecencyList;
use crate::ds::slot_arena::SlotId;
use crate::error::{InvalidCapacity, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::recorder::{
    CoreMetricsRecorder, LruMetrics, LruMetricsReadRecorder, LruMetricsRecorder,
    MetricsSnapshotProvider,
};
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LruMetricsSnapshot;
use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

/// Hook invoked right before an entry is evicted under capacity pressure.
///
/// Receives the victim's key and value by reference; the entry is still
/// intact when the hook runs. `Send` so the owning cache can cross threads.
pub type EvictionListener<K, V> = Box<dyn FnMut(&K, &V) + Send>;

/// One cached entry, owned by its recency-list node.
#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Bounded LRU cache: hash index plus arena-backed recency list.
///
/// Keys are cloned once per insert (one copy lives in the index, one in the
/// entry). All operations are total: a missing key is a normal `None`/`false`
/// outcome, never an error. The only fallible call is [`new`](LruCache::new).
///
/// # Example
///
/// ```
/// use lrukit::policy::lru::LruCache;
/// use lrukit::traits::CoreCache;
///
/// let mut cache: LruCache<u32, String> = LruCache::new(2).unwrap();
/// cache.insert(1, "A".to_string());
/// cache.insert(2, "B".to_string());
///
/// // Reading key 1 refreshes it, so inserting key 3 evicts key 2.
/// assert_eq!(cache.get(&1), Some(&"A".to_string()));
/// cache.insert(3, "C".to_string());
/// assert!(!cache.contains(&2));
/// assert_eq!(cache.len(), 2);
/// ```
pub struct LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    index: FxHashMap<K, SlotId>,
    order: RecencyList<Entry<K, V>>,
    capacity: usize,
    on_evict: Option<EvictionListener<K, V>>,
    #[cfg(feature = "metrics")]
    metrics: LruMetrics,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache that holds at most `capacity` entries.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCapacity`] when `capacity` is zero; no partial cache
    /// is created.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    ///
    /// let cache: LruCache<u64, String> = LruCache::new(100).unwrap();
    /// assert!(LruCache::<u64, String>::new(0).is_err());
    /// ```
    pub fn new(capacity: usize) -> Result<Self, InvalidCapacity> {
        Self::with_options(capacity, true, None)
    }

    /// Shared constructor behind [`new`](LruCache::new) and the builder.
    pub(crate) fn with_options(
        capacity: usize,
        prealloc: bool,
        on_evict: Option<EvictionListener<K, V>>,
    ) -> Result<Self, InvalidCapacity> {
        if capacity == 0 {
            return Err(InvalidCapacity::new(capacity));
        }
        let (index, order) = if prealloc {
            (
                FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
                RecencyList::with_capacity(capacity),
            )
        } else {
            (FxHashMap::default(), RecencyList::new())
        };
        Ok(Self {
            index,
            order,
            capacity,
            on_evict,
            #[cfg(feature = "metrics")]
            metrics: LruMetrics::default(),
        })
    }

    /// Installs an eviction listener, replacing any previous one.
    ///
    /// The listener fires only for capacity-pressure evictions, not for
    /// explicit `remove`, `pop_lru`, or `clear`.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    /// use lrukit::traits::CoreCache;
    /// use std::sync::mpsc;
    ///
    /// let (tx, rx) = mpsc::channel();
    /// let mut cache = LruCache::new(1).unwrap();
    /// cache.set_eviction_listener(Box::new(move |key: &u32, _value: &&str| {
    ///     tx.send(*key).unwrap();
    /// }));
    ///
    /// cache.insert(1, "a");
    /// cache.insert(2, "b"); // evicts key 1
    /// assert_eq!(rx.try_recv(), Ok(1));
    /// ```
    pub fn set_eviction_listener(&mut self, listener: EvictionListener<K, V>) {
        self.on_evict = Some(listener);
    }

    /// Returns the value for `key` without refreshing its recency.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    /// use lrukit::traits::CoreCache;
    ///
    /// let mut cache = LruCache::new(2).unwrap();
    /// cache.insert(1, "first");
    /// cache.insert(2, "second");
    ///
    /// // Peek leaves key 1 as the eviction victim.
    /// assert_eq!(cache.peek(&1), Some(&"first"));
    /// cache.insert(3, "third");
    /// assert!(!cache.contains(&1));
    /// ```
    pub fn peek(&self, key: &K) -> Option<&V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_peek_call();

        let entry = self
            .index
            .get(key)
            .and_then(|&id| self.order.get(id))
            .map(|entry| &entry.value);
        #[cfg(feature = "metrics")]
        {
            if entry.is_some() {
                self.metrics.record_peek_found();
            }
        }
        entry
    }

    /// Iterates over entries from most to least recently used.
    ///
    /// Iteration does not count as a use.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.order.iter().map(|entry| (&entry.key, &entry.value))
    }

    /// Verifies index/list consistency and returns the first violation.
    ///
    /// Checks the list's link structure, the bijection between index keys and
    /// list nodes, and the capacity bound. Intended for tests and fuzz
    /// harnesses; normal operation can never make this fail.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.order.check_invariants()?;

        if self.index.len() != self.order.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys but list holds {} nodes",
                self.index.len(),
                self.order.len()
            )));
        }
        if self.order.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "{} entries exceed capacity {}",
                self.order.len(),
                self.capacity
            )));
        }
        for (id, entry) in self.order.iter_entries() {
            match self.index.get(&entry.key) {
                Some(&mapped) if mapped == id => {},
                Some(_) => {
                    return Err(InvariantError::new(
                        "index maps a listed key to a different node",
                    ));
                },
                None => return Err(InvariantError::new("listed key missing from index")),
            }
        }
        Ok(())
    }

    /// Unlinks the tail entry, notifying the listener first.
    fn evict_lru(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_evict_call();

        let victim = match self.order.back_id() {
            Some(id) => id,
            None => return,
        };
        if let Some(listener) = self.on_evict.as_mut() {
            if let Some(entry) = self.order.get(victim) {
                listener(&entry.key, &entry.value);
            }
        }
        if let Some(entry) = self.order.remove(victim) {
            self.index.remove(&entry.key);
            #[cfg(feature = "metrics")]
            self.metrics.record_evicted_entry();
        }
    }
}

impl<K, V> CoreCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(&id) = self.index.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();

            let previous = self
                .order
                .get_mut(id)
                .map(|entry| mem::replace(&mut entry.value, value));
            self.order.move_to_front(id);
            return previous;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        // Eviction and insertion are one step from the caller's perspective;
        // no intermediate state escapes this call.
        if self.index.len() == self.capacity {
            self.evict_lru();
        }
        let id = self.order.push_front(Entry {
            key: key.clone(),
            value,
        });
        self.index.insert(key, id);
        None
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        let id = match self.index.get(key) {
            Some(&id) => id,
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_miss();
                return None;
            },
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.order.move_to_front(id);
        self.order.get(id).map(|entry| &entry.value)
    }

    fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    fn len(&self) -> usize {
        self.index.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        self.order.clear();
        self.index.clear();
    }
}

impl<K, V> MutableCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.index.remove(key)?;
        self.order.remove(id).map(|entry| entry.value)
    }
}

impl<K, V> LruCacheTrait<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn pop_lru(&mut self) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_call();

        let id = self.order.back_id()?;
        let entry = self.order.remove(id)?;
        self.index.remove(&entry.key);

        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_found();

        Some((entry.key, entry.value))
    }

    fn peek_lru(&self) -> Option<(&K, &V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_peek_lru_call();

        let entry = self.order.back().map(|entry| (&entry.key, &entry.value));
        #[cfg(feature = "metrics")]
        {
            if entry.is_some() {
                self.metrics.record_peek_lru_found();
            }
        }
        entry
    }

    fn touch(&mut self, key: &K) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_touch_call();

        match self.index.get(key) {
            Some(&id) => {
                self.order.move_to_front(id);
                #[cfg(feature = "metrics")]
                self.metrics.record_touch_found();
                true
            },
            None => false,
        }
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        #[cfg(feature = "metrics")]
        self.metrics.record_recency_rank_call();

        if !self.index.contains_key(key) {
            return None;
        }
        let rank = self.order.iter().position(|entry| entry.key == *key);
        #[cfg(feature = "metrics")]
        {
            if rank.is_some() {
                self.metrics.record_recency_rank_found();
            }
        }
        rank
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Captures the current metrics counters plus len/capacity gauges.
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        self.metrics.snapshot(self.len(), self.capacity)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<LruMetricsSnapshot> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V> fmt::Debug for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}

impl<K, V> Extend<(K, V)> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

// ---------------------------------------------------------------------------
// ConcurrentLruCache
// ---------------------------------------------------------------------------

#[cfg(feature = "concurrency")]
mod concurrent {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;

    /// Thread-safe LRU cache behind one coarse-grained `Mutex`.
    ///
    /// Every operation acquires the same lock for its whole duration; no
    /// operation blocks indefinitely and none holds the lock across user
    /// code except the eviction listener. Values are stored as `Arc<V>` so
    /// lookups return owned handles that outlive the lock and survive
    /// eviction.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::ConcurrentLruCache;
    ///
    /// let cache: ConcurrentLruCache<u32, String> = ConcurrentLruCache::new(100).unwrap();
    /// cache.insert(1, "value".to_string());
    ///
    /// let value = cache.get(&1).unwrap();
    /// assert_eq!(*value, "value");
    /// ```
    pub struct ConcurrentLruCache<K, V>
    where
        K: Eq + Hash + Clone,
    {
        inner: Arc<Mutex<LruCache<K, Arc<V>>>>,
    }

    impl<K, V> Clone for ConcurrentLruCache<K, V>
    where
        K: Eq + Hash + Clone,
    {
        fn clone(&self) -> Self {
            Self {
                inner: Arc::clone(&self.inner),
            }
        }
    }

    impl<K, V> fmt::Debug for ConcurrentLruCache<K, V>
    where
        K: Eq + Hash + Clone,
    {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let cache = self.inner.lock();
            f.debug_struct("ConcurrentLruCache")
                .field("len", &cache.len())
                .field("capacity", &cache.capacity())
                .finish_non_exhaustive()
        }
    }

    impl<K, V> ConcurrentLruCache<K, V>
    where
        K: Eq + Hash + Clone,
    {
        /// Creates a thread-safe cache holding at most `capacity` entries.
        ///
        /// # Errors
        ///
        /// Returns [`InvalidCapacity`] when `capacity` is zero.
        pub fn new(capacity: usize) -> Result<Self, InvalidCapacity> {
            Ok(Self {
                inner: Arc::new(Mutex::new(LruCache::new(capacity)?)),
            })
        }

        /// Installs an eviction listener on the underlying cache.
        ///
        /// The listener runs while the lock is held; keep it short.
        pub fn set_eviction_listener(&self, listener: EvictionListener<K, Arc<V>>) {
            self.inner.lock().set_eviction_listener(listener);
        }

        /// Inserts a value, wrapping it in `Arc` internally.
        ///
        /// Returns the previous `Arc<V>` if the key existed.
        pub fn insert(&self, key: K, value: V) -> Option<Arc<V>> {
            let value = Arc::new(value);
            self.inner.lock().insert(key, value)
        }

        /// Inserts a pre-wrapped `Arc<V>` without re-wrapping.
        ///
        /// # Example
        ///
        /// ```
        /// use lrukit::policy::lru::ConcurrentLruCache;
        /// use std::sync::Arc;
        ///
        /// let cache: ConcurrentLruCache<u32, String> = ConcurrentLruCache::new(10).unwrap();
        /// let shared = Arc::new("shared".to_string());
        /// cache.insert_arc(1, Arc::clone(&shared));
        ///
        /// let got = cache.get(&1).unwrap();
        /// assert!(Arc::ptr_eq(&shared, &got));
        /// ```
        pub fn insert_arc(&self, key: K, value: Arc<V>) -> Option<Arc<V>> {
            self.inner.lock().insert(key, value)
        }

        /// Returns the value for `key`, refreshing its recency.
        pub fn get(&self, key: &K) -> Option<Arc<V>> {
            self.inner.lock().get(key).map(Arc::clone)
        }

        /// Returns the value for `key` without refreshing recency.
        pub fn peek(&self, key: &K) -> Option<Arc<V>> {
            self.inner.lock().peek(key).map(Arc::clone)
        }

        /// Removes `key` and returns its value if it existed.
        pub fn remove(&self, key: &K) -> Option<Arc<V>> {
            self.inner.lock().remove(key)
        }

        /// Marks `key` as most recently used; returns `true` if present.
        pub fn touch(&self, key: &K) -> bool {
            self.inner.lock().touch(key)
        }

        /// Removes and returns the least recently used entry.
        pub fn pop_lru(&self) -> Option<(K, Arc<V>)> {
            self.inner.lock().pop_lru()
        }

        /// Returns the least recently used entry without removing it.
        pub fn peek_lru(&self) -> Option<(K, Arc<V>)> {
            let cache = self.inner.lock();
            cache.peek_lru().map(|(k, v)| (k.clone(), Arc::clone(v)))
        }

        /// Returns the current number of entries.
        pub fn len(&self) -> usize {
            self.inner.lock().len()
        }

        /// Returns `true` if the cache holds no entries.
        pub fn is_empty(&self) -> bool {
            self.inner.lock().is_empty()
        }

        /// Returns the configured capacity.
        pub fn capacity(&self) -> usize {
            self.inner.lock().capacity()
        }

        /// Checks key existence without affecting recency.
        pub fn contains(&self, key: &K) -> bool {
            self.inner.lock().contains(key)
        }

        /// Removes all entries.
        pub fn clear(&self) {
            self.inner.lock().clear();
        }
    }

    #[cfg(feature = "metrics")]
    impl<K, V> ConcurrentLruCache<K, V>
    where
        K: Eq + Hash + Clone,
    {
        /// Captures the underlying cache's metrics counters.
        pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
            self.inner.lock().metrics_snapshot()
        }
    }
}

#[cfg(feature = "concurrency")]
pub use concurrent::ConcurrentLruCache;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
