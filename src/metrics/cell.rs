use std::cell::Cell;

/// A metrics-only counter cell.
///
/// Lets `&self` read paths count themselves without interior locking.
///
/// # Safety
/// This type is only safe if all accesses are externally synchronized. In
/// this crate the cache that owns it is either single-threaded or guarded by
/// the concurrent wrapper's lock.
#[repr(transparent)]
#[derive(Debug, Default)]
pub struct MetricsCell(Cell<u64>);

impl MetricsCell {
    #[inline]
    pub fn new() -> Self {
        Self(Cell::new(0))
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.0.get()
    }

    #[inline]
    pub fn incr(&self) {
        self.0.set(self.0.get() + 1);
    }
}

// SAFETY:
// All access to MetricsCell is externally synchronized by the owning cache's
// lock. Metrics are observational and do not affect correctness.
unsafe impl Sync for MetricsCell {}
unsafe impl Send for MetricsCell {}
