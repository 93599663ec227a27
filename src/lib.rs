//! lrukit: bounded in-memory LRU caching primitives.
//!
//! The core type is [`policy::lru::LruCache`], a hash index over an
//! arena-backed recency list; [`policy::lru::ConcurrentLruCache`] wraps it
//! behind a coarse lock when the `concurrency` feature is enabled.

pub mod builder;
pub mod ds;
pub mod error;
pub mod policy;
pub mod prelude;
pub mod traits;

#[cfg(feature = "metrics")]
pub mod metrics;
