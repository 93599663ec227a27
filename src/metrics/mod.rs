//! Feature-gated cache metrics: counters, snapshots, and exporters.
//!
//! Recording, snapshotting, and export are separate seams so production
//! monitoring and bench/test instrumentation stay decoupled from policy
//! logic. Counters on `&mut self` paths are plain `u64`; read-only paths
//! (`peek`, `peek_lru`, `recency_rank`) count through [`cell::MetricsCell`].

pub mod cell;
pub mod exporter;
pub mod recorder;
pub mod snapshot;

pub use exporter::PrometheusTextExporter;
pub use recorder::LruMetrics;
pub use snapshot::LruMetricsSnapshot;
