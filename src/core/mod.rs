pub mod ingest;
pub mod primitives;
pub mod series;
pub mod stats;
pub mod types;
pub mod viewport;

pub use ingest::{IngestConfig, parse_readings};
pub use series::{AnomalyRegion, ChartData, DistributionBucket};
pub use stats::{SeriesAnalysis, StatsConfig, compute_statistics};
pub use types::{MachineStatus, Metrics, RollingPoint, SensorReading, SeriesStatistics};
pub use viewport::{ViewMode, ViewportController};
