//! pumpdash-rs: statistics and anomaly-detection core for sensor dashboards.
//!
//! This crate provides the computation layer behind a pump pressure
//! monitoring UI: CSV ingestion, global and rolling statistics, z-score
//! anomaly flagging, chart-ready derived series, and a deterministic
//! zoom/pan viewport over the resulting time series.

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{Dashboard, DashboardConfig};
pub use error::{DashError, DashResult};
