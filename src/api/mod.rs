mod accessors;
mod assistant;
mod dashboard;
mod source;

use serde::{Deserialize, Serialize};

use crate::core::ingest::IngestConfig;
use crate::core::series::ChartData;
use crate::core::stats::{SeriesAnalysis, StatsConfig};
use crate::core::types::SensorReading;
use crate::core::viewport::ViewportController;
use crate::error::DashResult;

pub use source::{DataSource, FileSource};

#[cfg(feature = "http-source")]
pub use source::HttpSource;

/// Session bootstrap configuration.
///
/// Serializable so host applications can persist/load dashboard setup
/// without inventing their own ad-hoc format.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub ingest: IngestConfig,
    #[serde(default)]
    pub stats: StatsConfig,
}

impl DashboardConfig {
    pub fn validate(&self) -> DashResult<()> {
        self.ingest.validate()?;
        self.stats.validate()
    }
}

/// Opaque per-attempt relevance token for the stale-load guard.
///
/// Only results carrying the most recently issued token may replace
/// dashboard state; anything older is rejected, so a slow early load can
/// never overwrite a later one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadToken(u64);

/// One dashboard session: loaded series, its analysis, derived chart data,
/// and the zoom/pan viewport.
///
/// Everything except the viewport is replaced wholesale per load; nothing
/// is cached through back-references.
#[derive(Debug, Clone)]
pub struct Dashboard {
    config: DashboardConfig,
    load_generation: u64,
    readings: Vec<SensorReading>,
    analysis: SeriesAnalysis,
    chart: ChartData,
    viewport: ViewportController,
}

impl Dashboard {
    pub fn new(config: DashboardConfig) -> DashResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            load_generation: 0,
            readings: Vec::new(),
            analysis: SeriesAnalysis::default(),
            chart: ChartData::default(),
            viewport: ViewportController::new(0),
        })
    }

    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }
}
