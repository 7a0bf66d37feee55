use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Operational state reported alongside a sensor sample.
///
/// Matching against the raw CSV value is exact and case-sensitive, so
/// unrecognized states round-trip unchanged instead of collapsing to a
/// catch-all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MachineStatus {
    Normal,
    Broken,
    Recovering,
    Other(String),
}

impl MachineStatus {
    #[must_use]
    pub fn is_broken(&self) -> bool {
        matches!(self, Self::Broken)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Normal => "NORMAL",
            Self::Broken => "BROKEN",
            Self::Recovering => "RECOVERING",
            Self::Other(raw) => raw,
        }
    }
}

impl From<&str> for MachineStatus {
    fn from(raw: &str) -> Self {
        match raw {
            "NORMAL" => Self::Normal,
            "BROKEN" => Self::Broken,
            "RECOVERING" => Self::Recovering,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for MachineStatus {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl From<MachineStatus> for String {
    fn from(status: MachineStatus) -> Self {
        status.as_str().to_owned()
    }
}

/// One normalized sensor sample, ordered by timestamp after ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub timestamp: DateTime<Utc>,
    pub pressure: f64,
    pub status: MachineStatus,
}

impl SensorReading {
    #[must_use]
    pub fn new(timestamp: DateTime<Utc>, pressure: f64, status: MachineStatus) -> Self {
        Self {
            timestamp,
            pressure,
            status,
        }
    }
}

/// Whole-series summary statistics over the pressure values.
///
/// `std_dev` is the population standard deviation (divide by N); the
/// dashboard reports display statistics, not sampling inference.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SeriesStatistics {
    pub mean: f64,
    pub max: f64,
    pub min: f64,
    pub std_dev: f64,
}

/// One rolling-statistic sample, index-aligned with the source series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollingPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

impl RollingPoint {
    #[must_use]
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Display metrics for the dashboard header, rounded to two decimals.
///
/// Recomputed wholesale on every data load, never patched incrementally.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub average_pressure: f64,
    pub max_pressure: f64,
    pub min_pressure: f64,
    pub anomaly_count: usize,
    pub broken_state_duration: usize,
    pub anomaly_frequency: f64,
}
