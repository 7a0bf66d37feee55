use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::primitives::{percentage_of, round2};
use crate::core::types::{Metrics, RollingPoint, SensorReading, SeriesStatistics};
use crate::error::{DashError, DashResult};

/// Tuning controls for statistics and anomaly detection.
///
/// The defaults reproduce the dashboard's historical behavior; they are
/// fields rather than constants because neither value has a documented
/// derivation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatsConfig {
    /// |z| above this flags a point as anomalous (strictly greater-than).
    pub z_score_threshold: f64,
    /// Lower bound on the rolling window size.
    pub min_window: usize,
    /// Window size scales as `len / window_divisor` above the minimum.
    pub window_divisor: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            z_score_threshold: 2.5,
            min_window: 20,
            window_divisor: 50,
        }
    }
}

impl StatsConfig {
    pub fn validate(&self) -> DashResult<()> {
        if !self.z_score_threshold.is_finite() || self.z_score_threshold <= 0.0 {
            return Err(DashError::InvalidData(
                "z-score threshold must be finite and > 0".to_owned(),
            ));
        }
        if self.min_window == 0 || self.window_divisor == 0 {
            return Err(DashError::InvalidData(
                "window controls must be >= 1".to_owned(),
            ));
        }
        Ok(())
    }

    /// Trailing window size for a series of `len` points.
    #[must_use]
    pub fn window_size(&self, len: usize) -> usize {
        self.min_window.max(len / self.window_divisor)
    }
}

/// Everything derived from one pass over an ordered series.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SeriesAnalysis {
    pub statistics: SeriesStatistics,
    /// Rolling mean, index-aligned with the source series.
    pub rolling_mean: Vec<RollingPoint>,
    /// Rolling population std, index-aligned with the source series.
    pub rolling_std: Vec<RollingPoint>,
    /// Indices whose global z-score exceeds the configured threshold.
    pub anomalies: Vec<usize>,
    /// Indices reporting `BROKEN` machine status.
    pub broken: Vec<usize>,
    pub metrics: Metrics,
}

/// Computes global statistics, rolling statistics, anomaly and broken-state
/// index sets, and display metrics for an ordered series.
///
/// Pure over its inputs: identical series and config yield bit-identical
/// post-rounding output. An empty series produces zeroed metrics and empty
/// collections rather than an error. A constant series (zero standard
/// deviation) defines every z-score as 0, so no anomalies are flagged.
pub fn compute_statistics(
    series: &[SensorReading],
    config: &StatsConfig,
) -> DashResult<SeriesAnalysis> {
    config.validate()?;

    if series.is_empty() {
        return Ok(SeriesAnalysis::default());
    }

    let n = series.len();
    let values: Vec<f64> = series.iter().map(|r| r.pressure).collect();

    let mut sum = 0.0;
    let mut sum_sq = 0.0;
    for value in &values {
        sum += value;
        sum_sq += value * value;
    }
    let mean = sum / n as f64;
    let variance = (sum_sq / n as f64 - mean * mean).max(0.0);
    let std_dev = variance.sqrt();

    let max = values
        .iter()
        .copied()
        .map(OrderedFloat)
        .max()
        .map_or(0.0, |v| v.0);
    let min = values
        .iter()
        .copied()
        .map(OrderedFloat)
        .min()
        .map_or(0.0, |v| v.0);

    let statistics = SeriesStatistics {
        mean,
        max,
        min,
        std_dev,
    };

    let broken: Vec<usize> = series
        .iter()
        .enumerate()
        .filter(|(_, reading)| reading.status.is_broken())
        .map(|(idx, _)| idx)
        .collect();

    // Z-scores use the global statistics, not the rolling window. A flat
    // series defines every z-score as 0 instead of dividing by zero.
    let anomalies: Vec<usize> = if std_dev == 0.0 {
        Vec::new()
    } else {
        values
            .iter()
            .enumerate()
            .filter(|(_, value)| ((*value - mean) / std_dev).abs() > config.z_score_threshold)
            .map(|(idx, _)| idx)
            .collect()
    };

    let (rolling_mean, rolling_std) = rolling_statistics(series, &values, config.window_size(n));

    let metrics = Metrics {
        average_pressure: round2(mean),
        max_pressure: round2(max),
        min_pressure: round2(min),
        anomaly_count: anomalies.len(),
        broken_state_duration: broken.len(),
        anomaly_frequency: percentage_of(anomalies.len(), n),
    };

    debug!(
        count = n,
        anomalies = anomalies.len(),
        broken = broken.len(),
        window = config.window_size(n),
        "computed series statistics"
    );

    Ok(SeriesAnalysis {
        statistics,
        rolling_mean,
        rolling_std,
        anomalies,
        broken,
        metrics,
    })
}

/// Trailing expanding-then-fixed rolling mean/std.
///
/// At index `i` the window spans `[max(0, i - window), i]` inclusive, so it
/// grows from one point until it holds `window + 1` points, then slides.
/// Incremental sum / sum-of-squares keeps this O(N); values are rounded to
/// two decimals before storage, matching the display contract.
fn rolling_statistics(
    series: &[SensorReading],
    values: &[f64],
    window: usize,
) -> (Vec<RollingPoint>, Vec<RollingPoint>) {
    let mut rolling_mean = Vec::with_capacity(values.len());
    let mut rolling_std = Vec::with_capacity(values.len());

    let mut sum = 0.0;
    let mut sum_sq = 0.0;

    for (i, value) in values.iter().enumerate() {
        sum += value;
        sum_sq += value * value;

        if i > window {
            let evicted = values[i - window - 1];
            sum -= evicted;
            sum_sq -= evicted * evicted;
        }

        let len = (i + 1).min(window + 1) as f64;
        let mean = sum / len;
        let variance = (sum_sq / len - mean * mean).max(0.0);

        let timestamp = series[i].timestamp;
        rolling_mean.push(RollingPoint::new(timestamp, round2(mean)));
        rolling_std.push(RollingPoint::new(timestamp, round2(variance.sqrt())));
    }

    (rolling_mean, rolling_std)
}
