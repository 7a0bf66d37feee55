//! Read-only query surface for an embedding chat assistant.
//!
//! Each query is a pure accessor over already-computed state; none mutate
//! the session. The JSON variants exist so hosts can hand results straight
//! to tool-calling layers without re-serializing.

use serde_json::Value;

use crate::core::types::SensorReading;
use crate::error::{DashError, DashResult};

use super::Dashboard;

impl Dashboard {
    /// Up to `count` raw data points from the start of the series.
    #[must_use]
    pub fn data_points(&self, count: usize) -> &[SensorReading] {
        let limit = count.min(self.readings.len());
        &self.readings[..limit]
    }

    /// The readings flagged as anomalous, in series order.
    #[must_use]
    pub fn anomalous_readings(&self) -> Vec<SensorReading> {
        self.analysis
            .anomalies
            .iter()
            .filter_map(|&idx| self.readings.get(idx).cloned())
            .collect()
    }

    pub fn data_points_json(&self, count: usize) -> DashResult<Value> {
        to_json(&self.data_points(count))
    }

    pub fn metrics_json(&self) -> DashResult<Value> {
        to_json(&self.metrics())
    }

    pub fn anomalous_readings_json(&self) -> DashResult<Value> {
        to_json(&self.anomalous_readings())
    }

    /// Plain-text situation summary for the assistant's system context.
    #[must_use]
    pub fn context_summary(&self) -> String {
        let metrics = self.metrics();
        let range = self
            .time_range()
            .map_or_else(|| "N/A".to_owned(), |(first, last)| format!("{first} to {last}"));

        format!(
            "Pump pressure monitoring session with {count} data points ({range}). \
             Average pressure: {avg} PSI. Maximum pressure: {max} PSI. \
             Minimum pressure: {min} PSI. Anomalies detected: {anomalies} \
             ({freq}% of points). Broken state duration: {broken} time units.",
            count = self.len(),
            range = range,
            avg = metrics.average_pressure,
            max = metrics.max_pressure,
            min = metrics.min_pressure,
            anomalies = metrics.anomaly_count,
            freq = metrics.anomaly_frequency,
            broken = metrics.broken_state_duration,
        )
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> DashResult<Value> {
    serde_json::to_value(value)
        .map_err(|err| DashError::InvalidData(format!("serialization failed: {err}")))
}
