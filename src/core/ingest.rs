use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::types::{MachineStatus, SensorReading};
use crate::error::{DashError, DashResult};

/// Column-mapping controls for CSV ingestion.
///
/// Explicit configuration rather than module constants so alternate data
/// sets (different sensor prefix, renamed status column) stay testable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Header prefix identifying candidate sensor columns; the first match
    /// in header order is used for the whole document.
    pub sensor_prefix: String,
    pub timestamp_column: String,
    pub status_column: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            sensor_prefix: "sensor_".to_owned(),
            timestamp_column: "timestamp".to_owned(),
            status_column: "machine_status".to_owned(),
        }
    }
}

impl IngestConfig {
    pub fn validate(&self) -> DashResult<()> {
        if self.sensor_prefix.is_empty() {
            return Err(DashError::InvalidData(
                "ingest sensor prefix must be non-empty".to_owned(),
            ));
        }
        if self.timestamp_column.is_empty() || self.status_column.is_empty() {
            return Err(DashError::InvalidData(
                "ingest column names must be non-empty".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Parses delimited text with a header row into ordered sensor readings.
///
/// Row-level problems (missing timestamp, non-numeric sensor value) drop
/// the row silently. Document-level problems (no header, no sensor column,
/// zero surviving rows) surface as a single `DashError::Ingestion`.
///
/// Output is sorted by timestamp ascending; ties keep input order.
pub fn parse_readings(text: &str, config: &IngestConfig) -> DashResult<Vec<SensorReading>> {
    config.validate()?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|err| DashError::Ingestion(format!("unreadable header row: {err}")))?
        .clone();

    let sensor_col = headers
        .iter()
        .position(|name| name.starts_with(&config.sensor_prefix))
        .ok_or_else(|| {
            DashError::Ingestion(format!(
                "no '{}*' column in header",
                config.sensor_prefix
            ))
        })?;
    let timestamp_col = headers
        .iter()
        .position(|name| name == config.timestamp_column)
        .ok_or_else(|| {
            DashError::Ingestion(format!("no '{}' column in header", config.timestamp_column))
        })?;
    let status_col = headers.iter().position(|name| name == config.status_column);

    let mut readings = Vec::new();
    let mut skipped = 0usize;

    for record in reader.records() {
        let Ok(record) = record else {
            skipped += 1;
            continue;
        };

        let Some(timestamp) = record.get(timestamp_col).and_then(parse_timestamp) else {
            skipped += 1;
            continue;
        };
        // `f64::from_str` accepts the literal "NaN", which would poison the
        // global mean and suppress anomaly detection downstream; drop the
        // row like any other non-numeric cell. Infinities stay.
        let Some(pressure) = record
            .get(sensor_col)
            .filter(|raw| !raw.is_empty())
            .and_then(|raw| raw.parse::<f64>().ok())
            .filter(|value| !value.is_nan())
        else {
            skipped += 1;
            continue;
        };

        let status = status_col
            .and_then(|col| record.get(col))
            .filter(|raw| !raw.is_empty())
            .map_or(MachineStatus::Normal, MachineStatus::from);

        readings.push(SensorReading::new(timestamp, pressure, status));
    }

    if readings.is_empty() {
        return Err(DashError::Ingestion("no valid data points".to_owned()));
    }

    // Stable sort keeps original row order for equal timestamps.
    readings.sort_by_key(|reading| reading.timestamp);

    debug!(
        count = readings.len(),
        skipped,
        sensor_column = headers.get(sensor_col),
        "parsed sensor readings"
    );

    Ok(readings)
}

/// Parses a timestamp cell: RFC 3339 first, then common plain formats.
/// Naive values are interpreted as UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(parsed.and_utc());
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%m/%d/%Y %H:%M") {
        return Some(parsed.and_utc());
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(parsed.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_accepts_rfc3339_and_naive_forms() {
        assert!(parse_timestamp("2018-04-01T00:05:00Z").is_some());
        assert!(parse_timestamp("2018-04-01 00:05:00").is_some());
        assert!(parse_timestamp("4/1/2018 00:05").is_some());
        assert!(parse_timestamp("2018-04-01").is_some());
        assert!(parse_timestamp("not a date").is_none());
        assert!(parse_timestamp("").is_none());
    }
}
