use chrono::{Datelike, Local, NaiveDate, TimeZone};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{percentage_of, round2};
use crate::core::stats::SeriesAnalysis;
use crate::core::types::SensorReading;

/// Inclusive index span of one maximal contiguous run of anomalous points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnomalyRegion {
    pub start: usize,
    pub end: usize,
}

/// One bucket of the pressure distribution histogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionBucket {
    pub range: String,
    pub count: usize,
    pub percentage: f64,
}

/// Chart-ready series derived from the raw readings and their analysis.
///
/// All per-point vectors are index-aligned with the source series. Overlay
/// series use `None` as the gap sentinel so the charting layer renders an
/// absent point, never a zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartData {
    pub pressure: Vec<f64>,
    pub rolling_mean: Vec<f64>,
    /// Rolling mean + 2 rolling std.
    pub upper_band: Vec<f64>,
    /// Rolling mean - 2 rolling std.
    pub lower_band: Vec<f64>,
    /// Pressure at anomalous indices, gap elsewhere.
    pub anomaly_overlay: Vec<Option<f64>>,
    /// Pressure at BROKEN-status indices, gap elsewhere.
    pub broken_overlay: Vec<Option<f64>>,
    pub anomaly_regions: Vec<AnomalyRegion>,
    /// One label per first-seen calendar day, chronological order.
    pub day_labels: Vec<String>,
}

/// Builds chart series with day labels grouped in the system's local zone.
#[must_use]
pub fn build_chart_data(series: &[SensorReading], analysis: &SeriesAnalysis) -> ChartData {
    build_chart_data_in(series, analysis, &Local)
}

/// Builds chart series with day labels grouped in an explicit time zone.
///
/// Pure over its inputs; re-derives everything from `(series, analysis)`
/// so callers never need to cache through back-references.
#[must_use]
pub fn build_chart_data_in<Tz: TimeZone>(
    series: &[SensorReading],
    analysis: &SeriesAnalysis,
    tz: &Tz,
) -> ChartData {
    let pressure: Vec<f64> = series.iter().map(|r| r.pressure).collect();

    let rolling_mean: Vec<f64> = analysis.rolling_mean.iter().map(|p| p.value).collect();
    let upper_band: Vec<f64> = analysis
        .rolling_mean
        .iter()
        .zip(&analysis.rolling_std)
        .map(|(mean, std)| mean.value + 2.0 * std.value)
        .collect();
    let lower_band: Vec<f64> = analysis
        .rolling_mean
        .iter()
        .zip(&analysis.rolling_std)
        .map(|(mean, std)| mean.value - 2.0 * std.value)
        .collect();

    let anomaly_overlay = overlay(&pressure, &analysis.anomalies);
    let broken_overlay = overlay(&pressure, &analysis.broken);

    ChartData {
        pressure,
        rolling_mean,
        upper_band,
        lower_band,
        anomaly_overlay,
        broken_overlay,
        anomaly_regions: anomaly_regions(&analysis.anomalies),
        day_labels: day_tick_labels(series, tz),
    }
}

fn overlay(pressure: &[f64], indices: &[usize]) -> Vec<Option<f64>> {
    let mut out = vec![None; pressure.len()];
    for &idx in indices {
        if let Some(slot) = out.get_mut(idx) {
            *slot = Some(pressure[idx]);
        }
    }
    out
}

/// Groups sorted anomaly indices into inclusive start/end region pairs.
///
/// A region boundary occurs on every false-to-true transition (start) and
/// true-to-false transition (end, inclusive of the last true index).
#[must_use]
pub fn anomaly_regions(anomalies: &[usize]) -> Vec<AnomalyRegion> {
    let mut regions = Vec::new();
    let mut run: Option<AnomalyRegion> = None;

    for &idx in anomalies {
        match run.as_mut() {
            Some(region) if idx == region.end + 1 => region.end = idx,
            _ => {
                if let Some(done) = run.take() {
                    regions.push(done);
                }
                run = Some(AnomalyRegion {
                    start: idx,
                    end: idx,
                });
            }
        }
    }
    if let Some(done) = run {
        regions.push(done);
    }

    regions
}

/// One `M/D/YY` label per first-seen calendar day, in chronological order.
///
/// The series is already time-sorted, so first-seen order is chronological;
/// the `IndexMap` keeps it without re-sorting.
#[must_use]
pub fn day_tick_labels<Tz: TimeZone>(series: &[SensorReading], tz: &Tz) -> Vec<String> {
    let mut days: IndexMap<NaiveDate, String> = IndexMap::new();
    for reading in series {
        let date = reading.timestamp.with_timezone(tz).date_naive();
        days.entry(date)
            .or_insert_with(|| format!("{}/{}/{:02}", date.month(), date.day(), date.year() % 100));
    }
    days.into_values().collect()
}

/// Equal-width pressure histogram between the series min and max.
///
/// Values on a bucket boundary fall into the higher bucket, except the
/// maximum which lands in the last one. A constant series yields a single
/// bucket holding every point.
#[must_use]
pub fn pressure_distribution(
    series: &[SensorReading],
    bucket_count: usize,
) -> Vec<DistributionBucket> {
    if series.is_empty() || bucket_count == 0 {
        return Vec::new();
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for reading in series {
        min = min.min(reading.pressure);
        max = max.max(reading.pressure);
    }

    let span = max - min;
    let buckets = if span == 0.0 { 1 } else { bucket_count };
    let width = if span == 0.0 { 1.0 } else { span / buckets as f64 };

    let mut counts = vec![0usize; buckets];
    for reading in series {
        let slot = (((reading.pressure - min) / width) as usize).min(buckets - 1);
        counts[slot] += 1;
    }

    counts
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            let lo = min + width * i as f64;
            let hi = min + width * (i + 1) as f64;
            DistributionBucket {
                range: format!("{}-{}", round2(lo), round2(hi)),
                count,
                percentage: percentage_of(count, series.len()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_group_contiguous_runs() {
        assert_eq!(anomaly_regions(&[]), vec![]);
        assert_eq!(
            anomaly_regions(&[3]),
            vec![AnomalyRegion { start: 3, end: 3 }]
        );
        assert_eq!(
            anomaly_regions(&[1, 2, 3, 7, 9, 10]),
            vec![
                AnomalyRegion { start: 1, end: 3 },
                AnomalyRegion { start: 7, end: 7 },
                AnomalyRegion { start: 9, end: 10 },
            ]
        );
    }
}
