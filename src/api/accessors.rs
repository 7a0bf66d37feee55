use std::ops::Range;

use chrono::{DateTime, Local, TimeZone, Utc};

use crate::core::series::{ChartData, DistributionBucket, day_tick_labels, pressure_distribution};
use crate::core::stats::SeriesAnalysis;
use crate::core::types::{Metrics, SensorReading};
use crate::core::viewport::ViewMode;

use super::Dashboard;

impl Dashboard {
    #[must_use]
    pub fn readings(&self) -> &[SensorReading] {
        &self.readings
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    #[must_use]
    pub fn metrics(&self) -> Metrics {
        self.analysis.metrics
    }

    #[must_use]
    pub fn analysis(&self) -> &SeriesAnalysis {
        &self.analysis
    }

    #[must_use]
    pub fn chart_data(&self) -> &ChartData {
        &self.chart
    }

    /// First and last timestamp of the loaded series.
    #[must_use]
    pub fn time_range(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let first = self.readings.first()?.timestamp;
        let last = self.readings.last()?.timestamp;
        Some((first, last))
    }

    /// Bucketed pressure histogram over the loaded series.
    #[must_use]
    pub fn distribution(&self, bucket_count: usize) -> Vec<DistributionBucket> {
        pressure_distribution(&self.readings, bucket_count)
    }

    // Viewport passthroughs. Gesture events from the chart layer call these
    // directly; each one is atomic with respect to a single user action.

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    pub fn pan_left(&mut self) {
        self.viewport.pan_left();
    }

    pub fn pan_right(&mut self) {
        self.viewport.pan_right();
    }

    pub fn reset_zoom(&mut self) {
        self.viewport.reset();
    }

    #[must_use]
    pub fn view_mode(&self) -> ViewMode {
        self.viewport.mode()
    }

    /// Currently visible index range, snapping near-full windows to full.
    pub fn visible_window(&mut self) -> Range<usize> {
        self.viewport.visible_window()
    }

    /// Readings inside the currently visible window.
    pub fn visible_slice(&mut self) -> &[SensorReading] {
        let window = self.viewport.visible_window();
        &self.readings[window]
    }

    /// Day tick labels for the currently visible window, in the system's
    /// local zone. Zoomed renders use these instead of
    /// `ChartData::day_labels`, which always spans the full series.
    pub fn visible_day_labels(&mut self) -> Vec<String> {
        self.visible_day_labels_in(&Local)
    }

    /// Day tick labels for the currently visible window in an explicit zone.
    pub fn visible_day_labels_in<Tz: TimeZone>(&mut self, tz: &Tz) -> Vec<String> {
        let window = self.viewport.visible_window();
        day_tick_labels(&self.readings[window], tz)
    }
}
