use tracing::{debug, warn};

use crate::core::ingest::parse_readings;
use crate::core::series::build_chart_data;
use crate::core::stats::compute_statistics;
use crate::error::{DashError, DashResult};

use super::source::DataSource;
use super::{Dashboard, LoadToken};

impl Dashboard {
    /// Fetches, ingests, and analyzes a full document from `source`.
    ///
    /// On failure the previously loaded data is left untouched, so the
    /// caller can surface the error with a retry affordance.
    pub fn load_from(&mut self, source: &dyn DataSource) -> DashResult<()> {
        let token = self.begin_load();
        debug!(source = %source.describe(), "loading sensor data");

        let text = source.fetch_text().inspect_err(|err| {
            warn!(source = %source.describe(), error = %err, "data source fetch failed");
        })?;

        self.apply_load(token, &text)
    }

    /// Starts a load attempt and invalidates every earlier one.
    ///
    /// Split from `apply_load` so hosts driving their own async fetch can
    /// take a token before awaiting the payload.
    pub fn begin_load(&mut self) -> LoadToken {
        self.load_generation += 1;
        LoadToken(self.load_generation)
    }

    /// Ingests raw CSV text and replaces the session state.
    ///
    /// Rejects results from superseded load attempts with
    /// `DashError::StaleLoad`. All computation happens before any state is
    /// touched, so a failing load leaves the prior series intact.
    pub fn apply_load(&mut self, token: LoadToken, text: &str) -> DashResult<()> {
        if token.0 != self.load_generation {
            debug!(
                token = token.0,
                current = self.load_generation,
                "discarding stale load result"
            );
            return Err(DashError::StaleLoad);
        }

        let readings = parse_readings(text, &self.config.ingest)?;
        let analysis = compute_statistics(&readings, &self.config.stats)?;
        let chart = build_chart_data(&readings, &analysis);

        debug!(
            count = readings.len(),
            anomalies = analysis.anomalies.len(),
            "dashboard state replaced"
        );

        self.viewport.set_series_len(readings.len());
        self.readings = readings;
        self.analysis = analysis;
        self.chart = chart;
        Ok(())
    }
}
