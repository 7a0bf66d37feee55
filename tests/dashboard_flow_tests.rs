use pumpdash_rs::api::{Dashboard, DashboardConfig, DataSource, FileSource};
use pumpdash_rs::core::ViewMode;
use pumpdash_rs::error::{DashError, DashResult};

struct StaticSource {
    text: &'static str,
}

impl DataSource for StaticSource {
    fn describe(&self) -> String {
        "static".to_owned()
    }

    fn fetch_text(&self) -> DashResult<String> {
        Ok(self.text.to_owned())
    }
}

struct FailingSource;

impl DataSource for FailingSource {
    fn describe(&self) -> String {
        "failing".to_owned()
    }

    fn fetch_text(&self) -> DashResult<String> {
        Err(DashError::Source {
            source_desc: self.describe(),
            reason: "connection refused".to_owned(),
        })
    }
}

const PUMP_CSV: &str = "\
timestamp,sensor_00,machine_status
2018-04-01 00:00:00,100.0,NORMAL
2018-04-01 00:01:00,101.0,NORMAL
2018-04-01 00:02:00,99.0,BROKEN
2018-04-01 00:03:00,100.5,NORMAL
2018-04-01 00:04:00,100.2,NORMAL
";

fn dashboard() -> Dashboard {
    Dashboard::new(DashboardConfig::default()).expect("default config is valid")
}

#[test]
fn load_populates_metrics_series_and_viewport() {
    let mut dash = dashboard();
    dash.load_from(&StaticSource { text: PUMP_CSV }).expect("load");

    assert_eq!(dash.len(), 5);
    let metrics = dash.metrics();
    assert_eq!(metrics.average_pressure, 100.14);
    assert_eq!(metrics.max_pressure, 101.0);
    assert_eq!(metrics.min_pressure, 99.0);
    assert_eq!(metrics.broken_state_duration, 1);

    let chart = dash.chart_data();
    assert_eq!(chart.pressure.len(), 5);
    assert_eq!(chart.day_labels.len(), 1);

    assert_eq!(dash.view_mode(), ViewMode::Full);
    assert_eq!(dash.visible_window(), 0..5);

    let (first, last) = dash.time_range().expect("non-empty series");
    assert!(first < last);
}

#[test]
fn assistant_queries_are_pure_accessors() {
    let mut dash = dashboard();
    dash.load_from(&StaticSource { text: PUMP_CSV }).expect("load");

    assert_eq!(dash.data_points(2).len(), 2);
    assert_eq!(dash.data_points(1_000).len(), 5);
    assert!(dash.anomalous_readings().is_empty());

    let metrics_json = dash.metrics_json().expect("serializable metrics");
    assert!(metrics_json.get("averagePressure").is_some());
    assert!(metrics_json.get("anomalyCount").is_some());

    let points_json = dash.data_points_json(3).expect("serializable points");
    assert_eq!(points_json.as_array().map(Vec::len), Some(3));

    let summary = dash.context_summary();
    assert!(summary.contains("5 data points"));
    assert!(summary.contains("PSI"));

    // None of the queries mutated the session.
    assert_eq!(dash.len(), 5);
    assert_eq!(dash.view_mode(), ViewMode::Full);
}

#[test]
fn failed_fetch_leaves_previous_data_untouched() {
    let mut dash = dashboard();
    dash.load_from(&StaticSource { text: PUMP_CSV }).expect("load");
    let before = dash.metrics();

    let err = dash.load_from(&FailingSource).unwrap_err();
    assert!(matches!(err, DashError::Source { .. }));
    assert_eq!(dash.metrics(), before);
    assert_eq!(dash.len(), 5);
}

#[test]
fn failed_parse_leaves_previous_data_untouched() {
    let mut dash = dashboard();
    dash.load_from(&StaticSource { text: PUMP_CSV }).expect("load");

    let err = dash
        .load_from(&StaticSource {
            text: "timestamp,flow\n2018-04-01 00:00:00,1.0\n",
        })
        .unwrap_err();
    assert!(matches!(err, DashError::Ingestion(_)));
    assert_eq!(dash.len(), 5);
}

#[test]
fn stale_load_results_are_discarded() {
    let mut dash = dashboard();

    let stale = dash.begin_load();
    let current = dash.begin_load();

    dash.apply_load(current, PUMP_CSV).expect("current load");
    let err = dash
        .apply_load(stale, "timestamp,sensor_00\n2018-04-01 00:00:00,1.0\n")
        .unwrap_err();

    assert!(matches!(err, DashError::StaleLoad));
    // The newer load's data survives.
    assert_eq!(dash.len(), 5);
    assert_eq!(dash.metrics().average_pressure, 100.14);
}

#[test]
fn load_resets_an_active_viewport() {
    let mut dash = dashboard();
    dash.load_from(&StaticSource { text: PUMP_CSV }).expect("load");

    dash.zoom_in();
    dash.pan_left();
    assert_eq!(dash.view_mode(), ViewMode::Zoomed);

    dash.load_from(&StaticSource { text: PUMP_CSV }).expect("reload");
    assert_eq!(dash.view_mode(), ViewMode::Full);
    assert_eq!(dash.visible_window(), 0..5);
}

#[test]
fn visible_slice_tracks_the_viewport() {
    let mut dash = dashboard();
    dash.load_from(&StaticSource { text: PUMP_CSV }).expect("load");

    assert_eq!(dash.visible_slice().len(), 5);
    dash.pan_right();
    let visible = dash.visible_slice();
    assert!(visible.len() < 5);
    assert!(!visible.is_empty());
}

#[test]
fn visible_day_labels_follow_the_viewport() {
    const FOUR_DAY_CSV: &str = "\
timestamp,sensor_00
2018-04-01 00:00:00,100.0
2018-04-01 12:00:00,101.0
2018-04-02 00:00:00,102.0
2018-04-02 12:00:00,103.0
2018-04-03 00:00:00,104.0
2018-04-03 12:00:00,105.0
2018-04-04 00:00:00,106.0
2018-04-04 12:00:00,107.0
";

    let mut dash = dashboard();
    dash.load_from(&StaticSource { text: FOUR_DAY_CSV }).expect("load");

    // Full view: one label per day in the series.
    assert_eq!(
        dash.visible_day_labels_in(&chrono::Utc),
        vec!["4/1/18", "4/2/18", "4/3/18", "4/4/18"]
    );
    assert_eq!(dash.chart_data().day_labels.len(), 4);

    // Panning right narrows the window to the trailing half.
    dash.pan_right();
    assert_eq!(dash.visible_window(), 4..8);
    assert_eq!(
        dash.visible_day_labels_in(&chrono::Utc),
        vec!["4/3/18", "4/4/18"]
    );
}

#[test]
fn file_source_round_trip() {
    let path = std::env::temp_dir().join(format!(
        "pumpdash-test-{}-{}.csv",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("clock after epoch")
            .as_nanos()
    ));
    std::fs::write(&path, PUMP_CSV).expect("write fixture");

    let mut dash = dashboard();
    let result = dash.load_from(&FileSource::new(&path));
    std::fs::remove_file(&path).ok();

    result.expect("load from file");
    assert_eq!(dash.len(), 5);
}

#[test]
fn missing_file_is_a_source_error() {
    let mut dash = dashboard();
    let err = dash
        .load_from(&FileSource::new("/definitely/not/here.csv"))
        .unwrap_err();
    assert!(matches!(err, DashError::Source { .. }));
}

#[test]
fn config_round_trips_through_serde() {
    let config = DashboardConfig::default();
    let json = serde_json::to_string(&config).expect("serialize config");
    let restored: DashboardConfig = serde_json::from_str(&json).expect("deserialize config");
    assert_eq!(config, restored);
}

#[test]
fn invalid_config_is_rejected_at_construction() {
    let mut config = DashboardConfig::default();
    config.stats.window_divisor = 0;
    assert!(Dashboard::new(config).is_err());
}
