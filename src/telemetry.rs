//! Opt-in tracing setup for hosts embedding the dashboard core.
//!
//! Nothing here runs implicitly: a host either calls
//! [`init_default_tracing`] once at startup or installs its own `tracing`
//! subscriber and ignores this module entirely.

/// Installs a compact stderr subscriber honoring `RUST_LOG`, falling back
/// to the `info` level. Only available with the `telemetry` feature.
///
/// Returns `true` if this call installed the global subscriber, `false`
/// when the feature is disabled or another subscriber won the race.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
