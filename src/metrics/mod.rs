// Service counters exported in Prometheus text format.

use std::sync::OnceLock;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

pub const SIGNUPS_TOTAL: &str = "directory_signups_total";
pub const UNREGISTERS_TOTAL: &str = "directory_unregisters_total";
pub const PANICS_TOTAL: &str = "http_panics_total";

pub const OUTCOME_OK: &str = "ok";

/// Handle used to render the installed recorder.
static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Installs the global Prometheus recorder.
///
/// Counters recorded before this call (or when it is never made) are dropped.
pub fn init_prometheus_exporter() -> anyhow::Result<()> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("failed to install Prometheus recorder: {}", e))?;

    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| anyhow::anyhow!("Prometheus handle already initialized"))?;

    Ok(())
}

/// Renders current metrics, if the recorder is installed.
pub fn render() -> Option<String> {
    PROMETHEUS_HANDLE.get().map(|handle| handle.render())
}

pub fn inc_signups(outcome: &'static str) {
    ::metrics::counter!(SIGNUPS_TOTAL, "outcome" => outcome).increment(1);
}

pub fn inc_unregisters(outcome: &'static str) {
    ::metrics::counter!(UNREGISTERS_TOTAL, "outcome" => outcome).increment(1);
}

pub fn inc_panics() {
    ::metrics::counter!(PANICS_TOTAL).increment(1);
}
