//! Metrics controller.

use axum::{http::StatusCode, response::IntoResponse, routing::get, Router};

use crate::http::Controller;
use crate::metrics;

pub const PROMETHEUS_METRICS_PATH: &str = "/metrics";

/// PrometheusMetricsController handles Prometheus metrics endpoint.
pub struct PrometheusMetricsController;

impl PrometheusMetricsController {
    /// Creates a new Prometheus metrics controller.
    pub fn new() -> Self {
        Self
    }

    /// Handles the metrics request.
    ///
    /// Renders an empty exposition when metrics are disabled in config.
    async fn get_metrics() -> impl IntoResponse {
        (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            metrics::render().unwrap_or_default(),
        )
    }
}

impl Default for PrometheusMetricsController {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller for PrometheusMetricsController {
    fn add_route(&self, router: Router) -> Router {
        router.route(PROMETHEUS_METRICS_PATH, get(Self::get_metrics))
    }
}
