use std::{future, time::Instant};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware::Next,
    response::IntoResponse,
    routing,
};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};

pub const HTTP_REQUESTS_TOTAL: &str = "http_requests_total";
pub const HTTP_REQUESTS_DURATION_SECONDS: &str = "http_requests_duration_seconds";
pub const GATEKEEPER_RELAY_TOTAL: &str = "gatekeeper_relay_total";
pub const UNMATCHED_PATH: &str = "unmatched";

pub async fn track_http(req: Request, next: Next) -> impl IntoResponse {
    let start = Instant::now();
    let path = path_label(&req);
    let method = req.method().clone();

    let response = next.run(req).await;

    let latency = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    let labels = [
        ("method", method.to_string()),
        ("path", path),
        ("status", status),
    ];

    metrics::counter!(HTTP_REQUESTS_TOTAL, &labels).increment(1);
    metrics::histogram!(HTTP_REQUESTS_DURATION_SECONDS, &labels).record(latency);

    response
}

/// Route template for matched requests, [`UNMATCHED_PATH`] for anything the
/// fallbacks answer.
pub fn path_label(req: &Request) -> String {
    match req.extensions().get::<MatchedPath>() {
        Some(matched_path) => matched_path.as_str().to_owned(),
        None => UNMATCHED_PATH.to_owned(),
    }
}

/// Counts one relay attempt; `outcome` is `success` or a [`RelayError::outcome`] label.
///
/// [`RelayError::outcome`]: crate::relay::RelayError::outcome
pub fn record_relay(outcome: &'static str) {
    metrics::counter!(GATEKEEPER_RELAY_TOTAL, "outcome" => outcome).increment(1);
}

/// Installs the global Prometheus recorder and returns the `/metrics` router.
pub fn prometheus_router() -> Result<Router, BuildError> {
    let recorder_handle = setup_metrics_recorder()?;
    Ok(Router::new().route(
        "/metrics",
        routing::get(move || future::ready(recorder_handle.render())),
    ))
}

fn setup_metrics_recorder() -> Result<PrometheusHandle, BuildError> {
    const EXPONENTIAL_SECONDS: &[f64] = &[
        0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
    ];

    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full(HTTP_REQUESTS_DURATION_SECONDS.to_string()),
            EXPONENTIAL_SECONDS,
        )?
        .install_recorder()
}
