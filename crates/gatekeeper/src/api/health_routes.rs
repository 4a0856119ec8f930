use axum::{Router, routing};

use crate::common::AppState;

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/healthz", routing::get(healthz))
}

async fn healthz() -> &'static str {
    "ok"
}
