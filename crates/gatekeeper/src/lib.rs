pub mod api;
pub mod common;
pub mod config;
pub mod dto;
pub mod relay;
pub mod validator;

use axum::{
    Router,
    extract::{DefaultBodyLimit, Request},
    middleware,
};
use tower_http::trace::{DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

pub use common::AppState;
pub use config::Config;

/// Builds the API router: both gatekeeper endpoints plus `/healthz`, wrapped
/// in request metrics, tracing and a body size limit.
///
/// Every non-2xx answer, including unknown routes, wrong methods and bodies
/// over `body_limit_bytes`, carries an `{"error": ...}` JSON body.
pub fn app(state: AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .merge(api::key_routes())
        .merge(api::access_routes())
        .merge(api::health_routes())
        .fallback(api::not_found)
        .method_not_allowed_fallback(api::method_not_allowed)
        .with_state(state)
        // oversized bodies surface as a `JsonRejection` inside the handlers
        .layer(DefaultBodyLimit::max(body_limit_bytes))
        .layer(middleware::from_fn(common::metrics::track_http))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &Request<_>| {
                let forwarded_for = req
                    .headers()
                    .get("x-forwarded-for")
                    .and_then(|h| h.to_str().ok())
                    .unwrap_or("unknown");
                tracing::info_span!(
                    "gatekeeper_request",
                    method = %req.method(),
                    path = %req.uri().path(),
                    client_ip = %forwarded_for,
                )
            })
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO))
            .on_failure(DefaultOnFailure::new().level(Level::WARN)),
        )
}
