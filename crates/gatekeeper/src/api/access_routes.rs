use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::header,
    response::IntoResponse,
    routing,
};

use crate::{
    common::{ApiError, AppState, metrics},
    dto::AccessRequest,
};

pub fn access_routes() -> Router<AppState> {
    Router::new().route("/api/gatekeeper/access", routing::post(relay_access))
}

async fn relay_access(
    State(state): State<AppState>,
    payload: Result<Json<AccessRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload.map_err(|e| {
        tracing::warn!("bad access request body: {e}");
        ApiError::MalformedBody
    })?;

    // never log the secret itself
    if !state.validator.validate_secret(&req.secret_input) {
        tracing::warn!(
            order_service = %req.order_service_host_or_ip_address,
            "rejected access request with invalid secret"
        );
        return Err(ApiError::InvalidSecret);
    }

    let relayed = match state.gatekeeper.forward(&req).await {
        Ok(r) => r,
        Err(e) => {
            metrics::record_relay(e.outcome());
            return Err(e.into());
        }
    };
    metrics::record_relay("success");

    tracing::info!(
        order_service = %req.order_service_host_or_ip_address,
        upstream_status = relayed.summary.status.as_deref().unwrap_or("-"),
        "gatekeeper access relayed"
    );

    Ok((
        [(header::CONTENT_TYPE, "application/json")],
        relayed.body,
    ))
}
