use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing,
};

use crate::{
    common::{ApiError, AppState},
    dto::{KeyAck, KeyRequest},
};

pub fn key_routes() -> Router<AppState> {
    Router::new().route("/api/toyProductionKey", routing::post(receive_key))
}

async fn receive_key(
    State(state): State<AppState>,
    payload: Result<Json<KeyRequest>, JsonRejection>,
) -> Result<Json<KeyAck>, ApiError> {
    let Json(req) = payload.map_err(|e| {
        tracing::warn!("bad key request body: {e}");
        ApiError::MalformedBody
    })?;

    // the raw key stays out of the logs, only the resolved toy name is recorded
    let Some(toy) = state.validator.toy_name(&req.toy_production_key) else {
        tracing::warn!(
            key_len = req.toy_production_key.len(),
            "rejected toy production key"
        );
        return Err(ApiError::InvalidKey);
    };

    tracing::info!(toy, "toy production key received");
    Ok(Json(KeyAck::received(req.toy_production_key)))
}
