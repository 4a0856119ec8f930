use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::relay::RelayError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request body")]
    MalformedBody,
    #[error("Invalid toy production key format")]
    InvalidKey,
    #[error("Invalid secret input format")]
    InvalidSecret,
    #[error("Failed to access Gatekeeper Service: {0}")]
    Relay(#[from] RelayError),
    #[error("Not found")]
    NotFound,
    #[error("Method not allowed")]
    MethodNotAllowed,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedBody | ApiError::InvalidKey | ApiError::InvalidSecret => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Relay(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let ApiError::Relay(err) = &self {
            tracing::error!(error = ?err, "relay failed");
        }
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
