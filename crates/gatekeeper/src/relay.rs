//! Outbound leg of the access relay.
//!
//! A validated [`AccessRequest`] is POSTed once to the configured gatekeeper
//! URL. A `200` response is handed back byte for byte; anything else is a
//! [`RelayError`]. There are no retries.

use std::time::Duration;

use axum::body::Bytes;
use reqwest::{Client, StatusCode, header};
use thiserror::Error;

use crate::{
    config::Config,
    dto::{AccessRequest, GatekeeperResponse},
};

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("cannot build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("cannot serialize request: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("gatekeeper did not answer within {0:?}")]
    Timeout(Duration),
    #[error("request to gatekeeper failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("gatekeeper answered with status code {0}")]
    UpstreamStatus(u16),
    #[error("cannot read gatekeeper response: {0}")]
    ReadBody(#[source] reqwest::Error),
    #[error("gatekeeper response is not valid JSON: {0}")]
    InvalidBody(#[source] serde_json::Error),
}

impl RelayError {
    /// Short label used as the `outcome` metric dimension.
    pub fn outcome(&self) -> &'static str {
        match self {
            RelayError::Client(_) | RelayError::Serialize(_) => "internal",
            RelayError::Timeout(_) => "timeout",
            RelayError::Transport(_) => "transport",
            RelayError::UpstreamStatus(_) => "upstream_status",
            RelayError::ReadBody(_) | RelayError::InvalidBody(_) => "invalid_body",
        }
    }
}

/// Upstream body, passed through untouched.
#[derive(Debug, Clone)]
pub struct RelayedResponse {
    pub body: Bytes,
    pub summary: GatekeeperResponse,
}

#[derive(Debug, Clone)]
pub struct GatekeeperClient {
    http: Client,
    url: String,
    timeout: Duration,
}

impl GatekeeperClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, RelayError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(RelayError::Client)?;
        Ok(Self {
            http,
            url: url.into(),
            timeout,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, RelayError> {
        Self::new(config.gatekeeper_url.clone(), config.relay_timeout())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn forward(&self, request: &AccessRequest) -> Result<RelayedResponse, RelayError> {
        let payload = serde_json::to_vec(request)?;

        tracing::debug!(url = %self.url, "forwarding access request to gatekeeper");
        let resp = self
            .http
            .post(&self.url)
            .header(header::CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(RelayError::UpstreamStatus(status.as_u16()));
        }

        let body = resp.bytes().await.map_err(|e| {
            if e.is_timeout() {
                RelayError::Timeout(self.timeout)
            } else {
                RelayError::ReadBody(e)
            }
        })?;
        let summary: GatekeeperResponse =
            serde_json::from_slice(&body).map_err(RelayError::InvalidBody)?;

        Ok(RelayedResponse { body, summary })
    }

    fn classify(&self, err: reqwest::Error) -> RelayError {
        if err.is_timeout() {
            RelayError::Timeout(self.timeout)
        } else {
            RelayError::Transport(err)
        }
    }
}
