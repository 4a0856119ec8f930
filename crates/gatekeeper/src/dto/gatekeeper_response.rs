use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatekeeperResponse {
    pub status: Option<String>, // e.g. "success" or "error"
    pub message: Option<String>,
    pub data: Option<serde_json::Value>,
}
