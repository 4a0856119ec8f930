use serde::{Deserialize, Serialize};

/// Inbound access request; forwarded upstream unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccessRequest {
    pub order_service_host_or_ip_address: String,
    pub secret_input: String,
}
