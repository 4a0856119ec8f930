use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyAck {
    pub status: String, // always "success"
    pub message: String,
    pub toy_production_key: String,
}

impl KeyAck {
    pub fn received(key: String) -> Self {
        Self {
            status: "success".to_string(),
            message: "Toy production key received successfully".to_string(),
            toy_production_key: key,
        }
    }
}
