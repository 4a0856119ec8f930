use std::sync::Arc;

use crate::{relay::GatekeeperClient, validator::Validator};

#[derive(Clone)]
pub struct AppState {
    pub validator: Arc<Validator>,
    pub gatekeeper: Arc<GatekeeperClient>,
}

impl AppState {
    pub fn new(validator: Validator, gatekeeper: GatekeeperClient) -> Self {
        Self {
            validator: Arc::new(validator),
            gatekeeper: Arc::new(gatekeeper),
        }
    }
}
