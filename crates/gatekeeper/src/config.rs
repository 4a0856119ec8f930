use std::{net::SocketAddr, time::Duration};

use serde::Deserialize;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_GATEKEEPER_URL: &str =
    "https://dec-2024-mini-challenge.csit-events.sg/api/gatekeeper/access";
pub const DEFAULT_SECRET: &str = "Plush123!";
pub const DEFAULT_TOY_NAMES: &[&str] = &["Plush", "TeddyBear", "Doll", "RaceCar", "ActionFigure"];

/// Runtime configuration, read from the environment by [`Config::from_env`].
///
/// Field names map to upper-cased variables, e.g. `relay_timeout_secs` is
/// read from `RELAY_TIMEOUT_SECS`. `TOY_NAMES` is a comma separated list.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    pub prometheus_port: Option<u16>,
    #[serde(default = "default_gatekeeper_url")]
    pub gatekeeper_url: String,
    #[serde(default = "default_relay_timeout_secs")]
    pub relay_timeout_secs: u64,
    #[serde(default = "default_secret")]
    pub gatekeeper_secret: String,
    #[serde(default = "default_toy_names")]
    pub toy_names: Vec<String>,
    #[serde(default = "default_body_limit_bytes")]
    pub body_limit_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env::<Config>()
    }

    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars)
    }

    pub fn api_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.bind_address, self.port).parse()
    }

    pub fn metrics_addr(&self) -> Option<Result<SocketAddr, std::net::AddrParseError>> {
        self.prometheus_port
            .map(|port| format!("{}:{}", self.bind_address, port).parse())
    }

    pub fn relay_timeout(&self) -> Duration {
        Duration::from_secs(self.relay_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind_address: default_bind_address(),
            prometheus_port: None,
            gatekeeper_url: default_gatekeeper_url(),
            relay_timeout_secs: default_relay_timeout_secs(),
            gatekeeper_secret: default_secret(),
            toy_names: default_toy_names(),
            body_limit_bytes: default_body_limit_bytes(),
        }
    }
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_gatekeeper_url() -> String {
    DEFAULT_GATEKEEPER_URL.to_string()
}

fn default_relay_timeout_secs() -> u64 {
    10
}

fn default_secret() -> String {
    DEFAULT_SECRET.to_string()
}

fn default_toy_names() -> Vec<String> {
    DEFAULT_TOY_NAMES.iter().map(|s| s.to_string()).collect()
}

fn default_body_limit_bytes() -> usize {
    64 * 1024
}
