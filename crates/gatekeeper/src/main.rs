use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::{net::TcpListener, sync::Notify};

use gatekeeper::{
    AppState, Config, app, common::metrics, relay::GatekeeperClient, validator::Validator,
};
use libs::util;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    util::init_tracing("LOG_LEVEL");

    let config = Config::from_env().context("failed to load configuration from env")?;
    let gatekeeper = GatekeeperClient::from_config(&config)?;
    tracing::info!(
        url = gatekeeper.url(),
        timeout_secs = config.relay_timeout_secs,
        "relaying access requests to gatekeeper"
    );
    let state = AppState::new(Validator::from_config(&config), gatekeeper);
    let api_router = app(state, config.body_limit_bytes);

    let shutdown_notify = Arc::new(Notify::new());
    tokio::spawn(util::listen_for_shutdown(shutdown_notify.clone()));

    let api_listener = TcpListener::bind(config.api_addr()?).await?;
    tracing::info!("⇢ API listening on: http://{}", api_listener.local_addr()?);
    let api_server = axum::serve(api_listener, api_router)
        .with_graceful_shutdown(util::shutdown_signal(shutdown_notify.clone()));

    match config.metrics_addr().transpose()? {
        Some(metrics_addr) => {
            let metrics_router = metrics::prometheus_router()?;
            let metrics_listener = TcpListener::bind(metrics_addr).await?;
            tracing::info!(
                "⇢ Metrics listening on: http://{}/metrics",
                metrics_listener.local_addr()?
            );
            let metrics_server = axum::serve(metrics_listener, metrics_router)
                .with_graceful_shutdown(util::shutdown_signal(shutdown_notify.clone()));

            tokio::try_join!(api_server, metrics_server)?;
        }
        None => api_server.await?,
    }

    Ok(())
}
