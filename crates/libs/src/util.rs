use std::sync::Arc;

use tokio::sync::Notify;
use tracing_subscriber::EnvFilter;

/// Installs the global `fmt` subscriber, filtered by the directives in `env_var`.
pub fn init_tracing(env_var: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env(env_var))
        .init();
}

#[cfg(unix)]
pub async fn listen_for_shutdown(notify: Arc<Notify>) {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {},
                _ = sigterm.recv() => {},
            }
        }
        Err(e) => {
            tracing::warn!("cannot install SIGTERM handler, falling back to ctrl-c only: {e}");
            let _ = tokio::signal::ctrl_c().await;
        }
    }

    tracing::info!("shutdown signal received – starting graceful shutdown");
    notify.notify_waiters();
}

#[cfg(not(unix))]
pub async fn listen_for_shutdown(notify: Arc<Notify>) {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received – starting graceful shutdown");
    notify.notify_waiters();
}

/// Resolves once `notify` fires; handed to `with_graceful_shutdown`.
pub async fn shutdown_signal(notify: Arc<Notify>) {
    notify.notified().await;
}
