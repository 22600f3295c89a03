//! Signal handling for graceful shutdown and config reload.

use crate::config::ConfigLoader;
use crate::state::{AppState, Clients};
use std::sync::Arc;
use tokio::signal::unix::{SignalKind, signal};
use tokio::sync::Notify;

/// Wait for `kind`, or forever if the handler cannot be installed.
async fn wait_for(kind: SignalKind, name: &str) {
    match signal(kind) {
        Ok(mut stream) => {
            stream.recv().await;
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to install {} handler", name);
            std::future::pending::<()>().await;
        }
    }
}

/// Creates a future that completes when a shutdown signal is received.
///
/// Listens for SIGTERM and SIGINT (Ctrl+C).
pub async fn shutdown_signal() {
    tokio::select! {
        _ = wait_for(SignalKind::terminate(), "SIGTERM") => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
        _ = wait_for(SignalKind::interrupt(), "SIGINT") => {
            tracing::info!("Received SIGINT, initiating graceful shutdown");
        }
    }
}

/// Spawns a task that listens for SIGHUP and reloads the configuration.
///
/// A failed reload is logged and the running configuration stays in place.
/// Returns a Notify that can be used to signal when shutdown is complete.
pub fn spawn_config_reload_handler(state: AppState, config_loader: Arc<ConfigLoader>) -> Arc<Notify> {
    let shutdown_notify = Arc::new(Notify::new());
    let shutdown_notify_clone = shutdown_notify.clone();

    tokio::spawn(async move {
        let mut sighup = match signal(SignalKind::hangup()) {
            Ok(sighup) => sighup,
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGHUP handler, reload disabled");
                return;
            }
        };

        loop {
            tokio::select! {
                _ = sighup.recv() => {
                    tracing::info!("Received SIGHUP, reloading configuration");
                    reload(&state, &config_loader).await;
                }
                _ = shutdown_notify_clone.notified() => {
                    tracing::debug!("Config reload handler shutting down");
                    break;
                }
            }
        }
    });

    shutdown_notify
}

async fn reload(state: &AppState, config_loader: &ConfigLoader) {
    let mut loaded_config = match config_loader.reload() {
        Ok(loaded_config) => loaded_config,
        Err(e) => {
            tracing::error!("Failed to reload configuration: {}", e);
            return;
        }
    };
    let clients = match Clients::from_config(&loaded_config.action) {
        Ok(clients) => clients,
        Err(e) => {
            tracing::error!("Failed to rebuild clients: {}", e);
            return;
        }
    };

    let previous_path = state.runtime.read().await.config.action_path.clone();
    if previous_path != loaded_config.action.action_path {
        tracing::warn!(
            current = %previous_path,
            configured = %loaded_config.action.action_path,
            "Action path changes take effect on restart"
        );
        loaded_config.action.action_path = previous_path;
    }

    let version = state.update(loaded_config.action, clients).await;
    tracing::info!(version, "Configuration reloaded successfully");
}
