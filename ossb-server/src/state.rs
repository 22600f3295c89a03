//! Application state shared across all request handlers.

use ossb_core::config::{ActionConfig, ConfigStore};
use ossb_core::framework::ActionProcessor;
use ossb_core::repository::{GithubClient, RepositoryApi};
use ossb_core::rpc::{ChainRpc, JsonRpcClient};
use std::sync::Arc;

/// Outbound clients built from an [`ActionConfig`].
#[derive(Clone)]
pub struct Clients {
    pub rpc: Arc<dyn ChainRpc>,
    pub repositories: Arc<dyn RepositoryApi>,
}

impl Clients {
    /// Build the RPC and GitHub clients for a configuration.
    pub fn from_config(config: &ActionConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            rpc: Arc::new(JsonRpcClient::new(&config.chain)),
            repositories: Arc::new(GithubClient::new(&config.github)?),
        })
    }
}

/// A configuration together with the clients built from it.
#[derive(Clone)]
pub struct Runtime {
    pub config: ActionConfig,
    pub clients: Clients,
}

/// Application state that is shared across all request handlers.
///
/// This is cloneable and cheap to pass around (everything is behind Arc).
/// Configuration and clients sit in one store and are replaced together
/// on SIGHUP.
#[derive(Clone)]
pub struct AppState {
    pub runtime: ConfigStore<Runtime>,
}

impl AppState {
    pub fn new(config: ActionConfig, clients: Clients) -> Self {
        Self {
            runtime: ConfigStore::new(Runtime { config, clients }),
        }
    }

    /// Snapshot the current configuration and clients into a processor.
    pub async fn processor(&self) -> ActionProcessor {
        let Runtime {
            config,
            clients: Clients { rpc, repositories },
        } = self.runtime.snapshot().await;
        ActionProcessor {
            config,
            rpc,
            repositories,
        }
    }

    /// Swap in a reloaded configuration and its clients, returning the new
    /// version.
    pub async fn update(&self, config: ActionConfig, clients: Clients) -> u64 {
        self.runtime.update(Runtime { config, clients }).await
    }
}
