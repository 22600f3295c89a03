//! Configuration module for ossb-server.
//!
//! Handles loading configuration from TOML files and CLI arguments, and
//! converting it into the validated runtime types of `ossb-core`.

pub mod file;
pub mod runtime;

use crate::config::file::FileConfig;
use crate::config::runtime::{
    ActionConfig, ChainConfig, DonationDefaults, GithubConfig, ServerConfig, TokenConfig,
};
use ossb_core::repository::RepositoryRef;
use ossb_core::validation::parse_amount;
use ossb_sdk::solana::Pubkey;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    ValidationError(String),
}

/// Loaded configuration result containing all parts.
pub struct LoadedConfig {
    pub server: ServerConfig,
    pub action: ActionConfig,
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: std::path::PathBuf,
    listen_override: Option<SocketAddr>,
}

impl ConfigLoader {
    /// Create a new config loader.
    pub fn new(config_path: impl AsRef<Path>, listen_override: Option<SocketAddr>) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            listen_override,
        }
    }

    /// Load and process the configuration.
    ///
    /// A missing file is not an error: the built-in devnet defaults apply.
    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        let file_config = if self.config_path.exists() {
            let config_content = std::fs::read_to_string(&self.config_path)?;
            toml::from_str(&config_content)?
        } else {
            tracing::warn!(
                path = ?self.config_path,
                "Config file not found, using built-in defaults"
            );
            FileConfig::default()
        };
        self.build_loaded_config(file_config)
    }

    /// Reload the configuration (used during SIGHUP).
    pub fn reload(&self) -> Result<LoadedConfig, ConfigError> {
        self.load()
    }

    fn build_loaded_config(&self, file_config: FileConfig) -> Result<LoadedConfig, ConfigError> {
        let FileConfig {
            server,
            chain,
            token,
            defaults,
            github,
        } = file_config;

        let listen = self.listen_override.unwrap_or(server.listen);

        if !server.action_path.starts_with('/') {
            return Err(invalid(format!(
                "server.action_path must start with '/': {}",
                server.action_path
            )));
        }
        let public_url = server
            .public_url
            .as_deref()
            .map(|u| parse_url("server.public_url", u))
            .transpose()?;

        let rpc_url = parse_url(
            "chain.rpc_url",
            chain
                .rpc_url
                .as_deref()
                .unwrap_or(chain.cluster.default_rpc_url()),
        )?;

        let mint = parse_pubkey("token.mint", &token.mint)?;
        if token.decimals > TokenConfig::MAX_DECIMALS {
            return Err(invalid(format!(
                "token.decimals must be at most {}, got {}",
                TokenConfig::MAX_DECIMALS,
                token.decimals
            )));
        }
        if token.symbol.trim().is_empty() {
            return Err(invalid("token.symbol must not be empty".into()));
        }

        let destination = parse_pubkey("defaults.destination", &defaults.destination)?;
        let repository = RepositoryRef::parse(&defaults.repository).map_err(|e| {
            invalid(format!(
                "defaults.repository {:?} is not a GitHub repository: {e}",
                defaults.repository
            ))
        })?;
        let amount = parse_amount(&defaults.amount)
            .map_err(|_| invalid(format!("defaults.amount {:?} is invalid", defaults.amount)))?;

        if github.user_agent.trim().is_empty() {
            return Err(invalid("github.user_agent must not be empty".into()));
        }
        let api_base = parse_url("github.api_base", &github.api_base)?;

        Ok(LoadedConfig {
            server: ServerConfig { listen },
            action: ActionConfig {
                action_path: server.action_path,
                public_url,
                chain: ChainConfig {
                    cluster: chain.cluster,
                    rpc_url,
                    commitment: chain.commitment,
                },
                token: TokenConfig {
                    mint,
                    decimals: token.decimals,
                    symbol: token.symbol,
                },
                defaults: DonationDefaults {
                    destination,
                    repository,
                    icon: defaults.icon,
                    amount,
                },
                github: GithubConfig {
                    api_base,
                    user_agent: github.user_agent,
                    timeout: (github.timeout_secs > 0)
                        .then(|| Duration::from_secs(github.timeout_secs)),
                },
            },
        })
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::ValidationError(message)
}

fn parse_pubkey(field: &str, value: &str) -> Result<Pubkey, ConfigError> {
    value
        .parse()
        .map_err(|e| invalid(format!("{field} {value:?} is not a Solana address: {e}")))
}

fn parse_url(field: &str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|e| invalid(format!("{field} {value:?} is not a URL: {e}")))
}
