//! TOML file configuration structures.
//!
//! These structs directly map to the `ossb-config.toml` file format. Every
//! section is optional; a missing file section falls back to the public
//! devnet deployment.

use ossb_core::config::Commitment;
use ossb_sdk::objects::Cluster;
use serde::Deserialize;
use std::net::{Ipv4Addr, SocketAddr};

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub server: ServerConfig,
    pub chain: ChainConfig,
    pub token: TokenConfig,
    pub defaults: DefaultsConfig,
    pub github: GithubConfig,
}

/// Server configuration section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// The address and port to listen on (e.g., "0.0.0.0:8080").
    pub listen: SocketAddr,
    /// Path the donate action is served at.
    pub action_path: String,
    /// Public origin used to build absolute hrefs. Relative hrefs when unset.
    pub public_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from((Ipv4Addr::UNSPECIFIED, 8080)),
            action_path: "/api/actions/donate".into(),
            public_url: None,
        }
    }
}

/// Chain configuration section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    pub cluster: Cluster,
    /// JSON-RPC endpoint; the cluster's public endpoint when unset.
    pub rpc_url: Option<String>,
    pub commitment: Commitment,
}

/// Donated token section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TokenConfig {
    pub mint: String,
    pub decimals: u8,
    pub symbol: String,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            mint: "EKLbfTVy38gobhwWF18Kcosiwz4JViWwmA2fYrEKwaoj".into(),
            decimals: 9,
            symbol: "OSSBLINKS".into(),
        }
    }
}

/// Fallbacks for omitted query parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub destination: String,
    pub repository: String,
    pub icon: String,
    /// Decimal string, e.g. `"10"` or `"0.5"`.
    pub amount: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            destination: "2grKcZPjxKbNKkc8S6nmrSXtXTXJih4utVMa7jBwRcFf".into(),
            repository: "https://github.com/0xnetero/oss-blinks".into(),
            icon: "https://avatars.githubusercontent.com/u/203130627?v=4".into(),
            amount: "10".into(),
        }
    }
}

/// GitHub REST API section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    pub api_base: String,
    pub user_agent: String,
    /// Request timeout in seconds; `0` disables it.
    pub timeout_secs: u64,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.github.com".into(),
            user_agent: concat!("ossb-server/", env!("CARGO_PKG_VERSION")).into(),
            timeout_secs: 10,
        }
    }
}
