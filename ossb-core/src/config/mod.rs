//! Configuration types for OSS Blinks.
//!
//! These types represent the validated runtime configuration used by the
//! action processors. The actual config loading/parsing is handled by the
//! server crate.

mod chain;
mod config_store;
mod defaults;
mod github;
mod token;

pub use chain::{ChainConfig, Commitment};
pub use config_store::ConfigStore;
pub use defaults::DonationDefaults;
pub use github::GithubConfig;
pub use token::TokenConfig;

use url::Url;

/// Everything a donate request needs to know about its deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionConfig {
    /// Path the donate action is mounted at (e.g. `/api/actions/donate`).
    pub action_path: String,
    /// Public origin of the server. When set, linked action hrefs are
    /// absolute; otherwise they are relative to the action's origin.
    pub public_url: Option<Url>,
    pub chain: ChainConfig,
    pub token: TokenConfig,
    pub defaults: DonationDefaults,
    pub github: GithubConfig,
}

impl ActionConfig {
    /// Base used for linked action hrefs.
    pub fn action_endpoint(&self) -> String {
        match &self.public_url {
            Some(base) => format!(
                "{}{}",
                base.as_str().trim_end_matches('/'),
                self.action_path
            ),
            None => self.action_path.clone(),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_config {
    use super::*;
    use crate::repository::RepositoryRef;
    use ossb_sdk::objects::Cluster;
    use rust_decimal::Decimal;

    pub fn action_config() -> ActionConfig {
        ActionConfig {
            action_path: "/api/actions/donate".into(),
            public_url: None,
            chain: ChainConfig {
                cluster: Cluster::Devnet,
                rpc_url: Url::parse("https://api.devnet.solana.com").unwrap(),
                commitment: Commitment::Confirmed,
            },
            token: TokenConfig {
                mint: "EKLbfTVy38gobhwWF18Kcosiwz4JViWwmA2fYrEKwaoj".parse().unwrap(),
                decimals: 9,
                symbol: "OSSBLINKS".into(),
            },
            defaults: DonationDefaults {
                destination: "2grKcZPjxKbNKkc8S6nmrSXtXTXJih4utVMa7jBwRcFf".parse().unwrap(),
                repository: RepositoryRef::parse("https://github.com/0xnetero/oss-blinks")
                    .unwrap(),
                icon: "https://avatars.githubusercontent.com/u/203130627?v=4".into(),
                amount: Decimal::TEN,
            },
            github: GithubConfig {
                api_base: Url::parse("https://api.github.com").unwrap(),
                user_agent: "ossb-test".into(),
                timeout: None,
            },
        }
    }
}
