//! Solana cluster and RPC configuration.

use ossb_sdk::objects::Cluster;
use serde::{Deserialize, Serialize};
use url::Url;

/// Commitment level requested from the RPC node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    Processed,
    #[default]
    Confirmed,
    Finalized,
}

impl Commitment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Commitment::Processed => "processed",
            Commitment::Confirmed => "confirmed",
            Commitment::Finalized => "finalized",
        }
    }
}

/// Chain configuration with runtime values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainConfig {
    /// Cluster advertised in the `X-Blockchain-Ids` header and share links.
    pub cluster: Cluster,
    /// JSON-RPC endpoint used for account lookups and blockhashes.
    pub rpc_url: Url,
    pub commitment: Commitment,
}
