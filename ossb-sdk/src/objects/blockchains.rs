use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
/// Solana clusters an action can target
#[serde(rename_all = "lowercase")]
pub enum Cluster {
    #[serde(alias = "mainnet-beta")]
    Mainnet,
    #[default]
    Devnet,
    Testnet,
}

impl Cluster {
    /// CAIP-2 chain id advertised in the `X-Blockchain-Ids` header.
    pub const fn caip2_id(self) -> &'static str {
        match self {
            Cluster::Mainnet => "solana:5eykt4UsFv8P8NJdTREpY1vzqKqZKvdp",
            Cluster::Devnet => "solana:EtWTRABZaYq6iMfeYKouRu166VU2xqa1",
            Cluster::Testnet => "solana:4uhcVJyU9pJkvQyS88uRDiswHXSCkY3z",
        }
    }

    /// Public RPC endpoint for the cluster.
    pub const fn default_rpc_url(self) -> &'static str {
        match self {
            Cluster::Mainnet => "https://api.mainnet-beta.solana.com",
            Cluster::Devnet => "https://api.devnet.solana.com",
            Cluster::Testnet => "https://api.testnet.solana.com",
        }
    }

    /// Value of the `cluster` query parameter understood by Blink interstitials.
    pub const fn as_str(self) -> &'static str {
        match self {
            Cluster::Mainnet => "mainnet",
            Cluster::Devnet => "devnet",
            Cluster::Testnet => "testnet",
        }
    }
}
