use thiserror::Error;

/// Errors raised while handling Solana addresses and transactions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid blockhash: {0}")]
    InvalidHash(String),

    #[error("transaction build error: {0}")]
    TransactionBuildError(String),

    #[error("serialization error: {0}")]
    SerializationError(String),
}
