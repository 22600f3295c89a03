//! Donated token configuration.

use ossb_sdk::solana::Pubkey;

/// The SPL token donors send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenConfig {
    /// Mint address of the token.
    pub mint: Pubkey,
    /// Decimal places of the mint; one whole token is `10^decimals` base units.
    pub decimals: u8,
    /// Display symbol used in labels and messages.
    pub symbol: String,
}

impl TokenConfig {
    /// Highest precision whose scale factor still fits in a `u64`.
    pub const MAX_DECIMALS: u8 = 19;
}
