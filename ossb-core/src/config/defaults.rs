//! Fallback values for omitted query parameters.

use ossb_sdk::solana::Pubkey;
use rust_decimal::Decimal;

use crate::repository::RepositoryRef;

/// Values used when a request omits `to`, `repo` or `amount`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonationDefaults {
    pub destination: Pubkey,
    pub repository: RepositoryRef,
    /// Icon shown when no repository avatar is available.
    pub icon: String,
    pub amount: Decimal,
}
