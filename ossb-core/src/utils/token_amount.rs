use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenAmountError {
    #[error("amount must be positive")]
    NotPositive,
    #[error("amount rounds to zero base units")]
    RoundsToZero,
    #[error("amount does not fit in u64 base units")]
    Overflow,
}

/// Convert a whole-token amount into base units of a mint with `decimals`.
///
/// Fractional digits beyond `decimals` are rounded half-up (midpoint away
/// from zero) before scaling, so `1.0000000005` with 9 decimals becomes
/// `1_000_000_001`. All arithmetic is exact decimal arithmetic.
pub fn to_base_units(amount: Decimal, decimals: u8) -> Result<u64, TokenAmountError> {
    if amount <= Decimal::ZERO {
        return Err(TokenAmountError::NotPositive);
    }

    let scale = 10u64
        .checked_pow(u32::from(decimals))
        .ok_or(TokenAmountError::Overflow)?;
    let rounded =
        amount.round_dp_with_strategy(u32::from(decimals), RoundingStrategy::MidpointAwayFromZero);
    let base_units = rounded
        .checked_mul(Decimal::from(scale))
        .ok_or(TokenAmountError::Overflow)?
        .trunc()
        .to_u64()
        .ok_or(TokenAmountError::Overflow)?;

    if base_units == 0 {
        return Err(TokenAmountError::RoundsToZero);
    }
    Ok(base_units)
}
