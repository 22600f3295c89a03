//! Query parameter validation for the donate action.

use std::str::FromStr;

use ossb_sdk::solana::Pubkey;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::config::DonationDefaults;
use crate::repository::RepositoryRef;

/// Raw `?to=&amount=&repo=` query of a donate request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DonationQuery {
    pub to: Option<String>,
    pub amount: Option<String>,
    pub repo: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid destination address")]
    InvalidDestination,
    #[error("invalid amount")]
    InvalidAmount,
    #[error("invalid repository URL")]
    InvalidRepository,
    #[error("invalid account")]
    InvalidAccount,
}

/// A donate request with every parameter resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonationRequest {
    pub destination: Pubkey,
    pub amount: Decimal,
    pub repository: RepositoryRef,
    /// Whether `repository` came from the query rather than the defaults.
    pub repository_supplied: bool,
}

/// Empty values are treated the same as missing ones.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl DonationQuery {
    /// Read the donate parameters from a raw query string.
    ///
    /// A repeated key keeps its first value and unknown keys are ignored,
    /// so no query string is rejected at this stage.
    pub fn from_query_string(query: &str) -> Self {
        let mut parsed = Self::default();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            let slot = match key.as_ref() {
                "to" => &mut parsed.to,
                "amount" => &mut parsed.amount,
                "repo" => &mut parsed.repo,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        parsed
    }

    pub fn validate(&self, defaults: &DonationDefaults) -> Result<DonationRequest, ValidationError> {
        let destination = match present(&self.to) {
            Some(to) => to
                .parse::<Pubkey>()
                .map_err(|_| ValidationError::InvalidDestination)?,
            None => defaults.destination,
        };

        let amount = match present(&self.amount) {
            Some(amount) => parse_amount(amount)?,
            None => defaults.amount,
        };

        let (repository, repository_supplied) = match present(&self.repo) {
            Some(repo) => (
                RepositoryRef::parse(repo).map_err(|_| ValidationError::InvalidRepository)?,
                true,
            ),
            None => (defaults.repository.clone(), false),
        };

        Ok(DonationRequest {
            destination,
            amount,
            repository,
            repository_supplied,
        })
    }
}

/// Parse a positive decimal amount. Plain (`12.5`) and scientific (`1e3`)
/// notation are accepted; anything with trailing garbage is not.
pub fn parse_amount(raw: &str) -> Result<Decimal, ValidationError> {
    let raw = raw.trim();
    let amount = Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| ValidationError::InvalidAmount)?;
    if amount <= Decimal::ZERO {
        return Err(ValidationError::InvalidAmount);
    }
    Ok(amount.normalize())
}

/// Parse the donor account from a POST body.
pub fn parse_account(raw: &str) -> Result<Pubkey, ValidationError> {
    raw.trim()
        .parse::<Pubkey>()
        .map_err(|_| ValidationError::InvalidAccount)
}
