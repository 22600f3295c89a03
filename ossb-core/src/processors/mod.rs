//! Request processors of the donate action.
//!
//! - `DescribeDonation`: validated query → `ActionGetResponse`
//! - `BuildDonationTransaction`: validated query + donor → `ActionPostResponse`

pub mod action_metadata;
pub mod transaction_builder;

pub use action_metadata::{DescribeDonation, PRESET_AMOUNTS, action_metadata};
pub use transaction_builder::{BuildDonationTransaction, DonationError};
