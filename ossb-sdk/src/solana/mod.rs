//! Minimal Solana primitives for building unsigned SPL token transfers.
//!
//! Addresses, program derived addresses, the two SPL instructions a
//! donation needs and the legacy message wire format are implemented
//! directly on top of `sha2`, `curve25519-dalek` and `bs58`.

pub mod error;
pub mod pubkey;
pub mod spl_token;
pub mod transaction;

pub use error::SolError;
pub use pubkey::{Hash, Pubkey};
pub use transaction::{AccountMeta, Instruction, Message, UnsignedTransaction};
