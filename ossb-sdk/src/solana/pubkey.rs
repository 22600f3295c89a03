//! Solana public keys and blockhashes.
//!
//! Both are 32-byte values rendered as Base58 strings. A public key is a
//! raw Ed25519 point (no hashing step), while a program derived address is
//! a SHA-256 output that is deliberately *off* the curve.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use super::error::SolError;

/// Suffix appended to every program derived address preimage.
const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

/// Maximum number of seeds accepted by `create_program_address`.
pub const MAX_SEEDS: usize = 16;

/// Maximum length of a single seed.
pub const MAX_SEED_LEN: usize = 32;

/// A 32-byte Solana account address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Pubkey([u8; 32]);

impl Pubkey {
    pub const fn new_from_array(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub const fn to_bytes(self) -> [u8; 32] {
        self.0
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Whether the bytes decompress to a point on the Ed25519 curve.
    ///
    /// Wallet addresses are on the curve; program derived addresses never are.
    pub fn is_on_curve(&self) -> bool {
        curve25519_dalek::edwards::CompressedEdwardsY(self.0)
            .decompress()
            .is_some()
    }

    /// Derive a program address from `seeds || bump || program_id || marker`.
    ///
    /// Returns `None` when the hash lands on the curve, in which case the
    /// caller must try another bump.
    pub fn create_program_address(seeds: &[&[u8]], program_id: &Pubkey) -> Option<Pubkey> {
        if seeds.len() > MAX_SEEDS || seeds.iter().any(|s| s.len() > MAX_SEED_LEN) {
            return None;
        }

        let mut hasher = Sha256::new();
        for seed in seeds {
            hasher.update(seed);
        }
        hasher.update(program_id.as_bytes());
        hasher.update(PDA_MARKER);

        let candidate = Pubkey(hasher.finalize().into());
        if candidate.is_on_curve() {
            return None;
        }
        Some(candidate)
    }

    /// Find the canonical program derived address for `seeds`.
    ///
    /// Bumps are tried from 255 down to 0; the first off-curve result wins,
    /// which makes the derivation deterministic for a given input.
    pub fn find_program_address(
        seeds: &[&[u8]],
        program_id: &Pubkey,
    ) -> Result<(Pubkey, u8), SolError> {
        if seeds.len() >= MAX_SEEDS {
            return Err(SolError::InvalidAddress("too many seeds".into()));
        }

        for bump in (0u8..=u8::MAX).rev() {
            let bump_seed = [bump];
            let mut with_bump: Vec<&[u8]> = seeds.to_vec();
            with_bump.push(&bump_seed);
            if let Some(address) = Self::create_program_address(&with_bump, program_id) {
                return Ok((address, bump));
            }
        }

        Err(SolError::InvalidAddress(
            "could not find a valid bump seed".into(),
        ))
    }
}

fn decode_32(s: &str) -> Result<[u8; 32], String> {
    let bytes = bs58::decode(s)
        .into_vec()
        .map_err(|e| format!("base58 decode failed: {e}"))?;
    bytes
        .try_into()
        .map_err(|v: Vec<u8>| format!("expected 32 bytes, got {}", v.len()))
}

impl FromStr for Pubkey {
    type Err = SolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // 32 bytes never encode to more than 44 Base58 characters.
        if s.len() > 44 {
            return Err(SolError::InvalidAddress(format!(
                "address too long: {} characters",
                s.len()
            )));
        }
        decode_32(s).map(Pubkey).map_err(SolError::InvalidAddress)
    }
}

impl fmt::Display for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bs58::encode(self.0).into_string())
    }
}

impl fmt::Debug for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pubkey({self})")
    }
}

impl From<[u8; 32]> for Pubkey {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl Serialize for Pubkey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Pubkey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A recent blockhash, stamped on a transaction to bound its lifetime.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Hash([u8; 32]);

impl Hash {
    pub const fn new_from_array(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl FromStr for Hash {
    type Err = SolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_32(s).map(Hash).map_err(SolError::InvalidHash)
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bs58::encode(self.0).into_string())
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({self})")
    }
}
