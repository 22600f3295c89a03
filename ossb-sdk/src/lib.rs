//! OSS Blinks SDK
//!
//! Shared types for the OSS Blinks donation action: Solana Actions
//! documents, the Solana primitives needed to assemble an unsigned SPL
//! token transfer, and helpers for building action and share URLs.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

#[cfg(feature = "client")]
pub mod client;
pub mod links;
pub mod objects;
pub mod solana;
