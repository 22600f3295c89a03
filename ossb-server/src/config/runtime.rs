//! Runtime configuration re-exports and utilities.
//!
//! The action config types are defined in `ossb-core::config`. This module
//! re-exports them and adds the few settings only the server needs.

pub use ossb_core::config::{
    ActionConfig, ChainConfig, DonationDefaults, GithubConfig, TokenConfig,
};

use std::net::SocketAddr;

/// Server settings that cannot change while running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub listen: SocketAddr,
}
