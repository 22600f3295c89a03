#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

pub mod config;
pub mod framework;
pub mod processors;
pub mod repository;
pub mod rpc;
pub mod utils;
pub mod validation;

#[cfg(test)]
mod testing;
