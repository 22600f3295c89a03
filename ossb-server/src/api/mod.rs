//! HTTP API handlers.

pub mod actions;
