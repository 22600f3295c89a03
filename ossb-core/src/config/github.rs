//! GitHub REST API configuration.

use std::time::Duration;
use url::Url;

/// Settings for the repository metadata lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubConfig {
    /// API root, `https://api.github.com` unless pointed at a mirror.
    pub api_base: Url,
    /// GitHub rejects requests without a `User-Agent`.
    pub user_agent: String,
    /// Per-request timeout; `None` keeps the client default.
    pub timeout: Option<Duration>,
}
