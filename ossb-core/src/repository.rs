//! Repository references and best-effort metadata lookup.
//!
//! A donation targets a GitHub repository. The repository's avatar and
//! description decorate the Blink but are never required: every failure of
//! the lookup folds into [`RepositoryLookup::Unavailable`].

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::config::GithubConfig;

/// The only code-hosting domain donations can target.
pub const GITHUB_HOST: &str = "github.com";

/// A validated `https://github.com/{owner}/{name}` URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryRef {
    /// The URL as supplied (trimmed), echoed back in titles and hrefs.
    pub url: String,
    pub owner: String,
    pub name: String,
}

/// Why a repository URL was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryUrlError {
    #[error("not a URL: {0}")]
    Malformed(#[from] url::ParseError),
    #[error("scheme must be https")]
    Scheme,
    #[error("host must be github.com")]
    Host,
    #[error("path must contain an owner and a repository")]
    Path,
}

impl RepositoryRef {
    /// Parse a repository URL.
    ///
    /// Extra path segments (`/tree/main`, `/issues`) are allowed and ignored;
    /// a trailing `.git` on the repository name is stripped.
    pub fn parse(input: &str) -> Result<Self, RepositoryUrlError> {
        let trimmed = input.trim();
        let url = Url::parse(trimmed)?;
        if url.scheme() != "https" {
            return Err(RepositoryUrlError::Scheme);
        }
        if url.host_str() != Some(GITHUB_HOST) {
            return Err(RepositoryUrlError::Host);
        }

        let mut segments = url
            .path_segments()
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty());
        let (Some(owner), Some(name)) = (segments.next(), segments.next()) else {
            return Err(RepositoryUrlError::Path);
        };
        let name = name.strip_suffix(".git").unwrap_or(name);
        if name.is_empty() {
            return Err(RepositoryUrlError::Path);
        }

        Ok(Self {
            url: trimmed.to_owned(),
            owner: owner.to_owned(),
            name: name.to_owned(),
        })
    }

    /// `owner/name`, as GitHub displays it.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// Repository details shown on the Blink.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryMetadata {
    /// `owner/name` as GitHub reports it.
    pub display_name: String,
    pub avatar_url: String,
    pub description: String,
}

/// Outcome of a best-effort lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryLookup {
    Found(RepositoryMetadata),
    /// The lookup failed for any reason; callers fall back to empty values.
    Unavailable,
}

impl RepositoryLookup {
    /// Fold into metadata, using empty strings when unavailable.
    pub fn unwrap_or_empty(self) -> RepositoryMetadata {
        match self {
            RepositoryLookup::Found(metadata) => metadata,
            RepositoryLookup::Unavailable => RepositoryMetadata::default(),
        }
    }
}

/// Source of repository metadata.
///
/// Implementations must never fail the caller: errors are reported as
/// [`RepositoryLookup::Unavailable`].
#[async_trait]
pub trait RepositoryApi: Send + Sync {
    async fn lookup(&self, repository: &RepositoryRef) -> RepositoryLookup;
}

/// Errors of a single GitHub request. Never leave this module.
#[derive(Debug, Error)]
enum GithubError {
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),
}

/// Subset of `GET /repos/{owner}/{repo}` we care about.
#[derive(Debug, serde::Deserialize)]
struct GithubRepository {
    full_name: String,
    description: Option<String>,
    owner: GithubOwner,
}

#[derive(Debug, serde::Deserialize)]
struct GithubOwner {
    avatar_url: String,
}

/// Unauthenticated GitHub REST API client.
pub struct GithubClient {
    api_base: Url,
    user_agent: String,
    http_client: reqwest::Client,
}

impl GithubClient {
    /// Create a client from its configuration.
    pub fn new(config: &GithubConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            api_base: config.api_base.clone(),
            user_agent: config.user_agent.clone(),
            http_client: builder.build()?,
        })
    }

    fn repository_url(&self, repository: &RepositoryRef) -> Result<Url, url::ParseError> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(["repos", repository.owner.as_str(), repository.name.as_str()]);
        Ok(url)
    }

    async fn fetch(&self, repository: &RepositoryRef) -> Result<RepositoryMetadata, GithubError> {
        let url = self.repository_url(repository)?;
        let response = self
            .http_client
            .get(url)
            .header(reqwest::header::USER_AGENT, self.user_agent.as_str())
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GithubError::Status(status));
        }

        let repo: GithubRepository = response.json().await?;
        Ok(RepositoryMetadata {
            display_name: repo.full_name,
            avatar_url: repo.owner.avatar_url,
            description: repo.description.unwrap_or_default(),
        })
    }
}

#[async_trait]
impl RepositoryApi for GithubClient {
    #[tracing::instrument(skip_all, name = "GitHub:GetRepository", fields(repo = %repository.full_name()))]
    async fn lookup(&self, repository: &RepositoryRef) -> RepositoryLookup {
        match self.fetch(repository).await {
            Ok(metadata) => {
                debug!(name = %metadata.display_name, "Fetched repository metadata");
                RepositoryLookup::Found(metadata)
            }
            Err(e) => {
                warn!(error = %e, "Repository metadata unavailable");
                RepositoryLookup::Unavailable
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::serve_once;

    #[test]
    fn parses_repository_url() {
        let repo = RepositoryRef::parse(" https://github.com/0xnetero/oss-blinks ").unwrap();
        assert_eq!(repo.url, "https://github.com/0xnetero/oss-blinks");
        assert_eq!(repo.owner, "0xnetero");
        assert_eq!(repo.name, "oss-blinks");
        assert_eq!(repo.full_name(), "0xnetero/oss-blinks");
    }

    #[test]
    fn ignores_extra_segments_and_git_suffix() {
        let repo = RepositoryRef::parse("https://github.com/rust-lang/rust.git").unwrap();
        assert_eq!(repo.name, "rust");
        let repo = RepositoryRef::parse("https://github.com/rust-lang/rust/tree/master").unwrap();
        assert_eq!(repo.full_name(), "rust-lang/rust");
    }

    #[test]
    fn rejects_non_github_urls() {
        assert_eq!(
            RepositoryRef::parse("https://gitlab.com/a/b"),
            Err(RepositoryUrlError::Host)
        );
        assert_eq!(
            RepositoryRef::parse("http://github.com/a/b"),
            Err(RepositoryUrlError::Scheme)
        );
        assert!(matches!(
            RepositoryRef::parse("github.com/a/b"),
            Err(RepositoryUrlError::Malformed(_))
        ));
    }

    #[test]
    fn rejects_missing_repository_segment() {
        assert_eq!(
            RepositoryRef::parse("https://github.com/only-owner"),
            Err(RepositoryUrlError::Path)
        );
        assert_eq!(
            RepositoryRef::parse("https://github.com/"),
            Err(RepositoryUrlError::Path)
        );
        assert_eq!(
            RepositoryRef::parse("https://github.com/a/.git"),
            Err(RepositoryUrlError::Path)
        );
    }

    #[test]
    fn unavailable_folds_to_empty() {
        assert_eq!(
            RepositoryLookup::Unavailable.unwrap_or_empty(),
            RepositoryMetadata::default()
        );
    }

    #[test]
    fn builds_api_url() {
        let client = GithubClient::new(&GithubConfig {
            api_base: Url::parse("https://api.github.com").unwrap(),
            user_agent: "test".into(),
            timeout: None,
        })
        .unwrap();
        let repo = RepositoryRef::parse("https://github.com/0xnetero/oss-blinks").unwrap();
        assert_eq!(
            client.repository_url(&repo).unwrap().as_str(),
            "https://api.github.com/repos/0xnetero/oss-blinks"
        );
    }

    #[tokio::test]
    async fn network_failure_is_unavailable() {
        // Nothing listens on the discard port.
        let client = GithubClient::new(&GithubConfig {
            api_base: Url::parse("http://127.0.0.1:9").unwrap(),
            user_agent: "test".into(),
            timeout: Some(std::time::Duration::from_secs(2)),
        })
        .unwrap();
        let repo = RepositoryRef::parse("https://github.com/a/b").unwrap();
        assert_eq!(client.lookup(&repo).await, RepositoryLookup::Unavailable);
    }

    fn local_client(api_base: Url) -> GithubClient {
        GithubClient::new(&GithubConfig {
            api_base,
            user_agent: "ossb-test/1.0".into(),
            timeout: Some(std::time::Duration::from_secs(5)),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn found_repository_sends_headers() {
        let (api_base, request) = serve_once(
            "200 OK",
            r#"{"full_name":"rust-lang/rust","description":"Empowering everyone",
                "owner":{"avatar_url":"https://avatars.example/u/5430905"}}"#,
        )
        .await;
        let repo = RepositoryRef::parse("https://github.com/rust-lang/rust").unwrap();
        let lookup = local_client(api_base).lookup(&repo).await;
        assert_eq!(
            lookup,
            RepositoryLookup::Found(RepositoryMetadata {
                display_name: "rust-lang/rust".into(),
                avatar_url: "https://avatars.example/u/5430905".into(),
                description: "Empowering everyone".into(),
            })
        );

        let request = request.await.unwrap();
        assert!(request.head.starts_with("get /repos/rust-lang/rust "));
        assert_eq!(request.header("user-agent"), Some("ossb-test/1.0"));
        assert_eq!(request.header("accept"), Some("application/vnd.github+json"));
    }

    #[tokio::test]
    async fn error_status_is_unavailable() {
        let (api_base, request) =
            serve_once("404 Not Found", r#"{"message":"Not Found"}"#).await;
        let repo = RepositoryRef::parse("https://github.com/a/missing").unwrap();
        assert_eq!(
            local_client(api_base).lookup(&repo).await,
            RepositoryLookup::Unavailable
        );
        assert_eq!(request.await.unwrap().header("user-agent"), Some("ossb-test/1.0"));
    }

    #[tokio::test]
    async fn malformed_body_is_unavailable() {
        let (api_base, _request) = serve_once("200 OK", "<html>rate limited</html>").await;
        let repo = RepositoryRef::parse("https://github.com/a/b").unwrap();
        assert_eq!(
            local_client(api_base).lookup(&repo).await,
            RepositoryLookup::Unavailable
        );
    }

    #[test]
    fn parses_api_response() {
        let body = r#"{
            "full_name": "0xnetero/oss-blinks",
            "description": null,
            "owner": { "login": "0xnetero", "avatar_url": "https://avatars.example/u/1" },
            "stargazers_count": 3
        }"#;
        let repo: GithubRepository = serde_json::from_str(body).unwrap();
        assert_eq!(repo.full_name, "0xnetero/oss-blinks");
        assert_eq!(repo.owner.avatar_url, "https://avatars.example/u/1");
        assert!(repo.description.is_none());
    }
}
