//! Typed client for the donate action (Blink client → OSS Blinks server).

use reqwest::Client;
use url::Url;

use super::ClientError;
use crate::objects::{ActionGetResponse, ActionPostRequest, ActionPostResponse};

/// Default path of the donate action on an OSS Blinks server.
pub const DEFAULT_ACTION_PATH: &str = "/api/actions/donate";

/// Typed HTTP client for the donate **action endpoint**.
///
/// Mirrors what a Blink client does: fetch the metadata document, then post
/// the donor account to get an unsigned transaction back.
#[derive(Debug, Clone)]
pub struct ActionsClient {
    http: Client,
    endpoint: Url,
}

impl ActionsClient {
    /// Create a new `ActionsClient`.
    ///
    /// * `base_url` – root URL of the server (e.g. `https://blinks.example`).
    pub fn new(base_url: Url) -> Result<Self, ClientError> {
        Ok(Self {
            http: Client::new(),
            endpoint: base_url.join(DEFAULT_ACTION_PATH)?,
        })
    }

    /// Point the client at a non-default action path.
    pub fn with_action_path(mut self, path: &str) -> Result<Self, ClientError> {
        self.endpoint = self.endpoint.join(path)?;
        Ok(self)
    }

    /// Replace the default `reqwest::Client` with a custom one (e.g. to
    /// configure timeouts or a proxy).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    fn url(&self, to: Option<&str>, repo: Option<&str>, amount: Option<&str>) -> Url {
        let mut url = self.endpoint.clone();
        let pairs = [("to", to), ("repo", repo), ("amount", amount)];
        if pairs.iter().any(|(_, v)| v.is_some()) {
            let mut query = url.query_pairs_mut();
            for (key, value) in pairs {
                if let Some(value) = value {
                    query.append_pair(key, value);
                }
            }
        }
        url
    }

    /// `GET {action}?to=&repo=` – fetch the action metadata document.
    pub async fn get_action(
        &self,
        to: Option<&str>,
        repo: Option<&str>,
    ) -> Result<ActionGetResponse, ClientError> {
        let resp = self.http.get(self.url(to, repo, None)).send().await?;
        parse_response(resp).await
    }

    /// `POST {action}?to=&repo=&amount=` – request an unsigned donation
    /// transaction paid by `account`.
    pub async fn post_action(
        &self,
        to: Option<&str>,
        repo: Option<&str>,
        amount: Option<&str>,
        account: &str,
    ) -> Result<ActionPostResponse, ClientError> {
        let body = ActionPostRequest {
            account: account.to_owned(),
        };
        let resp = self
            .http
            .post(self.url(to, repo, amount))
            .json(&body)
            .send()
            .await?;
        parse_response(resp).await
    }
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ClientError::Api { status, body });
    }
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(ClientError::Json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_query() {
        let client = ActionsClient::new(Url::parse("https://blinks.example").unwrap()).unwrap();
        let url = client.url(Some("abc"), Some("https://github.com/a/b"), Some("10"));
        assert_eq!(url.path(), "/api/actions/donate");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("to".to_owned(), "abc".to_owned()),
                ("repo".to_owned(), "https://github.com/a/b".to_owned()),
                ("amount".to_owned(), "10".to_owned()),
            ]
        );
    }

    #[test]
    fn no_query_when_empty() {
        let client = ActionsClient::new(Url::parse("https://blinks.example").unwrap()).unwrap();
        assert_eq!(client.url(None, None, None).query(), None);
    }
}
