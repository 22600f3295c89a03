//! Solana JSON-RPC access.
//!
//! Only two calls are needed to build a donation: whether the destination's
//! token account exists, and a recent blockhash.

use async_trait::async_trait;
use ossb_sdk::solana::{Hash, Pubkey};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::config::{ChainConfig, Commitment};

/// Errors that can occur talking to the RPC node.
#[derive(Debug, Error)]
pub enum RpcError {
    /// Transport or HTTP-level failure
    #[error("RPC request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The node answered with a JSON-RPC error object
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// Neither `result` nor `error` was present
    #[error("RPC response has no result")]
    MissingResult,

    /// The result could not be interpreted
    #[error("RPC response parsing error: {0}")]
    Parse(String),
}

/// Read access to the chain.
#[async_trait]
pub trait ChainRpc: Send + Sync {
    /// Whether an account is allocated at `address`.
    async fn account_exists(&self, address: &Pubkey) -> Result<bool, RpcError>;

    /// The most recent blockhash at the configured commitment.
    async fn latest_blockhash(&self) -> Result<Hash, RpcError>;
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<JsonRpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcErrorObject {
    code: i64,
    message: String,
}

/// Results of both calls are wrapped in `{ context, value }`.
#[derive(Debug, Deserialize)]
struct WithContext<T> {
    value: T,
}

#[derive(Debug, Deserialize)]
struct BlockhashValue {
    blockhash: String,
}

impl<T> JsonRpcResponse<T> {
    fn into_result(self) -> Result<T, RpcError> {
        if let Some(error) = self.error {
            return Err(RpcError::Rpc {
                code: error.code,
                message: error.message,
            });
        }
        self.result.ok_or(RpcError::MissingResult)
    }
}

/// JSON-RPC 2.0 client over HTTP.
pub struct JsonRpcClient {
    endpoint: Url,
    commitment: Commitment,
    http_client: reqwest::Client,
}

impl JsonRpcClient {
    pub fn new(config: &ChainConfig) -> Self {
        Self {
            endpoint: config.rpc_url.clone(),
            commitment: config.commitment,
            http_client: reqwest::Client::new(),
        }
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T, RpcError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });
        let response = self
            .http_client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await?;
        let response: JsonRpcResponse<T> = response.json().await?;
        response.into_result()
    }
}

#[async_trait]
impl ChainRpc for JsonRpcClient {
    #[tracing::instrument(skip_all, err, name = "RPC:getAccountInfo", fields(address = %address))]
    async fn account_exists(&self, address: &Pubkey) -> Result<bool, RpcError> {
        let result: WithContext<Option<Value>> = self
            .call(
                "getAccountInfo",
                json!([
                    address.to_string(),
                    { "encoding": "base64", "commitment": self.commitment.as_str() },
                ]),
            )
            .await?;
        let exists = result.value.is_some();
        debug!(exists, "Fetched account info");
        Ok(exists)
    }

    #[tracing::instrument(skip_all, err, name = "RPC:getLatestBlockhash")]
    async fn latest_blockhash(&self) -> Result<Hash, RpcError> {
        let result: WithContext<BlockhashValue> = self
            .call(
                "getLatestBlockhash",
                json!([{ "commitment": self.commitment.as_str() }]),
            )
            .await?;
        result
            .value
            .blockhash
            .parse()
            .map_err(|e| RpcError::Parse(format!("invalid blockhash: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::serve_once;

    #[test]
    fn missing_account_is_null_value() {
        let body = r#"{"jsonrpc":"2.0","result":{"context":{"slot":1},"value":null},"id":1}"#;
        let response: JsonRpcResponse<WithContext<Option<Value>>> =
            serde_json::from_str(body).unwrap();
        assert!(response.into_result().unwrap().value.is_none());
    }

    #[test]
    fn existing_account_has_value() {
        let body = r#"{"jsonrpc":"2.0","result":{"context":{"slot":1},"value":{"data":["","base64"],"executable":false,"lamports":2039280,"owner":"TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA","rentEpoch":0}},"id":1}"#;
        let response: JsonRpcResponse<WithContext<Option<Value>>> =
            serde_json::from_str(body).unwrap();
        assert!(response.into_result().unwrap().value.is_some());
    }

    #[test]
    fn error_object_becomes_rpc_error() {
        let body = r#"{"jsonrpc":"2.0","error":{"code":-32602,"message":"Invalid param"},"id":1}"#;
        let response: JsonRpcResponse<WithContext<BlockhashValue>> =
            serde_json::from_str(body).unwrap();
        match response.into_result() {
            Err(RpcError::Rpc { code, message }) => {
                assert_eq!(code, -32602);
                assert_eq!(message, "Invalid param");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn empty_response_is_missing_result() {
        let response: JsonRpcResponse<WithContext<BlockhashValue>> =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":1}"#).unwrap();
        assert!(matches!(response.into_result(), Err(RpcError::MissingResult)));
    }

    fn local_client(rpc_url: Url, commitment: Commitment) -> JsonRpcClient {
        JsonRpcClient::new(&ChainConfig {
            cluster: ossb_sdk::objects::Cluster::Devnet,
            rpc_url,
            commitment,
        })
    }

    #[tokio::test]
    async fn account_info_request_and_missing_account() {
        let (rpc_url, request) = serve_once(
            "200 OK",
            r#"{"jsonrpc":"2.0","result":{"context":{"slot":1},"value":null},"id":1}"#,
        )
        .await;
        let address: Pubkey = "2grKcZPjxKbNKkc8S6nmrSXtXTXJih4utVMa7jBwRcFf".parse().unwrap();
        let client = local_client(rpc_url, Commitment::Finalized);
        assert!(!client.account_exists(&address).await.unwrap());

        let body = request.await.unwrap().json();
        assert_eq!(body["jsonrpc"], "2.0");
        assert_eq!(body["method"], "getAccountInfo");
        assert_eq!(
            body["params"],
            json!([
                "2grKcZPjxKbNKkc8S6nmrSXtXTXJih4utVMa7jBwRcFf",
                { "encoding": "base64", "commitment": "finalized" },
            ])
        );
    }

    #[tokio::test]
    async fn allocated_account_exists() {
        let (rpc_url, _request) = serve_once(
            "200 OK",
            r#"{"jsonrpc":"2.0","result":{"context":{"slot":1},"value":{"data":["","base64"],"executable":false,"lamports":2039280,"owner":"TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA","rentEpoch":0}},"id":1}"#,
        )
        .await;
        let client = local_client(rpc_url, Commitment::Confirmed);
        assert!(client.account_exists(&Pubkey::default()).await.unwrap());
    }

    #[tokio::test]
    async fn latest_blockhash_request_and_result() {
        let blockhash = Hash::new_from_array([9u8; 32]).to_string();
        let (rpc_url, request) = serve_once(
            "200 OK",
            &format!(
                r#"{{"jsonrpc":"2.0","result":{{"context":{{"slot":1}},"value":{{"blockhash":"{blockhash}","lastValidBlockHeight":3}}}},"id":1}}"#
            ),
        )
        .await;
        let client = local_client(rpc_url, Commitment::Confirmed);
        assert_eq!(
            client.latest_blockhash().await.unwrap(),
            Hash::new_from_array([9u8; 32])
        );

        let body = request.await.unwrap().json();
        assert_eq!(body["method"], "getLatestBlockhash");
        assert_eq!(body["params"], json!([{ "commitment": "confirmed" }]));
    }

    #[tokio::test]
    async fn malformed_blockhash_is_parse_error() {
        let (rpc_url, _request) = serve_once(
            "200 OK",
            r#"{"jsonrpc":"2.0","result":{"context":{"slot":1},"value":{"blockhash":"0OIl"}},"id":1}"#,
        )
        .await;
        let client = local_client(rpc_url, Commitment::Confirmed);
        assert!(matches!(
            client.latest_blockhash().await,
            Err(RpcError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn unreachable_node_is_request_error() {
        let client = JsonRpcClient::new(&ChainConfig {
            cluster: ossb_sdk::objects::Cluster::Devnet,
            rpc_url: Url::parse("http://127.0.0.1:9").unwrap(),
            commitment: Commitment::Confirmed,
        });
        assert!(matches!(
            client.latest_blockhash().await,
            Err(RpcError::Request(_))
        ));
    }
}
