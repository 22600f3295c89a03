//! In-memory stand-ins for the chain and GitHub, counting their calls, and
//! a one-shot HTTP listener for exercising the real clients.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ossb_sdk::solana::{Hash, Pubkey};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use url::Url;

use crate::config::test_config::action_config;
use crate::framework::ActionProcessor;
use crate::repository::{RepositoryApi, RepositoryLookup, RepositoryMetadata, RepositoryRef};
use crate::rpc::{ChainRpc, RpcError};

#[derive(Default)]
struct RpcState {
    account_calls: AtomicUsize,
    blockhash_calls: AtomicUsize,
    queried: Mutex<Vec<Pubkey>>,
}

#[derive(Clone, Default)]
pub struct FakeRpc {
    account_exists: bool,
    fail: bool,
    state: Arc<RpcState>,
}

impl FakeRpc {
    pub const BLOCKHASH: Hash = Hash::new_from_array([7u8; 32]);

    pub fn with_existing_account(exists: bool) -> Self {
        Self {
            account_exists: exists,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn account_calls(&self) -> usize {
        self.state.account_calls.load(Ordering::SeqCst)
    }

    pub fn blockhash_calls(&self) -> usize {
        self.state.blockhash_calls.load(Ordering::SeqCst)
    }

    pub fn queried_accounts(&self) -> Vec<Pubkey> {
        self.state.queried.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChainRpc for FakeRpc {
    async fn account_exists(&self, address: &Pubkey) -> Result<bool, RpcError> {
        self.state.account_calls.fetch_add(1, Ordering::SeqCst);
        self.state.queried.lock().unwrap().push(*address);
        if self.fail {
            return Err(RpcError::MissingResult);
        }
        Ok(self.account_exists)
    }

    async fn latest_blockhash(&self) -> Result<Hash, RpcError> {
        self.state.blockhash_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(RpcError::MissingResult);
        }
        Ok(Self::BLOCKHASH)
    }
}

#[derive(Clone)]
pub struct FakeRepositories {
    lookup: RepositoryLookup,
    calls: Arc<AtomicUsize>,
}

impl FakeRepositories {
    pub fn found(avatar_url: &str, description: &str) -> Self {
        Self {
            lookup: RepositoryLookup::Found(RepositoryMetadata {
                display_name: "fake/repository".into(),
                avatar_url: avatar_url.into(),
                description: description.into(),
            }),
            calls: Arc::default(),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            lookup: RepositoryLookup::Unavailable,
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RepositoryApi for FakeRepositories {
    async fn lookup(&self, _repository: &RepositoryRef) -> RepositoryLookup {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.lookup.clone()
    }
}

/// A processor over the devnet test configuration.
pub fn processor(rpc: FakeRpc, repositories: FakeRepositories) -> ActionProcessor {
    ActionProcessor {
        config: action_config(),
        rpc: Arc::new(rpc),
        repositories: Arc::new(repositories),
    }
}

/// A request captured by [`serve_once`].
#[derive(Debug)]
pub struct CapturedRequest {
    /// Request line and headers, lowercased.
    pub head: String,
    pub body: String,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        let prefix = format!("{}:", name.to_ascii_lowercase());
        self.head
            .lines()
            .find_map(|line| line.strip_prefix(prefix.as_str()))
            .map(str::trim)
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

/// Answer exactly one HTTP request on a loopback port with `status` and
/// `body`. The handle resolves to the request that was received.
pub async fn serve_once(status: &str, body: &str) -> (Url, JoinHandle<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = Url::parse(&format!("http://{}/", listener.local_addr().unwrap())).unwrap();
    let response = format!(
        "HTTP/1.1 {status}\r\ncontent-type: application/json\r\n\
         content-length: {}\r\nconnection: close\r\n\r\n{body}",
        body.len()
    );

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        request
    });
    (url, handle)
}

async fn read_request(socket: &mut TcpStream) -> CapturedRequest {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
            continue;
        };
        let head = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
        let length = head
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);
        if buf.len() >= end + 4 + length {
            return CapturedRequest {
                head,
                body: String::from_utf8_lossy(&buf[end + 4..end + 4 + length]).into_owned(),
            };
        }
    }
    CapturedRequest {
        head: String::from_utf8_lossy(&buf).to_ascii_lowercase(),
        body: String::new(),
    }
}
