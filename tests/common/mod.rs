//! Shared fixtures for integration tests
#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use statesync_verifier::node::classify_response;
use statesync_verifier::window::BlockWindow;
use statesync_verifier::{
    LookupOutcome, NodeError, RunReport, TransactionIndex, TransactionLookup, TransactionReference,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

pub const FOUND_BODY: &str = r#"{"jsonrpc":"2.0","id":0,"result":{"blockHash":"0x01","blockNumber":"0x2710","from":"0x0000000000000000000000000000000000000000","gas":"0x0","gasPrice":"0x0","hash":"0xAAA","input":"0x","nonce":"0x0","to":"0x0000000000000000000000000000000000000000","transactionIndex":"0x0","value":"0x0","type":"0x0","v":"0x0","r":"0x0","s":"0x0"}}"#;
pub const NULL_BODY: &str = r#"{"jsonrpc":"2.0","id":0,"result":null}"#;

pub fn tx(block: &str, hash: &str) -> TransactionReference {
    TransactionReference::new(block, hash)
}

pub fn report_in(dir: &std::path::Path) -> RunReport {
    let ts = Utc.with_ymd_and_hms(2022, 6, 1, 12, 0, 0).unwrap();
    RunReport::create(dir, &ts).unwrap()
}

/// Explorer stand-in serving canned windows and recording every query
#[derive(Default)]
pub struct FixtureIndex {
    pages: HashMap<(u64, u64), Vec<TransactionReference>>,
    calls: Mutex<Vec<BlockWindow>>,
}

impl FixtureIndex {
    pub fn with_window(mut self, start: u64, end: u64, txs: Vec<TransactionReference>) -> Self {
        self.pages.insert((start, end), txs);
        self
    }

    pub fn calls(&self) -> Vec<BlockWindow> {
        self.calls.lock().unwrap().clone()
    }
}

impl TransactionIndex for FixtureIndex {
    async fn fetch_window(&self, window: BlockWindow) -> Vec<TransactionReference> {
        self.calls.lock().unwrap().push(window);
        self.pages
            .get(&(window.start, window.end))
            .cloned()
            .unwrap_or_default()
    }
}

impl TransactionIndex for &FixtureIndex {
    async fn fetch_window(&self, window: BlockWindow) -> Vec<TransactionReference> {
        (**self).fetch_window(window).await
    }
}

#[derive(Clone)]
pub enum NodeReply {
    Body(&'static str),
    Unreachable,
}

/// Node stand-in answering by hash; unknown hashes are unreachable
#[derive(Default)]
pub struct FixtureNode {
    replies: HashMap<String, NodeReply>,
    calls: Mutex<Vec<String>>,
}

impl FixtureNode {
    pub fn with(mut self, hash: &str, reply: NodeReply) -> Self {
        self.replies.insert(hash.to_string(), reply);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl TransactionLookup for FixtureNode {
    async fn lookup(&self, hash: &str) -> Result<LookupOutcome, NodeError> {
        self.calls.lock().unwrap().push(hash.to_string());
        match self.replies.get(hash) {
            Some(NodeReply::Body(body)) => Ok(classify_response(body)),
            Some(NodeReply::Unreachable) | None => Err(NodeError::Unreachable {
                url: "http://fixture.invalid".to_string(),
                hash: hash.to_string(),
                source: Box::new(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "connection refused",
                )),
            }),
        }
    }
}

impl TransactionLookup for &FixtureNode {
    async fn lookup(&self, hash: &str) -> Result<LookupOutcome, NodeError> {
        (**self).lookup(hash).await
    }
}

/// A request as seen by the fixture server
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub head: String,
    pub body: String,
}

pub type Handler = dyn Fn(&SeenRequest) -> (u16, String) + Send + Sync;

/// Minimal HTTP/1.1 server: one request per connection, canned JSON replies
pub struct FixtureServer {
    pub addr: SocketAddr,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl FixtureServer {
    pub async fn start<F>(handler: F) -> Self
    where
        F: Fn(&SeenRequest) -> (u16, String) + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handler: Arc<Handler> = Arc::new(handler);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_by_server = seen.clone();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let handler = handler.clone();
                let seen = seen_by_server.clone();
                tokio::spawn(async move {
                    let request = read_request(&mut socket).await;
                    seen.lock().unwrap().push(request.clone());
                    let (status, payload) = handler(&request);
                    let response = format!(
                        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        status,
                        if status == 200 { "OK" } else { "Error" },
                        payload.len(),
                        payload
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        Self { addr, seen }
    }

    /// Accepts connections and never answers
    pub async fn silent() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });
        Self {
            addr,
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn seen(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }
}

/// URL of a port nothing listens on
pub fn closed_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

async fn read_request(socket: &mut TcpStream) -> SeenRequest {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos;
        }
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => {
                return SeenRequest {
                    head: String::from_utf8_lossy(&buf).into_owned(),
                    body: String::new(),
                }
            }
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).into_owned();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    let body_start = header_end + 4;
    while buf.len() < body_start + content_length {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
    let body_end = buf.len().min(body_start + content_length);

    SeenRequest {
        head,
        body: String::from_utf8_lossy(&buf[body_start..body_end]).into_owned(),
    }
}
