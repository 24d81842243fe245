//! Node existence lookups over JSON-RPC
//!
//! One `eth_getTransactionByHash` call per reference. Failing to reach the
//! node is fatal and surfaces as [`NodeError`]; anything the node does say
//! is classified into a [`LookupOutcome`].

use crate::config::VerifierConfig;
use crate::error::NodeError;
use crate::types::{LookupOutcome, NodeLookupResponse, NodeTransaction};
use anyhow::{Context, Result};
use reqwest::{Client, Url};
use serde_json::Value;
use std::future::Future;

pub const LOOKUP_METHOD: &str = "eth_getTransactionByHash";
/// Every lookup uses the same request id
pub const REQUEST_ID: u64 = 0;

/// Existence check for a transaction hash
pub trait TransactionLookup {
    fn lookup(
        &self,
        hash: &str,
    ) -> impl Future<Output = Result<LookupOutcome, NodeError>> + Send;
}

/// JSON-RPC client for the node under verification
pub struct NodeClient {
    client: Client,
    url: Url,
}

impl NodeClient {
    /// Create a client from the run configuration
    pub fn new(config: &VerifierConfig) -> Result<Self> {
        let url = Url::parse(&config.node_url)
            .with_context(|| format!("Invalid node URL: {}", config.node_url))?;
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to create node HTTP client")?;

        Ok(Self { client, url })
    }

    fn unreachable(&self, hash: &str, source: reqwest::Error) -> NodeError {
        NodeError::Unreachable {
            url: self.url.to_string(),
            hash: hash.to_string(),
            source: Box::new(source),
        }
    }
}

impl TransactionLookup for NodeClient {
    async fn lookup(&self, hash: &str) -> Result<LookupOutcome, NodeError> {
        let response = self
            .client
            .post(self.url.clone())
            .json(&lookup_request(hash))
            .send()
            .await
            .map_err(|e| self.unreachable(hash, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.unreachable(hash, e))?;

        if !status.is_success() {
            return Ok(LookupOutcome::Unknown {
                reason: format!("HTTP {}: {}", status, body.trim()),
            });
        }

        Ok(classify_response(&body))
    }
}

/// Request body for one lookup
pub fn lookup_request(hash: &str) -> serde_json::Value {
    serde_json::json!({
        "jsonrpc": "2.0",
        "method": LOOKUP_METHOD,
        "params": [hash],
        "id": REQUEST_ID
    })
}

/// Classify a node response body.
///
/// `Missing` requires a well-formed envelope with no `error` and a null or
/// absent `result`. A body that doesn't decode, a `result` that isn't a
/// transaction object, or an RPC error are `Unknown`.
pub fn classify_response(body: &str) -> LookupOutcome {
    let response: NodeLookupResponse = match serde_json::from_str(body) {
        Ok(r) => r,
        Err(e) => {
            return LookupOutcome::Unknown {
                reason: format!("cannot decode response: {}", e),
            }
        }
    };

    if let Some(error) = response.error {
        return LookupOutcome::Unknown {
            reason: format!("RPC error: {}", error),
        };
    }

    match response.result {
        None | Some(Value::Null) => LookupOutcome::Missing,
        Some(result @ Value::Object(_)) => match serde_json::from_value::<NodeTransaction>(result) {
            Ok(_) => LookupOutcome::Found,
            Err(e) => LookupOutcome::Unknown {
                reason: format!("malformed transaction object: {}", e),
            },
        },
        Some(other) => LookupOutcome::Unknown {
            reason: format!("result is not a transaction object: {}", other),
        },
    }
}
