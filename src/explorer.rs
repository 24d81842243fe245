//! Explorer range fetcher
//!
//! Lists the sentinel address's transactions for one block window. Every
//! fault here is absorbed: no response, a bad status, or an undecodable body
//! degrade the window to whatever records can be recovered (often none) and
//! the run moves on.

use crate::config::VerifierConfig;
use crate::types::{ExplorerPage, ExplorerTx, TransactionReference};
use crate::window::BlockWindow;
use anyhow::{Context, Result};
use reqwest::{Client, Url};
use serde_json::Value;
use std::future::Future;

/// Source of transaction references for a block window.
///
/// Implementations never fail; a window that cannot be fetched is empty.
pub trait TransactionIndex {
    fn fetch_window(
        &self,
        window: BlockWindow,
    ) -> impl Future<Output = Vec<TransactionReference>> + Send;
}

/// Etherscan-style `txlist` client
pub struct ExplorerClient {
    client: Client,
    base: Url,
    address: String,
    page_cap: usize,
}

impl ExplorerClient {
    /// Create a client from the run configuration
    pub fn new(config: &VerifierConfig) -> Result<Self> {
        let base = Url::parse(&config.explorer_url)
            .with_context(|| format!("Invalid explorer URL: {}", config.explorer_url))?;
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to create explorer HTTP client")?;

        Ok(Self {
            client,
            base,
            address: config.address.clone(),
            page_cap: config.page_cap,
        })
    }

    /// Query URL for one window, sorted ascending by block number
    pub fn window_url(&self, window: BlockWindow) -> Url {
        let mut url = self.base.clone();
        url.query_pairs_mut()
            .append_pair("module", "account")
            .append_pair("action", "txlist")
            .append_pair("address", &self.address)
            .append_pair("startblock", &window.start.to_string())
            .append_pair("endblock", &window.end.to_string())
            .append_pair("sort", "asc");
        url
    }

    /// Fetch and decode one window, best-effort
    pub async fn fetch_page(&self, window: BlockWindow) -> ExplorerPage {
        let url = self.window_url(window);
        println!("Fetching data from {}", url);

        let response = match self.client.get(url).send().await {
            Ok(r) => r,
            Err(e) => {
                eprintln!("   ⚠️  Explorer: no response for window {}: {}", window, e);
                return ExplorerPage::default();
            }
        };

        let status = response.status();
        if !status.is_success() {
            eprintln!("   ⚠️  Explorer returned HTTP {} for window {}", status, window);
        }

        let body = match response.text().await {
            Ok(b) => b,
            Err(e) => {
                eprintln!("   ⚠️  Explorer: failed to read body for window {}: {}", window, e);
                return ExplorerPage::default();
            }
        };

        let page = match decode_page(&body) {
            Ok(page) => page,
            Err(e) => {
                eprintln!("   ⚠️  Explorer: cannot decode JSON for window {}: {}", window, e);
                eprintln!("{}", body);
                salvage_page(&body)
            }
        };

        if page.status == "0" && !page.message.is_empty() {
            println!("   Explorer says: {}", page.message);
        }
        println!("Got records: {}", page.len());
        if self.page_cap > 0 && page.len() >= self.page_cap {
            eprintln!(
                "   ⚠️  Window {} hit the explorer page cap ({} records), results may be truncated",
                window, self.page_cap
            );
        }

        page
    }
}

impl TransactionIndex for ExplorerClient {
    async fn fetch_window(&self, window: BlockWindow) -> Vec<TransactionReference> {
        self.fetch_page(window).await.references()
    }
}

/// Strict decode of a `txlist` body
pub fn decode_page(body: &str) -> serde_json::Result<ExplorerPage> {
    serde_json::from_str(body)
}

/// Recover what can be recovered from a body that failed strict decoding.
///
/// Keeps `status`/`message` when they are strings and every `result` entry
/// with a non-empty string `hash` and a string (or absent) `blockNumber`,
/// the same records strict decoding would project. Anything else,
/// including a non-array `result` such as a rate-limit notice, contributes
/// nothing.
pub fn salvage_page(body: &str) -> ExplorerPage {
    let value: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(_) => return ExplorerPage::default(),
    };

    let text = |key: &str| {
        value
            .get(key)
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string()
    };
    let status = text("status");
    let mut message = text("message");

    let result = match value.get("result") {
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(|entry| {
                let block_number = match entry.get("blockNumber") {
                    None => "",
                    Some(v) => v.as_str()?,
                };
                let hash = entry.get("hash")?.as_str().filter(|h| !h.is_empty())?;
                Some(ExplorerTx {
                    block_number: block_number.to_string(),
                    hash: hash.to_string(),
                    ..Default::default()
                })
            })
            .collect(),
        Some(Value::String(notice)) => {
            if message.is_empty() {
                message = notice.clone();
            } else {
                message = format!("{} ({})", message, notice);
            }
            Vec::new()
        }
        _ => Vec::new(),
    };

    ExplorerPage {
        status,
        message,
        result,
    }
}
