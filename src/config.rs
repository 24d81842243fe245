//! Verifier configuration
//!
//! Defaults reproduce the Mumbai run: polygonscan testnet explorer, zero
//! sentinel address, bor on localhost, blocks 0..21_330_000 in 50k windows.

use crate::error::ConfigError;
use reqwest::Url;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_EXPLORER_URL: &str = "https://api-testnet.polygonscan.com/api";
/// State sync transactions are indexed under the zero address
pub const STATE_SYNC_ADDRESS: &str = "0x0000000000000000000000000000000000000000";
pub const DEFAULT_NODE_URL: &str = "http://localhost:8545";
pub const DEFAULT_START_BLOCK: u64 = 0;
pub const DEFAULT_MAX_BLOCK: u64 = 21_330_000;
pub const DEFAULT_WINDOW_SIZE: u64 = 50_000;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Polygonscan returns at most this many records per `txlist` call
pub const DEFAULT_PAGE_CAP: usize = 10_000;

/// Everything a run needs; built by the CLI or directly by tests
#[derive(Debug, Clone)]
pub struct VerifierConfig {
    /// Explorer API base (query string is appended per window)
    pub explorer_url: String,
    /// Address whose transactions are listed
    pub address: String,
    /// Node JSON-RPC endpoint
    pub node_url: String,
    /// First block of the first window
    pub start_block: u64,
    /// Loop stops once the window start reaches this block
    pub max_block: u64,
    /// Blocks per explorer query
    pub window_size: u64,
    /// Per-request timeout for both explorer and node calls
    pub timeout: Duration,
    /// Where report files are created
    pub output_dir: PathBuf,
    /// Node lookups allowed in flight at once
    pub concurrency: usize,
    /// A page this long is reported as possibly truncated
    pub page_cap: usize,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            explorer_url: DEFAULT_EXPLORER_URL.to_string(),
            address: STATE_SYNC_ADDRESS.to_string(),
            node_url: DEFAULT_NODE_URL.to_string(),
            start_block: DEFAULT_START_BLOCK,
            max_block: DEFAULT_MAX_BLOCK,
            window_size: DEFAULT_WINDOW_SIZE,
            timeout: DEFAULT_TIMEOUT,
            output_dir: PathBuf::from("."),
            concurrency: 1,
            page_cap: DEFAULT_PAGE_CAP,
        }
    }
}

impl VerifierConfig {
    /// Reject values that would make the run loop forever or never issue a call
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_size == 0 {
            return Err(ConfigError::ZeroWindow);
        }
        if self.concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        check_url("explorer", &self.explorer_url)?;
        check_url("node", &self.node_url)?;
        Ok(())
    }
}

fn check_url(name: &'static str, url: &str) -> Result<(), ConfigError> {
    Url::parse(url)
        .map(|_| ())
        .map_err(|e| ConfigError::InvalidUrl {
            name,
            url: url.to_string(),
            reason: e.to_string(),
        })
}
