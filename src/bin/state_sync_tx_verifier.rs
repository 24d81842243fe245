//! state_sync_tx_verifier CLI tool
//!
//! Fetches state sync transactions from the explorer window by window and
//! records the ones the local node cannot find.

use anyhow::{Context, Result};
use clap::Parser;
use statesync_verifier::config::{
    DEFAULT_EXPLORER_URL, DEFAULT_MAX_BLOCK, DEFAULT_NODE_URL, DEFAULT_PAGE_CAP,
    DEFAULT_START_BLOCK, DEFAULT_WINDOW_SIZE, STATE_SYNC_ADDRESS,
};
use statesync_verifier::{ExplorerClient, NodeClient, RunReport, RunStats, Verifier, VerifierConfig};
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "state_sync_tx_verifier")]
#[command(about = "Report explorer-indexed state sync transactions missing from a local node")]
struct Cli {
    /// Explorer txlist API base URL
    #[arg(long, env = "SSV_EXPLORER_URL", default_value = DEFAULT_EXPLORER_URL)]
    explorer_url: String,

    /// Address whose transactions are listed
    #[arg(long, env = "SSV_ADDRESS", default_value = STATE_SYNC_ADDRESS)]
    address: String,

    /// Node JSON-RPC endpoint
    #[arg(long, env = "SSV_NODE_URL", default_value = DEFAULT_NODE_URL)]
    node_url: String,

    /// First block of the first window
    #[arg(long, env = "SSV_START_BLOCK", default_value_t = DEFAULT_START_BLOCK)]
    start_block: u64,

    /// Stop once a window would start at or past this block
    #[arg(long, env = "SSV_MAX_BLOCK", default_value_t = DEFAULT_MAX_BLOCK)]
    max_block: u64,

    /// Blocks per explorer query
    #[arg(long, env = "SSV_WINDOW_SIZE", default_value_t = DEFAULT_WINDOW_SIZE)]
    window_size: u64,

    /// Per-request timeout in seconds
    #[arg(long, env = "SSV_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,

    /// Directory for report files
    #[arg(long, env = "SSV_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Node lookups in flight at once
    #[arg(long, env = "SSV_CONCURRENCY", default_value_t = 1)]
    concurrency: usize,

    /// Warn when a window returns at least this many records
    #[arg(long, env = "SSV_PAGE_CAP", default_value_t = DEFAULT_PAGE_CAP)]
    page_cap: usize,
}

impl From<Cli> for VerifierConfig {
    fn from(cli: Cli) -> Self {
        Self {
            explorer_url: cli.explorer_url,
            address: cli.address,
            node_url: cli.node_url,
            start_block: cli.start_block,
            max_block: cli.max_block,
            window_size: cli.window_size,
            timeout: Duration::from_secs(cli.timeout_secs),
            output_dir: cli.output_dir,
            concurrency: cli.concurrency,
            page_cap: cli.page_cap,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Endpoints and range may come from a local .env
    dotenvy::dotenv().ok();
    let config: VerifierConfig = Cli::parse().into();

    let index = ExplorerClient::new(&config)?;
    let lookup = NodeClient::new(&config)?;
    let verifier = Verifier::new(index, lookup, config)?;
    let config = verifier.config();

    println!("🔍 State sync tx verifier");
    println!("  Explorer: {}", config.explorer_url);
    println!("  Node: {}", config.node_url);
    println!(
        "  Blocks: {} -> {} (window {})",
        config.start_block, config.max_block, config.window_size
    );
    if config.concurrency > 1 {
        println!("  Lookup concurrency: {}", config.concurrency);
    }

    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!("Failed to create output directory: {}", config.output_dir.display())
    })?;
    let mut report = RunReport::create(&config.output_dir, &chrono::Local::now())?;
    println!("  Report: {}", report.missing_path().display());
    println!();

    let start = Instant::now();
    let mut stats = RunStats::default();
    let outcome = verifier.run_with(&mut report, &mut stats).await;
    let elapsed = start.elapsed();

    println!("================================================================================");
    if outcome.is_err() {
        println!("ABORTED after {:.1}s (partial totals)", elapsed.as_secs_f64());
    } else {
        println!("RESULTS ({:.1}s = {:.1}m)", elapsed.as_secs_f64(), elapsed.as_secs_f64() / 60.0);
    }
    println!("{}", stats);
    if stats.unknown > 0 {
        println!("  Unclassified lookups written to {}", report.unknown_path().display());
    }
    println!();

    outcome?;

    if stats.missing > 0 {
        println!("  ❌ {} missing txs written to {}", stats.missing, report.missing_path().display());
    } else {
        println!("  ✅ NO MISSING TXS FOUND");
    }

    Ok(())
}
