//! Reconciliation loop
//!
//! Walks the block range window by window: fetch the window's references
//! from the index, check each against the node, record what is missing.
//! Explorer trouble only empties a window; node trouble ends the run.

use crate::checker::{apply_outcome, check_reference};
use crate::config::VerifierConfig;
use crate::explorer::TransactionIndex;
use crate::node::TransactionLookup;
use crate::report::RunReport;
use crate::stats::RunStats;
use crate::types::TransactionReference;
use crate::window::block_windows;
use anyhow::Result;
use futures::stream::{self, StreamExt};

/// Driver over an index and a node
pub struct Verifier<I, L> {
    index: I,
    lookup: L,
    config: VerifierConfig,
}

impl<I: TransactionIndex, L: TransactionLookup> Verifier<I, L> {
    /// Create a verifier; the configuration is validated here
    pub fn new(index: I, lookup: L, config: VerifierConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            index,
            lookup,
            config,
        })
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Run the whole range and return the totals
    pub async fn run(&self, report: &mut RunReport) -> Result<RunStats> {
        let mut stats = RunStats::default();
        self.run_with(report, &mut stats).await?;
        Ok(stats)
    }

    /// Run the whole range, accumulating into `stats`.
    ///
    /// On error `stats` holds the totals up to the failing lookup.
    pub async fn run_with(&self, report: &mut RunReport, stats: &mut RunStats) -> Result<()> {
        let windows = block_windows(
            self.config.start_block,
            self.config.max_block,
            self.config.window_size,
        );

        for window in windows {
            let txs = self.index.fetch_window(window).await;
            stats.windows += 1;
            stats.retrieved += txs.len() as u64;
            self.check_batch(&txs, report, stats).await?;
        }

        Ok(())
    }

    /// Check one window's references, applying outcomes in input order
    async fn check_batch(
        &self,
        txs: &[TransactionReference],
        report: &mut RunReport,
        stats: &mut RunStats,
    ) -> Result<()> {
        if self.config.concurrency <= 1 {
            for tx in txs {
                check_reference(&self.lookup, tx, report, stats).await?;
            }
            return Ok(());
        }

        // Lookups overlap; outcomes still arrive (and are recorded) in order
        let mut outcomes = stream::iter(txs)
            .map(|tx| async move { (tx, self.lookup.lookup(&tx.hash).await) })
            .buffered(self.config.concurrency);

        while let Some((tx, outcome)) = outcomes.next().await {
            apply_outcome(tx, &outcome?, report, stats)?;
        }

        Ok(())
    }
}
