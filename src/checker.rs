//! Existence checker
//!
//! Turns a lookup outcome into its side effects. Only `Missing` touches the
//! mismatch report, so a transaction the node confirmed can never end up in
//! it.

use crate::node::TransactionLookup;
use crate::report::RunReport;
use crate::stats::RunStats;
use crate::types::{LookupOutcome, TransactionReference};
use anyhow::Result;

/// Look `tx` up on the node and record the outcome.
///
/// A node transport failure is returned as an error with nothing recorded.
pub async fn check_reference<L: TransactionLookup>(
    lookup: &L,
    tx: &TransactionReference,
    report: &mut RunReport,
    stats: &mut RunStats,
) -> Result<LookupOutcome> {
    let outcome = lookup.lookup(&tx.hash).await?;
    apply_outcome(tx, &outcome, report, stats)?;
    Ok(outcome)
}

/// Record the side effects of one classified lookup
pub fn apply_outcome(
    tx: &TransactionReference,
    outcome: &LookupOutcome,
    report: &mut RunReport,
    stats: &mut RunStats,
) -> Result<()> {
    match outcome {
        LookupOutcome::Found => {}
        LookupOutcome::Missing => {
            report.record_missing(tx)?;
            stats.missing += 1;
            println!("   ❌ Missing on node: block {}, tx {}", tx.block_number, tx.hash);
        }
        LookupOutcome::Unknown { reason } => {
            report.record_unknown(tx, reason)?;
            stats.unknown += 1;
            eprintln!(
                "   ⚠️  Node: cannot classify block {}, tx {}: {}",
                tx.block_number, tx.hash, reason
            );
        }
    }
    Ok(())
}
