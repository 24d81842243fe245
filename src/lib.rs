//! statesync-verifier - state sync transaction reconciliation
//!
//! Lists the state sync transactions an explorer has indexed for a block
//! range and checks each one against a local node's JSON-RPC. Transactions
//! the node does not know are written to a timestamped NDJSON report.

/// Run configuration
pub mod config;
pub mod error;
pub mod types;
pub mod window;
pub mod stats;

/// Explorer range fetcher
pub mod explorer;
/// Node lookups
pub mod node;
pub mod checker;
pub mod report;
/// Reconciliation loop
pub mod verifier;

pub use config::VerifierConfig;
pub use error::{ConfigError, NodeError};
pub use explorer::{ExplorerClient, TransactionIndex};
pub use node::{NodeClient, TransactionLookup};
pub use report::RunReport;
pub use stats::RunStats;
pub use types::{LookupOutcome, TransactionReference};
pub use verifier::Verifier;
