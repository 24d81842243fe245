//! Wire types for the explorer index and the node's JSON-RPC
//!
//! The explorer encodes every leaf as a string, numeric or not, so the
//! records here keep them as strings and never reinterpret them.

use serde::{Deserialize, Serialize};

/// A transaction as seen by the explorer, reduced to what the node check needs.
///
/// Serialized with capitalized keys; this is the exact line format of the
/// mismatch report: `{"BlockNumber":"…","Hash":"…"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReference {
    /// Block number as a decimal string, verbatim from the explorer
    #[serde(rename = "BlockNumber")]
    pub block_number: String,
    /// Transaction hash, verbatim from the explorer (prefix untouched)
    #[serde(rename = "Hash")]
    pub hash: String,
}

impl TransactionReference {
    pub fn new(block_number: impl Into<String>, hash: impl Into<String>) -> Self {
        Self {
            block_number: block_number.into(),
            hash: hash.into(),
        }
    }
}

/// One `txlist` response from the explorer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorerPage {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub result: Vec<ExplorerTx>,
}

impl ExplorerPage {
    /// Project the page down to (block number, hash) pairs, preserving order.
    ///
    /// Records without a hash cannot be looked up and are skipped.
    pub fn references(&self) -> Vec<TransactionReference> {
        self.result
            .iter()
            .filter(|tx| !tx.hash.is_empty())
            .map(|tx| TransactionReference::new(tx.block_number.clone(), tx.hash.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.result.len()
    }

    pub fn is_empty(&self) -> bool {
        self.result.is_empty()
    }
}

/// Raw explorer transaction record. Only `block_number` and `hash` are used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExplorerTx {
    pub block_number: String,
    pub time_stamp: String,
    pub hash: String,
    pub nonce: String,
    pub block_hash: String,
    pub transaction_index: String,
    pub from: String,
    pub to: String,
    pub value: String,
    pub gas: String,
    pub gas_price: String,
    pub is_error: String,
    #[serde(rename = "txreceipt_status")]
    pub txreceipt_status: String,
    pub input: String,
    pub contract_address: String,
    pub cumulative_gas_used: String,
    pub gas_used: String,
    pub confirmations: String,
}

/// `eth_getTransactionByHash` response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct NodeLookupResponse {
    #[serde(default)]
    pub jsonrpc: String,
    #[serde(default)]
    pub id: serde_json::Value,
    /// Kept raw: only an object counts as a transaction, and serde would
    /// otherwise accept an array for a struct
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

/// Transaction object returned by the node. Existence is all that matters;
/// fields are optional because nodes differ (`to` is null for creations,
/// `type` is absent on older clients).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeTransaction {
    pub block_hash: Option<String>,
    pub block_number: Option<String>,
    pub from: Option<String>,
    pub gas: Option<String>,
    pub gas_price: Option<String>,
    pub hash: Option<String>,
    pub input: Option<String>,
    pub nonce: Option<String>,
    pub to: Option<String>,
    pub transaction_index: Option<String>,
    pub value: Option<String>,
    #[serde(rename = "type")]
    pub tx_type: Option<String>,
    pub v: Option<String>,
    pub r: Option<String>,
    pub s: Option<String>,
}

/// Classification of a single node lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Node returned a transaction object
    Found,
    /// Node answered with a null/absent result
    Missing,
    /// Node answered, but not with something that can be classified
    Unknown { reason: String },
}

/// Sidecar line for references whose lookup could not be classified
#[derive(Debug, Clone, Serialize)]
pub struct UnknownEntry<'a> {
    #[serde(rename = "BlockNumber")]
    pub block_number: &'a str,
    #[serde(rename = "Hash")]
    pub hash: &'a str,
    #[serde(rename = "Reason")]
    pub reason: &'a str,
}
