//! Typed failures
//!
//! Explorer faults are absorbed where they happen and never show up here.
//! The only fatal class is a node that cannot be reached.

use thiserror::Error;

/// Rejected configuration values
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("window size must be greater than zero")]
    ZeroWindow,
    #[error("lookup concurrency must be greater than zero")]
    ZeroConcurrency,
    #[error("request timeout must be greater than zero")]
    ZeroTimeout,
    #[error("invalid {name} URL {url:?}: {reason}")]
    InvalidUrl {
        name: &'static str,
        url: String,
        reason: String,
    },
}

/// Node transport failure. Aborts the run: a lookup that never reached the
/// node says nothing about whether the transaction exists.
#[derive(Debug, Error)]
pub enum NodeError {
    #[error("node at {url} unreachable while looking up {hash}: {source}")]
    Unreachable {
        url: String,
        hash: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}
