//! Run counters, owned by the driver

use std::fmt;

/// Totals for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Explorer queries issued
    pub windows: u64,
    /// Records returned by the explorer across all windows
    pub retrieved: u64,
    /// Records the node returned null for
    pub missing: u64,
    /// Records whose lookup could not be classified
    pub unknown: u64,
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Windows queried: {}", self.windows)?;
        writeln!(f, "  Total no of records from explorer: {}", self.retrieved)?;
        writeln!(f, "  Total no of missing txs on node: {}", self.missing)?;
        write!(f, "  Unclassified lookups: {}", self.unknown)
    }
}
