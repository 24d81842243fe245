//! Block windows
//!
//! A run walks `[start, start + size)`, `[start + size, start + 2*size)`, …
//! and stops once a window would begin at or past `max`. The last window is
//! not clamped, so it may extend beyond `max`.

use std::fmt;

/// Half-open block range `[start, end)` for one explorer query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockWindow {
    pub start: u64,
    pub end: u64,
}

impl BlockWindow {
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }
}

impl fmt::Display for BlockWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Iterator over the windows of a run
#[derive(Debug, Clone)]
pub struct BlockWindows {
    current: u64,
    max: u64,
    size: u64,
}

/// Windows from `start` while the window start is below `max`.
///
/// `size` must be non-zero; [`crate::config::VerifierConfig::validate`]
/// guarantees that for configured runs. A zero size yields nothing.
pub fn block_windows(start: u64, max: u64, size: u64) -> BlockWindows {
    BlockWindows {
        current: start,
        max,
        size,
    }
}

impl Iterator for BlockWindows {
    type Item = BlockWindow;

    fn next(&mut self) -> Option<BlockWindow> {
        if self.size == 0 || self.current >= self.max {
            return None;
        }
        let start = self.current;
        let end = start.saturating_add(self.size);
        self.current = end;
        Some(BlockWindow { start, end })
    }
}
