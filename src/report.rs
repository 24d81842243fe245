//! Run output files
//!
//! Both files are newline-delimited JSON, one object per line, and are
//! flushed after every line so a run that aborts keeps what it wrote.

use crate::types::{TransactionReference, UnknownEntry};
use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub const MISSING_PREFIX: &str = "missing_ss_txs";
pub const UNKNOWN_PREFIX: &str = "unknown_ss_txs";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// `<prefix><YYYY-MM-DDTHH:MM:SS>.json`
pub fn report_file_name<Tz: TimeZone>(prefix: &str, timestamp: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{}{}.json", prefix, timestamp.format(TIMESTAMP_FORMAT))
}

/// Append-only NDJSON file
#[derive(Debug)]
pub struct NdjsonWriter {
    path: PathBuf,
    file: File,
    lines: u64,
}

impl NdjsonWriter {
    /// Create `path`; an existing file is an error, never appended to
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .with_context(|| format!("Failed to create report file: {}", path.display()))?;

        Ok(Self {
            path,
            file,
            lines: 0,
        })
    }

    /// Write one entry as a single line
    pub fn append<T: Serialize>(&mut self, entry: &T) -> Result<()> {
        let mut line = serde_json::to_vec(entry).context("Failed to encode report entry")?;
        line.push(b'\n');
        self.file
            .write_all(&line)
            .and_then(|_| self.file.flush())
            .with_context(|| format!("Failed to write report file: {}", self.path.display()))?;
        self.lines += 1;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lines written through this writer
    pub fn lines(&self) -> u64 {
        self.lines
    }
}

/// The mismatch report plus the sidecar for unclassified lookups.
///
/// The mismatch file exists from the start of the run; the sidecar is only
/// created once something needs to go in it.
#[derive(Debug)]
pub struct RunReport {
    missing: NdjsonWriter,
    unknown: Option<NdjsonWriter>,
    unknown_path: PathBuf,
}

impl RunReport {
    /// Create the report files for a run started at `timestamp`.
    ///
    /// Fails if a report for the same second already exists in `dir`, so
    /// output from separate runs is never merged.
    pub fn create<Tz: TimeZone>(dir: &Path, timestamp: &DateTime<Tz>) -> Result<Self>
    where
        Tz::Offset: std::fmt::Display,
    {
        let missing = NdjsonWriter::create(dir.join(report_file_name(MISSING_PREFIX, timestamp)))?;
        Ok(Self {
            missing,
            unknown: None,
            unknown_path: dir.join(report_file_name(UNKNOWN_PREFIX, timestamp)),
        })
    }

    /// Record a transaction the node returned null for
    pub fn record_missing(&mut self, tx: &TransactionReference) -> Result<()> {
        self.missing.append(tx)
    }

    /// Record a transaction whose lookup could not be classified
    pub fn record_unknown(&mut self, tx: &TransactionReference, reason: &str) -> Result<()> {
        let writer = match self.unknown.take() {
            Some(w) => w,
            None => NdjsonWriter::create(&self.unknown_path)?,
        };
        self.unknown.insert(writer).append(&UnknownEntry {
            block_number: &tx.block_number,
            hash: &tx.hash,
            reason,
        })
    }

    pub fn missing_path(&self) -> &Path {
        self.missing.path()
    }

    /// Sidecar path, whether or not it has been created
    pub fn unknown_path(&self) -> &Path {
        &self.unknown_path
    }

    pub fn missing_lines(&self) -> u64 {
        self.missing.lines()
    }

    pub fn unknown_lines(&self) -> u64 {
        self.unknown.as_ref().map_or(0, NdjsonWriter::lines)
    }
}
