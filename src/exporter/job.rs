//! Export job specification and run summary

use crate::range::DateRange;
use serde::Serialize;
use std::path::PathBuf;
use std::str::FromStr;

/// Temp-file flush behavior for the batch partitioner.
///
/// The original extraction tooling appended the *entire* in-memory batch to
/// the temp file on every periodic flush, duplicating already-flushed rows.
/// Both behaviors are available so existing downstream cleanup scripts keep
/// working; `Delta` is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlushMode {
    /// Append only the records accumulated since the previous flush; the
    /// temp file ends up a duplicate-free copy of the batch
    #[default]
    Delta,
    /// Append the whole in-memory batch on every flush, reproducing the
    /// legacy duplicated rows in the temp file
    FullBatch,
}

impl FromStr for FlushMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "delta" => Ok(FlushMode::Delta),
            "full-batch" => Ok(FlushMode::FullBatch),
            _ => Err(format!(
                "Invalid flush mode: {s}. Valid options: delta, full-batch"
            )),
        }
    }
}

impl std::fmt::Display for FlushMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FlushMode::Delta => "delta",
            FlushMode::FullBatch => "full-batch",
        };
        f.write_str(s)
    }
}

/// Export job specification
#[derive(Debug, Clone)]
pub struct ExportJob {
    /// Inclusive date range to search
    pub range: DateRange,
    /// Directory receiving final and temporary CSV files
    pub output_dir: PathBuf,
    /// Temp-file flush behavior
    pub flush_mode: FlushMode,
}

impl ExportJob {
    /// Create a new export job
    pub fn new(range: DateRange, output_dir: PathBuf, flush_mode: FlushMode) -> Self {
        Self {
            range,
            output_dir,
            flush_mode,
        }
    }
}

/// Counters describing a completed (or aborted) export run
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ExportSummary {
    /// Chat identifiers returned by the search
    pub chat_ids: usize,
    /// Records routed to the support-chats batch
    pub support_chats: usize,
    /// Records routed to the offline-messages batch
    pub offline_messages: usize,
    /// Records with an unknown or missing type, dropped from both batches
    pub dropped: usize,
    /// Total API calls issued (search pages + detail fetches)
    pub api_calls: u64,
}
