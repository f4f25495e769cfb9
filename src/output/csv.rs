//! CSV writing for flattened chat records
//!
//! Flattened records do not share a fixed schema - a long chat has more
//! `webpath.N.*` columns than a short one - so the header of each written
//! chunk is the sorted union of field paths across the records in that
//! chunk, and rows leave missing fields empty.
//!
//! Append-mode chunks each carry their own header row (every append is
//! produced by a fresh writer over a file opened for append); full writes
//! truncate first and therefore contain exactly one header.

use csv::Writer;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write as _};
use std::path::Path;
use tracing::debug;

use super::{OutputError, OutputResult};
use crate::ChatRecord;

/// Append a chunk of records to `path`, creating the file if needed.
///
/// Writes a header row for the chunk followed by one row per record.
/// A no-op for an empty chunk. Returns the number of data rows written.
pub fn append_records(path: &Path, records: &[ChatRecord]) -> OutputResult<usize> {
    if records.is_empty() {
        return Ok(0);
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| OutputError::IoError(format!("Failed to open {}: {e}", path.display())))?;

    write_chunk(file, records)?;
    debug!("Appended {} rows to {}", records.len(), path.display());
    Ok(records.len())
}

/// Write all records to `path`, replacing any existing content.
///
/// The resulting file has exactly one header row. An empty batch produces
/// an empty file. Returns the number of data rows written.
pub fn write_records(path: &Path, records: &[ChatRecord]) -> OutputResult<usize> {
    let file = File::create(path)
        .map_err(|e| OutputError::IoError(format!("Failed to create {}: {e}", path.display())))?;

    if records.is_empty() {
        return Ok(0);
    }

    write_chunk(file, records)?;
    debug!("Wrote {} rows to {}", records.len(), path.display());
    Ok(records.len())
}

fn write_chunk(file: File, records: &[ChatRecord]) -> OutputResult<()> {
    let header = header_for(records);
    let mut writer = Writer::from_writer(BufWriter::new(file));

    writer
        .write_record(&header)
        .map_err(|e| OutputError::CsvError(format!("Failed to write header: {e}")))?;

    for record in records {
        let row: Vec<String> = header
            .iter()
            .map(|path| record.get(path).map(field_text).unwrap_or_default())
            .collect();
        writer
            .write_record(&row)
            .map_err(|e| OutputError::CsvError(format!("Failed to write row: {e}")))?;
    }

    let mut buf_writer = writer
        .into_inner()
        .map_err(|e| OutputError::CsvError(format!("Failed to get inner writer: {e}")))?;
    buf_writer
        .flush()
        .map_err(|e| OutputError::IoError(format!("Failed to flush: {e}")))?;

    Ok(())
}

/// Sorted union of field paths across the chunk
fn header_for(records: &[ChatRecord]) -> Vec<String> {
    let mut paths = BTreeSet::new();
    for record in records {
        for path in record.field_paths() {
            paths.insert(path.to_string());
        }
    }
    paths.into_iter().collect()
}

/// Render one scalar field as CSV cell text
fn field_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}
