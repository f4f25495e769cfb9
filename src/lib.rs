//! # Zendesk Chat Exporter Library
//!
//! A batch extraction library for downloading chat transcripts and offline
//! messages from the Zendesk Chat (zopim) REST API and writing them to CSV.
//!
//! ## Features
//!
//! - **Date-Range Search**: Collects every chat ID in an inclusive date range
//!   by walking the search API's cursor-based pagination
//! - **Rate Limiting**: Fixed-window call budgeting that respects the API's
//!   per-minute quota by sleeping when the budget is exhausted
//! - **Record Flattening**: Nested chat JSON is flattened into single-level
//!   path-to-scalar mappings suitable for CSV rows
//! - **Type Partitioning**: Records are routed into support-chat and
//!   offline-message batches with periodic flushes to temporary files
//! - **Fail-Fast**: Any HTTP failure aborts the run after flushing whatever
//!   has been accumulated; a human re-runs the job
//!
//! ## Quick Start
//!
//! ```no_run
//! use zendesk_chat_exporter::exporter::{ExportExecutor, ExportJob, FlushMode};
//! use zendesk_chat_exporter::fetcher::ApiConfig;
//! use zendesk_chat_exporter::range::DateRange;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ApiConfig::new("agent@example.com", "secret");
//! let range = DateRange::parse("2020-03-01", "2020-03-30")?;
//! let job = ExportJob::new(range, "./output".into(), FlushMode::Delta);
//!
//! let executor = ExportExecutor::new(config, 100, std::time::Duration::from_secs(60));
//! let summary = executor.execute(&job, None).await?;
//! println!("exported {} support chats", summary.support_chats);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`range`] - Date range parsing and the search query it produces
//! - [`fetcher`] - HTTP client, search pagination, detail fetch, flattening
//! - [`exporter`] - Export orchestration and rate limiting
//! - [`output`] - Batch partitioning and CSV writers
//! - [`cli`] - CLI command implementations

#![warn(missing_docs)]
#![warn(clippy::all)]

use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;

/// CLI command implementations
pub mod cli;

/// Export orchestration and rate limiting
pub mod exporter;

/// HTTP client, search pagination, and record flattening
pub mod fetcher;

/// Batch partitioning and CSV output writers
pub mod output;

/// Date range parsing and validation
pub mod range;

// Re-export commonly used types
pub use range::DateRange;

/// Opaque chat identifier.
///
/// The API returns identifiers as JSON strings, but older records have been
/// observed with numeric ids; both forms deserialize into the same
/// string-backed value. No ordering is assumed between identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct ChatId(String);

impl ChatId {
    /// Wrap a raw identifier string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ChatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for ChatId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::String(s) => Ok(ChatId(s)),
            Value::Number(n) => Ok(ChatId(n.to_string())),
            other => Err(serde::de::Error::custom(format!(
                "chat id must be a string or number, got {other}"
            ))),
        }
    }
}

/// Record type discriminator carried in every fetched chat record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    /// A live support chat transcript
    Chat,
    /// An offline message left while no agent was available
    OfflineMsg,
}

impl RecordType {
    /// The wire value of this record type
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::Chat => "chat",
            RecordType::OfflineMsg => "offline_msg",
        }
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chat" => Ok(RecordType::Chat),
            "offline_msg" => Ok(RecordType::OfflineMsg),
            _ => Err(format!("Unknown record type: {s}")),
        }
    }
}

/// A flattened (depth-0) chat record.
///
/// Produced from a nested JSON detail response: compound keys encode the
/// original path (`session.browser`, `webpath.0.to`) and every value is a
/// scalar. Keys are kept sorted so CSV column order is deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRecord {
    fields: BTreeMap<String, Value>,
}

impl ChatRecord {
    /// Build a record from an already-flattened field map
    pub fn new(fields: BTreeMap<String, Value>) -> Self {
        Self { fields }
    }

    /// Flatten a nested JSON value into a record
    pub fn from_value(value: &Value) -> Self {
        Self {
            fields: fetcher::flatten::flatten(value),
        }
    }

    /// The record's type, if the `type` field holds a known discriminator.
    ///
    /// Returns `None` for a missing, non-string, or unrecognized type; such
    /// records are unroutable.
    pub fn record_type(&self) -> Option<RecordType> {
        self.fields
            .get("type")
            .and_then(Value::as_str)
            .and_then(|s| RecordType::from_str(s).ok())
    }

    /// Look up a field by its flattened path
    pub fn get(&self, path: &str) -> Option<&Value> {
        self.fields.get(path)
    }

    /// Iterate over field paths in sorted order
    pub fn field_paths(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Iterate over `(path, value)` pairs in sorted path order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of flattened fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
