//! CLI error types and conversions

use crate::exporter::ExportError;
use crate::fetcher::FetcherError;
use crate::output::OutputError;
use crate::range::RangeError;

/// CLI errors
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Date range error
    #[error("date range error: {0}")]
    RangeError(#[from] RangeError),

    /// Export error
    #[error("export error: {0}")]
    ExportError(#[from] ExportError),

    /// Fetcher error
    #[error("fetcher error: {0}")]
    FetcherError(#[from] FetcherError),

    /// Output error
    #[error("output error: {0}")]
    OutputError(#[from] OutputError),

    /// Invalid argument
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
