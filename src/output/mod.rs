//! Batch partitioning and CSV output writers

pub mod csv;
pub mod partition;
pub mod path;

pub use partition::{BatchPartitioner, PartitionTotals};
pub use path::OutputNaming;

/// Output writer errors
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// IO error
    #[error("IO error: {0}")]
    IoError(String),

    /// CSV write error
    #[error("CSV error: {0}")]
    CsvError(String),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
