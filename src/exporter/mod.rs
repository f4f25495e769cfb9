//! Export orchestration and rate limiting
//!
//! The exporter runs the complete single-pass extraction workflow:
//!
//! 1. **Job Creation**: Describe what to export using [`job::ExportJob`]
//! 2. **Search**: Collect every chat ID in the date range
//! 3. **Fetch**: Retrieve and flatten one record per ID, throttled by
//!    [`rate_limit::RateLimiter`]
//! 4. **Partition**: Route records by type and write CSV output
//!
//! Execution is fully sequential; the only suspension point is the rate
//! limiter's sleep. There is no retry logic anywhere in this module: the
//! first HTTP failure aborts the run after accumulated records have been
//! flushed.
//!
//! # Quick Start
//!
//! ```no_run
//! use zendesk_chat_exporter::exporter::{ExportExecutor, ExportJob, FlushMode};
//! use zendesk_chat_exporter::fetcher::ApiConfig;
//! use zendesk_chat_exporter::range::DateRange;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let range = DateRange::parse("2020-03-01", "2020-03-30")?;
//! let job = ExportJob::new(range, "./output".into(), FlushMode::Delta);
//! let executor = ExportExecutor::new(
//!     ApiConfig::new("agent@example.com", "secret"),
//!     100,
//!     Duration::from_secs(60),
//! );
//! let summary = executor.execute(&job, None).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod executor;
pub mod job;
pub mod rate_limit;

pub use executor::ExportExecutor;
pub use job::{ExportJob, ExportSummary, FlushMode};
pub use rate_limit::RateLimiter;

use crate::fetcher::FetcherError;
use crate::output::OutputError;

/// Export errors
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Fetcher error (search or detail request failed)
    #[error("fetcher error: {0}")]
    FetcherError(#[from] FetcherError),

    /// Output error (CSV write failed)
    #[error("output error: {0}")]
    OutputError(#[from] OutputError),
}
