//! Chat data fetching
//!
//! Everything that talks to the chat API lives here: the authenticated HTTP
//! client (which owns the rate limiter), the search paginator that collects
//! chat IDs for a date range, the per-ID detail fetcher, and the JSON
//! flattening that turns nested detail responses into CSV-ready records.

pub mod chat;
pub mod config;
pub mod flatten;
pub mod http;
pub mod search;

pub use chat::fetch_chat;
pub use config::ApiConfig;
pub use http::ZendeskClient;
pub use search::search_chat_ids;

/// Fetcher errors
#[derive(Debug, thiserror::Error)]
pub enum FetcherError {
    /// The API answered with a non-success status. Fatal for the run: the
    /// job is batch and non-interactive, so there is no salvage path.
    #[error("request to {url} failed with status {status}")]
    HttpStatus {
        /// The URL that was attempted
        url: String,
        /// The HTTP status code received
        status: u16,
    },

    /// Transport-level failure (connection refused, timeout, TLS)
    #[error("network error: {0}")]
    NetworkError(String),

    /// The response body did not parse as the expected JSON shape
    #[error("parse error: {0}")]
    ParseError(String),

    /// Pagination walked more pages than the safety limit allows
    #[error("API error: {0}")]
    ApiError(String),
}

/// Result type for fetcher operations
pub type FetcherResult<T> = Result<T, FetcherError>;
