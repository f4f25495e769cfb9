//! Export configuration constants

/// Default maximum API calls per rate-limit window.
/// The chat API enforces a hard quota of 100 requests per minute; exceeding
/// it causes request failures rather than throttled responses.
pub const DEFAULT_MAX_CALLS_PER_WINDOW: u32 = 100;

/// Default rate-limit window duration in seconds.
pub const DEFAULT_WINDOW_SECS: u64 = 60;

/// Flush interval for output batches (append to the temp file every N
/// records accumulated in a batch, checked independently per batch).
pub const FLUSH_INTERVAL: usize = 500;

/// Progress log interval (log accumulation progress every N records per
/// batch).
pub const PROGRESS_INTERVAL: usize = 100;
