//! Fixed-window rate limiting
//!
//! The upstream API enforces a hard per-minute call quota; exceeding it
//! causes request failures. Because the call pattern is fully sequential a
//! simple fixed-window counter is sufficient - no sliding window, no token
//! bucket.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::{info, warn};

/// Fixed-window rate limiter.
///
/// Tracks the number of calls made in the current window. When the budget is
/// exhausted the caller is suspended for the full window duration and the
/// counter resets to zero, so exactly one window's worth of calls becomes
/// available again. There is no partial-window carryover.
///
/// The limiter is owned by the HTTP client issuing the requests; interior
/// state lives behind an async mutex so client methods can take `&self`.
pub struct RateLimiter {
    max_calls: u32,
    window: Duration,
    state: Mutex<WindowState>,
}

#[derive(Default)]
struct WindowState {
    /// Calls made in the current window
    calls: u32,
    /// Calls made over the lifetime of the limiter
    total_calls: u64,
}

impl RateLimiter {
    /// Create a limiter admitting `max_calls` per `window`
    pub fn new(max_calls: u32, window: Duration) -> Self {
        Self {
            max_calls,
            window,
            state: Mutex::new(WindowState::default()),
        }
    }

    /// Confirm budget for one outbound call, sleeping if the window budget
    /// is exhausted.
    ///
    /// Must be invoked immediately before every outbound HTTP request. If
    /// the window counter has reached the configured maximum, execution is
    /// suspended for the full window duration and the counter resets; the
    /// call is then admitted.
    pub async fn allow_call(&self) {
        let mut state = self.state.lock().await;
        if state.calls == self.max_calls {
            warn!(
                "Rate limit reached ({} calls). Sleeping for {} seconds",
                self.max_calls,
                self.window.as_secs()
            );
            sleep(self.window).await;
            info!("Resuming after rate-limit window");
            state.calls = 0;
        }
        state.calls += 1;
        state.total_calls += 1;
    }

    /// Calls admitted in the current window
    pub async fn calls_in_window(&self) -> u32 {
        self.state.lock().await.calls
    }

    /// Calls admitted over the limiter's lifetime
    pub async fn total_calls(&self) -> u64 {
        self.state.lock().await.total_calls
    }

    /// The configured maximum calls per window
    pub fn max_calls(&self) -> u32 {
        self.max_calls
    }

    /// The configured window duration
    pub fn window(&self) -> Duration {
        self.window
    }
}
