//! Authenticated HTTP client for the chat API
//!
//! One client instance is shared by the search paginator and the detail
//! fetcher. The client owns the rate limiter, so every outbound request is
//! budget-checked in exactly one place.

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error};

use crate::exporter::rate_limit::RateLimiter;
use crate::fetcher::{ApiConfig, FetcherError, FetcherResult};

/// HTTP client for all chat API interactions.
///
/// Carries the shared session (connection pool + default headers), the basic
/// auth credentials, and the rate limiter. There is deliberately no retry
/// logic: any failed request is fatal for the batch run.
pub struct ZendeskClient {
    client: Client,
    config: ApiConfig,
    rate_limiter: RateLimiter,
}

impl ZendeskClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `config` - Endpoint and credential configuration
    /// * `max_calls` - Rate-limit budget per window
    /// * `window` - Rate-limit window duration
    pub fn new(config: ApiConfig, max_calls: u32, window: Duration) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        // Client::builder only fails on a malformed TLS/proxy setup, which
        // cannot happen with these options; fall back to the default client
        // rather than propagating an impossible error.
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .unwrap_or_default();

        Self {
            client,
            config,
            rate_limiter: RateLimiter::new(max_calls, window),
        }
    }

    /// The endpoint configuration this client was built with
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// The rate limiter owned by this client
    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }

    /// Execute an authenticated GET request and deserialize the JSON body.
    ///
    /// Consults the rate limiter immediately before the request goes out.
    ///
    /// # Errors
    ///
    /// Any non-success status, transport failure, or undecodable body is an
    /// error; callers propagate it and the run aborts.
    pub async fn get<T>(&self, url: &str, params: &[(&str, String)]) -> FetcherResult<T>
    where
        T: DeserializeOwned,
    {
        self.rate_limiter.allow_call().await;

        debug!("GET {} with {} params", url, params.len());

        let mut request = self.client.get(url);
        if !params.is_empty() {
            request = request.query(params);
        }
        let response = request
            .basic_auth(&self.config.username, Some(&self.config.password))
            .send()
            .await
            .map_err(|e| FetcherError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            error!("A request failed. Tried URL: {}", url);
            error!("Got a response code: {}", status.as_u16());
            return Err(FetcherError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| FetcherError::ParseError(format!("Failed to deserialize response: {e}")))
    }
}
