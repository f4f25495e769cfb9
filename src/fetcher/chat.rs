//! Per-chat detail fetching
//!
//! One detail request per identifier; the nested response body is flattened
//! into a [`ChatRecord`]. The record's type (`chat` vs `offline_msg`) is
//! only known after this fetch - routing happens downstream.

use serde_json::Value;
use tracing::debug;

use crate::fetcher::{FetcherResult, ZendeskClient};
use crate::{ChatId, ChatRecord};

/// Fetch one chat and flatten it into a record.
///
/// Pure transform from identifier to flattened record; no side effects
/// beyond the network call (rate-limited inside the client).
///
/// # Errors
///
/// A non-success HTTP status or an undecodable body is fatal for the run,
/// the same policy as the search paginator.
pub async fn fetch_chat(client: &ZendeskClient, id: &ChatId) -> FetcherResult<ChatRecord> {
    let url = client.config().chat_url(id);
    let body = client.get::<Value>(&url, &[]).await?;

    let record = ChatRecord::from_value(&body);
    debug!("Fetched chat {} with {} flattened fields", id, record.len());

    Ok(record)
}
