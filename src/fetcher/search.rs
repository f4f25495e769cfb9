//! Chat-ID search pagination
//!
//! The search endpoint answers a timestamp-range query with one page of chat
//! summaries plus a `next_url` cursor; an absent or empty `next_url` marks
//! the last page. The paginator walks every page and accumulates the ids in
//! page-traversal order (which need not match chronological order).

use serde::Deserialize;
use tracing::{debug, info};

use crate::fetcher::{FetcherError, FetcherResult, ZendeskClient};
use crate::range::DateRange;
use crate::ChatId;

/// Safety limit on pagination depth; a cursor loop in the API would
/// otherwise keep the job running forever.
const MAX_PAGES: usize = 10_000;

/// One page of search results
#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<ChatSummary>,
    #[serde(default)]
    next_url: Option<String>,
}

/// The slice of a chat summary the exporter cares about
#[derive(Debug, Deserialize)]
struct ChatSummary {
    id: ChatId,
}

/// Collect every chat identifier in the date range.
///
/// Issues the range query against the search endpoint and follows `next_url`
/// cursors until the last page. The client's rate limiter is consulted
/// before each page request. Zero further requests are made once `next_url`
/// is absent.
///
/// # Errors
///
/// Any non-success HTTP status aborts the whole run (no partial-result
/// salvage); an error also surfaces if the page safety limit is exceeded.
pub async fn search_chat_ids(
    client: &ZendeskClient,
    range: &DateRange,
) -> FetcherResult<Vec<ChatId>> {
    let mut all_ids = Vec::new();

    info!("Retrieving chats between {}", range);

    // First request carries the range query; follow-up requests GET the
    // next_url cursor verbatim, which already encodes the query.
    let params = [("q", range.search_query())];
    let mut page = client
        .get::<SearchResponse>(&client.config().search_url(), &params)
        .await?;
    let mut pages_fetched = 1;

    loop {
        debug!(
            "Search page {} returned {} ids",
            pages_fetched,
            page.results.len()
        );
        all_ids.extend(page.results.into_iter().map(|summary| summary.id));

        let next_url = match page.next_url.filter(|url| !url.is_empty()) {
            Some(url) => url,
            None => break,
        };

        if pages_fetched >= MAX_PAGES {
            return Err(FetcherError::ApiError(format!(
                "Max pages ({MAX_PAGES}) exceeded - possible cursor loop. Last URL: {next_url}"
            )));
        }

        page = client.get::<SearchResponse>(&next_url, &[]).await?;
        pages_fetched += 1;
    }

    info!(
        "Total chats retrieved: {} across {} pages",
        all_ids.len(),
        pages_fetched
    );

    Ok(all_ids)
}
