//! Integration tests for search pagination

use httpmock::prelude::*;
use serde_json::json;
use std::time::Duration;
use zendesk_chat_exporter::fetcher::{search_chat_ids, ApiConfig, FetcherError, ZendeskClient};
use zendesk_chat_exporter::range::DateRange;

fn client(server: &MockServer) -> ZendeskClient {
    let config = ApiConfig::new("agent", "secret").with_base_url(server.base_url());
    ZendeskClient::new(config, 100, Duration::from_secs(60))
}

fn range() -> DateRange {
    DateRange::parse("2020-03-01", "2020-03-30").unwrap()
}

#[tokio::test]
async fn collects_ids_across_all_pages_in_order() {
    let server = MockServer::start_async().await;

    let page1 = server.mock(|when, then| {
        when.method(GET)
            .path("/chats/search")
            .query_param("q", "timestamp:[2020-03-01 TO 2020-03-30]");
        then.status(200).json_body(json!({
            "results": [{"id": "a1"}, {"id": "a2"}, {"id": "a3"}],
            "next_url": format!("{}/chats/search?page=2", server.base_url())
        }));
    });
    let page2 = server.mock(|when, then| {
        when.method(GET).path("/chats/search").query_param("page", "2");
        then.status(200).json_body(json!({
            "results": [{"id": "b1"}, {"id": "b2"}],
            "next_url": null
        }));
    });

    let ids = search_chat_ids(&client(&server), &range()).await.unwrap();

    let ids: Vec<&str> = ids.iter().map(|id| id.as_str()).collect();
    assert_eq!(ids, vec!["a1", "a2", "a3", "b1", "b2"]);
    page1.assert_calls(1);
    page2.assert_calls(1);
}

#[tokio::test]
async fn missing_next_url_stops_after_one_request() {
    let server = MockServer::start_async().await;

    let search = server.mock(|when, then| {
        when.method(GET).path("/chats/search");
        then.status(200).json_body(json!({
            "results": [{"id": "only"}]
        }));
    });

    let ids = search_chat_ids(&client(&server), &range()).await.unwrap();

    assert_eq!(ids.len(), 1);
    search.assert_calls(1);
}

#[tokio::test]
async fn empty_next_url_is_treated_as_last_page() {
    let server = MockServer::start_async().await;

    let search = server.mock(|when, then| {
        when.method(GET).path("/chats/search");
        then.status(200).json_body(json!({
            "results": [{"id": "only"}],
            "next_url": ""
        }));
    });

    let ids = search_chat_ids(&client(&server), &range()).await.unwrap();

    assert_eq!(ids.len(), 1);
    search.assert_calls(1);
}

#[tokio::test]
async fn empty_result_set_yields_no_ids() {
    let server = MockServer::start_async().await;

    server.mock(|when, then| {
        when.method(GET).path("/chats/search");
        then.status(200)
            .json_body(json!({"results": [], "next_url": null}));
    });

    let ids = search_chat_ids(&client(&server), &range()).await.unwrap();
    assert!(ids.is_empty());
}

#[tokio::test]
async fn numeric_ids_are_accepted() {
    let server = MockServer::start_async().await;

    server.mock(|when, then| {
        when.method(GET).path("/chats/search");
        then.status(200)
            .json_body(json!({"results": [{"id": 42}, {"id": "43"}], "next_url": null}));
    });

    let ids = search_chat_ids(&client(&server), &range()).await.unwrap();
    let ids: Vec<&str> = ids.iter().map(|id| id.as_str()).collect();
    assert_eq!(ids, vec!["42", "43"]);
}

#[tokio::test]
async fn non_success_status_is_fatal_with_url_and_status() {
    let server = MockServer::start_async().await;

    server.mock(|when, then| {
        when.method(GET).path("/chats/search");
        then.status(429).body("rate limited");
    });

    let err = search_chat_ids(&client(&server), &range())
        .await
        .unwrap_err();

    match err {
        FetcherError::HttpStatus { url, status } => {
            assert!(url.contains("/chats/search"));
            assert_eq!(status, 429);
        }
        other => panic!("expected HttpStatus error, got: {other:?}"),
    }
}

#[tokio::test]
async fn failed_second_page_aborts_the_search() {
    let server = MockServer::start_async().await;

    server.mock(|when, then| {
        when.method(GET)
            .path("/chats/search")
            .query_param("q", "timestamp:[2020-03-01 TO 2020-03-30]");
        then.status(200).json_body(json!({
            "results": [{"id": "a1"}],
            "next_url": format!("{}/chats/search?page=2", server.base_url())
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/chats/search").query_param("page", "2");
        then.status(500);
    });

    let err = search_chat_ids(&client(&server), &range())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        FetcherError::HttpStatus { status: 500, .. }
    ));
}

#[tokio::test]
async fn requests_carry_basic_auth() {
    let server = MockServer::start_async().await;

    // "agent:secret" base64-encoded
    let search = server.mock(|when, then| {
        when.method(GET)
            .path("/chats/search")
            .header("authorization", "Basic YWdlbnQ6c2VjcmV0");
        then.status(200)
            .json_body(json!({"results": [], "next_url": null}));
    });

    search_chat_ids(&client(&server), &range()).await.unwrap();
    search.assert_calls(1);
}
