//! End-to-end export tests against a mock chat API

use httpmock::prelude::*;
use serde_json::json;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;
use zendesk_chat_exporter::exporter::{ExportError, ExportExecutor, ExportJob, FlushMode};
use zendesk_chat_exporter::fetcher::{ApiConfig, FetcherError};
use zendesk_chat_exporter::range::DateRange;

fn executor(server: &MockServer) -> ExportExecutor {
    let config = ApiConfig::new("agent", "secret").with_base_url(server.base_url());
    ExportExecutor::new(config, 100, Duration::from_secs(60))
}

fn range() -> DateRange {
    DateRange::parse("2020-03-01", "2020-03-30").unwrap()
}

/// Mock a detail response for one id
fn mock_detail(server: &MockServer, id: &str, record_type: &str) {
    let body = json!({"id": id, "type": record_type, "session": {"browser": "Firefox"}});
    server.mock(|when, then| {
        when.method(GET).path(format!("/chats/{id}"));
        then.status(200).json_body(body.clone());
    });
}

/// Find the single final output file with the given prefix and read the id
/// column of its data rows
fn read_id_column(dir: &Path, prefix: &str) -> Vec<String> {
    let path = std::fs::read_dir(dir)
        .unwrap()
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .find(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(prefix))
        })
        .unwrap_or_else(|| panic!("no output file with prefix {prefix} in {}", dir.display()));

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let id_index = reader
        .headers()
        .unwrap()
        .iter()
        .position(|h| h == "id")
        .unwrap();
    reader
        .records()
        .map(|record| record.unwrap().get(id_index).unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn exports_two_pages_of_alternating_types() {
    let server = MockServer::start_async().await;
    let output = TempDir::new().unwrap();

    server.mock(|when, then| {
        when.method(GET)
            .path("/chats/search")
            .query_param("q", "timestamp:[2020-03-01 TO 2020-03-30]");
        then.status(200).json_body(json!({
            "results": [{"id": "c1"}, {"id": "c2"}, {"id": "c3"}],
            "next_url": format!("{}/chats/search?page=2", server.base_url())
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/chats/search").query_param("page", "2");
        then.status(200).json_body(json!({
            "results": [{"id": "c4"}, {"id": "c5"}],
            "next_url": null
        }));
    });
    for (n, id) in ["c1", "c2", "c3", "c4", "c5"].iter().enumerate() {
        let record_type = if n % 2 == 0 { "chat" } else { "offline_msg" };
        mock_detail(&server, id, record_type);
    }

    let job = ExportJob::new(range(), output.path().to_path_buf(), FlushMode::Delta);
    let summary = executor(&server).execute(&job, None).await.unwrap();

    assert_eq!(summary.chat_ids, 5);
    assert_eq!(summary.support_chats, 3);
    assert_eq!(summary.offline_messages, 2);
    assert_eq!(summary.dropped, 0);
    // 2 search pages + 5 detail fetches
    assert_eq!(summary.api_calls, 7);

    // Batches keep original identifier order
    assert_eq!(
        read_id_column(output.path(), "supportChats_"),
        vec!["c1", "c3", "c5"]
    );
    assert_eq!(
        read_id_column(output.path(), "offlineMessages_"),
        vec!["c2", "c4"]
    );
}

#[tokio::test]
async fn unknown_types_are_dropped_from_both_files() {
    let server = MockServer::start_async().await;
    let output = TempDir::new().unwrap();

    server.mock(|when, then| {
        when.method(GET).path("/chats/search");
        then.status(200).json_body(json!({
            "results": [{"id": "c1"}, {"id": "v1"}, {"id": "c2"}],
            "next_url": null
        }));
    });
    mock_detail(&server, "c1", "chat");
    mock_detail(&server, "v1", "voicemail");
    mock_detail(&server, "c2", "offline_msg");

    let job = ExportJob::new(range(), output.path().to_path_buf(), FlushMode::Delta);
    let summary = executor(&server).execute(&job, None).await.unwrap();

    assert_eq!(summary.dropped, 1);
    assert_eq!(read_id_column(output.path(), "supportChats_"), vec!["c1"]);
    assert_eq!(read_id_column(output.path(), "offlineMessages_"), vec!["c2"]);
}

#[tokio::test]
async fn detail_failure_aborts_but_flushes_accumulated_records() {
    let server = MockServer::start_async().await;
    let output = TempDir::new().unwrap();

    server.mock(|when, then| {
        when.method(GET).path("/chats/search");
        then.status(200).json_body(json!({
            "results": [{"id": "c1"}, {"id": "c2"}, {"id": "bad"}, {"id": "never"}],
            "next_url": null
        }));
    });
    mock_detail(&server, "c1", "chat");
    mock_detail(&server, "c2", "offline_msg");
    server.mock(|when, then| {
        when.method(GET).path("/chats/bad");
        then.status(500);
    });
    let never_fetched = server.mock(|when, then| {
        when.method(GET).path("/chats/never");
        then.status(200).json_body(json!({"id": "never", "type": "chat"}));
    });

    let job = ExportJob::new(range(), output.path().to_path_buf(), FlushMode::Delta);
    let err = executor(&server).execute(&job, None).await.unwrap_err();

    match err {
        ExportError::FetcherError(FetcherError::HttpStatus { url, status }) => {
            assert!(url.ends_with("/chats/bad"));
            assert_eq!(status, 500);
        }
        other => panic!("expected HttpStatus error, got: {other:?}"),
    }

    // The failing id aborts the run before later ids are attempted
    never_fetched.assert_calls(0);

    // Records fetched before the failure were still written out
    assert_eq!(read_id_column(output.path(), "supportChats_"), vec!["c1"]);
    assert_eq!(read_id_column(output.path(), "offlineMessages_"), vec!["c2"]);
}

#[tokio::test]
async fn search_failure_leaves_no_output_files() {
    let server = MockServer::start_async().await;
    let output = TempDir::new().unwrap();

    server.mock(|when, then| {
        when.method(GET).path("/chats/search");
        then.status(403);
    });

    let job = ExportJob::new(range(), output.path().to_path_buf(), FlushMode::Delta);
    let err = executor(&server).execute(&job, None).await.unwrap_err();

    assert!(matches!(
        err,
        ExportError::FetcherError(FetcherError::HttpStatus { status: 403, .. })
    ));
    assert_eq!(std::fs::read_dir(output.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn empty_range_produces_empty_final_files() {
    let server = MockServer::start_async().await;
    let output = TempDir::new().unwrap();

    server.mock(|when, then| {
        when.method(GET).path("/chats/search");
        then.status(200)
            .json_body(json!({"results": [], "next_url": null}));
    });

    let job = ExportJob::new(range(), output.path().to_path_buf(), FlushMode::Delta);
    let summary = executor(&server).execute(&job, None).await.unwrap();

    assert_eq!(summary.chat_ids, 0);
    assert_eq!(summary.support_chats, 0);
    assert_eq!(summary.offline_messages, 0);

    // Final files exist (empty); no temp files were ever flushed
    let names: Vec<String> = std::fs::read_dir(output.path())
        .unwrap()
        .filter_map(Result::ok)
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names.len(), 2);
    assert!(names.iter().any(|n| n.starts_with("supportChats_")));
    assert!(names.iter().any(|n| n.starts_with("offlineMessages_")));
    assert!(!names.iter().any(|n| n.starts_with("tmp_")));
}
