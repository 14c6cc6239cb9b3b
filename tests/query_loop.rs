//! Integration tests for the interactive query loop
//!
//! Drives `QueryLoop` with scripted input and a fake fetcher, so no network is used.

use std::io::Cursor;

use serde_json::{Value, json};
use tempfile::TempDir;

use cotag::cache::CacheStore;
use cotag::error::{CotagError, Result};
use cotag::repl::{FAREWELL, QueryLoop};

const NEEDS_HASH: &str = "Please include # to search hashtag";
use cotag::twitter::{SEARCH_URL, SearchFetcher};

/// Fetcher that records every request and answers with a canned body
struct RecordingFetcher {
    requests: Vec<Vec<(String, String)>>,
    response: Option<Value>,
}

impl RecordingFetcher {
    fn answering(response: Value) -> Self {
        Self {
            requests: Vec::new(),
            response: Some(response),
        }
    }

    fn failing() -> Self {
        Self {
            requests: Vec::new(),
            response: None,
        }
    }
}

impl SearchFetcher for RecordingFetcher {
    async fn fetch(&mut self, _baseurl: &str, params: &[(&str, String)]) -> Result<Value> {
        self.requests.push(
            params
                .iter()
                .map(|(name, value)| (name.to_string(), value.clone()))
                .collect(),
        );
        self.response.clone().ok_or(CotagError::Unauthorized)
    }
}

fn march_madness() -> Value {
    json!({
        "statuses": [
            { "entities": { "hashtags": [
                { "text": "MarchMadness2021" }, { "text": "UMich" }, { "text": "GoBlue" }
            ] } },
            { "entities": { "hashtags": [
                { "text": "marchmadness2021" }, { "text": "UMich" }, { "text": "FinalFour" }
            ] } },
            { "entities": { "hashtags": [
                { "text": "UMich" }, { "text": "GoBlue" }, { "text": "NCAA" }
            ] } }
        ]
    })
}

async fn run_script(
    fetcher: RecordingFetcher,
    script: &str,
) -> (QueryLoop<RecordingFetcher>, String, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let store = CacheStore::load(temp_dir.path().join("twitter_cache.json"));
    let mut query_loop = QueryLoop::new(store, fetcher, SEARCH_URL, 100);

    let mut output = Vec::new();
    query_loop
        .run(Cursor::new(script.to_string()), &mut output)
        .await
        .unwrap();

    (query_loop, String::from_utf8(output).unwrap(), temp_dir)
}

#[tokio::test]
async fn test_missing_hash_reprompts_without_request() {
    let (query_loop, output, _dir) =
        run_script(RecordingFetcher::answering(march_madness()), "marchmadness\nexit\n").await;

    assert!(output.contains(&format!("{} (got \"marchmadness\")", NEEDS_HASH)));
    assert!(output.ends_with(&format!("{}\n", FAREWELL)));
    assert!(query_loop.fetcher().requests.is_empty());
}

#[tokio::test]
async fn test_exit_stops_without_request() {
    let (query_loop, output, _dir) =
        run_script(RecordingFetcher::answering(march_madness()), "exit\n#ignored\n").await;

    assert!(output.contains(FAREWELL));
    assert!(!output.contains("making new request"));
    assert!(query_loop.fetcher().requests.is_empty());
}

#[tokio::test]
async fn test_end_of_input_stops() {
    let (_, output, _dir) = run_script(RecordingFetcher::answering(march_madness()), "").await;
    assert!(output.contains(FAREWELL));
}

#[tokio::test]
async fn test_query_is_lowercased_and_ranked() {
    let (query_loop, output, _dir) = run_script(
        RecordingFetcher::answering(march_madness()),
        "#MarchMadness2021\nexit\n",
    )
    .await;

    assert_eq!(
        query_loop.fetcher().requests,
        vec![vec![
            ("q".to_string(), "#marchmadness2021".to_string()),
            ("count".to_string(), "100".to_string()),
        ]]
    );
    assert!(output.contains("making new request"));
    assert!(output.contains(
        "Top Three commonly cooccurring hashtag with #MarchMadness2021 is #UMich, #GoBlue, #FinalFour."
    ));
}

#[tokio::test]
async fn test_repeated_query_is_served_from_cache() {
    let (query_loop, output, _dir) = run_script(
        RecordingFetcher::answering(march_madness()),
        "#MarchMadness2021\n#marchmadness2021\nexit\n",
    )
    .await;

    assert_eq!(query_loop.fetcher().requests.len(), 1);
    assert!(output.contains("making new request"));
    assert!(output.contains("fetching cached data"));
    assert_eq!(query_loop.store().len(), 1);
}

#[tokio::test]
async fn test_insufficient_data_is_reported_and_loop_continues() {
    let sparse = json!({ "statuses": [ { "entities": { "hashtags": [
        { "text": "Lonely" }, { "text": "Tag" }
    ] } } ] });

    let (_, output, _dir) =
        run_script(RecordingFetcher::answering(sparse), "#lonelyquery\nnohash\nexit\n").await;

    assert!(output.contains("Not enough data for #lonelyquery"));
    assert!(output.contains(NEEDS_HASH));
    assert!(output.contains(FAREWELL));
}

#[tokio::test]
async fn test_upstream_failure_is_reported_and_loop_continues() {
    let (query_loop, output, _dir) =
        run_script(RecordingFetcher::failing(), "#first\n#second\nexit\n").await;

    assert_eq!(output.matches("Search for").count(), 2);
    assert!(output.contains("Authentication failed"));
    assert!(output.contains(FAREWELL));
    assert!(query_loop.store().is_empty());
}
