//! SearchClient integration tests against a mock HTTP server
//!
//! Covers snippet aggregation, sentinel outcomes, and the bounded
//! retry behavior without touching the real SerpAPI.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use aera_gateway::search::retry::RetryPolicy;
use aera_gateway::{SearchClient, SearchProvider, NO_RESULTS, SEARCH_FAILED, SEARCH_UNAVAILABLE};

/// Retry policy with negligible delays so tests run fast
fn fast_policy() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        base_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(5),
    }
}

fn client_for(server: &MockServer) -> SearchClient {
    SearchClient::with_endpoint(
        "test-key".to_string(),
        format!("{}/search.json", server.uri()),
    )
    .unwrap()
    .with_retry_policy(fast_policy())
}

#[tokio::test]
async fn aggregates_snippets_from_organic_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("api_key", "test-key"))
        .and(query_param("q", "weather in Paris"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "organic_results": [
                { "title": "a", "snippet": "Sunny, 20C" },
                { "title": "b", "snippet": "light wind" },
            ]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert_eq!(client.answer("weather in Paris").await, "Sunny, 20C light wind");
}

#[tokio::test]
async fn missing_snippets_are_skipped_not_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "organic_results": [
                { "snippet": "foo" },
                { "title": "no snippet here" },
                { "snippet": "bar" },
            ]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let answer = client.answer("q").await;
    assert!(answer.starts_with("foo"));
    assert!(answer.ends_with("bar"));
}

#[tokio::test]
async fn empty_results_yield_no_results_sentinel() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "organic_results": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    // A successful-but-empty response is not a failure: exactly one
    // request, no retries
    assert_eq!(client.answer("nothing matches this").await, NO_RESULTS);
}

#[tokio::test]
async fn absent_results_field_yields_no_results_sentinel() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "search_metadata": {"id": "x"} })),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert_eq!(client.answer("q").await, NO_RESULTS);
}

#[tokio::test]
async fn server_error_is_retried_then_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "organic_results": [ { "snippet": "recovered" } ]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert_eq!(client.answer("flaky").await, "recovered");
}

#[tokio::test]
async fn exhausted_retries_yield_unavailable_sentinel() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    let client = client_for(&server);
    // Three attempts (the policy budget), then the sentinel
    assert_eq!(client.answer("always failing").await, SEARCH_UNAVAILABLE);
}

#[tokio::test]
async fn client_error_fails_immediately_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert_eq!(client.answer("bad key").await, SEARCH_FAILED);
}

#[tokio::test]
async fn connection_failure_never_raises() {
    // Point at a server that is no longer listening. A non-pooled
    // server is required: `MockServer::start()` hands out pooled
    // instances that keep listening (and answer 404) after drop.
    let server = MockServer::builder().start().await;
    let uri = server.uri();
    drop(server);

    let client = SearchClient::with_endpoint("test-key".to_string(), format!("{uri}/search.json"))
        .unwrap()
        .with_retry_policy(fast_policy());

    assert_eq!(client.answer("anyone there").await, SEARCH_UNAVAILABLE);
}

#[tokio::test]
async fn malformed_body_yields_failure_sentinel() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert_eq!(client.answer("q").await, SEARCH_FAILED);
}
