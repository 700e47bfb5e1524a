//! API endpoint integration tests

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use base64::Engine as _;
use tower::ServiceExt;

use aera_gateway::api::{assist, health, ApiState};
use aera_gateway::Pipeline;

mod common;
use common::{FakeSearch, FakeSynthesizer, FakeTranscriber};

/// Build a test API router around an optional pipeline
fn build_test_router(pipeline: Option<Pipeline>) -> axum::Router {
    let state = Arc::new(ApiState { pipeline });

    axum::Router::new()
        .nest("/api", assist::router(state.clone()))
        .merge(health::router())
        .merge(health::status_router(state))
}

fn working_pipeline() -> Pipeline {
    Pipeline::new(
        Arc::new(FakeTranscriber::saying("weather in Paris")),
        Arc::new(FakeSearch::from_snippets(&["Sunny, 20C", "light wind"])),
        Arc::new(FakeSynthesizer::working()),
    )
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn health_endpoint() {
    let app = build_test_router(None);

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn status_reports_voice_availability() {
    let app = build_test_router(None);
    let response = app
        .oneshot(Request::builder().uri("/api/status").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let json = json_body(response).await;
    assert_eq!(json["voice_available"], false);

    let app = build_test_router(Some(working_pipeline()));
    let response = app
        .oneshot(Request::builder().uri("/api/status").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let json = json_body(response).await;
    assert_eq!(json["voice_available"], true);
}

#[tokio::test]
async fn assist_without_pipeline_is_unavailable() {
    let app = build_test_router(None);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/assist")
                .body(Body::from("audio-bytes"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = json_body(response).await;
    assert_eq!(json["error"]["code"], "not_configured");
}

#[tokio::test]
async fn assist_rejects_empty_audio() {
    let app = build_test_router(Some(working_pipeline()));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/assist")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["error"]["code"], "bad_request");
}

#[tokio::test]
async fn assist_happy_path_returns_all_three_artifacts() {
    let app = build_test_router(Some(working_pipeline()));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/assist")
                .header("content-type", "audio/wav")
                .body(Body::from("recorded-audio"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;

    assert_eq!(json["transcript"], "weather in Paris");
    assert_eq!(json["summary"], "Sunny, 20C light wind");

    let audio = base64::engine::general_purpose::STANDARD
        .decode(json["audio"].as_str().unwrap())
        .unwrap();
    assert_eq!(audio, b"MP3:Sunny, 20C light wind");
}

#[tokio::test]
async fn assist_maps_unintelligible_audio() {
    let pipeline = Pipeline::new(
        Arc::new(FakeTranscriber::saying("")),
        Arc::new(FakeSearch::answering("unused")),
        Arc::new(FakeSynthesizer::working()),
    );
    let app = build_test_router(Some(pipeline));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/assist")
                .body(Body::from("mumbling"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = json_body(response).await;
    assert_eq!(json["error"]["code"], "unintelligible_audio");
}

#[tokio::test]
async fn assist_maps_stt_outage() {
    let pipeline = Pipeline::new(
        Arc::new(FakeTranscriber::unreachable()),
        Arc::new(FakeSearch::answering("unused")),
        Arc::new(FakeSynthesizer::working()),
    );
    let app = build_test_router(Some(pipeline));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/assist")
                .body(Body::from("audio"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = json_body(response).await;
    assert_eq!(json["error"]["code"], "stt_unavailable");
}
