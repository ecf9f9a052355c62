//! End-to-end tests for the HTTP surface over a scripted engine.
//!
//! Run with: cargo test -p ytmp3 --test download_api_test

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use common::{body_bytes, body_json, FakeEngine, FakeOutcome, TestApp};
use pretty_assertions::assert_eq;
use ytmp3::error::URL_REQUIRED;

#[tokio::test]
async fn test_missing_url_is_bad_request() {
    let app = TestApp::new(FakeEngine::producing("abc123", None));

    for body in [r#"{}"#, r#"{"url": ""}"#, r#"{"url": "   "}"#, r#"{"url": null}"#] {
        let response = app.post_json(body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(body_json(response).await["error"], URL_REQUIRED);
    }

    assert_eq!(app.engine.calls(), 0);
}

#[tokio::test]
async fn test_non_json_body_is_bad_request() {
    let app = TestApp::new(FakeEngine::producing("abc123", None));

    let response = app.post_json("this is not json").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], URL_REQUIRED);

    let response = app.post_json(r#"{"url": 42}"#).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert_eq!(app.engine.calls(), 0);
}

#[tokio::test]
async fn test_invalid_url_is_bad_request() {
    let app = TestApp::new(FakeEngine::new(FakeOutcome::InvalidUrl));

    let response = app.post_json(r#"{"url": "not a url"}"#).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Invalid YouTube URL provided.");
    assert_eq!(app.engine.calls(), 1);
}

#[tokio::test]
async fn test_unavailable_video_is_not_found() {
    let app = TestApp::new(FakeEngine::new(FakeOutcome::Unavailable));

    let response = app.post_json(r#"{"url": "https://youtu.be/abc123"}"#).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "The requested video is unavailable.");
}

#[tokio::test]
async fn test_other_extraction_failure_is_server_error() {
    let app = TestApp::new(FakeEngine::new(FakeOutcome::Failed(
        "ERROR: Postprocessing: ffprobe and ffmpeg not found".to_string(),
    )));

    let response = app.post_json(r#"{"url": "https://youtu.be/abc123"}"#).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await["error"],
        "Error downloading or converting audio: ERROR: Postprocessing: ffprobe and ffmpeg not found"
    );
}

#[tokio::test]
async fn test_missing_output_file_is_server_error() {
    let app = TestApp::new(FakeEngine::new(FakeOutcome::ProduceNothing { id: "abc123".into() }));

    let response = app.post_json(r#"{"url": "https://youtu.be/abc123"}"#).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await["error"],
        "Failed to download or convert audio. File not found."
    );
}

#[tokio::test]
async fn test_engine_spawn_failure_is_server_error() {
    let app = TestApp::new(FakeEngine::new(FakeOutcome::SpawnFailure));

    let response = app.post_json(r#"{"url": "https://youtu.be/abc123"}"#).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let error = body_json(response).await["error"].as_str().unwrap().to_string();
    assert!(error.starts_with("An unexpected server error occurred: "), "{error}");
    assert!(error.contains("yt-dlp"), "{error}");
}

#[tokio::test]
async fn test_successful_download_streams_attachment() {
    let app = TestApp::new(FakeEngine::producing("abc123", Some("Example Song")));

    let response = app.post_json(r#"{"url": "  https://www.youtube.com/watch?v=abc123  "}"#).await;
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers().clone();
    assert_eq!(headers[header::CONTENT_TYPE], "audio/mpeg");
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"Example Song.mp3\""
    );

    let bytes = body_bytes(response).await;
    assert_eq!(bytes, b"ID3\x04\x00fake-mp3-frames".to_vec());
    assert_eq!(headers[header::CONTENT_LENGTH], bytes.len().to_string().as_str());

    let requests = app.engine.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url, "https://www.youtube.com/watch?v=abc123");
    assert!(requests[0].output_dir.starts_with(app.scratch.path()));
}

#[tokio::test]
async fn test_untitled_download_is_named_after_id() {
    let app = TestApp::new(FakeEngine::producing("abc123", None));

    let response = app.post_json(r#"{"url": "https://youtu.be/abc123"}"#).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"abc123.mp3\""
    );
}

#[tokio::test]
async fn test_non_ascii_title_gets_extended_filename() {
    let app = TestApp::new(FakeEngine::producing("xyz789", Some("Песня")));

    let response = app.post_json(r#"{"url": "https://youtu.be/xyz789"}"#).await;
    assert_eq!(response.status(), StatusCode::OK);

    let disposition = response.headers()[header::CONTENT_DISPOSITION].to_str().unwrap().to_string();
    assert_eq!(
        disposition,
        "attachment; filename=\"_____.mp3\"; filename*=UTF-8''%D0%9F%D0%B5%D1%81%D0%BD%D1%8F.mp3"
    );
}

#[tokio::test]
async fn test_repeated_request_runs_engine_each_time() {
    let app = TestApp::new(FakeEngine::producing("abc123", Some("Example Song")));
    let body = r#"{"url": "https://youtu.be/abc123"}"#;

    let first = app.post_json(body).await;
    let second = app.post_json(body).await;
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(body_bytes(first).await, body_bytes(second).await);

    let requests = app.engine.requests();
    assert_eq!(app.engine.calls(), 2);
    assert_ne!(requests[0].output_dir, requests[1].output_dir);
}

#[tokio::test]
async fn test_get_download_is_method_not_allowed() {
    let app = TestApp::new(FakeEngine::producing("abc123", None));

    let response = app
        .send(
            Request::builder()
                .method(Method::GET)
                .uri("/api/download")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(app.engine.calls(), 0);
}

#[tokio::test]
async fn test_health_reports_engine() {
    let app = TestApp::new(FakeEngine::producing("abc123", None));

    let response = app
        .send(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["engine"], "fake");
}

#[tokio::test]
async fn test_metrics_count_outcomes() {
    let app = TestApp::new(FakeEngine::new(FakeOutcome::Unavailable));
    app.post_json(r#"{"url": "https://youtu.be/abc123"}"#).await;

    let response = app
        .send(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let text = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(text.contains("ytmp3_download_requests_total"), "{text}");
    assert!(text.contains("outcome=\"unavailable\""), "{text}");
}

#[tokio::test]
async fn test_cors_exposes_content_disposition() {
    let app = TestApp::new(FakeEngine::producing("abc123", None));

    let response = app
        .send(
            Request::builder()
                .method(Method::POST)
                .uri("/api/download")
                .header(header::ORIGIN, "https://frontend.example")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"url": "https://youtu.be/abc123"}"#))
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let exposed = response.headers()[header::ACCESS_CONTROL_EXPOSE_HEADERS]
        .to_str()
        .unwrap()
        .to_ascii_lowercase();
    assert!(exposed.contains("content-disposition"), "{exposed}");
}
