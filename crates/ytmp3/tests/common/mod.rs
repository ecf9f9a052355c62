//! Common test utilities
//!
//! A scripted [`ExtractionEngine`] plus helpers to drive the router in-process.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use tempfile::TempDir;
use tower::ServiceExt;
use ytmp3::{router, AppState};
use ytmp3core::engine::{Extraction, ExtractionEngine, ExtractionRequest};
use ytmp3core::{EngineError, ScratchDir};

/// What the fake engine does when called
#[derive(Debug, Clone)]
pub enum FakeOutcome {
    /// Report success and write `<id>.mp3` with `bytes` into the request directory
    Produce {
        id: Option<String>,
        title: Option<String>,
        bytes: Vec<u8>,
    },
    /// Report success without writing anything
    ProduceNothing { id: String },
    InvalidUrl,
    Unavailable,
    Failed(String),
    SpawnFailure,
}

pub struct FakeEngine {
    outcome: FakeOutcome,
    calls: AtomicUsize,
    requests: Mutex<Vec<ExtractionRequest>>,
}

impl FakeEngine {
    pub fn new(outcome: FakeOutcome) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn producing(id: &str, title: Option<&str>) -> Arc<Self> {
        Self::new(FakeOutcome::Produce {
            id: Some(id.to_string()),
            title: title.map(str::to_string),
            bytes: b"ID3\x04\x00fake-mp3-frames".to_vec(),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<ExtractionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExtractionEngine for FakeEngine {
    fn name(&self) -> &str {
        "fake"
    }

    async fn extract(&self, request: &ExtractionRequest) -> Result<Extraction, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        match &self.outcome {
            FakeOutcome::Produce { id, title, bytes } => {
                let extraction = Extraction::new(&request.output_dir, id.clone(), title.clone());
                tokio::fs::write(&extraction.file_path, bytes).await?;
                Ok(extraction)
            }
            FakeOutcome::ProduceNothing { id } => Ok(Extraction::new(&request.output_dir, Some(id.clone()), None)),
            FakeOutcome::InvalidUrl => Err(EngineError::InvalidUrl(format!(
                "ERROR: [generic] '{}' is not a valid URL.",
                request.url
            ))),
            FakeOutcome::Unavailable => Err(EngineError::Unavailable(
                "ERROR: [youtube] abc123: Video unavailable".to_string(),
            )),
            FakeOutcome::Failed(message) => Err(EngineError::Failed(message.clone())),
            FakeOutcome::SpawnFailure => Err(EngineError::Spawn {
                bin: "yt-dlp".to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory"),
            }),
        }
    }
}

/// Router over a fake engine and a fresh scratch root
pub struct TestApp {
    pub router: Router,
    pub engine: Arc<FakeEngine>,
    pub scratch: TempDir,
}

impl TestApp {
    pub fn new(engine: Arc<FakeEngine>) -> Self {
        let scratch = tempfile::tempdir().unwrap();
        let state = AppState::new(engine.clone(), ScratchDir::new(scratch.path().join("scratch")));
        Self {
            router: router(state),
            engine,
            scratch,
        }
    }

    pub async fn post_json(&self, body: &str) -> Response<Body> {
        self.send(
            Request::builder()
                .method(Method::POST)
                .uri("/api/download")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
