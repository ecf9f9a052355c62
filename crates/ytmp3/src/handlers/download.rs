//! POST /api/download: video URL in, MP3 attachment out.

use axum::body::Body;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use tokio_util::io::ReaderStream;
use ytmp3core::config::audio;
use ytmp3core::engine::ExtractionRequest;
use ytmp3core::metrics;
use ytmp3core::utils::{attachment_filename, content_disposition};

use crate::error::ApiError;
use crate::server::AppState;

/// Request body
#[derive(Debug, Deserialize)]
pub struct DownloadBody {
    pub url: Option<String>,
}

/// Handler for `POST /api/download`
///
/// A body that is not JSON, or has no non-blank string `url`, is a 400.
pub async fn download_audio(
    State(state): State<AppState>,
    body: Result<Json<DownloadBody>, JsonRejection>,
) -> Result<Response, ApiError> {
    let result = handle(&state, body).await;
    match result {
        Ok(_) => metrics::record_outcome("success"),
        Err(ref e) => metrics::record_outcome(e.outcome()),
    }
    result
}

async fn handle(state: &AppState, body: Result<Json<DownloadBody>, JsonRejection>) -> Result<Response, ApiError> {
    let url = match body {
        Ok(Json(body)) => body.url,
        Err(rejection) => {
            log::warn!("Rejected download body: {}", rejection.body_text());
            None
        }
    };
    let url = url
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .ok_or(ApiError::BadRequest)?;

    let output_dir = state.scratch.request_dir().await.map_err(|e| {
        log::error!(
            "Failed to prepare scratch directory under {}: {}",
            state.scratch.root().display(),
            e
        );
        ApiError::internal(e)
    })?;

    let request = ExtractionRequest::new(url, output_dir);
    let extraction = state.engine.extract(&request).await?;

    if !tokio::fs::try_exists(&extraction.file_path).await.unwrap_or(false) {
        log::error!("File not found after download attempt: {}", extraction.file_path.display());
        return Err(ApiError::ExtractionIncomplete);
    }

    let filename = attachment_filename(extraction.title.as_deref(), &extraction.id);
    log::info!("File ready for sending: {} as {:?}", extraction.file_path.display(), filename);

    let file = tokio::fs::File::open(&extraction.file_path).await.map_err(ApiError::internal)?;
    let len = file.metadata().await.map_err(ApiError::internal)?.len();

    Response::builder()
        .header(header::CONTENT_TYPE, audio::MIME_TYPE)
        .header(header::CONTENT_DISPOSITION, content_disposition(&filename))
        .header(header::CONTENT_LENGTH, len)
        .body(Body::from_stream(ReaderStream::new(file)))
        .map_err(ApiError::internal)
}
