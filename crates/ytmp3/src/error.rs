//! Error type of the download endpoint.
//!
//! Every handler returns `Result<T, ApiError>`; [`IntoResponse`] turns the
//! error into a `{ "error": message }` body with the matching status code and
//! logs it, so no failure path is silent.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use ytmp3core::EngineError;

/// Message for a missing or empty `url` field
pub const URL_REQUIRED: &str = "YouTube URL is required.";

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request carried no usable URL
    #[error("YouTube URL is required.")]
    BadRequest,

    /// The engine rejected the URL as malformed
    #[error("Invalid YouTube URL provided.")]
    InvalidUrl,

    /// The media behind the URL cannot be fetched
    #[error("The requested video is unavailable.")]
    ResourceUnavailable,

    /// The engine failed to download or convert
    #[error("Error downloading or converting audio: {0}")]
    ExtractionFailed(String),

    /// The engine reported success but the MP3 is not where it should be
    #[error("Failed to download or convert audio. File not found.")]
    ExtractionIncomplete,

    /// Anything else: scratch directory, engine startup, IO while streaming
    #[error("An unexpected server error occurred: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest | ApiError::InvalidUrl => StatusCode::BAD_REQUEST,
            ApiError::ResourceUnavailable => StatusCode::NOT_FOUND,
            ApiError::ExtractionFailed(_) | ApiError::ExtractionIncomplete | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Returns the outcome label used by metrics
    pub fn outcome(&self) -> &'static str {
        match self {
            ApiError::BadRequest => "bad_request",
            ApiError::InvalidUrl => "invalid_url",
            ApiError::ResourceUnavailable => "unavailable",
            ApiError::ExtractionFailed(_) => "extraction_failed",
            ApiError::ExtractionIncomplete => "file_not_found",
            ApiError::Internal(_) => "internal",
        }
    }

    pub fn internal(err: impl std::fmt::Display) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        log::error!("{} error: {}", err.subcategory(), err);
        match err {
            EngineError::InvalidUrl(_) => ApiError::InvalidUrl,
            EngineError::Unavailable(_) => ApiError::ResourceUnavailable,
            EngineError::Failed(message) => ApiError::ExtractionFailed(message),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            log::error!("{} {}: {}", status.as_u16(), self.outcome(), message);
        } else {
            log::warn!("{} {}: {}", status.as_u16(), self.outcome(), message);
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}
