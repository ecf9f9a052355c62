//! Extraction engine abstraction.
//!
//! The HTTP layer only sees [`ExtractionEngine`]: give it a URL and a
//! directory, get back the id, title and path of an MP3, or a typed
//! [`EngineError`]. How a backend decides that a URL is invalid or a video is
//! unavailable stays inside the backend.
//!
//! Built-in backends:
//! - `YtDlpEngine` drives the `yt-dlp` binary (with ffmpeg post-processing)

pub mod ytdlp;
pub mod ytdlp_errors;

pub use ytdlp::YtDlpEngine;

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::config::audio;
use crate::error::EngineError;

/// Request parameters for one extraction.
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    /// URL exactly as the caller sent it
    pub url: String,
    /// Directory the engine must write into
    pub output_dir: PathBuf,
}

impl ExtractionRequest {
    pub fn new(url: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            output_dir: output_dir.into(),
        }
    }
}

/// Output of a successful extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// Content identifier reported by the engine
    pub id: String,
    /// Display title, if the engine knows one
    pub title: Option<String>,
    /// Where the MP3 is expected to be
    pub file_path: PathBuf,
}

impl Extraction {
    /// Build the result for `id`, deriving the file path the preset produces.
    pub fn new(output_dir: &Path, id: Option<String>, title: Option<String>) -> Self {
        let id = id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| audio::FALLBACK_ID.to_string());
        let file_path = expected_output_path(output_dir, &id);
        Self { id, title, file_path }
    }
}

/// Path the fixed preset writes for a given content id.
pub fn expected_output_path(output_dir: &Path, id: &str) -> PathBuf {
    output_dir.join(format!("{}.{}", id, audio::CODEC))
}

/// Trait for extraction backends.
#[async_trait]
pub trait ExtractionEngine: Send + Sync {
    /// Human-readable name of this engine (e.g., "yt-dlp")
    fn name(&self) -> &str;

    /// Fetch the media behind `request.url`, keep its best audio stream and
    /// transcode it to MP3 inside `request.output_dir`.
    async fn extract(&self, request: &ExtractionRequest) -> Result<Extraction, EngineError>;
}
