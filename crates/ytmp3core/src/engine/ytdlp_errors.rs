//! Analysis of yt-dlp failures
//!
//! yt-dlp reports everything through stderr text and a non-zero exit code.
//! This is the only place that looks at that text; callers get an
//! [`EngineError`] variant.

use crate::error::EngineError;

/// Types of yt-dlp errors the service distinguishes
#[derive(Debug, Clone, PartialEq)]
pub enum YtDlpErrorType {
    /// The argument is not something yt-dlp recognises as a URL
    InvalidUrl,
    /// Video is private, removed or region-blocked
    VideoUnavailable,
    /// Anything else
    Unknown,
}

/// Analyzes yt-dlp stderr and determines the error type
pub fn analyze_ytdlp_error(stderr: &str) -> YtDlpErrorType {
    let stderr_lower = stderr.to_lowercase();

    if stderr_lower.contains("is not a valid url") {
        return YtDlpErrorType::InvalidUrl;
    }

    if stderr_lower.contains("video unavailable") {
        return YtDlpErrorType::VideoUnavailable;
    }

    YtDlpErrorType::Unknown
}

/// Picks the line worth reporting out of yt-dlp stderr.
///
/// yt-dlp prefixes fatal problems with `ERROR:`; the first such line is what
/// its Python API would raise. Falls back to the whole trimmed stderr.
pub fn error_summary(stderr: &str) -> Option<String> {
    if let Some(line) = stderr.lines().map(str::trim).find(|line| line.starts_with("ERROR:")) {
        return Some(line.to_string());
    }

    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Turns a failed yt-dlp run into a typed engine error.
pub fn classify_failure(stderr: &str, exit_code: Option<i32>) -> EngineError {
    let message = error_summary(stderr).unwrap_or_else(|| match exit_code {
        Some(code) => format!("yt-dlp exited with status {}", code),
        None => "yt-dlp was terminated by a signal".to_string(),
    });

    match analyze_ytdlp_error(stderr) {
        YtDlpErrorType::InvalidUrl => EngineError::InvalidUrl(message),
        YtDlpErrorType::VideoUnavailable => EngineError::Unavailable(message),
        YtDlpErrorType::Unknown => EngineError::Failed(message),
    }
}
