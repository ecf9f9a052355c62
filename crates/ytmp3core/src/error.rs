use thiserror::Error;

/// Failure reported by an [`ExtractionEngine`](crate::engine::ExtractionEngine).
///
/// The first three variants are the engine's own verdict on the media; the
/// rest mean the engine could not be driven at all.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine rejected the input as not being a URL it can handle
    #[error("{0}")]
    InvalidUrl(String),

    /// The media exists in URL form but cannot be fetched (private, removed, blocked)
    #[error("{0}")]
    Unavailable(String),

    /// Download or conversion failed for any other reason
    #[error("{0}")]
    Failed(String),

    /// The engine binary could not be started
    #[error("failed to run {bin}: {source}")]
    Spawn {
        bin: String,
        #[source]
        source: std::io::Error,
    },

    /// The engine finished but its report could not be parsed
    #[error("unreadable engine output: {0}")]
    Output(#[from] serde_json::Error),

    /// Local IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// Returns subcategory for metrics and logs
    pub fn subcategory(&self) -> &'static str {
        match self {
            EngineError::InvalidUrl(_) => "invalid_url",
            EngineError::Unavailable(_) => "unavailable",
            EngineError::Failed(_) => "failed",
            EngineError::Spawn { .. } => "spawn",
            EngineError::Output(_) => "output",
            EngineError::Io(_) => "io",
        }
    }
}

/// Configuration errors raised while reading the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    InvalidValue { key: &'static str, value: String, reason: String },
}
