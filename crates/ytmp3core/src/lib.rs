//! ytmp3core - everything behind the `/api/download` endpoint except HTTP
//!
//! # Module Structure
//!
//! - `config`: Environment-driven configuration and the fixed audio preset
//! - `error`: Engine and configuration errors
//! - `engine`: The extraction capability and its yt-dlp implementation
//! - `scratch`: Per-request scratch directories
//! - `logging`: Logger initialization and startup diagnostics
//! - `metrics`: Prometheus counters for the download endpoint
//! - `utils`: Attachment filename helpers

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod scratch;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::Config;
pub use engine::{Extraction, ExtractionEngine, ExtractionRequest, YtDlpEngine};
pub use error::{ConfigError, EngineError};
pub use scratch::ScratchDir;
