//! Logging initialization and configuration checking
//!
//! This module provides:
//! - Logger initialization (console + optional file)
//! - Startup diagnostics for the extraction engine

use std::fs::File;
use std::path::Path;

use anyhow::Result;
use simplelog::*;

use crate::engine::ytdlp::binary_version;

/// Initialize logger for console output and, if a path is given, a log file
pub fn init_logger(level: LevelFilter, log_file_path: Option<&Path>) -> Result<()> {
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];

    if let Some(path) = log_file_path {
        let log_file = File::create(path)
            .map_err(|e| anyhow::anyhow!("Failed to create log file {}: {}", path.display(), e))?;
        loggers.push(WriteLogger::new(level, Config::default(), log_file));
    }

    CombinedLogger::init(loggers).map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    Ok(())
}

/// Logs the engine configuration at application startup
///
/// Checks that yt-dlp and ffmpeg can be started, that the scratch root is
/// usable and that a configured cookies file exists. Problems are logged,
/// never fatal: the first request will report them to the caller anyway.
pub async fn log_engine_configuration(config: &crate::config::Config) {
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    log::info!("Engine Configuration Check");
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    match binary_version(&config.ytdl_bin, "--version").await {
        Ok(version) => log::info!("✅ yt-dlp: {} ({})", config.ytdl_bin, version),
        Err(e) => log::error!("❌ yt-dlp: {} ({}) - downloads will FAIL", config.ytdl_bin, e),
    }

    match binary_version(&config.ffmpeg_bin, "-version").await {
        Ok(version) => log::info!("✅ ffmpeg: {}", version),
        Err(e) => log::error!("❌ ffmpeg: {} ({}) - MP3 conversion will FAIL", config.ffmpeg_bin, e),
    }

    match tokio::fs::create_dir_all(&config.scratch_dir).await {
        Ok(()) => log::info!("✅ Scratch directory: {}", config.scratch_dir.display()),
        Err(e) => log::error!("❌ Scratch directory: {} ({})", config.scratch_dir.display(), e),
    }

    match config.cookies_file {
        Some(ref path) if path.exists() => log::info!("✅ YTDL_COOKIES_FILE: {}", path.display()),
        Some(ref path) => log::warn!("⚠️  YTDL_COOKIES_FILE: {} (FILE NOT FOUND!)", path.display()),
        None => log::info!("YTDL_COOKIES_FILE: not set"),
    }

    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
}
