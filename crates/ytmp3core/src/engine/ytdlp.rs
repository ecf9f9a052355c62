//! YtDlpEngine: extraction backend powered by the yt-dlp binary.
//!
//! One invocation per request: best audio stream, ffmpeg post-processing to
//! MP3 at the fixed bitrate, single item only, quiet. `--dump-single-json`
//! together with `--no-simulate` makes yt-dlp print the info dict after the
//! download, which is where the id and title come from.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Instant;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;

use crate::config::{audio, Config};
use crate::engine::ytdlp_errors::classify_failure;
use crate::engine::{Extraction, ExtractionEngine, ExtractionRequest};
use crate::error::EngineError;
use crate::metrics;

/// Fields of the yt-dlp info dict this service reads.
#[derive(Debug, Deserialize)]
struct YtDlpInfo {
    id: Option<String>,
    title: Option<String>,
}

/// Extraction engine running `yt-dlp` as a subprocess.
#[derive(Debug, Clone)]
pub struct YtDlpEngine {
    bin: String,
    cookies_file: Option<PathBuf>,
}

impl YtDlpEngine {
    pub fn new(bin: impl Into<String>) -> Self {
        Self {
            bin: bin.into(),
            cookies_file: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            bin: config.ytdl_bin.clone(),
            cookies_file: config.cookies_file.clone(),
        }
    }

    /// Pass a Netscape-format cookies file to every invocation.
    pub fn with_cookies_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.cookies_file = Some(path.into());
        self
    }

    pub fn bin(&self) -> &str {
        &self.bin
    }

    /// Full argument list for one extraction.
    pub fn build_args(&self, request: &ExtractionRequest) -> Vec<OsString> {
        let output_template = request.output_dir.join(audio::OUTPUT_TEMPLATE);

        let mut args: Vec<OsString> = [
            "-f",
            audio::FORMAT_SELECTOR,
            "--extract-audio",
            "--audio-format",
            audio::CODEC,
            "--audio-quality",
        ]
        .into_iter()
        .map(OsString::from)
        .collect();
        args.push(format!("{}K", audio::BITRATE_KBPS).into());
        args.push("-o".into());
        args.push(output_template.into_os_string());
        args.extend(
            [
                "--no-playlist",
                "--quiet",
                "--no-warnings",
                "--no-simulate",
                "--dump-single-json",
            ]
            .into_iter()
            .map(OsString::from),
        );

        if let Some(ref cookies) = self.cookies_file {
            args.push("--cookies".into());
            args.push(cookies.clone().into_os_string());
        }

        // The URL is caller input; never let it be read as an option.
        args.push("--".into());
        args.push(request.url.clone().into());
        args
    }
}

#[async_trait]
impl ExtractionEngine for YtDlpEngine {
    fn name(&self) -> &str {
        "yt-dlp"
    }

    async fn extract(&self, request: &ExtractionRequest) -> Result<Extraction, EngineError> {
        let args = self.build_args(request);
        log::info!("Running {} for {} into {}", self.bin, request.url, request.output_dir.display());
        log::debug!("{} args: {:?}", self.bin, args);

        let started = Instant::now();
        let output = Command::new(&self.bin)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| EngineError::Spawn {
                bin: self.bin.clone(),
                source,
            })?;
        metrics::EXTRACTION_DURATION_SECONDS.observe(started.elapsed().as_secs_f64());

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            log::error!(
                "{} failed for {} (status {:?}): {}",
                self.bin,
                request.url,
                output.status.code(),
                stderr.trim()
            );
            return Err(classify_failure(&stderr, output.status.code()));
        }

        if !stderr.trim().is_empty() {
            log::debug!("{} stderr: {}", self.bin, stderr.trim());
        }

        let info = parse_info(&String::from_utf8_lossy(&output.stdout))?;
        let extraction = Extraction::new(&request.output_dir, info.id, info.title);
        log::info!(
            "{} finished in {:.1}s: id={} title={:?}",
            self.bin,
            started.elapsed().as_secs_f64(),
            extraction.id,
            extraction.title
        );
        Ok(extraction)
    }
}

/// Parse the info dict yt-dlp prints last on stdout.
fn parse_info(stdout: &str) -> Result<YtDlpInfo, EngineError> {
    let line = stdout
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| line.starts_with('{'))
        .unwrap_or_default();
    Ok(serde_json::from_str(line)?)
}

/// First line of `<bin> <version_arg>` output, e.g. `yt-dlp --version` or `ffmpeg -version`.
pub async fn binary_version(bin: &str, version_arg: &str) -> Result<String, EngineError> {
    let output = Command::new(bin)
        .arg(version_arg)
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|source| EngineError::Spawn {
            bin: bin.to_string(),
            source,
        })?;

    if !output.status.success() {
        return Err(EngineError::Failed(format!(
            "{} {} exited with status {:?}",
            bin,
            version_arg,
            output.status.code()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()
        .unwrap_or_default()
        .trim()
        .to_string())
}
