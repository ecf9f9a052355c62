use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use simplelog::LevelFilter;

use crate::error::ConfigError;

/// Fixed audio preset handed to the extraction engine
pub mod audio {
    /// yt-dlp format selector: best audio-only stream, else best muxed stream
    pub const FORMAT_SELECTOR: &str = "bestaudio/best";

    /// Target codec of the post-processing step
    pub const CODEC: &str = "mp3";

    /// Target MP3 bitrate (kbps)
    pub const BITRATE_KBPS: u32 = 192;

    /// Media type of the produced file
    pub const MIME_TYPE: &str = "audio/mpeg";

    /// Output template, relative to the request's scratch directory
    pub const OUTPUT_TEMPLATE: &str = "%(id)s.%(ext)s";

    /// Identifier used when the engine does not report one
    pub const FALLBACK_ID: &str = "audio";
}

/// Standalone server defaults
pub mod server {
    use std::net::{IpAddr, Ipv4Addr};

    /// Port for local standalone runs; keeps clear of a frontend dev server on 3000
    pub const DEFAULT_PORT: u16 = 5353;

    pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
}

/// Service configuration.
///
/// Built once at startup and handed to whatever needs it; nothing reads the
/// environment after [`Config::from_env`] returns.
#[derive(Debug, Clone)]
pub struct Config {
    /// yt-dlp binary (`YTDL_BIN`, default `yt-dlp`)
    pub ytdl_bin: String,
    /// ffmpeg binary probed at startup (`FFMPEG_BIN`, default `ffmpeg`)
    pub ffmpeg_bin: String,
    /// Netscape cookies file passed to yt-dlp (`YTDL_COOKIES_FILE`)
    pub cookies_file: Option<PathBuf>,
    /// Root for per-request scratch directories (`SCRATCH_DIR`, then `TEMP_FILES_DIR`)
    pub scratch_dir: PathBuf,
    /// Bind address of the standalone server (`HOST`, `PORT`)
    pub bind_addr: SocketAddr,
    /// Log verbosity (`LOG_LEVEL`, default `info`)
    pub log_level: LevelFilter,
    /// Optional log file (`LOG_FILE_PATH`)
    pub log_file_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ytdl_bin: "yt-dlp".to_string(),
            ffmpeg_bin: "ffmpeg".to_string(),
            cookies_file: None,
            scratch_dir: env::temp_dir(),
            bind_addr: SocketAddr::new(server::DEFAULT_HOST, server::DEFAULT_PORT),
            log_level: LevelFilter::Info,
            log_file_path: None,
        }
    }
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Empty and whitespace-only values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key).and_then(|value| {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
        };

        let defaults = Self::default();

        let host = match get("HOST") {
            Some(raw) => raw.parse::<IpAddr>().map_err(|e| ConfigError::InvalidValue {
                key: "HOST",
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => server::DEFAULT_HOST,
        };

        let port = match get("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::InvalidValue {
                key: "PORT",
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => server::DEFAULT_PORT,
        };

        let log_level = match get("LOG_LEVEL") {
            Some(raw) => raw.parse::<LevelFilter>().map_err(|_| ConfigError::InvalidValue {
                key: "LOG_LEVEL",
                value: raw.clone(),
                reason: "expected one of off, error, warn, info, debug, trace".to_string(),
            })?,
            None => defaults.log_level,
        };

        let scratch_dir = get("SCRATCH_DIR")
            .or_else(|| get("TEMP_FILES_DIR"))
            .map(|raw| expand_path(&raw))
            .unwrap_or(defaults.scratch_dir);

        Ok(Self {
            ytdl_bin: get("YTDL_BIN").unwrap_or(defaults.ytdl_bin),
            ffmpeg_bin: get("FFMPEG_BIN").unwrap_or(defaults.ffmpeg_bin),
            cookies_file: get("YTDL_COOKIES_FILE").map(|raw| expand_path(&raw)),
            scratch_dir,
            bind_addr: SocketAddr::new(host, port),
            log_level,
            log_file_path: get("LOG_FILE_PATH").map(|raw| expand_path(&raw)),
        })
    }

    /// Same configuration bound to a different address.
    pub fn with_bind(mut self, host: Option<IpAddr>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.bind_addr.set_ip(host);
        }
        if let Some(port) = port {
            self.bind_addr.set_port(port);
        }
        self
    }
}

/// Tilde-expand a configured path.
fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).into_owned())
}
