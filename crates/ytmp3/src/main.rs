use anyhow::Result;
use dotenvy::dotenv;

use ytmp3::cli::{Cli, Commands};
use ytmp3core::engine::ytdlp::binary_version;
use ytmp3core::logging::{init_logger, log_engine_configuration};
use ytmp3core::Config;

/// Main entry point
///
/// Parses CLI arguments and dispatches to the appropriate subcommand.
///
/// # Errors
/// Returns an error if configuration, logging or the server fails.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Load environment variables from .env if present
    let _ = dotenv();

    let config = Config::from_env()?;
    init_logger(config.log_level, config.log_file_path.as_deref())?;

    match cli.command {
        Some(Commands::Serve { host, port }) => run_server(config.with_bind(host, port)).await,
        Some(Commands::Check) => run_check(&config).await,
        None => {
            log::info!("No command specified, running server");
            run_server(config).await
        }
    }
}

async fn run_server(config: Config) -> Result<()> {
    log_engine_configuration(&config).await;
    ytmp3::serve(&config).await
}

/// Print yt-dlp / ffmpeg versions; fails if either is missing.
async fn run_check(config: &Config) -> Result<()> {
    let mut missing = Vec::new();

    for (bin, version_arg) in [(&config.ytdl_bin, "--version"), (&config.ffmpeg_bin, "-version")] {
        match binary_version(bin, version_arg).await {
            Ok(version) => println!("✓ {}: {}", bin, version),
            Err(e) => {
                println!("✗ {}: {}", bin, e);
                missing.push(bin.clone());
            }
        }
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(anyhow::anyhow!("missing dependencies: {}", missing.join(", ")))
    }
}
