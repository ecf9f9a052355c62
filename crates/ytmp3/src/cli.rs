use std::net::IpAddr;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ytmp3")]
#[command(author, version, about = "Serve video URLs back as downloadable MP3 files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve {
        /// Address to bind (overrides HOST)
        #[arg(long)]
        host: Option<IpAddr>,

        /// Port to bind (overrides PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check that yt-dlp and ffmpeg are installed and print their versions
    Check,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
