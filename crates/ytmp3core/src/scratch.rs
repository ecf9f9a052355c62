//! Scratch storage for extraction output
//!
//! Every request gets its own directory under the configured root, so two
//! concurrent requests for the same video never write to the same file.
//! Nothing here deletes files; the hosting environment owns cleanup.

use std::io;
use std::path::{Path, PathBuf};

use uuid::Uuid;

/// Prefix of per-request directories
const REQUEST_DIR_PREFIX: &str = "req-";

#[derive(Debug, Clone)]
pub struct ScratchDir {
    root: PathBuf,
}

impl ScratchDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the root if it does not exist yet.
    pub async fn ensure_root(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }

    /// Allocate a fresh, empty directory for one request.
    pub async fn request_dir(&self) -> io::Result<PathBuf> {
        self.ensure_root().await?;
        let dir = self.root.join(format!("{}{}", REQUEST_DIR_PREFIX, Uuid::new_v4().simple()));
        tokio::fs::create_dir(&dir).await?;
        log::debug!("Allocated scratch directory {}", dir.display());
        Ok(dir)
    }
}
