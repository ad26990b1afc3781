//! File-backed health client.
//!
//! Reads a JSON health payload from disk on every fetch. Useful for demos
//! without a running backend: edit the file and the dashboard follows.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{FetchError, HealthClient, HealthPayload};

/// A health client that reads the payload from a JSON file.
#[derive(Debug)]
pub struct FileHealthClient {
    path: PathBuf,
    description: String,
}

impl FileHealthClient {
    /// Create a new file client for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self { path, description }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl HealthClient for FileHealthClient {
    async fn fetch_health(&self) -> Result<HealthPayload, FetchError> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&content)?)
    }

    fn description(&self) -> &str {
        &self.description
    }
}
