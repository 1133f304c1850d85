//! Local filesystem checkpoint store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::Checkpoint;
use crate::storage::CheckpointStore;

/// Checkpoint kept in a one-line text file.
#[derive(Debug, Clone)]
pub struct LocalCheckpoint {
    path: PathBuf,
}

impl LocalCheckpoint {
    /// Create a store backed by the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        self.ensure_dir().await?;

        let tmp = self.path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl CheckpointStore for LocalCheckpoint {
    async fn read_last(&self) -> Result<Checkpoint> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(Checkpoint::new(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No checkpoint at {}", self.path.display());
                Ok(Checkpoint::default())
            }
            Err(e) => Err(AppError::Io(e)),
        }
    }

    async fn write_last(&self, checkpoint: &Checkpoint) -> Result<()> {
        self.write_bytes(checkpoint.as_str().as_bytes()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_read_missing_is_empty() {
        let tmp = TempDir::new().unwrap();
        let store = LocalCheckpoint::new(tmp.path().join("last.txt"));

        let checkpoint = store.read_last().await.unwrap();
        assert!(checkpoint.is_empty());
    }

    #[tokio::test]
    async fn test_write_and_read() {
        let tmp = TempDir::new().unwrap();
        let store = LocalCheckpoint::new(tmp.path().join("state/last.txt"));

        store.write_last(&Checkpoint::new("post-42")).await.unwrap();
        assert_eq!(store.read_last().await.unwrap().as_str(), "post-42");

        store.write_last(&Checkpoint::new("post-43")).await.unwrap();
        assert_eq!(store.read_last().await.unwrap().as_str(), "post-43");
        assert!(!tmp.path().join("state/last.tmp").exists());
    }

    #[tokio::test]
    async fn test_read_trims_whitespace() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("last.txt");
        std::fs::write(&path, "  https://example.com/p/1\n").unwrap();

        let store = LocalCheckpoint::new(&path);
        assert_eq!(
            store.read_last().await.unwrap().as_str(),
            "https://example.com/p/1"
        );
    }
}
