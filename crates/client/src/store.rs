//! Local storage for downloaded filing files.

use std::path::Path;

use mcp_edgar_core::Error;

/// Filesystem access used by the download stage.
#[async_trait::async_trait]
pub trait FileStore: Send + Sync {
    /// Create `dir` and any missing parents. Succeeds if it already exists.
    async fn ensure_dir(&self, dir: &Path) -> Result<(), Error>;

    /// Whether a file already exists at `path`.
    async fn exists(&self, path: &Path) -> bool;

    /// Write `contents` to `path`, replacing any existing file.
    async fn write(&self, path: &Path, contents: &[u8]) -> Result<(), Error>;
}

/// Store backed by the local filesystem via `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileStore;

#[async_trait::async_trait]
impl FileStore for LocalFileStore {
    async fn ensure_dir(&self, dir: &Path) -> Result<(), Error> {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| Error::storage(dir, e))
    }

    async fn exists(&self, path: &Path) -> bool {
        tokio::fs::try_exists(path).await.unwrap_or(false)
    }

    async fn write(&self, path: &Path, contents: &[u8]) -> Result<(), Error> {
        tokio::fs::write(path, contents)
            .await
            .map_err(|e| Error::storage(path, e))
    }
}
