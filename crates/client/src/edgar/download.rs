//! Download of every file in a filing manifest.
//!
//! Files are fetched one at a time in manifest order. The first failure ends
//! the download: files already written stay on disk, later files are never
//! requested.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::{FilingLocation, FilingManifest};
use crate::fetch::Transport;
use crate::progress::ProgressSink;
use crate::store::FileStore;
use mcp_edgar_core::Error;

/// A manifest entry stored locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadedFile {
    pub name: String,
    pub path: PathBuf,
    /// Bytes written, or `None` when an existing file was kept.
    pub bytes: Option<u64>,
}

/// Outcome of a completed download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadResult {
    pub files: Vec<DownloadedFile>,
    pub primary_path: PathBuf,
}

impl DownloadResult {
    /// Local path of a downloaded file by its manifest name.
    pub fn path_of(&self, filename: &str) -> Option<&Path> {
        self.files
            .iter()
            .find(|f| f.name == filename)
            .map(|f| f.path.as_path())
    }
}

/// Downloads manifest files through a transport into a store.
pub struct FileDownloader<'a> {
    transport: &'a dyn Transport,
    store: &'a dyn FileStore,
    progress: &'a dyn ProgressSink,
    resume: bool,
}

impl<'a> FileDownloader<'a> {
    pub fn new(transport: &'a dyn Transport, store: &'a dyn FileStore, progress: &'a dyn ProgressSink) -> Self {
        Self { transport, store, progress, resume: false }
    }

    /// Keep files that already exist locally instead of fetching them again.
    pub fn resume(mut self, resume: bool) -> Self {
        self.resume = resume;
        self
    }

    /// Download every manifest file into `output_dir`.
    ///
    /// # Errors
    ///
    /// - `Error::Storage` if the directory cannot be created or a file written.
    /// - `Error::Retrieval` for the first file that cannot be fetched.
    /// - `Error::NotFound` if `primary_document` never got downloaded.
    pub async fn download(
        &self, location: &FilingLocation, manifest: &FilingManifest, primary_document: &str, output_dir: &Path,
    ) -> Result<DownloadResult, Error> {
        self.store.ensure_dir(output_dir).await?;

        let mut files = Vec::with_capacity(manifest.len());
        let mut primary_path = None;

        for filename in manifest.files() {
            let local_path = output_dir.join(filename);

            let bytes = if self.resume && self.store.exists(&local_path).await {
                self.progress
                    .notify(&format!("Keeping existing {filename}"))
                    .await;
                None
            } else {
                self.progress.notify(&format!("Downloading {filename}...")).await;

                let url = location.file_url(filename)?;
                let response = self.transport.get(&url).await?;
                self.store.write(&local_path, &response.bytes).await?;
                tracing::debug!(
                    file = %filename,
                    content_type = response.content_type.as_deref().unwrap_or("unknown"),
                    fetch_ms = response.fetch_ms,
                    bytes = response.bytes.len(),
                    "stored filing document"
                );

                Some(response.bytes.len() as u64)
            };

            if filename == primary_document {
                primary_path = Some(local_path.clone());
            }

            files.push(DownloadedFile { name: filename.clone(), path: local_path, bytes });
        }

        let primary_path = primary_path.ok_or_else(|| {
            Error::NotFound(format!(
                "download finished, but the primary document '{primary_document}' was not found or downloaded"
            ))
        })?;

        self.progress
            .notify(&format!("Download complete. Files saved in: {}", output_dir.display()))
            .await;

        Ok(DownloadResult { files, primary_path })
    }
}
