//! Unified error types for mcp-edgar.
//!
//! Every pipeline stage fails fast with one of these; none of them is retried.

use rmcp::model::{ErrorCode, ErrorData as McpError};
use std::path::{Path, PathBuf};

/// Unified error types for the mcp-edgar server.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Caller-supplied arguments outside the accepted sets.
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Transport, HTTP status or response body failure while talking to EDGAR.
    #[error("RETRIEVAL_FAILED: {url}: {cause}")]
    Retrieval { url: String, cause: String },

    /// A well-formed response did not contain the requested entity.
    #[error("NOT_FOUND: {0}")]
    NotFound(String),

    /// Local filesystem failure while storing downloaded files.
    #[error("STORAGE_ERROR: {}: {cause}", path.display())]
    Storage { path: PathBuf, cause: String },
}

impl Error {
    /// Build a retrieval error for the given URL.
    pub fn retrieval(url: impl ToString, cause: impl ToString) -> Self {
        Error::Retrieval { url: url.to_string(), cause: cause.to_string() }
    }

    /// Build a storage error for the given path.
    pub fn storage(path: &Path, cause: impl ToString) -> Self {
        Error::Storage { path: path.to_path_buf(), cause: cause.to_string() }
    }

    /// URL of the failing request, for retrieval errors.
    pub fn url(&self) -> Option<&str> {
        match self {
            Error::Retrieval { url, .. } => Some(url),
            _ => None,
        }
    }
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::InvalidInput(_) => -32602,
            Error::Retrieval { .. } => -32010,
            Error::NotFound(_) => -32011,
            Error::Storage { .. } => -32012,
        };

        McpError { code: ErrorCode(code), message: err.to_string().into(), data: None }
    }
}
