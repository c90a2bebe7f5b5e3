//! Client code for mcp-edgar.
//!
//! This crate provides the HTTP transport, the EDGAR retrieval stages and the
//! pipeline that chains them.

pub mod edgar;
pub mod fetch;
pub mod progress;
pub mod retriever;
pub mod store;

pub use edgar::{
    DownloadResult, DownloadedFile, EdgarUrls, FileDownloader, FilingLocation, FilingManifest, SelectedFiling,
    SubmissionIndex, parse_manifest,
};
pub use fetch::{FetchConfig, FetchResponse, HttpTransport, RequestPacer, Transport};
pub use progress::{ProgressSink, TracingProgress};
pub use retriever::{FilingRetriever, RetrieveOptions, RetrievedFiling};
pub use store::{FileStore, LocalFileStore};
