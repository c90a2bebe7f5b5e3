//! EDGAR filing retrieval stages.
//!
//! ### Endpoints
//! - **Submissions**: `{data}/submissions/CIK{cik:010}.json`, the company's
//!   filing history as parallel arrays under `filings.recent`.
//! - **Filing index**: `{archives}/{cik:010}/{accession without dashes}/{accession}-index.html`,
//!   an HTML page whose tables list the filing's files.
//! - **Files**: `{archives}/{cik:010}/{accession without dashes}/{filename}`.
//!
//! Each stage module handles one of these; [`crate::FilingRetriever`] chains them.

pub mod download;
pub mod manifest;
pub mod select;
pub mod submissions;

pub use download::{DownloadResult, DownloadedFile, FileDownloader};
pub use manifest::{FilingManifest, fetch_manifest, parse_manifest};
pub use select::{SelectedFiling, select_filing};
pub use submissions::{SubmissionEntry, SubmissionIndex, fetch_submission_index, parse_submission_index};

use mcp_edgar_core::{AppConfig, Cik, Error};
use url::Url;

/// Default base URL of the submissions API.
pub const DEFAULT_DATA_BASE_URL: &str = "https://data.sec.gov";

/// Default base URL of the filing archives.
pub const DEFAULT_ARCHIVES_BASE_URL: &str = "https://www.sec.gov/Archives/edgar/data";

/// Base URLs of the two EDGAR hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgarUrls {
    data_base: String,
    archives_base: String,
}

impl Default for EdgarUrls {
    fn default() -> Self {
        Self { data_base: DEFAULT_DATA_BASE_URL.to_string(), archives_base: DEFAULT_ARCHIVES_BASE_URL.to_string() }
    }
}

impl EdgarUrls {
    /// Create URLs from explicit bases. Trailing slashes are ignored.
    pub fn new(data_base: &str, archives_base: &str) -> Result<Self, Error> {
        parse_url(data_base)?;
        parse_url(archives_base)?;

        Ok(Self {
            data_base: data_base.trim_end_matches('/').to_string(),
            archives_base: archives_base.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, Error> {
        Self::new(&config.data_base_url, &config.archives_base_url)
    }

    /// URL of the company's submission index.
    pub fn submissions(&self, cik: Cik) -> Result<Url, Error> {
        parse_url(&format!("{}/submissions/CIK{}.json", self.data_base, cik.padded()))
    }

    /// Locate a filing's directory in the archives.
    pub fn filing_location(&self, cik: Cik, accession_number: &str) -> Result<FilingLocation, Error> {
        let accession_no_dashes = accession_number.replace('-', "");
        let base_url = format!("{}/{}/{}/", self.archives_base, cik.padded(), accession_no_dashes);
        let index_url = parse_url(&format!("{base_url}{accession_number}-index.html"))?;

        Ok(FilingLocation { base_url, index_url })
    }
}

/// Where a filing's files live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilingLocation {
    base_url: String,
    index_url: Url,
}

impl FilingLocation {
    /// Directory URL, always ending in `/`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the filing's index page.
    pub fn index_url(&self) -> &Url {
        &self.index_url
    }

    /// URL of one file in the filing, by plain concatenation.
    pub fn file_url(&self, filename: &str) -> Result<Url, Error> {
        parse_url(&format!("{}{}", self.base_url, filename))
    }
}

fn parse_url(raw: &str) -> Result<Url, Error> {
    Url::parse(raw).map_err(|e| Error::InvalidInput(format!("invalid URL {raw:?}: {e}")))
}
