//! The filing retrieval pipeline.
//!
//! Four stages run strictly in order, each consuming the previous one's output:
//! submission index → filing selection → manifest → download. The first error
//! from any stage is returned unchanged.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;

use crate::edgar::{
    DownloadedFile, EdgarUrls, FileDownloader, SelectedFiling, fetch_manifest, fetch_submission_index, select_filing,
};
use crate::fetch::{FetchConfig, HttpTransport, Transport};
use crate::progress::ProgressSink;
use crate::store::{FileStore, LocalFileStore};
use mcp_edgar_core::{AppConfig, Error, FilingQuery, SelectionStrategy};

/// Tunables of a retrieval.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetrieveOptions {
    pub selection: SelectionStrategy,
    pub resume: bool,
}

impl From<&AppConfig> for RetrieveOptions {
    fn from(config: &AppConfig) -> Self {
        Self { selection: config.selection, resume: config.resume_downloads }
    }
}

/// A filing stored locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RetrievedFiling {
    pub filing: SelectedFiling,
    pub primary_path: PathBuf,
    pub files: Vec<DownloadedFile>,
}

/// Resolves a [`FilingQuery`] to a filing and downloads it.
///
/// Holds no per-query state; one retriever can serve concurrent queries.
#[derive(Clone)]
pub struct FilingRetriever {
    transport: Arc<dyn Transport>,
    store: Arc<dyn FileStore>,
    urls: EdgarUrls,
    options: RetrieveOptions,
}

impl FilingRetriever {
    pub fn new(transport: Arc<dyn Transport>, store: Arc<dyn FileStore>, urls: EdgarUrls) -> Self {
        Self { transport, store, urls, options: RetrieveOptions::default() }
    }

    /// Default options for every retrieval made through this retriever.
    pub fn with_options(mut self, options: RetrieveOptions) -> Self {
        self.options = options;
        self
    }

    /// Build a retriever talking to EDGAR over HTTP and writing to local disk.
    pub fn from_config(config: &AppConfig) -> Result<Self, Error> {
        let transport = HttpTransport::new(FetchConfig::from(config))?;
        let urls = EdgarUrls::from_config(config)?;

        Ok(Self::new(Arc::new(transport), Arc::new(LocalFileStore), urls).with_options(RetrieveOptions::from(config)))
    }

    pub fn options(&self) -> RetrieveOptions {
        self.options
    }

    /// Retrieve with the retriever's default options.
    pub async fn retrieve(&self, query: &FilingQuery, progress: &dyn ProgressSink) -> Result<RetrievedFiling, Error> {
        self.retrieve_with(query, self.options, progress).await
    }

    /// Retrieve the filing matching `query` into its output directory.
    ///
    /// # Errors
    ///
    /// - `Error::Retrieval` when any EDGAR request or response fails.
    /// - `Error::NotFound` when no filing matches, or the primary document is
    ///   not among the downloaded files.
    /// - `Error::Storage` when the output directory cannot be written.
    pub async fn retrieve_with(
        &self, query: &FilingQuery, options: RetrieveOptions, progress: &dyn ProgressSink,
    ) -> Result<RetrievedFiling, Error> {
        let cik = query.cik();

        progress
            .notify(&format!(
                "Starting search for CIK {cik}, Year {}, Type '{}'...",
                query.year(),
                query.form_type()
            ))
            .await;

        let index = fetch_submission_index(self.transport.as_ref(), &self.urls, cik).await?;

        let filing = select_filing(&index, query.year(), query.form_type(), options.selection)?;
        progress
            .notify(&format!(
                "Found most recent matching filing from {}: {}",
                filing.filing_date, filing.accession_number
            ))
            .await;

        let location = self.urls.filing_location(cik, &filing.accession_number)?;
        progress
            .notify(&format!("Fetching file list from: {}", location.index_url()))
            .await;

        let manifest = fetch_manifest(self.transport.as_ref(), &location).await?;
        progress
            .notify(&format!("Found {} files to download.", manifest.len()))
            .await;

        let download = FileDownloader::new(self.transport.as_ref(), self.store.as_ref(), progress)
            .resume(options.resume)
            .download(&location, &manifest, &filing.primary_document, query.output_dir())
            .await?;

        tracing::info!(
            cik = %cik,
            accession = %filing.accession_number,
            files = download.files.len(),
            primary = %download.primary_path.display(),
            "filing retrieved"
        );

        Ok(RetrievedFiling { filing, primary_path: download.primary_path, files: download.files })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testing::StaticTransport;
    use crate::progress::RecordingProgress;

    const SUBMISSIONS_URL: &str = "https://data.sec.gov/submissions/CIK0001018724.json";
    const BASE: &str = "https://www.sec.gov/Archives/edgar/data/0001018724/000032019324000123/";

    fn submissions(rows: &[(&str, &str, &str, &str)]) -> String {
        serde_json::json!({
            "filings": {
                "recent": {
                    "form": rows.iter().map(|r| r.0).collect::<Vec<_>>(),
                    "filingDate": rows.iter().map(|r| r.1).collect::<Vec<_>>(),
                    "accessionNumber": rows.iter().map(|r| r.2).collect::<Vec<_>>(),
                    "primaryDocument": rows.iter().map(|r| r.3).collect::<Vec<_>>(),
                }
            }
        })
        .to_string()
    }

    fn index_page(files: &[&str]) -> String {
        let rows: String = files
            .iter()
            .enumerate()
            .map(|(i, f)| {
                format!(r#"<tr><td>{i}</td><td>doc</td><td><a href="/Archives/edgar/data/1018724/000032019324000123/{f}">{f}</a></td><td>8-K</td></tr>"#)
            })
            .collect();
        format!("<html><body><table><tr><th>Seq</th><th>Description</th><th>Document</th><th>Type</th></tr>{rows}</table></body></html>")
    }

    fn retriever(transport: Arc<StaticTransport>) -> FilingRetriever {
        FilingRetriever::new(transport, Arc::new(LocalFileStore), EdgarUrls::default())
    }

    #[tokio::test]
    async fn test_end_to_end_single_file() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("html").join("amzn_2024_8_k");

        let transport = Arc::new(
            StaticTransport::new()
                .with_body(
                    SUBMISSIONS_URL,
                    submissions(&[("8-K", "2024-05-14", "0000320193-24-000123", "amzn-20240514.htm")]),
                )
                .with_body(&format!("{BASE}0000320193-24-000123-index.html"), index_page(&["amzn-20240514.htm"]))
                .with_body(&format!("{BASE}amzn-20240514.htm"), "<html>Amazon 8-K</html>"),
        );
        let progress = RecordingProgress::default();

        let query = FilingQuery::new(1018724, 2024, "8-K", &out).unwrap();
        let retrieved = retriever(transport.clone()).retrieve(&query, &progress).await.unwrap();

        assert_eq!(retrieved.primary_path, out.join("amzn-20240514.htm"));
        assert_eq!(std::fs::read_to_string(&retrieved.primary_path).unwrap(), "<html>Amazon 8-K</html>");
        assert_eq!(retrieved.filing.accession_number, "0000320193-24-000123");
        assert_eq!(retrieved.files.len(), 1);

        assert_eq!(
            transport.requests(),
            vec![
                SUBMISSIONS_URL.to_string(),
                format!("{BASE}0000320193-24-000123-index.html"),
                format!("{BASE}amzn-20240514.htm"),
            ]
        );

        let messages = progress.messages();
        assert_eq!(messages[0], "Starting search for CIK 0001018724, Year 2024, Type '8-K'...");
        assert!(messages.iter().any(|m| m == "Found 1 files to download."));
    }

    #[tokio::test]
    async fn test_no_matching_filing_stops_before_archives() {
        let tmp = tempfile::tempdir().unwrap();
        let transport = Arc::new(StaticTransport::new().with_body(
            SUBMISSIONS_URL,
            submissions(&[("10-K", "2024-02-02", "0000320193-24-000123", "amzn-20231231.htm")]),
        ));

        let query = FilingQuery::new(1018724, 2024, "8-K", tmp.path()).unwrap();
        let err = retriever(transport.clone())
            .retrieve(&query, &RecordingProgress::default())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::NotFound(_)));
        assert_eq!(transport.requests(), vec![SUBMISSIONS_URL.to_string()]);
    }

    #[tokio::test]
    async fn test_submissions_failure_propagates() {
        let tmp = tempfile::tempdir().unwrap();
        let transport = Arc::new(StaticTransport::new().with_network_error(SUBMISSIONS_URL, "connection reset"));

        let query = FilingQuery::new(1018724, 2024, "8-K", tmp.path()).unwrap();
        let err = retriever(transport)
            .retrieve(&query, &RecordingProgress::default())
            .await
            .unwrap_err();

        assert_eq!(err.url(), Some(SUBMISSIONS_URL));
        assert!(err.to_string().contains("connection reset"));
    }

    #[tokio::test]
    async fn test_index_page_failure_propagates() {
        let tmp = tempfile::tempdir().unwrap();
        let index_url = format!("{BASE}0000320193-24-000123-index.html");
        let transport = Arc::new(
            StaticTransport::new()
                .with_body(
                    SUBMISSIONS_URL,
                    submissions(&[("8-K", "2024-05-14", "0000320193-24-000123", "amzn-20240514.htm")]),
                )
                .with_status(&index_url, 429),
        );

        let query = FilingQuery::new(1018724, 2024, "8-K", tmp.path()).unwrap();
        let err = retriever(transport)
            .retrieve(&query, &RecordingProgress::default())
            .await
            .unwrap_err();

        assert_eq!(err.url(), Some(index_url.as_str()));
    }

    #[tokio::test]
    async fn test_latest_filing_date_option() {
        let tmp = tempfile::tempdir().unwrap();
        let transport = Arc::new(
            StaticTransport::new()
                .with_body(
                    SUBMISSIONS_URL,
                    submissions(&[
                        ("8-K", "2024-01-10", "0000320193-24-000001", "jan.htm"),
                        ("8-K", "2024-05-14", "0000320193-24-000123", "amzn-20240514.htm"),
                    ]),
                )
                .with_body(&format!("{BASE}0000320193-24-000123-index.html"), index_page(&["amzn-20240514.htm"]))
                .with_body(&format!("{BASE}amzn-20240514.htm"), "may"),
        );

        let options = RetrieveOptions { selection: SelectionStrategy::LatestFilingDate, resume: false };
        let query = FilingQuery::new(1018724, 2024, "8-K", tmp.path()).unwrap();
        let retrieved = retriever(transport)
            .retrieve_with(&query, options, &RecordingProgress::default())
            .await
            .unwrap();

        assert_eq!(retrieved.filing.primary_document, "amzn-20240514.htm");
    }

    #[test]
    fn test_from_config() {
        let config = AppConfig { resume_downloads: true, ..Default::default() };
        let retriever = FilingRetriever::from_config(&config).unwrap();
        assert!(retriever.options().resume);
        assert_eq!(retriever.options().selection, SelectionStrategy::FirstListed);
    }
}
