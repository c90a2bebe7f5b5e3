//! download_sec_filing tool implementation.
//!
//! Finds the most recent EDGAR filing of a company for a year and form type,
//! downloads every file of it, and returns the local path of the primary
//! document.

use mcp_edgar_client::{FilingRetriever, ProgressSink, RetrieveOptions};
use mcp_edgar_core::{AppConfig, Error, FilingQuery, FormType};
use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Input parameters for download_sec_filing tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DownloadSecFilingParams {
    /// The central index key (CIK) of the company, e.g. 1018724.
    pub cik: u64,

    /// Year the filing was filed. Only 2021-2025 are allowed.
    #[schemars(range(min = 2021, max = 2025))]
    pub year: u16,

    /// Form type of the filing: "8-K", "10-Q", "10-K" or "DEF 14A".
    pub filing_type: FormType,

    /// Directory to store the filing's files in, e.g. "html/amzn_2024_8_k".
    /// Relative paths are resolved against the server's output root, if one
    /// is configured.
    pub output_dir_path: String,

    /// Keep files already present in the directory instead of downloading
    /// them again. Defaults to the server configuration.
    #[serde(default)]
    pub resume: Option<bool>,
}

/// Implementation of the download_sec_filing tool.
pub async fn download_impl(
    retriever: &FilingRetriever, config: &AppConfig, params: DownloadSecFilingParams, progress: &dyn ProgressSink,
) -> Result<CallToolResult, McpError> {
    if params.output_dir_path.trim().is_empty() {
        return Err(Error::InvalidInput("output_dir_path cannot be empty".into()).into());
    }

    let output_dir = config.resolve_output_dir(&params.output_dir_path);
    let query = FilingQuery::new(params.cik, params.year, params.filing_type.as_str(), output_dir)?;

    let defaults = retriever.options();
    let options = RetrieveOptions { resume: params.resume.unwrap_or(defaults.resume), ..defaults };

    let retrieved = retriever.retrieve_with(&query, options, progress).await?;

    Ok(CallToolResult::success(vec![Content::text(retrieved.primary_path.display().to_string())]))
}
