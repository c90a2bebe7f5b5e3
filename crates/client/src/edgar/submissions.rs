//! Company submission index.

use serde::Deserialize;

use super::EdgarUrls;
use crate::fetch::Transport;
use mcp_edgar_core::{Cik, Error};

/// The filings EDGAR reports for a company, as positionally aligned arrays.
///
/// Position `i` of every array describes the same filing. EDGAR lists the most
/// recent filing first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionIndex {
    pub form: Vec<String>,
    pub filing_date: Vec<String>,
    pub accession_number: Vec<String>,
    pub primary_document: Vec<String>,
}

/// One filing of a [`SubmissionIndex`], borrowed from its arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionEntry<'a> {
    pub position: usize,
    pub form: &'a str,
    pub filing_date: &'a str,
    pub accession_number: &'a str,
    pub primary_document: &'a str,
}

#[derive(Debug, Deserialize)]
struct SubmissionsDocument {
    filings: Filings,
}

#[derive(Debug, Deserialize)]
struct Filings {
    recent: SubmissionIndex,
}

impl SubmissionIndex {
    pub fn len(&self) -> usize {
        self.form.len()
    }

    pub fn is_empty(&self) -> bool {
        self.form.is_empty()
    }

    /// Entries in native (most recent first) order.
    pub fn entries(&self) -> impl Iterator<Item = SubmissionEntry<'_>> {
        self.form
            .iter()
            .zip(&self.filing_date)
            .zip(&self.accession_number)
            .zip(&self.primary_document)
            .enumerate()
            .map(|(position, (((form, filing_date), accession_number), primary_document))| SubmissionEntry {
                position,
                form,
                filing_date,
                accession_number,
                primary_document,
            })
    }

    fn check_aligned(&self) -> Result<(), String> {
        let lengths = [self.form.len(), self.filing_date.len(), self.accession_number.len(), self.primary_document.len()];
        if lengths.iter().all(|&len| len == lengths[0]) {
            Ok(())
        } else {
            Err(format!(
                "misaligned filing arrays (form={}, filingDate={}, accessionNumber={}, primaryDocument={})",
                lengths[0], lengths[1], lengths[2], lengths[3]
            ))
        }
    }
}

/// Parse a submissions JSON body.
///
/// Returns a description of the problem if the body is not valid JSON, lacks
/// `filings.recent`, or its arrays differ in length.
pub fn parse_submission_index(body: &[u8]) -> Result<SubmissionIndex, String> {
    let document: SubmissionsDocument =
        serde_json::from_slice(body).map_err(|e| format!("malformed submissions JSON: {e}"))?;

    let index = document.filings.recent;
    index.check_aligned()?;

    Ok(index)
}

/// Fetch and parse the submission index for `cik`.
pub async fn fetch_submission_index(
    transport: &dyn Transport, urls: &EdgarUrls, cik: Cik,
) -> Result<SubmissionIndex, Error> {
    let url = urls.submissions(cik)?;
    let response = transport.get(&url).await?;

    let index = parse_submission_index(&response.bytes).map_err(|cause| Error::retrieval(&url, cause))?;

    tracing::debug!(cik = %cik, filings = index.len(), "loaded submission index");

    Ok(index)
}
