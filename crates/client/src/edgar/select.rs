//! Filing selection by year and form type.

use chrono::NaiveDate;
use serde::Serialize;

use super::{SubmissionEntry, SubmissionIndex};
use mcp_edgar_core::{Error, FilingYear, FormType, SelectionStrategy};

/// The filing chosen for download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedFiling {
    pub accession_number: String,
    pub primary_document: String,
    pub filing_date: String,
}

impl From<SubmissionEntry<'_>> for SelectedFiling {
    fn from(entry: SubmissionEntry<'_>) -> Self {
        Self {
            accession_number: entry.accession_number.to_string(),
            primary_document: entry.primary_document.to_string(),
            filing_date: entry.filing_date.to_string(),
        }
    }
}

/// Pick the filing of `form_type` filed in `year`.
///
/// With [`SelectionStrategy::FirstListed`] the first match in index order wins,
/// which is the most recent one as long as EDGAR keeps listing newest first.
/// [`SelectionStrategy::LatestFilingDate`] compares parsed filing dates instead
/// and only falls back to index order on ties.
///
/// # Errors
///
/// Returns `Error::NotFound` if no entry matches both criteria.
pub fn select_filing(
    index: &SubmissionIndex, year: FilingYear, form_type: FormType, strategy: SelectionStrategy,
) -> Result<SelectedFiling, Error> {
    let mut matches = index
        .entries()
        .filter(|entry| entry.form == form_type.as_str() && year.matches_date(entry.filing_date));

    let selected = match strategy {
        SelectionStrategy::FirstListed => matches.next(),
        SelectionStrategy::LatestFilingDate => matches.fold(None::<SubmissionEntry>, |best, entry| match best {
            Some(current) if parse_date(entry.filing_date) <= parse_date(current.filing_date) => Some(current),
            _ => Some(entry),
        }),
    };

    selected.map(SelectedFiling::from).ok_or_else(|| {
        Error::NotFound(format!("no matching filing for year {year} and form type {form_type}"))
    })
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(rows: &[(&str, &str, &str, &str)]) -> SubmissionIndex {
        SubmissionIndex {
            form: rows.iter().map(|r| r.0.to_string()).collect(),
            filing_date: rows.iter().map(|r| r.1.to_string()).collect(),
            accession_number: rows.iter().map(|r| r.2.to_string()).collect(),
            primary_document: rows.iter().map(|r| r.3.to_string()).collect(),
        }
    }

    fn year(y: u16) -> FilingYear {
        FilingYear::new(y).unwrap()
    }

    #[test]
    fn test_first_listed_picks_first_match() {
        let index = index(&[
            ("10-Q", "2024-10-31", "0001018724-24-000161", "amzn-20240930.htm"),
            ("8-K", "2024-10-31", "0001018724-24-000158", "amzn-20241031.htm"),
            ("8-K", "2024-05-14", "0001018724-24-000083", "amzn-20240514.htm"),
        ]);

        let selected = select_filing(&index, year(2024), FormType::EightK, SelectionStrategy::FirstListed).unwrap();
        assert_eq!(selected.accession_number, "0001018724-24-000158");
        assert_eq!(selected.primary_document, "amzn-20241031.htm");
        assert_eq!(selected.filing_date, "2024-10-31");
    }

    #[test]
    fn test_year_must_match() {
        let index = index(&[
            ("10-K", "2025-02-07", "0001018724-25-000004", "amzn-20241231.htm"),
            ("10-K", "2024-02-02", "0001018724-24-000008", "amzn-20231231.htm"),
        ]);

        let selected = select_filing(&index, year(2024), FormType::TenK, SelectionStrategy::FirstListed).unwrap();
        assert_eq!(selected.accession_number, "0001018724-24-000008");
    }

    #[test]
    fn test_form_must_match_exactly() {
        let index = index(&[
            ("8-K/A", "2024-06-01", "0001018724-24-000100", "amend.htm"),
            ("DEF 14A", "2024-04-11", "0001018724-24-000050", "proxy.htm"),
        ]);

        let result = select_filing(&index, year(2024), FormType::EightK, SelectionStrategy::FirstListed);
        assert!(matches!(result, Err(Error::NotFound(_))));

        let selected = select_filing(&index, year(2024), FormType::Def14A, SelectionStrategy::FirstListed).unwrap();
        assert_eq!(selected.primary_document, "proxy.htm");
    }

    #[test]
    fn test_no_match_is_not_found() {
        let index = index(&[("10-Q", "2023-11-01", "0001018724-23-000001", "q.htm")]);

        let err = select_filing(&index, year(2023), FormType::TenK, SelectionStrategy::FirstListed).unwrap_err();
        assert!(err.to_string().contains("NOT_FOUND"));
        assert!(err.to_string().contains("2023"));
        assert!(err.to_string().contains("10-K"));
    }

    #[test]
    fn test_empty_index_is_not_found() {
        let result =
            select_filing(&SubmissionIndex::default(), year(2022), FormType::TenQ, SelectionStrategy::LatestFilingDate);
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[test]
    fn test_latest_filing_date_ignores_order() {
        let index = index(&[
            ("10-Q", "2024-05-01", "a", "may.htm"),
            ("10-Q", "2024-11-01", "b", "nov.htm"),
            ("10-Q", "2024-08-01", "c", "aug.htm"),
        ]);

        let first = select_filing(&index, year(2024), FormType::TenQ, SelectionStrategy::FirstListed).unwrap();
        assert_eq!(first.primary_document, "may.htm");

        let latest = select_filing(&index, year(2024), FormType::TenQ, SelectionStrategy::LatestFilingDate).unwrap();
        assert_eq!(latest.primary_document, "nov.htm");
    }

    #[test]
    fn test_latest_filing_date_tie_keeps_index_order() {
        let index = index(&[
            ("8-K", "2024-03-01", "first", "first.htm"),
            ("8-K", "2024-03-01", "second", "second.htm"),
        ]);

        let selected = select_filing(&index, year(2024), FormType::EightK, SelectionStrategy::LatestFilingDate).unwrap();
        assert_eq!(selected.accession_number, "first");
    }

    #[test]
    fn test_latest_filing_date_unparseable_ranks_lowest() {
        let index = index(&[("8-K", "2024-??", "bad", "bad.htm"), ("8-K", "2024-01-15", "good", "good.htm")]);

        let selected = select_filing(&index, year(2024), FormType::EightK, SelectionStrategy::LatestFilingDate).unwrap();
        assert_eq!(selected.accession_number, "good");
    }
}
