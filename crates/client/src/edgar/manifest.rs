//! Filing manifest: the files listed on a filing's index page.
//!
//! The index page is meant for people, not machines. The only structural
//! signal that holds across filing types is that file rows have more than two
//! cells and a link, so [`parse_manifest`] keys on exactly that.

use scraper::{ElementRef, Html, Selector};

use super::FilingLocation;
use crate::fetch::Transport;
use mcp_edgar_core::Error;

/// Filenames of a filing, in index page order. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilingManifest {
    files: Vec<String>,
}

impl FilingManifest {
    pub fn new(files: Vec<String>) -> Self {
        Self { files }
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn contains(&self, filename: &str) -> bool {
        self.files.iter().any(|f| f == filename)
    }
}

/// Extract filenames from a filing index page.
///
/// For every table, every row after the first whose `<td>` count exceeds two
/// contributes the basename of its first link's `href`. Other rows are skipped.
pub fn parse_manifest(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let table_selector = Selector::parse("table").expect("invalid selector");
    let row_selector = Selector::parse("tr").expect("invalid selector");
    let rows = RowSelectors::new();

    let mut files = Vec::new();

    for table in document.select(&table_selector) {
        for row in table.select(&row_selector).skip(1) {
            if let Some(filename) = rows.filename(row) {
                files.push(filename);
            }
        }
    }

    files
}

struct RowSelectors {
    cell: Selector,
    link: Selector,
}

impl RowSelectors {
    fn new() -> Self {
        Self {
            cell: Selector::parse("td").expect("invalid selector"),
            link: Selector::parse("a[href]").expect("invalid selector"),
        }
    }

    fn filename(&self, row: ElementRef<'_>) -> Option<String> {
        if row.select(&self.cell).count() <= 2 {
            return None;
        }

        let href = row.select(&self.link).next()?.value().attr("href")?;
        let name = href.trim_end_matches('/').rsplit('/').next()?;

        if name.is_empty() { None } else { Some(name.to_string()) }
    }
}

/// Fetch the filing's index page and parse its file list.
///
/// An empty list is not an error here; the download stage reports the missing
/// primary document.
pub async fn fetch_manifest(transport: &dyn Transport, location: &FilingLocation) -> Result<FilingManifest, Error> {
    let response = transport.get(location.index_url()).await?;
    let files = parse_manifest(&response.text());

    tracing::debug!(index = %location.index_url(), files = files.len(), "parsed filing index");

    Ok(FilingManifest::new(files))
}
