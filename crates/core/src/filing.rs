//! Filing query types.
//!
//! A [`FilingQuery`] is validated once at construction; everything downstream
//! of it can assume the CIK, year and form type are in the supported sets.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::Error;

/// Years a filing may be requested for.
pub const SUPPORTED_YEARS: std::ops::RangeInclusive<u16> = 2021..=2025;

/// Largest CIK that still fits the 10-digit zero-padded form.
const MAX_CIK: u64 = 9_999_999_999;

/// Central index key, the regulator-assigned company identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cik(u64);

impl Cik {
    pub fn new(value: u64) -> Result<Self, Error> {
        if value == 0 {
            return Err(Error::InvalidInput("cik must be a positive integer".into()));
        }
        if value > MAX_CIK {
            return Err(Error::InvalidInput(format!("cik {value} has more than 10 digits")));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// The 10-digit zero-padded form used in EDGAR URLs.
    pub fn padded(&self) -> String {
        format!("{:010}", self.0)
    }
}

impl fmt::Display for Cik {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.padded())
    }
}

/// A filing year within [`SUPPORTED_YEARS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FilingYear(u16);

impl FilingYear {
    pub fn new(year: u16) -> Result<Self, Error> {
        if !SUPPORTED_YEARS.contains(&year) {
            return Err(Error::InvalidInput(format!(
                "year {year} is not supported (expected {}-{})",
                SUPPORTED_YEARS.start(),
                SUPPORTED_YEARS.end()
            )));
        }
        Ok(Self(year))
    }

    pub fn value(&self) -> u16 {
        self.0
    }

    /// Whether an ISO `YYYY-MM-DD` date string falls in this year.
    pub fn matches_date(&self, filing_date: &str) -> bool {
        filing_date.starts_with(&format!("{:04}", self.0))
    }
}

impl fmt::Display for FilingYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// Supported filing categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum FormType {
    #[serde(rename = "8-K")]
    EightK,
    #[serde(rename = "10-Q")]
    TenQ,
    #[serde(rename = "10-K")]
    TenK,
    #[serde(rename = "DEF 14A")]
    Def14A,
}

impl FormType {
    pub const ALL: [FormType; 4] = [FormType::EightK, FormType::TenQ, FormType::TenK, FormType::Def14A];

    /// The form name exactly as EDGAR reports it.
    pub fn as_str(&self) -> &'static str {
        match self {
            FormType::EightK => "8-K",
            FormType::TenQ => "10-Q",
            FormType::TenK => "10-K",
            FormType::Def14A => "DEF 14A",
        }
    }
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormType::ALL
            .into_iter()
            .find(|form| form.as_str() == s)
            .ok_or_else(|| {
                let allowed: Vec<&str> = FormType::ALL.iter().map(FormType::as_str).collect();
                Error::InvalidInput(format!("form type {s:?} is not supported (expected one of {})", allowed.join(", ")))
            })
    }
}

/// How to choose among several filings matching a query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStrategy {
    /// First match in the submission index's own order (most recent first).
    #[default]
    FirstListed,
    /// Match with the greatest filing date; ties keep index order.
    LatestFilingDate,
}

/// A fully validated request for one filing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilingQuery {
    cik: Cik,
    year: FilingYear,
    form_type: FormType,
    output_dir: PathBuf,
}

impl FilingQuery {
    /// Validate raw arguments into a query.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if any argument is outside the accepted set
    /// or the output directory is empty.
    pub fn new(cik: u64, year: u16, form_type: &str, output_dir: impl Into<PathBuf>) -> Result<Self, Error> {
        let output_dir = output_dir.into();
        if output_dir.as_os_str().is_empty() {
            return Err(Error::InvalidInput("output directory cannot be empty".into()));
        }

        Ok(Self { cik: Cik::new(cik)?, year: FilingYear::new(year)?, form_type: form_type.parse()?, output_dir })
    }

    pub fn cik(&self) -> Cik {
        self.cik
    }

    pub fn year(&self) -> FilingYear {
        self.year
    }

    pub fn form_type(&self) -> FormType {
        self.form_type
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}
