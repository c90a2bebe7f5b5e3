//! Core types and shared functionality for mcp-edgar.
//!
//! This crate provides:
//! - Unified error types
//! - Configuration structures
//! - Validated filing query types

pub mod config;
pub mod error;
pub mod filing;

pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use filing::{Cik, FilingQuery, FilingYear, FormType, SUPPORTED_YEARS, SelectionStrategy};
