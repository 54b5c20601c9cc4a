//! Error types for Washbook core operations.
//!
//! This module defines the error hierarchy for all core operations.
//! Errors are descriptive at the core level; the CLI layer maps these
//! to user-friendly messages and exit codes.

use thiserror::Error;

/// Result type alias for Washbook operations.
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Core error type for Washbook operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Bad user input (unparseable amount, malformed date)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Date key or entry index does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Local storage read or write failure
    #[error("Storage error: {0}")]
    Persistence(String),

    /// Import file could not be read, parsed, or is not a ledger
    #[error("Import error: {0}")]
    Import(String),

    /// Export file could not be produced or shared
    #[error("Export error: {0}")]
    Export(String),
}

impl LedgerError {
    /// Not-found error for a missing day.
    pub fn missing_day(date_key: &str) -> Self {
        LedgerError::NotFound(format!("no records for {}", date_key))
    }

    /// Not-found error for an index past the end of a day.
    pub fn missing_entry(date_key: &str, index: usize) -> Self {
        LedgerError::NotFound(format!("no entry #{} on {}", index, date_key))
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        LedgerError::Persistence(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::Validation(err.to_string())
    }
}
