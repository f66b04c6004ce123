//! Error types for export operations.
//!
//! Provides a unified error type covering file access, CSV encoding, JSON
//! serialization and workbook generation failures.

use thiserror::Error;

/// Errors that can occur while exporting a collection.
#[derive(Debug, Error)]
pub enum ExportError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV encoding failure.
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Workbook generation failure.
    #[error("workbook error: {0}")]
    WorkbookError(#[from] rust_xlsxwriter::XlsxError),

    /// Unrecognized export format name.
    #[error("unknown export format '{0}' (expected excel, csv or json)")]
    UnknownFormat(String),
}

/// Convenience alias for results with [`ExportError`].
pub type Result<T> = std::result::Result<T, ExportError>;
