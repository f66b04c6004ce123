//! Error types for report parsing.
//!
//! Only file-level failures are errors. Missing sections and malformed lines
//! are absorbed by the extractors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading or locating report files.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The report file could not be opened or read.
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The report file is not valid UTF-8.
    #[error("'{}' is not valid UTF-8 text", path.display())]
    Decode { path: PathBuf },

    /// The report file exceeds the read limit.
    #[error("'{}' exceeds the {limit}-byte report size limit", path.display())]
    TooLarge { path: PathBuf, limit: u64 },

    /// A directory could not be walked.
    #[error("failed to walk report directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// Invalid or missing input (e.g. non-existent path).
    #[error("{0}")]
    InvalidInput(String),
}

/// Convenience alias for results with [`ParseError`].
pub type Result<T> = std::result::Result<T, ParseError>;
