//! Error types for the template catalog and application config.
//!
//! A corrupt template store is not fatal for loading (the catalog falls back
//! to built-ins), but it is reported by the store itself and refused by
//! `save_custom`.

use thiserror::Error;

/// Errors that can occur while reading or writing templates and config.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// A template failed validation.
    #[error("invalid template: {0}")]
    InvalidTemplate(String),

    /// The application config names an unsupported value.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The template store document has the wrong shape.
    #[error("invalid template store: {0}")]
    InvalidStore(String),
}

/// Convenience alias for results with [`TemplateError`].
pub type Result<T> = std::result::Result<T, TemplateError>;
