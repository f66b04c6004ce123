//! Export formats and the writer interface.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use aida_report_core::ParsedCollection;

use crate::error::{ExportError, Result};

/// Header labels of the record columns.
pub const ITEM_HEADER: &str = "项目";
pub const VALUE_HEADER: &str = "值";

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum ExportFormat {
    /// One workbook, one sheet per report file.
    Excel,
    /// One CSV file per report file.
    Csv,
    /// One JSON document holding the whole collection.
    Json,
}

impl ExportFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Excel => "excel",
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "excel" | "xlsx" => Ok(Self::Excel),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(ExportError::UnknownFormat(s.to_string())),
        }
    }
}

/// Output directory plus the base name shared by every exported file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTarget {
    pub dir: PathBuf,
    pub base_name: String,
}

impl ExportTarget {
    pub fn new(dir: impl Into<PathBuf>, base_name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            base_name: base_name.into(),
        }
    }

    /// `<dir>/<base_name>.<extension>`
    pub fn file(&self, extension: &str) -> PathBuf {
        self.dir.join(format!("{}.{extension}", self.base_name))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Serializes a parsed collection to one export format.
pub trait CollectionWriter {
    fn format(&self) -> ExportFormat;

    /// Writes the collection below `target`, returning the files created.
    ///
    /// The target directory must exist.
    fn write(&self, collection: &ParsedCollection, target: &ExportTarget) -> Result<Vec<PathBuf>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_names() {
        assert_eq!("Excel".parse::<ExportFormat>().unwrap(), ExportFormat::Excel);
        assert_eq!("xlsx".parse::<ExportFormat>().unwrap(), ExportFormat::Excel);
        assert_eq!(" json ".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert!(matches!(
            "pdf".parse::<ExportFormat>(),
            Err(ExportError::UnknownFormat(name)) if name == "pdf"
        ));
        assert_eq!(ExportFormat::Csv.to_string(), "csv");
    }

    #[test]
    fn test_target_file() {
        let target = ExportTarget::new("out", "aida64_report_20240318_094100");
        assert_eq!(
            target.file("xlsx"),
            Path::new("out").join("aida64_report_20240318_094100.xlsx")
        );
    }
}
