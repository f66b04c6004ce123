//! Export of parsed report collections.
//!
//! A [`ParsedCollection`] can be written as:
//!
//! - **Excel** ([`WorkbookWriter`]): `<base>.xlsx`, one sheet per report
//!   file, header row `项目`/`值`.
//! - **CSV** ([`CsvWriter`]): `<base>_<file stem>.csv` per report file,
//!   UTF-8 with a byte order mark.
//! - **JSON** ([`JsonWriter`]): `<base>.json`, an object mapping file name to
//!   its ordered `{item, value}` list. [`read_json`] loads it back.
//!
//! # Quick start
//!
//! ```no_run
//! use aida_report_core::{ParsedCollection, ParsedFile, Record};
//! use aida_report_export::{ExportFormat, ExportTarget, export_all};
//!
//! let mut collection = ParsedCollection::new();
//! collection.insert("pc-01.txt", ParsedFile::from(vec![Record::new("计算机名称", "WS-042")]));
//!
//! let target = ExportTarget::new("exports", "aida64_report_20240318_094100");
//! let written = export_all(&collection, &target, &[ExportFormat::Excel, ExportFormat::Json]).unwrap();
//! for path in written {
//!     println!("wrote {}", path.display());
//! }
//! ```

mod delimited;
mod error;
mod json;
mod naming;
mod workbook;
mod writer;

use std::path::PathBuf;

use aida_report_core::ParsedCollection;
use tracing::info;

pub use delimited::CsvWriter;
pub use error::{ExportError, Result};
pub use json::{JsonWriter, read_json};
pub use naming::{FileNamer, MAX_SHEET_NAME_CHARS, SheetNamer, sanitize_sheet_name};
pub use workbook::WorkbookWriter;
pub use writer::{CollectionWriter, ExportFormat, ExportTarget, ITEM_HEADER, VALUE_HEADER};

/// Returns the writer for a format.
pub fn writer_for(format: ExportFormat) -> Box<dyn CollectionWriter> {
    match format {
        ExportFormat::Excel => Box::new(WorkbookWriter),
        ExportFormat::Csv => Box::new(CsvWriter),
        ExportFormat::Json => Box::new(JsonWriter),
    }
}

/// Writes the collection in every requested format.
///
/// Creates the target directory if needed. Repeated formats are written
/// once. Returns every file created, in format order.
pub fn export_all(
    collection: &ParsedCollection,
    target: &ExportTarget,
    formats: &[ExportFormat],
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(target.dir())?;

    let mut written = Vec::new();
    let mut done: Vec<ExportFormat> = Vec::new();
    for &format in formats {
        if done.contains(&format) {
            continue;
        }
        done.push(format);

        let files = writer_for(format).write(collection, target)?;
        info!(
            format = %format,
            files = files.len(),
            dir = %target.dir().display(),
            "Export finished"
        );
        written.extend(files);
    }
    Ok(written)
}
