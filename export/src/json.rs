//! JSON document export and read-back.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use aida_report_core::ParsedCollection;

use crate::error::Result;
use crate::writer::{CollectionWriter, ExportFormat, ExportTarget};

/// Writes `<base>.json`: an object mapping file name to its record list.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonWriter;

impl CollectionWriter for JsonWriter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Json
    }

    fn write(&self, collection: &ParsedCollection, target: &ExportTarget) -> Result<Vec<PathBuf>> {
        let path = target.file("json");
        let mut out = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(&mut out, collection)?;
        out.write_all(b"\n")?;
        out.flush()?;
        Ok(vec![path])
    }
}

/// Reads a JSON export back into a collection, keeping file order.
///
/// Records written by older tools with `项目`/`值` keys are accepted.
///
/// # Errors
///
/// Returns [`ExportError::IoError`](crate::ExportError::IoError) if the file
/// cannot be opened or [`ExportError::JsonError`](crate::ExportError::JsonError)
/// if it does not have the collection shape.
pub fn read_json(path: impl AsRef<Path>) -> Result<ParsedCollection> {
    let file = File::open(path)?;
    let collection = serde_json::from_reader(BufReader::new(file))?;
    Ok(collection)
}
