//! Per-file CSV export.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use aida_report_core::{ParsedCollection, ParsedFile};
use tracing::debug;

use crate::error::Result;
use crate::naming::FileNamer;
use crate::writer::{CollectionWriter, ExportFormat, ExportTarget, ITEM_HEADER, VALUE_HEADER};

/// Lets spreadsheet tools detect UTF-8.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Writes `<base>_<file stem>.csv` for every report file.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvWriter;

impl CollectionWriter for CsvWriter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Csv
    }

    fn write(&self, collection: &ParsedCollection, target: &ExportTarget) -> Result<Vec<PathBuf>> {
        let mut namer = FileNamer::new();
        let mut written = Vec::with_capacity(collection.len());

        for (filename, file) in collection.iter() {
            let path = namer.next_path(target.dir(), &target.base_name, filename, "csv");
            write_file(&path, file)?;
            debug!(file = filename, path = %path.display(), "Wrote CSV");
            written.push(path);
        }

        Ok(written)
    }
}

fn write_file(path: &Path, file: &ParsedFile) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    out.write_all(UTF8_BOM)?;

    let mut writer = csv::Writer::from_writer(out);
    writer.write_record([ITEM_HEADER, VALUE_HEADER])?;
    for record in file {
        writer.write_record([record.item.as_str(), record.value.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}
