//! Excel workbook export.

use std::path::PathBuf;

use aida_report_core::ParsedCollection;
use rust_xlsxwriter::{Format, Workbook};
use tracing::debug;

use crate::error::Result;
use crate::naming::{FALLBACK_SHEET_NAME, SheetNamer};
use crate::writer::{CollectionWriter, ExportFormat, ExportTarget, ITEM_HEADER, VALUE_HEADER};

const ITEM_COLUMN_WIDTH: f64 = 40.0;
const VALUE_COLUMN_WIDTH: f64 = 50.0;

/// Writes `<base>.xlsx` with one sheet per report file.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkbookWriter;

impl CollectionWriter for WorkbookWriter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Excel
    }

    fn write(&self, collection: &ParsedCollection, target: &ExportTarget) -> Result<Vec<PathBuf>> {
        let path = target.file("xlsx");
        let mut workbook = Workbook::new();
        let header = Format::new().set_bold();
        let mut namer = SheetNamer::new();

        for (filename, file) in collection.iter() {
            let sheet_name = namer.next_name(filename);
            debug!(file = filename, sheet = %sheet_name, "Adding sheet");

            let sheet = workbook.add_worksheet();
            sheet.set_name(&sheet_name)?;
            sheet.set_column_width(0, ITEM_COLUMN_WIDTH)?;
            sheet.set_column_width(1, VALUE_COLUMN_WIDTH)?;
            sheet.write_string_with_format(0, 0, ITEM_HEADER, &header)?;
            sheet.write_string_with_format(0, 1, VALUE_HEADER, &header)?;

            for (row, record) in (1u32..).zip(file.iter()) {
                sheet.write_string(row, 0, &record.item)?;
                sheet.write_string(row, 1, &record.value)?;
            }
        }

        if collection.is_empty() {
            workbook.add_worksheet().set_name(FALLBACK_SHEET_NAME)?;
        }

        workbook.save(&path)?;
        Ok(vec![path])
    }
}
