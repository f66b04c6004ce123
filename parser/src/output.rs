//! Output formatting for parsed collections.

use aida_report_core::{ParsedCollection, ParsedFile};

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    Json,
    Yaml,
    Markdown,
    Table,
}

/// Formats a collection in the requested output format.
pub fn format_collection(
    collection: &ParsedCollection,
    format: OutputFormat,
) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(collection)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => serde_yaml::to_string(collection)
            .map_err(|e| format!("YAML serialization failed: {e}")),
        OutputFormat::Markdown => Ok(collection_to_markdown(collection)),
        OutputFormat::Table => Ok(collection_to_table(collection)),
    }
}

/// One-line batch summary, e.g. `3 files, 42 records (1 failed)`.
pub fn summary_line(collection: &ParsedCollection) -> String {
    let mut line = format!(
        "{} files, {} records",
        collection.len(),
        collection.total_records()
    );
    let failed = collection.failed_count();
    if failed > 0 {
        line.push_str(&format!(" ({failed} failed)"));
    }
    line
}

fn collection_to_markdown(collection: &ParsedCollection) -> String {
    let mut out = String::new();

    for (filename, file) in collection.iter() {
        out.push_str(&format!("## {filename}\n\n"));
        if file.is_empty() {
            out.push_str("_No records._\n\n");
            continue;
        }
        out.push_str("| 项目 | 值 |\n");
        out.push_str("|------|----|\n");
        for record in file {
            out.push_str(&format!(
                "| {} | {} |\n",
                escape_cell(&record.item),
                escape_cell(&record.value)
            ));
        }
        out.push('\n');
    }

    out.push_str(&format!("**Total:** {}\n", summary_line(collection)));
    out
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

fn collection_to_table(collection: &ParsedCollection) -> String {
    let mut out = String::new();

    for (filename, file) in collection.iter() {
        out.push_str(&format!("File: {filename}  Records: {}\n", file.len()));
        write_table_rows(&mut out, file);
        out.push('\n');
    }

    out.push_str(&summary_line(collection));
    out.push('\n');
    out
}

fn write_table_rows(out: &mut String, file: &ParsedFile) {
    let width = file
        .iter()
        .map(|record| record.item.chars().count())
        .max()
        .unwrap_or(0);
    for record in file {
        out.push_str(&format!(
            "  {:<width$}  {}\n",
            record.item,
            record.value,
            width = width
        ));
    }
}
