//! Per-file parsing and batch coordination.
//!
//! [`parse_report`] runs the relevant extractors over one report and applies
//! the selection filter. [`parse_many`] repeats that for a list of files and
//! never aborts: a file that cannot be read or decoded becomes a one-record
//! error entry.

use std::collections::HashSet;
use std::ffi::OsStr;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use aida_report_core::{ParsedCollection, ParsedFile, Selection};
use tracing::{debug, info, warn};

use crate::error::{ParseError, Result};
use crate::extractors::EXTRACTORS;
use crate::section::normalize_report;

/// Reports larger than this are rejected without being parsed.
pub const MAX_REPORT_BYTES: u64 = 64 * 1024 * 1024;

/// Prefix of the message stored in a failed file's error record.
pub const FILE_ERROR_PREFIX: &str = "解析文件时出错";

/// Parses report text into records kept by `selection`.
///
/// Records come out in extractor order. Records from a wildcard extractor
/// skip the key filter.
///
/// ```
/// use aida_report_core::{Record, Selection};
/// use aida_report_parser::parse_report;
///
/// let text = "--------[ 系统概述 ]----\n\n  计算机:\n    计算机类型: Desktop\n";
/// let parsed = parse_report(text, &Selection::Unfiltered);
/// assert_eq!(parsed.records(), &[Record::new("计算机类型", "Desktop")]);
/// ```
pub fn parse_report(text: &str, selection: &Selection) -> ParsedFile {
    let text = normalize_report(text);
    let mut parsed = ParsedFile::new();

    for extractor in EXTRACTORS {
        if !extractor.is_relevant(selection) {
            debug!(extractor = extractor.name(), "Skipping extractor");
            continue;
        }
        let bypass_filter = extractor.wildcard().is_some();
        let records = extractor.extract(&text);
        debug!(
            extractor = extractor.name(),
            records = records.len(),
            "Extractor finished"
        );
        for record in records {
            if bypass_filter || selection.contains(&record.item) {
                parsed.push(record);
            }
        }
    }

    parsed
}

/// Reads and parses one report file.
pub fn parse_file(path: &Path, selection: &Selection) -> Result<ParsedFile> {
    let text = read_report(path)?;
    Ok(parse_report(&text, selection))
}

/// Reads a report file as UTF-8 text, refusing files over
/// [`MAX_REPORT_BYTES`].
pub fn read_report(path: &Path) -> Result<String> {
    let io_error = |source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_error)?;
    let mut bytes = Vec::new();
    file.take(MAX_REPORT_BYTES + 1)
        .read_to_end(&mut bytes)
        .map_err(io_error)?;
    if bytes.len() as u64 > MAX_REPORT_BYTES {
        return Err(ParseError::TooLarge {
            path: path.to_path_buf(),
            limit: MAX_REPORT_BYTES,
        });
    }

    String::from_utf8(bytes).map_err(|_| ParseError::Decode {
        path: path.to_path_buf(),
    })
}

/// Batch tuning knobs.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Worker threads; `None` or `0` picks a default from the CPU count.
    pub jobs: Option<usize>,
}

/// Parses every path with default options.
pub fn parse_many(paths: &[PathBuf], selection: &Selection) -> ParsedCollection {
    parse_many_with(paths, selection, &BatchOptions::default())
}

/// Parses every path in parallel, keeping the input order.
///
/// The collection always has one entry per path. Entries are keyed by file
/// name; repeated names get a ` (2)`, ` (3)`, … suffix.
pub fn parse_many_with(
    paths: &[PathBuf],
    selection: &Selection,
    options: &BatchOptions,
) -> ParsedCollection {
    let parse_one = |path: &PathBuf| match parse_file(path, selection) {
        Ok(parsed) => parsed,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Failed to parse report");
            ParsedFile::error(format!("{FILE_ERROR_PREFIX}: {err}"))
        }
    };

    let jobs = options
        .jobs
        .filter(|jobs| *jobs > 0)
        .unwrap_or_else(|| default_parallel_jobs(paths.len()));

    let mut results: Vec<(usize, ParsedFile)> = match rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
    {
        Ok(pool) => {
            use rayon::prelude::*;
            pool.install(|| {
                paths
                    .par_iter()
                    .enumerate()
                    .map(|(index, path)| (index, parse_one(path)))
                    .collect()
            })
        }
        Err(err) => {
            warn!(error = %err, "Thread pool unavailable, parsing sequentially");
            paths
                .iter()
                .enumerate()
                .map(|(index, path)| (index, parse_one(path)))
                .collect()
        }
    };

    // Re-sequence by input position.
    results.sort_by_key(|(index, _)| *index);

    let mut collection = ParsedCollection::with_capacity(paths.len());
    for (index, parsed) in results {
        let name = unique_file_name(&collection, &paths[index]);
        collection.insert(name, parsed);
    }

    info!(
        files = collection.len(),
        failed = collection.failed_count(),
        records = collection.total_records(),
        "Batch parse finished"
    );
    collection
}

fn default_parallel_jobs(file_count: usize) -> usize {
    let cpu_count = std::thread::available_parallelism()
        .map(|parallelism| parallelism.get())
        .unwrap_or(4);
    cpu_count.min(file_count.max(1))
}

fn unique_file_name(collection: &ParsedCollection, path: &Path) -> String {
    let base = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    if !collection.contains(&base) {
        return base;
    }
    (2..)
        .map(|suffix| format!("{base} ({suffix})"))
        .find(|candidate| !collection.contains(candidate))
        .unwrap_or(base)
}

/// Collects report paths from files and directories.
///
/// Files are kept as given. Directories are walked recursively for `.txt`
/// files (any case), sorted by name within each directory. A path listed
/// twice is kept once.
pub fn collect_report_paths(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    if inputs.is_empty() {
        return Err(ParseError::InvalidInput(
            "No report paths were provided".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    let mut paths = Vec::new();

    for input in inputs {
        if input.is_dir() {
            for entry in walkdir::WalkDir::new(input).sort_by_file_name() {
                let entry = entry?;
                if entry.file_type().is_file() && is_report_file(entry.path()) {
                    let path = entry.into_path();
                    if seen.insert(path.clone()) {
                        paths.push(path);
                    }
                }
            }
            continue;
        }

        if input.is_file() {
            if seen.insert(input.clone()) {
                paths.push(input.clone());
            }
            continue;
        }

        return Err(ParseError::InvalidInput(format!(
            "Report path '{}' does not exist",
            input.display()
        )));
    }

    if paths.is_empty() {
        return Err(ParseError::InvalidInput(
            "No .txt report files were found".to_string(),
        ));
    }

    debug!(count = paths.len(), "Collected report paths");
    Ok(paths)
}

fn is_report_file(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"))
}
