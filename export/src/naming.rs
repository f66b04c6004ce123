//! Sheet and file name derivation.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Longest sheet name a workbook accepts.
pub const MAX_SHEET_NAME_CHARS: usize = 31;

const FORBIDDEN_SHEET_CHARS: [char; 7] = ['\\', '/', '*', '[', ']', ':', '?'];

/// Fallback for names that sanitize to nothing.
pub const FALLBACK_SHEET_NAME: &str = "Sheet";

/// Truncates a file name to 31 characters and removes `\ / * [ ] : ?`.
///
/// ```
/// use aida_report_export::sanitize_sheet_name;
///
/// assert_eq!(sanitize_sheet_name("pc[01]:a?.txt"), "pc01a.txt");
/// assert_eq!(sanitize_sheet_name("???"), "Sheet");
/// ```
pub fn sanitize_sheet_name(filename: &str) -> String {
    let name: String = filename
        .chars()
        .take(MAX_SHEET_NAME_CHARS)
        .filter(|ch| !FORBIDDEN_SHEET_CHARS.contains(ch))
        .collect();
    // Sheet names may not start or end with an apostrophe.
    let name = name.trim_matches('\'');
    if name.is_empty() {
        FALLBACK_SHEET_NAME.to_string()
    } else {
        name.to_string()
    }
}

/// Hands out distinct sheet names for one workbook.
///
/// Sheet names compare case-insensitively, so `Report` and `report` clash.
#[derive(Debug, Default)]
pub struct SheetNamer {
    used: HashSet<String>,
}

impl SheetNamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a sanitized, unused name for `filename`.
    pub fn next_name(&mut self, filename: &str) -> String {
        let base = sanitize_sheet_name(filename);
        let mut candidate = base.clone();
        let mut suffix = 2;
        while self.used.contains(&candidate.to_lowercase()) {
            let tail = format!(" ({suffix})");
            let keep = MAX_SHEET_NAME_CHARS - tail.chars().count();
            candidate = format!("{}{tail}", base.chars().take(keep).collect::<String>());
            suffix += 1;
        }
        self.used.insert(candidate.to_lowercase());
        candidate
    }
}

/// Hands out distinct per-file output paths inside one directory.
#[derive(Debug, Default)]
pub struct FileNamer {
    used: HashSet<PathBuf>,
}

impl FileNamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `<dir>/<base>_<stem>.<extension>`, suffixed when taken.
    pub fn next_path(&mut self, dir: &Path, base: &str, filename: &str, extension: &str) -> PathBuf {
        let stem = file_stem(filename);
        let mut candidate = dir.join(format!("{base}_{stem}.{extension}"));
        let mut suffix = 2;
        while self.used.contains(&candidate) {
            candidate = dir.join(format!("{base}_{stem} ({suffix}).{extension}"));
            suffix += 1;
        }
        self.used.insert(candidate.clone());
        candidate
    }
}

const FORBIDDEN_FILE_CHARS: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// File name without its last extension, with characters that are not
/// portable in file names replaced by `_`.
fn file_stem(filename: &str) -> String {
    let stem = Path::new(filename)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| filename.to_string());
    stem.replace(FORBIDDEN_FILE_CHARS, "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_before_removing() {
        let long = format!("{}:{}", "a".repeat(29), "bcdef");
        assert_eq!(sanitize_sheet_name(&long), format!("{}b", "a".repeat(29)));
    }

    #[test]
    fn test_non_ascii_counts_characters() {
        let name = "办公室电脑报告".repeat(5);
        assert_eq!(sanitize_sheet_name(&name).chars().count(), 31);
    }

    #[test]
    fn test_apostrophes_trimmed() {
        assert_eq!(sanitize_sheet_name("'quoted'.txt"), "quoted'.txt");
        assert_eq!(sanitize_sheet_name("''"), "Sheet");
    }

    #[test]
    fn test_sheet_namer_dedupes_case_insensitively() {
        let mut namer = SheetNamer::new();
        assert_eq!(namer.next_name("Report.txt"), "Report.txt");
        assert_eq!(namer.next_name("report.txt"), "report.txt (2)");
        assert_eq!(namer.next_name("REPORT.TXT"), "REPORT.TXT (3)");
    }

    #[test]
    fn test_sheet_namer_suffix_stays_within_limit() {
        let mut namer = SheetNamer::new();
        let long = "x".repeat(40);
        assert_eq!(namer.next_name(&long), "x".repeat(31));
        let second = namer.next_name(&long);
        assert_eq!(second, format!("{} (2)", "x".repeat(27)));
        assert_eq!(second.chars().count(), 31);
    }

    #[test]
    fn test_file_namer() {
        let dir = Path::new("out");
        let mut namer = FileNamer::new();
        assert_eq!(
            namer.next_path(dir, "batch", "pc-01.txt", "csv"),
            dir.join("batch_pc-01.csv")
        );
        assert_eq!(
            namer.next_path(dir, "batch", "pc-01.TXT", "csv"),
            dir.join("batch_pc-01 (2).csv")
        );
        assert_eq!(
            namer.next_path(dir, "batch", "notes", "csv"),
            dir.join("batch_notes.csv")
        );
        assert_eq!(
            namer.next_path(dir, "batch", "pc:03?.txt", "csv"),
            dir.join("batch_pc_03_.csv")
        );
    }
}
