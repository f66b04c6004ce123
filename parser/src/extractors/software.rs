//! Installed programs extractor.
//!
//! Program lines carry no separator between name and version, so the split
//! is heuristic: the first token after the name that starts with a digit or a
//! dot is the version.

use aida_report_core::{Record, WildcardCategory};
use tracing::debug;

use super::Extractor;
use crate::section::{INSTALLED_PROGRAMS, PROGRAMS_BOILERPLATE, find_section_until};

pub struct InstalledSoftware;

impl Extractor for InstalledSoftware {
    fn name(&self) -> &'static str {
        "software"
    }

    fn claims(&self, key: &str) -> bool {
        key == WildcardCategory::InstalledSoftware.marker()
    }

    fn wildcard(&self) -> Option<WildcardCategory> {
        Some(WildcardCategory::InstalledSoftware)
    }

    fn extract(&self, report: &str) -> Vec<Record> {
        let Some(block) =
            find_section_until(report, INSTALLED_PROGRAMS, Some(PROGRAMS_BOILERPLATE))
        else {
            debug!(section = INSTALLED_PROGRAMS, "Section not found");
            return Vec::new();
        };
        block.lines().filter_map(split_program_line).collect()
    }
}

/// Splits `Google Chrome 118.0.5993.70 (64-bit)` into
/// `("Google Chrome", "118.0.5993.70")`.
///
/// Returns `None` when no token after the first looks like a version.
pub fn split_program_line(line: &str) -> Option<Record> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let position = tokens
        .iter()
        .skip(1)
        .position(|token| token.starts_with(|ch: char| ch.is_ascii_digit() || ch == '.'))?
        + 1;

    let version: String = tokens[position]
        .chars()
        .filter(|ch| ch.is_ascii_digit() || *ch == '.')
        .collect();
    Some(Record::new(tokens[..position].join(" "), version))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chrome_line() {
        assert_eq!(
            split_program_line("  Google Chrome 118.0.5993.70 (64-bit)"),
            Some(Record::new("Google Chrome", "118.0.5993.70"))
        );
    }

    #[test]
    fn test_version_token_is_cleaned() {
        assert_eq!(
            split_program_line("Notepad++ 8.5.8-x64"),
            Some(Record::new("Notepad++", "8.5.864"))
        );
        assert_eq!(
            split_program_line("Tool .NET 4.8"),
            Some(Record::new("Tool", "."))
        );
    }

    #[test]
    fn test_leading_digit_name_is_not_a_version() {
        assert_eq!(
            split_program_line("7-Zip 23.01"),
            Some(Record::new("7-Zip", "23.01"))
        );
    }

    #[test]
    fn test_lines_without_version_are_dropped() {
        assert_eq!(split_program_line("Microsoft Edge"), None);
        assert_eq!(split_program_line("23.01"), None);
        assert_eq!(split_program_line(""), None);
    }

    #[test]
    fn test_extract_stops_at_boilerplate() {
        let report = "\
--------[ 已安装程序 ]--------

  7-Zip 23.01
  Microsoft Edge

  Python 3.11.5 (64-bit)

The names of actual companies and products mentioned herein may be the trademarks.
";
        assert_eq!(
            InstalledSoftware.extract(report),
            vec![Record::new("7-Zip", "23.01"), Record::new("Python", "3.11.5")]
        );
    }
}
