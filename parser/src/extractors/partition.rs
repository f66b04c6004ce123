//! Logical drive (partition table) extractor.
//!
//! Each local-drive line yields five records:
//!
//! ```text
//! C:       本地驱动器   NTFS   500 GB   120 GB   380 GB   24%
//! ```
//!
//! becomes `C: 文件系统 = NTFS`, `C: 总大小 = 500 GB`, `C: 已用空间 = 120 GB`,
//! `C: 可用空间 = 380 GB`, `C: 使用率 = 24%`.

use aida_report_core::Record;
use tracing::debug;

use super::Extractor;
use crate::section::{LOGICAL_DRIVES, find_section};
use crate::util::is_drive_key;

/// Marker token of a local drive row.
pub const LOCAL_DRIVE_MARKER: &str = "本地驱动器";

/// Record suffixes in output order, paired with their field position.
pub const PARTITION_FIELDS: [(&str, usize); 5] = [
    ("文件系统", 2),
    ("总大小", 3),
    ("已用空间", 4),
    ("可用空间", 5),
    ("使用率", 6),
];

const MIN_FIELDS: usize = 7;

const SIZE_UNITS: &[&str] = &[
    "B", "KB", "MB", "GB", "TB", "PB", "KiB", "MiB", "GiB", "TiB", "字节", "%",
];

pub struct Partitions;

impl Extractor for Partitions {
    fn name(&self) -> &'static str {
        "partitions"
    }

    fn claims(&self, key: &str) -> bool {
        is_drive_key(key) || key.starts_with("分区")
    }

    fn extract(&self, report: &str) -> Vec<Record> {
        let Some(block) = find_section(report, LOGICAL_DRIVES) else {
            debug!(section = LOGICAL_DRIVES, "Section not found");
            return Vec::new();
        };

        let mut records = Vec::new();
        for line in block.lines() {
            if !line.contains(LOCAL_DRIVE_MARKER) {
                continue;
            }
            let fields = split_fields(line);
            if fields.len() < MIN_FIELDS {
                debug!(line = line.trim(), "Skipping short partition row");
                continue;
            }
            let drive = &fields[0];
            for (label, position) in PARTITION_FIELDS {
                records.push(Record::new(format!("{drive} {label}"), fields[position].clone()));
            }
        }
        records
    }
}

/// Splits a row on whitespace, joining size units to the number before them.
fn split_fields(line: &str) -> Vec<String> {
    let mut fields: Vec<String> = Vec::new();
    for token in line.split_whitespace() {
        if SIZE_UNITS.contains(&token) {
            if let Some(previous) = fields.last_mut().filter(|prev| is_number(prev)) {
                previous.push(' ');
                previous.push_str(token);
                continue;
            }
        }
        fields.push(token.to_string());
    }
    fields
}

fn is_number(token: &str) -> bool {
    !token.is_empty()
        && token.chars().any(|ch| ch.is_ascii_digit())
        && token
            .chars()
            .all(|ch| ch.is_ascii_digit() || ch == '.' || ch == ',')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(rows: &str) -> String {
        format!("--------[ 逻辑驱动器 ]----\n\n{rows}\n\n--------[ 物理驱动器 ]----\n")
    }

    #[test]
    fn test_size_units_join_their_numbers() {
        assert_eq!(
            split_fields("C:  本地驱动器  NTFS  500 GB  120 GB  380 GB  24%"),
            vec!["C:", "本地驱动器", "NTFS", "500 GB", "120 GB", "380 GB", "24%"]
        );
        assert_eq!(
            split_fields("D:  本地驱动器  NTFS  931.5 GB  12 GB  919.5 GB  1 %"),
            vec!["D:", "本地驱动器", "NTFS", "931.5 GB", "12 GB", "919.5 GB", "1 %"]
        );
    }

    #[test]
    fn test_local_drive_row_yields_five_records() {
        let text = report("  C:       本地驱动器   NTFS   500 GB   120 GB   380 GB   24%");
        assert_eq!(
            Partitions.extract(&text),
            vec![
                Record::new("C: 文件系统", "NTFS"),
                Record::new("C: 总大小", "500 GB"),
                Record::new("C: 已用空间", "120 GB"),
                Record::new("C: 可用空间", "380 GB"),
                Record::new("C: 使用率", "24%"),
            ]
        );
    }

    #[test]
    fn test_rows_without_marker_or_fields_are_skipped() {
        let text = report(
            "  分区  类型  文件系统  总大小  已用空间  可用空间  使用率\n  E:  光驱\n  F:  本地驱动器  NTFS",
        );
        assert!(Partitions.extract(&text).is_empty());
    }

    #[test]
    fn test_missing_section_is_empty() {
        assert!(Partitions.extract("no sections here").is_empty());
    }
}
