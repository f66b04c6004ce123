//! Context-aware key/value scanning inside a section block.
//!
//! A line ending in `:` opens a subsection; the key/value lines that follow
//! are emitted as `"<subsection>: <name>"`. The `计算机` subsection is
//! flattened so its keys appear without a prefix.
//!
//! ```
//! use aida_report_parser::scanner::ContextScanner;
//!
//! let block = "\
//!   计算机:
//!     计算机类型: Desktop
//!   主板:
//!     主板名称: ASUS PRIME Z790-P
//! ";
//! let keys: Vec<String> = ContextScanner::new(block).map(|r| r.item).collect();
//! assert_eq!(keys, vec!["计算机类型", "主板: 主板名称"]);
//! ```

use aida_report_core::Record;

use crate::util::split_key_value;

/// Subsection whose keys are emitted without a prefix.
pub const COMPUTER_SUBSECTION: &str = "计算机";

/// Canonical names for computer-identity keys referenced unprefixed by
/// templates.
const KEY_ALIASES: [(&str, &str); 5] = [
    ("计算机: 计算机类型", "计算机类型"),
    ("计算机: 操作系统", "操作系统"),
    ("计算机: 计算机名称", "计算机名称"),
    ("计算机: 用户名称", "用户名称"),
    ("计算机: 登录域", "登录域"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState<'a> {
    NoSubsection,
    InSubsection(&'a str),
}

/// Iterator over the records of one block.
#[derive(Debug, Clone)]
pub struct ContextScanner<'a> {
    lines: std::str::Lines<'a>,
    state: ScanState<'a>,
}

impl<'a> ContextScanner<'a> {
    pub fn new(block: &'a str) -> Self {
        Self {
            lines: block.lines(),
            state: ScanState::NoSubsection,
        }
    }

    /// Current subsection label, if one is open.
    pub fn subsection(&self) -> Option<&'a str> {
        match self.state {
            ScanState::NoSubsection => None,
            ScanState::InSubsection(label) => Some(label),
        }
    }
}

impl Iterator for ContextScanner<'_> {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        for line in self.lines.by_ref() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            if let Some(label) = trimmed.strip_suffix(':') {
                self.state = ScanState::InSubsection(label.trim_end());
                continue;
            }

            let ScanState::InSubsection(subsection) = self.state else {
                continue;
            };
            let Some((name, value)) = split_key_value(trimmed) else {
                continue;
            };
            return Some(Record::new(derive_key(subsection, name), value));
        }
        None
    }
}

/// Builds the record key for `name` inside `subsection`.
///
/// ```
/// use aida_report_parser::scanner::derive_key;
///
/// assert_eq!(derive_key("计算机", "操作系统"), "操作系统");
/// assert_eq!(derive_key("主板", "主板名称"), "主板: 主板名称");
/// ```
pub fn derive_key(subsection: &str, name: &str) -> String {
    let key = if subsection == COMPUTER_SUBSECTION {
        name.to_string()
    } else {
        format!("{subsection}: {name}")
    };
    canonical_key(key)
}

fn canonical_key(key: String) -> String {
    KEY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, canonical)| (*canonical).to_string())
        .unwrap_or(key)
}

/// Scans a whole block into records.
pub fn scan_block(block: &str) -> Vec<Record> {
    ContextScanner::new(block).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_computer_subsection_is_flattened() {
        let records = scan_block("  计算机:\n    计算机类型: Desktop\n    操作系统: Microsoft Windows 11 Pro\n");
        assert_eq!(
            records,
            vec![
                Record::new("计算机类型", "Desktop"),
                Record::new("操作系统", "Microsoft Windows 11 Pro"),
            ]
        );
    }

    #[test]
    fn test_lines_before_first_subsection_are_ignored() {
        let records = scan_block("  orphan: value\n  主板:\n    主板芯片组: Intel Z790\n");
        assert_eq!(records, vec![Record::new("主板: 主板芯片组", "Intel Z790")]);
    }

    #[test]
    fn test_new_subsection_replaces_previous() {
        let mut scanner = ContextScanner::new("  显示设备:\n    显示适配器: RTX 4070\n  存储设备:\n    硬盘驱动器1: Samsung 990\n");
        assert_eq!(
            scanner.next(),
            Some(Record::new("显示设备: 显示适配器", "RTX 4070"))
        );
        assert_eq!(scanner.subsection(), Some("显示设备"));
        assert_eq!(
            scanner.next(),
            Some(Record::new("存储设备: 硬盘驱动器1", "Samsung 990"))
        );
        assert_eq!(scanner.next(), None);
    }

    #[test]
    fn test_colonless_lines_skipped_and_value_keeps_later_colons() {
        let records = scan_block("  网络设备:\n    free text line\n    主 MAC 地址: 00-1A:2B\n");
        assert_eq!(records, vec![Record::new("网络设备: 主 MAC 地址", "00-1A:2B")]);
    }

    #[test]
    fn test_alias_table_maps_prefixed_computer_keys() {
        for (alias, canonical) in KEY_ALIASES {
            assert_eq!(canonical_key(alias.to_string()), canonical);
        }
        assert_eq!(canonical_key("主板: 主板名称".to_string()), "主板: 主板名称");
    }

    #[test]
    fn test_dmi_subsection_keys_are_prefixed() {
        let records = scan_block("  DMI:\n    DMI BIOS 厂商: American Megatrends Inc.\n");
        assert_eq!(
            records,
            vec![Record::new("DMI: DMI BIOS 厂商", "American Megatrends Inc.")]
        );
    }
}
