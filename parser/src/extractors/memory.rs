//! Memory module (SPD) extractor.

use std::sync::LazyLock;

use aida_report_core::Record;
use regex::Regex;
use tracing::debug;

use super::Extractor;
use crate::section::{SPD, find_section};
use crate::util::split_key_value;

/// Slots reported by the reference hardware.
pub const MEMORY_SLOTS: [u32; 2] = [1, 3];

// SAFETY: compile-time constant pattern, covered by tests.
static SLOT_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[\s*DIMM(\d+)\s*:\s*(.*?)\s*\]$").expect("static regex must compile")
});

/// Emits `DIMM<N>: <field>` records for each recognized slot block.
///
/// A slot block starts at a `[ DIMM<N>: <model> ]` line and ends at the next
/// bracketed line or the end of the section.
pub struct MemoryModules;

impl Extractor for MemoryModules {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn claims(&self, key: &str) -> bool {
        key.starts_with("DIMM")
    }

    fn extract(&self, report: &str) -> Vec<Record> {
        let Some(block) = find_section(report, SPD) else {
            debug!(section = SPD, "Section not found");
            return Vec::new();
        };
        extract_slots(block)
    }
}

/// Parses a bracketed slot header into its slot number and module model.
pub fn parse_slot_header(line: &str) -> Option<(u32, &str)> {
    let caps = SLOT_HEADER.captures(line.trim())?;
    let slot = caps.get(1)?.as_str().parse().ok()?;
    let model = caps.get(2).map_or("", |m| m.as_str());
    Some((slot, model))
}

fn extract_slots(block: &str) -> Vec<Record> {
    let mut records = Vec::new();
    let mut slot: Option<u32> = None;

    for line in block.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            slot = parse_slot_header(trimmed)
                .map(|(number, _)| number)
                .filter(|number| MEMORY_SLOTS.contains(number));
            continue;
        }

        let Some(number) = slot else {
            continue;
        };
        if let Some((name, value)) = split_key_value(trimmed) {
            records.push(Record::new(format!("DIMM{number}: {name}"), value));
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPD_BLOCK: &str = "\
  [ DIMM1: Kingston 8GB ]

    内存模块特性:
    模块容量: 8192 MB
    模块类型: Unbuffered DIMM

  [ DIMM2: Kingston 8GB ]

    模块容量: 8192 MB

  [ DIMM3: Samsung M378A1K43EB2-CWE ]

    模块容量: 16384 MB
    存取速度: DDR4-3200
";

    #[test]
    fn test_slot_header_parsing() {
        assert_eq!(
            parse_slot_header("  [ DIMM3: Samsung M378A1K43EB2-CWE ]"),
            Some((3, "Samsung M378A1K43EB2-CWE"))
        );
        assert_eq!(parse_slot_header("[ 通用模块信息 ]"), None);
        assert_eq!(parse_slot_header("DIMM1: x"), None);
    }

    #[test]
    fn test_only_slots_one_and_three_are_emitted() {
        let records = extract_slots(SPD_BLOCK);
        assert_eq!(
            records,
            vec![
                Record::new("DIMM1: 内存模块特性", ""),
                Record::new("DIMM1: 模块容量", "8192 MB"),
                Record::new("DIMM1: 模块类型", "Unbuffered DIMM"),
                Record::new("DIMM3: 模块容量", "16384 MB"),
                Record::new("DIMM3: 存取速度", "DDR4-3200"),
            ]
        );
    }

    #[test]
    fn test_other_bracket_block_closes_slot() {
        let block = "  [ DIMM1: A ]\n    模块容量: 4096 MB\n  [ 厂商信息 ]\n    公司名称: Kingston\n";
        assert_eq!(
            extract_slots(block),
            vec![Record::new("DIMM1: 模块容量", "4096 MB")]
        );
    }

    #[test]
    fn test_extract_from_report_section() {
        let report = "--------[ SPD ]----\n\n  [ DIMM1: Kingston 8GB ]\n\n  模块容量: 8192 MB\n";
        assert_eq!(
            MemoryModules.extract(report),
            vec![Record::new("DIMM1: 模块容量", "8192 MB")]
        );
    }
}
