//! DMI (BIOS, board and chassis identity) extractor.
//!
//! The DMI block sits inside the system summary:
//!
//! ```text
//!   DMI:
//!     DMI BIOS 厂商: American Megatrends Inc.
//!     DMI 系统序列号: 7XK2M13
//! ```
//!
//! It ends at a blank line or at the first line indented no deeper than the
//! `DMI:` header. Keys are emitted as written, without a prefix.

use aida_report_core::Record;
use tracing::debug;

use super::Extractor;
use crate::section::{SYSTEM_SUMMARY, find_section};
use crate::util::{indent_width, split_key_value};

/// Header line that opens the DMI block.
pub const DMI_HEADER: &str = "DMI:";

pub struct FirmwareIdentity;

impl Extractor for FirmwareIdentity {
    fn name(&self) -> &'static str {
        "firmware"
    }

    fn claims(&self, key: &str) -> bool {
        key.starts_with("DMI")
    }

    fn extract(&self, report: &str) -> Vec<Record> {
        let Some(block) = find_section(report, SYSTEM_SUMMARY) else {
            debug!(section = SYSTEM_SUMMARY, "Section not found");
            return Vec::new();
        };
        extract_dmi_block(block)
    }
}

fn extract_dmi_block(block: &str) -> Vec<Record> {
    let mut lines = block.lines();
    let Some(header_indent) = lines
        .by_ref()
        .find(|line| line.trim() == DMI_HEADER)
        .map(indent_width)
    else {
        return Vec::new();
    };

    let mut records = Vec::new();
    for line in lines {
        if line.trim().is_empty() || indent_width(line) <= header_indent {
            break;
        }
        if let Some((name, value)) = split_key_value(line) {
            records.push(Record::new(name, value));
        }
    }
    records
}
