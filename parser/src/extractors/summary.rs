//! System summary extractor.

use aida_report_core::Record;
use tracing::debug;

use super::{Extractor, is_specialized_key};
use crate::scanner::scan_block;
use crate::section::{SYSTEM_SUMMARY, find_section};

/// Runs the context scanner over the `系统概述` block.
pub struct SystemSummary;

impl Extractor for SystemSummary {
    fn name(&self) -> &'static str {
        "system-summary"
    }

    fn claims(&self, key: &str) -> bool {
        !is_specialized_key(key)
    }

    fn extract(&self, report: &str) -> Vec<Record> {
        let Some(block) = find_section(report, SYSTEM_SUMMARY) else {
            debug!(section = SYSTEM_SUMMARY, "Section not found");
            return Vec::new();
        };
        scan_block(block)
    }
}
