//! Windows network adapter extractor.
//!
//! The `Windows 网络` section holds one block per adapter. Blocks open with an
//! indented bracket line after a blank line:
//!
//! ```text
//!   [ 以太网 ]
//!
//!     网络适配器: Intel(R) Ethernet Connection I219-V
//!     IP 地址/子网掩码: 192.168.1.20 / 255.255.255.0
//!     硬件地址(MAC): 00-1A-2B-3C-4D-5E
//! ```
//!
//! Only [`FORWARDED_FIELDS`] are emitted, keyed by adapter name.

use aida_report_core::Record;
use tracing::debug;

use super::Extractor;
use crate::section::{WINDOWS_NETWORK, find_section};
use crate::util::split_key_value;

/// Item emitted once per adapter, carrying the adapter name.
pub const ADAPTER_ITEM: &str = "网络适配器";

/// Adapter fields copied into the output.
pub const FORWARDED_FIELDS: [&str; 3] = ["IP 地址/子网掩码", "硬件地址(MAC)", "连接速度"];

/// Template key prefixes that describe adapters.
const NETWORK_PREFIXES: [&str; 3] = [ADAPTER_ITEM, "IP地址", "MAC地址"];

pub struct NetworkAdapters;

impl Extractor for NetworkAdapters {
    fn name(&self) -> &'static str {
        "network"
    }

    fn claims(&self, key: &str) -> bool {
        is_adapter_key(key)
            || NETWORK_PREFIXES
                .iter()
                .any(|prefix| key.starts_with(prefix))
    }

    fn extract(&self, report: &str) -> Vec<Record> {
        let Some(block) = find_section(report, WINDOWS_NETWORK) else {
            debug!(section = WINDOWS_NETWORK, "Section not found");
            return Vec::new();
        };
        extract_adapters(block)
    }
}

/// Returns `true` for keys only this extractor produces: the adapter item
/// itself and `<adapter>: <forwarded field>`.
pub(super) fn is_adapter_key(key: &str) -> bool {
    key == ADAPTER_ITEM
        || key
            .rsplit_once(": ")
            .is_some_and(|(_, field)| FORWARDED_FIELDS.contains(&field))
}

fn extract_adapters(block: &str) -> Vec<Record> {
    let mut records = Vec::new();
    let mut adapter: Option<&str> = None;
    let mut previous_blank = true;

    for line in block.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            previous_blank = true;
            continue;
        }
        if previous_blank && trimmed.starts_with('[') {
            adapter = None;
        }
        previous_blank = false;

        let Some((name, value)) = split_key_value(trimmed) else {
            continue;
        };
        if name == ADAPTER_ITEM {
            adapter = (!value.is_empty()).then_some(value);
            records.push(Record::new(ADAPTER_ITEM, value));
        } else if let Some(current) = adapter {
            if FORWARDED_FIELDS.contains(&name) {
                records.push(Record::new(format!("{current}: {name}"), value));
            }
        }
    }

    records
}
