//! Specialized extractors and their relevance table.
//!
//! Each extractor owns one region of the report and knows which selection
//! keys it can produce. The batch coordinator consults [`EXTRACTORS`] in
//! order and skips extractors no selected key points at.

mod firmware;
mod memory;
mod network;
mod partition;
mod software;
mod summary;

use aida_report_core::{Record, Selection, WildcardCategory};

pub use firmware::FirmwareIdentity;
pub use memory::{MEMORY_SLOTS, MemoryModules};
pub use network::{ADAPTER_ITEM, FORWARDED_FIELDS, NetworkAdapters};
pub use partition::{PARTITION_FIELDS, Partitions};
pub use software::InstalledSoftware;
pub use summary::SystemSummary;

/// One region-specific report extractor.
pub trait Extractor: Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Returns `true` if `key` is one this extractor can produce.
    fn claims(&self, key: &str) -> bool;

    /// Category whose marker turns this extractor on unconditionally.
    ///
    /// Records of a wildcard extractor bypass the key filter.
    fn wildcard(&self) -> Option<WildcardCategory> {
        None
    }

    /// Extracts records from normalized report text.
    fn extract(&self, report: &str) -> Vec<Record>;

    /// Returns `true` if this extractor should run for `selection`.
    fn is_relevant(&self, selection: &Selection) -> bool {
        match self.wildcard() {
            Some(category) => selection.includes(category),
            None => selection.any(|key| self.claims(key)),
        }
    }
}

/// Extractors in output order.
pub const EXTRACTORS: &[&dyn Extractor] = &[
    &SystemSummary,
    &FirmwareIdentity,
    &MemoryModules,
    &Partitions,
    &NetworkAdapters,
    &InstalledSoftware,
];

/// Returns `true` for keys only a specialized extractor can produce.
///
/// Everything else may come out of the system summary scanner.
fn is_specialized_key(key: &str) -> bool {
    MemoryModules.claims(key)
        || Partitions.claims(key)
        || network::is_adapter_key(key)
        || key == WildcardCategory::InstalledSoftware.marker()
}
