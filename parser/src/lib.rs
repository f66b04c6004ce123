//! Section-aware parsing of AIDA64 (Chinese locale) text reports.
//!
//! A report is split into `--------[ name ]----` sections. This crate locates
//! those sections, scans their `key: value` lines with subsection context,
//! and runs specialized extractors for the nested structures (DMI, memory
//! slots, partitions, network adapters, installed programs).
//!
//! # Main entry points
//!
//! - [`parse_report`]: parse report text already in memory.
//! - [`parse_file`]: read and parse one report file.
//! - [`parse_many`] / [`parse_many_with`]: parse a batch in parallel; one
//!   bad file never aborts the batch.
//! - [`collect_report_paths`]: expand files and directories into report
//!   paths.
//!
//! # Example
//!
//! ```
//! use aida_report_core::Selection;
//! use aida_report_parser::parse_report;
//!
//! let report = "\
//! --------[ 系统概述 ]--------------------------------
//!
//!   计算机:
//!     计算机类型: ACPI x64-based PC
//!     操作系统: Microsoft Windows 11 Professional
//!
//!   主板:
//!     处理器名称: Intel Core i7-13700K
//!
//! --------[ SPD ]-------------------------------------
//! ";
//!
//! let all = parse_report(report, &Selection::Unfiltered);
//! assert_eq!(all.get("计算机类型"), Some("ACPI x64-based PC"));
//! assert_eq!(all.get("主板: 处理器名称"), Some("Intel Core i7-13700K"));
//!
//! let some = parse_report(report, &Selection::keys(["操作系统"]));
//! assert_eq!(some.len(), 1);
//! ```

pub mod batch;
pub mod error;
pub mod extractors;
pub mod output;
pub mod scanner;
pub mod section;
mod util;

pub use batch::{
    BatchOptions, MAX_REPORT_BYTES, collect_report_paths, parse_file, parse_many,
    parse_many_with, parse_report, read_report,
};
pub use error::{ParseError, Result};
pub use output::{OutputFormat, format_collection, summary_line};
