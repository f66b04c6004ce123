//! Report parsing example.
//!
//! Parses an in-memory report twice: once unfiltered and once with a small
//! key selection plus the installed-programs wildcard.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p aida-report-parser --example parse_report
//! ```

use aida_report_core::{Selection, WildcardCategory};
use aida_report_parser::{OutputFormat, format_collection, parse_report};

fn main() {
    let report = r#"
--------[ 系统概述 ]------------------------------------------------

    计算机:
      计算机类型: ACPI x64-based PC
      操作系统: Microsoft Windows 11 Professional
      计算机名称: DEMO-PC

    主板:
      处理器名称: Intel Core i5-12400
      系统内存: 16234 MB  (DDR4 SDRAM)

    DMI:
      DMI BIOS 厂商: American Megatrends Inc.
      DMI 系统序列号: System Serial Number


--------[ SPD ]-----------------------------------------------------

    [ DIMM1: Kingston KHX3200C16D4/8GX ]

      模块容量: 8192 MB
      存取速度: DDR4-3200


--------[ 已安装程序 ]----------------------------------------------

    7-Zip 23.01 (x64)
    Google Chrome 118.0.5993.70 (64-bit)

The names of actual companies and products mentioned herein may be the trademarks of their respective owners.
"#;

    let all = parse_report(report, &Selection::Unfiltered);
    println!("Unfiltered: {} records", all.len());
    for record in &all {
        println!("  {} = {}", record.item, record.value);
    }

    let selection = Selection::keys(["计算机名称", "DMI 系统序列号", "DIMM1: 模块容量"])
        .with_wildcard(WildcardCategory::InstalledSoftware);
    let some = parse_report(report, &selection);

    let mut collection = aida_report_core::ParsedCollection::new();
    collection.insert("demo.txt", some);
    match format_collection(&collection, OutputFormat::Table) {
        Ok(table) => print!("\nSelected:\n{table}"),
        Err(err) => eprintln!("error: {err}"),
    }
}
