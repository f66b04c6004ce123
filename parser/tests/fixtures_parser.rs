use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use aida_report_core::{ERROR_ITEM, ParsedFile, Record, Selection, WildcardCategory};
use aida_report_parser::extractors::{EXTRACTORS, Extractor, InstalledSoftware};
use aida_report_parser::section::section_names;
use aida_report_parser::{BatchOptions, parse_file, parse_many, parse_many_with, parse_report};

#[test]
fn test_workstation_fixture_sections() {
    let report = fixture("workstation-report.txt");
    assert_eq!(
        section_names(&report),
        vec!["系统概述", "SPD", "逻辑驱动器", "Windows 网络", "已安装程序"]
    );
}

#[test]
fn test_unfiltered_summary_keys_are_flattened() {
    let parsed = parse_report(&fixture("workstation-report.txt"), &Selection::Unfiltered);

    assert_eq!(
        parsed.get("计算机类型"),
        Some("ACPI x64-based PC  (Mobile Workstation)")
    );
    assert_eq!(parsed.get("计算机名称"), Some("WS-042"));
    assert_eq!(parsed.get("日期 / 时间"), Some("2024-03-18 / 09:41"));
    assert_eq!(
        parsed.get("主板: 主板名称"),
        Some("Dell Precision 7560")
    );
    assert_eq!(parsed.get("DMI 系统序列号"), Some("7XK2M13"));
    assert_eq!(parsed.get("DMI: DMI 系统序列号"), Some("7XK2M13"));
}

#[test]
fn test_memory_slots_from_fixture() {
    let parsed = parse_report(&fixture("workstation-report.txt"), &Selection::Unfiltered);

    assert_eq!(
        parsed.get("DIMM1: 模块容量"),
        Some("8192 MB (2 ranks, 16 banks)")
    );
    assert_eq!(
        parsed.get("DIMM3: 模块容量"),
        Some("16384 MB (2 ranks, 16 banks)")
    );
    assert_eq!(parsed.get("DIMM1: 内存模块特性"), Some(""));
    assert!(
        parsed.iter().all(|record| !record.item.contains("公司名称")),
        "vendor block must not leak into a slot"
    );
}

#[test]
fn test_partitions_from_fixture() {
    let selection = Selection::keys(["C: 文件系统", "C: 使用率", "D: 总大小", "D: 使用率"]);
    let parsed = parse_report(&fixture("workstation-report.txt"), &selection);

    assert_eq!(
        parsed.records(),
        &[
            Record::new("C: 文件系统", "NTFS"),
            Record::new("C: 使用率", "24%"),
            Record::new("D: 总大小", "931.5 GB"),
            Record::new("D: 使用率", "1 %"),
        ]
    );
}

#[test]
fn test_network_adapters_from_fixture() {
    let selection = Selection::keys([
        "网络适配器",
        "Intel(R) Ethernet Connection (13) I219-LM: 连接速度",
        "Intel(R) Wi-Fi 6 AX201 160MHz: 硬件地址(MAC)",
    ]);
    let parsed = parse_report(&fixture("workstation-report.txt"), &selection);

    assert_eq!(
        parsed.records(),
        &[
            Record::new("网络适配器", "Intel(R) Ethernet Connection (13) I219-LM"),
            Record::new(
                "Intel(R) Ethernet Connection (13) I219-LM: 连接速度",
                "1000 Mbps"
            ),
            Record::new("网络适配器", "Intel(R) Wi-Fi 6 AX201 160MHz"),
            Record::new(
                "Intel(R) Wi-Fi 6 AX201 160MHz: 硬件地址(MAC)",
                "A4-B1-C1-11-22-33"
            ),
        ]
    );
}

#[test]
fn test_installed_software_from_fixture() {
    let selection = Selection::keys([WildcardCategory::InstalledSoftware.marker()]);
    let parsed = parse_report(&fixture("workstation-report.txt"), &selection);

    assert_eq!(
        parsed.records(),
        &[
            Record::new("7-Zip", "23.01"),
            Record::new("Google Chrome", "118.0.5993.70"),
            Record::new("Microsoft Visual C++", "20152022"),
            Record::new("Python", "3.11.5"),
        ]
    );
}

#[test]
fn test_missing_network_section_keeps_other_sections() {
    let parsed = parse_report(&fixture("no-network-report.txt"), &Selection::Unfiltered);

    assert!(parsed.get("网络适配器").is_none());
    assert!(
        parsed
            .iter()
            .all(|record| !record.item.ends_with(": 连接速度"))
    );
    assert_eq!(parsed.get("计算机名称"), Some("WS-042"));
    assert_eq!(parsed.get("C: 文件系统"), Some("NTFS"));
    assert_eq!(parsed.get("Python"), Some("3.11.5"));
}

#[test]
fn test_filter_soundness() {
    let report = fixture("workstation-report.txt");
    let selections = [
        Selection::keys(["计算机类型", "DMI BIOS 版本", "DIMM3: 存取速度"]),
        Selection::keys(["网络设备: 主 IP 地址", "网络适配器1", "E: (NTFS)"]),
        Selection::keys(["C: 可用空间", "网络适配器", "不存在的项目"]),
        Selection::keys(["操作系统"]).with_wildcard(WildcardCategory::InstalledSoftware),
    ];

    let software: HashSet<Record> = InstalledSoftware.extract(&report).into_iter().collect();

    for selection in &selections {
        let parsed = parse_report(&report, selection);
        assert!(!parsed.is_empty());
        for record in &parsed {
            assert!(
                selection.contains(&record.item) || software.contains(record),
                "unexpected record {record:?} for {selection:?}"
            );
        }
    }
}

#[test]
fn test_filtered_output_is_subset_of_unfiltered() {
    let report = fixture("workstation-report.txt");
    let all: HashSet<Record> = parse_report(&report, &Selection::Unfiltered)
        .into_records()
        .into_iter()
        .collect();

    let selection = Selection::keys([
        "计算机名称",
        "DMI 主机类型",
        "DIMM1: 存取速度",
        "C: 总大小",
        "网络适配器",
    ])
    .with_wildcard(WildcardCategory::InstalledSoftware);
    let parsed = parse_report(&report, &selection);

    assert!(parsed.len() > 5);
    assert!(parsed.iter().all(|record| all.contains(record)));
}

#[test]
fn test_parse_is_idempotent_and_line_ending_agnostic() {
    let report = fixture("workstation-report.txt");
    let selection = Selection::keys(["计算机类型", "DIMM1: 模块名称"]);

    let first = parse_report(&report, &selection);
    let second = parse_report(&report, &selection);
    assert_eq!(first, second);

    let crlf = format!("\u{feff}{}", report.replace('\n', "\r\n"));
    assert_eq!(
        parse_report(&crlf, &Selection::Unfiltered),
        parse_report(&report, &Selection::Unfiltered)
    );
}

#[test]
fn test_every_extractor_contributes_to_unfiltered_fixture() {
    let report = fixture("workstation-report.txt");
    for extractor in EXTRACTORS {
        assert!(
            !extractor.extract(&report).is_empty(),
            "extractor '{}' produced nothing",
            extractor.name()
        );
    }
}

#[test]
fn test_batch_replaces_unreadable_file_with_error_record() {
    let dir = tempfile::tempdir().expect("temp dir");
    let good = dir.path().join("pc-01.txt");
    let bad = dir.path().join("pc-02.txt");
    let other = dir.path().join("pc-03.txt");
    fs::copy(fixture_path("workstation-report.txt"), &good).expect("copy fixture");
    fs::write(&bad, [0xc3, 0x28, 0xa0, 0xa1]).expect("write invalid utf-8");
    fs::copy(fixture_path("no-network-report.txt"), &other).expect("copy fixture");

    let paths = vec![good, bad, other];
    let collection = parse_many(&paths, &Selection::Unfiltered);

    assert_eq!(collection.len(), 3);
    assert_eq!(
        collection.filenames().collect::<Vec<_>>(),
        vec!["pc-01.txt", "pc-02.txt", "pc-03.txt"]
    );
    assert_eq!(collection.failed_count(), 1);

    let failed = collection.get("pc-02.txt").expect("error entry");
    assert_eq!(failed.len(), 1);
    let record = &failed.records()[0];
    assert_eq!(record.item, ERROR_ITEM);
    assert!(record.value.starts_with("解析文件时出错: "));

    assert!(collection.get("pc-01.txt").is_some_and(|file| file.len() > 20));
}

#[test]
fn test_batch_totality_with_missing_and_repeated_names() {
    let dir = tempfile::tempdir().expect("temp dir");
    let nested = dir.path().join("second");
    fs::create_dir(&nested).expect("create dir");
    let first = dir.path().join("report.txt");
    let second = nested.join("report.txt");
    fs::copy(fixture_path("workstation-report.txt"), &first).expect("copy fixture");
    fs::copy(fixture_path("workstation-report.txt"), &second).expect("copy fixture");

    let paths = vec![
        first.clone(),
        dir.path().join("missing.txt"),
        second,
        first,
    ];
    let collection = parse_many_with(
        &paths,
        &Selection::keys(["计算机名称"]),
        &BatchOptions { jobs: Some(2) },
    );

    assert_eq!(collection.len(), paths.len());
    assert_eq!(
        collection.filenames().collect::<Vec<_>>(),
        vec!["report.txt", "missing.txt", "report.txt (2)", "report.txt (3)"]
    );
    assert!(collection.get("missing.txt").is_some_and(ParsedFile::is_error));
    assert_eq!(
        collection.get("report.txt (3)").and_then(|file| file.get("计算机名称")),
        Some("WS-042")
    );
}

#[test]
fn test_parse_file_matches_parse_report() {
    let selection = Selection::keys(["DIMM3: 模块名称"]);
    let from_file = parse_file(&fixture_path("workstation-report.txt"), &selection)
        .expect("fixture should parse");
    assert_eq!(
        from_file,
        parse_report(&fixture("workstation-report.txt"), &selection)
    );
    assert_eq!(from_file.get("DIMM3: 模块名称"), Some("Samsung M471A2K43EB1-CWE"));
}

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn fixture(name: &str) -> String {
    fs::read_to_string(fixture_path(name)).expect("fixture file must be readable")
}
