//! The four built-in templates.

use aida_report_core::{Template, TemplateSection, WildcardCategory};

/// Id of the full template; unknown ids fall back to it.
pub const STANDARD: &str = "standard";
pub const MINIMAL: &str = "minimal";
pub const HARDWARE_ONLY: &str = "hardware_only";
pub const SOFTWARE_ONLY: &str = "software_only";

/// Built-in templates keyed by id, in catalog order.
pub fn builtin_templates() -> Vec<(&'static str, Template)> {
    vec![
        (STANDARD, standard()),
        (MINIMAL, minimal()),
        (HARDWARE_ONLY, hardware_only()),
        (SOFTWARE_ONLY, software_only()),
    ]
}

fn installed_programs() -> TemplateSection {
    TemplateSection::wildcard("已安装程序", WildcardCategory::InstalledSoftware)
}

fn dimm_fields(slot: u32) -> impl Iterator<Item = String> {
    [
        "模块名称",
        "序列号",
        "制造日期",
        "模块容量",
        "模块类型",
        "存取类型",
        "存取速度",
        "模块位宽",
        "模块电压",
        "错误检测方式",
        "DRAM 制造商",
    ]
    .into_iter()
    .map(move |field| format!("DIMM{slot}: {field}"))
}

fn standard() -> Template {
    Template::new("标准模板", "完整还原AIDA64报告的所有数据")
        .with_section(TemplateSection::explicit(
            "系统概述",
            [
                "计算机类型",
                "操作系统",
                "计算机名称",
                "用户名称",
                "登录域",
                "处理器名称",
                "主板名称",
                "主板芯片组",
                "系统内存",
                "显示适配器",
                "3D 加速器",
                "显示器",
            ],
        ))
        .with_section(TemplateSection::explicit(
            "存储设备",
            [
                "存储控制器1",
                "存储控制器2",
                "硬盘驱动器1",
                "硬盘驱动器2",
                "硬盘 SMART 状态",
            ],
        ))
        .with_section(TemplateSection::explicit(
            "磁盘分区",
            ["C: (NTFS)", "D: (NTFS)", "E: (NTFS)", "总大小"],
        ))
        .with_section(TemplateSection::explicit(
            "网络设备",
            [
                "主 IP 地址",
                "主 MAC 地址",
                "网络适配器1",
                "网络适配器2",
                "网络适配器3",
            ],
        ))
        .with_section(TemplateSection::explicit(
            "DMI信息",
            [
                "DMI BIOS 厂商",
                "DMI BIOS 版本",
                "DMI 系统制造商",
                "DMI 系统产品",
                "DMI 系统版本",
                "DMI 系统序列号",
                "DMI 系统 UUID",
                "DMI 主板制造商",
                "DMI 主板产品",
                "DMI 主板版本",
                "DMI 主板序列号",
                "DMI 主机制造商",
                "DMI 主机版本",
                "DMI 主机序列号",
                "DMI 主机识别标签",
                "DMI 主机类型",
            ],
        ))
        .with_section(TemplateSection::explicit(
            "内存信息",
            dimm_fields(1).chain(dimm_fields(3)),
        ))
        .with_section(TemplateSection::explicit(
            "显示器信息",
            [
                "显示器名称",
                "显示器 ID",
                "显示器型号",
                "显示器类型",
                "制造日期",
                "序列号",
                "最大分辨率",
                "接口类型",
            ],
        ))
        .with_section(TemplateSection::explicit(
            "网络详情",
            [
                "网络适配器",
                "MAC地址 (有线)",
                "IP地址/子网掩码 (有线)",
                "连接速度 (有线)",
                "已接收字节 (有线)",
                "已发送字节 (有线)",
            ],
        ))
        .with_section(installed_programs())
}

fn minimal() -> Template {
    Template::new("精简模板", "仅包含关键系统信息")
        .with_section(TemplateSection::explicit(
            "核心硬件",
            ["处理器名称", "主板名称", "系统内存", "显示适配器"],
        ))
        .with_section(TemplateSection::explicit(
            "存储",
            [
                "硬盘驱动器1",
                "硬盘驱动器2",
                "C: (NTFS)",
                "D: (NTFS)",
                "E: (NTFS)",
            ],
        ))
        .with_section(TemplateSection::explicit(
            "网络",
            ["主 IP 地址", "网络适配器1"],
        ))
}

fn hardware_only() -> Template {
    Template::new("硬件专用模板", "仅提取硬件信息")
        .with_section(TemplateSection::explicit(
            "CPU和主板",
            ["处理器名称", "主板名称", "主板芯片组"],
        ))
        .with_section(TemplateSection::explicit(
            "内存",
            [
                "系统内存",
                "DIMM1: 模块名称",
                "DIMM1: 模块容量",
                "DIMM1: 存取速度",
                "DIMM3: 模块名称",
                "DIMM3: 模块容量",
                "DIMM3: 存取速度",
            ],
        ))
        .with_section(TemplateSection::explicit(
            "显卡和显示器",
            ["显示适配器", "3D 加速器", "显示器", "最大分辨率"],
        ))
        .with_section(TemplateSection::explicit(
            "存储",
            ["硬盘驱动器1", "硬盘驱动器2", "硬盘 SMART 状态"],
        ))
}

fn software_only() -> Template {
    Template::new("软件专用模板", "仅提取软件信息")
        .with_section(TemplateSection::explicit(
            "操作系统",
            ["操作系统", "计算机名称", "用户名称"],
        ))
        .with_section(installed_programs())
}
