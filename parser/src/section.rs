//! Section discovery in raw report text.
//!
//! Reports are split into top-level blocks introduced by a rule line such as
//!
//! ```text
//! --------[ 系统概述 ]----------------------------------------------
//! ```
//!
//! A block runs until the first blank line that is immediately followed by
//! another rule line. The first terminator found wins.

/// Leading dashes shared by every section header line.
pub const SECTION_RULE: &str = "--------";

/// Summary block holding the computer, board and DMI subsections.
pub const SYSTEM_SUMMARY: &str = "系统概述";
/// Memory module SPD dump.
pub const SPD: &str = "SPD";
/// Partition table.
pub const LOGICAL_DRIVES: &str = "逻辑驱动器";
/// Per-adapter network details.
pub const WINDOWS_NETWORK: &str = "Windows 网络";
/// Installed programs listing.
pub const INSTALLED_PROGRAMS: &str = "已安装程序";
/// Sentence that closes the installed programs listing.
pub const PROGRAMS_BOILERPLATE: &str = "The names of";

/// Normalizes line endings to `\n` and drops a leading byte order mark.
///
/// ```
/// use aida_report_parser::section::normalize_report;
///
/// assert_eq!(normalize_report("\u{feff}a\r\nb\rc"), "a\nb\nc");
/// ```
pub fn normalize_report(raw: &str) -> String {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    raw.replace("\r\n", "\n").replace('\r', "\n")
}

/// Returns the section name if `line` is a section header.
pub fn header_name(line: &str) -> Option<&str> {
    let rest = line.trim().strip_prefix(SECTION_RULE)?.strip_prefix('[')?;
    let close = rest.find(']')?;
    let tail = &rest[close + 1..];
    if tail.is_empty() || !tail.chars().all(|ch| ch == '-') {
        return None;
    }
    Some(rest[..close].trim())
}

/// Lists section names in document order.
///
/// ```
/// use aida_report_parser::section::section_names;
///
/// let text = "--------[ 系统概述 ]----\n\n  a:\n\n--------[ SPD ]----\n";
/// assert_eq!(section_names(text), vec!["系统概述", "SPD"]);
/// ```
pub fn section_names(text: &str) -> Vec<&str> {
    text.lines().filter_map(header_name).collect()
}

/// Finds the body of the named section.
///
/// Returns `None` when no header for `name` exists. A section without a
/// terminator runs to the end of the text.
///
/// ```
/// use aida_report_parser::section::find_section;
///
/// let text = "\
/// --------[ 逻辑驱动器 ]--------
///
///   C:  本地驱动器  NTFS
///
/// --------[ 物理驱动器 ]--------
/// ";
/// assert_eq!(find_section(text, "逻辑驱动器"), Some("\n  C:  本地驱动器  NTFS"));
/// assert_eq!(find_section(text, "SPD"), None);
/// ```
pub fn find_section<'a>(text: &'a str, name: &str) -> Option<&'a str> {
    find_section_until(text, name, None)
}

/// Like [`find_section`], but also ends the block at the first line that
/// starts with `boilerplate`.
pub fn find_section_until<'a>(
    text: &'a str,
    name: &str,
    boilerplate: Option<&str>,
) -> Option<&'a str> {
    let lines = line_spans(text);
    let header = lines
        .iter()
        .position(|(_, line)| header_name(line) == Some(name))?;

    let Some(&(body_start, _)) = lines.get(header + 1) else {
        return Some("");
    };

    let mut body_end = text.len();
    for (idx, &(offset, line)) in lines.iter().enumerate().skip(header + 1) {
        if boilerplate.is_some_and(|marker| line.trim_start().starts_with(marker)) {
            body_end = offset;
            break;
        }
        let next_is_rule = lines
            .get(idx + 1)
            .is_some_and(|(_, next)| next.trim_start().starts_with(SECTION_RULE));
        if line.trim().is_empty() && next_is_rule {
            body_end = offset;
            break;
        }
    }

    Some(text[body_start..body_end].trim_end_matches(['\n', '\r']))
}

/// Splits text into `(byte offset, line without terminator)` pairs.
fn line_spans(text: &str) -> Vec<(usize, &str)> {
    let mut spans = Vec::new();
    let mut offset = 0;
    for piece in text.split_inclusive('\n') {
        let line = piece.strip_suffix('\n').unwrap_or(piece);
        let line = line.strip_suffix('\r').unwrap_or(line);
        spans.push((offset, line));
        offset += piece.len();
    }
    spans
}
