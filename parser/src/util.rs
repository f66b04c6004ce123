//! Line helpers shared by the scanner and the extractors.

/// Splits a line on its first colon into trimmed `(name, value)` parts.
///
/// Returns `None` when the line has no colon or the name part is empty.
pub fn split_key_value(line: &str) -> Option<(&str, &str)> {
    let (name, value) = line.split_once(':')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name, value.trim()))
}

/// Number of leading whitespace characters (a tab counts as one).
pub fn indent_width(line: &str) -> usize {
    line.chars().take_while(|ch| ch.is_whitespace()).count()
}

/// Returns `true` for a drive-letter key such as `C: 文件系统` or `D:`.
pub fn is_drive_key(key: &str) -> bool {
    let mut chars = key.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(letter), Some(':'), None | Some(' ')) if letter.is_ascii_alphabetic()
    )
}
