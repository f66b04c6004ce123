//! Key selection applied to extracted records.

use std::collections::HashSet;

use crate::WildcardCategory;

/// Which extracted keys a parse run keeps.
///
/// `Unfiltered` keeps everything. `Keys` keeps only records whose item is in
/// the set; a wildcard marker in the set (see [`WildcardCategory::marker`])
/// turns on the matching extractor unconditionally.
///
/// # Examples
///
/// ```
/// use aida_report_core::Selection;
///
/// let all = Selection::Unfiltered;
/// assert!(all.contains("anything"));
///
/// let some = Selection::keys(["计算机类型", "操作系统", "计算机类型"]);
/// assert_eq!(some.len(), Some(2));
/// assert!(some.contains("操作系统"));
/// assert!(!some.contains("主板名称"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// Keep every extracted key.
    #[default]
    Unfiltered,
    /// Keep only the listed keys.
    Keys(KeySet),
}

impl Selection {
    /// Builds a key selection, dropping blank and repeated keys.
    pub fn keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::Keys(keys.into_iter().collect())
    }

    /// Parses a newline-separated key list, one key per line.
    ///
    /// ```
    /// use aida_report_core::Selection;
    ///
    /// let selection = Selection::from_lines("计算机类型\n\n  操作系统  \n");
    /// assert_eq!(selection.iter().collect::<Vec<_>>(), vec!["计算机类型", "操作系统"]);
    /// ```
    pub fn from_lines(text: &str) -> Self {
        Self::keys(text.lines())
    }

    pub fn is_unfiltered(&self) -> bool {
        matches!(self, Self::Unfiltered)
    }

    /// Returns `true` if records with this item are kept.
    pub fn contains(&self, key: &str) -> bool {
        match self {
            Self::Unfiltered => true,
            Self::Keys(set) => set.contains(key),
        }
    }

    /// Returns `true` if the selection is unfiltered or any key satisfies `pred`.
    pub fn any(&self, pred: impl Fn(&str) -> bool) -> bool {
        match self {
            Self::Unfiltered => true,
            Self::Keys(set) => set.iter().any(pred),
        }
    }

    /// Returns `true` if the wildcard category is requested.
    pub fn includes(&self, category: WildcardCategory) -> bool {
        self.contains(category.marker())
    }

    /// Adds the category marker to a key selection.
    pub fn with_wildcard(self, category: WildcardCategory) -> Self {
        match self {
            Self::Unfiltered => Self::Unfiltered,
            Self::Keys(mut set) => {
                set.insert(category.marker());
                Self::Keys(set)
            }
        }
    }

    /// Removes the category marker from a key selection.
    pub fn without_wildcard(self, category: WildcardCategory) -> Self {
        match self {
            Self::Unfiltered => Self::Unfiltered,
            Self::Keys(mut set) => {
                set.remove(category.marker());
                Self::Keys(set)
            }
        }
    }

    /// Selected keys in order; empty for `Unfiltered`.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let keys: &[String] = match self {
            Self::Unfiltered => &[],
            Self::Keys(set) => set.as_slice(),
        };
        keys.iter().map(String::as_str)
    }

    /// Number of selected keys, or `None` when unfiltered.
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::Unfiltered => None,
            Self::Keys(set) => Some(set.len()),
        }
    }
}

/// Ordered, de-duplicated key list with constant-time membership.
#[derive(Debug, Clone, Default)]
pub struct KeySet {
    ordered: Vec<String>,
    lookup: HashSet<String>,
}

impl KeySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a trimmed key. Returns `false` for blank or repeated keys.
    pub fn insert(&mut self, key: &str) -> bool {
        let key = key.trim();
        if key.is_empty() || self.lookup.contains(key) {
            return false;
        }
        self.lookup.insert(key.to_string());
        self.ordered.push(key.to_string());
        true
    }

    pub fn remove(&mut self, key: &str) -> bool {
        if !self.lookup.remove(key) {
            return false;
        }
        self.ordered.retain(|existing| existing != key);
        true
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lookup.contains(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ordered.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.ordered
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

impl PartialEq for KeySet {
    fn eq(&self, other: &Self) -> bool {
        self.ordered == other.ordered
    }
}

impl Eq for KeySet {}

impl<S: AsRef<str>> FromIterator<S> for KeySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for key in iter {
            set.insert(key.as_ref());
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unfiltered_accepts_everything() {
        let selection = Selection::Unfiltered;
        assert!(selection.contains("DIMM1: 模块容量"));
        assert!(selection.any(|_| false));
        assert!(selection.includes(WildcardCategory::InstalledSoftware));
        assert_eq!(selection.iter().count(), 0);
        assert_eq!(selection.len(), None);
    }

    #[test]
    fn test_keys_trim_and_dedupe() {
        let selection = Selection::keys(["  主板名称 ", "主板名称", "", "系统内存"]);
        assert_eq!(
            selection.iter().collect::<Vec<_>>(),
            vec!["主板名称", "系统内存"]
        );
        assert!(selection.any(|key| key.starts_with("系统")));
        assert!(!selection.any(|key| key.starts_with("DIMM")));
    }

    #[test]
    fn test_wildcard_toggle() {
        let selection = Selection::keys(["操作系统"]);
        assert!(!selection.includes(WildcardCategory::InstalledSoftware));

        let with = selection.with_wildcard(WildcardCategory::InstalledSoftware);
        assert!(with.includes(WildcardCategory::InstalledSoftware));
        assert_eq!(with.len(), Some(2));

        let without = with.without_wildcard(WildcardCategory::InstalledSoftware);
        assert!(!without.includes(WildcardCategory::InstalledSoftware));
        assert_eq!(without, Selection::keys(["操作系统"]));
    }

    #[test]
    fn test_wildcard_toggle_leaves_unfiltered_alone() {
        let selection = Selection::Unfiltered.without_wildcard(WildcardCategory::InstalledSoftware);
        assert!(selection.is_unfiltered());
    }
}
