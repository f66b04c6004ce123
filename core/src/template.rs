//! Extraction templates.
//!
//! A [`Template`] names the report keys a parse run should keep, grouped into
//! sections. A section either lists keys explicitly or is a wildcard that
//! pulls in a whole extractor category (installed software).
//!
//! The on-disk JSON keeps the historical shapes:
//!
//! ```json
//! { "name": "核心硬件", "items": ["处理器名称", "主板名称"] }
//! { "name": "已安装程序", "include": true, "all_items": true }
//! ```

use serde::{Deserialize, Serialize};

use crate::Selection;

/// Extractor category a wildcard section stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WildcardCategory {
    /// Every entry of the installed-programs listing.
    InstalledSoftware,
}

impl WildcardCategory {
    /// Marker key placed in a [`Selection`] when the category is requested.
    ///
    /// # Examples
    ///
    /// ```
    /// use aida_report_core::WildcardCategory;
    ///
    /// assert_eq!(WildcardCategory::InstalledSoftware.marker(), "已安装程序");
    /// ```
    pub fn marker(self) -> &'static str {
        match self {
            Self::InstalledSoftware => "已安装程序",
        }
    }
}

/// One group of keys inside a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSection", into = "RawSection")]
pub enum TemplateSection {
    /// Explicit list of wanted keys.
    Explicit { name: String, items: Vec<String> },
    /// Whole-category inclusion regardless of explicit keys.
    Wildcard {
        name: String,
        category: WildcardCategory,
    },
}

impl TemplateSection {
    pub fn explicit<I, S>(name: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Explicit {
            name: name.into(),
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    pub fn wildcard(name: impl Into<String>, category: WildcardCategory) -> Self {
        Self::Wildcard {
            name: name.into(),
            category,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Explicit { name, .. } | Self::Wildcard { name, .. } => name,
        }
    }

    /// Keys this section contributes to a flattened selection.
    pub fn keys(&self) -> Vec<&str> {
        match self {
            Self::Explicit { items, .. } => items.iter().map(String::as_str).collect(),
            Self::Wildcard { category, .. } => vec![category.marker()],
        }
    }
}

/// Serialized section shape of template files on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawSection {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    items: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    include: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    all_items: bool,
}

impl TryFrom<RawSection> for TemplateSection {
    type Error = String;

    fn try_from(raw: RawSection) -> Result<Self, Self::Error> {
        if raw.include && raw.all_items {
            return Ok(Self::Wildcard {
                name: raw.name,
                category: WildcardCategory::InstalledSoftware,
            });
        }
        match raw.items {
            Some(items) => Ok(Self::Explicit {
                name: raw.name,
                items,
            }),
            None => Err(format!(
                "section '{}' needs either an items list or include/all_items set",
                raw.name
            )),
        }
    }
}

impl From<TemplateSection> for RawSection {
    fn from(section: TemplateSection) -> Self {
        match section {
            TemplateSection::Explicit { name, items } => Self {
                name,
                items: Some(items),
                include: false,
                all_items: false,
            },
            TemplateSection::Wildcard { name, .. } => Self {
                name,
                items: None,
                include: true,
                all_items: true,
            },
        }
    }
}

/// A named, ordered selection of report keys.
///
/// # Examples
///
/// ```
/// use aida_report_core::{Template, TemplateSection, WildcardCategory};
///
/// let template = Template::new("软件", "只要软件")
///     .with_section(TemplateSection::explicit("系统", ["操作系统"]))
///     .with_section(TemplateSection::wildcard("已安装程序", WildcardCategory::InstalledSoftware));
///
/// let selection = template.flatten();
/// assert!(selection.contains("操作系统"));
/// assert!(selection.includes(WildcardCategory::InstalledSoftware));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// Display name.
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sections: Vec<TemplateSection>,
}

impl Template {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            sections: Vec::new(),
        }
    }

    pub fn with_section(mut self, section: TemplateSection) -> Self {
        self.sections.push(section);
        self
    }

    /// Flattens all sections into a key selection.
    ///
    /// Explicit keys keep their order; a wildcard section contributes its
    /// category marker. Keys repeated across sections appear once.
    pub fn flatten(&self) -> Selection {
        Selection::keys(self.sections.iter().flat_map(TemplateSection::keys))
    }

    /// Number of keys across all sections, counting a wildcard as one.
    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|section| section.keys().len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_section_round_trips_through_flag_shape() {
        let section = TemplateSection::wildcard("已安装程序", WildcardCategory::InstalledSoftware);
        let json = serde_json::to_value(&section).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "已安装程序", "include": true, "all_items": true})
        );
        let back: TemplateSection = serde_json::from_value(json).unwrap();
        assert_eq!(back, section);
    }

    #[test]
    fn test_explicit_section_shape() {
        let section = TemplateSection::explicit("存储", ["硬盘驱动器1", "C: (NTFS)"]);
        let json = serde_json::to_value(&section).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "存储", "items": ["硬盘驱动器1", "C: (NTFS)"]})
        );
    }

    #[test]
    fn test_section_without_items_or_wildcard_is_rejected() {
        let result: Result<TemplateSection, _> =
            serde_json::from_value(serde_json::json!({"name": "空", "include": true}));
        assert!(result.is_err());
    }

    #[test]
    fn test_flatten_dedupes_across_sections_and_appends_marker() {
        let template = Template::new("t", "")
            .with_section(TemplateSection::explicit("a", ["处理器名称", "系统内存"]))
            .with_section(TemplateSection::explicit("b", ["系统内存", "显示适配器"]))
            .with_section(TemplateSection::wildcard(
                "已安装程序",
                WildcardCategory::InstalledSoftware,
            ));
        let selection = template.flatten();
        let keys: Vec<&str> = selection.iter().collect();
        assert_eq!(keys, vec!["处理器名称", "系统内存", "显示适配器", "已安装程序"]);
        assert_eq!(template.item_count(), 5);
    }

    #[test]
    fn test_template_missing_description_defaults() {
        let template: Template =
            serde_json::from_str(r#"{"name":"x","sections":[{"name":"s","items":["k"]}]}"#)
                .unwrap();
        assert_eq!(template.description, "");
        assert_eq!(template.sections.len(), 1);
    }
}
