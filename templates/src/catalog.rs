//! Template catalog: built-ins layered with the custom store.
//!
//! # Loading patterns
//!
//! ```no_run
//! use aida_report_templates::{TemplateCatalog, TemplateStore};
//!
//! // Built-ins only
//! let catalog = TemplateCatalog::builtin();
//! assert_eq!(catalog.list_templates().len(), 4);
//!
//! // Built-ins plus config/templates.json
//! let catalog = TemplateCatalog::load(TemplateStore::default());
//! let selection = catalog.selection("minimal");
//! ```
//!
//! Loading never fails. A store that cannot be read is ignored as a whole;
//! individual entries that are not valid templates are dropped and listed in
//! [`TemplateCatalog::rejected`].

use std::fmt;

use aida_report_core::{Selection, Template, validate_template};
use serde_json::Value;
use tracing::{debug, warn};

use crate::builtin::{STANDARD, builtin_templates};
use crate::error::{Result, TemplateError};
use crate::store::{StoreDocument, TemplateStore};

/// A custom store entry that was not loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedTemplate {
    pub id: String,
    pub reason: String,
}

impl fmt::Display for RejectedTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.reason)
    }
}

/// Named templates in catalog order.
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    templates: Vec<(String, Template)>,
    store: Option<TemplateStore>,
    rejected: Vec<RejectedTemplate>,
}

impl TemplateCatalog {
    /// The four built-in templates, without a backing store.
    pub fn builtin() -> Self {
        Self {
            templates: builtin_templates()
                .into_iter()
                .map(|(id, template)| (id.to_string(), template))
                .collect(),
            store: None,
            rejected: Vec::new(),
        }
    }

    /// Built-ins layered with the entries of `store`.
    ///
    /// Custom entries with a built-in id replace it in place; new ids are
    /// appended in document order.
    pub fn load(store: TemplateStore) -> Self {
        let mut catalog = Self::builtin();
        match store.read() {
            Ok(document) => catalog.apply_document(document),
            Err(err) => warn!(
                path = %store.path().display(),
                error = %err,
                "Ignoring unreadable template store"
            ),
        }
        catalog.store = Some(store);
        catalog
    }

    fn apply_document(&mut self, document: StoreDocument) {
        for (id, value) in document {
            match parse_entry(value) {
                Ok(template) => {
                    debug!(id = %id, "Loaded custom template");
                    self.upsert(id, template);
                }
                Err(reason) => {
                    warn!(id = %id, reason = %reason, "Dropping invalid custom template");
                    self.rejected.push(RejectedTemplate { id, reason });
                }
            }
        }
    }

    fn upsert(&mut self, id: String, template: Template) {
        match self.templates.iter_mut().find(|(existing, _)| *existing == id) {
            Some(entry) => entry.1 = template,
            None => self.templates.push((id, template)),
        }
    }

    /// Template ids in catalog order.
    pub fn list_templates(&self) -> Vec<&str> {
        self.templates.iter().map(|(id, _)| id.as_str()).collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    fn find(&self, id: &str) -> Option<&Template> {
        self.templates
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, template)| template)
    }

    /// Looks up a template, falling back to `standard` for unknown ids.
    pub fn get_template(&self, id: &str) -> &Template {
        if let Some(template) = self.find(id) {
            return template;
        }
        debug!(id, "Unknown template, using standard");
        match self.find(STANDARD) {
            Some(template) => template,
            // `standard` is a built-in and overrides replace it in place.
            None => &self.templates[0].1,
        }
    }

    /// Flattened key selection for a template id.
    pub fn selection(&self, id: &str) -> Selection {
        self.get_template(id).flatten()
    }

    /// Custom entries dropped while loading.
    pub fn rejected(&self) -> &[RejectedTemplate] {
        &self.rejected
    }

    pub fn store(&self) -> Option<&TemplateStore> {
        self.store.as_ref()
    }

    /// Validates, persists and registers a custom template.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::InvalidTemplate`] if validation fails, or the
    /// store's error if it cannot be written.
    pub fn save_custom(&mut self, id: &str, template: Template) -> Result<()> {
        if id.trim().is_empty() {
            return Err(TemplateError::InvalidTemplate(
                "template id cannot be empty".to_string(),
            ));
        }
        let errors = validate_template(&template);
        if !errors.is_empty() {
            return Err(TemplateError::InvalidTemplate(join_errors(&errors)));
        }

        if let Some(store) = &self.store {
            store.save(id, &template)?;
        }
        self.rejected.retain(|rejected| rejected.id != id);
        self.upsert(id.to_string(), template);
        Ok(())
    }
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn parse_entry(value: Value) -> std::result::Result<Template, String> {
    let template: Template = serde_json::from_value(value).map_err(|err| err.to_string())?;
    let errors = validate_template(&template);
    if errors.is_empty() {
        Ok(template)
    } else {
        Err(join_errors(&errors))
    }
}

fn join_errors(errors: &[impl ToString]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use aida_report_core::{TemplateSection, WildcardCategory};

    #[test]
    fn test_builtin_listing_and_fallback() {
        let catalog = TemplateCatalog::builtin();
        assert_eq!(
            catalog.list_templates(),
            vec!["standard", "minimal", "hardware_only", "software_only"]
        );
        assert_eq!(catalog.get_template("nope").name, "标准模板");
        assert_eq!(catalog.get_template("minimal").name, "精简模板");
    }

    #[test]
    fn test_software_only_selection() {
        let selection = TemplateCatalog::builtin().selection("software_only");
        assert_eq!(
            selection.iter().collect::<Vec<_>>(),
            vec!["操作系统", "计算机名称", "用户名称", "已安装程序"]
        );
        assert!(selection.includes(WildcardCategory::InstalledSoftware));
    }

    #[test]
    fn test_in_memory_save_custom() {
        let mut catalog = TemplateCatalog::builtin();
        let template = Template::new("办公", "")
            .with_section(TemplateSection::explicit("系统", ["操作系统"]));
        catalog.save_custom("office", template).unwrap();
        assert_eq!(catalog.list_templates().last(), Some(&"office"));
        assert_eq!(catalog.get_template("office").name, "办公");
    }

    #[test]
    fn test_save_custom_rejects_invalid() {
        let mut catalog = TemplateCatalog::builtin();
        let blank = Template::new(" ", "");
        assert!(matches!(
            catalog.save_custom("blank", blank),
            Err(TemplateError::InvalidTemplate(_))
        ));
        let good = Template::new("ok", "");
        assert!(catalog.save_custom("", good).is_err());
        assert!(!catalog.contains("blank"));
    }
}
