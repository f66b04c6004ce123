//! Template validation.
//!
//! Catches structural problems in templates (blank names, blank keys,
//! repeated keys inside one section) before they reach the catalog.
//!
//! # Examples
//!
//! ```
//! use aida_report_core::*;
//!
//! let good = Template::new("精简", "")
//!     .with_section(TemplateSection::explicit("核心硬件", ["处理器名称", "主板名称"]));
//! assert!(validate_template(&good).is_empty());
//!
//! let bad = Template::new("精简", "")
//!     .with_section(TemplateSection::explicit("核心硬件", ["处理器名称", "处理器名称"]));
//! assert!(!validate_template(&bad).is_empty());
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::{Template, TemplateSection};

/// Template validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateValidationError {
    /// Template display name is empty or whitespace-only.
    #[error("template name cannot be empty")]
    EmptyTemplateName,
    /// A section name is empty or whitespace-only.
    #[error("section name cannot be empty")]
    EmptySectionName,
    /// A section lists an empty or whitespace-only key.
    #[error("blank item in section: {0}")]
    BlankItem(String),
    /// A key appears twice in the same section.
    #[error("duplicate item '{item}' in section: {section}")]
    DuplicateItem { section: String, item: String },
}

/// Validates a template, returning every problem found.
///
/// Keys repeated across different sections are allowed.
pub fn validate_template(template: &Template) -> Vec<TemplateValidationError> {
    let mut errors = Vec::new();

    if template.name.trim().is_empty() {
        errors.push(TemplateValidationError::EmptyTemplateName);
    }

    for section in &template.sections {
        if section.name().trim().is_empty() {
            errors.push(TemplateValidationError::EmptySectionName);
        }

        let TemplateSection::Explicit { name, items } = section else {
            continue;
        };

        let mut seen: HashSet<&str> = HashSet::new();
        for item in items {
            if item.trim().is_empty() {
                errors.push(TemplateValidationError::BlankItem(name.clone()));
                continue;
            }
            if !seen.insert(item.as_str()) {
                errors.push(TemplateValidationError::DuplicateItem {
                    section: name.clone(),
                    item: item.clone(),
                });
            }
        }
    }

    errors
}
