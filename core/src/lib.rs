//! Core types shared by the AIDA64 report harvesting crates.
//!
//! This crate defines the data model that flows between parsing, template
//! selection and export:
//!
//! - [`Record`]: one `{item, value}` pair extracted from a report.
//! - [`ParsedFile`]: the ordered records of one report file.
//! - [`ParsedCollection`]: file name → [`ParsedFile`], in processing order.
//! - [`Template`] / [`TemplateSection`]: named key selections, possibly
//!   including a [`WildcardCategory`].
//! - [`Selection`]: the flattened key filter (or [`Selection::Unfiltered`]).
//!
//! Validation ([`validate_template`]) rejects templates with blank names or
//! repeated keys inside a section.
//!
//! # Example
//!
//! ```
//! use aida_report_core::*;
//!
//! let template = Template::new("硬件", "仅硬件")
//!     .with_section(TemplateSection::explicit("CPU和主板", ["处理器名称", "主板名称"]));
//! assert!(validate_template(&template).is_empty());
//!
//! let selection = template.flatten();
//! assert!(selection.contains("主板名称"));
//! assert!(!selection.contains("操作系统"));
//! ```

mod selection;
mod template;
mod types;
mod validate;

pub use selection::{KeySet, Selection};
pub use template::{Template, TemplateSection, WildcardCategory};
pub use types::{ERROR_ITEM, ParsedCollection, ParsedFile, Record};
pub use validate::{TemplateValidationError, validate_template};
