//! Extraction templates and application settings.
//!
//! This crate owns the [`TemplateCatalog`]: four built-in templates
//! (`standard`, `minimal`, `hardware_only`, `software_only`) layered with
//! user templates persisted in a JSON [`TemplateStore`]. It also loads the
//! YAML [`AppConfig`] used by the command-line front end.
//!
//! # Quick start
//!
//! ```no_run
//! use aida_report_core::{Template, TemplateSection};
//! use aida_report_templates::{TemplateCatalog, TemplateStore};
//!
//! let mut catalog = TemplateCatalog::load(TemplateStore::new("config/templates.json"));
//! for rejected in catalog.rejected() {
//!     eprintln!("skipped template {rejected}");
//! }
//!
//! // Unknown ids fall back to the standard template.
//! let selection = catalog.selection("hardware_only");
//!
//! let office = Template::new("办公电脑", "日常办公机")
//!     .with_section(TemplateSection::explicit("系统", ["操作系统", "计算机名称"]));
//! catalog.save_custom("office", office).unwrap();
//! ```

mod builtin;
mod catalog;
mod config;
mod error;
mod store;

pub use builtin::{HARDWARE_ONLY, MINIMAL, SOFTWARE_ONLY, STANDARD, builtin_templates};
pub use catalog::{RejectedTemplate, TemplateCatalog};
pub use config::{AppConfig, KNOWN_FORMATS};
pub use error::{Result, TemplateError};
pub use store::{DEFAULT_STORE_PATH, StoreDocument, TemplateStore};
