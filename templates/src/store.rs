//! JSON persistence for user-defined templates.
//!
//! The store is a single JSON object mapping template id to template:
//!
//! ```json
//! {
//!   "office": {
//!     "name": "办公电脑",
//!     "description": "",
//!     "sections": [{ "name": "系统", "items": ["操作系统"] }]
//!   }
//! }
//! ```
//!
//! Entries are kept as raw JSON values so one malformed entry does not hide
//! the others.

use std::fs;
use std::path::{Path, PathBuf};

use aida_report_core::Template;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Result, TemplateError};

/// Default store location, relative to the working directory.
pub const DEFAULT_STORE_PATH: &str = "config/templates.json";

/// Raw store document, in file order.
pub type StoreDocument = Map<String, Value>;

/// Handle to a template store file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateStore {
    path: PathBuf,
}

impl TemplateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the store document.
    ///
    /// A missing file is an empty document.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::IoError`] if the file cannot be read,
    /// [`TemplateError::JsonError`] if it is not JSON, or
    /// [`TemplateError::InvalidStore`] if the top level is not an object.
    pub fn read(&self) -> Result<StoreDocument> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "Template store not found");
            return Ok(StoreDocument::new());
        }
        let text = fs::read_to_string(&self.path)?;
        match serde_json::from_str::<Value>(&text)? {
            Value::Object(document) => Ok(document),
            other => Err(TemplateError::InvalidStore(format!(
                "expected a JSON object, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// Writes the whole document, replacing the file atomically.
    pub fn write(&self, document: &StoreDocument) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(document)?;
        let staging = self.staging_path();
        fs::write(&staging, json)?;
        fs::rename(&staging, &self.path)?;
        Ok(())
    }

    /// Inserts or replaces one template and rewrites the store.
    ///
    /// Other entries, including ones the catalog rejected, are kept as they
    /// are. An existing store that cannot be parsed is left untouched.
    pub fn save(&self, id: &str, template: &Template) -> Result<()> {
        let mut document = self.read()?;
        document.insert(id.to_string(), serde_json::to_value(template)?);
        self.write(&document)?;
        debug!(id, path = %self.path.display(), "Saved template");
        Ok(())
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Default for TemplateStore {
    fn default() -> Self {
        Self::new(DEFAULT_STORE_PATH)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
