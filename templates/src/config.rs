//! Application configuration.
//!
//! Defines the YAML-serializable settings shared by the command-line front
//! end: where templates live, which template and export formats to use by
//! default, and batch parallelism. Every field is optional in the file.
//!
//! # Example YAML
//!
//! ```yaml
//! template_store: config/templates.json
//! default_template: hardware_only
//! formats:
//!   - excel
//!   - json
//! output_dir: exports
//! name_prefix: aida64_report
//! include_software: true
//! jobs: 4
//! ```

use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::builtin::STANDARD;
use crate::error::{Result, TemplateError};
use crate::store::DEFAULT_STORE_PATH;

/// Export formats a config file may name.
pub const KNOWN_FORMATS: [&str; 4] = ["excel", "xlsx", "csv", "json"];

/// Front-end settings loaded from YAML.
///
/// # Examples
///
/// ```
/// use aida_report_templates::AppConfig;
///
/// let config: AppConfig = serde_yaml::from_str("default_template: minimal\n").unwrap();
/// assert_eq!(config.default_template, "minimal");
/// assert_eq!(config.formats, vec!["excel"]);
/// assert!(config.include_software);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Custom template store (JSON).
    pub template_store: PathBuf,
    /// Template id used when none is given.
    pub default_template: String,
    /// Export formats written by default.
    pub formats: Vec<String>,
    /// Directory receiving exported files.
    pub output_dir: PathBuf,
    /// Base name prefix; a timestamp is appended.
    pub name_prefix: String,
    /// Whether the installed programs listing is extracted when the template
    /// asks for it.
    pub include_software: bool,
    /// Worker threads for batch parsing (`None` = automatic).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jobs: Option<usize>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            template_store: PathBuf::from(DEFAULT_STORE_PATH),
            default_template: STANDARD.to_string(),
            formats: vec!["excel".to_string()],
            output_dir: PathBuf::from("."),
            name_prefix: "aida64_report".to_string(),
            include_software: true,
            jobs: None,
        }
    }
}

impl AppConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](TemplateError::IoError) if the file cannot be read,
    /// [`YamlError`](TemplateError::YamlError) if parsing fails, or
    /// [`InvalidConfig`](TemplateError::InvalidConfig) if a format name
    /// is unknown.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config: Self = serde_yaml::from_reader(reader)?;
        config.check_formats()?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    fn check_formats(&self) -> Result<()> {
        match self
            .formats
            .iter()
            .find(|format| !KNOWN_FORMATS.contains(&format.to_ascii_lowercase().as_str()))
        {
            Some(unknown) => Err(TemplateError::InvalidConfig(format!(
                "unknown export format '{unknown}' in config (expected one of: {})",
                KNOWN_FORMATS.join(", ")
            ))),
            None => Ok(()),
        }
    }
}
