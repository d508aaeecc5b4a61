//! Template loading and management for KAPREKAR-OUT.
//!
//! Templates live in a YAML file with named Handlebars entries. The
//! built-in set (`templates/report.yaml`) ships inside the crate; a file on
//! disk with the same names can replace it.

use serde::Deserialize;
use std::collections::HashMap;

/// Built-in report templates
const BUILTIN_TEMPLATES: &str = include_str!("../templates/report.yaml");

/// Template names a report needs
pub const REPORT_TEMPLATES: [&str; 4] = ["banner", "header", "row", "summary"];

/// Top-level templates file structure
#[derive(Debug, Clone, Deserialize)]
pub struct TemplatesFile {
    pub version: String,
    pub templates: HashMap<String, Template>,
}

/// A single template definition
#[derive(Debug, Clone, Deserialize)]
pub struct Template {
    pub description: String,
    pub template: String,
}

impl TemplatesFile {
    /// Load templates from a YAML file
    pub fn load(path: &str) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read templates file {}: {}", path, e))?;
        Self::from_yaml(&content)
    }

    /// Parse templates from YAML content
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        serde_yaml::from_str(yaml).map_err(|e| format!("Failed to parse templates YAML: {}", e))
    }

    /// The templates compiled into the crate
    pub fn builtin() -> Result<Self, String> {
        Self::from_yaml(BUILTIN_TEMPLATES)
    }

    /// Get a template by name
    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    /// Names from [`REPORT_TEMPLATES`] this file lacks
    pub fn missing_report_templates(&self) -> Vec<&'static str> {
        REPORT_TEMPLATES
            .iter()
            .copied()
            .filter(|name| !self.templates.contains_key(*name))
            .collect()
    }
}
