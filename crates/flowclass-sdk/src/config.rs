//! Classifier configuration
//!
//! Rules are listed as plain strings in YAML:
//!
//! ```yaml
//! exporter-classifiers:
//!   - 'Exporter.Name startsWith "th2-" && classify("paris")'
//! interface-classifiers:
//!   - 'Interface.Description startsWith "Transit:" && classifyExternal()'
//! ```
//!
//! Every rule is compiled while the document is deserialized, so a
//! configuration containing a broken rule does not load at all.

use crate::error::Result;
use crate::rule::{ExporterClassifierRule, InterfaceClassifierRule};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Ordered exporter and interface rule lists
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ClassifierConfig {
    /// Rules assigning a group to an exporter
    #[serde(default, alias = "exporter_classifiers")]
    pub exporter_classifiers: Vec<ExporterClassifierRule>,

    /// Rules assigning connectivity, provider and boundary to an interface
    #[serde(default, alias = "interface_classifiers")]
    pub interface_classifiers: Vec<InterfaceClassifierRule>,
}

impl ClassifierConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a YAML document
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        tracing::debug!(
            exporter_rules = config.exporter_classifiers.len(),
            interface_rules = config.interface_classifiers.len(),
            "Parsed classifier configuration"
        );
        Ok(config)
    }

    /// Read and parse a YAML file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await?;
        tracing::debug!(path = %path.display(), "Loading classifier configuration");
        Self::from_yaml(&content)
    }

    /// Serialize back to YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Append an exporter rule
    pub fn with_exporter_rule(mut self, rule: ExporterClassifierRule) -> Self {
        self.exporter_classifiers.push(rule);
        self
    }

    /// Append an interface rule
    pub fn with_interface_rule(mut self, rule: InterfaceClassifierRule) -> Self {
        self.interface_classifiers.push(rule);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.exporter_classifiers.is_empty() && self.interface_classifiers.is_empty()
    }
}
