//! Builder pattern for Classifier

use crate::classifier::{Classifier, RuleSet};
use crate::config::ClassifierConfig;
use crate::error::Result;
use crate::rule::{ExporterClassifierRule, InterfaceClassifierRule};
use flowclass_runtime::{Executor, RegexCache};
use std::path::Path;
use std::sync::Arc;

/// Builder for Classifier
///
/// # Example
///
/// ```rust,ignore
/// use flowclass_sdk::ClassifierBuilder;
///
/// let classifier = ClassifierBuilder::new()
///     .load_config("classifiers.yaml")
///     .await?
///     .add_exporter_rule(r#"classify("default")"#)
///     .build()?;
/// ```
#[derive(Debug, Default)]
pub struct ClassifierBuilder {
    config: ClassifierConfig,
    exporter_sources: Vec<String>,
    interface_sources: Vec<String>,
    regex_cache: Option<Arc<RegexCache>>,
}

impl ClassifierBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an already parsed configuration
    pub fn with_config(mut self, config: ClassifierConfig) -> Self {
        self.config = config;
        self
    }

    /// Start from a YAML document
    pub fn with_yaml(self, content: &str) -> Result<Self> {
        Ok(self.with_config(ClassifierConfig::from_yaml(content)?))
    }

    /// Start from a YAML file
    pub async fn load_config(self, path: impl AsRef<Path>) -> Result<Self> {
        let config = ClassifierConfig::load(path).await?;
        Ok(self.with_config(config))
    }

    /// Append an exporter rule after those of the configuration
    pub fn add_exporter_rule(mut self, source: impl Into<String>) -> Self {
        self.exporter_sources.push(source.into());
        self
    }

    /// Append an interface rule after those of the configuration
    pub fn add_interface_rule(mut self, source: impl Into<String>) -> Self {
        self.interface_sources.push(source.into());
        self
    }

    /// Share a regex cache with other classifiers
    pub fn with_regex_cache(mut self, cache: Arc<RegexCache>) -> Self {
        self.regex_cache = Some(cache);
        self
    }

    /// Compile the added rules and build the classifier
    pub fn build(self) -> Result<Classifier> {
        let mut config = self.config;
        for source in &self.exporter_sources {
            config
                .exporter_classifiers
                .push(ExporterClassifierRule::new(source)?);
        }
        for source in &self.interface_sources {
            config
                .interface_classifiers
                .push(InterfaceClassifierRule::new(source)?);
        }

        let executor = match self.regex_cache {
            Some(cache) => Executor::with_regex_cache(cache),
            None => Executor::new(),
        };

        tracing::debug!(
            exporter_rules = config.exporter_classifiers.len(),
            interface_rules = config.interface_classifiers.len(),
            "Building classifier"
        );
        Ok(Classifier::with_executor(RuleSet::from(config), executor))
    }
}
