//! Rule-set orchestration
//!
//! A `Classifier` runs ordered rule lists against exporters and interfaces.
//! The first rule that fires ends the pass. The active `RuleSet` is replaced
//! as a whole with one atomic swap, so concurrent passes see either the old
//! or the new rules, never a mix.

use crate::config::ClassifierConfig;
use crate::rule::{ExporterClassifierRule, InterfaceClassifierRule};
use arc_swap::ArcSwap;
use flowclass_core::{ExporterInfo, InterfaceClassification, InterfaceInfo};
use flowclass_runtime::{Executor, RegexCache};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Immutable snapshot of both rule lists
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    exporter: Vec<ExporterClassifierRule>,
    interface: Vec<InterfaceClassifierRule>,
}

impl RuleSet {
    pub fn new(
        exporter: Vec<ExporterClassifierRule>,
        interface: Vec<InterfaceClassifierRule>,
    ) -> Self {
        Self {
            exporter,
            interface,
        }
    }

    pub fn exporter_rules(&self) -> &[ExporterClassifierRule] {
        &self.exporter
    }

    pub fn interface_rules(&self) -> &[InterfaceClassifierRule] {
        &self.interface
    }

    pub fn is_empty(&self) -> bool {
        self.exporter.is_empty() && self.interface.is_empty()
    }
}

impl From<ClassifierConfig> for RuleSet {
    fn from(config: ClassifierConfig) -> Self {
        Self::new(config.exporter_classifiers, config.interface_classifiers)
    }
}

/// Counters of rules that failed at run time
#[derive(Debug, Default)]
pub struct ClassifierStats {
    exporter_errors: AtomicU64,
    interface_errors: AtomicU64,
}

impl ClassifierStats {
    pub fn exporter_errors(&self) -> u64 {
        self.exporter_errors.load(Ordering::Relaxed)
    }

    pub fn interface_errors(&self) -> u64 {
        self.interface_errors.load(Ordering::Relaxed)
    }
}

/// Classifies exporters and interfaces with the active rule set
#[derive(Debug)]
pub struct Classifier {
    rules: ArcSwap<RuleSet>,
    executor: Executor,
    stats: ClassifierStats,
}

impl Classifier {
    /// Create a classifier with its own regex cache
    pub fn new(rules: RuleSet) -> Self {
        Self::with_executor(rules, Executor::new())
    }

    /// Create a classifier running rules through `executor`
    pub fn with_executor(rules: RuleSet, executor: Executor) -> Self {
        Self {
            rules: ArcSwap::from_pointee(rules),
            executor,
            stats: ClassifierStats::default(),
        }
    }

    /// Snapshot of the active rules
    pub fn rules(&self) -> Arc<RuleSet> {
        self.rules.load_full()
    }

    /// Replace the active rules. Passes already running finish on the old set.
    pub fn reload(&self, rules: RuleSet) {
        tracing::info!(
            exporter_rules = rules.exporter_rules().len(),
            interface_rules = rules.interface_rules().len(),
            "Reloading classifier rules"
        );
        self.rules.store(Arc::new(rules));
    }

    pub fn reload_config(&self, config: ClassifierConfig) {
        self.reload(RuleSet::from(config));
    }

    pub fn stats(&self) -> &ClassifierStats {
        &self.stats
    }

    pub fn regex_cache(&self) -> &Arc<RegexCache> {
        self.executor.regex_cache()
    }

    /// Group of `exporter`, from the first exporter rule that fires.
    ///
    /// A failing rule ends the pass with no group.
    pub fn classify_exporter(&self, exporter: &ExporterInfo) -> Option<String> {
        let rules = self.rules.load();
        for (index, rule) in rules.exporter_rules().iter().enumerate() {
            match self.executor.execute_exporter(rule.program(), exporter) {
                Ok(outcome) if outcome.fired => {
                    tracing::trace!(rule_index = index, group = ?outcome.group, "Exporter classified");
                    return outcome.group;
                }
                Ok(_) => {}
                Err(error) => {
                    self.stats.exporter_errors.fetch_add(1, Ordering::Relaxed);
                    tracing::warn!(
                        rule_index = index,
                        exporter = %exporter.name,
                        error = %error,
                        "Exporter classifier failed"
                    );
                    return None;
                }
            }
        }
        None
    }

    /// Classification of `interface`, from the first interface rule that fires.
    ///
    /// Rules that do not fire may still have assigned fields, and those stay.
    /// A failing rule ends the pass, keeping what was assigned so far.
    pub fn classify_interface(
        &self,
        exporter: &ExporterInfo,
        interface: &InterfaceInfo,
    ) -> InterfaceClassification {
        let rules = self.rules.load();
        let mut classification = InterfaceClassification::new();

        for (index, rule) in rules.interface_rules().iter().enumerate() {
            match self.executor.execute_interface(
                rule.program(),
                exporter,
                interface,
                &mut classification,
            ) {
                Ok(true) => {
                    tracing::trace!(
                        rule_index = index,
                        complete = classification.is_complete(),
                        ?classification,
                        "Interface classified"
                    );
                    break;
                }
                Ok(false) => {}
                Err(error) => {
                    self.stats.interface_errors.fetch_add(1, Ordering::Relaxed);
                    tracing::warn!(
                        rule_index = index,
                        exporter = %exporter.name,
                        interface = %interface.name,
                        error = %error,
                        "Interface classifier failed"
                    );
                    break;
                }
            }
        }
        classification
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exporter_rules(sources: &[&str]) -> Vec<ExporterClassifierRule> {
        sources
            .iter()
            .map(|s| ExporterClassifierRule::new(s).unwrap())
            .collect()
    }

    fn interface_rules(sources: &[&str]) -> Vec<InterfaceClassifierRule> {
        sources
            .iter()
            .map(|s| InterfaceClassifierRule::new(s).unwrap())
            .collect()
    }

    #[test]
    fn test_first_firing_exporter_rule_wins() {
        let classifier = Classifier::new(RuleSet::new(
            exporter_rules(&[
                r#"Exporter.Name startsWith "th2-" && classify("paris")"#,
                r#"Exporter.Name startsWith "nyc-" && classify("newyork")"#,
                r#"classify("other")"#,
            ]),
            vec![],
        ));

        let group = classifier.classify_exporter(&ExporterInfo::new("192.0.2.1", "nyc-edge1"));
        assert_eq!(group.as_deref(), Some("newyork"));

        let group = classifier.classify_exporter(&ExporterInfo::new("192.0.2.1", "lon-edge1"));
        assert_eq!(group.as_deref(), Some("other"));
    }

    #[test]
    fn test_no_rule_fires() {
        let classifier = Classifier::new(RuleSet::new(
            exporter_rules(&[r#"Exporter.IP == "10.0.0.1" && classify("lab")"#]),
            vec![],
        ));
        assert_eq!(
            classifier.classify_exporter(&ExporterInfo::new("192.0.2.1", "edge1")),
            None
        );
    }

    #[test]
    fn test_interface_pass_stops_at_first_firing_rule() {
        let classifier = Classifier::new(RuleSet::new(
            vec![],
            interface_rules(&[
                r#"classifyProvider("early") && false"#,
                r#"classifyConnectivity("transit") && classifyExternal()"#,
                r#"classifyConnectivity("never") && classifyInternal()"#,
            ]),
        ));

        let classification = classifier.classify_interface(
            &ExporterInfo::new("192.0.2.1", "edge1"),
            &InterfaceInfo::new("et-0/0/0", "", 10000),
        );
        assert_eq!(classification.provider, "early");
        assert_eq!(classification.connectivity, "transit");
        assert_eq!(classification.boundary, flowclass_core::Boundary::External);
    }

    #[test]
    fn test_runtime_error_stops_pass_and_counts() {
        let classifier = Classifier::new(RuleSet::new(
            exporter_rules(&[
                r#"classifyRegex(Exporter.Name, Exporter.IP, "$1")"#,
                r#"classify("unreachable")"#,
            ]),
            interface_rules(&[
                r#"classifyInternal() && classifyProviderRegex(Interface.Name, Interface.Description, "$1")"#,
                r#"classifyProvider("unreachable")"#,
            ]),
        ));
        let exporter = ExporterInfo::new("(", "edge1");

        assert_eq!(classifier.classify_exporter(&exporter), None);
        assert_eq!(classifier.stats().exporter_errors(), 1);

        let classification =
            classifier.classify_interface(&exporter, &InterfaceInfo::new("et0", "[", 10));
        assert_eq!(classification.boundary, flowclass_core::Boundary::Internal);
        assert!(classification.provider.is_empty());
        assert_eq!(classifier.stats().interface_errors(), 1);
    }

    #[test]
    fn test_reload_swaps_rules() {
        let classifier = Classifier::new(RuleSet::new(
            exporter_rules(&[r#"classify("before")"#]),
            vec![],
        ));
        let snapshot = classifier.rules();

        classifier.reload(RuleSet::new(exporter_rules(&[r#"classify("after")"#]), vec![]));

        let exporter = ExporterInfo::default();
        assert_eq!(classifier.classify_exporter(&exporter).as_deref(), Some("after"));
        // earlier snapshots are untouched
        assert_eq!(snapshot.exporter_rules()[0].source(), r#"classify("before")"#);
    }

    #[test]
    fn test_empty_rule_set() {
        let classifier = Classifier::new(RuleSet::default());
        assert!(classifier.rules().is_empty());
        assert!(classifier
            .classify_interface(&ExporterInfo::default(), &InterfaceInfo::default())
            .is_empty());
    }
}
