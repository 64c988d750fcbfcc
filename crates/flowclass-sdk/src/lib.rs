//! flowclass SDK
//!
//! High-level API for classifying exporters and interfaces: rule objects,
//! YAML configuration, and a reloadable classifier running first-match-wins
//! passes.

pub mod builder;
pub mod classifier;
pub mod config;
pub mod error;
pub mod rule;

// Re-export main types
pub use builder::ClassifierBuilder;
pub use classifier::{Classifier, ClassifierStats, RuleSet};
pub use config::ClassifierConfig;
pub use error::{Result, SdkError};
pub use rule::{ExporterClassifierRule, InterfaceClassifierRule};

// Re-export commonly used types from dependencies
pub use flowclass_core::{Boundary, ExporterInfo, InterfaceClassification, InterfaceInfo};
pub use flowclass_runtime::{normalize, RegexCache};
