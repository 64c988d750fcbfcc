//! flowclass Runtime - Execution engine for compiled classification rules
//!
//! This crate evaluates compiled programs against exporter and interface
//! metadata, routing capability calls into caller-visible outputs.

pub mod engine;
pub mod environment;
pub mod error;
pub mod executor;
pub mod normalize;
pub mod regex_cache;

// Re-export main types
pub use engine::Evaluator;
pub use environment::{Environment, ExporterEnvironment, InterfaceEnvironment};
pub use error::{Result, RuntimeError};
pub use executor::{Executor, ExporterOutcome};
pub use normalize::normalize;
pub use regex_cache::RegexCache;
