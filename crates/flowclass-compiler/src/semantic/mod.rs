//! Semantic analysis module
//!
//! Type checking against a schema and validation of literal regular
//! expressions, both run before a rule is accepted.

pub mod regex_validator;
pub mod type_checker;

// Re-export for convenience
pub use regex_validator::{walk, RegexValidator, Visitor};
pub use type_checker::{TypeChecker, TypeInfo};
