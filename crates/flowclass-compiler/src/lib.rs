//! flowclass Compiler - rule validation
//!
//! This crate binds parsed rules to the exporter or interface schema,
//! rejecting unknown symbols, type errors, non-bool rules and invalid
//! literal regular expressions before anything is executed.

pub mod compiler;
pub mod error;
pub mod schema;
pub mod semantic;

// Re-export main types
pub use compiler::Compiler;
pub use error::{CompileError, Result};
pub use schema::{FunctionSignature, Schema};

// Re-export semantic types
pub use semantic::{RegexValidator, TypeChecker, TypeInfo, Visitor};
