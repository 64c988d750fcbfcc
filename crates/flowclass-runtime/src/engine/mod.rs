//! Execution engine module
//!
//! Tree-walking evaluation of rule expressions.

mod evaluator;
mod operators;

// Re-export for convenience
pub use evaluator::Evaluator;
