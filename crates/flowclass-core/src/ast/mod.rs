//! Abstract Syntax Tree (AST) definitions for classification rules
//!
//! A rule is a single boolean expression. Capability calls such as
//! `classify("core")` are ordinary function calls inside that expression.

pub mod expression;
pub mod operator;

pub use expression::{Expression, UnaryOperator};
pub use operator::Operator;
