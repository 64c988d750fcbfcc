//! Compiled program definition
//!
//! A `CompiledProgram` is the immutable, executable form of one rule. It is
//! produced once by the compiler and then shared read-only between any number
//! of concurrent executions.

use crate::ast::Expression;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Which environment a program was type-checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    /// `Exporter` plus `classify` / `classifyRegex`
    Exporter,
    /// `Exporter`, `Interface` plus the connectivity/provider/boundary capabilities
    Interface,
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaKind::Exporter => f.write_str("exporter"),
            SchemaKind::Interface => f.write_str("interface"),
        }
    }
}

/// Compiled rule program
#[derive(Debug, Clone)]
pub struct CompiledProgram {
    source: Arc<str>,
    schema: SchemaKind,
    expression: Arc<Expression>,
}

impl CompiledProgram {
    /// Create a program from an already validated expression.
    ///
    /// Callers are expected to go through the compiler, which guarantees the
    /// expression type-checks to bool against `schema`.
    pub fn new(source: impl Into<Arc<str>>, schema: SchemaKind, expression: Expression) -> Self {
        Self {
            source: source.into(),
            schema,
            expression: Arc::new(expression),
        }
    }

    /// Original rule text
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn schema(&self) -> SchemaKind {
        self.schema
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }
}

impl fmt::Display for CompiledProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
