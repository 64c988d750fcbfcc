//! Main compiler
//!
//! Turns rule text into a `CompiledProgram` bound to one schema:
//! parse, validate literal patterns, type check, then require a bool result.

use crate::error::{CompileError, Result};
use crate::schema::Schema;
use crate::semantic::{RegexValidator, TypeChecker, TypeInfo};
use flowclass_core::{CompiledProgram, SchemaKind};
use flowclass_parser::ExpressionParser;

/// The rule compiler
///
/// Holds one type checker per schema. It is immutable once built, so a
/// single instance can be shared between threads.
#[derive(Debug, Clone)]
pub struct Compiler {
    exporter: TypeChecker,
    interface: TypeChecker,
}

impl Compiler {
    /// Create a new compiler instance
    pub fn new() -> Self {
        Self {
            exporter: TypeChecker::from_schema(&Schema::exporter()),
            interface: TypeChecker::from_schema(&Schema::interface()),
        }
    }

    /// Compile a rule for the exporter schema
    pub fn compile_exporter_rule(&self, source: &str) -> Result<CompiledProgram> {
        self.compile(source, SchemaKind::Exporter)
    }

    /// Compile a rule for the interface schema
    pub fn compile_interface_rule(&self, source: &str) -> Result<CompiledProgram> {
        self.compile(source, SchemaKind::Interface)
    }

    /// Compile `source` against the schema of `kind`.
    ///
    /// Any failure is wrapped in `CompileError::Rule` carrying the rule text.
    pub fn compile(&self, source: &str, kind: SchemaKind) -> Result<CompiledProgram> {
        self.compile_inner(source, kind).map_err(|error| {
            tracing::debug!(schema = %kind, rule = source, error = %error, "Rule rejected");
            CompileError::Rule {
                rule: source.to_string(),
                schema: kind,
                error: Box::new(error),
            }
        })
    }

    fn compile_inner(&self, source: &str, kind: SchemaKind) -> Result<CompiledProgram> {
        let expression = ExpressionParser::parse(source)?;

        // Patterns are validated on the raw tree, before symbols are resolved
        let invalid = RegexValidator::validate(&expression);
        if !invalid.is_empty() {
            return Err(CompileError::InvalidRegex(invalid));
        }

        let result = self.checker(kind).check_expression(&expression)?;
        if result != TypeInfo::Boolean {
            return Err(CompileError::TypeError(format!(
                "rule must evaluate to bool, got {}",
                result
            )));
        }

        tracing::debug!(schema = %kind, rule = source, "Compiled classifier rule");
        Ok(CompiledProgram::new(source, kind, expression))
    }

    fn checker(&self, kind: SchemaKind) -> &TypeChecker {
        match kind {
            SchemaKind::Exporter => &self.exporter,
            SchemaKind::Interface => &self.interface,
        }
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}
