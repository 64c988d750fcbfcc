//! Compiler error types

use flowclass_parser::ParseError;
use thiserror::Error;

/// Compiler error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    /// Rule text could not be parsed
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Unknown variable, field or function
    #[error("Undefined symbol: {0}")]
    UndefinedSymbol(String),

    /// Function called with the wrong number of arguments
    #[error("Wrong number of arguments for {name}: expected {expected}, got {actual}")]
    ArityMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// Type error
    #[error("Type error: {0}")]
    TypeError(String),

    /// Literal regular expressions that failed to compile, all of them at once
    #[error("invalid regular expression {}", format_patterns(.0))]
    InvalidRegex(Vec<String>),

    /// Any of the above, tagged with the offending rule text
    #[error("cannot compile {schema} classifier rule {rule:?}: {error}")]
    Rule {
        rule: String,
        schema: flowclass_core::SchemaKind,
        error: Box<CompileError>,
    },
}

impl CompileError {
    /// Every invalid literal pattern reported by this error, if any
    pub fn invalid_patterns(&self) -> &[String] {
        match self {
            CompileError::InvalidRegex(patterns) => patterns,
            CompileError::Rule { error, .. } => error.invalid_patterns(),
            _ => &[],
        }
    }

    /// The underlying error, without the rule wrapper
    pub fn root(&self) -> &CompileError {
        match self {
            CompileError::Rule { error, .. } => error.root(),
            other => other,
        }
    }
}

fn format_patterns(patterns: &[String]) -> String {
    patterns
        .iter()
        .map(|p| format!("{:?}", p))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for compiler operations
pub type Result<T> = std::result::Result<T, CompileError>;
