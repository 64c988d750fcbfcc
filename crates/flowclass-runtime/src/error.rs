//! Runtime error types

use flowclass_core::{CoreError, SchemaKind};
use thiserror::Error;

/// Runtime error
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Capability not provided by the environment
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// A pattern computed at run time did not compile
    #[error("cannot compile regex {pattern:?}: {error}")]
    InvalidRegex {
        pattern: String,
        #[source]
        error: regex::Error,
    },

    /// Program executed against the environment of the other schema
    #[error("{program} program cannot run in {environment} environment")]
    SchemaMismatch {
        program: SchemaKind,
        environment: SchemaKind,
    },

    /// Value access error
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Any of the above, tagged with the offending rule text
    #[error("unable to execute classifier {rule:?}: {error}")]
    Rule {
        rule: String,
        #[source]
        error: Box<RuntimeError>,
    },
}

impl RuntimeError {
    /// The underlying error, without the rule wrapper
    pub fn root(&self) -> &RuntimeError {
        match self {
            RuntimeError::Rule { error, .. } => error.root(),
            other => other,
        }
    }

    /// Rule text of a wrapped error
    pub fn rule(&self) -> Option<&str> {
        match self {
            RuntimeError::Rule { rule, .. } => Some(rule),
            _ => None,
        }
    }
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;
