//! Parser error types

use thiserror::Error;

/// Parser error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Empty rule text
    #[error("Empty expression")]
    EmptyExpression,

    /// Character that cannot start any token
    #[error("Unexpected character {ch:?} at position {position}")]
    UnexpectedCharacter { ch: char, position: usize },

    /// String literal without closing quote
    #[error("Unterminated string literal starting at position {position}")]
    UnterminatedString { position: usize },

    /// Unknown backslash escape in a quoted string
    #[error("Invalid escape sequence \\{ch} at position {position}")]
    InvalidEscape { ch: char, position: usize },

    /// Malformed number literal
    #[error("Invalid number literal {literal:?} at position {position}")]
    InvalidNumber { literal: String, position: usize },

    /// Token that does not fit the grammar
    #[error("Unexpected {found} at position {position}, expected {expected}")]
    UnexpectedToken {
        found: String,
        expected: String,
        position: usize,
    },

    /// Input ended too early
    #[error("Unexpected end of expression, expected {expected}")]
    UnexpectedEnd { expected: String },

    /// Grammatically valid tokens forming an unsupported construct
    #[error("Invalid expression syntax: {0}")]
    InvalidExpression(String),
}

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;
