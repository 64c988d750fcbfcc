//! flowclass Parser - rule text to AST parser
//!
//! This crate turns operator-written rule text into the expression AST
//! defined in `flowclass-core`.

pub mod error;
pub mod expression_parser;
pub mod lexer;

// Re-export main parser types
pub use error::{ParseError, Result};
pub use expression_parser::{ExpressionParser, MAX_DEPTH};
pub use lexer::{Lexer, Token, TokenKind};
