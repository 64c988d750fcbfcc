//! flowclass Core - Core types and definitions for the flow classification engine
//!
//! This crate provides the fundamental types shared by every other crate:
//! - AST (Abstract Syntax Tree) definitions for rule expressions
//! - Runtime values
//! - Exporter/interface metadata and classification outputs
//! - The compiled program handle and the capability names of both schemas
//! - Error types

pub mod ast;
pub mod capability;
pub mod error;
pub mod program;
pub mod types;

// Re-export commonly used types
pub use error::CoreError;
pub use program::{CompiledProgram, SchemaKind};
pub use types::{Boundary, ExporterInfo, InterfaceClassification, InterfaceInfo, Value};
