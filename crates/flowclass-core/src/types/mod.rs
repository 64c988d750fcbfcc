//! Type system for flowclass
//!
//! This module contains:
//! - Runtime value types
//! - Exporter and interface metadata
//! - Interface classification output

pub mod classification;
pub mod value;

pub use classification::{Boundary, ExporterInfo, InterfaceClassification, InterfaceInfo};
pub use value::Value;
