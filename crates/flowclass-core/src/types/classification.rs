//! Exporter/interface metadata and classification outputs

use crate::error::{CoreError, Result};
use crate::types::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A device emitting flow records
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExporterInfo {
    pub ip: String,
    pub name: String,
}

impl ExporterInfo {
    pub fn new(ip: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            name: name.into(),
        }
    }

    /// Resolve a field as exposed to rules (`Exporter.IP`, `Exporter.Name`)
    pub fn field(&self, name: &str) -> Result<Value> {
        match name {
            "IP" => Ok(Value::String(self.ip.clone())),
            "Name" => Ok(Value::String(self.name.clone())),
            other => Err(CoreError::FieldNotFound(format!("Exporter.{}", other))),
        }
    }
}

/// One interface of an exporter
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InterfaceInfo {
    pub name: String,
    pub description: String,
    /// Speed in Mbps
    pub speed: u32,
}

impl InterfaceInfo {
    pub fn new(name: impl Into<String>, description: impl Into<String>, speed: u32) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            speed,
        }
    }

    /// Resolve a field as exposed to rules (`Interface.Name`, `Interface.Description`, `Interface.Speed`)
    pub fn field(&self, name: &str) -> Result<Value> {
        match name {
            "Name" => Ok(Value::String(self.name.clone())),
            "Description" => Ok(Value::String(self.description.clone())),
            "Speed" => Ok(Value::from(self.speed)),
            other => Err(CoreError::FieldNotFound(format!("Interface.{}", other))),
        }
    }
}

/// Whether an interface faces outside or inside the operator's network
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Boundary {
    #[default]
    Undefined,
    External,
    Internal,
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Boundary::Undefined => f.write_str("undefined"),
            Boundary::External => f.write_str("external"),
            Boundary::Internal => f.write_str("internal"),
        }
    }
}

/// Output of an interface classification pass.
///
/// Every field is set-once: the first non-default assignment sticks and later
/// assignments within the same pass are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceClassification {
    pub connectivity: String,
    pub provider: String,
    pub boundary: Boundary,
}

impl InterfaceClassification {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set connectivity unless already set. Returns whether the value was stored.
    pub fn set_connectivity(&mut self, connectivity: String) -> bool {
        if self.connectivity.is_empty() {
            self.connectivity = connectivity;
            return true;
        }
        false
    }

    /// Set provider unless already set. Returns whether the value was stored.
    pub fn set_provider(&mut self, provider: String) -> bool {
        if self.provider.is_empty() {
            self.provider = provider;
            return true;
        }
        false
    }

    /// Set the boundary unless it is no longer `Undefined`, whichever marker
    /// came first. Returns whether the value was stored.
    pub fn set_boundary(&mut self, boundary: Boundary) -> bool {
        if self.boundary == Boundary::Undefined {
            self.boundary = boundary;
            return true;
        }
        false
    }

    pub fn is_empty(&self) -> bool {
        self.connectivity.is_empty()
            && self.provider.is_empty()
            && self.boundary == Boundary::Undefined
    }

    /// True once connectivity, provider and boundary have all been assigned
    pub fn is_complete(&self) -> bool {
        !self.connectivity.is_empty()
            && !self.provider.is_empty()
            && self.boundary != Boundary::Undefined
    }
}
