//! Interface classification environment

use super::{expand_regex, no_args, string_arg, Environment};
use crate::error::{Result, RuntimeError};
use crate::normalize::normalize;
use crate::regex_cache::RegexCache;
use flowclass_core::capability::*;
use flowclass_core::{
    Boundary, CoreError, ExporterInfo, InterfaceClassification, InterfaceInfo, SchemaKind, Value,
};

/// Exposes `Exporter`, `Interface` and the connectivity, provider and
/// boundary capabilities, writing into a caller-owned classification
#[derive(Debug)]
pub struct InterfaceEnvironment<'a> {
    exporter: &'a ExporterInfo,
    interface: &'a InterfaceInfo,
    classification: &'a mut InterfaceClassification,
}

impl<'a> InterfaceEnvironment<'a> {
    pub fn new(
        exporter: &'a ExporterInfo,
        interface: &'a InterfaceInfo,
        classification: &'a mut InterfaceClassification,
    ) -> Self {
        Self {
            exporter,
            interface,
            classification,
        }
    }

    pub fn classification(&self) -> &InterfaceClassification {
        &*self.classification
    }
}

impl Environment for InterfaceEnvironment<'_> {
    fn schema(&self) -> SchemaKind {
        SchemaKind::Interface
    }

    fn field(&self, variable: &str, field: &str) -> Result<Value> {
        match variable {
            "Exporter" => Ok(self.exporter.field(field)?),
            "Interface" => Ok(self.interface.field(field)?),
            _ => Err(CoreError::FieldNotFound(format!("{}.{}", variable, field)).into()),
        }
    }

    // Every capability returns true once it ran, even when the field was already set
    fn call(&mut self, name: &str, args: &[Value], regexes: &RegexCache) -> Result<Value> {
        match name {
            CLASSIFY_CONNECTIVITY => {
                let value = normalize(string_arg(name, args)?);
                self.classification.set_connectivity(value);
            }
            CLASSIFY_PROVIDER => {
                let value = normalize(string_arg(name, args)?);
                self.classification.set_provider(value);
            }
            CLASSIFY_CONNECTIVITY_REGEX => match expand_regex(name, args, regexes)? {
                Some(value) => {
                    self.classification.set_connectivity(normalize(&value));
                }
                None => return Ok(Value::Bool(false)),
            },
            CLASSIFY_PROVIDER_REGEX => match expand_regex(name, args, regexes)? {
                Some(value) => {
                    self.classification.set_provider(normalize(&value));
                }
                None => return Ok(Value::Bool(false)),
            },
            CLASSIFY_EXTERNAL => {
                no_args(name, args)?;
                self.classification.set_boundary(Boundary::External);
            }
            CLASSIFY_INTERNAL => {
                no_args(name, args)?;
                self.classification.set_boundary(Boundary::Internal);
            }
            _ => return Err(RuntimeError::UnknownFunction(name.to_string())),
        }
        Ok(Value::Bool(true))
    }
}
