//! Typed schemas of the two classification environments
//!
//! A schema lists what rule text may reference: variables (`Exporter`),
//! their fields (`Exporter.Name`) and the capabilities it may call.

use crate::semantic::TypeInfo;
use flowclass_core::capability::*;
use flowclass_core::SchemaKind;
use std::collections::BTreeMap;

/// Signature of a callable capability
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSignature {
    pub params: Vec<TypeInfo>,
    pub returns: TypeInfo,
}

impl FunctionSignature {
    pub fn new(params: Vec<TypeInfo>, returns: TypeInfo) -> Self {
        Self { params, returns }
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// Variables, fields and functions visible to one kind of rule
#[derive(Debug, Clone)]
pub struct Schema {
    kind: SchemaKind,
    /// Variable name -> field name -> type
    variables: BTreeMap<&'static str, BTreeMap<&'static str, TypeInfo>>,
    functions: BTreeMap<&'static str, FunctionSignature>,
}

impl Schema {
    /// Schema for exporter rules
    pub fn exporter() -> Self {
        let mut schema = Self::empty(SchemaKind::Exporter);
        schema.add_exporter_variable();
        schema.add_function(CLASSIFY, vec![TypeInfo::String]);
        schema.add_function(CLASSIFY_REGEX, regex_params());
        schema
    }

    /// Schema for interface rules
    pub fn interface() -> Self {
        let mut schema = Self::empty(SchemaKind::Interface);
        schema.add_exporter_variable();
        schema.variables.insert(
            "Interface",
            BTreeMap::from([
                ("Name", TypeInfo::String),
                ("Description", TypeInfo::String),
                ("Speed", TypeInfo::Number),
            ]),
        );
        schema.add_function(CLASSIFY_CONNECTIVITY, vec![TypeInfo::String]);
        schema.add_function(CLASSIFY_CONNECTIVITY_REGEX, regex_params());
        schema.add_function(CLASSIFY_PROVIDER, vec![TypeInfo::String]);
        schema.add_function(CLASSIFY_PROVIDER_REGEX, regex_params());
        schema.add_function(CLASSIFY_EXTERNAL, vec![]);
        schema.add_function(CLASSIFY_INTERNAL, vec![]);
        schema
    }

    pub fn for_kind(kind: SchemaKind) -> Self {
        match kind {
            SchemaKind::Exporter => Self::exporter(),
            SchemaKind::Interface => Self::interface(),
        }
    }

    fn empty(kind: SchemaKind) -> Self {
        Self {
            kind,
            variables: BTreeMap::new(),
            functions: BTreeMap::new(),
        }
    }

    fn add_exporter_variable(&mut self) {
        self.variables.insert(
            "Exporter",
            BTreeMap::from([("IP", TypeInfo::String), ("Name", TypeInfo::String)]),
        );
    }

    /// Every capability returns bool so it can be chained with `&&` / `||`
    fn add_function(&mut self, name: &'static str, params: Vec<TypeInfo>) {
        self.functions
            .insert(name, FunctionSignature::new(params, TypeInfo::Boolean));
    }

    pub fn kind(&self) -> SchemaKind {
        self.kind
    }

    /// Fully qualified field paths (e.g. `Interface.Speed`) with their types
    pub fn fields(&self) -> impl Iterator<Item = (String, TypeInfo)> + '_ {
        self.variables.iter().flat_map(|(variable, fields)| {
            fields
                .iter()
                .map(move |(field, ty)| (format!("{}.{}", variable, field), ty.clone()))
        })
    }

    pub fn variables(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.variables.keys().copied()
    }

    pub fn functions(&self) -> impl Iterator<Item = (&'static str, &FunctionSignature)> {
        self.functions.iter().map(|(name, sig)| (*name, sig))
    }

    pub fn function(&self, name: &str) -> Option<&FunctionSignature> {
        self.functions.get(name)
    }
}

fn regex_params() -> Vec<TypeInfo> {
    vec![TypeInfo::String, TypeInfo::String, TypeInfo::String]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exporter_schema() {
        let schema = Schema::exporter();
        assert_eq!(schema.kind(), SchemaKind::Exporter);
        assert_eq!(schema.variables().collect::<Vec<_>>(), vec!["Exporter"]);
        assert_eq!(schema.function(CLASSIFY).map(|f| f.arity()), Some(1));
        assert_eq!(schema.function(CLASSIFY_REGEX).map(|f| f.arity()), Some(3));
        assert!(schema.function(CLASSIFY_PROVIDER).is_none());
    }

    #[test]
    fn test_interface_schema() {
        let schema = Schema::for_kind(SchemaKind::Interface);
        let fields: Vec<String> = schema.fields().map(|(path, _)| path).collect();
        assert_eq!(
            fields,
            vec![
                "Exporter.IP",
                "Exporter.Name",
                "Interface.Description",
                "Interface.Name",
                "Interface.Speed"
            ]
        );
        assert_eq!(schema.functions().count(), 6);
        assert_eq!(schema.function(CLASSIFY_EXTERNAL).map(|f| f.arity()), Some(0));
        assert!(schema.function(CLASSIFY).is_none());
    }

    #[test]
    fn test_regex_capabilities_take_three_strings() {
        for schema in [Schema::exporter(), Schema::interface()] {
            for (name, signature) in schema.functions() {
                assert_eq!(signature.returns, TypeInfo::Boolean);
                if is_regex_capability(name) {
                    assert_eq!(signature.arity(), REGEX_ARITY, "{}", name);
                }
            }
        }
    }
}
