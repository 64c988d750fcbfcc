//! Classifier rule objects
//!
//! A rule is configured as plain text and compiled when it is parsed, so a
//! rule value always holds a valid program. The text is also its serialized
//! form.

use flowclass_compiler::{CompileError, Compiler};
use flowclass_core::{CompiledProgram, SchemaKind};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Compiler shared by every rule parsed in this process
fn compiler() -> &'static Compiler {
    static COMPILER: OnceLock<Compiler> = OnceLock::new();
    COMPILER.get_or_init(Compiler::new)
}

/// A rule assigning a group to an exporter
#[derive(Debug, Clone)]
pub struct ExporterClassifierRule {
    program: CompiledProgram,
}

impl ExporterClassifierRule {
    /// Compile `source` against the exporter schema
    pub fn new(source: &str) -> Result<Self, CompileError> {
        let program = compiler().compile_exporter_rule(source)?;
        Ok(Self { program })
    }

    pub fn program(&self) -> &CompiledProgram {
        &self.program
    }

    pub fn source(&self) -> &str {
        self.program.source()
    }
}

/// A rule assigning connectivity, provider and boundary to an interface
#[derive(Debug, Clone)]
pub struct InterfaceClassifierRule {
    program: CompiledProgram,
}

impl InterfaceClassifierRule {
    /// Compile `source` against the interface schema
    pub fn new(source: &str) -> Result<Self, CompileError> {
        let program = compiler().compile_interface_rule(source)?;
        Ok(Self { program })
    }

    pub fn program(&self) -> &CompiledProgram {
        &self.program
    }

    pub fn source(&self) -> &str {
        self.program.source()
    }
}

impl TryFrom<CompiledProgram> for ExporterClassifierRule {
    type Error = crate::SdkError;

    fn try_from(program: CompiledProgram) -> Result<Self, Self::Error> {
        match program.schema() {
            SchemaKind::Exporter => Ok(Self { program }),
            other => Err(schema_error(SchemaKind::Exporter, other)),
        }
    }
}

impl TryFrom<CompiledProgram> for InterfaceClassifierRule {
    type Error = crate::SdkError;

    fn try_from(program: CompiledProgram) -> Result<Self, Self::Error> {
        match program.schema() {
            SchemaKind::Interface => Ok(Self { program }),
            other => Err(schema_error(SchemaKind::Interface, other)),
        }
    }
}

fn schema_error(expected: SchemaKind, actual: SchemaKind) -> crate::SdkError {
    crate::SdkError::ConfigError(format!(
        "expected an {} program, got an {} program",
        expected, actual
    ))
}

impl FromStr for ExporterClassifierRule {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl FromStr for InterfaceClassifierRule {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for ExporterClassifierRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.source())
    }
}

impl fmt::Display for InterfaceClassifierRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.source())
    }
}

// Two rules are equal when their text is
impl PartialEq for ExporterClassifierRule {
    fn eq(&self, other: &Self) -> bool {
        self.source() == other.source()
    }
}

impl PartialEq for InterfaceClassifierRule {
    fn eq(&self, other: &Self) -> bool {
        self.source() == other.source()
    }
}

impl Serialize for ExporterClassifierRule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.source())
    }
}

impl Serialize for InterfaceClassifierRule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.source())
    }
}

impl<'de> Deserialize<'de> for ExporterClassifierRule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Self::new(&source).map_err(de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for InterfaceClassifierRule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Self::new(&source).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let rule: ExporterClassifierRule = r#"classify("core")"#.parse().unwrap();
        assert_eq!(rule.to_string(), r#"classify("core")"#);
        assert_eq!(rule.program().schema(), SchemaKind::Exporter);

        let rule: InterfaceClassifierRule = "classifyExternal()".parse().unwrap();
        assert_eq!(rule.source(), "classifyExternal()");
    }

    #[test]
    fn test_rules_are_schema_bound() {
        assert!(r#"classifyProvider("x")"#
            .parse::<ExporterClassifierRule>()
            .is_err());
        assert!(r#"classify("x")"#.parse::<InterfaceClassifierRule>().is_err());
    }

    #[test]
    fn test_text_round_trip() {
        let rule = InterfaceClassifierRule::new(
            r#"Interface.Speed > 1000 && classifyConnectivity("core")"#,
        )
        .unwrap();
        let again: InterfaceClassifierRule = rule.to_string().parse().unwrap();
        assert_eq!(rule, again);
    }

    #[test]
    fn test_serde_as_string() {
        let rule = ExporterClassifierRule::new(r#"classify("edge")"#).unwrap();
        let json = serde_json::to_string(&rule).unwrap();
        assert_eq!(json, r#""classify(\"edge\")""#);

        let back: ExporterClassifierRule = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rule);
    }

    #[test]
    fn test_deserialize_rejects_invalid_rule() {
        let err = serde_json::from_str::<ExporterClassifierRule>(
            r#""classifyRegex(Exporter.Name, \"(oops\", \"$1\")""#,
        )
        .unwrap_err();
        assert!(err.to_string().contains(r#"invalid regular expression "(oops""#));
    }

    #[test]
    fn test_try_from_program() {
        let program = compiler().compile_exporter_rule("true").unwrap();
        assert!(InterfaceClassifierRule::try_from(program.clone()).is_err());
        assert!(ExporterClassifierRule::try_from(program).is_ok());
    }
}
