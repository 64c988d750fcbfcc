//! Exporter classification environment

use super::{expand_regex, string_arg, Environment};
use crate::error::{Result, RuntimeError};
use crate::regex_cache::RegexCache;
use flowclass_core::capability::{CLASSIFY, CLASSIFY_REGEX};
use flowclass_core::{CoreError, ExporterInfo, SchemaKind, Value};

/// Exposes `Exporter` plus `classify` / `classifyRegex`
#[derive(Debug)]
pub struct ExporterEnvironment<'a> {
    exporter: &'a ExporterInfo,
    group: Option<String>,
}

impl<'a> ExporterEnvironment<'a> {
    pub fn new(exporter: &'a ExporterInfo) -> Self {
        Self {
            exporter,
            group: None,
        }
    }

    /// Group recorded by the last `classify` call, if any
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn into_group(self) -> Option<String> {
        self.group
    }

    // Last call wins within one evaluation
    fn classify(&mut self, group: String) -> Value {
        self.group = Some(group);
        Value::Bool(true)
    }
}

impl Environment for ExporterEnvironment<'_> {
    fn schema(&self) -> SchemaKind {
        SchemaKind::Exporter
    }

    fn field(&self, variable: &str, field: &str) -> Result<Value> {
        match variable {
            "Exporter" => Ok(self.exporter.field(field)?),
            _ => Err(CoreError::FieldNotFound(format!("{}.{}", variable, field)).into()),
        }
    }

    fn call(&mut self, name: &str, args: &[Value], regexes: &RegexCache) -> Result<Value> {
        match name {
            CLASSIFY => {
                let group = string_arg(name, args)?.to_string();
                Ok(self.classify(group))
            }
            CLASSIFY_REGEX => Ok(match expand_regex(name, args, regexes)? {
                Some(group) => self.classify(group),
                None => Value::Bool(false),
            }),
            _ => Err(RuntimeError::UnknownFunction(name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields() {
        let exporter = ExporterInfo::new("192.0.2.1", "edge1");
        let env = ExporterEnvironment::new(&exporter);

        assert_eq!(env.field("Exporter", "IP").unwrap(), Value::from("192.0.2.1"));
        assert_eq!(env.field("Exporter", "Name").unwrap(), Value::from("edge1"));
        assert!(env.field("Interface", "Name").is_err());
        assert!(env.field("Exporter", "Vendor").is_err());
        assert_eq!(env.schema(), SchemaKind::Exporter);
    }

    #[test]
    fn test_classify_last_call_wins() {
        let exporter = ExporterInfo::new("192.0.2.1", "edge1");
        let cache = RegexCache::new();
        let mut env = ExporterEnvironment::new(&exporter);

        assert_eq!(
            env.call(CLASSIFY, &[Value::from("first")], &cache).unwrap(),
            Value::Bool(true)
        );
        env.call(CLASSIFY, &[Value::from("second")], &cache).unwrap();
        assert_eq!(env.group(), Some("second"));
    }

    #[test]
    fn test_classify_regex() {
        let exporter = ExporterInfo::new("192.0.2.1", "th2-edge1");
        let cache = RegexCache::new();
        let mut env = ExporterEnvironment::new(&exporter);

        let miss = [Value::from("th2-edge1"), Value::from("^par-"), Value::from("paris")];
        assert_eq!(env.call(CLASSIFY_REGEX, &miss, &cache).unwrap(), Value::Bool(false));
        assert_eq!(env.group(), None);

        let hit = [Value::from("th2-edge1"), Value::from(r"^(\w+)-"), Value::from("site-$1")];
        assert_eq!(env.call(CLASSIFY_REGEX, &hit, &cache).unwrap(), Value::Bool(true));
        assert_eq!(env.into_group(), Some("site-th2".to_string()));
    }

    #[test]
    fn test_unknown_capability() {
        let exporter = ExporterInfo::default();
        let mut env = ExporterEnvironment::new(&exporter);
        assert!(matches!(
            env.call("classifyExternal", &[], &RegexCache::new()),
            Err(RuntimeError::UnknownFunction(_))
        ));
    }
}
