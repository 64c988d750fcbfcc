//! Classification environments
//!
//! An environment exposes the variables of one schema to the evaluator and
//! carries out capability calls against the caller-owned output it borrows.

mod exporter;
mod interface;

pub use exporter::ExporterEnvironment;
pub use interface::InterfaceEnvironment;

use crate::error::{Result, RuntimeError};
use crate::regex_cache::RegexCache;
use flowclass_core::capability::REGEX_ARITY;
use flowclass_core::{SchemaKind, Value};

/// Variables and capabilities visible to a running rule
pub trait Environment {
    /// Schema this environment implements
    fn schema(&self) -> SchemaKind;

    /// Resolve `variable.field`
    fn field(&self, variable: &str, field: &str) -> Result<Value>;

    /// Invoke a capability with already evaluated arguments
    fn call(&mut self, name: &str, args: &[Value], regexes: &RegexCache) -> Result<Value>;
}

/// Single string argument of a plain capability
pub(crate) fn string_arg<'v>(name: &str, args: &'v [Value]) -> Result<&'v str> {
    match args {
        [value] => Ok(value.as_str()?),
        _ => Err(arity_error(name, 1, args.len())),
    }
}

/// Ensure a capability got no argument
pub(crate) fn no_args(name: &str, args: &[Value]) -> Result<()> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(arity_error(name, 0, args.len()))
    }
}

/// Match `subject` against `pattern` and expand `template` with the captures
/// of the first match (`$1`, `${1}`, `$name`, `$$`).
///
/// Returns `None` when the pattern does not match.
pub(crate) fn expand_regex(
    name: &str,
    args: &[Value],
    regexes: &RegexCache,
) -> Result<Option<String>> {
    let [subject, pattern, template] = args else {
        return Err(arity_error(name, REGEX_ARITY, args.len()));
    };
    let subject = subject.as_str()?;
    let template = template.as_str()?;
    let regex = regexes.get_or_compile(pattern.as_str()?)?;

    Ok(regex.captures(subject).map(|captures| {
        let mut expanded = String::new();
        captures.expand(template, &mut expanded);
        expanded
    }))
}

fn arity_error(name: &str, expected: usize, actual: usize) -> RuntimeError {
    RuntimeError::InvalidOperation(format!(
        "{} expects {} argument(s), got {}",
        name, expected, actual
    ))
}
