//! Literal regular expression validation
//!
//! Patterns known at compile time are checked once here so that a broken
//! rule is refused at load time instead of failing on every flow.

use flowclass_core::ast::{Expression, Operator};
use flowclass_core::capability::{is_regex_capability, REGEX_ARITY};
use regex::Regex;

/// Callbacks for a depth-first traversal of an expression tree
pub trait Visitor {
    /// Called before the children of `expr` are visited
    fn enter(&mut self, _expr: &Expression) {}

    /// Called after every child of `expr` has been visited
    fn exit(&mut self, _expr: &Expression) {}
}

/// Walk `expr` depth-first, calling `enter` on the way down and `exit` on the way up
pub fn walk<V: Visitor + ?Sized>(visitor: &mut V, expr: &Expression) {
    visitor.enter(expr);
    match expr {
        Expression::Literal(_) | Expression::FieldAccess(_) => {}
        Expression::Binary { left, right, .. } => {
            walk(visitor, left);
            walk(visitor, right);
        }
        Expression::Unary { operand, .. } => walk(visitor, operand),
        Expression::FunctionCall { args, .. } => {
            for arg in args {
                walk(visitor, arg);
            }
        }
        Expression::Ternary {
            condition,
            true_expr,
            false_expr,
        } => {
            walk(visitor, condition);
            walk(visitor, true_expr);
            walk(visitor, false_expr);
        }
        Expression::Array(items) => {
            for item in items {
                walk(visitor, item);
            }
        }
    }
    visitor.exit(expr);
}

/// Collects every literal pattern of a rule that fails to compile.
///
/// Inspected sites:
/// - calls to a `...Regex` capability with three arguments whose second
///   argument is a string literal
/// - the `matches` operator with a string literal on its right side
///
/// Patterns built at run time are not checked here.
#[derive(Debug, Default)]
pub struct RegexValidator {
    invalid: Vec<String>,
}

impl RegexValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a whole expression and return the invalid patterns, in
    /// post-order
    pub fn validate(expr: &Expression) -> Vec<String> {
        let mut validator = Self::new();
        walk(&mut validator, expr);
        validator.into_invalid()
    }

    pub fn invalid(&self) -> &[String] {
        &self.invalid
    }

    pub fn into_invalid(self) -> Vec<String> {
        self.invalid
    }

    fn check(&mut self, pattern: &str) {
        if let Err(err) = Regex::new(pattern) {
            tracing::trace!(pattern, error = %err, "Rejected literal pattern");
            self.invalid.push(pattern.to_string());
        }
    }
}

impl Visitor for RegexValidator {
    fn exit(&mut self, expr: &Expression) {
        match expr {
            Expression::FunctionCall { name, args }
                if is_regex_capability(name) && args.len() == REGEX_ARITY =>
            {
                if let Some(pattern) = args[1].as_string_literal() {
                    self.check(pattern);
                }
            }
            Expression::Binary {
                op: Operator::Matches,
                right,
                ..
            } => {
                if let Some(pattern) = right.as_string_literal() {
                    self.check(pattern);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowclass_parser::ExpressionParser;

    fn invalid(text: &str) -> Vec<String> {
        RegexValidator::validate(&ExpressionParser::parse(text).unwrap())
    }

    #[test]
    fn test_valid_patterns() {
        assert!(invalid(r#"classifyRegex(Exporter.Name, "^(\\w+)-", "$1")"#).is_empty());
        assert!(invalid(r#"Exporter.Name matches "^edge[0-9]+$""#).is_empty());
    }

    #[test]
    fn test_invalid_capability_pattern() {
        assert_eq!(
            invalid(r#"classifyRegex(Exporter.Name, "(unterminated", "$1")"#),
            vec!["(unterminated".to_string()]
        );
    }

    #[test]
    fn test_invalid_matches_pattern() {
        assert_eq!(
            invalid(r#"Exporter.Name matches "[a-""#),
            vec!["[a-".to_string()]
        );
    }

    #[test]
    fn test_collects_every_pattern_in_post_order() {
        let found = invalid(
            r#"classifyProviderRegex(Interface.Description, "(a", "$1") && (Interface.Name matches "[b" || classifyConnectivityRegex(Interface.Name, "c)", "x"))"#,
        );
        assert_eq!(found, vec!["(a", "[b", "c)"]);
    }

    #[test]
    fn test_dynamic_patterns_are_skipped() {
        assert!(invalid(r#"classifyRegex(Exporter.Name, Exporter.IP + "(", "$1")"#).is_empty());
        assert!(invalid(r#"Exporter.Name matches Exporter.IP"#).is_empty());
    }

    #[test]
    fn test_non_regex_calls_are_skipped() {
        assert!(invalid(r#"classify("(")"#).is_empty());
        // wrong arity is left to the type checker
        assert!(invalid(r#"classifyRegex(Exporter.Name, "(")"#).is_empty());
    }

    #[test]
    fn test_visitor_order() {
        #[derive(Default)]
        struct Recorder(Vec<String>);

        impl Visitor for Recorder {
            fn enter(&mut self, expr: &Expression) {
                if let Expression::FunctionCall { name, .. } = expr {
                    self.0.push(format!("enter {}", name));
                }
            }

            fn exit(&mut self, expr: &Expression) {
                if let Expression::FunctionCall { name, .. } = expr {
                    self.0.push(format!("exit {}", name));
                }
            }
        }

        let expr = ExpressionParser::parse(r#"classify("a") || classifyExternal()"#).unwrap();
        let mut recorder = Recorder::default();
        walk(&mut recorder, &expr);
        assert_eq!(
            recorder.0,
            vec![
                "enter classify",
                "exit classify",
                "enter classifyExternal",
                "exit classifyExternal"
            ]
        );
    }
}
