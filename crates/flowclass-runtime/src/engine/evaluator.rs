//! Expression evaluator
//!
//! Walks the expression tree of a compiled program. Capability calls are
//! forwarded to the environment, in evaluation order; `&&`, `||` and the
//! ternary operator skip the sub-expressions they do not need, so side
//! effects on the skipped side never happen.

use super::operators::{execute_binary_op, execute_compare, execute_unary_op};
use crate::environment::Environment;
use crate::error::Result;
use crate::regex_cache::RegexCache;
use flowclass_core::ast::{Expression, Operator};
use flowclass_core::{CoreError, Value};

/// Evaluates expressions against one environment
pub struct Evaluator<'a, E: Environment + ?Sized> {
    env: &'a mut E,
    regexes: &'a RegexCache,
}

impl<'a, E: Environment + ?Sized> Evaluator<'a, E> {
    pub fn new(env: &'a mut E, regexes: &'a RegexCache) -> Self {
        Self { env, regexes }
    }

    /// Evaluate an expression to a value
    pub fn evaluate(&mut self, expr: &Expression) -> Result<Value> {
        match expr {
            Expression::Literal(value) => Ok(value.clone()),

            Expression::FieldAccess(path) => match path.as_slice() {
                [variable, field] => self.env.field(variable, field),
                _ => Err(CoreError::FieldNotFound(path.join(".")).into()),
            },

            Expression::Binary { left, op, right } => match op {
                Operator::And => {
                    if !self.evaluate_bool(left)? {
                        return Ok(Value::Bool(false));
                    }
                    Ok(Value::Bool(self.evaluate_bool(right)?))
                }
                Operator::Or => {
                    if self.evaluate_bool(left)? {
                        return Ok(Value::Bool(true));
                    }
                    Ok(Value::Bool(self.evaluate_bool(right)?))
                }
                _ => {
                    let left = self.evaluate(left)?;
                    let right = self.evaluate(right)?;
                    if op.is_comparison() {
                        Ok(Value::Bool(execute_compare(&left, op, &right)?))
                    } else {
                        execute_binary_op(&left, op, &right, self.regexes)
                    }
                }
            },

            Expression::Unary { op, operand } => {
                let value = self.evaluate(operand)?;
                execute_unary_op(&value, op)
            }

            Expression::FunctionCall { name, args } => {
                let args = args
                    .iter()
                    .map(|arg| self.evaluate(arg))
                    .collect::<Result<Vec<_>>>()?;
                tracing::trace!(function = %name, ?args, "Calling capability");
                self.env.call(name, &args, self.regexes)
            }

            Expression::Ternary {
                condition,
                true_expr,
                false_expr,
            } => {
                if self.evaluate_bool(condition)? {
                    self.evaluate(true_expr)
                } else {
                    self.evaluate(false_expr)
                }
            }

            Expression::Array(items) => items
                .iter()
                .map(|item| self.evaluate(item))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
        }
    }

    /// Evaluate an expression that must produce a bool
    pub fn evaluate_bool(&mut self, expr: &Expression) -> Result<bool> {
        Ok(self.evaluate(expr)?.as_bool()?)
    }
}
