//! Unary operator execution

use crate::error::{Result, RuntimeError};
use flowclass_core::ast::UnaryOperator;
use flowclass_core::Value;

/// Execute a unary operation
pub(crate) fn execute_unary_op(operand: &Value, op: &UnaryOperator) -> Result<Value> {
    match (op, operand) {
        (UnaryOperator::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
        (UnaryOperator::Negate, Value::Number(n)) => Ok(Value::Number(-n)),
        (UnaryOperator::Negate, Value::Null) => Ok(Value::Null),
        _ => Err(RuntimeError::InvalidOperation(format!(
            "Cannot apply {} to {}",
            op,
            operand.type_name()
        ))),
    }
}
