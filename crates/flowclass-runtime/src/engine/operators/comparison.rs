//! Comparison operator execution

use crate::error::{Result, RuntimeError};
use flowclass_core::ast::Operator;
use flowclass_core::Value;

/// Execute a comparison operation
pub(crate) fn execute_compare(left: &Value, op: &Operator, right: &Value) -> Result<bool> {
    // Null compared to anything returns false
    if matches!(left, Value::Null) || matches!(right, Value::Null) {
        tracing::trace!(?left, %op, ?right, "Null comparison, returning false");
        return Ok(false);
    }

    match (left, op, right) {
        (Value::Number(l), Operator::Eq, Value::Number(r)) => Ok(l == r),
        (Value::Number(l), Operator::Ne, Value::Number(r)) => Ok(l != r),
        (Value::Number(l), Operator::Gt, Value::Number(r)) => Ok(l > r),
        (Value::Number(l), Operator::Ge, Value::Number(r)) => Ok(l >= r),
        (Value::Number(l), Operator::Lt, Value::Number(r)) => Ok(l < r),
        (Value::Number(l), Operator::Le, Value::Number(r)) => Ok(l <= r),

        (Value::String(l), Operator::Eq, Value::String(r)) => Ok(l == r),
        (Value::String(l), Operator::Ne, Value::String(r)) => Ok(l != r),
        (Value::String(l), Operator::Gt, Value::String(r)) => Ok(l > r),
        (Value::String(l), Operator::Ge, Value::String(r)) => Ok(l >= r),
        (Value::String(l), Operator::Lt, Value::String(r)) => Ok(l < r),
        (Value::String(l), Operator::Le, Value::String(r)) => Ok(l <= r),

        (Value::Bool(l), Operator::Eq, Value::Bool(r)) => Ok(l == r),
        (Value::Bool(l), Operator::Ne, Value::Bool(r)) => Ok(l != r),

        _ => Err(RuntimeError::InvalidOperation(format!(
            "Cannot compare {} and {} with {}",
            left.type_name(),
            right.type_name(),
            op
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers() {
        let speed = Value::Number(10000.0);
        assert!(execute_compare(&speed, &Operator::Ge, &Value::Number(10000.0)).unwrap());
        assert!(!execute_compare(&speed, &Operator::Lt, &Value::Number(1000.0)).unwrap());
        assert!(execute_compare(&speed, &Operator::Ne, &Value::Number(1.0)).unwrap());
    }

    #[test]
    fn test_strings() {
        let name = Value::from("edge1");
        assert!(execute_compare(&name, &Operator::Eq, &Value::from("edge1")).unwrap());
        assert!(execute_compare(&name, &Operator::Lt, &Value::from("edge2")).unwrap());
    }

    #[test]
    fn test_null_is_never_equal() {
        assert!(!execute_compare(&Value::Null, &Operator::Eq, &Value::Null).unwrap());
        assert!(!execute_compare(&Value::from("x"), &Operator::Ne, &Value::Null).unwrap());
    }

    #[test]
    fn test_mismatched_types() {
        assert!(matches!(
            execute_compare(&Value::from("1"), &Operator::Eq, &Value::Number(1.0)),
            Err(RuntimeError::InvalidOperation(_))
        ));
    }
}
