//! Binary operator execution

use crate::error::{Result, RuntimeError};
use crate::regex_cache::RegexCache;
use flowclass_core::ast::Operator;
use flowclass_core::Value;

/// Execute a non-comparison, non-logical binary operation
pub(crate) fn execute_binary_op(
    left: &Value,
    op: &Operator,
    right: &Value,
    regexes: &RegexCache,
) -> Result<Value> {
    // Null in arithmetic returns Null, string and membership tests on Null are false
    if matches!(left, Value::Null) || matches!(right, Value::Null) {
        tracing::trace!(?left, %op, ?right, "Null in binary operation");
        return Ok(if op.is_string() || matches!(op, Operator::In | Operator::NotIn) {
            Value::Bool(false)
        } else {
            Value::Null
        });
    }

    match (left, op, right) {
        // Concatenation
        (Value::String(l), Operator::Add, Value::String(r)) => {
            let mut joined = String::with_capacity(l.len() + r.len());
            joined.push_str(l);
            joined.push_str(r);
            Ok(Value::String(joined))
        }

        // Arithmetic is IEEE-754: a zero divisor gives an infinity or NaN
        (l, op, r) if op.is_arithmetic() => {
            let (l, r) = (l.as_number()?, r.as_number()?);
            Ok(Value::Number(match op {
                Operator::Add => l + r,
                Operator::Sub => l - r,
                Operator::Mul => l * r,
                Operator::Div => l / r,
                _ => l % r,
            }))
        }

        // String operations
        (Value::String(l), Operator::Contains, Value::String(r)) => {
            Ok(Value::Bool(l.contains(r.as_str())))
        }
        (Value::String(l), Operator::StartsWith, Value::String(r)) => {
            Ok(Value::Bool(l.starts_with(r.as_str())))
        }
        (Value::String(l), Operator::EndsWith, Value::String(r)) => {
            Ok(Value::Bool(l.ends_with(r.as_str())))
        }
        (Value::String(l), Operator::Matches, Value::String(pattern)) => {
            let regex = regexes.get_or_compile(pattern)?;
            Ok(Value::Bool(regex.is_match(l)))
        }

        // In operator
        (val, Operator::In, Value::Array(arr)) => Ok(Value::Bool(arr.contains(val))),
        (val, Operator::NotIn, Value::Array(arr)) => Ok(Value::Bool(!arr.contains(val))),

        _ => Err(RuntimeError::InvalidOperation(format!(
            "Cannot apply {} to {} and {}",
            op,
            left.type_name(),
            right.type_name()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(left: Value, op: Operator, right: Value) -> Result<Value> {
        execute_binary_op(&left, &op, &right, &RegexCache::new())
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(
            apply(Value::Number(10.0), Operator::Add, Value::Number(5.0)).unwrap(),
            Value::Number(15.0)
        );
        assert_eq!(
            apply(Value::Number(7.0), Operator::Mod, Value::Number(4.0)).unwrap(),
            Value::Number(3.0)
        );
    }

    #[test]
    fn test_zero_divisor() {
        assert_eq!(
            apply(Value::Number(1.0), Operator::Div, Value::Number(0.0)).unwrap(),
            Value::Number(f64::INFINITY)
        );
        assert_eq!(
            apply(Value::Number(-1.0), Operator::Div, Value::Number(0.0)).unwrap(),
            Value::Number(f64::NEG_INFINITY)
        );
        match apply(Value::Number(7.0), Operator::Mod, Value::Number(0.0)).unwrap() {
            Value::Number(n) => assert!(n.is_nan()),
            other => panic!("expected a number, got {:?}", other),
        }
    }

    #[test]
    fn test_concatenation() {
        assert_eq!(
            apply(Value::from("transit-"), Operator::Add, Value::from("eth0")).unwrap(),
            Value::from("transit-eth0")
        );
    }

    #[test]
    fn test_string_operations() {
        let name = Value::from("GigabitEthernet3");
        assert_eq!(
            apply(name.clone(), Operator::StartsWith, Value::from("Gigabit")).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            apply(name.clone(), Operator::EndsWith, Value::from("4")).unwrap(),
            Value::Bool(false)
        );
        assert_eq!(
            apply(name.clone(), Operator::Contains, Value::from("Ether")).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            apply(name, Operator::Matches, Value::from(r"^Gigabit\w+\d$")).unwrap(),
            Value::Bool(true)
        );
    }

    #[test]
    fn test_matches_uses_cache() {
        let cache = RegexCache::new();
        let left = Value::from("edge1");
        let right = Value::from("^edge");
        execute_binary_op(&left, &Operator::Matches, &right, &cache).unwrap();
        execute_binary_op(&left, &Operator::Matches, &right, &cache).unwrap();
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_matches_invalid_dynamic_pattern() {
        assert!(matches!(
            apply(Value::from("x"), Operator::Matches, Value::from("(")),
            Err(RuntimeError::InvalidRegex { .. })
        ));
    }

    #[test]
    fn test_membership() {
        let list = Value::Array(vec![Value::from("edge1"), Value::from("edge2")]);
        assert_eq!(
            apply(Value::from("edge2"), Operator::In, list.clone()).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            apply(Value::from("core1"), Operator::NotIn, list).unwrap(),
            Value::Bool(true)
        );
    }

    #[test]
    fn test_null_operands() {
        assert_eq!(
            apply(Value::Null, Operator::Add, Value::Number(1.0)).unwrap(),
            Value::Null
        );
        assert_eq!(
            apply(Value::from("x"), Operator::Matches, Value::Null).unwrap(),
            Value::Bool(false)
        );
    }

    #[test]
    fn test_invalid_operation() {
        assert!(matches!(
            apply(Value::Bool(true), Operator::Sub, Value::Number(1.0)),
            Err(RuntimeError::Core(_))
        ));
        assert!(matches!(
            apply(Value::Number(1.0), Operator::Contains, Value::from("1")),
            Err(RuntimeError::InvalidOperation(_))
        ));
    }
}
