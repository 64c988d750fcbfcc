//! Type checker
//!
//! Performs type inference and validation on expressions against a schema.
//! Unlike a loose checker, every variable, field and function must be known:
//! rules run on the per-flow hot path, so mistakes must surface at load time.

use crate::error::{CompileError, Result};
use crate::schema::{FunctionSignature, Schema};
use flowclass_core::ast::{Expression, Operator, UnaryOperator};
use flowclass_core::Value;
use std::collections::HashMap;
use std::fmt;

/// Type information for expressions
#[derive(Debug, Clone, PartialEq)]
pub enum TypeInfo {
    Number,
    String,
    Boolean,
    Array(Box<TypeInfo>),
    /// A schema variable such as `Exporter`, only usable through its fields
    Object,
    /// `nil` and empty arrays
    Any,
}

impl TypeInfo {
    /// Check if this type is compatible with another type
    pub fn is_compatible_with(&self, other: &TypeInfo) -> bool {
        match (self, other) {
            (TypeInfo::Any, _) | (_, TypeInfo::Any) => true,
            (TypeInfo::Number, TypeInfo::Number) => true,
            (TypeInfo::String, TypeInfo::String) => true,
            (TypeInfo::Boolean, TypeInfo::Boolean) => true,
            (TypeInfo::Array(a), TypeInfo::Array(b)) => a.is_compatible_with(b),
            _ => false,
        }
    }

    /// Check if this type can be used in a numeric operation
    pub fn is_numeric(&self) -> bool {
        matches!(self, TypeInfo::Number | TypeInfo::Any)
    }

    /// Check if this type can be used in a boolean operation.
    ///
    /// `nil` is not a bool: logical operators, `!`, ternary conditions and
    /// the rule itself need a value that is known to be one.
    pub fn is_boolean(&self) -> bool {
        matches!(self, TypeInfo::Boolean)
    }

    /// Check if this type can be tested by a string operator (`nil` tests false)
    pub fn is_string(&self) -> bool {
        matches!(self, TypeInfo::String | TypeInfo::Any)
    }

    /// Check if a value of this type can be passed where `param` is declared
    pub fn is_assignable_to(&self, param: &TypeInfo) -> bool {
        *self != TypeInfo::Any && self.is_compatible_with(param)
    }

    /// Check if this type can be compared
    pub fn is_comparable(&self) -> bool {
        matches!(
            self,
            TypeInfo::Number | TypeInfo::String | TypeInfo::Boolean | TypeInfo::Any
        )
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeInfo::Number => f.write_str("number"),
            TypeInfo::String => f.write_str("string"),
            TypeInfo::Boolean => f.write_str("bool"),
            TypeInfo::Array(inner) => write!(f, "array of {}", inner),
            TypeInfo::Object => f.write_str("object"),
            TypeInfo::Any => f.write_str("any"),
        }
    }
}

/// Type checker
#[derive(Debug, Clone, Default)]
pub struct TypeChecker {
    /// Type information for known variables
    variable_types: HashMap<String, TypeInfo>,
    /// Type information for known fields
    field_types: HashMap<String, TypeInfo>,
    /// Signatures of callable functions
    function_types: HashMap<String, FunctionSignature>,
}

impl TypeChecker {
    /// Create a new, empty type checker
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a type checker knowing everything `schema` exposes
    pub fn from_schema(schema: &Schema) -> Self {
        let mut checker = Self::new();
        for variable in schema.variables() {
            checker.register_variable(variable.to_string(), TypeInfo::Object);
        }
        for (path, type_info) in schema.fields() {
            checker.register_field(path, type_info);
        }
        for (name, signature) in schema.functions() {
            checker.register_function(name.to_string(), signature.clone());
        }
        checker
    }

    /// Register a variable with its type
    pub fn register_variable(&mut self, name: String, type_info: TypeInfo) {
        self.variable_types.insert(name, type_info);
    }

    /// Register a field with its type
    pub fn register_field(&mut self, path: String, type_info: TypeInfo) {
        self.field_types.insert(path, type_info);
    }

    /// Register a callable function
    pub fn register_function(&mut self, name: String, signature: FunctionSignature) {
        self.function_types.insert(name, signature);
    }

    /// Get the type of a variable
    pub fn get_variable_type(&self, name: &str) -> Option<&TypeInfo> {
        self.variable_types.get(name)
    }

    /// Get the type of a field
    pub fn get_field_type(&self, path: &str) -> Option<&TypeInfo> {
        self.field_types.get(path)
    }

    /// Infer and validate the type of an expression
    pub fn check_expression(&self, expr: &Expression) -> Result<TypeInfo> {
        match expr {
            Expression::Literal(value) => Ok(self.infer_literal_type(value)),

            Expression::FieldAccess(path) => {
                let lookup = if path.len() == 1 {
                    self.variable_types.get(&path[0])
                } else {
                    self.field_types.get(&path.join("."))
                };
                lookup
                    .cloned()
                    .ok_or_else(|| CompileError::UndefinedSymbol(path.join(".")))
            }

            Expression::Binary { left, op, right } => {
                let left_type = self.check_expression(left)?;
                let right_type = self.check_expression(right)?;
                self.check_binary_operation(&left_type, op, &right_type)
            }

            Expression::Unary { op, operand } => {
                let operand_type = self.check_expression(operand)?;
                self.check_unary_operation(op, &operand_type)
            }

            Expression::FunctionCall { name, args } => self.check_function_call(name, args),

            Expression::Ternary {
                condition,
                true_expr,
                false_expr,
            } => {
                let condition_type = self.check_expression(condition)?;
                let true_type = self.check_expression(true_expr)?;
                let false_type = self.check_expression(false_expr)?;

                if !condition_type.is_boolean() {
                    return Err(CompileError::TypeError(format!(
                        "Ternary condition must be bool, got {}",
                        condition_type
                    )));
                }

                if !true_type.is_compatible_with(&false_type) {
                    return Err(CompileError::TypeError(format!(
                        "Ternary branches have incompatible types {} and {}",
                        true_type, false_type
                    )));
                }
                // A `nil` branch keeps the whole ternary `any`
                Ok(if false_type == TypeInfo::Any {
                    false_type
                } else {
                    true_type
                })
            }

            Expression::Array(items) => {
                let mut element = TypeInfo::Any;
                for item in items {
                    let item_type = self.check_expression(item)?;
                    if !element.is_compatible_with(&item_type) {
                        return Err(CompileError::TypeError(format!(
                            "Array mixes {} and {} elements",
                            element, item_type
                        )));
                    }
                    if element == TypeInfo::Any {
                        element = item_type;
                    }
                }
                Ok(TypeInfo::Array(Box::new(element)))
            }
        }
    }

    /// Infer the type of a literal value
    #[allow(clippy::only_used_in_recursion)]
    fn infer_literal_type(&self, value: &Value) -> TypeInfo {
        match value {
            Value::Number(_) => TypeInfo::Number,
            Value::String(_) => TypeInfo::String,
            Value::Bool(_) => TypeInfo::Boolean,
            Value::Array(arr) => match arr.first() {
                Some(first) => TypeInfo::Array(Box::new(self.infer_literal_type(first))),
                None => TypeInfo::Array(Box::new(TypeInfo::Any)),
            },
            Value::Null => TypeInfo::Any,
        }
    }

    fn check_function_call(&self, name: &str, args: &[Expression]) -> Result<TypeInfo> {
        let signature = self
            .function_types
            .get(name)
            .ok_or_else(|| CompileError::UndefinedSymbol(format!("{}()", name)))?;

        if signature.arity() != args.len() {
            return Err(CompileError::ArityMismatch {
                name: name.to_string(),
                expected: signature.arity(),
                actual: args.len(),
            });
        }

        for (index, (arg, expected)) in args.iter().zip(&signature.params).enumerate() {
            let actual = self.check_expression(arg)?;
            if !actual.is_assignable_to(expected) {
                return Err(CompileError::TypeError(format!(
                    "Argument {} of {} must be {}, got {}",
                    index + 1,
                    name,
                    expected,
                    actual
                )));
            }
        }

        Ok(signature.returns.clone())
    }

    /// Check if a binary operation is valid for the given types
    fn check_binary_operation(
        &self,
        left: &TypeInfo,
        op: &Operator,
        right: &TypeInfo,
    ) -> Result<TypeInfo> {
        match op {
            // `+` doubles as string concatenation
            Operator::Add if *left == TypeInfo::String && *right == TypeInfo::String => {
                Ok(TypeInfo::String)
            }

            // Arithmetic operators require numeric operands
            Operator::Add | Operator::Sub | Operator::Mul | Operator::Div | Operator::Mod => {
                if !left.is_numeric() {
                    return Err(CompileError::TypeError(format!(
                        "Left operand of {} must be numeric, got {}",
                        op, left
                    )));
                }
                if !right.is_numeric() {
                    return Err(CompileError::TypeError(format!(
                        "Right operand of {} must be numeric, got {}",
                        op, right
                    )));
                }
                Ok(TypeInfo::Number)
            }

            // Comparison operators require comparable operands
            Operator::Eq
            | Operator::Ne
            | Operator::Gt
            | Operator::Ge
            | Operator::Lt
            | Operator::Le => {
                if !left.is_comparable() {
                    return Err(CompileError::TypeError(format!(
                        "Left operand of {} must be comparable, got {}",
                        op, left
                    )));
                }
                if !right.is_comparable() {
                    return Err(CompileError::TypeError(format!(
                        "Right operand of {} must be comparable, got {}",
                        op, right
                    )));
                }
                if !left.is_compatible_with(right) {
                    return Err(CompileError::TypeError(format!(
                        "Cannot compare {} with {}",
                        left, right
                    )));
                }
                let ordering = !matches!(op, Operator::Eq | Operator::Ne);
                if ordering && (*left == TypeInfo::Boolean || *right == TypeInfo::Boolean) {
                    return Err(CompileError::TypeError(format!(
                        "Operator {} is not defined on bool",
                        op
                    )));
                }
                Ok(TypeInfo::Boolean)
            }

            // Logical operators require boolean operands
            Operator::And | Operator::Or => {
                if !left.is_boolean() {
                    return Err(CompileError::TypeError(format!(
                        "Left operand of {} must be bool, got {}",
                        op, left
                    )));
                }
                if !right.is_boolean() {
                    return Err(CompileError::TypeError(format!(
                        "Right operand of {} must be bool, got {}",
                        op, right
                    )));
                }
                Ok(TypeInfo::Boolean)
            }

            // Membership: right side must be an array of compatible elements
            Operator::In | Operator::NotIn => match right {
                TypeInfo::Array(element) if element.is_compatible_with(left) => {
                    Ok(TypeInfo::Boolean)
                }
                TypeInfo::Any => Ok(TypeInfo::Boolean),
                _ => Err(CompileError::TypeError(format!(
                    "Right operand of '{}' must be an array of {}, got {}",
                    op, left, right
                ))),
            },

            // String operators: require string operands
            Operator::Contains | Operator::StartsWith | Operator::EndsWith | Operator::Matches => {
                if !left.is_string() {
                    return Err(CompileError::TypeError(format!(
                        "Left operand of '{}' must be string, got {}",
                        op, left
                    )));
                }
                if !right.is_string() {
                    return Err(CompileError::TypeError(format!(
                        "Right operand of '{}' must be string, got {}",
                        op, right
                    )));
                }
                Ok(TypeInfo::Boolean)
            }
        }
    }

    /// Check if a unary operation is valid for the given type
    fn check_unary_operation(&self, op: &UnaryOperator, operand: &TypeInfo) -> Result<TypeInfo> {
        match op {
            UnaryOperator::Not => {
                if !operand.is_boolean() {
                    return Err(CompileError::TypeError(format!(
                        "Operand of '!' must be bool, got {}",
                        operand
                    )));
                }
                Ok(TypeInfo::Boolean)
            }
            UnaryOperator::Negate => {
                if !operand.is_numeric() {
                    return Err(CompileError::TypeError(format!(
                        "Operand of negation must be numeric, got {}",
                        operand
                    )));
                }
                Ok(TypeInfo::Number)
            }
        }
    }
}
