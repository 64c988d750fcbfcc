//! Unit tests for AST and data model types
//!
//! Tests the shared structures that travel between compiler, runtime and SDK.

use flowclass_core::ast::*;
use flowclass_core::*;

// =============================================================================
// Expression Tests
// =============================================================================

#[test]
fn test_guarded_capability_tree() {
    let expr = Expression::binary(
        Expression::binary(
            Expression::field_access(vec!["Exporter".to_string(), "Name".to_string()]),
            Operator::Eq,
            Expression::string("edge1"),
        ),
        Operator::And,
        Expression::function_call("classify".to_string(), vec![Expression::string("core")]),
    );

    match &expr {
        Expression::Binary { left, op, right } => {
            assert_eq!(*op, Operator::And);
            assert!(matches!(**left, Expression::Binary { op: Operator::Eq, .. }));
            match &**right {
                Expression::FunctionCall { name, args } => {
                    assert_eq!(name, "classify");
                    assert_eq!(args[0].as_string_literal(), Some("core"));
                }
                _ => panic!("Expected function call"),
            }
        }
        _ => panic!("Expected binary expression"),
    }
}

#[test]
fn test_expression_serde() -> anyhow::Result<()> {
    let expr = Expression::ternary(
        Expression::literal(Value::Bool(true)),
        Expression::function_call("classifyExternal".to_string(), vec![]),
        Expression::unary(
            UnaryOperator::Not,
            Expression::function_call("classifyInternal".to_string(), vec![]),
        ),
    );

    let json = serde_json::to_string(&expr)?;
    let back: Expression = serde_json::from_str(&json)?;
    assert_eq!(back, expr);
    Ok(())
}

// =============================================================================
// Data Model Tests
// =============================================================================

#[test]
fn test_interface_fields_exposed_to_rules() -> anyhow::Result<()> {
    let interface = InterfaceInfo::new("et-0/0/0", "Transit: Cogent", 100_000);
    assert_eq!(interface.field("Name")?, Value::from("et-0/0/0"));
    assert_eq!(interface.field("Speed")?, Value::Number(100_000.0));
    assert_eq!(
        interface.field("Vlan"),
        Err(CoreError::FieldNotFound("Interface.Vlan".to_string()))
    );
    Ok(())
}

#[test]
fn test_classification_set_once() {
    let mut classification = InterfaceClassification::new();
    assert!(classification.is_empty());

    assert!(classification.set_connectivity("transit".to_string()));
    assert!(!classification.set_connectivity("pni".to_string()));
    assert!(classification.set_boundary(Boundary::Internal));
    assert!(!classification.set_boundary(Boundary::External));
    assert!(!classification.is_complete());

    assert!(classification.set_provider("cogent".to_string()));
    assert!(classification.is_complete());
    assert_eq!(classification.connectivity, "transit");
    assert_eq!(classification.boundary, Boundary::Internal);
}

#[test]
fn test_boundary_serde() -> anyhow::Result<()> {
    assert_eq!(serde_json::to_string(&Boundary::External)?, r#""external""#);
    let boundary: Boundary = serde_json::from_str(r#""internal""#)?;
    assert_eq!(boundary, Boundary::Internal);
    assert_eq!(Boundary::default(), Boundary::Undefined);
    Ok(())
}

#[test]
fn test_schema_kind_serde() -> anyhow::Result<()> {
    assert_eq!(serde_json::to_string(&SchemaKind::Interface)?, r#""interface""#);
    let kind: SchemaKind = serde_json::from_str(r#""exporter""#)?;
    assert_eq!(kind, SchemaKind::Exporter);
    Ok(())
}
