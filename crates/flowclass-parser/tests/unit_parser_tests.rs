//! Parser tests on complete classifier rules
//!
//! The rules below are the shapes operators actually write.

use flowclass_core::ast::*;
use flowclass_core::Value;
use flowclass_parser::*;

fn call(name: &str, args: Vec<Expression>) -> Expression {
    Expression::function_call(name.to_string(), args)
}

fn field(variable: &str, name: &str) -> Expression {
    Expression::field_access(vec![variable.to_string(), name.to_string()])
}

// =============================================================================
// Accepted rules
// =============================================================================

#[test]
fn test_parse_transit_rule() {
    let expr = ExpressionParser::parse(
        r#"Interface.Description startsWith "Transit:" && classifyConnectivity("transit") && classifyExternal()"#,
    )
    .unwrap();

    let expected = Expression::binary(
        Expression::binary(
            Expression::binary(
                field("Interface", "Description"),
                Operator::StartsWith,
                Expression::string("Transit:"),
            ),
            Operator::And,
            call("classifyConnectivity", vec![Expression::string("transit")]),
        ),
        Operator::And,
        call("classifyExternal", vec![]),
    );
    assert_eq!(expr, expected);
}

#[test]
fn test_parse_regex_capability_with_escapes() {
    let expr = ExpressionParser::parse(
        r#"classifyProviderRegex(Interface.Description, "^GigabitEthernet(\\d+)$", "eth$1")"#,
    )
    .unwrap();

    assert_eq!(
        expr,
        call(
            "classifyProviderRegex",
            vec![
                field("Interface", "Description"),
                Expression::string(r"^GigabitEthernet(\d+)$"),
                Expression::string("eth$1"),
            ]
        )
    );
}

#[test]
fn test_raw_string_pattern() {
    let expr = ExpressionParser::parse(r#"Exporter.Name matches `^edge\d+$`"#).unwrap();
    assert_eq!(
        expr,
        Expression::binary(
            field("Exporter", "Name"),
            Operator::Matches,
            Expression::string(r"^edge\d+$"),
        )
    );
}

#[test]
fn test_fallback_with_keywords() {
    let expr = ExpressionParser::parse(
        r#"Interface.Name startsWith "lo" or not classifyInternal()"#,
    )
    .unwrap();
    assert_eq!(
        expr,
        Expression::binary(
            Expression::binary(
                field("Interface", "Name"),
                Operator::StartsWith,
                Expression::string("lo"),
            ),
            Operator::Or,
            Expression::unary(UnaryOperator::Not, call("classifyInternal", vec![])),
        )
    );
}

#[test]
fn test_speed_threshold() {
    let expr = ExpressionParser::parse("Interface.Speed >= 10_000").unwrap();
    assert_eq!(
        expr,
        Expression::binary(
            field("Interface", "Speed"),
            Operator::Ge,
            Expression::literal(Value::Number(10000.0)),
        )
    );
}

// =============================================================================
// Rejected rules
// =============================================================================

#[test]
fn test_error_positions() {
    match ExpressionParser::parse(r#"classify("core") &&"#) {
        Err(ParseError::UnexpectedEnd { .. }) => {}
        other => panic!("unexpected result: {:?}", other),
    }

    match ExpressionParser::parse(r#"classify("core" "edge")"#) {
        Err(ParseError::UnexpectedToken { position, .. }) => assert_eq!(position, 16),
        other => panic!("unexpected result: {:?}", other),
    }

    match ExpressionParser::parse(r#"Exporter.Name == "edge1"#) {
        Err(ParseError::UnterminatedString { position }) => assert_eq!(position, 17),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_error_messages() {
    let err = ExpressionParser::parse("classify(").unwrap_err();
    assert!(err.to_string().starts_with("Unexpected end of expression"));
}
