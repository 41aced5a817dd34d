//! Tests for whole-function validation.
mod common;
use common::*;
use logic_graph::prelude::*;

fn strict() -> FunctionValidator {
    FunctionValidator::builder()
        .check_expression_references(true)
        .build()
}

#[test]
fn test_valid_function_passes() {
    let mut function = create_checkout_function();
    function
        .replace_statement(Statement::returning("s-ret", ValueSource::symbol_ref("total")))
        .unwrap();
    assert!(FunctionValidator::new().validate(&function).is_ok());
    assert!(strict().validate(&function).is_ok());
}

#[test]
fn test_cycle_is_reported_first() {
    let mut function = FunctionDefinition::new("fn-1", "f");
    function
        .add_statement(var("s1", "x", ValueSource::literal(1.0)))
        .unwrap();
    function
        .add_statement(var("s2", "x", ValueSource::literal(2.0)))
        .unwrap();
    chain(&mut function, &["s1", "s2", "s1"]);

    let err = FunctionValidator::new().validate(&function).unwrap_err();
    assert!(matches!(err, ValidationError::Cycle { .. }));
}

#[test]
fn test_duplicate_variable_name_rejected() {
    let mut function = FunctionDefinition::new("fn-1", "f");
    function
        .add_statement(var("s1", "x", ValueSource::literal(1.0)))
        .unwrap();
    function
        .add_statement(var("s2", "x", ValueSource::literal(2.0)))
        .unwrap();

    let err = FunctionValidator::new().validate(&function).unwrap_err();
    assert!(err.to_string().contains("\"x\""));
    match err {
        ValidationError::DuplicateVariableName {
            name,
            statement,
            previous,
        } => {
            assert_eq!(name, "x");
            assert_eq!(statement, StatementId::from("s2"));
            assert_eq!(previous, "statement 's1'");
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_variable_colliding_with_parameter() {
    let mut function = FunctionDefinition::new("fn-1", "f");
    function.add_parameter("x").unwrap();
    function
        .add_statement(Statement::logic("s1", vec![LogicAssignment::new("x", "1")]))
        .unwrap();

    let err = FunctionValidator::new().validate(&function).unwrap_err();
    assert_eq!(err.code(), "VALIDATION_DUPLICATE_VARIABLE");
    assert!(err.to_string().contains("parameter"));
}

#[test]
fn test_unresolved_reference() {
    let function = create_checkout_function();
    let err = FunctionValidator::new().validate(&function).unwrap_err();
    assert_eq!(
        err,
        ValidationError::UnresolvedReference {
            statement: StatementId::from("s-ret"),
            symbol: "discountedTotal".to_string(),
        }
    );
    assert_eq!(
        err.details().unwrap()["symbol"],
        serde_json::json!("discountedTotal")
    );
}

#[test]
fn test_reference_needs_flow_path() {
    let mut function = FunctionDefinition::new("fn-1", "f");
    function
        .add_statement(var("s1", "x", ValueSource::literal(1.0)))
        .unwrap();
    function
        .add_statement(Statement::returning("r", ValueSource::symbol_ref("x")))
        .unwrap();

    // Without an edge, `x` is not in scope for the return.
    assert!(matches!(
        FunctionValidator::new().validate(&function),
        Err(ValidationError::UnresolvedReference { .. })
    ));

    chain(&mut function, &["s1", "r"]);
    assert!(FunctionValidator::new().validate(&function).is_ok());
}

#[test]
fn test_expression_references_unchecked_by_default() {
    let mut function = FunctionDefinition::new("fn-1", "f");
    function
        .add_statement(var("s1", "x", ValueSource::expression("ghost + 1")))
        .unwrap();
    function
        .add_statement(Statement::logic("s2", vec![LogicAssignment::new("y", "phantom * 2")]))
        .unwrap();

    assert!(FunctionValidator::new().validate(&function).is_ok());
    assert!(matches!(
        strict().validate(&function),
        Err(ValidationError::UnresolvedReference { symbol, .. }) if symbol == "ghost"
    ));
}

#[test]
fn test_strict_mode_checks_logic_assignments() {
    let mut function = FunctionDefinition::new("fn-1", "f");
    function.add_parameter("a").unwrap();
    function
        .add_statement(Statement::logic(
            "s1",
            vec![
                LogicAssignment::new("b", "a * 2"),
                // Earlier outputs of the same statement are in scope.
                LogicAssignment::new("c", "b + sum([a, b])"),
            ],
        ))
        .unwrap();
    assert!(strict().validate(&function).is_ok());

    function
        .replace_statement(Statement::logic("s1", vec![LogicAssignment::new("b", "c + 1")]))
        .unwrap();
    let err = strict().validate(&function).unwrap_err();
    assert!(matches!(err, ValidationError::UnresolvedReference { symbol, .. } if symbol == "c"));
}

#[test]
fn test_strict_mode_reports_parse_errors() {
    let mut function = FunctionDefinition::new("fn-1", "f");
    function
        .add_statement(Statement::logic("s1", vec![LogicAssignment::new("b", "1 +* 2")]))
        .unwrap();

    let err = strict().validate(&function).unwrap_err();
    assert_eq!(err.code(), "VALIDATION_INVALID_EXPRESSION");
    assert!(FunctionValidator::new().validate(&function).is_ok());
}
