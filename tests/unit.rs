//! Unit tests for ids, values, sources, expressions and error codes.
mod common;
use logic_graph::evaluator::{coerce_number, coerce_number_or_null};
use logic_graph::prelude::*;

#[test]
fn test_value_display() {
    assert_eq!(format!("{}", Value::Number(42.0)), "42");
    assert_eq!(format!("{}", Value::Number(2.5)), "2.5");
    assert_eq!(format!("{}", Value::Bool(true)), "true");
    assert_eq!(format!("{}", Value::Null), "null");
    assert_eq!(format!("{}", Value::from(vec![1.0, 2.0])), "1,2");
    assert_eq!(format!("{}", Value::Number(f64::INFINITY)), "Infinity");
    assert_eq!(format!("{}", Value::Number(f64::NEG_INFINITY)), "-Infinity");
    assert_eq!(format!("{}", Value::Number(f64::NAN)), "NaN");
}

#[test]
fn test_value_source_display() {
    assert_eq!(ValueSource::literal("hi").to_string(), "\"hi\"");
    assert_eq!(ValueSource::literal(3.0).to_string(), "3");
    assert_eq!(ValueSource::symbol_ref("price").to_string(), "$price");
    assert_eq!(ValueSource::expression("a + 1").to_string(), "=a + 1");
}

#[test]
fn test_value_source_json_shape() {
    let json = serde_json::to_value(ValueSource::symbol_ref("x")).unwrap();
    assert_eq!(json, serde_json::json!({ "kind": "symbolRef", "name": "x" }));

    let parsed: ValueSource =
        serde_json::from_str(r#"{ "kind": "literal", "value": [1, "a", null] }"#).unwrap();
    assert_eq!(
        parsed,
        ValueSource::literal(vec![Value::Number(1.0), Value::from("a"), Value::Null])
    );
}

#[test]
fn test_numeric_coercion() {
    assert_eq!(coerce_number(&Value::Number(1.5)), Some(1.5));
    assert_eq!(coerce_number(&Value::from(" 7 ")), Some(7.0));
    assert_eq!(coerce_number(&Value::Bool(false)), Some(0.0));
    assert_eq!(coerce_number(&Value::from("")), None);
    assert_eq!(coerce_number(&Value::from("inf")), None);
    assert_eq!(coerce_number_or_null(&Value::from("x")), Value::Null);
    assert_eq!(coerce_number_or_null(&Value::Null), Value::Null);
}

#[test]
fn test_ids_are_distinct_types_over_strings() {
    let stmt = StatementId::from("s1");
    assert_eq!(stmt.as_str(), "s1");
    assert_eq!(stmt.to_string(), "s1");
    assert_eq!(serde_json::to_string(&stmt).unwrap(), "\"s1\"");
    assert_eq!(EdgeId::new(String::from("e")).into_inner(), "e");
}

#[test]
fn test_sequential_id_generator() {
    let ids = SequentialIdGenerator::new();
    assert_eq!(ids.generate("stmt"), "stmt-1");
    assert_eq!(ids.generate("edge"), "edge-2");
}

#[test]
fn test_uuid_generator() {
    let ids = UuidGenerator;
    let a = ids.generate("stmt");
    let b = ids.generate("stmt");
    assert_eq!(a.len(), 36);
    assert_ne!(a, b);
}

#[test]
fn test_expression_display_round_trips_precedence() {
    for source in [
        "a + b * c",
        "(a + b) * c",
        "2 ** 3 ** 2",
        "(2 ** 3) ** 2",
        "-x + sum([1, 2])",
        "a > 1 ? \"yes\" : \"no\"",
        "xs[0].length",
    ] {
        let parsed = ExpressionEvaluator::parse(source).unwrap();
        assert_eq!(parsed.to_string(), source);
    }
}

#[test]
fn test_error_codes_and_details() {
    let err = InvariantError::SelfEdge {
        statement: StatementId::from("s1"),
    };
    assert_eq!(err.code(), "INVARIANT_SELF_EDGE");
    assert_eq!(
        err.details(),
        Some(serde_json::json!({ "statement": "s1" }))
    );

    let domain: DomainError = err.into();
    assert_eq!(domain.code(), "INVARIANT_SELF_EDGE");
    assert_eq!(domain.to_string(), "Statement 's1' cannot flow into itself");

    let domain: DomainError = EvaluationError::UnknownSymbol("q".into()).into();
    assert_eq!(domain.code(), "EVALUATION_UNKNOWN_SYMBOL");
    assert!(domain.details().is_none());
}
