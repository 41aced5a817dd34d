//! Tests for value sources and the expression language.
mod common;
use common::*;
use logic_graph::prelude::*;

fn eval(expr: &str, scope: &Scope) -> Result<Value, EvaluationError> {
    ExpressionEvaluator::new().evaluate(&ValueSource::expression(expr), scope)
}

fn numbers() -> Scope {
    scope(&[(
        "xs",
        Value::from(vec![1.0, 2.0, 3.0, 4.0]),
    )])
}

#[test]
fn test_literal_passthrough() {
    let evaluator = ExpressionEvaluator::new();
    let value = Value::from(vec![Value::from("a"), Value::Null, Value::Bool(true)]);
    let result = evaluator
        .evaluate(&ValueSource::literal(value.clone()), &Scope::new())
        .unwrap();
    assert_eq!(result, value);
}

#[test]
fn test_symbol_lookup() {
    let evaluator = ExpressionEvaluator::new();
    let scope = scope(&[("a", Value::Number(3.0))]);

    assert_eq!(
        evaluator
            .evaluate(&ValueSource::symbol_ref("a"), &scope)
            .unwrap(),
        Value::Number(3.0)
    );
    let err = evaluator
        .evaluate(&ValueSource::symbol_ref("b"), &scope)
        .unwrap_err();
    assert_eq!(err.to_string(), "Unknown symbol: b");
}

#[test]
fn test_aggregate_helpers() {
    let scope = numbers();
    assert_eq!(eval("sum(xs)", &scope).unwrap(), Value::Number(10.0));
    assert_eq!(eval("avg(xs)", &scope).unwrap(), Value::Number(2.5));
    assert_eq!(eval("max(xs)", &scope).unwrap(), Value::Number(4.0));
    assert_eq!(eval("min(xs)", &scope).unwrap(), Value::Number(1.0));
}

#[test]
fn test_helper_on_empty_array() {
    let err = eval("max([])", &Scope::new()).unwrap_err();
    assert_eq!(err.to_string(), "max() array has no numeric items");
    assert_eq!(err.code(), "EVALUATION_NO_NUMERIC_ITEMS");
}

#[test]
fn test_helper_requires_array() {
    let scope = scope(&[("n", Value::Number(1.0))]);
    let err = eval("sum(n)", &scope).unwrap_err();
    assert_eq!(err.to_string(), "sum() expects an array");
}

#[test]
fn test_helpers_coerce_items() {
    let scope = scope(&[(
        "mixed",
        Value::from(vec![
            Value::from("2"),
            Value::Bool(true),
            Value::from("abc"),
            Value::Null,
            Value::Number(3.0),
        ]),
    )]);
    assert_eq!(eval("sum(mixed)", &scope).unwrap(), Value::Number(6.0));
    assert_eq!(eval("avg(mixed)", &scope).unwrap(), Value::Number(2.0));
}

#[test]
fn test_unknown_function_rejected() {
    let scope = numbers();
    let err = eval("eval(xs)", &scope).unwrap_err();
    assert!(matches!(err, EvaluationError::UnknownFunction(name) if name == "eval"));
}

#[test]
fn test_arithmetic_and_precedence() {
    let scope = scope(&[("a", Value::Number(2.0)), ("b", Value::Number(3.0))]);
    assert_eq!(eval("a + b * 4", &scope).unwrap(), Value::Number(14.0));
    assert_eq!(eval("(a + b) * 4", &scope).unwrap(), Value::Number(20.0));
    assert_eq!(eval("2 ** 3 ** 2", &scope).unwrap(), Value::Number(512.0));
    assert_eq!(eval("-a + 10 % 4", &scope).unwrap(), Value::Number(0.0));
}

#[test]
fn test_string_concatenation() {
    let scope = scope(&[("name", Value::from("Ada")), ("n", Value::Number(2.0))]);
    assert_eq!(
        eval("'hi ' + name + n", &scope).unwrap(),
        Value::from("hi Ada2")
    );
}

#[test]
fn test_comparison_and_logic() {
    let scope = scope(&[("a", Value::Number(2.0)), ("s", Value::from("b"))]);
    assert_eq!(eval("a > 1 && a <= 2", &scope).unwrap(), Value::Bool(true));
    assert_eq!(eval("s < 'c'", &scope).unwrap(), Value::Bool(true));
    assert_eq!(eval("a == '2'", &scope).unwrap(), Value::Bool(true));
    assert_eq!(eval("a === '2'", &scope).unwrap(), Value::Bool(false));
    // Logical operators yield the deciding operand.
    assert_eq!(eval("0 || s", &scope).unwrap(), Value::from("b"));
    assert_eq!(eval("a > 5 ? 'big' : 'small'", &scope).unwrap(), Value::from("small"));
}

#[test]
fn test_short_circuit_skips_unknown_symbols() {
    assert_eq!(eval("false && missing", &Scope::new()).unwrap(), Value::Bool(false));
    assert!(eval("true && missing", &Scope::new()).is_err());
}

#[test]
fn test_member_and_index_access() {
    let scope = numbers();
    assert_eq!(eval("xs.length", &scope).unwrap(), Value::Number(4.0));
    assert_eq!(eval("xs[1]", &scope).unwrap(), Value::Number(2.0));
    assert_eq!(eval("xs[10]", &scope).unwrap(), Value::Null);
}

#[test]
fn test_parse_errors() {
    let err = eval("1 +", &Scope::new()).unwrap_err();
    assert!(matches!(err, EvaluationError::Parse { .. }));
    assert!(matches!(
        eval("", &Scope::new()),
        Err(EvaluationError::Parse { .. })
    ));
    assert!(matches!(
        eval("a = 1", &Scope::new()),
        Err(EvaluationError::Parse { .. })
    ));
}

#[test]
fn test_nesting_within_limits_evaluates() {
    let nested = format!("{}1{}", "(".repeat(20), ")".repeat(20));
    assert_eq!(eval(&nested, &Scope::new()).unwrap(), Value::Number(1.0));

    let chain = vec!["1"; 100].join(" + ");
    assert_eq!(eval(&chain, &Scope::new()).unwrap(), Value::Number(100.0));
}

#[test]
fn test_deep_nesting_is_a_parse_error() {
    let too_deep = |expr: &str| {
        matches!(
            eval(expr, &Scope::new()),
            Err(EvaluationError::Parse { ref message, .. }) if message == "expression nested too deeply"
        )
    };

    for depth in [100, 1000, 10_000] {
        let nested = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
        assert!(too_deep(&nested), "{} parentheses", depth);
        let arrays = format!("{}1{}", "[".repeat(depth), "]".repeat(depth));
        assert!(too_deep(&arrays), "{} brackets", depth);
    }
    assert!(too_deep(&vec!["1"; 2000].join("+")));
    assert!(too_deep(&format!("{}x", "-".repeat(200_000))));
    assert!(too_deep(&format!("a{}", ".b".repeat(1000))));
    assert!(too_deep(&vec!["a ? 1"; 100].join(" : ")));
}

#[test]
fn test_infinity_concatenates_like_host_scripts() {
    assert_eq!(eval("'a' + 1 / 0", &Scope::new()).unwrap(), Value::from("aInfinity"));
    assert_eq!(eval("'a' + -1 / 0", &Scope::new()).unwrap(), Value::from("a-Infinity"));
}

#[test]
fn test_evaluation_is_deterministic() {
    let scope = scope(&[("a", Value::Number(7.0)), ("b", Value::from("x"))]);
    let expr = "a * 2 + sum([a, 1]) + b";
    let first = eval(expr, &scope).unwrap();
    for _ in 0..10 {
        assert_eq!(eval(expr, &scope).unwrap(), first);
    }
}

#[test]
fn test_free_symbols_exclude_callees() {
    let expr = ExpressionEvaluator::parse("sum(items) + tax * rate.value").unwrap();
    let symbols: Vec<_> = expr.free_symbols().into_iter().collect();
    assert_eq!(symbols, vec!["items", "tax", "rate"]);
}
