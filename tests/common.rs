//! Common test utilities for building functions, scopes and graphs.
use logic_graph::prelude::*;
use std::sync::Arc;

/// A variable statement declaring a single symbol.
#[allow(dead_code)]
pub fn var(id: &str, name: &str, source: ValueSource) -> Statement {
    Statement::variable(id, vec![VariableDeclaration::new(name, source)])
}

/// Connects the given statements in a straight line, `a -> b -> c ...`.
#[allow(dead_code)]
pub fn chain(function: &mut FunctionDefinition, ids: &[&str]) {
    for pair in ids.windows(2) {
        function
            .connect_flow(&StatementId::from(pair[0]), &StatementId::from(pair[1]), None)
            .unwrap();
    }
}

/// Builds a scope from `(name, value)` pairs.
#[allow(dead_code)]
pub fn scope(pairs: &[(&str, Value)]) -> Scope {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

/// The checkout function used across the tests:
///
/// ```text
/// params: price, taxRate
/// s-tax:   tax   = price * taxRate
/// s-total: total = price + tax
/// s-ret:   return discountedTotal   (never declared)
/// s-tax -> s-total -> s-ret
/// ```
#[allow(dead_code)]
pub fn create_checkout_function() -> FunctionDefinition {
    let mut function = FunctionDefinition::new("fn-checkout", "checkout");
    function.add_parameter("price").unwrap();
    function.add_parameter("taxRate").unwrap();
    function
        .add_statement(var("s-tax", "tax", ValueSource::expression("price * taxRate")))
        .unwrap();
    function
        .add_statement(var("s-total", "total", ValueSource::expression("price + tax")))
        .unwrap();
    function
        .add_statement(Statement::returning(
            "s-ret",
            ValueSource::symbol_ref("discountedTotal"),
        ))
        .unwrap();
    chain(&mut function, &["s-tax", "s-total", "s-ret"]);
    function
}

/// Inputs matching [`create_checkout_function`]: price 100, taxRate 0.08.
#[allow(dead_code)]
pub fn checkout_inputs() -> Scope {
    scope(&[
        ("price", Value::Number(100.0)),
        ("taxRate", Value::Number(0.08)),
    ])
}

/// A function whose statements form the diamond `a -> {b, c} -> d`.
#[allow(dead_code)]
pub fn create_diamond_function() -> FunctionDefinition {
    let mut function = FunctionDefinition::new("fn-diamond", "diamond");
    function.add_parameter("seed").unwrap();
    function
        .add_statement(var("a", "x", ValueSource::symbol_ref("seed")))
        .unwrap();
    function
        .add_statement(var("b", "y", ValueSource::expression("x + 1")))
        .unwrap();
    function
        .add_statement(var("c", "z", ValueSource::expression("x * 2")))
        .unwrap();
    function
        .add_statement(Statement::returning("d", ValueSource::expression("y + z")))
        .unwrap();
    chain(&mut function, &["a", "b", "d"]);
    chain(&mut function, &["a", "c", "d"]);
    function
}

/// A function service minting deterministic ids.
#[allow(dead_code)]
pub fn create_service(name: &str) -> FunctionService {
    FunctionService::new(FunctionDefinition::new("fn-1", name))
        .with_id_generator(Arc::new(SequentialIdGenerator::new()))
}

/// A graph service over the built-in node catalogue, minting deterministic ids.
#[allow(dead_code)]
pub fn create_graph_service() -> LogicGraphService {
    LogicGraphService::builder(Arc::new(NodeDefinitionRegistry::with_builtins()))
        .id_generator(Arc::new(SequentialIdGenerator::new()))
        .build()
}
