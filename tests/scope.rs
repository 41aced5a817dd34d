//! Tests for symbol visibility along flow edges.
mod common;
use common::*;
use logic_graph::analysis::SymbolOrigin;
use logic_graph::prelude::*;

fn names(function: &FunctionDefinition, id: &str) -> Vec<String> {
    ScopeResolver::visible_symbols(function, &StatementId::from(id))
        .into_iter()
        .map(|s| s.name)
        .collect()
}

#[test]
fn test_parameters_always_visible() {
    let function = create_checkout_function();
    assert_eq!(names(&function, "s-tax"), vec!["price", "taxRate"]);
}

#[test]
fn test_upstream_symbols_visible() {
    let function = create_checkout_function();
    assert_eq!(
        names(&function, "s-ret"),
        vec!["price", "taxRate", "total", "tax"]
    );
}

#[test]
fn test_downstream_symbols_not_visible() {
    let function = create_checkout_function();
    let visible = names(&function, "s-total");
    assert!(visible.contains(&"tax".to_string()));
    assert!(!visible.contains(&"total".to_string()));
}

#[test]
fn test_unconnected_statement_contributes_nothing() {
    let mut function = create_checkout_function();
    function
        .add_statement(var("s-loose", "loose", ValueSource::literal(1.0)))
        .unwrap();
    assert!(!names(&function, "s-ret").contains(&"loose".to_string()));
    assert_eq!(names(&function, "s-loose"), vec!["price", "taxRate"]);
}

#[test]
fn test_both_branches_of_diamond_visible() {
    let function = create_diamond_function();
    let visible = names(&function, "d");
    for symbol in ["seed", "x", "y", "z"] {
        assert!(visible.contains(&symbol.to_string()), "{} missing", symbol);
    }
    // Each name appears once even though `a` is reachable along two paths.
    assert_eq!(visible.len(), 4);
}

#[test]
fn test_origins_are_reported() {
    let function = create_checkout_function();
    let symbols = ScopeResolver::visible_symbols(&function, &StatementId::from("s-total"));

    assert_eq!(symbols[0], SymbolInfo::parameter("price"));
    let tax = symbols.iter().find(|s| s.name == "tax").unwrap();
    assert_eq!(tax.origin, SymbolOrigin::Statement(StatementId::from("s-tax")));
    assert_eq!(tax.origin.to_string(), "statement 's-tax'");
}

#[test]
fn test_shadowing_last_write_wins() {
    let mut function = FunctionDefinition::new("fn-1", "f");
    function.add_parameter("x").unwrap();
    function
        .add_statement(var("s1", "x", ValueSource::literal(1.0)))
        .unwrap();
    function
        .add_statement(Statement::returning("r", ValueSource::symbol_ref("x")))
        .unwrap();
    chain(&mut function, &["s1", "r"]);

    let symbols = ScopeResolver::visible_symbols(&function, &StatementId::from("r"));
    assert_eq!(symbols.len(), 1);
    assert_eq!(symbols[0].origin, SymbolOrigin::Statement(StatementId::from("s1")));
}

#[test]
fn test_unknown_statement_sees_parameters_only() {
    let function = create_checkout_function();
    assert_eq!(names(&function, "nowhere"), vec!["price", "taxRate"]);
}

#[test]
fn test_symbols_produced_by() {
    let logic = Statement::logic(
        "s1",
        vec![
            LogicAssignment::new("a", "1"),
            LogicAssignment::new("b", "a + 1"),
        ],
    );
    let produced = ScopeResolver::symbols_produced_by(&logic);
    assert_eq!(
        produced,
        vec![
            SymbolInfo::statement("a", StatementId::from("s1")),
            SymbolInfo::statement("b", StatementId::from("s1")),
        ]
    );
}
