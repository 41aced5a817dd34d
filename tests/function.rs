//! Tests for the function aggregate and its structural invariants.
mod common;
use common::*;
use logic_graph::prelude::*;

#[test]
fn test_add_and_remove_parameters() {
    let mut function = FunctionDefinition::new("fn-1", "f");
    let id = function.add_parameter("a").unwrap();
    function.add_parameter("b").unwrap();

    assert_eq!(id, ParamId::from("param:a"));
    assert_eq!(function.parameter_names(), vec!["a", "b"]);

    let removed = function.remove_parameter("a").unwrap();
    assert_eq!(removed.name, "a");
    assert_eq!(function.parameter_names(), vec!["b"]);
}

#[test]
fn test_parameter_name_rules() {
    let mut function = FunctionDefinition::new("fn-1", "f");
    function.add_parameter("a").unwrap();

    assert!(matches!(
        function.add_parameter("a"),
        Err(InvariantError::DuplicateParameter { .. })
    ));
    assert!(matches!(
        function.add_parameter("  "),
        Err(InvariantError::EmptyName { .. })
    ));
    assert!(matches!(
        function.remove_parameter("missing"),
        Err(InvariantError::ParameterNotFound { .. })
    ));
    assert_eq!(function.parameters().len(), 1);
}

#[test]
fn test_parameter_check_ignores_variables() {
    // Collisions between a parameter and a variable are a validation concern.
    let mut function = FunctionDefinition::new("fn-1", "f");
    function
        .add_statement(var("s1", "x", ValueSource::literal(1.0)))
        .unwrap();
    assert!(function.add_parameter("x").is_ok());
}

#[test]
fn test_rename_parameter_keeps_position_and_id() {
    let mut function = FunctionDefinition::new("fn-1", "f");
    let a = function.add_parameter("a").unwrap();
    function.add_parameter("b").unwrap();

    function.rename_parameter("a", "alpha").unwrap();
    assert_eq!(function.parameter_names(), vec!["alpha", "b"]);
    assert_eq!(function.parameter("alpha").unwrap().id, a);

    let err = function.rename_parameter("alpha", "b").unwrap_err();
    assert_eq!(err.code(), "INVARIANT_DUPLICATE_PARAMETER");
    assert_eq!(function.parameter_names(), vec!["alpha", "b"]);
}

#[test]
fn test_single_return_invariant_leaves_state_unchanged() {
    let mut function = FunctionDefinition::new("fn-1", "f");
    function
        .add_statement(Statement::returning("r1", ValueSource::literal(1.0)))
        .unwrap();
    let before = function.clone();

    let err = function
        .add_statement(Statement::returning("r2", ValueSource::literal(2.0)))
        .unwrap_err();

    assert_eq!(
        err,
        InvariantError::MultipleReturns {
            existing: StatementId::from("r1")
        }
    );
    assert_eq!(err.code(), "INVARIANT_MULTIPLE_RETURNS");
    assert_eq!(function, before);
}

#[test]
fn test_duplicate_statement_id_rejected() {
    let mut function = FunctionDefinition::new("fn-1", "f");
    function
        .add_statement(var("s1", "x", ValueSource::literal(1.0)))
        .unwrap();
    let err = function
        .add_statement(var("s1", "y", ValueSource::literal(2.0)))
        .unwrap_err();
    assert!(matches!(err, InvariantError::DuplicateStatement { .. }));
    assert_eq!(function.statement_count(), 1);
}

#[test]
fn test_replace_statement() {
    let mut function = FunctionDefinition::new("fn-1", "f");
    function
        .add_statement(var("s1", "x", ValueSource::literal(1.0)))
        .unwrap();
    function
        .add_statement(Statement::returning("r", ValueSource::symbol_ref("x")))
        .unwrap();

    function
        .replace_statement(var("s1", "x", ValueSource::literal(5.0)))
        .unwrap();
    // Replacing the return statement with another return is fine.
    function
        .replace_statement(Statement::returning("r", ValueSource::literal(0.0)))
        .unwrap();

    // Turning a variable into a second return is not.
    let err = function
        .replace_statement(Statement::returning("s1", ValueSource::literal(0.0)))
        .unwrap_err();
    assert!(matches!(err, InvariantError::MultipleReturns { .. }));

    let err = function
        .replace_statement(var("missing", "x", ValueSource::literal(0.0)))
        .unwrap_err();
    assert!(matches!(err, InvariantError::StatementNotFound { .. }));

    let ids: Vec<_> = function.statements().map(|s| s.id().to_string()).collect();
    assert_eq!(ids, vec!["s1", "r"]);
}

#[test]
fn test_connect_flow_checks() {
    let mut function = FunctionDefinition::new("fn-1", "f");
    function
        .add_statement(var("s1", "x", ValueSource::literal(1.0)))
        .unwrap();
    function
        .add_statement(var("s2", "y", ValueSource::literal(2.0)))
        .unwrap();
    let s1 = StatementId::from("s1");
    let s2 = StatementId::from("s2");
    let ghost = StatementId::from("ghost");

    let id = function.connect_flow(&s1, &s2, None).unwrap();
    assert_eq!(id, EdgeId::from("s1->s2"));

    assert!(matches!(
        function.connect_flow(&ghost, &s2, None),
        Err(InvariantError::MissingEndpoint { end: "source", .. })
    ));
    assert!(matches!(
        function.connect_flow(&s1, &ghost, None),
        Err(InvariantError::MissingEndpoint { end: "target", .. })
    ));
    assert!(matches!(
        function.connect_flow(&s1, &s1, None),
        Err(InvariantError::SelfEdge { .. })
    ));
    assert!(matches!(
        function.connect_flow(&s1, &s2, Some(EdgeId::from("other"))),
        Err(InvariantError::DuplicateEdge { .. })
    ));
    assert!(matches!(
        function.connect_flow(&s2, &s1, Some(EdgeId::from("s1->s2"))),
        Err(InvariantError::EdgeIdInUse { .. })
    ));
    assert_eq!(function.list_edges().len(), 1);
}

#[test]
fn test_connect_flow_accepts_cycles() {
    let mut function = FunctionDefinition::new("fn-1", "f");
    function
        .add_statement(var("s1", "x", ValueSource::literal(1.0)))
        .unwrap();
    function
        .add_statement(var("s2", "y", ValueSource::literal(2.0)))
        .unwrap();
    chain(&mut function, &["s1", "s2", "s1"]);
    assert_eq!(function.list_edges().len(), 2);
}

#[test]
fn test_remove_statement_cascades_edges() {
    let mut function = create_checkout_function();
    let removed = function.remove_statement(&StatementId::from("s-total"));

    assert!(removed.is_some());
    assert!(function.list_edges().is_empty());
    assert!(function.remove_statement(&StatementId::from("s-total")).is_none());
    assert_eq!(function.statement_count(), 2);
}

#[test]
fn test_disconnect_flow_is_lenient() {
    let mut function = create_checkout_function();
    let edge = EdgeId::from("s-tax->s-total");

    assert!(function.disconnect_flow(&edge).is_some());
    assert!(function.disconnect_flow(&edge).is_none());
    assert_eq!(function.list_edges().len(), 1);
}

#[test]
fn test_listings_are_copies() {
    let function = create_checkout_function();
    let mut statements = function.list_statements();
    statements.clear();
    let mut params = function.list_parameters();
    params.clear();

    assert_eq!(function.statement_count(), 3);
    assert_eq!(function.parameters().len(), 2);
    assert_eq!(
        function.get_statement(&StatementId::from("s-ret")).unwrap().kind_name(),
        "return"
    );
}

#[test]
fn test_edges_from_and_to() {
    let function = create_diamond_function();
    let a = StatementId::from("a");
    let d = StatementId::from("d");
    assert_eq!(function.edges_from(&a).count(), 2);
    assert_eq!(function.edges_to(&d).count(), 2);
    assert_eq!(function.edges_to(&a).count(), 0);
}

#[test]
fn test_statement_symbols() {
    let statement = Statement::variable(
        "s1",
        vec![
            VariableDeclaration::new("a", ValueSource::symbol_ref("p")),
            VariableDeclaration::new("b", ValueSource::expression("a + 1")),
        ],
    );
    assert_eq!(statement.produced_symbols(), vec!["a", "b"]);
    assert_eq!(statement.symbol_refs(), vec!["p"]);

    let logic = Statement::logic("s2", vec![LogicAssignment::new("c", "a * b")]);
    assert_eq!(logic.produced_symbols(), vec!["c"]);
    assert!(logic.symbol_refs().is_empty());
}
