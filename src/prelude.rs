//! Prelude module for convenient imports
//!
//! Re-exports the types most embedding code needs: the function model, the
//! analyses, the façades, the node/port graph and the error types.
//!
//! ```rust
//! use logic_graph::prelude::*;
//!
//! let mut function = FunctionDefinition::new("fn-1", "demo");
//! function.add_parameter("x").unwrap();
//! assert_eq!(function.parameter_names(), vec!["x".to_string()]);
//! ```

// Identifiers
pub use crate::id::{
    ConnectionId, EdgeId, FunctionId, IdGenerator, NodeInstanceId, NodeTypeId, ParamId, PortId,
    SequentialIdGenerator, StatementId, UuidGenerator,
};

// Values, sources and expressions
pub use crate::ast::{Expression, Value, ValueSource};
pub use crate::evaluator::{ExpressionEvaluator, Scope};

// Function model
pub use crate::function::{
    FlowEdge, FunctionDefinition, FunctionParameter, LogicAssignment, Statement,
    VariableDeclaration,
};

// Analyses
pub use crate::analysis::{ExecutionPlanner, FunctionValidator, ScopeResolver, SymbolInfo};

// Façades
pub use crate::store::{
    FunctionEditor, FunctionInspector, FunctionService, FunctionSnapshot, FunctionStore,
    FunctionWorkspace, RuntimeValues,
};

// Node/port graph
pub use crate::graph::{
    LogicConnection, LogicGraph, LogicGraphService, LogicPortDefinition, NodeDefinition,
    NodeDefinitionRegistry, NodeInstance, PortChannel, PortKind,
};

// Error types
pub use crate::error::{
    DomainError, EvaluationError, InvariantError, SnapshotError, ValidationError,
};
