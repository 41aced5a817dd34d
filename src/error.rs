use crate::ast::Value;
use crate::id::{
    ConnectionId, EdgeId, FunctionId, NodeInstanceId, NodeTypeId, PortId, StatementId,
};
use serde_json::json;
use thiserror::Error;

/// A structural rule of a single aggregate was violated.
///
/// Raised synchronously by the mutating call that attempted the violation. The
/// aggregate is left exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvariantError {
    #[error("{what} name must not be empty")]
    EmptyName { what: &'static str },

    #[error("Parameter \"{name}\" already exists")]
    DuplicateParameter { name: String },

    #[error("Parameter \"{name}\" does not exist")]
    ParameterNotFound { name: String },

    #[error("Statement '{id}' already exists")]
    DuplicateStatement { id: StatementId },

    #[error("Statement '{id}' does not exist")]
    StatementNotFound { id: StatementId },

    #[error("Function already has a return statement ('{existing}')")]
    MultipleReturns { existing: StatementId },

    #[error("Statement '{id}' is a {found} statement, expected a {expected} statement")]
    WrongStatementKind {
        id: StatementId,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Statement '{statement}' does not declare \"{name}\"")]
    DeclarationNotFound { statement: StatementId, name: String },

    #[error("Flow edge {end} statement '{statement}' does not exist")]
    MissingEndpoint {
        end: &'static str,
        statement: StatementId,
    },

    #[error("Statement '{statement}' cannot flow into itself")]
    SelfEdge { statement: StatementId },

    #[error("Flow edge '{from}' -> '{to}' already exists")]
    DuplicateEdge { from: StatementId, to: StatementId },

    #[error("Edge id '{id}' is already in use")]
    EdgeIdInUse { id: EdgeId },

    #[error("Node type '{type_id}' is already registered")]
    DuplicateNodeType { type_id: NodeTypeId },

    #[error("Node type '{type_id}' is not registered")]
    UnknownNodeType { type_id: NodeTypeId },

    #[error("Node '{id}' already exists")]
    DuplicateNode { id: NodeInstanceId },

    #[error("Node '{id}' does not exist")]
    NodeNotFound { id: NodeInstanceId },

    #[error("Node '{node}' has no port '{port}'")]
    PortNotFound { node: NodeInstanceId, port: PortId },

    #[error("Connection '{id}' already exists")]
    DuplicateConnection { id: ConnectionId },

    #[error("Cannot connect {from} to {to}: {reason}")]
    IncompatiblePorts {
        from: String,
        to: String,
        reason: String,
    },

    #[error("Function '{id}' does not exist")]
    FunctionNotFound { id: FunctionId },

    #[error("Function '{id}' already exists")]
    DuplicateFunction { id: FunctionId },

    #[error("A function named \"{name}\" already exists")]
    DuplicateFunctionName { name: String },
}

impl InvariantError {
    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            InvariantError::EmptyName { .. } => "INVARIANT_EMPTY_NAME",
            InvariantError::DuplicateParameter { .. } => "INVARIANT_DUPLICATE_PARAMETER",
            InvariantError::ParameterNotFound { .. } => "INVARIANT_PARAMETER_NOT_FOUND",
            InvariantError::DuplicateStatement { .. } => "INVARIANT_DUPLICATE_STATEMENT",
            InvariantError::StatementNotFound { .. } => "INVARIANT_STATEMENT_NOT_FOUND",
            InvariantError::MultipleReturns { .. } => "INVARIANT_MULTIPLE_RETURNS",
            InvariantError::WrongStatementKind { .. } => "INVARIANT_WRONG_STATEMENT_KIND",
            InvariantError::DeclarationNotFound { .. } => "INVARIANT_DECLARATION_NOT_FOUND",
            InvariantError::MissingEndpoint { .. } => "INVARIANT_MISSING_ENDPOINT",
            InvariantError::SelfEdge { .. } => "INVARIANT_SELF_EDGE",
            InvariantError::DuplicateEdge { .. } => "INVARIANT_DUPLICATE_EDGE",
            InvariantError::EdgeIdInUse { .. } => "INVARIANT_EDGE_ID_IN_USE",
            InvariantError::DuplicateNodeType { .. } => "INVARIANT_DUPLICATE_NODE_TYPE",
            InvariantError::UnknownNodeType { .. } => "INVARIANT_UNKNOWN_NODE_TYPE",
            InvariantError::DuplicateNode { .. } => "INVARIANT_DUPLICATE_NODE",
            InvariantError::NodeNotFound { .. } => "INVARIANT_NODE_NOT_FOUND",
            InvariantError::PortNotFound { .. } => "INVARIANT_PORT_NOT_FOUND",
            InvariantError::DuplicateConnection { .. } => "INVARIANT_DUPLICATE_CONNECTION",
            InvariantError::IncompatiblePorts { .. } => "INVARIANT_INCOMPATIBLE_PORTS",
            InvariantError::FunctionNotFound { .. } => "INVARIANT_FUNCTION_NOT_FOUND",
            InvariantError::DuplicateFunction { .. } => "INVARIANT_DUPLICATE_FUNCTION",
            InvariantError::DuplicateFunctionName { .. } => "INVARIANT_DUPLICATE_FUNCTION_NAME",
        }
    }

    /// Structured details for UI consumption, when the error carries any.
    pub fn details(&self) -> Option<serde_json::Value> {
        let details = match self {
            InvariantError::EmptyName { what } => json!({ "what": what }),
            InvariantError::DuplicateParameter { name }
            | InvariantError::ParameterNotFound { name }
            | InvariantError::DuplicateFunctionName { name } => json!({ "name": name }),
            InvariantError::DuplicateStatement { id } | InvariantError::StatementNotFound { id } => {
                json!({ "statement": id })
            }
            InvariantError::MultipleReturns { existing } => json!({ "existing": existing }),
            InvariantError::WrongStatementKind {
                id,
                expected,
                found,
            } => json!({ "statement": id, "expected": expected, "found": found }),
            InvariantError::DeclarationNotFound { statement, name } => {
                json!({ "statement": statement, "name": name })
            }
            InvariantError::MissingEndpoint { end, statement } => {
                json!({ "end": end, "statement": statement })
            }
            InvariantError::SelfEdge { statement } => json!({ "statement": statement }),
            InvariantError::DuplicateEdge { from, to } => json!({ "from": from, "to": to }),
            InvariantError::EdgeIdInUse { id } => json!({ "edge": id }),
            InvariantError::DuplicateNodeType { type_id }
            | InvariantError::UnknownNodeType { type_id } => json!({ "typeId": type_id }),
            InvariantError::DuplicateNode { id } | InvariantError::NodeNotFound { id } => {
                json!({ "node": id })
            }
            InvariantError::PortNotFound { node, port } => json!({ "node": node, "port": port }),
            InvariantError::DuplicateConnection { id } => json!({ "connection": id }),
            InvariantError::IncompatiblePorts { from, to, reason } => {
                json!({ "from": from, "to": to, "reason": reason })
            }
            InvariantError::FunctionNotFound { id } | InvariantError::DuplicateFunction { id } => {
                json!({ "function": id })
            }
        };
        Some(details)
    }
}

/// A whole-graph property was violated.
///
/// Only produced by explicitly running the planner or the validator; individual
/// mutations never raise it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Flow graph has a cycle")]
    Cycle { remaining: Vec<StatementId> },

    #[error("Duplicate parameter name \"{name}\"")]
    DuplicateParameterName { name: String },

    #[error("Duplicate variable name \"{name}\" in statement '{statement}' (already declared by {previous})")]
    DuplicateVariableName {
        name: String,
        statement: StatementId,
        previous: String,
    },

    #[error("Statement '{statement}' references \"{symbol}\", which is not in scope")]
    UnresolvedReference {
        statement: StatementId,
        symbol: String,
    },

    #[error("Statement '{statement}' has an invalid expression '{expression}': {message}")]
    InvalidExpression {
        statement: StatementId,
        expression: String,
        message: String,
    },
}

impl ValidationError {
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::Cycle { .. } => "VALIDATION_CYCLE",
            ValidationError::DuplicateParameterName { .. } => "VALIDATION_DUPLICATE_PARAMETER",
            ValidationError::DuplicateVariableName { .. } => "VALIDATION_DUPLICATE_VARIABLE",
            ValidationError::UnresolvedReference { .. } => "VALIDATION_UNRESOLVED_REFERENCE",
            ValidationError::InvalidExpression { .. } => "VALIDATION_INVALID_EXPRESSION",
        }
    }

    pub fn details(&self) -> Option<serde_json::Value> {
        let details = match self {
            ValidationError::Cycle { remaining } => json!({ "remaining": remaining }),
            ValidationError::DuplicateParameterName { name } => json!({ "name": name }),
            ValidationError::DuplicateVariableName {
                name,
                statement,
                previous,
            } => json!({ "name": name, "statement": statement, "previous": previous }),
            ValidationError::UnresolvedReference { statement, symbol } => {
                json!({ "statement": statement, "symbol": symbol })
            }
            ValidationError::InvalidExpression {
                statement,
                expression,
                message,
            } => json!({ "statement": statement, "expression": expression, "message": message }),
        };
        Some(details)
    }
}

/// Errors raised while evaluating a value source or expression.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    #[error("Unknown symbol: {0}")]
    UnknownSymbol(String),

    #[error("Unknown function: {0}()")]
    UnknownFunction(String),

    #[error("{function}() expects an array")]
    NotAnArray { function: String },

    #[error("{function}() array has no numeric items")]
    NoNumericItems { function: String },

    #[error("Invalid expression at offset {position}: {message}")]
    Parse { message: String, position: usize },

    #[error(
        "Type mismatch during operation '{operation}': expected {expected}, but found value '{found}'"
    )]
    TypeMismatch {
        operation: String,
        expected: String,
        found: Value,
    },
}

impl EvaluationError {
    pub fn code(&self) -> &'static str {
        match self {
            EvaluationError::UnknownSymbol(_) => "EVALUATION_UNKNOWN_SYMBOL",
            EvaluationError::UnknownFunction(_) => "EVALUATION_UNKNOWN_FUNCTION",
            EvaluationError::NotAnArray { .. } => "EVALUATION_NOT_AN_ARRAY",
            EvaluationError::NoNumericItems { .. } => "EVALUATION_NO_NUMERIC_ITEMS",
            EvaluationError::Parse { .. } => "EVALUATION_PARSE",
            EvaluationError::TypeMismatch { .. } => "EVALUATION_TYPE_MISMATCH",
        }
    }
}

/// Errors raised while converting a function to or from its snapshot form.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SnapshotError {
    #[error("Failed to parse snapshot JSON: {0}")]
    Json(String),

    #[error("Unsupported snapshot version {found}")]
    UnsupportedVersion { found: u32 },

    #[error("Snapshot violates a function invariant: {0}")]
    Invariant(#[from] InvariantError),
}

/// Umbrella over every error the engine can surface to an embedding application.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error(transparent)]
    Invariant(#[from] InvariantError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}

impl DomainError {
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::Invariant(e) => e.code(),
            DomainError::Validation(e) => e.code(),
            DomainError::Evaluation(e) => e.code(),
        }
    }

    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            DomainError::Invariant(e) => e.details(),
            DomainError::Validation(e) => e.details(),
            DomainError::Evaluation(_) => None,
        }
    }
}
