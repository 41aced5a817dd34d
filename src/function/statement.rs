use crate::ast::ValueSource;
use crate::id::StatementId;
use serde::{Deserialize, Serialize};

/// One named symbol introduced by a variable statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDeclaration {
    pub name: String,
    pub source: ValueSource,
}

impl VariableDeclaration {
    pub fn new(name: impl Into<String>, source: ValueSource) -> Self {
        Self {
            name: name.into(),
            source,
        }
    }
}

/// Single-assignment form used by logic statements: `output = expression`.
///
/// The expression is kept as raw text and goes through the expression parser
/// only when evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicAssignment {
    pub output: String,
    pub expression: String,
}

impl LogicAssignment {
    pub fn new(output: impl Into<String>, expression: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            expression: expression.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableStatement {
    pub id: StatementId,
    pub declarations: Vec<VariableDeclaration>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicStatement {
    pub id: StatementId,
    pub assignments: Vec<LogicAssignment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnStatement {
    pub id: StatementId,
    pub source: ValueSource,
}

/// A node of a function body's flow graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Statement {
    Variable(VariableStatement),
    Logic(LogicStatement),
    /// Terminal statement producing the function's result. At most one per function.
    Return(ReturnStatement),
}

impl Statement {
    pub fn variable(id: impl Into<StatementId>, declarations: Vec<VariableDeclaration>) -> Self {
        Statement::Variable(VariableStatement {
            id: id.into(),
            declarations,
        })
    }

    pub fn logic(id: impl Into<StatementId>, assignments: Vec<LogicAssignment>) -> Self {
        Statement::Logic(LogicStatement {
            id: id.into(),
            assignments,
        })
    }

    pub fn returning(id: impl Into<StatementId>, source: ValueSource) -> Self {
        Statement::Return(ReturnStatement {
            id: id.into(),
            source,
        })
    }

    pub fn id(&self) -> &StatementId {
        match self {
            Statement::Variable(s) => &s.id,
            Statement::Logic(s) => &s.id,
            Statement::Return(s) => &s.id,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Statement::Variable(_) => "variable",
            Statement::Logic(_) => "logic",
            Statement::Return(_) => "return",
        }
    }

    pub fn is_return(&self) -> bool {
        matches!(self, Statement::Return(_))
    }

    /// Names of the symbols this statement introduces, in declaration order.
    pub fn produced_symbols(&self) -> Vec<&str> {
        match self {
            Statement::Variable(s) => s.declarations.iter().map(|d| d.name.as_str()).collect(),
            Statement::Logic(s) => s.assignments.iter().map(|a| a.output.as_str()).collect(),
            Statement::Return(_) => Vec::new(),
        }
    }

    /// Every value source carried by the statement.
    ///
    /// Logic assignments hold raw expression text rather than sources and are
    /// not included.
    pub fn value_sources(&self) -> Vec<&ValueSource> {
        match self {
            Statement::Variable(s) => s.declarations.iter().map(|d| &d.source).collect(),
            Statement::Return(s) => vec![&s.source],
            Statement::Logic(_) => Vec::new(),
        }
    }

    /// Symbols referenced through `SymbolRef` sources.
    pub fn symbol_refs(&self) -> Vec<&str> {
        self.value_sources()
            .into_iter()
            .filter_map(ValueSource::referenced_symbol)
            .collect()
    }
}
