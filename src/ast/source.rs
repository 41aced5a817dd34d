use super::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Describes how a symbol's value is produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ValueSource {
    /// An inline constant, returned verbatim.
    Literal { value: Value },
    /// A reference to another symbol visible at the statement.
    SymbolRef { name: String },
    /// A textual expression over visible symbols and the aggregate helpers.
    Expression { expr: String },
}

impl ValueSource {
    pub fn literal(value: impl Into<Value>) -> Self {
        ValueSource::Literal {
            value: value.into(),
        }
    }

    pub fn symbol_ref(name: impl Into<String>) -> Self {
        ValueSource::SymbolRef { name: name.into() }
    }

    pub fn expression(expr: impl Into<String>) -> Self {
        ValueSource::Expression { expr: expr.into() }
    }

    /// The referenced symbol name, for `SymbolRef` sources only.
    pub fn referenced_symbol(&self) -> Option<&str> {
        match self {
            ValueSource::SymbolRef { name } => Some(name),
            _ => None,
        }
    }

    pub fn expression_text(&self) -> Option<&str> {
        match self {
            ValueSource::Expression { expr } => Some(expr),
            _ => None,
        }
    }
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueSource::Literal { value } => match value {
                Value::String(s) => write!(f, "{:?}", s),
                other => write!(f, "{}", other),
            },
            ValueSource::SymbolRef { name } => write!(f, "${}", name),
            ValueSource::Expression { expr } => write!(f, "={}", expr),
        }
    }
}
