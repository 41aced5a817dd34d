use crate::function::{FunctionDefinition, Statement};
use crate::id::StatementId;
use ahash::{AHashMap, AHashSet};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a visible symbol was introduced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "statement", rename_all = "camelCase")]
pub enum SymbolOrigin {
    Parameter,
    Statement(StatementId),
}

impl fmt::Display for SymbolOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolOrigin::Parameter => write!(f, "parameter"),
            SymbolOrigin::Statement(id) => write!(f, "statement '{}'", id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolInfo {
    pub name: String,
    pub origin: SymbolOrigin,
}

impl SymbolInfo {
    pub fn parameter(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            origin: SymbolOrigin::Parameter,
        }
    }

    pub fn statement(name: impl Into<String>, id: StatementId) -> Self {
        Self {
            name: name.into(),
            origin: SymbolOrigin::Statement(id),
        }
    }
}

/// Answers "which names can this statement see?".
///
/// A statement sees every parameter plus every symbol produced by a statement
/// that reaches it through flow edges. Statements with no path to it, including
/// fully unconnected ones, contribute nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScopeResolver;

impl ScopeResolver {
    /// Visible symbols of `statement_id`, deduplicated by name.
    ///
    /// Parameters come first. Statement symbols are collected by an iterative
    /// depth-first walk over reversed edges starting at the direct
    /// predecessors; when two sources produce the same name, the one visited
    /// last wins. An unknown statement id sees only the parameters.
    pub fn visible_symbols(
        function: &FunctionDefinition,
        statement_id: &StatementId,
    ) -> Vec<SymbolInfo> {
        let mut visible: IndexMap<String, SymbolOrigin> = function
            .parameters()
            .iter()
            .map(|p| (p.name.clone(), SymbolOrigin::Parameter))
            .collect();

        let mut predecessors: AHashMap<&StatementId, Vec<&StatementId>> = AHashMap::new();
        for edge in function.edges() {
            predecessors.entry(&edge.to).or_default().push(&edge.from);
        }

        let mut visited: AHashSet<&StatementId> = AHashSet::new();
        let mut stack: Vec<&StatementId> = predecessors
            .get(statement_id)
            .map(|direct| direct.iter().rev().copied().collect())
            .unwrap_or_default();

        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            if let Some(statement) = function.statement(id) {
                for info in Self::symbols_produced_by(statement) {
                    visible.insert(info.name, info.origin);
                }
            }
            if let Some(upstream) = predecessors.get(id) {
                stack.extend(upstream.iter().rev().copied().filter(|p| !visited.contains(p)));
            }
        }

        visible
            .into_iter()
            .map(|(name, origin)| SymbolInfo { name, origin })
            .collect()
    }

    /// Names only, in the same order as [`ScopeResolver::visible_symbols`].
    pub fn visible_names(function: &FunctionDefinition, statement_id: &StatementId) -> Vec<String> {
        Self::visible_symbols(function, statement_id)
            .into_iter()
            .map(|info| info.name)
            .collect()
    }

    pub fn symbols_produced_by(statement: &Statement) -> Vec<SymbolInfo> {
        statement
            .produced_symbols()
            .into_iter()
            .map(|name| SymbolInfo::statement(name, statement.id().clone()))
            .collect()
    }
}
