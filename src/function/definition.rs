use super::statement::Statement;
use crate::error::InvariantError;
use crate::id::{EdgeId, FunctionId, ParamId, StatementId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionParameter {
    pub id: ParamId,
    pub name: String,
}

/// A directed control-flow edge between two statements of the same function.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlowEdge {
    pub id: EdgeId,
    pub from: StatementId,
    pub to: StatementId,
}

/// Aggregate root of one function: parameters, statements and flow edges.
///
/// Every mutation performs its checks before touching any collection, so a
/// failed call leaves the function unchanged. Only cheap structural rules are
/// enforced here; acyclicity and name uniqueness across symbols are checked on
/// demand by the planner and the validator.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDefinition {
    id: FunctionId,
    name: String,
    parameters: Vec<FunctionParameter>,
    statements: IndexMap<StatementId, Statement>,
    edges: IndexMap<EdgeId, FlowEdge>,
}

impl FunctionDefinition {
    pub fn new(id: impl Into<FunctionId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parameters: Vec::new(),
            statements: IndexMap::new(),
            edges: IndexMap::new(),
        }
    }

    pub fn id(&self) -> &FunctionId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    // -----------------------------------------------------------------------
    // Parameters
    // -----------------------------------------------------------------------

    /// Adds a parameter whose id is derived from its name.
    pub fn add_parameter(&mut self, name: impl Into<String>) -> Result<ParamId, InvariantError> {
        let name = name.into();
        let id = ParamId::new(format!("param:{}", name));
        self.add_parameter_with_id(id, name)
    }

    pub fn add_parameter_with_id(
        &mut self,
        id: ParamId,
        name: impl Into<String>,
    ) -> Result<ParamId, InvariantError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(InvariantError::EmptyName { what: "Parameter" });
        }
        if self.has_parameter(&name) {
            return Err(InvariantError::DuplicateParameter { name });
        }
        debug!(function = %self.id, parameter = %name, "adding parameter");
        self.parameters.push(FunctionParameter {
            id: id.clone(),
            name,
        });
        Ok(id)
    }

    pub fn remove_parameter(&mut self, name: &str) -> Result<FunctionParameter, InvariantError> {
        let index = self
            .parameters
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| InvariantError::ParameterNotFound {
                name: name.to_string(),
            })?;
        debug!(function = %self.id, parameter = %name, "removing parameter");
        Ok(self.parameters.remove(index))
    }

    /// Renames a parameter in place, keeping its id and position.
    pub fn rename_parameter(
        &mut self,
        old_name: &str,
        new_name: impl Into<String>,
    ) -> Result<(), InvariantError> {
        let new_name = new_name.into();
        if new_name.trim().is_empty() {
            return Err(InvariantError::EmptyName { what: "Parameter" });
        }
        let index = self
            .parameters
            .iter()
            .position(|p| p.name == old_name)
            .ok_or_else(|| InvariantError::ParameterNotFound {
                name: old_name.to_string(),
            })?;
        if old_name != new_name && self.has_parameter(&new_name) {
            return Err(InvariantError::DuplicateParameter { name: new_name });
        }
        debug!(function = %self.id, from = %old_name, to = %new_name, "renaming parameter");
        self.parameters[index].name = new_name;
        Ok(())
    }

    pub fn has_parameter(&self, name: &str) -> bool {
        self.parameters.iter().any(|p| p.name == name)
    }

    pub fn parameter(&self, name: &str) -> Option<&FunctionParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn parameters(&self) -> &[FunctionParameter] {
        &self.parameters
    }

    pub fn list_parameters(&self) -> Vec<FunctionParameter> {
        self.parameters.clone()
    }

    pub fn parameter_names(&self) -> Vec<String> {
        self.parameters.iter().map(|p| p.name.clone()).collect()
    }

    // -----------------------------------------------------------------------
    // Statements
    // -----------------------------------------------------------------------

    pub fn add_statement(&mut self, statement: Statement) -> Result<(), InvariantError> {
        let id = statement.id().clone();
        if self.statements.contains_key(&id) {
            return Err(InvariantError::DuplicateStatement { id });
        }
        if statement.is_return() {
            if let Some(existing) = self.return_statement() {
                return Err(InvariantError::MultipleReturns {
                    existing: existing.id().clone(),
                });
            }
        }
        debug!(function = %self.id, statement = %id, kind = statement.kind_name(), "adding statement");
        self.statements.insert(id, statement);
        Ok(())
    }

    /// Swaps the body of an existing statement, keeping its position.
    pub fn replace_statement(&mut self, statement: Statement) -> Result<(), InvariantError> {
        let id = statement.id().clone();
        if !self.statements.contains_key(&id) {
            return Err(InvariantError::StatementNotFound { id });
        }
        if statement.is_return() {
            if let Some(existing) = self.return_statement().filter(|s| s.id() != &id) {
                return Err(InvariantError::MultipleReturns {
                    existing: existing.id().clone(),
                });
            }
        }
        debug!(function = %self.id, statement = %id, "replacing statement");
        self.statements.insert(id, statement);
        Ok(())
    }

    /// Removes a statement together with every flow edge touching it.
    pub fn remove_statement(&mut self, id: &StatementId) -> Option<Statement> {
        let removed = self.statements.shift_remove(id)?;
        let before = self.edges.len();
        self.edges.retain(|_, edge| &edge.from != id && &edge.to != id);
        debug!(
            function = %self.id,
            statement = %id,
            cascaded_edges = before - self.edges.len(),
            "removed statement"
        );
        Some(removed)
    }

    pub fn has_statement(&self, id: &StatementId) -> bool {
        self.statements.contains_key(id)
    }

    pub fn statement(&self, id: &StatementId) -> Option<&Statement> {
        self.statements.get(id)
    }

    pub fn get_statement(&self, id: &StatementId) -> Option<Statement> {
        self.statements.get(id).cloned()
    }

    /// Statements in insertion order.
    pub fn statements(&self) -> impl Iterator<Item = &Statement> {
        self.statements.values()
    }

    pub fn list_statements(&self) -> Vec<Statement> {
        self.statements.values().cloned().collect()
    }

    pub fn statement_count(&self) -> usize {
        self.statements.len()
    }

    pub fn return_statement(&self) -> Option<&Statement> {
        self.statements.values().find(|s| s.is_return())
    }

    // -----------------------------------------------------------------------
    // Flow edges
    // -----------------------------------------------------------------------

    /// Connects `from` to `to`. Without an explicit id the edge is named `from->to`.
    ///
    /// Only local checks run here: both endpoints exist, no self-edge, no
    /// duplicate pair. Cycles are left for the planner to detect.
    pub fn connect_flow(
        &mut self,
        from: &StatementId,
        to: &StatementId,
        edge_id: Option<EdgeId>,
    ) -> Result<EdgeId, InvariantError> {
        if !self.statements.contains_key(from) {
            return Err(InvariantError::MissingEndpoint {
                end: "source",
                statement: from.clone(),
            });
        }
        if !self.statements.contains_key(to) {
            return Err(InvariantError::MissingEndpoint {
                end: "target",
                statement: to.clone(),
            });
        }
        if from == to {
            return Err(InvariantError::SelfEdge {
                statement: from.clone(),
            });
        }
        if self.edges.values().any(|e| &e.from == from && &e.to == to) {
            return Err(InvariantError::DuplicateEdge {
                from: from.clone(),
                to: to.clone(),
            });
        }
        let id = edge_id.unwrap_or_else(|| EdgeId::new(format!("{}->{}", from, to)));
        if self.edges.contains_key(&id) {
            return Err(InvariantError::EdgeIdInUse { id });
        }

        debug!(function = %self.id, edge = %id, %from, %to, "connecting flow");
        self.edges.insert(
            id.clone(),
            FlowEdge {
                id: id.clone(),
                from: from.clone(),
                to: to.clone(),
            },
        );
        Ok(id)
    }

    /// Removes an edge. Absent edges are not an error.
    pub fn disconnect_flow(&mut self, edge_id: &EdgeId) -> Option<FlowEdge> {
        let removed = self.edges.shift_remove(edge_id);
        if removed.is_some() {
            debug!(function = %self.id, edge = %edge_id, "disconnected flow");
        }
        removed
    }

    pub fn edge(&self, id: &EdgeId) -> Option<&FlowEdge> {
        self.edges.get(id)
    }

    pub fn edges(&self) -> impl Iterator<Item = &FlowEdge> {
        self.edges.values()
    }

    pub fn list_edges(&self) -> Vec<FlowEdge> {
        self.edges.values().cloned().collect()
    }

    pub fn edges_from<'a>(&'a self, id: &'a StatementId) -> impl Iterator<Item = &'a FlowEdge> {
        self.edges.values().filter(move |e| &e.from == id)
    }

    pub fn edges_to<'a>(&'a self, id: &'a StatementId) -> impl Iterator<Item = &'a FlowEdge> {
        self.edges.values().filter(move |e| &e.to == id)
    }
}
