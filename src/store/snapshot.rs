use crate::error::SnapshotError;
use crate::function::{FlowEdge, FunctionDefinition, FunctionParameter, Statement};
use crate::id::FunctionId;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const SNAPSHOT_VERSION: u32 = 1;

/// Plain, JSON-shaped record of a function body.
///
/// ```json
/// { "version": 1, "params": [...], "statements": [...], "flow": [...] }
/// ```
///
/// The function's own id and name are not part of the snapshot; the
/// embedding application stores them alongside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionSnapshot {
    pub version: u32,
    pub params: Vec<FunctionParameter>,
    pub statements: Vec<Statement>,
    pub flow: Vec<FlowEdge>,
}

impl FunctionSnapshot {
    pub fn capture(function: &FunctionDefinition) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            params: function.list_parameters(),
            statements: function.list_statements(),
            flow: function.list_edges(),
        }
    }

    /// Rebuilds a function by replaying the snapshot through the aggregate's
    /// own mutations, so every structural check applies.
    pub fn hydrate(
        &self,
        id: impl Into<FunctionId>,
        name: impl Into<String>,
    ) -> Result<FunctionDefinition, SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
            });
        }

        let mut function = FunctionDefinition::new(id, name);
        for param in &self.params {
            function.add_parameter_with_id(param.id.clone(), param.name.clone())?;
        }
        for statement in &self.statements {
            function.add_statement(statement.clone())?;
        }
        for edge in &self.flow {
            function.connect_flow(&edge.from, &edge.to, Some(edge.id.clone()))?;
        }

        debug!(
            function = %function.id(),
            params = self.params.len(),
            statements = self.statements.len(),
            edges = self.flow.len(),
            "hydrated function"
        );
        Ok(function)
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self).map_err(|e| SnapshotError::Json(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(json).map_err(|e| SnapshotError::Json(e.to_string()))
    }
}
