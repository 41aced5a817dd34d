use super::definition::NodeDefinition;
use super::instance::{LogicConnection, NodeInstance};
use super::registry::NodeDefinitionRegistry;
use crate::ast::Value;
use crate::error::InvariantError;
use crate::id::{ConnectionId, NodeInstanceId, PortId};
use indexmap::IndexMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicGraphMeta {
    pub id: String,
    pub name: String,
}

impl Default for LogicGraphMeta {
    fn default() -> Self {
        Self {
            id: "local".to_string(),
            name: "Local graph".to_string(),
        }
    }
}

/// Node-and-port graph behind the visual builder.
///
/// The graph owns its nodes and connections. Node definitions are borrowed
/// from a shared registry. Connecting checks that both nodes and both ports
/// exist; kind and channel compatibility are left to [`LogicGraphService`].
///
/// [`LogicGraphService`]: super::LogicGraphService
#[derive(Debug, Clone)]
pub struct LogicGraph {
    meta: LogicGraphMeta,
    registry: Arc<NodeDefinitionRegistry>,
    nodes: IndexMap<NodeInstanceId, NodeInstance>,
    connections: IndexMap<ConnectionId, LogicConnection>,
}

impl LogicGraph {
    pub fn new(meta: LogicGraphMeta, registry: Arc<NodeDefinitionRegistry>) -> Self {
        Self {
            meta,
            registry,
            nodes: IndexMap::new(),
            connections: IndexMap::new(),
        }
    }

    pub fn meta(&self) -> &LogicGraphMeta {
        &self.meta
    }

    pub fn registry(&self) -> &Arc<NodeDefinitionRegistry> {
        &self.registry
    }

    pub fn add_node(&mut self, node: NodeInstance) -> Result<(), InvariantError> {
        if !self.registry.contains(&node.type_id) {
            return Err(InvariantError::UnknownNodeType {
                type_id: node.type_id,
            });
        }
        if self.nodes.contains_key(&node.id) {
            return Err(InvariantError::DuplicateNode { id: node.id });
        }
        debug!(graph = %self.meta.id, node = %node.id, type_id = %node.type_id, "adding node");
        self.nodes.insert(node.id.clone(), node);
        Ok(())
    }

    /// Removes a node and every connection that starts or ends at it.
    pub fn remove_node(&mut self, id: &NodeInstanceId) -> Option<NodeInstance> {
        let removed = self.nodes.shift_remove(id)?;
        let before = self.connections.len();
        self.connections.retain(|_, c| !c.touches(id));
        debug!(
            graph = %self.meta.id,
            node = %id,
            cascaded_connections = before - self.connections.len(),
            "removed node"
        );
        Some(removed)
    }

    pub fn add_connection(&mut self, connection: LogicConnection) -> Result<(), InvariantError> {
        self.require_port(&connection.from_node_id, &connection.from_port_id)?;
        self.require_port(&connection.to_node_id, &connection.to_port_id)?;
        if self.connections.contains_key(&connection.id) {
            return Err(InvariantError::DuplicateConnection { id: connection.id });
        }
        debug!(
            graph = %self.meta.id,
            connection = %connection.id,
            from = %connection.from_node_id,
            to = %connection.to_node_id,
            "adding connection"
        );
        self.connections.insert(connection.id.clone(), connection);
        Ok(())
    }

    pub fn remove_connection(&mut self, id: &ConnectionId) -> Option<LogicConnection> {
        let removed = self.connections.shift_remove(id);
        if removed.is_some() {
            debug!(graph = %self.meta.id, connection = %id, "removed connection");
        }
        removed
    }

    fn require_port(&self, node_id: &NodeInstanceId, port_id: &PortId) -> Result<(), InvariantError> {
        let definition = self.definition_of(node_id)?;
        if !definition.has_port(port_id) {
            return Err(InvariantError::PortNotFound {
                node: node_id.clone(),
                port: port_id.clone(),
            });
        }
        Ok(())
    }

    /// The registered definition of a placed node.
    pub fn definition_of(&self, node_id: &NodeInstanceId) -> Result<Arc<NodeDefinition>, InvariantError> {
        let node = self
            .nodes
            .get(node_id)
            .ok_or_else(|| InvariantError::NodeNotFound { id: node_id.clone() })?;
        self.registry
            .get(&node.type_id)
            .ok_or_else(|| InvariantError::UnknownNodeType {
                type_id: node.type_id.clone(),
            })
    }

    pub fn get_node(&self, id: &NodeInstanceId) -> Option<&NodeInstance> {
        self.nodes.get(id)
    }

    pub fn find_node_by_shape(&self, shape_id: &str) -> Option<&NodeInstance> {
        self.nodes
            .values()
            .find(|n| n.shape_id.as_deref() == Some(shape_id))
    }

    pub fn get_connection(&self, id: &ConnectionId) -> Option<&LogicConnection> {
        self.connections.get(id)
    }

    /// Merges `patch` into the node's config; existing keys are overwritten.
    pub fn update_node_config(
        &mut self,
        id: &NodeInstanceId,
        patch: IndexMap<String, Value>,
    ) -> Result<(), InvariantError> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| InvariantError::NodeNotFound { id: id.clone() })?;
        debug!(graph = %self.meta.id, node = %id, keys = patch.len(), "updating node config");
        node.config.extend(patch);
        Ok(())
    }

    pub fn list_nodes(&self) -> Vec<NodeInstance> {
        self.nodes.values().cloned().collect()
    }

    pub fn list_connections(&self) -> Vec<LogicConnection> {
        self.connections.values().cloned().collect()
    }

    pub fn connections_of<'a>(
        &'a self,
        node_id: &'a NodeInstanceId,
    ) -> impl Iterator<Item = &'a LogicConnection> {
        self.connections.values().filter(move |c| c.touches(node_id))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Deterministic text dump: nodes, then connections, each sorted by id.
    ///
    /// ```text
    /// graph local "Local graph"
    /// nodes:
    ///   node-1 [start] shape=s1
    ///   node-2 [assign] {variable="x"}
    /// connections:
    ///   conn-3: node-1.next -> node-2.in
    /// ```
    pub fn to_debug_string(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "graph {} \"{}\"", self.meta.id, self.meta.name);

        out.push_str("nodes:\n");
        for node in self.nodes.values().sorted_by(|a, b| a.id.cmp(&b.id)) {
            let _ = write!(out, "  {} [{}]", node.id, node.type_id);
            if let Some(shape) = &node.shape_id {
                let _ = write!(out, " shape={}", shape);
            }
            if !node.config.is_empty() {
                let config = node
                    .config
                    .iter()
                    .sorted_by(|a, b| a.0.cmp(b.0))
                    .map(|(key, value)| format!("{}={}", key, render_value(value)))
                    .join(", ");
                let _ = write!(out, " {{{}}}", config);
            }
            out.push('\n');
        }

        out.push_str("connections:\n");
        for c in self.connections.values().sorted_by(|a, b| a.id.cmp(&b.id)) {
            let _ = writeln!(
                out,
                "  {}: {}.{} -> {}.{}",
                c.id, c.from_node_id, c.from_port_id, c.to_node_id, c.to_port_id
            );
        }
        out
    }
}

fn render_value(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| value.to_string())
}
