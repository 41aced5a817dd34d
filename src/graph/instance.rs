use crate::ast::Value;
use crate::id::{ConnectionId, NodeInstanceId, NodeTypeId, PortId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A node placed in a logic graph.
///
/// The instance owns its config but not its definition; the definition is
/// looked up in the registry by `type_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeInstance {
    pub id: NodeInstanceId,
    pub type_id: NodeTypeId,
    #[serde(default)]
    pub config: IndexMap<String, Value>,
    /// Canvas shape this node is drawn as, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape_id: Option<String>,
}

impl NodeInstance {
    pub fn new(id: impl Into<NodeInstanceId>, type_id: impl Into<NodeTypeId>) -> Self {
        Self {
            id: id.into(),
            type_id: type_id.into(),
            config: IndexMap::new(),
            shape_id: None,
        }
    }

    pub fn with_shape(mut self, shape_id: impl Into<String>) -> Self {
        self.shape_id = Some(shape_id.into());
        self
    }

    pub fn with_config(mut self, config: IndexMap<String, Value>) -> Self {
        self.config = config;
        self
    }
}

/// Directed wire from one node's port to another node's port.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogicConnection {
    pub id: ConnectionId,
    pub from_node_id: NodeInstanceId,
    pub from_port_id: PortId,
    pub to_node_id: NodeInstanceId,
    pub to_port_id: PortId,
}

impl LogicConnection {
    pub fn new(
        id: impl Into<ConnectionId>,
        from: (impl Into<NodeInstanceId>, impl Into<PortId>),
        to: (impl Into<NodeInstanceId>, impl Into<PortId>),
    ) -> Self {
        Self {
            id: id.into(),
            from_node_id: from.0.into(),
            from_port_id: from.1.into(),
            to_node_id: to.0.into(),
            to_port_id: to.1.into(),
        }
    }

    pub fn touches(&self, node: &NodeInstanceId) -> bool {
        &self.from_node_id == node || &self.to_node_id == node
    }

    /// Same endpoints, regardless of id.
    pub fn same_endpoints(&self, other: &LogicConnection) -> bool {
        self.from_node_id == other.from_node_id
            && self.from_port_id == other.from_port_id
            && self.to_node_id == other.to_node_id
            && self.to_port_id == other.to_port_id
    }
}
