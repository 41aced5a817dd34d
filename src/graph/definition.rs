use super::port::LogicPortDefinition;
use crate::ast::Value;
use crate::id::{NodeTypeId, PortId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a node type does when the visual program runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeBehavior {
    Start,
    If,
    Assign,
    Add,
    Return,
    Loop,
    /// Application-defined behavior, identified by name.
    Custom(String),
}

impl fmt::Display for NodeBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeBehavior::Start => write!(f, "start"),
            NodeBehavior::If => write!(f, "if"),
            NodeBehavior::Assign => write!(f, "assign"),
            NodeBehavior::Add => write!(f, "add"),
            NodeBehavior::Return => write!(f, "return"),
            NodeBehavior::Loop => write!(f, "loop"),
            NodeBehavior::Custom(name) => write!(f, "custom:{}", name),
        }
    }
}

/// Immutable description of a node type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDefinition {
    pub type_id: NodeTypeId,
    pub label: String,
    pub ports: Vec<LogicPortDefinition>,
    pub behavior: NodeBehavior,
    #[serde(default)]
    pub default_config: IndexMap<String, Value>,
}

impl NodeDefinition {
    pub fn new(type_id: impl Into<NodeTypeId>, label: impl Into<String>, behavior: NodeBehavior) -> Self {
        Self {
            type_id: type_id.into(),
            label: label.into(),
            ports: Vec::new(),
            behavior,
            default_config: IndexMap::new(),
        }
    }

    pub fn with_port(mut self, port: LogicPortDefinition) -> Self {
        self.ports.push(port);
        self
    }

    pub fn with_default(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.default_config.insert(key.into(), value.into());
        self
    }

    pub fn port(&self, id: &PortId) -> Option<&LogicPortDefinition> {
        self.ports.iter().find(|p| &p.id == id)
    }

    pub fn has_port(&self, id: &PortId) -> bool {
        self.port(id).is_some()
    }
}
