use super::definition::NodeDefinition;
use super::instance::{LogicConnection, NodeInstance};
use super::logic_graph::{LogicGraph, LogicGraphMeta};
use super::port::LogicPortDefinition;
use super::registry::NodeDefinitionRegistry;
use crate::ast::Value;
use crate::error::InvariantError;
use crate::id::{ConnectionId, IdGenerator, NodeInstanceId, NodeTypeId, PortId, UuidGenerator};
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::debug;

/// Command façade over a [`LogicGraph`].
///
/// Mints ids, seeds new nodes with their definition's default config, and
/// checks port compatibility before wiring two ports together.
pub struct LogicGraphService {
    graph: LogicGraph,
    ids: Arc<dyn IdGenerator>,
    enforce_port_compatibility: bool,
}

pub struct LogicGraphServiceBuilder {
    registry: Arc<NodeDefinitionRegistry>,
    ids: Arc<dyn IdGenerator>,
    enforce_port_compatibility: bool,
    meta: LogicGraphMeta,
}

impl LogicGraphServiceBuilder {
    pub fn new(registry: Arc<NodeDefinitionRegistry>) -> Self {
        Self {
            registry,
            ids: Arc::new(UuidGenerator),
            enforce_port_compatibility: true,
            meta: LogicGraphMeta::default(),
        }
    }

    pub fn id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// When off, `connect_ports` only checks that nodes and ports exist.
    pub fn enforce_port_compatibility(mut self, enabled: bool) -> Self {
        self.enforce_port_compatibility = enabled;
        self
    }

    pub fn meta(mut self, meta: LogicGraphMeta) -> Self {
        self.meta = meta;
        self
    }

    pub fn build(self) -> LogicGraphService {
        LogicGraphService {
            graph: LogicGraph::new(self.meta, self.registry),
            ids: self.ids,
            enforce_port_compatibility: self.enforce_port_compatibility,
        }
    }
}

impl LogicGraphService {
    pub fn new(registry: Arc<NodeDefinitionRegistry>) -> Self {
        Self::builder(registry).build()
    }

    pub fn builder(registry: Arc<NodeDefinitionRegistry>) -> LogicGraphServiceBuilder {
        LogicGraphServiceBuilder::new(registry)
    }

    pub fn graph(&self) -> &LogicGraph {
        &self.graph
    }

    pub fn into_graph(self) -> LogicGraph {
        self.graph
    }

    /// Places a new node of `type_id`, starting from the definition's default config.
    pub fn add_node(
        &mut self,
        type_id: impl Into<NodeTypeId>,
        shape_id: Option<&str>,
    ) -> Result<NodeInstanceId, InvariantError> {
        let type_id = type_id.into();
        let definition = self
            .graph
            .registry()
            .get(&type_id)
            .ok_or_else(|| InvariantError::UnknownNodeType {
                type_id: type_id.clone(),
            })?;

        let id = NodeInstanceId::new(self.ids.generate("node"));
        let mut node = NodeInstance::new(id.clone(), type_id).with_config(definition.default_config.clone());
        node.shape_id = shape_id.map(str::to_string);
        self.graph.add_node(node)?;
        Ok(id)
    }

    /// Returns the node drawn as `shape_id`, creating one of `type_id` when none exists.
    ///
    /// An existing node is returned as-is, even when its type differs.
    pub fn ensure_node_for_shape(
        &mut self,
        shape_id: &str,
        type_id: impl Into<NodeTypeId>,
    ) -> Result<NodeInstanceId, InvariantError> {
        if let Some(existing) = self.graph.find_node_by_shape(shape_id) {
            return Ok(existing.id.clone());
        }
        self.add_node(type_id, Some(shape_id))
    }

    pub fn set_config(
        &mut self,
        node_id: &NodeInstanceId,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<(), InvariantError> {
        let mut patch = IndexMap::new();
        patch.insert(key.into(), value.into());
        self.graph.update_node_config(node_id, patch)
    }

    pub fn remove_node(&mut self, node_id: &NodeInstanceId) -> Option<NodeInstance> {
        self.graph.remove_node(node_id)
    }

    /// Wires `from`'s port to `to`'s port.
    ///
    /// Connecting the same two ports twice returns the existing connection id.
    /// With compatibility enforcement on, the source port must be an output,
    /// branch or body port, the target an input port, the channels must be
    /// compatible and the value types must agree.
    pub fn connect_ports(
        &mut self,
        from: (&NodeInstanceId, &PortId),
        to: (&NodeInstanceId, &PortId),
    ) -> Result<ConnectionId, InvariantError> {
        let (from_node, from_port) = from;
        let (to_node, to_port) = to;

        if let Some(existing) = self.graph.connections_of(from_node).find(|c| {
            &c.from_node_id == from_node
                && &c.from_port_id == from_port
                && &c.to_node_id == to_node
                && &c.to_port_id == to_port
        }) {
            return Ok(existing.id.clone());
        }

        if self.enforce_port_compatibility {
            let source_definition = self.graph.definition_of(from_node)?;
            let target_definition = self.graph.definition_of(to_node)?;
            let source = port_of(&source_definition, from_node, from_port)?;
            let target = port_of(&target_definition, to_node, to_port)?;
            check_compatible(
                source,
                target,
                &format!("{}.{}", from_node, from_port),
                &format!("{}.{}", to_node, to_port),
            )?;
        }

        let id = ConnectionId::new(self.ids.generate("conn"));
        self.graph.add_connection(LogicConnection::new(
            id.clone(),
            (from_node.clone(), from_port.clone()),
            (to_node.clone(), to_port.clone()),
        ))?;
        debug!(connection = %id, "ports connected");
        Ok(id)
    }

    pub fn disconnect(&mut self, connection_id: &ConnectionId) -> Option<LogicConnection> {
        self.graph.remove_connection(connection_id)
    }
}

fn port_of<'d>(
    definition: &'d NodeDefinition,
    node: &NodeInstanceId,
    port: &PortId,
) -> Result<&'d LogicPortDefinition, InvariantError> {
    definition.port(port).ok_or_else(|| InvariantError::PortNotFound {
        node: node.clone(),
        port: port.clone(),
    })
}

fn check_compatible(
    source: &LogicPortDefinition,
    target: &LogicPortDefinition,
    from: &str,
    to: &str,
) -> Result<(), InvariantError> {
    let reason = if !source.is_source() {
        Some(format!("source port '{}' is not an output", source.id))
    } else if !target.is_target() {
        Some(format!("target port '{}' is not an input", target.id))
    } else if !source.channel.is_compatible_with(target.channel) {
        Some(format!(
            "channel {:?} cannot feed channel {:?}",
            source.channel, target.channel
        ))
    } else if !source.accepts_value_type(target.value_type.as_deref()) {
        Some(format!(
            "value type {} does not match {}",
            source.value_type.as_deref().unwrap_or("any"),
            target.value_type.as_deref().unwrap_or("any")
        ))
    } else {
        None
    };

    match reason {
        Some(reason) => Err(InvariantError::IncompatiblePorts {
            from: from.to_string(),
            to: to.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}
