use super::builtin::register_builtin_nodes;
use super::definition::NodeDefinition;
use crate::error::InvariantError;
use crate::id::NodeTypeId;
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::debug;

/// Catalogue of node types, keyed by type id.
///
/// Definitions are immutable once registered. A registry is normally built
/// once and shared behind an `Arc` by every graph of a session.
#[derive(Debug, Clone, Default)]
pub struct NodeDefinitionRegistry {
    definitions: IndexMap<NodeTypeId, Arc<NodeDefinition>>,
}

impl NodeDefinitionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry preloaded with the built-in node catalogue.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        register_builtin_nodes(&mut registry);
        registry
    }

    pub fn register(&mut self, definition: NodeDefinition) -> Result<(), InvariantError> {
        if self.definitions.contains_key(&definition.type_id) {
            return Err(InvariantError::DuplicateNodeType {
                type_id: definition.type_id,
            });
        }
        debug!(type_id = %definition.type_id, ports = definition.ports.len(), "registering node type");
        self.definitions
            .insert(definition.type_id.clone(), Arc::new(definition));
        Ok(())
    }

    pub fn get(&self, type_id: &NodeTypeId) -> Option<Arc<NodeDefinition>> {
        self.definitions.get(type_id).cloned()
    }

    pub fn contains(&self, type_id: &NodeTypeId) -> bool {
        self.definitions.contains_key(type_id)
    }

    pub fn type_ids(&self) -> impl Iterator<Item = &NodeTypeId> {
        self.definitions.keys()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
