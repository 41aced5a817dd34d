use super::editor::FunctionEditor;
use super::inspector::FunctionInspector;
use super::snapshot::FunctionSnapshot;
use crate::analysis::FunctionValidator;
use crate::error::{InvariantError, SnapshotError};
use crate::function::FunctionDefinition;
use crate::id::{FunctionId, IdGenerator, UuidGenerator};
use indexmap::IndexMap;
use itertools::Itertools;
use std::sync::Arc;
use tracing::{debug, info};

/// Every function of one document, keyed by id.
///
/// Name uniqueness across functions is optional and off by default.
#[derive(Debug, Clone, Default)]
pub struct FunctionWorkspace {
    functions: IndexMap<FunctionId, FunctionDefinition>,
    unique_names: bool,
}

impl FunctionWorkspace {
    pub fn new(unique_names: bool) -> Self {
        Self {
            functions: IndexMap::new(),
            unique_names,
        }
    }

    pub fn insert(&mut self, function: FunctionDefinition) -> Result<(), InvariantError> {
        if self.functions.contains_key(function.id()) {
            return Err(InvariantError::DuplicateFunction {
                id: function.id().clone(),
            });
        }
        if self.unique_names && self.find_by_name(function.name()).is_some() {
            return Err(InvariantError::DuplicateFunctionName {
                name: function.name().to_string(),
            });
        }
        debug!(function = %function.id(), name = %function.name(), "adding function");
        self.functions.insert(function.id().clone(), function);
        Ok(())
    }

    pub fn remove(&mut self, id: &FunctionId) -> Option<FunctionDefinition> {
        self.functions.shift_remove(id)
    }

    pub fn get(&self, id: &FunctionId) -> Option<&FunctionDefinition> {
        self.functions.get(id)
    }

    pub fn get_mut(&mut self, id: &FunctionId) -> Option<&mut FunctionDefinition> {
        self.functions.get_mut(id)
    }

    pub fn rename(&mut self, id: &FunctionId, name: &str) -> Result<(), InvariantError> {
        if name.trim().is_empty() {
            return Err(InvariantError::EmptyName { what: "Function" });
        }
        if self.unique_names
            && self
                .find_by_name(name)
                .is_some_and(|other| other.id() != id)
        {
            return Err(InvariantError::DuplicateFunctionName {
                name: name.to_string(),
            });
        }
        let function = self
            .functions
            .get_mut(id)
            .ok_or_else(|| InvariantError::FunctionNotFound { id: id.clone() })?;
        debug!(function = %id, from = %function.name(), to = %name, "renaming function");
        function.set_name(name.to_string());
        Ok(())
    }

    pub fn list(&self) -> Vec<&FunctionDefinition> {
        self.functions.values().collect()
    }

    pub fn find_by_name(&self, name: &str) -> Option<&FunctionDefinition> {
        self.functions.values().find(|f| f.name() == name)
    }

    /// Whole-workspace check for repeated names, regardless of the
    /// `unique_names` setting.
    pub fn check_unique_names(&self) -> Result<(), InvariantError> {
        match self.functions.values().map(|f| f.name()).duplicates().next() {
            Some(name) => Err(InvariantError::DuplicateFunctionName {
                name: name.to_string(),
            }),
            None => Ok(()),
        }
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

/// Façade over a [`FunctionWorkspace`]: id generation, per-function editing
/// and inspection, and snapshot import/export.
pub struct FunctionStore {
    workspace: FunctionWorkspace,
    ids: Arc<dyn IdGenerator>,
    validator: FunctionValidator,
}

pub struct FunctionStoreBuilder {
    ids: Arc<dyn IdGenerator>,
    unique_function_names: bool,
    validator: FunctionValidator,
}

impl FunctionStoreBuilder {
    pub fn new() -> Self {
        Self {
            ids: Arc::new(UuidGenerator),
            unique_function_names: false,
            validator: FunctionValidator::default(),
        }
    }

    pub fn id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn unique_function_names(mut self, enabled: bool) -> Self {
        self.unique_function_names = enabled;
        self
    }

    pub fn validator(mut self, validator: FunctionValidator) -> Self {
        self.validator = validator;
        self
    }

    pub fn build(self) -> FunctionStore {
        FunctionStore {
            workspace: FunctionWorkspace::new(self.unique_function_names),
            ids: self.ids,
            validator: self.validator,
        }
    }
}

impl Default for FunctionStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for FunctionStore {
    fn default() -> Self {
        FunctionStoreBuilder::new().build()
    }
}

impl FunctionStore {
    pub fn builder() -> FunctionStoreBuilder {
        FunctionStoreBuilder::new()
    }

    pub fn workspace(&self) -> &FunctionWorkspace {
        &self.workspace
    }

    pub fn create_function(&mut self, name: &str) -> Result<FunctionId, InvariantError> {
        if name.trim().is_empty() {
            return Err(InvariantError::EmptyName { what: "Function" });
        }
        let id = FunctionId::new(self.ids.generate("fn"));
        self.workspace
            .insert(FunctionDefinition::new(id.clone(), name))?;
        Ok(id)
    }

    pub fn remove_function(&mut self, id: &FunctionId) -> Option<FunctionDefinition> {
        self.workspace.remove(id)
    }

    pub fn rename_function(&mut self, id: &FunctionId, name: &str) -> Result<(), InvariantError> {
        self.workspace.rename(id, name)
    }

    pub fn function(&self, id: &FunctionId) -> Option<&FunctionDefinition> {
        self.workspace.get(id)
    }

    pub fn edit(&mut self, id: &FunctionId) -> Result<FunctionEditor<'_>, InvariantError> {
        let function = self
            .workspace
            .get_mut(id)
            .ok_or_else(|| InvariantError::FunctionNotFound { id: id.clone() })?;
        Ok(FunctionEditor::new(function, self.ids.as_ref()))
    }

    pub fn inspect(&self, id: &FunctionId) -> Result<FunctionInspector<'_>, InvariantError> {
        let function = self
            .workspace
            .get(id)
            .ok_or_else(|| InvariantError::FunctionNotFound { id: id.clone() })?;
        Ok(FunctionInspector::new(function, &self.validator))
    }

    pub fn serialize_function(&self, id: &FunctionId) -> Result<FunctionSnapshot, InvariantError> {
        self.workspace
            .get(id)
            .map(FunctionSnapshot::capture)
            .ok_or_else(|| InvariantError::FunctionNotFound { id: id.clone() })
    }

    /// Replaces the body of an existing function. The function keeps its id
    /// and name; on failure nothing changes.
    pub fn hydrate_function(
        &mut self,
        id: &FunctionId,
        snapshot: &FunctionSnapshot,
    ) -> Result<(), SnapshotError> {
        let function = self
            .workspace
            .get_mut(id)
            .ok_or_else(|| InvariantError::FunctionNotFound { id: id.clone() })?;
        let hydrated = snapshot.hydrate(id.clone(), function.name())?;
        *function = hydrated;
        info!(function = %id, "replaced function body from snapshot");
        Ok(())
    }

    /// Creates a new function named `name` from a snapshot.
    pub fn import_function(
        &mut self,
        name: &str,
        snapshot: &FunctionSnapshot,
    ) -> Result<FunctionId, SnapshotError> {
        let id = FunctionId::new(self.ids.generate("fn"));
        let function = snapshot.hydrate(id.clone(), name)?;
        self.workspace.insert(function)?;
        info!(function = %id, name = %name, "imported function");
        Ok(id)
    }
}
