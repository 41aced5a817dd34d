use super::editor::FunctionEditor;
use super::inspector::FunctionInspector;
use super::snapshot::FunctionSnapshot;
use crate::analysis::FunctionValidator;
use crate::error::SnapshotError;
use crate::function::FunctionDefinition;
use crate::id::{IdGenerator, UuidGenerator};
use std::sync::Arc;
use tracing::info;

/// Command/query façade over one function being edited.
pub struct FunctionService {
    function: FunctionDefinition,
    ids: Arc<dyn IdGenerator>,
    validator: FunctionValidator,
}

impl FunctionService {
    pub fn new(function: FunctionDefinition) -> Self {
        Self {
            function,
            ids: Arc::new(UuidGenerator),
            validator: FunctionValidator::default(),
        }
    }

    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn with_validator(mut self, validator: FunctionValidator) -> Self {
        self.validator = validator;
        self
    }

    pub fn definition(&self) -> &FunctionDefinition {
        &self.function
    }

    pub fn into_definition(self) -> FunctionDefinition {
        self.function
    }

    pub fn edit(&mut self) -> FunctionEditor<'_> {
        FunctionEditor::new(&mut self.function, self.ids.as_ref())
    }

    pub fn inspect(&self) -> FunctionInspector<'_> {
        FunctionInspector::new(&self.function, &self.validator)
    }

    pub fn serialize(&self) -> FunctionSnapshot {
        FunctionSnapshot::capture(&self.function)
    }

    /// Replaces the function body with the snapshot's content, keeping the
    /// function's id and name. On failure the current body is untouched.
    pub fn hydrate(&mut self, snapshot: &FunctionSnapshot) -> Result<(), SnapshotError> {
        let hydrated = snapshot.hydrate(self.function.id().clone(), self.function.name())?;
        info!(function = %self.function.id(), "replaced function body from snapshot");
        self.function = hydrated;
        Ok(())
    }
}
