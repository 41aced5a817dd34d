use crate::ast::ValueSource;
use crate::error::InvariantError;
use crate::function::{
    FlowEdge, FunctionDefinition, LogicAssignment, Statement, VariableDeclaration,
};
use crate::id::{EdgeId, IdGenerator, ParamId, StatementId};
use tracing::debug;

/// Command side of a single function.
///
/// Borrows the function mutably for the duration of an edit and mints every
/// new id through the configured generator. All commands inherit the
/// all-or-nothing behavior of [`FunctionDefinition`].
pub struct FunctionEditor<'a> {
    function: &'a mut FunctionDefinition,
    ids: &'a dyn IdGenerator,
}

impl<'a> FunctionEditor<'a> {
    pub fn new(function: &'a mut FunctionDefinition, ids: &'a dyn IdGenerator) -> Self {
        Self { function, ids }
    }

    pub fn function(&self) -> &FunctionDefinition {
        &*self.function
    }

    // --- Parameters ---

    pub fn add_param(&mut self, name: &str) -> Result<ParamId, InvariantError> {
        let id = ParamId::new(self.ids.generate("param"));
        self.function.add_parameter_with_id(id, name)
    }

    /// Returns the id of the parameter named `name`, creating it if needed.
    pub fn ensure_param(&mut self, name: &str) -> Result<ParamId, InvariantError> {
        match self.function.parameter(name) {
            Some(existing) => Ok(existing.id.clone()),
            None => self.add_param(name),
        }
    }

    pub fn rename_param(&mut self, old_name: &str, new_name: &str) -> Result<(), InvariantError> {
        self.function.rename_parameter(old_name, new_name)
    }

    pub fn remove_param(&mut self, name: &str) -> Result<(), InvariantError> {
        self.function.remove_parameter(name).map(|_| ())
    }

    // --- Variables ---

    /// Adds a variable statement declaring a single symbol.
    pub fn add_variable(
        &mut self,
        name: &str,
        source: ValueSource,
    ) -> Result<StatementId, InvariantError> {
        if name.trim().is_empty() {
            return Err(InvariantError::EmptyName { what: "Variable" });
        }
        let id = StatementId::new(self.ids.generate("stmt"));
        self.function.add_statement(Statement::variable(
            id.clone(),
            vec![VariableDeclaration::new(name, source)],
        ))?;
        Ok(id)
    }

    /// Returns the statement declaring `name`, creating a new variable
    /// statement with `source` when no statement declares it yet.
    pub fn ensure_variable(
        &mut self,
        name: &str,
        source: ValueSource,
    ) -> Result<StatementId, InvariantError> {
        match self.find_variable(name) {
            Some(id) => Ok(id),
            None => self.add_variable(name, source),
        }
    }

    pub fn set_variable_source(
        &mut self,
        statement_id: &StatementId,
        name: &str,
        source: ValueSource,
    ) -> Result<(), InvariantError> {
        let mut statement = self.variable_statement(statement_id)?;
        if let Statement::Variable(s) = &mut statement {
            let declaration = s
                .declarations
                .iter_mut()
                .find(|d| d.name == name)
                .ok_or_else(|| InvariantError::DeclarationNotFound {
                    statement: statement_id.clone(),
                    name: name.to_string(),
                })?;
            declaration.source = source;
        }
        self.function.replace_statement(statement)
    }

    pub fn rename_variable(
        &mut self,
        statement_id: &StatementId,
        old_name: &str,
        new_name: &str,
    ) -> Result<(), InvariantError> {
        if new_name.trim().is_empty() {
            return Err(InvariantError::EmptyName { what: "Variable" });
        }
        let mut statement = self.variable_statement(statement_id)?;
        if let Statement::Variable(s) = &mut statement {
            let declaration = s
                .declarations
                .iter_mut()
                .find(|d| d.name == old_name)
                .ok_or_else(|| InvariantError::DeclarationNotFound {
                    statement: statement_id.clone(),
                    name: old_name.to_string(),
                })?;
            declaration.name = new_name.to_string();
        }
        debug!(statement = %statement_id, from = %old_name, to = %new_name, "renaming variable");
        self.function.replace_statement(statement)
    }

    fn find_variable(&self, name: &str) -> Option<StatementId> {
        self.function
            .statements()
            .find(|s| matches!(s, Statement::Variable(_)) && s.produced_symbols().contains(&name))
            .map(|s| s.id().clone())
    }

    /// A copy of the variable statement `id`, ready to be modified and put back.
    fn variable_statement(&self, id: &StatementId) -> Result<Statement, InvariantError> {
        let statement = self
            .function
            .get_statement(id)
            .ok_or_else(|| InvariantError::StatementNotFound { id: id.clone() })?;
        if !matches!(statement, Statement::Variable(_)) {
            return Err(InvariantError::WrongStatementKind {
                id: id.clone(),
                expected: "variable",
                found: statement.kind_name(),
            });
        }
        Ok(statement)
    }

    // --- Logic ---

    pub fn add_logic(
        &mut self,
        assignments: Vec<LogicAssignment>,
    ) -> Result<StatementId, InvariantError> {
        let id = StatementId::new(self.ids.generate("stmt"));
        self.function
            .add_statement(Statement::logic(id.clone(), assignments))?;
        Ok(id)
    }

    pub fn set_logic_assignments(
        &mut self,
        statement_id: &StatementId,
        assignments: Vec<LogicAssignment>,
    ) -> Result<(), InvariantError> {
        let current = self
            .function
            .statement(statement_id)
            .ok_or_else(|| InvariantError::StatementNotFound {
                id: statement_id.clone(),
            })?;
        if !matches!(current, Statement::Logic(_)) {
            return Err(InvariantError::WrongStatementKind {
                id: statement_id.clone(),
                expected: "logic",
                found: current.kind_name(),
            });
        }
        self.function
            .replace_statement(Statement::logic(statement_id.clone(), assignments))
    }

    // --- Return ---

    /// Creates the return statement, or replaces the source of the existing one.
    pub fn set_return(&mut self, source: ValueSource) -> Result<StatementId, InvariantError> {
        if let Some(existing) = self.function.return_statement() {
            let id = existing.id().clone();
            self.function
                .replace_statement(Statement::returning(id.clone(), source))?;
            return Ok(id);
        }
        let id = StatementId::new(self.ids.generate("stmt"));
        self.function
            .add_statement(Statement::returning(id.clone(), source))?;
        Ok(id)
    }

    pub fn remove_return(&mut self) -> Option<Statement> {
        let id = self.function.return_statement()?.id().clone();
        self.function.remove_statement(&id)
    }

    // --- Statements and flow ---

    pub fn remove_statement(&mut self, id: &StatementId) -> Option<Statement> {
        self.function.remove_statement(id)
    }

    pub fn connect_flow(
        &mut self,
        from: &StatementId,
        to: &StatementId,
    ) -> Result<EdgeId, InvariantError> {
        let id = EdgeId::new(self.ids.generate("edge"));
        self.function.connect_flow(from, to, Some(id))
    }

    pub fn disconnect_flow(&mut self, edge_id: &EdgeId) -> Option<FlowEdge> {
        self.function.disconnect_flow(edge_id)
    }
}
