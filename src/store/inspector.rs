use super::runtime::{RuntimeValues, compute_return_value, compute_runtime_values};
use super::snapshot::FunctionSnapshot;
use crate::analysis::{ExecutionPlanner, FunctionValidator, ScopeResolver, SymbolInfo};
use crate::ast::Value;
use crate::error::{DomainError, ValidationError};
use crate::evaluator::Scope;
use crate::function::{FlowEdge, FunctionDefinition, FunctionParameter, Statement};
use crate::id::StatementId;

/// Query side of a single function. Never mutates.
#[derive(Clone, Copy)]
pub struct FunctionInspector<'a> {
    function: &'a FunctionDefinition,
    validator: &'a FunctionValidator,
}

impl<'a> FunctionInspector<'a> {
    pub fn new(function: &'a FunctionDefinition, validator: &'a FunctionValidator) -> Self {
        Self {
            function,
            validator,
        }
    }

    pub fn function(&self) -> &'a FunctionDefinition {
        self.function
    }

    pub fn parameters(&self) -> Vec<FunctionParameter> {
        self.function.list_parameters()
    }

    pub fn statements(&self) -> Vec<Statement> {
        self.function.list_statements()
    }

    pub fn statement(&self, id: &StatementId) -> Option<Statement> {
        self.function.get_statement(id)
    }

    pub fn edges(&self) -> Vec<FlowEdge> {
        self.function.list_edges()
    }

    pub fn execution_plan(&self) -> Result<Vec<StatementId>, ValidationError> {
        ExecutionPlanner::topo_order(self.function)
    }

    pub fn visible_symbols(&self, statement_id: &StatementId) -> Vec<SymbolInfo> {
        ScopeResolver::visible_symbols(self.function, statement_id)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.validator.validate(self.function)
    }

    pub fn runtime_values(&self, inputs: &Scope) -> RuntimeValues {
        compute_runtime_values(self.function, inputs)
    }

    pub fn return_value(&self, inputs: &Scope) -> Result<Option<Value>, DomainError> {
        compute_return_value(self.function, inputs)
    }

    pub fn snapshot(&self) -> FunctionSnapshot {
        FunctionSnapshot::capture(self.function)
    }
}
