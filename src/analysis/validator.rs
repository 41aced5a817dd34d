use super::planner::ExecutionPlanner;
use super::scope::{ScopeResolver, SymbolOrigin};
use crate::ast::ValueSource;
use crate::error::ValidationError;
use crate::evaluator::ExpressionEvaluator;
use crate::function::{FunctionDefinition, Statement};
use crate::id::StatementId;
use ahash::{AHashMap, AHashSet};
use tracing::warn;

/// Whole-function checks that individual mutations do not perform.
///
/// `validate` runs three passes and stops at the first failure:
///
/// 1. acyclicity, by building the execution plan;
/// 2. name uniqueness across parameters, variable declarations and logic
///    outputs, walked in plan order with a single running set;
/// 3. every symbol reference resolves within the referencing statement's
///    visible symbols.
#[derive(Debug, Clone, Default)]
pub struct FunctionValidator {
    check_expression_references: bool,
}

pub struct FunctionValidatorBuilder {
    check_expression_references: bool,
}

impl FunctionValidatorBuilder {
    pub fn new() -> Self {
        Self {
            check_expression_references: false,
        }
    }

    /// Also parse expression sources and logic assignments, and resolve the
    /// identifiers they mention.
    pub fn check_expression_references(mut self, enabled: bool) -> Self {
        self.check_expression_references = enabled;
        self
    }

    pub fn build(self) -> FunctionValidator {
        FunctionValidator {
            check_expression_references: self.check_expression_references,
        }
    }
}

impl Default for FunctionValidatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FunctionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> FunctionValidatorBuilder {
        FunctionValidatorBuilder::new()
    }

    pub fn checks_expression_references(&self) -> bool {
        self.check_expression_references
    }

    pub fn validate(&self, function: &FunctionDefinition) -> Result<(), ValidationError> {
        let plan = ExecutionPlanner::topo_order(function)?;
        let result = self
            .check_unique_names(function, &plan)
            .and_then(|_| self.check_references(function, &plan));
        if let Err(err) = &result {
            warn!(function = %function.id(), code = err.code(), error = %err, "function failed validation");
        }
        result
    }

    fn check_unique_names(
        &self,
        function: &FunctionDefinition,
        plan: &[StatementId],
    ) -> Result<(), ValidationError> {
        let mut seen: AHashMap<&str, SymbolOrigin> = AHashMap::new();

        for parameter in function.parameters() {
            if seen
                .insert(parameter.name.as_str(), SymbolOrigin::Parameter)
                .is_some()
            {
                return Err(ValidationError::DuplicateParameterName {
                    name: parameter.name.clone(),
                });
            }
        }

        for statement in plan.iter().filter_map(|id| function.statement(id)) {
            for name in statement.produced_symbols() {
                let origin = SymbolOrigin::Statement(statement.id().clone());
                if let Some(previous) = seen.insert(name, origin) {
                    return Err(ValidationError::DuplicateVariableName {
                        name: name.to_string(),
                        statement: statement.id().clone(),
                        previous: previous.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    fn check_references(
        &self,
        function: &FunctionDefinition,
        plan: &[StatementId],
    ) -> Result<(), ValidationError> {
        for statement in plan.iter().filter_map(|id| function.statement(id)) {
            let visible: AHashSet<String> = ScopeResolver::visible_names(function, statement.id())
                .into_iter()
                .collect();

            for symbol in statement.symbol_refs() {
                if !visible.contains(symbol) {
                    return Err(ValidationError::UnresolvedReference {
                        statement: statement.id().clone(),
                        symbol: symbol.to_string(),
                    });
                }
            }

            if self.check_expression_references {
                self.check_expression_symbols(statement, &visible)?;
            }
        }
        Ok(())
    }

    /// Resolves the free identifiers of every expression in the statement.
    /// Outputs declared earlier in the same statement are also in scope.
    fn check_expression_symbols(
        &self,
        statement: &Statement,
        visible: &AHashSet<String>,
    ) -> Result<(), ValidationError> {
        let mut local: AHashSet<&str> = AHashSet::new();

        let check = |expr: &str, local: &AHashSet<&str>| -> Result<(), ValidationError> {
            let parsed = ExpressionEvaluator::parse(expr).map_err(|e| {
                ValidationError::InvalidExpression {
                    statement: statement.id().clone(),
                    expression: expr.to_string(),
                    message: e.to_string(),
                }
            })?;
            for symbol in parsed.free_symbols() {
                if !visible.contains(&symbol) && !local.contains(symbol.as_str()) {
                    return Err(ValidationError::UnresolvedReference {
                        statement: statement.id().clone(),
                        symbol,
                    });
                }
            }
            Ok(())
        };

        match statement {
            Statement::Variable(s) => {
                for declaration in &s.declarations {
                    if let ValueSource::Expression { expr } = &declaration.source {
                        check(expr, &local)?;
                    }
                    local.insert(declaration.name.as_str());
                }
            }
            Statement::Logic(s) => {
                for assignment in &s.assignments {
                    check(&assignment.expression, &local)?;
                    local.insert(assignment.output.as_str());
                }
            }
            Statement::Return(s) => {
                if let ValueSource::Expression { expr } = &s.source {
                    check(expr, &local)?;
                }
            }
        }
        Ok(())
    }
}
