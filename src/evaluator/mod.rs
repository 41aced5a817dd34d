use crate::ast::{Expression, Value, ValueSource};
use crate::error::EvaluationError;
use indexmap::IndexMap;

mod builtins;
mod engine;
pub mod lexer;
pub mod parser;

pub use builtins::{HELPERS, coerce_number, coerce_number_or_null, is_helper};
use engine::AstEngine;
pub use parser::{MAX_EXPRESSION_DEPTH, MAX_EXPRESSION_NESTING};
use parser::Parser;

/// Symbol table an expression is evaluated against.
pub type Scope = IndexMap<String, Value>;

/// Evaluates value sources against a scope.
///
/// The evaluator holds no state between calls: expressions are parsed and
/// walked afresh on every evaluation, so the same source and scope always
/// produce the same result.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpressionEvaluator;

impl ExpressionEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Evaluates a value source.
    ///
    /// # Returns
    ///
    /// * literals: the stored value, verbatim.
    /// * symbol references: the scope's value, or `UnknownSymbol` when absent.
    /// * expressions: the result of interpreting the parsed expression. Only
    ///   the scope's names and the `sum`/`avg`/`max`/`min` helpers are reachable.
    pub fn evaluate(&self, source: &ValueSource, scope: &Scope) -> Result<Value, EvaluationError> {
        match source {
            ValueSource::Literal { value } => Ok(value.clone()),
            ValueSource::SymbolRef { name } => scope
                .get(name)
                .cloned()
                .ok_or_else(|| EvaluationError::UnknownSymbol(name.clone())),
            ValueSource::Expression { expr } => self.evaluate_str(expr, scope),
        }
    }

    /// Parses and evaluates an expression string.
    pub fn evaluate_str(&self, expr: &str, scope: &Scope) -> Result<Value, EvaluationError> {
        let expression = Self::parse(expr)?;
        self.evaluate_expression(&expression, scope)
    }

    pub fn evaluate_expression(
        &self,
        expression: &Expression,
        scope: &Scope,
    ) -> Result<Value, EvaluationError> {
        AstEngine::new(expression, scope).evaluate()
    }

    pub fn parse(expr: &str) -> Result<Expression, EvaluationError> {
        Parser::parse(expr)
    }
}
