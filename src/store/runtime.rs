use crate::analysis::ExecutionPlanner;
use crate::ast::Value;
use crate::error::{DomainError, EvaluationError};
use crate::evaluator::{ExpressionEvaluator, Scope, coerce_number_or_null};
use crate::function::{FunctionDefinition, Statement};
use crate::id::StatementId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Error key used when no execution plan could be built.
pub const PLAN_ERROR_KEY: &str = "__plan__";
/// Error key used when the return statement fails to evaluate.
pub const RETURN_KEY: &str = "__return__";

/// Best-effort preview of every symbol's value.
///
/// `values` holds parameters and every symbol that evaluated successfully, in
/// plan order. `errors` maps each failing symbol (or one of the reserved keys)
/// to its error message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeValues {
    pub values: IndexMap<String, Value>,
    pub errors: IndexMap<String, String>,
    pub return_value: Option<Value>,
}

impl RuntimeValues {
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Outcome of one pass over the plan, one `Result` per symbol.
struct RuntimePass {
    symbols: IndexMap<String, Result<Value, EvaluationError>>,
    return_value: Option<Result<Value, EvaluationError>>,
}

/// Walks the plan once, evaluating every declaration against an accumulating
/// scope. A failed symbol is seeded as `NaN` so later statements can still run.
fn run_pass(function: &FunctionDefinition, plan: &[StatementId], inputs: &Scope) -> RuntimePass {
    let evaluator = ExpressionEvaluator::new();
    let mut scope = Scope::new();
    let mut symbols: IndexMap<String, Result<Value, EvaluationError>> = IndexMap::new();

    for param in function.parameters() {
        let value = seed_parameter(inputs.get(&param.name));
        scope.insert(param.name.clone(), value.clone());
        symbols.insert(param.name.clone(), Ok(value));
    }

    let mut record = |name: &str, result: Result<Value, EvaluationError>, scope: &mut Scope| {
        match &result {
            Ok(value) => {
                scope.insert(name.to_string(), value.clone());
            }
            Err(err) => {
                debug!(function = %function.id(), symbol = %name, error = %err, "symbol failed to evaluate");
                scope.insert(name.to_string(), Value::Number(f64::NAN));
            }
        }
        symbols.insert(name.to_string(), result);
    };

    for statement in plan.iter().filter_map(|id| function.statement(id)) {
        match statement {
            Statement::Variable(s) => {
                for declaration in &s.declarations {
                    let result = evaluator.evaluate(&declaration.source, &scope);
                    record(&declaration.name, result, &mut scope);
                }
            }
            Statement::Logic(s) => {
                for assignment in &s.assignments {
                    let result = evaluator.evaluate_str(&assignment.expression, &scope);
                    record(&assignment.output, result, &mut scope);
                }
            }
            // Evaluated after every other statement.
            Statement::Return(_) => {}
        }
    }

    let return_value = match function.return_statement() {
        Some(Statement::Return(s)) => Some(evaluator.evaluate(&s.source, &scope)),
        _ => None,
    };

    RuntimePass {
        symbols,
        return_value,
    }
}

/// Scalars go through numeric coercion, arrays pass through, anything else is null.
fn seed_parameter(input: Option<&Value>) -> Value {
    match input {
        Some(Value::Array(items)) => Value::Array(items.clone()),
        Some(scalar @ (Value::Number(_) | Value::String(_) | Value::Bool(_))) => {
            coerce_number_or_null(scalar)
        }
        _ => Value::Null,
    }
}

/// Evaluates as much of the function as possible without failing as a whole.
///
/// When the flow graph has a cycle the result is empty apart from a single
/// error under [`PLAN_ERROR_KEY`].
pub fn compute_runtime_values(function: &FunctionDefinition, inputs: &Scope) -> RuntimeValues {
    let plan = match ExecutionPlanner::topo_order(function) {
        Ok(plan) => plan,
        Err(err) => {
            let mut errors = IndexMap::new();
            errors.insert(PLAN_ERROR_KEY.to_string(), err.to_string());
            return RuntimeValues {
                errors,
                ..RuntimeValues::default()
            };
        }
    };

    let pass = run_pass(function, &plan, inputs);
    let mut runtime = RuntimeValues::default();
    for (name, result) in pass.symbols {
        match result {
            Ok(value) => {
                runtime.values.insert(name, value);
            }
            Err(err) => {
                runtime.errors.insert(name, err.to_string());
            }
        }
    }
    match pass.return_value {
        Some(Ok(value)) => runtime.return_value = Some(value),
        Some(Err(err)) => {
            runtime.errors.insert(RETURN_KEY.to_string(), err.to_string());
        }
        None => {}
    }

    debug!(
        function = %function.id(),
        values = runtime.values.len(),
        errors = runtime.errors.len(),
        "computed runtime values"
    );
    runtime
}

/// The function's result, or `None` when it has no return statement.
///
/// Unlike [`compute_runtime_values`] this fails on a cyclic flow graph or when
/// the return source itself cannot be evaluated. Failures of intermediate
/// symbols only matter through the `NaN` they leave behind.
pub fn compute_return_value(
    function: &FunctionDefinition,
    inputs: &Scope,
) -> Result<Option<Value>, DomainError> {
    let plan = ExecutionPlanner::topo_order(function)?;
    let pass = run_pass(function, &plan, inputs);
    match pass.return_value {
        Some(result) => Ok(Some(result?)),
        None => Ok(None),
    }
}
