use super::Scope;
use super::builtins::{arithmetic_operand, call_helper, is_helper};
use crate::ast::{BinaryOp, Expression, UnaryOp, Value};
use crate::error::EvaluationError;

/// The recursive engine walking one parsed expression against a scope.
pub(super) struct AstEngine<'a> {
    expression: &'a Expression,
    scope: &'a Scope,
}

impl<'a> AstEngine<'a> {
    pub(super) fn new(expression: &'a Expression, scope: &'a Scope) -> Self {
        Self { expression, scope }
    }

    pub(super) fn evaluate(&self) -> Result<Value, EvaluationError> {
        self.evaluate_recursive(self.expression)
    }

    fn evaluate_recursive(&self, expr: &Expression) -> Result<Value, EvaluationError> {
        match expr {
            Expression::Literal(value) => Ok(value.clone()),
            Expression::Symbol(name) => self
                .scope
                .get(name)
                .cloned()
                .ok_or_else(|| EvaluationError::UnknownSymbol(name.clone())),
            Expression::Array(items) => items
                .iter()
                .map(|item| self.evaluate_recursive(item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            Expression::Unary(op, operand) => {
                let value = self.evaluate_recursive(operand)?;
                Ok(match op {
                    UnaryOp::Negate => Value::Number(-arithmetic_operand(&value)),
                    UnaryOp::Plus => Value::Number(arithmetic_operand(&value)),
                    UnaryOp::Not => Value::Bool(!value.is_truthy()),
                })
            }

            // --- Logical Operations (short-circuit, yield operand values) ---
            Expression::Binary(BinaryOp::And, l, r) => {
                let left = self.evaluate_recursive(l)?;
                if !left.is_truthy() {
                    return Ok(left);
                }
                self.evaluate_recursive(r)
            }
            Expression::Binary(BinaryOp::Or, l, r) => {
                let left = self.evaluate_recursive(l)?;
                if left.is_truthy() {
                    return Ok(left);
                }
                self.evaluate_recursive(r)
            }

            Expression::Binary(op, l, r) => {
                let left = self.evaluate_recursive(l)?;
                let right = self.evaluate_recursive(r)?;
                Ok(apply_binary(*op, &left, &right))
            }
            Expression::Conditional {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate_recursive(condition)?.is_truthy() {
                    self.evaluate_recursive(then_branch)
                } else {
                    self.evaluate_recursive(else_branch)
                }
            }
            Expression::Call { callee, args } => {
                if !is_helper(callee) {
                    return Err(EvaluationError::UnknownFunction(callee.clone()));
                }
                let values = args
                    .iter()
                    .map(|arg| self.evaluate_recursive(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                call_helper(callee, &values)
            }
            Expression::Member { object, property } => {
                let target = self.evaluate_recursive(object)?;
                self.member(&target, property)
            }
            Expression::Index { object, index } => {
                let target = self.evaluate_recursive(object)?;
                let key = self.evaluate_recursive(index)?;
                self.index(&target, &key)
            }
        }
    }

    fn member(&self, target: &Value, property: &str) -> Result<Value, EvaluationError> {
        match (target, property) {
            (Value::Null, _) => Err(self.type_mismatch(&format!(".{}", property), target)),
            (Value::Array(items), "length") => Ok(Value::Number(items.len() as f64)),
            (Value::String(s), "length") => Ok(Value::Number(s.chars().count() as f64)),
            (Value::Object(map), key) => Ok(map.get(key).cloned().unwrap_or(Value::Null)),
            _ => Ok(Value::Null),
        }
    }

    fn index(&self, target: &Value, key: &Value) -> Result<Value, EvaluationError> {
        match target {
            Value::Null => Err(self.type_mismatch(&format!("[{}]", key), target)),
            Value::Array(items) => Ok(array_position(key, items.len())
                .map(|i| items[i].clone())
                .unwrap_or(Value::Null)),
            Value::String(s) => Ok(array_position(key, s.chars().count())
                .and_then(|i| s.chars().nth(i))
                .map(|c| Value::String(c.to_string()))
                .unwrap_or(Value::Null)),
            Value::Object(map) => Ok(map.get(&key.to_string()).cloned().unwrap_or(Value::Null)),
            _ => Ok(Value::Null),
        }
    }

    fn type_mismatch(&self, op: &str, found: &Value) -> EvaluationError {
        EvaluationError::TypeMismatch {
            operation: op.to_string(),
            expected: "array, string or object".to_string(),
            found: found.clone(),
        }
    }
}

/// Applies a non-short-circuiting binary operator.
fn apply_binary(op: BinaryOp, left: &Value, right: &Value) -> Value {
    match op {
        BinaryOp::Add => match (left, right) {
            (Value::String(_), _) | (_, Value::String(_)) => {
                Value::String(format!("{}{}", left, right))
            }
            _ => numeric(left, right, |a, b| a + b),
        },
        BinaryOp::Subtract => numeric(left, right, |a, b| a - b),
        BinaryOp::Multiply => numeric(left, right, |a, b| a * b),
        BinaryOp::Divide => numeric(left, right, |a, b| a / b),
        BinaryOp::Remainder => numeric(left, right, |a, b| a % b),
        BinaryOp::Power => numeric(left, right, f64::powf),
        BinaryOp::Less => compare(left, right, |o| o.is_lt()),
        BinaryOp::LessOrEqual => compare(left, right, |o| o.is_le()),
        BinaryOp::Greater => compare(left, right, |o| o.is_gt()),
        BinaryOp::GreaterOrEqual => compare(left, right, |o| o.is_ge()),
        BinaryOp::Equal => Value::Bool(loose_equals(left, right)),
        BinaryOp::NotEqual => Value::Bool(!loose_equals(left, right)),
        BinaryOp::StrictEqual => Value::Bool(strict_equals(left, right)),
        BinaryOp::StrictNotEqual => Value::Bool(!strict_equals(left, right)),
        // Handled with short-circuiting by the engine.
        BinaryOp::And | BinaryOp::Or => Value::Null,
    }
}

fn numeric<F>(left: &Value, right: &Value, f: F) -> Value
where
    F: Fn(f64, f64) -> f64,
{
    Value::Number(f(arithmetic_operand(left), arithmetic_operand(right)))
}

fn compare<F>(left: &Value, right: &Value, f: F) -> Value
where
    F: Fn(std::cmp::Ordering) -> bool,
{
    let ordering = match (left, right) {
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        _ => arithmetic_operand(left).partial_cmp(&arithmetic_operand(right)),
    };
    // Any comparison involving NaN is false.
    Value::Bool(ordering.is_some_and(f))
}

fn strict_equals(left: &Value, right: &Value) -> bool {
    left == right
}

fn loose_equals(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        (Value::Number(_) | Value::String(_) | Value::Bool(_), Value::Number(_) | Value::Bool(_))
        | (Value::Number(_) | Value::Bool(_), Value::String(_)) => {
            arithmetic_operand(left) == arithmetic_operand(right)
        }
        _ => left == right,
    }
}

/// Resolves a numeric key to an in-bounds position.
fn array_position(key: &Value, len: usize) -> Option<usize> {
    let n = key.as_f64()?;
    if n.fract() != 0.0 || n < 0.0 || n >= len as f64 {
        return None;
    }
    Some(n as usize)
}
