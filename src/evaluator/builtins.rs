use crate::ast::Value;
use crate::error::EvaluationError;

/// Names of the helpers injected into every expression.
pub const HELPERS: [&str; 4] = ["sum", "avg", "max", "min"];

pub fn is_helper(name: &str) -> bool {
    HELPERS.contains(&name)
}

/// General numeric coercion.
///
/// Numbers pass through, finite numeric strings parse, booleans become 0/1,
/// everything else has no numeric reading.
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => Some(*n),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
        }
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Same rule as [`coerce_number`], but yields `Value::Null` when there is no numeric reading.
pub fn coerce_number_or_null(value: &Value) -> Value {
    coerce_number(value).map_or(Value::Null, Value::Number)
}

/// Numeric operand for arithmetic: `null` counts as 0, anything unreadable is NaN.
pub(super) fn arithmetic_operand(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        other => coerce_number(other).unwrap_or(f64::NAN),
    }
}

/// Invokes one of the aggregate helpers.
pub(super) fn call_helper(name: &str, args: &[Value]) -> Result<Value, EvaluationError> {
    match name {
        "sum" => {
            let items = numeric_items(name, args)?;
            Ok(Value::Number(items.iter().sum()))
        }
        "avg" => {
            let items = numeric_items(name, args)?;
            Ok(Value::Number(items.iter().sum::<f64>() / items.len() as f64))
        }
        "max" => {
            let items = numeric_items(name, args)?;
            Ok(Value::Number(items.into_iter().fold(f64::NEG_INFINITY, f64::max)))
        }
        "min" => {
            let items = numeric_items(name, args)?;
            Ok(Value::Number(items.into_iter().fold(f64::INFINITY, f64::min)))
        }
        other => Err(EvaluationError::UnknownFunction(other.to_string())),
    }
}

/// Extracts the numeric-coercible items of the helper's array argument.
/// Items without a numeric reading are skipped.
fn numeric_items(name: &str, args: &[Value]) -> Result<Vec<f64>, EvaluationError> {
    let Some(Value::Array(items)) = args.first() else {
        return Err(EvaluationError::NotAnArray {
            function: name.to_string(),
        });
    };
    let numbers: Vec<f64> = items
        .iter()
        .filter_map(coerce_number)
        .filter(|n| !n.is_nan())
        .collect();
    if numbers.is_empty() {
        return Err(EvaluationError::NoNumericItems {
            function: name.to_string(),
        });
    }
    Ok(numbers)
}
