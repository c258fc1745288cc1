//! Conversions from runtime values to the plain numbers finance code needs.

use crate::errors::{invalid_argument, type_mismatch, EvalError};
use crate::Value;

pub(crate) fn number(value: &Value, what: &str) -> Result<f64, EvalError> {
    match value {
        Value::Number(n) => Ok(*n),
        other => Err(type_mismatch(format!("number for {what}"), other)),
    }
}

/// Numbers of a list or cash flow. List elements must all be numbers.
pub(crate) fn series(value: &Value, what: &str) -> Result<Vec<f64>, EvalError> {
    match value {
        Value::Cashflow(amounts) => Ok(amounts.to_vec()),
        Value::List(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.as_number().ok_or_else(|| {
                    invalid_argument(format!(
                        "{what} index {i} is not a number (found {})",
                        item.type_name()
                    ))
                })
            })
            .collect(),
        other => Err(type_mismatch(format!("list or cashflow for {what}"), other)),
    }
}

/// A count: finite, whole and not negative.
pub(crate) fn count(n: f64, what: &str) -> Result<usize, EvalError> {
    if n.is_finite() && n >= 0.0 && n.fract() == 0.0 {
        Ok(n as usize)
    } else {
        Err(invalid_argument(format!(
            "{what} must be a non-negative whole number, got {}",
            crate::format_number(n)
        )))
    }
}

/// A position into a sequence of `len` items.
pub(crate) fn position(index: &Value, len: usize) -> Result<usize, EvalError> {
    let n = number(index, "index")?;
    if !n.is_finite() || n.fract() != 0.0 {
        return Err(invalid_argument(format!(
            "index {} is not a whole number",
            crate::format_number(n)
        )));
    }
    if n < 0.0 || n >= len as f64 {
        return Err(crate::errors::index_out_of_bounds(n as i64, len));
    }
    Ok(n as usize)
}
