//! Indexing, slicing and field access.

use super::coerce::position;
use crate::errors::{
    invalid_argument, invalid_range, type_mismatch, unknown_column, unknown_field, EvalError,
    EvalResult,
};
use crate::Value;

/// `receiver[index]`
pub(crate) fn index(receiver: &Value, index: &Value) -> EvalResult {
    match (receiver, index) {
        (Value::List(items), _) => Ok(items[position(index, items.len())?].clone()),
        (Value::Cashflow(amounts), _) => {
            Ok(Value::Number(amounts[position(index, amounts.len())?]))
        }
        (Value::Str(s), _) => {
            let i = position(index, s.chars().count())?;
            Ok(s.chars().nth(i).map_or(Value::Nothing, Value::string))
        }
        (Value::Table(table), Value::Str(column)) => table
            .column(column)
            .map(|values| Value::number_list(values.iter().copied()))
            .ok_or_else(|| unknown_column(column)),
        (Value::Table(table), _) => {
            let i = position(index, table.row_count())?;
            Ok(table.row(i).map_or(Value::Nothing, Value::object))
        }
        (Value::Object(object), Value::Str(key)) => object
            .get(key)
            .cloned()
            .ok_or_else(|| unknown_field(key, receiver)),
        (Value::Ledger(ledger), _) => {
            let entries = ledger.entries();
            let i = position(index, entries.len())?;
            Ok(Value::ledger_entry(entries[i].clone()))
        }
        (other, _) => Err(type_mismatch(
            "list, string, cashflow, table or object to index",
            other,
        )),
    }
}

/// Resolve `[start:end]` against a length. `start` defaults to 0, `end`
/// to the length, and an `end` past the length is clamped to it.
fn slice_bounds(start: Option<f64>, end: Option<f64>, len: usize) -> Result<(usize, usize), EvalError> {
    let start = start.unwrap_or(0.0);
    let end = end.unwrap_or(len as f64);
    for bound in [start, end] {
        if !bound.is_finite() || bound.fract() != 0.0 {
            return Err(invalid_argument(format!(
                "slice bound {} is not a whole number",
                crate::format_number(bound)
            )));
        }
    }
    if start < 0.0 {
        return Err(invalid_range(format!(
            "slice start {} is negative",
            crate::format_number(start)
        )));
    }
    if start > len as f64 {
        return Err(invalid_range(format!(
            "slice start {} is past the end (length {len})",
            crate::format_number(start)
        )));
    }
    let end = end.min(len as f64);
    if end < start {
        return Err(invalid_range(format!(
            "slice end {} is before start {}",
            crate::format_number(end),
            crate::format_number(start)
        )));
    }
    Ok((start as usize, end as usize))
}

/// `receiver[start:end]`, end exclusive.
pub(crate) fn slice(receiver: &Value, start: Option<f64>, end: Option<f64>) -> EvalResult {
    match receiver {
        Value::List(items) => {
            let (start, end) = slice_bounds(start, end, items.len())?;
            Ok(Value::list(items[start..end].to_vec()))
        }
        Value::Cashflow(amounts) => {
            let (start, end) = slice_bounds(start, end, amounts.len())?;
            Ok(Value::cashflow(amounts[start..end].to_vec()))
        }
        Value::Str(s) => {
            let (start, end) = slice_bounds(start, end, s.chars().count())?;
            Ok(Value::string(
                s.chars().skip(start).take(end - start).collect::<String>(),
            ))
        }
        other => Err(type_mismatch("list, string or cashflow to slice", other)),
    }
}

/// `receiver.field`: a table column, an object field, or a property of a
/// finance value.
pub(crate) fn field(receiver: &Value, name: &str) -> EvalResult {
    let found = match receiver {
        Value::Table(table) => {
            return table
                .column(name)
                .map(|values| Value::number_list(values.iter().copied()))
                .ok_or_else(|| unknown_column(name));
        }
        Value::Object(object) => object.get(name).cloned(),
        Value::Ledger(ledger) => match name {
            "balance" => Some(Value::Number(ledger.balance())),
            "debits" => Some(Value::Number(ledger.debits())),
            "credits" => Some(Value::Number(ledger.credits())),
            "count" => Some(Value::Number(ledger.count() as f64)),
            "entries" => Some(Value::list(
                ledger
                    .entries()
                    .iter()
                    .cloned()
                    .map(Value::ledger_entry)
                    .collect(),
            )),
            _ => None,
        },
        Value::LedgerEntry(entry) => match name {
            "date" => Some(Value::string(entry.date.as_str())),
            "debit" => Some(entry.debit.map_or(Value::Nothing, Value::Number)),
            "credit" => Some(entry.credit.map_or(Value::Nothing, Value::Number)),
            "description" => Some(Value::string(entry.description.as_str())),
            _ => None,
        },
        Value::Portfolio(portfolio) => match name {
            "assets" => Some(Value::number_list(portfolio.assets().iter().copied())),
            "weights" => Some(Value::number_list(portfolio.weights().iter().copied())),
            "expected_return" => Some(Value::Number(portfolio.expected_return())),
            _ => None,
        },
        Value::Cashflow(amounts) => match name {
            "amounts" => Some(Value::number_list(amounts.iter().copied())),
            "total" => Some(Value::Number(amounts.iter().sum())),
            "periods" => Some(Value::Number(amounts.len() as f64)),
            _ => None,
        },
        _ => None,
    };
    found.ok_or_else(|| unknown_field(name, receiver))
}
