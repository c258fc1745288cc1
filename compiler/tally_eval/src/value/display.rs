//! Printed form of values, used by `PRINT`, `str` and string concatenation.

use std::fmt::{self, Write};

use super::{FunctionValue, LedgerEntry, TableValue, Value};

/// Integral numbers print without a fractional part.
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// A column holding any fractional value is printed to cents throughout, so
/// its decimal points line up; all-integer columns print bare.
fn format_column(values: &[f64]) -> Vec<String> {
    let cents = values.iter().any(|n| n.is_finite() && n.fract() != 0.0);
    values
        .iter()
        .map(|n| {
            if cents && n.is_finite() {
                format!("{n:.2}")
            } else {
                format_number(*n)
            }
        })
        .collect()
}

fn write_joined<'v>(
    f: &mut fmt::Formatter<'_>,
    items: impl IntoIterator<Item = &'v Value>,
) -> fmt::Result {
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write_nested(f, item)?;
    }
    Ok(())
}

fn write_numbers(f: &mut fmt::Formatter<'_>, values: &[f64]) -> fmt::Result {
    for (i, n) in values.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        f.write_str(&format_number(*n))?;
    }
    Ok(())
}

/// Strings inside collections are quoted; everything else prints as usual.
fn write_nested(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::Str(s) => write!(f, "\"{}\"", &**s),
        other => write!(f, "{other}"),
    }
}

fn write_table(f: &mut fmt::Formatter<'_>, table: &TableValue) -> fmt::Result {
    let cells: Vec<Vec<String>> = table
        .columns()
        .iter()
        .map(|(_, values)| format_column(values))
        .collect();
    let widths: Vec<usize> = table
        .columns()
        .iter()
        .zip(&cells)
        .map(|((name, _), column)| {
            column
                .iter()
                .map(String::len)
                .chain(std::iter::once(name.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let header: Vec<String> = table
        .column_names()
        .zip(&widths)
        .map(|(name, width)| format!("{name:>width$}"))
        .collect();
    out.push_str(&header.join("  "));
    out.push('\n');
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("  "));
    for row in 0..table.row_count() {
        out.push('\n');
        let line: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(column, width)| format!("{:>width$}", column[row]))
            .collect();
        out.push_str(&line.join("  "));
    }
    f.write_str(&out)
}

fn write_entry(f: &mut fmt::Formatter<'_>, entry: &LedgerEntry) -> fmt::Result {
    if !entry.date.is_empty() {
        write!(f, "{} ", entry.date)?;
    }
    match (entry.debit, entry.credit) {
        (Some(d), _) => write!(f, "debit {}", format_number(d))?,
        (None, Some(c)) => write!(f, "credit {}", format_number(c))?,
        (None, None) => f.write_str("empty")?,
    }
    if !entry.description.is_empty() {
        write!(f, " \"{}\"", entry.description)?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nothing => f.write_str("null"),
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Str(s) => f.write_str(s),
            Value::List(items) => {
                f.write_char('[')?;
                write_joined(f, items.iter())?;
                f.write_char(']')
            }
            Value::Table(table) => write_table(f, table),
            Value::Portfolio(p) => {
                f.write_str("Portfolio(assets: [")?;
                write_numbers(f, p.assets())?;
                f.write_str("], weights: [")?;
                write_numbers(f, p.weights())?;
                f.write_str("])")
            }
            Value::Cashflow(amounts) => {
                f.write_str("Cashflow[")?;
                write_numbers(f, amounts)?;
                f.write_char(']')
            }
            Value::Ledger(ledger) => write!(
                f,
                "Ledger({} entries, balance {})",
                ledger.count(),
                format_number(ledger.balance())
            ),
            Value::LedgerEntry(entry) => write_entry(f, entry),
            Value::Function(FunctionValue::Native(native)) => {
                write!(f, "<builtin {}>", native.name)
            }
            Value::Function(FunctionValue::User(user)) => write!(f, "<function {}>", user.name),
            Value::Block(block) => write!(f, "<scenario {}>", block.name),
            Value::Lambda(lambda) => write!(f, "<lambda/{}>", lambda.params.len()),
            Value::Object(object) => {
                f.write_char('{')?;
                for (i, (key, value)) in object.fields().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: ")?;
                    write_nested(f, value)?;
                }
                f.write_char('}')
            }
        }
    }
}
