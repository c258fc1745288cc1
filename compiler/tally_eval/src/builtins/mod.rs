//! Native functions installed into the global scope.
//!
//! Each builtin is a plain `fn` matching [`NativeFn`]. Higher-order ones
//! (`MAP`, `FILTER`, `REDUCE`) call back into the interpreter through the
//! [`CallContext`].

use rand::Rng;
use tally_finance::rolling_mean;
use tally_ir::StringInterner;

use crate::errors::{
    arity_mismatch, invalid_argument, invalid_range, type_mismatch, EvalError, EvalResult,
};
use crate::interpreter::CallContext;
use crate::value::{Arity, LedgerValue, NativeFn};
use crate::{Environment, Value};

const BUILTINS: &[(&str, Arity, NativeFn)] = &[
    ("len", Arity::Fixed(1), len),
    ("sum", Arity::Variadic, sum),
    ("avg", Arity::Variadic, avg),
    ("min", Arity::Variadic, min),
    ("max", Arity::Variadic, max),
    ("abs", Arity::Fixed(1), abs),
    ("sqrt", Arity::Fixed(1), sqrt),
    ("round", Arity::Variadic, round),
    ("range", Arity::Variadic, range),
    ("append", Arity::Fixed(2), append),
    ("keys", Arity::Fixed(1), keys),
    ("str", Arity::Fixed(1), to_str),
    ("num", Arity::Fixed(1), num),
    ("type", Arity::Fixed(1), type_of),
    ("MAP", Arity::Fixed(2), map),
    ("FILTER", Arity::Fixed(2), filter),
    ("REDUCE", Arity::Fixed(3), reduce),
    ("timeseries", Arity::Fixed(2), timeseries),
    ("random", Arity::Fixed(0), random),
    ("normal", Arity::Fixed(2), normal),
    ("columns", Arity::Fixed(1), columns),
    ("ledger", Arity::Fixed(0), ledger),
];

/// Define every builtin in the global scope of `env`.
pub fn register_builtins(env: &mut Environment, interner: &StringInterner) {
    for &(name, arity, func) in BUILTINS {
        env.define_global(interner.intern(name), Value::native(name, arity, func));
    }
}

// Argument helpers

fn expect_number(value: &Value, name: &str) -> Result<f64, EvalError> {
    value
        .as_number()
        .ok_or_else(|| type_mismatch(format!("number argument to {name}"), value))
}

/// Numbers of a single list/cashflow argument, or of every argument.
fn numeric_args(args: &[Value], name: &str) -> Result<Vec<f64>, EvalError> {
    match args {
        [Value::List(items)] => items.iter().map(|v| expect_number(v, name)).collect(),
        [Value::Cashflow(amounts)] => Ok(amounts.to_vec()),
        _ => args.iter().map(|v| expect_number(v, name)).collect(),
    }
}

fn expect_items<'v>(value: &'v Value, name: &str) -> Result<&'v [Value], EvalError> {
    match value {
        Value::List(items) => Ok(items),
        other => Err(type_mismatch(format!("list argument to {name}"), other)),
    }
}

fn whole(n: f64, what: &str) -> Result<i64, EvalError> {
    if n.is_finite() && n.fract() == 0.0 {
        Ok(n as i64)
    } else {
        Err(invalid_argument(format!(
            "{what} must be a whole number, got {}",
            crate::format_number(n)
        )))
    }
}

// Collections

fn len(_ctx: &mut CallContext<'_, '_>, args: &[Value]) -> EvalResult {
    let n = match &args[0] {
        Value::List(items) => items.len(),
        Value::Str(s) => s.chars().count(),
        Value::Cashflow(amounts) => amounts.len(),
        Value::Table(table) => table.row_count(),
        Value::Object(object) => object.len(),
        Value::Ledger(ledger) => ledger.count(),
        other => {
            return Err(type_mismatch(
                "list, string, cashflow, table, object or ledger",
                other,
            ))
        }
    };
    Ok(Value::Number(n as f64))
}

fn append(_ctx: &mut CallContext<'_, '_>, args: &[Value]) -> EvalResult {
    match &args[0] {
        Value::List(items) => {
            let mut items = items.to_vec();
            items.push(args[1].clone());
            Ok(Value::list(items))
        }
        Value::Cashflow(amounts) => {
            let mut amounts = amounts.to_vec();
            amounts.push(expect_number(&args[1], "append")?);
            Ok(Value::cashflow(amounts))
        }
        other => Err(type_mismatch("list or cashflow", other)),
    }
}

fn keys(_ctx: &mut CallContext<'_, '_>, args: &[Value]) -> EvalResult {
    let names: Vec<Value> = match &args[0] {
        Value::Object(object) => object.keys().map(Value::string).collect(),
        Value::Table(table) => table.column_names().map(Value::string).collect(),
        other => return Err(type_mismatch("object or table", other)),
    };
    Ok(Value::list(names))
}

fn columns(_ctx: &mut CallContext<'_, '_>, args: &[Value]) -> EvalResult {
    match &args[0] {
        Value::Table(table) => Ok(Value::list(
            table.column_names().map(Value::string).collect(),
        )),
        other => Err(type_mismatch("table", other)),
    }
}

/// `range(end)`, `range(start, end)` or `range(start, end, step)`; the end
/// is exclusive.
fn range(_ctx: &mut CallContext<'_, '_>, args: &[Value]) -> EvalResult {
    let bounds = numeric_args(args, "range")?;
    let (start, end, step) = match bounds.as_slice() {
        [end] => (0.0, *end, 1.0),
        [start, end] => (*start, *end, 1.0),
        [start, end, step] => (*start, *end, *step),
        _ => return Err(arity_mismatch("range", 2, args.len())),
    };
    if step == 0.0 {
        return Err(invalid_range("range step must not be zero"));
    }
    let mut items = Vec::new();
    let mut i = start;
    while (step > 0.0 && i < end) || (step < 0.0 && i > end) {
        items.push(Value::Number(i));
        i += step;
    }
    Ok(Value::list(items))
}

// Numbers

fn sum(_ctx: &mut CallContext<'_, '_>, args: &[Value]) -> EvalResult {
    Ok(Value::Number(numeric_args(args, "sum")?.iter().sum()))
}

fn avg(_ctx: &mut CallContext<'_, '_>, args: &[Value]) -> EvalResult {
    let values = numeric_args(args, "avg")?;
    if values.is_empty() {
        return Err(invalid_argument("avg of no values"));
    }
    Ok(Value::Number(values.iter().sum::<f64>() / values.len() as f64))
}

fn min(_ctx: &mut CallContext<'_, '_>, args: &[Value]) -> EvalResult {
    numeric_args(args, "min")?
        .into_iter()
        .reduce(f64::min)
        .map(Value::Number)
        .ok_or_else(|| invalid_argument("min of no values"))
}

fn max(_ctx: &mut CallContext<'_, '_>, args: &[Value]) -> EvalResult {
    numeric_args(args, "max")?
        .into_iter()
        .reduce(f64::max)
        .map(Value::Number)
        .ok_or_else(|| invalid_argument("max of no values"))
}

fn abs(_ctx: &mut CallContext<'_, '_>, args: &[Value]) -> EvalResult {
    Ok(Value::Number(expect_number(&args[0], "abs")?.abs()))
}

fn sqrt(_ctx: &mut CallContext<'_, '_>, args: &[Value]) -> EvalResult {
    let n = expect_number(&args[0], "sqrt")?;
    if n < 0.0 {
        return Err(invalid_argument(format!(
            "sqrt of negative number {}",
            crate::format_number(n)
        )));
    }
    Ok(Value::Number(n.sqrt()))
}

/// `round(n)` or `round(n, digits)`.
fn round(_ctx: &mut CallContext<'_, '_>, args: &[Value]) -> EvalResult {
    let (n, digits) = match args {
        [n] => (expect_number(n, "round")?, 0),
        [n, digits] => (
            expect_number(n, "round")?,
            whole(expect_number(digits, "round")?, "round digits")?,
        ),
        _ => return Err(arity_mismatch("round", 2, args.len())),
    };
    let scale = 10f64.powi(digits.clamp(-15, 15) as i32);
    Ok(Value::Number((n * scale).round() / scale))
}

// Conversions

fn to_str(_ctx: &mut CallContext<'_, '_>, args: &[Value]) -> EvalResult {
    Ok(Value::string(args[0].to_string()))
}

fn num(_ctx: &mut CallContext<'_, '_>, args: &[Value]) -> EvalResult {
    match &args[0] {
        Value::Number(n) => Ok(Value::Number(*n)),
        Value::Bool(b) => Ok(Value::Number(if *b { 1.0 } else { 0.0 })),
        Value::Str(s) => s
            .trim()
            .parse::<f64>()
            .map(Value::Number)
            .map_err(|_| invalid_argument(format!("cannot convert \"{}\" to a number", &**s))),
        other => Err(type_mismatch("number, bool or string", other)),
    }
}

fn type_of(_ctx: &mut CallContext<'_, '_>, args: &[Value]) -> EvalResult {
    Ok(Value::string(args[0].type_name()))
}

// Higher-order

fn map(ctx: &mut CallContext<'_, '_>, args: &[Value]) -> EvalResult {
    let items = expect_items(&args[0], "MAP")?;
    let f = &args[1];
    let mapped = items
        .iter()
        .map(|item| ctx.call(f, std::slice::from_ref(item)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Value::list(mapped))
}

fn filter(ctx: &mut CallContext<'_, '_>, args: &[Value]) -> EvalResult {
    let items = expect_items(&args[0], "FILTER")?;
    let f = &args[1];
    let mut kept = Vec::new();
    for item in items {
        if ctx.call(f, std::slice::from_ref(item))?.is_truthy() {
            kept.push(item.clone());
        }
    }
    Ok(Value::list(kept))
}

/// `REDUCE(list, f, initial)`: folds left with `f(acc, item)`.
fn reduce(ctx: &mut CallContext<'_, '_>, args: &[Value]) -> EvalResult {
    let items = expect_items(&args[0], "REDUCE")?;
    let f = &args[1];
    let mut acc = args[2].clone();
    for item in items {
        acc = ctx.call(f, &[acc, item.clone()])?;
    }
    Ok(acc)
}

// Finance and randomness

/// Trailing mean over `window` periods, shorter at the start.
fn timeseries(_ctx: &mut CallContext<'_, '_>, args: &[Value]) -> EvalResult {
    let values = numeric_args(&args[..1], "timeseries")?;
    let window = whole(expect_number(&args[1], "timeseries")?, "timeseries window")?;
    let window = usize::try_from(window)
        .map_err(|_| invalid_argument("timeseries window must not be negative"))?;
    Ok(Value::number_list(rolling_mean(&values, window)?))
}

/// Uniform in `[0, 1)` from the interpreter's seeded generator.
fn random(ctx: &mut CallContext<'_, '_>, _args: &[Value]) -> EvalResult {
    Ok(Value::Number(ctx.rng().gen::<f64>()))
}

/// Normal sample by the Box-Muller transform.
fn normal(ctx: &mut CallContext<'_, '_>, args: &[Value]) -> EvalResult {
    let mean = expect_number(&args[0], "normal")?;
    let sd = expect_number(&args[1], "normal")?;
    if sd < 0.0 {
        return Err(invalid_argument("normal standard deviation must not be negative"));
    }
    let rng = ctx.rng();
    let u1 = 1.0 - rng.gen::<f64>();
    let u2 = rng.gen::<f64>();
    let z = (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos();
    Ok(Value::Number(mean + sd * z))
}

fn ledger(_ctx: &mut CallContext<'_, '_>, _args: &[Value]) -> EvalResult {
    Ok(Value::Ledger(LedgerValue::new()))
}
