//! Binary and unary operators on evaluated operands.
//!
//! `and`/`or` short-circuit in the interpreter; the versions here only see
//! both sides already evaluated.

use tally_finance::zip_with;
use tally_ir::{BinaryOp, UnaryOp};

use crate::errors::{division_by_zero, invalid_operand, type_mismatch, EvalResult};
use crate::Value;

/// Apply `op` to two evaluated operands.
pub fn evaluate_binary(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Eq => return Ok(Value::Bool(left == right)),
        BinaryOp::NotEq => return Ok(Value::Bool(left != right)),
        BinaryOp::And => return Ok(Value::Bool(left.is_truthy() && right.is_truthy())),
        BinaryOp::Or => return Ok(Value::Bool(left.is_truthy() || right.is_truthy())),
        _ => {}
    }

    match (left, right) {
        (Value::Number(a), Value::Number(b)) => eval_number_binary(*a, *b, op),
        (Value::Str(a), Value::Str(b)) if op.is_comparison() => {
            Ok(Value::Bool(compare(&**a, &**b, op)))
        }
        (Value::Str(_), _) | (_, Value::Str(_)) if op == BinaryOp::Add => {
            Ok(Value::string(format!("{left}{right}")))
        }
        (Value::List(a), Value::List(b)) if matches!(op, BinaryOp::Add | BinaryOp::Sub) => {
            let items = a
                .iter()
                .zip(b.iter())
                .map(|(x, y)| evaluate_binary(x, y, op))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::list(items))
        }
        (Value::Cashflow(a), Value::Cashflow(b)) if matches!(op, BinaryOp::Add | BinaryOp::Sub) => {
            let amounts = if op == BinaryOp::Add {
                zip_with(a, b, |x, y| x + y)
            } else {
                zip_with(a, b, |x, y| x - y)
            };
            Ok(Value::cashflow(amounts))
        }
        (Value::Number(k), Value::List(items)) | (Value::List(items), Value::Number(k))
            if op == BinaryOp::Mul =>
        {
            let scaled = items
                .iter()
                .map(|item| evaluate_binary(item, &Value::Number(*k), BinaryOp::Mul))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::list(scaled))
        }
        (Value::Number(k), Value::Cashflow(amounts))
        | (Value::Cashflow(amounts), Value::Number(k))
            if op == BinaryOp::Mul =>
        {
            Ok(Value::cashflow(amounts.iter().map(|a| a * k).collect()))
        }
        _ => Err(invalid_operand(op, left, right)),
    }
}

fn eval_number_binary(a: f64, b: f64, op: BinaryOp) -> EvalResult {
    let value = match op {
        BinaryOp::Add => Value::Number(a + b),
        BinaryOp::Sub => Value::Number(a - b),
        BinaryOp::Mul => Value::Number(a * b),
        BinaryOp::Div => {
            if b == 0.0 {
                return Err(division_by_zero());
            }
            Value::Number(a / b)
        }
        BinaryOp::Mod => {
            if b == 0.0 {
                return Err(division_by_zero());
            }
            Value::Number(a % b)
        }
        BinaryOp::Pow => Value::Number(a.powf(b)),
        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
            Value::Bool(compare(&a, &b, op))
        }
        BinaryOp::Eq => Value::Bool(a == b),
        BinaryOp::NotEq => Value::Bool(a != b),
        BinaryOp::And => Value::Bool(a != 0.0 && b != 0.0),
        BinaryOp::Or => Value::Bool(a != 0.0 || b != 0.0),
    };
    Ok(value)
}

fn compare<T: PartialOrd + ?Sized>(a: &T, b: &T, op: BinaryOp) -> bool {
    match op {
        BinaryOp::Lt => a < b,
        BinaryOp::LtEq => a <= b,
        BinaryOp::Gt => a > b,
        BinaryOp::GtEq => a >= b,
        _ => false,
    }
}

/// Apply a unary operator.
pub fn evaluate_unary(op: UnaryOp, operand: &Value) -> EvalResult {
    match (op, operand) {
        (UnaryOp::Not, v) => Ok(Value::Bool(!v.is_truthy())),
        (UnaryOp::Neg, Value::Number(n)) => Ok(Value::Number(-n)),
        (UnaryOp::Neg, Value::List(items)) => {
            let negated = items
                .iter()
                .map(|item| evaluate_unary(UnaryOp::Neg, item))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::list(negated))
        }
        (UnaryOp::Neg, Value::Cashflow(amounts)) => {
            Ok(Value::cashflow(amounts.iter().map(|a| -a).collect()))
        }
        (UnaryOp::Neg, other) => Err(type_mismatch("number, list or cashflow", other)),
    }
}

#[cfg(test)]
mod tests;
