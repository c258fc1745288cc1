use super::*;
use pretty_assertions::assert_eq;

use crate::errors::EvalErrorKind;

fn n(x: f64) -> Value {
    Value::Number(x)
}

fn nums(xs: &[f64]) -> Value {
    Value::number_list(xs.iter().copied())
}

#[test]
fn arithmetic() {
    assert_eq!(evaluate_binary(&n(10.0), &n(5.0), BinaryOp::Add), Ok(n(15.0)));
    assert_eq!(evaluate_binary(&n(10.0), &n(4.0), BinaryOp::Sub), Ok(n(6.0)));
    assert_eq!(evaluate_binary(&n(3.0), &n(4.0), BinaryOp::Mul), Ok(n(12.0)));
    assert_eq!(evaluate_binary(&n(9.0), &n(2.0), BinaryOp::Div), Ok(n(4.5)));
    assert_eq!(evaluate_binary(&n(9.0), &n(4.0), BinaryOp::Mod), Ok(n(1.0)));
    assert_eq!(evaluate_binary(&n(2.0), &n(10.0), BinaryOp::Pow), Ok(n(1024.0)));
}

#[test]
fn division_by_exact_zero() {
    for op in [BinaryOp::Div, BinaryOp::Mod] {
        let err = evaluate_binary(&n(1.0), &n(0.0), op).unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::DivisionByZero);
    }
    assert_eq!(
        evaluate_binary(&n(1.0), &n(0.5), BinaryOp::Div),
        Ok(n(2.0))
    );
}

#[test]
fn string_concatenation_uses_display_form() {
    let hello = Value::string("total: ");
    assert_eq!(
        evaluate_binary(&hello, &n(15.0), BinaryOp::Add),
        Ok(Value::string("total: 15"))
    );
    assert_eq!(
        evaluate_binary(&n(2.5), &Value::string("%"), BinaryOp::Add),
        Ok(Value::string("2.5%"))
    );
    assert_eq!(
        evaluate_binary(&Value::string("a"), &Value::string("b"), BinaryOp::Add),
        Ok(Value::string("ab"))
    );
}

#[test]
fn list_arithmetic_truncates_to_shorter() {
    let a = nums(&[1.0, 2.0, 3.0]);
    let b = nums(&[10.0, 20.0]);
    assert_eq!(evaluate_binary(&a, &b, BinaryOp::Add), Ok(nums(&[11.0, 22.0])));
    assert_eq!(evaluate_binary(&b, &a, BinaryOp::Sub), Ok(nums(&[9.0, 18.0])));
}

#[test]
fn cashflow_arithmetic() {
    let a = Value::cashflow(vec![-100.0, 50.0, 60.0]);
    let b = Value::cashflow(vec![10.0, 10.0]);
    assert_eq!(
        evaluate_binary(&a, &b, BinaryOp::Add),
        Ok(Value::cashflow(vec![-90.0, 60.0]))
    );
    assert_eq!(
        evaluate_binary(&n(2.0), &b, BinaryOp::Mul),
        Ok(Value::cashflow(vec![20.0, 20.0]))
    );
}

#[test]
fn list_scaling() {
    let a = nums(&[1.0, 2.0]);
    assert_eq!(evaluate_binary(&a, &n(3.0), BinaryOp::Mul), Ok(nums(&[3.0, 6.0])));
    assert_eq!(evaluate_binary(&n(3.0), &a, BinaryOp::Mul), Ok(nums(&[3.0, 6.0])));
}

#[test]
fn comparisons() {
    assert_eq!(evaluate_binary(&n(1.0), &n(2.0), BinaryOp::Lt), Ok(Value::Bool(true)));
    assert_eq!(evaluate_binary(&n(2.0), &n(2.0), BinaryOp::LtEq), Ok(Value::Bool(true)));
    assert_eq!(evaluate_binary(&n(1.0), &n(2.0), BinaryOp::GtEq), Ok(Value::Bool(false)));
    assert_eq!(
        evaluate_binary(&Value::string("apple"), &Value::string("banana"), BinaryOp::Lt),
        Ok(Value::Bool(true))
    );
}

#[test]
fn comparison_needs_matching_kinds() {
    let err = evaluate_binary(&n(1.0), &Value::Bool(true), BinaryOp::Lt).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::InvalidOperand { .. }));
}

#[test]
fn equality_is_structural_and_never_fails() {
    assert_eq!(
        evaluate_binary(&nums(&[1.0, 2.0]), &nums(&[1.0, 2.0]), BinaryOp::Eq),
        Ok(Value::Bool(true))
    );
    assert_eq!(
        evaluate_binary(&n(0.0), &Value::Bool(false), BinaryOp::Eq),
        Ok(Value::Bool(false))
    );
    assert_eq!(
        evaluate_binary(&Value::Nothing, &n(0.0), BinaryOp::NotEq),
        Ok(Value::Bool(true))
    );
}

#[test]
fn logical_operators_yield_bools() {
    assert_eq!(
        evaluate_binary(&n(1.0), &Value::string(""), BinaryOp::And),
        Ok(Value::Bool(false))
    );
    assert_eq!(
        evaluate_binary(&Value::Nothing, &nums(&[0.0]), BinaryOp::Or),
        Ok(Value::Bool(true))
    );
}

#[test]
fn type_errors() {
    let err = evaluate_binary(&Value::Bool(true), &n(1.0), BinaryOp::Sub).unwrap_err();
    assert_eq!(err.message, "operator `-` cannot be applied to bool and number");
}

#[test]
fn unary() {
    assert_eq!(evaluate_unary(UnaryOp::Neg, &n(3.0)), Ok(n(-3.0)));
    assert_eq!(
        evaluate_unary(UnaryOp::Neg, &nums(&[1.0, -2.0])),
        Ok(nums(&[-1.0, 2.0]))
    );
    assert_eq!(
        evaluate_unary(UnaryOp::Neg, &Value::cashflow(vec![5.0])),
        Ok(Value::cashflow(vec![-5.0]))
    );
    assert_eq!(evaluate_unary(UnaryOp::Not, &n(0.0)), Ok(Value::Bool(true)));
    assert!(evaluate_unary(UnaryOp::Neg, &Value::string("x")).is_err());
}
