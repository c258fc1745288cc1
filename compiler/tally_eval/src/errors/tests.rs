use super::*;
use pretty_assertions::assert_eq;
use tally_diagnostic::ErrorCode;

#[test]
fn factory_message_matches_kind() {
    let err = undefined_variable("rate");
    assert_eq!(err.message, "undefined variable: rate");
    assert_eq!(err.kind.to_string(), err.message);
}

#[test]
fn arity_pluralization() {
    assert_eq!(
        arity_mismatch("f", 1, 2).message,
        "f expects 1 argument, got 2"
    );
    assert_eq!(
        arity_mismatch("f", 2, 0).message,
        "f expects 2 arguments, got 0"
    );
}

#[test]
fn or_span_keeps_existing_span() {
    let err = division_by_zero()
        .with_span(Span::new(1, 2))
        .or_span(Span::new(8, 9));
    assert_eq!(err.span, Some(Span::new(1, 2)));

    let err = division_by_zero().or_span(Span::new(8, 9));
    assert_eq!(err.span, Some(Span::new(8, 9)));
}

#[test]
fn finance_errors_become_invalid_argument() {
    let err: EvalError = FinanceError::InvalidPeriod { period: 0 }.into();
    assert!(matches!(err.kind, EvalErrorKind::InvalidArgument { .. }));
    assert_eq!(err.message, "period must be at least 1, got 0");
}

#[test]
fn type_errors_name_the_value_kind() {
    let err = type_mismatch("number", &Value::string("x"));
    assert_eq!(err.message, "type mismatch: expected number, got string");

    let err = invalid_operand(BinaryOp::Mul, &Value::Bool(true), &Value::Nothing);
    assert_eq!(
        err.message,
        "operator `*` cannot be applied to bool and nothing"
    );
}

#[test]
fn diagnostic_codes() {
    let cases = [
        (undefined_variable("x"), ErrorCode::E6001),
        (division_by_zero(), ErrorCode::E6003),
        (invalid_range("end before start"), ErrorCode::E6004),
        (unknown_column("rev"), ErrorCode::E6006),
        (domain_invariant("bad weights"), ErrorCode::E6010),
        (unknown_scenario("base"), ErrorCode::E6011),
        (recursion_limit(1000), ErrorCode::E6013),
        (EvalError::new("boom"), ErrorCode::E6099),
    ];
    for (err, code) in cases {
        assert_eq!(err.to_diagnostic().code, code, "{}", err.message);
    }
}

#[test]
fn diagnostic_carries_span_and_help() {
    let diag = division_by_zero()
        .with_span(Span::new(4, 9))
        .with_note("while evaluating `x / y`")
        .to_diagnostic();
    assert_eq!(diag.primary_span(), Some(Span::new(4, 9)));
    assert_eq!(diag.notes.len(), 2);
    assert!(diag.notes[1].starts_with("help:"));
}
