#![allow(clippy::unwrap_used)]

use super::*;
use crate::errors::EvalErrorKind;
use crate::print_handler::buffer_handler;
use pretty_assertions::assert_eq;

fn parse(source: &str, interner: &StringInterner) -> Program {
    let lexed = tally_lexer::lex(source, interner);
    assert!(!lexed.has_errors(), "lex errors: {:?}", lexed.errors);
    let parsed = tally_parse::parse(&lexed, interner);
    assert!(!parsed.has_errors(), "parse errors: {:?}", parsed.errors);
    parsed.program
}

#[test]
fn print_goes_to_the_handler() {
    let interner = StringInterner::new();
    let mut interpreter = InterpreterBuilder::new(&interner)
        .print_handler(buffer_handler())
        .build();

    interpreter.print_handler.println("hello world");
    assert_eq!(interpreter.get_print_output(), "hello world\n");

    interpreter.clear_print_output();
    let program = parse("PRINT 'second'", &interner);
    interpreter.run(&program).unwrap();
    assert_eq!(interpreter.get_print_output(), "second\n");
}

#[test]
fn run_returns_one_value_per_statement() {
    let interner = StringInterner::new();
    let mut interpreter = InterpreterBuilder::new(&interner)
        .print_handler(buffer_handler())
        .build();
    let program = parse("LET x = 1\nx + 1\nPRINT x", &interner);

    let values = interpreter.run(&program).unwrap();

    assert_eq!(
        values,
        vec![Value::Nothing, Value::Number(2.0), Value::Nothing]
    );
}

#[test]
fn bindings_persist_across_runs() {
    let interner = StringInterner::new();
    let mut interpreter = InterpreterBuilder::new(&interner)
        .print_handler(buffer_handler())
        .build();

    let first = parse("LET total = 40", &interner);
    interpreter.run(&first).unwrap();
    let second = parse("total + 2", &interner);
    let values = interpreter.run(&second).unwrap();

    assert_eq!(values, vec![Value::Number(42.0)]);
}

#[test]
fn functions_outlive_the_program_that_declared_them() {
    let interner = StringInterner::new();
    let mut interpreter = InterpreterBuilder::new(&interner)
        .print_handler(buffer_handler())
        .build();

    let declare = parse("FUNCTION twice(x)\n    RETURN x * 2\nEND", &interner);
    interpreter.run(&declare).unwrap();
    let call = parse("LET pad = [0, 0, 0]\ntwice(21)", &interner);

    let values = interpreter.run(&call).unwrap();
    assert_eq!(values[1], Value::Number(42.0));
}

#[test]
fn builtins_can_be_disabled() {
    let interner = StringInterner::new();
    let mut interpreter = InterpreterBuilder::new(&interner)
        .print_handler(buffer_handler())
        .builtins(false)
        .build();
    assert!(interpreter.get("len").is_none());

    let program = parse("len([1])", &interner);
    let err = interpreter.run(&program).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::UndefinedVariable {
            name: "len".to_string()
        }
    );
}

#[test]
fn errors_carry_the_failing_span() {
    let interner = StringInterner::new();
    let mut interpreter = InterpreterBuilder::new(&interner)
        .print_handler(buffer_handler())
        .build();
    let source = "LET a = 1\nPRINT a / 0";
    let program = parse(source, &interner);

    let err = interpreter.run(&program).unwrap_err();

    assert_eq!(err.kind, EvalErrorKind::DivisionByZero);
    let span = err.span.unwrap();
    assert_eq!(&source[span.to_range()], "a / 0");
}

#[test]
fn exec_outcome_value() {
    assert_eq!(
        ExecOutcome::Return(Value::Number(1.0)).into_value(),
        Value::Number(1.0)
    );
    assert_eq!(ExecOutcome::Normal(Value::Nothing).into_value(), Value::Nothing);
}
