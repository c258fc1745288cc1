//! End-to-end tests: source text through lex, parse and evaluation, with
//! printed output captured in a buffer.

#![allow(clippy::unwrap_used)]

mod scope_tests;

use tally_ir::StringInterner;

use crate::print_handler::buffer_handler;
use crate::{EvalError, EvalErrorKind, Interpreter, InterpreterBuilder, Value};

/// Outcome of running one program.
pub(crate) struct Outcome {
    pub values: Result<Vec<Value>, EvalError>,
    pub output: Vec<String>,
    /// Scope depth after the run; 1 means only the global scope is left.
    pub depth: usize,
}

/// Run `source` on a fresh interpreter configured by `configure`.
pub(crate) fn run_with(
    source: &str,
    configure: impl FnOnce(InterpreterBuilder<'_>) -> InterpreterBuilder<'_>,
) -> Outcome {
    let interner = StringInterner::new();
    let lexed = tally_lexer::lex(source, &interner);
    assert!(!lexed.has_errors(), "lex errors: {:?}", lexed.errors);
    let parsed = tally_parse::parse(&lexed, &interner);
    assert!(!parsed.has_errors(), "parse errors: {:?}", parsed.errors);

    let handler = buffer_handler();
    let mut interpreter: Interpreter<'_> =
        configure(InterpreterBuilder::new(&interner).print_handler(handler.clone())).build();
    let values = interpreter.run(&parsed.program);
    Outcome {
        values,
        output: handler.lines(),
        depth: interpreter.env().depth(),
    }
}

pub(crate) fn run(source: &str) -> Outcome {
    run_with(source, |builder| builder)
}

/// Printed lines of a program that must succeed.
pub(crate) fn output(source: &str) -> Vec<String> {
    let outcome = run(source);
    if let Err(err) = &outcome.values {
        panic!("unexpected error: {err}");
    }
    outcome.output
}

/// Value of the last statement of a program that must succeed.
pub(crate) fn last_value(source: &str) -> Value {
    let values = match run(source).values {
        Ok(values) => values,
        Err(err) => panic!("unexpected error: {err}"),
    };
    values.last().cloned().unwrap_or(Value::Nothing)
}

pub(crate) fn last_number(source: &str) -> f64 {
    match last_value(source) {
        Value::Number(n) => n,
        other => panic!("expected a number, got {other}"),
    }
}

/// Error of a program that must fail.
pub(crate) fn error(source: &str) -> EvalError {
    match run(source).values {
        Ok(values) => panic!("expected an error, got {values:?}"),
        Err(err) => err,
    }
}

pub(crate) fn error_kind(source: &str) -> EvalErrorKind {
    error(source).kind
}

#[test]
fn let_and_print() {
    assert_eq!(output("LET x = 10\nPRINT x\nPRINT x + 5"), vec!["10", "15"]);
}

#[test]
fn npv_of_a_level_cash_flow() {
    let lines = output("LET cf = [-1000, 300, 300, 300, 300]\nPRINT NPV(cf, 0.08)");
    assert_eq!(lines.len(), 1);
    let npv: f64 = lines[0].parse().unwrap();
    assert!((npv - -5.89).abs() < 0.01, "{npv}");
}

#[test]
fn list_slice() {
    assert_eq!(output("LET a = [1, 2, 3, 4, 5]\nPRINT a[1:3]"), vec!["[2, 3]"]);
}

#[test]
fn counted_loop_appends() {
    let source = "\
LET xs = []
FOR i IN 1 TO 3
    SET xs = append(xs, i)
END
PRINT xs
";
    assert_eq!(output(source), vec!["[1, 2, 3]"]);
}

#[test]
fn same_program_same_output() {
    let source = "\
SCENARIO draw
    LET result = normal(100, 15) + random()
END
SIMULATE draw 20 TIMES
PRINT simulation_results
";
    assert_eq!(output(source), output(source));
}

#[test]
fn seed_changes_random_draws() {
    let a = run_with("random()", |b| b.seed(1)).values.unwrap();
    let b = run_with("random()", |b| b.seed(2)).values.unwrap();
    assert_ne!(a, b);
}

mod properties {
    use proptest::prelude::*;

    use super::run;
    use crate::format_number;

    proptest! {
        #[test]
        fn integer_arithmetic_matches_host(a in -10_000i64..10_000, b in -10_000i64..10_000) {
            let outcome = run(&format!("LET a = {a}\nLET b = {b}\nPRINT a * b - a"));
            prop_assert!(outcome.values.is_ok());
            prop_assert_eq!(outcome.output, vec![format_number((a * b - a) as f64)]);
        }

        #[test]
        fn failed_nested_blocks_leave_only_the_global_scope(depth in 1usize..12) {
            let source = format!("{}PRINT missing\n{}", "DO\n".repeat(depth), "END\n".repeat(depth));
            let outcome = run(&source);
            prop_assert!(outcome.values.is_err());
            prop_assert_eq!(outcome.depth, 1);
        }
    }
}
