//! End-to-end runs through the CLI pipeline with captured output.

use pretty_assertions::assert_eq;
use tally_diagnostic::emitter::{ColorMode, TerminalEmitter};
use tally_eval::buffer_handler;
use tallyc::commands::run_source;
use tallyc::CliOptions;

struct Run {
    ok: bool,
    stdout: Vec<String>,
    stderr: String,
}

fn run_with(source: &str, options: &CliOptions) -> Run {
    let handler = buffer_handler();
    let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false)
        .with_source("test.tally", source);
    let ok = run_source(source, options, handler.clone(), &mut emitter);
    Run {
        ok,
        stdout: handler.lines(),
        stderr: String::from_utf8_lossy(&emitter.into_inner()).into_owned(),
    }
}

fn run(source: &str) -> Run {
    run_with(source, &CliOptions::default())
}

#[test]
fn program_runs_to_completion() {
    let result = run("LET x = 10\nPRINT x + 5\nPRINT NPV(0.1, [100, 100])");
    assert!(result.ok);
    assert_eq!(result.stdout[0], "15");
    assert!(result.stdout[1].starts_with("173.55"));
    assert_eq!(result.stderr, "");
}

#[test]
fn parse_errors_are_all_reported_and_nothing_runs() {
    let result = run("PRINT 'before'\nLET = 1\nLET y = \nPRINT 'after'");
    assert!(!result.ok);
    assert!(result.stdout.is_empty());
    assert_eq!(result.stderr.matches("error[E1").count(), 2);
    assert!(result.stderr.contains("2 errors emitted"));
    assert!(result.stderr.contains("test.tally:2:"));
}

#[test]
fn runtime_error_stops_at_the_failing_statement() {
    let result = run("PRINT 1\nPRINT 10 / 0\nPRINT 3");
    assert!(!result.ok);
    assert_eq!(result.stdout, vec!["1"]);
    assert!(result.stderr.contains("error[E6003]"));
    assert!(result.stderr.contains("test.tally:2:7"));
    assert!(result.stderr.contains("1 error emitted"));
}

#[test]
fn undefined_variable_gets_a_hint() {
    let result = run("PRINT revenue");
    assert!(!result.ok);
    assert!(result.stderr.contains("error[E6001]"));
    assert!(result.stderr.contains("LET revenue = ..."));
}

#[test]
fn seed_option_controls_random_draws() {
    let source = "PRINT random()";
    let first = run_with(source, &CliOptions::default());
    let again = run_with(source, &CliOptions::default());
    let other = run_with(
        source,
        &CliOptions {
            seed: 7,
            ..CliOptions::default()
        },
    );
    assert_eq!(first.stdout, again.stdout);
    assert!(first.stdout != other.stdout);
}

#[test]
fn max_depth_option_limits_recursion() {
    let source = "FUNCTION down(n)\n    RETURN down(n + 1)\nEND\nPRINT down(0)";
    let result = run_with(
        source,
        &CliOptions {
            max_depth: 16,
            ..CliOptions::default()
        },
    );
    assert!(!result.ok);
    assert!(result.stderr.contains("error[E6013]"));
}
