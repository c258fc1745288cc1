use super::*;
use crate::ErrorCode;
use pretty_assertions::assert_eq;
use tally_ir::Span;

fn render(diag: &Diagnostic, source: Option<&str>) -> String {
    let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false);
    if let Some(text) = source {
        emitter = emitter.with_source("main.tly", text);
    }
    emitter.emit(diag);
    String::from_utf8_lossy(&emitter.into_inner()).into_owned()
}

#[test]
fn renders_raw_span_without_source() {
    let diag = Diagnostic::error(ErrorCode::E6001)
        .with_message("undefined variable `y`")
        .with_label(Span::new(6, 7), "not found");
    assert_eq!(
        render(&diag, None),
        "error[E6001]: undefined variable `y`\n  --> 6..7: not found\n"
    );
}

#[test]
fn renders_line_column_and_snippet() {
    let source = "LET x = 1\nPRINT y\n";
    let diag = Diagnostic::error(ErrorCode::E6001)
        .with_message("undefined variable `y`")
        .with_label(Span::new(16, 17), "not found");
    assert_eq!(
        render(&diag, Some(source)),
        "error[E6001]: undefined variable `y`\n  --> main.tly:2:7: not found\n   2 | PRINT y\n     |       ^\n"
    );
}

#[test]
fn notes_follow_labels() {
    let diag = Diagnostic::warning(ErrorCode::E1008)
        .with_message("trailing tokens")
        .with_note("remove them");
    assert_eq!(
        render(&diag, None),
        "warning[E1008]: trailing tokens\n  = note: remove them\n"
    );
}

#[test]
fn summary_pluralizes() {
    let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false);
    emitter.emit_summary(2, 1);
    let out = String::from_utf8_lossy(&emitter.into_inner()).into_owned();
    assert_eq!(out, "2 errors and 1 warning emitted\n");
}

#[test]
fn color_mode_parsing() {
    assert_eq!(ColorMode::parse("ALWAYS"), Some(ColorMode::Always));
    assert_eq!(ColorMode::parse("never"), Some(ColorMode::Never));
    assert_eq!(ColorMode::parse("sometimes"), None);
    assert!(ColorMode::Auto.should_use_colors(true));
    assert!(!ColorMode::Auto.should_use_colors(false));
}
