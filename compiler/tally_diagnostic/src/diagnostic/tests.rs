use super::*;
use pretty_assertions::assert_eq;

#[test]
fn builder_collects_labels_and_notes() {
    let diag = Diagnostic::error(ErrorCode::E6003)
        .with_message("division by zero")
        .with_label(Span::new(4, 9), "divisor is zero")
        .with_secondary_label(Span::new(0, 3), "dividend")
        .with_note("check the denominator");

    assert!(diag.is_error());
    assert_eq!(diag.primary_span(), Some(Span::new(4, 9)));
    assert_eq!(diag.labels.len(), 2);
    assert_eq!(diag.notes, vec!["check the denominator".to_string()]);
}

#[test]
fn display_includes_code_and_notes() {
    let diag = Diagnostic::warning(ErrorCode::E1008)
        .with_message("expected end of line")
        .with_note("statements end at a line break");
    assert_eq!(
        diag.to_string(),
        "warning[E1008]: expected end of line\n  = note: statements end at a line break"
    );
}

#[test]
fn primary_span_skips_secondary_labels() {
    let diag = Diagnostic::error(ErrorCode::E1001)
        .with_secondary_label(Span::new(1, 2), "context")
        .with_label(Span::new(5, 6), "here");
    assert_eq!(diag.primary_span(), Some(Span::new(5, 6)));
}
