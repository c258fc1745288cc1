//! Parse errors.

use tally_diagnostic::{Diagnostic, ErrorCode};
use tally_ir::{FinanceFn, Span, Token, TokenKind};

/// Parse error with an error code for diagnostics.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ParseError {
    pub code: ErrorCode,
    pub message: String,
    pub span: Span,
    /// What the parser was working on, shown as a note.
    pub context: Option<String>,
}

impl ParseError {
    #[cold]
    pub fn new(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        ParseError {
            code,
            message: message.into(),
            span,
            context: None,
        }
    }

    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    #[cold]
    pub fn unexpected(found: &Token, expected: &str) -> Self {
        ParseError::new(
            ErrorCode::E1001,
            format!("expected {expected}, found {}", found.kind.display_name()),
            found.span,
        )
    }

    #[cold]
    pub fn expected_expression(found: &Token) -> Self {
        ParseError::new(
            ErrorCode::E1002,
            format!("expected expression, found {}", found.kind.display_name()),
            found.span,
        )
    }

    #[cold]
    pub fn unclosed(close: &TokenKind, open: Span, found: &Token) -> Self {
        ParseError::new(
            ErrorCode::E1003,
            format!(
                "expected {} to close the group opened here, found {}",
                close.display_name(),
                found.kind.display_name()
            ),
            open.merge(found.span),
        )
    }

    #[cold]
    pub fn finance_arity(func: FinanceFn, found: usize, span: Span) -> Self {
        let (min, max) = func.arity();
        let expected = if min == max {
            format!("{min}")
        } else {
            format!("{min} to {max}")
        };
        ParseError::new(
            ErrorCode::E1005,
            format!(
                "{} takes {expected} argument{}, but {found} were given",
                func.name(),
                if max == 1 { "" } else { "s" }
            ),
            span,
        )
    }

    #[cold]
    pub fn invalid_assignment_target(span: Span) -> Self {
        ParseError::new(ErrorCode::E1006, "invalid assignment target", span)
            .with_context("only a plain variable name can be assigned")
    }

    #[cold]
    pub fn missing_end(construct: &str, found: &Token) -> Self {
        ParseError::new(
            ErrorCode::E1007,
            format!(
                "expected END to close {construct}, found {}",
                found.kind.display_name()
            ),
            found.span,
        )
    }

    #[cold]
    pub fn expected_newline(found: &Token) -> Self {
        ParseError::new(
            ErrorCode::E1008,
            format!(
                "expected end of line after statement, found {}",
                found.kind.display_name()
            ),
            found.span,
        )
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code)
            .with_message(&self.message)
            .with_label(self.span, "here");
        match &self.context {
            Some(context) => diag.with_note(context.clone()),
            None => diag,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ParseError {}
