//! Lexer error types.
//!
//! Errors are accumulated rather than aborting the scan, so one pass reports
//! every lexical problem in the input.

use tally_diagnostic::{Diagnostic, ErrorCode};
use tally_ir::Span;

/// A lexical error: where it happened, what went wrong, and what the
/// scanner was doing at the time.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LexError {
    pub span: Span,
    pub kind: LexErrorKind,
    pub context: LexErrorContext,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum LexErrorKind {
    /// Missing closing quote.
    UnterminatedString,
    /// Missing closing `*/` or `###`.
    UnterminatedBlockComment,
    /// Character that starts no token.
    UnexpectedChar { ch: char },
    /// Closing delimiter with no matching opener.
    UnbalancedDelimiter { found: char },
    /// Opening delimiter still open at end of input.
    UnclosedDelimiter { open: char },
    /// Dedent to a width that matches no enclosing block.
    InconsistentDedent { width: u32 },
    /// Number text that does not parse as `f64`.
    InvalidNumber,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum LexErrorContext {
    #[default]
    TopLevel,
    InsideString,
    InsideComment,
    LineStart,
    NumberLiteral,
    EndOfInput,
}

impl LexErrorContext {
    pub fn description(self) -> &'static str {
        match self {
            LexErrorContext::TopLevel => "scanning tokens",
            LexErrorContext::InsideString => "reading a string literal",
            LexErrorContext::InsideComment => "skipping a block comment",
            LexErrorContext::LineStart => "measuring indentation",
            LexErrorContext::NumberLiteral => "reading a number",
            LexErrorContext::EndOfInput => "closing open groups at end of input",
        }
    }
}

impl LexError {
    #[cold]
    pub fn unterminated_string(span: Span) -> Self {
        Self {
            span,
            kind: LexErrorKind::UnterminatedString,
            context: LexErrorContext::InsideString,
        }
    }

    #[cold]
    pub fn unterminated_block_comment(span: Span) -> Self {
        Self {
            span,
            kind: LexErrorKind::UnterminatedBlockComment,
            context: LexErrorContext::InsideComment,
        }
    }

    #[cold]
    pub fn unexpected_char(span: Span, ch: char) -> Self {
        Self {
            span,
            kind: LexErrorKind::UnexpectedChar { ch },
            context: LexErrorContext::TopLevel,
        }
    }

    #[cold]
    pub fn unbalanced_delimiter(span: Span, found: char) -> Self {
        Self {
            span,
            kind: LexErrorKind::UnbalancedDelimiter { found },
            context: LexErrorContext::TopLevel,
        }
    }

    #[cold]
    pub fn unclosed_delimiter(span: Span, open: char) -> Self {
        Self {
            span,
            kind: LexErrorKind::UnclosedDelimiter { open },
            context: LexErrorContext::EndOfInput,
        }
    }

    #[cold]
    pub fn inconsistent_dedent(span: Span, width: u32) -> Self {
        Self {
            span,
            kind: LexErrorKind::InconsistentDedent { width },
            context: LexErrorContext::LineStart,
        }
    }

    #[cold]
    pub fn invalid_number(span: Span) -> Self {
        Self {
            span,
            kind: LexErrorKind::InvalidNumber,
            context: LexErrorContext::NumberLiteral,
        }
    }

    pub fn message(&self) -> String {
        match &self.kind {
            LexErrorKind::UnterminatedString => "unterminated string literal".to_string(),
            LexErrorKind::UnterminatedBlockComment => "unterminated block comment".to_string(),
            LexErrorKind::UnexpectedChar { ch } => format!("unexpected character `{ch}`"),
            LexErrorKind::UnbalancedDelimiter { found } => {
                format!("unbalanced closing delimiter `{found}`")
            }
            LexErrorKind::UnclosedDelimiter { open } => format!("unclosed delimiter `{open}`"),
            LexErrorKind::InconsistentDedent { width } => {
                format!("dedent to column {width} does not match any enclosing block")
            }
            LexErrorKind::InvalidNumber => "invalid number literal".to_string(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self.kind {
            LexErrorKind::UnterminatedString => ErrorCode::E0001,
            LexErrorKind::UnexpectedChar { .. } => ErrorCode::E0002,
            LexErrorKind::InvalidNumber => ErrorCode::E0003,
            LexErrorKind::UnterminatedBlockComment => ErrorCode::E0004,
            LexErrorKind::UnbalancedDelimiter { .. } | LexErrorKind::UnclosedDelimiter { .. } => {
                ErrorCode::E0005
            }
            LexErrorKind::InconsistentDedent { .. } => ErrorCode::E0006,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code())
            .with_message(self.message())
            .with_label(self.span, "here")
            .with_note(format!("while {}", self.context.description()));
        match self.kind {
            LexErrorKind::UnterminatedString => diag.with_note("add the closing quote"),
            LexErrorKind::InconsistentDedent { .. } => {
                diag.with_note("indent with the same width as an enclosing block")
            }
            _ => diag,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_by_kind() {
        let span = Span::new(0, 1);
        assert_eq!(LexError::unterminated_string(span).code(), ErrorCode::E0001);
        assert_eq!(LexError::unexpected_char(span, '@').code(), ErrorCode::E0002);
        assert_eq!(LexError::unclosed_delimiter(span, '(').code(), ErrorCode::E0005);
        assert_eq!(LexError::inconsistent_dedent(span, 2).code(), ErrorCode::E0006);
    }

    #[test]
    fn diagnostic_carries_span_and_context() {
        let err = LexError::unexpected_char(Span::new(3, 4), '@');
        let diag = err.to_diagnostic();
        assert_eq!(diag.message, "unexpected character `@`");
        assert_eq!(diag.primary_span(), Some(Span::new(3, 4)));
        assert_eq!(diag.notes, vec!["while scanning tokens".to_string()]);
    }
}
