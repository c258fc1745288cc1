//! Conversion of runtime errors into E6xxx diagnostics.

use tally_diagnostic::{Diagnostic, ErrorCode};

use super::{EvalError, EvalErrorKind};

impl EvalErrorKind {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::UndefinedVariable { .. } => ErrorCode::E6001,
            Self::TypeMismatch { .. } | Self::InvalidOperand { .. } => ErrorCode::E6002,
            Self::DivisionByZero => ErrorCode::E6003,
            Self::InvalidRange { .. } => ErrorCode::E6004,
            Self::IndexOutOfBounds { .. } => ErrorCode::E6005,
            Self::UnknownColumn { .. } => ErrorCode::E6006,
            Self::UnknownField { .. } => ErrorCode::E6007,
            Self::ArityMismatch { .. } => ErrorCode::E6008,
            Self::NotCallable { .. } => ErrorCode::E6009,
            Self::DomainInvariantViolation { .. } => ErrorCode::E6010,
            Self::UnknownScenarioOrModel { .. } => ErrorCode::E6011,
            Self::InvalidArgument { .. } => ErrorCode::E6012,
            Self::RecursionLimit { .. } => ErrorCode::E6013,
            Self::Custom { .. } => ErrorCode::E6099,
        }
    }

    /// Short label for the primary span.
    pub fn primary_label(&self) -> &'static str {
        match self {
            Self::UndefinedVariable { .. } => "not found in this scope",
            Self::TypeMismatch { .. } => "type mismatch",
            Self::InvalidOperand { .. } => "mismatched operands",
            Self::DivisionByZero => "division by zero here",
            Self::InvalidRange { .. } => "invalid range",
            Self::IndexOutOfBounds { .. } => "index out of bounds",
            Self::UnknownColumn { .. } => "no such column",
            Self::UnknownField { .. } => "no such field",
            Self::ArityMismatch { .. } => "wrong number of arguments",
            Self::NotCallable { .. } => "not callable",
            Self::DomainInvariantViolation { .. } => "invariant violated",
            Self::UnknownScenarioOrModel { .. } => "not declared",
            Self::InvalidArgument { .. } => "invalid argument",
            Self::RecursionLimit { .. } => "recursion limit exceeded",
            Self::Custom { .. } => "runtime error",
        }
    }

    /// Hint for errors with an obvious fix.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::DivisionByZero => Some("check the divisor before dividing".to_string()),
            Self::UndefinedVariable { name } => {
                Some(format!("declare it first with `LET {name} = ...`"))
            }
            Self::UnknownScenarioOrModel { what: "scenario", name } => {
                Some(format!("declare it with `SCENARIO {name} ... END`"))
            }
            _ => None,
        }
    }
}

impl EvalError {
    #[cold]
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.kind.error_code()).with_message(&self.message);
        if let Some(span) = self.span {
            diag = diag.with_label(span, self.kind.primary_label());
        }
        for note in &self.notes {
            diag = diag.with_note(note);
        }
        if let Some(help) = self.kind.suggestion() {
            diag = diag.with_note(format!("help: {help}"));
        }
        diag
    }
}
