//! Runtime errors.
//!
//! Build errors through the factory functions below (`division_by_zero()`,
//! `undefined_variable(name)`, ...). Each sets a typed [`EvalErrorKind`]
//! and the matching message. The evaluator attaches the span afterwards
//! with [`EvalError::with_span`] or [`EvalError::or_span`].

mod diagnostics;

use std::fmt;

use tally_finance::FinanceError;
use tally_ir::{BinaryOp, Span};

use crate::Value;

/// Result of evaluating an expression.
pub type EvalResult = Result<Value, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq)]
pub enum EvalErrorKind {
    UndefinedVariable {
        name: String,
    },
    TypeMismatch {
        expected: String,
        got: &'static str,
    },
    InvalidOperand {
        op: BinaryOp,
        left: &'static str,
        right: &'static str,
    },
    DivisionByZero,
    InvalidRange {
        message: String,
    },
    IndexOutOfBounds {
        index: i64,
        len: usize,
    },
    UnknownColumn {
        column: String,
    },
    UnknownField {
        field: String,
        type_name: &'static str,
    },
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    NotCallable {
        type_name: &'static str,
    },
    DomainInvariantViolation {
        message: String,
    },
    UnknownScenarioOrModel {
        what: &'static str,
        name: String,
    },
    InvalidArgument {
        message: String,
    },
    RecursionLimit {
        limit: usize,
    },
    Custom {
        message: String,
    },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UndefinedVariable { name } => write!(f, "undefined variable: {name}"),
            Self::TypeMismatch { expected, got } => {
                write!(f, "type mismatch: expected {expected}, got {got}")
            }
            Self::InvalidOperand { op, left, right } => write!(
                f,
                "operator `{}` cannot be applied to {left} and {right}",
                op.as_symbol()
            ),
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::InvalidRange { message } => write!(f, "invalid range: {message}"),
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for length {len}")
            }
            Self::UnknownColumn { column } => write!(f, "unknown column '{column}'"),
            Self::UnknownField { field, type_name } => {
                write!(f, "no field '{field}' on {type_name}")
            }
            Self::ArityMismatch {
                name,
                expected,
                got,
            } => {
                let arg_word = if *expected == 1 {
                    "argument"
                } else {
                    "arguments"
                };
                write!(f, "{name} expects {expected} {arg_word}, got {got}")
            }
            Self::NotCallable { type_name } => write!(f, "{type_name} is not callable"),
            Self::DomainInvariantViolation { message }
            | Self::InvalidArgument { message }
            | Self::Custom { message } => f.write_str(message),
            Self::UnknownScenarioOrModel { what, name } => write!(f, "unknown {what} '{name}'"),
            Self::RecursionLimit { limit } => {
                write!(f, "maximum call depth exceeded (limit: {limit})")
            }
        }
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Equal to `kind.to_string()` for factory-built errors.
    pub message: String,
    pub span: Option<Span>,
    pub notes: Vec<String>,
}

impl EvalError {
    /// Uncategorized error with a message.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        EvalError {
            kind: EvalErrorKind::Custom {
                message: message.clone(),
            },
            message,
            span: None,
            notes: Vec::new(),
        }
    }

    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError {
            kind,
            message,
            span: None,
            notes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Attach `span` only if the error does not have one yet.
    #[must_use]
    pub fn or_span(mut self, span: Span) -> Self {
        if self.span.is_none() {
            self.span = Some(span);
        }
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EvalError {}

impl From<FinanceError> for EvalError {
    fn from(err: FinanceError) -> Self {
        invalid_argument(err.to_string())
    }
}

// Variables

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}

// Types and operators

#[cold]
pub fn type_mismatch(expected: impl Into<String>, got: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: expected.into(),
        got: got.type_name(),
    })
}

#[cold]
pub fn invalid_operand(op: BinaryOp, left: &Value, right: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidOperand {
        op,
        left: left.type_name(),
        right: right.type_name(),
    })
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

// Indexing and access

#[cold]
pub fn invalid_range(message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidRange {
        message: message.into(),
    })
}

#[cold]
pub fn index_out_of_bounds(index: i64, len: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfBounds { index, len })
}

#[cold]
pub fn unknown_column(column: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownColumn {
        column: column.to_string(),
    })
}

#[cold]
pub fn unknown_field(field: &str, receiver: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownField {
        field: field.to_string(),
        type_name: receiver.type_name(),
    })
}

// Calls

#[cold]
pub fn arity_mismatch(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

#[cold]
pub fn not_callable(value: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        type_name: value.type_name(),
    })
}

#[cold]
pub fn recursion_limit(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::RecursionLimit { limit })
}

// Finance

#[cold]
pub fn domain_invariant(message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::DomainInvariantViolation {
        message: message.into(),
    })
}

#[cold]
pub fn unknown_scenario(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownScenarioOrModel {
        what: "scenario",
        name: name.to_string(),
    })
}

#[cold]
pub fn unknown_model(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownScenarioOrModel {
        what: "model",
        name: name.to_string(),
    })
}

#[cold]
pub fn invalid_argument(message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidArgument {
        message: message.into(),
    })
}

#[cfg(test)]
mod tests;
