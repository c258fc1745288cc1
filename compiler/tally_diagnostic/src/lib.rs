//! Diagnostic system for Tally.
//!
//! Every phase reports problems as a [`Diagnostic`] tagged with an
//! [`ErrorCode`] whose first digit names the phase:
//!
//! - E0xxx: lexer
//! - E1xxx: parser
//! - E6xxx: runtime

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod span_utils;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
