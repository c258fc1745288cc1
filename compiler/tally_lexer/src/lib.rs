//! Scanner for Tally source text.
//!
//! [`lex`] turns a source string into a flat token stream that always ends in
//! exactly one `Eof`. Layout is made explicit: `Newline` ends each logical
//! line, `Indent`/`Dedent` open and close blocks, and both are suppressed
//! inside `(...)`, `[...]` and `{...}` so expressions can span lines.
//!
//! Problems are collected in [`LexOutput::errors`] rather than aborting; the
//! parser still receives a best-effort stream with `Error` placeholders.

mod cursor;
mod indent;
pub mod keywords;
mod lex_error;
mod scanner;

pub use lex_error::{LexError, LexErrorContext, LexErrorKind};

use tally_diagnostic::Diagnostic;
use tally_ir::{StringInterner, Token, TokenKind};

/// Tokens plus every lexical error found in one pass.
#[derive(Clone, Debug, Default)]
pub struct LexOutput {
    pub tokens: Vec<Token>,
    pub errors: Vec<LexError>,
}

impl LexOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.errors.iter().map(LexError::to_diagnostic).collect()
    }

    /// Token kinds only, handy for tests and the `lex` command.
    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens.iter().map(|t| t.kind).collect()
    }
}

/// Scan `source` into tokens, interning identifiers and literals.
pub fn lex(source: &str, interner: &StringInterner) -> LexOutput {
    scanner::Scanner::new(source, interner).run()
}

#[cfg(test)]
mod tests;
