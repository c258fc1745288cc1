//! Command handlers for the `tally` CLI.
//!
//! Each submodule implements one subcommand. Shared helpers for reading
//! sources and reporting front-end errors live here.

use tally_diagnostic::emitter::DiagnosticEmitter;
use tally_ir::StringInterner;
use tally_parse::ParseOutput;

mod debug;
mod repl;
mod run;

pub use debug::{lex_file, lex_listing, parse_file, parse_listing};
pub use repl::{run_repl, Repl, ReplOutcome};
pub use run::{run_file, run_source};

/// Lex and parse `source`, emitting every lexical and parse diagnostic.
///
/// Returns `None` when anything was reported; the program must not run.
pub(crate) fn frontend(
    source: &str,
    interner: &StringInterner,
    emitter: &mut impl DiagnosticEmitter,
) -> Option<ParseOutput> {
    let lexed = tally_lexer::lex(source, interner);
    let parsed = tally_parse::parse(&lexed, interner);

    let error_count = lexed.errors.len() + parsed.errors.len();
    if error_count == 0 {
        return Some(parsed);
    }

    tracing::debug!(
        lex = lexed.errors.len(),
        parse = parsed.errors.len(),
        "front-end errors"
    );
    emitter.emit_all(&lexed.diagnostics());
    emitter.emit_all(&parsed.diagnostics());
    emitter.emit_summary(error_count, 0);
    None
}

/// Read a file from disk, exiting with a readable message on failure.
pub(crate) fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}

/// Whether stderr is a terminal, for `ColorMode::Auto`.
pub(crate) fn stderr_is_tty() -> bool {
    std::io::IsTerminal::is_terminal(&std::io::stderr())
}
