//! The `run` command: lex, parse and evaluate a Tally source file.

use tally_diagnostic::emitter::{DiagnosticEmitter, TerminalEmitter};
use tally_eval::{stdout_handler, SharedPrintHandler};
use tally_ir::StringInterner;

use super::{frontend, read_file, stderr_is_tty};
use crate::CliOptions;

/// Run the file named in `options`, exiting 1 on any error.
pub fn run_file(path: &str, options: &CliOptions) {
    let source = read_file(path);
    let mut emitter = TerminalEmitter::stderr(options.color, stderr_is_tty())
        .with_source(path, source.as_str());

    let ok = run_source(&source, options, stdout_handler(), &mut emitter);
    emitter.flush();
    if !ok {
        std::process::exit(1);
    }
}

/// Evaluate `source` with output going to `handler`.
///
/// Front-end errors are all reported and nothing runs. A runtime error stops
/// the program at the failing top-level statement. Returns `true` when the
/// program ran to completion.
#[tracing::instrument(level = "debug", skip_all)]
pub fn run_source(
    source: &str,
    options: &CliOptions,
    handler: SharedPrintHandler,
    emitter: &mut impl DiagnosticEmitter,
) -> bool {
    let interner = StringInterner::new();
    let Some(parsed) = frontend(source, &interner, emitter) else {
        return false;
    };

    let mut interpreter = options.builder(&interner).print_handler(handler).build();
    match interpreter.run(&parsed.program) {
        Ok(_) => true,
        Err(err) => {
            emitter.emit(&err.to_diagnostic());
            emitter.emit_summary(1, 0);
            false
        }
    }
}
