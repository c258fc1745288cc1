//! The interactive `repl` command.
//!
//! One [`Interpreter`] lives for the whole session, so bindings, functions
//! and scenarios carry over between inputs. Input is buffered until every
//! block has its END; a blank line submits whatever is pending.

use std::io::{self, BufRead, Write};

use tally_diagnostic::emitter::{DiagnosticEmitter, TerminalEmitter};
use tally_diagnostic::{Diagnostic, ErrorCode};
use tally_eval::{stdout_handler, Interpreter, SharedPrintHandler, Value};
use tally_ir::StringInterner;
use tracing::debug;

use super::stderr_is_tty;
use crate::CliOptions;

const PROMPT: &str = "tally> ";
const CONTINUATION_PROMPT: &str = "  ...> ";

/// Result of feeding one line to the REPL.
#[derive(Debug, PartialEq)]
pub enum ReplOutcome {
    /// A block is still open; keep reading.
    Incomplete,
    /// The input ran. Values were printed through the print handler.
    Evaluated,
    /// The input was skipped (front-end errors) or stopped (runtime error).
    Failed {
        source: String,
        diagnostics: Vec<Diagnostic>,
    },
}

pub struct Repl<'a> {
    interpreter: Interpreter<'a>,
    pending: String,
}

impl<'a> Repl<'a> {
    pub fn new(interner: &'a StringInterner, options: &CliOptions, handler: SharedPrintHandler) -> Self {
        Repl {
            interpreter: options.builder(interner).print_handler(handler).build(),
            pending: String::new(),
        }
    }

    pub fn interpreter(&self) -> &Interpreter<'a> {
        &self.interpreter
    }

    /// Whether earlier lines are waiting for their END.
    pub fn is_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Feed one line of input.
    pub fn feed(&mut self, line: &str) -> ReplOutcome {
        let submit = line.trim().is_empty();
        if submit && self.pending.is_empty() {
            return ReplOutcome::Evaluated;
        }
        if !submit {
            self.pending.push_str(line);
            self.pending.push('\n');
        }

        let source = std::mem::take(&mut self.pending);
        let interner = self.interpreter.interner();
        let lexed = tally_lexer::lex(&source, interner);
        let parsed = tally_parse::parse(&lexed, interner);

        if !submit && !lexed.has_errors() && awaiting_end(&parsed, &source) {
            debug!("block still open, reading more input");
            self.pending = source;
            return ReplOutcome::Incomplete;
        }

        if lexed.has_errors() || parsed.has_errors() {
            let mut diagnostics = lexed.diagnostics();
            diagnostics.extend(parsed.diagnostics());
            return ReplOutcome::Failed {
                source,
                diagnostics,
            };
        }

        match self.interpreter.run(&parsed.program) {
            Ok(values) => {
                let handler = self.interpreter.print_handler();
                for value in values.iter().filter(|v| !matches!(v, Value::Nothing)) {
                    handler.println(&value.to_string());
                }
                ReplOutcome::Evaluated
            }
            Err(err) => ReplOutcome::Failed {
                source,
                diagnostics: vec![err.to_diagnostic()],
            },
        }
    }
}

/// Every parse error is a missing END at the end of the input.
fn awaiting_end(parsed: &tally_parse::ParseOutput, source: &str) -> bool {
    let end = source.trim_end().len();
    !parsed.errors.is_empty()
        && parsed
            .errors
            .iter()
            .all(|e| e.code == ErrorCode::E1007 && e.span.start as usize >= end)
}

/// Read-eval-print loop over stdin until EOF or `:quit`.
pub fn run_repl(options: &CliOptions) {
    let interner = StringInterner::new();
    let mut repl = Repl::new(&interner, options, stdout_handler());
    let stdin = io::stdin();

    println!("Tally {} (:quit to exit)", env!("CARGO_PKG_VERSION"));
    loop {
        let prompt = if repl.is_pending() { CONTINUATION_PROMPT } else { PROMPT };
        print!("{prompt}");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("error reading input: {e}");
                break;
            }
        }
        if !repl.is_pending() && matches!(line.trim(), ":quit" | ":q") {
            break;
        }

        if let ReplOutcome::Failed {
            source,
            diagnostics,
        } = repl.feed(line.trim_end_matches(['\n', '\r']))
        {
            let mut emitter = TerminalEmitter::stderr(options.color, stderr_is_tty())
                .with_source("<repl>", source);
            emitter.emit_all(&diagnostics);
            emitter.flush();
        }
    }
    println!();
}
