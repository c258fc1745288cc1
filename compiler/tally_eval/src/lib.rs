//! Tally Eval - tree-walking interpreter for Tally programs.
//!
//! # Architecture
//!
//! - `Environment`: lexical scopes over a shared global scope
//! - `Interpreter`: executes statements and evaluates expressions against
//!   the arena of the program (or closure) being run
//! - `evaluate_binary` / `evaluate_unary`: operator dispatch on `Value`
//! - finance forms (`NPV`, `CAPM`, `AMORTIZE`, ...) delegate to
//!   `tally_finance`
//! - builtins: native functions registered in the global scope
//!
//! ```text
//! let lexed = tally_lexer::lex(source, &interner);
//! let parsed = tally_parse::parse(&lexed, &interner);
//! let mut interpreter = Interpreter::new(&interner);
//! let values = interpreter.run(&parsed.program)?;
//! ```

mod builtins;
mod environment;
pub mod errors;
pub mod interpreter;
mod operators;
mod print_handler;
pub mod value;

pub use builtins::register_builtins;
pub use environment::{Environment, LocalScope, Scope, Unbound};
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use interpreter::{
    CallContext, ExecOutcome, ExecResult, Interpreter, InterpreterBuilder, ScopedInterpreter,
    DEFAULT_SEED,
};
pub use operators::{evaluate_binary, evaluate_unary};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, PrintHandler, SharedPrintHandler,
};
pub use value::{
    format_number, Arity, FunctionValue, Heap, LedgerEntry, LedgerValue, ObjectValue,
    PortfolioValue, TableValue, Value,
};

#[cfg(test)]
mod tests;
