//! Tree-walking interpreter.
//!
//! Statements run through [`Interpreter::exec_stmt`] and produce an
//! [`ExecOutcome`]; expressions go through [`Interpreter::eval_expr`].
//! Both look nodes up in the arena of the code currently running:
//! calling a function or lambda, or running a scenario, switches to the
//! arena captured alongside it and switches back afterwards.
//!
//! Every scope the interpreter enters is tied to a [`ScopedInterpreter`]
//! guard, so leaving a block by error, `RETURN` or panic pops it.

mod access;
mod builder;
mod call;
mod coerce;
mod expr;
mod finance;
mod scope_guard;
mod stmt;

pub use builder::{InterpreterBuilder, DEFAULT_SEED};
pub use call::CallContext;
pub use scope_guard::ScopedInterpreter;

use std::rc::Rc;

use rand::rngs::StdRng;
use smallvec::SmallVec;
use tally_ir::{Name, Program, SharedArena, StmtId, StmtRange, StringInterner};
use tally_stack::DepthCounter;
use tracing::debug;

use crate::errors::{undefined_variable, EvalError};
use crate::print_handler::SharedPrintHandler;
use crate::{Environment, Value};

/// How a statement finished.
#[derive(Clone, Debug, PartialEq)]
pub enum ExecOutcome {
    Normal(Value),
    /// `RETURN` on its way to the nearest call boundary.
    Return(Value),
}

impl ExecOutcome {
    pub fn into_value(self) -> Value {
        match self {
            ExecOutcome::Normal(v) | ExecOutcome::Return(v) => v,
        }
    }
}

pub type ExecResult = Result<ExecOutcome, EvalError>;

/// Names the interpreter binds on the user's behalf.
#[derive(Clone, Copy)]
pub(crate) struct InternedNames {
    pub(crate) result: Name,
    pub(crate) last_run: Name,
    pub(crate) simulation_results: Name,
}

impl InternedNames {
    fn new(interner: &StringInterner) -> Self {
        InternedNames {
            result: interner.intern("result"),
            last_run: interner.intern("last_run"),
            simulation_results: interner.intern("simulation_results"),
        }
    }
}

/// Interpreter state. One instance can run many programs in sequence; the
/// REPL keeps a single one so bindings carry over between inputs.
pub struct Interpreter<'a> {
    pub(crate) interner: &'a StringInterner,
    pub(crate) env: Environment,
    /// Arena of the code currently executing.
    pub(crate) arena: SharedArena,
    pub(crate) print_handler: SharedPrintHandler,
    pub(crate) depth: Rc<DepthCounter>,
    pub(crate) rng: StdRng,
    pub(crate) names: InternedNames,
}

impl<'a> Interpreter<'a> {
    /// Interpreter with default configuration and builtins installed.
    pub fn new(interner: &'a StringInterner) -> Self {
        InterpreterBuilder::new(interner).build()
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    pub fn interner(&self) -> &'a StringInterner {
        self.interner
    }

    /// Everything printed so far, when printing into a buffer.
    pub fn get_print_output(&self) -> String {
        self.print_handler.output()
    }

    pub fn clear_print_output(&self) {
        self.print_handler.clear();
    }

    /// Look a binding up by its text.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.env.get(self.interner.intern(name))
    }

    /// Execute every top-level statement, returning one value per statement
    /// executed. A top-level `RETURN` ends the program with its value.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run(&mut self, program: &Program) -> Result<Vec<Value>, EvalError> {
        let statements = program.statements().to_vec();
        self.with_arena(&program.arena, |this| {
            let mut values = Vec::with_capacity(statements.len());
            for id in statements {
                match this.exec_stmt(id)? {
                    ExecOutcome::Normal(value) => values.push(value),
                    ExecOutcome::Return(value) => {
                        debug!("top-level RETURN ends the program");
                        values.push(value);
                        break;
                    }
                }
            }
            Ok(values)
        })
    }

    /// Run `f` with `arena` as the arena being executed.
    pub(crate) fn with_arena<T>(
        &mut self,
        arena: &SharedArena,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        let saved = std::mem::replace(&mut self.arena, arena.clone());
        let out = f(self);
        self.arena = saved;
        out
    }

    /// Run `f` in a fresh environment whose only scope is a child of the
    /// current one. Used for scenario runs.
    pub(crate) fn with_child_env<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let child = self.env.child();
        let parent = std::mem::replace(&mut self.env, child);
        let out = f(self);
        self.env = parent;
        out
    }

    /// Statements of `body` in the current scope, stopping at `RETURN`.
    pub(crate) fn exec_statements(&mut self, body: StmtRange) -> ExecResult {
        let ids: SmallVec<[StmtId; 8]> = SmallVec::from_slice(self.arena.get_stmt_list(body));
        for id in ids {
            if let ExecOutcome::Return(value) = self.exec_stmt(id)? {
                return Ok(ExecOutcome::Return(value));
            }
        }
        Ok(ExecOutcome::Normal(Value::Nothing))
    }

    /// Statements of `body` in a new scope.
    pub(crate) fn exec_block(&mut self, body: StmtRange) -> ExecResult {
        self.with_env_scope(|scoped| scoped.exec_statements(body))
    }

    #[inline]
    pub(crate) fn name_text(&self, name: Name) -> &'a str {
        self.interner.lookup(name)
    }

    pub(crate) fn lookup(&self, name: Name) -> Result<Value, EvalError> {
        self.env
            .get(name)
            .ok_or_else(|| undefined_variable(self.name_text(name)))
    }

    pub(crate) fn assign(&mut self, name: Name, value: Value) -> Result<(), EvalError> {
        self.env
            .assign(name, value)
            .map_err(|_| undefined_variable(self.name_text(name)))
    }
}

#[cfg(test)]
mod tests;
