//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use std::rc::Rc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tally_ir::{SharedArena, StringInterner};
use tally_stack::{DepthCounter, DEFAULT_MAX_DEPTH};

use super::{InternedNames, Interpreter};
use crate::builtins::register_builtins;
use crate::print_handler::{stdout_handler, SharedPrintHandler};
use crate::Environment;

/// Seed used when the caller does not pick one. Runs are reproducible
/// unless a different seed is requested.
pub const DEFAULT_SEED: u64 = 42;

/// Builder for creating Interpreter instances.
///
/// Defaults: output to stdout, builtins installed, seed [`DEFAULT_SEED`],
/// call depth limited to [`DEFAULT_MAX_DEPTH`].
pub struct InterpreterBuilder<'a> {
    interner: &'a StringInterner,
    env: Option<Environment>,
    print_handler: Option<SharedPrintHandler>,
    seed: u64,
    max_depth: usize,
    builtins: bool,
}

impl<'a> InterpreterBuilder<'a> {
    pub fn new(interner: &'a StringInterner) -> Self {
        Self {
            interner,
            env: None,
            print_handler: None,
            seed: DEFAULT_SEED,
            max_depth: DEFAULT_MAX_DEPTH,
            builtins: true,
        }
    }

    /// Start from an existing environment instead of an empty one.
    #[must_use]
    pub fn env(mut self, env: Environment) -> Self {
        self.env = Some(env);
        self
    }

    /// Where `PRINT` and `LOG` output goes.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Seed for `random`, `normal` and simulations.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Maximum nesting of user function and lambda calls.
    #[must_use]
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Whether to install the builtin functions into the global scope.
    #[must_use]
    pub fn builtins(mut self, enabled: bool) -> Self {
        self.builtins = enabled;
        self
    }

    pub fn build(self) -> Interpreter<'a> {
        let mut env = self.env.unwrap_or_default();
        if self.builtins {
            register_builtins(&mut env, self.interner);
        }
        Interpreter {
            interner: self.interner,
            env,
            arena: SharedArena::default(),
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            depth: Rc::new(DepthCounter::new(self.max_depth)),
            rng: StdRng::seed_from_u64(self.seed),
            names: InternedNames::new(self.interner),
        }
    }
}
