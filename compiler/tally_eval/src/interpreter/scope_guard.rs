//! RAII scope guards for interpreter environment management.
//!
//! The guard holds `&mut Interpreter` and implements `Deref`/`DerefMut`, so
//! code inside a scope calls interpreter methods as usual. Dropping the
//! guard pops the scope, including during unwinding.
//!
//! ```text
//! interpreter.with_env_scope(|scoped| {
//!     scoped.env.define(name, value);
//!     scoped.exec_statements(body)
//! })
//! ```

use std::ops::{Deref, DerefMut};

use tally_ir::Name;

use super::Interpreter;
use crate::environment::{LocalScope, Scope};
use crate::Value;

/// Guard that pops one environment scope on drop.
pub struct ScopedInterpreter<'guard, 'interp> {
    interpreter: &'guard mut Interpreter<'interp>,
}

impl Drop for ScopedInterpreter<'_, '_> {
    fn drop(&mut self) {
        self.interpreter.env.pop_scope();
    }
}

impl<'interp> Deref for ScopedInterpreter<'_, 'interp> {
    type Target = Interpreter<'interp>;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl<'a> Interpreter<'a> {
    /// Push a block scope and return the guard that pops it.
    pub fn scoped(&mut self) -> ScopedInterpreter<'_, 'a> {
        self.env.push_scope();
        ScopedInterpreter { interpreter: self }
    }

    /// Push a call scope whose parent is `parent` (a closure's captured
    /// scope) rather than the caller's scope.
    pub fn scoped_in(&mut self, parent: LocalScope<Scope>) -> ScopedInterpreter<'_, 'a> {
        self.env.push_scope_in(parent);
        ScopedInterpreter { interpreter: self }
    }

    /// Run `f` inside a new block scope.
    pub fn with_env_scope<T, F>(&mut self, f: F) -> T
    where
        F: FnOnce(&mut ScopedInterpreter<'_, 'a>) -> T,
    {
        let mut scoped = self.scoped();
        f(&mut scoped)
    }

    /// Run `f` inside a call scope under `parent`, with `bindings` defined.
    pub fn with_call_scope<T, F, I>(&mut self, parent: LocalScope<Scope>, bindings: I, f: F) -> T
    where
        F: FnOnce(&mut ScopedInterpreter<'_, 'a>) -> T,
        I: IntoIterator<Item = (Name, Value)>,
    {
        let mut scoped = self.scoped_in(parent);
        for (name, value) in bindings {
            scoped.env.define(name, value);
        }
        f(&mut scoped)
    }
}
