//! Lexical scopes.
//!
//! Scopes form a parent-linked tree of reference-counted nodes. The
//! interpreter walks it through an [`Environment`], which keeps the chain
//! of active scopes as a stack. Closures hold on to the scope they were
//! created in, so a scope lives as long as its longest holder.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use tally_ir::Name;

use crate::Value;

/// `assign` found no scope binding the name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Unbound;

/// Single-threaded shared cell for scope nodes.
///
/// Same layout as `Rc<RefCell<T>>`; the wrapper keeps every allocation
/// going through [`LocalScope::new`].
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    #[inline]
    pub fn borrow(&self) -> std::cell::Ref<'_, T> {
        self.0.borrow()
    }

    #[inline]
    pub fn borrow_mut(&self) -> std::cell::RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// Whether both handles point at the same scope.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Scopes can reach themselves through captured closures.
        write!(f, "LocalScope({:p})", Rc::as_ptr(&self.0))
    }
}

impl<T: Default> Default for LocalScope<T> {
    fn default() -> Self {
        LocalScope::new(T::default())
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// One scope: its own bindings plus a link to the enclosing scope.
#[derive(Default)]
pub struct Scope {
    bindings: FxHashMap<Name, Value>,
    parent: Option<LocalScope<Scope>>,
}

impl Scope {
    pub fn new() -> Self {
        Scope::default()
    }

    pub fn with_parent(parent: LocalScope<Scope>) -> Self {
        Scope {
            bindings: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    pub fn parent(&self) -> Option<&LocalScope<Scope>> {
        self.parent.as_ref()
    }

    /// Bind `name` here, shadowing any outer binding.
    #[inline]
    pub fn define(&mut self, name: Name, value: Value) {
        self.bindings.insert(name, value);
    }

    /// This scope only.
    #[inline]
    pub fn get_local(&self, name: Name) -> Option<Value> {
        self.bindings.get(&name).cloned()
    }

    /// This scope, then each parent outward.
    pub fn get(&self, name: Name) -> Option<Value> {
        if let Some(value) = self.bindings.get(&name) {
            return Some(value.clone());
        }
        self.parent.as_ref()?.borrow().get(name)
    }

    /// Overwrite the nearest binding of `name`.
    pub fn assign(&mut self, name: Name, value: Value) -> Result<(), Unbound> {
        if let Some(slot) = self.bindings.get_mut(&name) {
            *slot = value;
            return Ok(());
        }
        match &self.parent {
            Some(parent) => parent.borrow_mut().assign(name, value),
            None => Err(Unbound),
        }
    }

    /// Own bindings, in no particular order.
    pub fn bindings(&self) -> impl Iterator<Item = (Name, &Value)> {
        self.bindings.iter().map(|(name, value)| (*name, value))
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("bindings", &self.bindings.len())
            .field("parent", &self.parent)
            .finish()
    }
}

/// Stack of active scopes over a shared global scope.
pub struct Environment {
    scopes: Vec<LocalScope<Scope>>,
    global: LocalScope<Scope>,
}

impl Environment {
    pub fn new() -> Self {
        let global = LocalScope::new(Scope::new());
        Environment {
            scopes: vec![global.clone()],
            global,
        }
    }

    /// Number of active scopes, the global one included.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Enter a block: the new scope's parent is the current scope.
    #[inline]
    pub fn push_scope(&mut self) {
        let parent = self.current_scope();
        self.scopes.push(LocalScope::new(Scope::with_parent(parent)));
    }

    /// Enter a call: the new scope's parent is the callee's captured scope.
    #[inline]
    pub fn push_scope_in(&mut self, parent: LocalScope<Scope>) {
        self.scopes.push(LocalScope::new(Scope::with_parent(parent)));
    }

    /// Leave the innermost scope. The global scope is never popped.
    #[inline]
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    #[inline]
    pub fn current_scope(&self) -> LocalScope<Scope> {
        self.scopes.last().unwrap_or(&self.global).clone()
    }

    pub fn global_scope(&self) -> LocalScope<Scope> {
        self.global.clone()
    }

    #[inline]
    pub fn define(&mut self, name: Name, value: Value) {
        self.scopes
            .last()
            .unwrap_or(&self.global)
            .borrow_mut()
            .define(name, value);
    }

    pub fn define_global(&mut self, name: Name, value: Value) {
        self.global.borrow_mut().define(name, value);
    }

    #[inline]
    pub fn get(&self, name: Name) -> Option<Value> {
        self.scopes.last().unwrap_or(&self.global).borrow().get(name)
    }

    /// Current scope only; never searches outward.
    pub fn get_local(&self, name: Name) -> Option<Value> {
        self.scopes
            .last()
            .unwrap_or(&self.global)
            .borrow()
            .get_local(name)
    }

    /// `global::name`
    pub fn get_global(&self, name: Name) -> Option<Value> {
        self.global.borrow().get_local(name)
    }

    /// `parent::name`: search starts one scope out from the current one.
    /// At the top level that is the global scope itself.
    pub fn get_parent(&self, name: Name) -> Option<Value> {
        let current = self.current_scope();
        let parent = current.borrow().parent().cloned();
        parent.map_or_else(|| self.get_global(name), |p| p.borrow().get(name))
    }

    #[inline]
    pub fn assign(&mut self, name: Name, value: Value) -> Result<(), Unbound> {
        self.scopes
            .last()
            .unwrap_or(&self.global)
            .borrow_mut()
            .assign(name, value)
    }

    /// Environment for a nested run (a scenario): fresh stack whose only
    /// scope is a child of this environment's current scope.
    #[must_use]
    pub fn child(&self) -> Self {
        Environment {
            scopes: vec![LocalScope::new(Scope::with_parent(self.current_scope()))],
            global: self.global.clone(),
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
