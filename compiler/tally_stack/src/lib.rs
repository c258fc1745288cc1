//! Stack safety for the recursive parts of Tally.
//!
//! Two separate concerns live here:
//!
//! - [`ensure_sufficient_stack`] grows the native stack on demand, so deeply
//!   nested source (long `a + b + c ...` chains, nested brackets) neither
//!   crashes the parser nor the tree-walking evaluator.
//! - [`DepthCounter`] bounds *user* recursion. A script that calls itself
//!   forever should get a clean runtime error, not an unbounded heap of
//!   stack segments.

use std::cell::Cell;

/// Grow the stack when less than this much remains.
const RED_ZONE: usize = 100 * 1024;

/// Size of each new stack segment.
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Default bound on nested function and lambda calls.
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// Run `f`, first growing the stack if it is close to exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack; call straight through.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Counts active calls against a fixed limit.
///
/// [`enter`](Self::enter) hands back a guard that decrements the count when
/// dropped, so early returns and `?` unwind the depth correctly.
#[derive(Debug)]
pub struct DepthCounter {
    current: Cell<usize>,
    limit: usize,
}

impl DepthCounter {
    pub fn new(limit: usize) -> Self {
        DepthCounter {
            current: Cell::new(0),
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn current(&self) -> usize {
        self.current.get()
    }

    /// Enter one level. Returns `None` once the limit is reached.
    pub fn enter(&self) -> Option<DepthGuard<'_>> {
        let depth = self.current.get();
        if depth >= self.limit {
            return None;
        }
        self.current.set(depth + 1);
        Some(DepthGuard { counter: self })
    }
}

impl Default for DepthCounter {
    fn default() -> Self {
        DepthCounter::new(DEFAULT_MAX_DEPTH)
    }
}

/// Live call level; leaving scope gives the level back.
#[must_use = "the depth is released as soon as the guard is dropped"]
#[derive(Debug)]
pub struct DepthGuard<'a> {
    counter: &'a DepthCounter,
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        let depth = self.counter.current.get();
        self.counter.current.set(depth.saturating_sub(1));
    }
}
