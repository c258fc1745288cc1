//! Interned identifiers.
//!
//! Identifiers, string literals and date literals are interned once by the
//! lexer. Later phases compare and hash `Name`s as plain integers and only go
//! back to text for diagnostics and display.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

/// Interned string handle.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// Pre-interned empty string.
    pub const EMPTY: Name = Name(0);

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}

struct InternTable {
    map: FxHashMap<&'static str, Name>,
    strings: Vec<&'static str>,
}

/// String interner backing every `Name`.
///
/// Interned text is leaked so lookups hand out plain `&str` without holding
/// the lock. An interpreter session interns a bounded vocabulary, so the leak
/// is proportional to the distinct identifiers and literals it has seen.
pub struct StringInterner {
    table: RwLock<InternTable>,
}

impl StringInterner {
    pub fn new() -> Self {
        let empty: &'static str = "";
        let mut map = FxHashMap::default();
        map.insert(empty, Name::EMPTY);
        let interner = StringInterner {
            table: RwLock::new(InternTable {
                map,
                strings: vec![empty],
            }),
        };
        interner.pre_intern();
        interner
    }

    /// Intern `s`, returning the existing `Name` if it was seen before.
    pub fn intern(&self, s: &str) -> Name {
        if let Some(&name) = self.table.read().map.get(s) {
            return name;
        }

        let mut table = self.table.write();
        if let Some(&name) = table.map.get(s) {
            return name;
        }

        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        let raw = u32::try_from(table.strings.len()).unwrap_or(u32::MAX);
        let name = Name(raw);
        table.strings.push(leaked);
        table.map.insert(leaked, name);
        name
    }

    /// Text of an interned name. Unknown names resolve to the empty string.
    pub fn lookup(&self, name: Name) -> &str {
        let table = self.table.read();
        table.strings.get(name.0 as usize).copied().unwrap_or("")
    }

    /// Names the evaluator reaches for on hot paths.
    fn pre_intern(&self) {
        const COMMON: &[&str] = &[
            "result",
            "last_run",
            "simulation_results",
            "global",
            "parent",
        ];
        for s in COMMON {
            self.intern(s);
        }
    }

    pub fn len(&self) -> usize {
        self.table.read().strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// Clonable handle to one interner shared by the lexer, parser and evaluator.
#[derive(Clone, Default)]
pub struct SharedInterner(Arc<StringInterner>);

impl SharedInterner {
    pub fn new() -> Self {
        SharedInterner(Arc::new(StringInterner::new()))
    }
}

impl std::ops::Deref for SharedInterner {
    type Target = StringInterner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_and_lookup() {
        let interner = StringInterner::new();
        let hello = interner.intern("hello");
        let world = interner.intern("world");

        assert_eq!(hello, interner.intern("hello"));
        assert_ne!(hello, world);
        assert_eq!(interner.lookup(hello), "hello");
        assert_eq!(interner.lookup(world), "world");
    }

    #[test]
    fn empty_string_is_reserved() {
        let interner = StringInterner::new();
        assert_eq!(interner.intern(""), Name::EMPTY);
        assert_eq!(interner.lookup(Name::EMPTY), "");
    }

    #[test]
    fn shared_handles_see_same_table() {
        let a = SharedInterner::new();
        let b = a.clone();
        assert_eq!(a.intern("rate"), b.intern("rate"));
    }

    #[test]
    fn case_is_preserved() {
        let interner = StringInterner::new();
        assert_ne!(interner.intern("Rate"), interner.intern("rate"));
    }
}
