//! Node IDs and ranges for the flat AST.
//!
//! Nodes live in an `ExprArena` and refer to each other by index. Child lists
//! are stored contiguously in side tables and addressed by `(start, len)`.

use std::fmt;

macro_rules! define_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Sentinel for an absent optional child.
            pub const INVALID: $name = $name(u32::MAX);

            #[inline]
            pub const fn new(index: u32) -> Self {
                $name(index)
            }

            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            #[inline]
            pub const fn is_valid(self) -> bool {
                self.0 != u32::MAX
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, "{}({})", stringify!($name), self.0)
                } else {
                    write!(f, "{}::INVALID", stringify!($name))
                }
            }
        }
    };
}

macro_rules! define_range {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Default, Debug)]
        pub struct $name {
            pub start: u32,
            pub len: u16,
        }

        impl $name {
            pub const EMPTY: $name = $name { start: 0, len: 0 };

            #[inline]
            pub const fn new(start: u32, len: u16) -> Self {
                $name { start, len }
            }

            #[inline]
            pub const fn is_empty(&self) -> bool {
                self.len == 0
            }

            #[inline]
            pub const fn len(&self) -> usize {
                self.len as usize
            }

            #[inline]
            pub fn indices(&self) -> std::ops::Range<usize> {
                let start = self.start as usize;
                start..start + self.len as usize
            }
        }
    };
}

define_id!(
    /// Index of an expression in the arena.
    ExprId
);
define_id!(
    /// Index of a statement in the arena.
    StmtId
);

define_range!(
    /// Contiguous run of `ExprId`s (arguments, list elements).
    ExprRange
);
define_range!(
    /// Contiguous run of `StmtId`s (a block body).
    StmtRange
);
define_range!(
    /// Contiguous run of `FieldInit`s (object and table literals).
    FieldRange
);
define_range!(
    /// Contiguous run of parameter names.
    ParamRange
);
define_range!(
    /// Contiguous run of `IfBranch`es.
    BranchRange
);
define_range!(
    /// Contiguous run of portfolio `Holding`s.
    HoldingRange
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_sentinel() {
        assert!(!ExprId::INVALID.is_valid());
        assert!(ExprId::new(0).is_valid());
        assert_eq!(ExprId::default(), ExprId::INVALID);
        assert_eq!(format!("{:?}", StmtId::new(3)), "StmtId(3)");
    }

    #[test]
    fn range_indices() {
        let range = ExprRange::new(4, 3);
        assert_eq!(range.indices(), 4..7);
        assert_eq!(range.len(), 3);
        assert!(StmtRange::EMPTY.is_empty());
    }
}
