//! Flat AST for Tally programs.

mod expr;
mod finance;
mod operators;
mod stmt;

pub use expr::{Expr, ExprKind, FieldInit};
pub use finance::{FinanceFn, LedgerSide, ScopeQualifier};
pub use operators::{BinaryOp, UnaryOp};
pub use stmt::{Holding, IfBranch, Stmt, StmtKind};
