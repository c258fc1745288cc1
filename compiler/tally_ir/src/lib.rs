//! Shared intermediate representation for the Tally interpreter.
//!
//! - [`Span`]: byte ranges into source text
//! - [`Name`] / [`StringInterner`]: interned identifiers and literals
//! - [`Token`] / [`TokenKind`]: lexer output
//! - [`ast`]: flat expression/statement nodes stored in an [`ExprArena`]

mod arena;
pub mod ast;
mod expr_id;
mod name;
mod span;
mod token;

pub use arena::{ExprArena, Program, SharedArena};
pub use ast::{
    BinaryOp, Expr, ExprKind, FieldInit, FinanceFn, Holding, IfBranch, LedgerSide,
    ScopeQualifier, Stmt, StmtKind, UnaryOp,
};
pub use expr_id::{
    BranchRange, ExprId, ExprRange, FieldRange, HoldingRange, ParamRange, StmtId, StmtRange,
};
pub use name::{Name, SharedInterner, StringInterner};
pub use span::Span;
pub use token::{Token, TokenKind};
