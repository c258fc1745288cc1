//! Arena storage for the flat AST.
//!
//! Every node of a parsed program lives here. Child lists are copied into side
//! tables so a node stays `Copy` and refers to its children by range.

use std::sync::Arc;

use crate::ast::{Expr, FieldInit, Holding, IfBranch, Stmt};
use crate::{
    BranchRange, ExprId, ExprRange, FieldRange, HoldingRange, Name, ParamRange, StmtId,
    StmtRange,
};

fn to_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

#[derive(Default, Debug, Clone)]
pub struct ExprArena {
    exprs: Vec<Expr>,
    expr_lists: Vec<ExprId>,
    stmts: Vec<Stmt>,
    stmt_lists: Vec<StmtId>,
    fields: Vec<FieldInit>,
    params: Vec<Name>,
    branches: Vec<IfBranch>,
    holdings: Vec<Holding>,
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    // Expressions

    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(to_u32(self.exprs.len()));
        self.exprs.push(expr);
        id
    }

    /// Expression by ID.
    ///
    /// # Panics
    /// Panics if `id` did not come from this arena.
    #[inline]
    pub fn get_expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    pub fn alloc_expr_list(&mut self, ids: impl IntoIterator<Item = ExprId>) -> ExprRange {
        let start = self.expr_lists.len();
        self.expr_lists.extend(ids);
        ExprRange::new(to_u32(start), to_u16(self.expr_lists.len() - start))
    }

    #[inline]
    pub fn get_expr_list(&self, range: ExprRange) -> &[ExprId] {
        &self.expr_lists[range.indices()]
    }

    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    // Statements

    pub fn alloc_stmt(&mut self, stmt: Stmt) -> StmtId {
        let id = StmtId::new(to_u32(self.stmts.len()));
        self.stmts.push(stmt);
        id
    }

    #[inline]
    pub fn get_stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id.index()]
    }

    pub fn alloc_stmt_list(&mut self, ids: impl IntoIterator<Item = StmtId>) -> StmtRange {
        let start = self.stmt_lists.len();
        self.stmt_lists.extend(ids);
        StmtRange::new(to_u32(start), to_u16(self.stmt_lists.len() - start))
    }

    #[inline]
    pub fn get_stmt_list(&self, range: StmtRange) -> &[StmtId] {
        &self.stmt_lists[range.indices()]
    }

    // Side tables

    pub fn alloc_fields(&mut self, fields: impl IntoIterator<Item = FieldInit>) -> FieldRange {
        let start = self.fields.len();
        self.fields.extend(fields);
        FieldRange::new(to_u32(start), to_u16(self.fields.len() - start))
    }

    #[inline]
    pub fn get_fields(&self, range: FieldRange) -> &[FieldInit] {
        &self.fields[range.indices()]
    }

    pub fn alloc_params(&mut self, params: impl IntoIterator<Item = Name>) -> ParamRange {
        let start = self.params.len();
        self.params.extend(params);
        ParamRange::new(to_u32(start), to_u16(self.params.len() - start))
    }

    #[inline]
    pub fn get_params(&self, range: ParamRange) -> &[Name] {
        &self.params[range.indices()]
    }

    pub fn alloc_branches(&mut self, branches: impl IntoIterator<Item = IfBranch>) -> BranchRange {
        let start = self.branches.len();
        self.branches.extend(branches);
        BranchRange::new(to_u32(start), to_u16(self.branches.len() - start))
    }

    #[inline]
    pub fn get_branches(&self, range: BranchRange) -> &[IfBranch] {
        &self.branches[range.indices()]
    }

    pub fn alloc_holdings(&mut self, holdings: impl IntoIterator<Item = Holding>) -> HoldingRange {
        let start = self.holdings.len();
        self.holdings.extend(holdings);
        HoldingRange::new(to_u32(start), to_u16(self.holdings.len() - start))
    }

    #[inline]
    pub fn get_holdings(&self, range: HoldingRange) -> &[Holding] {
        &self.holdings[range.indices()]
    }
}

/// Reference-counted arena handle.
///
/// Lambdas and deferred scenario blocks keep the arena alive after the
/// program that declared them has finished executing.
#[derive(Clone, Debug, Default)]
pub struct SharedArena(Arc<ExprArena>);

impl SharedArena {
    pub fn new(arena: ExprArena) -> Self {
        SharedArena(Arc::new(arena))
    }

    /// Whether two handles point at the same arena.
    pub fn ptr_eq(&self, other: &SharedArena) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl std::ops::Deref for SharedArena {
    type Target = ExprArena;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// A parsed program: top-level statements plus the arena that owns them.
#[derive(Clone, Debug, Default)]
pub struct Program {
    pub body: StmtRange,
    pub arena: SharedArena,
}

impl Program {
    pub fn statements(&self) -> &[StmtId] {
        self.arena.get_stmt_list(self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ExprKind, StmtKind};
    use crate::Span;

    #[test]
    fn alloc_and_get() {
        let mut arena = ExprArena::new();
        let one = arena.alloc_expr(Expr::new(ExprKind::Number(1.0), Span::new(0, 1)));
        let two = arena.alloc_expr(Expr::new(ExprKind::Number(2.0), Span::new(2, 3)));
        let list = arena.alloc_expr_list([one, two]);

        assert_eq!(arena.get_expr(two).kind, ExprKind::Number(2.0));
        assert_eq!(arena.get_expr_list(list), &[one, two]);
        assert_eq!(arena.expr_count(), 2);
    }

    #[test]
    fn nested_lists_stay_contiguous() {
        let mut arena = ExprArena::new();
        let a = arena.alloc_expr(Expr::new(ExprKind::Null, Span::DUMMY));
        let inner = arena.alloc_expr_list([a]);
        let b = arena.alloc_expr(Expr::new(ExprKind::List(inner), Span::DUMMY));
        let outer = arena.alloc_expr_list([a, b]);

        assert_eq!(arena.get_expr_list(inner), &[a]);
        assert_eq!(arena.get_expr_list(outer), &[a, b]);
    }

    #[test]
    fn program_statements() {
        let mut arena = ExprArena::new();
        let value = arena.alloc_expr(Expr::new(ExprKind::Bool(true), Span::DUMMY));
        let stmt = arena.alloc_stmt(Stmt::new(StmtKind::Print(value), Span::DUMMY));
        let body = arena.alloc_stmt_list([stmt]);
        let program = Program {
            body,
            arena: SharedArena::new(arena),
        };
        assert_eq!(program.statements(), &[stmt]);
    }
}
