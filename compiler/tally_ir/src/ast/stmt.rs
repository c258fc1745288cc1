//! Statement nodes.

use super::LedgerSide;
use crate::{
    BranchRange, ExprId, ExprRange, HoldingRange, Name, ParamRange, Span, StmtRange,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    #[inline]
    pub const fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StmtKind {
    Let {
        name: Name,
        value: ExprId,
    },
    Set {
        name: Name,
        value: ExprId,
    },
    Print(ExprId),
    Log(ExprId),
    Expr(ExprId),
    /// `DO ... END`
    Block(StmtRange),
    If {
        branches: BranchRange,
        /// `None` when there is no ELSE.
        else_body: Option<StmtRange>,
    },
    While {
        cond: ExprId,
        body: StmtRange,
    },
    /// Counted loop. `step` is `ExprId::INVALID` when omitted.
    For {
        var: Name,
        start: ExprId,
        end: ExprId,
        step: ExprId,
        body: StmtRange,
    },
    ForEach {
        var: Name,
        source: ExprId,
        body: StmtRange,
    },
    Function {
        name: Name,
        params: ParamRange,
        body: StmtRange,
    },
    /// `value` is `ExprId::INVALID` for a bare RETURN.
    Return(ExprId),
    Import(ExprId),

    // Finance
    Cashflow {
        name: Name,
        amounts: ExprRange,
    },
    Portfolio {
        name: Name,
        holdings: HoldingRange,
    },
    Scenario {
        name: Name,
        body: StmtRange,
    },
    Run {
        scenario: Name,
        model: Option<Name>,
    },
    Simulate {
        scenario: Name,
        times: ExprId,
    },
    Ledger {
        side: LedgerSide,
        ledger: Name,
        amount: ExprId,
        description: ExprId,
        date: ExprId,
    },

    /// Statement that failed to parse. Executes as a no-op.
    Error,
}

/// One `IF`/`ELSEIF` arm.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IfBranch {
    pub cond: ExprId,
    pub body: StmtRange,
}

/// `ASSET expr WEIGHT expr` entry of a PORTFOLIO statement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Holding {
    pub asset: ExprId,
    pub weight: ExprId,
    pub span: Span,
}
