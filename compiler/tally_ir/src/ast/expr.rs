//! Expression nodes.

use super::{BinaryOp, FinanceFn, ScopeQualifier, UnaryOp};
use crate::{ExprId, ExprRange, FieldRange, Name, ParamRange, Span};

/// Expression node. Children are arena indices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    #[inline]
    pub const fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ExprKind {
    // Literals
    Number(f64),
    Str(Name),
    Date(Name),
    /// Money literal. Evaluates to its amount.
    Money {
        amount: f64,
        currency: Name,
    },
    Bool(bool),
    Null,

    // Names
    Ident(Name),
    /// `global::name` or `parent::name`.
    Qualified {
        scope: ScopeQualifier,
        name: Name,
    },

    // Collections
    List(ExprRange),
    Object(FieldRange),

    // Operators
    Assign {
        target: Name,
        value: ExprId,
    },
    Unary {
        op: UnaryOp,
        operand: ExprId,
    },
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },

    // Postfix
    Call {
        callee: ExprId,
        args: ExprRange,
    },
    Index {
        receiver: ExprId,
        index: ExprId,
    },
    /// `receiver[start:end]`. Missing bounds are `ExprId::INVALID`.
    Slice {
        receiver: ExprId,
        start: ExprId,
        end: ExprId,
    },
    /// `receiver.field`: table column, object field or value property.
    Field {
        receiver: ExprId,
        field: Name,
    },

    Lambda {
        params: ParamRange,
        body: ExprId,
    },

    // Finance
    /// `TABLE { col: expr, ... }`
    Table(FieldRange),
    /// `CASHFLOW [a, b, ...]`
    Cashflow(ExprRange),
    /// `CASHFLOW(expr)`: converts a list-valued expression.
    CashflowFrom(ExprId),
    /// `PORTFOLIO { assets: expr, weights: expr }`
    Portfolio {
        assets: ExprId,
        weights: ExprId,
    },
    /// Finance call rewritten at parse time; arity already checked.
    Finance {
        func: FinanceFn,
        args: ExprRange,
    },

    /// Placeholder left behind by a parse error.
    Error,
}

/// `name: value` entry of an object or table literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldInit {
    pub name: Name,
    pub value: ExprId,
    pub span: Span,
}
