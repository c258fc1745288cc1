//! Assignment and binary operators, lowest precedence first:
//! `=`, `or`, `and`, equality, comparison, `+ -`, `* / %`, `^`, unary.

use tally_ir::{BinaryOp, ExprId, ExprKind, TokenKind, UnaryOp};
use tally_stack::ensure_sufficient_stack;

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Parse an expression, growing the stack for deeply nested input.
    pub(crate) fn parse_expr(&mut self) -> Result<ExprId, ParseError> {
        ensure_sufficient_stack(|| self.parse_assignment())
    }

    /// `name = value` is an expression; any other target is rejected.
    fn parse_assignment(&mut self) -> Result<ExprId, ParseError> {
        let left = self.parse_or()?;
        if !self.cursor.check(&TokenKind::Eq) {
            return Ok(left);
        }

        let left_span = self.expr_span(left);
        let ExprKind::Ident(target) = self.arena.get_expr(left).kind else {
            return Err(ParseError::invalid_assignment_target(left_span));
        };
        self.cursor.advance();
        let value = self.parse_expr()?;
        let span = left_span.merge(self.expr_span(value));
        Ok(self.alloc_expr(ExprKind::Assign { target, value }, span))
    }

    fn binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId) -> ExprId {
        let span = self.expr_span(left).merge(self.expr_span(right));
        self.alloc_expr(ExprKind::Binary { op, left, right }, span)
    }

    /// Left-associative level: `next (op next)*`.
    fn parse_left_assoc(
        &mut self,
        next: fn(&mut Self) -> Result<ExprId, ParseError>,
        match_op: fn(TokenKind) -> Option<BinaryOp>,
    ) -> Result<ExprId, ParseError> {
        let mut left = next(self)?;
        while let Some(op) = match_op(self.cursor.current_kind()) {
            self.cursor.advance();
            let right = next(self)?;
            left = self.binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_or(&mut self) -> Result<ExprId, ParseError> {
        self.parse_left_assoc(Self::parse_and, |kind| match kind {
            TokenKind::Or | TokenKind::PipePipe => Some(BinaryOp::Or),
            _ => None,
        })
    }

    fn parse_and(&mut self) -> Result<ExprId, ParseError> {
        self.parse_left_assoc(Self::parse_equality, |kind| match kind {
            TokenKind::And | TokenKind::AmpAmp => Some(BinaryOp::And),
            _ => None,
        })
    }

    fn parse_equality(&mut self) -> Result<ExprId, ParseError> {
        self.parse_left_assoc(Self::parse_comparison, |kind| match kind {
            TokenKind::EqEq => Some(BinaryOp::Eq),
            TokenKind::NotEq => Some(BinaryOp::NotEq),
            _ => None,
        })
    }

    fn parse_comparison(&mut self) -> Result<ExprId, ParseError> {
        self.parse_left_assoc(Self::parse_additive, |kind| match kind {
            TokenKind::Lt => Some(BinaryOp::Lt),
            TokenKind::LtEq => Some(BinaryOp::LtEq),
            TokenKind::Gt => Some(BinaryOp::Gt),
            TokenKind::GtEq => Some(BinaryOp::GtEq),
            _ => None,
        })
    }

    fn parse_additive(&mut self) -> Result<ExprId, ParseError> {
        self.parse_left_assoc(Self::parse_multiplicative, |kind| match kind {
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Sub),
            _ => None,
        })
    }

    fn parse_multiplicative(&mut self) -> Result<ExprId, ParseError> {
        self.parse_left_assoc(Self::parse_power, |kind| match kind {
            TokenKind::Star => Some(BinaryOp::Mul),
            TokenKind::Slash => Some(BinaryOp::Div),
            TokenKind::Percent => Some(BinaryOp::Mod),
            _ => None,
        })
    }

    /// `^` is right-associative: `2 ^ 3 ^ 2` is `2 ^ 9`.
    fn parse_power(&mut self) -> Result<ExprId, ParseError> {
        let base = self.parse_unary()?;
        if !self.cursor.eat(&TokenKind::Caret) {
            return Ok(base);
        }
        let exponent = ensure_sufficient_stack(|| self.parse_power())?;
        Ok(self.binary(BinaryOp::Pow, base, exponent))
    }

    fn parse_unary(&mut self) -> Result<ExprId, ParseError> {
        let op = match self.cursor.current_kind() {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Not | TokenKind::Bang => UnaryOp::Not,
            _ => return self.parse_postfix(),
        };
        let start = self.cursor.advance().span;
        let operand = ensure_sufficient_stack(|| self.parse_unary())?;
        let span = start.merge(self.expr_span(operand));
        Ok(self.alloc_expr(ExprKind::Unary { op, operand }, span))
    }
}
