//! Postfix operators: `f(args)`, `x[i]`, `x[a:b]`, `x.name`.

use tally_ir::{ExprId, ExprKind, FinanceFn, Span, TokenKind};

use crate::{ParseError, Parser};

impl Parser<'_> {
    pub(crate) fn parse_postfix(&mut self) -> Result<ExprId, ParseError> {
        let mut expr = self.parse_primary()?;
        loop {
            expr = match self.cursor.current_kind() {
                TokenKind::LParen => self.parse_call(expr)?,
                TokenKind::LBracket => self.parse_subscript(expr)?,
                TokenKind::Dot => self.parse_field(expr)?,
                _ => return Ok(expr),
            };
        }
    }

    /// Comma-separated expressions up to `close`; the opener is consumed.
    /// A trailing comma is allowed.
    pub(crate) fn parse_expr_list(
        &mut self,
        close: &TokenKind,
        open: Span,
    ) -> Result<Vec<ExprId>, ParseError> {
        let mut items = Vec::new();
        while !self.cursor.check(close) && !self.cursor.is_at_end() {
            items.push(self.parse_expr()?);
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect_closing(close, open)?;
        Ok(items)
    }

    /// Calls to a bare finance name become `ExprKind::Finance` and have their
    /// argument count checked here.
    fn parse_call(&mut self, callee: ExprId) -> Result<ExprId, ParseError> {
        let open = self.cursor.advance().span;
        let args = self.parse_expr_list(&TokenKind::RParen, open)?;
        let span = self.expr_span(callee).merge(self.cursor.previous_span());

        if let ExprKind::Ident(name) = self.arena.get_expr(callee).kind {
            if let Some(func) = FinanceFn::from_name(self.interner.lookup(name)) {
                if !func.accepts(args.len()) {
                    return Err(ParseError::finance_arity(func, args.len(), span));
                }
                let args = self.arena.alloc_expr_list(args);
                return Ok(self.alloc_expr(ExprKind::Finance { func, args }, span));
            }
        }

        let args = self.arena.alloc_expr_list(args);
        Ok(self.alloc_expr(ExprKind::Call { callee, args }, span))
    }

    /// `[i]`, `[a:b]`, `[:b]`, `[a:]` or `[:]`.
    fn parse_subscript(&mut self, receiver: ExprId) -> Result<ExprId, ParseError> {
        let open = self.cursor.advance().span;

        let start = if self.cursor.check(&TokenKind::Colon) {
            ExprId::INVALID
        } else {
            self.parse_expr()?
        };

        if !self.cursor.eat(&TokenKind::Colon) {
            self.cursor.expect_closing(&TokenKind::RBracket, open)?;
            let span = self.expr_span(receiver).merge(self.cursor.previous_span());
            return Ok(self.alloc_expr(
                ExprKind::Index {
                    receiver,
                    index: start,
                },
                span,
            ));
        }

        let end = if self.cursor.check(&TokenKind::RBracket) {
            ExprId::INVALID
        } else {
            self.parse_expr()?
        };
        self.cursor.expect_closing(&TokenKind::RBracket, open)?;
        let span = self.expr_span(receiver).merge(self.cursor.previous_span());
        Ok(self.alloc_expr(
            ExprKind::Slice {
                receiver,
                start,
                end,
            },
            span,
        ))
    }

    /// `.name`. Keywords are accepted as field names in lower case, so
    /// `schedule.step` or `row.table` still read naturally.
    fn parse_field(&mut self, receiver: ExprId) -> Result<ExprId, ParseError> {
        self.cursor.advance();
        let token = self.cursor.current();
        let field = match token.kind {
            TokenKind::Ident(name) => name,
            kind => match kind.keyword_text() {
                Some(text) => self.interner.intern(&text.to_ascii_lowercase()),
                None => return Err(ParseError::unexpected(token, "field name")),
            },
        };
        self.cursor.advance();
        let span = self.expr_span(receiver).merge(token.span);
        Ok(self.alloc_expr(ExprKind::Field { receiver, field }, span))
    }
}
