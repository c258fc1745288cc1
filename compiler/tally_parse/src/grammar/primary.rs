//! Primary expressions: literals, names, collections, groups and lambdas.

use tally_ir::{ExprId, ExprKind, FieldInit, Name, ScopeQualifier, Span, TokenKind};

use crate::{ParseError, Parser};

/// Longest parameter list the lambda lookahead scans before giving up.
const MAX_LAMBDA_LOOKAHEAD: usize = 64;

impl Parser<'_> {
    pub(crate) fn parse_primary(&mut self) -> Result<ExprId, ParseError> {
        let token = self.cursor.current();
        let span = token.span;
        let kind = match token.kind {
            TokenKind::Number(value) => ExprKind::Number(value),
            TokenKind::Str(name) => ExprKind::Str(name),
            TokenKind::Date(name) => ExprKind::Date(name),
            TokenKind::Money { amount, currency } => ExprKind::Money { amount, currency },
            TokenKind::True => ExprKind::Bool(true),
            TokenKind::False => ExprKind::Bool(false),
            TokenKind::Null => ExprKind::Null,
            TokenKind::Ident(name) => return self.parse_name(name, span),
            TokenKind::LParen => return self.parse_paren(),
            TokenKind::LBracket => {
                self.cursor.advance();
                let items = self.parse_expr_list(&TokenKind::RBracket, span)?;
                let items = self.arena.alloc_expr_list(items);
                let span = span.merge(self.cursor.previous_span());
                return Ok(self.alloc_expr(ExprKind::List(items), span));
            }
            TokenKind::LBrace => {
                let fields = self.parse_field_inits()?;
                let span = span.merge(self.cursor.previous_span());
                return Ok(self.alloc_expr(ExprKind::Object(fields), span));
            }
            TokenKind::Table => return self.parse_table_literal(),
            TokenKind::Cashflow => return self.parse_cashflow_literal(),
            TokenKind::Portfolio => return self.parse_portfolio_literal(),
            _ => return Err(ParseError::expected_expression(token)),
        };
        self.cursor.advance();
        Ok(self.alloc_expr(kind, span))
    }

    /// Identifier, `global::name`/`parent::name`, or a one-parameter lambda.
    fn parse_name(&mut self, name: Name, span: Span) -> Result<ExprId, ParseError> {
        match self.cursor.peek_kind_at(1) {
            TokenKind::Arrow => {
                self.cursor.advance();
                self.cursor.advance();
                let params = self.arena.alloc_params([name]);
                self.finish_lambda(params, span)
            }
            TokenKind::ColonColon => {
                let qualifier = ScopeQualifier::from_name(self.interner.lookup(name));
                match (qualifier, self.cursor.peek_kind_at(2)) {
                    (Some(scope), TokenKind::Ident(inner)) => {
                        self.cursor.advance();
                        self.cursor.advance();
                        let end = self.cursor.advance().span;
                        Ok(self.alloc_expr(
                            ExprKind::Qualified { scope, name: inner },
                            span.merge(end),
                        ))
                    }
                    _ => {
                        self.cursor.advance();
                        Err(ParseError::unexpected(
                            self.cursor.current(),
                            "`global::name` or `parent::name`",
                        ))
                    }
                }
            }
            _ => {
                self.cursor.advance();
                Ok(self.alloc_expr(ExprKind::Ident(name), span))
            }
        }
    }

    /// `( params ) -> body` when the parenthesized tokens are plain names
    /// followed by `->`; otherwise a grouped expression.
    fn parse_paren(&mut self) -> Result<ExprId, ParseError> {
        let open = self.cursor.current_span();
        if self.is_lambda_params() {
            self.cursor.advance();
            let params = self.parse_param_names(open)?;
            self.cursor.expect(&TokenKind::Arrow)?;
            let params = self.arena.alloc_params(params);
            return self.finish_lambda(params, open);
        }

        self.cursor.advance();
        let inner = self.parse_expr()?;
        self.cursor.expect_closing(&TokenKind::RParen, open)?;
        Ok(inner)
    }

    /// Token-only lookahead: `(` (ident (`,` ident)*)? `)` `->`.
    fn is_lambda_params(&self) -> bool {
        let mut offset = 1;
        let mut expect_name = true;
        while offset < MAX_LAMBDA_LOOKAHEAD {
            match self.cursor.peek_kind_at(offset) {
                TokenKind::RParen => {
                    return self.cursor.peek_kind_at(offset + 1) == TokenKind::Arrow;
                }
                TokenKind::Ident(_) if expect_name => expect_name = false,
                TokenKind::Comma if !expect_name => expect_name = true,
                _ => return false,
            }
            offset += 1;
        }
        false
    }

    fn finish_lambda(
        &mut self,
        params: tally_ir::ParamRange,
        start: Span,
    ) -> Result<ExprId, ParseError> {
        let body = self.parse_expr()?;
        let span = start.merge(self.expr_span(body));
        Ok(self.alloc_expr(ExprKind::Lambda { params, body }, span))
    }

    /// `{ key: value, ... }` where keys are names or strings. Starts at `{`.
    pub(crate) fn parse_field_inits(&mut self) -> Result<tally_ir::FieldRange, ParseError> {
        let open = self.cursor.expect(&TokenKind::LBrace)?;
        let mut fields = Vec::new();
        while !self.cursor.check(&TokenKind::RBrace) && !self.cursor.is_at_end() {
            let key = self.cursor.current();
            let name = match key.kind {
                TokenKind::Ident(name) | TokenKind::Str(name) => name,
                _ => return Err(ParseError::unexpected(key, "field name")),
            };
            self.cursor.advance();
            self.cursor.expect(&TokenKind::Colon)?;
            let value = self.parse_expr()?;
            let span = key.span.merge(self.expr_span(value));
            fields.push(FieldInit { name, value, span });
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect_closing(&TokenKind::RBrace, open)?;
        Ok(self.arena.alloc_fields(fields))
    }
}
