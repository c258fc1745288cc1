//! Statement parsing.

use tally_ir::{ExprId, IfBranch, Name, StmtId, StmtKind, StmtRange, TokenKind};
use tally_stack::ensure_sufficient_stack;

use crate::recovery::closes_block;
use crate::{ParseError, Parser};

impl Parser<'_> {
    pub(crate) fn parse_statement(&mut self) -> Result<StmtId, ParseError> {
        ensure_sufficient_stack(|| self.parse_statement_inner())
    }

    fn parse_statement_inner(&mut self) -> Result<StmtId, ParseError> {
        let start = self.cursor.current_span();
        match self.cursor.current_kind() {
            TokenKind::Let => self.parse_binding(true),
            TokenKind::Set => self.parse_binding(false),
            TokenKind::Print => {
                self.cursor.advance();
                let value = self.parse_expr()?;
                self.expect_line_end()?;
                Ok(self.alloc_stmt(StmtKind::Print(value), start))
            }
            TokenKind::Log => {
                self.cursor.advance();
                let value = self.parse_expr()?;
                self.expect_line_end()?;
                Ok(self.alloc_stmt(StmtKind::Log(value), start))
            }
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::For => self.parse_for(),
            TokenKind::Function => self.parse_function(),
            TokenKind::Return => {
                self.cursor.advance();
                let value = if self.cursor.at_line_end() {
                    ExprId::INVALID
                } else {
                    self.parse_expr()?
                };
                self.expect_line_end()?;
                Ok(self.alloc_stmt(StmtKind::Return(value), start))
            }
            TokenKind::Import => {
                self.cursor.advance();
                let path = self.parse_expr()?;
                self.expect_line_end()?;
                Ok(self.alloc_stmt(StmtKind::Import(path), start))
            }
            TokenKind::Do => {
                self.cursor.advance();
                let body = self.parse_block()?;
                self.expect_end("DO block")?;
                Ok(self.alloc_stmt(StmtKind::Block(body), start))
            }
            TokenKind::Cashflow if self.next_is_ident() => self.parse_cashflow_stmt(),
            TokenKind::Portfolio if self.next_is_ident() => self.parse_portfolio_stmt(),
            TokenKind::Scenario => self.parse_scenario(),
            TokenKind::Run => self.parse_run(),
            TokenKind::Simulate => self.parse_simulate(),
            TokenKind::Debit | TokenKind::Credit => self.parse_ledger_entry(),
            _ => {
                let value = self.parse_expr()?;
                self.expect_line_end()?;
                Ok(self.alloc_stmt(StmtKind::Expr(value), start))
            }
        }
    }

    #[inline]
    pub(crate) fn next_is_ident(&self) -> bool {
        matches!(self.cursor.peek_kind_at(1), TokenKind::Ident(_))
    }

    /// `LET name = expr` or `SET name = expr`.
    fn parse_binding(&mut self, is_let: bool) -> Result<StmtId, ParseError> {
        let start = self.cursor.advance().span;
        let (name, _) = self.cursor.expect_ident()?;
        self.cursor.expect(&TokenKind::Eq)?;
        let value = self.parse_expr()?;
        self.expect_line_end()?;
        let kind = if is_let {
            StmtKind::Let { name, value }
        } else {
            StmtKind::Set { name, value }
        };
        Ok(self.alloc_stmt(kind, start))
    }

    /// Body of a block-opening header: the rest of the header line, then
    /// either an indented statement list or statements up to the closer.
    pub(crate) fn parse_block(&mut self) -> Result<StmtRange, ParseError> {
        self.expect_line_end()?;
        let indented = self.cursor.eat(&TokenKind::Indent);
        let stmts = self.parse_statements(closes_block);
        if indented && !self.cursor.eat(&TokenKind::Dedent) {
            self.pending_dedents += 1;
        }
        Ok(self.arena.alloc_stmt_list(stmts))
    }

    /// `END` followed by the end of the line.
    pub(crate) fn expect_end(&mut self, construct: &str) -> Result<(), ParseError> {
        if !self.cursor.eat(&TokenKind::End) {
            return Err(ParseError::missing_end(construct, self.cursor.current()));
        }
        self.expect_line_end()
    }

    fn parse_if(&mut self) -> Result<StmtId, ParseError> {
        let start = self.cursor.advance().span;
        let mut branches = Vec::new();
        let mut else_body = None;

        let cond = self.parse_condition_header(&TokenKind::Then)?;
        let body = self.parse_block()?;
        branches.push(IfBranch { cond, body });

        loop {
            if self.cursor.eat(&TokenKind::ElseIf) {
                let cond = self.parse_condition_header(&TokenKind::Then)?;
                let body = self.parse_block()?;
                branches.push(IfBranch { cond, body });
            } else if self.cursor.eat(&TokenKind::Else) {
                if self.cursor.eat(&TokenKind::If) {
                    let cond = self.parse_condition_header(&TokenKind::Then)?;
                    let body = self.parse_block()?;
                    branches.push(IfBranch { cond, body });
                    continue;
                }
                else_body = Some(self.parse_block()?);
                break;
            } else {
                break;
            }
        }

        self.expect_end("IF")?;
        let branches = self.arena.alloc_branches(branches);
        Ok(self.alloc_stmt(
            StmtKind::If {
                branches,
                else_body,
            },
            start,
        ))
    }

    /// Condition followed by an optional `THEN`/`DO`.
    fn parse_condition_header(&mut self, optional: &TokenKind) -> Result<ExprId, ParseError> {
        let cond = self.parse_expr()?;
        self.cursor.eat(optional);
        Ok(cond)
    }

    fn parse_while(&mut self) -> Result<StmtId, ParseError> {
        let start = self.cursor.advance().span;
        let cond = self.parse_condition_header(&TokenKind::Do)?;
        let body = self.parse_block()?;
        self.expect_end("WHILE")?;
        Ok(self.alloc_stmt(StmtKind::While { cond, body }, start))
    }

    /// `FOR i IN a TO b [STEP s]` or `FOR [EACH] x IN source`.
    fn parse_for(&mut self) -> Result<StmtId, ParseError> {
        let start = self.cursor.advance().span;
        let each = self.cursor.eat(&TokenKind::Each);
        let (var, _) = self.cursor.expect_ident()?;
        self.cursor.expect(&TokenKind::In)?;
        let first = self.parse_expr()?;

        let kind = if !each && self.cursor.eat(&TokenKind::To) {
            let end = self.parse_expr()?;
            let step = if self.cursor.eat(&TokenKind::Step) {
                self.parse_expr()?
            } else {
                ExprId::INVALID
            };
            self.cursor.eat(&TokenKind::Do);
            let body = self.parse_block()?;
            StmtKind::For {
                var,
                start: first,
                end,
                step,
                body,
            }
        } else {
            self.cursor.eat(&TokenKind::Do);
            let body = self.parse_block()?;
            StmtKind::ForEach {
                var,
                source: first,
                body,
            }
        };
        self.expect_end("FOR")?;
        Ok(self.alloc_stmt(kind, start))
    }

    fn parse_function(&mut self) -> Result<StmtId, ParseError> {
        let start = self.cursor.advance().span;
        let (name, _) = self.cursor.expect_ident()?;
        let open = self.cursor.expect(&TokenKind::LParen)?;
        let params = self.parse_param_names(open)?;
        let params = self.arena.alloc_params(params);
        let body = self.parse_block()?;
        self.expect_end("FUNCTION")?;
        Ok(self.alloc_stmt(StmtKind::Function { name, params, body }, start))
    }

    /// Comma-separated identifiers up to `)`. The `(` is already consumed.
    pub(crate) fn parse_param_names(
        &mut self,
        open: tally_ir::Span,
    ) -> Result<Vec<Name>, ParseError> {
        let mut params = Vec::new();
        while !self.cursor.check(&TokenKind::RParen) {
            let (name, _) = self.cursor.expect_ident()?;
            params.push(name);
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect_closing(&TokenKind::RParen, open)?;
        Ok(params)
    }
}
