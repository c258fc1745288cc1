//! Finance statements and literals.
//!
//! These productions are reached by leading keyword from the statement and
//! primary dispatchers; everything else falls through to the general grammar.

use tally_diagnostic::ErrorCode;
use tally_ir::{ExprId, ExprKind, Holding, LedgerSide, StmtId, StmtKind, TokenKind};

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Lines of a `CASHFLOW`/`PORTFOLIO` body, each parsed by `line`.
    ///
    /// The header line must already be consumed up to its name. Bodies may be
    /// indented or flush; either way they end at `END`.
    fn parse_entry_lines<T>(
        &mut self,
        construct: &str,
        mut line: impl FnMut(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, ParseError> {
        self.expect_line_end()?;
        let indented = self.cursor.eat(&TokenKind::Indent);
        let mut entries = Vec::new();
        loop {
            self.cursor.skip_newlines();
            match self.cursor.current_kind() {
                TokenKind::Dedent if indented => {
                    self.cursor.advance();
                    break;
                }
                TokenKind::End => {
                    if indented {
                        self.pending_dedents += 1;
                    }
                    break;
                }
                TokenKind::Eof | TokenKind::Dedent => break,
                _ => {
                    entries.push(line(self)?);
                    self.expect_line_end()?;
                }
            }
        }
        self.expect_end(construct)?;
        Ok(entries)
    }

    /// `CASHFLOW name` followed by one amount per line.
    pub(crate) fn parse_cashflow_stmt(&mut self) -> Result<StmtId, ParseError> {
        let start = self.cursor.advance().span;
        let (name, _) = self.cursor.expect_ident()?;
        let amounts = self.parse_entry_lines("CASHFLOW", Self::parse_expr)?;
        let amounts = self.arena.alloc_expr_list(amounts);
        Ok(self.alloc_stmt(StmtKind::Cashflow { name, amounts }, start))
    }

    /// `PORTFOLIO name` followed by `ASSET expr WEIGHT expr` lines.
    pub(crate) fn parse_portfolio_stmt(&mut self) -> Result<StmtId, ParseError> {
        let start = self.cursor.advance().span;
        let (name, _) = self.cursor.expect_ident()?;
        let holdings = self.parse_entry_lines("PORTFOLIO", |p| {
            let start = p.cursor.expect(&TokenKind::Asset)?;
            let asset = p.parse_expr()?;
            p.cursor.expect(&TokenKind::Weight)?;
            let weight = p.parse_expr()?;
            Ok(Holding {
                asset,
                weight,
                span: start.merge(p.cursor.previous_span()),
            })
        })?;
        let holdings = self.arena.alloc_holdings(holdings);
        Ok(self.alloc_stmt(StmtKind::Portfolio { name, holdings }, start))
    }

    /// `SCENARIO name` with a deferred body.
    pub(crate) fn parse_scenario(&mut self) -> Result<StmtId, ParseError> {
        let start = self.cursor.advance().span;
        let (name, _) = self.cursor.expect_ident()?;
        let body = self.parse_block()?;
        self.expect_end("SCENARIO")?;
        Ok(self.alloc_stmt(StmtKind::Scenario { name, body }, start))
    }

    /// `RUN scenario [ON model]`.
    pub(crate) fn parse_run(&mut self) -> Result<StmtId, ParseError> {
        let start = self.cursor.advance().span;
        let (scenario, _) = self.cursor.expect_ident()?;
        let model = if self.cursor.eat(&TokenKind::On) {
            Some(self.cursor.expect_ident()?.0)
        } else {
            None
        };
        self.expect_line_end()?;
        Ok(self.alloc_stmt(StmtKind::Run { scenario, model }, start))
    }

    /// `SIMULATE scenario count TIMES`.
    pub(crate) fn parse_simulate(&mut self) -> Result<StmtId, ParseError> {
        let start = self.cursor.advance().span;
        let (scenario, _) = self.cursor.expect_ident()?;
        let times = self.parse_expr()?;
        self.cursor.expect(&TokenKind::Times)?;
        self.expect_line_end()?;
        Ok(self.alloc_stmt(StmtKind::Simulate { scenario, times }, start))
    }

    /// `DEBIT|CREDIT ledger, amount [, description] [ON date]`.
    pub(crate) fn parse_ledger_entry(&mut self) -> Result<StmtId, ParseError> {
        let token = self.cursor.advance();
        let side = if token.kind == TokenKind::Debit {
            LedgerSide::Debit
        } else {
            LedgerSide::Credit
        };
        let (ledger, _) = self.cursor.expect_ident()?;
        self.cursor.expect(&TokenKind::Comma)?;
        let amount = self.parse_expr()?;
        let description = if self.cursor.eat(&TokenKind::Comma) {
            self.parse_expr()?
        } else {
            ExprId::INVALID
        };
        let date = if self.cursor.eat(&TokenKind::On) {
            self.parse_expr()?
        } else {
            ExprId::INVALID
        };
        self.expect_line_end()?;
        Ok(self.alloc_stmt(
            StmtKind::Ledger {
                side,
                ledger,
                amount,
                description,
                date,
            },
            token.span,
        ))
    }

    /// `TABLE { column: expr, ... }`
    pub(crate) fn parse_table_literal(&mut self) -> Result<ExprId, ParseError> {
        let start = self.cursor.advance().span;
        let columns = self.parse_field_inits()?;
        let span = start.merge(self.cursor.previous_span());
        Ok(self.alloc_expr(ExprKind::Table(columns), span))
    }

    /// `CASHFLOW [a, b, ...]` or `CASHFLOW(expr)`.
    pub(crate) fn parse_cashflow_literal(&mut self) -> Result<ExprId, ParseError> {
        let start = self.cursor.advance().span;
        let open = self.cursor.current_span();
        let kind = if self.cursor.eat(&TokenKind::LBracket) {
            let amounts = self.parse_expr_list(&TokenKind::RBracket, open)?;
            ExprKind::Cashflow(self.arena.alloc_expr_list(amounts))
        } else if self.cursor.eat(&TokenKind::LParen) {
            let source = self.parse_expr()?;
            self.cursor.expect_closing(&TokenKind::RParen, open)?;
            ExprKind::CashflowFrom(source)
        } else {
            return Err(ParseError::unexpected(
                self.cursor.current(),
                "`[` or `(` after CASHFLOW",
            ));
        };
        let span = start.merge(self.cursor.previous_span());
        Ok(self.alloc_expr(kind, span))
    }

    /// `PORTFOLIO { assets: expr, weights: expr }` in either order.
    pub(crate) fn parse_portfolio_literal(&mut self) -> Result<ExprId, ParseError> {
        let start = self.cursor.advance().span;
        let fields = self.parse_field_inits()?;
        let span = start.merge(self.cursor.previous_span());

        let mut assets = ExprId::INVALID;
        let mut weights = ExprId::INVALID;
        for field in self.arena.get_fields(fields) {
            match self.interner.lookup(field.name) {
                "assets" => assets = field.value,
                "weights" => weights = field.value,
                other => {
                    return Err(ParseError::new(
                        ErrorCode::E1001,
                        format!("unknown PORTFOLIO field `{other}`"),
                        field.span,
                    )
                    .with_context("a PORTFOLIO literal takes `assets` and `weights`"));
                }
            }
        }
        if !assets.is_valid() || !weights.is_valid() {
            return Err(ParseError::new(
                ErrorCode::E1001,
                "PORTFOLIO literal needs both `assets` and `weights`",
                span,
            ));
        }
        Ok(self.alloc_expr(ExprKind::Portfolio { assets, weights }, span))
    }
}
