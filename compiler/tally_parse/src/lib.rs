//! Recursive descent parser for Tally.
//!
//! Statements are dispatched on their leading keyword; expressions use one
//! function per precedence level. Output is a flat [`Program`] whose nodes
//! live in an [`ExprArena`].
//!
//! A malformed statement does not stop the parse: the error is recorded, the
//! cursor is resynchronized, and a `StmtKind::Error` node takes its place.

mod cursor;
mod error;
mod grammar;
mod recovery;

pub use cursor::Cursor;
pub use error::ParseError;
pub use recovery::synchronize;

use tally_diagnostic::Diagnostic;
use tally_ir::{
    Expr, ExprArena, ExprId, ExprKind, Program, SharedArena, Span, Stmt, StmtId, StmtKind,
    StringInterner, Token, TokenKind,
};
use tally_lexer::LexOutput;
use tracing::debug;

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    interner: &'a StringInterner,
    arena: ExprArena,
    errors: Vec<ParseError>,
    /// Blocks that were closed by `END` while still indented. Their `Dedent`
    /// arrives later and is absorbed by the statement loop.
    pending_dedents: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token], interner: &'a StringInterner) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            interner,
            arena: ExprArena::new(),
            errors: Vec::new(),
            pending_dedents: 0,
        }
    }

    /// Parse every top-level statement.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn parse_program(mut self) -> ParseOutput {
        let stmts = self.parse_statements(|_| false);
        let body = self.arena.alloc_stmt_list(stmts);
        debug!(
            statements = body.len(),
            nodes = self.arena.expr_count(),
            errors = self.errors.len(),
            "parsed program"
        );
        ParseOutput {
            program: Program {
                body,
                arena: SharedArena::new(self.arena),
            },
            errors: self.errors,
        }
    }

    /// Statements up to (not including) a token accepted by `stop`, or `Eof`.
    fn parse_statements(&mut self, stop: fn(&TokenKind) -> bool) -> Vec<StmtId> {
        let mut stmts = Vec::new();
        loop {
            self.cursor.skip_newlines();
            let kind = self.cursor.current_kind();
            if kind == TokenKind::Dedent && self.pending_dedents > 0 {
                self.pending_dedents -= 1;
                self.cursor.advance();
                continue;
            }
            if kind == TokenKind::Eof || stop(&kind) {
                break;
            }

            let start = self.cursor.position();
            let stmt = match self.parse_statement() {
                Ok(id) => id,
                Err(err) => self.recover(err, start),
            };
            stmts.push(stmt);
        }
        stmts
    }

    /// Record `err`, skip the rest of the statement and leave an error node.
    fn recover(&mut self, err: ParseError, start: usize) -> StmtId {
        let span = err.span;
        self.errors.push(err);
        synchronize(&mut self.cursor);
        if self.cursor.position() == start {
            self.cursor.advance();
        }
        self.arena.alloc_stmt(Stmt::new(StmtKind::Error, span))
    }

    // Node helpers

    #[inline]
    fn alloc_expr(&mut self, kind: ExprKind, span: Span) -> ExprId {
        self.arena.alloc_expr(Expr::new(kind, span))
    }

    #[inline]
    fn alloc_stmt(&mut self, kind: StmtKind, start: Span) -> StmtId {
        let span = start.merge(self.cursor.previous_span());
        self.arena.alloc_stmt(Stmt::new(kind, span))
    }

    #[inline]
    fn expr_span(&self, id: ExprId) -> Span {
        self.arena.get_expr(id).span
    }

    /// A statement ends at `Newline`; `Dedent` and `Eof` also end it but are
    /// left for the enclosing block.
    fn expect_line_end(&mut self) -> Result<(), ParseError> {
        match self.cursor.current_kind() {
            TokenKind::Newline => {
                self.cursor.advance();
                Ok(())
            }
            TokenKind::Dedent | TokenKind::Eof => Ok(()),
            _ => Err(ParseError::expected_newline(self.cursor.current())),
        }
    }
}

/// Parsed program plus every parse error.
#[derive(Clone, Debug)]
pub struct ParseOutput {
    pub program: Program,
    pub errors: Vec<ParseError>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.errors.iter().map(ParseError::to_diagnostic).collect()
    }
}

/// Parse a lexed token stream.
pub fn parse(lexed: &LexOutput, interner: &StringInterner) -> ParseOutput {
    Parser::new(&lexed.tokens, interner).parse_program()
}
