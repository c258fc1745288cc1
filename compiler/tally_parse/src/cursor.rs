//! Token cursor: lookahead and consumption over the lexer's token slice.

use tally_diagnostic::ErrorCode;
use tally_ir::{Name, Span, Token, TokenKind};
use tracing::trace;

use crate::ParseError;

static EOF: Token = Token::new(TokenKind::Eof, Span::DUMMY);

pub struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Cursor { tokens, pos: 0 }
    }

    /// Current position, used for progress checks and snapshots.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Roll back to a position taken from [`position`](Self::position).
    #[inline]
    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos.min(self.tokens.len());
    }

    /// Current token. Past the end this is a synthetic `Eof`.
    #[inline]
    pub fn current(&self) -> &'a Token {
        self.tokens.get(self.pos).unwrap_or(&EOF)
    }

    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    #[inline]
    pub fn previous_span(&self) -> Span {
        match self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)) {
            Some(token) => token.span,
            None => Span::DUMMY,
        }
    }

    /// Kind `n` tokens ahead; `peek_kind_at(0)` is the current token.
    #[inline]
    pub fn peek_kind_at(&self, n: usize) -> TokenKind {
        self.tokens.get(self.pos + n).unwrap_or(&EOF).kind
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    /// Variant check that ignores literal payloads.
    #[inline]
    pub fn check(&self, kind: &TokenKind) -> bool {
        self.current_kind().same_kind(kind)
    }

    #[inline]
    pub fn check_ident(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Ident(_))
    }

    /// True at a token that ends the current logical line.
    #[inline]
    pub fn at_line_end(&self) -> bool {
        matches!(
            self.current_kind(),
            TokenKind::Newline | TokenKind::Dedent | TokenKind::Eof
        )
    }

    /// Consume the current token. `Eof` is never stepped past.
    pub fn advance(&mut self) -> &'a Token {
        let token = self.current();
        trace!(
            pos = self.pos,
            kind = %token.kind.display_name(),
            span_start = token.span.start,
            span_end = token.span.end,
            "advance"
        );
        if self.pos < self.tokens.len() && token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it matches.
    pub fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn skip_newlines(&mut self) {
        while self.check(&TokenKind::Newline) {
            self.advance();
        }
    }

    pub fn expect(&mut self, kind: &TokenKind) -> Result<Span, ParseError> {
        if self.check(kind) {
            Ok(self.advance().span)
        } else {
            Err(ParseError::unexpected(self.current(), kind.display_name()))
        }
    }

    pub fn expect_ident(&mut self) -> Result<(Name, Span), ParseError> {
        match self.current_kind() {
            TokenKind::Ident(name) => {
                let span = self.advance().span;
                Ok((name, span))
            }
            other => Err(ParseError::new(
                ErrorCode::E1004,
                format!("expected identifier, found {}", other.display_name()),
                self.current_span(),
            )),
        }
    }

    /// Closing delimiter of a group opened at `open`.
    pub fn expect_closing(&mut self, kind: &TokenKind, open: Span) -> Result<Span, ParseError> {
        if self.check(kind) {
            Ok(self.advance().span)
        } else {
            Err(ParseError::unclosed(kind, open, self.current()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tally_ir::StringInterner;

    fn tokens(source: &str) -> Vec<Token> {
        let interner = StringInterner::new();
        tally_lexer::lex(source, &interner).tokens
    }

    #[test]
    fn advance_stops_at_eof() {
        let toks = tokens("x");
        let mut cursor = Cursor::new(&toks);
        assert!(cursor.check_ident());
        cursor.advance();
        assert!(cursor.check(&TokenKind::Newline));
        cursor.advance();
        assert!(cursor.is_at_end());
        cursor.advance();
        cursor.advance();
        assert!(cursor.is_at_end());
    }

    #[test]
    fn empty_slice_reads_as_eof() {
        let mut cursor = Cursor::new(&[]);
        assert!(cursor.is_at_end());
        assert_eq!(cursor.advance().kind, TokenKind::Eof);
        assert_eq!(cursor.previous_span(), Span::DUMMY);
    }

    #[test]
    fn peek_and_restore() {
        let toks = tokens("LET a = 1");
        let mut cursor = Cursor::new(&toks);
        assert_eq!(cursor.peek_kind_at(2), TokenKind::Eq);
        let saved = cursor.position();
        cursor.advance();
        cursor.advance();
        cursor.set_position(saved);
        assert_eq!(cursor.current_kind(), TokenKind::Let);
    }

    #[test]
    fn expect_reports_expected_token() {
        let toks = tokens("LET 5");
        let mut cursor = Cursor::new(&toks);
        assert!(cursor.eat(&TokenKind::Let));
        let err = cursor.expect_ident().unwrap_err();
        assert_eq!(err.code, ErrorCode::E1004);
        assert_eq!(err.span, Span::new(4, 5));
    }
}
