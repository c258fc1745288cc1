//! Single-pass scanner.
//!
//! Dispatches on the current byte, tracks bracket nesting, and measures
//! indentation at the start of every logical line that is not inside a group.

use tally_ir::{Span, StringInterner, Token, TokenKind};

use crate::cursor::Cursor;
use crate::indent::{IndentChange, IndentStack};
use crate::keywords;
use crate::{LexError, LexOutput};

#[inline]
fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

#[inline]
fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn closing_for(open: u8) -> u8 {
    match open {
        b'(' => b')',
        b'[' => b']',
        _ => b'}',
    }
}

pub(crate) struct Scanner<'a> {
    source: &'a str,
    cursor: Cursor<'a>,
    interner: &'a StringInterner,
    tokens: Vec<Token>,
    errors: Vec<LexError>,
    indent: IndentStack,
    /// Open brackets with their spans. Indentation is ignored while non-empty.
    groups: Vec<(u8, Span)>,
    at_line_start: bool,
    /// A top-level `,` has separated arguments on this line; digit grouping
    /// is off until the next newline.
    line_has_comma: bool,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(source: &'a str, interner: &'a StringInterner) -> Self {
        Scanner {
            source,
            cursor: Cursor::new(source),
            interner,
            tokens: Vec::with_capacity(source.len() / 3 + 1),
            errors: Vec::new(),
            indent: IndentStack::new(),
            groups: Vec::new(),
            at_line_start: true,
            line_has_comma: false,
        }
    }

    pub(crate) fn run(mut self) -> LexOutput {
        loop {
            if self.at_line_start {
                self.at_line_start = false;
                if self.groups.is_empty() && !self.line_start() {
                    continue;
                }
            }

            self.skip_trivia();
            if self.cursor.is_eof() {
                break;
            }

            match self.cursor.current() {
                b'\n' => self.newline(),
                b'\\' if self.is_line_continuation() => self.skip_line_continuation(),
                _ => self.next_token(),
            }
        }
        self.finish()
    }

    // Layout

    /// Handle indentation at the start of a line.
    ///
    /// Returns `false` when the line was blank or held only comments; such
    /// lines are consumed whole and never change indentation.
    fn line_start(&mut self) -> bool {
        let start = self.cursor.pos();
        let (width, len) = IndentStack::measure(self.cursor.rest());
        self.cursor.advance_n(len);

        loop {
            if self.at_block_comment() {
                self.skip_block_comment();
                self.cursor.eat_while(|b| b == b' ' || b == b'\t');
                continue;
            }
            break;
        }

        match self.cursor.current() {
            _ if self.cursor.is_eof() => true,
            b'\r' | b'\n' => {
                self.cursor.eat_while(|b| b == b'\r');
                if self.cursor.current() == b'\n' {
                    self.cursor.advance();
                }
                self.at_line_start = true;
                false
            }
            _ if self.at_line_comment() => {
                self.cursor.skip_to_line_end();
                self.cursor.advance();
                self.at_line_start = true;
                false
            }
            _ => {
                let span = Span::from_range(start..self.cursor.pos());
                self.apply_indent(width, span);
                true
            }
        }
    }

    fn apply_indent(&mut self, width: u32, span: Span) {
        match self.indent.change(width) {
            IndentChange::Same => {}
            IndentChange::Indent => self.tokens.push(Token::new(TokenKind::Indent, span)),
            IndentChange::Dedent { count, consistent } => {
                let point = Span::point(span.end);
                for _ in 0..count {
                    self.tokens.push(Token::new(TokenKind::Dedent, point));
                }
                if !consistent {
                    self.errors.push(LexError::inconsistent_dedent(span, width));
                }
            }
        }
    }

    fn newline(&mut self) {
        let start = self.cursor.pos();
        self.cursor.advance();
        if !self.groups.is_empty() {
            return;
        }
        self.line_has_comma = false;
        if self
            .tokens
            .last()
            .is_some_and(|t| t.kind != TokenKind::Newline)
        {
            let span = Span::from_range(start..start + 1);
            self.tokens.push(Token::new(TokenKind::Newline, span));
        }
        self.at_line_start = true;
    }

    fn is_line_continuation(&self) -> bool {
        match self.cursor.peek() {
            b'\n' => true,
            b'\r' => self.cursor.peek_at(2) == b'\n',
            _ => false,
        }
    }

    fn skip_line_continuation(&mut self) {
        self.cursor.advance();
        self.cursor.eat_while(|b| b == b'\r');
        self.cursor.advance();
    }

    fn finish(mut self) -> LexOutput {
        let end = self.cursor.pos_u32();
        for (open, span) in std::mem::take(&mut self.groups) {
            self.errors
                .push(LexError::unclosed_delimiter(span, char::from(open)));
        }
        if self
            .tokens
            .last()
            .is_some_and(|t| t.kind != TokenKind::Newline)
        {
            self.tokens
                .push(Token::new(TokenKind::Newline, Span::point(end)));
        }
        for _ in 0..self.indent.unwind() {
            self.tokens
                .push(Token::new(TokenKind::Dedent, Span::point(end)));
        }
        self.tokens.push(Token::new(TokenKind::Eof, Span::point(end)));

        LexOutput {
            tokens: self.tokens,
            errors: self.errors,
        }
    }

    // Trivia

    fn at_block_comment(&self) -> bool {
        self.cursor.starts_with(b"###") || self.cursor.starts_with(b"/*")
    }

    fn at_line_comment(&self) -> bool {
        self.cursor.current() == b'#' || self.cursor.starts_with(b"//")
    }

    fn skip_block_comment(&mut self) {
        let start = self.cursor.pos();
        let close: &[u8] = if self.cursor.starts_with(b"###") {
            self.cursor.advance_n(3);
            b"###"
        } else {
            self.cursor.advance_n(2);
            b"*/"
        };
        if !self.cursor.skip_past(close) {
            let span = Span::from_range(start..self.cursor.pos());
            self.errors.push(LexError::unterminated_block_comment(span));
        }
    }

    /// Skip spaces, comments, and (inside groups) line breaks.
    fn skip_trivia(&mut self) {
        loop {
            match self.cursor.current() {
                b' ' | b'\t' | b'\r' => self.cursor.advance(),
                b'\n' if !self.groups.is_empty() => self.cursor.advance(),
                _ if self.at_block_comment() => self.skip_block_comment(),
                _ if self.at_line_comment() => self.cursor.skip_to_line_end(),
                _ => return,
            }
            if self.cursor.is_eof() {
                return;
            }
        }
    }

    // Tokens

    fn push(&mut self, kind: TokenKind, start: usize) {
        if kind == TokenKind::Comma && self.groups.is_empty() {
            self.line_has_comma = true;
        }
        let span = Span::from_range(start..self.cursor.pos());
        self.tokens.push(Token::new(kind, span));
    }

    fn next_token(&mut self) {
        let start = self.cursor.pos();
        let kind = match self.cursor.current() {
            b'0'..=b'9' => self.number_or_date(start),
            b'.' if self.cursor.peek().is_ascii_digit() => self.number_token(),
            q @ (b'"' | b'\'') => self.string(start, q),
            b if is_ident_start(b) => self.ident(start),
            open @ (b'(' | b'[' | b'{') => {
                self.cursor.advance();
                let span = Span::from_range(start..start + 1);
                self.groups.push((open, span));
                match open {
                    b'(' => TokenKind::LParen,
                    b'[' => TokenKind::LBracket,
                    _ => TokenKind::LBrace,
                }
            }
            close @ (b')' | b']' | b'}') => {
                self.cursor.advance();
                self.close_group(start, close);
                match close {
                    b')' => TokenKind::RParen,
                    b']' => TokenKind::RBracket,
                    _ => TokenKind::RBrace,
                }
            }
            _ => self.operator(start),
        };
        self.push(kind, start);
    }

    fn close_group(&mut self, start: usize, close: u8) {
        match self.groups.last() {
            Some(&(open, _)) if closing_for(open) == close => {
                self.groups.pop();
            }
            _ => {
                let span = Span::from_range(start..start + 1);
                self.errors
                    .push(LexError::unbalanced_delimiter(span, char::from(close)));
            }
        }
    }

    fn operator(&mut self, start: usize) -> TokenKind {
        let (kind, len) = match (self.cursor.current(), self.cursor.peek()) {
            (b'-', b'>') => (TokenKind::Arrow, 2),
            (b'=', b'=') => (TokenKind::EqEq, 2),
            (b'!', b'=') => (TokenKind::NotEq, 2),
            (b'<', b'=') => (TokenKind::LtEq, 2),
            (b'>', b'=') => (TokenKind::GtEq, 2),
            (b'&', b'&') => (TokenKind::AmpAmp, 2),
            (b'|', b'|') => (TokenKind::PipePipe, 2),
            (b':', b':') => (TokenKind::ColonColon, 2),
            (b'+', _) => (TokenKind::Plus, 1),
            (b'-', _) => (TokenKind::Minus, 1),
            (b'*', _) => (TokenKind::Star, 1),
            (b'/', _) => (TokenKind::Slash, 1),
            (b'%', _) => (TokenKind::Percent, 1),
            (b'^', _) => (TokenKind::Caret, 1),
            (b'=', _) => (TokenKind::Eq, 1),
            (b'!', _) => (TokenKind::Bang, 1),
            (b'<', _) => (TokenKind::Lt, 1),
            (b'>', _) => (TokenKind::Gt, 1),
            (b':', _) => (TokenKind::Colon, 1),
            (b',', _) => (TokenKind::Comma, 1),
            (b'.', _) => (TokenKind::Dot, 1),
            _ => {
                let ch = self.source[start..].chars().next().unwrap_or('\0');
                self.cursor.advance_n(ch.len_utf8().max(1));
                let span = Span::from_range(start..self.cursor.pos());
                self.errors.push(LexError::unexpected_char(span, ch));
                return TokenKind::Error;
            }
        };
        self.cursor.advance_n(len);
        kind
    }

    // Literals

    fn ident(&mut self, start: usize) -> TokenKind {
        let source = self.source;
        self.cursor.eat_while(is_ident_continue);
        let text = &source[start..self.cursor.pos()];

        if let Some(kind) = keywords::lookup(text) {
            return kind;
        }

        if keywords::is_currency(text) {
            let before = self.cursor;
            self.cursor.eat_while(|b| b == b' ' || b == b'\t');
            let c = self.cursor.current();
            if c.is_ascii_digit() || (c == b'.' && self.cursor.peek().is_ascii_digit()) {
                let amount = self.scan_number();
                return TokenKind::Money {
                    amount,
                    currency: self.interner.intern(text),
                };
            }
            self.cursor = before;
        }

        TokenKind::Ident(self.interner.intern(text))
    }

    fn number_or_date(&mut self, start: usize) -> TokenKind {
        if let Some(len) = date_len(self.cursor.rest()) {
            self.cursor.advance_n(len);
            let text = &self.source[start..self.cursor.pos()];
            return TokenKind::Date(self.interner.intern(text));
        }
        self.number_token()
    }

    /// Number, optionally followed by a currency code.
    fn number_token(&mut self) -> TokenKind {
        let source = self.source;
        let amount = self.scan_number();

        let before = self.cursor;
        self.cursor.eat_while(|b| b == b' ' || b == b'\t');
        let rest = self.cursor.rest();
        if rest.len() >= 3
            && rest[..3].iter().all(u8::is_ascii_uppercase)
            && !rest.get(3).copied().is_some_and(is_ident_continue)
        {
            let code_start = self.cursor.pos();
            let code = &source[code_start..code_start + 3];
            if keywords::is_currency(code) {
                self.cursor.advance_n(3);
                return TokenKind::Money {
                    amount,
                    currency: self.interner.intern(code),
                };
            }
        }
        self.cursor = before;
        TokenKind::Number(amount)
    }

    /// Digits with `_` and `,` separators, fraction and exponent.
    fn scan_number(&mut self) -> f64 {
        let start = self.cursor.pos();
        let mut text = String::new();

        self.scan_digits(&mut text, true);
        if self.cursor.current() == b'.' && self.cursor.peek().is_ascii_digit() {
            text.push('.');
            self.cursor.advance();
            self.scan_digits(&mut text, false);
        }
        if matches!(self.cursor.current(), b'e' | b'E') {
            let sign = matches!(self.cursor.peek(), b'+' | b'-');
            let digit_at = if sign { 2 } else { 1 };
            if self.cursor.peek_at(digit_at).is_ascii_digit() {
                text.push('e');
                self.cursor.advance();
                if sign {
                    text.push(char::from(self.cursor.current()));
                    self.cursor.advance();
                }
                self.scan_digits(&mut text, false);
            }
        }

        if let Ok(value) = text.parse::<f64>() {
            value
        } else {
            let span = Span::from_range(start..self.cursor.pos());
            self.errors.push(LexError::invalid_number(span));
            0.0
        }
    }

    fn scan_digits(&mut self, text: &mut String, allow_comma: bool) {
        loop {
            let b = self.cursor.current();
            if b.is_ascii_digit() {
                text.push(char::from(b));
                self.cursor.advance();
            } else if b == b'_' && self.cursor.peek().is_ascii_digit() {
                self.cursor.advance();
            } else if b == b','
                && allow_comma
                && self.groups.is_empty()
                && !self.line_has_comma
                && (1..=3).all(|i| self.cursor.peek_at(i).is_ascii_digit())
                && !self.cursor.peek_at(4).is_ascii_digit()
            {
                self.cursor.advance();
            } else {
                return;
            }
        }
    }

    fn string(&mut self, start: usize, quote: u8) -> TokenKind {
        let source = self.source;
        let triple = [quote, quote, quote];
        if self.cursor.starts_with(&triple) {
            self.cursor.advance_n(3);
            let body_start = self.cursor.pos();
            let content = if self.cursor.skip_past(&triple) {
                &source[body_start..self.cursor.pos() - 3]
            } else {
                let span = Span::from_range(start..self.cursor.pos());
                self.errors.push(LexError::unterminated_string(span));
                &source[body_start..]
            };
            return TokenKind::Str(self.interner.intern(content));
        }

        self.cursor.advance();
        let mut content = String::new();
        loop {
            if self.cursor.is_eof() || self.cursor.current() == b'\n' {
                let span = Span::from_range(start..self.cursor.pos());
                self.errors.push(LexError::unterminated_string(span));
                break;
            }
            let b = self.cursor.current();
            if b == quote {
                self.cursor.advance();
                break;
            }
            if b == b'\\' && !self.cursor.is_eof() {
                self.cursor.advance();
                let escaped = match self.cursor.current() {
                    b'n' => Some('\n'),
                    b't' => Some('\t'),
                    b'r' => Some('\r'),
                    b'0' => Some('\0'),
                    b'\\' => Some('\\'),
                    b'"' => Some('"'),
                    b'\'' => Some('\''),
                    _ => None,
                };
                if let Some(ch) = escaped {
                    content.push(ch);
                    self.cursor.advance();
                } else {
                    content.push('\\');
                }
                continue;
            }
            let ch = source[self.cursor.pos()..]
                .chars()
                .next()
                .unwrap_or('\0');
            content.push(ch);
            self.cursor.advance_n(ch.len_utf8());
        }
        TokenKind::Str(self.interner.intern(&content))
    }
}

/// Length of a `YYYY-MM-DD` date at the start of `bytes`, if one is there.
fn date_len(bytes: &[u8]) -> Option<usize> {
    if bytes.len() < 10 {
        return None;
    }
    let digits = |range: std::ops::Range<usize>| bytes[range].iter().all(u8::is_ascii_digit);
    if !(digits(0..4) && bytes[4] == b'-' && digits(5..7) && bytes[7] == b'-' && digits(8..10)) {
        return None;
    }
    if bytes.get(10).copied().is_some_and(is_ident_continue) {
        return None;
    }
    let two = |i: usize| u32::from(bytes[i] - b'0') * 10 + u32::from(bytes[i + 1] - b'0');
    let (month, day) = (two(5), two(8));
    if (1..=12).contains(&month) && (1..=31).contains(&day) {
        Some(10)
    } else {
        None
    }
}
