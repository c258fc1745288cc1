//! Token model shared by the lexer and parser.

use std::fmt;

use crate::{Name, Span};

/// A token with its source span. Lexeme text is recovered from the span.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

/// Token categories. Literal payloads are decoded by the lexer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TokenKind {
    // Literals
    Number(f64),
    Str(Name),
    /// `YYYY-MM-DD`, kept as text.
    Date(Name),
    Money {
        amount: f64,
        currency: Name,
    },
    Ident(Name),

    // Statement keywords
    Let,
    Set,
    Print,
    Log,
    If,
    Then,
    ElseIf,
    Else,
    End,
    While,
    Do,
    For,
    Each,
    In,
    To,
    Step,
    Function,
    Return,
    Import,

    // Value keywords
    True,
    False,
    Null,
    And,
    Or,
    Not,

    // Finance keywords
    Table,
    Cashflow,
    Portfolio,
    Asset,
    Weight,
    Scenario,
    Run,
    On,
    Simulate,
    Times,
    Debit,
    Credit,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    Eq,
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Bang,
    AmpAmp,
    PipePipe,
    Arrow,

    // Delimiters
    ColonColon,
    Colon,
    Dot,
    Comma,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,

    // Layout
    Newline,
    Indent,
    Dedent,

    /// Placeholder for text the lexer could not classify.
    Error,
    Eof,
}

impl TokenKind {
    /// Whether two kinds are the same variant, ignoring payloads.
    #[inline]
    pub fn same_kind(&self, other: &TokenKind) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// Tokens that begin a statement, used when resynchronizing after an error.
    pub fn starts_statement(&self) -> bool {
        matches!(
            self,
            TokenKind::Let
                | TokenKind::Set
                | TokenKind::Print
                | TokenKind::Log
                | TokenKind::If
                | TokenKind::While
                | TokenKind::For
                | TokenKind::Function
                | TokenKind::Return
                | TokenKind::Run
                | TokenKind::Simulate
                | TokenKind::Portfolio
                | TokenKind::Scenario
                | TokenKind::Cashflow
                | TokenKind::Debit
                | TokenKind::Credit
                | TokenKind::Import
        )
    }

    pub fn is_keyword(&self) -> bool {
        self.keyword_text().is_some()
    }

    /// Upper-case source spelling of keyword tokens.
    pub fn keyword_text(&self) -> Option<&'static str> {
        Some(match self {
            TokenKind::Let => "LET",
            TokenKind::Set => "SET",
            TokenKind::Print => "PRINT",
            TokenKind::Log => "LOG",
            TokenKind::If => "IF",
            TokenKind::Then => "THEN",
            TokenKind::ElseIf => "ELSEIF",
            TokenKind::Else => "ELSE",
            TokenKind::End => "END",
            TokenKind::While => "WHILE",
            TokenKind::Do => "DO",
            TokenKind::For => "FOR",
            TokenKind::Each => "EACH",
            TokenKind::In => "IN",
            TokenKind::To => "TO",
            TokenKind::Step => "STEP",
            TokenKind::Function => "FUNCTION",
            TokenKind::Return => "RETURN",
            TokenKind::Import => "IMPORT",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::Null => "NULL",
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Not => "NOT",
            TokenKind::Table => "TABLE",
            TokenKind::Cashflow => "CASHFLOW",
            TokenKind::Portfolio => "PORTFOLIO",
            TokenKind::Asset => "ASSET",
            TokenKind::Weight => "WEIGHT",
            TokenKind::Scenario => "SCENARIO",
            TokenKind::Run => "RUN",
            TokenKind::On => "ON",
            TokenKind::Simulate => "SIMULATE",
            TokenKind::Times => "TIMES",
            TokenKind::Debit => "DEBIT",
            TokenKind::Credit => "CREDIT",
            _ => return None,
        })
    }

    /// Short human-readable description for diagnostics.
    pub fn display_name(&self) -> &'static str {
        if let Some(text) = self.keyword_text() {
            return text;
        }
        match self {
            TokenKind::Number(_) => "number",
            TokenKind::Str(_) => "string",
            TokenKind::Date(_) => "date",
            TokenKind::Money { .. } => "money amount",
            TokenKind::Ident(_) => "identifier",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::Percent => "`%`",
            TokenKind::Caret => "`^`",
            TokenKind::Eq => "`=`",
            TokenKind::EqEq => "`==`",
            TokenKind::NotEq => "`!=`",
            TokenKind::Lt => "`<`",
            TokenKind::LtEq => "`<=`",
            TokenKind::Gt => "`>`",
            TokenKind::GtEq => "`>=`",
            TokenKind::Bang => "`!`",
            TokenKind::AmpAmp => "`&&`",
            TokenKind::PipePipe => "`||`",
            TokenKind::Arrow => "`->`",
            TokenKind::ColonColon => "`::`",
            TokenKind::Colon => "`:`",
            TokenKind::Dot => "`.`",
            TokenKind::Comma => "`,`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBracket => "`[`",
            TokenKind::RBracket => "`]`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::Newline => "end of line",
            TokenKind::Indent => "indentation",
            TokenKind::Dedent => "end of block",
            TokenKind::Error => "invalid token",
            TokenKind::Eof => "end of input",
            _ => "keyword",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_kind_ignores_payload() {
        assert!(TokenKind::Number(1.0).same_kind(&TokenKind::Number(2.0)));
        assert!(!TokenKind::Number(1.0).same_kind(&TokenKind::Plus));
    }

    #[test]
    fn keyword_text_round_trips_upper_case() {
        assert_eq!(TokenKind::ElseIf.keyword_text(), Some("ELSEIF"));
        assert_eq!(TokenKind::Plus.keyword_text(), None);
        assert!(TokenKind::Scenario.is_keyword());
        assert!(!TokenKind::Ident(Name::EMPTY).is_keyword());
    }

    #[test]
    fn statement_starters() {
        assert!(TokenKind::Let.starts_statement());
        assert!(TokenKind::Portfolio.starts_statement());
        assert!(!TokenKind::Plus.starts_statement());
        assert!(!TokenKind::Dedent.starts_statement());
    }
}
