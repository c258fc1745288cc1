//! Error recovery: skip to a point where statement parsing can resume.

use tally_ir::TokenKind;

use crate::cursor::Cursor;

/// Tokens that close an enclosing block. Recovery stops in front of them so
/// the block's own parser can consume them.
pub(crate) fn closes_block(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Dedent | TokenKind::End | TokenKind::Else | TokenKind::ElseIf | TokenKind::Eof
    )
}

/// Discard tokens until the end of the current line or the start of the next
/// statement.
///
/// A `Newline` is consumed; statement keywords and block closers are left in
/// place.
pub fn synchronize(cursor: &mut Cursor<'_>) {
    loop {
        let kind = cursor.current_kind();
        if kind == TokenKind::Newline {
            cursor.advance();
            return;
        }
        if closes_block(&kind) || kind.starts_statement() {
            return;
        }
        cursor.advance();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tally_ir::StringInterner;

    fn sync_from(source: &str, skip: usize) -> TokenKind {
        let interner = StringInterner::new();
        let tokens = tally_lexer::lex(source, &interner).tokens;
        let mut cursor = Cursor::new(&tokens);
        for _ in 0..skip {
            cursor.advance();
        }
        synchronize(&mut cursor);
        cursor.current_kind()
    }

    #[test]
    fn skips_past_newline() {
        assert_eq!(sync_from("LET = = 3\nPRINT 1", 1), TokenKind::Print);
    }

    #[test]
    fn stops_at_statement_keyword_on_same_line() {
        assert_eq!(sync_from("1 + + RUN base", 0), TokenKind::Run);
    }

    #[test]
    fn stops_in_front_of_block_closers() {
        assert_eq!(sync_from("IF x\n    1 +", 4), TokenKind::Dedent);
        assert_eq!(sync_from("x y END", 0), TokenKind::End);
    }
}
