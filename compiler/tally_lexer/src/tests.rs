use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tally_ir::{Span, TokenKind as T};

fn kinds(source: &str) -> (Vec<TokenKind>, StringInterner) {
    let interner = StringInterner::new();
    let output = lex(source, &interner);
    assert!(output.errors.is_empty(), "unexpected errors: {:?}", output.errors);
    (output.kinds(), interner)
}

fn count(kinds: &[TokenKind], target: &TokenKind) -> usize {
    kinds.iter().filter(|k| k.same_kind(target)).count()
}

#[test]
fn simple_statement() {
    let (tokens, interner) = kinds("LET x = 10");
    let x = interner.intern("x");
    assert_eq!(
        tokens,
        vec![T::Let, T::Ident(x), T::Eq, T::Number(10.0), T::Newline, T::Eof]
    );
}

#[test]
fn keywords_are_case_insensitive_identifiers_keep_case() {
    let (tokens, interner) = kinds("let Rate = 1\nprint RATE");
    assert_eq!(tokens[0], T::Let);
    assert_eq!(tokens[1], T::Ident(interner.intern("Rate")));
    assert_eq!(tokens[5], T::Print);
    assert_eq!(tokens[6], T::Ident(interner.intern("RATE")));
}

#[test]
fn empty_source_is_just_eof() {
    let (tokens, _) = kinds("");
    assert_eq!(tokens, vec![T::Eof]);
    let (tokens, _) = kinds("\n\n   \n# only a comment\n");
    assert_eq!(tokens, vec![T::Eof]);
}

#[test]
fn indented_block() {
    let source = "IF x\n    PRINT x\nEND\n";
    let (tokens, interner) = kinds(source);
    let x = interner.intern("x");
    assert_eq!(
        tokens,
        vec![
            T::If,
            T::Ident(x),
            T::Newline,
            T::Indent,
            T::Print,
            T::Ident(x),
            T::Newline,
            T::Dedent,
            T::End,
            T::Newline,
            T::Eof,
        ]
    );
}

#[test]
fn nested_blocks_dedent_once_per_level() {
    let source = "WHILE a\n  IF b\n      PRINT c\nEND";
    let (tokens, _) = kinds(source);
    assert_eq!(count(&tokens, &T::Indent), 2);
    assert_eq!(count(&tokens, &T::Dedent), 2);
    let end = tokens.iter().position(|k| *k == T::End).unwrap_or(0);
    assert_eq!(&tokens[end - 2..end], &[T::Dedent, T::Dedent]);
}

#[test]
fn open_blocks_are_closed_at_eof() {
    let (tokens, _) = kinds("IF a\n    IF b\n        PRINT c");
    let tail = &tokens[tokens.len() - 4..];
    assert_eq!(tail, &[T::Newline, T::Dedent, T::Dedent, T::Eof]);
}

#[test]
fn blank_and_comment_lines_do_not_change_indentation() {
    let source = "IF a\n    PRINT 1\n\n# note\n      \n    PRINT 2\nEND\n";
    let (tokens, _) = kinds(source);
    assert_eq!(count(&tokens, &T::Indent), 1);
    assert_eq!(count(&tokens, &T::Dedent), 1);
    assert_eq!(count(&tokens, &T::Newline), 4);
}

#[test]
fn tabs_count_as_four_columns() {
    let (tokens, _) = kinds("IF a\n\tPRINT 1\n    PRINT 2\nEND");
    assert_eq!(count(&tokens, &T::Indent), 1);
}

#[test]
fn groups_suppress_layout() {
    let source = "LET xs = [\n    1,\n        2,\n  3\n]\nPRINT xs";
    let (tokens, _) = kinds(source);
    assert_eq!(count(&tokens, &T::Indent), 0);
    assert_eq!(count(&tokens, &T::Newline), 2);
}

#[test]
fn line_continuation_joins_lines() {
    let (tokens, _) = kinds("LET x = 1 + \\\n    2");
    assert_eq!(count(&tokens, &T::Newline), 1);
    assert_eq!(count(&tokens, &T::Indent), 0);
}

#[test]
fn numbers_with_separators_and_exponents() {
    let (tokens, _) = kinds("1_000 1,000,000 2.5 .5 1.5e3 2E-2");
    assert_eq!(
        &tokens[..6],
        &[
            T::Number(1000.0),
            T::Number(1_000_000.0),
            T::Number(2.5),
            T::Number(0.5),
            T::Number(1500.0),
            T::Number(0.02),
        ]
    );
}

#[test]
fn commas_inside_brackets_separate_elements() {
    let (tokens, _) = kinds("[1,234]");
    assert_eq!(
        &tokens[..5],
        &[T::LBracket, T::Number(1.0), T::Comma, T::Number(234.0), T::RBracket]
    );
}

#[test]
fn commas_after_an_argument_comma_separate_arguments() {
    let (tokens, _) = kinds("DEBIT cash, 100,250\nLET x = 1,500");
    assert_eq!(
        &tokens[2..6],
        &[T::Comma, T::Number(100.0), T::Comma, T::Number(250.0)]
    );
    assert_eq!(tokens[10], T::Number(1500.0));
}

#[test]
fn dates_are_recognized_before_numbers() {
    let (tokens, interner) = kinds("2024-01-15 2024-13-01");
    assert_eq!(tokens[0], T::Date(interner.intern("2024-01-15")));
    // Month 13 is not a date, so it falls back to arithmetic.
    assert_eq!(
        &tokens[1..6],
        &[T::Number(2024.0), T::Minus, T::Number(13.0), T::Minus, T::Number(1.0)]
    );
}

#[test]
fn money_literals_prefix_and_suffix() {
    let (tokens, interner) = kinds("100 USD EUR 2,500.50 75GBP");
    let usd = interner.intern("USD");
    let eur = interner.intern("EUR");
    let gbp = interner.intern("GBP");
    assert_eq!(
        &tokens[..3],
        &[
            T::Money { amount: 100.0, currency: usd },
            T::Money { amount: 2500.5, currency: eur },
            T::Money { amount: 75.0, currency: gbp },
        ]
    );
}

#[test]
fn currency_codes_alone_are_identifiers() {
    let (tokens, interner) = kinds("LET USD = 1");
    assert_eq!(tokens[1], T::Ident(interner.intern("USD")));
}

#[test]
fn strings_and_escapes() {
    let (tokens, interner) = kinds(r#""a\tb" 'it\'s' "x\qy""#);
    assert_eq!(tokens[0], T::Str(interner.intern("a\tb")));
    assert_eq!(tokens[1], T::Str(interner.intern("it's")));
    assert_eq!(tokens[2], T::Str(interner.intern("x\\qy")));
}

#[test]
fn triple_quoted_strings_span_lines() {
    let (tokens, interner) = kinds("PRINT \"\"\"line one\n  line two\"\"\"\nPRINT 1");
    assert_eq!(tokens[1], T::Str(interner.intern("line one\n  line two")));
    assert_eq!(count(&tokens, &T::Indent), 0);
}

#[test]
fn comment_styles() {
    let source = "LET a = 1 # trailing\nLET b = 2 // also\n### block\nspanning ###\n/* c */ LET c = 3";
    let (tokens, _) = kinds(source);
    assert_eq!(count(&tokens, &T::Let), 3);
    assert_eq!(count(&tokens, &T::Indent), 0);
}

#[test]
fn operators() {
    let (tokens, _) = kinds("-> == != <= >= && || :: : . , + - * / % ^ = ! < >");
    assert_eq!(
        &tokens[..21],
        &[
            T::Arrow,
            T::EqEq,
            T::NotEq,
            T::LtEq,
            T::GtEq,
            T::AmpAmp,
            T::PipePipe,
            T::ColonColon,
            T::Colon,
            T::Dot,
            T::Comma,
            T::Plus,
            T::Minus,
            T::Star,
            T::Slash,
            T::Percent,
            T::Caret,
            T::Eq,
            T::Bang,
            T::Lt,
            T::Gt,
        ]
    );
}

#[test]
fn spans_point_at_lexemes() {
    let interner = StringInterner::new();
    let output = lex("LET total = 42", &interner);
    assert_eq!(output.tokens[1].span, Span::new(4, 9));
    assert_eq!(output.tokens[3].span, Span::new(12, 14));
}

mod errors {
    use super::*;
    use pretty_assertions::assert_eq;

    fn errors(source: &str) -> (Vec<TokenKind>, Vec<LexErrorKind>) {
        let interner = StringInterner::new();
        let output = lex(source, &interner);
        (
            output.kinds(),
            output.errors.into_iter().map(|e| e.kind).collect(),
        )
    }

    #[test]
    fn unterminated_string_still_yields_token() {
        let (tokens, errs) = errors("PRINT \"abc\nPRINT 1");
        assert_eq!(errs, vec![LexErrorKind::UnterminatedString]);
        assert!(matches!(tokens[1], T::Str(_)));
        assert_eq!(count(&tokens, &T::Print), 2);
    }

    #[test]
    fn unexpected_character_becomes_error_token() {
        let (tokens, errs) = errors("LET a = 1 @ 2");
        assert_eq!(errs, vec![LexErrorKind::UnexpectedChar { ch: '@' }]);
        assert!(tokens.contains(&T::Error));
    }

    #[test]
    fn all_errors_reported_in_one_pass() {
        let (_, errs) = errors("$ 1\n~ 2\n/* open");
        assert_eq!(
            errs,
            vec![
                LexErrorKind::UnexpectedChar { ch: '$' },
                LexErrorKind::UnexpectedChar { ch: '~' },
                LexErrorKind::UnterminatedBlockComment,
            ]
        );
    }

    #[test]
    fn unbalanced_delimiters() {
        let (_, errs) = errors("PRINT (1 + 2");
        assert_eq!(errs, vec![LexErrorKind::UnclosedDelimiter { open: '(' }]);
        let (_, errs) = errors("PRINT 1)");
        assert_eq!(errs, vec![LexErrorKind::UnbalancedDelimiter { found: ')' }]);
    }

    #[test]
    fn inconsistent_dedent() {
        let (tokens, errs) = errors("IF a\n    PRINT 1\n  PRINT 2\n");
        assert_eq!(errs, vec![LexErrorKind::InconsistentDedent { width: 2 }]);
        assert_eq!(count(&tokens, &T::Indent), count(&tokens, &T::Dedent));
    }

    #[test]
    fn diagnostics_are_lexer_codes() {
        let interner = StringInterner::new();
        let output = lex("PRINT 'open", &interner);
        let diags = output.diagnostics();
        assert_eq!(diags.len(), 1);
        assert!(diags[0].code.is_lexer_error());
    }
}

fn line_strategy() -> impl Strategy<Value = String> {
    (0usize..4, "[a-z]{1,6}( [+*] [0-9]{1,3})?( \\(| \\[)?")
        .prop_map(|(depth, body)| format!("{}{}", "    ".repeat(depth), body))
}

proptest! {
    #[test]
    fn indents_and_dedents_balance(lines in proptest::collection::vec(line_strategy(), 0..20)) {
        let source = lines.join("\n");
        let interner = StringInterner::new();
        let output = lex(&source, &interner);
        let kinds = output.kinds();
        prop_assert_eq!(count(&kinds, &T::Indent), count(&kinds, &T::Dedent));
        prop_assert_eq!(kinds.last(), Some(&T::Eof));
        prop_assert_eq!(count(&kinds, &T::Eof), 1);
    }

    #[test]
    fn never_panics_and_always_ends_in_eof(source in "\\PC{0,80}") {
        let interner = StringInterner::new();
        let output = lex(&source, &interner);
        prop_assert_eq!(output.tokens.last().map(|t| t.kind), Some(T::Eof));
    }
}
