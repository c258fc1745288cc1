use pretty_assertions::assert_eq;
use tally_ir::StringInterner;

use super::{lex_listing, parse_listing};

#[test]
fn lex_listing_decodes_payloads() {
    let interner = StringInterner::new();
    let lexed = tally_lexer::lex("LET x = 10", &interner);
    let listing = lex_listing("t.tally", &lexed, &interner);
    let lines: Vec<&str> = listing.lines().collect();

    assert_eq!(lines[0], "Tokens for 't.tally' (6 tokens):");
    assert_eq!(
        &lines[1..5],
        &["  Let @ 0..3", "  Ident(x) @ 4..5", "  Eq @ 6..7", "  Number(10) @ 8..10"]
    );
    assert!(lines[5].starts_with("  Newline @ "));
    assert!(lines[6].starts_with("  Eof @ "));
}

#[test]
fn lex_listing_literals() {
    let interner = StringInterner::new();
    let lexed = tally_lexer::lex("'rent' 2024-01-15 100 USD", &interner);
    let listing = lex_listing("t.tally", &lexed, &interner);

    assert!(listing.contains("  Str(\"rent\") @ "));
    assert!(listing.contains("  Date(2024-01-15) @ "));
    assert!(listing.contains("  Money(100 USD) @ "));
}

#[test]
fn parse_listing_summarizes_statements() {
    let interner = StringInterner::new();
    let source = "\
LET x = 1
FUNCTION add(a, b)
    RETURN a + b
END
RUN base ON model
DEBIT cash, 500
";
    let lexed = tally_lexer::lex(source, &interner);
    let parsed = tally_parse::parse(&lexed, &interner);
    let listing = parse_listing("t.tally", &parsed, &interner);
    let lines: Vec<&str> = listing.lines().collect();

    assert_eq!(lines[0], "Parse result for 't.tally':");
    assert_eq!(lines[1], "  Statements: 4");
    assert_eq!(lines[3], "  Errors: 0");
    assert_eq!(lines[5], "Statements:");
    assert!(lines[6].starts_with("  LET x @ 0.."));
    assert!(lines[7].starts_with("  FUNCTION add/2 @ "));
    assert!(lines[8].starts_with("  RUN base ON model @ "));
    assert!(lines[9].starts_with("  DEBIT cash @ "));
}

#[test]
fn parse_listing_counts_errors() {
    let interner = StringInterner::new();
    let lexed = tally_lexer::lex("LET = 5", &interner);
    let parsed = tally_parse::parse(&lexed, &interner);
    let listing = parse_listing("bad.tally", &parsed, &interner);

    assert!(parsed.has_errors());
    assert!(listing.contains(&format!("  Errors: {}", parsed.errors.len())));
}
