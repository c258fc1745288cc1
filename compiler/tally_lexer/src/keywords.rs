//! Keyword and currency tables.
//!
//! Both tables are compile-time constants shared by every scanner. Keyword
//! matching is case-insensitive; currency codes must be upper case so that
//! identifiers like `eur` stay ordinary names.

use tally_ir::TokenKind;

/// Longest keyword (`portfolio`).
const MAX_KEYWORD_LEN: usize = 9;

/// Look up a keyword, ignoring ASCII case.
///
/// Length-bucketed so most identifiers are rejected after one comparison.
pub(crate) fn lookup(text: &str) -> Option<TokenKind> {
    let bytes = text.as_bytes();
    let len = bytes.len();
    if !(2..=MAX_KEYWORD_LEN).contains(&len) || !bytes[0].is_ascii_alphabetic() {
        return None;
    }

    let mut buf = [0u8; MAX_KEYWORD_LEN];
    for (dst, src) in buf.iter_mut().zip(bytes) {
        *dst = src.to_ascii_lowercase();
    }
    let lower = std::str::from_utf8(&buf[..len]).ok()?;

    match len {
        2 => match lower {
            "if" => Some(TokenKind::If),
            "do" => Some(TokenKind::Do),
            "in" => Some(TokenKind::In),
            "to" => Some(TokenKind::To),
            "on" => Some(TokenKind::On),
            "or" => Some(TokenKind::Or),
            _ => None,
        },
        3 => match lower {
            "let" => Some(TokenKind::Let),
            "set" => Some(TokenKind::Set),
            "log" => Some(TokenKind::Log),
            "end" => Some(TokenKind::End),
            "for" => Some(TokenKind::For),
            "and" => Some(TokenKind::And),
            "not" => Some(TokenKind::Not),
            "run" => Some(TokenKind::Run),
            _ => None,
        },
        4 => match lower {
            "then" => Some(TokenKind::Then),
            "else" => Some(TokenKind::Else),
            "each" => Some(TokenKind::Each),
            "step" => Some(TokenKind::Step),
            "true" => Some(TokenKind::True),
            "null" | "none" => Some(TokenKind::Null),
            _ => None,
        },
        5 => match lower {
            "print" => Some(TokenKind::Print),
            "while" => Some(TokenKind::While),
            "false" => Some(TokenKind::False),
            "table" => Some(TokenKind::Table),
            "asset" => Some(TokenKind::Asset),
            "times" => Some(TokenKind::Times),
            "debit" => Some(TokenKind::Debit),
            _ => None,
        },
        6 => match lower {
            "elseif" => Some(TokenKind::ElseIf),
            "return" => Some(TokenKind::Return),
            "import" => Some(TokenKind::Import),
            "weight" => Some(TokenKind::Weight),
            "credit" => Some(TokenKind::Credit),
            _ => None,
        },
        8 => match lower {
            "function" => Some(TokenKind::Function),
            "cashflow" => Some(TokenKind::Cashflow),
            "scenario" => Some(TokenKind::Scenario),
            "simulate" => Some(TokenKind::Simulate),
            _ => None,
        },
        9 => match lower {
            "portfolio" => Some(TokenKind::Portfolio),
            _ => None,
        },
        _ => None,
    }
}

/// ISO 4217 codes recognized in money literals.
pub const CURRENCY_CODES: &[&str] = &[
    "AUD", "BRL", "CAD", "CHF", "CNY", "EUR", "GBP", "HKD", "INR", "JPY", "KRW", "MXN", "NOK",
    "NZD", "SEK", "SGD", "USD", "ZAR",
];

/// Whether `text` is a recognized currency code (exact, upper case).
pub fn is_currency(text: &str) -> bool {
    text.len() == 3 && CURRENCY_CODES.binary_search(&text).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_ignore_case() {
        assert_eq!(lookup("LET"), Some(TokenKind::Let));
        assert_eq!(lookup("let"), Some(TokenKind::Let));
        assert_eq!(lookup("ElseIf"), Some(TokenKind::ElseIf));
        assert_eq!(lookup("PORTFOLIO"), Some(TokenKind::Portfolio));
        assert_eq!(lookup("None"), Some(TokenKind::Null));
    }

    #[test]
    fn identifiers_are_not_keywords() {
        assert_eq!(lookup("x"), None);
        assert_eq!(lookup("lettuce"), None);
        assert_eq!(lookup("npv"), None);
        assert_eq!(lookup("portfolios"), None);
        assert_eq!(lookup("_if"), None);
    }

    #[test]
    fn currency_table_is_sorted() {
        let mut sorted = CURRENCY_CODES.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, CURRENCY_CODES);
    }

    #[test]
    fn currency_codes_are_upper_case_only() {
        assert!(is_currency("USD"));
        assert!(is_currency("EUR"));
        assert!(!is_currency("usd"));
        assert!(!is_currency("ABC"));
        assert!(!is_currency("USDX"));
    }
}
