//! Error codes for all diagnostics.

use std::fmt;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer Errors (E0xxx)
    /// Unterminated string literal
    E0001,
    /// Unexpected character
    E0002,
    /// Invalid number literal
    E0003,
    /// Unterminated block comment
    E0004,
    /// Unbalanced delimiter
    E0005,
    /// Inconsistent dedent
    E0006,

    // Parser Errors (E1xxx)
    /// Unexpected token
    E1001,
    /// Expected expression
    E1002,
    /// Unclosed delimiter
    E1003,
    /// Expected identifier
    E1004,
    /// Wrong argument count for a finance function
    E1005,
    /// Invalid assignment target
    E1006,
    /// Block missing its closing END
    E1007,
    /// Expected end of line
    E1008,

    // Runtime Errors (E6xxx)
    /// Undefined variable
    E6001,
    /// Type mismatch
    E6002,
    /// Division by zero
    E6003,
    /// Invalid slice or loop range
    E6004,
    /// Index out of bounds
    E6005,
    /// Unknown table column
    E6006,
    /// Unknown field or property
    E6007,
    /// Wrong number of arguments
    E6008,
    /// Value is not callable
    E6009,
    /// Domain invariant violated (table shape, portfolio weights)
    E6010,
    /// Unknown scenario or model
    E6011,
    /// Invalid argument value
    E6012,
    /// Recursion limit exceeded
    E6013,
    /// Other runtime error
    E6099,
}

impl ErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E0005 => "E0005",
            ErrorCode::E0006 => "E0006",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E1007 => "E1007",
            ErrorCode::E1008 => "E1008",
            ErrorCode::E6001 => "E6001",
            ErrorCode::E6002 => "E6002",
            ErrorCode::E6003 => "E6003",
            ErrorCode::E6004 => "E6004",
            ErrorCode::E6005 => "E6005",
            ErrorCode::E6006 => "E6006",
            ErrorCode::E6007 => "E6007",
            ErrorCode::E6008 => "E6008",
            ErrorCode::E6009 => "E6009",
            ErrorCode::E6010 => "E6010",
            ErrorCode::E6011 => "E6011",
            ErrorCode::E6012 => "E6012",
            ErrorCode::E6013 => "E6013",
            ErrorCode::E6099 => "E6099",
        }
    }

    pub fn is_lexer_error(self) -> bool {
        self.as_str().starts_with("E0")
    }

    pub fn is_parser_error(self) -> bool {
        self.as_str().starts_with("E1")
    }

    pub fn is_runtime_error(self) -> bool {
        self.as_str().starts_with("E6")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases() {
        assert!(ErrorCode::E0004.is_lexer_error());
        assert!(ErrorCode::E1005.is_parser_error());
        assert!(ErrorCode::E6010.is_runtime_error());
        assert!(!ErrorCode::E6010.is_parser_error());
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(ErrorCode::E6003.to_string(), "E6003");
    }
}
