//! Error codes for script diagnostics.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Lexer errors
//! - `E1xx` - Tree parser errors
//! - `E2xx` - Record extraction errors

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Lexer Errors (E0xx)
    // =========================================================================
    /// Unterminated string literal.
    ///
    /// A string was opened with a quote but never closed.
    E001,

    /// Unexpected character.
    ///
    /// A character that cannot start any token.
    E002,

    // =========================================================================
    // Parser Errors (E1xx)
    // =========================================================================
    /// Unexpected token.
    E100,

    /// Incomplete input.
    ///
    /// An operator was not followed by a value before the end of input.
    E101,

    /// Unmatched closing brace.
    E102,

    // =========================================================================
    // Extraction Errors (E2xx)
    // =========================================================================
    /// Invalid number.
    ///
    /// A field that must be numeric holds something else.
    E200,

    /// Missing required field, such as a focus without `id`.
    E201,

    /// Unexpected value shape, such as a block where a scalar is required.
    E202,

    /// Missing localisation language header.
    E203,

    /// Malformed localisation entry.
    E204,
}

impl ErrorCode {
    /// Returns the string representation of this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E204 => "E204",
        }
    }

    /// Returns a short description used as the default label text.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "unterminated string literal",
            ErrorCode::E002 => "unexpected character",
            ErrorCode::E100 => "unexpected token",
            ErrorCode::E101 => "incomplete input",
            ErrorCode::E102 => "unmatched closing brace",
            ErrorCode::E200 => "invalid number",
            ErrorCode::E201 => "missing required field",
            ErrorCode::E202 => "unexpected value",
            ErrorCode::E203 => "missing language header",
            ErrorCode::E204 => "malformed localisation entry",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E102.to_string(), "E102");
        assert_eq!(ErrorCode::E204.to_string(), "E204");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E002.description(), "unexpected character");
        assert_eq!(ErrorCode::E201.description(), "missing required field");
    }
}
