//! Error codes for parse failures.
//!
//! Format: E#### where the first digit indicates the phase:
//! - E0xxx: lexer errors
//! - E1xxx: span resolution, comment attachment and reducer errors

use std::fmt;

/// Error codes for all parse failures.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// Lexical error: unterminated literal or unexpected byte
    E0001,
    /// A reduction could not claim a delimiter it expected
    E1001,
    /// A comment straddles the boundary of a node
    E1002,
    /// Unexpected token
    E1003,
    /// Unexpected end of input
    E1004,
}

impl ErrorCode {
    /// All error codes, in numeric order.
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E0001,
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
    ];

    /// Get the code as a string (e.g., "E1001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
        }
    }

    /// One-line description for `--explain` style output.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "lexical error",
            ErrorCode::E1001 => "expected token not found",
            ErrorCode::E1002 => "comment overlaps a node boundary",
            ErrorCode::E1003 => "unexpected token",
            ErrorCode::E1004 => "unexpected end of input",
        }
    }

    pub fn is_lexer_error(&self) -> bool {
        matches!(self, ErrorCode::E0001)
    }

    /// Failures that indicate a defect in span resolution rather than bad
    /// input from the user.
    pub fn is_internal_error(&self) -> bool {
        matches!(self, ErrorCode::E1001 | ErrorCode::E1002)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E1001"`. Case-insensitive.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}

#[cfg(test)]
mod tests;
