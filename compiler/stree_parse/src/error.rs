//! Parse error type.
//!
//! Every failure of a parse, whatever layer raised it, surfaces as one
//! `ParseError`: an `ErrorCode` plus a message and a 1-based line / 0-based
//! byte column. There is no partial result; the caller discards the parse.

use stree_diagnostic::ErrorCode;
use stree_ir::{Position, Span};
use stree_lexer::LexError;
use thiserror::Error;

use crate::pool::TokenNotFound;

/// A fatal parse error.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Error)]
#[error("{message} at {line}:{column}")]
pub struct ParseError {
    pub code: ErrorCode,
    pub message: String,
    /// 1-based line.
    pub line: u32,
    /// 0-based byte column.
    pub column: u32,
}

impl ParseError {
    pub fn new(code: ErrorCode, message: impl Into<String>, position: Position) -> Self {
        ParseError {
            code,
            message: message.into(),
            line: position.line,
            column: position.column,
        }
    }

    /// A reduction could not claim a delimiter (`E1001`).
    #[cold]
    pub fn token_not_found(missing: &TokenNotFound, position: Position) -> Self {
        ParseError::new(ErrorCode::E1001, missing.to_string(), position)
    }

    /// A comment straddles a node boundary (`E1002`).
    #[cold]
    pub fn comment_overlap(comment: Span, node: Span, node_name: &str) -> Self {
        ParseError::new(
            ErrorCode::E1002,
            format!("comment at {comment} overlaps {node_name} at {node}"),
            comment.start(),
        )
    }

    /// The reducer met a token it has no rule for (`E1003`).
    #[cold]
    pub fn unexpected_token(text: &str, position: Position) -> Self {
        ParseError::new(ErrorCode::E1003, format!("unexpected `{text}`"), position)
    }

    /// The input ended inside a construct (`E1004`).
    #[cold]
    pub fn unexpected_eof(expected: &str, position: Position) -> Self {
        ParseError::new(
            ErrorCode::E1004,
            format!("unexpected end of input, expected {expected}"),
            position,
        )
    }

    /// `(line, column)` the error points at.
    pub fn position(&self) -> (u32, u32) {
        (self.line, self.column)
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError::new(ErrorCode::E0001, err.kind.to_string(), err.position)
    }
}
