//! Lexer errors.

use stree_ir::Position;
use thiserror::Error;

/// A lexical error with the position where scanning stopped.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Error)]
#[error("{kind} at {}:{}", position.line, position.column)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub position: Position,
}

/// What went wrong.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Error)]
pub enum LexErrorKind {
    #[error("unterminated string meets end of file")]
    UnterminatedString,
    #[error("unterminated interpolation meets end of file")]
    UnterminatedInterpolation,
    #[error("can't find heredoc terminator `{0}`")]
    UnterminatedHeredoc(String),
    #[error("embedded document meets end of file")]
    UnterminatedEmbDoc,
    #[error("invalid character `{0}`")]
    InvalidChar(char),
    #[error("source is larger than 4 GiB")]
    SourceTooLarge,
}

impl LexError {
    #[cold]
    pub fn new(kind: LexErrorKind, position: Position) -> Self {
        LexError { kind, position }
    }
}

#[cfg(test)]
mod tests;
