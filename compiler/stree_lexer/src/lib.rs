//! Lexer for the Ruby subset understood by stree.
//!
//! [`lex`] turns source text into the ordered event stream the parse layer
//! consumes: tokens, line comments and embedded documents. Whitespace is
//! dropped; newlines are reported only where they end a statement.
//!
//! # Event order
//!
//! Events follow the source, with one exception: a heredoc's body and
//! terminator are reported right after its opener, before the rest of the
//! opener's line.

mod cursor;
mod heredoc;
mod keywords;
mod lambda_locals;
mod lex_error;
mod scanner;

use stree_ir::{Span, Token};

pub use keywords::is_keyword;
pub use lambda_locals::{lambda_locals, LambdaLocal};
pub use lex_error::{LexError, LexErrorKind};

/// One event of the lexical stream.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LexEvent {
    Token(Token),
    /// `# text`, without the line terminator.
    Comment { text: String, span: Span },
    /// `=begin` through `=end`, without the final line terminator.
    EmbDoc { text: String, span: Span },
}

impl LexEvent {
    pub fn span(&self) -> Span {
        match self {
            LexEvent::Token(token) => token.span,
            LexEvent::Comment { span, .. } | LexEvent::EmbDoc { span, .. } => *span,
        }
    }
}

/// Lex a whole source.
pub fn lex(source: &str) -> Result<Vec<LexEvent>, LexError> {
    if u32::try_from(source.len()).is_err() {
        return Err(LexError::new(LexErrorKind::SourceTooLarge, stree_ir::Position::START));
    }
    scanner::Scanner::new(source).run()
}

/// Only the tokens of a source, in event order.
pub fn tokens(source: &str) -> Result<Vec<Token>, LexError> {
    Ok(lex(source)?
        .into_iter()
        .filter_map(|event| match event {
            LexEvent::Token(token) => Some(token),
            LexEvent::Comment { .. } | LexEvent::EmbDoc { .. } => None,
        })
        .collect())
}
