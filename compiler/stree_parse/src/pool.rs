//! Pool of observed, not yet claimed tokens.
//!
//! Delimiter tokens (keywords, operators, brackets, quotes) enter the pool
//! in source order as they are shifted. A reduction later claims the ones
//! that delimit its construct. Searches run from the most recent token
//! backwards: with nested constructs sharing a delimiter (`module ... class
//! ... end ... end`) the innermost construct is reduced first and must get
//! the most recent match.

use std::fmt;
use std::ops::Range;

use stree_ir::{Span, Token, TokenKind};
use thiserror::Error;
use tracing::trace;

/// What to look for in the pool.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenQuery<'a> {
    kind: TokenKind,
    text: Option<&'a str>,
    /// Byte range the token must lie within.
    range: Option<Range<u32>>,
}

impl<'a> TokenQuery<'a> {
    /// A keyword with this exact text.
    pub fn kw(text: &'a str) -> Self {
        TokenQuery {
            kind: TokenKind::Kw,
            text: Some(text),
            range: None,
        }
    }

    /// An operator with this exact text.
    pub fn op(text: &'a str) -> Self {
        TokenQuery {
            kind: TokenKind::Op,
            text: Some(text),
            range: None,
        }
    }

    /// Any token of this kind.
    pub fn kind(kind: TokenKind) -> Self {
        TokenQuery {
            kind,
            text: None,
            range: None,
        }
    }

    /// A token of this kind with this exact text.
    pub fn exact(kind: TokenKind, text: &'a str) -> Self {
        TokenQuery {
            kind,
            text: Some(text),
            range: None,
        }
    }

    /// Only match tokens lying entirely within `range` (byte offsets).
    #[must_use]
    pub fn within(mut self, range: Range<u32>) -> Self {
        self.range = Some(range);
        self
    }

    /// Only match tokens ending at or before `offset`.
    #[must_use]
    pub fn before(self, offset: u32) -> Self {
        self.within(0..offset)
    }

    fn matches(&self, token: &Token) -> bool {
        token.kind == self.kind && self.text.map_or(true, |text| token.text == text)
    }

    /// The error for a search that came up empty.
    pub(crate) fn not_found(&self) -> TokenNotFound {
        let expected = match self.text {
            Some(text) => format!("`{text}`"),
            None => self.kind.name().to_string(),
        };
        TokenNotFound { expected }
    }
}

/// A required token was not in the pool.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("expected {expected} not found")]
pub struct TokenNotFound {
    /// Human readable description of the query (`` `end` ``, `rparen`).
    pub expected: String,
}

/// Unclaimed tokens in source order.
#[derive(Default)]
pub struct TokenPool {
    tokens: Vec<Token>,
    last_claimed: Option<Token>,
}

impl TokenPool {
    pub fn new() -> Self {
        TokenPool::default()
    }

    /// Append a token. Tokens arrive in source order.
    pub fn push(&mut self, token: Token) {
        debug_assert!(
            self.tokens
                .last()
                .map_or(true, |last| last.span.start_offset <= token.span.start_offset),
            "tokens pushed out of source order"
        );
        self.tokens.push(token);
    }

    /// Index of the most recent token matching `query`.
    fn position(&self, query: &TokenQuery<'_>) -> Option<usize> {
        for (index, token) in self.tokens.iter().enumerate().rev() {
            if let Some(range) = &query.range {
                if token.span.start_offset < range.start {
                    // Everything further back starts earlier still.
                    break;
                }
                if token.span.end_offset > range.end {
                    continue;
                }
            }
            if query.matches(token) {
                return Some(index);
            }
        }
        None
    }

    /// The most recent token matching `query`, without claiming it.
    pub fn find(&self, query: &TokenQuery<'_>) -> Option<&Token> {
        self.position(query).map(|index| &self.tokens[index])
    }

    /// Remove and return the most recent token matching `query`.
    pub fn claim(&mut self, query: &TokenQuery<'_>) -> Result<Token, TokenNotFound> {
        match self.position(query) {
            Some(index) => Ok(self.remove(index)),
            None => Err(query.not_found()),
        }
    }

    /// Claim the token occupying exactly `span`.
    pub fn claim_at(&mut self, span: Span) -> Result<Token, TokenNotFound> {
        let index = self
            .tokens
            .iter()
            .rposition(|token| token.span.start_offset == span.start_offset && token.span.end_offset == span.end_offset);
        match index {
            Some(index) => Ok(self.remove(index)),
            None => Err(TokenNotFound {
                expected: format!("token at {span}"),
            }),
        }
    }

    fn remove(&mut self, index: usize) -> Token {
        let token = self.tokens.remove(index);
        trace!(
            kind = %token.kind,
            value = %token.text,
            offset = token.span.start_offset,
            "claimed token"
        );
        self.last_claimed = Some(token.clone());
        token
    }

    /// The most recently claimed token, for error locations.
    pub fn last_claimed(&self) -> Option<&Token> {
        self.last_claimed.as_ref()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    /// The tokens nobody claimed.
    pub fn into_remaining(self) -> Vec<Token> {
        self.tokens
    }
}

impl fmt::Debug for TokenPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.tokens).finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests unwrap to fail loudly")]
mod tests;
