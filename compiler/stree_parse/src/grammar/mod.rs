//! Reference reducer.
//!
//! A recursive-descent driver over the lexer's event stream that stands in
//! for an LR grammar engine. It never builds nodes itself: every shifted
//! token goes to [`Builder::on_token`] and every completed rule to
//! [`Builder::reduce`], in the order an LR parser would report them.
//!
//! # Organization
//!
//! - [`stmt`]: statement lists, modifiers, bodies and compound statements
//! - [`expr`]: operators, primaries, calls, blocks and literals
//! - [`defs`]: definitions, parameter lists and lambdas
//!
//! # Event order
//!
//! Lookahead is peeked, never forwarded. A token reaches the builder only
//! when it is shifted, and comments reach it when the parser moves past
//! them. Clause chains (`elsif`, `when`, `rescue`) are collected while
//! parsing and reduced from the last clause to the first once the closing
//! `end` has been shifted, so each reduction finds its own delimiters at
//! the top of the token pool.

mod defs;
mod expr;
mod stmt;

use rustc_hash::FxHashSet;
use stree_ir::{Node, Token, TokenKind};
use stree_lexer::LexEvent;

use crate::builder::{Builder, Finished};
use crate::stack::ensure_sufficient_stack;
use crate::ParseError;

/// Context flags for context-sensitive parsing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct ParseContext(u8);

impl ParseContext {
    pub const NONE: Self = Self(0);

    /// A `do` belongs to an enclosing construct (`while x do`, command
    /// arguments), not to a call in the expression being parsed.
    pub const NO_DO: Self = Self(1 << 0);

    /// `|` closes a block parameter list instead of being binary or.
    pub const NO_PIPE: Self = Self(1 << 1);

    /// Every flag. Brackets and bodies clear them all.
    pub const ALL: Self = Self(Self::NO_DO.0 | Self::NO_PIPE.0);

    #[inline]
    pub const fn has(self, flag: Self) -> bool {
        (self.0 & flag.0) != 0
    }

    #[inline]
    #[must_use]
    pub const fn with(self, flag: Self) -> Self {
        Self(self.0 | flag.0)
    }

    #[inline]
    #[must_use]
    pub const fn without(self, flag: Self) -> Self {
        Self(self.0 & !flag.0)
    }
}

/// Local variables visible in one definition or block.
struct Scope {
    locals: FxHashSet<String>,
    /// Blocks and lambdas see the locals of the scope around them; `def`,
    /// `class` and `module` bodies do not.
    transparent: bool,
}

pub(crate) struct Parser<'src> {
    events: Vec<LexEvent>,
    pos: usize,
    builder: Builder<'src>,
    scopes: Vec<Scope>,
    context: ParseContext,
    /// End offset of the last shifted token.
    prev_end: u32,
}

/// Lex `source` and drive a builder over it.
pub(crate) fn parse_source(source: &str) -> Result<Finished, ParseError> {
    let events = stree_lexer::lex(source)?;
    let mut parser = Parser::new(source, events);
    let statements = parser.program()?;
    parser.builder.finish(statements)
}

impl<'src> Parser<'src> {
    fn new(source: &'src str, events: Vec<LexEvent>) -> Self {
        Parser {
            events,
            pos: 0,
            builder: Builder::new(source),
            scopes: vec![Scope {
                locals: FxHashSet::default(),
                transparent: false,
            }],
            context: ParseContext::NONE,
            prev_end: 0,
        }
    }

    fn program(&mut self) -> Result<Node, ParseError> {
        let statements = self.statements()?;
        if let Some(token) = self.peek() {
            let token = token.clone();
            return Err(self.unexpected(&token));
        }
        Ok(statements)
    }

    // --- Events ---

    /// Forward the comments in front of the next token.
    fn trivia(&mut self) {
        while let Some(event) = self.events.get(self.pos) {
            match event {
                LexEvent::Comment { text, span } => {
                    self.builder.on_comment(text, span.start_line, span.start_column);
                }
                LexEvent::EmbDoc { text, span } => {
                    self.builder.on_embdoc(text, span.start_line, span.start_column);
                }
                LexEvent::Token(_) => break,
            }
            self.pos += 1;
        }
    }

    /// The next token, after forwarding the comments before it.
    fn peek(&mut self) -> Option<&Token> {
        self.trivia();
        match self.events.get(self.pos) {
            Some(LexEvent::Token(token)) => Some(token),
            _ => None,
        }
    }

    /// The `n`th upcoming token, without forwarding anything.
    fn lookahead(&self, n: usize) -> Option<&Token> {
        self.events[self.pos.min(self.events.len())..]
            .iter()
            .filter_map(|event| match event {
                LexEvent::Token(token) => Some(token),
                LexEvent::Comment { .. } | LexEvent::EmbDoc { .. } => None,
            })
            .nth(n)
    }

    fn peek_kind(&mut self) -> Option<TokenKind> {
        self.peek().map(|token| token.kind)
    }

    fn at(&mut self, kind: TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    fn at_kw(&mut self, keyword: &str) -> bool {
        self.peek().is_some_and(|token| token.is_keyword(keyword))
    }

    fn at_op(&mut self, op: &str) -> bool {
        self.peek().is_some_and(|token| token.is_op(op))
    }

    /// Whether the next token touches the previous one (`foo(`, `a[`).
    fn adjacent(&mut self) -> bool {
        let prev_end = self.prev_end;
        self.peek()
            .is_some_and(|token| token.span.start_offset == prev_end)
    }

    /// Shift the next token.
    fn bump(&mut self) -> Result<Token, ParseError> {
        self.trivia();
        let Some(LexEvent::Token(token)) = self.events.get(self.pos) else {
            return Err(self.eof("a token"));
        };
        self.pos += 1;
        self.prev_end = token.span.end_offset;
        Ok(self.builder.on_token(
            token.kind,
            &token.text,
            token.span.start_line,
            token.span.start_column,
        ))
    }

    /// Shift the next token and turn it into a leaf.
    fn bump_leaf(&mut self) -> Result<Node, ParseError> {
        let token = self.bump()?;
        Ok(Builder::leaf(&token))
    }

    fn eat_kw(&mut self, keyword: &str) -> Result<bool, ParseError> {
        if self.at_kw(keyword) {
            self.bump()?;
            return Ok(true);
        }
        Ok(false)
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token, ParseError> {
        match self.peek() {
            Some(token) if token.kind == kind => self.bump(),
            Some(token) => {
                let token = token.clone();
                Err(self.unexpected(&token))
            }
            None => Err(self.eof(expected)),
        }
    }

    fn expect_kw(&mut self, keyword: &str) -> Result<Token, ParseError> {
        match self.peek() {
            Some(token) if token.is_keyword(keyword) => self.bump(),
            Some(token) => {
                let token = token.clone();
                Err(self.unexpected(&token))
            }
            None => Err(self.eof(&format!("`{keyword}`"))),
        }
    }

    fn expect_op(&mut self, op: &str) -> Result<Token, ParseError> {
        match self.peek() {
            Some(token) if token.is_op(op) => self.bump(),
            Some(token) => {
                let token = token.clone();
                Err(self.unexpected(&token))
            }
            None => Err(self.eof(&format!("`{op}`"))),
        }
    }

    /// Shift newlines inside brackets, where they separate nothing.
    fn skip_newlines(&mut self) -> Result<(), ParseError> {
        while self.at(TokenKind::Newline) {
            self.bump()?;
        }
        Ok(())
    }

    /// Shift statement terminators.
    fn skip_terms(&mut self) -> Result<(), ParseError> {
        while matches!(
            self.peek_kind(),
            Some(TokenKind::Newline | TokenKind::Semicolon)
        ) {
            self.bump()?;
        }
        Ok(())
    }

    // --- Errors ---

    #[cold]
    fn unexpected(&self, token: &Token) -> ParseError {
        ParseError::unexpected_token(&token.text, token.span.start())
    }

    /// An error at the next token, or at the end of input.
    #[cold]
    fn unexpected_here(&mut self, expected: &str) -> ParseError {
        match self.peek() {
            Some(token) => {
                let token = token.clone();
                self.unexpected(&token)
            }
            None => self.eof(expected),
        }
    }

    #[cold]
    fn eof(&self, expected: &str) -> ParseError {
        let len = u32::try_from(self.builder.source().len()).unwrap_or(u32::MAX);
        ParseError::unexpected_eof(expected, self.builder.position_at(len))
    }

    // --- Context and scopes ---

    fn with_context<T>(&mut self, flag: ParseContext, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = self.context;
        self.context = saved.with(flag);
        let result = f(self);
        self.context = saved;
        result
    }

    fn without_context<T>(&mut self, flag: ParseContext, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = self.context;
        self.context = saved.without(flag);
        let result = f(self);
        self.context = saved;
        result
    }

    /// Run `f` in a new scope.
    fn scoped<T>(&mut self, transparent: bool, f: impl FnOnce(&mut Self) -> T) -> T {
        self.scopes.push(Scope {
            locals: FxHashSet::default(),
            transparent,
        });
        let result = f(self);
        self.scopes.pop();
        result
    }

    fn declare(&mut self, name: &str) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.locals.insert(name.to_string());
        }
    }

    fn is_local(&self, name: &str) -> bool {
        for scope in self.scopes.iter().rev() {
            if scope.locals.contains(name) {
                return true;
            }
            if !scope.transparent {
                break;
            }
        }
        false
    }

    /// Recursion guard shared by the entry points that nest.
    fn guarded<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        ensure_sufficient_stack(|| f(self))
    }
}
