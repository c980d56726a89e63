//! Lexical tokens.
//!
//! Token kinds mirror the scanner events of the grammar engine: keywords and
//! operators carry their text, brackets and string delimiters are distinct
//! kinds so the span resolver can claim them by kind alone.

use std::fmt;

use crate::Span;

/// The kind of a lexical token.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TokenKind {
    /// Reserved word (`if`, `end`, `def`, `self`, ...).
    Kw,
    /// Operator (`=`, `+`, `::`, `=>`, `|`, `?`, ...).
    Op,
    Ident,
    Const,
    IVar,
    CVar,
    GVar,
    Int,
    Float,
    /// `name:` in a hash or keyword argument.
    Label,
    TStringBeg,
    TStringContent,
    TStringEnd,
    /// `#{` inside a double-quoted string.
    EmbExprBeg,
    /// `}` closing an interpolation.
    EmbExprEnd,
    /// `:` opening a symbol.
    SymBeg,
    HeredocBeg,
    HeredocEnd,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    /// `.` or `&.`
    Period,
    Comma,
    Semicolon,
    /// `->`
    TLambda,
    /// `{` opening a lambda body.
    TLamBeg,
    Newline,
}

impl TokenKind {
    /// Whether tokens of this kind go into the token pool.
    ///
    /// Pooled kinds are delimiters that a later reduction may claim. Leaves
    /// are handed to the reducer as values instead, and heredoc markers are
    /// tracked on the heredoc stack.
    pub const fn is_pooled(self) -> bool {
        match self {
            TokenKind::Kw
            | TokenKind::Op
            | TokenKind::TStringBeg
            | TokenKind::TStringEnd
            | TokenKind::EmbExprBeg
            | TokenKind::EmbExprEnd
            | TokenKind::SymBeg
            | TokenKind::LParen
            | TokenKind::RParen
            | TokenKind::LBracket
            | TokenKind::RBracket
            | TokenKind::LBrace
            | TokenKind::RBrace
            | TokenKind::Period
            | TokenKind::Semicolon
            | TokenKind::TLambda
            | TokenKind::TLamBeg => true,
            TokenKind::Ident
            | TokenKind::Const
            | TokenKind::IVar
            | TokenKind::CVar
            | TokenKind::GVar
            | TokenKind::Int
            | TokenKind::Float
            | TokenKind::Label
            | TokenKind::TStringContent
            | TokenKind::HeredocBeg
            | TokenKind::HeredocEnd
            | TokenKind::Comma
            | TokenKind::Newline => false,
        }
    }

    /// Short scanner-event style name, used in diagnostics and dumps.
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::Kw => "kw",
            TokenKind::Op => "op",
            TokenKind::Ident => "ident",
            TokenKind::Const => "const",
            TokenKind::IVar => "ivar",
            TokenKind::CVar => "cvar",
            TokenKind::GVar => "gvar",
            TokenKind::Int => "int",
            TokenKind::Float => "float",
            TokenKind::Label => "label",
            TokenKind::TStringBeg => "tstring_beg",
            TokenKind::TStringContent => "tstring_content",
            TokenKind::TStringEnd => "tstring_end",
            TokenKind::EmbExprBeg => "embexpr_beg",
            TokenKind::EmbExprEnd => "embexpr_end",
            TokenKind::SymBeg => "symbeg",
            TokenKind::HeredocBeg => "heredoc_beg",
            TokenKind::HeredocEnd => "heredoc_end",
            TokenKind::LParen => "lparen",
            TokenKind::RParen => "rparen",
            TokenKind::LBracket => "lbracket",
            TokenKind::RBracket => "rbracket",
            TokenKind::LBrace => "lbrace",
            TokenKind::RBrace => "rbrace",
            TokenKind::Period => "period",
            TokenKind::Comma => "comma",
            TokenKind::Semicolon => "semicolon",
            TokenKind::TLambda => "tlambda",
            TokenKind::TLamBeg => "tlambeg",
            TokenKind::Newline => "nl",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A lexical unit with its raw text and span.
#[derive(Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Token {
            kind,
            text: text.into(),
            span,
        }
    }

    /// Check kind and exact text.
    #[inline]
    pub fn is(&self, kind: TokenKind, text: &str) -> bool {
        self.kind == kind && self.text == text
    }

    /// Check for a specific keyword.
    #[inline]
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.is(TokenKind::Kw, keyword)
    }

    /// Check for a specific operator.
    #[inline]
    pub fn is_op(&self, op: &str) -> bool {
        self.is(TokenKind::Op, op)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?}) @ {}", self.kind, self.text, self.span)
    }
}
