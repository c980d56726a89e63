//! Definitions, parameter lists and lambdas.

use stree_ir::{Node, TokenKind};

use super::{ParseContext, Parser};
use crate::builder::Builder;
use crate::reduction::Reduction;
use crate::ParseError;

/// Parameter groups in the order they must appear.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Group {
    Required,
    Optional,
    Rest,
    Keyword,
    KeywordRest,
    Block,
}

impl Group {
    /// Groups that may hold more than one parameter.
    fn repeats(self) -> bool {
        matches!(self, Group::Required | Group::Optional | Group::Keyword)
    }
}

#[derive(Default)]
struct ParamList {
    requireds: Vec<Node>,
    optionals: Vec<(Node, Node)>,
    rest: Option<Node>,
    keywords: Vec<(Node, Option<Node>)>,
    keyword_rest: Option<Node>,
    block: Option<Node>,
}

impl Parser<'_> {
    /// `def [target.]name[(params)] ... end` or `def name(params) = value`.
    pub(super) fn def(&mut self) -> Result<Node, ParseError> {
        self.bump()?;

        let has_target = self
            .lookahead(1)
            .is_some_and(|token| token.kind == TokenKind::Period);
        let target = match self.peek_kind() {
            Some(TokenKind::Kw | TokenKind::Ident | TokenKind::Const | TokenKind::IVar) if has_target => {
                let leaf = self.bump_leaf()?;
                let target = self.builder.reduce(Reduction::VarRef(leaf))?;
                self.expect(TokenKind::Period, "`.`")?;
                Some(target)
            }
            _ => None,
        };
        let name = match self.peek_kind() {
            Some(TokenKind::Ident | TokenKind::Const | TokenKind::Op | TokenKind::Kw) => self.bump_leaf()?,
            _ => return Err(self.unexpected_here("a method name")),
        };

        self.scoped(false, |parser| {
            let params = if parser.at(TokenKind::LParen) {
                Some(parser.paren_params()?)
            } else if parser.params_follow() {
                Some(parser.params_list(false)?)
            } else {
                None
            };

            if parser.at_op("=") {
                parser.bump()?;
                parser.skip_newlines()?;
                let value = parser.stmt()?;
                return parser.builder.reduce(Reduction::DefEndless {
                    target,
                    name,
                    params,
                    value,
                });
            }
            let bodystmt = parser.body_statement()?;
            parser.builder.reduce(Reduction::Def {
                target,
                name,
                params,
                bodystmt,
            })
        })
    }

    /// `class Name < Super ... end` or `class << target ... end`.
    pub(super) fn class(&mut self) -> Result<Node, ParseError> {
        self.bump()?;
        if self.at_op("<<") {
            self.bump()?;
            let target = self.expr()?;
            let bodystmt = self.scoped(false, Self::body_statement)?;
            return self.builder.reduce(Reduction::SClass { target, bodystmt });
        }

        let constant = self.cpath()?;
        let superclass = if self.at_op("<") {
            self.bump()?;
            Some(self.expr()?)
        } else {
            None
        };
        let bodystmt = self.scoped(false, Self::body_statement)?;
        self.builder.reduce(Reduction::Class {
            constant,
            superclass,
            bodystmt,
        })
    }

    pub(super) fn module(&mut self) -> Result<Node, ParseError> {
        self.bump()?;
        let constant = self.cpath()?;
        let bodystmt = self.scoped(false, Self::body_statement)?;
        self.builder.reduce(Reduction::Module { constant, bodystmt })
    }

    /// The name after `class`/`module`: `Name`, `::Name` or `A::B::Name`.
    fn cpath(&mut self) -> Result<Node, ParseError> {
        let mut node = if self.at_op("::") {
            self.bump()?;
            let constant = self.expect(TokenKind::Const, "a constant")?;
            self.builder.reduce(Reduction::TopConstRef(Builder::leaf(&constant)))?
        } else {
            let constant = self.expect(TokenKind::Const, "a constant")?;
            self.builder.reduce(Reduction::ConstRef(Builder::leaf(&constant)))?
        };
        while self.at_op("::") {
            self.bump()?;
            let constant = self.expect(TokenKind::Const, "a constant")?;
            node = self.builder.reduce(Reduction::ConstPathRef {
                parent: node,
                constant: Builder::leaf(&constant),
            })?;
        }
        Ok(node)
    }

    // --- Parameters ---

    /// Whether an unparenthesized parameter list starts here.
    fn params_follow(&mut self) -> bool {
        match self.peek() {
            Some(token) => match token.kind {
                TokenKind::Ident | TokenKind::Label => true,
                TokenKind::Op => matches!(token.text.as_str(), "*" | "**" | "&"),
                _ => false,
            },
            None => false,
        }
    }

    /// `(params)` of a definition.
    fn paren_params(&mut self) -> Result<Node, ParseError> {
        self.bump()?;
        let params = self.without_context(ParseContext::ALL, |parser| parser.params_list(true))?;
        self.skip_newlines()?;
        self.expect(TokenKind::RParen, "`)`")?;
        self.builder.reduce(Reduction::Paren(Some(params)))
    }

    /// A parameter list, reduced before its closing delimiter is shifted.
    /// Newlines separate nothing inside parentheses.
    pub(super) fn params_list(&mut self, parenthesized: bool) -> Result<Node, ParseError> {
        let mut list = ParamList::default();
        let mut last: Option<Group> = None;
        loop {
            if parenthesized {
                self.skip_newlines()?;
            }
            let Some(token) = self.peek() else {
                break;
            };
            let (kind, text) = (token.kind, token.text.clone());
            let group = match (kind, text.as_str()) {
                (TokenKind::Ident, _) => {
                    if self.lookahead(1).is_some_and(|next| next.is_op("=")) {
                        Group::Optional
                    } else {
                        Group::Required
                    }
                }
                (TokenKind::Label, _) => Group::Keyword,
                (TokenKind::Op, "*") => Group::Rest,
                (TokenKind::Op, "**") => Group::KeywordRest,
                (TokenKind::Op, "&") => Group::Block,
                _ => break,
            };
            if let Some(last) = last {
                if group < last || (group == last && !group.repeats()) {
                    return Err(self.unexpected_here("a parameter"));
                }
            }
            last = Some(group);
            self.parameter(group, &text, &mut list)?;

            if !self.at(TokenKind::Comma) {
                break;
            }
            self.bump()?;
        }
        self.builder.reduce(Reduction::Params {
            requireds: list.requireds,
            optionals: list.optionals,
            rest: list.rest,
            keywords: list.keywords,
            keyword_rest: list.keyword_rest,
            block: list.block,
        })
    }

    fn parameter(&mut self, group: Group, text: &str, list: &mut ParamList) -> Result<(), ParseError> {
        match group {
            Group::Required => {
                self.declare(text);
                list.requireds.push(self.bump_leaf()?);
            }
            Group::Optional => {
                self.declare(text);
                let name = self.bump_leaf()?;
                self.bump()?;
                let value = self.arg()?;
                list.optionals.push((name, value));
            }
            Group::Keyword => {
                self.declare(text.trim_end_matches(':'));
                let name = self.bump_leaf()?;
                let value = if self.at_param_end() {
                    None
                } else {
                    Some(self.arg()?)
                };
                list.keywords.push((name, value));
            }
            Group::Rest => {
                self.bump()?;
                let name = self.param_name()?;
                list.rest = Some(self.builder.reduce(Reduction::RestParam(name))?);
            }
            Group::KeywordRest => {
                self.bump()?;
                let name = self.param_name()?;
                list.keyword_rest = Some(self.builder.reduce(Reduction::KwRestParam(name))?);
            }
            Group::Block => {
                self.bump()?;
                let name = self.param_name()?;
                list.block = Some(self.builder.reduce(Reduction::BlockArg(name))?);
            }
        }
        Ok(())
    }

    /// The name after `*`, `**` or `&`, which anonymous forms leave out.
    fn param_name(&mut self) -> Result<Option<Node>, ParseError> {
        let Some(token) = self.peek() else {
            return Ok(None);
        };
        if token.kind != TokenKind::Ident {
            return Ok(None);
        }
        let name = token.text.clone();
        self.declare(&name);
        self.bump_leaf().map(Some)
    }

    fn at_param_end(&mut self) -> bool {
        match self.peek() {
            None => true,
            Some(token) => match token.kind {
                TokenKind::Comma
                | TokenKind::RParen
                | TokenKind::Newline
                | TokenKind::Semicolon
                | TokenKind::TLamBeg => true,
                TokenKind::Op => token.text == "|",
                TokenKind::Kw => token.text == "do",
                _ => false,
            },
        }
    }

    /// `|params; locals|` opening a block, if present.
    pub(super) fn block_var(&mut self) -> Result<Option<Node>, ParseError> {
        if !self.at_op("|") {
            return Ok(None);
        }
        self.bump()?;
        let params = self.with_context(ParseContext::NO_PIPE, |parser| parser.params_list(true))?;
        let locals = self.block_locals()?;
        self.skip_newlines()?;
        self.expect_op("|")?;
        self.builder
            .reduce(Reduction::BlockVar { params, locals })
            .map(Some)
    }

    /// `; a, b` block-local names. The semicolon stays in the pool.
    fn block_locals(&mut self) -> Result<Vec<Node>, ParseError> {
        let mut locals = Vec::new();
        if !self.at(TokenKind::Semicolon) {
            return Ok(locals);
        }
        self.bump()?;
        loop {
            let name = self.expect(TokenKind::Ident, "a block-local variable")?;
            self.declare(&name.text);
            locals.push(Builder::leaf(&name));
            if !self.at(TokenKind::Comma) {
                break;
            }
            self.bump()?;
        }
        Ok(locals)
    }

    // --- Lambdas ---

    /// `->(params) { ... }`, `-> x do ... end`, `-> { ... }`.
    pub(super) fn lambda(&mut self) -> Result<Node, ParseError> {
        self.bump()?;
        self.scoped(true, |parser| {
            // Without parameters the list is empty, placed after the arrow.
            let params = if parser.at(TokenKind::LParen) {
                parser.lambda_paren_params()?
            } else {
                parser.params_list(false)?
            };

            let statements = if parser.at(TokenKind::TLamBeg) {
                parser.bump()?;
                let statements = parser.statements()?;
                parser.expect(TokenKind::RBrace, "`}`")?;
                statements
            } else {
                parser.expect_kw("do")?;
                let statements = parser.statements()?;
                parser.expect_kw("end")?;
                statements
            };
            parser.builder.reduce(Reduction::Lambda { params, statements })
        })
    }

    /// `(params; locals)`. The builder recovers the locals from the
    /// source, so they are only shifted here.
    fn lambda_paren_params(&mut self) -> Result<Node, ParseError> {
        self.bump()?;
        let params = self.without_context(ParseContext::ALL, |parser| parser.params_list(true))?;
        if self.at(TokenKind::Semicolon) {
            self.bump()?;
            loop {
                self.skip_newlines()?;
                let name = self.expect(TokenKind::Ident, "a block-local variable")?;
                self.declare(&name.text);
                if !self.at(TokenKind::Comma) {
                    break;
                }
                self.bump()?;
            }
        }
        self.skip_newlines()?;
        self.expect(TokenKind::RParen, "`)`")?;
        self.builder.reduce(Reduction::Paren(Some(params)))
    }
}
