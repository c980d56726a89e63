//! Definitions, parameters, blocks and lambdas.

use stree_ir::{Node, NodeKind, Span, TokenKind};
use stree_lexer::lambda_locals;

use super::Builder;
use crate::pool::TokenQuery;
use crate::ParseError;

/// Body of a method definition.
pub(super) enum DefBody {
    /// `def ... end`
    Block(Node),
    /// `def name = value`
    Endless(Node),
}

impl Builder<'_> {
    pub(super) fn def(
        &mut self,
        target: Option<Node>,
        name: Node,
        params: Option<Node>,
        body: DefBody,
    ) -> Result<Node, ParseError> {
        let first = target.as_ref().map_or(name.span, |node| node.span);
        let keyword = self.claim(
            &TokenQuery::kw("def").before(first.start_offset),
            Some(first),
        )?;
        if let Some(target) = &target {
            self.claim(
                &TokenQuery::kind(TokenKind::Period)
                    .within(target.span.end_offset..name.span.start_offset),
                Some(target.span),
            )?;
        }
        self.claim_leaf(&name)?;

        // Without parameters the method still gets an empty list, placed
        // right after the name.
        let params = match params {
            Some(params) => params,
            None => Node::new(empty_params(), self.point(name.span.end_offset)),
        };

        let (bodystmt, span) = match body {
            DefBody::Block(mut bodystmt) => {
                let ending = self.claim(&TokenQuery::kw("end"), Some(keyword.span))?;
                let start = self.next_statement_start(params.span.end_offset);
                self.bind_bodystmt(&mut bodystmt, start, ending.span.start_offset);
                (bodystmt, keyword.span.to(ending.span))
            }
            DefBody::Endless(value) => {
                self.claim(
                    &TokenQuery::op("=").within(params.span.end_offset..value.span.start_offset),
                    Some(keyword.span),
                )?;
                let span = keyword.span.to(value.span);
                (value, span)
            }
        };

        Ok(Node::new(
            NodeKind::Def {
                target: target.map(Box::new),
                name: Box::new(name),
                params: Box::new(params),
                bodystmt: Box::new(bodystmt),
            },
            span,
        ))
    }

    pub(super) fn class(
        &mut self,
        constant: Node,
        superclass: Option<Node>,
        mut bodystmt: Node,
    ) -> Result<Node, ParseError> {
        let ending = self.claim(&TokenQuery::kw("end"), Some(constant.span))?;
        if let Some(superclass) = &superclass {
            self.claim(
                &TokenQuery::op("<").within(constant.span.end_offset..superclass.span.start_offset),
                Some(constant.span),
            )?;
        }
        let keyword = self.claim(
            &TokenQuery::kw("class").before(constant.span.start_offset),
            Some(constant.span),
        )?;

        let header_end = superclass
            .as_ref()
            .map_or(constant.span.end_offset, |node| node.span.end_offset);
        let start = self.next_statement_start(header_end);
        self.bind_bodystmt(&mut bodystmt, start, ending.span.start_offset);

        Ok(Node::new(
            NodeKind::ClassDeclaration {
                constant: Box::new(constant),
                superclass: superclass.map(Box::new),
                bodystmt: Box::new(bodystmt),
            },
            keyword.span.to(ending.span),
        ))
    }

    pub(super) fn module(&mut self, constant: Node, mut bodystmt: Node) -> Result<Node, ParseError> {
        let ending = self.claim(&TokenQuery::kw("end"), Some(constant.span))?;
        let keyword = self.claim(
            &TokenQuery::kw("module").before(constant.span.start_offset),
            Some(constant.span),
        )?;
        let start = self.next_statement_start(constant.span.end_offset);
        self.bind_bodystmt(&mut bodystmt, start, ending.span.start_offset);
        Ok(Node::new(
            NodeKind::ModuleDeclaration {
                constant: Box::new(constant),
                bodystmt: Box::new(bodystmt),
            },
            keyword.span.to(ending.span),
        ))
    }

    /// `class << target ... end`
    pub(super) fn sclass(&mut self, target: Node, mut bodystmt: Node) -> Result<Node, ParseError> {
        let ending = self.claim(&TokenQuery::kw("end"), Some(target.span))?;
        let operator = self.claim(
            &TokenQuery::op("<<").before(target.span.start_offset),
            Some(target.span),
        )?;
        let keyword = self.claim(
            &TokenQuery::kw("class").before(operator.span.start_offset),
            Some(target.span),
        )?;
        let start = self.next_statement_start(target.span.end_offset);
        self.bind_bodystmt(&mut bodystmt, start, ending.span.start_offset);
        Ok(Node::new(
            NodeKind::SClass {
                target: Box::new(target),
                bodystmt: Box::new(bodystmt),
            },
            keyword.span.to(ending.span),
        ))
    }

    /// `Parent::Constant`
    pub(super) fn const_path_ref(&mut self, parent: Node, constant: Node) -> Result<Node, ParseError> {
        self.claim(
            &TokenQuery::op("::").within(parent.span.end_offset..constant.span.start_offset),
            Some(parent.span),
        )?;
        let span = parent.span.to(constant.span);
        Ok(Node::new(
            NodeKind::ConstPathRef {
                parent: Box::new(parent),
                constant: Box::new(constant),
            },
            span,
        ))
    }

    /// `::Constant`
    pub(super) fn top_const_ref(&mut self, constant: Node) -> Result<Node, ParseError> {
        let operator = self.claim(
            &TokenQuery::op("::").before(constant.span.start_offset),
            Some(constant.span),
        )?;
        let span = operator.span.to(constant.span);
        Ok(Node::new(
            NodeKind::TopConstRef {
                constant: Box::new(constant),
            },
            span,
        ))
    }

    #[allow(
        clippy::too_many_arguments,
        reason = "mirrors the six parameter groups of the grammar rule"
    )]
    pub(super) fn params(
        &mut self,
        requireds: Vec<Node>,
        optionals: Vec<(Node, Node)>,
        rest: Option<Node>,
        keywords: Vec<(Node, Option<Node>)>,
        keyword_rest: Option<Node>,
        block: Option<Node>,
    ) -> Result<Node, ParseError> {
        for (name, value) in &optionals {
            self.claim(
                &TokenQuery::op("=").within(name.span.end_offset..value.span.start_offset),
                Some(name.span),
            )?;
        }

        let mut bounds: Option<Span> = None;
        let mut widen = |span: Span| {
            bounds = Some(match bounds {
                Some(bounds) if bounds.start_offset <= span.start_offset => bounds.to(span),
                Some(bounds) => span.to(bounds),
                None => span,
            });
        };
        requireds.iter().for_each(|node| widen(node.span));
        for (name, value) in &optionals {
            widen(name.span);
            widen(value.span);
        }
        rest.iter().for_each(|node| widen(node.span));
        for (name, value) in &keywords {
            widen(name.span);
            value.iter().for_each(|node| widen(node.span));
        }
        keyword_rest.iter().for_each(|node| widen(node.span));
        block.iter().for_each(|node| widen(node.span));

        let span = bounds.unwrap_or_else(|| Span::point(self.current_position()));
        Ok(Node::new(
            NodeKind::Params {
                requireds,
                optionals,
                rest: rest.map(Box::new),
                keywords,
                keyword_rest: keyword_rest.map(Box::new),
                block: block.map(Box::new),
            },
            span,
        ))
    }

    /// `(contents)`. Empty parameters inside the parens are placed right
    /// after the `(`.
    pub(super) fn paren(&mut self, contents: Option<Node>) -> Result<Node, ParseError> {
        let (lparen, rparen) = self.delimiters(
            TokenKind::LParen,
            TokenKind::RParen,
            contents.as_ref().map(|node| node.span),
        )?;
        let contents = contents.map(|mut contents| {
            if contents.is_empty_params() {
                contents.span = self.point(lparen.end_offset);
            }
            Box::new(contents)
        });
        Ok(Node::new(NodeKind::Paren { contents }, lparen.to(rparen)))
    }

    /// Claim a closing delimiter (the most recent one) and the matching
    /// opener before the contents.
    pub(super) fn delimiters(
        &mut self,
        open: TokenKind,
        close: TokenKind,
        contents: Option<Span>,
    ) -> Result<(Span, Span), ParseError> {
        let closing = self.claim(&TokenQuery::kind(close), contents)?;
        let bound = contents.map_or(closing.span.start_offset, |span| span.start_offset);
        let opening = self.claim(
            &TokenQuery::kind(open).before(bound),
            Some(contents.unwrap_or(closing.span)),
        )?;
        Ok((opening.span, closing.span))
    }

    pub(super) fn block_var(&mut self, mut params: Node, locals: Vec<Node>) -> Result<Node, ParseError> {
        let closing = self.claim(&TokenQuery::op("|"), Some(params.span))?;
        let bound = if params.is_empty_params() {
            closing.span.start_offset
        } else {
            params.span.start_offset
        };
        let opening = self.claim(&TokenQuery::op("|").before(bound), Some(params.span))?;
        if params.is_empty_params() {
            params.span = self.point(opening.span.end_offset);
        }
        Ok(Node::new(
            NodeKind::BlockVar {
                params: Box::new(params),
                locals,
            },
            opening.span.to(closing.span),
        ))
    }

    pub(super) fn brace_block(
        &mut self,
        block_var: Option<Node>,
        mut statements: Node,
    ) -> Result<Node, ParseError> {
        let closing = self.claim(&TokenQuery::kind(TokenKind::RBrace), Some(statements.span))?;
        let bound = block_var
            .as_ref()
            .map_or(statements.span.start_offset, |node| node.span.start_offset);
        let opening = self.claim(
            &TokenQuery::kind(TokenKind::LBrace).before(bound),
            Some(statements.span),
        )?;
        let header_end = block_var
            .as_ref()
            .map_or(opening.span.end_offset, |node| node.span.end_offset);
        let start = self.next_statement_start(header_end);
        self.bind_statements(&mut statements, start, closing.span.start_offset);
        let span = opening.span.to(closing.span);
        Ok(Node::new(
            NodeKind::Block {
                opening: Box::new(Self::leaf(&opening)),
                block_var: block_var.map(Box::new),
                body: Box::new(statements),
            },
            span,
        ))
    }

    pub(super) fn do_block(&mut self, block_var: Option<Node>, mut bodystmt: Node) -> Result<Node, ParseError> {
        let closing = self.claim(&TokenQuery::kw("end"), Some(bodystmt.span))?;
        let bound = block_var
            .as_ref()
            .map_or(bodystmt.span.start_offset, |node| node.span.start_offset);
        let opening = self.claim(&TokenQuery::kw("do").before(bound), Some(bodystmt.span))?;
        let header_end = block_var
            .as_ref()
            .map_or(opening.span.end_offset, |node| node.span.end_offset);
        let start = self.next_statement_start(header_end);
        self.bind_bodystmt(&mut bodystmt, start, closing.span.start_offset);
        let span = opening.span.to(closing.span);
        Ok(Node::new(
            NodeKind::Block {
                opening: Box::new(Self::leaf(&opening)),
                block_var: block_var.map(Box::new),
                body: Box::new(bodystmt),
            },
            span,
        ))
    }

    /// `->(params) { ... }` or `->(params) do ... end`.
    pub(super) fn lambda(&mut self, params: Node, mut statements: Node) -> Result<Node, ParseError> {
        let arrow = self.claim(
            &TokenQuery::kind(TokenKind::TLambda).before(params.span.start_offset),
            Some(params.span),
        )?;

        let braces = self
            .pool
            .find(&TokenQuery::kind(TokenKind::TLamBeg).within(arrow.span.end_offset..u32::MAX))
            .is_some();
        let (opening, closing) = if braces {
            let closing = self.claim(&TokenQuery::kind(TokenKind::RBrace), Some(arrow.span))?;
            let opening = self.claim(&TokenQuery::kind(TokenKind::TLamBeg), Some(arrow.span))?;
            (opening, closing)
        } else {
            let closing = self.claim(&TokenQuery::kw("end"), Some(arrow.span))?;
            let opening = self.claim(
                &TokenQuery::kw("do").within(arrow.span.end_offset..closing.span.start_offset),
                Some(arrow.span),
            )?;
            (opening, closing)
        };

        let params = self.lambda_params(params);
        let start = self.next_statement_start(opening.span.end_offset);
        self.bind_statements(&mut statements, start, closing.span.start_offset);
        Ok(Node::new(
            NodeKind::Lambda {
                params: Box::new(params),
                statements: Box::new(statements),
            },
            arrow.span.to(closing.span),
        ))
    }

    /// Parenthesized lambda parameters become a `LambdaVar` carrying the
    /// block-local names, which only a second look at the source reveals.
    fn lambda_params(&self, mut params: Node) -> Node {
        let span = params.span;
        let NodeKind::Paren {
            contents: Some(contents),
        } = &mut params.kind
        else {
            return params;
        };
        if !matches!(contents.kind, NodeKind::Params { .. }) {
            return params;
        }

        // Inside the one-byte parens.
        let inner_start = span.start_offset + 1;
        let inner_end = span.end_offset.saturating_sub(1).max(inner_start);
        let inner = self
            .source
            .get(inner_start as usize..inner_end as usize)
            .unwrap_or("");
        let locals: Vec<Node> = lambda_locals(inner)
            .into_iter()
            .map(|local| {
                Node::new(
                    NodeKind::Ident(local.name),
                    self.span_between(inner_start + local.start, inner_start + local.end),
                )
            })
            .collect();

        let var_span = locals
            .last()
            .map_or(contents.span, |last| contents.span.to(last.span));
        let inner_params = std::mem::replace(&mut **contents, Node::new(NodeKind::VoidStmt, var_span));
        **contents = Node::new(
            NodeKind::LambdaVar {
                params: Box::new(inner_params),
                locals,
            },
            var_span,
        );
        params
    }
}

fn empty_params() -> NodeKind {
    NodeKind::Params {
        requireds: Vec::new(),
        optionals: Vec::new(),
        rest: None,
        keywords: Vec::new(),
        keyword_rest: None,
        block: None,
    }
}
