//! Array, hash, string and symbol literals.

use stree_ir::{Node, NodeKind, TokenKind};
use tracing::trace;

use super::Builder;
use crate::pool::TokenQuery;
use crate::ParseError;

impl Builder<'_> {
    pub(super) fn array(&mut self, contents: Option<Node>) -> Result<Node, ParseError> {
        let (lbracket, rbracket) = self.delimiters(
            TokenKind::LBracket,
            TokenKind::RBracket,
            contents.as_ref().map(|node| node.span),
        )?;
        Ok(Node::new(
            NodeKind::ArrayLiteral {
                contents: contents.map(Box::new),
            },
            lbracket.to(rbracket),
        ))
    }

    pub(super) fn hash(&mut self, assocs: Vec<Node>) -> Result<Node, ParseError> {
        let contents = (!assocs.is_empty()).then(|| self.list_span(&assocs));
        let (lbrace, rbrace) = self.delimiters(TokenKind::LBrace, TokenKind::RBrace, contents)?;
        Ok(Node::new(NodeKind::HashLiteral { assocs }, lbrace.to(rbrace)))
    }

    /// A quoted string, or the heredoc whose terminator was just shifted.
    pub(super) fn string_literal(&mut self, parts: Vec<Node>) -> Result<Node, ParseError> {
        if self
            .heredocs
            .last()
            .is_some_and(|heredoc| heredoc.ending.is_some())
        {
            if let Some(heredoc) = self.heredocs.pop() {
                trace!(
                    opener = %heredoc.beginning.text,
                    parts = parts.len(),
                    "closed heredoc"
                );
                let span = heredoc.beginning.span;
                return Ok(Node::new(
                    NodeKind::Heredoc {
                        beginning: heredoc.beginning,
                        parts,
                        ending: heredoc.ending,
                    },
                    span,
                ));
            }
        }

        let first = parts.first().map(|node| node.span);
        let ending = self.claim(&TokenQuery::kind(TokenKind::TStringEnd), first)?;
        let bound = first.map_or(ending.span.start_offset, |span| span.start_offset);
        let beginning = self.claim(
            &TokenQuery::kind(TokenKind::TStringBeg).before(bound),
            Some(first.unwrap_or(ending.span)),
        )?;
        Ok(Node::new(
            NodeKind::StringLiteral {
                parts,
                quote: beginning.text,
            },
            beginning.span.to(ending.span),
        ))
    }

    /// `#{statements}` inside a string.
    pub(super) fn string_embexpr(&mut self, mut statements: Node) -> Result<Node, ParseError> {
        let ending = self.claim(&TokenQuery::kind(TokenKind::EmbExprEnd), Some(statements.span))?;
        let beginning = self.claim(
            &TokenQuery::kind(TokenKind::EmbExprBeg).before(ending.span.start_offset),
            Some(statements.span),
        )?;
        self.bind_statements(
            &mut statements,
            beginning.span.end_offset,
            ending.span.start_offset,
        );
        Ok(Node::new(
            NodeKind::StringEmbExpr {
                statements: Box::new(statements),
            },
            beginning.span.to(ending.span),
        ))
    }

    /// `:name`, `:Const`, `:end`, `:+`.
    pub(super) fn symbol(&mut self, value: Node) -> Result<Node, ParseError> {
        self.claim_leaf(&value)?;
        let symbeg = self.claim(
            &TokenQuery::kind(TokenKind::SymBeg).before(value.span.start_offset),
            Some(value.span),
        )?;
        let span = symbeg.span.to(value.span);
        Ok(Node::new(
            NodeKind::SymbolLiteral {
                value: Box::new(value),
            },
            span,
        ))
    }
}
