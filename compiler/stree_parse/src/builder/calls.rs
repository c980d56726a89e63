//! Assignments, operators and calls.

use stree_ir::{Node, NodeKind, Span, TokenKind};

use super::Builder;
use crate::pool::TokenQuery;
use crate::ParseError;

impl Builder<'_> {
    pub(super) fn assign(&mut self, target: Node, value: Node) -> Result<Node, ParseError> {
        self.claim(
            &TokenQuery::op("=").within(target.span.end_offset..value.span.start_offset),
            Some(target.span),
        )?;
        let span = target.span.to(value.span);
        Ok(Node::new(
            NodeKind::Assign {
                target: Box::new(target),
                value: Box::new(value),
            },
            span,
        ))
    }

    /// `target += value`. The operator is a leaf child.
    pub(super) fn op_assign(
        &mut self,
        target: Node,
        operator: Node,
        value: Node,
    ) -> Result<Node, ParseError> {
        self.claim_leaf(&operator)?;
        let span = target.span.to(value.span);
        Ok(Node::new(
            NodeKind::OpAssign {
                target: Box::new(target),
                operator: Box::new(operator),
                value: Box::new(value),
            },
            span,
        ))
    }

    pub(super) fn binary(&mut self, left: Node, operator: String, right: Node) -> Result<Node, ParseError> {
        let between = left.span.end_offset..right.span.start_offset;
        let query = match operator.as_str() {
            "and" | "or" => TokenQuery::kw(&operator),
            _ => TokenQuery::op(&operator),
        };
        self.claim(&query.within(between), Some(left.span))?;
        let span = left.span.to(right.span);
        Ok(Node::new(
            NodeKind::Binary {
                left: Box::new(left),
                operator,
                right: Box::new(right),
            },
            span,
        ))
    }

    pub(super) fn unary(&mut self, operator: String, operand: Node) -> Result<Node, ParseError> {
        let token = self.claim(
            &TokenQuery::op(&operator).before(operand.span.start_offset),
            Some(operand.span),
        )?;
        let span = token.span.to(operand.span);
        Ok(Node::new(
            NodeKind::Unary {
                operator,
                statement: Box::new(operand),
            },
            span,
        ))
    }

    /// `not x`, `not(x)` and `not()`.
    pub(super) fn not(&mut self, operand: Option<Node>, parentheses: bool) -> Result<Node, ParseError> {
        let operand_span = operand.as_ref().map(|node| node.span);
        let mut end = operand_span;
        let mut bound = operand_span.map(|span| span.start_offset);

        if parentheses {
            let rparen = self.claim(&TokenQuery::kind(TokenKind::RParen), operand_span)?;
            let lparen = self.claim(
                &TokenQuery::kind(TokenKind::LParen)
                    .before(bound.unwrap_or(rparen.span.start_offset)),
                operand_span,
            )?;
            end = Some(rparen.span);
            bound = Some(lparen.span.start_offset);
        }

        let query = match bound {
            Some(bound) => TokenQuery::kw("not").before(bound),
            None => TokenQuery::kw("not"),
        };
        let keyword = self.claim(&query, operand_span)?;
        let span = end.map_or(keyword.span, |end| keyword.span.to(end));
        Ok(Node::new(
            NodeKind::Not {
                statement: operand.map(Box::new),
                parentheses,
            },
            span,
        ))
    }

    /// Claim the `.`, `&.` or `::` between a receiver and its message.
    fn call_operator(&mut self, receiver: &Node, operator: &str, message: &Node) -> Result<(), ParseError> {
        let between = receiver.span.end_offset..message.span.start_offset;
        let query = if operator == "::" {
            TokenQuery::op("::")
        } else {
            TokenQuery::exact(TokenKind::Period, operator)
        };
        self.claim(&query.within(between), Some(receiver.span))?;
        Ok(())
    }

    fn call_span(receiver: Option<&Node>, message: &Node, last: Span) -> Span {
        receiver.map_or(message.span, |receiver| receiver.span).to(last)
    }

    pub(super) fn call(
        &mut self,
        receiver: Option<Node>,
        operator: Option<String>,
        message: Node,
        arguments: Option<Node>,
    ) -> Result<Node, ParseError> {
        if let (Some(receiver), Some(operator)) = (&receiver, &operator) {
            self.call_operator(receiver, operator, &message)?;
        }
        self.claim_leaf(&message)?;
        let last = arguments.as_ref().map_or(message.span, |node| node.span);
        let span = Self::call_span(receiver.as_ref(), &message, last);
        Ok(Node::new(
            NodeKind::Call {
                receiver: receiver.map(Box::new),
                operator,
                message: Box::new(message),
                arguments: arguments.map(Box::new),
            },
            span,
        ))
    }

    pub(super) fn command(
        &mut self,
        receiver: Option<Node>,
        operator: Option<String>,
        message: Node,
        arguments: Node,
    ) -> Result<Node, ParseError> {
        if let (Some(receiver), Some(operator)) = (&receiver, &operator) {
            self.call_operator(receiver, operator, &message)?;
        }
        self.claim_leaf(&message)?;
        let span = Self::call_span(receiver.as_ref(), &message, arguments.span);
        Ok(Node::new(
            NodeKind::Command {
                receiver: receiver.map(Box::new),
                operator,
                message: Box::new(message),
                arguments: Box::new(arguments),
            },
            span,
        ))
    }

    /// `collection[index]`
    pub(super) fn aref(&mut self, collection: Node, index: Option<Node>) -> Result<Node, ParseError> {
        let (_, rbracket) = self.delimiters(
            TokenKind::LBracket,
            TokenKind::RBracket,
            index.as_ref().map(|node| node.span),
        )?;
        let span = collection.span.to(rbracket);
        Ok(Node::new(
            NodeKind::ARef {
                collection: Box::new(collection),
                index: index.map(Box::new),
            },
            span,
        ))
    }

    /// `(arguments)` of a call.
    pub(super) fn arg_paren(&mut self, arguments: Option<Node>) -> Result<Node, ParseError> {
        let (lparen, rparen) = self.delimiters(
            TokenKind::LParen,
            TokenKind::RParen,
            arguments.as_ref().map(|node| node.span),
        )?;
        Ok(Node::new(
            NodeKind::ArgParen {
                arguments: arguments.map(Box::new),
            },
            lparen.to(rparen),
        ))
    }

    /// `key => value`, `label: value`, or the shorthand `label:`.
    pub(super) fn assoc(&mut self, key: Node, value: Option<Node>) -> Result<Node, ParseError> {
        if let Some(value) = &value {
            if !matches!(key.kind, NodeKind::Label(_)) {
                self.claim(
                    &TokenQuery::op("=>").within(key.span.end_offset..value.span.start_offset),
                    Some(key.span),
                )?;
            }
        }
        let span = value.as_ref().map_or(key.span, |value| key.span.to(value.span));
        Ok(Node::new(
            NodeKind::Assoc {
                key: Box::new(key),
                value: value.map(Box::new),
            },
            span,
        ))
    }
}
