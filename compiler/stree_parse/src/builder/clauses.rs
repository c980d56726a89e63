//! Bodies, clauses and control flow.

use stree_ir::{Node, NodeKind, Span};

use super::Builder;
use crate::pool::TokenQuery;
use crate::ParseError;

impl Builder<'_> {
    pub(super) fn bodystmt(
        &mut self,
        statements: Node,
        rescue: Option<Node>,
        else_statements: Option<Node>,
        ensure: Option<Node>,
    ) -> Result<Node, ParseError> {
        let else_clause = match else_statements {
            Some(else_statements) => {
                let lower = rescue
                    .as_ref()
                    .map_or(statements.span.end_offset, |node| node.span.start_offset);
                let upper = ensure
                    .as_ref()
                    .map_or(self.current_offset(), |node| node.span.start_offset);
                let keyword = self.claim(
                    &TokenQuery::kw("else").within(lower..upper),
                    Some(else_statements.span),
                )?;
                let span = keyword.span.to(else_statements.span);
                Some(Node::new(
                    NodeKind::Else {
                        keyword,
                        statements: Box::new(else_statements),
                    },
                    span,
                ))
            }
            None => None,
        };

        let last = ensure
            .as_ref()
            .or(else_clause.as_ref())
            .or(rescue.as_ref())
            .map_or(statements.span, |node| node.span);
        let span = statements.span.to(last);
        Ok(Node::new(
            NodeKind::BodyStmt {
                statements: Box::new(statements),
                rescue: rescue.map(Box::new),
                else_clause: else_clause.map(Box::new),
                ensure: ensure.map(Box::new),
            },
            span,
        ))
    }

    pub(super) fn begin(&mut self, mut bodystmt: Node) -> Result<Node, ParseError> {
        let ending = self.claim(&TokenQuery::kw("end"), Some(bodystmt.span))?;
        let keyword = self.claim(
            &TokenQuery::kw("begin").before(bodystmt.span.start_offset),
            Some(bodystmt.span),
        )?;
        let start = self.next_statement_start(keyword.span.end_offset);
        self.bind_bodystmt(&mut bodystmt, start, ending.span.start_offset);
        Ok(Node::new(
            NodeKind::Begin {
                bodystmt: Box::new(bodystmt),
            },
            keyword.span.to(ending.span),
        ))
    }

    pub(super) fn rescue(
        &mut self,
        exceptions: Option<Node>,
        variable: Option<Node>,
        mut statements: Node,
        consequent: Option<Node>,
    ) -> Result<Node, ParseError> {
        let first = exceptions
            .as_ref()
            .or(variable.as_ref())
            .map_or(statements.span, |node| node.span);
        let keyword = self.claim(
            &TokenQuery::kw("rescue").before(first.start_offset),
            Some(first),
        )?;

        let arrow = match &variable {
            Some(variable) => {
                let lower = exceptions
                    .as_ref()
                    .map_or(keyword.span.end_offset, |node| node.span.end_offset);
                Some(self.claim(
                    &TokenQuery::op("=>").within(lower..variable.span.start_offset),
                    Some(variable.span),
                )?)
            }
            None => None,
        };

        let header_end = variable
            .as_ref()
            .or(exceptions.as_ref())
            .map_or(keyword.span.end_offset, |node| node.span.end_offset);
        let then = self.claim_optional(
            &TokenQuery::kw("then").within(header_end..statements.span.start_offset.max(header_end)),
        );
        let start = self.next_statement_start(then.as_ref().map_or(header_end, |t| t.span.end_offset));
        let end = self.current_offset().max(start);
        self.bind_statements(&mut statements, start, end);

        let exception = if exceptions.is_some() || variable.is_some() {
            let first = exceptions
                .as_ref()
                .map(|node| node.span)
                .or(arrow.as_ref().map(|token| token.span))
                .unwrap_or(keyword.span);
            let last = variable
                .as_ref()
                .or(exceptions.as_ref())
                .map_or(first, |node| node.span);
            Some(Box::new(Node::new(
                NodeKind::RescueEx {
                    exceptions: exceptions.map(Box::new),
                    variable: variable.map(Box::new),
                },
                first.to(last),
            )))
        } else {
            None
        };

        let span = self.span_between(keyword.span.start_offset, end);
        Ok(Node::new(
            NodeKind::Rescue {
                exception,
                statements: Box::new(statements),
                consequent: consequent.map(Box::new),
            },
            span,
        ))
    }

    pub(super) fn rescue_mod(&mut self, statement: Node, value: Node) -> Result<Node, ParseError> {
        self.claim(
            &TokenQuery::kw("rescue").within(statement.span.end_offset..value.span.start_offset),
            Some(statement.span),
        )?;
        let span = statement.span.to(value.span);
        Ok(Node::new(
            NodeKind::RescueMod {
                statement: Box::new(statement),
                value: Box::new(value),
            },
            span,
        ))
    }

    /// `ensure` runs up to the `end` of its construct, which the construct
    /// itself claims.
    pub(super) fn ensure(&mut self, mut statements: Node) -> Result<Node, ParseError> {
        let keyword = self.claim(
            &TokenQuery::kw("ensure").before(statements.span.start_offset),
            Some(statements.span),
        )?;
        let ending = self.find(&TokenQuery::kw("end"), Some(keyword.span))?;
        let start = self.next_statement_start(keyword.span.end_offset);
        self.bind_statements(&mut statements, start, ending.span.start_offset);
        let span = self.span_between(keyword.span.start_offset, ending.span.start_offset);
        Ok(Node::new(
            NodeKind::Ensure {
                keyword,
                statements: Box::new(statements),
            },
            span,
        ))
    }

    /// `else` of an `if`/`unless`/`case`. It owns the construct's `end`
    /// unless an `ensure` comes first.
    pub(super) fn else_clause(&mut self, mut statements: Node) -> Result<Node, ParseError> {
        let end = self.pool.find(&TokenQuery::kw("end")).cloned();
        let ensure = self.pool.find(&TokenQuery::kw("ensure")).cloned();
        let (ending, closes) = match (end, ensure) {
            (Some(end), Some(ensure)) if ensure.span.start_offset > end.span.start_offset => {
                (ensure.span, false)
            }
            (Some(end), _) => (end.span, true),
            (None, Some(ensure)) => (ensure.span, false),
            (None, None) => {
                return Err(ParseError::token_not_found(
                    &TokenQuery::kw("end").not_found(),
                    self.error_location(Some(statements.span)),
                ));
            }
        };
        if closes {
            self.pool
                .claim_at(ending)
                .map_err(|missing| ParseError::token_not_found(&missing, ending.start()))?;
        }

        let keyword = self.claim(
            &TokenQuery::kw("else").before(statements.span.start_offset),
            Some(statements.span),
        )?;
        let start = self.next_statement_start(keyword.span.end_offset);
        self.bind_statements(&mut statements, start, ending.start_offset);
        let span = if closes {
            keyword.span.to(ending)
        } else {
            self.span_between(keyword.span.start_offset, ending.start_offset)
        };
        Ok(Node::new(
            NodeKind::Else {
                keyword,
                statements: Box::new(statements),
            },
            span,
        ))
    }

    /// `if`, `unless` and `elsif`. The clause ends at its consequent when it
    /// has one, otherwise at its own `end`.
    pub(super) fn conditional(
        &mut self,
        keyword: &str,
        predicate: Node,
        mut statements: Node,
        consequent: Option<Node>,
    ) -> Result<Node, ParseError> {
        let ending = match &consequent {
            Some(consequent) => consequent.span,
            None => self.claim(&TokenQuery::kw("end"), Some(predicate.span))?.span,
        };
        let opening = self.claim(
            &TokenQuery::kw(keyword).before(predicate.span.start_offset),
            Some(predicate.span),
        )?;
        let header_end = self.then_keyword(predicate.span, statements.span);

        let start = self.next_statement_start(header_end);
        self.bind_statements(&mut statements, start, ending.start_offset);

        let span = opening.span.to(ending);
        let predicate = Box::new(predicate);
        let statements = Box::new(statements);
        let consequent = consequent.map(Box::new);
        let kind = match keyword {
            "unless" => NodeKind::Unless {
                predicate,
                statements,
                consequent,
            },
            "elsif" => NodeKind::Elsif {
                predicate,
                statements,
                consequent,
            },
            _ => NodeKind::If {
                predicate,
                statements,
                consequent,
            },
        };
        Ok(Node::new(kind, span))
    }

    /// Claim an optional `then` between a header and its statements. Returns
    /// where the header ends.
    fn then_keyword(&mut self, header: Span, statements: Span) -> u32 {
        let lower = header.end_offset;
        let upper = statements.start_offset.max(lower);
        self.claim_optional(&TokenQuery::kw("then").within(lower..upper))
            .map_or(lower, |then| then.span.end_offset)
    }

    pub(super) fn if_op(&mut self, predicate: Node, truthy: Node, falsy: Node) -> Result<Node, ParseError> {
        self.claim(
            &TokenQuery::op("?").within(predicate.span.end_offset..truthy.span.start_offset),
            Some(predicate.span),
        )?;
        self.claim(
            &TokenQuery::op(":").within(truthy.span.end_offset..falsy.span.start_offset),
            Some(truthy.span),
        )?;
        let span = predicate.span.to(falsy.span);
        Ok(Node::new(
            NodeKind::IfOp {
                predicate: Box::new(predicate),
                truthy: Box::new(truthy),
                falsy: Box::new(falsy),
            },
            span,
        ))
    }

    /// `statement if predicate` and friends.
    pub(super) fn modifier(
        &mut self,
        keyword: &str,
        statement: Node,
        predicate: Node,
    ) -> Result<Node, ParseError> {
        self.claim(
            &TokenQuery::kw(keyword).within(statement.span.end_offset..predicate.span.start_offset),
            Some(statement.span),
        )?;
        let span = statement.span.to(predicate.span);
        let statement = Box::new(statement);
        let predicate = Box::new(predicate);
        let kind = match keyword {
            "unless" => NodeKind::UnlessMod {
                statement,
                predicate,
            },
            "while" => NodeKind::WhileMod {
                statement,
                predicate,
            },
            "until" => NodeKind::UntilMod {
                statement,
                predicate,
            },
            _ => NodeKind::IfMod {
                statement,
                predicate,
            },
        };
        Ok(Node::new(kind, span))
    }

    /// `while`/`until` loops with an optional `do`.
    pub(super) fn loop_statement(
        &mut self,
        keyword: &str,
        predicate: Node,
        mut statements: Node,
    ) -> Result<Node, ParseError> {
        let ending = self.claim(&TokenQuery::kw("end"), Some(predicate.span))?;
        let opening = self.claim(
            &TokenQuery::kw(keyword).before(predicate.span.start_offset),
            Some(predicate.span),
        )?;
        let header_end = self.do_keyword(predicate.span, statements.span);
        let start = self.next_statement_start(header_end);
        self.bind_statements(&mut statements, start, ending.span.start_offset);

        let span = opening.span.to(ending.span);
        let predicate = Box::new(predicate);
        let statements = Box::new(statements);
        let kind = if keyword == "until" {
            NodeKind::Until {
                predicate,
                statements,
            }
        } else {
            NodeKind::While {
                predicate,
                statements,
            }
        };
        Ok(Node::new(kind, span))
    }

    /// Claim an optional loop `do` between a header and its statements.
    fn do_keyword(&mut self, header: Span, statements: Span) -> u32 {
        let lower = header.end_offset;
        let upper = statements.start_offset.max(lower);
        self.claim_optional(&TokenQuery::kw("do").within(lower..upper))
            .map_or(lower, |token| token.span.end_offset)
    }

    pub(super) fn for_loop(
        &mut self,
        index: Node,
        collection: Node,
        mut statements: Node,
    ) -> Result<Node, ParseError> {
        let ending = self.claim(&TokenQuery::kw("end"), Some(index.span))?;
        self.claim(
            &TokenQuery::kw("in").within(index.span.end_offset..collection.span.start_offset),
            Some(index.span),
        )?;
        let opening = self.claim(
            &TokenQuery::kw("for").before(index.span.start_offset),
            Some(index.span),
        )?;
        let header_end = self.do_keyword(collection.span, statements.span);
        let start = self.next_statement_start(header_end);
        self.bind_statements(&mut statements, start, ending.span.start_offset);
        Ok(Node::new(
            NodeKind::For {
                index: Box::new(index),
                collection: Box::new(collection),
                statements: Box::new(statements),
            },
            opening.span.to(ending.span),
        ))
    }

    pub(super) fn case(&mut self, value: Option<Node>, consequent: Node) -> Result<Node, ParseError> {
        let first = value.as_ref().map_or(consequent.span, |node| node.span);
        let keyword = self.claim(
            &TokenQuery::kw("case").before(first.start_offset),
            Some(first),
        )?;
        let span = keyword.span.to(consequent.span);
        Ok(Node::new(
            NodeKind::Case {
                value: value.map(Box::new),
                consequent: Box::new(consequent),
            },
            span,
        ))
    }

    pub(super) fn when(
        &mut self,
        arguments: Node,
        mut statements: Node,
        consequent: Option<Node>,
    ) -> Result<Node, ParseError> {
        let ending = match &consequent {
            Some(consequent) => consequent.span,
            None => self.claim(&TokenQuery::kw("end"), Some(arguments.span))?.span,
        };
        let keyword = self.claim(
            &TokenQuery::kw("when").before(arguments.span.start_offset),
            Some(arguments.span),
        )?;
        let header_end = self.then_keyword(arguments.span, statements.span);
        let start = self.next_statement_start(header_end);
        self.bind_statements(&mut statements, start, ending.start_offset);
        Ok(Node::new(
            NodeKind::When {
                arguments: Box::new(arguments),
                statements: Box::new(statements),
                consequent: consequent.map(Box::new),
            },
            keyword.span.to(ending),
        ))
    }
}
