//! The per-parse state and the reduction handlers.
//!
//! A `Builder` owns everything one parse needs: the token pool, the comment
//! backlog, the heredoc stack and a line index of the source. The grammar
//! engine drives it with three kinds of events:
//!
//! - `on_token` for every shifted token, in source order
//! - `on_comment` / `on_embdoc` whenever it passes a comment
//! - `reduce` for every completed rule, children first
//!
//! and finally `finish` with the top-level statement list, which binds the
//! program and attaches the collected comments.
//!
//! # Span resolution
//!
//! Leaf spans come straight from their tokens. A composite construct only
//! knows its children, so its reduction claims the delimiter tokens that
//! bound it from the pool (`claim`), most recent first, optionally bounded
//! between two children. Statement lists get their final span from the
//! enclosing construct once its delimiters are known (see `bind`).

mod bind;
mod calls;
mod clauses;
mod defs;
mod literals;

use stree_diagnostic::LineIndex;
use stree_ir::{Node, NodeKind, Position, Span, Token, TokenKind};
use tracing::{debug, trace};

use crate::comments::{attach_comments, CommentCollector};
use crate::pool::{TokenPool, TokenQuery};
use crate::reduction::Reduction;
use crate::ParseError;

/// Result of a successful parse.
#[derive(Clone, Debug)]
pub struct Finished {
    /// The `Program` root with every comment attached.
    pub program: Node,
    /// Pooled tokens no reduction claimed, in source order. Only stray
    /// semicolons are expected here.
    pub unclaimed: Vec<Token>,
}

/// A heredoc whose opener has been shifted but whose string literal has not
/// been reduced yet.
#[derive(Clone, Debug)]
struct PendingHeredoc {
    beginning: Token,
    ending: Option<Token>,
}

/// Per-parse state.
pub struct Builder<'src> {
    source: &'src str,
    index: LineIndex,
    pool: TokenPool,
    comments: CommentCollector,
    heredocs: Vec<PendingHeredoc>,
    /// End of the last token shifted outside a heredoc body.
    cursor: Option<Position>,
}

impl<'src> Builder<'src> {
    pub fn new(source: &'src str) -> Self {
        Builder {
            source,
            index: LineIndex::new(source),
            pool: TokenPool::new(),
            comments: CommentCollector::new(),
            heredocs: Vec::new(),
            cursor: None,
        }
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Unclaimed tokens so far.
    pub fn pool(&self) -> &TokenPool {
        &self.pool
    }

    /// Comments waiting for attachment.
    pub fn pending_comments(&self) -> usize {
        self.comments.len()
    }

    // --- Events ---

    /// Observe a shifted token. Delimiters go into the pool; heredoc markers
    /// drive the heredoc stack. Returns the token with its resolved span.
    pub fn on_token(&mut self, kind: TokenKind, text: &str, line: u32, column: u32) -> Token {
        let start = self.index.offset(line, column);
        let span = self.span_between(start, start.saturating_add(byte_len(text)));
        let token = Token::new(kind, text, span);

        let in_heredoc_body = self
            .heredocs
            .last()
            .is_some_and(|heredoc| heredoc.ending.is_none());
        match kind {
            TokenKind::HeredocBeg => {
                self.heredocs.push(PendingHeredoc {
                    beginning: token.clone(),
                    ending: None,
                });
                self.cursor = Some(span.end());
            }
            TokenKind::HeredocEnd => {
                if let Some(heredoc) = self.heredocs.last_mut() {
                    heredoc.ending = Some(token.clone());
                }
            }
            TokenKind::TStringContent if in_heredoc_body => {}
            _ => self.cursor = Some(span.end()),
        }

        if kind.is_pooled() {
            self.pool.push(token.clone());
        }
        token
    }

    /// Observe a `#` comment.
    pub fn on_comment(&mut self, text: &str, line: u32, column: u32) {
        let start = self.index.offset(line, column);
        let span = self.span_between(start, start.saturating_add(byte_len(text)));
        self.comments.collect(text, span, self.source);
    }

    /// Observe an `=begin`/`=end` block.
    pub fn on_embdoc(&mut self, text: &str, line: u32, column: u32) {
        let start = self.index.offset(line, column);
        let span = self.span_between(start, start.saturating_add(byte_len(text)));
        self.comments.collect_embdoc(text, span);
    }

    /// The leaf node for a value token.
    pub fn leaf(token: &Token) -> Node {
        let text = token.text.clone();
        let kind = match token.kind {
            TokenKind::Ident => NodeKind::Ident(text),
            TokenKind::Const => NodeKind::Const(text),
            TokenKind::IVar => NodeKind::IVar(text),
            TokenKind::CVar => NodeKind::CVar(text),
            TokenKind::GVar => NodeKind::GVar(text),
            TokenKind::Int => NodeKind::Int(text),
            TokenKind::Float => NodeKind::Float(text),
            TokenKind::Label => NodeKind::Label(text),
            TokenKind::Kw => NodeKind::Kw(text),
            TokenKind::TStringContent => NodeKind::TStringContent(text),
            _ => NodeKind::Op(text),
        };
        Node::new(kind, token.span)
    }

    /// Build the node for a completed rule.
    pub fn reduce(&mut self, reduction: Reduction) -> Result<Node, ParseError> {
        trace!(rule = reduction.name(), "reduce");
        match reduction {
            Reduction::VoidStmt => Ok(Node::new(
                NodeKind::VoidStmt,
                Span::point(self.current_position()),
            )),
            Reduction::Statements(body) => Ok(self.statements(body)),
            Reduction::BodyStmt {
                statements,
                rescue,
                else_statements,
                ensure,
            } => self.bodystmt(statements, rescue, else_statements, ensure),
            Reduction::Begin(bodystmt) => self.begin(bodystmt),
            Reduction::Rescue {
                exceptions,
                variable,
                statements,
                consequent,
            } => self.rescue(exceptions, variable, statements, consequent),
            Reduction::RescueMod { statement, value } => self.rescue_mod(statement, value),
            Reduction::Ensure(statements) => self.ensure(statements),
            Reduction::Else(statements) => self.else_clause(statements),
            Reduction::If {
                predicate,
                statements,
                consequent,
            } => self.conditional("if", predicate, statements, consequent),
            Reduction::Unless {
                predicate,
                statements,
                consequent,
            } => self.conditional("unless", predicate, statements, consequent),
            Reduction::Elsif {
                predicate,
                statements,
                consequent,
            } => self.conditional("elsif", predicate, statements, consequent),
            Reduction::IfOp {
                predicate,
                truthy,
                falsy,
            } => self.if_op(predicate, truthy, falsy),
            Reduction::IfMod {
                statement,
                predicate,
            } => self.modifier("if", statement, predicate),
            Reduction::UnlessMod {
                statement,
                predicate,
            } => self.modifier("unless", statement, predicate),
            Reduction::WhileMod {
                statement,
                predicate,
            } => self.modifier("while", statement, predicate),
            Reduction::UntilMod {
                statement,
                predicate,
            } => self.modifier("until", statement, predicate),
            Reduction::While {
                predicate,
                statements,
            } => self.loop_statement("while", predicate, statements),
            Reduction::Until {
                predicate,
                statements,
            } => self.loop_statement("until", predicate, statements),
            Reduction::For {
                index,
                collection,
                statements,
            } => self.for_loop(index, collection, statements),
            Reduction::Case { value, consequent } => self.case(value, consequent),
            Reduction::When {
                arguments,
                statements,
                consequent,
            } => self.when(arguments, statements, consequent),
            Reduction::Def {
                target,
                name,
                params,
                bodystmt,
            } => self.def(target, name, params, defs::DefBody::Block(bodystmt)),
            Reduction::DefEndless {
                target,
                name,
                params,
                value,
            } => self.def(target, name, params, defs::DefBody::Endless(value)),
            Reduction::Class {
                constant,
                superclass,
                bodystmt,
            } => self.class(constant, superclass, bodystmt),
            Reduction::Module { constant, bodystmt } => self.module(constant, bodystmt),
            Reduction::SClass { target, bodystmt } => self.sclass(target, bodystmt),
            Reduction::ConstRef(constant) => Ok(wrap(constant, |c| NodeKind::ConstRef { constant: c })),
            Reduction::ConstPathRef { parent, constant } => self.const_path_ref(parent, constant),
            Reduction::TopConstRef(constant) => self.top_const_ref(constant),
            Reduction::VarRef(value) => self.variable(value, |v| NodeKind::VarRef { value: v }),
            Reduction::VarField(value) => self.variable(value, |v| NodeKind::VarField { value: v }),
            Reduction::VCall(value) => Ok(wrap(value, |v| NodeKind::VCall { value: v })),
            Reduction::Assign { target, value } => self.assign(target, value),
            Reduction::OpAssign {
                target,
                operator,
                value,
            } => self.op_assign(target, operator, value),
            Reduction::Binary {
                left,
                operator,
                right,
            } => self.binary(left, operator, right),
            Reduction::Unary { operator, operand } => self.unary(operator, operand),
            Reduction::Not {
                operand,
                parentheses,
            } => self.not(operand, parentheses),
            Reduction::Call {
                receiver,
                operator,
                message,
                arguments,
            } => self.call(receiver, operator, message, arguments),
            Reduction::Command {
                receiver,
                operator,
                message,
                arguments,
            } => self.command(receiver, operator, message, arguments),
            Reduction::ARef { collection, index } => self.aref(collection, index),
            Reduction::ArgParen(arguments) => self.arg_paren(arguments),
            Reduction::Args(parts) => Ok(self.list(parts, |parts| NodeKind::Args { parts })),
            Reduction::ArgStar(value) => self.prefixed("*", value, |v| NodeKind::ArgStar { value: v }),
            Reduction::ArgBlock(value) => self.prefixed("&", value, |v| NodeKind::ArgBlock { value: v }),
            Reduction::BareAssocHash(assocs) => {
                Ok(self.list(assocs, |assocs| NodeKind::BareAssocHash { assocs }))
            }
            Reduction::Assoc { key, value } => self.assoc(key, value),
            Reduction::AssocSplat(value) => {
                self.prefixed("**", value, |v| NodeKind::AssocSplat { value: v })
            }
            Reduction::MethodAddBlock { call, block } => {
                let span = call.span.to(block.span);
                Ok(Node::new(
                    NodeKind::MethodAddBlock {
                        call: Box::new(call),
                        block: Box::new(block),
                    },
                    span,
                ))
            }
            Reduction::BraceBlock {
                block_var,
                statements,
            } => self.brace_block(block_var, statements),
            Reduction::DoBlock {
                block_var,
                bodystmt,
            } => self.do_block(block_var, bodystmt),
            Reduction::BlockVar { params, locals } => self.block_var(params, locals),
            Reduction::Params {
                requireds,
                optionals,
                rest,
                keywords,
                keyword_rest,
                block,
            } => self.params(requireds, optionals, rest, keywords, keyword_rest, block),
            Reduction::RestParam(name) => self.prefixed("*", name, |n| NodeKind::RestParam { name: n }),
            Reduction::KwRestParam(name) => {
                self.prefixed("**", name, |n| NodeKind::KwRestParam { name: n })
            }
            Reduction::BlockArg(name) => self.prefixed("&", name, |n| NodeKind::BlockArg { name: n }),
            Reduction::Paren(contents) => self.paren(contents),
            Reduction::Lambda { params, statements } => self.lambda(params, statements),
            Reduction::ArrayLiteral(contents) => self.array(contents),
            Reduction::HashLiteral(assocs) => self.hash(assocs),
            Reduction::StringLiteral(parts) => self.string_literal(parts),
            Reduction::StringEmbExpr(statements) => self.string_embexpr(statements),
            Reduction::SymbolLiteral(value) => self.symbol(value),
            Reduction::Return(arguments) => {
                self.jump("return", arguments, |a| NodeKind::Return { arguments: a })
            }
            Reduction::Break(arguments) => {
                self.jump("break", arguments, |a| NodeKind::Break { arguments: a })
            }
            Reduction::Next(arguments) => {
                self.jump("next", arguments, |a| NodeKind::Next { arguments: a })
            }
            Reduction::Yield(arguments) => {
                self.jump("yield", arguments, |a| NodeKind::Yield { arguments: a })
            }
            Reduction::Redo => self.jump("redo", None, |_| NodeKind::Redo),
            Reduction::Retry => self.jump("retry", None, |_| NodeKind::Retry),
        }
    }

    /// Bind the top-level statements to the whole source, build the
    /// `Program` root and attach every collected comment.
    pub fn finish(mut self, mut statements: Node) -> Result<Finished, ParseError> {
        let len = byte_len(self.source);
        self.bind_statements(&mut statements, 0, len);
        let mut program = Node::new(
            NodeKind::Program {
                statements: Box::new(statements),
            },
            self.span_between(0, len),
        );

        let comments = self.comments.drain_sorted();
        let comment_count = comments.len();
        attach_comments(&mut program, comments)?;

        if !self.heredocs.is_empty() {
            debug!(pending = self.heredocs.len(), "heredocs never reduced");
        }
        let unclaimed = self.pool.into_remaining();
        debug!(
            comments = comment_count,
            unclaimed = unclaimed.len(),
            "finished parse"
        );
        Ok(Finished { program, unclaimed })
    }

    // --- Positions ---

    fn span_between(&self, start: u32, end: u32) -> Span {
        Span::new(self.index.position(start), self.index.position(end))
    }

    fn point(&self, offset: u32) -> Span {
        Span::point(self.index.position(offset))
    }

    /// Where the lexer is: the end of the last shifted token.
    fn current_position(&self) -> Position {
        self.cursor.unwrap_or(Position::START)
    }

    fn current_offset(&self) -> u32 {
        self.current_position().offset
    }

    /// Line and column of a byte offset.
    pub(crate) fn position_at(&self, offset: u32) -> Position {
        self.index.position(offset)
    }

    fn error_location(&self, construct: Option<Span>) -> Position {
        error_location(construct, self.cursor, self.pool.last_claimed())
    }

    // --- Claims ---

    /// Claim a required delimiter.
    fn claim(&mut self, query: &TokenQuery<'_>, construct: Option<Span>) -> Result<Token, ParseError> {
        self.pool
            .claim(query)
            .map_err(|missing| ParseError::token_not_found(&missing, self.error_location(construct)))
    }

    /// Claim a delimiter that may be absent (`then`, `do`).
    fn claim_optional(&mut self, query: &TokenQuery<'_>) -> Option<Token> {
        self.pool.claim(query).ok()
    }

    /// Find a delimiter that another reduction will claim.
    fn find(&self, query: &TokenQuery<'_>, construct: Option<Span>) -> Result<Token, ParseError> {
        match self.pool.find(query) {
            Some(token) => Ok(token.clone()),
            None => Err(ParseError::token_not_found(
                &query.not_found(),
                self.error_location(construct),
            )),
        }
    }

    /// Keyword and operator leaves (`nil`, `:end`, `def ==`) are pooled
    /// tokens themselves and must be claimed where they end up in the tree.
    fn claim_leaf(&mut self, node: &Node) -> Result<(), ParseError> {
        if matches!(node.kind, NodeKind::Kw(_) | NodeKind::Op(_)) {
            self.pool
                .claim_at(node.span)
                .map_err(|missing| ParseError::token_not_found(&missing, node.span.start()))?;
        }
        Ok(())
    }

    // --- Shared shapes ---

    /// Provisional span of a list: first to last element, or a point at the
    /// lexer position when empty.
    fn list_span(&self, nodes: &[Node]) -> Span {
        match (nodes.first(), nodes.last()) {
            (Some(first), Some(last)) => first.span.to(last.span),
            _ => Span::point(self.current_position()),
        }
    }

    fn list(&self, nodes: Vec<Node>, kind: impl FnOnce(Vec<Node>) -> NodeKind) -> Node {
        let span = self.list_span(&nodes);
        Node::new(kind(nodes), span)
    }

    fn statements(&self, body: Vec<Node>) -> Node {
        self.list(body, |body| NodeKind::Statements { body })
    }

    fn variable(
        &mut self,
        value: Node,
        kind: impl FnOnce(Box<Node>) -> NodeKind,
    ) -> Result<Node, ParseError> {
        self.claim_leaf(&value)?;
        Ok(wrap(value, kind))
    }

    /// `*x`, `&blk`, `**opts` and their bare forms.
    fn prefixed(
        &mut self,
        operator: &str,
        value: Option<Node>,
        kind: impl FnOnce(Option<Box<Node>>) -> NodeKind,
    ) -> Result<Node, ParseError> {
        let query = match &value {
            Some(value) => TokenQuery::op(operator).before(value.span.start_offset),
            None => TokenQuery::op(operator),
        };
        let token = self.claim(&query, value.as_ref().map(|v| v.span))?;
        let span = match &value {
            Some(value) => token.span.to(value.span),
            None => token.span,
        };
        Ok(Node::new(kind(value.map(Box::new)), span))
    }

    /// `return`, `break`, `next`, `yield` with optional arguments, and the
    /// argument-less `redo`/`retry`.
    fn jump(
        &mut self,
        keyword: &str,
        arguments: Option<Node>,
        kind: impl FnOnce(Option<Box<Node>>) -> NodeKind,
    ) -> Result<Node, ParseError> {
        let query = match &arguments {
            Some(arguments) => TokenQuery::kw(keyword).before(arguments.span.start_offset),
            None => TokenQuery::kw(keyword),
        };
        let token = self.claim(&query, arguments.as_ref().map(|a| a.span))?;
        let span = match &arguments {
            Some(arguments) => token.span.to(arguments.span),
            None => token.span,
        };
        Ok(Node::new(kind(arguments.map(Box::new)), span))
    }
}

/// Best-effort location for a missing delimiter: the construct being
/// reduced, then the lexer position, then the last claimed token, then the
/// start of the source.
fn error_location(construct: Option<Span>, cursor: Option<Position>, last_claimed: Option<&Token>) -> Position {
    construct
        .map(|span| span.start())
        .or(cursor)
        .or_else(|| last_claimed.map(|token| token.span.start()))
        .unwrap_or(Position::START)
}

/// Wrap a node in a construct with the same span.
fn wrap(node: Node, kind: impl FnOnce(Box<Node>) -> NodeKind) -> Node {
    let span = node.span;
    Node::new(kind(Box::new(node)), span)
}

/// Source lengths are checked against `u32` by the lexer.
fn byte_len(text: &str) -> u32 {
    u32::try_from(text.len()).unwrap_or(u32::MAX)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests unwrap to fail loudly")]
mod tests;
