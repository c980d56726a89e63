//! Statement lists, modifiers, bodies and compound statements.

use smallvec::SmallVec;
use stree_ir::{Node, TokenKind};

use super::{ParseContext, Parser};
use crate::builder::Builder;
use crate::reduction::Reduction;
use crate::ParseError;

/// Keywords that end a statement list.
const LIST_END_KEYWORDS: &[&str] = &["end", "else", "elsif", "when", "rescue", "ensure", "then", "do"];

/// A `rescue` clause waiting for the body's `end`.
struct RescueClause {
    exceptions: Option<Node>,
    variable: Option<Node>,
    statements: Node,
}

/// An `elsif` or `when` clause waiting for the construct's `end`.
struct Clause {
    head: Node,
    statements: Node,
}

impl Parser<'_> {
    fn at_list_end(&mut self) -> bool {
        match self.peek() {
            None => true,
            Some(token) => match token.kind {
                TokenKind::Kw => LIST_END_KEYWORDS.contains(&token.text.as_str()),
                TokenKind::RBrace | TokenKind::RParen | TokenKind::RBracket | TokenKind::EmbExprEnd => true,
                _ => false,
            },
        }
    }

    /// Statements up to the next list end. An empty list holds one
    /// `VoidStmt`.
    pub(super) fn statements(&mut self) -> Result<Node, ParseError> {
        self.without_context(ParseContext::ALL, |parser| {
            let mut body = Vec::new();
            parser.skip_terms()?;
            while !parser.at_list_end() {
                body.push(parser.stmt()?);
                if !matches!(
                    parser.peek_kind(),
                    Some(TokenKind::Newline | TokenKind::Semicolon)
                ) && !parser.at_list_end()
                {
                    return Err(parser.unexpected_here("end of statement"));
                }
                parser.skip_terms()?;
            }
            if body.is_empty() {
                body.push(parser.builder.reduce(Reduction::VoidStmt)?);
            }
            parser.builder.reduce(Reduction::Statements(body))
        })
    }

    /// One statement with its trailing modifiers.
    pub(super) fn stmt(&mut self) -> Result<Node, ParseError> {
        self.guarded(|parser| {
            let mut statement = parser.expr()?;
            loop {
                let Some(token) = parser.peek() else {
                    break;
                };
                if token.kind != TokenKind::Kw {
                    break;
                }
                let keyword = token.text.clone();
                statement = match keyword.as_str() {
                    "if" | "unless" | "while" | "until" => {
                        parser.bump()?;
                        let predicate = parser.expr()?;
                        let reduction = match keyword.as_str() {
                            "if" => Reduction::IfMod { statement, predicate },
                            "unless" => Reduction::UnlessMod { statement, predicate },
                            "while" => Reduction::WhileMod { statement, predicate },
                            _ => Reduction::UntilMod { statement, predicate },
                        };
                        parser.builder.reduce(reduction)?
                    }
                    "rescue" => {
                        parser.bump()?;
                        let value = parser.expr()?;
                        parser.builder.reduce(Reduction::RescueMod { statement, value })?
                    }
                    _ => break,
                };
            }
            Ok(statement)
        })
    }

    /// The body of `def`, `class`, `module`, `begin` and `do` blocks, with
    /// its `rescue`/`else`/`ensure` clauses, through the closing `end`.
    pub(super) fn body_statement(&mut self) -> Result<Node, ParseError> {
        let statements = self.statements()?;

        let mut rescues: SmallVec<[RescueClause; 2]> = SmallVec::new();
        while self.eat_kw("rescue")? {
            rescues.push(self.rescue_clause()?);
        }
        let else_statements = if self.eat_kw("else")? {
            Some(self.statements()?)
        } else {
            None
        };
        let ensure_statements = if self.eat_kw("ensure")? {
            Some(self.statements()?)
        } else {
            None
        };
        self.expect_kw("end")?;

        let ensure = match ensure_statements {
            Some(statements) => Some(self.builder.reduce(Reduction::Ensure(statements))?),
            None => None,
        };
        let mut rescue = None;
        for clause in rescues.into_iter().rev() {
            rescue = Some(self.builder.reduce(Reduction::Rescue {
                exceptions: clause.exceptions,
                variable: clause.variable,
                statements: clause.statements,
                consequent: rescue,
            })?);
        }
        self.builder.reduce(Reduction::BodyStmt {
            statements,
            rescue,
            else_statements,
            ensure,
        })
    }

    /// `rescue Foo, Bar => e then`, after the keyword.
    fn rescue_clause(&mut self) -> Result<RescueClause, ParseError> {
        let mut exceptions = Vec::new();
        let at_header_end = |parser: &mut Self| {
            parser.at_op("=>")
                || parser.at_kw("then")
                || matches!(
                    parser.peek_kind(),
                    None | Some(TokenKind::Newline | TokenKind::Semicolon)
                )
        };
        if !at_header_end(self) {
            loop {
                exceptions.push(self.arg()?);
                if !self.at(TokenKind::Comma) {
                    break;
                }
                self.bump()?;
            }
        }
        let exceptions = match exceptions.len() {
            0 => None,
            1 => exceptions.pop(),
            _ => Some(self.builder.reduce(Reduction::Args(exceptions))?),
        };

        let variable = if self.at_op("=>") {
            self.bump()?;
            let name = self.expect(TokenKind::Ident, "a variable name")?;
            self.declare(&name.text);
            let leaf = Builder::leaf(&name);
            Some(self.builder.reduce(Reduction::VarField(leaf))?)
        } else {
            None
        };
        self.eat_kw("then")?;
        let statements = self.statements()?;
        Ok(RescueClause {
            exceptions,
            variable,
            statements,
        })
    }

    /// Shift an optional `then` and the terminators after a header.
    fn then(&mut self) -> Result<(), ParseError> {
        self.skip_terms()?;
        self.eat_kw("then")?;
        Ok(())
    }

    /// `if`/`unless` with their `elsif`/`else` chain.
    pub(super) fn conditional(&mut self, keyword: &str) -> Result<Node, ParseError> {
        self.bump()?;
        let predicate = self.expr()?;
        self.then()?;
        let statements = self.statements()?;

        let mut clauses: SmallVec<[Clause; 4]> = SmallVec::new();
        if keyword == "if" {
            while self.eat_kw("elsif")? {
                let head = self.expr()?;
                self.then()?;
                let statements = self.statements()?;
                clauses.push(Clause { head, statements });
            }
        }
        let else_statements = if self.eat_kw("else")? {
            Some(self.statements()?)
        } else {
            None
        };
        self.expect_kw("end")?;

        let mut consequent = match else_statements {
            Some(statements) => Some(self.builder.reduce(Reduction::Else(statements))?),
            None => None,
        };
        for clause in clauses.into_iter().rev() {
            consequent = Some(self.builder.reduce(Reduction::Elsif {
                predicate: clause.head,
                statements: clause.statements,
                consequent,
            })?);
        }
        let reduction = if keyword == "unless" {
            Reduction::Unless {
                predicate,
                statements,
                consequent,
            }
        } else {
            Reduction::If {
                predicate,
                statements,
                consequent,
            }
        };
        self.builder.reduce(reduction)
    }

    /// `while`/`until` loops.
    pub(super) fn loop_statement(&mut self, keyword: &str) -> Result<Node, ParseError> {
        self.bump()?;
        let predicate = self.with_context(ParseContext::NO_DO, Self::expr)?;
        self.eat_kw("do")?;
        let statements = self.statements()?;
        self.expect_kw("end")?;
        let reduction = if keyword == "until" {
            Reduction::Until {
                predicate,
                statements,
            }
        } else {
            Reduction::While {
                predicate,
                statements,
            }
        };
        self.builder.reduce(reduction)
    }

    /// `for x in collection ... end`
    pub(super) fn for_loop(&mut self) -> Result<Node, ParseError> {
        self.bump()?;
        let name = self.expect(TokenKind::Ident, "a loop variable")?;
        self.declare(&name.text);
        let index = self
            .builder
            .reduce(Reduction::VarField(Builder::leaf(&name)))?;
        self.expect_kw("in")?;
        let collection = self.with_context(ParseContext::NO_DO, Self::expr)?;
        self.eat_kw("do")?;
        let statements = self.statements()?;
        self.expect_kw("end")?;
        self.builder.reduce(Reduction::For {
            index,
            collection,
            statements,
        })
    }

    /// `case value when ... else ... end`
    pub(super) fn case(&mut self) -> Result<Node, ParseError> {
        self.bump()?;
        let value = if self.at_kw("when")
            || matches!(
                self.peek_kind(),
                Some(TokenKind::Newline | TokenKind::Semicolon)
            )
        {
            None
        } else {
            Some(self.expr()?)
        };
        self.skip_terms()?;

        let mut clauses: SmallVec<[Clause; 4]> = SmallVec::new();
        while self.eat_kw("when")? {
            let mut arguments = vec![self.arg()?];
            while self.at(TokenKind::Comma) {
                self.bump()?;
                self.skip_newlines()?;
                arguments.push(self.arg()?);
            }
            let head = self.builder.reduce(Reduction::Args(arguments))?;
            self.then()?;
            let statements = self.statements()?;
            clauses.push(Clause { head, statements });
        }
        if clauses.is_empty() {
            return Err(self.unexpected_here("`when`"));
        }
        let else_statements = if self.eat_kw("else")? {
            Some(self.statements()?)
        } else {
            None
        };
        self.expect_kw("end")?;

        let mut consequent = match else_statements {
            Some(statements) => Some(self.builder.reduce(Reduction::Else(statements))?),
            None => None,
        };
        for clause in clauses.into_iter().rev() {
            consequent = Some(self.builder.reduce(Reduction::When {
                arguments: clause.head,
                statements: clause.statements,
                consequent,
            })?);
        }
        let Some(consequent) = consequent else {
            return Err(self.unexpected_here("`when`"));
        };
        self.builder.reduce(Reduction::Case { value, consequent })
    }

    /// `begin ... end`
    pub(super) fn begin(&mut self) -> Result<Node, ParseError> {
        self.bump()?;
        let bodystmt = self.body_statement()?;
        self.builder.reduce(Reduction::Begin(bodystmt))
    }

    /// Whether the next token can start the argument of a jump
    /// (`return x`, `break 1`).
    fn jump_argument_follows(&mut self) -> bool {
        match self.peek() {
            None => false,
            Some(token) => match token.kind {
                TokenKind::Newline
                | TokenKind::Semicolon
                | TokenKind::RParen
                | TokenKind::RBracket
                | TokenKind::RBrace
                | TokenKind::EmbExprEnd
                | TokenKind::Comma => false,
                TokenKind::Kw => !matches!(
                    token.text.as_str(),
                    "if" | "unless" | "while" | "until" | "rescue" | "end" | "and" | "or" | "then" | "do"
                ),
                TokenKind::Op => matches!(token.text.as_str(), "*" | "**" | "&" | "!" | "::" | "-" | "~"),
                _ => true,
            },
        }
    }

    /// `return`, `break`, `next` with optional arguments.
    pub(super) fn jump(&mut self, keyword: &str) -> Result<Node, ParseError> {
        self.bump()?;
        let arguments = if self.jump_argument_follows() {
            let parts = self.call_args()?;
            Some(self.builder.reduce(Reduction::Args(parts))?)
        } else {
            None
        };
        let reduction = match keyword {
            "break" => Reduction::Break(arguments),
            "next" => Reduction::Next(arguments),
            _ => Reduction::Return(arguments),
        };
        self.builder.reduce(reduction)
    }

    /// `yield`, `yield(x)` and `yield x`.
    pub(super) fn yield_expr(&mut self) -> Result<Node, ParseError> {
        self.bump()?;
        let arguments = if self.at(TokenKind::LParen) && self.adjacent() {
            Some(self.arg_paren()?)
        } else if self.jump_argument_follows() {
            let parts = self.call_args()?;
            Some(self.builder.reduce(Reduction::Args(parts))?)
        } else {
            None
        };
        self.builder.reduce(Reduction::Yield(arguments))
    }
}
