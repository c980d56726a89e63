//! Operators, primaries, calls, blocks and literals.
//!
//! Precedence climbs from `expr` (`not`, `and`, `or`) through assignment,
//! the ternary and the binary operator table down to unary operators and
//! postfix chains (`.`, `::`, `[]`, blocks) on a primary.

use stree_ir::{Node, NodeKind, TokenKind};

use super::{ParseContext, Parser};
use crate::builder::Builder;
use crate::reduction::Reduction;
use crate::ParseError;

/// Binding power and right-associativity of a binary operator.
fn binary_precedence(op: &str) -> Option<(u8, bool)> {
    let entry = match op {
        ".." | "..." => (1, false),
        "||" => (2, false),
        "&&" => (3, false),
        "<=>" | "==" | "===" | "!=" | "=~" | "!~" => (5, false),
        "<" | "<=" | ">" | ">=" => (6, false),
        "|" | "^" => (7, false),
        "&" => (8, false),
        "<<" | ">>" => (9, false),
        "+" | "-" => (10, false),
        "*" | "/" | "%" => (11, false),
        "**" => (13, true),
        _ => return None,
    };
    Some(entry)
}

fn is_op_assign(op: &str) -> bool {
    matches!(
        op,
        "+=" | "-=" | "*=" | "/=" | "%=" | "**=" | "||=" | "&&=" | "|=" | "&=" | "^=" | "<<=" | ">>="
    )
}

/// Keywords that evaluate to a value on their own.
const VALUE_KEYWORDS: &[&str] = &[
    "nil",
    "true",
    "false",
    "self",
    "__FILE__",
    "__LINE__",
    "__ENCODING__",
];

impl Parser<'_> {
    /// An expression: `not`, `and` and `or` over assignments.
    pub(super) fn expr(&mut self) -> Result<Node, ParseError> {
        self.guarded(|parser| {
            let mut left = parser.not_expr()?;
            loop {
                let Some(token) = parser.peek() else {
                    break;
                };
                if !(token.is_keyword("and") || token.is_keyword("or")) {
                    break;
                }
                let operator = token.text.clone();
                parser.bump()?;
                parser.skip_newlines()?;
                let right = parser.not_expr()?;
                left = parser.builder.reduce(Reduction::Binary {
                    left,
                    operator,
                    right,
                })?;
            }
            Ok(left)
        })
    }

    /// `not x`, `not(x)`, `not()`, or an assignment.
    fn not_expr(&mut self) -> Result<Node, ParseError> {
        if !self.at_kw("not") {
            return self.assignment();
        }
        self.bump()?;
        if self.at(TokenKind::LParen) {
            self.bump()?;
            return self.without_context(ParseContext::ALL, |parser| {
                parser.skip_newlines()?;
                let operand = if parser.at(TokenKind::RParen) {
                    None
                } else {
                    let operand = parser.expr()?;
                    parser.skip_newlines()?;
                    Some(operand)
                };
                parser.expect(TokenKind::RParen, "`)`")?;
                parser.builder.reduce(Reduction::Not {
                    operand,
                    parentheses: true,
                })
            });
        }
        let operand = self.not_expr()?;
        self.builder.reduce(Reduction::Not {
            operand: Some(operand),
            parentheses: false,
        })
    }

    /// `target = value` and `target op= value`. The value side may be a
    /// command or another assignment.
    fn assignment(&mut self) -> Result<Node, ParseError> {
        let target = self.arg()?;
        let Some(token) = self.peek() else {
            return Ok(target);
        };
        if token.kind != TokenKind::Op {
            return Ok(target);
        }
        let operator = token.text.clone();
        if operator == "=" {
            let target = self.assignable(target)?;
            self.bump()?;
            self.skip_newlines()?;
            let value = self.not_expr()?;
            return self.builder.reduce(Reduction::Assign { target, value });
        }
        if is_op_assign(&operator) {
            let target = self.assignable(target)?;
            let operator = self.bump_leaf()?;
            self.skip_newlines()?;
            let value = self.not_expr()?;
            return self.builder.reduce(Reduction::OpAssign {
                target,
                operator,
                value,
            });
        }
        Ok(target)
    }

    /// Turn the left side of an assignment into a target. Bare names
    /// become `VarField`s and are declared as locals.
    fn assignable(&mut self, target: Node) -> Result<Node, ParseError> {
        let valid = match &target.kind {
            NodeKind::VCall { value } | NodeKind::VarRef { value } => matches!(
                value.kind,
                NodeKind::Ident(_)
                    | NodeKind::IVar(_)
                    | NodeKind::CVar(_)
                    | NodeKind::GVar(_)
                    | NodeKind::Const(_)
            ),
            NodeKind::ARef { .. } | NodeKind::ConstPathRef { .. } | NodeKind::TopConstRef { .. } => true,
            NodeKind::Call {
                receiver: Some(_),
                arguments: None,
                ..
            } => true,
            _ => false,
        };
        if !valid {
            return Err(self.unexpected_here("an assignable target"));
        }

        if !matches!(target.kind, NodeKind::VCall { .. } | NodeKind::VarRef { .. }) {
            return Ok(target);
        }
        match target.into_kind() {
            NodeKind::VCall { value } | NodeKind::VarRef { value } => {
                if let NodeKind::Ident(name) = &value.kind {
                    self.declare(name);
                }
                self.builder.reduce(Reduction::VarField(*value))
            }
            _ => Err(self.unexpected_here("an assignable target")),
        }
    }

    /// An argument: the ternary over binary operators.
    pub(super) fn arg(&mut self) -> Result<Node, ParseError> {
        self.guarded(|parser| {
            let predicate = parser.binary(1)?;
            if !parser.at_op("?") {
                return Ok(predicate);
            }
            parser.bump()?;
            parser.skip_newlines()?;
            let truthy = parser.arg()?;
            parser.skip_newlines()?;
            parser.expect_op(":")?;
            parser.skip_newlines()?;
            let falsy = parser.arg()?;
            parser.builder.reduce(Reduction::IfOp {
                predicate,
                truthy,
                falsy,
            })
        })
    }

    /// Precedence climbing over the binary operator table.
    fn binary(&mut self, min: u8) -> Result<Node, ParseError> {
        let mut left = self.unary()?;
        loop {
            let Some(token) = self.peek() else {
                break;
            };
            if token.kind != TokenKind::Op {
                break;
            }
            let operator = token.text.clone();
            let Some((precedence, right_assoc)) = binary_precedence(&operator) else {
                break;
            };
            if precedence < min || (operator == "|" && self.context.has(ParseContext::NO_PIPE)) {
                break;
            }
            self.bump()?;
            self.skip_newlines()?;
            let next = if right_assoc { precedence } else { precedence + 1 };
            let right = self.binary(next)?;
            left = self.builder.reduce(Reduction::Binary {
                left,
                operator,
                right,
            })?;
        }
        Ok(left)
    }

    fn unary(&mut self) -> Result<Node, ParseError> {
        let operator = self
            .peek()
            .filter(|token| token.kind == TokenKind::Op && matches!(token.text.as_str(), "!" | "-" | "~" | "+"))
            .map(|token| token.text.clone());
        let Some(operator) = operator else {
            let primary = self.primary()?;
            return self.postfix(primary);
        };
        self.bump()?;
        let operand = self.guarded(Self::unary)?;
        self.builder.reduce(Reduction::Unary { operator, operand })
    }

    // --- Primaries ---

    fn primary(&mut self) -> Result<Node, ParseError> {
        let Some(token) = self.peek() else {
            return Err(self.eof("an expression"));
        };
        let (kind, text) = (token.kind, token.text.clone());
        match kind {
            TokenKind::Int | TokenKind::Float => self.bump_leaf(),
            TokenKind::IVar | TokenKind::CVar | TokenKind::GVar => {
                let leaf = self.bump_leaf()?;
                self.builder.reduce(Reduction::VarRef(leaf))
            }
            TokenKind::Const => self.constant(),
            TokenKind::Ident => self.identifier(&text),
            TokenKind::TStringBeg => self.string(),
            TokenKind::HeredocBeg => self.heredoc(),
            TokenKind::SymBeg => self.symbol(),
            TokenKind::LBracket => self.array(),
            TokenKind::LBrace => self.hash(),
            TokenKind::LParen => self.paren_expr(),
            TokenKind::TLambda => self.lambda(),
            TokenKind::Op if text == "::" => {
                self.bump()?;
                let constant = self.expect(TokenKind::Const, "a constant")?;
                let leaf = Builder::leaf(&constant);
                self.builder.reduce(Reduction::TopConstRef(leaf))
            }
            TokenKind::Kw => self.keyword(&text),
            _ => Err(self.unexpected_here("an expression")),
        }
    }

    fn keyword(&mut self, keyword: &str) -> Result<Node, ParseError> {
        match keyword {
            _ if VALUE_KEYWORDS.contains(&keyword) => {
                let leaf = self.bump_leaf()?;
                self.builder.reduce(Reduction::VarRef(leaf))
            }
            "if" | "unless" => self.conditional(keyword),
            "while" | "until" => self.loop_statement(keyword),
            "for" => self.for_loop(),
            "case" => self.case(),
            "begin" => self.begin(),
            "def" => self.def(),
            "class" => self.class(),
            "module" => self.module(),
            "return" | "break" | "next" => self.jump(keyword),
            "yield" => self.yield_expr(),
            "redo" => {
                self.bump()?;
                self.builder.reduce(Reduction::Redo)
            }
            "retry" => {
                self.bump()?;
                self.builder.reduce(Reduction::Retry)
            }
            "not" => self.not_expr(),
            "super" | "defined?" => self.method_call(None, None),
            _ => Err(self.unexpected_here("an expression")),
        }
    }

    /// A constant, or a method named like one (`Integer("1")`).
    fn constant(&mut self) -> Result<Node, ParseError> {
        let leaf = self.bump_leaf()?;
        if self.at(TokenKind::LParen) && self.adjacent() {
            let arguments = self.arg_paren()?;
            return self.builder.reduce(Reduction::Call {
                receiver: None,
                operator: None,
                message: leaf,
                arguments: Some(arguments),
            });
        }
        self.builder.reduce(Reduction::VarRef(leaf))
    }

    /// A local variable, or a receiverless method call.
    fn identifier(&mut self, name: &str) -> Result<Node, ParseError> {
        let paren_follows = self.lookahead(1).is_some_and(|next| {
            next.kind == TokenKind::LParen
                && self
                    .lookahead(0)
                    .is_some_and(|token| token.span.end_offset == next.span.start_offset)
        });
        if self.is_local(name) && !paren_follows {
            let leaf = self.bump_leaf()?;
            return self.builder.reduce(Reduction::VarRef(leaf));
        }
        self.method_call(None, None)
    }

    /// The message at the cursor and whatever arguments follow it.
    fn method_call(&mut self, receiver: Option<Node>, operator: Option<String>) -> Result<Node, ParseError> {
        let message = self.bump_leaf()?;
        if self.at(TokenKind::LParen) && self.adjacent() {
            let arguments = self.arg_paren()?;
            return self.builder.reduce(Reduction::Call {
                receiver,
                operator,
                message,
                arguments: Some(arguments),
            });
        }
        if self.command_args_follow() {
            let parts = self.with_context(ParseContext::NO_DO, Self::call_args)?;
            let arguments = self.builder.reduce(Reduction::Args(parts))?;
            return self.builder.reduce(Reduction::Command {
                receiver,
                operator,
                message,
                arguments,
            });
        }
        if receiver.is_none() && matches!(message.kind, NodeKind::Ident(_)) {
            return self.builder.reduce(Reduction::VCall(message));
        }
        self.builder.reduce(Reduction::Call {
            receiver,
            operator,
            message,
            arguments: None,
        })
    }

    /// Whether the next token, separated by whitespace, starts the
    /// argument list of a parenthesis-free call (`puts x`, `foo *args`).
    fn command_args_follow(&mut self) -> bool {
        let prev_end = self.prev_end;
        let Some(token) = self.lookahead(0) else {
            return false;
        };
        if token.span.start_offset == prev_end {
            return false;
        }
        match token.kind {
            TokenKind::Int
            | TokenKind::Float
            | TokenKind::Ident
            | TokenKind::Const
            | TokenKind::IVar
            | TokenKind::CVar
            | TokenKind::GVar
            | TokenKind::TStringBeg
            | TokenKind::HeredocBeg
            | TokenKind::SymBeg
            | TokenKind::Label
            | TokenKind::TLambda
            | TokenKind::LBracket
            | TokenKind::LParen => true,
            TokenKind::Kw => {
                VALUE_KEYWORDS.contains(&token.text.as_str())
                    || matches!(token.text.as_str(), "not" | "defined?" | "super" | "def")
            }
            TokenKind::Op => {
                matches!(token.text.as_str(), "*" | "**" | "&" | "::" | "!" | "~")
                    && self
                        .lookahead(1)
                        .is_some_and(|next| next.span.start_offset == token.span.end_offset)
            }
            _ => false,
        }
    }

    // --- Postfix chains ---

    fn postfix(&mut self, mut node: Node) -> Result<Node, ParseError> {
        loop {
            let Some(token) = self.peek() else {
                break;
            };
            let (kind, text) = (token.kind, token.text.clone());
            node = match kind {
                TokenKind::Period => {
                    self.bump()?;
                    self.skip_newlines()?;
                    match self.peek_kind() {
                        Some(TokenKind::Ident | TokenKind::Const | TokenKind::Kw | TokenKind::Op) => {
                            self.method_call(Some(node), Some(text))?
                        }
                        _ => return Err(self.unexpected_here("a method name")),
                    }
                }
                TokenKind::Op if text == "::" => {
                    self.bump()?;
                    let constant_path = self.at(TokenKind::Const)
                        && !self
                            .lookahead(1)
                            .is_some_and(|next| next.kind == TokenKind::LParen);
                    if constant_path {
                        let constant = self.bump_leaf()?;
                        self.builder.reduce(Reduction::ConstPathRef {
                            parent: node,
                            constant,
                        })?
                    } else if matches!(self.peek_kind(), Some(TokenKind::Ident | TokenKind::Const)) {
                        self.method_call(Some(node), Some(text))?
                    } else {
                        return Err(self.unexpected_here("a constant or method name"));
                    }
                }
                TokenKind::LBracket if self.adjacent() => {
                    self.bump()?;
                    self.without_context(ParseContext::ALL, |parser| {
                        parser.skip_newlines()?;
                        let index = if parser.at(TokenKind::RBracket) {
                            None
                        } else {
                            let parts = parser.call_args()?;
                            parser.skip_newlines()?;
                            Some(parts)
                        };
                        parser.expect(TokenKind::RBracket, "`]`")?;
                        let index = match index {
                            Some(parts) => Some(parser.builder.reduce(Reduction::Args(parts))?),
                            None => None,
                        };
                        parser.builder.reduce(Reduction::ARef {
                            collection: node,
                            index,
                        })
                    })?
                }
                TokenKind::LBrace if matches!(node.kind, NodeKind::Call { .. } | NodeKind::VCall { .. }) => {
                    let block = self.brace_block()?;
                    self.add_block(node, block)?
                }
                TokenKind::Kw
                    if text == "do"
                        && !self.context.has(ParseContext::NO_DO)
                        && matches!(
                            node.kind,
                            NodeKind::Call { .. } | NodeKind::VCall { .. } | NodeKind::Command { .. }
                        ) =>
                {
                    let block = self.do_block()?;
                    self.add_block(node, block)?
                }
                _ => break,
            };
        }
        Ok(node)
    }

    /// A bare name gains a block: it is a call, not a `VCall`.
    fn add_block(&mut self, call: Node, block: Node) -> Result<Node, ParseError> {
        let call = if matches!(call.kind, NodeKind::VCall { .. }) {
            let NodeKind::VCall { value } = call.into_kind() else {
                return Err(self.unexpected_here("a method call"));
            };
            self.builder.reduce(Reduction::Call {
                receiver: None,
                operator: None,
                message: *value,
                arguments: None,
            })?
        } else {
            call
        };
        self.builder.reduce(Reduction::MethodAddBlock { call, block })
    }

    // --- Arguments ---

    /// Comma-separated call arguments. Trailing `key: value` pairs are
    /// grouped into a `BareAssocHash` where they appear.
    pub(super) fn call_args(&mut self) -> Result<Vec<Node>, ParseError> {
        let mut parts = Vec::new();
        let mut assocs = Vec::new();
        loop {
            let Some(token) = self.peek() else {
                return Err(self.eof("an argument"));
            };
            let (kind, text) = (token.kind, token.text.clone());
            match (kind, text.as_str()) {
                (TokenKind::Op, "*") => {
                    self.bump()?;
                    let value = self.optional_arg()?;
                    self.flush_assocs(&mut assocs, &mut parts)?;
                    parts.push(self.builder.reduce(Reduction::ArgStar(value))?);
                }
                (TokenKind::Op, "&") => {
                    self.bump()?;
                    let value = self.optional_arg()?;
                    self.flush_assocs(&mut assocs, &mut parts)?;
                    parts.push(self.builder.reduce(Reduction::ArgBlock(value))?);
                }
                (TokenKind::Op, "**") => {
                    self.bump()?;
                    let value = self.optional_arg()?;
                    assocs.push(self.builder.reduce(Reduction::AssocSplat(value))?);
                }
                (TokenKind::Label, _) => {
                    let key = self.bump_leaf()?;
                    let value = self.optional_arg()?;
                    assocs.push(self.builder.reduce(Reduction::Assoc { key, value })?);
                }
                _ => {
                    let value = self.arg()?;
                    if self.at_op("=>") {
                        self.bump()?;
                        self.skip_newlines()?;
                        let pair = self.arg()?;
                        assocs.push(self.builder.reduce(Reduction::Assoc {
                            key: value,
                            value: Some(pair),
                        })?);
                    } else {
                        self.flush_assocs(&mut assocs, &mut parts)?;
                        parts.push(value);
                    }
                }
            }

            if !self.at(TokenKind::Comma) {
                break;
            }
            self.bump()?;
            self.skip_newlines()?;
            if self.at_arg_end() {
                break;
            }
        }
        self.flush_assocs(&mut assocs, &mut parts)?;
        Ok(parts)
    }

    fn flush_assocs(&mut self, assocs: &mut Vec<Node>, parts: &mut Vec<Node>) -> Result<(), ParseError> {
        if !assocs.is_empty() {
            let assocs = std::mem::take(assocs);
            parts.push(self.builder.reduce(Reduction::BareAssocHash(assocs))?);
        }
        Ok(())
    }

    fn at_arg_end(&mut self) -> bool {
        match self.peek() {
            None => true,
            Some(token) => match token.kind {
                TokenKind::Comma
                | TokenKind::RParen
                | TokenKind::RBracket
                | TokenKind::RBrace
                | TokenKind::Newline
                | TokenKind::Semicolon
                | TokenKind::EmbExprEnd => true,
                TokenKind::Kw => matches!(
                    token.text.as_str(),
                    "do" | "end" | "if" | "unless" | "while" | "until" | "rescue" | "and" | "or" | "then"
                ),
                TokenKind::Op => token.text == "|" || token.text == "=>",
                _ => false,
            },
        }
    }

    /// The operand of `*`, `&`, `**` or a label, which may be left out.
    fn optional_arg(&mut self) -> Result<Option<Node>, ParseError> {
        if self.at_arg_end() {
            return Ok(None);
        }
        self.arg().map(Some)
    }

    /// `(args)` right after a method name.
    pub(super) fn arg_paren(&mut self) -> Result<Node, ParseError> {
        self.expect(TokenKind::LParen, "`(`")?;
        self.without_context(ParseContext::ALL, |parser| {
            parser.skip_newlines()?;
            if parser.at(TokenKind::RParen) {
                parser.bump()?;
                return parser.builder.reduce(Reduction::ArgParen(None));
            }
            let parts = parser.call_args()?;
            parser.skip_newlines()?;
            parser.expect(TokenKind::RParen, "`)`")?;
            let arguments = parser.builder.reduce(Reduction::Args(parts))?;
            parser.builder.reduce(Reduction::ArgParen(Some(arguments)))
        })
    }

    // --- Blocks ---

    fn brace_block(&mut self) -> Result<Node, ParseError> {
        self.bump()?;
        self.scoped(true, |parser| {
            let block_var = parser.block_var()?;
            let statements = parser.statements()?;
            parser.expect(TokenKind::RBrace, "`}`")?;
            parser.builder.reduce(Reduction::BraceBlock {
                block_var,
                statements,
            })
        })
    }

    fn do_block(&mut self) -> Result<Node, ParseError> {
        self.bump()?;
        self.scoped(true, |parser| {
            let block_var = parser.block_var()?;
            let bodystmt = parser.body_statement()?;
            parser.builder.reduce(Reduction::DoBlock { block_var, bodystmt })
        })
    }

    // --- Literals ---

    fn string(&mut self) -> Result<Node, ParseError> {
        self.bump()?;
        let mut parts = Vec::new();
        loop {
            match self.peek_kind() {
                Some(TokenKind::TStringContent) => parts.push(self.bump_leaf()?),
                Some(TokenKind::EmbExprBeg) => {
                    self.bump()?;
                    let statements = self.statements()?;
                    self.expect(TokenKind::EmbExprEnd, "`}`")?;
                    parts.push(self.builder.reduce(Reduction::StringEmbExpr(statements))?);
                }
                Some(TokenKind::TStringEnd) => {
                    self.bump()?;
                    break;
                }
                Some(_) => return Err(self.unexpected_here("the end of the string")),
                None => return Err(self.eof("the end of the string")),
            }
        }
        self.builder.reduce(Reduction::StringLiteral(parts))
    }

    /// `<<~EOS` with the body the lexer emits right behind it. Adjacency
    /// after the heredoc is judged from the opener, not the body.
    fn heredoc(&mut self) -> Result<Node, ParseError> {
        self.bump()?;
        let opener_end = self.prev_end;
        let mut parts = Vec::new();
        if self.at(TokenKind::TStringContent) {
            parts.push(self.bump_leaf()?);
        }
        self.expect(TokenKind::HeredocEnd, "a heredoc terminator")?;
        self.prev_end = opener_end;
        self.builder.reduce(Reduction::StringLiteral(parts))
    }

    fn symbol(&mut self) -> Result<Node, ParseError> {
        self.bump()?;
        match self.peek_kind() {
            Some(
                TokenKind::Ident
                | TokenKind::Const
                | TokenKind::IVar
                | TokenKind::CVar
                | TokenKind::GVar
                | TokenKind::Kw
                | TokenKind::Op,
            ) => {
                let value = self.bump_leaf()?;
                self.builder.reduce(Reduction::SymbolLiteral(value))
            }
            _ => Err(self.unexpected_here("a symbol name")),
        }
    }

    fn array(&mut self) -> Result<Node, ParseError> {
        self.bump()?;
        self.without_context(ParseContext::ALL, |parser| {
            parser.skip_newlines()?;
            if parser.at(TokenKind::RBracket) {
                parser.bump()?;
                return parser.builder.reduce(Reduction::ArrayLiteral(None));
            }
            let parts = parser.call_args()?;
            parser.skip_newlines()?;
            parser.expect(TokenKind::RBracket, "`]`")?;
            let contents = parser.builder.reduce(Reduction::Args(parts))?;
            parser.builder.reduce(Reduction::ArrayLiteral(Some(contents)))
        })
    }

    fn hash(&mut self) -> Result<Node, ParseError> {
        self.bump()?;
        self.without_context(ParseContext::ALL, |parser| {
            let mut assocs = Vec::new();
            parser.skip_newlines()?;
            while !parser.at(TokenKind::RBrace) {
                assocs.push(parser.hash_entry()?);
                parser.skip_newlines()?;
                if !parser.at(TokenKind::Comma) {
                    break;
                }
                parser.bump()?;
                parser.skip_newlines()?;
            }
            parser.expect(TokenKind::RBrace, "`}`")?;
            parser.builder.reduce(Reduction::HashLiteral(assocs))
        })
    }

    fn hash_entry(&mut self) -> Result<Node, ParseError> {
        if self.at(TokenKind::Label) {
            let key = self.bump_leaf()?;
            let value = self.optional_arg()?;
            return self.builder.reduce(Reduction::Assoc { key, value });
        }
        if self.at_op("**") {
            self.bump()?;
            let value = self.arg()?;
            return self.builder.reduce(Reduction::AssocSplat(Some(value)));
        }
        let key = self.arg()?;
        self.skip_newlines()?;
        self.expect_op("=>")?;
        self.skip_newlines()?;
        let value = self.arg()?;
        self.builder.reduce(Reduction::Assoc {
            key,
            value: Some(value),
        })
    }

    /// `(statements)` or `()`.
    fn paren_expr(&mut self) -> Result<Node, ParseError> {
        self.bump()?;
        self.without_context(ParseContext::ALL, |parser| {
            parser.skip_terms()?;
            if parser.at(TokenKind::RParen) {
                parser.bump()?;
                return parser.builder.reduce(Reduction::Paren(None));
            }
            let statements = parser.statements()?;
            parser.expect(TokenKind::RParen, "`)`")?;
            parser.builder.reduce(Reduction::Paren(Some(statements)))
        })
    }
}
