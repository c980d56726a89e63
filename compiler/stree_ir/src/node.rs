//! Syntax tree nodes.
//!
//! A `Node` is a span, a construct (`NodeKind`) and the comments attached to
//! it. Children are owned; a node's span always contains the spans of its
//! children, and `child_nodes` yields them in source order.

use smallvec::SmallVec;

use crate::{Comment, Span, Token};

/// A syntax tree node.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
    /// Comments attached by the comment attacher, in source order.
    pub comments: Vec<Comment>,
}

/// The closed set of constructs.
///
/// Tokens stored inside a variant (`keyword`, heredoc markers) are claimed
/// delimiters kept for round-trip fidelity; they are not children. A block's
/// opening `{`/`do` is a leaf child so a comment on its line can trail it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum NodeKind {
    // --- Leaves ---
    Ident(String),
    Const(String),
    IVar(String),
    CVar(String),
    GVar(String),
    Int(String),
    Float(String),
    Label(String),
    Kw(String),
    Op(String),
    TStringContent(String),

    // --- Statement lists and bodies ---
    Program {
        statements: Box<Node>,
    },
    Statements {
        body: Vec<Node>,
    },
    /// Placeholder for a syntactically empty body.
    VoidStmt,
    BodyStmt {
        statements: Box<Node>,
        rescue: Option<Box<Node>>,
        else_clause: Option<Box<Node>>,
        ensure: Option<Box<Node>>,
    },
    Begin {
        bodystmt: Box<Node>,
    },
    Rescue {
        exception: Option<Box<Node>>,
        statements: Box<Node>,
        consequent: Option<Box<Node>>,
    },
    /// The `Foo, Bar => e` part of a rescue clause.
    RescueEx {
        exceptions: Option<Box<Node>>,
        variable: Option<Box<Node>>,
    },
    RescueMod {
        statement: Box<Node>,
        value: Box<Node>,
    },
    Ensure {
        keyword: Token,
        statements: Box<Node>,
    },
    Else {
        keyword: Token,
        statements: Box<Node>,
    },

    // --- Control flow ---
    If {
        predicate: Box<Node>,
        statements: Box<Node>,
        consequent: Option<Box<Node>>,
    },
    Unless {
        predicate: Box<Node>,
        statements: Box<Node>,
        consequent: Option<Box<Node>>,
    },
    Elsif {
        predicate: Box<Node>,
        statements: Box<Node>,
        consequent: Option<Box<Node>>,
    },
    /// `predicate ? truthy : falsy`
    IfOp {
        predicate: Box<Node>,
        truthy: Box<Node>,
        falsy: Box<Node>,
    },
    IfMod {
        statement: Box<Node>,
        predicate: Box<Node>,
    },
    UnlessMod {
        statement: Box<Node>,
        predicate: Box<Node>,
    },
    WhileMod {
        statement: Box<Node>,
        predicate: Box<Node>,
    },
    UntilMod {
        statement: Box<Node>,
        predicate: Box<Node>,
    },
    While {
        predicate: Box<Node>,
        statements: Box<Node>,
    },
    Until {
        predicate: Box<Node>,
        statements: Box<Node>,
    },
    For {
        index: Box<Node>,
        collection: Box<Node>,
        statements: Box<Node>,
    },
    Case {
        value: Option<Box<Node>>,
        consequent: Box<Node>,
    },
    When {
        arguments: Box<Node>,
        statements: Box<Node>,
        consequent: Option<Box<Node>>,
    },

    // --- Definitions ---
    /// `def name ... end`, `def target.name ... end` or `def name = value`.
    Def {
        target: Option<Box<Node>>,
        name: Box<Node>,
        params: Box<Node>,
        bodystmt: Box<Node>,
    },
    ClassDeclaration {
        constant: Box<Node>,
        superclass: Option<Box<Node>>,
        bodystmt: Box<Node>,
    },
    ModuleDeclaration {
        constant: Box<Node>,
        bodystmt: Box<Node>,
    },
    /// `class << target`
    SClass {
        target: Box<Node>,
        bodystmt: Box<Node>,
    },
    ConstRef {
        constant: Box<Node>,
    },
    ConstPathRef {
        parent: Box<Node>,
        constant: Box<Node>,
    },
    TopConstRef {
        constant: Box<Node>,
    },

    // --- Variables and expressions ---
    VarRef {
        value: Box<Node>,
    },
    VarField {
        value: Box<Node>,
    },
    /// A bare identifier that is not a known local: a call without arguments.
    VCall {
        value: Box<Node>,
    },
    Assign {
        target: Box<Node>,
        value: Box<Node>,
    },
    OpAssign {
        target: Box<Node>,
        operator: Box<Node>,
        value: Box<Node>,
    },
    Binary {
        left: Box<Node>,
        operator: String,
        right: Box<Node>,
    },
    Unary {
        operator: String,
        statement: Box<Node>,
    },
    Not {
        statement: Option<Box<Node>>,
        parentheses: bool,
    },

    // --- Calls ---
    /// `receiver.message(arguments)` or `message(arguments)`.
    Call {
        receiver: Option<Box<Node>>,
        operator: Option<String>,
        message: Box<Node>,
        arguments: Option<Box<Node>>,
    },
    /// `message arguments` or `receiver.message arguments`, no parentheses.
    Command {
        receiver: Option<Box<Node>>,
        operator: Option<String>,
        message: Box<Node>,
        arguments: Box<Node>,
    },
    ARef {
        collection: Box<Node>,
        index: Option<Box<Node>>,
    },
    ArgParen {
        arguments: Option<Box<Node>>,
    },
    Args {
        parts: Vec<Node>,
    },
    ArgStar {
        value: Option<Box<Node>>,
    },
    ArgBlock {
        value: Option<Box<Node>>,
    },
    BareAssocHash {
        assocs: Vec<Node>,
    },
    Assoc {
        key: Box<Node>,
        value: Option<Box<Node>>,
    },
    AssocSplat {
        value: Option<Box<Node>>,
    },
    MethodAddBlock {
        call: Box<Node>,
        block: Box<Node>,
    },

    // --- Blocks and parameters ---
    /// `{ |x| ... }` or `do |x| ... end`.
    Block {
        opening: Box<Node>,
        block_var: Option<Box<Node>>,
        body: Box<Node>,
    },
    BlockVar {
        params: Box<Node>,
        locals: Vec<Node>,
    },
    Params {
        requireds: Vec<Node>,
        optionals: Vec<(Node, Node)>,
        rest: Option<Box<Node>>,
        keywords: Vec<(Node, Option<Node>)>,
        keyword_rest: Option<Box<Node>>,
        block: Option<Box<Node>>,
    },
    RestParam {
        name: Option<Box<Node>>,
    },
    KwRestParam {
        name: Option<Box<Node>>,
    },
    BlockArg {
        name: Option<Box<Node>>,
    },
    Paren {
        contents: Option<Box<Node>>,
    },
    Lambda {
        params: Box<Node>,
        statements: Box<Node>,
    },
    /// Lambda parameters plus the block-local names declared after `;`.
    LambdaVar {
        params: Box<Node>,
        locals: Vec<Node>,
    },

    // --- Literals ---
    ArrayLiteral {
        contents: Option<Box<Node>>,
    },
    HashLiteral {
        assocs: Vec<Node>,
    },
    StringLiteral {
        parts: Vec<Node>,
        quote: String,
    },
    StringEmbExpr {
        statements: Box<Node>,
    },
    /// A heredoc. The span covers only the opener; the body and terminator
    /// come later in the source and are kept as payload, not children.
    Heredoc {
        beginning: Token,
        parts: Vec<Node>,
        ending: Option<Token>,
    },
    SymbolLiteral {
        value: Box<Node>,
    },

    // --- Jumps ---
    Return {
        arguments: Option<Box<Node>>,
    },
    Break {
        arguments: Option<Box<Node>>,
    },
    Next {
        arguments: Option<Box<Node>>,
    },
    Yield {
        arguments: Option<Box<Node>>,
    },
    Redo,
    Retry,
}

/// Expands to one exhaustive match over a `NodeKind` reference that pushes
/// every child onto `$out` in source order. Used for both the shared and the
/// mutable traversal; match ergonomics pick the reference kind.
macro_rules! each_child {
    ($kind:expr, $out:ident) => {
        match $kind {
            NodeKind::Ident(_)
            | NodeKind::Const(_)
            | NodeKind::IVar(_)
            | NodeKind::CVar(_)
            | NodeKind::GVar(_)
            | NodeKind::Int(_)
            | NodeKind::Float(_)
            | NodeKind::Label(_)
            | NodeKind::Kw(_)
            | NodeKind::Op(_)
            | NodeKind::TStringContent(_)
            | NodeKind::VoidStmt
            | NodeKind::Heredoc { .. }
            | NodeKind::Redo
            | NodeKind::Retry => {}
            NodeKind::Program { statements } => $out.push(statements),
            NodeKind::Statements { body } => {
                for node in body {
                    $out.push(node);
                }
            }
            NodeKind::BodyStmt {
                statements,
                rescue,
                else_clause,
                ensure,
            } => {
                $out.push(statements);
                if let Some(node) = rescue {
                    $out.push(node);
                }
                if let Some(node) = else_clause {
                    $out.push(node);
                }
                if let Some(node) = ensure {
                    $out.push(node);
                }
            }
            NodeKind::Begin { bodystmt } => $out.push(bodystmt),
            NodeKind::Rescue {
                exception,
                statements,
                consequent,
            } => {
                if let Some(node) = exception {
                    $out.push(node);
                }
                $out.push(statements);
                if let Some(node) = consequent {
                    $out.push(node);
                }
            }
            NodeKind::RescueEx {
                exceptions,
                variable,
            } => {
                if let Some(node) = exceptions {
                    $out.push(node);
                }
                if let Some(node) = variable {
                    $out.push(node);
                }
            }
            NodeKind::RescueMod { statement, value } => {
                $out.push(statement);
                $out.push(value);
            }
            NodeKind::Ensure { statements, .. } | NodeKind::Else { statements, .. } => {
                $out.push(statements);
            }
            NodeKind::If {
                predicate,
                statements,
                consequent,
            }
            | NodeKind::Unless {
                predicate,
                statements,
                consequent,
            }
            | NodeKind::Elsif {
                predicate,
                statements,
                consequent,
            } => {
                $out.push(predicate);
                $out.push(statements);
                if let Some(node) = consequent {
                    $out.push(node);
                }
            }
            NodeKind::IfOp {
                predicate,
                truthy,
                falsy,
            } => {
                $out.push(predicate);
                $out.push(truthy);
                $out.push(falsy);
            }
            NodeKind::IfMod {
                statement,
                predicate,
            }
            | NodeKind::UnlessMod {
                statement,
                predicate,
            }
            | NodeKind::WhileMod {
                statement,
                predicate,
            }
            | NodeKind::UntilMod {
                statement,
                predicate,
            } => {
                $out.push(statement);
                $out.push(predicate);
            }
            NodeKind::While {
                predicate,
                statements,
            }
            | NodeKind::Until {
                predicate,
                statements,
            } => {
                $out.push(predicate);
                $out.push(statements);
            }
            NodeKind::For {
                index,
                collection,
                statements,
            } => {
                $out.push(index);
                $out.push(collection);
                $out.push(statements);
            }
            NodeKind::Case { value, consequent } => {
                if let Some(node) = value {
                    $out.push(node);
                }
                $out.push(consequent);
            }
            NodeKind::When {
                arguments,
                statements,
                consequent,
            } => {
                $out.push(arguments);
                $out.push(statements);
                if let Some(node) = consequent {
                    $out.push(node);
                }
            }
            NodeKind::Def {
                target,
                name,
                params,
                bodystmt,
            } => {
                if let Some(node) = target {
                    $out.push(node);
                }
                $out.push(name);
                $out.push(params);
                $out.push(bodystmt);
            }
            NodeKind::ClassDeclaration {
                constant,
                superclass,
                bodystmt,
            } => {
                $out.push(constant);
                if let Some(node) = superclass {
                    $out.push(node);
                }
                $out.push(bodystmt);
            }
            NodeKind::ModuleDeclaration { constant, bodystmt } => {
                $out.push(constant);
                $out.push(bodystmt);
            }
            NodeKind::SClass { target, bodystmt } => {
                $out.push(target);
                $out.push(bodystmt);
            }
            NodeKind::ConstRef { constant } | NodeKind::TopConstRef { constant } => {
                $out.push(constant);
            }
            NodeKind::ConstPathRef { parent, constant } => {
                $out.push(parent);
                $out.push(constant);
            }
            NodeKind::VarRef { value }
            | NodeKind::VarField { value }
            | NodeKind::VCall { value }
            | NodeKind::SymbolLiteral { value } => $out.push(value),
            NodeKind::Assign { target, value } => {
                $out.push(target);
                $out.push(value);
            }
            NodeKind::OpAssign {
                target,
                operator,
                value,
            } => {
                $out.push(target);
                $out.push(operator);
                $out.push(value);
            }
            NodeKind::Binary { left, right, .. } => {
                $out.push(left);
                $out.push(right);
            }
            NodeKind::Unary { statement, .. } => $out.push(statement),
            NodeKind::Not { statement, .. } => {
                if let Some(node) = statement {
                    $out.push(node);
                }
            }
            NodeKind::Call {
                receiver,
                message,
                arguments,
                ..
            } => {
                if let Some(node) = receiver {
                    $out.push(node);
                }
                $out.push(message);
                if let Some(node) = arguments {
                    $out.push(node);
                }
            }
            NodeKind::Command {
                receiver,
                message,
                arguments,
                ..
            } => {
                if let Some(node) = receiver {
                    $out.push(node);
                }
                $out.push(message);
                $out.push(arguments);
            }
            NodeKind::ARef { collection, index } => {
                $out.push(collection);
                if let Some(node) = index {
                    $out.push(node);
                }
            }
            NodeKind::ArgParen { arguments: child }
            | NodeKind::ArgStar { value: child }
            | NodeKind::ArgBlock { value: child }
            | NodeKind::AssocSplat { value: child }
            | NodeKind::RestParam { name: child }
            | NodeKind::KwRestParam { name: child }
            | NodeKind::BlockArg { name: child }
            | NodeKind::Paren { contents: child }
            | NodeKind::ArrayLiteral { contents: child }
            | NodeKind::Return { arguments: child }
            | NodeKind::Break { arguments: child }
            | NodeKind::Next { arguments: child }
            | NodeKind::Yield { arguments: child } => {
                if let Some(node) = child {
                    $out.push(node);
                }
            }
            NodeKind::Args { parts: nodes }
            | NodeKind::BareAssocHash { assocs: nodes }
            | NodeKind::HashLiteral { assocs: nodes }
            | NodeKind::StringLiteral { parts: nodes, .. } => {
                for node in nodes {
                    $out.push(node);
                }
            }
            NodeKind::Assoc { key, value } => {
                $out.push(key);
                if let Some(node) = value {
                    $out.push(node);
                }
            }
            NodeKind::MethodAddBlock { call, block } => {
                $out.push(call);
                $out.push(block);
            }
            NodeKind::Block {
                opening,
                block_var,
                body,
            } => {
                $out.push(opening);
                if let Some(node) = block_var {
                    $out.push(node);
                }
                $out.push(body);
            }
            NodeKind::BlockVar { params, locals } | NodeKind::LambdaVar { params, locals } => {
                $out.push(params);
                for node in locals {
                    $out.push(node);
                }
            }
            NodeKind::Params {
                requireds,
                optionals,
                rest,
                keywords,
                keyword_rest,
                block,
            } => {
                for node in requireds {
                    $out.push(node);
                }
                for (name, value) in optionals {
                    $out.push(name);
                    $out.push(value);
                }
                if let Some(node) = rest {
                    $out.push(node);
                }
                for (name, value) in keywords {
                    $out.push(name);
                    if let Some(node) = value {
                        $out.push(node);
                    }
                }
                if let Some(node) = keyword_rest {
                    $out.push(node);
                }
                if let Some(node) = block {
                    $out.push(node);
                }
            }
            NodeKind::Lambda { params, statements } => {
                $out.push(params);
                $out.push(statements);
            }
            NodeKind::StringEmbExpr { statements } => $out.push(statements),
        }
    };
}

impl Node {
    /// Create a node with no comments.
    #[inline]
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Node {
            kind,
            span,
            comments: Vec::new(),
        }
    }

    /// Children in source order.
    pub fn child_nodes(&self) -> SmallVec<[&Node; 4]> {
        let mut out: SmallVec<[&Node; 4]> = SmallVec::new();
        each_child!(&self.kind, out);
        out
    }

    /// Mutable children in source order.
    pub fn child_nodes_mut(&mut self) -> SmallVec<[&mut Node; 4]> {
        let mut out: SmallVec<[&mut Node; 4]> = SmallVec::new();
        each_child!(&mut self.kind, out);
        out
    }

    /// Visit this node and every descendant, parents before children.
    /// Iterative, so arbitrarily deep trees do not exhaust the stack.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Node)) {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            f(node);
            stack.extend(node.child_nodes().into_iter().rev());
        }
    }

    /// Take the construct out of this node, dropping the rest.
    pub fn into_kind(mut self) -> NodeKind {
        std::mem::replace(&mut self.kind, NodeKind::VoidStmt)
    }

    /// Move every child that has children of its own out, leaving `VoidStmt`
    /// placeholders behind.
    fn take_children(&mut self, out: &mut Vec<Node>) {
        for child in self.child_nodes_mut() {
            if child.child_nodes().is_empty() {
                continue;
            }
            let placeholder = Node::new(NodeKind::VoidStmt, child.span);
            out.push(std::mem::replace(child, placeholder));
        }
    }

    #[inline]
    pub fn is_void_stmt(&self) -> bool {
        matches!(self.kind, NodeKind::VoidStmt)
    }

    /// Whether this is an empty `Params` list.
    pub fn is_empty_params(&self) -> bool {
        matches!(
            &self.kind,
            NodeKind::Params {
                requireds,
                optionals,
                rest: None,
                keywords,
                keyword_rest: None,
                block: None,
            } if requireds.is_empty() && optionals.is_empty() && keywords.is_empty()
        )
    }

    /// The text of a leaf node.
    pub fn leaf_text(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Ident(text)
            | NodeKind::Const(text)
            | NodeKind::IVar(text)
            | NodeKind::CVar(text)
            | NodeKind::GVar(text)
            | NodeKind::Int(text)
            | NodeKind::Float(text)
            | NodeKind::Label(text)
            | NodeKind::Kw(text)
            | NodeKind::Op(text)
            | NodeKind::TStringContent(text) => Some(text),
            _ => None,
        }
    }

    /// Total number of comments attached anywhere in this subtree.
    pub fn comment_count(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |node| count += node.comments.len());
        count
    }
}

/// Trees as deep as the reducer can build (it grows its own stack) must be
/// freed without recursing once per level.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.take_children(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.take_children(&mut pending);
        }
    }
}

impl NodeKind {
    /// Snake-case construct name, used by the dump.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Ident(_) => "ident",
            NodeKind::Const(_) => "const",
            NodeKind::IVar(_) => "ivar",
            NodeKind::CVar(_) => "cvar",
            NodeKind::GVar(_) => "gvar",
            NodeKind::Int(_) => "int",
            NodeKind::Float(_) => "float",
            NodeKind::Label(_) => "label",
            NodeKind::Kw(_) => "kw",
            NodeKind::Op(_) => "op",
            NodeKind::TStringContent(_) => "tstring_content",
            NodeKind::Program { .. } => "program",
            NodeKind::Statements { .. } => "statements",
            NodeKind::VoidStmt => "void_stmt",
            NodeKind::BodyStmt { .. } => "bodystmt",
            NodeKind::Begin { .. } => "begin",
            NodeKind::Rescue { .. } => "rescue",
            NodeKind::RescueEx { .. } => "rescue_ex",
            NodeKind::RescueMod { .. } => "rescue_mod",
            NodeKind::Ensure { .. } => "ensure",
            NodeKind::Else { .. } => "else",
            NodeKind::If { .. } => "if",
            NodeKind::Unless { .. } => "unless",
            NodeKind::Elsif { .. } => "elsif",
            NodeKind::IfOp { .. } => "if_op",
            NodeKind::IfMod { .. } => "if_mod",
            NodeKind::UnlessMod { .. } => "unless_mod",
            NodeKind::WhileMod { .. } => "while_mod",
            NodeKind::UntilMod { .. } => "until_mod",
            NodeKind::While { .. } => "while",
            NodeKind::Until { .. } => "until",
            NodeKind::For { .. } => "for",
            NodeKind::Case { .. } => "case",
            NodeKind::When { .. } => "when",
            NodeKind::Def { .. } => "def",
            NodeKind::ClassDeclaration { .. } => "class",
            NodeKind::ModuleDeclaration { .. } => "module",
            NodeKind::SClass { .. } => "sclass",
            NodeKind::ConstRef { .. } => "const_ref",
            NodeKind::ConstPathRef { .. } => "const_path_ref",
            NodeKind::TopConstRef { .. } => "top_const_ref",
            NodeKind::VarRef { .. } => "var_ref",
            NodeKind::VarField { .. } => "var_field",
            NodeKind::VCall { .. } => "vcall",
            NodeKind::Assign { .. } => "assign",
            NodeKind::OpAssign { .. } => "opassign",
            NodeKind::Binary { .. } => "binary",
            NodeKind::Unary { .. } => "unary",
            NodeKind::Not { .. } => "not",
            NodeKind::Call { .. } => "call",
            NodeKind::Command { .. } => "command",
            NodeKind::ARef { .. } => "aref",
            NodeKind::ArgParen { .. } => "arg_paren",
            NodeKind::Args { .. } => "args",
            NodeKind::ArgStar { .. } => "arg_star",
            NodeKind::ArgBlock { .. } => "arg_block",
            NodeKind::BareAssocHash { .. } => "bare_assoc_hash",
            NodeKind::Assoc { .. } => "assoc",
            NodeKind::AssocSplat { .. } => "assoc_splat",
            NodeKind::MethodAddBlock { .. } => "method_add_block",
            NodeKind::Block { .. } => "block",
            NodeKind::BlockVar { .. } => "block_var",
            NodeKind::Params { .. } => "params",
            NodeKind::RestParam { .. } => "rest_param",
            NodeKind::KwRestParam { .. } => "kwrest_param",
            NodeKind::BlockArg { .. } => "blockarg",
            NodeKind::Paren { .. } => "paren",
            NodeKind::Lambda { .. } => "lambda",
            NodeKind::LambdaVar { .. } => "lambda_var",
            NodeKind::ArrayLiteral { .. } => "array",
            NodeKind::HashLiteral { .. } => "hash",
            NodeKind::StringLiteral { .. } => "string_literal",
            NodeKind::StringEmbExpr { .. } => "string_embexpr",
            NodeKind::Heredoc { .. } => "heredoc",
            NodeKind::SymbolLiteral { .. } => "symbol_literal",
            NodeKind::Return { .. } => "return",
            NodeKind::Break { .. } => "break",
            NodeKind::Next { .. } => "next",
            NodeKind::Yield { .. } => "yield",
            NodeKind::Redo => "redo",
            NodeKind::Retry => "retry",
        }
    }
}

#[cfg(test)]
mod tests;
