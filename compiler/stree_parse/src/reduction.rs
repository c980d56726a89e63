//! Reduction events.
//!
//! A reduction hands the builder the children of a completed grammar rule.
//! The delimiters of the construct are not part of the event: they were
//! shifted earlier and wait in the token pool until the reduction claims
//! them.
//!
//! Children arrive already reduced, so every `Node` here has a final kind
//! and at least a provisional span.

use stree_ir::Node;

/// One grammar reduction. See `Builder::reduce`.
#[derive(Clone, Debug)]
pub enum Reduction {
    // --- Statement lists and bodies ---
    /// Empty statement at the current position.
    VoidStmt,
    /// A non-empty list of statements.
    Statements(Vec<Node>),
    BodyStmt {
        statements: Node,
        rescue: Option<Node>,
        /// Statements after `else`; the keyword is claimed by this reduction.
        else_statements: Option<Node>,
        ensure: Option<Node>,
    },
    Begin(Node),
    Rescue {
        exceptions: Option<Node>,
        variable: Option<Node>,
        statements: Node,
        consequent: Option<Node>,
    },
    RescueMod {
        statement: Node,
        value: Node,
    },
    Ensure(Node),
    Else(Node),

    // --- Control flow ---
    If {
        predicate: Node,
        statements: Node,
        consequent: Option<Node>,
    },
    Unless {
        predicate: Node,
        statements: Node,
        consequent: Option<Node>,
    },
    Elsif {
        predicate: Node,
        statements: Node,
        consequent: Option<Node>,
    },
    IfOp {
        predicate: Node,
        truthy: Node,
        falsy: Node,
    },
    IfMod {
        statement: Node,
        predicate: Node,
    },
    UnlessMod {
        statement: Node,
        predicate: Node,
    },
    WhileMod {
        statement: Node,
        predicate: Node,
    },
    UntilMod {
        statement: Node,
        predicate: Node,
    },
    While {
        predicate: Node,
        statements: Node,
    },
    Until {
        predicate: Node,
        statements: Node,
    },
    For {
        index: Node,
        collection: Node,
        statements: Node,
    },
    Case {
        value: Option<Node>,
        consequent: Node,
    },
    When {
        arguments: Node,
        statements: Node,
        consequent: Option<Node>,
    },

    // --- Definitions ---
    Def {
        target: Option<Node>,
        name: Node,
        params: Option<Node>,
        bodystmt: Node,
    },
    /// `def name(params) = value`
    DefEndless {
        target: Option<Node>,
        name: Node,
        params: Option<Node>,
        value: Node,
    },
    Class {
        constant: Node,
        superclass: Option<Node>,
        bodystmt: Node,
    },
    Module {
        constant: Node,
        bodystmt: Node,
    },
    SClass {
        target: Node,
        bodystmt: Node,
    },
    ConstRef(Node),
    ConstPathRef {
        parent: Node,
        constant: Node,
    },
    TopConstRef(Node),

    // --- Variables and expressions ---
    VarRef(Node),
    VarField(Node),
    VCall(Node),
    Assign {
        target: Node,
        value: Node,
    },
    OpAssign {
        target: Node,
        operator: Node,
        value: Node,
    },
    Binary {
        left: Node,
        operator: String,
        right: Node,
    },
    Unary {
        operator: String,
        operand: Node,
    },
    Not {
        operand: Option<Node>,
        parentheses: bool,
    },

    // --- Calls ---
    Call {
        receiver: Option<Node>,
        operator: Option<String>,
        message: Node,
        arguments: Option<Node>,
    },
    Command {
        receiver: Option<Node>,
        operator: Option<String>,
        message: Node,
        arguments: Node,
    },
    ARef {
        collection: Node,
        index: Option<Node>,
    },
    ArgParen(Option<Node>),
    Args(Vec<Node>),
    ArgStar(Option<Node>),
    ArgBlock(Option<Node>),
    BareAssocHash(Vec<Node>),
    Assoc {
        key: Node,
        value: Option<Node>,
    },
    AssocSplat(Option<Node>),
    MethodAddBlock {
        call: Node,
        block: Node,
    },

    // --- Blocks and parameters ---
    BraceBlock {
        block_var: Option<Node>,
        statements: Node,
    },
    DoBlock {
        block_var: Option<Node>,
        bodystmt: Node,
    },
    BlockVar {
        params: Node,
        locals: Vec<Node>,
    },
    Params {
        requireds: Vec<Node>,
        optionals: Vec<(Node, Node)>,
        rest: Option<Node>,
        keywords: Vec<(Node, Option<Node>)>,
        keyword_rest: Option<Node>,
        block: Option<Node>,
    },
    RestParam(Option<Node>),
    KwRestParam(Option<Node>),
    BlockArg(Option<Node>),
    Paren(Option<Node>),
    Lambda {
        params: Node,
        statements: Node,
    },

    // --- Literals ---
    ArrayLiteral(Option<Node>),
    HashLiteral(Vec<Node>),
    StringLiteral(Vec<Node>),
    StringEmbExpr(Node),
    SymbolLiteral(Node),

    // --- Jumps ---
    Return(Option<Node>),
    Break(Option<Node>),
    Next(Option<Node>),
    Yield(Option<Node>),
    Redo,
    Retry,
}

impl Reduction {
    /// Snake-case name of the rule, for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Reduction::VoidStmt => "void_stmt",
            Reduction::Statements(_) => "statements",
            Reduction::BodyStmt { .. } => "bodystmt",
            Reduction::Begin(_) => "begin",
            Reduction::Rescue { .. } => "rescue",
            Reduction::RescueMod { .. } => "rescue_mod",
            Reduction::Ensure(_) => "ensure",
            Reduction::Else(_) => "else",
            Reduction::If { .. } => "if",
            Reduction::Unless { .. } => "unless",
            Reduction::Elsif { .. } => "elsif",
            Reduction::IfOp { .. } => "if_op",
            Reduction::IfMod { .. } => "if_mod",
            Reduction::UnlessMod { .. } => "unless_mod",
            Reduction::WhileMod { .. } => "while_mod",
            Reduction::UntilMod { .. } => "until_mod",
            Reduction::While { .. } => "while",
            Reduction::Until { .. } => "until",
            Reduction::For { .. } => "for",
            Reduction::Case { .. } => "case",
            Reduction::When { .. } => "when",
            Reduction::Def { .. } => "def",
            Reduction::DefEndless { .. } => "def_endless",
            Reduction::Class { .. } => "class",
            Reduction::Module { .. } => "module",
            Reduction::SClass { .. } => "sclass",
            Reduction::ConstRef(_) => "const_ref",
            Reduction::ConstPathRef { .. } => "const_path_ref",
            Reduction::TopConstRef(_) => "top_const_ref",
            Reduction::VarRef(_) => "var_ref",
            Reduction::VarField(_) => "var_field",
            Reduction::VCall(_) => "vcall",
            Reduction::Assign { .. } => "assign",
            Reduction::OpAssign { .. } => "opassign",
            Reduction::Binary { .. } => "binary",
            Reduction::Unary { .. } => "unary",
            Reduction::Not { .. } => "not",
            Reduction::Call { .. } => "call",
            Reduction::Command { .. } => "command",
            Reduction::ARef { .. } => "aref",
            Reduction::ArgParen(_) => "arg_paren",
            Reduction::Args(_) => "args",
            Reduction::ArgStar(_) => "arg_star",
            Reduction::ArgBlock(_) => "arg_block",
            Reduction::BareAssocHash(_) => "bare_assoc_hash",
            Reduction::Assoc { .. } => "assoc",
            Reduction::AssocSplat(_) => "assoc_splat",
            Reduction::MethodAddBlock { .. } => "method_add_block",
            Reduction::BraceBlock { .. } => "brace_block",
            Reduction::DoBlock { .. } => "do_block",
            Reduction::BlockVar { .. } => "block_var",
            Reduction::Params { .. } => "params",
            Reduction::RestParam(_) => "rest_param",
            Reduction::KwRestParam(_) => "kwrest_param",
            Reduction::BlockArg(_) => "blockarg",
            Reduction::Paren(_) => "paren",
            Reduction::Lambda { .. } => "lambda",
            Reduction::ArrayLiteral(_) => "array",
            Reduction::HashLiteral(_) => "hash",
            Reduction::StringLiteral(_) => "string_literal",
            Reduction::StringEmbExpr(_) => "string_embexpr",
            Reduction::SymbolLiteral(_) => "symbol_literal",
            Reduction::Return(_) => "return",
            Reduction::Break(_) => "break",
            Reduction::Next(_) => "next",
            Reduction::Yield(_) => "yield",
            Reduction::Redo => "redo",
            Reduction::Retry => "retry",
        }
    }
}
