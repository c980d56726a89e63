//! Stree IR - the data model of the source-accurate syntax tree.
//!
//! This crate contains the value types shared by the lexer, the parser and
//! every downstream consumer:
//! - `Position` and `Span` for exact source locations
//! - `Token` and `TokenKind` for lexical units
//! - `Comment` with its inline/leading/trailing classification
//! - `Node` and `NodeKind`, the closed set of tree constructs
//!
//! # Design Philosophy
//!
//! - **Spans are values**: a `Span` is `Copy` and never shared; widening or
//!   correcting a node's span overwrites the field on the owned node.
//! - **Closed construct set**: every construct is one `NodeKind` variant, so a
//!   missing case in a traversal is a compile error.
//! - **Children in source order**: `Node::child_nodes` always yields children
//!   sorted by span, which the comment attacher relies on for binary search.

mod comment;
mod node;
mod sexp;
mod span;
mod token;

pub use comment::{Comment, CommentKind, Placement};
pub use node::{Node, NodeKind};
pub use span::{Position, Span};
pub use token::{Token, TokenKind};
