//! Source-accurate parse layer for stree.
//!
//! Turns the lexer's event stream into a [`Node`] tree whose every span is
//! exact and whose comments are attached to the nearest construct.
//!
//! A grammar engine only reports what it reduces, not where a construct's
//! delimiters are. The [`Builder`] fills that gap: it keeps each shifted
//! delimiter in a [`TokenPool`], and every reduction claims the tokens that
//! bound its construct, innermost first. Comments collected along the way
//! are attached once the tree is complete.
//!
//! # Organization
//!
//! - `pool`: the token pool and its queries
//! - `builder`: per-parse state and one handler per reduction
//! - `comments`: comment collection and attachment
//! - `grammar`: the recursive-descent driver feeding the builder
//!
//! # Example
//!
//! ```
//! let program = stree_parse::parse("x = 1 # one").unwrap();
//! assert_eq!(program.comment_count(), 1);
//! ```

mod builder;
mod comments;
mod error;
mod grammar;
mod pool;
mod reduction;
mod stack;

pub use builder::{Builder, Finished};
pub use comments::{attach_comments, nearest_nodes, CommentCollector, NearestNodes};
pub use error::ParseError;
pub use pool::{TokenNotFound, TokenPool, TokenQuery};
pub use reduction::Reduction;

use stree_ir::Node;
use tracing::debug;

/// Parse a whole source into its `Program` node.
pub fn parse(source: &str) -> Result<Node, ParseError> {
    parse_with_leftovers(source).map(|finished| finished.program)
}

/// Parse a whole source, keeping the pooled tokens no construct claimed.
pub fn parse_with_leftovers(source: &str) -> Result<Finished, ParseError> {
    let result = grammar::parse_source(source);
    if let Err(err) = &result {
        debug!(code = %err.code, line = err.line, column = err.column, "parse failed");
    }
    result
}
