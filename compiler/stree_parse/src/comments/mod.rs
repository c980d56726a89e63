//! Comment handling.
//!
//! Comments are gathered on the side while the tree is built
//! ([`CommentCollector`]) and spliced into the finished tree in one pass
//! ([`attach_comments`]).

mod attach;
mod collector;

pub use attach::{attach_comments, nearest_nodes, NearestNodes};
pub use collector::CommentCollector;
