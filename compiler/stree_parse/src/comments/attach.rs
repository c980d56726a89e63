//! Splicing collected comments into a finished tree.
//!
//! For each comment we descend from the root, binary searching the children
//! of each level, until no child contains the comment. At that level the
//! closest child before the comment and the closest child after it are the
//! candidates; the comment goes to one of them, or to the enclosing node when
//! the level has no children on either side.

use stree_diagnostic::ErrorCode;
use stree_ir::{Comment, Node, Placement, Span};
use tracing::trace;

use crate::ParseError;

/// Result of the descent for one comment.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NearestNodes {
    /// Child indices from the root to the deepest node containing the
    /// comment. Empty when only the root contains it.
    pub enclosing: Vec<usize>,
    /// Index (within the enclosing node's children) of the last child ending
    /// at or before the comment.
    pub preceding: Option<usize>,
    /// Index of the first child starting at or after the comment's end.
    pub following: Option<usize>,
}

/// Locate the neighbours of a comment span.
pub fn nearest_nodes(root: &Node, span: Span) -> Result<NearestNodes, ParseError> {
    let mut node = root;
    let mut enclosing = Vec::new();

    'descend: loop {
        let children = node.child_nodes();
        let mut preceding = None;
        let mut following = None;
        let (mut lo, mut hi) = (0, children.len());

        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let child = children[mid];
            let bounds = child.span;

            if bounds.start_offset <= span.start_offset && span.end_offset <= bounds.end_offset {
                enclosing.push(mid);
                node = child;
                continue 'descend;
            }
            if bounds.end_offset <= span.start_offset {
                preceding = Some(mid);
                lo = mid + 1;
            } else if span.end_offset <= bounds.start_offset {
                following = Some(mid);
                hi = mid;
            } else {
                return Err(ParseError::comment_overlap(span, bounds, child.kind.name()));
            }
        }

        return Ok(NearestNodes {
            enclosing,
            preceding,
            following,
        });
    }
}

/// Attach every comment to its node. Comments must be in source order.
pub fn attach_comments(root: &mut Node, comments: Vec<Comment>) -> Result<(), ParseError> {
    for mut comment in comments {
        let nearest = nearest_nodes(root, comment.span)?;
        let (neighbour, placement) = choose(&nearest, comment.inline);

        let path = nearest.enclosing.iter().copied().chain(neighbour);
        let Some(target) = descend(root, path) else {
            return Err(ParseError::new(
                ErrorCode::E1002,
                format!("no node left to hold comment at {}", comment.span),
                comment.span.start(),
            ));
        };

        trace!(
            target = target.kind.name(),
            placement = ?placement,
            inline = comment.inline,
            "attached comment"
        );
        comment.set_placement(placement);
        target.comments.push(comment);
    }
    Ok(())
}

/// Inline comments describe what is before them on the line; standalone
/// comments describe what comes next.
fn choose(nearest: &NearestNodes, inline: bool) -> (Option<usize>, Placement) {
    let trailing = nearest.preceding.map(|index| (Some(index), Placement::Trailing));
    let leading = nearest.following.map(|index| (Some(index), Placement::Leading));
    let picked = if inline {
        trailing.or(leading)
    } else {
        leading.or(trailing)
    };
    picked.unwrap_or((None, Placement::Neither))
}

fn descend(mut node: &mut Node, path: impl IntoIterator<Item = usize>) -> Option<&mut Node> {
    for index in path {
        node = node.child_nodes_mut().into_iter().nth(index)?;
    }
    Some(node)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests unwrap to fail loudly")]
mod tests;
