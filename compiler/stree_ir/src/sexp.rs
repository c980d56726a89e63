//! S-expression dump of a tree.
//!
//! One node per line, children indented by two spaces:
//!
//! ```text
//! (program 1:0-1:5
//!   (statements 1:0-1:5
//!     (assign 1:0-1:5
//!       (var_field 1:0-1:1
//!         (ident "x" 1:0-1:1))
//!       (int "1" 1:4-1:5))))
//! ```
//!
//! Attached comments follow the node header as `#trailing "# hi"` (or
//! `#leading`, `#comment`).

use std::fmt::Write;

use crate::{Comment, Node, NodeKind, Placement};

impl Node {
    /// Render this subtree as an indented S-expression.
    pub fn sexp(&self) -> String {
        let mut out = String::new();
        let mut stack = vec![Step::Open(self, 0)];
        while let Some(step) = stack.pop() {
            match step {
                Step::Open(node, depth) => {
                    if depth > 0 {
                        out.push('\n');
                    }
                    write_header(&mut out, node, depth);
                    stack.push(Step::Close);
                    for child in node.child_nodes().into_iter().rev() {
                        stack.push(Step::Open(child, depth + 1));
                    }
                }
                Step::Close => out.push(')'),
            }
        }
        out
    }
}

/// Pending work of the dump. Explicit, so deep trees do not recurse.
enum Step<'a> {
    Open(&'a Node, usize),
    Close,
}

fn write_header(out: &mut String, node: &Node, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
    out.push('(');
    out.push_str(node.kind.name());
    if let Some(text) = node.leaf_text() {
        let _ = write!(out, " {text:?}");
    }
    write_payload(out, &node.kind);
    let _ = write!(out, " {}", node.span);
    for comment in &node.comments {
        write_comment(out, comment);
    }
}

/// Non-child data worth showing: operators and heredoc bodies.
fn write_payload(out: &mut String, kind: &NodeKind) {
    match kind {
        NodeKind::Binary { operator, .. } | NodeKind::Unary { operator, .. } => {
            let _ = write!(out, " {operator:?}");
        }
        NodeKind::Call {
            operator: Some(operator),
            ..
        }
        | NodeKind::Command {
            operator: Some(operator),
            ..
        } => {
            let _ = write!(out, " {operator:?}");
        }
        NodeKind::StringLiteral { quote, .. } => {
            let _ = write!(out, " {quote:?}");
        }
        NodeKind::Heredoc {
            beginning,
            parts,
            ending,
        } => {
            let _ = write!(out, " {:?}", beginning.text);
            for part in parts {
                if let Some(text) = part.leaf_text() {
                    let _ = write!(out, " {text:?}");
                } else {
                    let _ = write!(out, " <{}>", part.kind.name());
                }
            }
            if let Some(ending) = ending {
                let _ = write!(out, " {:?}", ending.text.trim_end());
            }
        }
        NodeKind::Not {
            parentheses: true, ..
        } => out.push_str(" ()"),
        _ => {}
    }
}

fn write_comment(out: &mut String, comment: &Comment) {
    let tag = match comment.placement() {
        Placement::Leading => "leading",
        Placement::Trailing => "trailing",
        Placement::Neither => "comment",
    };
    let _ = write!(out, " #{tag} {:?}", comment.text);
}
