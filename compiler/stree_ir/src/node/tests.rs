use pretty_assertions::assert_eq;

use super::*;
use crate::{Comment, Placement, Position, TokenKind};

fn span(start: u32, end: u32) -> Span {
    Span::new(Position::new(1, start, start), Position::new(1, end, end))
}

fn leaf(kind: fn(String) -> NodeKind, text: &str, start: u32) -> Node {
    Node::new(kind(text.to_string()), span(start, start + text.len() as u32))
}

/// `x = 1`
fn assign() -> Node {
    let target = Node::new(
        NodeKind::VarField {
            value: Box::new(leaf(NodeKind::Ident, "x", 0)),
        },
        span(0, 1),
    );
    let value = leaf(NodeKind::Int, "1", 4);
    Node::new(
        NodeKind::Assign {
            target: Box::new(target),
            value: Box::new(value),
        },
        span(0, 5),
    )
}

#[test]
fn test_child_nodes_in_source_order() {
    let node = assign();
    let names: Vec<_> = node.child_nodes().iter().map(|c| c.kind.name()).collect();
    assert_eq!(names, vec!["var_field", "int"]);
}

#[test]
fn test_child_nodes_skip_absent_options() {
    let node = Node::new(
        NodeKind::Call {
            receiver: None,
            operator: None,
            message: Box::new(leaf(NodeKind::Ident, "foo", 0)),
            arguments: None,
        },
        span(0, 3),
    );
    assert_eq!(node.child_nodes().len(), 1);
}

#[test]
fn test_params_children_flatten_pairs() {
    let params = Node::new(
        NodeKind::Params {
            requireds: vec![leaf(NodeKind::Ident, "a", 0)],
            optionals: vec![(leaf(NodeKind::Ident, "b", 3), leaf(NodeKind::Int, "1", 7))],
            rest: None,
            keywords: vec![(leaf(NodeKind::Label, "c:", 10), None)],
            keyword_rest: None,
            block: None,
        },
        span(0, 12),
    );
    let texts: Vec<_> = params
        .child_nodes()
        .iter()
        .filter_map(|c| c.leaf_text())
        .collect();
    assert_eq!(texts, vec!["a", "b", "1", "c:"]);
    assert!(!params.is_empty_params());
}

#[test]
fn test_child_nodes_mut_patches_span() {
    let mut node = assign();
    for child in node.child_nodes_mut() {
        child.span = span(2, 2);
    }
    assert!(node.child_nodes().iter().all(|c| c.span == span(2, 2)));
}

#[test]
fn test_heredoc_payload_is_not_a_child() {
    let opener = Token::new(TokenKind::HeredocBeg, "<<~EOS", span(0, 6));
    let node = Node::new(
        NodeKind::Heredoc {
            beginning: opener,
            parts: vec![leaf(NodeKind::TStringContent, "hi\n", 7)],
            ending: None,
        },
        span(0, 6),
    );
    assert!(node.child_nodes().is_empty());
}

#[test]
fn test_walk_is_preorder() {
    let node = assign();
    let mut names = Vec::new();
    node.walk(&mut |n| names.push(n.kind.name()));
    assert_eq!(names, vec!["assign", "var_field", "ident", "int"]);
}

#[test]
fn test_comment_count() {
    let mut node = assign();
    node.comments.push(Comment::line("# a", true, span(6, 9)));
    if let Some(child) = node.child_nodes_mut().into_iter().next() {
        child.comments.push(Comment::line("# b", false, span(10, 13)));
    }
    assert_eq!(node.comment_count(), 2);
}

#[test]
fn test_sexp_dump() {
    let mut node = assign();
    let mut comment = Comment::line("# hi", true, span(6, 10));
    comment.set_placement(Placement::Trailing);
    node.comments.push(comment);
    assert_eq!(
        node.sexp(),
        "(assign 1:0-1:5 #trailing \"# hi\"\n  (var_field 1:0-1:1\n    (ident \"x\" 1:0-1:1))\n  (int \"1\" 1:4-1:5))"
    );
}

#[test]
fn test_void_stmt() {
    let node = Node::new(NodeKind::VoidStmt, span(3, 3));
    assert!(node.is_void_stmt());
    assert_eq!(node.leaf_text(), None);
    assert_eq!(node.sexp(), "(void_stmt 1:3-1:3)");
}

/// `((((1))))` nested `depth` times.
fn nested_parens(depth: usize) -> Node {
    let mut node = leaf(NodeKind::Int, "1", 0);
    for _ in 0..depth {
        node = Node::new(
            NodeKind::Paren {
                contents: Some(Box::new(node)),
            },
            span(0, 1),
        );
    }
    node
}

#[test]
fn test_deep_tree_walks_and_drops() {
    let node = nested_parens(200_000);
    let mut count = 0;
    node.walk(&mut |_| count += 1);
    assert_eq!(count, 200_001);
    assert_eq!(node.comment_count(), 0);
    drop(node);
}

#[test]
fn test_into_kind() {
    let kind = assign().into_kind();
    let NodeKind::Assign { target, value } = kind else {
        panic!("expected an assignment");
    };
    assert_eq!(target.kind.name(), "var_field");
    assert_eq!(value.leaf_text(), Some("1"));
}
