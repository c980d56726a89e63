use pretty_assertions::assert_eq;
use stree_diagnostic::ErrorCode;
use stree_ir::{Comment, Node, NodeKind, Placement, Position, Span};

use super::{attach_comments, nearest_nodes, NearestNodes};

fn span(start: u32, end: u32) -> Span {
    Span::new(Position::new(1, start, start), Position::new(1, end, end))
}

fn int(start: u32, end: u32) -> Node {
    Node::new(NodeKind::Int("1".into()), span(start, end))
}

/// `program > statements > [int, int, int]`, spanning 0..30.
fn tree() -> Node {
    let statements = Node::new(
        NodeKind::Statements {
            body: vec![int(0, 2), int(10, 12), int(20, 22)],
        },
        span(0, 30),
    );
    Node::new(
        NodeKind::Program {
            statements: Box::new(statements),
        },
        span(0, 30),
    )
}

#[test]
fn test_nearest_between_children() {
    let nearest = nearest_nodes(&tree(), span(13, 18)).unwrap();
    assert_eq!(
        nearest,
        NearestNodes {
            enclosing: vec![0],
            preceding: Some(1),
            following: Some(2),
        }
    );
}

#[test]
fn test_nearest_before_first_child() {
    let root = Node::new(
        NodeKind::Statements {
            body: vec![int(5, 6), int(8, 9)],
        },
        span(0, 9),
    );
    let nearest = nearest_nodes(&root, span(0, 4)).unwrap();
    assert_eq!(nearest.enclosing, Vec::<usize>::new());
    assert_eq!(nearest.preceding, None);
    assert_eq!(nearest.following, Some(0));
}

#[test]
fn test_nearest_descends_into_container() {
    let inner = Node::new(
        NodeKind::Args {
            parts: vec![int(4, 5), int(12, 13)],
        },
        span(4, 13),
    );
    let root = Node::new(
        NodeKind::Statements {
            body: vec![int(0, 1), inner],
        },
        span(0, 13),
    );
    let nearest = nearest_nodes(&root, span(6, 10)).unwrap();
    assert_eq!(nearest.enclosing, vec![1]);
    assert_eq!(nearest.preceding, Some(0));
    assert_eq!(nearest.following, Some(1));
}

#[test]
fn test_zero_width_child_precedes_comment_at_same_offset() {
    let root = Node::new(
        NodeKind::Statements {
            body: vec![Node::new(NodeKind::VoidStmt, span(7, 7))],
        },
        span(7, 14),
    );
    let nearest = nearest_nodes(&root, span(7, 12)).unwrap();
    assert_eq!(nearest.preceding, Some(0));
    assert_eq!(nearest.following, None);
}

#[test]
fn test_overlap_is_an_error() {
    let err = nearest_nodes(&tree(), span(11, 15)).unwrap_err();
    assert_eq!(err.code, ErrorCode::E1002);
}

#[test]
fn test_inline_prefers_preceding() {
    let mut root = tree();
    let comments = vec![Comment::line("# a", true, span(13, 16))];
    attach_comments(&mut root, comments).unwrap();

    let statements = root.child_nodes()[0];
    let second = statements.child_nodes()[1];
    assert_eq!(second.comments.len(), 1);
    assert_eq!(second.comments[0].placement(), Placement::Trailing);
}

#[test]
fn test_standalone_prefers_following() {
    let mut root = tree();
    let comments = vec![Comment::line("# a", false, span(13, 16))];
    attach_comments(&mut root, comments).unwrap();

    let statements = root.child_nodes()[0];
    let third = statements.child_nodes()[2];
    assert_eq!(third.comments.len(), 1);
    assert!(third.comments[0].is_leading());
}

#[test]
fn test_falls_back_to_enclosing_node() {
    let mut root = Node::new(
        NodeKind::Statements {
            body: vec![Node::new(NodeKind::Args { parts: vec![] }, span(0, 10))],
        },
        span(0, 10),
    );
    let comments = vec![Comment::line("# lonely", true, span(2, 8))];
    attach_comments(&mut root, comments).unwrap();

    let args = root.child_nodes()[0];
    assert_eq!(args.comments.len(), 1);
    assert_eq!(args.comments[0].placement(), Placement::Neither);
}

#[test]
fn test_falls_back_to_root() {
    let mut root = Node::new(NodeKind::Statements { body: vec![] }, span(0, 5));
    attach_comments(&mut root, vec![Comment::line("# x", false, span(0, 3))]).unwrap();
    assert_eq!(root.comments.len(), 1);
}

#[test]
fn test_comments_keep_source_order_on_one_node() {
    let mut root = tree();
    let comments = vec![
        Comment::line("# one", false, span(3, 5)),
        Comment::line("# two", false, span(6, 8)),
    ];
    attach_comments(&mut root, comments).unwrap();
    let statements = root.child_nodes()[0];
    let texts: Vec<_> = statements.child_nodes()[1]
        .comments
        .iter()
        .map(|comment| comment.text.as_str())
        .collect();
    assert_eq!(texts, vec!["# one", "# two"]);
}

#[test]
fn test_empty_backlog_changes_nothing() {
    let mut root = tree();
    attach_comments(&mut root, vec![Comment::line("# a", true, span(13, 16))]).unwrap();
    let before = root.clone();
    attach_comments(&mut root, Vec::new()).unwrap();
    assert_eq!(root, before);
}
