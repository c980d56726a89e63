use pretty_assertions::assert_eq;
use stree_ir::{CommentKind, Position, Span};

use super::{is_inline, CommentCollector};

fn span(start: u32, end: u32) -> Span {
    Span::new(Position::new(1, start, start), Position::new(1, end, end))
}

#[test]
fn test_inline_after_code() {
    assert!(is_inline("x = 1 # hi", 6));
    assert!(is_inline("foo(\t# args", 5));
}

#[test]
fn test_standalone_at_line_start() {
    assert!(!is_inline("# doc\ndef foo\nend", 0));
    assert!(!is_inline("x\n   # note", 5));
    assert!(!is_inline("x\r\n# note", 3));
}

#[test]
fn test_standalone_after_blank_prefix_at_file_start() {
    assert!(!is_inline("  # hi", 2));
}

#[test]
fn test_collect_classifies() {
    let source = "x = 1 # hi\n# doc";
    let mut collector = CommentCollector::new();
    collector.collect("# hi", span(6, 10), source);
    collector.collect("# doc", span(11, 16), source);
    assert_eq!(collector.len(), 2);

    let comments = collector.drain_sorted();
    assert!(comments[0].inline);
    assert!(!comments[1].inline);
    assert!(collector.is_empty());
}

#[test]
fn test_drain_sorted_orders_by_offset() {
    let mut collector = CommentCollector::new();
    collector.collect_embdoc("=begin\n=end", span(20, 31));
    collector.collect("# first", span(0, 7), "# first");
    let texts: Vec<_> = collector
        .drain_sorted()
        .into_iter()
        .map(|comment| (comment.text, comment.kind))
        .collect();
    assert_eq!(
        texts,
        vec![
            ("# first".to_string(), CommentKind::Line),
            ("=begin\n=end".to_string(), CommentKind::EmbDoc),
        ]
    );
}
