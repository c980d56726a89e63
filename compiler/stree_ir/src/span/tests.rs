use super::*;
use pretty_assertions::assert_eq;

fn span(start: u32, end: u32) -> Span {
    Span::new(Position::new(1, start, start), Position::new(1, end, end))
}

#[test]
fn test_span_basic() {
    let span = span(10, 20);
    assert_eq!(span.len(), 10);
    assert!(!span.is_empty());
    assert_eq!(span.range(), 10..20);
}

#[test]
fn test_span_to_takes_later_end() {
    let merged = span(10, 20).to(span(15, 30));
    assert_eq!(merged.start_offset, 10);
    assert_eq!(merged.end_offset, 30);
}

#[test]
fn test_span_to_never_moves_end_backwards() {
    // Merging with a child that ends earlier keeps the original end.
    let merged = span(0, 30).to(span(5, 10));
    assert_eq!(merged.start_offset, 0);
    assert_eq!(merged.end_offset, 30);
}

#[test]
fn test_span_to_keeps_own_start() {
    // `to` is not a symmetric union: the receiver's start always wins.
    let merged = span(20, 30).to(span(10, 25));
    assert_eq!(merged.start_offset, 20);
    assert_eq!(merged.end_offset, 30);
}

#[test]
fn test_span_contains() {
    let outer = span(10, 20);
    assert!(outer.contains(span(10, 20)));
    assert!(outer.contains(span(12, 15)));
    assert!(outer.contains(span(20, 20)));
    assert!(!outer.contains(span(9, 15)));
    assert!(!outer.contains(span(15, 21)));
}

#[test]
fn test_span_point() {
    let point = Span::point(Position::new(3, 42, 7));
    assert!(point.is_empty());
    assert_eq!(point.len(), 0);
    assert_eq!(point.start(), point.end());
    assert_eq!(point.start_line, 3);
    assert_eq!(point.start_column, 7);
}

#[test]
fn test_span_with_start_and_end() {
    let span = span(10, 20)
        .with_start(Position::new(1, 12, 12))
        .with_end(Position::new(2, 25, 3));
    assert_eq!(span.start_offset, 12);
    assert_eq!(span.end_offset, 25);
    assert_eq!(span.end_line, 2);
    assert_eq!(span.end_column, 3);
}

#[test]
fn test_span_slice() {
    let source = "x = 1 # hi";
    assert_eq!(span(0, 5).slice(source), Some("x = 1"));
    assert_eq!(span(6, 10).slice(source), Some("# hi"));
    assert_eq!(span(6, 40).slice(source), None);
}

#[test]
fn test_span_dummy() {
    assert!(Span::DUMMY.is_empty());
    assert_eq!(Span::DUMMY.start(), Position::START);
}

#[test]
fn test_span_debug_display() {
    let span = Span::new(Position::new(1, 0, 0), Position::new(3, 13, 3));
    assert_eq!(format!("{span}"), "1:0-3:3");
    assert_eq!(format!("{span:?}"), "1:0-3:3 (0..13)");
}
