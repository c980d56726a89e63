use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_single_line() {
    let index = LineIndex::new("hello world");
    assert_eq!(index.line_count(), 1);
    assert_eq!(index.offset(1, 5), 5);
    assert_eq!(index.position(5), Position::new(1, 5, 5));
}

#[test]
fn test_multiple_lines() {
    let source = "line1\nline2\nline3";
    let index = LineIndex::new(source);
    assert_eq!(index.line_count(), 3);
    assert_eq!(index.position(0), Position::new(1, 0, 0));
    assert_eq!(index.position(5), Position::new(1, 5, 5)); // '\n' after line1
    assert_eq!(index.position(6), Position::new(2, 6, 0));
    assert_eq!(index.position(14), Position::new(3, 14, 2));
    assert_eq!(index.offset(3, 2), 14);
}

#[test]
fn test_line_start() {
    let index = LineIndex::new("a\nbb\nccc");
    assert_eq!(index.line_start(0), None);
    assert_eq!(index.line_start(1), Some(0));
    assert_eq!(index.line_start(2), Some(2));
    assert_eq!(index.line_start(3), Some(5));
    assert_eq!(index.line_start(4), None);
}

#[test]
fn test_line_range() {
    let source = "a\nbb\nccc";
    let index = LineIndex::new(source);
    assert_eq!(index.line_range(source, 2), Some(2..4));
    assert_eq!(index.line_range(source, 3), Some(5..8));
    assert_eq!(index.line_range(source, 9), None);
}

#[test]
fn test_trailing_newline_opens_a_line() {
    let index = LineIndex::new("end\n");
    assert_eq!(index.line_count(), 2);
    assert_eq!(index.position(4), Position::new(2, 4, 0));
}

#[test]
fn test_clamps_past_end() {
    let index = LineIndex::new("ab");
    assert_eq!(index.offset(5, 0), 2);
    assert_eq!(index.offset(1, 10), 2);
    assert_eq!(index.position(99), Position::new(1, 2, 2));
}

#[test]
fn test_columns_are_bytes() {
    // Greek letters are 2 bytes each.
    let index = LineIndex::new("αβ = 1");
    assert_eq!(index.position(4).column, 4);
}
