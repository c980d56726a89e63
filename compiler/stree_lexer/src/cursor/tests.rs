use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_reads_past_end_are_zero() {
    let cursor = Cursor::new("a");
    assert_eq!(cursor.current(), b'a');
    assert_eq!(cursor.peek(), 0);
    assert_eq!(cursor.peek2(), 0);
    assert_eq!(cursor.prev(), 0);
}

#[test]
fn test_eat_while_and_slice() {
    let mut cursor = Cursor::new("foo_bar baz");
    cursor.eat_while(is_ident_continue);
    assert_eq!(cursor.pos(), 7);
    assert_eq!(cursor.slice_from(0), "foo_bar");
    assert_eq!(cursor.prev(), b'r');
    assert!(cursor.starts_with(" baz"));
}

#[test]
fn test_eat_until_newline() {
    let mut cursor = Cursor::new("# hi\nx");
    cursor.eat_until_newline_or_eof();
    assert_eq!(cursor.pos(), 4);
    assert_eq!(cursor.current(), b'\n');

    let mut last = Cursor::new("# hi");
    last.eat_until_newline_or_eof();
    assert!(last.is_eof());
}

#[test]
fn test_next_line_start() {
    let cursor = Cursor::at("ab\ncd\n", 1);
    assert_eq!(cursor.next_line_start(), Some(3));
    assert_eq!(Cursor::at("ab", 0).next_line_start(), None);
}

#[test]
fn test_advance_char_multibyte() {
    let mut cursor = Cursor::new("αx");
    cursor.advance_char();
    assert_eq!(cursor.current(), b'x');
}
