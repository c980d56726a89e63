use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_display_includes_position() {
    let error = LexError::new(
        LexErrorKind::UnterminatedHeredoc("EOS".into()),
        Position::new(3, 20, 0),
    );
    assert_eq!(error.to_string(), "can't find heredoc terminator `EOS` at 3:0");
}

#[test]
fn test_invalid_char_message() {
    let error = LexError::new(LexErrorKind::InvalidChar('\u{1}'), Position::START);
    assert_eq!(error.to_string(), "invalid character `\u{1}` at 1:0");
}
