use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_as_str_matches_debug() {
    for code in ErrorCode::ALL {
        assert_eq!(code.as_str(), format!("{code:?}"));
    }
}

#[test]
fn test_from_str_round_trip() {
    for code in ErrorCode::ALL {
        assert_eq!(code.as_str().parse::<ErrorCode>(), Ok(*code));
    }
    assert_eq!("e1002".parse::<ErrorCode>(), Ok(ErrorCode::E1002));
    assert_eq!("E9999".parse::<ErrorCode>(), Err(()));
}

#[test]
fn test_classification() {
    assert!(ErrorCode::E0001.is_lexer_error());
    assert!(!ErrorCode::E1003.is_lexer_error());
    assert!(ErrorCode::E1001.is_internal_error());
    assert!(ErrorCode::E1002.is_internal_error());
    assert!(!ErrorCode::E1004.is_internal_error());
}

#[test]
fn test_display() {
    assert_eq!(ErrorCode::E1004.to_string(), "E1004");
    assert_eq!(ErrorCode::E1004.description(), "unexpected end of input");
}
