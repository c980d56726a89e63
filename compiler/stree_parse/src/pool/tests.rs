use pretty_assertions::assert_eq;
use stree_ir::{Position, Span, Token, TokenKind};

use super::{TokenPool, TokenQuery};

fn span(start: u32, end: u32) -> Span {
    Span::new(Position::new(1, start, start), Position::new(1, end, end))
}

fn kw(text: &str, start: u32) -> Token {
    let end = start + u32::try_from(text.len()).unwrap_or(0);
    Token::new(TokenKind::Kw, text, span(start, end))
}

/// `module A class B end end` as a token stream.
fn nested() -> TokenPool {
    let mut pool = TokenPool::new();
    pool.push(kw("module", 0));
    pool.push(kw("class", 9));
    pool.push(kw("end", 17));
    pool.push(kw("end", 21));
    pool
}

#[test]
fn test_claim_is_last_in_first_out() {
    let mut pool = nested();
    let inner = pool.claim(&TokenQuery::kw("end")).unwrap();
    assert_eq!(inner.span.start_offset, 21);
    let outer = pool.claim(&TokenQuery::kw("end")).unwrap();
    assert_eq!(outer.span.start_offset, 17);
    assert!(pool.claim(&TokenQuery::kw("end")).is_err());
    assert_eq!(pool.len(), 2);
}

#[test]
fn test_find_does_not_remove() {
    let pool = nested();
    let found = pool.find(&TokenQuery::kw("class")).unwrap();
    assert_eq!(found.span.start_offset, 9);
    assert_eq!(pool.len(), 4);
}

#[test]
fn test_within_skips_later_tokens() {
    let mut pool = nested();
    let token = pool.claim(&TokenQuery::kw("end").within(9..20)).unwrap();
    assert_eq!(token.span.start_offset, 17);
}

#[test]
fn test_within_stops_before_lower_bound() {
    let pool = nested();
    assert!(pool.find(&TokenQuery::kw("module").within(5..30)).is_none());
    assert!(pool.find(&TokenQuery::kw("module").before(6)).is_some());
}

#[test]
fn test_token_must_lie_entirely_within_range() {
    let pool = nested();
    // `class` spans 9..14
    assert!(pool.find(&TokenQuery::kw("class").within(9..13)).is_none());
    assert!(pool.find(&TokenQuery::kw("class").within(9..14)).is_some());
}

#[test]
fn test_kind_query_ignores_text() {
    let mut pool = TokenPool::new();
    pool.push(Token::new(TokenKind::LParen, "(", span(3, 4)));
    pool.push(Token::new(TokenKind::RParen, ")", span(5, 6)));
    let token = pool.claim(&TokenQuery::kind(TokenKind::LParen)).unwrap();
    assert_eq!(token.text, "(");
}

#[test]
fn test_claim_at_exact_span() {
    let mut pool = nested();
    assert!(pool.claim_at(span(17, 19)).is_err());
    let token = pool.claim_at(span(17, 20)).unwrap();
    assert!(token.is_keyword("end"));
    assert_eq!(pool.last_claimed().map(|t| t.span.start_offset), Some(17));
}

#[test]
fn test_missing_token_error() {
    let mut pool = nested();
    let err = pool.claim(&TokenQuery::kw("then")).unwrap_err();
    assert_eq!(err.to_string(), "expected `then` not found");
    let err = pool.claim(&TokenQuery::kind(TokenKind::RBrace)).unwrap_err();
    assert_eq!(err.to_string(), "expected rbrace not found");
    assert!(pool.last_claimed().is_none());
}

#[test]
fn test_into_remaining_keeps_order() {
    let mut pool = nested();
    pool.claim(&TokenQuery::kw("class")).unwrap();
    let rest: Vec<u32> = pool
        .into_remaining()
        .iter()
        .map(|token| token.span.start_offset)
        .collect();
    assert_eq!(rest, vec![0, 17, 21]);
}
