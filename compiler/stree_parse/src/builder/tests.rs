use pretty_assertions::assert_eq;
use stree_diagnostic::ErrorCode;
use stree_ir::{Node, NodeKind, Position, Span, Token, TokenKind};

use super::{error_location, Builder};
use crate::reduction::Reduction;

fn leaf(builder: &mut Builder<'_>, kind: TokenKind, text: &str, line: u32, column: u32) -> Node {
    let token = builder.on_token(kind, text, line, column);
    Builder::leaf(&token)
}

#[test]
fn test_empty_def_body_is_a_point_after_the_name() {
    let mut builder = Builder::new("def foo\nend");
    builder.on_token(TokenKind::Kw, "def", 1, 0);
    let name = leaf(&mut builder, TokenKind::Ident, "foo", 1, 4);
    builder.on_token(TokenKind::Newline, "\n", 1, 7);
    let void = builder.reduce(Reduction::VoidStmt).unwrap();
    assert_eq!(void.span.to_string(), "2:0-2:0");

    let statements = builder.reduce(Reduction::Statements(vec![void])).unwrap();
    let bodystmt = builder
        .reduce(Reduction::BodyStmt {
            statements,
            rescue: None,
            else_statements: None,
            ensure: None,
        })
        .unwrap();
    builder.on_token(TokenKind::Kw, "end", 2, 0);
    let def = builder
        .reduce(Reduction::Def {
            target: None,
            name,
            params: None,
            bodystmt,
        })
        .unwrap();
    assert_eq!(def.span.to_string(), "1:0-2:3");

    let NodeKind::Def { params, bodystmt, .. } = &def.kind else {
        panic!("expected a def");
    };
    assert_eq!(params.span.to_string(), "1:7-1:7");
    assert_eq!(bodystmt.span.to_string(), "1:7-2:0");
    let NodeKind::BodyStmt { statements, .. } = &bodystmt.kind else {
        panic!("expected a bodystmt");
    };
    let NodeKind::Statements { body } = &statements.kind else {
        panic!("expected statements");
    };
    assert_eq!(body[0].span.to_string(), "1:7-1:7");
    assert!(builder.pool().is_empty());
}

#[test]
fn test_missing_delimiter_points_at_construct() {
    let mut builder = Builder::new("x = 1");
    leaf(&mut builder, TokenKind::Ident, "x", 1, 0);
    builder.on_token(TokenKind::Op, "=", 1, 2);
    let one = leaf(&mut builder, TokenKind::Int, "1", 1, 4);
    let args = builder.reduce(Reduction::Args(vec![one])).unwrap();

    let error = builder
        .reduce(Reduction::ArrayLiteral(Some(args)))
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::E1001);
    assert_eq!(error.position(), (1, 4));
}

#[test]
fn test_missing_delimiter_without_construct_points_at_cursor() {
    let mut builder = Builder::new("foo\n");
    leaf(&mut builder, TokenKind::Ident, "foo", 1, 0);

    let error = builder.reduce(Reduction::Redo).unwrap_err();
    assert_eq!(error.code, ErrorCode::E1001);
    assert_eq!(error.position(), (1, 3));
}

#[test]
fn test_missing_delimiter_before_any_token_points_at_start() {
    let mut builder = Builder::new("redo");
    let error = builder.reduce(Reduction::Retry).unwrap_err();
    assert_eq!(error.code, ErrorCode::E1001);
    assert_eq!(error.position(), (1, 0));
}

#[test]
fn test_error_location_fallbacks() {
    let construct = Span::new(Position::new(2, 10, 4), Position::new(2, 12, 6));
    let cursor = Position::new(3, 20, 1);
    let claimed = Token::new(
        TokenKind::Kw,
        "end",
        Span::new(Position::new(4, 30, 2), Position::new(4, 33, 5)),
    );

    assert_eq!(
        error_location(Some(construct), Some(cursor), Some(&claimed)),
        construct.start()
    );
    assert_eq!(error_location(None, Some(cursor), Some(&claimed)), cursor);
    assert_eq!(
        error_location(None, None, Some(&claimed)),
        Position::new(4, 30, 2)
    );
    assert_eq!(error_location(None, None, None), Position::START);
}

#[test]
fn test_nested_delimiters_claim_innermost_first() {
    let mut builder = Builder::new("[[1]]");
    builder.on_token(TokenKind::LBracket, "[", 1, 0);
    builder.on_token(TokenKind::LBracket, "[", 1, 1);
    let one = leaf(&mut builder, TokenKind::Int, "1", 1, 2);
    builder.on_token(TokenKind::RBracket, "]", 1, 3);
    let args = builder.reduce(Reduction::Args(vec![one])).unwrap();
    let inner = builder.reduce(Reduction::ArrayLiteral(Some(args))).unwrap();
    assert_eq!(inner.span.to_string(), "1:1-1:4");

    builder.on_token(TokenKind::RBracket, "]", 1, 4);
    let args = builder.reduce(Reduction::Args(vec![inner])).unwrap();
    let outer = builder.reduce(Reduction::ArrayLiteral(Some(args))).unwrap();
    assert_eq!(outer.span.to_string(), "1:0-1:5");
    assert!(builder.pool().is_empty());
}

#[test]
fn test_heredoc_reduces_to_its_opener() {
    let source = "<<~A\n  x\nA\n";
    let mut builder = Builder::new(source);
    builder.on_token(TokenKind::HeredocBeg, "<<~A", 1, 0);
    let body = leaf(&mut builder, TokenKind::TStringContent, "  x\n", 2, 0);
    builder.on_token(TokenKind::HeredocEnd, "A\n", 3, 0);

    // The body does not move the cursor past the opener.
    let void = builder.reduce(Reduction::VoidStmt).unwrap();
    assert_eq!(void.span.start(), Position::new(1, 4, 4));

    let heredoc = builder.reduce(Reduction::StringLiteral(vec![body])).unwrap();
    assert_eq!(heredoc.span.to_string(), "1:0-1:4");
    let NodeKind::Heredoc { ending, parts, .. } = &heredoc.kind else {
        panic!("expected a heredoc");
    };
    assert_eq!(parts.len(), 1);
    assert_eq!(ending.as_ref().map(|token| token.text.as_str()), Some("A\n"));
}

#[test]
fn test_quoted_string_after_heredoc_is_plain() {
    let source = "<<~A\nA\n\"b\"";
    let mut builder = Builder::new(source);
    builder.on_token(TokenKind::HeredocBeg, "<<~A", 1, 0);
    builder.on_token(TokenKind::HeredocEnd, "A\n", 2, 0);
    let heredoc = builder.reduce(Reduction::StringLiteral(Vec::new())).unwrap();
    assert_eq!(heredoc.kind.name(), "heredoc");

    builder.on_token(TokenKind::TStringBeg, "\"", 3, 0);
    let content = leaf(&mut builder, TokenKind::TStringContent, "b", 3, 1);
    builder.on_token(TokenKind::TStringEnd, "\"", 3, 2);
    let string = builder.reduce(Reduction::StringLiteral(vec![content])).unwrap();
    assert_eq!(string.kind.name(), "string_literal");
    assert_eq!(string.span.to_string(), "3:0-3:3");
}

#[test]
fn test_next_statement_start() {
    let builder = Builder::new("if x # note\n  y\nend");
    assert_eq!(builder.next_statement_start(4), 11);

    let builder = Builder::new("def a; b; end");
    assert_eq!(builder.next_statement_start(5), 5);

    let builder = Builder::new("begin x");
    assert_eq!(builder.next_statement_start(5), 5);
}

#[test]
fn test_bind_statements_pins_leading_void() {
    let builder = Builder::new("begin\n\nend");
    let void = Node::new(NodeKind::VoidStmt, Span::point(Position::new(3, 7, 0)));
    let mut statements = Node::new(NodeKind::Statements { body: vec![void] }, Span::DUMMY);
    builder.bind_statements(&mut statements, 5, 7);
    assert_eq!(statements.span.to_string(), "1:5-3:0");
    let NodeKind::Statements { body } = &statements.kind else {
        panic!("expected statements");
    };
    assert_eq!(body[0].span.to_string(), "1:5-1:5");
}

#[test]
fn test_finish_attaches_pending_comments() {
    let mut builder = Builder::new("x # hi\n");
    let name = leaf(&mut builder, TokenKind::Ident, "x", 1, 0);
    builder.on_comment("# hi", 1, 2);
    builder.on_token(TokenKind::Newline, "\n", 1, 6);
    assert_eq!(builder.pending_comments(), 1);

    let vcall = builder.reduce(Reduction::VCall(name)).unwrap();
    let statements = builder.reduce(Reduction::Statements(vec![vcall])).unwrap();
    let finished = builder.finish(statements).unwrap();
    assert_eq!(finished.program.comment_count(), 1);
    assert_eq!(finished.program.span.to_string(), "1:0-2:0");
    assert!(finished.unclaimed.is_empty());
}

#[test]
fn test_keyword_leaf_is_claimed_where_it_lands() {
    let mut builder = Builder::new("nil");
    let value = leaf(&mut builder, TokenKind::Kw, "nil", 1, 0);
    assert_eq!(builder.pool().len(), 1);
    let var_ref = builder.reduce(Reduction::VarRef(value)).unwrap();
    assert_eq!(var_ref.kind.name(), "var_ref");
    assert!(builder.pool().is_empty());
}
