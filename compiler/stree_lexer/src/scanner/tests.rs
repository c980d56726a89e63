use pretty_assertions::assert_eq;
use stree_ir::{Position, TokenKind};

use crate::{lex, tokens, LexErrorKind, LexEvent};

fn scan(source: &str) -> Vec<(TokenKind, String)> {
    tokens(source)
        .unwrap()
        .into_iter()
        .map(|t| (t.kind, t.text))
        .collect()
}

fn tok(kind: TokenKind, text: &str) -> (TokenKind, String) {
    (kind, text.to_string())
}

use TokenKind::*;

#[test]
fn test_newlines_end_statements() {
    assert_eq!(
        scan("if x\n  y\nend"),
        vec![
            tok(Kw, "if"),
            tok(Ident, "x"),
            tok(Newline, "\n"),
            tok(Ident, "y"),
            tok(Newline, "\n"),
            tok(Kw, "end"),
        ]
    );
}

#[test]
fn test_negative_number_in_value_position() {
    assert_eq!(
        scan("x = -1 + y"),
        vec![
            tok(Ident, "x"),
            tok(Op, "="),
            tok(Int, "-1"),
            tok(Op, "+"),
            tok(Ident, "y"),
        ]
    );
}

#[test]
fn test_keyword_after_dot_is_identifier() {
    assert_eq!(
        scan("foo.end"),
        vec![tok(Ident, "foo"), tok(Period, "."), tok(Ident, "end")]
    );
}

#[test]
fn test_singleton_def_keeps_self() {
    assert_eq!(
        scan("def self.end; end"),
        vec![
            tok(Kw, "def"),
            tok(Kw, "self"),
            tok(Period, "."),
            tok(Ident, "end"),
            tok(Semicolon, ";"),
            tok(Kw, "end"),
        ]
    );
}

#[test]
fn test_operator_method_name() {
    assert_eq!(
        scan("def ==(other)"),
        vec![
            tok(Kw, "def"),
            tok(Op, "=="),
            tok(LParen, "("),
            tok(Ident, "other"),
            tok(RParen, ")"),
        ]
    );
}

#[test]
fn test_hash_labels_and_symbols() {
    assert_eq!(
        scan("{ a: 1, :b => c }"),
        vec![
            tok(LBrace, "{"),
            tok(Label, "a:"),
            tok(Int, "1"),
            tok(Comma, ","),
            tok(SymBeg, ":"),
            tok(Ident, "b"),
            tok(Op, "=>"),
            tok(Ident, "c"),
            tok(RBrace, "}"),
        ]
    );
}

#[test]
fn test_ternary_colon_is_operator() {
    assert_eq!(
        scan("a ? b : c"),
        vec![
            tok(Ident, "a"),
            tok(Op, "?"),
            tok(Ident, "b"),
            tok(Op, ":"),
            tok(Ident, "c"),
        ]
    );
}

#[test]
fn test_symbol_of_keyword_stays_keyword() {
    assert_eq!(scan(":if"), vec![tok(SymBeg, ":"), tok(Kw, "if")]);
}

#[test]
fn test_string_interpolation() {
    assert_eq!(
        scan("\"a#{b}c\""),
        vec![
            tok(TStringBeg, "\""),
            tok(TStringContent, "a"),
            tok(EmbExprBeg, "#{"),
            tok(Ident, "b"),
            tok(EmbExprEnd, "}"),
            tok(TStringContent, "c"),
            tok(TStringEnd, "\""),
        ]
    );
}

#[test]
fn test_single_quotes_do_not_interpolate() {
    assert_eq!(
        scan("'#{x}'"),
        vec![
            tok(TStringBeg, "'"),
            tok(TStringContent, "#{x}"),
            tok(TStringEnd, "'"),
        ]
    );
}

#[test]
fn test_heredoc_body_follows_opener() {
    assert_eq!(
        scan("foo(<<~EOS, 1)\n  hi\nEOS\nbar"),
        vec![
            tok(Ident, "foo"),
            tok(LParen, "("),
            tok(HeredocBeg, "<<~EOS"),
            tok(TStringContent, "  hi\n"),
            tok(HeredocEnd, "EOS\n"),
            tok(Comma, ","),
            tok(Int, "1"),
            tok(RParen, ")"),
            tok(Newline, "\n"),
            tok(Ident, "bar"),
        ]
    );
}

#[test]
fn test_shift_is_not_heredoc() {
    assert_eq!(
        scan("class << self\nend"),
        vec![
            tok(Kw, "class"),
            tok(Op, "<<"),
            tok(Kw, "self"),
            tok(Newline, "\n"),
            tok(Kw, "end"),
        ]
    );
}

#[test]
fn test_lambda_brace() {
    assert_eq!(
        scan("->(a) { a }"),
        vec![
            tok(TLambda, "->"),
            tok(LParen, "("),
            tok(Ident, "a"),
            tok(RParen, ")"),
            tok(TLamBeg, "{"),
            tok(Ident, "a"),
            tok(RBrace, "}"),
        ]
    );
}

#[test]
fn test_block_pipes() {
    assert_eq!(
        scan("foo do |x| end"),
        vec![
            tok(Ident, "foo"),
            tok(Kw, "do"),
            tok(Op, "|"),
            tok(Ident, "x"),
            tok(Op, "|"),
            tok(Kw, "end"),
        ]
    );
}

#[test]
fn test_newline_ignored_after_comma() {
    assert_eq!(
        scan("foo(1,\n  2)"),
        vec![
            tok(Ident, "foo"),
            tok(LParen, "("),
            tok(Int, "1"),
            tok(Comma, ","),
            tok(Int, "2"),
            tok(RParen, ")"),
        ]
    );
}

#[test]
fn test_leading_dot_continues_chain() {
    assert_eq!(
        scan("a = b\n  .c"),
        vec![
            tok(Ident, "a"),
            tok(Op, "="),
            tok(Ident, "b"),
            tok(Period, "."),
            tok(Ident, "c"),
        ]
    );
}

#[test]
fn test_return_newline_ends_statement() {
    assert_eq!(
        scan("return\nfoo"),
        vec![tok(Kw, "return"), tok(Newline, "\n"), tok(Ident, "foo")]
    );
}

#[test]
fn test_variables_and_numbers() {
    assert_eq!(
        scan("@a + @@b + $c - 1.5e3 + 0x1F"),
        vec![
            tok(IVar, "@a"),
            tok(Op, "+"),
            tok(CVar, "@@b"),
            tok(Op, "+"),
            tok(GVar, "$c"),
            tok(Op, "-"),
            tok(Float, "1.5e3"),
            tok(Op, "+"),
            tok(Int, "0x1F"),
        ]
    );
}

#[test]
fn test_predicate_and_bang_methods() {
    assert_eq!(
        scan("x.empty? != y.save!"),
        vec![
            tok(Ident, "x"),
            tok(Period, "."),
            tok(Ident, "empty?"),
            tok(Op, "!="),
            tok(Ident, "y"),
            tok(Period, "."),
            tok(Ident, "save!"),
        ]
    );
}

#[test]
fn test_comment_event() {
    let events = lex("x = 1 # hi\n").unwrap();
    let comment = events
        .iter()
        .find_map(|e| match e {
            LexEvent::Comment { text, span } => Some((text.clone(), span.start_offset, span.end_offset)),
            _ => None,
        })
        .unwrap();
    assert_eq!(comment, ("# hi".to_string(), 6, 10));
    assert!(matches!(events.last(), Some(LexEvent::Token(t)) if t.kind == Newline));
}

#[test]
fn test_embdoc_event() {
    let events = lex("=begin\ndoc\n=end\nx").unwrap();
    match &events[0] {
        LexEvent::EmbDoc { text, span } => {
            assert_eq!(text, "=begin\ndoc\n=end");
            assert_eq!(span.end_offset, 15);
            assert_eq!(span.end_line, 3);
        }
        other => panic!("expected embdoc, got {other:?}"),
    }
    assert_eq!(events.len(), 2);
}

#[test]
fn test_end_marker_stops_scanning() {
    assert_eq!(
        scan("x\n__END__\njunk \" here"),
        vec![tok(Ident, "x"), tok(Newline, "\n")]
    );
}

#[test]
fn test_spans_carry_line_and_column() {
    let tokens = tokens("x\n  y").unwrap();
    let y = &tokens[2];
    assert_eq!(y.text, "y");
    assert_eq!(y.span.start(), Position::new(2, 4, 2));
    assert_eq!(y.span.end(), Position::new(2, 5, 3));
}

#[test]
fn test_unterminated_string() {
    let error = lex("x = \"abc").unwrap_err();
    assert_eq!(error.kind, LexErrorKind::UnterminatedString);
    assert_eq!(error.position, Position::new(1, 4, 4));
}

#[test]
fn test_unterminated_heredoc() {
    let error = lex("x = <<~EOS\nbody\n").unwrap_err();
    assert_eq!(error.kind, LexErrorKind::UnterminatedHeredoc("EOS".into()));
}

#[test]
fn test_invalid_char() {
    let error = lex("x = `ls`").unwrap_err();
    assert_eq!(error.kind, LexErrorKind::InvalidChar('`'));
}
