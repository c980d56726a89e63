//! Hand-written scanner producing the lexical event stream.
//!
//! # Design
//!
//! Dispatch is on the current byte. Each arm calls a focused method that
//! advances the cursor and emits zero or more events. Context the grammar
//! would normally feed back to the lexer is approximated with a small state
//! machine ([`State`]): whether a value is expected decides between a
//! negative number and a minus operator, a symbol and a ternary colon, a
//! heredoc and a shift, and whether a newline ends a statement.
//!
//! Strings and interpolations nest, so they are tracked on a mode stack.
//! Heredoc bodies are read as soon as their opener is seen; the rest of the
//! opener line is scanned afterwards and scanning resumes past the last
//! terminator at the end of that line.

use stree_diagnostic::LineIndex;
use stree_ir::{Span, Token, TokenKind};

use crate::cursor::{is_ident_continue, is_ident_start, Cursor};
use crate::heredoc::Opener;
use crate::keywords::{self, KeywordClass};
use crate::{LexError, LexErrorKind, LexEvent};

/// What the scanner expects next.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum State {
    /// Start of an expression. Newlines are insignificant.
    Beg,
    /// A value may follow, but a newline ends the statement.
    Mid,
    /// After a method name: arguments may follow without parentheses.
    Arg,
    /// After a complete value.
    End,
    /// After `def`: a method name follows.
    Fname,
    /// After `.`, `&.` or `::`: a method name follows.
    Dot,
}

impl State {
    fn value_expected(self) -> bool {
        matches!(self, State::Beg | State::Mid)
    }

    fn allows_label(self) -> bool {
        !matches!(self, State::End | State::Dot | State::Fname)
    }
}

impl From<KeywordClass> for State {
    fn from(class: KeywordClass) -> Self {
        match class {
            KeywordClass::Beg => State::Beg,
            KeywordClass::Mid => State::Mid,
            KeywordClass::Arg => State::Arg,
            KeywordClass::End => State::End,
            KeywordClass::Fname => State::Fname,
        }
    }
}

/// Nesting mode.
#[derive(Copy, Clone, Debug)]
enum Mode {
    /// Inside a quoted string.
    Str { quote: u8, interpolate: bool, start: u32 },
    /// Inside `#{ }`, counting unbalanced `{`.
    Interp { braces: u32 },
}

/// Operators, longest first.
const OPERATORS: &[&str] = &[
    "**=", "===", "<=>", "<<=", ">>=", "&&=", "||=", "**", "==", "=~", "=>", "!=", "!~", ">=",
    "<=", "<<", ">>", "&&", "||", "+=", "-=", "*=", "/=", "%=", "|=", "&=", "^=", "+", "-", "*",
    "/", "%", "=", "<", ">", "!", "~", "^", "&", "|", "?",
];

/// Operators that can name a method (`def <=>`, `:+`), longest first.
const METHOD_OPERATORS: &[&str] = &[
    "[]=", "<=>", "===", "[]", "==", "=~", "!=", "!~", "<<", ">>", "<=", ">=", "**", "+@", "-@",
    "!@", "~@", "+", "-", "*", "/", "%", "<", ">", "!", "~", "&", "|", "^",
];

pub(crate) struct Scanner<'a> {
    source: &'a str,
    cursor: Cursor<'a>,
    index: LineIndex,
    events: Vec<LexEvent>,
    state: State,
    modes: Vec<Mode>,
    /// Whitespace separates the previous token from the current one.
    space_before: bool,
    paren_depth: u32,
    /// Paren depth at which a `->` is waiting for its `{`.
    lambda_paren: Option<u32>,
    /// Where scanning continues after the current line, when heredoc bodies
    /// have been read ahead.
    heredoc_resume: Option<u32>,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Scanner {
            source,
            cursor: Cursor::new(source),
            index: LineIndex::new(source),
            events: Vec::new(),
            state: State::Beg,
            modes: Vec::new(),
            space_before: true,
            paren_depth: 0,
            lambda_paren: None,
            heredoc_resume: None,
        }
    }

    pub(crate) fn run(mut self) -> Result<Vec<LexEvent>, LexError> {
        loop {
            if let Some(&Mode::Str {
                quote,
                interpolate,
                start,
            }) = self.modes.last()
            {
                self.string_content(quote, interpolate, start)?;
                continue;
            }
            if self.cursor.is_eof() {
                break;
            }
            self.next_token()?;
        }
        if !self.modes.is_empty() {
            return Err(self.error(LexErrorKind::UnterminatedInterpolation, self.cursor.pos()));
        }
        tracing::trace!(events = self.events.len(), "lexed source");
        Ok(self.events)
    }

    fn next_token(&mut self) -> Result<(), LexError> {
        let start = self.cursor.pos();
        match self.cursor.current() {
            b' ' | b'\t' | b'\r' | b'\x0c' => {
                self.cursor.eat_while(|b| matches!(b, b' ' | b'\t' | b'\r' | b'\x0c'));
                self.space_before = true;
            }
            b'\\' if self.cursor.peek() == b'\n' => {
                self.cursor.advance_n(2);
                self.space_before = true;
            }
            b'\n' => self.newline(start),
            b'#' => self.comment(start),
            b'=' if self.at_line_start() && self.cursor.starts_with("=begin") => {
                self.embdoc(start)?;
            }
            b'_' if self.at_line_start() && self.is_end_marker() => {
                self.cursor.set_pos(self.source_len());
            }
            b if is_ident_start(b) => self.identifier(start),
            b'0'..=b'9' => self.number(start),
            b'"' | b'\'' => self.string_start(start),
            b'@' => self.instance_variable(start)?,
            b'$' => self.global_variable(start)?,
            b':' => self.colon(start),
            b'(' => {
                self.cursor.advance();
                self.paren_depth += 1;
                self.emit(TokenKind::LParen, start, State::Beg);
            }
            b')' => {
                self.cursor.advance();
                self.paren_depth = self.paren_depth.saturating_sub(1);
                self.emit(TokenKind::RParen, start, State::End);
            }
            b'[' if self.state == State::Fname => self.method_operator(start),
            b'[' => {
                self.cursor.advance();
                self.emit(TokenKind::LBracket, start, State::Beg);
            }
            b']' => {
                self.cursor.advance();
                self.emit(TokenKind::RBracket, start, State::End);
            }
            b'{' => self.left_brace(start),
            b'}' => self.right_brace(start),
            b',' => {
                self.cursor.advance();
                self.emit(TokenKind::Comma, start, State::Beg);
            }
            b';' => {
                self.cursor.advance();
                self.emit(TokenKind::Semicolon, start, State::Beg);
            }
            b'.' => self.dot(start),
            b'-' => self.minus(start),
            b'<' => self.less(start)?,
            b'&' if self.cursor.peek() == b'.' => {
                self.cursor.advance_n(2);
                self.emit(TokenKind::Period, start, State::Dot);
            }
            b'=' | b'!' | b'>' | b'+' | b'*' | b'/' | b'%' | b'|' | b'^' | b'~' | b'?' | b'&' => {
                if self.state == State::Fname {
                    self.method_operator(start);
                } else {
                    self.operator(start);
                }
            }
            _ => {
                let c = self.cursor.rest().chars().next().unwrap_or('\0');
                return Err(self.error(LexErrorKind::InvalidChar(c), start));
            }
        }
        Ok(())
    }

    // --- Events ---

    fn span(&self, start: u32, end: u32) -> Span {
        Span::new(self.index.position(start), self.index.position(end))
    }

    fn push_token(&mut self, kind: TokenKind, start: u32, end: u32) {
        let text = self.cursor.slice(start, end);
        let token = Token::new(kind, text, self.span(start, end));
        self.events.push(LexEvent::Token(token));
    }

    /// Emit a token from `start` to the cursor and move to `next`.
    fn emit(&mut self, kind: TokenKind, start: u32, next: State) {
        self.push_token(kind, start, self.cursor.pos());
        self.state = next;
        self.space_before = false;
    }

    #[cold]
    fn error(&self, kind: LexErrorKind, offset: u32) -> LexError {
        LexError::new(kind, self.index.position(offset))
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "lex() rejects sources longer than u32::MAX"
    )]
    fn source_len(&self) -> u32 {
        self.source.len() as u32
    }

    fn at_line_start(&self) -> bool {
        matches!(self.cursor.prev(), 0 | b'\n')
    }

    fn is_end_marker(&self) -> bool {
        let rest = self.cursor.rest();
        rest == "__END__" || rest.starts_with("__END__\n") || rest.starts_with("__END__\r\n")
    }

    // --- Layout ---

    fn newline(&mut self, start: u32) {
        self.cursor.advance();
        let significant = matches!(self.state, State::Mid | State::Arg | State::End)
            && self.modes.is_empty()
            && !self.leading_dot_follows();
        if significant {
            self.push_token(TokenKind::Newline, start, start + 1);
            self.state = State::Beg;
        }
        if let Some(resume) = self.heredoc_resume.take() {
            self.cursor.set_pos(resume);
        }
        self.space_before = true;
    }

    /// The next line continues a method chain (`\n  .map`).
    fn leading_dot_follows(&self) -> bool {
        let mut probe = self.cursor;
        if let Some(resume) = self.heredoc_resume {
            probe.set_pos(resume);
        }
        probe.eat_while(|b| b == b' ' || b == b'\t');
        (probe.current() == b'.' && probe.peek() != b'.')
            || (probe.current() == b'&' && probe.peek() == b'.')
    }

    fn comment(&mut self, start: u32) {
        self.cursor.eat_until_newline_or_eof();
        let end = self.cursor.pos();
        let text = self.cursor.slice(start, end).trim_end_matches('\r').to_string();
        let end = start + u32::try_from(text.len()).unwrap_or(0);
        self.events.push(LexEvent::Comment {
            text,
            span: self.span(start, end),
        });
    }

    /// `=begin` ... `=end`, both at the start of a line.
    fn embdoc(&mut self, start: u32) -> Result<(), LexError> {
        let mut line = start;
        loop {
            self.cursor.set_pos(line);
            let Some(next) = self.cursor.next_line_start() else {
                return Err(self.error(LexErrorKind::UnterminatedEmbDoc, start));
            };
            line = next;
            self.cursor.set_pos(line);
            let rest = self.cursor.rest();
            let terminated = rest
                .strip_prefix("=end")
                .is_some_and(|after| after.is_empty() || after.starts_with(char::is_whitespace));
            if terminated {
                break;
            }
        }
        self.cursor.eat_until_newline_or_eof();
        let end = self.cursor.pos();
        let text = self.cursor.slice(start, end).trim_end_matches('\r').to_string();
        let end = start + u32::try_from(text.len()).unwrap_or(0);
        self.events.push(LexEvent::EmbDoc {
            text,
            span: self.span(start, end),
        });
        if self.cursor.current() == b'\n' {
            self.cursor.advance();
        }
        Ok(())
    }

    // --- Words ---

    fn identifier(&mut self, start: u32) {
        self.cursor.eat_while(is_ident_continue);
        let c = self.cursor.current();
        if (c == b'?' || c == b'!') && self.cursor.peek() != b'=' {
            self.cursor.advance();
        } else if c == b'=' && self.state == State::Fname && !matches!(self.cursor.peek(), b'=' | b'~' | b'>') {
            self.cursor.advance();
        }

        if self.state.allows_label() && self.cursor.current() == b':' && self.cursor.peek() != b':' {
            self.cursor.advance();
            self.emit(TokenKind::Label, start, State::Beg);
            return;
        }

        let text = self.cursor.slice_from(start);
        let is_name_position = match self.state {
            State::Dot => true,
            State::Fname => text != "self",
            _ => false,
        };
        if !is_name_position {
            if let Some(class) = keywords::lookup(text) {
                if text == "do" && self.lambda_paren == Some(self.paren_depth) {
                    self.lambda_paren = None;
                }
                let next = if self.state == State::Fname {
                    self.after_method_name()
                } else {
                    State::from(class)
                };
                self.emit(TokenKind::Kw, start, next);
                return;
            }
        }

        let kind = if text.as_bytes()[0].is_ascii_uppercase() {
            TokenKind::Const
        } else {
            TokenKind::Ident
        };
        let next = match self.state {
            State::Fname => self.after_method_name(),
            _ => State::Arg,
        };
        self.emit(kind, start, next);
    }

    /// After a name in `def` position: `def self.foo` keeps looking for
    /// the method name.
    fn after_method_name(&self) -> State {
        if self.cursor.current() == b'.' {
            State::Fname
        } else {
            State::End
        }
    }

    fn instance_variable(&mut self, start: u32) -> Result<(), LexError> {
        let kind = if self.cursor.peek() == b'@' {
            self.cursor.advance_n(2);
            TokenKind::CVar
        } else {
            self.cursor.advance();
            TokenKind::IVar
        };
        if !is_ident_start(self.cursor.current()) {
            return Err(self.error(LexErrorKind::InvalidChar('@'), start));
        }
        self.cursor.eat_while(is_ident_continue);
        self.emit(kind, start, State::End);
        Ok(())
    }

    fn global_variable(&mut self, start: u32) -> Result<(), LexError> {
        self.cursor.advance();
        match self.cursor.current() {
            b if is_ident_start(b) => self.cursor.eat_while(is_ident_continue),
            b'0'..=b'9' => self.cursor.eat_while(|b| b.is_ascii_digit()),
            b'!' | b'@' | b'&' | b'~' | b'*' | b'$' | b'?' | b':' | b'\\' | b'/' | b';'
            | b',' | b'.' | b'=' | b'<' | b'>' | b'"' | b'\'' => self.cursor.advance(),
            _ => return Err(self.error(LexErrorKind::InvalidChar('$'), start)),
        }
        self.emit(TokenKind::GVar, start, State::End);
        Ok(())
    }

    // --- Literals ---

    fn number(&mut self, start: u32) {
        let mut kind = TokenKind::Int;
        if self.cursor.current() == b'-' {
            self.cursor.advance();
        }
        if self.cursor.current() == b'0' && matches!(self.cursor.peek(), b'x' | b'X' | b'b' | b'B' | b'o' | b'O') {
            self.cursor.advance_n(2);
            self.cursor.eat_while(|b| b.is_ascii_alphanumeric() || b == b'_');
        } else {
            self.cursor.eat_while(|b| b.is_ascii_digit() || b == b'_');
            if self.cursor.current() == b'.' && self.cursor.peek().is_ascii_digit() {
                kind = TokenKind::Float;
                self.cursor.advance();
                self.cursor.eat_while(|b| b.is_ascii_digit() || b == b'_');
            }
            let exponent = matches!(self.cursor.current(), b'e' | b'E')
                && (self.cursor.peek().is_ascii_digit()
                    || (matches!(self.cursor.peek(), b'+' | b'-') && self.cursor.peek2().is_ascii_digit()));
            if exponent {
                kind = TokenKind::Float;
                self.cursor.advance_n(2);
                self.cursor.eat_while(|b| b.is_ascii_digit() || b == b'_');
            }
        }
        self.emit(kind, start, State::End);
    }

    fn string_start(&mut self, start: u32) {
        let quote = self.cursor.current();
        self.cursor.advance();
        self.emit(TokenKind::TStringBeg, start, State::Beg);
        self.modes.push(Mode::Str {
            quote,
            interpolate: quote == b'"',
            start,
        });
    }

    /// Scan string content up to the closing quote or the next `#{`.
    fn string_content(&mut self, quote: u8, interpolate: bool, literal_start: u32) -> Result<(), LexError> {
        let start = self.cursor.pos();
        loop {
            match self.cursor.current() {
                _ if self.cursor.is_eof() => {
                    return Err(self.error(LexErrorKind::UnterminatedString, literal_start));
                }
                b'\\' => {
                    self.cursor.advance();
                    if !self.cursor.is_eof() {
                        self.cursor.advance_char();
                    }
                }
                b if b == quote => {
                    self.flush_content(start);
                    let end_start = self.cursor.pos();
                    self.cursor.advance();
                    self.modes.pop();
                    self.emit(TokenKind::TStringEnd, end_start, State::End);
                    return Ok(());
                }
                b'#' if interpolate && self.cursor.peek() == b'{' => {
                    self.flush_content(start);
                    let beg = self.cursor.pos();
                    self.cursor.advance_n(2);
                    self.modes.push(Mode::Interp { braces: 0 });
                    self.emit(TokenKind::EmbExprBeg, beg, State::Beg);
                    return Ok(());
                }
                _ => self.cursor.advance_char(),
            }
        }
    }

    fn flush_content(&mut self, start: u32) {
        let end = self.cursor.pos();
        if end > start {
            self.push_token(TokenKind::TStringContent, start, end);
        }
    }

    // --- Punctuation ---

    fn colon(&mut self, start: u32) {
        if self.cursor.peek() == b':' {
            self.cursor.advance_n(2);
            self.emit(TokenKind::Op, start, State::Dot);
            return;
        }

        let next = self.cursor.peek();
        let symbol_allowed = self.state.value_expected()
            || (self.state == State::Arg && self.space_before);
        if symbol_allowed && (is_ident_start(next) || next == b'@' || next == b'$') {
            self.cursor.advance();
            self.emit(TokenKind::SymBeg, start, State::End);
            self.symbol_name();
            return;
        }
        if self.state.value_expected() && self.symbol_operator_follows() {
            self.cursor.advance();
            self.emit(TokenKind::SymBeg, start, State::End);
            let op_start = self.cursor.pos();
            self.method_operator(op_start);
            return;
        }

        self.cursor.advance();
        self.emit(TokenKind::Op, start, State::Beg);
    }

    /// `:+`, `:<=>`, `:[]`
    fn symbol_operator_follows(&self) -> bool {
        let after = self.cursor.rest().get(1..).unwrap_or("");
        METHOD_OPERATORS.iter().any(|op| after.starts_with(op))
    }

    /// The name after a symbol's `:`. Reserved words stay keywords.
    fn symbol_name(&mut self) {
        let start = self.cursor.pos();
        let kind = match self.cursor.current() {
            b'@' if self.cursor.peek() == b'@' => {
                self.cursor.advance_n(2);
                TokenKind::CVar
            }
            b'@' => {
                self.cursor.advance();
                TokenKind::IVar
            }
            b'$' => {
                self.cursor.advance();
                TokenKind::GVar
            }
            _ => TokenKind::Ident,
        };
        self.cursor.eat_while(is_ident_continue);
        if kind == TokenKind::Ident && matches!(self.cursor.current(), b'?' | b'!' | b'=')
            && !matches!(self.cursor.peek(), b'=' | b'~' | b'>')
        {
            self.cursor.advance();
        }
        let text = self.cursor.slice_from(start);
        let kind = match kind {
            TokenKind::Ident if keywords::is_keyword(text) => TokenKind::Kw,
            TokenKind::Ident if text.as_bytes()[0].is_ascii_uppercase() => TokenKind::Const,
            other => other,
        };
        self.emit(kind, start, State::End);
    }

    fn left_brace(&mut self, start: u32) {
        self.cursor.advance();
        if let Some(Mode::Interp { braces }) = self.modes.last_mut() {
            *braces += 1;
        }
        if self.lambda_paren == Some(self.paren_depth) {
            self.lambda_paren = None;
            self.emit(TokenKind::TLamBeg, start, State::Beg);
        } else {
            self.emit(TokenKind::LBrace, start, State::Beg);
        }
    }

    fn right_brace(&mut self, start: u32) {
        self.cursor.advance();
        match self.modes.last_mut() {
            Some(Mode::Interp { braces: 0 }) => {
                self.modes.pop();
                self.emit(TokenKind::EmbExprEnd, start, State::End);
            }
            Some(Mode::Interp { braces }) => {
                *braces -= 1;
                self.emit(TokenKind::RBrace, start, State::End);
            }
            _ => self.emit(TokenKind::RBrace, start, State::End),
        }
    }

    fn dot(&mut self, start: u32) {
        if self.cursor.peek() == b'.' {
            let len = if self.cursor.peek2() == b'.' { 3 } else { 2 };
            self.cursor.advance_n(len);
            self.emit(TokenKind::Op, start, State::Beg);
            return;
        }
        self.cursor.advance();
        let next = if self.state == State::Fname {
            State::Fname
        } else {
            State::Dot
        };
        self.emit(TokenKind::Period, start, next);
    }

    fn minus(&mut self, start: u32) {
        match self.cursor.peek() {
            b'>' => {
                self.cursor.advance_n(2);
                self.lambda_paren = Some(self.paren_depth);
                self.emit(TokenKind::TLambda, start, State::Beg);
            }
            b'0'..=b'9' if self.state.value_expected() => self.number(start),
            _ if self.state == State::Fname => self.method_operator(start),
            _ => self.operator(start),
        }
    }

    fn less(&mut self, start: u32) -> Result<(), LexError> {
        let heredoc_allowed = self.state.value_expected()
            || (self.state == State::Arg && self.space_before);
        if heredoc_allowed && self.cursor.peek() == b'<' {
            if let Some(opener) = Opener::parse(self.cursor.rest()) {
                return self.heredoc(start, &opener);
            }
        }
        if self.state == State::Fname {
            self.method_operator(start);
        } else {
            self.operator(start);
        }
        Ok(())
    }

    fn operator(&mut self, start: u32) {
        let rest = self.cursor.rest();
        let len = OPERATORS
            .iter()
            .find(|op| rest.starts_with(**op))
            .map_or(1, |op| op.len());
        self.cursor.advance_n(u32::try_from(len).unwrap_or(1));
        self.emit(TokenKind::Op, start, State::Beg);
    }

    /// An operator used as a method name (`def ==`, `def []`, `:<=>`).
    fn method_operator(&mut self, start: u32) {
        let rest = self.cursor.rest();
        let len = METHOD_OPERATORS
            .iter()
            .find(|op| rest.starts_with(**op))
            .map_or(1, |op| op.len());
        self.cursor.advance_n(u32::try_from(len).unwrap_or(1));
        self.emit(TokenKind::Op, start, State::End);
    }

    // --- Heredocs ---

    /// Emit the opener, then read the body and terminator ahead.
    fn heredoc(&mut self, start: u32, opener: &Opener) -> Result<(), LexError> {
        self.cursor.advance_n(opener.len);
        self.push_token(TokenKind::HeredocBeg, start, self.cursor.pos());

        let body_start = match self.heredoc_resume {
            Some(resume) => Some(resume),
            None => self.cursor.next_line_start(),
        };
        let Some(body_start) = body_start else {
            return Err(self.error(LexErrorKind::UnterminatedHeredoc(opener.id.clone()), start));
        };

        let mut probe = Cursor::at(self.source, body_start);
        let (terminator_start, terminator_end) = loop {
            if probe.is_eof() {
                return Err(self.error(LexErrorKind::UnterminatedHeredoc(opener.id.clone()), start));
            }
            let line_start = probe.pos();
            probe.eat_until_newline_or_eof();
            let line = probe.slice_from(line_start).trim_end_matches('\r');
            if opener.terminates(line) {
                let end = if probe.current() == b'\n' { probe.pos() + 1 } else { probe.pos() };
                break (line_start, end);
            }
            if probe.current() == b'\n' {
                probe.advance();
            }
        };

        if terminator_start > body_start {
            self.push_token(TokenKind::TStringContent, body_start, terminator_start);
        }
        self.push_token(TokenKind::HeredocEnd, terminator_start, terminator_end);
        self.heredoc_resume = Some(terminator_end);
        self.state = State::End;
        self.space_before = false;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests unwrap to fail loudly")]
mod tests;
