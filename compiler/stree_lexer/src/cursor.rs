//! Byte cursor over the source text.
//!
//! Reads past the end return `0x00`, so dispatch on the current byte never
//! needs a separate bounds check. Interior null bytes are told apart from
//! EOF by [`Cursor::is_eof`].

/// Byte cursor. `Copy`, so snapshots for lookahead are free.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    source: &'a str,
    pos: u32,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Cursor { source, pos: 0 }
    }

    /// Cursor positioned at `pos`.
    pub fn at(source: &'a str, pos: u32) -> Self {
        Cursor { source, pos }
    }

    #[inline]
    fn byte_at(&self, index: usize) -> u8 {
        self.source.as_bytes().get(index).copied().unwrap_or(0)
    }

    /// Byte at the current position, `0x00` at EOF.
    #[inline]
    pub fn current(&self) -> u8 {
        self.byte_at(self.pos as usize)
    }

    #[inline]
    pub fn peek(&self) -> u8 {
        self.byte_at(self.pos as usize + 1)
    }

    #[inline]
    pub fn peek2(&self) -> u8 {
        self.byte_at(self.pos as usize + 2)
    }

    /// Byte just before the current position, `0x00` at the start.
    #[inline]
    pub fn prev(&self) -> u8 {
        match self.pos {
            0 => 0,
            pos => self.byte_at(pos as usize - 1),
        }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.pos += 1;
    }

    #[inline]
    pub fn advance_n(&mut self, n: u32) {
        self.pos += n;
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos as usize >= self.source.len()
    }

    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    #[inline]
    pub fn set_pos(&mut self, pos: u32) {
        self.pos = pos;
    }

    /// Whether the remaining input starts with `prefix`.
    #[inline]
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.rest().starts_with(prefix)
    }

    /// Remaining source from the current position.
    #[inline]
    pub fn rest(&self) -> &'a str {
        self.source.get(self.pos as usize..).unwrap_or("")
    }

    /// Source text between two offsets. Empty if the range is not on
    /// character boundaries.
    #[inline]
    pub fn slice(&self, start: u32, end: u32) -> &'a str {
        self.source.get(start as usize..end as usize).unwrap_or("")
    }

    #[inline]
    pub fn slice_from(&self, start: u32) -> &'a str {
        self.slice(start, self.pos)
    }

    /// Advance while `pred` holds. `pred(0)` must be false.
    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while pred(self.current()) {
            self.pos += 1;
        }
    }

    /// Advance past one full UTF-8 character.
    #[inline]
    pub fn advance_char(&mut self) {
        let width = match self.current() {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        };
        self.advance_n(width);
    }

    /// Advance to the next `\n` (not past it) or to EOF.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offsets are bounded by the source length, which the lexer caps at u32"
    )]
    pub fn eat_until_newline_or_eof(&mut self) {
        match memchr::memchr(b'\n', self.rest().as_bytes()) {
            Some(offset) => self.pos += offset as u32,
            None => self.pos = self.source.len() as u32,
        }
    }

    /// Offset just past the end of the current line (after its `\n`), or
    /// `None` when the current line is the last one.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offsets are bounded by the source length, which the lexer caps at u32"
    )]
    pub fn next_line_start(&self) -> Option<u32> {
        memchr::memchr(b'\n', self.rest().as_bytes()).map(|offset| self.pos + offset as u32 + 1)
    }
}

/// Bytes that may continue an identifier. Non-ASCII bytes count as letters.
#[inline]
pub fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b >= 0x80
}

/// Bytes that may start an identifier.
#[inline]
pub fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b >= 0x80
}

#[cfg(test)]
mod tests;
