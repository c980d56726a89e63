//! Source location spans.
//!
//! A span records both ends of a source range three ways: 1-based line,
//! byte offset from the start of the file, and 0-based byte column. Offsets
//! are half-open (`start_offset..end_offset`), so slicing the source buffer
//! by a span yields exactly the text the construct occupied.

use std::fmt;
use std::ops::Range;

/// A single point in the source.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Position {
    /// 1-based line number.
    pub line: u32,
    /// Byte offset from the start of the source.
    pub offset: u32,
    /// 0-based byte column within the line.
    pub column: u32,
}

impl Position {
    /// The first byte of any source.
    pub const START: Position = Position {
        line: 1,
        offset: 0,
        column: 0,
    };

    #[inline]
    pub const fn new(line: u32, offset: u32, column: u32) -> Self {
        Position {
            line,
            offset,
            column,
        }
    }
}

/// Source location span.
///
/// Immutable value; operations return new spans.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Span {
    pub start_line: u32,
    pub start_offset: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_offset: u32,
    pub end_column: u32,
}

impl Span {
    /// Zero-width span at the start of the source.
    pub const DUMMY: Span = Span::point(Position::START);

    /// Create a span between two positions.
    #[inline]
    pub const fn new(start: Position, end: Position) -> Self {
        Span {
            start_line: start.line,
            start_offset: start.offset,
            start_column: start.column,
            end_line: end.line,
            end_offset: end.offset,
            end_column: end.column,
        }
    }

    /// Create a zero-width span.
    #[inline]
    pub const fn point(pos: Position) -> Self {
        Span::new(pos, pos)
    }

    #[inline]
    pub const fn start(&self) -> Position {
        Position::new(self.start_line, self.start_offset, self.start_column)
    }

    #[inline]
    pub const fn end(&self) -> Position {
        Position::new(self.end_line, self.end_offset, self.end_column)
    }

    /// Merge with a later span: keeps this span's start and takes whichever
    /// end is further along.
    ///
    /// The end never moves backwards, so merging with an out-of-order child
    /// span cannot shrink the result.
    #[inline]
    #[must_use]
    pub fn to(self, other: Span) -> Span {
        let end = if other.end_offset > self.end_offset {
            other.end()
        } else {
            self.end()
        };
        Span::new(self.start(), end)
    }

    /// Replace the start of the span.
    #[inline]
    #[must_use]
    pub const fn with_start(self, start: Position) -> Span {
        Span::new(start, self.end())
    }

    /// Replace the end of the span.
    #[inline]
    #[must_use]
    pub const fn with_end(self, end: Position) -> Span {
        Span::new(self.start(), end)
    }

    /// Check if another span is fully contained within this span.
    #[inline]
    pub const fn contains(&self, other: Span) -> bool {
        self.start_offset <= other.start_offset && other.end_offset <= self.end_offset
    }

    /// Length of the span in bytes.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end_offset.saturating_sub(self.start_offset)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start_offset >= self.end_offset
    }

    /// Byte range for slicing the source.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start_offset as usize..self.end_offset as usize
    }

    /// The source text covered by this span, if it lies within `source`.
    #[inline]
    pub fn slice<'a>(&self, source: &'a str) -> Option<&'a str> {
        source.get(self.range())
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}:{} ({}..{})",
            self.start_line,
            self.start_column,
            self.end_line,
            self.end_column,
            self.start_offset,
            self.end_offset
        )
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}:{}",
            self.start_line, self.start_column, self.end_line, self.end_column
        )
    }
}

#[cfg(test)]
mod tests;
