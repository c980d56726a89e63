//! Line and column lookup.
//!
//! The lexer reports positions as line/column pairs; spans also need byte
//! offsets. [`LineIndex`] pre-computes line starts once per source so both
//! directions are O(log L) binary searches.

use stree_ir::Position;

/// Pre-computed line start table.
///
/// ```
/// use stree_diagnostic::LineIndex;
///
/// let index = LineIndex::new("ab\ncd");
/// assert_eq!(index.offset(2, 1), 4);
/// assert_eq!(index.position(4).column, 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct LineIndex {
    /// Byte offset of each line start. `starts[0] == 0`.
    starts: Vec<u32>,
    len: u32,
}

impl LineIndex {
    /// Build the table by scanning the source once.
    pub fn new(source: &str) -> Self {
        let mut starts = vec![0u32];
        for (i, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                starts.push(to_u32(i + 1));
            }
        }
        LineIndex {
            starts,
            len: to_u32(source.len()),
        }
    }

    /// Byte offset of a 1-based line and 0-based byte column.
    ///
    /// Lines past the end clamp to the end of the source.
    pub fn offset(&self, line: u32, column: u32) -> u32 {
        match self.line_start(line) {
            Some(start) => start.saturating_add(column).min(self.len),
            None => self.len,
        }
    }

    /// Full position of a byte offset.
    pub fn position(&self, offset: u32) -> Position {
        let offset = offset.min(self.len);
        let line_idx = match self.starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        let start = self.starts.get(line_idx).copied().unwrap_or(0);
        Position::new(to_u32(line_idx) + 1, offset, offset - start)
    }

    /// Byte offset of a line start (1-based line number).
    pub fn line_start(&self, line: u32) -> Option<u32> {
        if line == 0 {
            return None;
        }
        self.starts.get((line - 1) as usize).copied()
    }

    /// Byte range of a line without its terminator.
    pub fn line_range(&self, source: &str, line: u32) -> Option<std::ops::Range<usize>> {
        let start = self.line_start(line)? as usize;
        let end = self
            .line_start(line + 1)
            .map_or(source.len(), |next| (next as usize).saturating_sub(1));
        Some(start..end.max(start))
    }

    pub fn line_count(&self) -> usize {
        self.starts.len()
    }
}

#[inline]
fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests;
