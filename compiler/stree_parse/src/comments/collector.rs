//! Pending comment backlog.

use stree_ir::{Comment, Span};

/// Comments seen so far, not yet attached.
#[derive(Debug, Default)]
pub struct CommentCollector {
    pending: Vec<Comment>,
}

impl CommentCollector {
    pub fn new() -> Self {
        CommentCollector::default()
    }

    /// Record a `#` comment, classifying it as inline when code precedes it
    /// on its line.
    pub fn collect(&mut self, text: impl Into<String>, span: Span, source: &str) {
        let inline = is_inline(source, span.start_offset as usize);
        self.pending.push(Comment::line(text, inline, span));
    }

    /// Record an `=begin`/`=end` block.
    pub fn collect_embdoc(&mut self, text: impl Into<String>, span: Span) {
        self.pending.push(Comment::embdoc(text, span));
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Take the backlog, ordered by source position.
    pub fn drain_sorted(&mut self) -> Vec<Comment> {
        let mut comments = std::mem::take(&mut self.pending);
        comments.sort_by_key(|comment| comment.span.start_offset);
        comments
    }
}

/// Whether the nearest non-blank byte before `offset` is on the same line.
fn is_inline(source: &str, offset: usize) -> bool {
    let Some(before) = source.as_bytes().get(..offset) else {
        return false;
    };
    match before
        .iter()
        .rev()
        .find(|byte| !matches!(byte, b' ' | b'\t' | b'\r' | b'\x0c'))
    {
        None | Some(b'\n') => false,
        Some(_) => true,
    }
}

#[cfg(test)]
mod tests;
