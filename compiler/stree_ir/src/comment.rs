//! Source comments.
//!
//! Comments never take part in tree construction. They are collected on the
//! side while the tree is built and attached to nodes in a single pass once
//! the tree is complete.

use std::fmt;

use crate::Span;

/// Where a comment came from.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum CommentKind {
    /// `# text` up to the end of the line.
    Line,
    /// `=begin` ... `=end` embedded documentation.
    EmbDoc,
}

/// How an attached comment relates to the node that owns it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Placement {
    /// Attached to an enclosing node (or the root) with no neighbour.
    #[default]
    Neither,
    /// Describes the node that follows it.
    Leading,
    /// Describes the node that precedes it.
    Trailing,
}

/// A source comment.
#[derive(Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Comment {
    /// Raw text, including the `#` or the `=begin`/`=end` lines.
    pub text: String,
    pub kind: CommentKind,
    /// Code precedes the comment on the same line.
    pub inline: bool,
    pub span: Span,
    placement: Placement,
}

impl Comment {
    /// A `#` line comment.
    pub fn line(text: impl Into<String>, inline: bool, span: Span) -> Self {
        Comment {
            text: text.into(),
            kind: CommentKind::Line,
            inline,
            span,
            placement: Placement::Neither,
        }
    }

    /// An `=begin`/`=end` block. These always start a line.
    pub fn embdoc(text: impl Into<String>, span: Span) -> Self {
        Comment {
            text: text.into(),
            kind: CommentKind::EmbDoc,
            inline: false,
            span,
            placement: Placement::Neither,
        }
    }

    #[inline]
    pub fn placement(&self) -> Placement {
        self.placement
    }

    #[inline]
    pub fn is_leading(&self) -> bool {
        self.placement == Placement::Leading
    }

    #[inline]
    pub fn is_trailing(&self) -> bool {
        self.placement == Placement::Trailing
    }

    /// Record the attachment classification. Set at most once.
    pub fn set_placement(&mut self, placement: Placement) {
        debug_assert!(
            self.placement == Placement::Neither,
            "comment placement assigned twice"
        );
        self.placement = placement;
    }
}

impl fmt::Debug for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} @ {} ({}, {:?})",
            self.text,
            self.span,
            if self.inline { "inline" } else { "standalone" },
            self.placement
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    fn span() -> Span {
        Span::new(Position::new(1, 6, 6), Position::new(1, 10, 10))
    }

    #[test]
    fn test_comment_creation() {
        let comment = Comment::line("# hi", true, span());
        assert_eq!(comment.kind, CommentKind::Line);
        assert!(comment.inline);
        assert_eq!(comment.placement(), Placement::Neither);
    }

    #[test]
    fn test_embdoc_is_standalone() {
        let comment = Comment::embdoc("=begin\ndoc\n=end", span());
        assert_eq!(comment.kind, CommentKind::EmbDoc);
        assert!(!comment.inline);
    }

    #[test]
    fn test_set_placement() {
        let mut comment = Comment::line("# hi", true, span());
        comment.set_placement(Placement::Trailing);
        assert!(comment.is_trailing());
        assert!(!comment.is_leading());
    }
}
