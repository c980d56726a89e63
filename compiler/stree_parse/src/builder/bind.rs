//! Binding statement lists to the interior of their construct.
//!
//! A statement list reduced on its own only knows its first and last
//! statement, and an empty one knows nothing at all. Once the enclosing
//! construct has claimed its delimiters, the list is re-spanned to cover the
//! whole interior, so comments between the header and the first statement or
//! inside an empty body land inside it.

use stree_ir::{Node, NodeKind};
use tracing::trace;

use super::Builder;

impl Builder<'_> {
    /// Where the statements after a header ending at `offset` begin.
    ///
    /// A comment on the header line belongs to the header, so the interior
    /// starts at the end of that line. A `;` right after the header starts
    /// the interior there. Otherwise the interior starts at `offset`.
    pub fn next_statement_start(&self, offset: u32) -> u32 {
        let bytes = self.source.as_bytes();
        let mut pos = offset as usize;
        while matches!(bytes.get(pos), Some(b' ' | b'\t')) {
            pos += 1;
        }
        match bytes.get(pos) {
            Some(b';') => to_offset(pos),
            Some(b'#') => {
                let newline = bytes[pos..]
                    .iter()
                    .position(|&byte| byte == b'\n')
                    .map_or(bytes.len(), |distance| pos + distance);
                to_offset(newline)
            }
            _ => offset,
        }
    }

    /// Give a statement list the interior `start..end`, and pin a leading
    /// `VoidStmt` to `start`.
    pub fn bind_statements(&self, statements: &mut Node, start: u32, end: u32) {
        let start = start.min(end);
        statements.span = self.span_between(start, end);
        let mut void = false;
        if let NodeKind::Statements { body } = &mut statements.kind {
            if let Some(first) = body.first_mut() {
                if first.is_void_stmt() {
                    first.span = self.point(start);
                    void = true;
                }
            }
        }
        trace!(start, end, void, "bound statements");
    }

    /// Move only the end of a statement list.
    fn bind_statements_end(&self, statements: &mut Node, end: u32) {
        let start = statements.span.start_offset;
        self.bind_statements(statements, start, end);
    }

    /// Give a `BodyStmt` the interior `start..end` and distribute it: the
    /// statements run up to the first clause, each clause up to the next,
    /// the last one up to `end`.
    pub fn bind_bodystmt(&self, body: &mut Node, start: u32, end: u32) {
        body.span = self.span_between(start.min(end), end);
        let NodeKind::BodyStmt {
            statements,
            rescue,
            else_clause,
            ensure,
        } = &mut body.kind
        else {
            return;
        };

        let else_start = else_clause.as_ref().map(|node| node.span.start_offset);
        let ensure_start = ensure.as_ref().map(|node| node.span.start_offset);
        let rescue_start = rescue.as_ref().map(|node| node.span.start_offset);

        let statements_end = rescue_start.or(else_start).or(ensure_start).unwrap_or(end);
        self.bind_statements(statements, start, statements_end);

        if let Some(rescue) = rescue {
            self.bind_rescue_end(rescue, else_start.or(ensure_start).unwrap_or(end));
        }

        if let Some(else_clause) = else_clause {
            let else_end = ensure_start.unwrap_or(end);
            else_clause.span = self.span_between(else_clause.span.start_offset, else_end);
            if let NodeKind::Else {
                keyword,
                statements,
            } = &mut else_clause.kind
            {
                let else_body = self.next_statement_start(keyword.span.end_offset);
                self.bind_statements(statements, else_body, else_end);
            }
        }
    }

    /// End a rescue clause at `end`. Each clause of a chain ends where the
    /// next one starts; the last one ends at `end`.
    pub fn bind_rescue_end(&self, rescue: &mut Node, end: u32) {
        rescue.span = self.span_between(rescue.span.start_offset, end);
        let NodeKind::Rescue {
            statements,
            consequent,
            ..
        } = &mut rescue.kind
        else {
            return;
        };
        match consequent {
            Some(next) => {
                let next_start = next.span.start_offset;
                self.bind_rescue_end(next, end);
                self.bind_statements_end(statements, next_start);
            }
            None => self.bind_statements_end(statements, end),
        }
    }
}

fn to_offset(pos: usize) -> u32 {
    u32::try_from(pos).unwrap_or(u32::MAX)
}
