//! Heredoc openers.
//!
//! `<<ID`, `<<-ID` and `<<~ID`, with the identifier optionally quoted. The
//! body is read by the scanner; this module only recognizes the opener and
//! decides which line terminates the body.

use crate::cursor::is_ident_continue;

/// A recognized heredoc opener.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Opener {
    /// Byte length of the opener text (`<<~EOS` is 6).
    pub len: u32,
    /// Terminator identifier without quotes.
    pub id: String,
    /// `<<-` or `<<~`: the terminator may be indented.
    pub indented: bool,
}

impl Opener {
    /// Recognize an opener at the start of `rest`, which begins with `<<`.
    pub(crate) fn parse(rest: &str) -> Option<Opener> {
        let bytes = rest.as_bytes();
        if !rest.starts_with("<<") {
            return None;
        }
        let mut i = 2;
        let indented = matches!(bytes.get(i), Some(b'~' | b'-'));
        if indented {
            i += 1;
        }

        let (id, len) = match bytes.get(i).copied() {
            Some(quote @ (b'\'' | b'"')) => {
                let close = rest.get(i + 1..)?.find(char::from(quote))?;
                let id = rest.get(i + 1..i + 1 + close)?;
                if id.is_empty() || id.contains('\n') {
                    return None;
                }
                (id, i + close + 2)
            }
            Some(b) if b.is_ascii_alphabetic() || b == b'_' => {
                let word = bytes.get(i..)?.iter().take_while(|&&b| is_ident_continue(b)).count();
                (rest.get(i..i + word)?, i + word)
            }
            _ => return None,
        };

        Some(Opener {
            len: u32::try_from(len).ok()?,
            id: id.to_string(),
            indented,
        })
    }

    /// Whether `line` (without its line terminator) ends the body.
    pub(crate) fn terminates(&self, line: &str) -> bool {
        let line = if self.indented {
            line.trim_start_matches([' ', '\t'])
        } else {
            line
        };
        line == self.id
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests unwrap to fail loudly")]
mod tests;
