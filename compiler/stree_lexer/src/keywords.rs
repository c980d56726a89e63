//! Reserved words.
//!
//! Lookup is length-bucketed: reserved words are 2-12 bytes long, so most
//! identifiers are rejected before any string comparison.

/// What the scanner expects after a keyword.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum KeywordClass {
    /// A value follows; a newline right after is insignificant (`if`, `then`).
    Beg,
    /// A value may follow, but a newline ends the statement (`return`, `rescue`).
    Mid,
    /// Arguments may follow like a method call (`yield`, `super`).
    Arg,
    /// The keyword is itself a value (`end`, `self`, `nil`).
    End,
    /// A method name follows (`def`).
    Fname,
}

/// Look up a reserved word.
#[inline]
pub(crate) fn lookup(text: &str) -> Option<KeywordClass> {
    use KeywordClass::{Arg, Beg, End, Fname, Mid};

    let len = text.len();
    if !(2..=12).contains(&len) {
        return None;
    }

    match len {
        2 => match text {
            "do" | "if" | "in" | "or" => Some(Beg),
            _ => None,
        },
        3 => match text {
            "and" | "for" | "not" => Some(Beg),
            "def" => Some(Fname),
            "end" | "nil" => Some(End),
            _ => None,
        },
        4 => match text {
            "case" | "else" | "then" | "when" => Some(Beg),
            "next" => Some(Mid),
            "redo" | "self" | "true" => Some(End),
            _ => None,
        },
        5 => match text {
            "alias" | "begin" | "class" | "elsif" | "undef" | "until" | "while" => Some(Beg),
            "BEGIN" => Some(End),
            "break" => Some(Mid),
            "false" | "retry" => Some(End),
            "super" | "yield" => Some(Arg),
            _ => None,
        },
        6 => match text {
            "ensure" | "module" | "unless" => Some(Beg),
            "rescue" | "return" => Some(Mid),
            _ => None,
        },
        8 => match text {
            "__FILE__" | "__LINE__" => Some(End),
            "defined?" => Some(Arg),
            _ => None,
        },
        12 => match text {
            "__ENCODING__" => Some(End),
            _ => None,
        },
        _ => None,
    }
}

/// Whether `text` is a reserved word.
#[inline]
pub fn is_keyword(text: &str) -> bool {
    lookup(text).is_some()
}
