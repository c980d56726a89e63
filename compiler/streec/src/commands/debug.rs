//! Debug commands: `parse` and `lex` for inspecting the parse layer.

use std::fmt::Write;
use std::path::Path;

use stree_lexer::LexEvent;
use stree_parse::ParseError;
use tracing::debug;

use super::{read_source, render_error, stderr_colors};

/// Parse a file and print its tree.
pub fn parse_file(path: &Path, json: bool) -> bool {
    let source = match read_source(path) {
        Ok(source) => source,
        Err(msg) => {
            eprintln!("{msg}");
            return false;
        }
    };
    let finished = match stree_parse::parse_with_leftovers(&source) {
        Ok(finished) => finished,
        Err(error) => {
            eprint!("{}", render_error(&source, path, &error, stderr_colors()));
            return false;
        }
    };
    if !finished.unclaimed.is_empty() {
        debug!(count = finished.unclaimed.len(), "tokens left unclaimed");
    }

    if json {
        match serde_json::to_string_pretty(&finished.program) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("error serializing tree: {e}");
                return false;
            }
        }
    } else {
        println!("{}", finished.program.sexp());
    }
    true
}

/// Lex a file and print its event stream.
pub fn lex_file(path: &Path) -> bool {
    let source = match read_source(path) {
        Ok(source) => source,
        Err(msg) => {
            eprintln!("{msg}");
            return false;
        }
    };
    match dump_events(&source) {
        Ok(dump) => {
            print!("{dump}");
            true
        }
        Err(error) => {
            eprint!("{}", render_error(&source, path, &error, stderr_colors()));
            false
        }
    }
}

/// One line per lexical event.
pub(crate) fn dump_events(source: &str) -> Result<String, ParseError> {
    let events = stree_lexer::lex(source)?;
    let mut out = String::new();
    for event in &events {
        let _ = match event {
            LexEvent::Token(token) => {
                writeln!(out, "{} {:?} @ {}", token.kind, token.text, token.span)
            }
            LexEvent::Comment { text, span } => writeln!(out, "comment {text:?} @ {span}"),
            LexEvent::EmbDoc { text, span } => writeln!(out, "embdoc {text:?} @ {span}"),
        };
    }
    Ok(out)
}
