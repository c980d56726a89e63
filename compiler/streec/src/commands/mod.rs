//! Command handlers for the stree CLI.
//!
//! Each submodule implements one command. Each handler reports to stdout or
//! stderr itself and returns whether it succeeded. Shared file loading and
//! error rendering live here in the module root.

use std::io::IsTerminal;
use std::path::Path;

use stree_diagnostic::emitter::{render_with, ColorMode};
use stree_parse::ParseError;

mod check;
mod debug;

pub use check::check_files;
pub use debug::{lex_file, parse_file};

/// Read a source file, describing the failure in user terms.
pub(crate) fn read_source(path: &Path) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| {
        let path = path.display();
        match e.kind() {
            std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
            std::io::ErrorKind::PermissionDenied => {
                format!("permission denied reading '{path}'")
            }
            std::io::ErrorKind::InvalidData => {
                format!("'{path}' contains invalid UTF-8 data")
            }
            _ => format!("error reading '{path}': {e}"),
        }
    })
}

/// Render a parse error with a snippet of the offending line.
pub(crate) fn render_error(source: &str, path: &Path, error: &ParseError, colors: bool) -> String {
    render_with(
        source,
        &path.display().to_string(),
        error.code,
        &error.message,
        error.line,
        error.column,
        colors,
    )
}

/// Whether stderr output should be colored.
pub(crate) fn stderr_colors() -> bool {
    ColorMode::Auto.should_use_colors(std::io::stderr().is_terminal())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests unwrap to fail loudly")]
mod tests;
