//! Terminal rendering of a parse error.
//!
//! ```text
//! error[E1004]: unexpected end of input, expected `end`
//!   --> demo.rb:2:0
//!    |
//!  2 | 
//!    | ^
//! ```

use std::fmt::Write;

use crate::{ErrorCode, LineIndex};

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const BOLD: &str = "\x1b[1m";
    pub const GUTTER: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

/// Color output mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Use colors when writing to a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve against whether the output is a TTY.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Render an error at a 1-based line and 0-based byte column, without colors.
pub fn render(
    source: &str,
    path: &str,
    code: ErrorCode,
    message: &str,
    line: u32,
    column: u32,
) -> String {
    render_with(source, path, code, message, line, column, false)
}

/// Render an error, optionally with ANSI colors.
pub fn render_with(
    source: &str,
    path: &str,
    code: ErrorCode,
    message: &str,
    line: u32,
    column: u32,
    colors: bool,
) -> String {
    let paint = |style: &'static str| if colors { style } else { "" };
    let reset = paint(colors::RESET);
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{}error[{code}]{reset}{}: {message}{reset}",
        paint(colors::ERROR),
        paint(colors::BOLD)
    );
    let _ = writeln!(out, "  {}-->{reset} {path}:{line}:{column}", paint(colors::GUTTER));

    let index = LineIndex::new(source);
    let Some(range) = index.line_range(source, line) else {
        return out;
    };
    let text = source.get(range).unwrap_or("");
    let number = line.to_string();
    let pad = " ".repeat(number.len());
    let gutter = paint(colors::GUTTER);

    // Caret under the column, measured in characters of the line prefix.
    let prefix = text.get(..column as usize).unwrap_or(text);
    let caret_at = prefix.chars().count();

    let _ = writeln!(out, " {pad} {gutter}|{reset}");
    let _ = writeln!(out, " {gutter}{number} |{reset} {text}");
    let _ = writeln!(
        out,
        " {pad} {gutter}|{reset} {}{}^{reset}",
        " ".repeat(caret_at),
        paint(colors::ERROR)
    );
    out
}

#[cfg(test)]
mod tests;
