//! Diagnostic support for the stree parser.
//!
//! - `ErrorCode` gives every failure a searchable identifier
//! - `LineIndex` converts between byte offsets and line/column positions
//! - `emitter::render` prints an error with the offending source line

pub mod emitter;
mod error_code;
pub mod span_utils;

pub use emitter::ColorMode;
pub use error_code::ErrorCode;
pub use span_utils::LineIndex;
