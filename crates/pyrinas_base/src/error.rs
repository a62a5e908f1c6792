//! Error types with source location tracking.
//!
//! Every stage of the pyrinas compiler (lexer, parser, analyzer) produces a
//! [`SpannedError`] indicating where in the source text the problem was
//! found. The driver prints only the first one encountered (spec §6/§7).
//!
//! # Example
//!
//! ```
//! use pyrinas_base::{SpannedError, Span, Result};
//!
//! fn parse_number(s: &str) -> Result<i32> {
//!     s.parse().map_err(|_| SpannedError::new(
//!         format!("invalid number: '{}'", s),
//!         Span::new(0, s.len()),
//!     ))
//! }
//!
//! let err = parse_number("abc").unwrap_err();
//! assert!(err.to_string().contains("invalid number"));
//! ```

use crate::span::Span;
use std::fmt;

/// An error annotated with its source location.
///
/// Implements [`std::error::Error`] and [`fmt::Display`]. The display format
/// is `{message} at {start}..{end}` (byte offsets); callers that have a
/// [`crate::LineIndex`] handy should prefer [`SpannedError::line_col`] for a
/// human-facing `line:column` rendering.
#[derive(Debug, Clone)]
pub struct SpannedError {
    /// Human-readable error description. Matches one of the fixed surface
    /// strings from spec §7 (e.g. `"Variable not declared"`).
    pub message: String,
    /// Location in source where the error occurred.
    pub span: Span,
}

impl SpannedError {
    /// Creates an error with the given message and source location.
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }

    /// Renders `line:column: message` using a precomputed [`crate::LineIndex`].
    pub fn line_col(&self, index: &crate::LineIndex) -> String {
        let (line, col) = index.line_col(self.span.start);
        format!("{line}:{col}: {}", self.message)
    }
}

impl fmt::Display for SpannedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let SpannedError { message, span } = self;
        write!(f, "{} at {}..{}", message, span.start, span.end)
    }
}

impl std::error::Error for SpannedError {}

/// Alias for `std::result::Result<T, SpannedError>`.
pub type Result<T> = std::result::Result<T, SpannedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spanned_error_display() {
        let err = SpannedError::new("test error", Span::new(5, 10));
        let display = format!("{}", err);
        assert!(display.contains("test error"));
        assert!(display.contains("5..10"));
    }

    #[test]
    fn spanned_error_line_col() {
        let index = crate::LineIndex::new("a\nbc\n");
        let err = SpannedError::new("oops", Span::new(2, 3));
        assert_eq!(err.line_col(&index), "2:1: oops");
    }
}
