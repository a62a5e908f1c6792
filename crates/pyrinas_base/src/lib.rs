//! # pyrinas-base
//!
//! Pure structural atoms shared by every stage of the pyrinas compiler:
//!
//! - [`Span`] — byte-offset source location tracking
//! - [`LineIndex`] — byte offset → (line, column) lookup for diagnostics
//! - [`SpannedError`]/[`Result`] — errors with source positions
//!
//! This crate has no knowledge of the pyrinas language grammar. It provides
//! only the generic, reusable infrastructure that the lexer, parser,
//! analyzer, and emitter build upon.

pub mod error;
pub mod line_index;
pub mod span;

pub use error::{Result, SpannedError};
pub use line_index::LineIndex;
pub use span::Span;
