//! Pipeline-level error type, wrapping every stage from source text to a
//! linked executable (spec §7 "Error conditions").

use std::fmt;

use pyrinas_base::SpannedError;

/// An error from any single stage of the compile pipeline.
///
/// Lexer, parser, and analyzer failures arrive as [`SpannedError`] (spec §3's
/// line-numbered diagnostics); codegen failures are also [`SpannedError`]
/// since they reuse the same reporting shape; [`CompileError::Io`] and
/// [`CompileError::Link`] cover everything past the point the program is
/// known to be well-formed pyrinas source.
#[derive(Debug)]
pub enum CompileError {
    /// Tokenizing failed.
    Lex(SpannedError),

    /// Parsing failed.
    Parse(SpannedError),

    /// Semantic analysis rejected the program.
    Analyze(SpannedError),

    /// C code generation failed (an AST shape the emitter doesn't support,
    /// e.g. an unsupported `for`-loop iterable).
    Codegen(SpannedError),

    /// Reading the source file, or writing the generated `.c` file, failed.
    Io(String),

    /// The host C compiler could not be invoked, or exited non-zero.
    Link(String),
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::Lex(e) => write!(f, "tokenizing failed: {e}"),
            CompileError::Parse(e) => write!(f, "parsing failed: {e}"),
            CompileError::Analyze(e) => write!(f, "semantic analysis failed: {e}"),
            CompileError::Codegen(e) => write!(f, "code generation failed: {e}"),
            CompileError::Io(msg) => write!(f, "I/O error: {msg}"),
            CompileError::Link(msg) => write!(f, "C compilation failed: {msg}"),
        }
    }
}

impl std::error::Error for CompileError {}

impl From<std::io::Error> for CompileError {
    fn from(e: std::io::Error) -> Self {
        CompileError::Io(e.to_string())
    }
}
