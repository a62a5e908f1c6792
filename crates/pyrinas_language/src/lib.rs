//! # pyrinas-language
//!
//! The front end of the pyrinas compiler: lexing, parsing, the AST, and the
//! two-pass semantic analyzer. Everything here works over source text and
//! produces either a type-checked [`ast::Module`] plus a populated
//! [`analysis::SymbolTable`], or the first [`pyrinas_base::SpannedError`]
//! encountered. Turning an analyzed module into C is
//! [`pyrinas_compile`](../pyrinas_compile/index.html)'s job.

pub mod analysis;
pub mod ast;
pub mod lexer;
pub mod parser;
pub mod token;
pub mod ty;

pub use analysis::{analyze, SymbolTable};
pub use ast::Module;
pub use lexer::Lexer;
pub use parser::Parser;
pub use ty::Ty;

/// Runs the lexer and parser over `source`, returning the parsed module or
/// the first error encountered. Mirrors spec §4's Lexer → Parser handoff.
pub fn parse(source: &str) -> pyrinas_base::Result<Module> {
    let tokens = Lexer::lex(source);
    Parser::new(tokens).parse_module()
}
