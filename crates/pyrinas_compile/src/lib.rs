//! # pyrinas-compile
//!
//! The back end of the pyrinas compiler: translates an analyzed
//! [`pyrinas_language::ast::Module`] into portable C ([`codegen_c`]) and
//! drives the host C toolchain to link it into an executable ([`compile`]).

pub mod codegen_c;
pub mod compile;
pub mod error;

pub use compile::{compile_file, translate_to_c, CompileOutput};
pub use error::CompileError;
