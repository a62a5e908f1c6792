//! End-to-end compilation pipeline: source text to linked executable.
//!
//! ```text
//! source ──lex──▶ tokens ──parse──▶ AST ──analyze──▶ symbol table
//!                                          │
//!                                          ▼
//!                                    codegen_c::generate
//!                                          │
//!                                          ▼
//!                                     <input>.c  ──host cc──▶ executable
//! ```
//!
//! Grounded on the original `main.c`'s `read_file` → `lexer_tokenize` →
//! `parser_parse` → `analyze_ast` → `codegen_generate` → `write_file` →
//! `compile_c_code` sequence, reshaped into a `Result`-returning pipeline in
//! the teacher's `compile_to_dir`/`compile_and_run` style (spec §6's debug
//! env vars correspond to the original's `PYRINAS_DEBUG_*` dumps).

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use pyrinas_language::ast::Module;

use crate::codegen_c;
use crate::error::CompileError;

/// Everything the driver produced, for callers that want the intermediate
/// artifacts (used by the CLI's debug dumps and by integration tests).
pub struct CompileOutput {
    pub c_source: String,
    pub c_path: PathBuf,
    pub executable_path: PathBuf,
}

/// Runs lex → parse → analyze → codegen, writing the generated C beside
/// `input_path`, but does not invoke the host toolchain. Used by callers
/// that only want the translated C (and by [`compile_file`] internally).
pub fn translate_to_c(input_path: &Path) -> Result<(Module, String), CompileError> {
    let source = fs::read_to_string(input_path)
        .map_err(|e| CompileError::Io(format!("cannot read '{}': {e}", input_path.display())))?;

    let tokens = pyrinas_language::Lexer::lex(&source);
    if env::var_os("PYRINAS_DEBUG_TOKENS").is_some() {
        println!("\nTokens:");
        for tok in &tokens {
            print!("{tok} ");
        }
        println!("\n");
    }

    let module = pyrinas_language::Parser::new(tokens).parse_module().map_err(CompileError::Parse)?;
    if env::var_os("PYRINAS_DEBUG_AST").is_some() {
        println!("\nAST:\n{module:#?}\n");
    }

    let current_file = input_path.to_string_lossy();
    let table = pyrinas_language::analyze(&module, &current_file).map_err(CompileError::Analyze)?;

    let c_source = codegen_c::generate(&module, &table).map_err(CompileError::Codegen)?;
    if env::var_os("PYRINAS_DEBUG_CODEGEN").is_some() {
        println!("\nGenerated C code:\n{c_source}\n");
    }

    Ok((module, c_source))
}

/// Compiles a single pyrinas source file into a native executable (spec §6).
///
/// Writes `<input-basename>.c` beside the input, then invokes the host C
/// compiler linking against the runtime (`-I <runtime-dir> -lm`).
pub fn compile_file(input_path: &Path, output_path: &Path, runtime_dir: &Path) -> Result<CompileOutput, CompileError> {
    let (_module, c_source) = translate_to_c(input_path)?;

    let c_path = c_source_path(input_path);
    fs::write(&c_path, &c_source).map_err(|e| CompileError::Io(format!("cannot write '{}': {e}", c_path.display())))?;

    link_c_file(&c_path, output_path, runtime_dir)?;

    Ok(CompileOutput { c_source, c_path, executable_path: output_path.to_path_buf() })
}

/// `<input>.c`, replacing the input's extension (or appending `.c` if it has
/// none), matching the original's `strrchr(c_filename, '.')` logic.
fn c_source_path(input_path: &Path) -> PathBuf {
    input_path.with_extension("c")
}

/// Invokes the host C toolchain (spec §4.4 "Linker step", §6 "Output
/// artifacts"): `cc -I <runtime_dir> -o <output> <c_file> <runtime_dir>/runtime.o -lm`.
fn link_c_file(c_file: &Path, output: &Path, runtime_dir: &Path) -> Result<(), CompileError> {
    let runtime_object = runtime_dir.join("runtime.o");
    let status = Command::new(cc_binary())
        .arg("-I")
        .arg(runtime_dir)
        .arg("-o")
        .arg(output)
        .arg(c_file)
        .arg(&runtime_object)
        .arg("-lm")
        .status()
        .map_err(|e| CompileError::Link(format!("failed to invoke host C compiler: {e}")))?;

    if !status.success() {
        return Err(CompileError::Link(format!(
            "C compilation failed with {status}"
        )));
    }
    Ok(())
}

fn cc_binary() -> String {
    env::var("CC").unwrap_or_else(|_| "cc".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn translates_hello_world_to_c_containing_main() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("hello.pyr");
        let mut f = fs::File::create(&input).unwrap();
        writeln!(f, "def main() -> void:\n    print(1)").unwrap();

        let (_module, c_source) = translate_to_c(&input).unwrap();
        assert!(c_source.contains("int main()"));
        assert!(c_source.contains("printf"));
    }

    #[test]
    fn c_source_path_replaces_extension() {
        assert_eq!(c_source_path(Path::new("prog.pyr")), PathBuf::from("prog.c"));
        assert_eq!(c_source_path(Path::new("prog")), PathBuf::from("prog.c"));
    }
}
