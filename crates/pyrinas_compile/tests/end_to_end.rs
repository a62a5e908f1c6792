//! End-to-end pipeline tests: source text straight through to generated C,
//! or to a rejected program, without touching the host C toolchain.
//!
//! Each case mirrors one of spec §8's worked scenarios.

use std::fs;
use std::io::Write;

use pyrinas_compile::{translate_to_c, CompileError};

fn write_source(dir: &tempfile::TempDir, name: &str, source: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut f = fs::File::create(&path).unwrap();
    f.write_all(source.as_bytes()).unwrap();
    path
}

#[test]
fn minimal_hello_world_compiles_to_c() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(&dir, "hello.pyr", "def main() -> void:\n    print(\"hello\")\n");

    let (_module, c_source) = translate_to_c(&input).unwrap();
    assert!(c_source.contains("int main()"));
    assert!(c_source.contains("#include"));
    assert!(c_source.contains("printf"));
}

#[test]
fn type_mismatched_assignment_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(
        &dir,
        "bad_assign.pyr",
        "def main() -> void:\n    x: int = \"not an int\"\n",
    );

    let err = translate_to_c(&input).unwrap_err();
    match err {
        CompileError::Analyze(spanned) => {
            assert!(spanned.message.contains("Type mismatch in assignment"));
        }
        other => panic!("expected Analyze error, got {other:?}"),
    }
}

#[test]
fn struct_definition_and_field_access_compiles() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(
        &dir,
        "point.pyr",
        "class Point:\n    x: int\n    y: int\n\ndef main() -> void:\n    p: Point\n    print(p.x)\n",
    );

    let (_module, c_source) = translate_to_c(&input).unwrap();
    assert!(c_source.contains("struct Point"));
    assert!(c_source.contains(".x"));
}

#[test]
fn enum_definition_compiles_to_c_enum() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(
        &dir,
        "color.pyr",
        "class Color(Enum):\n    RED = 0\n    GREEN = 1\n\ndef main() -> void:\n    pass\n",
    );

    let (_module, c_source) = translate_to_c(&input).unwrap();
    assert!(c_source.contains("enum Color"));
    assert!(c_source.contains("Color_RED = 0"));
    assert!(c_source.contains("Color_GREEN = 1"));
}

#[test]
fn indentation_error_is_reported_as_a_parse_failure() {
    let dir = tempfile::tempdir().unwrap();
    // Four-space body dedents to a column that matches no enclosing indent
    // level (spec §4.1's "dedent must match an existing indent level").
    let input = write_source(
        &dir,
        "bad_indent.pyr",
        "def main() -> void:\n    x: int = 1\n  y: int = 2\n",
    );

    let err = translate_to_c(&input).unwrap_err();
    assert!(matches!(err, CompileError::Parse(_)));
}

#[test]
fn undeclared_variable_reference_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(
        &dir,
        "undeclared.pyr",
        "def main() -> void:\n    print(missing)\n",
    );

    let err = translate_to_c(&input).unwrap_err();
    match err {
        CompileError::Analyze(spanned) => {
            assert!(spanned.message.contains("Variable not declared"));
        }
        other => panic!("expected Analyze error, got {other:?}"),
    }
}

#[test]
fn missing_main_function_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(&dir, "no_main.pyr", "def helper() -> void:\n    print(1)\n");

    let err = translate_to_c(&input).unwrap_err();
    match err {
        CompileError::Analyze(spanned) => {
            assert!(spanned.message.contains("main function not found"));
        }
        other => panic!("expected Analyze error, got {other:?}"),
    }
}

#[test]
fn unreadable_input_path_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does_not_exist.pyr");

    let err = translate_to_c(&missing).unwrap_err();
    assert!(matches!(err, CompileError::Io(_)));
}
