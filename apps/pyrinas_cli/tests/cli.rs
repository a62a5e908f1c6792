//! Black-box CLI tests: invoke the built `pyrinas` binary directly via
//! [`std::process::Command`] and inspect its exit code and output streams,
//! rather than linking against the library crates.
//!
//! This end-to-end pass depends on a working host C toolchain (`cc`), the
//! same dependency the CLI itself has at runtime (spec §6 "Linker step").

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

fn pyrinas_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_pyrinas"))
}

fn write_source(dir: &tempfile::TempDir, name: &str, source: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut f = fs::File::create(&path).unwrap();
    f.write_all(source.as_bytes()).unwrap();
    path
}

#[test]
fn help_flag_exits_zero_and_prints_usage() {
    let output = Command::new(pyrinas_bin()).arg("--help").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("pyrinas"));
}

#[test]
fn version_flag_exits_zero() {
    let output = Command::new(pyrinas_bin()).arg("--version").output().unwrap();
    assert!(output.status.success());
}

#[test]
fn missing_input_argument_exits_nonzero() {
    let output = Command::new(pyrinas_bin()).output().unwrap();
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn unknown_flag_exits_nonzero_with_usage_on_stderr() {
    let output = Command::new(pyrinas_bin()).arg("--bogus-flag").output().unwrap();
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    assert!(!output.stderr.is_empty());
}

#[test]
fn compiling_a_malformed_program_exits_one_with_a_diagnostic_on_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(&dir, "bad.pyr", "def main() -> void:\n    print(missing)\n");
    let out = dir.path().join("bad.out");

    let output = Command::new(pyrinas_bin())
        .arg(&input)
        .arg("-o")
        .arg(&out)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error"));
    assert!(!out.exists());
}

#[test]
fn compiling_a_well_formed_program_links_a_runnable_executable() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(&dir, "hello.pyr", "def main() -> void:\n    print(\"hello\")\n");
    let out = dir.path().join("hello.out");

    let output = Command::new(pyrinas_bin())
        .arg(&input)
        .arg("-o")
        .arg(&out)
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(out.exists());

    let run = Command::new(&out).output().unwrap();
    assert!(run.status.success());
    assert!(String::from_utf8_lossy(&run.stdout).contains("hello"));
}
