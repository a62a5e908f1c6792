//! pyrinas - Standalone binary
//!
//! Thin wrapper around [`pyrinas_cli::run_cli`], handling error display and
//! exit codes. All command logic lives in the library crate for testability.
//!
//! # Exit Codes
//!
//! - `0` - Success
//! - `1` - Error (message printed to stderr, spec §6 "Exit codes")

fn main() {
    if let Err(e) = pyrinas_cli::run_cli() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
