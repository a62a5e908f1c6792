//! Library half of the `pyrinas` binary: argument parsing and dispatch live
//! here so they can be exercised by integration tests without spawning a
//! subprocess. [`main`](../../src/main.rs.html) is a thin wrapper.

pub mod cli;

pub use cli::run_cli;
