//! Two-pass semantic analyzer (spec §4.3): declarations first, then bodies.

mod pass1;
mod pass2;
mod symbol;

use pyrinas_base::Result;

use crate::ast::Module;

pub use pass2::{infer_expr_type, types_compatible, Scope};
pub use symbol::{MethodSig, Symbol, SymbolTable};

/// Runs both passes over `module` and returns the populated symbol table, or
/// the first error encountered by either pass. `current_file` feeds the
/// library-module exception to the "must declare `main`" rule (spec §4.3).
pub fn analyze(module: &Module, current_file: &str) -> Result<SymbolTable> {
    let table = pass1::run(module, current_file)?;
    pass2::run(module, &table)?;
    Ok(table)
}
