//! The fixed `#include` buffer (spec §4.4: "four concatenated buffers:
//! `#include` (fixed header), struct/enum definitions, function definitions,
//! and the `main` body").
//!
//! Unlike a design that inlines the whole runtime as a string literal baked
//! into the emitter, pyrinas ships `runtime/pyrinas.h`/`pyrinas.c` as real
//! files compiled once by `apps/pyrinas_cli`'s build script and linked in
//! (spec §6 "Runtime contract"); the header buffer only needs to pull in
//! the declarations.
pub(super) const C_HEADER: &str = "#include <stdio.h>\n#include <stdlib.h>\n#include <string.h>\n#include \"pyrinas.h\"\n\n";
