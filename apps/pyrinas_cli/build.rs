//! Compiles `runtime/pyrinas.c` once per build and bakes the resulting
//! object's directory into the binary, so `pyrinas-cli` can link generated
//! C programs against it without requiring callers to pass a runtime path
//! on the command line (spec §6 "Output artifacts": `<runtime>/runtime.o`).

use std::env;
use std::path::Path;

fn main() {
    let runtime_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../runtime");
    println!("cargo:rerun-if-changed={}", runtime_dir.join("pyrinas.c").display());
    println!("cargo:rerun-if-changed={}", runtime_dir.join("pyrinas.h").display());

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR set by cargo");
    let object_path = Path::new(&out_dir).join("runtime.o");

    let compiler = cc::Build::new().include(&runtime_dir).get_compiler();
    let mut cmd = compiler.to_command();
    cmd.arg("-c").arg(runtime_dir.join("pyrinas.c")).arg("-o").arg(&object_path);
    let status = cmd.status().expect("failed to invoke host C compiler for the pyrinas runtime");
    assert!(status.success(), "compiling runtime/pyrinas.c failed");

    std::fs::copy(runtime_dir.join("pyrinas.h"), Path::new(&out_dir).join("pyrinas.h"))
        .expect("copy pyrinas.h next to the compiled runtime object");

    println!("cargo:rustc-env=PYRINAS_RUNTIME_DIR={out_dir}");
}
