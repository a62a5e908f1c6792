//! C emitter entry point (spec §4.4): concatenates the four buffers
//! (`#include` header, struct/enum defs, function defs, `main` body) into
//! one `.c` file.

mod emit;
mod runtime;
mod types;

use std::collections::HashSet;
use std::fmt::Write as _;

use pyrinas_base::Result;
use pyrinas_language::analysis::{Symbol, SymbolTable};
use pyrinas_language::ast::{FunctionDef, Module, StmtKind};
use pyrinas_language::Ty;

use emit::{codegen_stmt, Ctx};
use runtime::C_HEADER;
use types::{c_type_str, escape_c_ident};

pub fn generate(module: &Module, table: &SymbolTable) -> Result<String> {
    let mut struct_enum_defs = String::new();
    codegen_struct_defs(table, &mut struct_enum_defs);
    codegen_enum_defs(table, &mut struct_enum_defs);

    let functions: Vec<&FunctionDef> = module
        .body
        .iter()
        .filter_map(|s| match &s.node {
            StmtKind::FunctionDef(f) => Some(f),
            _ => Option::None,
        })
        .collect();

    let mut forward_decls = String::new();
    for f in &functions {
        if f.name == "main" {
            continue;
        }
        writeln!(forward_decls, "{};", function_signature(f, table)).unwrap();
    }
    forward_decls.push('\n');

    let mut function_defs = String::new();
    function_defs.push_str(&forward_decls);
    for f in &functions {
        if f.name == "main" {
            continue;
        }
        codegen_function(f, table, &mut function_defs)?;
    }

    let mut main_buf = String::new();
    if let Some(main_fn) = functions.iter().find(|f| f.name == "main") {
        writeln!(main_buf, "int main() {{").unwrap();
        let mut ctx = Ctx::new(table);
        for s in &main_fn.body {
            codegen_stmt(s, &mut ctx, &mut main_buf, 1)?;
        }
        if !ends_with_return(&main_fn.body) {
            writeln!(main_buf, "    return 0;").unwrap();
        }
        writeln!(main_buf, "}}").unwrap();
    }

    let mut out = String::with_capacity(4096);
    out.push_str(C_HEADER);
    out.push_str(&struct_enum_defs);
    out.push_str(&function_defs);
    out.push_str(&main_buf);
    Ok(out)
}

fn ends_with_return(body: &[pyrinas_language::ast::Stmt]) -> bool {
    matches!(body.last().map(|s| &s.node), Some(StmtKind::Return(_)))
}

fn function_signature(f: &FunctionDef, table: &SymbolTable) -> String {
    let return_type = match table.get(&f.name) {
        Some(Symbol::Function { return_type, .. }) => return_type.clone(),
        _ => f.returns.clone().unwrap_or(Ty::Void),
    };
    let params: Vec<String> =
        f.params.iter().map(|p| format!("{} {}", c_type_str(&p.annotation), escape_c_ident(&p.name))).collect();
    format!("{} {}({})", c_type_str(&return_type), escape_c_ident(&f.name), params.join(", "))
}

fn codegen_function(f: &FunctionDef, table: &SymbolTable, out: &mut String) -> Result<()> {
    writeln!(out, "{} {{", function_signature(f, table)).unwrap();
    let mut ctx = Ctx::new(table);
    for p in &f.params {
        ctx.scope.declare(p.name.clone(), p.annotation.clone());
    }
    for s in &f.body {
        codegen_stmt(s, &mut ctx, out, 1)?;
    }
    writeln!(out, "}}\n").unwrap();
    Ok(())
}

/// Struct field types that name another struct are emitted first, so a
/// field of struct type never forward-references an undefined C type
/// (spec §4.4 "Struct emission").
fn codegen_struct_defs(table: &SymbolTable, out: &mut String) {
    let mut structs: Vec<(&String, &[(String, Ty)])> = table
        .iter_in_order()
        .filter_map(|(name, sym)| match sym {
            Symbol::Struct { fields, .. } => Some((name, fields.as_slice())),
            _ => Option::None,
        })
        .collect();

    let mut emitted = HashSet::new();
    let mut ordered = Vec::new();
    while !structs.is_empty() {
        let before = structs.len();
        structs.retain(|(name, fields)| {
            let deps_ready = fields.iter().all(|(_, ty)| match ty {
                Ty::User(dep) if table.get(dep).map(|s| matches!(s, Symbol::Struct { .. })).unwrap_or(false) => {
                    emitted.contains(dep.as_str())
                }
                _ => true,
            });
            if deps_ready {
                emitted.insert(name.as_str());
                ordered.push((*name, *fields));
                false
            } else {
                true
            }
        });
        if structs.len() == before {
            // Circular field dependency: emit the rest as-is rather than
            // spin forever (spec doesn't define recursive-by-value structs).
            ordered.extend(structs.drain(..));
            break;
        }
    }

    for (name, fields) in ordered {
        writeln!(out, "struct {} {{", escape_c_ident(name)).unwrap();
        for (field_name, ty) in fields {
            writeln!(out, "    {} {};", c_type_str(ty), escape_c_ident(field_name)).unwrap();
        }
        writeln!(out, "}};\n").unwrap();
    }
}

fn codegen_enum_defs(table: &SymbolTable, out: &mut String) {
    for (name, sym) in table.iter_in_order() {
        if let Symbol::Enum { members } = sym {
            let escaped = escape_c_ident(name);
            write!(out, "enum {} {{ ", escaped).unwrap();
            let parts: Vec<String> = members.iter().map(|(m, v)| format!("{escaped}_{m} = {v}")).collect();
            writeln!(out, "{} }};\n", parts.join(", ")).unwrap();
        }
    }
}
