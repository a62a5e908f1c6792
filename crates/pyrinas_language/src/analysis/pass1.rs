//! Pass 1: top-level declaration discovery (spec §4.3).
//!
//! Populates a [`SymbolTable`] from every `FunctionDef`/`ClassDef` at module
//! scope. Order-independent: a function can call another function defined
//! later in the file, since both are registered before Pass 2 walks any body.

use pyrinas_base::{Result, Span, SpannedError};

use super::symbol::{MethodSig, Symbol, SymbolTable};
use crate::ast::{ClassDef, Constant, ExprKind, FunctionDef, Module, Stmt, StmtKind};
use crate::ty::Ty;

pub fn run(module: &Module, current_file: &str) -> Result<SymbolTable> {
    let mut table = SymbolTable::new();

    for stmt in &module.body {
        match &stmt.node {
            StmtKind::FunctionDef(f) => declare_function(&mut table, f, stmt.line)?,
            StmtKind::ClassDef(c) => declare_class(&mut table, c, stmt.line)?,
            _ => {}
        }
    }

    let is_library_module = current_file.contains("/modules/") || current_file.ends_with("_utils.pyr");
    if !is_library_module && !matches!(table.get("main"), Some(Symbol::Function { .. })) {
        return Err(SpannedError::new("main function not found", Span::default()));
    }

    Ok(table)
}

fn declare_function(table: &mut SymbolTable, f: &FunctionDef, line: Option<u32>) -> Result<()> {
    if table.contains(&f.name) {
        return Err(at(line, "Function already defined"));
    }
    let params = f.params.iter().map(|p| p.annotation.clone()).collect();
    let return_type = f.returns.clone().unwrap_or(Ty::Void);
    table.insert(f.name.clone(), Symbol::Function { params, return_type });
    Ok(())
}

fn declare_class(table: &mut SymbolTable, c: &ClassDef, line: Option<u32>) -> Result<()> {
    if table.contains(&c.name) {
        return Err(at(line, "Class already defined"));
    }
    if c.bases.iter().any(|b| b == "Enum") {
        let mut members = Vec::new();
        for item in &c.body {
            match &item.node {
                StmtKind::Pass => {}
                StmtKind::Assign(assign) if assign.targets.len() == 1 => {
                    let name = match &assign.targets[0].node {
                        ExprKind::Name { id, .. } => id.clone(),
                        _ => return Err(at(item.line, "Enum can only contain member assignments")),
                    };
                    let value = match &assign.value.node {
                        ExprKind::Constant(Constant::Int(n)) => *n,
                        _ => return Err(at(item.line, "Enum can only contain member assignments")),
                    };
                    members.push((name, value));
                }
                _ => return Err(at(item.line, "Enum can only contain member assignments")),
            }
        }
        table.insert(c.name.clone(), Symbol::Enum { members });
        return Ok(());
    }

    let has_field = c.body.iter().any(|s| matches!(s.node, StmtKind::AnnAssign(_)));
    let has_real_method = c.body.iter().any(|s| match &s.node {
        StmtKind::FunctionDef(f) => !is_lone_pass(&f.body),
        _ => false,
    });

    if has_field || has_real_method {
        let mut fields = Vec::new();
        let mut methods = Vec::new();
        for item in &c.body {
            match &item.node {
                StmtKind::AnnAssign(a) => {
                    if let ExprKind::Name { id, .. } = &a.target.node {
                        fields.push((id.clone(), a.annotation.clone()));
                    }
                }
                StmtKind::FunctionDef(f) => methods.push(method_sig(f)),
                _ => {}
            }
        }
        table.insert(c.name.clone(), Symbol::Struct { fields, methods });
    } else {
        let methods = c
            .body
            .iter()
            .filter_map(|s| match &s.node {
                StmtKind::FunctionDef(f) => Some(method_sig(f)),
                _ => Option::None,
            })
            .collect();
        table.insert(c.name.clone(), Symbol::Interface { methods });
    }
    Ok(())
}

fn method_sig(f: &FunctionDef) -> MethodSig {
    let params = f.params.iter().skip(1).map(|p| p.annotation.clone()).collect();
    MethodSig { name: f.name.clone(), params, return_type: f.returns.clone().unwrap_or(Ty::Void) }
}

fn is_lone_pass(body: &[Stmt]) -> bool {
    matches!(body, [single] if matches!(single.node, StmtKind::Pass))
}

/// AST nodes only carry a line number, not a byte span (spec §3), so
/// analyzer errors fold the line into the message rather than pointing
/// `SpannedError::span` at real source bytes — the original tool's own
/// diagnostics are line-numbered for the same reason.
fn at(line: Option<u32>, message: &str) -> SpannedError {
    match line {
        Some(line) => SpannedError::new(format!("line {line}: {message}"), Span::default()),
        Option::None => SpannedError::new(message, Span::default()),
    }
}
