//! Pass 2: function bodies, scopes, and type checking (spec §4.3).

use std::collections::HashMap;

use pyrinas_base::{Result, Span, SpannedError};

use super::symbol::{Symbol, SymbolTable};
use crate::ast::{ClassDef, Constant, Expr, ExprKind, FunctionDef, Module, Stmt, StmtKind, UnaryOp};
use crate::ty::Ty;

/// A chain of symbol lists, leaf scope first (spec §3 "Scope: a linked
/// chain of symbol lists, leaf → root"). Implemented as a `Vec` stack rather
/// than heap nodes with parent back-references: the analyzer only ever
/// walks outward from the innermost scope, so a stack gives identical
/// lookup semantics without a non-owning pointer into earlier frames.
#[derive(Debug, Default)]
pub struct Scope {
    frames: Vec<HashMap<String, Ty>>,
}

impl Scope {
    pub fn new() -> Self {
        Self { frames: vec![HashMap::new()] }
    }

    pub fn push(&mut self) {
        self.frames.push(HashMap::new());
    }

    pub fn pop(&mut self) {
        self.frames.pop();
    }

    pub fn declare(&mut self, name: impl Into<String>, ty: Ty) {
        self.frames.last_mut().expect("scope stack never empty").insert(name.into(), ty);
    }

    pub fn declared_in_current(&self, name: &str) -> bool {
        self.frames.last().expect("scope stack never empty").contains_key(name)
    }

    pub fn lookup(&self, name: &str) -> Option<&Ty> {
        self.frames.iter().rev().find_map(|frame| frame.get(name))
    }
}

struct Analyzer<'a> {
    table: &'a SymbolTable,
    scope: Scope,
    loop_depth: u32,
    current_return_type: Option<Ty>,
}

pub fn run(module: &Module, table: &SymbolTable) -> Result<()> {
    let mut analyzer = Analyzer { table, scope: Scope::new(), loop_depth: 0, current_return_type: Option::None };
    for stmt in &module.body {
        match &stmt.node {
            StmtKind::FunctionDef(f) => analyzer.check_function(f)?,
            StmtKind::ClassDef(c) => analyzer.check_class(c)?,
            _ => {}
        }
    }
    Ok(())
}

impl<'a> Analyzer<'a> {
    fn check_function(&mut self, f: &FunctionDef) -> Result<()> {
        self.scope.push();
        for p in &f.params {
            self.scope.declare(p.name.clone(), p.annotation.clone());
        }
        let saved_return = self.current_return_type.replace(f.returns.clone().unwrap_or(Ty::Void));
        for stmt in &f.body {
            self.check_stmt(stmt)?;
        }
        self.current_return_type = saved_return;
        self.scope.pop();
        Ok(())
    }

    fn check_class(&mut self, c: &ClassDef) -> Result<()> {
        for item in &c.body {
            if let StmtKind::FunctionDef(f) = &item.node {
                self.check_function(f)?;
            }
        }
        Ok(())
    }

    fn check_stmt(&mut self, stmt: &Stmt) -> Result<()> {
        match &stmt.node {
            StmtKind::AnnAssign(a) => {
                let name = match &a.target.node {
                    ExprKind::Name { id, .. } => id.clone(),
                    _ => return Err(self.at(stmt.line, "Variable not declared")),
                };
                if self.scope.declared_in_current(&name) {
                    return Err(self.at(stmt.line, "Variable already declared in this scope"));
                }
                if let Some(value) = &a.value {
                    let value_ty = self.infer(value)?;
                    if !types_compatible(&value_ty, &a.annotation) {
                        return Err(self.at(stmt.line, "Type mismatch in assignment"));
                    }
                }
                self.scope.declare(name, a.annotation.clone());
                Ok(())
            }
            StmtKind::Assign(a) => {
                for target in &a.targets {
                    match &target.node {
                        ExprKind::Name { id, .. } => {
                            let value_ty = self.infer(&a.value)?;
                            if let Some(declared) = self.scope.lookup(id).cloned() {
                                if !types_compatible(&value_ty, &declared) {
                                    return Err(self.at(stmt.line, "Type mismatch in assignment"));
                                }
                            } else {
                                return Err(self.at(stmt.line, "Variable not declared"));
                            }
                        }
                        ExprKind::Subscript { .. } | ExprKind::Attribute { .. } => {
                            self.infer(&a.value)?;
                            self.infer(target)?;
                        }
                        _ => return Err(self.at(stmt.line, "Variable not declared")),
                    }
                }
                Ok(())
            }
            StmtKind::If(i) => {
                self.infer(&i.test)?;
                for s in &i.body {
                    self.check_stmt(s)?;
                }
                for s in &i.orelse {
                    self.check_stmt(s)?;
                }
                Ok(())
            }
            StmtKind::While(w) => {
                self.infer(&w.test)?;
                self.loop_depth += 1;
                for s in &w.body {
                    self.check_stmt(s)?;
                }
                self.loop_depth -= 1;
                Ok(())
            }
            StmtKind::For(f) => {
                self.infer(&f.iter)?;
                self.scope.push();
                self.scope.declare(f.target.clone(), Ty::Int);
                self.loop_depth += 1;
                for s in &f.body {
                    self.check_stmt(s)?;
                }
                self.loop_depth -= 1;
                self.scope.pop();
                Ok(())
            }
            StmtKind::Break(_) | StmtKind::Continue(_) => {
                if self.loop_depth == 0 {
                    Err(self.at(stmt.line, "break/continue outside loop"))
                } else {
                    Ok(())
                }
            }
            StmtKind::Return(r) => {
                if let Some(value) = &r.value {
                    self.infer(value)?;
                }
                Ok(())
            }
            StmtKind::Expr(e) => {
                self.infer(e)?;
                Ok(())
            }
            StmtKind::Pass => Ok(()),
            StmtKind::FunctionDef(f) => self.check_function(f),
            StmtKind::ClassDef(c) => self.check_class(c),
        }
    }

    fn infer(&mut self, e: &Expr) -> Result<Ty> {
        infer_with(e, self.table, &self.scope, spanned)
    }

    fn at(&self, line: Option<u32>, message: &str) -> SpannedError {
        spanned(line, message)
    }
}

/// AST nodes only carry a line number, not a byte span (spec §3), so
/// analyzer errors fold the line into the message rather than pointing
/// `SpannedError::span` at real source bytes.
fn spanned(line: Option<u32>, message: &str) -> SpannedError {
    match line {
        Some(line) => SpannedError::new(format!("line {line}: {message}"), Span::default()),
        Option::None => SpannedError::new(message, Span::default()),
    }
}

/// Infers the static type of `e` under `table`/`scope`. Exposed so the C
/// emitter can reuse the exact same rules for print-format specialization
/// (spec §4.4) instead of re-deriving them.
pub fn infer_expr_type(e: &Expr, table: &SymbolTable, scope: &Scope) -> Result<Ty> {
    infer_with(e, table, scope, spanned)
}

fn infer_with(
    e: &Expr,
    table: &SymbolTable,
    scope: &Scope,
    err: impl Fn(Option<u32>, &str) -> SpannedError + Copy,
) -> Result<Ty> {
    let line = e.line;
    match &e.node {
        ExprKind::Name { id, .. } => {
            scope.lookup(id).cloned().ok_or_else(|| err(line, "Variable not declared"))
        }
        ExprKind::Constant(c) => Ok(match c {
            Constant::Int(_) => Ty::Int,
            Constant::Float(_) => Ty::Float,
            Constant::Str(_) => Ty::Str,
            Constant::Bool(_) => Ty::Bool,
            Constant::None => Ty::None,
        }),
        ExprKind::BinOp { left, op: _, right } => {
            let lt = infer_with(left, table, scope, err)?;
            let rt = infer_with(right, table, scope, err)?;
            Ok(if lt == Ty::Float || rt == Ty::Float {
                Ty::Float
            } else {
                Ty::Int
            })
        }
        ExprKind::UnaryOp { op, operand } => {
            let ty = infer_with(operand, table, scope, err)?;
            Ok(match op {
                UnaryOp::Not => Ty::Bool,
                UnaryOp::Neg | UnaryOp::Pos => ty,
            })
        }
        ExprKind::BoolOp { op: _, values } => {
            for v in values {
                let ty = infer_with(v, table, scope, err)?;
                if ty != Ty::Bool {
                    return Err(err(line, "Cannot compare incompatible types"));
                }
            }
            Ok(Ty::Bool)
        }
        ExprKind::Compare { left, comparators, .. } => {
            let mut left_ty = infer_with(left, table, scope, err)?;
            for comparator in comparators {
                let right_ty = infer_with(comparator, table, scope, err)?;
                let both_numeric = is_numeric(&left_ty) && is_numeric(&right_ty);
                if !both_numeric && !left_ty.compatible_with(&right_ty) && !right_ty.compatible_with(&left_ty) {
                    return Err(err(line, "Cannot compare incompatible types"));
                }
                left_ty = right_ty;
            }
            Ok(Ty::Bool)
        }
        ExprKind::Call { func, args } => infer_call(func, args, table, scope, err, line),
        ExprKind::Attribute { value, attr, .. } => {
            let receiver = infer_with(value, table, scope, err)?;
            let struct_name = match &receiver {
                Ty::User(name) => name.clone(),
                _ => return Err(err(line, "Cannot access attribute on non-struct type")),
            };
            let symbol = table.get(&struct_name).ok_or_else(|| err(line, "Cannot access attribute on non-struct type"))?;
            symbol.field_type(attr).cloned().ok_or_else(|| err(line, "Struct field not found"))
        }
        // Permissive defaults per spec §9: complete Subscript beyond the
        // interface stub (return element type for array/ptr) while still
        // accepting anything that isn't one, matching the source's
        // leniency for unrecognized receiver shapes.
        ExprKind::Subscript { value, .. } => {
            let receiver = infer_with(value, table, scope, err)?;
            Ok(match receiver {
                Ty::Array(inner, _) | Ty::Ptr(inner) => *inner,
                other => other,
            })
        }
    }
}

fn infer_call(
    func: &Expr,
    args: &[Expr],
    table: &SymbolTable,
    scope: &Scope,
    err: impl Fn(Option<u32>, &str) -> SpannedError + Copy,
    line: Option<u32>,
) -> Result<Ty> {
    let name = match &func.node {
        ExprKind::Name { id, .. } => id.as_str(),
        _ => {
            for a in args {
                infer_with(a, table, scope, err)?;
            }
            return Ok(Ty::Void);
        }
    };

    match name {
        "print" => {
            if args.len() != 1 {
                return Err(err(line, "Function argument count mismatch"));
            }
            infer_with(&args[0], table, scope, err)?;
            Ok(Ty::Void)
        }
        "range" => {
            if args.len() != 1 {
                return Err(err(line, "Function argument count mismatch"));
            }
            let ty = infer_with(&args[0], table, scope, err)?;
            if ty != Ty::Int {
                return Err(err(line, "Function argument type mismatch"));
            }
            Ok(Ty::User("range_object".to_string()))
        }
        _ => match table.get(name) {
            Some(Symbol::Function { params, return_type }) => {
                if args.len() != params.len() {
                    return Err(err(line, "Function argument count mismatch"));
                }
                for (arg, param_ty) in args.iter().zip(params) {
                    let arg_ty = infer_with(arg, table, scope, err)?;
                    if !arg_ty.compatible_with(param_ty) {
                        return Err(err(line, "Function argument type mismatch"));
                    }
                }
                Ok(return_type.clone())
            }
            _ => {
                for a in args {
                    infer_with(a, table, scope, err)?;
                }
                Ok(Ty::Void)
            }
        },
    }
}

fn is_numeric(ty: &Ty) -> bool {
    matches!(ty, Ty::Int | Ty::Float)
}

/// `types_compatible(a, b)` from spec §4.3: `a` is the inferred value type,
/// `b` the declared/target type.
pub fn types_compatible(a: &Ty, b: &Ty) -> bool {
    if a == b {
        return true;
    }
    if *b == Ty::Bool && *a == Ty::Int {
        return true;
    }
    if let Ty::Ptr(_) = a {
        if b.is_generic_ptr() {
            return true;
        }
    }
    false
}
