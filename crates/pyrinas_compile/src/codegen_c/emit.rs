//! Statement and expression emission (spec §4.4).
//!
//! Spec §9's "Output cursor" note asks for the mutable `current_output`
//! pointer to be replaced with "an explicit buffer-selector parameter
//! threaded through emission routines" — every function here takes the
//! target buffer (`out: &mut String`) as an argument instead of holding a
//! shared cursor field, so there is nothing to save/restore on function
//! entry/exit.

use std::fmt::Write as _;

use pyrinas_base::{Result, SpannedError};
use pyrinas_language::analysis::{infer_expr_type, Scope, SymbolTable};
use pyrinas_language::ast::{
    Assign, BinOp, BoolOp, CmpOp, Constant, Expr, ExprKind, For, If, Return, Stmt, StmtKind, UnaryOp, While,
};
use pyrinas_language::Ty;

use super::types::{c_type_str, escape_c_ident, printf_format};

/// Per-function emission state: the symbol table (read-only) and a scope
/// tracking locally declared variable types, needed to pick `print`'s
/// format specifier and to resolve attribute/struct field types.
pub(super) struct Ctx<'a> {
    pub(super) table: &'a SymbolTable,
    pub(super) scope: Scope,
}

impl<'a> Ctx<'a> {
    pub(super) fn new(table: &'a SymbolTable) -> Self {
        Self { table, scope: Scope::new() }
    }

    fn infer(&self, e: &Expr) -> Ty {
        infer_expr_type(e, self.table, &self.scope).unwrap_or(Ty::Int)
    }
}

fn pad(out: &mut String, indent: u32) {
    for _ in 0..indent {
        out.push_str("    ");
    }
}

pub(super) fn codegen_stmt(stmt: &Stmt, ctx: &mut Ctx, out: &mut String, indent: u32) -> Result<()> {
    match &stmt.node {
        StmtKind::AnnAssign(a) => codegen_ann_assign(a, ctx, out, indent),
        StmtKind::Assign(a) => codegen_assign(a, ctx, out, indent),
        StmtKind::If(i) => codegen_if(i, ctx, out, indent),
        StmtKind::While(w) => codegen_while(w, ctx, out, indent),
        StmtKind::For(f) => codegen_for(f, ctx, out, indent),
        StmtKind::Break(_) => {
            pad(out, indent);
            writeln!(out, "break;").unwrap();
            Ok(())
        }
        StmtKind::Continue(_) => {
            pad(out, indent);
            writeln!(out, "continue;").unwrap();
            Ok(())
        }
        StmtKind::Return(r) => codegen_return(r, ctx, out, indent),
        StmtKind::Expr(e) => {
            pad(out, indent);
            writeln!(out, "{};", codegen_expr(e, ctx)).unwrap();
            Ok(())
        }
        StmtKind::Pass => Ok(()),
        // Nested defs/classes inside a function body have no surface
        // syntax to reach them (the grammar only produces these at module
        // scope) but the AST permits them structurally; treat as a no-op.
        StmtKind::FunctionDef(_) | StmtKind::ClassDef(_) => Ok(()),
    }
}

fn codegen_ann_assign(a: &pyrinas_language::ast::AnnAssign, ctx: &mut Ctx, out: &mut String, indent: u32) -> Result<()> {
    let name = match &a.target.node {
        ExprKind::Name { id, .. } => id.clone(),
        _ => return Err(SpannedError::new("Variable not declared", Default::default())),
    };
    pad(out, indent);
    let c_type = c_type_str(&a.annotation);
    match &a.value {
        Some(value) => writeln!(out, "{} {} = {};", c_type, escape_c_ident(&name), codegen_expr(value, ctx)).unwrap(),
        Option::None => writeln!(out, "{} {};", c_type, escape_c_ident(&name)).unwrap(),
    }
    ctx.scope.declare(name, a.annotation.clone());
    Ok(())
}

fn codegen_assign(a: &Assign, ctx: &mut Ctx, out: &mut String, indent: u32) -> Result<()> {
    for target in &a.targets {
        pad(out, indent);
        writeln!(out, "{} = {};", codegen_expr(target, ctx), codegen_expr(&a.value, ctx)).unwrap();
    }
    Ok(())
}

fn codegen_if(i: &If, ctx: &mut Ctx, out: &mut String, indent: u32) -> Result<()> {
    pad(out, indent);
    writeln!(out, "if ({}) {{", codegen_expr(&i.test, ctx)).unwrap();
    for s in &i.body {
        codegen_stmt(s, ctx, out, indent + 1)?;
    }
    pad(out, indent);
    if i.orelse.is_empty() {
        writeln!(out, "}}").unwrap();
    } else {
        writeln!(out, "}} else {{").unwrap();
        for s in &i.orelse {
            codegen_stmt(s, ctx, out, indent + 1)?;
        }
        pad(out, indent);
        writeln!(out, "}}").unwrap();
    }
    Ok(())
}

fn codegen_while(w: &While, ctx: &mut Ctx, out: &mut String, indent: u32) -> Result<()> {
    pad(out, indent);
    writeln!(out, "while ({}) {{", codegen_expr(&w.test, ctx)).unwrap();
    for s in &w.body {
        codegen_stmt(s, ctx, out, indent + 1)?;
    }
    pad(out, indent);
    writeln!(out, "}}").unwrap();
    Ok(())
}

/// Lowers `for x in range(n): ...` to a C counting loop — the only
/// iterable the analyzer gives a defined type to (spec §4.3 treats `range`
/// specially; everything else is unconstrained, spec §9 leaves control-flow
/// lowering to the implementer). Iterating an `array[T, N]` by value is
/// also supported, since its static length is known at codegen time.
fn codegen_for(f: &For, ctx: &mut Ctx, out: &mut String, indent: u32) -> Result<()> {
    let c_name = escape_c_ident(&f.target);
    if let ExprKind::Call { func, args } = &f.iter.node {
        if matches!(&func.node, ExprKind::Name { id, .. } if id == "range") && args.len() == 1 {
            pad(out, indent);
            let bound = codegen_expr(&args[0], ctx);
            writeln!(out, "for (int {c_name} = 0; {c_name} < {bound}; {c_name}++) {{").unwrap();
            ctx.scope.push();
            ctx.scope.declare(f.target.clone(), Ty::Int);
            for s in &f.body {
                codegen_stmt(s, ctx, out, indent + 1)?;
            }
            ctx.scope.pop();
            pad(out, indent);
            writeln!(out, "}}").unwrap();
            return Ok(());
        }
    }

    let iter_ty = ctx.infer(&f.iter);
    let (elem_ty, len) = match iter_ty {
        Ty::Array(elem, len) => (*elem, len),
        _ => {
            return Err(SpannedError::new(
                "for-loop iterable must be range(...) or an array",
                Default::default(),
            ))
        }
    };
    pad(out, indent);
    let idx = format!("__{c_name}_i");
    writeln!(out, "for (int {idx} = 0; {idx} < {len}; {idx}++) {{").unwrap();
    ctx.scope.push();
    ctx.scope.declare(f.target.clone(), elem_ty.clone());
    pad(out, indent + 1);
    writeln!(out, "{} {} = {}[{}];", c_type_str(&elem_ty), c_name, codegen_expr(&f.iter, ctx), idx).unwrap();
    for s in &f.body {
        codegen_stmt(s, ctx, out, indent + 1)?;
    }
    ctx.scope.pop();
    pad(out, indent);
    writeln!(out, "}}").unwrap();
    Ok(())
}

fn codegen_return(r: &Return, ctx: &mut Ctx, out: &mut String, indent: u32) -> Result<()> {
    pad(out, indent);
    match &r.value {
        Some(value) => writeln!(out, "return {};", codegen_expr(value, ctx)).unwrap(),
        Option::None => writeln!(out, "return;").unwrap(),
    }
    Ok(())
}

pub(super) fn codegen_expr(e: &Expr, ctx: &Ctx) -> String {
    match &e.node {
        ExprKind::Name { id, .. } => escape_c_ident(id),
        ExprKind::Constant(c) => codegen_literal(c),
        ExprKind::BinOp { left, op, right } => {
            let c_op = match op {
                BinOp::Add => "+",
                BinOp::Sub => "-",
                BinOp::Mul => "*",
                BinOp::Div => "/",
                BinOp::Mod => "%",
                // floor division lowers to C's truncating integer `/`.
                BinOp::FloorDiv => "/",
            };
            format!("({} {} {})", codegen_expr(left, ctx), c_op, codegen_expr(right, ctx))
        }
        ExprKind::UnaryOp { op, operand } => match op {
            UnaryOp::Neg => format!("(-{})", codegen_expr(operand, ctx)),
            UnaryOp::Pos => format!("(+{})", codegen_expr(operand, ctx)),
            UnaryOp::Not => format!("(!{})", codegen_expr(operand, ctx)),
        },
        ExprKind::BoolOp { op, values } => {
            let c_op = match op {
                BoolOp::And => "&&",
                BoolOp::Or => "||",
            };
            let parts: Vec<String> = values.iter().map(|v| codegen_expr(v, ctx)).collect();
            format!("({})", parts.join(&format!(" {c_op} ")))
        }
        ExprKind::Compare { left, ops, comparators } => {
            let mut parts = Vec::new();
            let mut prev = codegen_expr(left, ctx);
            for (op, comparator) in ops.iter().zip(comparators) {
                let c_op = cmp_op_str(*op);
                let cur = codegen_expr(comparator, ctx);
                parts.push(format!("{prev} {c_op} {cur}"));
                prev = cur;
            }
            if parts.len() == 1 {
                parts.remove(0)
            } else {
                format!("({})", parts.join(" && "))
            }
        }
        ExprKind::Call { func, args } => codegen_call(func, args, ctx),
        ExprKind::Attribute { value, attr, .. } => format!("{}.{}", codegen_expr(value, ctx), attr),
        ExprKind::Subscript { value, index, .. } => format!("{}[{}]", codegen_expr(value, ctx), codegen_expr(index, ctx)),
    }
}

fn cmp_op_str(op: CmpOp) -> &'static str {
    match op {
        CmpOp::Eq => "==",
        CmpOp::NotEq => "!=",
        CmpOp::Lt => "<",
        CmpOp::LtE => "<=",
        CmpOp::Gt => ">",
        CmpOp::GtE => ">=",
    }
}

fn codegen_call(func: &Expr, args: &[Expr], ctx: &Ctx) -> String {
    if let ExprKind::Name { id, .. } = &func.node {
        if id == "print" && args.len() == 1 {
            let ty = ctx.infer(&args[0]);
            let fmt = printf_format(&ty);
            return format!("printf(\"{fmt}\\n\", {})", codegen_expr(&args[0], ctx));
        }
    }
    let callee = codegen_expr(func, ctx);
    let arg_strs: Vec<String> = args.iter().map(|a| codegen_expr(a, ctx)).collect();
    format!("{}({})", callee, arg_strs.join(", "))
}

pub(super) fn codegen_literal(c: &Constant) -> String {
    match c {
        Constant::Int(n) => n.to_string(),
        Constant::Float(f) => {
            let s = format!("{f}");
            if s.contains('.') {
                s
            } else {
                format!("{s}.0")
            }
        }
        Constant::Str(s) => format!("\"{}\"", escape_c_string(s)),
        Constant::Bool(b) => if *b { "1" } else { "0" }.to_string(),
        Constant::None => "NULL".to_string(),
    }
}

/// Re-encodes control characters the lexer already decoded back into C
/// escape sequences, so the generated `.c` file stays valid source text.
/// A literal `\n` typed by the user is written back out as the two
/// characters `\`+`n` — the host C compiler is the one that turns it back
/// into a byte at runtime (spec §9).
fn escape_c_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            other => out.push(other),
        }
    }
    out
}
