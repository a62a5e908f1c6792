//! Abstract syntax tree (spec §3 data model).
//!
//! Nodes own their children through `Box`/`Vec` with no arena and no shared
//! ownership: the tree is released bottom-up when the root `Module` drops
//! (spec §5). Every statement and expression carries an optional source line
//! number via the [`Spanned`] wrapper, used for diagnostics once analysis
//! moves past the token stream.

use crate::ty::Ty;

/// Wraps a node with the 1-based source line it started on. `line` is
/// `None` for nodes synthesized during later compiler stages rather than
/// parsed directly from source.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub line: Option<u32>,
    pub node: T,
}

impl<T> Spanned<T> {
    pub fn new(line: u32, node: T) -> Self {
        Self { line: Some(line), node }
    }
}

pub type Stmt = Spanned<StmtKind>;
pub type Expr = Box<Spanned<ExprKind>>;

#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    FunctionDef(FunctionDef),
    ClassDef(ClassDef),
    Assign(Assign),
    AnnAssign(AnnAssign),
    If(If),
    While(While),
    For(For),
    Break(Break),
    Continue(Continue),
    Return(Return),
    Expr(Expr),
    Pass,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub name: String,
    pub params: Vec<Param>,
    pub returns: Option<Ty>,
    pub body: Vec<Stmt>,
    pub decorators: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub annotation: Ty,
}

/// `class Name:` with a body of field `AnnAssign`s and `FunctionDef` methods,
/// or `class Name(Enum):` with a body of bare-name member assignments. The
/// analyzer distinguishes the two by inspecting `bases`.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDef {
    pub name: String,
    pub bases: Vec<String>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assign {
    pub targets: Vec<Expr>,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnnAssign {
    pub target: Expr,
    pub annotation: Ty,
    pub value: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct If {
    pub test: Expr,
    pub body: Vec<Stmt>,
    pub orelse: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct While {
    pub test: Expr,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct For {
    pub target: String,
    pub iter: Expr,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Break;

#[derive(Debug, Clone, PartialEq)]
pub struct Continue;

#[derive(Debug, Clone, PartialEq)]
pub struct Return {
    pub value: Option<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprCtx {
    Load,
    Store,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Name { id: String, ctx: ExprCtx },
    Constant(Constant),
    BinOp { left: Expr, op: BinOp, right: Expr },
    UnaryOp { op: UnaryOp, operand: Expr },
    BoolOp { op: BoolOp, values: Vec<Expr> },
    /// Chained comparison: `a < b < c` holds `left = a`, `ops = [Lt, Lt]`,
    /// `comparators = [b, c]`. The common case has one op and one comparator.
    Compare { left: Expr, ops: Vec<CmpOp>, comparators: Vec<Expr> },
    Call { func: Expr, args: Vec<Expr> },
    Attribute { value: Expr, attr: String, ctx: ExprCtx },
    Subscript { value: Expr, index: Expr, ctx: ExprCtx },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    FloorDiv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Pos,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolOp {
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    NotEq,
    Lt,
    LtE,
    Gt,
    GtE,
}

pub fn expr(line: u32, kind: ExprKind) -> Expr {
    Box::new(Spanned::new(line, kind))
}

pub fn name(line: u32, id: impl Into<String>, ctx: ExprCtx) -> Expr {
    expr(line, ExprKind::Name { id: id.into(), ctx })
}
