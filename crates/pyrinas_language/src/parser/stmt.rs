//! Statement grammar: leading-keyword dispatch, and the expression-led
//! assignment/annotation rewrite (spec §4.2).

use pyrinas_base::Result;

use super::Parser;
use crate::ast::{
    Assign, Break, ClassDef, Continue, Expr, ExprCtx, ExprKind, For, FunctionDef, If, Param, Return, Spanned, Stmt,
    StmtKind, While,
};
use crate::token::TokenKind;

impl Parser {
    pub(super) fn parse_statement(&mut self) -> Result<Stmt> {
        self.check_lexer_error()?;
        let line = self.line();
        let kind = match self.peek().kind {
            TokenKind::Def => StmtKind::FunctionDef(self.parse_function_def()?),
            TokenKind::Class => StmtKind::ClassDef(self.parse_class_def()?),
            TokenKind::If => StmtKind::If(self.parse_if()?),
            TokenKind::While => StmtKind::While(self.parse_while()?),
            TokenKind::For => StmtKind::For(self.parse_for()?),
            TokenKind::Break => {
                self.advance();
                self.end_simple_statement()?;
                StmtKind::Break(Break)
            }
            TokenKind::Continue => {
                self.advance();
                self.end_simple_statement()?;
                StmtKind::Continue(Continue)
            }
            TokenKind::Pass => {
                self.advance();
                self.end_simple_statement()?;
                StmtKind::Pass
            }
            TokenKind::Return => {
                self.advance();
                let value = if self.at(TokenKind::Newline) || self.at(TokenKind::Eof) {
                    Option::None
                } else {
                    Some(self.parse_expr()?)
                };
                self.end_simple_statement()?;
                StmtKind::Return(Return { value })
            }
            TokenKind::Elif => return Err(self.reserved("elif")),
            TokenKind::Match => return Err(self.reserved("match")),
            TokenKind::Import => return Err(self.reserved("import")),
            TokenKind::From => return Err(self.reserved("from")),
            _ => self.parse_expr_led_statement()?,
        };
        Ok(Spanned::new(line, kind))
    }

    /// A statement with no body that must be terminated by NEWLINE/EOF.
    fn end_simple_statement(&mut self) -> Result<()> {
        if self.at(TokenKind::Newline) || self.at(TokenKind::Eof) || self.at(TokenKind::Dedent) {
            Ok(())
        } else {
            Err(self.error(format!("Unexpected token after statement: {}", self.peek().kind.name())))
        }
    }

    fn parse_function_def(&mut self) -> Result<FunctionDef> {
        self.expect(TokenKind::Def)?;
        let name = self.expect_identifier()?;
        self.expect(TokenKind::LParen)?;
        let mut params = Vec::new();
        if !self.at(TokenKind::RParen) {
            loop {
                let pname = self.expect_identifier()?;
                self.expect(TokenKind::Colon)?;
                let annotation = self.parse_type()?;
                params.push(Param { name: pname, annotation });
                if self.consume(TokenKind::Comma).is_some() {
                    continue;
                }
                break;
            }
        }
        self.expect(TokenKind::RParen)?;
        let returns = if self.consume(TokenKind::Arrow).is_some() {
            Some(self.parse_type()?)
        } else {
            Option::None
        };
        self.expect(TokenKind::Colon)?;
        let body = self.parse_block()?;
        Ok(FunctionDef { name, params, returns, body, decorators: Vec::new() })
    }

    fn parse_class_def(&mut self) -> Result<ClassDef> {
        self.expect(TokenKind::Class)?;
        let name = self.expect_identifier()?;
        let mut bases = Vec::new();
        if self.consume(TokenKind::LParen).is_some() {
            if !self.at(TokenKind::RParen) {
                loop {
                    bases.push(self.expect_identifier()?);
                    if self.consume(TokenKind::Comma).is_some() {
                        continue;
                    }
                    break;
                }
            }
            self.expect(TokenKind::RParen)?;
        }
        self.expect(TokenKind::Colon)?;
        let body = self.parse_block()?;
        Ok(ClassDef { name, bases, body })
    }

    fn parse_if(&mut self) -> Result<If> {
        self.expect(TokenKind::If)?;
        let test = self.parse_expr()?;
        self.expect(TokenKind::Colon)?;
        let body = self.parse_block()?;
        let orelse = if self.at(TokenKind::Else) {
            self.advance();
            self.expect(TokenKind::Colon)?;
            self.parse_block()?
        } else {
            Vec::new()
        };
        Ok(If { test, body, orelse })
    }

    fn parse_while(&mut self) -> Result<While> {
        self.expect(TokenKind::While)?;
        let test = self.parse_expr()?;
        self.expect(TokenKind::Colon)?;
        let body = self.parse_block()?;
        Ok(While { test, body })
    }

    fn parse_for(&mut self) -> Result<For> {
        self.expect(TokenKind::For)?;
        let target = self.expect_identifier()?;
        self.expect(TokenKind::In)?;
        let iter = self.parse_expr()?;
        self.expect(TokenKind::Colon)?;
        let body = self.parse_block()?;
        Ok(For { target, iter, body })
    }

    /// Parses an expression, then applies the statement rewrite: `: T [= E]`
    /// becomes `AnnAssign`, `= E` becomes `Assign`, otherwise it's an
    /// `ExprStmt` (spec §4.2 "Statement rewrite for assignments").
    fn parse_expr_led_statement(&mut self) -> Result<StmtKind> {
        let head = self.parse_expr()?;
        if self.consume(TokenKind::Colon).is_some() {
            let annotation = self.parse_type()?;
            let value = if self.consume(TokenKind::Eq).is_some() {
                Some(self.parse_expr()?)
            } else {
                Option::None
            };
            self.end_simple_statement()?;
            return Ok(StmtKind::AnnAssign(crate::ast::AnnAssign { target: self.as_store(head), annotation, value }));
        }
        if self.consume(TokenKind::Eq).is_some() {
            let value = self.parse_expr()?;
            self.end_simple_statement()?;
            return Ok(StmtKind::Assign(Assign { targets: vec![self.as_store(head)], value }));
        }
        self.end_simple_statement()?;
        Ok(StmtKind::Expr(head))
    }

    /// Rewrites a `Name`/`Attribute`/`Subscript` parsed in load context into
    /// store context, for use as an assignment target.
    fn as_store(&self, mut e: Expr) -> Expr {
        match &mut e.node {
            ExprKind::Name { ctx, .. } => *ctx = ExprCtx::Store,
            ExprKind::Attribute { ctx, .. } => *ctx = ExprCtx::Store,
            ExprKind::Subscript { ctx, .. } => *ctx = ExprCtx::Store,
            _ => {}
        }
        e
    }

    pub(super) fn expect_identifier(&mut self) -> Result<String> {
        let tok = self.expect(TokenKind::Identifier)?;
        Ok(tok.lexeme.unwrap_or_default())
    }
}
