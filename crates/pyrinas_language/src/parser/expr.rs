//! Expression grammar: precedence climbing over the fixed table in spec
//! §4.2, lowest to highest: `or`, `and`, prefix `not`, comparison, additive,
//! multiplicative, prefix unary `+`/`-`, primary with postfix `()`/`.`/`[]`.

use pyrinas_base::Result;

use super::Parser;
use crate::ast::{expr, BinOp, BoolOp, CmpOp, Constant, Expr, ExprCtx, ExprKind, UnaryOp};
use crate::token::TokenKind;

impl Parser {
    pub(super) fn parse_expr(&mut self) -> Result<Expr> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<Expr> {
        let line = self.line();
        let mut left = self.parse_and()?;
        if self.at(TokenKind::Or) {
            let mut values = vec![left];
            while self.consume(TokenKind::Or).is_some() {
                values.push(self.parse_and()?);
            }
            left = expr(line, ExprKind::BoolOp { op: BoolOp::Or, values });
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr> {
        let line = self.line();
        let mut left = self.parse_not()?;
        if self.at(TokenKind::And) {
            let mut values = vec![left];
            while self.consume(TokenKind::And).is_some() {
                values.push(self.parse_not()?);
            }
            left = expr(line, ExprKind::BoolOp { op: BoolOp::And, values });
        }
        Ok(left)
    }

    fn parse_not(&mut self) -> Result<Expr> {
        if self.at(TokenKind::Not) {
            let line = self.line();
            self.advance();
            let operand = self.parse_not()?;
            return Ok(expr(line, ExprKind::UnaryOp { op: UnaryOp::Not, operand }));
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<Expr> {
        let line = self.line();
        let left = self.parse_additive()?;
        let mut ops = Vec::new();
        let mut comparators = Vec::new();
        while let Some(op) = self.comparison_op() {
            self.advance();
            ops.push(op);
            comparators.push(self.parse_additive()?);
        }
        if ops.is_empty() {
            Ok(left)
        } else {
            Ok(expr(line, ExprKind::Compare { left, ops, comparators }))
        }
    }

    fn comparison_op(&self) -> Option<CmpOp> {
        Some(match self.peek().kind {
            TokenKind::EqEq => CmpOp::Eq,
            TokenKind::NotEq => CmpOp::NotEq,
            TokenKind::Lt => CmpOp::Lt,
            TokenKind::LtEq => CmpOp::LtE,
            TokenKind::Gt => CmpOp::Gt,
            TokenKind::GtEq => CmpOp::GtE,
            _ => return Option::None,
        })
    }

    fn parse_additive(&mut self) -> Result<Expr> {
        let line = self.line();
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_multiplicative()?;
            left = expr(line, ExprKind::BinOp { left, op, right });
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr> {
        let line = self.line();
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                TokenKind::Percent => BinOp::Mod,
                TokenKind::SlashSlash => BinOp::FloorDiv,
                _ => break,
            };
            self.advance();
            let right = self.parse_unary()?;
            left = expr(line, ExprKind::BinOp { left, op, right });
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr> {
        let line = self.line();
        let op = match self.peek().kind {
            TokenKind::Minus => Some(UnaryOp::Neg),
            TokenKind::Plus => Some(UnaryOp::Pos),
            _ => Option::None,
        };
        if let Some(op) = op {
            self.advance();
            let operand = self.parse_unary()?;
            return Ok(expr(line, ExprKind::UnaryOp { op, operand }));
        }
        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> Result<Expr> {
        let mut e = self.parse_primary()?;
        loop {
            let line = self.line();
            match self.peek().kind {
                TokenKind::LParen => {
                    self.advance();
                    let mut args = Vec::new();
                    if !self.at(TokenKind::RParen) {
                        loop {
                            args.push(self.parse_expr()?);
                            if self.consume(TokenKind::Comma).is_some() {
                                continue;
                            }
                            break;
                        }
                    }
                    self.expect(TokenKind::RParen)?;
                    e = expr(line, ExprKind::Call { func: e, args });
                }
                TokenKind::Dot => {
                    self.advance();
                    let attr = self.expect_identifier()?;
                    e = expr(line, ExprKind::Attribute { value: e, attr, ctx: ExprCtx::Load });
                }
                TokenKind::LBracket => {
                    self.advance();
                    let index = self.parse_expr()?;
                    self.expect(TokenKind::RBracket)?;
                    e = expr(line, ExprKind::Subscript { value: e, index, ctx: ExprCtx::Load });
                }
                _ => break,
            }
        }
        Ok(e)
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        self.check_lexer_error()?;
        let line = self.line();
        let tok = self.peek().clone();
        match tok.kind {
            TokenKind::Number => {
                self.advance();
                let lexeme = tok.lexeme.unwrap_or_default();
                let constant = if lexeme.contains('.') {
                    Constant::Float(lexeme.parse().unwrap_or(0.0))
                } else {
                    Constant::Int(lexeme.parse().unwrap_or(0))
                };
                Ok(expr(line, ExprKind::Constant(constant)))
            }
            TokenKind::String => {
                self.advance();
                Ok(expr(line, ExprKind::Constant(Constant::Str(tok.lexeme.unwrap_or_default()))))
            }
            TokenKind::True => {
                self.advance();
                Ok(expr(line, ExprKind::Constant(Constant::Bool(true))))
            }
            TokenKind::False => {
                self.advance();
                Ok(expr(line, ExprKind::Constant(Constant::Bool(false))))
            }
            TokenKind::None => {
                self.advance();
                Ok(expr(line, ExprKind::Constant(Constant::None)))
            }
            TokenKind::Identifier => {
                self.advance();
                Ok(expr(line, ExprKind::Name { id: tok.lexeme.unwrap_or_default(), ctx: ExprCtx::Load }))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            _ => Err(self.error(format!("Unexpected token in expression: {}", tok.kind.name()))),
        }
    }
}
