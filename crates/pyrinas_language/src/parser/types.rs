//! Type-annotation sub-grammar (spec §4.2): an identifier, an identifier
//! followed by `[ident]` or `[ident, NUMBER]`, or a string literal treated
//! as a deferred type name.

use pyrinas_base::Result;

use super::Parser;
use crate::token::TokenKind;
use crate::ty::Ty;

impl Parser {
    pub(super) fn parse_type(&mut self) -> Result<Ty> {
        self.check_lexer_error()?;
        if let Some(tok) = self.consume(TokenKind::String) {
            return Ok(Ty::User(tok.lexeme.unwrap_or_default()));
        }

        let tok = self.expect(TokenKind::Identifier)?;
        let name = tok.lexeme.unwrap_or_default();

        if self.consume(TokenKind::LBracket).is_some() {
            let first = self.parse_type()?;
            let ty = if self.consume(TokenKind::Comma).is_some() {
                if self.at(TokenKind::Number) {
                    let n = self.advance();
                    let len = n.lexeme.unwrap_or_default().parse::<u32>().map_err(|_| self.error("invalid array length"))?;
                    match name.as_str() {
                        "array" => Ok(Ty::Array(Box::new(first), len)),
                        _ => Err(self.error(format!("Unknown parameterized type '{name}'"))),
                    }
                } else {
                    let second = self.parse_type()?;
                    match name.as_str() {
                        "Result" => Ok(Ty::Result(Box::new(first), Box::new(second))),
                        _ => Err(self.error(format!("Unknown parameterized type '{name}'"))),
                    }
                }
            } else {
                match name.as_str() {
                    "ptr" => Ok(Ty::Ptr(Box::new(first))),
                    _ => Err(self.error(format!("Unknown parameterized type '{name}'"))),
                }
            }?;
            self.expect(TokenKind::RBracket)?;
            return Ok(ty);
        }

        Ok(name_to_ty(&name))
    }
}

fn name_to_ty(name: &str) -> Ty {
    match name {
        "int" => Ty::Int,
        "float" => Ty::Float,
        "bool" => Ty::Bool,
        "str" => Ty::Str,
        "void" => Ty::Void,
        "None" => Ty::None,
        other => Ty::User(other.to_string()),
    }
}
