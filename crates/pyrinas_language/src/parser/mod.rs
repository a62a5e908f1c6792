//! Recursive-descent parser (spec §4.2).
//!
//! Single-lookahead cursor over the token stream produced by [`crate::Lexer`].
//! There is no error recovery: the first error encountered sets `has_error`
//! and every caller up the call stack unwinds via `?`, matching spec's "the
//! parser returns a null tree" behavior — in Rust that is simply `Err`.

mod expr;
mod stmt;
mod types;

use pyrinas_base::{Result, Span, SpannedError};

use crate::ast::Module;
use crate::token::{Token, TokenKind};

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    pub fn parse_module(&mut self) -> Result<Module> {
        let mut body = Vec::new();
        self.skip_newlines();
        while !self.at(TokenKind::Eof) {
            body.push(self.parse_statement()?);
            self.skip_newlines();
        }
        Ok(Module { body })
    }

    // --- cursor primitives -------------------------------------------------

    pub(super) fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    pub(super) fn peek_at(&self, offset: usize) -> &Token {
        let idx = (self.pos + offset).min(self.tokens.len() - 1);
        &self.tokens[idx]
    }

    pub(super) fn at(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    pub(super) fn line(&self) -> u32 {
        self.peek().line
    }

    pub(super) fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    /// Raises an error if the current token is an `Error` token from the
    /// lexer (spec §4.1 "An ERROR token present in the stream causes the
    /// parser to surface an error").
    pub(super) fn check_lexer_error(&self) -> Result<()> {
        let tok = self.peek();
        if tok.kind == TokenKind::Error {
            return Err(SpannedError::new(
                tok.lexeme.clone().unwrap_or_else(|| "Unexpected character".to_string()),
                tok.span,
            ));
        }
        Ok(())
    }

    pub(super) fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        self.check_lexer_error()?;
        if self.peek().kind == kind {
            Ok(self.advance())
        } else {
            let tok = self.peek();
            Err(SpannedError::new(
                format!("Expected {} but found {}", kind.name(), tok.kind.name()),
                tok.span,
            ))
        }
    }

    pub(super) fn consume(&mut self, kind: TokenKind) -> Option<Token> {
        if self.at(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    pub(super) fn skip_newlines(&mut self) {
        while self.at(TokenKind::Newline) {
            self.advance();
        }
    }

    pub(super) fn error(&self, message: impl Into<String>) -> SpannedError {
        SpannedError::new(message, self.peek().span)
    }

    /// Reserved-keyword hard error for `elif`/`match`/`import`/`from`/`as`
    /// (spec §9: "lexed as keywords but the parser has no production for
    /// them... any occurrence... is a parse error").
    pub(super) fn reserved(&mut self, what: &str) -> SpannedError {
        let span = self.peek().span;
        self.advance();
        SpannedError::new(format!("'{what}' is reserved and not yet supported"), span)
    }

    /// Parses an indented block following a `:` header: skip NEWLINEs,
    /// require exactly one INDENT, accumulate statements until DEDENT,
    /// consume the DEDENT (spec §4.2 "Block grammar").
    pub(super) fn parse_block(&mut self) -> Result<Vec<crate::ast::Stmt>> {
        self.skip_newlines();
        self.expect(TokenKind::Indent)?;
        let mut body = Vec::new();
        self.skip_newlines();
        while !self.at(TokenKind::Dedent) && !self.at(TokenKind::Eof) {
            body.push(self.parse_statement()?);
            self.skip_newlines();
        }
        self.expect(TokenKind::Dedent)?;
        Ok(body)
    }

    pub(super) fn empty_span(&self) -> Span {
        let t = self.peek();
        Span::new(t.span.start, t.span.start)
    }
}
