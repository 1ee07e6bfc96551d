use super::{
    Parser, Precedence,
    helpers::{PResult, error_at},
};
use crate::{ast::Stmt, token::TokenKind};

impl Parser {
    /// `func name(params) { body }`
    pub(super) fn parse_func_stmt(&mut self) -> PResult<Stmt> {
        let tok = self.advance();
        let name = self.expect_ident("after 'func'")?;
        let params = self.parse_params()?;
        let body = self.parse_body()?;
        Ok(Stmt::Func {
            pos: tok.pos,
            name,
            params,
            body,
        })
    }

    /// `return`, `return x` or `return a, b`.
    pub(super) fn parse_return(&mut self) -> PResult<Stmt> {
        let tok = self.advance();
        let mut values = Vec::new();
        let bare = matches!(
            self.kind(),
            TokenKind::Newline | TokenKind::Semicolon | TokenKind::RBrace | TokenKind::Eof | TokenKind::Else
        );
        if !bare {
            values.push(self.parse_expression(Precedence::Lowest)?);
            while self.eat(TokenKind::Comma) {
                values.push(self.parse_expression(Precedence::Lowest)?);
            }
        }
        Ok(Stmt::Return { pos: tok.pos, values })
    }

    pub(super) fn parse_throw(&mut self) -> PResult<Stmt> {
        let tok = self.advance();
        let value = self.parse_expression(Precedence::Lowest)?;
        Ok(Stmt::Throw { pos: tok.pos, value })
    }

    pub(super) fn parse_defer(&mut self) -> PResult<Stmt> {
        let tok = self.advance();
        let call = self.parse_expression(Precedence::Lowest)?;
        if !call.is_call() {
            return Err(error_at(&tok, "defer expects a call expression"));
        }
        Ok(Stmt::Defer { pos: tok.pos, call })
    }

    /// `export func ...` or `export name = ...`.
    pub(super) fn parse_export(&mut self) -> PResult<Stmt> {
        let tok = self.advance();
        if matches!(self.kind(), TokenKind::Newline | TokenKind::Semicolon | TokenKind::Eof) {
            let next = self.cur().clone();
            return Err(error_at(&next, "expected statement after export"));
        }
        let stmt = self.parse_statement()?;
        let exportable = match &stmt {
            Stmt::Func { .. } => true,
            Stmt::Assign { op, .. } => !op.is_compound(),
            _ => false,
        };
        if !exportable {
            return Err(error_at(&tok, "export expects a function or assignment"));
        }
        Ok(Stmt::Export {
            pos: tok.pos,
            stmt: Box::new(stmt),
        })
    }
}
