use super::{Parser, helpers::PResult};
use crate::{
    ast::{Program, Stmt},
    token::TokenKind,
};

impl Parser {
    /// Parse the whole token stream. Never fails; problems end up in
    /// [`Parser::diagnostics`].
    pub fn parse_program(&mut self) -> Program {
        let stmts = self.parse_statements_until(TokenKind::Eof);
        Program::new(stmts)
    }

    /// Statements up to (not including) `end` or end of input, recovering
    /// from each failed statement.
    pub(super) fn parse_statements_until(&mut self, end: TokenKind) -> Vec<Stmt> {
        let mut stmts = Vec::new();
        loop {
            self.skip_separators();
            if self.at(end) || self.at_eof() {
                return stmts;
            }
            let before = self.snapshot();
            match self.parse_statement() {
                Ok(stmt) => stmts.push(stmt),
                Err(err) => {
                    self.record(err);
                    if self.snapshot() == before || !self.at(end) {
                        self.advance();
                    }
                }
            }
        }
    }

    pub(super) fn parse_statement(&mut self) -> PResult<Stmt> {
        match self.kind() {
            TokenKind::Func if self.peek_kind(1) == TokenKind::Ident => self.parse_func_stmt(),
            TokenKind::Return => self.parse_return(),
            TokenKind::Break => Ok(Stmt::Break { pos: self.advance().pos }),
            TokenKind::Continue => Ok(Stmt::Continue { pos: self.advance().pos }),
            TokenKind::Pass => Ok(Stmt::Pass { pos: self.advance().pos }),
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::For => self.parse_for(),
            TokenKind::Switch => self.parse_switch(),
            TokenKind::Try => self.parse_try(),
            TokenKind::Throw => self.parse_throw(),
            TokenKind::Defer => self.parse_defer(),
            TokenKind::Import => self.parse_import(),
            TokenKind::From => self.parse_from_import(),
            TokenKind::Export => self.parse_export(),
            TokenKind::LBrace => Ok(Stmt::Block(self.parse_block()?)),
            TokenKind::LParen => match self.try_destructure()? {
                Some(stmt) => Ok(stmt),
                None => self.parse_simple_stmt(),
            },
            _ => self.parse_simple_stmt(),
        }
    }
}
