use super::{
    Parser, Precedence,
    helpers::{PResult, error_at},
};
use crate::{
    ast::{CatchClause, Expr, Ident, Stmt, SwitchCase},
    token::{ParseError, Position, TokenKind},
};

/// Header forms told apart after `for`, without consuming input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ForShape {
    /// for (init; cond; post)
    CStyle,
    /// for x in expr { }
    Bare,
    /// for (x in expr) { }
    InParens,
    /// for ((k, v) in expr) { }
    Grouped,
    /// for (k, v) in expr { }
    Outside,
}

const FOR_LOOKAHEAD: usize = 64;

impl Parser {
    fn for_shape(&self) -> ForShape {
        use TokenKind as T;
        let kinds: Vec<TokenKind> = self.tokens[self.pos..]
            .iter()
            .map(|t| t.kind)
            .filter(|k| *k != T::Newline)
            .take(FOR_LOOKAHEAD)
            .collect();
        let at = |i: usize| kinds.get(i).copied().unwrap_or(T::Eof);
        // Index just past `ident {, ident}` starting at `i`, if any.
        let ident_list_end = |mut i: usize| -> Option<usize> {
            if at(i) != T::Ident {
                return None;
            }
            i += 1;
            while at(i) == T::Comma && at(i + 1) == T::Ident {
                i += 2;
            }
            Some(i)
        };

        if at(0) == T::Ident && at(1) == T::In {
            return ForShape::Bare;
        }
        if at(0) != T::LParen {
            return ForShape::CStyle;
        }
        if at(1) == T::LParen {
            if let Some(end) = ident_list_end(2)
                && at(end) == T::RParen
                && at(end + 1) == T::In
            {
                return ForShape::Grouped;
            }
            return ForShape::CStyle;
        }
        if at(1) == T::Ident && at(2) == T::In {
            return ForShape::InParens;
        }
        match ident_list_end(1) {
            Some(end) if at(end) == T::RParen && at(end + 1) == T::In => ForShape::Outside,
            _ => ForShape::CStyle,
        }
    }

    pub(super) fn parse_if(&mut self) -> PResult<Stmt> {
        let tok = self.advance();
        let cond = self.parse_paren_cond("if")?;
        let then = self.parse_branch("if condition")?;
        let els = if self.next_after_newlines_is(TokenKind::Else) {
            self.skip_newlines();
            self.advance();
            Some(Box::new(self.parse_branch("else")?))
        } else {
            None
        };
        Ok(Stmt::If {
            pos: tok.pos,
            cond,
            then: Box::new(then),
            els,
        })
    }

    /// `( expr )` after a keyword.
    fn parse_paren_cond(&mut self, keyword: &str) -> PResult<Expr> {
        self.expect(TokenKind::LParen, &format!("after '{keyword}'"))?;
        self.nested(|p| {
            let cond = p.parse_expression(Precedence::Lowest)?;
            p.expect(TokenKind::RParen, &format!("after {keyword} condition"))?;
            Ok(cond)
        })
    }

    /// Single statement or block following `if (...)` or `else`.
    fn parse_branch(&mut self, after: &str) -> PResult<Stmt> {
        self.skip_newlines();
        if matches!(self.kind(), TokenKind::Else | TokenKind::RBrace | TokenKind::Eof | TokenKind::Semicolon) {
            let tok = self.cur().clone();
            return Err(error_at(&tok, format!("expected statement after {after}")));
        }
        self.parse_statement()
    }

    pub(super) fn parse_while(&mut self) -> PResult<Stmt> {
        let tok = self.advance();
        let cond = self.parse_paren_cond("while")?;
        let body = self.parse_body()?;
        Ok(Stmt::While {
            pos: tok.pos,
            cond,
            body,
        })
    }

    pub(super) fn parse_for(&mut self) -> PResult<Stmt> {
        let tok = self.advance();
        match self.for_shape() {
            ForShape::CStyle => self.parse_c_for(tok.pos),
            ForShape::Bare => {
                let key = self.expect_ident("after 'for'")?;
                self.expect(TokenKind::In, "in for loop")?;
                let iterable = self.parse_expression(Precedence::Lowest)?;
                self.finish_for_in(tok.pos, vec![key], iterable)
            }
            ForShape::InParens => {
                self.expect(TokenKind::LParen, "after 'for'")?;
                let (key, iterable) = self.nested(|p| {
                    let key = p.expect_ident("after 'for'")?;
                    p.expect(TokenKind::In, "in for loop")?;
                    let iterable = p.parse_expression(Precedence::Lowest)?;
                    p.expect(TokenKind::RParen, "after for-in header")?;
                    Ok((key, iterable))
                })?;
                self.finish_for_in(tok.pos, vec![key], iterable)
            }
            ForShape::Grouped => {
                self.expect(TokenKind::LParen, "after 'for'")?;
                let (targets, iterable) = self.nested(|p| {
                    p.expect(TokenKind::LParen, "")?;
                    let targets = p.parse_for_targets()?;
                    p.expect(TokenKind::RParen, "after for-in targets")?;
                    p.expect(TokenKind::In, "in for loop")?;
                    let iterable = p.parse_expression(Precedence::Lowest)?;
                    p.expect(TokenKind::RParen, "after for-in header")?;
                    Ok((targets, iterable))
                })?;
                self.check_for_arity(tok.pos, &targets);
                self.finish_for_in(tok.pos, targets, iterable)
            }
            ForShape::Outside => {
                self.expect(TokenKind::LParen, "after 'for'")?;
                let targets = self.nested(|p| {
                    let targets = p.parse_for_targets()?;
                    p.expect(TokenKind::RParen, "after for-in targets")?;
                    Ok(targets)
                })?;
                self.check_for_arity(tok.pos, &targets);
                self.expect(TokenKind::In, "in for loop")?;
                let iterable = self.parse_expression(Precedence::Lowest)?;
                self.finish_for_in(tok.pos, targets, iterable)
            }
        }
    }

    fn parse_for_targets(&mut self) -> PResult<Vec<Ident>> {
        let mut targets = vec![self.expect_ident("in for-in targets")?];
        while self.eat(TokenKind::Comma) {
            targets.push(self.expect_ident("in for-in targets")?);
        }
        Ok(targets)
    }

    /// A parenthesized binding list must name exactly a key and a value.
    fn check_for_arity(&mut self, pos: Position, targets: &[Ident]) {
        if targets.len() != 2 {
            let at = targets.first().map(|t| t.pos).unwrap_or(pos);
            self.record(ParseError::with_position(
                format!("for-in destructuring expects exactly two targets, found {}", targets.len()),
                at,
            ));
        }
    }

    fn finish_for_in(&mut self, pos: Position, targets: Vec<Ident>, iterable: Expr) -> PResult<Stmt> {
        let body = self.parse_body()?;
        let mut targets = targets.into_iter();
        let key = targets.next().unwrap_or_else(|| Ident::new("_", pos));
        let value = targets.next();
        Ok(Stmt::ForIn {
            pos,
            key,
            value,
            iterable,
            body,
        })
    }

    fn parse_c_for(&mut self, pos: Position) -> PResult<Stmt> {
        self.expect(TokenKind::LParen, "after 'for'")?;
        let (init, cond, post) = self.nested(|p| {
            let init = if p.at(TokenKind::Semicolon) {
                None
            } else {
                Some(Box::new(p.parse_simple_stmt()?))
            };
            p.expect(TokenKind::Semicolon, "after for init")?;
            let cond = if p.at(TokenKind::Semicolon) {
                None
            } else {
                Some(p.parse_expression(Precedence::Lowest)?)
            };
            p.expect(TokenKind::Semicolon, "after for condition")?;
            let post = if p.at(TokenKind::RParen) {
                None
            } else {
                Some(Box::new(p.parse_simple_stmt()?))
            };
            p.expect(TokenKind::RParen, "after for post")?;
            Ok((init, cond, post))
        })?;
        let body = self.parse_body()?;
        Ok(Stmt::For {
            pos,
            init,
            cond,
            post,
            body,
        })
    }

    /// `switch (v) { case a, b { } default { } }`
    pub(super) fn parse_switch(&mut self) -> PResult<Stmt> {
        let tok = self.advance();
        let value = self.parse_paren_cond("switch")?;
        self.skip_newlines();
        self.expect(TokenKind::LBrace, "to open switch body")?;
        let (cases, default) = self.with_statements(|p| {
            let mut cases = Vec::new();
            let mut default = None;
            loop {
                p.skip_separators();
                match p.kind() {
                    TokenKind::RBrace => break,
                    TokenKind::Case => {
                        let case = p.advance();
                        let values = p.parse_case_values()?;
                        let body = p.parse_body()?;
                        cases.push(SwitchCase {
                            pos: case.pos,
                            values,
                            body,
                        });
                    }
                    TokenKind::Default => {
                        p.advance();
                        default = Some(p.parse_body()?);
                    }
                    _ => {
                        let tok = p.cur().clone();
                        return Err(error_at(&tok, format!("unexpected token in switch: {}", tok.kind)));
                    }
                }
            }
            p.expect(TokenKind::RBrace, "to close switch")?;
            Ok((cases, default))
        })?;
        Ok(Stmt::Switch {
            pos: tok.pos,
            value,
            cases,
            default,
        })
    }

    /// `try { } catch (e) { } finally { }` with at least one of the tails.
    pub(super) fn parse_try(&mut self) -> PResult<Stmt> {
        let tok = self.advance();
        let body = self.parse_body()?;

        let mut catch = None;
        if self.next_after_newlines_is(TokenKind::Catch) {
            self.skip_newlines();
            let catch_tok = self.advance();
            let name = if self.eat(TokenKind::LParen) {
                let name = self.nested(|p| {
                    let name = p.expect_ident("in catch clause")?;
                    p.expect(TokenKind::RParen, "after catch name")?;
                    Ok(name)
                })?;
                Some(name)
            } else {
                None
            };
            let body = self.parse_body()?;
            catch = Some(CatchClause {
                pos: catch_tok.pos,
                name,
                body,
            });
        }

        let mut finally = None;
        if self.next_after_newlines_is(TokenKind::Finally) {
            self.skip_newlines();
            self.advance();
            finally = Some(self.parse_body()?);
        }

        if catch.is_none() && finally.is_none() {
            let next = self.cur().clone();
            return Err(error_at(&next, "expected catch or finally after try block"));
        }
        Ok(Stmt::Try {
            pos: tok.pos,
            body,
            catch,
            finally,
        })
    }
}
