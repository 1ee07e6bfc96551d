use super::Parser;
use crate::{
    ast::Ident,
    diag::Diagnostic,
    token::{ParseError, Token, TokenKind},
};

pub(super) type PResult<T> = Result<T, ParseError>;

pub(super) fn error_at(tok: &Token, message: impl Into<String>) -> ParseError {
    ParseError::with_position(message, tok.pos).with_length(tok.width())
}

fn found(tok: &Token) -> String {
    match tok.kind {
        TokenKind::Ident => format!("identifier {:?}", tok.literal),
        TokenKind::Illegal => tok.literal.clone(),
        kind => kind.describe().to_string(),
    }
}

impl Parser {
    fn skip_insignificant(&mut self) {
        if self.nesting > 0 {
            while self.tokens[self.pos].kind == TokenKind::Newline {
                self.pos += 1;
            }
        }
    }

    pub(super) fn cur(&mut self) -> &Token {
        self.skip_insignificant();
        &self.tokens[self.pos]
    }

    pub(super) fn kind(&mut self) -> TokenKind {
        self.cur().kind
    }

    /// Kind of the `n`th significant token after the current one.
    pub(super) fn peek_kind(&mut self, n: usize) -> TokenKind {
        self.skip_insignificant();
        let mut idx = self.pos;
        let mut left = n;
        while left > 0 && idx + 1 < self.tokens.len() {
            idx += 1;
            if self.nesting > 0 && self.tokens[idx].kind == TokenKind::Newline {
                continue;
            }
            left -= 1;
        }
        self.tokens[idx].kind
    }

    pub(super) fn at(&mut self, kind: TokenKind) -> bool {
        self.kind() == kind
    }

    pub(super) fn at_eof(&mut self) -> bool {
        self.at(TokenKind::Eof)
    }

    /// Consume the current token and return it. `Eof` is never consumed.
    pub(super) fn advance(&mut self) -> Token {
        let tok = self.cur().clone();
        if tok.kind != TokenKind::Eof {
            self.pos += 1;
        }
        tok
    }

    pub(super) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(super) fn expect(&mut self, kind: TokenKind, context: &str) -> PResult<Token> {
        if self.at(kind) {
            return Ok(self.advance());
        }
        let tok = self.cur().clone();
        let message = if context.is_empty() {
            format!("expected {}, found {}", kind.describe(), found(&tok))
        } else {
            format!("expected {} {}, found {}", kind.describe(), context, found(&tok))
        };
        Err(error_at(&tok, message))
    }

    pub(super) fn expect_ident(&mut self, context: &str) -> PResult<Ident> {
        let tok = self.expect(TokenKind::Ident, context)?;
        Ok(Ident::new(tok.literal, tok.pos))
    }

    pub(super) fn unexpected(&mut self) -> ParseError {
        let tok = self.cur().clone();
        error_at(&tok, format!("unexpected {}", found(&tok)))
    }

    pub(super) fn skip_newlines(&mut self) {
        while self.tokens[self.pos].kind == TokenKind::Newline {
            self.pos += 1;
        }
    }

    pub(super) fn skip_separators(&mut self) {
        while self.tokens[self.pos].kind.is_separator() {
            self.pos += 1;
        }
    }

    /// True when `kind` follows after any run of newlines.
    pub(super) fn next_after_newlines_is(&self, kind: TokenKind) -> bool {
        self.tokens[self.pos..]
            .iter()
            .find(|t| t.kind != TokenKind::Newline)
            .is_some_and(|t| t.kind == kind)
    }

    pub(super) fn snapshot(&self) -> usize {
        self.pos
    }

    pub(super) fn restore(&mut self, snapshot: usize) {
        self.pos = snapshot;
    }

    pub(super) fn record(&mut self, err: ParseError) {
        self.diagnostics.push(Diagnostic::from(err));
    }

    /// Run `f` with newlines significant again, as inside a block.
    pub(super) fn with_statements<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = std::mem::replace(&mut self.nesting, 0);
        let out = f(self);
        self.nesting = saved;
        out
    }

    /// Run `f` inside a bracketed construct where newlines are skipped.
    pub(super) fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.nesting += 1;
        let out = f(self);
        self.nesting -= 1;
        out
    }
}
