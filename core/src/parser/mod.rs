//! Recursive-descent statement parser with a precedence-climbing
//! expression core.
//!
//! Errors never abort the parse: each one is recorded as a [`Diagnostic`],
//! the cursor moves at least one token, and parsing continues so a broken
//! file still yields most of its tree.

use crate::{
    ast::Program,
    diag::Diagnostic,
    token::{Token, TokenKind, Tokenizer},
};

mod bindings;
mod blocks;
mod control;
mod declarations;
mod expr;
mod helpers;
mod imports;
mod program;
mod template;

#[cfg(test)]
mod parser_test;
#[cfg(test)]
mod template_test;

pub use expr::Precedence;
pub use template::{TemplateSegment, split_template};

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// Open `(`, `[` and `#{` nesting. Newlines inside are insignificant.
    nesting: usize,
    diagnostics: Vec<Diagnostic>,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().is_none_or(|t| t.kind != TokenKind::Eof) {
            let pos = tokens.last().map(|t| t.pos).unwrap_or_default();
            tokens.push(Token::new(TokenKind::Eof, "", pos));
        }
        Self {
            tokens,
            pos: 0,
            nesting: 0,
            diagnostics: Vec::new(),
        }
    }

    pub fn from_source(text: &str) -> Self {
        Self::new(Tokenizer::tokenize(text))
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

/// A parsed file plus everything that went wrong while parsing it.
#[derive(Debug, Clone, Default)]
pub struct ParseOutput {
    pub program: Program,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

pub fn parse(text: &str) -> ParseOutput {
    let mut parser = Parser::from_source(text);
    let program = parser.parse_program();
    ParseOutput {
        program,
        diagnostics: parser.into_diagnostics(),
    }
}
