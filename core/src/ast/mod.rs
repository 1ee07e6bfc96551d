//! Syntax tree produced by the parser.
//!
//! The tree is a closed set of enums. Every node keeps the position of the
//! token that introduced it, and `Display` prints source text that parses
//! back to the same tree.

mod display;
mod expr;
mod op;
mod stmt;


pub use expr::*;
pub use op::*;
pub use stmt::*;

use crate::token::Position;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident {
    pub name: String,
    pub pos: Position,
}

impl Ident {
    pub fn new(name: impl Into<String>, pos: Position) -> Self {
        Self { name: name.into(), pos }
    }

    /// Width in characters, at least 1.
    pub fn width(&self) -> usize {
        self.name.chars().count().max(1)
    }

    pub fn is_discard(&self) -> bool {
        self.name == "_"
    }
}

/// `{ stmts }`; `pos` is the opening brace.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub pos: Position,
    pub stmts: Vec<Stmt>,
}

impl Block {
    pub fn new(pos: Position, stmts: Vec<Stmt>) -> Self {
        Self { pos, stmts }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub stmts: Vec<Stmt>,
}

impl Program {
    pub fn new(stmts: Vec<Stmt>) -> Self {
        Self { stmts }
    }

    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }
}
