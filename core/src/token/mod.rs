mod error;
mod kind;
mod lexer;
pub mod numeric;

pub use error::{ParseError, Position, Span, end_position};
pub use kind::{KEYWORDS, Token, TokenKind, is_keyword, lookup_ident};
pub use lexer::Tokenizer;

#[cfg(test)]
mod token_test;
