//! Request handlers. Each takes the current text snapshot of the requesting
//! document and a protocol position, and re-analyzes from scratch.

mod completion;
mod definition;
mod hover;
mod references;
mod rename;
mod signature;
mod target;

pub use completion::completion_items;
pub use definition::definition_at;
pub use hover::hover_at;
pub use references::references;
pub use rename::rename;
pub use signature::signature_help_at;

use welle_core::token::{Position, Token, TokenKind, Tokenizer};

/// Tokens that start strictly before `pos`, without newlines.
pub(crate) fn tokens_before(text: &str, pos: Position) -> Vec<Token> {
    Tokenizer::tokenize(text)
        .into_iter()
        .filter(|t| t.kind != TokenKind::Eof && t.kind != TokenKind::Newline && t.pos < pos)
        .collect()
}

/// The identifier under `pos` and, for `a.b`, the identifier before the dot.
pub(crate) fn member_at(text: &str, pos: Position) -> Option<(Option<Token>, Token)> {
    let tokens: Vec<Token> = Tokenizer::tokenize(text)
        .into_iter()
        .filter(|t| t.kind != TokenKind::Newline)
        .collect();
    let idx = tokens.iter().position(|t| {
        t.kind == TokenKind::Ident
            && t.pos.line == pos.line
            && t.pos.column <= pos.column
            && pos.column < t.pos.column + t.literal.len().max(1) as u32
    })?;
    let object = match idx.checked_sub(2).map(|i| (&tokens[i], &tokens[i + 1])) {
        Some((obj, dot)) if dot.kind == TokenKind::Dot && obj.kind == TokenKind::Ident => Some(obj.clone()),
        _ => None,
    };
    Some((object, tokens[idx].clone()))
}

/// `name(a, b)` for functions and `path.member` for `from` imports.
pub(crate) fn binding_signature(binding: &welle_core::analysis::Binding) -> Option<String> {
    use welle_core::analysis::BindingKind;
    match binding.kind {
        BindingKind::Func => Some(format!("{}({})", binding.name, binding.params.join(", "))),
        BindingKind::Import => Some(format!(
            "{}.{}",
            binding.module_path.as_deref().unwrap_or_default(),
            binding.member.as_deref().unwrap_or_default()
        )),
        _ => None,
    }
}
