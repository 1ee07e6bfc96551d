//! Semantic highlighting. Identifiers are classified from the analysis;
//! every other token by its kind.

use rustc_hash::FxHashMap;
use tower_lsp::lsp_types::{SemanticToken, SemanticTokenModifier, SemanticTokenType, SemanticTokensLegend};
use welle_core::{
    analysis::{BindingKind, Resolution},
    analyze,
    token::{Position as CorePos, Token, TokenKind, Tokenizer},
};

use crate::position::to_lsp;

// Indices into `legend().token_types`.
const KEYWORD: u32 = 0;
const STRING: u32 = 1;
const NUMBER: u32 = 2;
const OPERATOR: u32 = 3;
const FUNCTION: u32 = 4;
const VARIABLE: u32 = 5;
const PARAMETER: u32 = 6;
const NAMESPACE: u32 = 7;

const MOD_DECLARATION: u32 = 1 << 0;

pub fn legend() -> SemanticTokensLegend {
    SemanticTokensLegend {
        token_types: vec![
            SemanticTokenType::KEYWORD,
            SemanticTokenType::STRING,
            SemanticTokenType::NUMBER,
            SemanticTokenType::OPERATOR,
            SemanticTokenType::FUNCTION,
            SemanticTokenType::VARIABLE,
            SemanticTokenType::PARAMETER,
            SemanticTokenType::NAMESPACE,
        ],
        token_modifiers: vec![SemanticTokenModifier::DECLARATION],
    }
}

fn binding_type(kind: BindingKind) -> u32 {
    match kind {
        BindingKind::Func | BindingKind::Builtin => FUNCTION,
        BindingKind::Param => PARAMETER,
        BindingKind::Namespace => NAMESPACE,
        BindingKind::Keyword => KEYWORD,
        BindingKind::Var | BindingKind::Import => VARIABLE,
    }
}

fn token_type(kind: TokenKind) -> Option<u32> {
    use TokenKind::*;
    if kind.is_keyword() {
        return Some(KEYWORD);
    }
    match kind {
        Str | Template => Some(STRING),
        Int | Float => Some(NUMBER),
        Ident => Some(VARIABLE),
        Assign | Walrus | Plus | Minus | Star | Slash | Percent | Bang | BitOr | BitAnd | BitXor | BitNot | Shl
        | Shr | Question | Nullish | PlusAssign | MinusAssign | StarAssign | SlashAssign | PercentAssign
        | BitOrAssign | Eq | Ne | Lt | Le | Gt | Ge | Dot | Ellipsis => Some(OPERATOR),
        _ => None,
    }
}

/// Type and modifiers for each identifier position the analysis knows.
fn classify_identifiers(text: &str) -> FxHashMap<CorePos, (u32, u32)> {
    let an = analyze(text);
    let mut out = FxHashMap::default();
    for r in an.references() {
        let ty = match &r.resolution {
            Resolution::Binding(id) => binding_type(an.binding(*id).kind),
            Resolution::Builtin => FUNCTION,
            Resolution::ModuleMember { .. } | Resolution::Unresolved => VARIABLE,
        };
        out.insert(r.ident.pos, (ty, 0));
    }
    // Declaring identifiers are also recorded as references; the
    // declaration entry wins.
    for (_, binding) in an.bindings() {
        out.insert(binding.decl.pos, (binding_type(binding.kind), MOD_DECLARATION));
    }
    out
}

/// UTF-16 length of the token's first source line.
fn token_length(tok: &Token) -> u32 {
    let lexeme = tok.raw.as_deref().unwrap_or(&tok.literal);
    let lexeme = if lexeme.is_empty() { tok.kind.describe() } else { lexeme };
    let first_line = lexeme.split('\n').next().unwrap_or_default();
    first_line.chars().map(|c| c.len_utf16() as u32).sum()
}

/// Delta-encoded semantic tokens for the whole document.
pub fn semantic_tokens(text: &str) -> Vec<SemanticToken> {
    let identifiers = classify_identifiers(text);
    let mut absolute: Vec<(u32, u32, u32, u32, u32)> = Vec::new();
    for tok in Tokenizer::tokenize(text) {
        let Some(mut ty) = token_type(tok.kind) else {
            continue;
        };
        let mut mods = 0;
        if tok.kind == TokenKind::Ident {
            if let Some(&(t, m)) = identifiers.get(&tok.pos) {
                ty = t;
                mods = m;
            }
        }
        let length = token_length(&tok);
        if length == 0 {
            continue;
        }
        let start = to_lsp(text, tok.pos);
        absolute.push((start.line, start.character, length, ty, mods));
    }
    absolute.sort_by_key(|t| (t.0, t.1));

    let mut out = Vec::with_capacity(absolute.len());
    let (mut prev_line, mut prev_char) = (0, 0);
    for (line, character, length, token_type, token_modifiers_bitset) in absolute {
        let delta_line = line - prev_line;
        let delta_start = if delta_line == 0 { character - prev_char } else { character };
        out.push(SemanticToken {
            delta_line,
            delta_start,
            length,
            token_type,
            token_modifiers_bitset,
        });
        prev_line = line;
        prev_char = character;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// (line, char, length, type, modifiers) with absolute positions.
    fn decode(tokens: &[SemanticToken]) -> Vec<(u32, u32, u32, u32, u32)> {
        let (mut line, mut character) = (0, 0);
        tokens
            .iter()
            .map(|t| {
                if t.delta_line > 0 {
                    line += t.delta_line;
                    character = t.delta_start;
                } else {
                    character += t.delta_start;
                }
                (line, character, t.length, t.token_type, t.token_modifiers_bitset)
            })
            .collect()
    }

    fn at(tokens: &[(u32, u32, u32, u32, u32)], line: u32, character: u32) -> Option<(u32, u32)> {
        tokens
            .iter()
            .find(|t| t.0 == line && t.1 == character)
            .map(|t| (t.3, t.4))
    }

    #[test]
    fn test_parameters_and_shadowing() {
        let text = "func f(n) {\n  n = n + 1\n  func g(n) {\n    n = n + 2\n  }\n}\n";
        let toks = decode(&semantic_tokens(text));
        assert_eq!(at(&toks, 0, 0), Some((KEYWORD, 0)));
        assert_eq!(at(&toks, 0, 5), Some((FUNCTION, MOD_DECLARATION)));
        assert_eq!(at(&toks, 0, 7), Some((PARAMETER, MOD_DECLARATION)));
        assert_eq!(at(&toks, 1, 2), Some((PARAMETER, 0)));
        assert_eq!(at(&toks, 1, 4), Some((OPERATOR, 0)));
        assert_eq!(at(&toks, 1, 6), Some((PARAMETER, 0)));
        assert_eq!(at(&toks, 1, 10), Some((NUMBER, 0)));
        assert_eq!(at(&toks, 2, 9), Some((PARAMETER, MOD_DECLARATION)));
        assert_eq!(at(&toks, 3, 8), Some((PARAMETER, 0)));
    }

    #[test]
    fn test_namespaces_builtins_and_strings() {
        let text = "import \"std:math\" as m\nx := m.floor(len(\"héllo\"))\n";
        let toks = decode(&semantic_tokens(text));
        assert_eq!(at(&toks, 0, 7), Some((STRING, 0)));
        assert_eq!(toks.iter().find(|t| t.0 == 0 && t.1 == 7).map(|t| t.2), Some(10));
        assert_eq!(at(&toks, 0, 21), Some((NAMESPACE, MOD_DECLARATION)));
        assert_eq!(at(&toks, 1, 0), Some((VARIABLE, MOD_DECLARATION)));
        assert_eq!(at(&toks, 1, 2), Some((OPERATOR, 0)));
        assert_eq!(at(&toks, 1, 5), Some((NAMESPACE, 0)));
        assert_eq!(at(&toks, 1, 13), Some((FUNCTION, 0)));
        // Multi-byte characters count in UTF-16 units.
        assert_eq!(toks.iter().find(|t| t.0 == 1 && t.1 == 17).map(|t| t.2), Some(7));
    }

    #[test]
    fn test_encoding_is_relative() {
        let tokens = semantic_tokens("a = 1\n  b = 2\n");
        let first: Vec<_> = tokens.iter().map(|t| (t.delta_line, t.delta_start)).collect();
        assert_eq!(first, vec![(0, 0), (0, 2), (0, 2), (1, 2), (0, 2), (0, 2)]);
        assert_eq!(legend().token_types.len(), 8);
    }

    #[test]
    fn test_empty_text() {
        assert!(semantic_tokens("").is_empty());
    }
}
