use rustc_hash::FxHashMap;

use crate::{
    parser::{TemplateSegment, split_template},
    token::{Position, Span, Token, TokenKind, Tokenizer, end_position},
};

/// Closing position of every `(`, `[` and `{` in a file, found by
/// re-lexing the text. Brackets inside template interpolations are paired
/// too, since function literals can live there.
#[derive(Debug, Clone)]
pub(crate) struct BracketPairs {
    closes: FxHashMap<Position, Position>,
    end: Position,
}

impl BracketPairs {
    pub(crate) fn scan(text: &str) -> Self {
        let mut closes = FxHashMap::default();
        pair_tokens(&Tokenizer::tokenize(text), &mut closes);
        Self {
            closes,
            end: end_position(text),
        }
    }

    /// Close position for the opener at `open`; end of text when the
    /// construct was never closed.
    pub(crate) fn close_of(&self, open: Position) -> Position {
        self.closes.get(&open).copied().unwrap_or(self.end)
    }

    /// From `start` to the bracket closing the opener at `open`.
    pub(crate) fn span(&self, start: Position, open: Position) -> Span {
        Span::new(start, self.close_of(open))
    }

    pub(crate) fn end(&self) -> Position {
        self.end
    }
}

fn closer_for(kind: TokenKind) -> Option<TokenKind> {
    match kind {
        TokenKind::LParen => Some(TokenKind::RParen),
        TokenKind::LBracket => Some(TokenKind::RBracket),
        TokenKind::LBrace => Some(TokenKind::RBrace),
        _ => None,
    }
}

fn pair_tokens(tokens: &[Token], closes: &mut FxHashMap<Position, Position>) {
    let mut stack: Vec<(TokenKind, Position)> = Vec::new();
    for tok in tokens {
        if let Some(closer) = closer_for(tok.kind) {
            stack.push((closer, tok.pos));
            continue;
        }
        match tok.kind {
            TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                // A stray closer is ignored; openers skipped over stay unclosed.
                if let Some(idx) = stack.iter().rposition(|(closer, _)| *closer == tok.kind) {
                    let (_, open) = stack[idx];
                    stack.truncate(idx);
                    closes.insert(open, tok.pos);
                }
            }
            TokenKind::Template => {
                for segment in split_template(&tok.literal, tok.pos.shifted(2)) {
                    if let TemplateSegment::Interp { source, origin, .. } = segment {
                        pair_tokens(&Tokenizer::tokenize_at(&source, origin), closes);
                    }
                }
            }
            _ => {}
        }
    }
}
