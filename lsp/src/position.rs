//! Conversion between core positions (1-based line, byte column) and
//! protocol positions (0-based line, UTF-16 column).

use tower_lsp::lsp_types::{Position, Range};
use welle_core::{ast::Ident, token::Position as CorePos};

fn line_text(text: &str, line0: usize) -> Option<&str> {
    text.split('\n').nth(line0)
}

fn utf16_len(s: &str) -> u32 {
    s.chars().map(|c| c.len_utf16() as u32).sum()
}

/// Protocol position for `pos`. Columns past the end of a line clamp to it.
pub fn to_lsp(text: &str, pos: CorePos) -> Position {
    let line0 = pos.line.saturating_sub(1);
    let Some(line) = line_text(text, line0 as usize) else {
        return Position::new(line0, 0);
    };
    let mut limit = (pos.column.saturating_sub(1) as usize).min(line.len());
    while !line.is_char_boundary(limit) {
        limit -= 1;
    }
    Position::new(line0, utf16_len(&line[..limit]))
}

/// Core position for a protocol position, or `None` past the last line.
/// A column inside a surrogate pair snaps to the start of its character.
pub fn to_core(text: &str, pos: Position) -> Option<CorePos> {
    let line = line_text(text, pos.line as usize)?;
    let target = pos.character;
    let mut seen = 0u32;
    for (idx, ch) in line.char_indices() {
        let width = ch.len_utf16() as u32;
        if seen + width > target {
            return Some(CorePos::new(pos.line + 1, idx as u32 + 1));
        }
        seen += width;
    }
    Some(CorePos::new(pos.line + 1, line.len() as u32 + 1))
}

/// Range covering `chars` characters from `start`, at least one unit wide.
pub fn char_range(text: &str, start: CorePos, chars: usize) -> Range {
    let begin = to_lsp(text, start);
    let rest = line_text(text, begin.line as usize)
        .and_then(|line| line.get((start.column.saturating_sub(1) as usize).min(line.len())..))
        .unwrap_or("");
    let mut width: u32 = rest.chars().take(chars).map(|c| c.len_utf16() as u32).sum();
    let taken = rest.chars().take(chars).count();
    // Diagnostics can run past the end of the line.
    width += (chars - taken) as u32;
    let end = Position::new(begin.line, begin.character + width.max(1));
    Range::new(begin, end)
}

pub fn ident_range(text: &str, ident: &Ident) -> Range {
    char_range(text, ident.pos, ident.name.chars().count())
}

pub fn end_position(text: &str) -> Position {
    let line = text.matches('\n').count() as u32;
    let last = text.rsplit('\n').next().unwrap_or("");
    Position::new(line, utf16_len(last))
}

/// Hashable form of a protocol range: start line and character, then end
/// line and character.
pub type RangeKey = (u32, u32, u32, u32);

pub fn range_key(range: &Range) -> RangeKey {
    (range.start.line, range.start.character, range.end.line, range.end.character)
}

/// Range covering the whole document.
pub fn full_range(text: &str) -> Range {
    Range::new(Position::new(0, 0), end_position(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_round_trip() {
        let text = "a = 1\nprint(a)\n";
        let core = CorePos::new(2, 7);
        let lsp = to_lsp(text, core);
        assert_eq!(lsp, Position::new(1, 6));
        assert_eq!(to_core(text, lsp), Some(core));
    }

    #[test]
    fn test_multibyte_columns() {
        // 'π' is two bytes and one UTF-16 unit; '𝄞' is four bytes and two units.
        let text = "π = \"𝄞\" + x\n";
        let x = CorePos::new(1, 15);
        assert_eq!(to_lsp(text, x), Position::new(0, 11));
        assert_eq!(to_core(text, Position::new(0, 11)), Some(x));
        // Inside the surrogate pair snaps back to the character start.
        assert_eq!(to_core(text, Position::new(0, 6)), Some(CorePos::new(1, 7)));
    }

    #[test]
    fn test_out_of_range() {
        let text = "abc";
        assert_eq!(to_core(text, Position::new(3, 0)), None);
        assert_eq!(to_core(text, Position::new(0, 99)), Some(CorePos::new(1, 4)));
        assert_eq!(to_lsp(text, CorePos::new(1, 99)), Position::new(0, 3));
    }

    #[test]
    fn test_ident_and_char_ranges() {
        let text = "x = π + ab\n";
        let pi = Ident::new("π", CorePos::new(1, 5));
        assert_eq!(ident_range(text, &pi), Range::new(Position::new(0, 4), Position::new(0, 5)));
        let r = char_range(text, CorePos::new(1, 10), 5);
        assert_eq!(r, Range::new(Position::new(0, 8), Position::new(0, 13)));
    }

    #[test]
    fn test_end_position() {
        assert_eq!(end_position(""), Position::new(0, 0));
        assert_eq!(end_position("ab\nπ𝄞"), Position::new(1, 3));
        assert_eq!(full_range("x\n").end, Position::new(1, 0));
    }
}
