use super::{
    Parser,
    helpers::{PResult, error_at},
};
use crate::{
    ast::Expr,
    token::{ParseError, Position, Token, Tokenizer},
};

/// A piece of a template body.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateSegment {
    /// Literal text with escapes decoded.
    Text(String),
    /// Source of one `${...}`; `origin` is the first byte after `${` and
    /// `open` the position of the `$`.
    Interp {
        source: String,
        origin: Position,
        open: Position,
    },
}

struct Cursor<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: u32,
    column: u32,
}

impl Cursor<'_> {
    fn pos(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += c.len_utf8() as u32;
        }
        Some(c)
    }

    /// Consume an interpolation body up to its closing `}`, skipping nested
    /// braces, strings and comments.
    fn interpolation(&mut self) -> String {
        let mut out = String::new();
        let mut depth = 1usize;
        while let Some(c) = self.bump() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return out;
                    }
                }
                '"' | '`' => {
                    out.push(c);
                    while let Some(inner) = self.bump() {
                        out.push(inner);
                        if inner == '\\' && c == '"' {
                            if let Some(escaped) = self.bump() {
                                out.push(escaped);
                            }
                            continue;
                        }
                        if inner == c {
                            break;
                        }
                    }
                    continue;
                }
                '/' if self.peek() == Some('/') => {
                    out.push(c);
                    while let Some(next) = self.peek() {
                        if next == '\n' {
                            break;
                        }
                        out.push(next);
                        self.bump();
                    }
                    continue;
                }
                '/' if self.peek() == Some('*') => {
                    out.push(c);
                    let mut prev = '\0';
                    while let Some(next) = self.bump() {
                        out.push(next);
                        if prev == '*' && next == '/' {
                            break;
                        }
                        prev = next;
                    }
                    continue;
                }
                _ => {}
            }
            out.push(c);
        }
        out
    }
}

/// Split the raw body of a `t"..."` token, whose first byte sits at
/// `origin`, into text and interpolation segments. Text segments and
/// interpolations always alternate, starting and ending with text.
pub fn split_template(body: &str, origin: Position) -> Vec<TemplateSegment> {
    let mut cur = Cursor {
        chars: body.chars().peekable(),
        line: origin.line,
        column: origin.column,
    };
    let mut segments = Vec::new();
    let mut text = String::new();
    while let Some(c) = cur.peek() {
        match c {
            '\\' => {
                cur.bump();
                match cur.bump() {
                    Some('n') => text.push('\n'),
                    Some('t') => text.push('\t'),
                    Some('r') => text.push('\r'),
                    Some('"') => text.push('"'),
                    Some('\\') => text.push('\\'),
                    Some('$') => text.push('$'),
                    Some(other) => {
                        text.push('\\');
                        text.push(other);
                    }
                    None => text.push('\\'),
                }
            }
            '$' => {
                let open = cur.pos();
                cur.bump();
                if cur.peek() != Some('{') {
                    text.push('$');
                    continue;
                }
                cur.bump();
                let origin = cur.pos();
                let source = cur.interpolation();
                segments.push(TemplateSegment::Text(std::mem::take(&mut text)));
                segments.push(TemplateSegment::Interp { source, origin, open });
            }
            _ => {
                cur.bump();
                text.push(c);
            }
        }
    }
    segments.push(TemplateSegment::Text(text));
    segments
}

impl Parser {
    /// Build a template node from a TEMPLATE token. Each interpolation is
    /// re-lexed at its absolute position and must hold exactly one
    /// expression.
    pub(super) fn parse_template(&mut self, tok: &Token, tag: Option<Expr>) -> PResult<Expr> {
        let body_origin = tok.pos.shifted(2);
        let mut parts = Vec::new();
        let mut exprs = Vec::new();
        let mut first_error: Option<ParseError> = None;

        for segment in split_template(&tok.literal, body_origin) {
            match segment {
                TemplateSegment::Text(text) => parts.push(text),
                TemplateSegment::Interp { source, origin, open } => {
                    match self.parse_interpolation(&source, origin, open) {
                        Ok(expr) => exprs.push(expr),
                        Err(err) => {
                            if first_error.is_none() {
                                first_error = Some(err);
                            }
                        }
                    }
                }
            }
        }

        if let Some(err) = first_error {
            return Err(err);
        }
        Ok(Expr::Template {
            pos: tok.pos,
            tag: tag.map(Box::new),
            parts,
            exprs,
        })
    }

    fn parse_interpolation(&mut self, source: &str, origin: Position, open: Position) -> PResult<Expr> {
        let mut inner = Parser::new(Tokenizer::tokenize_at(source, origin));
        inner.nesting = 1;
        let result = if inner.at_eof() {
            Err(ParseError::with_position("empty template expression", open).with_length(2))
        } else {
            inner.parse_expression(super::Precedence::Lowest).and_then(|expr| {
                if inner.at_eof() {
                    Ok(expr)
                } else {
                    let extra = inner.cur().clone();
                    Err(error_at(&extra, "template expression must be a single expression"))
                }
            })
        };
        // Errors inside a nested construct (a func literal body, say) were
        // recorded by the inner parser and belong to this file too.
        self.diagnostics.append(&mut inner.diagnostics);
        result
    }
}
