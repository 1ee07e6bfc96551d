use std::fmt;

/// 1-based line and byte column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    pub fn start() -> Self {
        Self { line: 1, column: 1 }
    }

    /// Column after `len` bytes on the same line.
    pub fn shifted(self, len: usize) -> Self {
        Self {
            line: self.line,
            column: self.column + len as u32,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Inclusive source range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    pub fn single(pos: Position) -> Self {
        Self { start: pos, end: pos }
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.start <= pos && pos <= self.end
    }

    /// True when `other` lies entirely inside this span.
    pub fn encloses(&self, other: &Span) -> bool {
        self.contains(other.start) && self.contains(other.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.line == self.end.line {
            write!(f, "{}:{}-{}", self.start.line, self.start.column, self.end.column)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Parse error with position information
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
    pub span: Option<Span>,
    /// Width of the offending token in characters, at least 1.
    pub length: usize,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            span: None,
            length: 1,
        }
    }

    pub fn with_span(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span: Some(span),
            length: 1,
        }
    }

    pub fn with_position(message: impl Into<String>, position: Position) -> Self {
        Self {
            message: message.into(),
            span: Some(Span::single(position)),
            length: 1,
        }
    }

    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length.max(1);
        self
    }

    pub fn position(&self) -> Option<Position> {
        self.span.map(|s| s.start)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(span) = &self.span {
            write!(f, "{} at {}", self.message, span.start)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for ParseError {}

/// Position just past the last byte of `text`.
pub fn end_position(text: &str) -> Position {
    let mut line = 1;
    let mut column = 1;
    for b in text.bytes() {
        if b == b'\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }
    Position::new(line, column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_position() {
        assert_eq!(end_position(""), Position::new(1, 1));
        assert_eq!(end_position("ab"), Position::new(1, 3));
        assert_eq!(end_position("ab\ncd"), Position::new(2, 3));
        assert_eq!(end_position("a\n"), Position::new(2, 1));
        // byte columns: π is two bytes
        assert_eq!(end_position("π"), Position::new(1, 3));
    }

    #[test]
    fn test_position_ordering() {
        assert!(Position::new(1, 9) < Position::new(2, 1));
        assert!(Position::new(3, 2) < Position::new(3, 4));
        assert_eq!(Position::new(2, 5).shifted(3), Position::new(2, 8));
    }

    #[test]
    fn test_span_contains_is_inclusive() {
        let span = Span::new(Position::new(1, 5), Position::new(3, 2));
        assert!(span.contains(Position::new(1, 5)));
        assert!(span.contains(Position::new(2, 100)));
        assert!(span.contains(Position::new(3, 2)));
        assert!(!span.contains(Position::new(3, 3)));
        assert!(!span.contains(Position::new(1, 4)));
    }

    #[test]
    fn test_span_display() {
        let span1 = Span::new(Position::new(1, 5), Position::new(1, 10));
        assert_eq!(span1.to_string(), "1:5-10");

        let span2 = Span::new(Position::new(1, 5), Position::new(3, 2));
        assert_eq!(span2.to_string(), "1:5-3:2");
    }

    #[test]
    fn test_parse_error_display() {
        let err1 = ParseError::new("simple error");
        assert_eq!(err1.to_string(), "simple error");

        let err2 = ParseError::with_position("syntax error", Position::new(2, 10));
        assert_eq!(err2.to_string(), "syntax error at 2:10");
        assert_eq!(err2.length, 1);
        assert_eq!(err2.with_length(0).length, 1);
    }
}
