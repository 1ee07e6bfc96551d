use super::{Position, Token, TokenKind, lookup_ident};

#[inline]
fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic() || (!c.is_ascii() && !c.is_whitespace())
}

#[inline]
fn is_ident_continue(c: char) -> bool {
    is_ident_start(c) || c.is_ascii_digit()
}

/// [chars] and [idx] track the cursor; [line] and [column] are 1-based,
/// with columns counted in bytes.
pub struct Tokenizer {
    chars: Vec<char>,
    idx: usize,
    len: usize,
    line: u32,
    column: u32,
}

impl Tokenizer {
    pub fn new(input: &str) -> Self {
        Self::with_origin(input, Position::start())
    }

    /// Tokenizer whose first character sits at `origin`. Used to re-lex
    /// template interpolations at their absolute source position.
    pub fn with_origin(input: &str, origin: Position) -> Self {
        let chars: Vec<char> = input.chars().collect();
        Self {
            len: chars.len(),
            chars,
            idx: 0,
            line: origin.line,
            column: origin.column,
        }
    }

    /// All tokens of `input`, ending with `Eof`.
    pub fn tokenize(input: &str) -> Vec<Token> {
        Self::new(input).collect_all()
    }

    pub fn tokenize_at(input: &str, origin: Position) -> Vec<Token> {
        Self::with_origin(input, origin).collect_all()
    }

    fn collect_all(mut self) -> Vec<Token> {
        let mut tokens = Vec::with_capacity(self.len / 4 + 1);
        loop {
            let tok = self.next_token();
            let done = tok.kind == TokenKind::Eof;
            tokens.push(tok);
            if done {
                return tokens;
            }
        }
    }

    pub fn current_position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn eof(&self) -> bool {
        self.idx >= self.len
    }

    fn current(&self) -> Option<char> {
        self.chars.get(self.idx).copied()
    }

    fn peek(&self, ahead: usize) -> Option<char> {
        self.chars.get(self.idx + ahead).copied()
    }

    fn advance_char(&mut self) {
        if let Some(c) = self.current() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += c.len_utf8() as u32;
            }
            self.idx += 1;
        }
    }

    fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(c) = self.current() {
            if !pred(c) {
                break;
            }
            self.advance_char();
        }
    }

    fn slice(&self, from: usize, to: usize) -> String {
        self.chars[from..to.min(self.len)].iter().collect()
    }

    fn skip_whitespace(&mut self) {
        self.eat_while(|c| matches!(c, ' ' | '\t' | '\r'));
    }

    fn skip_line_comment(&mut self) {
        // The newline itself is a token.
        self.eat_while(|c| c != '\n');
    }

    /// Returns false when the comment never closes.
    fn skip_block_comment(&mut self) -> bool {
        self.advance_char();
        self.advance_char();
        while !self.eof() {
            if self.current() == Some('*') && self.peek(1) == Some('/') {
                self.advance_char();
                self.advance_char();
                return true;
            }
            self.advance_char();
        }
        false
    }

    pub fn next_token(&mut self) -> Token {
        loop {
            self.skip_whitespace();
            match (self.current(), self.peek(1)) {
                (Some('/'), Some('/')) => self.skip_line_comment(),
                (Some('/'), Some('*')) => {
                    let start = self.current_position();
                    if !self.skip_block_comment() {
                        return Token::new(TokenKind::Illegal, "unterminated comment", start);
                    }
                }
                _ => break,
            }
        }

        let start = self.current_position();
        let Some(c) = self.current() else {
            return Token::new(TokenKind::Eof, "", start);
        };

        match c {
            '\n' => {
                self.advance_char();
                Token::new(TokenKind::Newline, "\n", start)
            }
            '"' if self.peek(1) == Some('"') && self.peek(2) == Some('"') => self.read_triple_string(start),
            '"' => self.read_string(start),
            '`' => self.read_raw_string(start),
            't' if self.peek(1) == Some('"') => self.read_template(start),
            c if c.is_ascii_digit() => self.read_number(start),
            c if is_ident_start(c) => self.read_ident(start),
            _ => self.read_punctuation(start),
        }
    }

    fn read_ident(&mut self, start: Position) -> Token {
        let begin = self.idx;
        self.eat_while(is_ident_continue);
        let lit = self.slice(begin, self.idx);
        Token::new(lookup_ident(&lit), lit, start)
    }

    fn read_number(&mut self, start: Position) -> Token {
        let begin = self.idx;
        let mut is_float = false;
        if self.current() == Some('0') && matches!(self.peek(1), Some('x' | 'X' | 'b' | 'B' | 'o' | 'O')) {
            self.advance_char();
            self.advance_char();
            self.eat_while(|c| c.is_ascii_alphanumeric() || c == '_');
        } else {
            self.eat_while(|c| c.is_ascii_digit() || c == '_');
            if self.current() == Some('.') && self.peek(1).is_some_and(|c| c.is_ascii_digit()) {
                is_float = true;
                self.advance_char();
                self.eat_while(|c| c.is_ascii_digit() || c == '_');
            }
            if matches!(self.current(), Some('e' | 'E')) {
                is_float = true;
                self.advance_char();
                if matches!(self.current(), Some('+' | '-')) {
                    self.advance_char();
                }
                self.eat_while(|c| c.is_ascii_digit() || c == '_');
            }
            // Trailing garbage such as `12abc` stays in the literal so the
            // normalizer reports it as one malformed number.
            self.eat_while(is_ident_continue);
        }
        let lit = self.slice(begin, self.idx);
        let kind = if is_float { TokenKind::Float } else { TokenKind::Int };
        Token::new(kind, lit, start)
    }

    fn read_string(&mut self, start: Position) -> Token {
        let begin = self.idx;
        self.advance_char(); // opening quote
        let mut content = String::new();
        loop {
            match self.current() {
                None | Some('\n') => {
                    return Token::new(TokenKind::Illegal, "unterminated string", start);
                }
                Some('"') => break,
                Some('\\') => {
                    let escaped = match self.peek(1) {
                        Some('"') => Some('"'),
                        Some('\\') => Some('\\'),
                        Some('n') => Some('\n'),
                        Some('t') => Some('\t'),
                        Some('r') => Some('\r'),
                        _ => None,
                    };
                    match escaped {
                        Some(ch) => {
                            content.push(ch);
                            self.advance_char();
                            self.advance_char();
                        }
                        None => {
                            // Unknown escape keeps its backslash.
                            content.push('\\');
                            self.advance_char();
                        }
                    }
                }
                Some(c) => {
                    content.push(c);
                    self.advance_char();
                }
            }
        }
        self.advance_char(); // closing quote
        let raw = self.slice(begin, self.idx);
        Token::new(TokenKind::Str, content, start).with_raw(raw)
    }

    fn read_triple_string(&mut self, start: Position) -> Token {
        let begin = self.idx;
        for _ in 0..3 {
            self.advance_char();
        }
        let body = self.idx;
        while !self.eof() {
            if self.current() == Some('"') && self.peek(1) == Some('"') && self.peek(2) == Some('"') {
                let content = self.slice(body, self.idx);
                for _ in 0..3 {
                    self.advance_char();
                }
                let raw = self.slice(begin, self.idx);
                return Token::new(TokenKind::Str, content, start).with_raw(raw);
            }
            self.advance_char();
        }
        Token::new(TokenKind::Illegal, "unterminated string", start)
    }

    fn read_raw_string(&mut self, start: Position) -> Token {
        let begin = self.idx;
        self.advance_char(); // opening backtick
        let body = self.idx;
        self.eat_while(|c| c != '`');
        if self.eof() {
            return Token::new(TokenKind::Illegal, "unterminated string", start);
        }
        let content = self.slice(body, self.idx);
        self.advance_char(); // closing backtick
        let raw = self.slice(begin, self.idx);
        Token::new(TokenKind::Str, content, start).with_raw(raw)
    }

    /// `t"text ${expr} text"`. The literal is the raw body between the
    /// quotes; interpolations are parsed later.
    fn read_template(&mut self, start: Position) -> Token {
        let begin = self.idx;
        self.advance_char(); // t
        self.advance_char(); // "
        let body = self.idx;
        loop {
            match self.current() {
                None | Some('\n') => {
                    return Token::new(TokenKind::Illegal, "unterminated template", start);
                }
                Some('"') => break,
                Some('\\') => {
                    self.advance_char();
                    if self.current().is_some_and(|c| c != '\n') {
                        self.advance_char();
                    }
                }
                Some('$') if self.peek(1) == Some('{') => {
                    self.advance_char();
                    self.advance_char();
                    if !self.skip_interpolation() {
                        return Token::new(TokenKind::Illegal, "unterminated template", start);
                    }
                }
                Some(_) => self.advance_char(),
            }
        }
        let content = self.slice(body, self.idx);
        self.advance_char(); // closing quote
        let raw = self.slice(begin, self.idx);
        Token::new(TokenKind::Template, content, start).with_raw(raw)
    }

    /// Skip to the `}` closing an interpolation, honoring nested braces,
    /// strings and comments. Returns false at end of input.
    fn skip_interpolation(&mut self) -> bool {
        let mut depth = 1usize;
        while let Some(c) = self.current() {
            match c {
                '{' => {
                    depth += 1;
                    self.advance_char();
                }
                '}' => {
                    depth -= 1;
                    self.advance_char();
                    if depth == 0 {
                        return true;
                    }
                }
                '"' | '`' => {
                    let quote = c;
                    self.advance_char();
                    while let Some(inner) = self.current() {
                        if inner == '\\' && quote == '"' {
                            self.advance_char();
                            self.advance_char();
                            continue;
                        }
                        self.advance_char();
                        if inner == quote {
                            break;
                        }
                    }
                }
                '/' if self.peek(1) == Some('/') => self.skip_line_comment(),
                '/' if self.peek(1) == Some('*') => {
                    if !self.skip_block_comment() {
                        return false;
                    }
                }
                _ => self.advance_char(),
            }
        }
        false
    }

    fn read_punctuation(&mut self, start: Position) -> Token {
        use TokenKind::*;
        let c = self.current().unwrap_or('\0');
        let next = self.peek(1);
        let (kind, width) = match (c, next) {
            (';', _) => (Semicolon, 1),
            ('(', _) => (LParen, 1),
            (')', _) => (RParen, 1),
            ('{', _) => (LBrace, 1),
            ('}', _) => (RBrace, 1),
            ('[', _) => (LBracket, 1),
            (']', _) => (RBracket, 1),
            (',', _) => (Comma, 1),
            ('#', _) => (Hash, 1),
            ('~', _) => (BitNot, 1),
            ('^', _) => (BitXor, 1),
            ('&', _) => (BitAnd, 1),
            ('.', Some('.')) if self.peek(2) == Some('.') => (Ellipsis, 3),
            ('.', _) => (Dot, 1),
            (':', Some('=')) => (Walrus, 2),
            (':', _) => (Colon, 1),
            ('?', Some('?')) => (Nullish, 2),
            ('?', _) => (Question, 1),
            ('+', Some('=')) => (PlusAssign, 2),
            ('+', _) => (Plus, 1),
            ('-', Some('=')) => (MinusAssign, 2),
            ('-', _) => (Minus, 1),
            ('*', Some('=')) => (StarAssign, 2),
            ('*', _) => (Star, 1),
            ('/', Some('=')) => (SlashAssign, 2),
            ('/', _) => (Slash, 1),
            ('%', Some('=')) => (PercentAssign, 2),
            ('%', _) => (Percent, 1),
            ('|', Some('=')) => (BitOrAssign, 2),
            ('|', _) => (BitOr, 1),
            ('=', Some('=')) => (Eq, 2),
            ('=', _) => (Assign, 1),
            ('!', Some('=')) => (Ne, 2),
            ('!', _) => (Bang, 1),
            ('<', Some('=')) => (Le, 2),
            ('<', Some('<')) => (Shl, 2),
            ('<', _) => (Lt, 1),
            ('>', Some('=')) => (Ge, 2),
            ('>', Some('>')) => (Shr, 2),
            ('>', _) => (Gt, 1),
            _ => {
                self.advance_char();
                return Token::new(Illegal, format!("illegal character {c:?}"), start);
            }
        };
        let begin = self.idx;
        for _ in 0..width {
            self.advance_char();
        }
        Token::new(kind, self.slice(begin, self.idx), start)
    }
}

impl Iterator for Tokenizer {
    type Item = Token;

    /// Yields tokens up to, but not including, `Eof`.
    fn next(&mut self) -> Option<Token> {
        let tok = self.next_token();
        (tok.kind != TokenKind::Eof).then_some(tok)
    }
}
