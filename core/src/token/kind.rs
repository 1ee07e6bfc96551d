use std::fmt;

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

use super::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Illegal,
    Eof,
    Newline,   // \n
    Semicolon, // ;

    Ident,
    Int,
    Float,
    Str,
    Template, // t"...${x}..."

    // Keywords
    Func,     // func
    Return,   // return
    Break,    // break
    Continue, // continue
    Pass,     // pass
    If,       // if
    Else,     // else
    While,    // while
    For,      // for
    In,       // in
    True,     // true
    False,    // false
    Nil,      // nil, null
    And,      // and
    Or,       // or
    Not,      // not
    Import,   // import
    From,     // from
    As,       // as
    Try,      // try
    Catch,    // catch
    Finally,  // finally
    Throw,    // throw
    Defer,    // defer
    Export,   // export
    Switch,   // switch
    Match,    // match
    Case,     // case
    Default,  // default

    // Operators
    Assign,   // =
    Walrus,   // :=
    Plus,     // +
    Minus,    // -
    Star,     // *
    Slash,    // /
    Percent,  // %
    Bang,     // !
    BitOr,    // |
    BitAnd,   // &
    BitXor,   // ^
    BitNot,   // ~
    Shl,      // <<
    Shr,      // >>
    Question, // ?
    Nullish,  // ??

    PlusAssign,    // +=
    MinusAssign,   // -=
    StarAssign,    // *=
    SlashAssign,   // /=
    PercentAssign, // %=
    BitOrAssign,   // |=

    Eq, // ==
    Ne, // !=
    Lt, // <
    Le, // <=
    Gt, // >
    Ge, // >=

    // Delimiters
    Hash,     // #
    Comma,    // ,
    Colon,    // :
    Dot,      // .
    Ellipsis, // ...
    LParen,   // (
    RParen,   // )
    LBracket, // [
    RBracket, // ]
    LBrace,   // {
    RBrace,   // }
}

impl TokenKind {
    pub fn is_keyword(self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            Func | Return
                | Break
                | Continue
                | Pass
                | If
                | Else
                | While
                | For
                | In
                | True
                | False
                | Nil
                | And
                | Or
                | Not
                | Import
                | From
                | As
                | Try
                | Catch
                | Finally
                | Throw
                | Defer
                | Export
                | Switch
                | Match
                | Case
                | Default
        )
    }

    pub fn is_separator(self) -> bool {
        matches!(self, TokenKind::Newline | TokenKind::Semicolon)
    }

    pub fn is_assign_op(self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            Assign | Walrus | PlusAssign | MinusAssign | StarAssign | SlashAssign | PercentAssign | BitOrAssign
        )
    }

    /// Human-readable name used in diagnostics.
    pub fn describe(self) -> &'static str {
        use TokenKind::*;
        match self {
            Illegal => "ILLEGAL",
            Eof => "EOF",
            Newline => "NEWLINE",
            Semicolon => ";",
            Ident => "IDENT",
            Int => "INT",
            Float => "FLOAT",
            Str => "STRING",
            Template => "TEMPLATE",
            Func => "func",
            Return => "return",
            Break => "break",
            Continue => "continue",
            Pass => "pass",
            If => "if",
            Else => "else",
            While => "while",
            For => "for",
            In => "in",
            True => "true",
            False => "false",
            Nil => "nil",
            And => "and",
            Or => "or",
            Not => "not",
            Import => "import",
            From => "from",
            As => "as",
            Try => "try",
            Catch => "catch",
            Finally => "finally",
            Throw => "throw",
            Defer => "defer",
            Export => "export",
            Switch => "switch",
            Match => "match",
            Case => "case",
            Default => "default",
            Assign => "=",
            Walrus => ":=",
            Plus => "+",
            Minus => "-",
            Star => "*",
            Slash => "/",
            Percent => "%",
            Bang => "!",
            BitOr => "|",
            BitAnd => "&",
            BitXor => "^",
            BitNot => "~",
            Shl => "<<",
            Shr => ">>",
            Question => "?",
            Nullish => "??",
            PlusAssign => "+=",
            MinusAssign => "-=",
            StarAssign => "*=",
            SlashAssign => "/=",
            PercentAssign => "%=",
            BitOrAssign => "|=",
            Eq => "==",
            Ne => "!=",
            Lt => "<",
            Le => "<=",
            Gt => ">",
            Ge => ">=",
            Hash => "#",
            Comma => ",",
            Colon => ":",
            Dot => ".",
            Ellipsis => "...",
            LParen => "(",
            RParen => ")",
            LBracket => "[",
            RBracket => "]",
            LBrace => "{",
            RBrace => "}",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Reserved words, in the order editors list them.
pub const KEYWORDS: &[&str] = &[
    "func", "return", "break", "continue", "pass", "if", "else", "while", "for", "in", "true", "false", "nil",
    "null", "and", "or", "not", "import", "from", "as", "try", "catch", "finally", "throw", "defer", "export",
    "switch", "match", "case", "default",
];

static KEYWORD_TABLE: Lazy<FxHashMap<&'static str, TokenKind>> = Lazy::new(|| {
    use TokenKind::*;
    let kinds = [
        Func, Return, Break, Continue, Pass, If, Else, While, For, In, True, False, Nil, Nil, And, Or, Not, Import,
        From, As, Try, Catch, Finally, Throw, Defer, Export, Switch, Match, Case, Default,
    ];
    KEYWORDS.iter().copied().zip(kinds).collect()
});

/// Keyword kind for `ident`, or `TokenKind::Ident`.
pub fn lookup_ident(ident: &str) -> TokenKind {
    KEYWORD_TABLE.get(ident).copied().unwrap_or(TokenKind::Ident)
}

pub fn is_keyword(ident: &str) -> bool {
    KEYWORD_TABLE.contains_key(ident)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Decoded text: identifier name, string contents, template body, or an
    /// error message for `Illegal`.
    pub literal: String,
    /// Source lexeme when it differs from `literal` (quoted strings).
    pub raw: Option<String>,
    pub pos: Position,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>, pos: Position) -> Self {
        Self {
            kind,
            literal: literal.into(),
            raw: None,
            pos,
        }
    }

    pub fn with_raw(mut self, raw: String) -> Self {
        self.raw = Some(raw);
        self
    }

    /// Character width used to size diagnostics, at least 1.
    pub fn width(&self) -> usize {
        let text = self.raw.as_deref().unwrap_or(&self.literal);
        text.chars().count().max(1)
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}
