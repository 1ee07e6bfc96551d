//! Diagnostics shared by the parser, analysis and module index.

use std::fmt;

use crate::token::{ParseError, Position, Token};

pub const PARSE_ERROR: &str = "WP0001";
pub const WALRUS_REDECLARE: &str = "WA0001";
pub const DUPLICATE_EXPORT: &str = "WM0002";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// Start position plus a best-effort width in characters (at least 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagRange {
    pub pos: Position,
    pub length: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub code: &'static str,
    pub message: String,
    pub severity: Severity,
    pub range: DiagRange,
}

impl Diagnostic {
    pub fn error(code: &'static str, message: impl Into<String>, pos: Position, length: usize) -> Self {
        Self {
            code,
            message: message.into(),
            severity: Severity::Error,
            range: DiagRange {
                pos,
                length: length.max(1),
            },
        }
    }

    pub fn at_token(code: &'static str, message: impl Into<String>, tok: &Token) -> Self {
        Self::error(code, message, tok.pos, tok.width())
    }

    /// `path:line:col: severity CODE: message`
    pub fn format(&self, path: &str) -> String {
        format!(
            "{}:{}:{}: {} {}: {}",
            path, self.range.pos.line, self.range.pos.column, self.severity, self.code, self.message
        )
    }
}

impl From<ParseError> for Diagnostic {
    fn from(err: ParseError) -> Self {
        let pos = err.position().unwrap_or_default();
        Diagnostic::error(PARSE_ERROR, err.message, pos, err.length)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} at {}", self.code, self.message, self.range.pos)
    }
}
