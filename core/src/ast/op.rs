use std::fmt::{self, Display};

use crate::token::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrefixOp {
    Neg,
    Bang,
    Not,
    BitNot,
}

impl PrefixOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Minus => Some(PrefixOp::Neg),
            TokenKind::Bang => Some(PrefixOp::Bang),
            TokenKind::Not => Some(PrefixOp::Not),
            TokenKind::BitNot => Some(PrefixOp::BitNot),
            _ => None,
        }
    }
}

impl Display for PrefixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefixOp::Neg => write!(f, "-"),
            PrefixOp::Bang => write!(f, "!"),
            PrefixOp::Not => write!(f, "not "),
            PrefixOp::BitNot => write!(f, "~"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfixOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
    BitOr,
    BitXor,
    BitAnd,
    Shl,
    Shr,
    Nullish,
}

impl InfixOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        use TokenKind as T;
        Some(match kind {
            T::Plus => InfixOp::Add,
            T::Minus => InfixOp::Sub,
            T::Star => InfixOp::Mul,
            T::Slash => InfixOp::Div,
            T::Percent => InfixOp::Mod,
            T::Eq => InfixOp::Eq,
            T::Ne => InfixOp::Ne,
            T::Lt => InfixOp::Lt,
            T::Le => InfixOp::Le,
            T::Gt => InfixOp::Gt,
            T::Ge => InfixOp::Ge,
            T::And => InfixOp::And,
            T::Or => InfixOp::Or,
            T::BitOr => InfixOp::BitOr,
            T::BitXor => InfixOp::BitXor,
            T::BitAnd => InfixOp::BitAnd,
            T::Shl => InfixOp::Shl,
            T::Shr => InfixOp::Shr,
            T::Nullish => InfixOp::Nullish,
            _ => return None,
        })
    }

    pub fn is_cmp(&self) -> bool {
        matches!(
            self,
            InfixOp::Eq | InfixOp::Ne | InfixOp::Lt | InfixOp::Le | InfixOp::Gt | InfixOp::Ge
        )
    }

    pub fn is_logic(&self) -> bool {
        matches!(self, InfixOp::And | InfixOp::Or | InfixOp::Nullish)
    }
}

impl Display for InfixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InfixOp::Add => "+",
            InfixOp::Sub => "-",
            InfixOp::Mul => "*",
            InfixOp::Div => "/",
            InfixOp::Mod => "%",
            InfixOp::Eq => "==",
            InfixOp::Ne => "!=",
            InfixOp::Lt => "<",
            InfixOp::Le => "<=",
            InfixOp::Gt => ">",
            InfixOp::Ge => ">=",
            InfixOp::And => "and",
            InfixOp::Or => "or",
            InfixOp::BitOr => "|",
            InfixOp::BitXor => "^",
            InfixOp::BitAnd => "&",
            InfixOp::Shl => "<<",
            InfixOp::Shr => ">>",
            InfixOp::Nullish => "??",
        };
        f.write_str(s)
    }
}

/// `=`, `:=` and the compound forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignOp {
    Assign,
    Walrus,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    BitOr,
}

impl AssignOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        use TokenKind as T;
        Some(match kind {
            T::Assign => AssignOp::Assign,
            T::Walrus => AssignOp::Walrus,
            T::PlusAssign => AssignOp::Add,
            T::MinusAssign => AssignOp::Sub,
            T::StarAssign => AssignOp::Mul,
            T::SlashAssign => AssignOp::Div,
            T::PercentAssign => AssignOp::Mod,
            T::BitOrAssign => AssignOp::BitOr,
            _ => return None,
        })
    }

    /// Compound operators read the target before writing it.
    pub fn is_compound(&self) -> bool {
        !matches!(self, AssignOp::Assign | AssignOp::Walrus)
    }

    /// The infix operator a compound assignment applies.
    pub fn infix(&self) -> Option<InfixOp> {
        match self {
            AssignOp::Add => Some(InfixOp::Add),
            AssignOp::Sub => Some(InfixOp::Sub),
            AssignOp::Mul => Some(InfixOp::Mul),
            AssignOp::Div => Some(InfixOp::Div),
            AssignOp::Mod => Some(InfixOp::Mod),
            AssignOp::BitOr => Some(InfixOp::BitOr),
            AssignOp::Assign | AssignOp::Walrus => None,
        }
    }
}

impl Display for AssignOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssignOp::Assign => write!(f, "="),
            AssignOp::Walrus => write!(f, ":="),
            AssignOp::Add => write!(f, "+="),
            AssignOp::Sub => write!(f, "-="),
            AssignOp::Mul => write!(f, "*="),
            AssignOp::Div => write!(f, "/="),
            AssignOp::Mod => write!(f, "%="),
            AssignOp::BitOr => write!(f, "|="),
        }
    }
}
