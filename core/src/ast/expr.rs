use super::{AssignOp, Block, Ident, InfixOp, PrefixOp};
use crate::token::Position;

#[derive(Debug, Clone, PartialEq)]
pub enum DictEntry {
    Pair { key: Expr, value: Expr },
    /// `#{name}` is `#{"name": name}`
    Shorthand(Ident),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchArm {
    pub pos: Position,
    pub values: Vec<Expr>,
    pub result: Expr,
}

/// Expression nodes. `pos` is the token that introduced the node: the
/// operator for prefix/infix, `(` for calls, `[` for index, slice and
/// comprehension, `.` for member access.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Ident(Ident),
    Int {
        pos: Position,
        value: i64,
    },
    Float {
        pos: Position,
        value: f64,
    },
    Str {
        pos: Position,
        value: String,
    },
    Bool {
        pos: Position,
        value: bool,
    },
    Nil {
        pos: Position,
    },
    /// `()`, `(a,)`, `(a, b)`
    Tuple {
        pos: Position,
        items: Vec<Expr>,
    },
    List {
        pos: Position,
        items: Vec<Expr>,
    },
    /// `#{k: v, shorthand}`
    Dict {
        pos: Position,
        entries: Vec<DictEntry>,
    },
    /// `t"a ${x} b"`; `parts` always holds one more element than `exprs`.
    Template {
        pos: Position,
        tag: Option<Box<Expr>>,
        parts: Vec<String>,
        exprs: Vec<Expr>,
    },
    /// func(params) { body }
    Func {
        pos: Position,
        params: Vec<Ident>,
        body: Block,
    },
    Prefix {
        pos: Position,
        op: PrefixOp,
        operand: Box<Expr>,
    },
    Infix {
        pos: Position,
        op: InfixOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// cond ? then : els
    Ternary {
        pos: Position,
        cond: Box<Expr>,
        then: Box<Expr>,
        els: Box<Expr>,
    },
    /// then if cond else els
    CondExpr {
        pos: Position,
        then: Box<Expr>,
        cond: Box<Expr>,
        els: Box<Expr>,
    },
    Assign {
        pos: Position,
        target: Box<Expr>,
        op: AssignOp,
        value: Box<Expr>,
    },
    /// `...value`, only valid as a call argument.
    Spread {
        pos: Position,
        value: Box<Expr>,
    },
    Call {
        pos: Position,
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Index {
        pos: Position,
        object: Box<Expr>,
        index: Box<Expr>,
    },
    /// object[low:high:step]
    Slice {
        pos: Position,
        object: Box<Expr>,
        low: Option<Box<Expr>>,
        high: Option<Box<Expr>>,
        step: Option<Box<Expr>>,
    },
    Member {
        pos: Position,
        object: Box<Expr>,
        member: Ident,
    },
    /// [elem for var in seq if filter]
    Comprehension {
        pos: Position,
        elem: Box<Expr>,
        var: Ident,
        seq: Box<Expr>,
        filter: Option<Box<Expr>>,
    },
    Match {
        pos: Position,
        value: Box<Expr>,
        arms: Vec<MatchArm>,
        default: Option<Box<Expr>>,
    },
}

impl Expr {
    pub fn pos(&self) -> Position {
        match self {
            Expr::Ident(id) => id.pos,
            Expr::Int { pos, .. }
            | Expr::Float { pos, .. }
            | Expr::Str { pos, .. }
            | Expr::Bool { pos, .. }
            | Expr::Nil { pos }
            | Expr::Tuple { pos, .. }
            | Expr::List { pos, .. }
            | Expr::Dict { pos, .. }
            | Expr::Template { pos, .. }
            | Expr::Func { pos, .. }
            | Expr::Prefix { pos, .. }
            | Expr::Infix { pos, .. }
            | Expr::Ternary { pos, .. }
            | Expr::CondExpr { pos, .. }
            | Expr::Assign { pos, .. }
            | Expr::Spread { pos, .. }
            | Expr::Call { pos, .. }
            | Expr::Index { pos, .. }
            | Expr::Slice { pos, .. }
            | Expr::Member { pos, .. }
            | Expr::Comprehension { pos, .. }
            | Expr::Match { pos, .. } => *pos,
        }
    }

    pub fn as_ident(&self) -> Option<&Ident> {
        match self {
            Expr::Ident(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_call(&self) -> bool {
        matches!(self, Expr::Call { .. })
    }
}
