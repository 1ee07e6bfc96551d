use super::{AssignOp, Block, Expr, Ident};
use crate::token::Position;

/// One target of `(a, *rest, _) = value`.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Name(Ident),
    /// `_`
    Discard(Position),
    /// `*rest`, at most one per destructuring.
    Starred(Ident),
}

impl Target {
    pub fn ident(&self) -> Option<&Ident> {
        match self {
            Target::Name(id) | Target::Starred(id) => Some(id),
            Target::Discard(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    pub pos: Position,
    pub values: Vec<Expr>,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    /// Position of the `catch` keyword.
    pub pos: Position,
    pub name: Option<Ident>,
    pub body: Block,
}

/// String literal naming an import specifier.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportPath {
    pub value: String,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportItem {
    pub name: Ident,
    pub alias: Option<Ident>,
}

impl ImportItem {
    /// The name the item is bound to locally.
    pub fn local(&self) -> &Ident {
        self.alias.as_ref().unwrap_or(&self.name)
    }
}

/// Statement nodes.
///
/// ```text
/// statement   ::= assign | if | while | for | switch | try | func | import
///               | from_import | export | return | throw | defer | block | expr
/// if          ::= 'if' '(' expr ')' statement ['else' statement]
/// while       ::= 'while' '(' expr ')' block
/// for         ::= 'for' '(' [stmt] ';' [expr] ';' [stmt] ')' block
///               | 'for' '(' ident 'in' expr ')' block
///               | 'for' '(' '(' ident ',' ident ')' 'in' expr ')' block
///               | 'for' '(' ident ',' ident ')' 'in' expr block
/// switch      ::= 'switch' '(' expr ')' '{' ('case' expr {',' expr} block)* ['default' block] '}'
/// try         ::= 'try' block ['catch' '(' ident ')' block] ['finally' block]
/// func        ::= 'func' ident '(' [ident {',' ident}] ')' block
/// import      ::= 'import' string ['as' ident]
/// from_import ::= 'from' string 'import' ident ['as' ident] {',' ident ['as' ident]}
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expr {
        pos: Position,
        expr: Expr,
    },
    /// name op value
    Assign {
        pos: Position,
        name: Ident,
        op: AssignOp,
        value: Expr,
    },
    /// object[index] op value
    IndexAssign {
        pos: Position,
        object: Expr,
        index: Expr,
        op: AssignOp,
        value: Expr,
    },
    /// object.member op value
    MemberAssign {
        pos: Position,
        object: Expr,
        member: Ident,
        op: AssignOp,
        value: Expr,
    },
    /// (a, *rest, _) = value
    Destructure {
        pos: Position,
        targets: Vec<Target>,
        op: AssignOp,
        value: Expr,
    },
    If {
        pos: Position,
        cond: Expr,
        then: Box<Stmt>,
        els: Option<Box<Stmt>>,
    },
    While {
        pos: Position,
        cond: Expr,
        body: Block,
    },
    For {
        pos: Position,
        init: Option<Box<Stmt>>,
        cond: Option<Expr>,
        post: Option<Box<Stmt>>,
        body: Block,
    },
    ForIn {
        pos: Position,
        key: Ident,
        value: Option<Ident>,
        iterable: Expr,
        body: Block,
    },
    Switch {
        pos: Position,
        value: Expr,
        cases: Vec<SwitchCase>,
        default: Option<Block>,
    },
    Try {
        pos: Position,
        body: Block,
        catch: Option<CatchClause>,
        finally: Option<Block>,
    },
    Func {
        pos: Position,
        name: Ident,
        params: Vec<Ident>,
        body: Block,
    },
    Import {
        pos: Position,
        path: ImportPath,
        alias: Option<Ident>,
    },
    FromImport {
        pos: Position,
        path: ImportPath,
        items: Vec<ImportItem>,
    },
    /// export func ... | export name = ...
    Export {
        pos: Position,
        stmt: Box<Stmt>,
    },
    Return {
        pos: Position,
        values: Vec<Expr>,
    },
    Break {
        pos: Position,
    },
    Continue {
        pos: Position,
    },
    Pass {
        pos: Position,
    },
    Throw {
        pos: Position,
        value: Expr,
    },
    Defer {
        pos: Position,
        call: Expr,
    },
    Block(Block),
}

impl Stmt {
    pub fn pos(&self) -> Position {
        match self {
            Stmt::Expr { pos, .. }
            | Stmt::Assign { pos, .. }
            | Stmt::IndexAssign { pos, .. }
            | Stmt::MemberAssign { pos, .. }
            | Stmt::Destructure { pos, .. }
            | Stmt::If { pos, .. }
            | Stmt::While { pos, .. }
            | Stmt::For { pos, .. }
            | Stmt::ForIn { pos, .. }
            | Stmt::Switch { pos, .. }
            | Stmt::Try { pos, .. }
            | Stmt::Func { pos, .. }
            | Stmt::Import { pos, .. }
            | Stmt::FromImport { pos, .. }
            | Stmt::Export { pos, .. }
            | Stmt::Return { pos, .. }
            | Stmt::Break { pos }
            | Stmt::Continue { pos }
            | Stmt::Pass { pos }
            | Stmt::Throw { pos, .. }
            | Stmt::Defer { pos, .. } => *pos,
            Stmt::Block(block) => block.pos,
        }
    }

    /// Name declared at module level by `func name` or `name = ...`,
    /// looking through `export`.
    pub fn declared_name(&self) -> Option<&Ident> {
        match self {
            Stmt::Func { name, .. } => Some(name),
            Stmt::Assign { name, .. } => Some(name),
            Stmt::Export { stmt, .. } => stmt.declared_name(),
            _ => None,
        }
    }

    pub fn is_export(&self) -> bool {
        matches!(self, Stmt::Export { .. })
    }
}
