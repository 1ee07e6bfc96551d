use super::{Parser, Precedence, helpers::PResult};
use crate::{
    ast::{Block, Expr, Stmt},
    token::{Position, TokenKind},
};

impl Parser {
    /// `{ statements }`. Newlines are statement separators again inside,
    /// even when the block sits in a call argument.
    pub(super) fn parse_block(&mut self) -> PResult<Block> {
        let open = self.expect(TokenKind::LBrace, "to open block")?;
        self.with_statements(|p| {
            let stmts = p.parse_statements_until(TokenKind::RBrace);
            // An unclosed block keeps its statements.
            if let Err(err) = p.expect(TokenKind::RBrace, "to close block") {
                p.record(err);
            }
            Ok(Block::new(open.pos, stmts))
        })
    }

    /// A block that may start on the next line, as in `while (x)\n{`.
    pub(super) fn parse_body(&mut self) -> PResult<Block> {
        if self.next_after_newlines_is(TokenKind::LBrace) {
            self.skip_newlines();
        }
        self.parse_block()
    }

    /// Expression statement; a top-level assignment becomes the matching
    /// assignment statement.
    pub(super) fn parse_simple_stmt(&mut self) -> PResult<Stmt> {
        let start = self.cur().pos;
        let expr = self.parse_expression(Precedence::Lowest)?;
        Ok(expr_to_stmt(start, expr))
    }
}

pub(super) fn expr_to_stmt(start: Position, expr: Expr) -> Stmt {
    let (pos, target, op, value) = match expr {
        Expr::Assign { pos, target, op, value } => (pos, target, op, value),
        expr => return Stmt::Expr { pos: start, expr },
    };
    match *target {
        Expr::Ident(name) => Stmt::Assign {
            pos: name.pos,
            name,
            op,
            value: *value,
        },
        Expr::Index { object, index, .. } => Stmt::IndexAssign {
            pos,
            object: *object,
            index: *index,
            op,
            value: *value,
        },
        Expr::Member { object, member, .. } => Stmt::MemberAssign {
            pos,
            object: *object,
            member,
            op,
            value: *value,
        },
        target => Stmt::Expr {
            pos: start,
            expr: Expr::Assign {
                pos,
                target: Box::new(target),
                op,
                value,
            },
        },
    }
}
