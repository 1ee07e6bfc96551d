use super::{
    Parser, Precedence,
    helpers::{PResult, error_at},
};
use crate::{
    ast::{AssignOp, Ident, Stmt, Target},
    token::{Token, TokenKind},
};

struct TargetList {
    targets: Vec<Target>,
    stars: Vec<Token>,
    trailing_comma: bool,
}

impl Parser {
    /// `(a, *rest, _) = value` at statement start. The cursor is restored
    /// and `None` returned when the parenthesis opens anything else.
    pub(super) fn try_destructure(&mut self) -> PResult<Option<Stmt>> {
        let start = self.snapshot();
        let open = self.advance();
        let list = self.nested(|p| p.scan_targets());
        let op = AssignOp::from_token(self.kind()).filter(|op| matches!(op, AssignOp::Assign | AssignOp::Walrus));

        let (Some(list), Some(op)) = (list, op) else {
            self.restore(start);
            return Ok(None);
        };
        // `(a) = 1` is a plain assignment to a grouped name.
        if list.targets.len() == 1 && list.stars.is_empty() && !list.trailing_comma {
            self.restore(start);
            return Ok(None);
        }

        if let Some(second) = list.stars.get(1) {
            return Err(error_at(second, "multiple starred targets"));
        }
        self.advance();
        let value = self.parse_expression(Precedence::Lowest)?;
        Ok(Some(Stmt::Destructure {
            pos: open.pos,
            targets: list.targets,
            op,
            value,
        }))
    }

    /// Consume `target {, target} [,] )`, or return `None` on anything
    /// that is not a plain target list.
    fn scan_targets(&mut self) -> Option<TargetList> {
        let mut list = TargetList {
            targets: Vec::new(),
            stars: Vec::new(),
            trailing_comma: false,
        };
        loop {
            let tok = self.advance();
            let target = match tok.kind {
                TokenKind::Star => {
                    let name = self.advance();
                    if name.kind != TokenKind::Ident {
                        return None;
                    }
                    list.stars.push(tok);
                    Target::Starred(Ident::new(name.literal, name.pos))
                }
                TokenKind::Ident if tok.literal == "_" => Target::Discard(tok.pos),
                TokenKind::Ident => Target::Name(Ident::new(tok.literal, tok.pos)),
                _ => return None,
            };
            list.targets.push(target);

            match self.advance().kind {
                TokenKind::RParen => return Some(list),
                TokenKind::Comma if self.at(TokenKind::RParen) => {
                    self.advance();
                    list.trailing_comma = true;
                    return Some(list);
                }
                TokenKind::Comma => {}
                _ => return None,
            }
        }
    }
}
