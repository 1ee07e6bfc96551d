use super::{
    Parser,
    helpers::{PResult, error_at},
};
use crate::{
    ast::{AssignOp, DictEntry, Expr, Ident, InfixOp, MatchArm, PrefixOp},
    token::{
        TokenKind,
        numeric::{Number, parse_number},
    },
};

/// Binding power, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    Assign,
    Nullish,
    Ternary,
    Or,
    And,
    BitOr,
    BitXor,
    BitAnd,
    Equals,
    LessGreater,
    Shift,
    Sum,
    Product,
    Prefix,
    Postfix,
}

impl Precedence {
    /// The next weaker level, used to parse right-associative operands.
    fn weaker(self) -> Self {
        use Precedence::*;
        match self {
            Lowest | Assign => Lowest,
            Nullish => Assign,
            Ternary => Nullish,
            Or => Ternary,
            And => Or,
            BitOr => And,
            BitXor => BitOr,
            BitAnd => BitXor,
            Equals => BitAnd,
            LessGreater => Equals,
            Shift => LessGreater,
            Sum => Shift,
            Product => Sum,
            Prefix => Product,
            Postfix => Prefix,
        }
    }

    pub fn of(kind: TokenKind) -> Option<Self> {
        use TokenKind as T;
        let prec = match kind {
            k if k.is_assign_op() => Precedence::Assign,
            T::Nullish => Precedence::Nullish,
            T::Question | T::If => Precedence::Ternary,
            T::Or => Precedence::Or,
            T::And => Precedence::And,
            T::BitOr => Precedence::BitOr,
            T::BitXor => Precedence::BitXor,
            T::BitAnd => Precedence::BitAnd,
            T::Eq | T::Ne => Precedence::Equals,
            T::Lt | T::Le | T::Gt | T::Ge => Precedence::LessGreater,
            T::Shl | T::Shr => Precedence::Shift,
            T::Plus | T::Minus => Precedence::Sum,
            T::Star | T::Slash | T::Percent => Precedence::Product,
            T::LParen | T::LBracket | T::Dot | T::Template => Precedence::Postfix,
            _ => return None,
        };
        Some(prec)
    }
}

fn is_assign_target(expr: &Expr, op: AssignOp) -> bool {
    match expr {
        Expr::Ident(_) => true,
        Expr::Index { .. } | Expr::Member { .. } => op != AssignOp::Walrus,
        _ => false,
    }
}

impl Parser {
    pub fn parse_expression(&mut self, precedence: Precedence) -> PResult<Expr> {
        let mut left = self.parse_prefix()?;
        loop {
            let kind = self.kind();
            let Some(next) = Precedence::of(kind) else { break };
            if next <= precedence {
                break;
            }
            if kind == TokenKind::Template && !matches!(left, Expr::Ident(_) | Expr::Member { .. }) {
                break;
            }
            left = self.parse_infix(left, next)?;
        }
        Ok(left)
    }

    fn parse_prefix(&mut self) -> PResult<Expr> {
        let tok = self.cur().clone();
        match tok.kind {
            TokenKind::Ident => {
                self.advance();
                Ok(Expr::Ident(Ident::new(tok.literal, tok.pos)))
            }
            TokenKind::Int | TokenKind::Float => {
                self.advance();
                match parse_number(&tok.literal) {
                    Ok(Number::Int(value)) => Ok(Expr::Int { pos: tok.pos, value }),
                    Ok(Number::Float(value)) => Ok(Expr::Float { pos: tok.pos, value }),
                    Err(err) => Err(error_at(&tok, format!("invalid number {:?}: {err}", tok.literal))),
                }
            }
            TokenKind::Str => {
                self.advance();
                Ok(Expr::Str {
                    pos: tok.pos,
                    value: tok.literal,
                })
            }
            TokenKind::Template => {
                self.advance();
                self.parse_template(&tok, None)
            }
            TokenKind::True | TokenKind::False => {
                self.advance();
                Ok(Expr::Bool {
                    pos: tok.pos,
                    value: tok.kind == TokenKind::True,
                })
            }
            TokenKind::Nil => {
                self.advance();
                Ok(Expr::Nil { pos: tok.pos })
            }
            TokenKind::Minus | TokenKind::Bang | TokenKind::Not | TokenKind::BitNot => {
                self.advance();
                let operand = self.parse_expression(Precedence::Prefix)?;
                let op = PrefixOp::from_token(tok.kind).ok_or_else(|| error_at(&tok, "unknown prefix operator"))?;
                Ok(Expr::Prefix {
                    pos: tok.pos,
                    op,
                    operand: Box::new(operand),
                })
            }
            TokenKind::LParen => self.parse_grouped(),
            TokenKind::LBracket => self.parse_list(),
            TokenKind::Hash => self.parse_dict(),
            TokenKind::Func => self.parse_func_literal(),
            TokenKind::Match => self.parse_match(),
            TokenKind::Ellipsis => Err(error_at(&tok, "spread is only allowed in call arguments")),
            TokenKind::Illegal => Err(error_at(&tok, tok.literal.clone())),
            _ => Err(self.unexpected()),
        }
    }

    fn parse_infix(&mut self, left: Expr, precedence: Precedence) -> PResult<Expr> {
        let tok = self.cur().clone();
        if let Some(op) = AssignOp::from_token(tok.kind) {
            if !is_assign_target(&left, op) {
                return Err(error_at(&tok, "invalid assignment target"));
            }
            self.advance();
            let value = self.parse_expression(precedence.weaker())?;
            return Ok(Expr::Assign {
                pos: tok.pos,
                target: Box::new(left),
                op,
                value: Box::new(value),
            });
        }

        match tok.kind {
            TokenKind::Question => {
                self.advance();
                let then = self.parse_expression(Precedence::Lowest)?;
                self.expect(TokenKind::Colon, "in conditional expression")?;
                let els = self.parse_expression(precedence.weaker())?;
                Ok(Expr::Ternary {
                    pos: tok.pos,
                    cond: Box::new(left),
                    then: Box::new(then),
                    els: Box::new(els),
                })
            }
            TokenKind::If => {
                self.advance();
                let cond = self.parse_expression(Precedence::Ternary)?;
                self.expect(TokenKind::Else, "in conditional expression")?;
                let els = self.parse_expression(precedence.weaker())?;
                Ok(Expr::CondExpr {
                    pos: tok.pos,
                    then: Box::new(left),
                    cond: Box::new(cond),
                    els: Box::new(els),
                })
            }
            TokenKind::LParen => self.parse_call(left),
            TokenKind::LBracket => self.parse_index(left),
            TokenKind::Dot => {
                self.advance();
                let name = self.cur().clone();
                if name.kind != TokenKind::Ident && !name.kind.is_keyword() {
                    return Err(error_at(&name, "expected member name after '.'"));
                }
                self.advance();
                Ok(Expr::Member {
                    pos: tok.pos,
                    object: Box::new(left),
                    member: Ident::new(name.literal, name.pos),
                })
            }
            TokenKind::Template => {
                self.advance();
                self.parse_template(&tok, Some(left))
            }
            _ => {
                let op = InfixOp::from_token(tok.kind).ok_or_else(|| error_at(&tok, "unknown operator"))?;
                self.advance();
                let right = self.parse_expression(precedence)?;
                Ok(Expr::Infix {
                    pos: tok.pos,
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                })
            }
        }
    }

    /// `()`, `(a,)`, `(a, b)` or a parenthesized expression.
    fn parse_grouped(&mut self) -> PResult<Expr> {
        let open = self.advance();
        self.nested(|p| {
            if p.eat(TokenKind::RParen) {
                return Ok(Expr::Tuple {
                    pos: open.pos,
                    items: Vec::new(),
                });
            }
            let first = p.parse_expression(Precedence::Lowest)?;
            if !p.at(TokenKind::Comma) {
                p.expect(TokenKind::RParen, "to close group")?;
                return Ok(first);
            }
            let mut items = vec![first];
            while p.eat(TokenKind::Comma) {
                if p.at(TokenKind::RParen) {
                    break;
                }
                items.push(p.parse_expression(Precedence::Lowest)?);
            }
            p.expect(TokenKind::RParen, "to close tuple")?;
            Ok(Expr::Tuple { pos: open.pos, items })
        })
    }

    /// `[a, b]` or `[elem for var in seq if filter]`.
    fn parse_list(&mut self) -> PResult<Expr> {
        let open = self.advance();
        self.nested(|p| {
            if p.eat(TokenKind::RBracket) {
                return Ok(Expr::List {
                    pos: open.pos,
                    items: Vec::new(),
                });
            }
            let first = p.parse_expression(Precedence::Lowest)?;
            if p.eat(TokenKind::For) {
                let var = p.expect_ident("after 'for' in comprehension")?;
                p.expect(TokenKind::In, "in comprehension")?;
                let seq = p.parse_expression(Precedence::Ternary)?;
                let filter = if p.eat(TokenKind::If) {
                    Some(Box::new(p.parse_expression(Precedence::Lowest)?))
                } else {
                    None
                };
                p.expect(TokenKind::RBracket, "to close comprehension")?;
                return Ok(Expr::Comprehension {
                    pos: open.pos,
                    elem: Box::new(first),
                    var,
                    seq: Box::new(seq),
                    filter,
                });
            }
            let mut items = vec![first];
            while p.eat(TokenKind::Comma) {
                if p.at(TokenKind::RBracket) {
                    break;
                }
                items.push(p.parse_expression(Precedence::Lowest)?);
            }
            p.expect(TokenKind::RBracket, "to close list")?;
            Ok(Expr::List { pos: open.pos, items })
        })
    }

    /// `#{key: value, shorthand}`
    fn parse_dict(&mut self) -> PResult<Expr> {
        let hash = self.advance();
        self.expect(TokenKind::LBrace, "after '#'")?;
        self.nested(|p| {
            let mut entries = Vec::new();
            while !p.at(TokenKind::RBrace) {
                let is_shorthand = p.at(TokenKind::Ident) && matches!(p.peek_kind(1), TokenKind::Comma | TokenKind::RBrace);
                if is_shorthand {
                    let name = p.expect_ident("")?;
                    entries.push(DictEntry::Shorthand(name));
                } else {
                    let key = p.parse_expression(Precedence::Lowest)?;
                    p.expect(TokenKind::Colon, "after dict key")?;
                    let value = p.parse_expression(Precedence::Lowest)?;
                    entries.push(DictEntry::Pair { key, value });
                }
                if !p.eat(TokenKind::Comma) {
                    break;
                }
            }
            p.expect(TokenKind::RBrace, "to close dict")?;
            Ok(Expr::Dict { pos: hash.pos, entries })
        })
    }

    fn parse_call(&mut self, callee: Expr) -> PResult<Expr> {
        let open = self.advance();
        self.nested(|p| {
            let mut args = Vec::new();
            while !p.at(TokenKind::RParen) {
                if p.at(TokenKind::Ellipsis) {
                    let dots = p.advance();
                    let value = p.parse_expression(Precedence::Lowest)?;
                    args.push(Expr::Spread {
                        pos: dots.pos,
                        value: Box::new(value),
                    });
                } else {
                    args.push(p.parse_expression(Precedence::Lowest)?);
                }
                if !p.eat(TokenKind::Comma) {
                    break;
                }
            }
            p.expect(TokenKind::RParen, "to close call arguments")?;
            Ok(Expr::Call {
                pos: open.pos,
                callee: Box::new(callee),
                args,
            })
        })
    }

    /// `a[i]` or `a[low:high:step]` with every slice part optional.
    fn parse_index(&mut self, object: Expr) -> PResult<Expr> {
        let open = self.advance();
        self.nested(|p| {
            let low = if p.at(TokenKind::Colon) {
                None
            } else {
                Some(Box::new(p.parse_expression(Precedence::Lowest)?))
            };
            if !p.eat(TokenKind::Colon) {
                p.expect(TokenKind::RBracket, "to close index")?;
                let index = low.ok_or_else(|| error_at(&open, "missing index expression"))?;
                return Ok(Expr::Index {
                    pos: open.pos,
                    object: Box::new(object),
                    index,
                });
            }
            let high = if matches!(p.kind(), TokenKind::Colon | TokenKind::RBracket) {
                None
            } else {
                Some(Box::new(p.parse_expression(Precedence::Lowest)?))
            };
            let step = if p.eat(TokenKind::Colon) && !p.at(TokenKind::RBracket) {
                Some(Box::new(p.parse_expression(Precedence::Lowest)?))
            } else {
                None
            };
            p.expect(TokenKind::RBracket, "to close slice")?;
            Ok(Expr::Slice {
                pos: open.pos,
                object: Box::new(object),
                low,
                high,
                step,
            })
        })
    }

    fn parse_func_literal(&mut self) -> PResult<Expr> {
        let func = self.advance();
        let params = self.parse_params()?;
        let body = self.parse_block()?;
        Ok(Expr::Func {
            pos: func.pos,
            params,
            body,
        })
    }

    /// `match (value) { case 1, 2 { expr } default { expr } }`
    fn parse_match(&mut self) -> PResult<Expr> {
        let tok = self.advance();
        self.expect(TokenKind::LParen, "after 'match'")?;
        let value = self.nested(|p| {
            let value = p.parse_expression(Precedence::Lowest)?;
            p.expect(TokenKind::RParen, "after match value")?;
            Ok(value)
        })?;
        self.expect(TokenKind::LBrace, "to open match body")?;
        self.with_statements(|p| {
            let mut arms = Vec::new();
            let mut default = None;
            loop {
                p.skip_separators();
                match p.kind() {
                    TokenKind::RBrace => break,
                    TokenKind::Case => {
                        let case = p.advance();
                        let values = p.parse_case_values()?;
                        let result = p.parse_match_result()?;
                        arms.push(MatchArm {
                            pos: case.pos,
                            values,
                            result,
                        });
                    }
                    TokenKind::Default => {
                        p.advance();
                        default = Some(Box::new(p.parse_match_result()?));
                    }
                    _ => {
                        let tok = p.cur().clone();
                        return Err(error_at(&tok, format!("unexpected token in match: {}", tok.kind)));
                    }
                }
            }
            p.expect(TokenKind::RBrace, "to close match")?;
            Ok(Expr::Match {
                pos: tok.pos,
                value: Box::new(value),
                arms,
                default,
            })
        })
    }

    /// `{ expr }` after a match case.
    fn parse_match_result(&mut self) -> PResult<Expr> {
        self.expect(TokenKind::LBrace, "to open match case")?;
        self.skip_separators();
        let result = self.parse_expression(Precedence::Lowest)?;
        self.skip_separators();
        self.expect(TokenKind::RBrace, "to close match case")?;
        Ok(result)
    }

    /// Comma-separated values after `case`.
    pub(super) fn parse_case_values(&mut self) -> PResult<Vec<Expr>> {
        let mut values = vec![self.parse_expression(Precedence::Lowest)?];
        while self.eat(TokenKind::Comma) {
            values.push(self.parse_expression(Precedence::Lowest)?);
        }
        Ok(values)
    }

    /// `(a, b, c)` parameter list.
    pub(super) fn parse_params(&mut self) -> PResult<Vec<Ident>> {
        self.expect(TokenKind::LParen, "to open parameter list")?;
        self.nested(|p| {
            let mut params = Vec::new();
            while !p.at(TokenKind::RParen) {
                params.push(p.expect_ident("in parameter list")?);
                if !p.eat(TokenKind::Comma) {
                    break;
                }
            }
            p.expect(TokenKind::RParen, "to close parameter list")?;
            Ok(params)
        })
    }
}
