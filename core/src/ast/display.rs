use std::fmt::{self, Display};

use super::{Block, DictEntry, Expr, Ident, ImportItem, Program, Stmt, Target};

fn join<T: Display>(items: &[T], sep: &str) -> String {
    items.iter().map(|i| i.to_string()).collect::<Vec<_>>().join(sep)
}

pub(crate) fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn escape_template_part(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '$' if chars.peek() == Some(&'{') => out.push_str("\\$"),
            c => out.push(c),
        }
    }
    out
}

impl Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.stmts.is_empty() {
            return write!(f, "{{}}");
        }
        write!(f, "{{ {} }}", join(&self.stmts, "; "))
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.stmts {
            writeln!(f, "{stmt}")?;
        }
        Ok(())
    }
}

impl Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Name(id) => write!(f, "{id}"),
            Target::Discard(_) => write!(f, "_"),
            Target::Starred(id) => write!(f, "*{id}"),
        }
    }
}

impl Display for ImportItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.alias {
            Some(alias) => write!(f, "{} as {}", self.name, alias),
            None => write!(f, "{}", self.name),
        }
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Expr { expr, .. } => write!(f, "{expr}"),
            Stmt::Assign { name, op, value, .. } => write!(f, "{name} {op} {value}"),
            Stmt::IndexAssign {
                object, index, op, value, ..
            } => write!(f, "{object}[{index}] {op} {value}"),
            Stmt::MemberAssign {
                object,
                member,
                op,
                value,
                ..
            } => write!(f, "{object}.{member} {op} {value}"),
            Stmt::Destructure { targets, op, value, .. } => {
                write!(f, "({}) {op} {value}", join(targets, ", "))
            }
            Stmt::If { cond, then, els, .. } => {
                write!(f, "if ({cond}) {then}")?;
                if let Some(els) = els {
                    write!(f, " else {els}")?;
                }
                Ok(())
            }
            Stmt::While { cond, body, .. } => write!(f, "while ({cond}) {body}"),
            Stmt::For {
                init, cond, post, body, ..
            } => {
                write!(f, "for (")?;
                if let Some(init) = init {
                    write!(f, "{init}")?;
                }
                write!(f, "; ")?;
                if let Some(cond) = cond {
                    write!(f, "{cond}")?;
                }
                write!(f, "; ")?;
                if let Some(post) = post {
                    write!(f, "{post}")?;
                }
                write!(f, ") {body}")
            }
            Stmt::ForIn {
                key,
                value,
                iterable,
                body,
                ..
            } => match value {
                Some(value) => write!(f, "for (({key}, {value}) in {iterable}) {body}"),
                None => write!(f, "for ({key} in {iterable}) {body}"),
            },
            Stmt::Switch {
                value, cases, default, ..
            } => {
                write!(f, "switch ({value}) {{")?;
                for case in cases {
                    write!(f, " case {} {}", join(&case.values, ", "), case.body)?;
                }
                if let Some(default) = default {
                    write!(f, " default {default}")?;
                }
                write!(f, " }}")
            }
            Stmt::Try {
                body, catch, finally, ..
            } => {
                write!(f, "try {body}")?;
                if let Some(catch) = catch {
                    match &catch.name {
                        Some(name) => write!(f, " catch ({name}) {}", catch.body)?,
                        None => write!(f, " catch {}", catch.body)?,
                    }
                }
                if let Some(finally) = finally {
                    write!(f, " finally {finally}")?;
                }
                Ok(())
            }
            Stmt::Func { name, params, body, .. } => {
                write!(f, "func {name}({}) {body}", join(params, ", "))
            }
            Stmt::Import { path, alias, .. } => {
                write!(f, "import {}", quote(&path.value))?;
                if let Some(alias) = alias {
                    write!(f, " as {alias}")?;
                }
                Ok(())
            }
            Stmt::FromImport { path, items, .. } => {
                write!(f, "from {} import {}", quote(&path.value), join(items, ", "))
            }
            Stmt::Export { stmt, .. } => write!(f, "export {stmt}"),
            Stmt::Return { values, .. } => {
                if values.is_empty() {
                    write!(f, "return")
                } else {
                    write!(f, "return {}", join(values, ", "))
                }
            }
            Stmt::Break { .. } => write!(f, "break"),
            Stmt::Continue { .. } => write!(f, "continue"),
            Stmt::Pass { .. } => write!(f, "pass"),
            Stmt::Throw { value, .. } => write!(f, "throw {value}"),
            Stmt::Defer { call, .. } => write!(f, "defer {call}"),
            Stmt::Block(block) => write!(f, "{block}"),
        }
    }
}

impl Display for DictEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DictEntry::Pair { key, value } => write!(f, "{key}: {value}"),
            DictEntry::Shorthand(id) => write!(f, "{id}"),
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Ident(id) => write!(f, "{id}"),
            Expr::Int { value, .. } => write!(f, "{value}"),
            Expr::Float { value, .. } => write!(f, "{value:?}"),
            Expr::Str { value, .. } => f.write_str(&quote(value)),
            Expr::Bool { value, .. } => write!(f, "{value}"),
            Expr::Nil { .. } => write!(f, "nil"),
            Expr::Tuple { items, .. } => match items.len() {
                1 => write!(f, "({},)", items[0]),
                _ => write!(f, "({})", join(items, ", ")),
            },
            Expr::List { items, .. } => write!(f, "[{}]", join(items, ", ")),
            Expr::Dict { entries, .. } => write!(f, "#{{{}}}", join(entries, ", ")),
            Expr::Template { tag, parts, exprs, .. } => {
                if let Some(tag) = tag {
                    write!(f, "{tag} ")?;
                }
                write!(f, "t\"")?;
                for (i, part) in parts.iter().enumerate() {
                    f.write_str(&escape_template_part(part))?;
                    if let Some(expr) = exprs.get(i) {
                        write!(f, "${{{expr}}}")?;
                    }
                }
                write!(f, "\"")
            }
            Expr::Func { params, body, .. } => write!(f, "func({}) {body}", join(params, ", ")),
            Expr::Prefix { op, operand, .. } => write!(f, "({op}{operand})"),
            Expr::Infix { op, left, right, .. } => write!(f, "({left} {op} {right})"),
            Expr::Ternary { cond, then, els, .. } => write!(f, "({cond} ? {then} : {els})"),
            Expr::CondExpr { then, cond, els, .. } => write!(f, "({then} if {cond} else {els})"),
            Expr::Assign { target, op, value, .. } => write!(f, "({target} {op} {value})"),
            Expr::Spread { value, .. } => write!(f, "...{value}"),
            Expr::Call { callee, args, .. } => write!(f, "{callee}({})", join(args, ", ")),
            Expr::Index { object, index, .. } => write!(f, "({object}[{index}])"),
            Expr::Slice {
                object, low, high, step, ..
            } => {
                write!(f, "({object}[")?;
                if let Some(low) = low {
                    write!(f, "{low}")?;
                }
                write!(f, ":")?;
                if let Some(high) = high {
                    write!(f, "{high}")?;
                }
                if let Some(step) = step {
                    write!(f, ":{step}")?;
                }
                write!(f, "])")
            }
            Expr::Member { object, member, .. } => write!(f, "{object}.{member}"),
            Expr::Comprehension {
                elem, var, seq, filter, ..
            } => {
                write!(f, "[{elem} for {var} in {seq}")?;
                if let Some(filter) = filter {
                    write!(f, " if {filter}")?;
                }
                write!(f, "]")
            }
            Expr::Match {
                value, arms, default, ..
            } => {
                write!(f, "match ({value}) {{")?;
                for arm in arms {
                    write!(f, " case {} {{ {} }}", join(&arm.values, ", "), arm.result)?;
                }
                if let Some(default) = default {
                    write!(f, " default {{ {default} }}")?;
                }
                write!(f, " }}")
            }
        }
    }
}
