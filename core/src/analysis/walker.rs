use super::{
    ranges::BracketPairs,
    scope::{Binding, BindingId, BindingKind, Reference, Resolution, Scope, ScopeId},
};
use crate::{
    ast::{AssignOp, Block, DictEntry, Expr, Ident, Program, Stmt, Target},
    builtins,
    diag::{Diagnostic, WALRUS_REDECLARE},
    token::{Position, Span},
};

/// Single pass over a program building the scope tree, the binding arena
/// and the reference list.
pub(super) struct Walker<'a> {
    pairs: &'a BracketPairs,
    pub(super) scopes: Vec<Scope>,
    pub(super) bindings: Vec<Binding>,
    pub(super) references: Vec<Reference>,
    pub(super) diagnostics: Vec<Diagnostic>,
}

fn func_params(value: &Expr) -> Option<Vec<String>> {
    match value {
        Expr::Func { params, .. } => Some(param_names(params)),
        _ => None,
    }
}

fn param_names(params: &[Ident]) -> Vec<String> {
    params.iter().map(|p| p.name.clone()).collect()
}

impl<'a> Walker<'a> {
    pub(super) fn new(pairs: &'a BracketPairs) -> Self {
        let root = Scope::new(None, Span::new(Position::start(), pairs.end()));
        Self {
            pairs,
            scopes: vec![root],
            bindings: Vec::new(),
            references: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub(super) fn walk_program(&mut self, program: &Program) {
        self.walk_stmts(ScopeId::ROOT, &program.stmts);
    }

    fn push_scope(&mut self, parent: ScopeId, span: Span) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        self.scopes.push(Scope::new(Some(parent), span));
        self.scopes[parent.0].children.push(id);
        id
    }

    fn lookup(&self, scope: ScopeId, name: &str) -> Option<BindingId> {
        let mut cur = Some(scope);
        while let Some(id) = cur {
            let scope = &self.scopes[id.0];
            if let Some(&binding) = scope.bindings.get(name) {
                return Some(binding);
            }
            cur = scope.parent;
        }
        None
    }

    /// Declare `ident` in `scope`, or return the binding it already has there.
    fn declare(&mut self, scope: ScopeId, ident: &Ident, kind: BindingKind) -> BindingId {
        if let Some(&existing) = self.scopes[scope.0].bindings.get(&ident.name) {
            return existing;
        }
        let id = BindingId(self.bindings.len());
        self.bindings.push(Binding {
            name: ident.name.clone(),
            kind,
            decl: ident.clone(),
            scope,
            params: Vec::new(),
            module_path: None,
            member: None,
        });
        self.scopes[scope.0].bindings.insert(ident.name.clone(), id);
        id
    }

    fn add_ref(&mut self, ident: &Ident, resolution: Resolution) {
        self.references.push(Reference {
            ident: ident.clone(),
            resolution,
        });
    }

    fn resolve_ident(&mut self, scope: ScopeId, ident: &Ident) {
        let resolution = match self.lookup(scope, &ident.name) {
            Some(id) => Resolution::Binding(id),
            None if builtins::is_builtin(&ident.name) => Resolution::Builtin,
            None => Resolution::Unresolved,
        };
        self.add_ref(ident, resolution);
    }

    /// Plain and compound assignment mutate any visible binding; walrus
    /// always targets the current scope.
    fn assign(&mut self, scope: ScopeId, name: &Ident, op: AssignOp, value: Option<&Expr>) {
        let existing = if op == AssignOp::Walrus {
            self.scopes[scope.0].bindings.get(&name.name).copied()
        } else {
            self.lookup(scope, &name.name)
        };
        let id = match existing {
            Some(id) => {
                if op == AssignOp::Walrus {
                    self.diagnostics.push(Diagnostic::error(
                        WALRUS_REDECLARE,
                        format!("cannot redeclare {:?} in this scope", name.name),
                        name.pos,
                        name.width(),
                    ));
                }
                id
            }
            None => {
                let params = value.and_then(func_params);
                let kind = if params.is_some() {
                    BindingKind::Func
                } else {
                    BindingKind::Var
                };
                let id = self.declare(scope, name, kind);
                if let Some(params) = params {
                    self.bindings[id.0].params = params;
                }
                id
            }
        };
        self.add_ref(name, Resolution::Binding(id));
    }

    fn walk_stmts(&mut self, scope: ScopeId, stmts: &[Stmt]) {
        for stmt in stmts {
            self.walk_stmt(scope, stmt);
        }
    }

    /// A block with its own `{`..`}` scope.
    fn walk_block(&mut self, scope: ScopeId, block: &Block) {
        let span = self.pairs.span(block.pos, block.pos);
        let child = self.push_scope(scope, span);
        self.walk_stmts(child, &block.stmts);
    }

    fn walk_function(&mut self, scope: ScopeId, start: Position, params: &[Ident], body: &Block) {
        let span = self.pairs.span(start, body.pos);
        let child = self.push_scope(scope, span);
        for param in params {
            let id = self.declare(child, param, BindingKind::Param);
            self.add_ref(param, Resolution::Binding(id));
        }
        self.walk_stmts(child, &body.stmts);
    }

    fn declare_var(&mut self, scope: ScopeId, ident: &Ident) {
        if ident.is_discard() {
            return;
        }
        let id = self.declare(scope, ident, BindingKind::Var);
        self.add_ref(ident, Resolution::Binding(id));
    }

    fn walk_stmt(&mut self, scope: ScopeId, stmt: &Stmt) {
        match stmt {
            Stmt::Expr { expr, .. } => self.walk_expr(scope, expr),
            Stmt::Assign { name, op, value, .. } => {
                self.assign(scope, name, *op, Some(value));
                self.walk_expr(scope, value);
            }
            Stmt::IndexAssign { object, index, value, .. } => {
                self.walk_expr(scope, object);
                self.walk_expr(scope, index);
                self.walk_expr(scope, value);
            }
            Stmt::MemberAssign {
                object, member, value, ..
            } => {
                self.walk_member(scope, object, member);
                self.walk_expr(scope, value);
            }
            Stmt::Destructure { targets, op, value, .. } => {
                for target in targets {
                    if let Target::Name(id) | Target::Starred(id) = target {
                        self.assign(scope, id, *op, None);
                    }
                }
                self.walk_expr(scope, value);
            }
            Stmt::If { cond, then, els, .. } => {
                self.walk_expr(scope, cond);
                self.walk_stmt(scope, then);
                if let Some(els) = els {
                    self.walk_stmt(scope, els);
                }
            }
            Stmt::While { cond, body, .. } => {
                self.walk_expr(scope, cond);
                self.walk_block(scope, body);
            }
            Stmt::For {
                pos,
                init,
                cond,
                post,
                body,
            } => {
                let span = self.pairs.span(*pos, body.pos);
                let child = self.push_scope(scope, span);
                if let Some(init) = init {
                    self.walk_stmt(child, init);
                }
                if let Some(cond) = cond {
                    self.walk_expr(child, cond);
                }
                if let Some(post) = post {
                    self.walk_stmt(child, post);
                }
                self.walk_stmts(child, &body.stmts);
            }
            Stmt::ForIn {
                pos,
                key,
                value,
                iterable,
                body,
            } => {
                let span = self.pairs.span(*pos, body.pos);
                let child = self.push_scope(scope, span);
                self.walk_expr(child, iterable);
                self.declare_var(child, key);
                if let Some(value) = value {
                    self.declare_var(child, value);
                }
                self.walk_stmts(child, &body.stmts);
            }
            Stmt::Switch {
                value, cases, default, ..
            } => {
                self.walk_expr(scope, value);
                for case in cases {
                    for v in &case.values {
                        self.walk_expr(scope, v);
                    }
                    self.walk_block(scope, &case.body);
                }
                if let Some(default) = default {
                    self.walk_block(scope, default);
                }
            }
            Stmt::Try {
                body, catch, finally, ..
            } => {
                self.walk_block(scope, body);
                if let Some(catch) = catch {
                    let span = self.pairs.span(catch.pos, catch.body.pos);
                    let child = self.push_scope(scope, span);
                    if let Some(name) = &catch.name {
                        self.declare_var(child, name);
                    }
                    self.walk_stmts(child, &catch.body.stmts);
                }
                if let Some(finally) = finally {
                    self.walk_block(scope, finally);
                }
            }
            Stmt::Func {
                pos,
                name,
                params,
                body,
            } => {
                let id = self.declare(scope, name, BindingKind::Func);
                let binding = &mut self.bindings[id.0];
                binding.kind = BindingKind::Func;
                binding.params = param_names(params);
                self.walk_function(scope, *pos, params, body);
            }
            Stmt::Import { path, alias, .. } => {
                if let Some(alias) = alias {
                    let id = self.declare(scope, alias, BindingKind::Namespace);
                    self.bindings[id.0].module_path = Some(path.value.clone());
                    self.add_ref(alias, Resolution::Binding(id));
                }
            }
            Stmt::FromImport { path, items, .. } => {
                for item in items {
                    let local = item.local();
                    let id = self.declare(scope, local, BindingKind::Import);
                    let binding = &mut self.bindings[id.0];
                    binding.module_path = Some(path.value.clone());
                    binding.member = Some(item.name.name.clone());
                    self.add_ref(local, Resolution::Binding(id));
                }
            }
            Stmt::Export { stmt, .. } => self.walk_stmt(scope, stmt),
            Stmt::Return { values, .. } => {
                for value in values {
                    self.walk_expr(scope, value);
                }
            }
            Stmt::Throw { value, .. } => self.walk_expr(scope, value),
            Stmt::Defer { call, .. } => self.walk_expr(scope, call),
            Stmt::Block(block) => self.walk_block(scope, block),
            Stmt::Break { .. } | Stmt::Continue { .. } | Stmt::Pass { .. } => {}
        }
    }

    /// `alias.member` on a namespace import is a module member reference;
    /// any other member access only walks its object.
    fn walk_member(&mut self, scope: ScopeId, object: &Expr, member: &Ident) {
        if let Expr::Ident(base) = object
            && let Some(id) = self.lookup(scope, &base.name)
            && self.bindings[id.0].kind == BindingKind::Namespace
        {
            let module_path = self.bindings[id.0].module_path.clone().unwrap_or_default();
            self.add_ref(base, Resolution::Binding(id));
            self.add_ref(
                member,
                Resolution::ModuleMember {
                    alias: base.name.clone(),
                    module_path,
                    member: member.name.clone(),
                },
            );
            return;
        }
        self.walk_expr(scope, object);
    }

    fn walk_expr(&mut self, scope: ScopeId, expr: &Expr) {
        match expr {
            Expr::Ident(ident) => self.resolve_ident(scope, ident),
            Expr::Int { .. } | Expr::Float { .. } | Expr::Str { .. } | Expr::Bool { .. } | Expr::Nil { .. } => {}
            Expr::Tuple { items, .. } | Expr::List { items, .. } => {
                for item in items {
                    self.walk_expr(scope, item);
                }
            }
            Expr::Dict { entries, .. } => {
                for entry in entries {
                    match entry {
                        DictEntry::Pair { key, value } => {
                            self.walk_expr(scope, key);
                            self.walk_expr(scope, value);
                        }
                        DictEntry::Shorthand(ident) => self.resolve_ident(scope, ident),
                    }
                }
            }
            Expr::Template { tag, exprs, .. } => {
                if let Some(tag) = tag {
                    self.walk_expr(scope, tag);
                }
                for e in exprs {
                    self.walk_expr(scope, e);
                }
            }
            Expr::Func { pos, params, body } => self.walk_function(scope, *pos, params, body),
            Expr::Prefix { operand, .. } => self.walk_expr(scope, operand),
            Expr::Infix { left, right, .. } => {
                self.walk_expr(scope, left);
                self.walk_expr(scope, right);
            }
            Expr::Ternary { cond, then, els, .. } => {
                self.walk_expr(scope, cond);
                self.walk_expr(scope, then);
                self.walk_expr(scope, els);
            }
            Expr::CondExpr { then, cond, els, .. } => {
                self.walk_expr(scope, then);
                self.walk_expr(scope, cond);
                self.walk_expr(scope, els);
            }
            Expr::Assign { target, op, value, .. } => {
                match target.as_ref() {
                    Expr::Ident(name) => self.assign(scope, name, *op, Some(value)),
                    Expr::Member { object, member, .. } => self.walk_member(scope, object, member),
                    other => self.walk_expr(scope, other),
                }
                self.walk_expr(scope, value);
            }
            Expr::Spread { value, .. } => self.walk_expr(scope, value),
            Expr::Call { callee, args, .. } => {
                self.walk_expr(scope, callee);
                for arg in args {
                    self.walk_expr(scope, arg);
                }
            }
            Expr::Index { object, index, .. } => {
                self.walk_expr(scope, object);
                self.walk_expr(scope, index);
            }
            Expr::Slice {
                object, low, high, step, ..
            } => {
                self.walk_expr(scope, object);
                for part in [low, high, step].into_iter().flatten() {
                    self.walk_expr(scope, part);
                }
            }
            Expr::Member { object, member, .. } => self.walk_member(scope, object, member),
            Expr::Comprehension {
                pos,
                elem,
                var,
                seq,
                filter,
            } => {
                self.walk_expr(scope, seq);
                let span = self.pairs.span(*pos, *pos);
                let child = self.push_scope(scope, span);
                self.declare_var(child, var);
                if let Some(filter) = filter {
                    self.walk_expr(child, filter);
                }
                self.walk_expr(child, elem);
            }
            Expr::Match {
                value, arms, default, ..
            } => {
                self.walk_expr(scope, value);
                for arm in arms {
                    for v in &arm.values {
                        self.walk_expr(scope, v);
                    }
                    self.walk_expr(scope, &arm.result);
                }
                if let Some(default) = default {
                    self.walk_expr(scope, default);
                }
            }
        }
    }
}
