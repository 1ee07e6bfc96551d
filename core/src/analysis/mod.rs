//! Per-file scope tree and binding resolution.
//!
//! [`analyze`] parses a document and walks it once, producing an arena of
//! scopes and bindings plus every identifier use with what it resolved to.
//! Scope ranges come from re-lexing the text and pairing brackets, so a
//! cursor position can be mapped back to the innermost scope.

mod ranges;
mod scope;
mod walker;


use tracing::trace;

pub use scope::{Binding, BindingId, BindingKind, Reference, Resolution, Scope, ScopeId};

use crate::{
    ast::{Ident, Program},
    diag::Diagnostic,
    parser::parse,
    token::Position,
};
use ranges::BracketPairs;
use walker::Walker;

/// Result of analyzing one document.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub program: Program,
    scopes: Vec<Scope>,
    bindings: Vec<Binding>,
    references: Vec<Reference>,
    diagnostics: Vec<Diagnostic>,
}

/// What sits under a cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Site<'a> {
    Reference(&'a Reference),
    Declaration(BindingId),
}

impl Site<'_> {
    pub fn binding(&self) -> Option<BindingId> {
        match self {
            Site::Reference(r) => r.binding(),
            Site::Declaration(id) => Some(*id),
        }
    }
}

/// True when `pos` is on `ident`, including the column just past its end.
pub fn ident_contains(ident: &Ident, pos: Position) -> bool {
    let start = ident.pos.column;
    let end = start + ident.name.len().max(1) as u32;
    pos.line == ident.pos.line && start <= pos.column && pos.column <= end
}

pub fn analyze(text: &str) -> Analysis {
    let parsed = parse(text);
    let pairs = BracketPairs::scan(text);
    let mut walker = Walker::new(&pairs);
    walker.walk_program(&parsed.program);

    let mut diagnostics = parsed.diagnostics;
    diagnostics.append(&mut walker.diagnostics);
    trace!(
        scopes = walker.scopes.len(),
        bindings = walker.bindings.len(),
        references = walker.references.len(),
        diagnostics = diagnostics.len(),
        "analyzed document"
    );
    Analysis {
        program: parsed.program,
        scopes: walker.scopes,
        bindings: walker.bindings,
        references: walker.references,
        diagnostics,
    }
}

impl Analysis {
    pub fn root(&self) -> ScopeId {
        ScopeId::ROOT
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0]
    }

    pub fn binding(&self, id: BindingId) -> &Binding {
        &self.bindings[id.0]
    }

    pub fn bindings(&self) -> impl Iterator<Item = (BindingId, &Binding)> {
        self.bindings.iter().enumerate().map(|(i, b)| (BindingId(i), b))
    }

    pub fn references(&self) -> &[Reference] {
        &self.references
    }

    /// Parse diagnostics followed by analysis diagnostics.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Innermost scope whose range contains `pos`. Positions outside the
    /// text fall back to the root.
    pub fn scope_at(&self, pos: Position) -> ScopeId {
        let mut cur = ScopeId::ROOT;
        'descend: loop {
            for &child in &self.scopes[cur.0].children {
                if self.scopes[child.0].span.contains(pos) {
                    cur = child;
                    continue 'descend;
                }
            }
            return cur;
        }
    }

    /// `scope` followed by its ancestors up to the root.
    pub fn scope_chain(&self, scope: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        std::iter::successors(Some(scope), move |id| self.scopes[id.0].parent)
    }

    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<BindingId> {
        self.scope_chain(scope)
            .find_map(|id| self.scopes[id.0].bindings.get(name).copied())
    }

    /// The reference under `pos`, or else the binding declared there.
    pub fn find_occurrence(&self, pos: Position) -> Option<Site<'_>> {
        if let Some(r) = self.references.iter().find(|r| ident_contains(&r.ident, pos)) {
            return Some(Site::Reference(r));
        }
        self.bindings()
            .find(|(_, b)| ident_contains(&b.decl, pos))
            .map(|(id, _)| Site::Declaration(id))
    }

    pub fn resolve_at(&self, pos: Position, name: &str) -> Option<BindingId> {
        self.lookup(self.scope_at(pos), name)
    }

    /// Every binding visible from `scope`, innermost first. Shadowed outer
    /// bindings are left out.
    pub fn visible(&self, scope: ScopeId) -> Vec<BindingId> {
        let mut seen = rustc_hash::FxHashSet::default();
        let mut out = Vec::new();
        for id in self.scope_chain(scope) {
            let mut local: Vec<BindingId> = self.scopes[id.0].bindings.values().copied().collect();
            local.sort();
            for binding in local {
                if seen.insert(self.bindings[binding.0].name.as_str()) {
                    out.push(binding);
                }
            }
        }
        out
    }

    /// References resolved to `id`, in source walk order.
    pub fn references_to(&self, id: BindingId) -> impl Iterator<Item = &Reference> {
        self.references.iter().filter(move |r| r.binding() == Some(id))
    }

    /// Top-level binding declared for `name`, if any.
    pub fn top_level(&self, name: &str) -> Option<BindingId> {
        self.scopes[ScopeId::ROOT.0].bindings.get(name).copied()
    }
}
