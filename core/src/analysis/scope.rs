use std::fmt;

use rustc_hash::FxHashMap;

use crate::{ast::Ident, token::Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingId(pub(crate) usize);

impl ScopeId {
    pub const ROOT: ScopeId = ScopeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

impl BindingId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
    Var,
    Param,
    Func,
    /// `import "path" as alias`
    Namespace,
    /// `from "path" import name [as alias]`
    Import,
    Builtin,
    Keyword,
}

impl BindingKind {
    pub fn label(self) -> &'static str {
        match self {
            BindingKind::Var => "var",
            BindingKind::Param => "param",
            BindingKind::Func => "func",
            BindingKind::Namespace => "module",
            BindingKind::Import => "import",
            BindingKind::Builtin => "builtin",
            BindingKind::Keyword => "keyword",
        }
    }
}

impl fmt::Display for BindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub name: String,
    pub kind: BindingKind,
    /// The declaring identifier.
    pub decl: Ident,
    pub scope: ScopeId,
    /// Parameter names, for functions.
    pub params: Vec<String>,
    /// Import specifier as written, for namespace and import bindings.
    pub module_path: Option<String>,
    /// Imported member name, for `from` imports.
    pub member: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scope {
    pub parent: Option<ScopeId>,
    pub children: Vec<ScopeId>,
    pub span: Span,
    pub bindings: FxHashMap<String, BindingId>,
}

impl Scope {
    pub(crate) fn new(parent: Option<ScopeId>, span: Span) -> Self {
        Self {
            parent,
            children: Vec::new(),
            span,
            bindings: FxHashMap::default(),
        }
    }
}

/// What an identifier use resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Binding(BindingId),
    Builtin,
    /// `alias.member` where `alias` is a namespace import.
    ModuleMember {
        alias: String,
        module_path: String,
        member: String,
    },
    Unresolved,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    pub ident: Ident,
    pub resolution: Resolution,
}

impl Reference {
    pub fn binding(&self) -> Option<BindingId> {
        match self.resolution {
            Resolution::Binding(id) => Some(id),
            _ => None,
        }
    }
}
