use rustc_hash::FxHashMap;

use crate::{
    ast::{Expr, Ident, Program, Stmt},
    diag::{DUPLICATE_EXPORT, Diagnostic},
    parser::parse,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Function,
    Variable,
    Namespace,
}

/// A flat, top-level document symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleSymbol {
    pub name: String,
    pub kind: SymbolKind,
    pub ident: Ident,
    pub exported: bool,
}

/// Top-level facts about one file.
#[derive(Debug, Clone, Default)]
pub struct ModuleIndex {
    /// Every top-level function or variable, exported or not.
    pub defs: FxHashMap<String, Ident>,
    /// The `export`-marked subset of `defs`.
    pub exports: FxHashMap<String, Ident>,
    /// `import "path" as alias`, keyed by alias.
    pub imports: FxHashMap<String, String>,
    pub symbols: Vec<ModuleSymbol>,
    pub diagnostics: Vec<Diagnostic>,
}

fn value_kind(value: &Expr) -> SymbolKind {
    match value {
        Expr::Func { .. } => SymbolKind::Function,
        _ => SymbolKind::Variable,
    }
}

impl ModuleIndex {
    pub fn from_source(text: &str) -> Self {
        Self::build(&parse(text).program)
    }

    pub fn build(program: &Program) -> Self {
        let mut index = Self::default();
        for stmt in &program.stmts {
            index.visit(stmt, false);
        }
        index
    }

    fn visit(&mut self, stmt: &Stmt, exported: bool) {
        match stmt {
            Stmt::Func { name, .. } => self.declare(name, SymbolKind::Function, exported),
            Stmt::Assign { name, value, .. } => self.declare(name, value_kind(value), exported),
            Stmt::Destructure { targets, .. } => {
                for ident in targets.iter().filter_map(|t| t.ident()) {
                    self.declare(ident, SymbolKind::Variable, exported);
                }
            }
            Stmt::Export { stmt, .. } => self.visit(stmt, true),
            Stmt::Import {
                path, alias: Some(alias), ..
            } => {
                self.imports
                    .entry(alias.name.clone())
                    .or_insert_with(|| path.value.clone());
                self.push_symbol(alias, SymbolKind::Namespace, false);
            }
            _ => {}
        }
    }

    fn declare(&mut self, ident: &Ident, kind: SymbolKind, exported: bool) {
        if exported {
            if let Some(prev) = self.exports.get(&ident.name) {
                let message = format!(
                    "duplicate export {:?} (previous at {}:{})",
                    ident.name, prev.pos.line, prev.pos.column
                );
                self.diagnostics
                    .push(Diagnostic::error(DUPLICATE_EXPORT, message, ident.pos, ident.width()));
                return;
            }
            self.exports.insert(ident.name.clone(), ident.clone());
        }
        self.defs.entry(ident.name.clone()).or_insert_with(|| ident.clone());
        self.push_symbol(ident, kind, exported);
    }

    fn push_symbol(&mut self, ident: &Ident, kind: SymbolKind, exported: bool) {
        if self.symbols.iter().any(|s| s.name == ident.name) {
            return;
        }
        self.symbols.push(ModuleSymbol {
            name: ident.name.clone(),
            kind,
            ident: ident.clone(),
            exported,
        });
    }

    pub fn is_exported(&self, name: &str) -> bool {
        self.exports.contains_key(name)
    }
}
