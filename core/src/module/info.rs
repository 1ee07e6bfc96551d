use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::{
    analysis::BindingKind,
    ast::{Expr, Ident, Stmt},
    parser::parse,
};

#[derive(Debug, Clone, PartialEq)]
pub struct ModuleExport {
    pub name: String,
    pub params: Vec<String>,
    /// `Func` or `Var`.
    pub kind: BindingKind,
    pub decl: Ident,
}

impl ModuleExport {
    /// `name(a, b)` for functions, the bare name otherwise.
    pub fn signature(&self) -> String {
        match self.kind {
            BindingKind::Func => format!("{}({})", self.name, self.params.join(", ")),
            _ => self.name.clone(),
        }
    }
}

/// Exports of a resolved module, ordered by name.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleInfo {
    pub path: PathBuf,
    pub exports: BTreeMap<String, ModuleExport>,
}

fn param_names(params: &[Ident]) -> Vec<String> {
    params.iter().map(|p| p.name.clone()).collect()
}

impl ModuleInfo {
    pub fn from_source(path: impl Into<PathBuf>, text: &str) -> Self {
        let program = parse(text).program;
        let mut exports = BTreeMap::new();
        for stmt in &program.stmts {
            let Stmt::Export { stmt, .. } = stmt else { continue };
            let export = match stmt.as_ref() {
                Stmt::Func { name, params, .. } => ModuleExport {
                    name: name.name.clone(),
                    params: param_names(params),
                    kind: BindingKind::Func,
                    decl: name.clone(),
                },
                Stmt::Assign { name, value, .. } => match value {
                    Expr::Func { params, .. } => ModuleExport {
                        name: name.name.clone(),
                        params: param_names(params),
                        kind: BindingKind::Func,
                        decl: name.clone(),
                    },
                    _ => ModuleExport {
                        name: name.name.clone(),
                        params: Vec::new(),
                        kind: BindingKind::Var,
                        decl: name.clone(),
                    },
                },
                _ => continue,
            };
            exports.entry(export.name.clone()).or_insert(export);
        }
        Self {
            path: path.into(),
            exports,
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).with_context(|| format!("failed to read module {}", path.display()))?;
        Ok(Self::from_source(path, &text))
    }

    pub fn export(&self, name: &str) -> Option<&ModuleExport> {
        self.exports.get(name)
    }
}
