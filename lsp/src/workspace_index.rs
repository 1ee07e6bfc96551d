//! Cross-file symbol identity.
//!
//! Every binding in every project file gets a [`SymbolKey`]. Exported
//! top-level bindings are keyed by module path and name, so a declaration
//! and all imports of it, under any alias, land in one occurrence list.
//! Everything else is keyed by file, scope range and name.

use std::path::{Path, PathBuf};

use anyhow::Result;
use rustc_hash::{FxHashMap, FxHashSet};
use tower_lsp::lsp_types::{Range, Url};
use tracing::{debug, trace};
use welle_core::{
    analysis::{Analysis, Binding, BindingId, BindingKind, Resolution, ScopeId},
    analyze,
    ast::{Ident, Stmt},
    module::ModuleIndex,
    token::{Position, Span},
};

use crate::{
    position::{ident_range, range_key, RangeKey},
    uri::path_to_uri,
    workspace::Workspace,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SymbolKey {
    /// A binding visible only inside one scope of one file.
    Local { file: Url, scope: Span, name: String },
    /// An export of the module at `module`.
    Export { module: PathBuf, name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OccurrenceRole {
    Declaration,
    Reference,
    /// `name` in `from "m" import name`.
    ImportName,
    /// A local alias of an imported name, and its uses. Not renamed.
    AliasUse,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub uri: Url,
    pub range: Range,
    pub role: OccurrenceRole,
}

#[derive(Debug, Default)]
pub struct WorkspaceIndex {
    by_key: FxHashMap<SymbolKey, Vec<Occurrence>>,
}

impl WorkspaceIndex {
    pub fn occurrences(&self, key: &SymbolKey) -> &[Occurrence] {
        self.by_key.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn keys(&self) -> impl Iterator<Item = &SymbolKey> {
        self.by_key.keys()
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    fn merge(&mut self, other: FxHashMap<SymbolKey, Vec<Occurrence>>) {
        for (key, occs) in other {
            self.by_key.entry(key).or_default().extend(occs);
        }
    }
}

/// Walk the project and index every file, preferring open text over disk.
pub fn build_workspace_index(ws: &Workspace) -> Result<WorkspaceIndex> {
    let mut index = WorkspaceIndex::default();
    let files = ws.workspace_files()?;
    for path in &files {
        let text = match ws.read_text(path) {
            Ok(text) => text,
            Err(err) => {
                debug!("skipping {}: {err:#}", path.display());
                continue;
            }
        };
        let Some(uri) = path_to_uri(path) else {
            debug!(path = %path.display(), "skipping file without a uri");
            continue;
        };
        index.merge(document_occurrences(ws, &uri, path, &text));
    }
    debug!(files = files.len(), keys = index.len(), "built workspace index");
    Ok(index)
}

/// Positions of identifiers bound through `from ... import a as b`.
fn aliased_imports(stmts: &[Stmt], out: &mut FxHashSet<Position>, names: &mut Vec<(String, Ident)>) {
    for stmt in stmts {
        match stmt {
            Stmt::FromImport { path, items, .. } => {
                for item in items {
                    names.push((path.value.clone(), item.name.clone()));
                    if let Some(alias) = &item.alias {
                        out.insert(alias.pos);
                    }
                }
            }
            Stmt::Block(block) => aliased_imports(&block.stmts, out, names),
            Stmt::If { then, els, .. } => {
                aliased_imports(std::slice::from_ref(then.as_ref()), out, names);
                if let Some(els) = els {
                    aliased_imports(std::slice::from_ref(els.as_ref()), out, names);
                }
            }
            Stmt::While { body, .. } | Stmt::ForIn { body, .. } | Stmt::For { body, .. } => {
                aliased_imports(&body.stmts, out, names)
            }
            Stmt::Func { body, .. } => aliased_imports(&body.stmts, out, names),
            Stmt::Switch { cases, default, .. } => {
                for case in cases {
                    aliased_imports(&case.body.stmts, out, names);
                }
                if let Some(default) = default {
                    aliased_imports(&default.stmts, out, names);
                }
            }
            Stmt::Try {
                body, catch, finally, ..
            } => {
                aliased_imports(&body.stmts, out, names);
                if let Some(catch) = catch {
                    aliased_imports(&catch.body.stmts, out, names);
                }
                if let Some(finally) = finally {
                    aliased_imports(&finally.stmts, out, names);
                }
            }
            Stmt::Export { stmt, .. } => aliased_imports(std::slice::from_ref(stmt.as_ref()), out, names),
            _ => {}
        }
    }
}

pub(crate) fn local_key(uri: &Url, an: &Analysis, binding: &Binding) -> SymbolKey {
    SymbolKey::Local {
        file: uri.clone(),
        scope: an.scope(binding.scope).span,
        name: binding.name.clone(),
    }
}

/// Export key for a top-level exported function or variable, else a local key.
pub(crate) fn key_for_binding(
    uri: &Url,
    module: &Path,
    exports: &ModuleIndex,
    an: &Analysis,
    binding: &Binding,
) -> SymbolKey {
    let top_level = binding.scope == ScopeId::ROOT;
    let exportable = matches!(binding.kind, BindingKind::Func | BindingKind::Var);
    if top_level && exportable && exports.is_exported(&binding.name) {
        return SymbolKey::Export {
            module: module.to_path_buf(),
            name: binding.name.clone(),
        };
    }
    local_key(uri, an, binding)
}

#[derive(Default)]
struct Collector {
    out: FxHashMap<SymbolKey, Vec<Occurrence>>,
    seen: FxHashSet<(SymbolKey, RangeKey)>,
}

impl Collector {
    fn add(&mut self, key: SymbolKey, uri: &Url, range: Range, role: OccurrenceRole) {
        if !self.seen.insert((key.clone(), range_key(&range))) {
            return;
        }
        self.out.entry(key).or_default().push(Occurrence {
            uri: uri.clone(),
            range,
            role,
        });
    }
}

fn document_occurrences(ws: &Workspace, uri: &Url, path: &Path, text: &str) -> FxHashMap<SymbolKey, Vec<Occurrence>> {
    let an = analyze(text);
    let exports = ModuleIndex::build(&an.program);
    let mut aliased = FxHashSet::default();
    let mut import_names = Vec::new();
    aliased_imports(&an.program.stmts, &mut aliased, &mut import_names);

    let resolve = |spec: &str| ws.resolve_import(path, spec).ok();
    let mut collector = Collector::default();

    for (spec, ident) in &import_names {
        let Some(module) = resolve(spec) else { continue };
        let key = SymbolKey::Export {
            module,
            name: ident.name.clone(),
        };
        collector.add(key, uri, ident_range(text, ident), OccurrenceRole::ImportName);
    }

    let mut keys: FxHashMap<BindingId, SymbolKey> = FxHashMap::default();
    for (id, binding) in an.bindings() {
        if binding.kind == BindingKind::Import {
            let (Some(spec), Some(member)) = (&binding.module_path, &binding.member) else {
                continue;
            };
            let Some(module) = resolve(spec) else { continue };
            let key = SymbolKey::Export {
                module,
                name: member.clone(),
            };
            if aliased.contains(&binding.decl.pos) {
                collector.add(key.clone(), uri, ident_range(text, &binding.decl), OccurrenceRole::AliasUse);
            }
            keys.insert(id, key);
            continue;
        }
        let key = key_for_binding(uri, path, &exports, &an, binding);
        collector.add(key.clone(), uri, ident_range(text, &binding.decl), OccurrenceRole::Declaration);
        keys.insert(id, key);
    }

    for reference in an.references() {
        let range = ident_range(text, &reference.ident);
        match &reference.resolution {
            Resolution::ModuleMember {
                module_path, member, ..
            } => {
                let Some(module) = resolve(module_path) else { continue };
                let key = SymbolKey::Export {
                    module,
                    name: member.clone(),
                };
                collector.add(key, uri, range, OccurrenceRole::Reference);
            }
            Resolution::Binding(id) => {
                let Some(key) = keys.get(id) else { continue };
                let binding = an.binding(*id);
                let role = if binding.kind == BindingKind::Import && aliased.contains(&binding.decl.pos) {
                    OccurrenceRole::AliasUse
                } else {
                    OccurrenceRole::Reference
                };
                collector.add(key.clone(), uri, range, role);
            }
            Resolution::Builtin | Resolution::Unresolved => {}
        }
    }
    trace!(%uri, keys = collector.out.len(), "indexed document");
    collector.out
}
