use std::path::PathBuf;

use anyhow::{Result, bail};
use rustc_hash::FxHashSet;
use tower_lsp::lsp_types::Url;
use welle_core::{
    analysis::{Analysis, BindingKind, Resolution, ScopeId, Site},
    ast::Ident,
    module::{ModuleIndex, normalize_path},
};

use crate::{uri::uri_to_path, workspace::Workspace, workspace_index::SymbolKey};

/// Export key for the symbol at `site`, when it names a module export: a
/// namespace member, a `from` import, or an exported top-level binding.
///
/// With `strict`, failing to resolve a module is an error instead of
/// `None`.
pub(crate) fn export_key(
    ws: &Workspace,
    uri: &Url,
    an: &Analysis,
    site: Site<'_>,
    strict: bool,
) -> Result<Option<SymbolKey>> {
    let from = uri_to_path(uri).map(|p| normalize_path(&p));
    let resolve = |spec: &str| -> Result<Option<PathBuf>> {
        let Some(from) = &from else {
            if strict {
                bail!("cannot resolve module import without a file path");
            }
            return Ok(None);
        };
        match ws.resolve_import(from, spec) {
            Ok(path) => Ok(Some(path)),
            Err(err) if strict => Err(err.context("cannot resolve module import")),
            Err(_) => Ok(None),
        }
    };

    if let Site::Reference(r) = site {
        if let Resolution::ModuleMember {
            module_path, member, ..
        } = &r.resolution
        {
            let module = resolve(module_path)?;
            return Ok(module.map(|module| SymbolKey::Export {
                module,
                name: member.clone(),
            }));
        }
    }

    let Some(id) = site.binding() else {
        return Ok(None);
    };
    let binding = an.binding(id);
    match binding.kind {
        BindingKind::Import => {
            let (Some(spec), Some(member)) = (&binding.module_path, &binding.member) else {
                if strict {
                    bail!("cannot resolve import member for rename");
                }
                return Ok(None);
            };
            let module = resolve(spec)?;
            Ok(module.map(|module| SymbolKey::Export {
                module,
                name: member.clone(),
            }))
        }
        BindingKind::Func | BindingKind::Var if binding.scope == ScopeId::ROOT => {
            if !ModuleIndex::build(&an.program).is_exported(&binding.name) {
                return Ok(None);
            }
            match from {
                Some(module) => Ok(Some(SymbolKey::Export {
                    module,
                    name: binding.name.clone(),
                })),
                None if strict => bail!("cannot resolve module path for rename"),
                None => Ok(None),
            }
        }
        _ => Ok(None),
    }
}

/// Identifiers in this file naming the same symbol as `site`.
pub(crate) fn local_occurrences<'a>(an: &'a Analysis, site: Site<'a>, include_decl: bool) -> Vec<&'a Ident> {
    let mut out: Vec<&Ident> = Vec::new();
    let mut seen = FxHashSet::default();

    if let Site::Reference(target) = site {
        if let Resolution::ModuleMember { alias, member, .. } = &target.resolution {
            for r in an.references() {
                if let Resolution::ModuleMember { alias: a, member: m, .. } = &r.resolution {
                    if a == alias && m == member && seen.insert(r.ident.pos) {
                        out.push(&r.ident);
                    }
                }
            }
            return out;
        }
    }

    let Some(id) = site.binding() else {
        return out;
    };
    // The declaring identifier is also recorded as a reference.
    let decl = &an.binding(id).decl;
    seen.insert(decl.pos);
    if include_decl {
        out.push(decl);
    }
    for r in an.references_to(id) {
        if seen.insert(r.ident.pos) {
            out.push(&r.ident);
        }
    }
    out
}
