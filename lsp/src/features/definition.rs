use std::path::Path;

use tower_lsp::lsp_types::{Location, Position, Url};
use welle_core::{
    analysis::{BindingKind, Resolution, Site},
    analyze,
};

use crate::{
    position::{ident_range, to_core},
    uri::{path_to_uri, uri_to_path},
    workspace::Workspace,
};

/// Where `member` is declared in the module `spec`: its export, or failing
/// that any top-level declaration of the name.
fn module_member(ws: &Workspace, uri: &Url, spec: &str, member: &str) -> Option<Location> {
    let from = uri_to_path(uri)?;
    let path = ws.resolve_import(&from, spec).ok()?;
    let index = ws.module_index(&path).ok()?;
    let ident = index.exports.get(member).or_else(|| index.defs.get(member))?;
    let text = ws.read_text(&path).ok()?;
    Some(Location::new(path_to_uri(Path::new(&path))?, ident_range(&text, ident)))
}

/// Declaration site of the symbol at `pos`. Imports and namespace members
/// jump into the resolved module.
pub fn definition_at(ws: &Workspace, uri: &Url, text: &str, pos: Position) -> Option<Location> {
    let pos = to_core(text, pos)?;
    let an = analyze(text);
    let site = an.find_occurrence(pos)?;

    if let Site::Reference(r) = site {
        if let Resolution::ModuleMember {
            module_path, member, ..
        } = &r.resolution
        {
            return module_member(ws, uri, module_path, member);
        }
    }

    let binding = an.binding(site.binding()?);
    if binding.kind == BindingKind::Import {
        let (Some(spec), Some(member)) = (&binding.module_path, &binding.member) else {
            return None;
        };
        return module_member(ws, uri, spec, member);
    }
    Some(Location::new(uri.clone(), ident_range(text, &binding.decl)))
}
