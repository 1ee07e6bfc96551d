use std::collections::HashMap;

use anyhow::{Result, bail};
use rustc_hash::FxHashSet;
use tower_lsp::lsp_types::{Position, TextEdit, Url, WorkspaceEdit};
use tracing::debug;
use welle_core::{
    analysis::{Resolution, Site},
    analyze, builtins,
    token::is_keyword,
};

use super::target::{export_key, local_occurrences};
use crate::{
    position::{ident_range, range_key, to_core},
    workspace::Workspace,
    workspace_index::{OccurrenceRole, build_workspace_index},
};

/// Rename the symbol at `pos` to `new_name`.
///
/// Exported symbols are renamed across the workspace: the declaration,
/// every `from` import of it and every use through a namespace or a plain
/// `from` import. Aliased imports keep their alias. Other symbols are
/// renamed within `uri` only.
pub fn rename(
    ws: &Workspace,
    uri: &Url,
    text: &str,
    pos: Position,
    new_name: &str,
) -> Result<Option<WorkspaceEdit>> {
    if is_keyword(new_name) {
        bail!("cannot rename to keyword");
    }
    if builtins::is_builtin(new_name) {
        bail!("cannot rename to builtin");
    }

    let Some(pos) = to_core(text, pos) else {
        return Ok(None);
    };
    let an = analyze(text);
    let Some(site) = an.find_occurrence(pos) else {
        return Ok(None);
    };
    if let Site::Reference(r) = site {
        if r.resolution == Resolution::Builtin {
            bail!("cannot rename builtin");
        }
    }

    let mut changes: HashMap<Url, Vec<TextEdit>> = HashMap::new();
    if let Some(key) = export_key(ws, uri, &an, site, true)? {
        let index = build_workspace_index(ws)?;
        let mut seen = FxHashSet::default();
        for occ in index.occurrences(&key) {
            if occ.role == OccurrenceRole::AliasUse || !seen.insert((occ.uri.clone(), range_key(&occ.range))) {
                continue;
            }
            changes
                .entry(occ.uri.clone())
                .or_default()
                .push(TextEdit::new(occ.range, new_name.to_string()));
        }
        debug!(?key, files = changes.len(), "workspace rename");
    } else {
        let edits: Vec<TextEdit> = local_occurrences(&an, site, true)
            .into_iter()
            .map(|ident| TextEdit::new(ident_range(text, ident), new_name.to_string()))
            .collect();
        if !edits.is_empty() {
            changes.insert(uri.clone(), edits);
        }
    }

    if changes.is_empty() {
        return Ok(None);
    }
    Ok(Some(WorkspaceEdit {
        changes: Some(changes),
        ..WorkspaceEdit::default()
    }))
}
