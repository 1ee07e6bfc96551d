use anyhow::Result;
use rustc_hash::FxHashSet;
use tower_lsp::lsp_types::{Location, Position, Url};
use welle_core::analyze;

use super::target::{export_key, local_occurrences};
use crate::{
    position::{ident_range, range_key, to_core},
    workspace::Workspace,
    workspace_index::{OccurrenceRole, build_workspace_index},
};

/// Every location naming the symbol at `pos`. Exports are searched across
/// the workspace; an export whose module does not resolve is searched in
/// this file only.
pub fn references(
    ws: &Workspace,
    uri: &Url,
    text: &str,
    pos: Position,
    include_declaration: bool,
) -> Result<Vec<Location>> {
    let Some(pos) = to_core(text, pos) else {
        return Ok(Vec::new());
    };
    let an = analyze(text);
    let Some(site) = an.find_occurrence(pos) else {
        return Ok(Vec::new());
    };

    if let Some(key) = export_key(ws, uri, &an, site, false)? {
        let index = build_workspace_index(ws)?;
        let mut seen = FxHashSet::default();
        let locations = index
            .occurrences(&key)
            .iter()
            .filter(|occ| include_declaration || occ.role != OccurrenceRole::Declaration)
            .filter(|occ| seen.insert((occ.uri.clone(), range_key(&occ.range))))
            .map(|occ| Location::new(occ.uri.clone(), occ.range))
            .collect();
        return Ok(locations);
    }

    Ok(local_occurrences(&an, site, include_declaration)
        .into_iter()
        .map(|ident| Location::new(uri.clone(), ident_range(text, ident)))
        .collect())
}
