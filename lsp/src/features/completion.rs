use rustc_hash::FxHashSet;
use tower_lsp::lsp_types::{CompletionItem, CompletionItemKind, Position, Url};
use welle_core::{
    analysis::{Analysis, BindingKind},
    analyze,
    builtins::BUILTINS,
    token::{KEYWORDS, Position as CorePos, Token, TokenKind},
};

use super::{binding_signature, tokens_before};
use crate::{position::to_core, uri::uri_to_path, workspace::Workspace};

struct Candidate {
    name: String,
    kind: BindingKind,
    detail: Option<String>,
}

enum Context {
    /// `alias.prefix`
    Member { alias: String, prefix: String },
    /// Inside a string literal; the prefix is what precedes the cursor.
    InString { prefix: String },
    Scope,
}

fn weight(kind: BindingKind) -> u8 {
    match kind {
        BindingKind::Var | BindingKind::Func => 0,
        BindingKind::Param => 1,
        BindingKind::Namespace | BindingKind::Import => 2,
        BindingKind::Builtin => 3,
        BindingKind::Keyword => 4,
    }
}

fn item_kind(kind: BindingKind) -> CompletionItemKind {
    match kind {
        BindingKind::Func | BindingKind::Builtin => CompletionItemKind::FUNCTION,
        BindingKind::Namespace => CompletionItemKind::MODULE,
        BindingKind::Keyword => CompletionItemKind::KEYWORD,
        BindingKind::Var | BindingKind::Param | BindingKind::Import => CompletionItemKind::VARIABLE,
    }
}

fn build_items(mut candidates: Vec<Candidate>) -> Vec<CompletionItem> {
    candidates.sort_by(|a, b| weight(a.kind).cmp(&weight(b.kind)).then_with(|| a.name.cmp(&b.name)));
    candidates
        .into_iter()
        .map(|c| CompletionItem {
            label: c.name,
            kind: Some(item_kind(c.kind)),
            detail: c.detail,
            ..CompletionItem::default()
        })
        .collect()
}

fn string_prefix(text: &str, tok: &Token, pos: CorePos) -> Option<String> {
    if tok.pos.line != pos.line {
        return None;
    }
    let line = text.split('\n').nth(pos.line as usize - 1)?;
    let start = tok.pos.column as usize; // just past the opening quote
    let end = pos.column as usize - 1;
    let typed = line.get(start..end)?;
    Some(typed.strip_prefix("std:").unwrap_or(typed).to_string())
}

fn context_at(text: &str, pos: CorePos) -> Context {
    let before = tokens_before(text, pos);
    if let Some(last) = before.last() {
        let single_line = last.raw.as_deref().is_some_and(|raw| !raw.contains('\n'));
        let inside = match last.kind {
            TokenKind::Str if single_line => {
                let width = last.raw.as_deref().map_or(0, str::len) as u32;
                pos.line == last.pos.line && pos.column < last.pos.column + width
            }
            TokenKind::Illegal => last.literal == "unterminated string",
            _ => false,
        };
        if inside {
            if let Some(prefix) = string_prefix(text, last, pos) {
                return Context::InString { prefix };
            }
        }
    }

    let n = before.len();
    let ident = |t: &Token| t.kind == TokenKind::Ident;
    if n >= 2 && before[n - 1].kind == TokenKind::Dot && ident(&before[n - 2]) {
        return Context::Member {
            alias: before[n - 2].literal.clone(),
            prefix: String::new(),
        };
    }
    if n >= 3 && ident(&before[n - 1]) && before[n - 2].kind == TokenKind::Dot && ident(&before[n - 3]) {
        let last = &before[n - 1];
        let touching = last.pos.line == pos.line && last.pos.column + last.literal.len() as u32 == pos.column;
        if touching {
            return Context::Member {
                alias: before[n - 3].literal.clone(),
                prefix: last.literal.clone(),
            };
        }
    }
    Context::Scope
}

fn member_items(ws: &Workspace, uri: &Url, an: &Analysis, pos: CorePos, alias: &str, prefix: &str) -> Vec<CompletionItem> {
    let Some(id) = an.resolve_at(pos, alias) else {
        return Vec::new();
    };
    let binding = an.binding(id);
    if binding.kind != BindingKind::Namespace {
        return Vec::new();
    }
    let (Some(spec), Some(from)) = (&binding.module_path, uri_to_path(uri)) else {
        return Vec::new();
    };
    let Ok(info) = ws.module_info(&from, spec) else {
        return Vec::new();
    };
    let candidates = info
        .exports
        .values()
        .filter(|e| e.name.starts_with(prefix))
        .map(|e| Candidate {
            name: e.name.clone(),
            kind: if e.kind == BindingKind::Func {
                BindingKind::Func
            } else {
                BindingKind::Var
            },
            detail: Some(e.signature()),
        })
        .collect();
    build_items(candidates)
}

fn std_module_candidates(ws: &Workspace, prefix: &str) -> Vec<Candidate> {
    ws.std_modules()
        .into_iter()
        .filter(|m| m.starts_with(prefix))
        .map(|name| Candidate {
            name,
            kind: BindingKind::Namespace,
            detail: Some("std module".to_string()),
        })
        .collect()
}

/// Completion candidates at `pos`, ordered by kind and then name.
///
/// After `alias.` the candidates are the exports of the aliased module.
/// Inside a string they are std modules. Elsewhere they are the visible
/// bindings, builtins, keywords and std modules.
pub fn completion_items(ws: &Workspace, uri: &Url, text: &str, pos: Position) -> Vec<CompletionItem> {
    let Some(pos) = to_core(text, pos) else {
        return Vec::new();
    };
    let an = analyze(text);
    match context_at(text, pos) {
        Context::Member { alias, prefix } => return member_items(ws, uri, &an, pos, &alias, &prefix),
        Context::InString { prefix } => return build_items(std_module_candidates(ws, &prefix)),
        Context::Scope => {}
    }

    let settings = &ws.settings().completion;
    let mut seen: FxHashSet<String> = FxHashSet::default();
    let mut candidates = Vec::new();
    for id in an.visible(an.scope_at(pos)) {
        let binding = an.binding(id);
        if seen.insert(binding.name.clone()) {
            candidates.push(Candidate {
                name: binding.name.clone(),
                kind: binding.kind,
                detail: binding_signature(binding).or_else(|| binding.module_path.clone()),
            });
        }
    }
    for info in BUILTINS {
        if seen.insert(info.name.to_string()) {
            candidates.push(Candidate {
                name: info.name.to_string(),
                kind: BindingKind::Builtin,
                detail: Some(info.signature.to_string()),
            });
        }
    }
    if settings.keywords {
        for kw in KEYWORDS {
            if seen.insert(kw.to_string()) {
                candidates.push(Candidate {
                    name: kw.to_string(),
                    kind: BindingKind::Keyword,
                    detail: None,
                });
            }
        }
    }
    if settings.std_modules {
        for candidate in std_module_candidates(ws, "") {
            if seen.insert(candidate.name.clone()) {
                candidates.push(candidate);
            }
        }
    }
    build_items(candidates)
}
