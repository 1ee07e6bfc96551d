use tower_lsp::lsp_types::{Hover, HoverContents, MarkupContent, MarkupKind, Position, Url};
use welle_core::{
    analysis::{BindingKind, Resolution, Site},
    analyze, builtins,
};

use super::{binding_signature, member_at};
use crate::{
    position::{ident_range, to_core},
    uri::uri_to_path,
    workspace::Workspace,
};

fn label(kind: BindingKind) -> &'static str {
    match kind {
        BindingKind::Namespace | BindingKind::Import => "import",
        other => other.label(),
    }
}

struct HoverText {
    kind: &'static str,
    name: String,
    signature: Option<String>,
    doc: Option<String>,
}

impl HoverText {
    fn render(&self) -> String {
        let mut lines = vec![format!("{}: {}", self.kind, self.name)];
        if let Some(signature) = &self.signature {
            lines.push(signature.clone());
        }
        if let Some(doc) = &self.doc {
            lines.push(String::new());
            lines.push(doc.clone());
        }
        lines.join("\n")
    }
}

/// Markdown hover: `"<kind>: <name>"`, the signature, then the doc.
pub fn hover_at(ws: &Workspace, uri: &Url, text: &str, pos: Position) -> Option<Hover> {
    let core = to_core(text, pos)?;
    let an = analyze(text);

    let (hover, ident) = match an.find_occurrence(core) {
        Some(Site::Reference(r)) => {
            let hover = match &r.resolution {
                Resolution::ModuleMember {
                    alias,
                    module_path,
                    member,
                } => {
                    let signature = uri_to_path(uri)
                        .and_then(|from| ws.module_info(&from, module_path).ok())
                        .and_then(|info| info.export(member).map(|e| e.signature()))
                        .unwrap_or_else(|| format!("{alias}.{member}"));
                    HoverText {
                        kind: "module member",
                        name: member.clone(),
                        signature: Some(signature),
                        doc: None,
                    }
                }
                Resolution::Builtin => {
                    let info = builtins::builtin(&r.ident.name);
                    HoverText {
                        kind: "builtin",
                        name: r.ident.name.clone(),
                        signature: info.map(|i| i.signature.to_string()),
                        doc: info.map(|i| i.doc.to_string()),
                    }
                }
                Resolution::Binding(id) => {
                    let binding = an.binding(*id);
                    HoverText {
                        kind: label(binding.kind),
                        name: binding.name.clone(),
                        signature: binding_signature(binding),
                        doc: None,
                    }
                }
                Resolution::Unresolved => return None,
            };
            (hover, r.ident.clone())
        }
        Some(Site::Declaration(id)) => {
            let binding = an.binding(id);
            let hover = HoverText {
                kind: label(binding.kind),
                name: binding.name.clone(),
                signature: binding_signature(binding),
                doc: None,
            };
            (hover, binding.decl.clone())
        }
        None => {
            // `value.method` on anything that is not a namespace.
            let (object, member) = member_at(text, core)?;
            object?;
            let info = builtins::method(&member.literal)?;
            let hover = HoverText {
                kind: "method",
                name: info.name.to_string(),
                signature: Some(info.signature.to_string()),
                doc: Some(info.doc.to_string()),
            };
            (hover, welle_core::ast::Ident::new(member.literal, member.pos))
        }
    };

    Some(Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: MarkupKind::Markdown,
            value: hover.render(),
        }),
        range: Some(ident_range(text, &ident)),
    })
}
