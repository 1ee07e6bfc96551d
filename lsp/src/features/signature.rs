use tower_lsp::lsp_types::{
    Documentation, ParameterInformation, ParameterLabel, Position, SignatureHelp, SignatureInformation, Url,
};
use welle_core::{
    analysis::{Analysis, BindingKind},
    analyze, builtins,
    token::{Position as CorePos, Token, TokenKind, Tokenizer},
};

use super::binding_signature;
use crate::{position::to_core, uri::uri_to_path, workspace::Workspace};

#[derive(Debug, Clone, PartialEq)]
enum Callee {
    Name(Token),
    /// `object.member(...)`
    Member { object: Token, member: Token },
}

#[derive(Debug)]
struct CallSite {
    callee: Callee,
    open: CorePos,
    /// `None` while the call is still unclosed.
    close: Option<CorePos>,
}

impl CallSite {
    fn contains(&self, pos: CorePos) -> bool {
        self.open < pos && self.close.is_none_or(|close| pos <= close)
    }
}

fn callee_before(tokens: &[Token], open: usize) -> Option<Callee> {
    let name = tokens.get(open.checked_sub(1)?)?;
    if name.kind != TokenKind::Ident {
        return None;
    }
    let before = open.checked_sub(2).map(|i| &tokens[i]);
    match before.map(|t| t.kind) {
        // `func name(` declares rather than calls.
        Some(TokenKind::Func) => None,
        Some(TokenKind::Dot) => {
            let object = open.checked_sub(3).map(|i| &tokens[i])?;
            if object.kind != TokenKind::Ident {
                return Some(Callee::Name(name.clone()));
            }
            Some(Callee::Member {
                object: object.clone(),
                member: name.clone(),
            })
        }
        _ => Some(Callee::Name(name.clone())),
    }
}

/// Calls found by pairing parentheses. Unclosed calls run to the end.
fn call_sites(tokens: &[Token]) -> Vec<CallSite> {
    let mut done = Vec::new();
    let mut stack: Vec<(CorePos, Option<Callee>)> = Vec::new();
    for (i, tok) in tokens.iter().enumerate() {
        match tok.kind {
            TokenKind::LParen => stack.push((tok.pos, callee_before(tokens, i))),
            TokenKind::RParen => {
                if let Some((open, Some(callee))) = stack.pop() {
                    done.push(CallSite {
                        callee,
                        open,
                        close: Some(tok.pos),
                    });
                }
            }
            _ => {}
        }
    }
    for (open, callee) in stack {
        if let Some(callee) = callee {
            done.push(CallSite {
                callee,
                open,
                close: None,
            });
        }
    }
    done
}

/// Commas at nesting depth one between `open` and `pos`.
fn active_parameter(tokens: &[Token], open: CorePos, pos: CorePos) -> u32 {
    let mut depth = 0u32;
    let mut count = 0;
    for tok in tokens.iter().filter(|t| t.pos >= open && t.pos < pos) {
        match tok.kind {
            TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => depth += 1,
            TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => depth = depth.saturating_sub(1),
            TokenKind::Comma if depth == 1 => count += 1,
            _ => {}
        }
    }
    count
}

struct Signature {
    label: String,
    params: Vec<String>,
    doc: Option<String>,
}

fn module_signature(ws: &Workspace, uri: &Url, spec: &str, member: &str) -> Option<Signature> {
    let from = uri_to_path(uri)?;
    let info = ws.module_info(&from, spec).ok()?;
    let export = info.export(member)?;
    Some(Signature {
        label: export.signature(),
        params: export.params.clone(),
        doc: None,
    })
}

fn static_signature(info: &builtins::BuiltinInfo) -> Signature {
    Signature {
        label: info.signature.to_string(),
        params: info.params.iter().map(|p| p.to_string()).collect(),
        doc: Some(info.doc.to_string()),
    }
}

fn signature_for(ws: &Workspace, uri: &Url, an: &Analysis, callee: &Callee) -> Option<Signature> {
    match callee {
        Callee::Name(name) => match an.resolve_at(name.pos, &name.literal) {
            Some(id) => {
                let binding = an.binding(id);
                match binding.kind {
                    BindingKind::Func => Some(Signature {
                        label: binding_signature(binding)?,
                        params: binding.params.clone(),
                        doc: None,
                    }),
                    BindingKind::Import => module_signature(
                        ws,
                        uri,
                        binding.module_path.as_deref()?,
                        binding.member.as_deref()?,
                    ),
                    _ => None,
                }
            }
            None => builtins::builtin(&name.literal).map(static_signature),
        },
        Callee::Member { object, member } => {
            let namespace = an
                .resolve_at(object.pos, &object.literal)
                .map(|id| an.binding(id))
                .filter(|b| b.kind == BindingKind::Namespace);
            match namespace {
                Some(ns) => module_signature(ws, uri, ns.module_path.as_deref()?, &member.literal),
                None => builtins::method(&member.literal).map(static_signature),
            }
        }
    }
}

/// Signature of the innermost call enclosing `pos`, with the argument the
/// cursor is in as the active parameter.
pub fn signature_help_at(ws: &Workspace, uri: &Url, text: &str, pos: Position) -> Option<SignatureHelp> {
    let pos = to_core(text, pos)?;
    let tokens: Vec<Token> = Tokenizer::tokenize(text)
        .into_iter()
        .filter(|t| t.kind != TokenKind::Newline)
        .collect();
    let call = call_sites(&tokens)
        .into_iter()
        .filter(|c| c.contains(pos))
        .max_by_key(|c| c.open)?;

    let an = analyze(text);
    let signature = signature_for(ws, uri, &an, &call.callee)?;
    let active = active_parameter(&tokens, call.open, pos);
    let information = SignatureInformation {
        label: signature.label,
        documentation: signature.doc.map(Documentation::String),
        parameters: Some(
            signature
                .params
                .into_iter()
                .map(|p| ParameterInformation {
                    label: ParameterLabel::Simple(p),
                    documentation: None,
                })
                .collect(),
        ),
        active_parameter: None,
    };
    Some(SignatureHelp {
        signatures: vec![information],
        active_signature: Some(0),
        active_parameter: Some(active),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<Token> {
        Tokenizer::tokenize(text)
            .into_iter()
            .filter(|t| t.kind != TokenKind::Newline)
            .collect()
    }

    #[test]
    fn test_call_sites() {
        let toks = tokens("func f(a) {}\nf(g(1), (2))\nobj.m(");
        let calls = call_sites(&toks);
        let names: Vec<_> = calls
            .iter()
            .map(|c| match &c.callee {
                Callee::Name(t) => t.literal.clone(),
                Callee::Member { object, member } => format!("{}.{}", object.literal, member.literal),
            })
            .collect();
        assert_eq!(names, vec!["g", "f", "obj.m"]);
        assert!(calls[2].close.is_none());
    }

    #[test]
    fn test_active_parameter_depth() {
        let text = "f(1, [2, 3], #{a: 4, b: 5}, 6)";
        let toks = tokens(text);
        let open = CorePos::new(1, 2);
        assert_eq!(active_parameter(&toks, open, CorePos::new(1, 3)), 0);
        assert_eq!(active_parameter(&toks, open, CorePos::new(1, 9)), 1);
        assert_eq!(active_parameter(&toks, open, CorePos::new(1, 30)), 3);
    }
}
