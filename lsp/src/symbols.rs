use tower_lsp::lsp_types::{DocumentSymbol, SymbolKind as LspSymbolKind};
use welle_core::module::{ModuleIndex, SymbolKind};

use crate::position::ident_range;

fn kind(kind: SymbolKind) -> LspSymbolKind {
    match kind {
        SymbolKind::Function => LspSymbolKind::FUNCTION,
        SymbolKind::Variable => LspSymbolKind::VARIABLE,
        SymbolKind::Namespace => LspSymbolKind::NAMESPACE,
    }
}

/// Flat outline of the top-level declarations in `text`.
pub fn document_symbols(text: &str) -> Vec<DocumentSymbol> {
    let index = ModuleIndex::from_source(text);
    index
        .symbols
        .iter()
        .map(|s| {
            let range = ident_range(text, &s.ident);
            DocumentSymbol {
                name: s.name.clone(),
                detail: s.exported.then(|| "export".to_string()),
                kind: kind(s.kind),
                tags: None,
                #[allow(deprecated)]
                deprecated: None,
                range,
                selection_range: range,
                children: None,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols() {
        let text = "import \"std:math\" as m\nexport func area(r) { return m.pi * r * r }\nunit = \"cm\"\n";
        let symbols = document_symbols(text);
        let summary: Vec<_> = symbols
            .iter()
            .map(|s| (s.name.as_str(), s.kind, s.detail.as_deref()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("m", LspSymbolKind::NAMESPACE, None),
                ("area", LspSymbolKind::FUNCTION, Some("export")),
                ("unit", LspSymbolKind::VARIABLE, None),
            ]
        );
        assert_eq!(symbols[1].range.start.line, 1);
        assert_eq!(symbols[1].range.start.character, 12);
    }
}
