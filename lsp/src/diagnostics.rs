use tower_lsp::lsp_types::{Diagnostic, DiagnosticSeverity, NumberOrString};
use welle_core::{
    analyze,
    diag::{self, Severity},
    module::ModuleIndex,
};

use crate::position::char_range;

fn severity(severity: Severity) -> DiagnosticSeverity {
    match severity {
        Severity::Error => DiagnosticSeverity::ERROR,
        Severity::Warning => DiagnosticSeverity::WARNING,
        Severity::Info => DiagnosticSeverity::INFORMATION,
    }
}

pub fn to_lsp_diagnostic(text: &str, d: &diag::Diagnostic) -> Diagnostic {
    Diagnostic {
        range: char_range(text, d.range.pos, d.range.length),
        severity: Some(severity(d.severity)),
        code: Some(NumberOrString::String(d.code.to_string())),
        source: Some("welle".to_string()),
        message: d.message.clone(),
        ..Diagnostic::default()
    }
}

/// Parse, analysis and module diagnostics for `text`.
pub fn diagnostics(text: &str) -> Vec<Diagnostic> {
    let an = analyze(text);
    let index = ModuleIndex::build(&an.program);
    an.diagnostics()
        .iter()
        .chain(index.diagnostics.iter())
        .map(|d| to_lsp_diagnostic(text, d))
        .collect()
}
