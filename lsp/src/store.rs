//! Open documents and their cached module indexes.

use std::{
    path::PathBuf,
    sync::{Arc, RwLock},
};

use ropey::Rope;
use rustc_hash::FxHashMap;
use tower_lsp::lsp_types::{Position, TextDocumentContentChangeEvent, Url};
use tracing::trace;
use welle_core::module::ModuleIndex;

use crate::uri::uri_to_path;

#[derive(Debug, Clone)]
pub struct Document {
    pub text: Rope,
    pub version: i32,
}

#[derive(Debug, Default)]
struct Inner {
    docs: FxHashMap<Url, Document>,
    paths: FxHashMap<PathBuf, Url>,
    indexes: FxHashMap<PathBuf, Arc<ModuleIndex>>,
}

/// Shared store guarded by one lock: queries read, open/change/close write.
#[derive(Debug, Default)]
pub struct DocumentStore {
    inner: RwLock<Inner>,
}

// Rope char index for a UTF-16 protocol position, clamped to the line end.
fn char_index(text: &Rope, pos: Position) -> usize {
    let line_idx = pos.line as usize;
    if line_idx >= text.len_lines() {
        return text.len_chars();
    }
    let line_start = text.line_to_char(line_idx);
    let mut seen = 0usize;
    let mut chars = 0usize;
    for ch in text.line(line_idx).chars() {
        if ch == '\n' {
            break;
        }
        let width = ch.len_utf16();
        if seen + width > pos.character as usize {
            break;
        }
        seen += width;
        chars += 1;
    }
    line_start + chars
}

fn apply_change(text: &mut Rope, change: &TextDocumentContentChangeEvent) {
    let Some(range) = change.range else {
        *text = Rope::from_str(&change.text);
        return;
    };
    let start = char_index(text, range.start);
    let end = char_index(text, range.end);
    let (s, e) = if start <= end { (start, end) } else { (end, start) };
    if s != e {
        text.remove(s..e);
    }
    if !change.text.is_empty() {
        text.insert(s, &change.text);
    }
}

impl Inner {
    fn reindex(&mut self, uri: &Url) {
        let Some(path) = uri_to_path(uri) else { return };
        let Some(doc) = self.docs.get(uri) else { return };
        let index = ModuleIndex::from_source(&doc.text.to_string());
        self.indexes.insert(path.clone(), Arc::new(index));
        self.paths.insert(path, uri.clone());
    }
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&self, uri: Url, text: &str, version: i32) {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        trace!(%uri, version, "open document");
        inner.docs.insert(
            uri.clone(),
            Document {
                text: Rope::from_str(text),
                version,
            },
        );
        inner.reindex(&uri);
    }

    /// Apply edits in order. Changes without a range replace the document.
    /// Unknown documents are ignored.
    pub fn change(&self, uri: &Url, changes: &[TextDocumentContentChangeEvent], version: i32) {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        let Some(doc) = inner.docs.get_mut(uri) else { return };
        for change in changes {
            apply_change(&mut doc.text, change);
        }
        doc.version = version;
        inner.reindex(uri);
    }

    pub fn close(&self, uri: &Url) {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        inner.docs.remove(uri);
        if let Some(path) = uri_to_path(uri) {
            inner.indexes.remove(&path);
            inner.paths.remove(&path);
        }
    }

    pub fn text(&self, uri: &Url) -> Option<String> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.docs.get(uri).map(|d| d.text.to_string())
    }

    pub fn version(&self, uri: &Url) -> Option<i32> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.docs.get(uri).map(|d| d.version)
    }

    pub fn text_for_path(&self, path: &std::path::Path) -> Option<String> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        let uri = inner.paths.get(path)?;
        inner.docs.get(uri).map(|d| d.text.to_string())
    }

    pub fn index_for_path(&self, path: &std::path::Path) -> Option<Arc<ModuleIndex>> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.indexes.get(path).cloned()
    }

    /// Paths of open documents backed by files, in no particular order.
    pub fn open_paths(&self) -> Vec<PathBuf> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.paths.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use tower_lsp::lsp_types::Range;

    use super::*;

    fn uri() -> Url {
        Url::parse("file:///proj/main.wll").unwrap()
    }

    fn edit(start: (u32, u32), end: (u32, u32), text: &str) -> TextDocumentContentChangeEvent {
        TextDocumentContentChangeEvent {
            range: Some(Range::new(Position::new(start.0, start.1), Position::new(end.0, end.1))),
            range_length: None,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_open_change_close() {
        let store = DocumentStore::new();
        store.open(uri(), "x = 1\n", 1);
        assert_eq!(store.version(&uri()), Some(1));
        assert!(store.index_for_path(std::path::Path::new("/proj/main.wll")).is_some());

        store.change(&uri(), &[edit((0, 0), (0, 1), "total")], 2);
        assert_eq!(store.text(&uri()).unwrap(), "total = 1\n");
        let index = store.index_for_path(std::path::Path::new("/proj/main.wll")).unwrap();
        assert!(index.defs.contains_key("total"));

        let full = TextDocumentContentChangeEvent {
            range: None,
            range_length: None,
            text: "y = 2\n".into(),
        };
        store.change(&uri(), &[full], 3);
        assert_eq!(store.text_for_path(std::path::Path::new("/proj/main.wll")).unwrap(), "y = 2\n");

        store.close(&uri());
        assert!(store.text(&uri()).is_none());
        assert!(store.open_paths().is_empty());
    }

    #[test]
    fn test_utf16_edit() {
        let store = DocumentStore::new();
        store.open(uri(), "s = \"𝄞a\"\n", 1);
        // Replace the 'a' after the surrogate pair.
        store.change(&uri(), &[edit((0, 7), (0, 8), "b")], 2);
        assert_eq!(store.text(&uri()).unwrap(), "s = \"𝄞b\"\n");
    }
}
