//! Project root, module resolution and the open-document overlay.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result, bail};
use tower_lsp::lsp_types::{TextDocumentContentChangeEvent, Url};
use tracing::debug;
use walkdir::WalkDir;
use welle_core::{
    config::Manifest,
    module::{ModuleIndex, ModuleInfo, Resolver, SOURCE_EXT, normalize_path},
};

use crate::{config::ServerSettings, store::DocumentStore, uri::uri_to_path};

pub struct Workspace {
    root: PathBuf,
    manifest: Option<Manifest>,
    resolver: Resolver,
    settings: ServerSettings,
    documents: DocumentStore,
}

fn is_source(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == SOURCE_EXT)
}

impl Workspace {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self::with_settings(root, ServerSettings::default())
    }

    /// Lookup roots come from `welle.toml` when one is found at or above
    /// `root`. Explicit settings override them.
    pub fn with_settings(root: impl AsRef<Path>, settings: ServerSettings) -> Self {
        let root = normalize_path(root.as_ref());
        let found = Manifest::find(&root);
        let paths = match &found {
            Some((dir, manifest)) => manifest.resolve_paths(dir),
            None => Manifest::default().resolve_paths(&root),
        };
        let std_root = match &settings.std_root {
            Some(p) if p.is_absolute() => p.clone(),
            Some(p) => root.join(p),
            None => paths.std_root,
        };
        let module_paths = if settings.module_paths.is_empty() {
            paths.module_paths
        } else {
            settings.module_paths.iter().map(|p| root.join(p)).collect()
        };
        debug!(root = %root.display(), std_root = %std_root.display(), "workspace ready");
        Self {
            root,
            manifest: found.map(|(_, m)| m),
            resolver: Resolver::new(std_root, module_paths),
            settings,
            documents: DocumentStore::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn std_root(&self) -> &Path {
        &self.resolver.std_root
    }

    pub fn manifest(&self) -> Option<&Manifest> {
        self.manifest.as_ref()
    }

    pub fn settings(&self) -> &ServerSettings {
        &self.settings
    }

    pub fn documents(&self) -> &DocumentStore {
        &self.documents
    }

    pub fn open(&self, uri: Url, text: &str, version: i32) {
        self.documents.open(uri, text, version);
    }

    pub fn change(&self, uri: &Url, changes: &[TextDocumentContentChangeEvent], version: i32) {
        self.documents.change(uri, changes, version);
    }

    pub fn close(&self, uri: &Url) {
        self.documents.close(uri);
    }

    pub fn resolve_import(&self, from: &Path, spec: &str) -> Result<PathBuf> {
        self.resolver.resolve(from, spec)
    }

    /// Open text for `path`, else its content on disk.
    pub fn read_text(&self, path: &Path) -> Result<String> {
        if let Some(text) = self.documents.text_for_path(path) {
            return Ok(text);
        }
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
    }

    /// Text of the document at `uri`: the open copy, else the file.
    pub fn document_text(&self, uri: &Url) -> Option<String> {
        if let Some(text) = self.documents.text(uri) {
            return Some(text);
        }
        let path = uri_to_path(uri)?;
        self.read_text(&path).ok()
    }

    /// Module index for `path`, cached for open documents.
    pub fn module_index(&self, path: &Path) -> Result<Arc<ModuleIndex>> {
        if let Some(index) = self.documents.index_for_path(path) {
            return Ok(index);
        }
        let text = self.read_text(path)?;
        Ok(Arc::new(ModuleIndex::from_source(&text)))
    }

    /// Exports of the module `spec` imported from `from`.
    pub fn module_info(&self, from: &Path, spec: &str) -> Result<ModuleInfo> {
        let path = self.resolve_import(from, spec)?;
        let text = self.read_text(&path)?;
        Ok(ModuleInfo::from_source(path, &text))
    }

    /// Names of the `.wll` files directly under the std root, sorted.
    pub fn std_modules(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(self.std_root()) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file() && is_source(p))
            .filter_map(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .collect();
        names.sort();
        names
    }

    /// Every source file under the root, skipping the std subtree and
    /// dot-directories, followed by open documents outside the walk.
    pub fn workspace_files(&self) -> Result<Vec<PathBuf>> {
        if !self.root.is_dir() {
            bail!("workspace root is not a directory: {}", self.root.display());
        }
        let std_root = self.std_root().to_path_buf();
        let walker = WalkDir::new(&self.root).sort_by_file_name().into_iter().filter_entry(|e| {
            if e.depth() == 0 || !e.file_type().is_dir() {
                return true;
            }
            let hidden = e.file_name().to_string_lossy().starts_with('.');
            !hidden && !e.path().starts_with(&std_root)
        });

        let mut files = Vec::new();
        for entry in walker {
            match entry {
                Ok(entry) if entry.file_type().is_file() && is_source(entry.path()) => {
                    files.push(normalize_path(entry.path()));
                }
                Ok(_) => {}
                Err(err) => debug!("skipping unreadable entry: {err}"),
            }
        }
        let mut open = self.documents.open_paths();
        open.sort();
        for path in open {
            if !files.contains(&path) {
                files.push(path);
            }
        }
        Ok(files)
    }
}
