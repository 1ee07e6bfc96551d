#![allow(dead_code)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;
use tower_lsp::lsp_types::{Position, Url};
use welle_core::module::normalize_path;
use welle_lsp::{uri::path_to_uri, Workspace};

/// A throwaway project directory.
pub struct Project {
    _dir: TempDir,
    pub root: PathBuf,
}

impl Project {
    pub fn new(files: &[(&str, &str)]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = normalize_path(dir.path());
        for (rel, text) in files {
            let path = root.join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, text).unwrap();
        }
        Self { _dir: dir, root }
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    pub fn uri(&self, rel: &str) -> Url {
        path_to_uri(&self.path(rel)).unwrap()
    }

    pub fn text(&self, rel: &str) -> String {
        fs::read_to_string(self.path(rel)).unwrap()
    }

    pub fn workspace(&self) -> Workspace {
        Workspace::new(&self.root)
    }
}

pub fn at(line: u32, character: u32) -> Position {
    Position::new(line, character)
}

pub fn file_name(uri: &Url) -> String {
    Path::new(uri.path()).file_name().unwrap().to_string_lossy().into_owned()
}
