//! Project manifest (`welle.toml`).

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::warn;

use crate::module::normalize_path;

pub const MANIFEST_FILE: &str = "welle.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Manifest {
    pub name: Option<String>,
    pub entry: Option<String>,
    pub std_root: Option<PathBuf>,
    pub module_paths: Vec<PathBuf>,
    /// Evaluator limits. Accepted so shared manifests parse; the front end
    /// does not read them.
    pub max_recursion: Option<u32>,
    pub max_steps: Option<u64>,
    pub max_mem: Option<u64>,
}

/// Absolute lookup roots derived from a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub std_root: PathBuf,
    pub module_paths: Vec<PathBuf>,
}

impl Manifest {
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid welle.toml")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Walk from `start_dir` up through its parents looking for a manifest.
    /// Returns the directory that holds it together with the parsed value.
    /// An unreadable manifest is logged and skipped.
    pub fn find(start_dir: &Path) -> Option<(PathBuf, Manifest)> {
        for dir in start_dir.ancestors() {
            let candidate = dir.join(MANIFEST_FILE);
            if !candidate.is_file() {
                continue;
            }
            match Self::load(&candidate) {
                Ok(manifest) => return Some((dir.to_path_buf(), manifest)),
                Err(err) => {
                    warn!(path = %candidate.display(), "ignoring manifest: {err:#}");
                    return None;
                }
            }
        }
        None
    }

    /// Relative entries are taken from `root`. `std_root` defaults to
    /// `<root>/std` and module paths to `[root]`.
    pub fn resolve_paths(&self, root: &Path) -> ResolvedPaths {
        let absolute = |p: &Path| {
            if p.is_absolute() {
                normalize_path(p)
            } else {
                normalize_path(&root.join(p))
            }
        };
        let std_root = match &self.std_root {
            Some(p) => absolute(p),
            None => normalize_path(&root.join("std")),
        };
        let module_paths = if self.module_paths.is_empty() {
            vec![normalize_path(root)]
        } else {
            self.module_paths.iter().map(|p| absolute(p)).collect()
        };
        ResolvedPaths { std_root, module_paths }
    }
}
