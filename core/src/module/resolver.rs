use std::path::{Component, Path, PathBuf};

use anyhow::{Result, bail};
use tracing::debug;

pub const SOURCE_EXT: &str = "wll";

/// Maps import specifiers to absolute module paths.
///
/// - `std:name` is looked up under the std root only.
/// - `./x`, `../x` and absolute paths are relative to the importing file.
/// - A bare name tries the std root, then each module path in order.
///
/// A specifier without an extension gets `.wll`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolver {
    pub std_root: PathBuf,
    pub paths: Vec<PathBuf>,
}

fn with_ext(spec: &str) -> PathBuf {
    let path = PathBuf::from(spec);
    if path.extension().is_none() {
        path.with_extension(SOURCE_EXT)
    } else {
        path
    }
}

/// Absolute form of `path` with `.` and `..` folded away lexically.
pub fn normalize_path(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut out = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn must_exist(path: PathBuf) -> Result<PathBuf> {
    if !path.is_file() {
        bail!("module not found: {}", path.display());
    }
    Ok(path)
}

impl Resolver {
    pub fn new(std_root: impl Into<PathBuf>, paths: Vec<PathBuf>) -> Self {
        Self {
            std_root: normalize_path(&std_root.into()),
            paths: paths.iter().map(|p| normalize_path(p)).collect(),
        }
    }

    /// Resolve `spec` as imported from the file at `from`.
    pub fn resolve(&self, from: &Path, spec: &str) -> Result<PathBuf> {
        if let Some(name) = spec.strip_prefix("std:") {
            if name.is_empty() {
                bail!("invalid std import: {spec:?}");
            }
            return must_exist(normalize_path(&self.std_root.join(with_ext(name))));
        }

        if spec.starts_with("./") || spec.starts_with("../") || Path::new(spec).is_absolute() {
            let base = from.parent().unwrap_or_else(|| Path::new("."));
            return must_exist(normalize_path(&base.join(with_ext(spec))));
        }

        let roots = std::iter::once(&self.std_root).chain(self.paths.iter());
        for root in roots {
            let candidate = normalize_path(&root.join(with_ext(spec)));
            if candidate.is_file() {
                return Ok(candidate);
            }
        }
        debug!(spec, from = %from.display(), "import did not resolve");
        bail!("cannot resolve import {spec:?} from {}", from.display())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_resolve_forms() {
        let dir = tempfile::tempdir().unwrap();
        let root = normalize_path(dir.path());
        touch(&root.join("std/math.wll"));
        touch(&root.join("src/util.wll"));
        touch(&root.join("lib/shared.wll"));
        touch(&root.join("src/main.wll"));

        let resolver = Resolver::new(root.join("std"), vec![root.join("lib")]);
        let main = root.join("src/main.wll");

        assert_eq!(resolver.resolve(&main, "std:math").unwrap(), root.join("std/math.wll"));
        assert_eq!(resolver.resolve(&main, "math").unwrap(), root.join("std/math.wll"));
        assert_eq!(resolver.resolve(&main, "./util").unwrap(), root.join("src/util.wll"));
        assert_eq!(resolver.resolve(&main, "./util.wll").unwrap(), root.join("src/util.wll"));
        assert_eq!(resolver.resolve(&main, "../lib/shared").unwrap(), root.join("lib/shared.wll"));
        assert_eq!(resolver.resolve(&main, "shared").unwrap(), root.join("lib/shared.wll"));
    }

    #[test]
    fn test_resolve_errors() {
        let dir = tempfile::tempdir().unwrap();
        let root = normalize_path(dir.path());
        let resolver = Resolver::new(root.join("std"), vec![root.clone()]);
        let main = root.join("main.wll");

        let err = resolver.resolve(&main, "./missing").unwrap_err().to_string();
        assert!(err.starts_with("module not found: "), "{err}");
        assert!(err.ends_with("missing.wll"), "{err}");

        let err = resolver.resolve(&main, "nowhere").unwrap_err().to_string();
        assert_eq!(err, format!("cannot resolve import \"nowhere\" from {}", main.display()));

        assert!(resolver.resolve(&main, "std:").is_err());
    }

    #[test]
    fn test_normalize_path() {
        let p = normalize_path(Path::new("/a/b/../c/./d.wll"));
        assert_eq!(p, PathBuf::from("/a/c/d.wll"));
    }
}
