use std::path::{Path, PathBuf};

use url::Url;
use welle_core::module::normalize_path;

/// `file://` URI for `path`, made absolute first.
pub fn path_to_uri(path: &Path) -> Option<Url> {
    Url::from_file_path(normalize_path(path)).ok()
}

/// Local path for a `file://` URI. Other schemes give `None`.
pub fn uri_to_path(uri: &Url) -> Option<PathBuf> {
    if uri.scheme() != "file" {
        return None;
    }
    uri.to_file_path().ok()
}
