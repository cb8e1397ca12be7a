//! Project root validation and path containment checks.
//!
//! Paths handed to the content reader come from callers and are treated as
//! untrusted. They must stay inside the analyzed project root after
//! normalization.

use std::path::{Path, PathBuf};

use path_clean::PathClean;
use thiserror::Error;

use crate::runtime::Runtime;

/// A path that escapes the project root.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Path traversal detected: path '{path}' escapes from root '{root}'")]
pub struct PathTraversalError {
    pub path: PathBuf,
    pub root: PathBuf,
}

/// Canonical form of a project root, or `None` if it is not a directory.
pub fn validate_project_root(root: &Path, runtime: &dyn Runtime) -> Option<PathBuf> {
    if !runtime.is_dir(root) {
        return None;
    }
    Some(runtime.canonicalize(root).unwrap_or_else(|_| root.to_path_buf().clean()))
}

/// Check that a normalized path stays within `root`.
///
/// Canonical forms are compared when both resolve. Otherwise the cleaned
/// paths are compared, which rejects any remaining `..` escape.
pub fn validate_within_root(
    normalized: &Path,
    root: &Path,
    runtime: &dyn Runtime,
) -> Result<(), PathTraversalError> {
    if let (Ok(path), Ok(root_canonical)) = (runtime.canonicalize(normalized), runtime.canonicalize(root)) {
        if path.starts_with(&root_canonical) {
            return Ok(());
        }
        return Err(PathTraversalError {
            path: normalized.to_path_buf(),
            root: root.to_path_buf(),
        });
    }

    let cleaned = normalized.to_path_buf().clean();
    if cleaned.starts_with(root.to_path_buf().clean()) {
        return Ok(());
    }

    Err(PathTraversalError {
        path: normalized.to_path_buf(),
        root: root.to_path_buf(),
    })
}

/// Make `path` absolute against `root`, clean it, and check containment.
pub fn normalize_and_validate_path(
    path: &Path,
    root: &Path,
    runtime: &dyn Runtime,
) -> Result<PathBuf, PathTraversalError> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    };
    let cleaned = joined.clean();
    validate_within_root(&cleaned, root, runtime)?;
    Ok(cleaned)
}
