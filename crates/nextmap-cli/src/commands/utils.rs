//! Shared helpers for command implementations.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use nextmap_graph::Runtime;
use nextmap_graph::validation::validate_project_root;
use serde::Serialize;

use crate::error::{CliError, Result, ResultExt};
use crate::ui;

/// Join relative paths onto `base`.
pub fn resolve_path(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Canonical project root, or an error with a hint when it is not a
/// directory.
pub fn resolve_root(root: &Path, runtime: &dyn Runtime) -> Result<PathBuf> {
    validate_project_root(root, runtime).ok_or_else(|| {
        CliError::from(nextmap_graph::Error::InvalidRoot(root.to_path_buf()))
    })
    .with_hint("Pass the directory that contains your app/ folder")
}

/// Canonical path of an existing file.
pub fn resolve_file(file: &Path, runtime: &dyn Runtime) -> Result<PathBuf> {
    if !runtime.is_file(file) {
        return Err(CliError::FileNotFound(file.to_path_buf()));
    }
    runtime.canonicalize(file).with_path(file)
}

/// Write `value` as pretty JSON to `path`, or to stdout when `path` is `-`.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;

    if path == Path::new("-") {
        let mut stdout = std::io::stdout().lock();
        anyhow::Context::context(writeln!(stdout, "{json}"), "Failed to write JSON to stdout")?;
        return Ok(());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    ui::success(&format!("Wrote {}", path.display()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nextmap_graph::NativeRuntime;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_path() {
        let base = Path::new("/project");
        assert_eq!(resolve_path(Path::new("app/page.js"), base), PathBuf::from("/project/app/page.js"));
        assert_eq!(resolve_path(Path::new("/abs/x.js"), base), PathBuf::from("/abs/x.js"));
    }

    #[test]
    fn test_resolve_root() {
        let dir = TempDir::new().unwrap();
        let rt = NativeRuntime;
        assert!(resolve_root(dir.path(), &rt).is_ok());

        let err = resolve_root(&dir.path().join("missing"), &rt).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("not a valid directory"));
        assert!(msg.contains("Hint:"));
    }

    #[test]
    fn test_resolve_file_missing() {
        let dir = TempDir::new().unwrap();
        let err = resolve_file(&dir.path().join("nope.js"), &NativeRuntime).unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }

    #[test]
    fn test_write_json_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out/nested/result.json");
        write_json(&path, &serde_json::json!({ "routes": 3 })).unwrap();

        let text = NativeRuntime.read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["routes"], 3);
        assert!(text.contains('\n'));
    }
}
