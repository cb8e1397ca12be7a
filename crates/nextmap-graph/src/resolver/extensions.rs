//! Extension and index-file probing for local import candidates.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::runtime::Runtime;

/// Suffixes tried after the bare candidate, in order.
pub const EXTENSIONS: &[&str] = &[".js", ".jsx", ".ts", ".tsx", ".json", ".mjs", ".cjs"];

/// Index files tried when the candidate is a directory, in order.
pub const INDEX_FILES: &[&str] = &["index.js", "index.jsx", "index.ts", "index.tsx"];

/// Try the candidate as-is and with each extension appended.
///
/// Extensions are appended, not substituted: `utils.service` becomes
/// `utils.service.ts`.
pub fn try_extensions(base_path: &Path, runtime: &dyn Runtime) -> Option<PathBuf> {
    if runtime.is_file(base_path) {
        return Some(base_path.to_path_buf());
    }

    EXTENSIONS.iter().find_map(|ext| {
        let mut with_ext = OsString::from(base_path.as_os_str());
        with_ext.push(ext);
        let candidate = PathBuf::from(with_ext);
        runtime.is_file(&candidate).then_some(candidate)
    })
}

/// Try `index.*` files inside a directory candidate.
pub fn try_index_files(dir_path: &Path, runtime: &dyn Runtime) -> Option<PathBuf> {
    if !runtime.is_dir(dir_path) {
        return None;
    }

    INDEX_FILES
        .iter()
        .map(|index| dir_path.join(index))
        .find(|candidate| runtime.exists(candidate))
}

/// First existing file for a local candidate, if any.
pub fn find_actual_file(base_path: &Path, runtime: &dyn Runtime) -> Option<PathBuf> {
    try_extensions(base_path, runtime).or_else(|| try_index_files(base_path, runtime))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::test_utils::MemoryRuntime;

    #[test]
    fn test_exact_file_wins() {
        let runtime = MemoryRuntime::new(&[("/p/a.js", ""), ("/p/a.js.ts", "")]);
        assert_eq!(
            find_actual_file(Path::new("/p/a.js"), &runtime),
            Some(PathBuf::from("/p/a.js"))
        );
    }

    #[test]
    fn test_extension_order() {
        let runtime = MemoryRuntime::new(&[("/p/utils.ts", ""), ("/p/utils.json", "")]);
        assert_eq!(
            find_actual_file(Path::new("/p/utils"), &runtime),
            Some(PathBuf::from("/p/utils.ts"))
        );
    }

    #[test]
    fn test_appends_instead_of_replacing() {
        let runtime = MemoryRuntime::new(&[("/p/api.service.ts", "")]);
        assert_eq!(
            find_actual_file(Path::new("/p/api.service"), &runtime),
            Some(PathBuf::from("/p/api.service.ts"))
        );
    }

    #[test]
    fn test_directory_index() {
        let runtime = MemoryRuntime::new(&[("/p/components/index.tsx", "")]);
        assert_eq!(
            find_actual_file(Path::new("/p/components"), &runtime),
            Some(PathBuf::from("/p/components/index.tsx"))
        );
    }

    #[test]
    fn test_miss() {
        let runtime = MemoryRuntime::new(&[("/p/other.js", "")]);
        assert_eq!(find_actual_file(Path::new("/p/missing"), &runtime), None);
    }
}
