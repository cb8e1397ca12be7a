//! Filesystem abstraction for project analysis.
//!
//! Every read performed by the walker, the resolver, and the dependency
//! analyzer goes through the [`Runtime`] trait. [`NativeRuntime`] wraps
//! `std::fs`; tests can substitute an in-memory implementation.

mod native;

pub use native::NativeRuntime;

use std::path::{Path, PathBuf};

/// Result type for runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Errors that can occur during runtime operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(String),

    /// File content is not valid UTF-8
    #[error("File is not valid UTF-8: {0}")]
    InvalidUtf8(PathBuf),
}

/// File metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileMetadata {
    /// File size in bytes
    pub size: u64,
    /// Whether this is a directory
    pub is_dir: bool,
    /// Whether this is a file
    pub is_file: bool,
}

/// Synchronous filesystem access used by the analysis pipeline.
pub trait Runtime: Send + Sync + std::fmt::Debug {
    /// Read a file's bytes
    fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>>;

    /// Get file metadata
    fn metadata(&self, path: &Path) -> RuntimeResult<FileMetadata>;

    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Entry names of a directory, in the order the platform returns them
    fn read_dir(&self, path: &Path) -> RuntimeResult<Vec<String>>;

    /// Resolve symlinks and relative components
    fn canonicalize(&self, path: &Path) -> RuntimeResult<PathBuf>;

    /// Read a file as UTF-8 text
    fn read_to_string(&self, path: &Path) -> RuntimeResult<String> {
        let bytes = self.read_file(path)?;
        String::from_utf8(bytes).map_err(|_| RuntimeError::InvalidUtf8(path.to_path_buf()))
    }

    fn is_file(&self, path: &Path) -> bool {
        self.metadata(path).map(|m| m.is_file).unwrap_or(false)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.metadata(path).map(|m| m.is_dir).unwrap_or(false)
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils {
    //! In-memory runtime for resolver and analyzer tests.

    use super::*;
    use rustc_hash::FxHashMap;

    #[derive(Debug, Default)]
    pub struct MemoryRuntime {
        files: FxHashMap<PathBuf, String>,
    }

    impl MemoryRuntime {
        pub fn new(files: &[(&str, &str)]) -> Self {
            Self {
                files: files
                    .iter()
                    .map(|(path, content)| (PathBuf::from(path), content.to_string()))
                    .collect(),
            }
        }

        fn has_dir(&self, path: &Path) -> bool {
            self.files
                .keys()
                .any(|file| file != path && file.starts_with(path))
        }
    }

    impl Runtime for MemoryRuntime {
        fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
            self.files
                .get(path)
                .map(|c| c.as_bytes().to_vec())
                .ok_or_else(|| RuntimeError::FileNotFound(path.to_path_buf()))
        }

        fn metadata(&self, path: &Path) -> RuntimeResult<FileMetadata> {
            if let Some(content) = self.files.get(path) {
                Ok(FileMetadata {
                    size: content.len() as u64,
                    is_dir: false,
                    is_file: true,
                })
            } else if self.has_dir(path) {
                Ok(FileMetadata {
                    size: 0,
                    is_dir: true,
                    is_file: false,
                })
            } else {
                Err(RuntimeError::FileNotFound(path.to_path_buf()))
            }
        }

        fn exists(&self, path: &Path) -> bool {
            self.files.contains_key(path) || self.has_dir(path)
        }

        fn read_dir(&self, path: &Path) -> RuntimeResult<Vec<String>> {
            let mut names: Vec<String> = self
                .files
                .keys()
                .filter_map(|file| file.strip_prefix(path).ok())
                .filter_map(|rest| rest.components().next())
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            names.sort();
            names.dedup();
            Ok(names)
        }

        fn canonicalize(&self, path: &Path) -> RuntimeResult<PathBuf> {
            use path_clean::PathClean;
            Ok(path.to_path_buf().clean())
        }
    }
}
