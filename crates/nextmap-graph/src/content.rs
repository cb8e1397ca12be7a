//! Source reads for files selected from an analyzed project.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::runtime::{Runtime, RuntimeError};
use crate::validation::{PathTraversalError, normalize_and_validate_path};

/// Default cap on file size.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("File too large: {} is {size} bytes (max: {max} bytes)", .path.display())]
    TooLarge { path: PathBuf, size: u64, max: u64 },

    #[error(transparent)]
    OutsideRoot(#[from] PathTraversalError),

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: RuntimeError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileContent {
    pub content: String,
    pub file_path: PathBuf,
}

/// Reads files, refusing anything outside the project root.
#[derive(Debug)]
pub struct ContentReader<'r> {
    root: PathBuf,
    max_size: u64,
    runtime: &'r dyn Runtime,
}

impl<'r> ContentReader<'r> {
    pub fn new(root: impl Into<PathBuf>, runtime: &'r dyn Runtime) -> Self {
        Self {
            root: root.into(),
            max_size: DEFAULT_MAX_FILE_SIZE,
            runtime,
        }
    }

    pub fn with_max_size(mut self, max_size: u64) -> Self {
        self.max_size = max_size;
        self
    }

    pub fn read(&self, path: &Path) -> Result<FileContent, ContentError> {
        let path = normalize_and_validate_path(path, &self.root, self.runtime)?;

        let metadata = self.runtime.metadata(&path).map_err(|err| match err {
            RuntimeError::FileNotFound(p) => ContentError::NotFound(p),
            source => ContentError::Read {
                path: path.clone(),
                source,
            },
        })?;
        if !metadata.is_file {
            return Err(ContentError::NotFound(path));
        }
        if metadata.size > self.max_size {
            return Err(ContentError::TooLarge {
                path,
                size: metadata.size,
                max: self.max_size,
            });
        }

        let content = self
            .runtime
            .read_to_string(&path)
            .map_err(|source| ContentError::Read {
                path: path.clone(),
                source,
            })?;
        Ok(FileContent {
            content,
            file_path: path,
        })
    }
}
