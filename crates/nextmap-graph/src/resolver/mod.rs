//! Import specifier resolution.
//!
//! Resolution order:
//! 1. Relative specifiers (`./`, `../`) against the importing file's directory
//! 2. Alias specifiers (`@/...`) against the project root
//! 3. Any other specifier as a literal path under the project root
//! 4. Otherwise an external package
//!
//! Local candidates are checked with [`find_actual_file`]. A local specifier
//! that matches nothing on disk is still local, with `exists: false`.

mod extensions;
mod package;

pub use extensions::{EXTENSIONS, INDEX_FILES, find_actual_file, try_extensions, try_index_files};
pub use package::extract_package_name;

use std::path::{Path, PathBuf};

use path_clean::PathClean;

use crate::runtime::Runtime;

/// Default alias prefix mapping to the project root.
pub const DEFAULT_ALIAS_PREFIX: &str = "@/";

/// Outcome of resolving one specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A project file. `path` is the matched file, or the cleaned candidate
    /// when nothing matched.
    Local {
        path: PathBuf,
        exists: bool,
        is_alias: bool,
    },
    /// An npm package or builtin module.
    External { package_name: String },
}

impl Resolution {
    pub fn is_local(&self) -> bool {
        matches!(self, Resolution::Local { .. })
    }

    /// Whether a local target exists; `None` for externals.
    pub fn exists(&self) -> Option<bool> {
        match self {
            Resolution::Local { exists, .. } => Some(*exists),
            Resolution::External { .. } => None,
        }
    }

    pub fn local_path(&self) -> Option<&Path> {
        match self {
            Resolution::Local { path, .. } => Some(path),
            Resolution::External { .. } => None,
        }
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resolution::Local {
                path, exists: true, ..
            } => write!(f, "Local({})", path.display()),
            Resolution::Local { path, .. } => write!(f, "Missing({})", path.display()),
            Resolution::External { package_name } => write!(f, "External({package_name})"),
        }
    }
}

/// Resolves specifiers for files inside one project root.
#[derive(Debug)]
pub struct PathResolver<'r> {
    root: PathBuf,
    alias_prefix: String,
    runtime: &'r dyn Runtime,
}

impl<'r> PathResolver<'r> {
    pub fn new(root: impl Into<PathBuf>, runtime: &'r dyn Runtime) -> Self {
        Self {
            root: root.into(),
            alias_prefix: DEFAULT_ALIAS_PREFIX.to_string(),
            runtime,
        }
    }

    pub fn with_alias_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.alias_prefix = prefix.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `specifier` as written in `from_file`.
    pub fn resolve(&self, specifier: &str, from_file: &Path) -> Resolution {
        if specifier.starts_with('.') {
            let from_dir = from_file.parent().unwrap_or(&self.root);
            return self.local(from_dir.join(specifier).clean(), false);
        }

        if !self.alias_prefix.is_empty() {
            if let Some(rest) = specifier.strip_prefix(self.alias_prefix.as_str()) {
                return self.local(self.root.join(rest).clean(), true);
            }
        }

        let literal = self.root.join(specifier).clean();
        if self.runtime.exists(&literal) || find_actual_file(&literal, self.runtime).is_some() {
            return self.local(literal, false);
        }

        Resolution::External {
            package_name: extract_package_name(specifier).to_string(),
        }
    }

    fn local(&self, candidate: PathBuf, is_alias: bool) -> Resolution {
        match find_actual_file(&candidate, self.runtime) {
            Some(path) => Resolution::Local {
                path,
                exists: true,
                is_alias,
            },
            None => {
                tracing::debug!("Unresolved local import {}", candidate.display());
                Resolution::Local {
                    path: candidate,
                    exists: false,
                    is_alias,
                }
            }
        }
    }
}
