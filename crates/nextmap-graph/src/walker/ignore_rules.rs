//! Ignore rules for the project walk.

use std::path::Path;

use ignore::gitignore::{Gitignore, GitignoreBuilder};

use crate::runtime::Runtime;

/// Entries never walked, regardless of the project's ignore file.
pub const DEFAULT_IGNORES: &[&str] = &["node_modules", ".next", ".git", "dist", "build"];

/// Project ignore file read from the root.
pub const IGNORE_FILE: &str = ".gitignore";

/// Compiled ignore predicate: defaults, extra patterns, then `.gitignore`.
#[derive(Debug, Clone)]
pub struct IgnoreRules {
    matcher: Gitignore,
}

impl IgnoreRules {
    pub fn load(root: &Path, extra: &[String], use_ignore_file: bool, runtime: &dyn Runtime) -> Self {
        let mut builder = GitignoreBuilder::new(root);
        let mut add = |line: &str| {
            if let Err(err) = builder.add_line(None, line) {
                tracing::warn!("Ignoring invalid pattern '{line}': {err}");
            }
        };

        for pattern in DEFAULT_IGNORES.iter().copied() {
            add(pattern);
        }
        for pattern in extra {
            add(pattern.as_str());
        }

        if use_ignore_file {
            let ignore_path = root.join(IGNORE_FILE);
            if let Ok(content) = runtime.read_to_string(&ignore_path) {
                let mut count = 0usize;
                for line in content.lines().map(str::trim) {
                    if line.is_empty() || line.starts_with('#') {
                        continue;
                    }
                    add(line);
                    count += 1;
                }
                tracing::debug!("Loaded {count} patterns from {}", ignore_path.display());
            }
        }

        let matcher = builder.build().unwrap_or_else(|err| {
            tracing::warn!("Failed to compile ignore rules: {err}");
            Gitignore::empty()
        });
        Self { matcher }
    }

    /// Whether an entry under the root is pruned from the walk.
    pub fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        self.matcher.matched(path, is_dir).is_ignore()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::test_utils::MemoryRuntime;

    #[test]
    fn test_defaults() {
        let rt = MemoryRuntime::default();
        let rules = IgnoreRules::load(Path::new("/p"), &[], true, &rt);
        assert!(rules.is_ignored(Path::new("/p/node_modules"), true));
        assert!(rules.is_ignored(Path::new("/p/.next"), true));
        assert!(rules.is_ignored(Path::new("/p/packages/a/node_modules"), true));
        assert!(!rules.is_ignored(Path::new("/p/app"), true));
    }

    #[test]
    fn test_ignore_file_and_extra_patterns() {
        let rt = MemoryRuntime::new(&[("/p/.gitignore", "# comment\n*.log\ncoverage/\n\n")]);
        let rules = IgnoreRules::load(Path::new("/p"), &["tmp".to_string()], true, &rt);
        assert!(rules.is_ignored(Path::new("/p/debug.log"), false));
        assert!(rules.is_ignored(Path::new("/p/coverage"), true));
        assert!(!rules.is_ignored(Path::new("/p/coverage"), false));
        assert!(rules.is_ignored(Path::new("/p/tmp"), true));
        assert!(!rules.is_ignored(Path::new("/p/app/page.js"), false));
    }

    #[test]
    fn test_ignore_file_disabled() {
        let rt = MemoryRuntime::new(&[("/p/.gitignore", "*.log\n")]);
        let rules = IgnoreRules::load(Path::new("/p"), &[], false, &rt);
        assert!(!rules.is_ignored(Path::new("/p/debug.log"), false));
    }
}
