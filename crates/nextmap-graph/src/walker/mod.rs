//! Recursive project walk producing the structure tree.
//!
//! Each entry is tested against [`IgnoreRules`] before it is descended into.
//! App Router scope is derived from an entry's relative path alone, so any
//! node's scope can be recomputed without its ancestors.

mod ignore_rules;

pub use ignore_rules::{DEFAULT_IGNORES, IGNORE_FILE, IgnoreRules};

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::routing::{
    FileAnalysis, RoutingClassification, SpecialFiles, build_route_path, classify, classify_file,
};
use crate::runtime::Runtime;
use crate::validation::validate_project_root;
use crate::{Error, Result, dependency::DependencyAnalyzer};

/// Options for [`ProjectWalker`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WalkerConfig {
    /// App Router root segment relative to the project root.
    pub app_dir: String,
    /// Patterns added to the default ignore set.
    pub ignore_patterns: Vec<String>,
    /// Read `.gitignore` from the project root.
    pub use_ignore_file: bool,
    /// Folders nested deeper than this are listed but not descended.
    pub max_depth: usize,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            app_dir: "app".to_string(),
            ignore_patterns: Vec::new(),
            use_ignore_file: true,
            max_depth: 64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Folder,
    File,
}

/// One filesystem entry in the structure tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureNode {
    pub name: String,
    pub kind: NodeKind,
    pub full_path: PathBuf,
    /// `/`-separated path below the project root; empty for the root.
    pub relative_path: String,
    pub is_app_router_scope: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing_analysis: Option<RoutingClassification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_files: Option<SpecialFiles>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_analysis: Option<FileAnalysis>,
    /// Folders first, then files, each sorted by name.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<StructureNode>,
}

impl StructureNode {
    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }

    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }

    pub fn folders(&self) -> impl Iterator<Item = &StructureNode> {
        self.children.iter().filter(|c| c.is_folder())
    }

    pub fn files(&self) -> impl Iterator<Item = &StructureNode> {
        self.children.iter().filter(|c| c.is_file())
    }

    /// Pre-order traversal including `self`.
    pub fn descendants(&self) -> Vec<&StructureNode> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children.iter().rev());
        }
        out
    }

    /// Find a node by its relative path.
    pub fn find(&self, relative_path: &str) -> Option<&StructureNode> {
        self.descendants()
            .into_iter()
            .find(|n| n.relative_path == relative_path)
    }

    /// Every file the dependency analyzer can parse, in tree order.
    pub fn source_files(&self) -> Vec<PathBuf> {
        self.descendants()
            .into_iter()
            .filter(|n| n.is_file() && DependencyAnalyzer::is_analyzable(&n.full_path))
            .map(|n| n.full_path.clone())
            .collect()
    }
}

/// Whether `relative_path` is the App Router root or lies below it.
pub fn is_in_app_scope(relative_path: &str, app_root: &str) -> bool {
    !app_root.is_empty()
        && (relative_path == app_root
            || relative_path
                .strip_prefix(app_root)
                .is_some_and(|rest| rest.starts_with('/')))
}

fn join_relative(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}

/// Walks one project root.
#[derive(Debug)]
pub struct ProjectWalker<'r> {
    root: PathBuf,
    app_root: String,
    config: WalkerConfig,
    ignore: IgnoreRules,
    runtime: &'r dyn Runtime,
}

impl<'r> ProjectWalker<'r> {
    /// Validate `root` and load its ignore rules.
    ///
    /// Fails only when `root` is not an existing directory.
    pub fn new(root: &Path, config: WalkerConfig, runtime: &'r dyn Runtime) -> Result<Self> {
        let root =
            validate_project_root(root, runtime).ok_or_else(|| Error::InvalidRoot(root.to_path_buf()))?;
        let ignore = IgnoreRules::load(&root, &config.ignore_patterns, config.use_ignore_file, runtime);
        let app_root = Self::detect_app_root(&root, &config.app_dir, runtime);
        Ok(Self {
            root,
            app_root,
            config,
            ignore,
            runtime,
        })
    }

    /// `app_dir`, or `src/<app_dir>` when only the latter exists.
    fn detect_app_root(root: &Path, app_dir: &str, runtime: &dyn Runtime) -> String {
        let app_dir = app_dir.trim_matches('/');
        if !runtime.is_dir(&root.join(app_dir)) {
            let nested = format!("src/{app_dir}");
            if runtime.is_dir(&root.join(&nested)) {
                return nested;
            }
        }
        app_dir.to_string()
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Relative path of the App Router root.
    pub fn app_root(&self) -> &str {
        &self.app_root
    }

    pub fn has_app_router(&self) -> bool {
        self.runtime.is_dir(&self.root.join(&self.app_root))
    }

    pub fn walk(&self) -> StructureNode {
        let name = self
            .root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.root.display().to_string());
        tracing::debug!(
            "Walking {} (app root: {})",
            self.root.display(),
            self.app_root
        );
        self.walk_folder(self.root.clone(), name, String::new(), None, 0)
    }

    fn walk_folder(
        &self,
        full_path: PathBuf,
        name: String,
        relative_path: String,
        parent_route: Option<&str>,
        depth: usize,
    ) -> StructureNode {
        let in_scope = is_in_app_scope(&relative_path, &self.app_root);
        let (routing_analysis, route_path) = if in_scope {
            let classification = classify(&name);
            let parent = if relative_path == self.app_root {
                None
            } else {
                parent_route
            };
            let route = build_route_path(parent, &name, &classification);
            (Some(classification), Some(route))
        } else {
            (None, None)
        };

        let children = if depth >= self.config.max_depth {
            tracing::warn!("Not descending into {}: max depth reached", full_path.display());
            Vec::new()
        } else {
            self.walk_children(&full_path, &relative_path, route_path.as_deref(), depth)
        };

        let special_files = in_scope.then(|| {
            SpecialFiles::from_children(children.iter().filter_map(|c| c.file_analysis.as_ref()))
        });

        StructureNode {
            name,
            kind: NodeKind::Folder,
            full_path,
            relative_path,
            is_app_router_scope: in_scope,
            routing_analysis,
            route_path,
            special_files,
            file_analysis: None,
            children,
        }
    }

    fn walk_children(
        &self,
        dir: &Path,
        relative_path: &str,
        route_path: Option<&str>,
        depth: usize,
    ) -> Vec<StructureNode> {
        let names = match self.runtime.read_dir(dir) {
            Ok(names) => names,
            Err(err) => {
                tracing::warn!("Cannot list {}: {err}", dir.display());
                return Vec::new();
            }
        };

        let mut folders = Vec::new();
        let mut files = Vec::new();
        for name in names {
            let full_path = dir.join(&name);
            let is_dir = self.runtime.is_dir(&full_path);
            if self.ignore.is_ignored(&full_path, is_dir) {
                tracing::trace!("Ignored {}", full_path.display());
                continue;
            }
            if is_dir {
                folders.push((name, full_path));
            } else {
                files.push((name, full_path));
            }
        }
        folders.sort();
        files.sort();

        let mut children = Vec::with_capacity(folders.len() + files.len());
        for (name, full_path) in folders {
            let child_relative = join_relative(relative_path, &name);
            children.push(self.walk_folder(full_path, name, child_relative, route_path, depth + 1));
        }
        for (name, full_path) in files {
            let child_relative = join_relative(relative_path, &name);
            children.push(self.file_node(full_path, name, child_relative, route_path));
        }
        children
    }

    fn file_node(
        &self,
        full_path: PathBuf,
        name: String,
        relative_path: String,
        parent_route: Option<&str>,
    ) -> StructureNode {
        let in_scope = is_in_app_scope(&relative_path, &self.app_root);
        let file_analysis = in_scope.then(|| classify_file(&name, &full_path, self.runtime));
        StructureNode {
            name,
            kind: NodeKind::File,
            full_path,
            relative_path,
            is_app_router_scope: in_scope,
            routing_analysis: None,
            route_path: if in_scope {
                parent_route.map(str::to_string)
            } else {
                None
            },
            special_files: None,
            file_analysis,
            children: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::RoutingKind;
    use crate::runtime::test_utils::MemoryRuntime;

    #[test]
    fn test_scope_from_relative_path() {
        assert!(is_in_app_scope("app", "app"));
        assert!(is_in_app_scope("app/blog/[id]", "app"));
        assert!(!is_in_app_scope("application", "app"));
        assert!(!is_in_app_scope("", "app"));
        assert!(is_in_app_scope("src/app/page.js", "src/app"));
        assert!(!is_in_app_scope("app", ""));
    }

    #[test]
    fn test_walk_classifies_tree() {
        let rt = MemoryRuntime::new(&[
            ("/p/app/page.js", ""),
            ("/p/app/layout.js", ""),
            ("/p/app/blog/[slug]/page.tsx", ""),
            ("/p/app/_components/Nav.tsx", ""),
            ("/p/lib/db.ts", ""),
            ("/p/node_modules/react/index.js", ""),
        ]);
        let walker = ProjectWalker::new(Path::new("/p"), WalkerConfig::default(), &rt).unwrap();
        let tree = walker.walk();

        assert_eq!(tree.relative_path, "");
        assert!(!tree.is_app_router_scope);
        let names: Vec<_> = tree.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["app", "lib"]);

        let app = tree.find("app").unwrap();
        assert_eq!(app.route_path.as_deref(), Some("/"));
        assert!(app.special_files.unwrap().has_page);
        assert!(app.special_files.unwrap().has_layout);

        let slug = tree.find("app/blog/[slug]").unwrap();
        assert_eq!(
            slug.routing_analysis.as_ref().map(|r| r.kind),
            Some(RoutingKind::DynamicRoute)
        );
        assert_eq!(slug.route_path.as_deref(), Some("/blog/[slug]"));

        let page = tree.find("app/blog/[slug]/page.tsx").unwrap();
        assert_eq!(page.route_path.as_deref(), Some("/blog/[slug]"));
        assert!(page.file_analysis.is_some());

        let private = tree.find("app/_components").unwrap();
        assert_eq!(private.route_path.as_deref(), Some("/"));

        let lib = tree.find("lib").unwrap();
        assert!(lib.route_path.is_none());
        assert!(lib.special_files.is_none());
        assert!(tree.find("lib/db.ts").unwrap().file_analysis.is_none());
    }

    #[test]
    fn test_src_app_fallback() {
        let rt = MemoryRuntime::new(&[("/p/src/app/about/page.js", "")]);
        let walker = ProjectWalker::new(Path::new("/p"), WalkerConfig::default(), &rt).unwrap();
        assert_eq!(walker.app_root(), "src/app");
        assert!(walker.has_app_router());

        let tree = walker.walk();
        let about = tree.find("src/app/about").unwrap();
        assert_eq!(about.route_path.as_deref(), Some("/about"));
        assert!(!tree.find("src").unwrap().is_app_router_scope);
    }

    #[test]
    fn test_children_folders_then_files() {
        let rt = MemoryRuntime::new(&[
            ("/p/b.js", ""),
            ("/p/a.js", ""),
            ("/p/z/x.js", ""),
            ("/p/m/x.js", ""),
        ]);
        let walker = ProjectWalker::new(Path::new("/p"), WalkerConfig::default(), &rt).unwrap();
        let tree = walker.walk();
        let names: Vec<_> = tree.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["m", "z", "a.js", "b.js"]);
        assert_eq!(tree.source_files().len(), 4);
    }

    #[test]
    fn test_invalid_root() {
        let rt = MemoryRuntime::new(&[("/p/file.js", "")]);
        let err = ProjectWalker::new(Path::new("/p/file.js"), WalkerConfig::default(), &rt)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Project path is not a valid directory: /p/file.js"
        );
    }

    #[test]
    fn test_max_depth() {
        let rt = MemoryRuntime::new(&[("/p/a/b/c/d.js", "")]);
        let config = WalkerConfig {
            max_depth: 1,
            ..WalkerConfig::default()
        };
        let walker = ProjectWalker::new(Path::new("/p"), config, &rt).unwrap();
        let tree = walker.walk();
        let a = tree.find("a").unwrap();
        assert!(a.children.is_empty());
    }
}
