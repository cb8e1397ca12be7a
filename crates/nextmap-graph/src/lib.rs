//! # nextmap-graph
//!
//! Static analysis of Next.js App Router projects.
//!
//! ## Overview
//!
//! ```text
//!   project root
//!        │
//!        ▼
//!  ┌──────────────┐  ignore rules, App Router scope,
//!  │ ProjectWalker│  routing + file classification
//!  └──────┬───────┘
//!         │ StructureNode tree
//!         ├──────────────────────────┐
//!         ▼                          ▼
//!  ┌──────────────┐          ┌────────────────────┐
//!  │   insights   │          │ DependencyAnalyzer │  oxc parse, PathResolver
//!  └──────────────┘          └─────────┬──────────┘
//!                                      │ phase 1: ForwardDependencyMap
//!                                      ▼
//!                            ┌────────────────────┐
//!                            │  compute_reverse   │  phase 2: importedBy
//!                            └────────────────────┘
//! ```
//!
//! All filesystem access goes through [`Runtime`]. Per-file failures are
//! recorded in results; only an invalid project root is an error.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use nextmap_graph::{AnalyzerConfig, NativeRuntime, analyze_project};
//! use std::path::Path;
//!
//! # fn main() -> nextmap_graph::Result<()> {
//! let analysis = analyze_project(Path::new("./my-app"), &AnalyzerConfig::default(), &NativeRuntime)?;
//! for route in &analysis.insights.routes {
//!     println!("{} {:?}", route.route_path, route.kind);
//! }
//! # Ok(())
//! # }
//! ```

pub mod content;
pub mod dependency;
pub mod insights;
pub mod prisma;
pub mod project;
pub mod resolver;
pub mod routing;
pub mod runtime;
pub mod validation;
pub mod walker;

#[cfg(test)]
mod tests;

pub use content::{ContentError, ContentReader, FileContent};
pub use dependency::{
    DependencyAnalyzer, DependencyKind, DependencyMap, DependencyMapEntry, DependencyRecord,
    FileDependencies, ForwardDependencyMap, ImportKind, ImporterRef, Specifier, SpecifierKind,
    compute_reverse,
};
pub use insights::{DiscoveredRoute, ProjectInsights, RouteKind, analyze_insights};
pub use prisma::{PrismaInfo, PrismaSchemaInfo, detect_prisma};
pub use project::{
    AnalyzerConfig, ProjectAnalysis, ProjectMetadata, analyze_project, build_dependency_map,
};
pub use resolver::{PathResolver, Resolution};
pub use routing::{
    FileAnalysis, FileKind, InterceptLevel, RoutingClassification, RoutingKind, SpecialFiles,
    build_route_path, classify, classify_file,
};
pub use runtime::{NativeRuntime, Runtime, RuntimeError};
pub use walker::{NodeKind, ProjectWalker, StructureNode, WalkerConfig};

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The only fatal condition: nothing can be analyzed without a root.
    #[error("Project path is not a valid directory: {}", .0.display())]
    InvalidRoot(PathBuf),

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// `/`-separated form of `path` below `root`, or the full path when it is
/// not below `root`.
pub fn relative_path(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) => rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/"),
        Err(_) => path.display().to_string(),
    }
}
