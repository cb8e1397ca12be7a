//! Per-file dependency analysis.
//!
//! [`DependencyAnalyzer::analyze`] parses one file with oxc, collects its
//! import/require/re-export statements, resolves every specifier through
//! [`PathResolver`], and splits the records into local and external lists.
//!
//! Failures never escape as errors. A missing file, an unsupported extension,
//! or a parse failure produce an empty result whose
//! [`DependencyMetadata::parse_errors`] explains why.

mod extractor;
pub mod ids;
mod reverse;

pub use extractor::{Extraction, RawDependency, RawSpecifier, extract_dependencies};
pub use reverse::{
    DependencyMap, DependencyMapEntry, ForwardDependencyMap, ImporterRef, compute_reverse,
};

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::relative_path;
use crate::resolver::{PathResolver, Resolution};
use crate::runtime::Runtime;

/// Extensions the analyzer will parse.
pub const ANALYZABLE_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx", "mjs", "cjs"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DependencyKind {
    Import,
    DynamicImport,
    Require,
    ExportFrom,
    ExportAllFrom,
}

impl DependencyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyKind::Import => "import",
            DependencyKind::DynamicImport => "dynamic-import",
            DependencyKind::Require => "require",
            DependencyKind::ExportFrom => "export-from",
            DependencyKind::ExportAllFrom => "export-all-from",
        }
    }
}

impl std::fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `import type` / `export type` versus ordinary value imports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportKind {
    #[default]
    Value,
    Type,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecifierKind {
    Default,
    Namespace,
    Named,
    Export,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Specifier {
    pub id: String,
    pub kind: SpecifierKind,
    pub local: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imported: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exported: Option<String>,
}

/// One resolved dependency edge from a source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyRecord {
    /// Specifier exactly as written.
    pub source: String,
    #[serde(rename = "type")]
    pub kind: DependencyKind,
    pub import_kind: ImportKind,
    pub specifiers: Vec<Specifier>,
    pub stable_id: String,
    pub node_id: String,
    pub is_local: bool,
    /// Local records only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exists: Option<bool>,
    /// Absolute path for locals, the raw specifier for externals.
    pub resolved_path: String,
    pub is_alias: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_id: Option<String>,
}

impl DependencyRecord {
    /// The on-disk target, if this is a local record that resolved.
    pub fn local_target(&self) -> Option<PathBuf> {
        (self.is_local && self.exists == Some(true)).then(|| PathBuf::from(&self.resolved_path))
    }

    pub fn is_missing(&self) -> bool {
        self.is_local && self.exists == Some(false)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyMetadata {
    pub total_count: usize,
    pub parse_errors: Vec<String>,
    pub file_path: PathBuf,
    pub analysis_id: String,
}

/// Analysis result for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDependencies {
    pub local_dependencies: Vec<DependencyRecord>,
    pub external_dependencies: Vec<DependencyRecord>,
    pub metadata: DependencyMetadata,
}

impl FileDependencies {
    fn failed(file: &Path, error: String) -> Self {
        Self {
            local_dependencies: Vec::new(),
            external_dependencies: Vec::new(),
            metadata: DependencyMetadata {
                total_count: 0,
                parse_errors: vec![error],
                file_path: file.to_path_buf(),
                analysis_id: ids::node_id(),
            },
        }
    }

    /// Local records first, then externals.
    pub fn records(&self) -> impl Iterator<Item = &DependencyRecord> {
        self.local_dependencies
            .iter()
            .chain(self.external_dependencies.iter())
    }

    pub fn find_by_id(&self, stable_id: &str) -> Option<&DependencyRecord> {
        self.records().find(|r| r.stable_id == stable_id)
    }

    pub fn filter_by_type(&self, kind: DependencyKind) -> Vec<&DependencyRecord> {
        self.records().filter(|r| r.kind == kind).collect()
    }

    pub fn has_errors(&self) -> bool {
        !self.metadata.parse_errors.is_empty()
    }
}

/// Resolves and categorizes the dependencies of files under one root.
#[derive(Debug)]
pub struct DependencyAnalyzer<'r> {
    resolver: PathResolver<'r>,
    runtime: &'r dyn Runtime,
}

impl<'r> DependencyAnalyzer<'r> {
    pub fn new(root: impl Into<PathBuf>, runtime: &'r dyn Runtime) -> Self {
        Self {
            resolver: PathResolver::new(root, runtime),
            runtime,
        }
    }

    pub fn with_alias_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.resolver = self.resolver.with_alias_prefix(prefix);
        self
    }

    pub fn root(&self) -> &Path {
        self.resolver.root()
    }

    /// Whether `path` has an extension the analyzer parses.
    pub fn is_analyzable(path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| ANALYZABLE_EXTENSIONS.contains(&ext))
    }

    pub fn analyze(&self, file: &Path) -> FileDependencies {
        if !Self::is_analyzable(file) {
            let ext = file
                .extension()
                .map(|e| format!(".{}", e.to_string_lossy()))
                .unwrap_or_default();
            return FileDependencies::failed(file, format!("Unsupported file type: {ext}"));
        }

        if !self.runtime.exists(file) {
            return FileDependencies::failed(file, format!("File not found: {}", file.display()));
        }

        let source = match self.runtime.read_to_string(file) {
            Ok(source) => source,
            Err(err) => {
                tracing::warn!("Skipping {}: {err}", file.display());
                return FileDependencies::failed(file, err.to_string());
            }
        };

        let extraction = extract_dependencies(file, &source);
        if !extraction.parse_errors.is_empty() {
            tracing::warn!(
                "Parse errors in {} ({} diagnostics)",
                file.display(),
                extraction.parse_errors.len()
            );
            return FileDependencies {
                local_dependencies: Vec::new(),
                external_dependencies: Vec::new(),
                metadata: DependencyMetadata {
                    total_count: 0,
                    parse_errors: extraction.parse_errors,
                    file_path: file.to_path_buf(),
                    analysis_id: ids::node_id(),
                },
            };
        }

        let mut local_dependencies = Vec::new();
        let mut external_dependencies = Vec::new();
        for raw in extraction.dependencies {
            let record = self.build_record(file, raw);
            if record.is_local {
                local_dependencies.push(record);
            } else {
                external_dependencies.push(record);
            }
        }
        local_dependencies.sort_by(|a, b| a.source.cmp(&b.source));
        external_dependencies.sort_by(|a, b| a.source.cmp(&b.source));

        tracing::debug!(
            "Analyzed {}: {} local, {} external",
            file.display(),
            local_dependencies.len(),
            external_dependencies.len()
        );

        let total_count = local_dependencies.len() + external_dependencies.len();
        FileDependencies {
            local_dependencies,
            external_dependencies,
            metadata: DependencyMetadata {
                total_count,
                parse_errors: Vec::new(),
                file_path: file.to_path_buf(),
                analysis_id: ids::node_id(),
            },
        }
    }

    fn build_record(&self, file: &Path, raw: RawDependency) -> DependencyRecord {
        let stable_id = ids::stable_id(&raw.source, raw.kind, file);
        let specifiers = raw
            .specifiers
            .into_iter()
            .map(|spec| Specifier {
                id: ids::specifier_id(
                    &stable_id,
                    &spec.local,
                    spec.imported.as_deref().or(spec.exported.as_deref()),
                ),
                kind: spec.kind,
                local: spec.local,
                imported: spec.imported,
                exported: spec.exported,
            })
            .collect();

        let mut record = DependencyRecord {
            source: raw.source,
            kind: raw.kind,
            import_kind: raw.import_kind,
            specifiers,
            stable_id,
            node_id: ids::node_id(),
            is_local: false,
            exists: None,
            resolved_path: String::new(),
            is_alias: false,
            relative_path: None,
            path_id: None,
            package_name: None,
            package_id: None,
        };

        match self.resolver.resolve(&record.source, file) {
            Resolution::Local {
                path,
                exists,
                is_alias,
            } => {
                let resolved = path.to_string_lossy().into_owned();
                record.is_local = true;
                record.exists = Some(exists);
                record.is_alias = is_alias;
                record.relative_path = Some(relative_path(self.root(), &path));
                record.path_id = Some(ids::short_id(&resolved));
                record.resolved_path = resolved;
            }
            Resolution::External { package_name } => {
                record.resolved_path = record.source.clone();
                record.package_id = Some(ids::short_id(&package_name));
                record.package_name = Some(package_name);
            }
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::test_utils::MemoryRuntime;

    fn project() -> MemoryRuntime {
        MemoryRuntime::new(&[
            (
                "/p/src/index.js",
                r#"
import React from "react";
import { format } from "./utils";
import Missing from "./missing";
import { Button } from "@/components/button";
import Sub from "@scope/pkg/sub";
export * from "./utils";
"#,
            ),
            ("/p/src/utils.js", "export const format = (x) => x;"),
            ("/p/components/button.tsx", "export const Button = () => null;"),
            ("/p/src/broken.js", "import { from 'x';"),
            ("/p/src/styles.css", "body {}"),
        ])
    }

    #[test]
    fn test_categorizes_dependencies() {
        let rt = project();
        let analyzer = DependencyAnalyzer::new("/p", &rt);
        let result = analyzer.analyze(Path::new("/p/src/index.js"));

        assert!(!result.has_errors());
        assert_eq!(result.metadata.total_count, 6);

        let local: Vec<_> = result
            .local_dependencies
            .iter()
            .map(|r| (r.source.as_str(), r.exists))
            .collect();
        assert_eq!(
            local,
            vec![
                ("./missing", Some(false)),
                ("./utils", Some(true)),
                ("./utils", Some(true)),
                ("@/components/button", Some(true)),
            ]
        );

        let external: Vec<_> = result
            .external_dependencies
            .iter()
            .map(|r| r.package_name.as_deref())
            .collect();
        assert_eq!(external, vec![Some("@scope/pkg"), Some("react")]);
    }

    #[test]
    fn test_local_record_fields() {
        let rt = project();
        let analyzer = DependencyAnalyzer::new("/p", &rt);
        let result = analyzer.analyze(Path::new("/p/src/index.js"));

        let button = result
            .local_dependencies
            .iter()
            .find(|r| r.source == "@/components/button")
            .unwrap();
        assert!(button.is_alias);
        assert_eq!(button.resolved_path, "/p/components/button.tsx");
        assert_eq!(button.relative_path.as_deref(), Some("components/button.tsx"));
        assert_eq!(button.path_id.as_ref().map(String::len), Some(8));
        assert_eq!(
            button.local_target(),
            Some(PathBuf::from("/p/components/button.tsx"))
        );

        let react = result
            .external_dependencies
            .iter()
            .find(|r| r.source == "react")
            .unwrap();
        assert_eq!(react.resolved_path, "react");
        assert_eq!(react.exists, None);
        assert!(react.local_target().is_none());
    }

    #[test]
    fn test_stable_ids_survive_reanalysis() {
        let rt = project();
        let analyzer = DependencyAnalyzer::new("/p", &rt);
        let first = analyzer.analyze(Path::new("/p/src/index.js"));
        let second = analyzer.analyze(Path::new("/p/src/index.js"));

        let ids = |r: &FileDependencies| r.records().map(|d| d.stable_id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&first), ids(&second));
        assert_ne!(first.metadata.analysis_id, second.metadata.analysis_id);

        let node_ids = |r: &FileDependencies| r.records().map(|d| d.node_id.clone()).collect::<Vec<_>>();
        assert_ne!(node_ids(&first), node_ids(&second));
    }

    #[test]
    fn test_queries() {
        let rt = project();
        let analyzer = DependencyAnalyzer::new("/p", &rt);
        let result = analyzer.analyze(Path::new("/p/src/index.js"));

        let export_all = result.filter_by_type(DependencyKind::ExportAllFrom);
        assert_eq!(export_all.len(), 1);
        let found = result.find_by_id(&export_all[0].stable_id).unwrap();
        assert_eq!(found.kind, DependencyKind::ExportAllFrom);
        assert!(result.find_by_id("nope").is_none());
    }

    #[test]
    fn test_failures_are_values() {
        let rt = project();
        let analyzer = DependencyAnalyzer::new("/p", &rt);

        let css = analyzer.analyze(Path::new("/p/src/styles.css"));
        assert_eq!(css.metadata.parse_errors, vec!["Unsupported file type: .css"]);

        let missing = analyzer.analyze(Path::new("/p/src/gone.js"));
        assert_eq!(
            missing.metadata.parse_errors,
            vec!["File not found: /p/src/gone.js"]
        );

        let broken = analyzer.analyze(Path::new("/p/src/broken.js"));
        assert!(broken.has_errors());
        assert_eq!(broken.metadata.total_count, 0);
        assert!(broken.records().next().is_none());
    }
}
