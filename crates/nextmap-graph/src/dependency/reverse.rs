//! Two-phase reverse dependency computation.
//!
//! Phase 1 ([`ForwardDependencyMap::build`]) analyzes every file and records
//! its forward edges. Phase 2 ([`compute_reverse`]) consumes the finished
//! forward map and inverts local edges into `importedBy` back-references.
//! Phase 2 only accepts a [`ForwardDependencyMap`] by value, so it cannot run
//! against a partial scan.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use rayon::prelude::*;
use serde::Serialize;

use super::{DependencyAnalyzer, DependencyRecord, FileDependencies, Specifier};
use crate::relative_path;

/// Phase 1 output: forward dependencies of every scanned file, keyed and
/// ordered by absolute path.
#[derive(Debug, Clone, Default)]
pub struct ForwardDependencyMap {
    root: PathBuf,
    entries: IndexMap<PathBuf, FileDependencies>,
}

impl ForwardDependencyMap {
    /// Analyze `files` in parallel. Iteration order of the result does not
    /// depend on scheduling.
    pub fn build(analyzer: &DependencyAnalyzer<'_>, files: Vec<PathBuf>) -> Self {
        let analyzed: Vec<(PathBuf, FileDependencies)> = files
            .into_par_iter()
            .map(|file| {
                let deps = analyzer.analyze(&file);
                (file, deps)
            })
            .collect();
        Self::from_entries(analyzer.root(), analyzed)
    }

    pub fn from_entries(
        root: &Path,
        entries: impl IntoIterator<Item = (PathBuf, FileDependencies)>,
    ) -> Self {
        let mut entries: IndexMap<PathBuf, FileDependencies> = entries.into_iter().collect();
        entries.sort_keys();
        Self {
            root: root.to_path_buf(),
            entries,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, file: &Path) -> Option<&FileDependencies> {
        self.entries.get(file)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PathBuf, &FileDependencies)> {
        self.entries.iter()
    }
}

/// A back-reference from an importing file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImporterRef {
    /// Absolute path of the importing file.
    pub source: PathBuf,
    /// Specifier as written in the importer.
    pub name: String,
    pub relative_path: String,
    pub specifiers: Vec<Specifier>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyMapEntry {
    pub id: PathBuf,
    pub relative_path: String,
    pub imports: Vec<DependencyRecord>,
    pub external_imports: Vec<DependencyRecord>,
    pub imported_by: Vec<ImporterRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parse_errors: Vec<String>,
}

/// Phase 2 output: forward edges plus back-references for every file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DependencyMap {
    entries: IndexMap<PathBuf, DependencyMapEntry>,
}

/// Invert the forward map's resolved local edges.
///
/// Targets outside the scanned set get no entry. Back-references appear in
/// importer path order.
pub fn compute_reverse(forward: ForwardDependencyMap) -> DependencyMap {
    let ForwardDependencyMap { root, entries } = forward;

    let mut map: IndexMap<PathBuf, DependencyMapEntry> = entries
        .into_iter()
        .map(|(file, deps)| {
            let entry = DependencyMapEntry {
                relative_path: relative_path(&root, &file),
                id: file.clone(),
                imports: deps.local_dependencies,
                external_imports: deps.external_dependencies,
                imported_by: Vec::new(),
                parse_errors: deps.metadata.parse_errors,
            };
            (file, entry)
        })
        .collect();

    let mut back_refs: Vec<(PathBuf, ImporterRef)> = Vec::new();
    for entry in map.values() {
        for record in &entry.imports {
            let Some(target) = record.local_target() else {
                continue;
            };
            if !map.contains_key(&target) {
                continue;
            }
            back_refs.push((
                target,
                ImporterRef {
                    source: entry.id.clone(),
                    name: record.source.clone(),
                    relative_path: entry.relative_path.clone(),
                    specifiers: record.specifiers.clone(),
                },
            ));
        }
    }

    let edges = back_refs.len();
    for (target, importer) in back_refs {
        if let Some(entry) = map.get_mut(&target) {
            entry.imported_by.push(importer);
        }
    }

    tracing::debug!("Reverse dependencies: {} files, {edges} back-references", map.len());
    DependencyMap { entries: map }
}

impl DependencyMap {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, file: &Path) -> Option<&DependencyMapEntry> {
        self.entries.get(file)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DependencyMapEntry> {
        self.entries.values()
    }

    /// Files importing `file`. Empty when unknown.
    pub fn importers_of(&self, file: &Path) -> &[ImporterRef] {
        self.entries
            .get(file)
            .map(|e| e.imported_by.as_slice())
            .unwrap_or_default()
    }

    /// Forward edges, local and external.
    pub fn edge_count(&self) -> usize {
        self.entries
            .values()
            .map(|e| e.imports.len() + e.external_imports.len())
            .sum()
    }

    pub fn back_reference_count(&self) -> usize {
        self.entries.values().map(|e| e.imported_by.len()).sum()
    }
}
