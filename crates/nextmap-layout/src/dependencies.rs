//! Dependency nodes fanned out to the right of a file node.

use nextmap_graph::FileDependencies;
use rustc_hash::FxHashMap;

use crate::geometry::{Position, Rect};
use crate::node_id::IdRegistry;
use crate::nodes::{EdgeKind, LayoutEdge, LayoutNode, LayoutNodeKind, NodeData, TreeLayout};
use crate::tree::TreeLayoutEngine;

impl TreeLayoutEngine {
    /// Place one node per dependency of `file`, avoiding everything in
    /// `existing`. Locals come first, then externals.
    pub fn layout_dependencies(
        &self,
        file: &LayoutNode,
        dependencies: &FileDependencies,
        existing: &[Rect],
    ) -> TreeLayout {
        let config = self.config();
        let mut layout = TreeLayout::default();
        let records: Vec<_> = dependencies.records().collect();
        if records.is_empty() {
            return layout;
        }

        let size = config.dependency_size;
        let child_x = file.position.x + config.dependency_distance;
        let mut child_y = file.position.y - records.len() as f64 * config.dependency_spacing / 2.0;
        let mut placed = existing.to_vec();
        let mut ids = IdRegistry::new();

        for (index, record) in records.into_iter().enumerate() {
            let dep_y = child_y + config.dependency_spacing / 2.0;
            let initial = Position::new(child_x, dep_y - size.height / 2.0);
            let position = config.collision.find_position(initial, size, &placed);
            placed.push(Rect::new(position, size));

            let id = ids.claim(
                format!("{}-dep-{}", file.id, record.stable_id),
                &format!("{}/{index}", file.id),
            );
            let kind = if record.is_local {
                EdgeKind::DependencyLocal
            } else {
                EdgeKind::DependencyExternal
            };
            layout.edges.push(LayoutEdge::new(&file.id, &id, kind));
            layout.nodes.push(LayoutNode {
                id,
                position,
                size,
                data: NodeData::Dependency {
                    parent: file.id.clone(),
                    dependency: record.clone(),
                },
            });
            child_y += config.dependency_spacing;
        }

        layout
    }

    /// Add dependency sub-layouts for every visible file node that has an
    /// entry in `dependencies`, keyed by file node id.
    ///
    /// Files are visited in layout order and each pass sees every node
    /// placed so far, structural and dependency alike.
    pub fn with_dependencies(
        &self,
        mut layout: TreeLayout,
        dependencies: &FxHashMap<String, FileDependencies>,
    ) -> TreeLayout {
        let files: Vec<LayoutNode> = layout
            .nodes
            .iter()
            .filter(|n| n.kind() == LayoutNodeKind::File && dependencies.contains_key(&n.id))
            .cloned()
            .collect();

        let mut placed = layout.rects();
        for file in &files {
            let Some(deps) = dependencies.get(&file.id) else {
                continue;
            };
            let sub = self.layout_dependencies(file, deps, &placed);
            placed.extend(sub.nodes.iter().map(LayoutNode::rect));
            layout.merge(sub);
        }
        layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::ExpandedSet;
    use nextmap_graph::runtime::test_utils::MemoryRuntime;
    use nextmap_graph::{DependencyAnalyzer, ProjectWalker, WalkerConfig};
    use std::path::Path;

    #[test]
    fn test_dependencies_clear_the_tree() {
        let rt = MemoryRuntime::new(&[
            (
                "/p/app/page.js",
                "import React from 'react';\nimport { a } from '../lib/a';\nimport { b } from '../lib/b';",
            ),
            ("/p/app/layout.js", "import './globals.css';"),
            ("/p/lib/a.js", "export const a = 1;"),
            ("/p/lib/b.js", "export const b = 2;"),
        ]);
        let walker = ProjectWalker::new(Path::new("/p"), WalkerConfig::default(), &rt).unwrap();
        let tree = walker.walk();
        let analyzer = DependencyAnalyzer::new("/p", &rt);

        let engine = TreeLayoutEngine::default();
        let expanded = ExpandedSet::from_iter(["root", "root-app", "root-lib"]);
        let layout = engine.layout(&tree, &expanded);

        let mut deps = FxHashMap::default();
        for node in &layout.nodes {
            if let NodeData::File { full_path, .. } = &node.data {
                deps.insert(node.id.clone(), analyzer.analyze(Path::new(full_path)));
            }
        }
        let structural = layout.nodes.len();
        let full = engine.with_dependencies(layout, &deps);

        let dep_nodes: Vec<_> = full
            .nodes
            .iter()
            .filter(|n| n.kind() == LayoutNodeKind::Dependency)
            .collect();
        // page.js: two locals and react; layout.js: the stylesheet.
        assert_eq!(dep_nodes.len(), 4);
        assert_eq!(full.nodes.len(), structural + 4);

        let external = full
            .edges
            .iter()
            .find(|e| e.kind == EdgeKind::DependencyExternal)
            .unwrap();
        assert!(external.dashed);

        let padding = engine.config().collision.padding;
        let rects = full.rects();
        for (i, a) in rects.iter().enumerate() {
            for b in &rects[i + 1..] {
                assert!(!a.collides_padded(b, padding));
            }
        }
    }

    #[test]
    fn test_no_dependencies_no_nodes() {
        let rt = MemoryRuntime::new(&[("/p/app/page.js", "export default 1;")]);
        let analyzer = DependencyAnalyzer::new("/p", &rt);
        let deps = analyzer.analyze(Path::new("/p/app/page.js"));

        let file = LayoutNode {
            id: "root-app-file-0".to_string(),
            position: Position::new(700.0, 0.0),
            size: crate::geometry::Size::new(260.0, 30.0),
            data: NodeData::File {
                name: "page.js".to_string(),
                relative_path: "app/page.js".to_string(),
                full_path: "/p/app/page.js".to_string(),
                is_app_router_scope: true,
                route_path: Some("/".to_string()),
                file_analysis: None,
            },
        };
        let layout = TreeLayoutEngine::default().layout_dependencies(&file, &deps, &[]);
        assert!(layout.nodes.is_empty());
    }
}
