//! Left-to-right tree layout of the project structure.
//!
//! Folders open to the right of their parent; children stack vertically,
//! each centered inside the extent its own subtree needs. Every node goes
//! through [`CollisionConfig::find_position`] against everything placed
//! before it, so no two padded boxes ever touch.

use nextmap_graph::StructureNode;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::collision::CollisionConfig;
use crate::geometry::{Position, Rect, Size};
use crate::node_id::{IdRegistry, sanitize};
use crate::nodes::{EdgeKind, LayoutEdge, LayoutNode, NodeData, TreeLayout};

/// Raw path of the root folder before sanitizing.
pub const ROOT_KEY: &str = "root";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TreeLayoutConfig {
    pub folder_size: Size,
    pub file_size: Size,
    pub dependency_size: Size,
    /// Left edge of the root folder.
    pub root_x: f64,
    /// Vertical center of the root folder.
    pub root_center_y: f64,
    /// Horizontal step from a folder to its children.
    pub parent_child_distance: f64,
    /// Extra horizontal shift of file nodes relative to sibling folders.
    pub file_offset: f64,
    /// Horizontal step from a file to its dependencies.
    pub dependency_distance: f64,
    pub folder_spacing: f64,
    pub file_spacing: f64,
    pub dependency_spacing: f64,
    /// Floor for the extent of an expanded folder.
    pub min_tree_height: f64,
    pub collision: CollisionConfig,
}

impl Default for TreeLayoutConfig {
    fn default() -> Self {
        Self {
            folder_size: Size::new(260.0, 80.0),
            file_size: Size::new(260.0, 30.0),
            dependency_size: Size::new(280.0, 40.0),
            root_x: 100.0,
            root_center_y: 0.0,
            parent_child_distance: 600.0,
            file_offset: 0.0,
            dependency_distance: 450.0,
            folder_spacing: 50.0,
            file_spacing: 100.0,
            dependency_spacing: 100.0,
            min_tree_height: 300.0,
            collision: CollisionConfig::default(),
        }
    }
}

/// Ids of the folders whose children are shown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpandedSet(FxHashSet<String>);

impl ExpandedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only the root folder expanded.
    pub fn root() -> Self {
        Self::from_iter([sanitize(ROOT_KEY)])
    }

    /// Every folder of `ids` expanded.
    pub fn all(ids: &NodeIdTree) -> Self {
        Self::from_iter(ids.folder_ids().into_iter().map(str::to_string))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        self.0.insert(id.into())
    }

    /// Flip one folder; returns whether it is now expanded.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.0.remove(id) {
            false
        } else {
            self.0.insert(id.to_string());
            true
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ExpandedSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Node ids mirroring a [`StructureNode`] tree child for child.
///
/// Ids come from the whole tree, not only the visible part, so expanding
/// or collapsing a folder never renames anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeIdTree {
    pub id: String,
    pub is_folder: bool,
    pub children: Vec<NodeIdTree>,
}

impl NodeIdTree {
    pub fn assign(tree: &StructureNode) -> Self {
        let mut registry = IdRegistry::new();
        assign_folder(tree, ROOT_KEY, &mut registry)
    }

    /// Pre-order folder ids.
    pub fn folder_ids(&self) -> Vec<&str> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.is_folder {
                out.push(node.id.as_str());
            }
            stack.extend(node.children.iter().rev());
        }
        out
    }
}

fn assign_folder(node: &StructureNode, raw: &str, registry: &mut IdRegistry) -> NodeIdTree {
    let id = registry.claim(sanitize(raw), raw);
    let mut children = Vec::with_capacity(node.children.len());

    // Children are recorded in the tree's own order so they zip back up.
    let mut file_index = 0;
    for child in &node.children {
        if child.is_folder() {
            children.push(assign_folder(child, &format!("{raw}-{}", child.name), registry));
        } else {
            let raw_file = format!("{raw}/{}", child.name);
            let file_id = registry.claim(format!("{id}-file-{file_index}"), &raw_file);
            file_index += 1;
            children.push(NodeIdTree {
                id: file_id,
                is_folder: false,
                children: Vec::new(),
            });
        }
    }

    NodeIdTree {
        id,
        is_folder: true,
        children,
    }
}

#[derive(Debug, Clone, Default)]
pub struct TreeLayoutEngine {
    config: TreeLayoutConfig,
}

impl TreeLayoutEngine {
    pub fn new(config: TreeLayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TreeLayoutConfig {
        &self.config
    }

    /// Place every visible node of `tree`.
    pub fn layout(&self, tree: &StructureNode, expanded: &ExpandedSet) -> TreeLayout {
        let ids = NodeIdTree::assign(tree);
        self.layout_with_ids(tree, &ids, expanded)
    }

    /// Like [`layout`](Self::layout) with ids computed by the caller.
    pub fn layout_with_ids(
        &self,
        tree: &StructureNode,
        ids: &NodeIdTree,
        expanded: &ExpandedSet,
    ) -> TreeLayout {
        let mut pass = TreePass {
            config: &self.config,
            expanded,
            layout: TreeLayout::default(),
            placed: Vec::new(),
        };
        pass.place_folder(tree, ids, self.config.root_x, self.config.root_center_y, None);
        tracing::debug!(
            "Tree layout: {} nodes, {} edges",
            pass.layout.nodes.len(),
            pass.layout.edges.len()
        );
        pass.layout
    }

    /// Vertical room `node` needs, given which folders are open.
    pub fn tree_extent(&self, node: &StructureNode, ids: &NodeIdTree, expanded: &ExpandedSet) -> f64 {
        tree_extent(&self.config, node, ids, expanded)
    }
}

fn tree_extent(
    config: &TreeLayoutConfig,
    node: &StructureNode,
    ids: &NodeIdTree,
    expanded: &ExpandedSet,
) -> f64 {
    if !expanded.contains(&ids.id) || node.children.is_empty() {
        return config.folder_size.height;
    }

    let mut extent = 0.0_f64;
    for (child, child_ids) in node.children.iter().zip(&ids.children) {
        if child.is_folder() {
            extent += tree_extent(config, child, child_ids, expanded) + config.folder_spacing;
        } else {
            extent += config.file_spacing;
        }
    }
    extent.max(config.min_tree_height)
}

struct TreePass<'a> {
    config: &'a TreeLayoutConfig,
    expanded: &'a ExpandedSet,
    layout: TreeLayout,
    placed: Vec<Rect>,
}

impl TreePass<'_> {
    fn place(&mut self, id: &str, initial: Position, size: Size, data: NodeData) {
        let position = self.config.collision.find_position(initial, size, &self.placed);
        self.placed.push(Rect::new(position, size));
        self.layout.nodes.push(LayoutNode {
            id: id.to_string(),
            position,
            size,
            data,
        });
    }

    fn place_folder(
        &mut self,
        node: &StructureNode,
        ids: &NodeIdTree,
        left_x: f64,
        center_y: f64,
        parent: Option<&str>,
    ) {
        let config = self.config;
        let is_expanded = self.expanded.contains(&ids.id);
        let initial = Position::new(left_x, center_y - config.folder_size.height / 2.0);
        self.place(&ids.id, initial, config.folder_size, NodeData::folder(node, is_expanded));

        if let Some(parent) = parent {
            self.layout.edges.push(
                LayoutEdge::new(parent, &ids.id, EdgeKind::Folder)
                    .app_router(node.is_app_router_scope),
            );
        }
        if !is_expanded || node.children.is_empty() {
            return;
        }

        let child_x = left_x + config.parent_child_distance;
        let total = tree_extent(config, node, ids, self.expanded);
        let mut child_y = center_y - total / 2.0;

        let children = || node.children.iter().zip(&ids.children);
        for (child, child_ids) in children().filter(|(c, _)| c.is_folder()) {
            let extent = tree_extent(config, child, child_ids, self.expanded);
            self.place_folder(
                child,
                child_ids,
                child_x,
                child_y + extent / 2.0,
                Some(ids.id.as_str()),
            );
            child_y += extent + config.folder_spacing;
        }

        for (child, child_ids) in children().filter(|(c, _)| c.is_file()) {
            let file_y = child_y + config.file_spacing / 2.0;
            let initial = Position::new(
                child_x + config.file_offset,
                file_y - config.file_size.height / 2.0,
            );
            self.place(&child_ids.id, initial, config.file_size, NodeData::file(child));
            self.layout.edges.push(
                LayoutEdge::new(&ids.id, &child_ids.id, EdgeKind::File)
                    .app_router(child.is_app_router_scope),
            );
            child_y += config.file_spacing;
        }
    }
}
