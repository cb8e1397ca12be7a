//! Positioned nodes and edges handed to the rendering layer.

use nextmap_graph::{
    DependencyRecord, FileAnalysis, RoutingClassification, SpecialFiles, StructureNode,
};
use serde::Serialize;

use crate::geometry::{Position, Rect, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutNodeKind {
    Folder,
    File,
    Dependency,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum NodeData {
    Folder {
        name: String,
        relative_path: String,
        is_app_router_scope: bool,
        is_expanded: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        routing_analysis: Option<RoutingClassification>,
        #[serde(skip_serializing_if = "Option::is_none")]
        route_path: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        special_files: Option<SpecialFiles>,
        file_count: usize,
        folder_count: usize,
    },
    File {
        name: String,
        relative_path: String,
        full_path: String,
        is_app_router_scope: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        route_path: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        file_analysis: Option<FileAnalysis>,
    },
    Dependency {
        /// Id of the file node the dependency hangs off.
        parent: String,
        dependency: DependencyRecord,
    },
}

impl NodeData {
    pub fn folder(node: &StructureNode, is_expanded: bool) -> Self {
        NodeData::Folder {
            name: node.name.clone(),
            relative_path: node.relative_path.clone(),
            is_app_router_scope: node.is_app_router_scope,
            is_expanded,
            routing_analysis: node.routing_analysis.clone(),
            route_path: node.route_path.clone(),
            special_files: node.special_files,
            file_count: node.files().count(),
            folder_count: node.folders().count(),
        }
    }

    pub fn file(node: &StructureNode) -> Self {
        NodeData::File {
            name: node.name.clone(),
            relative_path: node.relative_path.clone(),
            full_path: node.full_path.display().to_string(),
            is_app_router_scope: node.is_app_router_scope,
            route_path: node.route_path.clone(),
            file_analysis: node.file_analysis.clone(),
        }
    }

    pub fn kind(&self) -> LayoutNodeKind {
        match self {
            NodeData::Folder { .. } => LayoutNodeKind::Folder,
            NodeData::File { .. } => LayoutNodeKind::File,
            NodeData::Dependency { .. } => LayoutNodeKind::Dependency,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutNode {
    pub id: String,
    pub position: Position,
    #[serde(flatten)]
    pub size: Size,
    pub data: NodeData,
}

impl LayoutNode {
    pub fn kind(&self) -> LayoutNodeKind {
        self.data.kind()
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.position, self.size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeKind {
    /// Parent folder to child folder.
    Folder,
    /// Folder to one of its files.
    File,
    DependencyLocal,
    DependencyExternal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
    /// Set when the child lies inside the App Router root.
    pub is_app_router: bool,
    pub dashed: bool,
}

impl LayoutEdge {
    pub fn new(source: &str, target: &str, kind: EdgeKind) -> Self {
        Self {
            id: format!("edge-{source}-{target}"),
            source: source.to_string(),
            target: target.to_string(),
            kind,
            is_app_router: false,
            dashed: kind == EdgeKind::DependencyExternal,
        }
    }

    pub fn app_router(mut self, is_app_router: bool) -> Self {
        self.is_app_router = is_app_router;
        self
    }
}

/// Output of a layout pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TreeLayout {
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
}

impl TreeLayout {
    pub fn node(&self, id: &str) -> Option<&LayoutNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn rects(&self) -> Vec<Rect> {
        self.nodes.iter().map(LayoutNode::rect).collect()
    }

    /// Append another pass's output.
    pub fn merge(&mut self, other: TreeLayout) {
        self.nodes.extend(other.nodes);
        self.edges.extend(other.edges);
    }
}
