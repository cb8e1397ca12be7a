//! # nextmap-layout
//!
//! Positions for the two graph views.
//!
//! - [`TreeLayoutEngine`] places the project structure left to right, with
//!   optional dependency nodes fanned out from file nodes. Output is a pure
//!   function of the tree and the [`ExpandedSet`].
//! - [`ForceLayoutEngine`] runs a fixed-budget force simulation over a
//!   schema graph.
//!
//! Both guarantee that no two placed boxes overlap.
//!
//! ```rust
//! use nextmap_layout::ForceLayoutEngine;
//! use nextmap_schema::{parse_schema, SchemaGraphBuilder};
//!
//! let doc = parse_schema("model User {\n  id Int @id\n}\n").unwrap();
//! let graph = SchemaGraphBuilder::new(&doc).build();
//! let layout = ForceLayoutEngine::default().layout(&graph);
//! assert_eq!(layout.nodes.len(), 1);
//! ```

pub mod collision;
mod dependencies;
pub mod force;
pub mod geometry;
pub mod node_id;
pub mod nodes;
pub mod tree;


pub use collision::CollisionConfig;
pub use force::{
    ForceLayoutConfig, ForceLayoutEngine, PositionedSchemaNode, SchemaLayout,
};
pub use geometry::{Position, Rect, Size};
pub use nodes::{EdgeKind, LayoutEdge, LayoutNode, LayoutNodeKind, NodeData, TreeLayout};
pub use tree::{ExpandedSet, NodeIdTree, TreeLayoutConfig, TreeLayoutEngine};
