//! # nextmap-schema
//!
//! Prisma schema parsing and schema-graph construction.
//!
//! The crate has three layers:
//!
//! ```text
//!   schema.prisma text
//!          │
//!          ▼
//!   ┌──────────────┐   parse_schema()
//!   │   parser     │   winnow-based SDL parser, resolves field kinds
//!   └──────┬───────┘   and implicit relation names
//!          ▼
//!   ┌──────────────┐
//!   │   model      │   SchemaDocument { models, enums, types, ... }
//!   └──────┬───────┘
//!          ├───────────────────────┐
//!          ▼                       ▼
//!   ┌──────────────┐        ┌──────────────┐
//!   │   graph      │        │   summary    │  per-file statistics for
//!   │   + stats    │        │              │  project-level detection
//!   └──────────────┘        └──────────────┘
//! ```
//!
//! ## Quick start
//!
//! ```rust
//! use nextmap_schema::{parse_schema, RelationType, SchemaGraphBuilder};
//!
//! let doc = parse_schema(r#"
//!     model User {
//!       id    Int    @id @default(autoincrement())
//!       posts Post[]
//!     }
//!
//!     model Post {
//!       id       Int  @id
//!       authorId Int
//!       author   User @relation(fields: [authorId], references: [id])
//!     }
//! "#).unwrap();
//!
//! let graph = SchemaGraphBuilder::new(&doc).build();
//! let relations: Vec<_> = graph.relation_edges().collect();
//! assert_eq!(relations.len(), 1);
//! assert_eq!(relations[0].relation_type(), Some(RelationType::OneToMany));
//! ```

pub mod graph;
pub mod model;
pub mod parser;
pub mod stats;
pub mod summary;

#[cfg(test)]
mod tests;

pub use graph::{
    EdgeData, FieldRow, ModelConstraint, NodeStats, RelationEdgeData, RelationType, SchemaEdge,
    SchemaGraph, SchemaGraphBuilder, SchemaNode, SchemaNodeKind,
};
pub use model::{
    BlockIndex, CompositeType, DefaultValue, Enum, EnumValue, Field, FieldKind, Model,
    SchemaDocument,
};
pub use parser::parse_schema;
pub use stats::{SchemaStats, compute_stats};
pub use summary::{SchemaSummary, summarize};

use thiserror::Error;

/// Errors produced while reading schema text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The text does not follow the schema grammar.
    #[error("Schema syntax error on line {line}: {message}")]
    Syntax { line: usize, message: String },

    /// A block was opened but never closed.
    #[error("Unterminated block '{name}' starting on line {line}")]
    UnterminatedBlock { name: String, line: usize },

    /// Two top-level blocks share the same name.
    #[error("Duplicate {kind} '{name}' on line {line}")]
    Duplicate {
        kind: &'static str,
        name: String,
        line: usize,
    },
}

/// Result alias for schema operations.
pub type Result<T> = std::result::Result<T, Error>;
