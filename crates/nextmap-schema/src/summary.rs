//! Compact per-file summary used by project-level schema detection.

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::graph::{RelationType, SchemaGraphBuilder};
use crate::model::SchemaDocument;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaSummary {
    pub model_count: usize,
    pub enum_count: usize,
    pub view_count: usize,
    pub type_count: usize,
    pub fields: FieldCounts,
    /// Base type name → number of fields, most common first.
    pub field_types: IndexMap<String, usize>,
    pub relationships: RelationshipCounts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datasource_provider: Option<String>,
    pub generators: Vec<String>,
    pub constraints: ConstraintCounts,
    pub models: Vec<String>,
    pub enums: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldCounts {
    pub total: usize,
    pub required: usize,
    pub optional: usize,
    pub unique: usize,
    /// Fields covered by at least one `@@index`.
    pub indexed: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipCounts {
    pub total: usize,
    pub one_to_one: usize,
    pub one_to_many: usize,
    pub many_to_many: usize,
    pub self_relations: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintCounts {
    /// Models with an `@id` field or an `@@id` block.
    pub primary_keys: usize,
    /// `@unique` fields plus `@@unique` blocks.
    pub unique_constraints: usize,
    pub indexes: usize,
}

pub fn summarize(doc: &SchemaDocument) -> SchemaSummary {
    let mut summary = SchemaSummary {
        model_count: doc.tables().count(),
        view_count: doc.views().count(),
        enum_count: doc.enums.len(),
        type_count: doc.types.len(),
        datasource_provider: doc.datasource_provider.clone(),
        generators: doc.generators.clone(),
        models: doc.models.iter().map(|m| m.name.clone()).collect(),
        enums: doc.enums.iter().map(|e| e.name.clone()).collect(),
        ..SchemaSummary::default()
    };

    let mut histogram: IndexMap<String, usize> = IndexMap::new();
    let all_fields = doc
        .models
        .iter()
        .flat_map(|m| m.fields.iter())
        .chain(doc.types.iter().flat_map(|t| t.fields.iter()));
    for field in all_fields {
        summary.fields.total += 1;
        if field.is_required {
            summary.fields.required += 1;
        } else {
            summary.fields.optional += 1;
        }
        if field.is_unique {
            summary.fields.unique += 1;
        }
        let base = field.field_type.split('(').next().unwrap_or(&field.field_type);
        *histogram.entry(base.to_string()).or_default() += 1;
    }
    histogram.sort_by(|ka, va, kb, vb| vb.cmp(va).then_with(|| ka.cmp(kb)));
    summary.field_types = histogram;

    for model in &doc.models {
        let indexed: FxHashSet<&str> = model
            .indexes
            .iter()
            .flat_map(|i| i.fields.iter().map(String::as_str))
            .collect();
        summary.fields.indexed += indexed.len();

        if model.primary_key.is_some() || model.fields.iter().any(|f| f.is_id) {
            summary.constraints.primary_keys += 1;
        }
        summary.constraints.unique_constraints +=
            model.fields.iter().filter(|f| f.is_unique).count() + model.unique_indexes.len();
        summary.constraints.indexes += model.indexes.len();
    }

    let graph = SchemaGraphBuilder::new(doc).build();
    for edge in graph.relation_edges() {
        summary.relationships.total += 1;
        match edge.relation_type() {
            Some(RelationType::OneToOne) => summary.relationships.one_to_one += 1,
            Some(RelationType::OneToMany) => summary.relationships.one_to_many += 1,
            Some(RelationType::ManyToMany) => summary.relationships.many_to_many += 1,
            None => {}
        }
        if edge.source == edge.target {
            summary.relationships.self_relations += 1;
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_schema;

    #[test]
    fn test_summary_counts() {
        let doc = parse_schema(
            r#"
datasource db {
  provider = "sqlite"
  url      = "file:dev.db"
}

generator client {
  provider = "prisma-client-js"
}

model Category {
  id       Int        @id
  name     String     @unique
  parentId Int?
  parent   Category?  @relation("Tree", fields: [parentId], references: [id])
  children Category[] @relation("Tree")

  @@index([parentId])
}

model Item {
  id         Int      @id
  title      String
  categoryId Int
  category   Category @relation(fields: [categoryId], references: [id])
}

view ItemView {
  id    Int    @unique
  title String
}

enum Status {
  ACTIVE
}
"#,
        )
        .unwrap();

        let summary = summarize(&doc);
        assert_eq!(summary.model_count, 2);
        assert_eq!(summary.view_count, 1);
        assert_eq!(summary.enum_count, 1);
        assert_eq!(summary.datasource_provider.as_deref(), Some("sqlite"));
        assert_eq!(summary.generators, vec!["prisma-client-js"]);

        assert_eq!(summary.fields.total, 11);
        assert_eq!(summary.fields.optional, 2);
        assert_eq!(summary.fields.indexed, 1);
        assert_eq!(summary.field_types.get_index(0), Some((&"Int".to_string(), &5)));

        // Item.category has no back-relation, so it falls back to one-to-one.
        assert_eq!(summary.relationships.self_relations, 1);
        assert_eq!(summary.relationships.one_to_many, 1);
        assert_eq!(summary.relationships.one_to_one, 1);

        assert_eq!(summary.constraints.primary_keys, 2);
        assert_eq!(summary.constraints.unique_constraints, 2);
        assert_eq!(summary.constraints.indexes, 1);
        assert_eq!(summary.models, vec!["Category", "Item", "ItemView"]);
    }
}
