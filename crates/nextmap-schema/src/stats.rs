//! Whole-schema statistics derived from a document and its graph.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::graph::{RelationType, SchemaGraph, model_node_id};
use crate::model::{Field, FieldKind, SchemaDocument};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaStats {
    pub overview: Overview,
    /// Models ranked by relation count, most connected first.
    pub model_breakdown: Vec<ModelBreakdown>,
    pub relations: RelationStats,
    pub indexes: IndexStats,
    pub enums: EnumStats,
    pub insights: Insights,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub model_count: usize,
    pub enum_count: usize,
    pub total_relations: usize,
    pub total_indexes: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationTypeCounts {
    pub one_to_one: usize,
    pub one_to_many: usize,
    pub many_to_many: usize,
}

impl RelationTypeCounts {
    fn record(&mut self, relation_type: RelationType) {
        match relation_type {
            RelationType::OneToOne => self.one_to_one += 1,
            RelationType::OneToMany => self.one_to_many += 1,
            RelationType::ManyToMany => self.many_to_many += 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelBreakdown {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_name: Option<String>,
    /// Relation fields declared on the model.
    pub relations: usize,
    pub fields: usize,
    pub indexes: usize,
    /// Distinct models referenced by relation fields, sorted.
    pub related_models: Vec<String>,
    pub scalar_fields: usize,
    pub enum_fields: usize,
    pub unique_fields: usize,
    pub required_fields: usize,
    pub fields_with_defaults: usize,
    /// Cardinality of relation edges originating at this model.
    pub relation_types: RelationTypeCounts,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationStats {
    pub total: usize,
    pub one_to_one: usize,
    pub one_to_many: usize,
    pub many_to_many: usize,
    pub enum_references: usize,
    pub average_per_model: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStats {
    pub total: usize,
    pub regular: usize,
    pub unique: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumStats {
    pub total: usize,
    pub total_values: usize,
    /// Enums referenced by at least one model field.
    pub used_in_models: usize,
    pub average_values_per_enum: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    pub most_connected_model: Option<String>,
    pub least_connected_model: Option<String>,
    pub average_relations_per_model: f64,
    pub total_models_with_relations: usize,
}

/// Compute statistics for `doc`, using `graph` for relation cardinalities.
pub fn compute_stats(doc: &SchemaDocument, graph: &SchemaGraph) -> SchemaStats {
    let mut breakdown: Vec<ModelBreakdown> = doc
        .models
        .iter()
        .map(|model| {
            let mut related: Vec<String> = model
                .relation_fields()
                .map(|f| f.field_type.clone())
                .collect::<FxHashSet<_>>()
                .into_iter()
                .collect();
            related.sort();

            let node_id = model_node_id(&model.name);
            let mut relation_types = RelationTypeCounts::default();
            for edge in graph.relation_edges().filter(|e| e.source == node_id) {
                if let Some(relation_type) = edge.relation_type() {
                    relation_types.record(relation_type);
                }
            }

            let count = |pred: &dyn Fn(&Field) -> bool| {
                model.fields.iter().filter(|f| pred(f)).count()
            };

            ModelBreakdown {
                name: model.name.clone(),
                db_name: model.db_name.clone(),
                relations: model.relation_fields().count(),
                fields: model.fields.len(),
                indexes: model.index_count(),
                related_models: related,
                scalar_fields: count(&|f: &Field| f.kind == FieldKind::Scalar),
                enum_fields: count(&|f: &Field| f.kind == FieldKind::Enum),
                unique_fields: count(&|f: &Field| f.is_unique),
                required_fields: count(&|f: &Field| f.is_required),
                fields_with_defaults: count(&|f: &Field| f.has_default_value),
                relation_types,
            }
        })
        .collect();
    // Stable: ties keep declaration order.
    breakdown.sort_by(|a, b| b.relations.cmp(&a.relations));

    let mut totals = RelationTypeCounts::default();
    for edge in graph.relation_edges() {
        if let Some(relation_type) = edge.relation_type() {
            totals.record(relation_type);
        }
    }
    let total_relations = graph.relation_edges().count();
    let model_count = doc.models.len();

    let regular: usize = doc.models.iter().map(|m| m.indexes.len()).sum();
    let unique: usize = doc.models.iter().map(|m| m.unique_indexes.len()).sum();

    let used_enums: FxHashSet<&str> = doc
        .models
        .iter()
        .flat_map(|m| m.fields.iter())
        .filter(|f| f.kind == FieldKind::Enum)
        .map(|f| f.field_type.as_str())
        .collect();
    let total_values: usize = doc.enums.iter().map(|e| e.values.len()).sum();

    let relation_sum: usize = breakdown.iter().map(|m| m.relations).sum();

    SchemaStats {
        overview: Overview {
            model_count,
            enum_count: doc.enums.len(),
            total_relations,
            total_indexes: regular + unique,
        },
        relations: RelationStats {
            total: total_relations,
            one_to_one: totals.one_to_one,
            one_to_many: totals.one_to_many,
            many_to_many: totals.many_to_many,
            enum_references: graph.enum_edges().count(),
            average_per_model: ratio(total_relations, model_count),
        },
        indexes: IndexStats {
            total: regular + unique,
            regular,
            unique,
        },
        enums: EnumStats {
            total: doc.enums.len(),
            total_values,
            used_in_models: doc
                .enums
                .iter()
                .filter(|e| used_enums.contains(e.name.as_str()))
                .count(),
            average_values_per_enum: ratio(total_values, doc.enums.len()),
        },
        insights: Insights {
            most_connected_model: breakdown.first().map(|m| m.name.clone()),
            least_connected_model: breakdown.last().map(|m| m.name.clone()),
            average_relations_per_model: ratio(relation_sum, model_count),
            total_models_with_relations: breakdown.iter().filter(|m| m.relations > 0).count(),
        },
        model_breakdown: breakdown,
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
