//! Property tests for the parser and the graph builder.

use crate::graph::RelationType;
use crate::model::{Field, FieldKind, Model, SchemaDocument};
use crate::{SchemaGraphBuilder, parse_schema};
use proptest::prelude::*;

/// `(from, to, from_is_list, to_is_list)` relations between distinct models.
fn relations_strategy(models: usize) -> impl Strategy<Value = Vec<(usize, usize, bool, bool)>> {
    prop::collection::vec(
        (0..models, 0..models, any::<bool>(), any::<bool>()),
        0..=12,
    )
    .prop_map(|rels| rels.into_iter().filter(|(a, b, _, _)| a != b).collect())
}

fn build_document(models: usize, relations: &[(usize, usize, bool, bool)]) -> SchemaDocument {
    let mut doc = SchemaDocument {
        models: (0..models)
            .map(|i| {
                Model::new(format!("M{i}")).with_field(Field::new("id", "Int", FieldKind::Scalar).id())
            })
            .collect(),
        ..SchemaDocument::default()
    };

    for (k, (a, b, a_list, b_list)) in relations.iter().enumerate() {
        let name = format!("R{k}");
        let mut forward = Field::new(format!("to{k}"), format!("M{b}"), FieldKind::Object)
            .relation_name(name.clone());
        forward.is_list = *a_list;
        let mut back = Field::new(format!("from{k}"), format!("M{a}"), FieldKind::Object)
            .relation_name(name);
        back.is_list = *b_list;
        doc.models[*a].fields.push(forward);
        doc.models[*b].fields.push(back);
    }
    doc
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Property: every bidirectional relation yields exactly one edge whose
    /// cardinality depends only on the list-ness of its two sides.
    #[test]
    fn prop_one_edge_per_relation(
        (models, relations) in (2usize..6).prop_flat_map(|n| (Just(n), relations_strategy(n)))
    ) {
        let doc = build_document(models, &relations);
        let graph = SchemaGraphBuilder::new(&doc).build();
        let edges: Vec<_> = graph.relation_edges().collect();
        prop_assert_eq!(edges.len(), relations.len());

        for (k, (_, _, a_list, b_list)) in relations.iter().enumerate() {
            let expected = RelationType::infer(*a_list, Some(*b_list));
            let edge = edges
                .iter()
                .find(|e| e.id.contains(&format!("-to{k}-")) || e.id.contains(&format!("-from{k}-")));
            prop_assert!(edge.is_some(), "missing edge for R{}", k);
            prop_assert_eq!(edge.and_then(|e| e.relation_type()), Some(expected));
        }
    }

    /// Property: the parser never panics and is deterministic.
    #[test]
    fn prop_parse_is_total(input in "\\PC{0,200}") {
        let first = parse_schema(&input);
        let second = parse_schema(&input);
        prop_assert_eq!(first, second);
    }

    /// Property: generated well-formed models always parse and keep their fields.
    #[test]
    fn prop_generated_models_parse(
        names in prop::collection::btree_set("[A-Z][a-z]{2,8}", 1..5),
        field_count in 1usize..6,
    ) {
        let mut text = String::new();
        for name in &names {
            text.push_str(&format!("model {name} {{\n  id Int @id\n"));
            for i in 0..field_count {
                text.push_str(&format!("  f{i} String? @default(\"x{i}\")\n"));
            }
            text.push_str("}\n\n");
        }

        let doc = parse_schema(&text).unwrap();
        prop_assert_eq!(doc.models.len(), names.len());
        for model in &doc.models {
            prop_assert_eq!(model.fields.len(), field_count + 1);
        }
    }
}
