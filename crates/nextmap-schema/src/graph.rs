//! Schema → graph transformation.
//!
//! Every model (and view) becomes a node with one display row per field;
//! every enum becomes a node with one row per value. Relations are emitted
//! once per unique relation, keyed by relation name, with cardinality read
//! from both sides of the relation when the reciprocal field exists.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::model::{Enum, Field, FieldKind, Model, SchemaDocument};

/// Cardinality of a relation edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationType {
    OneToOne,
    OneToMany,
    ManyToMany,
}

impl RelationType {
    /// Infer cardinality from the list-ness of both sides.
    ///
    /// With no reciprocal field, the declaring side alone decides: a list is
    /// one-to-many, anything else one-to-one.
    pub fn infer(declaring_is_list: bool, reciprocal_is_list: Option<bool>) -> Self {
        match (declaring_is_list, reciprocal_is_list) {
            (true, Some(true)) => RelationType::ManyToMany,
            (true, Some(false)) | (false, Some(true)) => RelationType::OneToMany,
            (false, Some(false)) => RelationType::OneToOne,
            (true, None) => RelationType::OneToMany,
            (false, None) => RelationType::OneToOne,
        }
    }

    /// Short edge label: `1:1`, `1:N`, `N:N`.
    pub fn label(&self) -> &'static str {
        match self {
            RelationType::OneToOne => "1:1",
            RelationType::OneToMany => "1:N",
            RelationType::ManyToMany => "N:N",
        }
    }
}

impl std::fmt::Display for RelationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RelationType::OneToOne => "one-to-one",
            RelationType::OneToMany => "one-to-many",
            RelationType::ManyToMany => "many-to-many",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaNodeKind {
    Model,
    Enum,
}

/// One display row of a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRow {
    pub id: String,
    pub title: String,
    /// Formatted type, e.g. `Post[]` or `String?`.
    #[serde(rename = "type")]
    pub field_type: String,
    pub constraints: Vec<String>,
    pub is_id: bool,
    pub is_unique: bool,
    pub is_required: bool,
    pub is_relation: bool,
    pub is_enum: bool,
    pub is_list: bool,
    pub has_default: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relation_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_name: Option<String>,
}

/// Model-level constraint from a block attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ModelConstraint {
    CompositePrimaryKey {
        fields: Vec<String>,
    },
    Unique {
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        fields: Vec<String>,
    },
    Index {
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        fields: Vec<String>,
    },
}

impl ModelConstraint {
    pub fn fields(&self) -> &[String] {
        match self {
            ModelConstraint::CompositePrimaryKey { fields }
            | ModelConstraint::Unique { fields, .. }
            | ModelConstraint::Index { fields, .. } => fields,
        }
    }
}

impl std::fmt::Display for ModelConstraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelConstraint::CompositePrimaryKey { fields } => {
                write!(f, "PRIMARY KEY ({})", fields.join(", "))
            }
            ModelConstraint::Unique { fields, .. } => write!(f, "UNIQUE ({})", fields.join(", ")),
            ModelConstraint::Index { fields, .. } => write!(f, "INDEX ({})", fields.join(", ")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStats {
    pub total_fields: usize,
    pub relations: usize,
    pub indexes: usize,
    pub constraints: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaNode {
    /// `model-<Name>` or `enum-<Name>`.
    pub id: String,
    pub kind: SchemaNodeKind,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_name: Option<String>,
    pub fields: Vec<FieldRow>,
    pub constraints: Vec<ModelConstraint>,
    pub stats: NodeStats,
}

impl SchemaNode {
    /// Rows counted toward the rendered height.
    pub fn row_count(&self) -> usize {
        self.fields.len()
    }

    /// Unique model constraints (the `@@unique` blocks).
    pub fn unique_constraint_count(&self) -> usize {
        self.constraints
            .iter()
            .filter(|c| matches!(c, ModelConstraint::Unique { .. }))
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationEdgeData {
    pub relation_type: RelationType,
    pub relation_name: String,
    pub foreign_key_fields: Vec<String>,
    pub referenced_fields: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_delete: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_update: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "kebab-case")]
pub enum EdgeData {
    Relation(RelationEdgeData),
    EnumReference { field: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub source_handle: String,
    pub target_handle: String,
    pub label: String,
    pub data: EdgeData,
}

impl SchemaEdge {
    pub fn is_relation(&self) -> bool {
        matches!(self.data, EdgeData::Relation(_))
    }

    pub fn relation_type(&self) -> Option<RelationType> {
        match &self.data {
            EdgeData::Relation(data) => Some(data.relation_type),
            EdgeData::EnumReference { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaGraph {
    pub nodes: Vec<SchemaNode>,
    pub edges: Vec<SchemaEdge>,
}

impl SchemaGraph {
    pub fn node(&self, id: &str) -> Option<&SchemaNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn relation_edges(&self) -> impl Iterator<Item = &SchemaEdge> {
        self.edges.iter().filter(|e| e.is_relation())
    }

    pub fn enum_edges(&self) -> impl Iterator<Item = &SchemaEdge> {
        self.edges.iter().filter(|e| !e.is_relation())
    }
}

pub fn model_node_id(name: &str) -> String {
    format!("model-{name}")
}

pub fn enum_node_id(name: &str) -> String {
    format!("enum-{name}")
}

/// Builds a [`SchemaGraph`] from a parsed document.
pub struct SchemaGraphBuilder<'a> {
    doc: &'a SchemaDocument,
}

impl<'a> SchemaGraphBuilder<'a> {
    pub fn new(doc: &'a SchemaDocument) -> Self {
        Self { doc }
    }

    pub fn build(&self) -> SchemaGraph {
        let mut graph = SchemaGraph::default();

        for model in &self.doc.models {
            graph.nodes.push(self.model_node(model));
        }
        for def in &self.doc.enums {
            graph.nodes.push(enum_node(def));
        }

        let mut processed: FxHashSet<String> = FxHashSet::default();
        for model in &self.doc.models {
            for field in &model.fields {
                match field.kind {
                    FieldKind::Object => {
                        let key = relation_key(model, field);
                        if !processed.insert(key) {
                            continue;
                        }
                        if let Some(edge) = self.relation_edge(model, field) {
                            graph.edges.push(edge);
                        }
                    }
                    FieldKind::Enum => {
                        if self.doc.enum_def(&field.field_type).is_some() {
                            graph.edges.push(enum_edge(model, field));
                        }
                    }
                    FieldKind::Scalar => {}
                }
            }
        }

        tracing::debug!(
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            "Built schema graph"
        );
        graph
    }

    fn model_node(&self, model: &Model) -> SchemaNode {
        let fields: Vec<FieldRow> = model
            .fields
            .iter()
            .map(|field| self.field_row(model, field))
            .collect();

        let mut constraints = Vec::new();
        if let Some(pk) = model.primary_key.as_ref().filter(|pk| pk.fields.len() > 1) {
            constraints.push(ModelConstraint::CompositePrimaryKey {
                fields: pk.fields.clone(),
            });
        }
        constraints.extend(model.unique_indexes.iter().map(|u| ModelConstraint::Unique {
            name: u.name.clone(),
            fields: u.fields.clone(),
        }));
        constraints.extend(model.indexes.iter().map(|i| ModelConstraint::Index {
            name: i.name.clone(),
            fields: i.fields.clone(),
        }));

        let stats = NodeStats {
            total_fields: model.fields.len(),
            relations: model.relation_fields().count(),
            indexes: model.index_count(),
            constraints: constraints.len(),
        };

        SchemaNode {
            id: model_node_id(&model.name),
            kind: SchemaNodeKind::Model,
            name: model.name.clone(),
            db_name: model.db_name.clone(),
            fields,
            constraints,
            stats,
        }
    }

    fn field_row(&self, model: &Model, field: &Field) -> FieldRow {
        let mut constraints = Vec::new();
        if field.is_id {
            constraints.push("PRIMARY KEY".to_string());
        }
        if field.is_unique {
            constraints.push("UNIQUE".to_string());
        }
        if field.is_required && field.kind == FieldKind::Scalar {
            constraints.push("NOT NULL".to_string());
        }
        if let Some(default) = &field.default {
            constraints.push(format!("DEFAULT {default}"));
        }
        if !field.relation_from_fields.is_empty() {
            let referenced = if field.relation_to_fields.is_empty() {
                self.primary_key_of(&field.field_type).to_string()
            } else {
                field.relation_to_fields.join(", ")
            };
            constraints.push(format!(
                "FK ({}) → {}({})",
                field.relation_from_fields.join(", "),
                field.field_type,
                referenced
            ));
        }
        if field.is_updated_at {
            constraints.push("AUTO UPDATE".to_string());
        }

        FieldRow {
            id: format!("{}.{}", model.name, field.name),
            title: field.name.clone(),
            field_type: format_type(field),
            constraints,
            is_id: field.is_id,
            is_unique: field.is_unique,
            is_required: field.is_required,
            is_relation: field.kind == FieldKind::Object,
            is_enum: field.kind == FieldKind::Enum,
            is_list: field.is_list,
            has_default: field.has_default_value,
            default_value: field.default.as_ref().map(ToString::to_string),
            relation_name: field.relation_name.clone(),
            db_name: field.db_name.clone(),
        }
    }

    fn relation_edge(&self, model: &Model, field: &Field) -> Option<SchemaEdge> {
        let target = self.doc.model(&field.field_type)?;
        let reciprocal = reciprocal_field(model, field, target);
        let relation_type = RelationType::infer(field.is_list, reciprocal.map(|r| r.is_list));
        let relation_name = field
            .relation_name
            .clone()
            .unwrap_or_else(|| crate::parser::implicit_relation_name(&model.name, &target.name));

        // The foreign key may be declared on either side.
        let fk_side = if field.relation_from_fields.is_empty() {
            reciprocal.filter(|r| !r.relation_from_fields.is_empty())
        } else {
            Some(field)
        };
        let (foreign_key_fields, referenced_fields, on_delete, on_update) = match fk_side {
            Some(side) => (
                side.relation_from_fields.clone(),
                side.relation_to_fields.clone(),
                side.relation_on_delete.clone(),
                side.relation_on_update.clone(),
            ),
            None => (Vec::new(), Vec::new(), None, None),
        };

        let mut label_parts = vec![relation_type.label().to_string(), relation_name.clone()];
        if !foreign_key_fields.is_empty() {
            let referenced = if referenced_fields.is_empty() {
                "id".to_string()
            } else {
                referenced_fields.join(",")
            };
            label_parts.push(format!("{} → {}", foreign_key_fields.join(","), referenced));
        }

        Some(SchemaEdge {
            id: format!("relation-{}-{}-{}", model.name, field.name, target.name),
            source: model_node_id(&model.name),
            target: model_node_id(&target.name),
            source_handle: format!("{}.{}-source", model.name, field.name),
            target_handle: format!(
                "{}.{}-target",
                target.name,
                self.primary_key_of(&target.name)
            ),
            label: label_parts.join(" | "),
            data: EdgeData::Relation(RelationEdgeData {
                relation_type,
                relation_name,
                foreign_key_fields,
                referenced_fields,
                on_delete,
                on_update,
            }),
        })
    }

    /// First `@id` field of a model, or `id`.
    fn primary_key_of(&self, model_name: &str) -> &str {
        self.doc
            .model(model_name)
            .and_then(|m| m.fields.iter().find(|f| f.is_id))
            .map(|f| f.name.as_str())
            .unwrap_or("id")
    }
}

fn relation_key(model: &Model, field: &Field) -> String {
    match &field.relation_name {
        Some(name) => name.clone(),
        None => {
            let mut pair = [model.name.as_str(), field.field_type.as_str()];
            pair.sort_unstable();
            pair.join("-")
        }
    }
}

/// The field on `target` that closes the relation declared by `field`.
fn reciprocal_field<'m>(model: &Model, field: &Field, target: &'m Model) -> Option<&'m Field> {
    target.fields.iter().find(|candidate| {
        candidate.kind == FieldKind::Object
            && candidate.field_type == model.name
            && candidate.relation_name == field.relation_name
            && !(target.name == model.name && candidate.name == field.name)
    })
}

fn enum_node(def: &Enum) -> SchemaNode {
    let mut fields = Vec::with_capacity(def.values.len() + 1);
    fields.push(FieldRow {
        id: format!("{}.{}", def.name, def.name),
        title: def.name.clone(),
        field_type: "enum".to_string(),
        constraints: Vec::new(),
        is_id: false,
        is_unique: false,
        is_required: false,
        is_relation: false,
        is_enum: true,
        is_list: false,
        has_default: false,
        default_value: None,
        relation_name: None,
        db_name: def.db_name.clone(),
    });
    fields.extend(def.values.iter().map(|value| FieldRow {
        id: format!("{}.{}", def.name, value.name),
        title: value.name.clone(),
        field_type: "value".to_string(),
        constraints: value
            .db_name
            .iter()
            .map(|db| format!("MAP \"{db}\""))
            .collect(),
        is_id: false,
        is_unique: false,
        is_required: false,
        is_relation: false,
        is_enum: true,
        is_list: false,
        has_default: false,
        default_value: None,
        relation_name: None,
        db_name: value.db_name.clone(),
    }));

    SchemaNode {
        id: enum_node_id(&def.name),
        kind: SchemaNodeKind::Enum,
        name: def.name.clone(),
        db_name: def.db_name.clone(),
        fields,
        constraints: Vec::new(),
        stats: NodeStats {
            total_fields: def.values.len(),
            ..NodeStats::default()
        },
    }
}

fn enum_edge(model: &Model, field: &Field) -> SchemaEdge {
    SchemaEdge {
        id: format!("enum-ref-{}-{}-{}", model.name, field.name, field.field_type),
        source: model_node_id(&model.name),
        target: enum_node_id(&field.field_type),
        source_handle: format!("{}.{}-source", model.name, field.name),
        target_handle: format!("{}.{}-target", field.field_type, field.field_type),
        label: "uses".to_string(),
        data: EdgeData::EnumReference {
            field: field.name.clone(),
        },
    }
}

fn format_type(field: &Field) -> String {
    if field.is_list {
        format!("{}[]", field.field_type)
    } else if !field.is_required {
        format!("{}?", field.field_type)
    } else {
        field.field_type.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BlockIndex, DefaultValue};
    use crate::parse_schema;

    fn blog() -> SchemaDocument {
        parse_schema(
            r#"
model User {
  id      Int      @id @default(autoincrement())
  email   String   @unique
  role    Role     @default(USER)
  posts   Post[]
  profile Profile?
}

model Profile {
  id     Int  @id
  userId Int  @unique
  user   User @relation(fields: [userId], references: [id], onDelete: Cascade)
}

model Post {
  id         Int        @id
  authorId   Int
  author     User       @relation(fields: [authorId], references: [id])
  categories Category[]
}

model Category {
  id    Int    @id
  posts Post[]
}

enum Role {
  USER
  ADMIN
}
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_one_node_per_model_and_enum() {
        let graph = SchemaGraphBuilder::new(&blog()).build();
        let ids: Vec<_> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "model-User",
                "model-Profile",
                "model-Post",
                "model-Category",
                "enum-Role"
            ]
        );
    }

    #[test]
    fn test_bidirectional_relation_produces_one_edge() {
        let graph = SchemaGraphBuilder::new(&blog()).build();
        let user_post: Vec<_> = graph
            .relation_edges()
            .filter(|e| {
                let pair = [e.source.as_str(), e.target.as_str()];
                pair.contains(&"model-User") && pair.contains(&"model-Post")
            })
            .collect();
        assert_eq!(user_post.len(), 1);
        assert_eq!(user_post[0].relation_type(), Some(RelationType::OneToMany));
        assert_eq!(graph.relation_edges().count(), 3);
    }

    #[test]
    fn test_cardinalities() {
        let graph = SchemaGraphBuilder::new(&blog()).build();
        let by_id = |id: &str| {
            graph
                .edges
                .iter()
                .find(|e| e.id == id)
                .and_then(|e| e.relation_type())
        };
        assert_eq!(
            by_id("relation-User-profile-Profile"),
            Some(RelationType::OneToOne)
        );
        assert_eq!(
            by_id("relation-Post-categories-Category"),
            Some(RelationType::ManyToMany)
        );
    }

    #[test]
    fn test_foreign_key_from_reciprocal_side() {
        let graph = SchemaGraphBuilder::new(&blog()).build();
        let edge = graph
            .edges
            .iter()
            .find(|e| e.id == "relation-User-posts-Post")
            .unwrap();
        let EdgeData::Relation(data) = &edge.data else {
            panic!("expected relation data");
        };
        assert_eq!(data.foreign_key_fields, vec!["authorId"]);
        assert_eq!(data.referenced_fields, vec!["id"]);
        assert_eq!(edge.label, "1:N | PostToUser | authorId → id");
        assert_eq!(edge.source_handle, "User.posts-source");
        assert_eq!(edge.target_handle, "Post.id-target");
    }

    #[test]
    fn test_enum_reference_edges() {
        let graph = SchemaGraphBuilder::new(&blog()).build();
        let enum_edges: Vec<_> = graph.enum_edges().collect();
        assert_eq!(enum_edges.len(), 1);
        assert_eq!(enum_edges[0].id, "enum-ref-User-role-Role");
        assert_eq!(enum_edges[0].source, "model-User");
        assert_eq!(enum_edges[0].target, "enum-Role");
    }

    #[test]
    fn test_missing_reciprocal_falls_back_to_declaring_side() {
        let doc = SchemaDocument {
            models: vec![
                Model::new("Team").with_field(
                    Field::new("members", "Member", FieldKind::Object)
                        .list()
                        .relation_name("TeamMembers"),
                ),
                Model::new("Member").with_field(Field::new("id", "Int", FieldKind::Scalar).id()),
            ],
            ..SchemaDocument::default()
        };
        let graph = SchemaGraphBuilder::new(&doc).build();
        let edge = graph.relation_edges().next().unwrap();
        assert_eq!(edge.relation_type(), Some(RelationType::OneToMany));
    }

    #[test]
    fn test_self_relation_uses_other_field_as_reciprocal() {
        let doc = parse_schema(
            r#"
model Employee {
  id        Int        @id
  managerId Int?
  manager   Employee?  @relation("Reports", fields: [managerId], references: [id])
  reports   Employee[] @relation("Reports")
}
"#,
        )
        .unwrap();
        let graph = SchemaGraphBuilder::new(&doc).build();
        let edges: Vec<_> = graph.relation_edges().collect();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].relation_type(), Some(RelationType::OneToMany));
        assert_eq!(edges[0].source, edges[0].target);
    }

    #[test]
    fn test_field_rows_and_constraints() {
        let graph = SchemaGraphBuilder::new(&blog()).build();
        let user = graph.node("model-User").unwrap();
        let id = &user.fields[0];
        assert_eq!(
            id.constraints,
            vec!["PRIMARY KEY", "NOT NULL", "DEFAULT autoincrement()"]
        );
        let profile = user.fields.iter().find(|f| f.title == "profile").unwrap();
        assert_eq!(profile.field_type, "Profile?");
        assert!(profile.is_relation);
        let posts = user.fields.iter().find(|f| f.title == "posts").unwrap();
        assert_eq!(posts.field_type, "Post[]");

        let post = graph.node("model-Post").unwrap();
        let author = post.fields.iter().find(|f| f.title == "author").unwrap();
        assert_eq!(author.constraints, vec!["FK (authorId) → User(id)"]);
        assert_eq!(user.stats.relations, 2);
        assert_eq!(user.stats.total_fields, 5);
    }

    #[test]
    fn test_model_constraints() {
        let mut model = Model::new("Membership")
            .with_field(Field::new("userId", "Int", FieldKind::Scalar))
            .with_field(Field::new("teamId", "Int", FieldKind::Scalar));
        model.primary_key = Some(BlockIndex {
            name: None,
            fields: vec!["userId".into(), "teamId".into()],
        });
        model.indexes.push(BlockIndex {
            name: None,
            fields: vec!["teamId".into()],
        });
        let doc = SchemaDocument {
            models: vec![model],
            ..SchemaDocument::default()
        };
        let graph = SchemaGraphBuilder::new(&doc).build();
        let node = &graph.nodes[0];
        assert_eq!(node.constraints.len(), 2);
        assert_eq!(node.constraints[0].to_string(), "PRIMARY KEY (userId, teamId)");
        assert_eq!(node.stats.indexes, 1);
        assert_eq!(node.stats.constraints, 2);
    }

    #[test]
    fn test_enum_node_rows() {
        let graph = SchemaGraphBuilder::new(&blog()).build();
        let role = graph.node("enum-Role").unwrap();
        let titles: Vec<_> = role.fields.iter().map(|f| f.title.as_str()).collect();
        assert_eq!(titles, vec!["Role", "USER", "ADMIN"]);
        assert_eq!(role.stats.total_fields, 2);
    }

    #[test]
    fn test_default_string_formatting() {
        let field = Field {
            default: Some(DefaultValue::String("draft".into())),
            has_default_value: true,
            ..Field::new("status", "String", FieldKind::Scalar)
        };
        let doc = SchemaDocument {
            models: vec![Model::new("Doc").with_field(field)],
            ..SchemaDocument::default()
        };
        let graph = SchemaGraphBuilder::new(&doc).build();
        assert!(
            graph.nodes[0].fields[0]
                .constraints
                .contains(&"DEFAULT \"draft\"".to_string())
        );
    }

    #[test]
    fn test_relation_type_serializes_kebab_case() {
        let json = serde_json::to_string(&RelationType::OneToMany).unwrap();
        assert_eq!(json, "\"one-to-many\"");
    }
}
