//! Parsed schema data model.
//!
//! Mirrors the shape of Prisma's DMMF datamodel closely enough that the graph
//! builder can reason about relations without re-reading schema text.

use serde::{Deserialize, Serialize};

/// Scalar type names built into the schema language.
pub const SCALAR_TYPES: &[&str] = &[
    "String", "Boolean", "Int", "BigInt", "Float", "Decimal", "DateTime", "Json", "Bytes",
    "Unsupported",
];

/// A fully parsed and resolved schema file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDocument {
    /// `model` and `view` blocks in declaration order.
    pub models: Vec<Model>,
    pub enums: Vec<Enum>,
    /// `type` blocks (composite types).
    pub types: Vec<CompositeType>,
    /// Provider of the first `datasource` block.
    pub datasource_provider: Option<String>,
    /// Provider of every `generator` block, in order.
    pub generators: Vec<String>,
}

impl SchemaDocument {
    pub fn model(&self, name: &str) -> Option<&Model> {
        self.models.iter().find(|m| m.name == name)
    }

    pub fn enum_def(&self, name: &str) -> Option<&Enum> {
        self.enums.iter().find(|e| e.name == name)
    }

    /// Models declared with `model` (views excluded).
    pub fn tables(&self) -> impl Iterator<Item = &Model> {
        self.models.iter().filter(|m| !m.is_view)
    }

    pub fn views(&self) -> impl Iterator<Item = &Model> {
        self.models.iter().filter(|m| m.is_view)
    }
}

/// A `model` or `view` block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub name: String,
    /// Table name from `@@map`, if any.
    pub db_name: Option<String>,
    pub is_view: bool,
    pub fields: Vec<Field>,
    /// Composite primary key from `@@id`.
    pub primary_key: Option<BlockIndex>,
    /// `@@unique` constraints.
    pub unique_indexes: Vec<BlockIndex>,
    /// `@@index` declarations.
    pub indexes: Vec<BlockIndex>,
}

impl Model {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn relation_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.kind == FieldKind::Object)
    }

    /// Regular plus unique index count.
    pub fn index_count(&self) -> usize {
        self.indexes.len() + self.unique_indexes.len()
    }
}

/// Field categories, as in Prisma's DMMF.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Scalar,
    /// A relation to another model.
    Object,
    Enum,
}

/// One field of a model, view, or composite type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub kind: FieldKind,
    pub is_list: bool,
    pub is_required: bool,
    pub is_unique: bool,
    pub is_id: bool,
    pub is_updated_at: bool,
    pub has_default_value: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue>,
    /// Column name from `@map`, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_name: Option<String>,
    /// `@db.*` native type attribute, e.g. `VarChar(255)`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub native_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relation_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relation_from_fields: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relation_to_fields: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relation_on_delete: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relation_on_update: Option<String>,
}

impl Field {
    /// A required, non-list field.
    pub fn new(name: impl Into<String>, field_type: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            kind,
            is_required: true,
            ..Self::default()
        }
    }

    pub fn list(mut self) -> Self {
        self.is_list = true;
        self
    }

    pub fn optional(mut self) -> Self {
        self.is_required = false;
        self
    }

    pub fn id(mut self) -> Self {
        self.is_id = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.is_unique = true;
        self
    }

    pub fn relation_name(mut self, name: impl Into<String>) -> Self {
        self.relation_name = Some(name.into());
        self
    }

    pub fn references(mut self, from: &[&str], to: &[&str]) -> Self {
        self.relation_from_fields = from.iter().map(|s| s.to_string()).collect();
        self.relation_to_fields = to.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn is_relation(&self) -> bool {
        self.kind == FieldKind::Object
    }
}

/// A `@default(...)` value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum DefaultValue {
    /// `now()`, `uuid()`, `autoincrement()`, `dbgenerated("...")`, ...
    Function { name: String, args: Vec<String> },
    String(String),
    /// Numeric literal kept as written.
    Number(String),
    Boolean(bool),
    /// Bare identifier, typically an enum value.
    Constant(String),
    List(Vec<String>),
}

impl std::fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DefaultValue::Function { name, .. } => write!(f, "{name}()"),
            DefaultValue::String(s) => write!(f, "\"{s}\""),
            DefaultValue::Number(n) => f.write_str(n),
            DefaultValue::Boolean(b) => write!(f, "{b}"),
            DefaultValue::Constant(c) => f.write_str(c),
            DefaultValue::List(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

/// A block-level field set: `@@id`, `@@unique`, or `@@index`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockIndex {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enum {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_name: Option<String>,
    pub values: Vec<EnumValue>,
}

impl Enum {
    pub fn new(name: impl Into<String>, values: &[&str]) -> Self {
        Self {
            name: name.into(),
            db_name: None,
            values: values
                .iter()
                .map(|v| EnumValue {
                    name: v.to_string(),
                    db_name: None,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValue {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_name: Option<String>,
}

/// A `type` block (composite type, MongoDB).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeType {
    pub name: String,
    pub fields: Vec<Field>,
}
