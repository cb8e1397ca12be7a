//! Winnow parser for Prisma schema files.
//!
//! Parsing happens in two passes. The first splits the text into top-level
//! blocks (`model`, `view`, `type`, `enum`, `datasource`, `generator`); the
//! second parses each body line and resolves field kinds against the set of
//! declared models and enums.

use rustc_hash::FxHashSet;
use winnow::{
    Parser, Result as WResult,
    ascii::{multispace0, space0, space1},
    combinator::{alt, opt, preceded, repeat, terminated},
    error::ContextError,
    token::{rest, take_until, take_while},
};

use crate::model::{
    BlockIndex, CompositeType, DefaultValue, Enum, EnumValue, Field, FieldKind, Model,
    SchemaDocument,
};
use crate::{Error, Result};

/// Parse schema text into a resolved [`SchemaDocument`].
///
/// Relation fields that do not name their relation receive Prisma's implicit
/// name: the two model names sorted and joined with `To` (`PostToUser`).
pub fn parse_schema(source: &str) -> Result<SchemaDocument> {
    let cleaned = strip_comments(source);
    let blocks = split_blocks(&cleaned)?;
    let names = DeclaredNames::collect(&blocks)?;

    let mut doc = SchemaDocument::default();
    for block in &blocks {
        match block.keyword {
            "model" | "view" => doc.models.push(parse_model(block, &names)?),
            "type" => doc.types.push(CompositeType {
                name: block.name.to_string(),
                fields: parse_fields(block, &names)?.0,
            }),
            "enum" => doc.enums.push(parse_enum(block)?),
            "datasource" => {
                if doc.datasource_provider.is_none() {
                    doc.datasource_provider = provider_of(block);
                }
            }
            "generator" => {
                if let Some(provider) = provider_of(block) {
                    doc.generators.push(provider);
                }
            }
            _ => {}
        }
    }

    assign_implicit_relation_names(&mut doc);
    tracing::debug!(
        models = doc.models.len(),
        enums = doc.enums.len(),
        "Parsed schema"
    );
    Ok(doc)
}

struct RawBlock<'s> {
    keyword: &'s str,
    name: &'s str,
    body: &'s str,
    /// Line of the block header.
    line: usize,
    /// Line on which the body text starts.
    body_line: usize,
}

impl<'s> RawBlock<'s> {
    /// Trimmed, non-empty body lines with their 1-based line numbers.
    fn lines(&self) -> impl Iterator<Item = (usize, &'s str)> + '_ {
        self.body
            .lines()
            .enumerate()
            .map(|(idx, line)| (self.body_line + idx, line.trim()))
            .filter(|(_, line)| !line.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Attribute<'s> {
    name: &'s str,
    args: Option<&'s str>,
}

impl<'s> Attribute<'s> {
    fn args(&self) -> Vec<Arg<'s>> {
        self.args.map(parse_args).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq)]
struct RawField<'s> {
    name: &'s str,
    type_name: &'s str,
    is_list: bool,
    is_optional: bool,
    attributes: Vec<Attribute<'s>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Arg<'s> {
    key: Option<&'s str>,
    value: &'s str,
}

struct DeclaredNames<'s> {
    models: FxHashSet<&'s str>,
    enums: FxHashSet<&'s str>,
}

impl<'s> DeclaredNames<'s> {
    fn collect(blocks: &[RawBlock<'s>]) -> Result<Self> {
        let mut seen = FxHashSet::default();
        let mut models = FxHashSet::default();
        let mut enums = FxHashSet::default();

        for block in blocks {
            let kind = match block.keyword {
                "model" | "view" => "model",
                "enum" => "enum",
                "type" => "type",
                _ => continue,
            };
            if !seen.insert(block.name) {
                return Err(Error::Duplicate {
                    kind,
                    name: block.name.to_string(),
                    line: block.line,
                });
            }
            match kind {
                "model" => {
                    models.insert(block.name);
                }
                "enum" => {
                    enums.insert(block.name);
                }
                _ => {}
            }
        }

        Ok(Self { models, enums })
    }

    fn kind_of(&self, type_name: &str) -> FieldKind {
        let base = type_name.split('(').next().unwrap_or(type_name);
        if self.models.contains(base) {
            FieldKind::Object
        } else if self.enums.contains(base) {
            FieldKind::Enum
        } else {
            FieldKind::Scalar
        }
    }
}

// ---------------------------------------------------------------------------
// Block splitting
// ---------------------------------------------------------------------------

fn split_blocks(text: &str) -> Result<Vec<RawBlock<'_>>> {
    let mut input = text;
    let mut blocks = Vec::new();

    loop {
        let _ = skip_whitespace(&mut input);
        if input.is_empty() {
            break;
        }

        let line = line_at(text, text.len() - input.len());
        let (keyword, name) = block_header.parse_next(&mut input).map_err(|_| Error::Syntax {
            line,
            message: format!(
                "expected a block declaration, found `{}`",
                input.lines().next().unwrap_or_default().trim()
            ),
        })?;

        let body_line = line_at(text, text.len() - input.len());
        let body = block_body
            .parse_next(&mut input)
            .map_err(|_| Error::UnterminatedBlock {
                name: name.to_string(),
                line,
            })?;

        blocks.push(RawBlock {
            keyword,
            name,
            body,
            line,
            body_line,
        });
    }

    Ok(blocks)
}

fn skip_whitespace(input: &mut &str) -> WResult<()> {
    multispace0.void().parse_next(input)
}

fn block_header<'s>(input: &mut &'s str) -> WResult<(&'s str, &'s str)> {
    let keyword = alt(("model", "enum", "view", "type", "datasource", "generator"))
        .parse_next(input)?;
    space1.parse_next(input)?;
    let name = identifier.parse_next(input)?;
    multispace0.parse_next(input)?;
    Ok((keyword, name))
}

/// `{ ... }` with nesting and string literals respected; yields the inner text.
fn block_body<'s>(input: &mut &'s str) -> WResult<&'s str> {
    balanced(input, '{', '}')
}

/// `( ... )` with nesting and string literals respected; yields the inner text.
fn balanced_parens<'s>(input: &mut &'s str) -> WResult<&'s str> {
    balanced(input, '(', ')')
}

fn balanced<'s>(input: &mut &'s str, open: char, close: char) -> WResult<&'s str> {
    let text: &'s str = *input;
    if !text.starts_with(open) {
        return Err(ContextError::new());
    }

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (idx, ch) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        if ch == '"' {
            in_string = true;
        } else if ch == open {
            depth += 1;
        } else if ch == close {
            depth -= 1;
            if depth == 0 {
                *input = &text[idx + close.len_utf8()..];
                return Ok(&text[open.len_utf8()..idx]);
            }
        }
    }

    Err(ContextError::new())
}

// ---------------------------------------------------------------------------
// Line grammar
// ---------------------------------------------------------------------------

fn identifier<'s>(input: &mut &'s str) -> WResult<&'s str> {
    (
        take_while(1, |c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., |c: char| c.is_ascii_alphanumeric() || c == '_'),
    )
        .take()
        .parse_next(input)
}

// Dotted attribute names such as `db.VarChar`
fn attribute_name<'s>(input: &mut &'s str) -> WResult<&'s str> {
    (identifier, repeat(0.., ('.', identifier)).map(|()| ()))
        .take()
        .parse_next(input)
}

// `Int`, `Unsupported("circle")`
fn type_name<'s>(input: &mut &'s str) -> WResult<&'s str> {
    (identifier, opt(balanced_parens)).take().parse_next(input)
}

// `@id`, `@default(now())`, `@db.VarChar(255)`
fn field_attribute<'s>(input: &mut &'s str) -> WResult<Attribute<'s>> {
    '@'.parse_next(input)?;
    let name = attribute_name.parse_next(input)?;
    let args = opt(balanced_parens).parse_next(input)?;
    Ok(Attribute { name, args })
}

// `@@index([a, b], name: "idx")`
fn block_attribute<'s>(input: &mut &'s str) -> WResult<Attribute<'s>> {
    "@@".parse_next(input)?;
    let name = attribute_name.parse_next(input)?;
    let args = opt(balanced_parens).parse_next(input)?;
    space0.parse_next(input)?;
    Ok(Attribute { name, args })
}

fn attributes<'s>(input: &mut &'s str) -> WResult<Vec<Attribute<'s>>> {
    let attrs = repeat(0.., preceded(space0, field_attribute)).parse_next(input)?;
    space0.parse_next(input)?;
    Ok(attrs)
}

// `name Type[]? @attr...`
fn field_line<'s>(input: &mut &'s str) -> WResult<RawField<'s>> {
    let name = identifier.parse_next(input)?;
    space1.parse_next(input)?;
    let type_name = type_name.parse_next(input)?;
    let is_list = opt("[]").parse_next(input)?.is_some();
    let is_optional = opt('?').parse_next(input)?.is_some();
    let attributes = attributes.parse_next(input)?;
    Ok(RawField {
        name,
        type_name,
        is_list,
        is_optional,
        attributes,
    })
}

// `VALUE @map("value")`
fn enum_value_line<'s>(input: &mut &'s str) -> WResult<(&'s str, Vec<Attribute<'s>>)> {
    (identifier, attributes).parse_next(input)
}

// `provider = "postgresql"`
fn key_value_line<'s>(input: &mut &'s str) -> WResult<(&'s str, &'s str)> {
    let key = identifier.parse_next(input)?;
    (space0, '=', space0).parse_next(input)?;
    let value = rest.parse_next(input)?;
    Ok((key, value.trim()))
}

fn string_literal<'s>(input: &mut &'s str) -> WResult<&'s str> {
    ('"', take_until(0.., '"'), '"')
        .map(|(_, s, _)| s)
        .parse_next(input)
}

// `key: value` or a positional `value`
fn argument<'s>(input: &mut &'s str) -> WResult<Arg<'s>> {
    let key = opt(terminated(identifier, (space0, ':', space0))).parse_next(input)?;
    let value = rest.parse_next(input)?;
    Ok(Arg {
        key,
        value: value.trim(),
    })
}

// ---------------------------------------------------------------------------
// Argument helpers
// ---------------------------------------------------------------------------

/// Split on top-level commas, ignoring commas nested in brackets or strings.
fn split_top_level(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut in_string = false;
    let mut escaped = false;
    let mut start = 0;

    for (idx, ch) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(text[start..idx].trim());
                start = idx + 1;
            }
            _ => {}
        }
    }
    let tail = text[start..].trim();
    if !tail.is_empty() {
        parts.push(tail);
    }
    parts
}

fn parse_args(text: &str) -> Vec<Arg<'_>> {
    split_top_level(text)
        .into_iter()
        .filter(|part| !part.is_empty())
        .filter_map(|part| argument.parse(part).ok())
        .collect()
}

fn unquote(value: &str) -> Option<&str> {
    string_literal.parse(value.trim()).ok()
}

/// `[a, b(sort: Desc), "c"]` → `["a", "b", "c"]`
fn parse_name_list(value: &str) -> Vec<String> {
    let inner = value
        .trim()
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .unwrap_or(value);
    split_top_level(inner)
        .into_iter()
        .map(|item| {
            let item = unquote(item).unwrap_or(item);
            item.split('(').next().unwrap_or(item).trim().to_string()
        })
        .filter(|item| !item.is_empty())
        .collect()
}

fn parse_default(value: &str) -> DefaultValue {
    let value = value.trim();
    if let Some(s) = unquote(value) {
        return DefaultValue::String(s.to_string());
    }
    if value.starts_with('[') {
        return DefaultValue::List(parse_name_list(value));
    }
    match value {
        "true" => return DefaultValue::Boolean(true),
        "false" => return DefaultValue::Boolean(false),
        _ => {}
    }
    if value
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || c == '-')
    {
        return DefaultValue::Number(value.to_string());
    }

    let mut input = value;
    if let Ok(name) = identifier.parse_next(&mut input) {
        if let Ok(args) = balanced_parens.parse_next(&mut input) {
            return DefaultValue::Function {
                name: name.to_string(),
                args: split_top_level(args)
                    .into_iter()
                    .map(|a| unquote(a).unwrap_or(a).to_string())
                    .collect(),
            };
        }
    }
    DefaultValue::Constant(value.to_string())
}

/// The block's fields argument: `@@index([a, b])` or `@@index(fields: [a, b])`.
fn block_index(attr: &Attribute<'_>) -> BlockIndex {
    let mut index = BlockIndex::default();
    for arg in attr.args() {
        match arg.key {
            None | Some("fields") if arg.value.starts_with('[') => {
                index.fields = parse_name_list(arg.value);
            }
            Some("name") => index.name = unquote(arg.value).map(str::to_string),
            _ => {}
        }
    }
    index
}

// ---------------------------------------------------------------------------
// Block parsing
// ---------------------------------------------------------------------------

fn parse_model(block: &RawBlock<'_>, names: &DeclaredNames<'_>) -> Result<Model> {
    let (fields, block_attrs) = parse_fields(block, names)?;
    let mut model = Model {
        name: block.name.to_string(),
        is_view: block.keyword == "view",
        fields,
        ..Model::default()
    };

    for attr in &block_attrs {
        match attr.name {
            "id" => model.primary_key = Some(block_index(attr)),
            "unique" => model.unique_indexes.push(block_index(attr)),
            "index" => model.indexes.push(block_index(attr)),
            "map" => {
                model.db_name = attr
                    .args()
                    .first()
                    .and_then(|a| unquote(a.value))
                    .map(str::to_string);
            }
            _ => {}
        }
    }

    Ok(model)
}

fn parse_fields<'s>(
    block: &RawBlock<'s>,
    names: &DeclaredNames<'_>,
) -> Result<(Vec<Field>, Vec<Attribute<'s>>)> {
    let mut fields = Vec::new();
    let mut block_attrs = Vec::new();

    for (line, text) in block.lines() {
        if text.starts_with("@@") {
            let attr = block_attribute.parse(text).map_err(|_| Error::Syntax {
                line,
                message: format!("invalid block attribute `{text}`"),
            })?;
            block_attrs.push(attr);
            continue;
        }

        let raw = field_line.parse(text).map_err(|_| Error::Syntax {
            line,
            message: format!("invalid field declaration `{text}` in '{}'", block.name),
        })?;
        fields.push(build_field(&raw, names));
    }

    Ok((fields, block_attrs))
}

fn build_field(raw: &RawField<'_>, names: &DeclaredNames<'_>) -> Field {
    let mut field = Field {
        name: raw.name.to_string(),
        field_type: raw.type_name.to_string(),
        kind: names.kind_of(raw.type_name),
        is_list: raw.is_list,
        is_required: !raw.is_optional,
        ..Field::default()
    };

    for attr in &raw.attributes {
        match attr.name {
            "id" => field.is_id = true,
            "unique" => field.is_unique = true,
            "updatedAt" => field.is_updated_at = true,
            "default" => {
                field.has_default_value = true;
                field.default = attr.args.map(parse_default);
            }
            "map" => {
                field.db_name = attr
                    .args()
                    .first()
                    .and_then(|a| unquote(a.value))
                    .map(str::to_string);
            }
            "relation" => apply_relation(&mut field, attr),
            native if native.starts_with("db.") => {
                let ty = &native["db.".len()..];
                field.native_type = Some(match attr.args {
                    Some(args) => format!("{ty}({args})"),
                    None => ty.to_string(),
                });
            }
            _ => {}
        }
    }

    field
}

fn apply_relation(field: &mut Field, attr: &Attribute<'_>) {
    for arg in attr.args() {
        match arg.key {
            None | Some("name") => {
                if let Some(name) = unquote(arg.value) {
                    field.relation_name = Some(name.to_string());
                }
            }
            Some("fields") => field.relation_from_fields = parse_name_list(arg.value),
            Some("references") => field.relation_to_fields = parse_name_list(arg.value),
            Some("onDelete") => field.relation_on_delete = Some(arg.value.to_string()),
            Some("onUpdate") => field.relation_on_update = Some(arg.value.to_string()),
            _ => {}
        }
    }
}

fn parse_enum(block: &RawBlock<'_>) -> Result<Enum> {
    let mut def = Enum {
        name: block.name.to_string(),
        ..Enum::default()
    };

    for (line, text) in block.lines() {
        if text.starts_with("@@") {
            let attr = block_attribute.parse(text).map_err(|_| Error::Syntax {
                line,
                message: format!("invalid block attribute `{text}`"),
            })?;
            if attr.name == "map" {
                def.db_name = attr
                    .args()
                    .first()
                    .and_then(|a| unquote(a.value))
                    .map(str::to_string);
            }
            continue;
        }

        let (name, attrs) = enum_value_line.parse(text).map_err(|_| Error::Syntax {
            line,
            message: format!("invalid enum value `{text}` in '{}'", block.name),
        })?;
        let db_name = attrs
            .iter()
            .find(|a| a.name == "map")
            .and_then(|a| a.args().first().and_then(|arg| unquote(arg.value)))
            .map(str::to_string);
        def.values.push(EnumValue {
            name: name.to_string(),
            db_name,
        });
    }

    Ok(def)
}

fn provider_of(block: &RawBlock<'_>) -> Option<String> {
    block
        .lines()
        .filter_map(|(_, text)| key_value_line.parse(text).ok())
        .find(|(key, _)| *key == "provider")
        .map(|(_, value)| unquote(value).unwrap_or(value).to_string())
}

fn assign_implicit_relation_names(doc: &mut SchemaDocument) {
    for model in &mut doc.models {
        let model_name = model.name.clone();
        for field in model
            .fields
            .iter_mut()
            .filter(|f| f.kind == FieldKind::Object && f.relation_name.is_none())
        {
            field.relation_name = Some(implicit_relation_name(&model_name, &field.field_type));
        }
    }
}

/// Prisma's name for an unnamed relation between two models.
pub fn implicit_relation_name(a: &str, b: &str) -> String {
    let (first, second) = if a <= b { (a, b) } else { (b, a) };
    format!("{first}To{second}")
}

// ---------------------------------------------------------------------------
// Text helpers
// ---------------------------------------------------------------------------

/// Remove `//` comments (including `///` doc comments) outside string literals.
fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    for line in source.lines() {
        let mut in_string = false;
        let mut escaped = false;
        let mut cut = line.len();
        let bytes = line.as_bytes();
        for (idx, &b) in bytes.iter().enumerate() {
            if in_string {
                if escaped {
                    escaped = false;
                } else if b == b'\\' {
                    escaped = true;
                } else if b == b'"' {
                    in_string = false;
                }
                continue;
            }
            if b == b'"' {
                in_string = true;
            } else if b == b'/' && bytes.get(idx + 1) == Some(&b'/') {
                cut = idx;
                break;
            }
        }
        out.push_str(&line[..cut]);
        out.push('\n');
    }
    out
}

fn line_at(text: &str, offset: usize) -> usize {
    text[..offset].matches('\n').count() + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOG: &str = r#"
// Blog schema
datasource db {
  provider = "postgresql"
  url      = env("DATABASE_URL")
}

generator client {
  provider = "prisma-client-js"
}

/// A registered user
model User {
  id        Int      @id @default(autoincrement())
  email     String   @unique
  name      String?  @db.VarChar(255)
  role      Role     @default(USER)
  posts     Post[]
  profile   Profile?
  createdAt DateTime @default(now()) @map("created_at")
  updatedAt DateTime @updatedAt

  @@map("users")
}

model Profile {
  id     Int    @id
  bio    String
  userId Int    @unique
  user   User   @relation(fields: [userId], references: [id], onDelete: Cascade)
}

model Post {
  id       Int    @id @default(autoincrement())
  title    String @default("untitled")
  authorId Int
  author   User   @relation(fields: [authorId], references: [id])
  tags     Tag[]

  @@index([authorId])
  @@unique([title, authorId], name: "title_author")
}

model Tag {
  id    Int    @id
  posts Post[]
}

enum Role {
  USER
  ADMIN @map("administrator")
}
"#;

    #[test]
    fn test_parses_blocks() {
        let doc = parse_schema(BLOG).unwrap();
        assert_eq!(doc.models.len(), 4);
        assert_eq!(doc.enums.len(), 1);
        assert_eq!(doc.datasource_provider.as_deref(), Some("postgresql"));
        assert_eq!(doc.generators, vec!["prisma-client-js".to_string()]);
    }

    #[test]
    fn test_field_kinds_and_flags() {
        let doc = parse_schema(BLOG).unwrap();
        let user = doc.model("User").unwrap();

        let id = user.field("id").unwrap();
        assert!(id.is_id);
        assert_eq!(
            id.default,
            Some(DefaultValue::Function {
                name: "autoincrement".to_string(),
                args: vec![]
            })
        );

        let email = user.field("email").unwrap();
        assert!(email.is_unique);
        assert!(email.is_required);

        let name = user.field("name").unwrap();
        assert!(!name.is_required);
        assert_eq!(name.native_type.as_deref(), Some("VarChar(255)"));

        let role = user.field("role").unwrap();
        assert_eq!(role.kind, FieldKind::Enum);
        assert_eq!(role.default, Some(DefaultValue::Constant("USER".to_string())));

        let posts = user.field("posts").unwrap();
        assert_eq!(posts.kind, FieldKind::Object);
        assert!(posts.is_list);

        let created = user.field("createdAt").unwrap();
        assert_eq!(created.db_name.as_deref(), Some("created_at"));
        assert!(user.field("updatedAt").unwrap().is_updated_at);
        assert_eq!(user.db_name.as_deref(), Some("users"));
    }

    #[test]
    fn test_relation_attributes() {
        let doc = parse_schema(BLOG).unwrap();
        let user = doc.model("Profile").unwrap().field("user").unwrap();
        assert_eq!(user.relation_from_fields, vec!["userId"]);
        assert_eq!(user.relation_to_fields, vec!["id"]);
        assert_eq!(user.relation_on_delete.as_deref(), Some("Cascade"));
    }

    #[test]
    fn test_implicit_relation_names_match_on_both_sides() {
        let doc = parse_schema(BLOG).unwrap();
        let posts = doc.model("User").unwrap().field("posts").unwrap();
        let author = doc.model("Post").unwrap().field("author").unwrap();
        assert_eq!(posts.relation_name.as_deref(), Some("PostToUser"));
        assert_eq!(posts.relation_name, author.relation_name);
    }

    #[test]
    fn test_block_attributes() {
        let doc = parse_schema(BLOG).unwrap();
        let post = doc.model("Post").unwrap();
        assert_eq!(post.indexes.len(), 1);
        assert_eq!(post.indexes[0].fields, vec!["authorId"]);
        assert_eq!(post.unique_indexes[0].fields, vec!["title", "authorId"]);
        assert_eq!(post.unique_indexes[0].name.as_deref(), Some("title_author"));
        assert_eq!(
            post.field("title").unwrap().default,
            Some(DefaultValue::String("untitled".to_string()))
        );
    }

    #[test]
    fn test_enum_values() {
        let doc = parse_schema(BLOG).unwrap();
        let role = doc.enum_def("Role").unwrap();
        assert_eq!(role.values.len(), 2);
        assert_eq!(role.values[1].db_name.as_deref(), Some("administrator"));
    }

    #[test]
    fn test_named_relation_and_composite_id() {
        let doc = parse_schema(
            r#"
model Follow {
  followerId  Int
  followingId Int
  follower    User @relation("follows", fields: [followerId], references: [id])
  following   User @relation(name: "followed", fields: [followingId], references: [id])

  @@id([followerId, followingId])
}

model User {
  id        Int      @id
  following Follow[] @relation("follows")
  followers Follow[] @relation("followed")
}
"#,
        )
        .unwrap();

        let follow = doc.model("Follow").unwrap();
        assert_eq!(
            follow.field("follower").unwrap().relation_name.as_deref(),
            Some("follows")
        );
        assert_eq!(
            follow.field("following").unwrap().relation_name.as_deref(),
            Some("followed")
        );
        assert_eq!(
            follow.primary_key.as_ref().unwrap().fields,
            vec!["followerId", "followingId"]
        );
    }

    #[test]
    fn test_braces_inside_strings() {
        let doc = parse_schema(
            r#"
model Settings {
  id   Int  @id
  data Json @default("{}")
}
"#,
        )
        .unwrap();
        let data = doc.model("Settings").unwrap().field("data").unwrap();
        assert_eq!(data.default, Some(DefaultValue::String("{}".to_string())));
    }

    #[test]
    fn test_comment_marker_inside_string_is_kept() {
        let doc = parse_schema(
            r#"
model Link {
  id  Int    @id
  url String @default("https://example.com") // trailing comment
}
"#,
        )
        .unwrap();
        let url = doc.model("Link").unwrap().field("url").unwrap();
        assert_eq!(
            url.default,
            Some(DefaultValue::String("https://example.com".to_string()))
        );
    }

    #[test]
    fn test_views_and_types() {
        let doc = parse_schema(
            r#"
type Address {
  street String
  city   String
}

model Customer {
  id      String  @id
  address Address
}

view CustomerInfo {
  id   String @unique
  name String
}
"#,
        )
        .unwrap();
        assert_eq!(doc.types.len(), 1);
        assert_eq!(doc.views().count(), 1);
        let address = doc.model("Customer").unwrap().field("address").unwrap();
        assert_eq!(address.kind, FieldKind::Scalar);
    }

    #[test]
    fn test_unterminated_block() {
        let err = parse_schema("model User {\n  id Int @id\n").unwrap_err();
        assert_eq!(
            err,
            Error::UnterminatedBlock {
                name: "User".to_string(),
                line: 1
            }
        );
    }

    #[test]
    fn test_invalid_field_reports_line() {
        let err = parse_schema("model User {\n  id Int @id\n  ???\n}\n").unwrap_err();
        assert!(matches!(err, Error::Syntax { line: 3, .. }), "{err:?}");
    }

    #[test]
    fn test_unknown_top_level() {
        let err = parse_schema("table User {}").unwrap_err();
        assert!(matches!(err, Error::Syntax { line: 1, .. }));
    }

    #[test]
    fn test_duplicate_model() {
        let err = parse_schema("model A {\n id Int @id\n}\nmodel A {\n id Int @id\n}\n").unwrap_err();
        assert!(matches!(err, Error::Duplicate { line: 4, .. }));
    }

    #[test]
    fn test_implicit_relation_name_is_order_independent() {
        assert_eq!(implicit_relation_name("User", "Post"), "PostToUser");
        assert_eq!(implicit_relation_name("Post", "User"), "PostToUser");
    }
}
