//! Identifier derivation for dependency records.

use std::path::Path;

use super::DependencyKind;

const STABLE_ID_LEN: usize = 12;
const SHORT_ID_LEN: usize = 8;

fn hex_prefix(input: &str, len: usize) -> String {
    let hash = blake3::hash(input.as_bytes());
    let mut hex = hash.to_hex().to_string();
    hex.truncate(len);
    hex
}

/// Reproducible id for a `(source, type, file)` triple.
pub fn stable_id(source: &str, kind: DependencyKind, file: &Path) -> String {
    hex_prefix(
        &format!("{source}-{}-{}", kind.as_str(), file.display()),
        STABLE_ID_LEN,
    )
}

/// Reproducible id for one binding of a record.
pub fn specifier_id(record_id: &str, local: &str, external: Option<&str>) -> String {
    hex_prefix(
        &format!("{record_id}:{local}:{}", external.unwrap_or_default()),
        STABLE_ID_LEN,
    )
}

/// Eight hex characters identifying a path or package name.
pub fn short_id(input: &str) -> String {
    hex_prefix(input, SHORT_ID_LEN)
}

/// Process-unique id for graph rendering. Differs on every call.
pub fn node_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
