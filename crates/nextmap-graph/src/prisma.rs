//! Prisma schema discovery under `prisma/`.

use std::path::{Path, PathBuf};

use nextmap_schema::{SchemaSummary, parse_schema, summarize};
use serde::Serialize;

use crate::runtime::Runtime;

/// Folder searched for `*.prisma` files.
pub const PRISMA_DIR: &str = "prisma";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrismaSchemaInfo {
    pub file_name: String,
    /// Path below the project root, e.g. `prisma/schema.prisma`.
    pub relative_path: String,
    pub size: u64,
    pub line_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<SchemaSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrismaInfo {
    pub detected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_folder: Option<String>,
    pub schemas: Vec<PrismaSchemaInfo>,
}

/// Summarize every `*.prisma` file below `<root>/prisma`, in path order.
///
/// A schema that cannot be read or parsed is listed with an `error` and no
/// stats.
pub fn detect_prisma(root: &Path, runtime: &dyn Runtime) -> PrismaInfo {
    let prisma_dir = root.join(PRISMA_DIR);
    if !runtime.is_dir(&prisma_dir) {
        return PrismaInfo::default();
    }

    let mut files = Vec::new();
    collect_schema_files(&prisma_dir, runtime, &mut files);
    let schemas: Vec<_> = files
        .iter()
        .map(|path| summarize_file(root, path, runtime))
        .collect();

    tracing::debug!("Found {} Prisma schema(s)", schemas.len());
    PrismaInfo {
        detected: true,
        schema_folder: Some(format!("{PRISMA_DIR}/")),
        schemas,
    }
}

/// Depth-first, entries sorted by name at each level.
fn collect_schema_files(dir: &Path, runtime: &dyn Runtime, out: &mut Vec<PathBuf>) {
    let mut names = match runtime.read_dir(dir) {
        Ok(names) => names,
        Err(err) => {
            tracing::warn!("Cannot list {}: {err}", dir.display());
            return;
        }
    };
    names.sort();

    for name in names {
        let path = dir.join(&name);
        if runtime.is_dir(&path) {
            collect_schema_files(&path, runtime, out);
        } else if path.extension().is_some_and(|ext| ext == "prisma") && runtime.is_file(&path) {
            out.push(path);
        }
    }
}

fn summarize_file(root: &Path, path: &Path, runtime: &dyn Runtime) -> PrismaSchemaInfo {
    let mut info = PrismaSchemaInfo {
        file_name: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        relative_path: crate::relative_path(root, path),
        size: 0,
        line_count: 0,
        stats: None,
        error: None,
    };

    let content = match runtime.read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            tracing::warn!("Cannot read {}: {err}", path.display());
            info.error = Some(err.to_string());
            return info;
        }
    };
    info.size = content.len() as u64;
    info.line_count = content.lines().count();

    match parse_schema(&content) {
        Ok(doc) => info.stats = Some(summarize(&doc)),
        Err(err) => {
            tracing::warn!("Cannot parse {}: {err}", path.display());
            info.error = Some(err.to_string());
        }
    }
    info
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::NativeRuntime;
    use crate::runtime::test_utils::MemoryRuntime;
    use std::fs;
    use tempfile::TempDir;

    const SCHEMA: &str = r#"
datasource db {
  provider = "postgresql"
  url      = env("DATABASE_URL")
}

model User {
  id    Int    @id @default(autoincrement())
  posts Post[]
}

model Post {
  id       Int  @id
  authorId Int
  author   User @relation(fields: [authorId], references: [id])
}
"#;

    #[test]
    fn test_no_prisma_folder() {
        let temp = TempDir::new().unwrap();
        let info = detect_prisma(temp.path(), &NativeRuntime);
        assert!(!info.detected);
        assert!(info.schemas.is_empty());
    }

    #[test]
    fn test_nested_schemas_summarized() {
        let temp = TempDir::new().unwrap();
        let prisma = temp.path().join("prisma");
        fs::create_dir_all(prisma.join("models")).unwrap();
        fs::write(prisma.join("schema.prisma"), SCHEMA).unwrap();
        fs::write(prisma.join("models/broken.prisma"), "model {").unwrap();
        fs::write(prisma.join("seed.ts"), "").unwrap();

        let info = detect_prisma(temp.path(), &NativeRuntime);
        assert!(info.detected);
        assert_eq!(info.schema_folder.as_deref(), Some("prisma/"));
        assert_eq!(info.schemas.len(), 2);

        let broken = &info.schemas[0];
        assert_eq!(broken.relative_path, "prisma/models/broken.prisma");
        assert!(broken.error.is_some());
        assert!(broken.stats.is_none());

        let schema = &info.schemas[1];
        assert_eq!(schema.file_name, "schema.prisma");
        assert_eq!(schema.relative_path, "prisma/schema.prisma");
        let stats = schema.stats.as_ref().unwrap();
        assert_eq!(stats.model_count, 2);
        assert_eq!(stats.relationships.one_to_many, 1);
        assert_eq!(stats.datasource_provider.as_deref(), Some("postgresql"));
    }

    #[test]
    fn test_schemas_read_through_runtime() {
        let runtime = MemoryRuntime::new(&[
            ("/p/prisma/schema.prisma", SCHEMA),
            ("/p/prisma/models/user.prisma", "model Account {\n  id Int @id\n}\n"),
            ("/p/prisma/README.md", "# db"),
            ("/p/app/page.tsx", ""),
        ]);

        let info = detect_prisma(Path::new("/p"), &runtime);
        assert!(info.detected);
        let paths: Vec<_> = info.schemas.iter().map(|s| s.relative_path.as_str()).collect();
        assert_eq!(paths, vec!["prisma/models/user.prisma", "prisma/schema.prisma"]);
        assert_eq!(info.schemas[0].stats.as_ref().unwrap().model_count, 1);
        assert_eq!(info.schemas[1].stats.as_ref().unwrap().model_count, 2);
    }

    #[test]
    fn test_no_prisma_folder_in_memory() {
        let runtime = MemoryRuntime::new(&[("/p/package.json", "{}")]);
        let info = detect_prisma(Path::new("/p"), &runtime);
        assert_eq!(info, PrismaInfo::default());
    }
}
