//! Classification of App Router files by their reserved base names.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::runtime::Runtime;

/// HTTP methods a route handler may export.
pub const HTTP_METHODS: &[&str] = &["GET", "POST", "PUT", "DELETE", "PATCH", "HEAD", "OPTIONS"];

/// Extensions that can hold App Router components or handlers.
pub const ROUTER_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx"];

static METHOD_EXPORT: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)export\s+(?:async\s+)?function\s+(GET|POST|PUT|DELETE|PATCH|HEAD|OPTIONS)\s*\(")
        .ok()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileKind {
    LayoutFile,
    PageFile,
    LoadingFile,
    NotFoundFile,
    ErrorFile,
    GlobalErrorFile,
    ApiRouteFile,
    TemplateFile,
    DefaultFile,
    /// Script file with a non-reserved name.
    ComponentFile,
    /// Anything without a script extension.
    RegularFile,
}

impl FileKind {
    /// Reserved kind for a base name, if any. Case-sensitive.
    pub fn from_base_name(base: &str) -> Option<Self> {
        Some(match base {
            "layout" => FileKind::LayoutFile,
            "page" => FileKind::PageFile,
            "loading" => FileKind::LoadingFile,
            "not-found" => FileKind::NotFoundFile,
            "error" => FileKind::ErrorFile,
            "global-error" => FileKind::GlobalErrorFile,
            "route" => FileKind::ApiRouteFile,
            "template" => FileKind::TemplateFile,
            "default" => FileKind::DefaultFile,
            _ => return None,
        })
    }

    pub fn is_special(&self) -> bool {
        !matches!(self, FileKind::ComponentFile | FileKind::RegularFile)
    }

    fn purpose(&self) -> &'static str {
        match self {
            FileKind::LayoutFile => "Layout Component",
            FileKind::PageFile => "Page Component",
            FileKind::LoadingFile => "Loading UI",
            FileKind::NotFoundFile => "Not Found UI",
            FileKind::ErrorFile => "Error UI",
            FileKind::GlobalErrorFile => "Global Error UI",
            FileKind::ApiRouteFile => "API Route",
            FileKind::TemplateFile => "Template Component",
            FileKind::DefaultFile => "Default Component",
            FileKind::ComponentFile => "Component/Utility",
            FileKind::RegularFile => "Asset/Config",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            FileKind::LayoutFile => "Shared UI that wraps child pages and layouts",
            FileKind::PageFile => "Unique UI for a route and makes routes publicly accessible",
            FileKind::LoadingFile => "Loading UI for page or layout (React Suspense boundary)",
            FileKind::NotFoundFile => "Not found UI for a route segment",
            FileKind::ErrorFile => "Error UI for a route segment (React Error Boundary)",
            FileKind::GlobalErrorFile => "Global error UI for the entire application",
            FileKind::ApiRouteFile => "Server-side API endpoint",
            FileKind::TemplateFile => "Re-rendered layout that creates new state on navigation",
            FileKind::DefaultFile => "Fallback UI for parallel routes",
            FileKind::ComponentFile => "React component or utility file",
            FileKind::RegularFile => "Non-route file",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAnalysis {
    #[serde(rename = "type")]
    pub kind: FileKind,
    pub purpose: String,
    pub description: String,
    pub is_app_router_special: bool,
    /// Exported HTTP handlers, sorted. Present for route files only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_methods: Option<Vec<String>>,
}

impl FileAnalysis {
    fn of(kind: FileKind) -> Self {
        Self {
            kind,
            purpose: kind.purpose().to_string(),
            description: kind.description().to_string(),
            is_app_router_special: kind.is_special(),
            api_methods: None,
        }
    }

    /// Classify a file from its name alone (no content scan).
    pub fn from_name(file_name: &str) -> Self {
        let path = Path::new(file_name);
        let has_router_ext = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| ROUTER_EXTENSIONS.contains(&ext));
        if !has_router_ext {
            return Self::of(FileKind::RegularFile);
        }

        let base = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
        Self::of(FileKind::from_base_name(base).unwrap_or(FileKind::ComponentFile))
    }

    /// Attach scanned HTTP methods to a route file.
    pub fn with_api_methods(mut self, methods: Vec<String>) -> Self {
        if !methods.is_empty() {
            self.description = format!("API endpoint: {}", methods.join(", "));
        }
        self.api_methods = Some(methods);
        self
    }
}

/// Classify an App Router file, scanning route handlers for exported methods.
///
/// An unreadable route file yields an empty method list.
pub fn classify_file(file_name: &str, file_path: &Path, runtime: &dyn Runtime) -> FileAnalysis {
    let analysis = FileAnalysis::from_name(file_name);
    if analysis.kind != FileKind::ApiRouteFile {
        return analysis;
    }

    let methods = match runtime.read_to_string(file_path) {
        Ok(content) => extract_api_methods(&content),
        Err(err) => {
            tracing::warn!("Could not scan route handler {}: {err}", file_path.display());
            Vec::new()
        }
    };
    analysis.with_api_methods(methods)
}

/// Exported HTTP method handlers found by text scan, sorted and de-duplicated.
///
/// Matches `export function GET(` and `export async function GET(`. Handlers
/// exported any other way (`export const GET = ...`) are not detected.
pub fn extract_api_methods(content: &str) -> Vec<String> {
    let Some(re) = METHOD_EXPORT.as_ref() else {
        return Vec::new();
    };
    let mut methods: Vec<String> = re
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_ascii_uppercase())
        .collect();
    methods.sort();
    methods.dedup();
    methods
}

/// Presence flags for reserved files among a folder's direct children.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialFiles {
    pub has_page: bool,
    pub has_layout: bool,
    pub has_loading: bool,
    pub has_error: bool,
    pub has_not_found: bool,
    pub has_api_route: bool,
    pub has_template: bool,
    pub has_default: bool,
}

impl SpecialFiles {
    pub fn from_children<'a>(analyses: impl IntoIterator<Item = &'a FileAnalysis>) -> Self {
        let mut flags = Self::default();
        for analysis in analyses {
            match analysis.kind {
                FileKind::PageFile => flags.has_page = true,
                FileKind::LayoutFile => flags.has_layout = true,
                FileKind::LoadingFile => flags.has_loading = true,
                FileKind::ErrorFile => flags.has_error = true,
                FileKind::NotFoundFile => flags.has_not_found = true,
                FileKind::ApiRouteFile => flags.has_api_route = true,
                FileKind::TemplateFile => flags.has_template = true,
                FileKind::DefaultFile => flags.has_default = true,
                FileKind::GlobalErrorFile | FileKind::ComponentFile | FileKind::RegularFile => {}
            }
        }
        flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::test_utils::MemoryRuntime;

    #[test]
    fn test_reserved_names() {
        assert_eq!(FileAnalysis::from_name("page.tsx").kind, FileKind::PageFile);
        assert_eq!(FileAnalysis::from_name("layout.js").kind, FileKind::LayoutFile);
        assert_eq!(
            FileAnalysis::from_name("not-found.jsx").kind,
            FileKind::NotFoundFile
        );
        assert_eq!(
            FileAnalysis::from_name("global-error.ts").kind,
            FileKind::GlobalErrorFile
        );
        assert!(FileAnalysis::from_name("default.js").is_app_router_special);
    }

    #[test]
    fn test_non_reserved_and_assets() {
        let button = FileAnalysis::from_name("Button.tsx");
        assert_eq!(button.kind, FileKind::ComponentFile);
        assert_eq!(button.purpose, "Component/Utility");
        assert!(!button.is_app_router_special);

        let css = FileAnalysis::from_name("page.css");
        assert_eq!(css.kind, FileKind::RegularFile);
        assert_eq!(css.purpose, "Asset/Config");

        // Only the last extension is stripped.
        assert_eq!(
            FileAnalysis::from_name("page.test.js").kind,
            FileKind::ComponentFile
        );
        // Case-sensitive.
        assert_eq!(FileAnalysis::from_name("Page.js").kind, FileKind::ComponentFile);
    }

    #[test]
    fn test_extract_api_methods() {
        let content = r#"
export async function POST(request) {}
export function GET() {}
export   async   function DELETE (req) {}
function PUT() {}
export const PATCH = () => {};
"#;
        assert_eq!(extract_api_methods(content), vec!["DELETE", "GET", "POST"]);
        assert!(extract_api_methods("export default function Page() {}").is_empty());
    }

    #[test]
    fn test_classify_route_file_reads_content() {
        let runtime = MemoryRuntime::new(&[(
            "/p/app/api/users/route.js",
            "export async function GET() {}\nexport async function POST() {}\n",
        )]);
        let analysis = classify_file(
            "route.js",
            Path::new("/p/app/api/users/route.js"),
            &runtime,
        );
        assert_eq!(analysis.kind, FileKind::ApiRouteFile);
        assert_eq!(
            analysis.api_methods,
            Some(vec!["GET".to_string(), "POST".to_string()])
        );
        assert_eq!(analysis.description, "API endpoint: GET, POST");
    }

    #[test]
    fn test_route_file_without_handlers() {
        let runtime = MemoryRuntime::new(&[("/p/app/route.ts", "export const dynamic = 'force-static';")]);
        let analysis = classify_file("route.ts", Path::new("/p/app/route.ts"), &runtime);
        assert_eq!(analysis.api_methods, Some(vec![]));
        assert_eq!(analysis.description, "Server-side API endpoint");
    }

    #[test]
    fn test_unreadable_route_file() {
        let runtime = MemoryRuntime::default();
        let analysis = classify_file("route.ts", Path::new("/missing/route.ts"), &runtime);
        assert_eq!(analysis.api_methods, Some(vec![]));
    }

    #[test]
    fn test_special_files_flags() {
        let children = [
            FileAnalysis::from_name("page.js"),
            FileAnalysis::from_name("layout.js"),
            FileAnalysis::from_name("utils.js"),
        ];
        let flags = SpecialFiles::from_children(&children);
        assert!(flags.has_page);
        assert!(flags.has_layout);
        assert!(!flags.has_api_route);
    }
}
