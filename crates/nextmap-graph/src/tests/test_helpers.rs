//! Shared fixtures for scenario tests.

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Write `files` below `temp` and return the project root.
pub fn create_test_project(temp: &TempDir, files: &[(&str, &str)]) -> PathBuf {
    let root = temp.path().to_path_buf();

    for (path, content) in files {
        let file_path = root.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .unwrap_or_else(|e| panic!("Failed to create parent directory for {path}: {e}"));
        }
        fs::write(&file_path, content).unwrap_or_else(|e| panic!("Failed to write file {path}: {e}"));
    }

    root
}

/// The minimal App Router project: a home page, a grouped page and an API route.
pub fn create_app_router_project(temp: &TempDir) -> PathBuf {
    create_test_project(
        temp,
        &[
            ("app/page.js", "export default function Home() { return null; }"),
            (
                "app/(marketing)/about/page.js",
                "export default function About() { return null; }",
            ),
            (
                "app/api/users/route.js",
                "export async function GET() {}\nexport async function POST(request) {}\n",
            ),
        ],
    )
}
