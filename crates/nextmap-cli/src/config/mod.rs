//! Configuration with multi-source loading.
//!
//! Merges settings from CLI args, environment variables, and config files.
//! Priority: CLI > Environment > File > Defaults

mod conversions;
mod loading;
mod tests;
mod validation;

use serde::{Deserialize, Serialize};

pub use loading::{CONFIG_FILE_NAMES, ENV_PREFIX};

/// Settings loaded from `nextmap.config.toml` / `nextmap.config.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct NextmapConfig {
    /// App Router root segment relative to the project root
    pub app_dir: String,

    /// Import prefix resolved against the project root
    pub alias_prefix: String,

    /// Patterns added to the default ignore set
    pub ignore_patterns: Vec<String>,

    /// Honor the project's `.gitignore`
    pub use_ignore_file: bool,

    /// Build the dependency map during `analyze`
    pub analyze_dependencies: bool,

    /// Largest file `read` will return, in bytes
    pub max_file_size: u64,

    pub viewport_width: f64,
    pub viewport_height: f64,

    /// Force simulation tick budget
    pub ticks: usize,

    /// Folder node ids expanded in `layout`; empty means only the root
    pub expanded: Vec<String>,
}

impl Default for NextmapConfig {
    fn default() -> Self {
        Self {
            app_dir: "app".to_string(),
            alias_prefix: nextmap_graph::resolver::DEFAULT_ALIAS_PREFIX.to_string(),
            ignore_patterns: Vec::new(),
            use_ignore_file: true,
            analyze_dependencies: false,
            max_file_size: nextmap_graph::content::DEFAULT_MAX_FILE_SIZE,
            viewport_width: 1920.0,
            viewport_height: 1080.0,
            ticks: 400,
            expanded: Vec::new(),
        }
    }
}

/// Partial settings from the environment or the command line.
///
/// Environment keys arrive snake_case (`NEXTMAP_APP_DIR` becomes `app_dir`)
/// and are re-serialized camelCase so they merge over file values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase", deserialize = "snake_case"))]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_patterns: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_ignore_file: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analyze_dependencies: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_file_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewport_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewport_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticks: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expanded: Option<Vec<String>>,
}
