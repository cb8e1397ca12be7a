//! Error types for the CLI.
//!
//! [`CliError`] wraps failures from the analysis crates plus the CLI's own
//! configuration and argument problems. Messages end in a `Hint:` line when
//! there is something the user can do about it.

mod report;

pub use report::cli_error_to_miette;

use std::path::PathBuf;

use nextmap_graph::{ContentError, RuntimeError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Analysis(#[from] nextmap_graph::Error),

    #[error("{0}")]
    Content(#[from] ContentError),

    #[error("Invalid schema {}: {source}\n\nHint: Run 'prisma validate' to see the full diagnostics", .path.display())]
    Schema {
        path: PathBuf,
        #[source]
        source: nextmap_schema::Error,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Runtime(#[from] RuntimeError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0:#}")]
    Output(#[from] anyhow::Error),

    #[error("{0}")]
    Custom(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {}\n\nHint: Create nextmap.config.toml in the project root or fix --config", .0.display())]
    NotFound(PathBuf),

    #[error("Unsupported config file: {}\n\nHint: Use a .toml or .json file", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Failed to load configuration: {0}\n\nHint: Check field names (camelCase) and value types")]
    Load(String),

    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        field: String,
        value: String,
        hint: String,
    },
}

pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Attach context to any error convertible into [`CliError`].
pub trait ResultExt<T> {
    /// Turn a not-found I/O or runtime error into [`CliError::FileNotFound`].
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;

    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T>;

    fn context(self, msg: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| match e.into() {
            CliError::Io(err) if err.kind() == std::io::ErrorKind::NotFound => {
                CliError::FileNotFound(path.as_ref().to_path_buf())
            }
            CliError::Runtime(RuntimeError::FileNotFound(_)) => {
                CliError::FileNotFound(path.as_ref().to_path_buf())
            }
            other => other,
        })
    }

    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{err}\n\nHint: {hint}"))
        })
    }

    fn context(self, msg: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{msg}: {err}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_carry_hints() {
        let err = ConfigError::NotFound(PathBuf::from("nextmap.config.toml"));
        let msg = err.to_string();
        assert!(msg.contains("nextmap.config.toml"));
        assert!(msg.contains("Hint:"));

        let err = ConfigError::InvalidValue {
            field: "ticks".to_string(),
            value: "0".to_string(),
            hint: "Use at least one tick".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for 'ticks': 0\n\nHint: Use at least one tick"
        );
    }

    #[test]
    fn test_invalid_root_message() {
        let err: CliError = nextmap_graph::Error::InvalidRoot(PathBuf::from("/nope")).into();
        assert_eq!(err.to_string(), "Project path is not a valid directory: /nope");
    }

    #[test]
    fn test_with_path_maps_not_found() {
        let result: std::result::Result<(), RuntimeError> =
            Err(RuntimeError::FileNotFound(PathBuf::from("/x")));
        let err = result.with_path("schema.prisma").unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(p) if p == PathBuf::from("schema.prisma")));

        let result: std::io::Result<()> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        assert!(matches!(result.with_path("a"), Err(CliError::FileNotFound(_))));
    }

    #[test]
    fn test_with_hint_and_context() {
        let result: std::result::Result<(), ConfigError> =
            Err(ConfigError::Load("bad".to_string()));
        let msg = result.with_hint("Try again").unwrap_err().to_string();
        assert!(msg.ends_with("Hint: Try again"));

        let result: std::result::Result<(), ConfigError> =
            Err(ConfigError::Load("bad".to_string()));
        let msg = result.context("Loading settings").unwrap_err().to_string();
        assert!(msg.starts_with("Loading settings: Configuration error"));
    }
}
