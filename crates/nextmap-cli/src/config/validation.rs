use crate::config::NextmapConfig;
use crate::error::{ConfigError, Result};

impl NextmapConfig {
    /// Reject values the analysis or layout cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.app_dir.trim().is_empty() {
            return Err(invalid(
                "appDir",
                "\"\"",
                "Set appDir to the App Router folder, e.g. \"app\" or \"src/app\"",
            ));
        }
        if self.app_dir.split('/').any(|s| s == "..") {
            return Err(invalid(
                "appDir",
                &self.app_dir,
                "appDir must stay inside the project root",
            ));
        }
        for (field, value) in [
            ("viewportWidth", self.viewport_width),
            ("viewportHeight", self.viewport_height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(field, &value.to_string(), "Use a positive number of pixels"));
            }
        }
        if self.ticks == 0 {
            return Err(invalid("ticks", "0", "Use at least one simulation tick"));
        }
        if self.max_file_size == 0 {
            return Err(invalid("maxFileSize", "0", "Use a positive size in bytes"));
        }
        Ok(())
    }
}

fn invalid(field: &str, value: &str, hint: &str) -> crate::error::CliError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        hint: hint.to_string(),
    }
    .into()
}
