use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format as _, Json, Serialized, Toml};

use crate::config::{ConfigOverrides, NextmapConfig};
use crate::error::{ConfigError, Result};

/// Looked up in the project root, in order.
pub const CONFIG_FILE_NAMES: [&str; 2] = ["nextmap.config.toml", "nextmap.config.json"];

pub const ENV_PREFIX: &str = "NEXTMAP_";

impl NextmapConfig {
    /// Load configuration for the project at `root`.
    ///
    /// Priority: `cli` > `NEXTMAP_*` environment variables > config file >
    /// defaults. An explicit `config_path` must exist.
    pub fn load(root: &Path, config_path: Option<&Path>, cli: &ConfigOverrides) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(path) = locate_config_file(root, config_path)? {
            tracing::debug!("Loading config from {}", path.display());
            figment = match path.extension().and_then(|e| e.to_str()) {
                Some("toml") => figment.merge(Toml::file(&path)),
                Some("json") => figment.merge(Json::file(&path)),
                _ => return Err(ConfigError::UnsupportedFormat(path).into()),
            };
        }

        figment = figment
            .merge(Serialized::defaults(ConfigOverrides::from_env()?))
            .merge(Serialized::defaults(cli));

        let config: Self = figment
            .extract()
            .map_err(|e| ConfigError::Load(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

impl ConfigOverrides {
    /// Settings from `NEXTMAP_*` variables.
    pub fn from_env() -> Result<Self> {
        Figment::from(Env::prefixed(ENV_PREFIX))
            .extract()
            .map_err(|e| ConfigError::Load(e.to_string()).into())
    }
}

fn locate_config_file(root: &Path, explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()).into());
        }
        return Ok(Some(path.to_path_buf()));
    }
    Ok(CONFIG_FILE_NAMES
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.is_file()))
}
