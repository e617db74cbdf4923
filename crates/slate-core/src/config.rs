use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// User-level configuration, loaded from `<config dir>/slate/config.toml`.
///
/// Every field is optional; a missing file yields the defaults. A config
/// file that exists but fails to parse is a real error — it is user-authored
/// and silently ignoring it would hide typos.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Overrides the default tasks-file location.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

pub fn load_user_config() -> Result<UserConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };
    load_config_file(&config_dir.join("slate/config.toml"))
}

/// Load configuration from an explicit path. Missing file → defaults.
pub fn load_config_file(path: &Path) -> Result<UserConfig> {
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Default tasks-file location: `<data dir>/slate/tasks.json`, falling back
/// to `tasks.json` in the working directory when no platform dir exists.
#[must_use]
pub fn default_tasks_file() -> PathBuf {
    dirs::data_dir().map_or_else(
        || PathBuf::from("tasks.json"),
        |dir| dir.join("slate").join("tasks.json"),
    )
}
