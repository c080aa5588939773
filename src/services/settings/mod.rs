//! Loading and saving `config.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

use crate::models::settings::AppConfig;

const CONFIG_FILE_NAME: &str = "config.toml";

/// Platform config location, e.g. `~/.config/church-events/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "ChurchEvents", "church-events")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Read and validate the config. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        log::info!("No config at {}, using defaults", path.display());
        return Ok(AppConfig::default());
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config from {}", path.display()))?;
    let config: AppConfig = toml::from_str(&data)
        .with_context(|| format!("failed to parse config from {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("invalid config in {}", path.display()))?;

    log::info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Load from `path` when given, else from the platform location; any
/// failure falls back to the defaults with a warning.
pub fn load_config_or_default(path: Option<&Path>) -> AppConfig {
    let resolved = path.map(Path::to_path_buf).or_else(default_config_path);
    let Some(resolved) = resolved else {
        log::warn!("No config directory available, using defaults");
        return AppConfig::default();
    };

    match load_config(&resolved) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("Failed to load config: {:#}, using defaults", err);
            AppConfig::default()
        }
    }
}

pub fn save_config(path: &Path, config: &AppConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create dir {}", parent.display()))?;
    }

    let data = toml::to_string_pretty(config).context("failed to serialize config")?;
    fs::write(path, data)
        .with_context(|| format!("failed to write config to {}", path.display()))?;
    Ok(())
}
