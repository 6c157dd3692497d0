//! Configuration file discovery and loading.
//!
//! This module handles finding and loading configuration files from
//! the user and project locations in priority order.

use crate::config::merger::merge_configs;
use crate::config::schema::ArsenalConfig;
use crate::error::{ArsenalError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the per-user and per-project config directory.
pub const CONFIG_DIR: &str = ".arsenal";

/// Paths to configuration files in priority order (later overrides earlier).
///
/// Merge order:
/// 1. User global config (`~/.arsenal/config.yml`)
/// 2. Project config (`.arsenal/config.yml`)
/// 3. Local overrides (`.arsenal/config.local.yml`)
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// User's global config: ~/.arsenal/config.yml
    pub user_global: Option<PathBuf>,

    /// Project config: .arsenal/config.yml
    pub project: Option<PathBuf>,

    /// Local overrides: .arsenal/config.local.yml
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        let user_global = dirs::home_dir().and_then(|home| existing(home.join(CONFIG_DIR).join("config.yml")));
        Self::discover_with_user(project_root, user_global)
    }

    /// Discover project config files with an explicit user config.
    pub fn discover_with_user(project_root: &Path, user_global: Option<PathBuf>) -> Self {
        let dir = project_root.join(CONFIG_DIR);
        Self {
            user_global,
            project: existing(dir.join("config.yml")),
            project_local: existing(dir.join("config.local.yml")),
        }
    }

    /// Returns all existing config paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        [&self.user_global, &self.project, &self.project_local]
            .into_iter()
            .flatten()
            .collect()
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    if path.exists() {
        Some(path)
    } else {
        None
    }
}

/// Load a single config file and parse it into [`ArsenalConfig`].
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<ArsenalConfig> {
    let content = read_config(path)?;
    parse_config(&content, path)
}

/// Parse YAML content into [`ArsenalConfig`].
///
/// An empty document yields the default configuration.
pub fn parse_config(content: &str, source_path: &Path) -> Result<ArsenalConfig> {
    if content.trim().is_empty() {
        return Ok(ArsenalConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| ArsenalError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load a config file as a raw YAML value for merging.
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = read_config(path)?;
    if content.trim().is_empty() {
        return Ok(serde_yaml::Value::Mapping(Default::default()));
    }

    serde_yaml::from_str(&content).map_err(|e| ArsenalError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn read_config(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ArsenalError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ArsenalError::Io(e)
        }
    })
}

/// Load and deep-merge every discovered config file.
///
/// Missing files are skipped; with none present the defaults apply.
pub fn load_merged_config(paths: &ConfigPaths) -> Result<ArsenalConfig> {
    let existing = paths.all_existing();
    if existing.is_empty() {
        return Ok(ArsenalConfig::default());
    }

    let mut configs = Vec::new();
    for path in &existing {
        tracing::debug!("Loading config from {}", path.display());
        configs.push(load_config_value(path)?);
    }

    let merged = merge_configs(&configs);

    serde_yaml::from_value(merged).map_err(|e| ArsenalError::ConfigParseError {
        path: existing[existing.len() - 1].clone(),
        message: format!("Failed to parse merged config: {}", e),
    })
}

/// Load config with optional path override.
///
/// If `config_override` is provided, loads only that file without merging.
/// Otherwise, discovers and merges all config files under `project_root`.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<ArsenalConfig> {
    match config_override {
        Some(path) => load_config_file(path),
        None => load_merged_config(&ConfigPaths::discover(project_root)),
    }
}
