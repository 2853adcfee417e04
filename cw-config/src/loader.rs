// Standard library imports
use std::fs;
use std::path::{Path, PathBuf};

// External crate imports
use anyhow::{Context, Result};
use tracing::debug;

// Internal imports
use crate::global_config::CliConfig;

pub const ENV_INSECURE: &str = "CW_INSECURE";
pub const ENV_INSTALL_DIR: &str = "CW_INSTALL_DIR";
pub const ENV_RESOURCE_DIR: &str = "CW_RESOURCE_DIR";
pub const ENV_EXPECTED_VERSION: &str = "CW_EXPECTED_VERSION";

/// Loads the global configuration and layers environment overrides on top.
///
/// Priority, lowest first:
/// 1. Built-in defaults
/// 2. The YAML file (`<config dir>/cw/config.yaml` unless a path is given)
/// 3. `CW_*` environment variables
#[derive(Default)]
pub struct ConfigLoader {
    path: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit config file instead of the global one.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Load the config file (if any) and apply process environment overrides.
    pub fn load(&self) -> Result<CliConfig> {
        let mut config = self.load_file_or_default()?;
        apply_env_overrides(&mut config, |key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load only the file; a missing file yields the defaults.
    pub fn load_file_or_default(&self) -> Result<CliConfig> {
        let path = self.resolve_path()?;
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(CliConfig::default());
        }
        load_file(&path)
    }

    /// Write `config` to the resolved path, creating parent directories.
    pub fn save(&self, config: &CliConfig) -> Result<PathBuf> {
        let path = self.resolve_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let yaml = serde_yaml_ng::to_string(config).context("Failed to serialize config")?;
        fs::write(&path, yaml).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// The config file this loader reads and writes.
    pub fn resolve_path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => cw_core::user_paths::global_config_path(),
        }
    }
}

fn load_file(path: &Path) -> Result<CliConfig> {
    debug!("Loading config from: {}", path.display());
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    if contents.trim().is_empty() {
        return Ok(CliConfig::default());
    }
    serde_yaml_ng::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Apply `CW_*` overrides using `lookup` to read variables.
pub fn apply_env_overrides<F>(config: &mut CliConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup(ENV_INSECURE) {
        config.insecure = matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        );
    }
    if let Some(value) = lookup(ENV_INSTALL_DIR).filter(|v| !v.is_empty()) {
        config.install_dir = Some(PathBuf::from(value));
    }
    if let Some(value) = lookup(ENV_RESOURCE_DIR).filter(|v| !v.is_empty()) {
        config.resource_dir = Some(PathBuf::from(value));
    }
    if let Some(value) = lookup(ENV_EXPECTED_VERSION).filter(|v| !v.is_empty()) {
        config.expected_version = Some(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let loader = ConfigLoader::with_path(dir.path().join("config.yaml"));
        assert_eq!(loader.load_file_or_default().unwrap(), CliConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let loader = ConfigLoader::with_path(dir.path().join("nested").join("config.yaml"));
        let config = CliConfig {
            insecure: true,
            expected_version: Some("0.9.0".to_string()),
            ..CliConfig::default()
        };
        loader.save(&config).unwrap();
        assert_eq!(loader.load_file_or_default().unwrap(), config);
    }

    #[test]
    fn test_invalid_yaml_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "insecure: [not a bool").unwrap();
        let err = ConfigLoader::with_path(&path)
            .load_file_or_default()
            .unwrap_err();
        assert!(format!("{err:#}").contains("config.yaml"));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            (ENV_INSECURE, "true"),
            (ENV_INSTALL_DIR, "/opt/cw"),
            (ENV_EXPECTED_VERSION, "latest"),
            (ENV_RESOURCE_DIR, ""),
        ]
        .into_iter()
        .collect();

        let mut config = CliConfig::default();
        apply_env_overrides(&mut config, |k| vars.get(k).map(|v| v.to_string()));

        assert!(config.insecure);
        assert_eq!(config.install_dir, Some(PathBuf::from("/opt/cw")));
        assert_eq!(config.expected_version.as_deref(), Some("latest"));
        assert!(config.resource_dir.is_none());
    }
}
