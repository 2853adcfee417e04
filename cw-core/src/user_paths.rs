//! Cross-platform user directory utilities for the cw bridge.
//!
//! Delegates to the cw-platform crate for the per-OS details.

use anyhow::Result;
use std::path::PathBuf;

/// Get the user's configuration directory for the cw bridge.
///
/// Returns:
/// - Linux: `~/.config/cw` or `$XDG_CONFIG_HOME/cw`
/// - macOS: `~/Library/Application Support/cw`
/// - Windows: `%APPDATA%\cw`
#[must_use = "configuration directory path should be used"]
pub fn user_config_dir() -> Result<PathBuf> {
    cw_platform::platform::user_config_dir()
}

/// Path of the global configuration file (`<config dir>/config.yaml`).
#[must_use = "global configuration path should be used"]
pub fn global_config_path() -> Result<PathBuf> {
    Ok(user_config_dir()?.join("config.yaml"))
}

/// Base directory for per-version installs (`~/.codewind`).
#[must_use = "install directory path should be used"]
pub fn install_base_dir() -> Result<PathBuf> {
    cw_platform::platform::install_base_dir()
}
