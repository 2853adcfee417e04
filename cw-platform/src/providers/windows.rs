//! Windows platform provider implementation.

use crate::traits::PlatformProvider;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Windows platform provider
pub struct WindowsPlatform;

impl PlatformProvider for WindowsPlatform {
    fn name(&self) -> &'static str {
        "windows"
    }

    fn resource_dir_name(&self) -> &'static str {
        "windows"
    }

    fn home_dir(&self) -> Result<PathBuf> {
        dirs::home_dir().context("Could not determine home directory")
    }

    fn user_config_dir(&self) -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Could not determine user config directory")?
            .join("cw"))
    }

    fn path_separator(&self) -> char {
        ';'
    }

    fn executable_name(&self, base: &str) -> String {
        if base.ends_with(".exe") {
            base.to_string()
        } else {
            format!("{base}.exe")
        }
    }

    // Executability on Windows comes from the extension
    fn set_executable_permissions(&self, _path: &Path) -> std::io::Result<()> {
        Ok(())
    }
}
