//! macOS platform provider implementation.
//!
//! Applications launched from Finder or the Dock get a minimal `PATH` that
//! omits `/usr/local/bin`, which is where the docker CLI lives, so that
//! directory is prepended for child processes.

use crate::providers::unix::EXECUTABLE_MODE;
use crate::traits::PlatformProvider;
use anyhow::{Context, Result};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

const USR_LOCAL_BIN: &str = "/usr/local/bin";

/// macOS platform provider
pub struct MacOSPlatform;

impl PlatformProvider for MacOSPlatform {
    fn name(&self) -> &'static str {
        "macos"
    }

    fn resource_dir_name(&self) -> &'static str {
        "darwin"
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
        ':'
    }

    fn executable_name(&self, base: &str) -> String {
        base.to_string()
    }

    fn set_executable_permissions(&self, path: &Path) -> std::io::Result<()> {
        fs::set_permissions(path, fs::Permissions::from_mode(EXECUTABLE_MODE))
    }

    fn missing_path_entry(&self) -> Option<PathBuf> {
        Some(PathBuf::from(USR_LOCAL_BIN))
    }
}
