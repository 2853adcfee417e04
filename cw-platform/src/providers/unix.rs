//! Unix platform provider implementation.

use crate::traits::PlatformProvider;
use anyhow::{Context, Result};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Mode given to extracted executables
pub(crate) const EXECUTABLE_MODE: u32 = 0o755;

/// Unix platform provider (Linux and other Unix-like systems)
pub struct UnixPlatform;

impl PlatformProvider for UnixPlatform {
    fn name(&self) -> &'static str {
        "unix"
    }

    fn resource_dir_name(&self) -> &'static str {
        "linux"
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
}
