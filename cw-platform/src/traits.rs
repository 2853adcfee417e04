//! Core trait for platform abstraction.
//!
//! Each platform implements [`PlatformProvider`] so that installing and
//! launching `cwctl` behaves consistently across operating systems.

use anyhow::Result;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Directory name, relative to the home directory, holding per-version installs.
pub const INSTALL_DIR_NAME: &str = ".codewind";

/// Core platform abstraction trait.
pub trait PlatformProvider: Send + Sync {
    /// Get the platform name (e.g., "unix", "windows", "macos")
    fn name(&self) -> &'static str;

    /// Subdirectory of the bundled resources holding this platform's executable
    fn resource_dir_name(&self) -> &'static str;

    // === Path Operations ===

    /// Get the user's home directory
    fn home_dir(&self) -> Result<PathBuf>;

    /// Get the user's configuration directory for the cw bridge
    fn user_config_dir(&self) -> Result<PathBuf>;

    /// Base directory for per-version installs (e.g. `~/.codewind`)
    fn install_base_dir(&self) -> Result<PathBuf> {
        Ok(self.home_dir()?.join(INSTALL_DIR_NAME))
    }

    /// Separator used in the `PATH` environment variable
    fn path_separator(&self) -> char;

    // === Binary Operations ===

    /// Get the correct executable name for the platform (adds .exe on Windows)
    fn executable_name(&self, base: &str) -> String;

    /// Apply `rwxr-xr-x` (or the platform equivalent) to an extracted executable
    fn set_executable_permissions(&self, path: &Path) -> std::io::Result<()>;

    // === Environment ===

    /// Directory that must be on `PATH` for child processes but that the
    /// default search path is known to omit on this platform.
    fn missing_path_entry(&self) -> Option<PathBuf> {
        None
    }

    /// Prepend [`missing_path_entry`](Self::missing_path_entry) to the given `PATH`.
    ///
    /// Returns `None` when no change is needed.
    fn augmented_path(&self, current: Option<&OsStr>) -> Option<OsString> {
        let entry = self.missing_path_entry()?;
        let sep = self.path_separator();

        let Some(current) = current.filter(|p| !p.is_empty()) else {
            return Some(entry.into_os_string());
        };

        let already_present = current
            .to_string_lossy()
            .split(sep)
            .any(|p| Path::new(p) == entry);
        if already_present {
            return None;
        }

        let mut path = entry.into_os_string();
        path.push(sep.to_string());
        path.push(current);
        Some(path)
    }
}
