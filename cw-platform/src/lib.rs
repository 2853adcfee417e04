//! Cross-platform abstraction layer for the cw bridge.
//!
//! This crate encapsulates the platform differences that matter when
//! locating, installing and launching the bundled `cwctl` executable, so
//! callers never need scattered `#[cfg]` conditionals.

pub mod providers;
pub mod registry;
pub mod traits;

pub use registry::PlatformRegistry;
pub use traits::PlatformProvider;

/// Get the current platform provider
pub fn current() -> std::sync::Arc<dyn PlatformProvider> {
    PlatformRegistry::current()
}

/// Convenience functions for common operations
pub mod platform {
    use super::*;
    use anyhow::Result;
    use std::ffi::{OsStr, OsString};
    use std::path::{Path, PathBuf};

    /// Get the user's configuration directory
    pub fn user_config_dir() -> Result<PathBuf> {
        current().user_config_dir()
    }

    /// Get the base directory under which per-version installs live
    pub fn install_base_dir() -> Result<PathBuf> {
        current().install_base_dir()
    }

    /// Get the correct executable name for the platform
    pub fn executable_name(base: &str) -> String {
        current().executable_name(base)
    }

    /// Name of the bundled resource subdirectory for this platform
    pub fn resource_dir_name() -> &'static str {
        current().resource_dir_name()
    }

    /// Compute the `PATH` value to hand to child processes, if it needs changing
    pub fn augmented_path(current_path: Option<&OsStr>) -> Option<OsString> {
        current().augmented_path(current_path)
    }

    /// Mark a file as executable
    pub fn set_executable_permissions(path: &Path) -> std::io::Result<()> {
        current().set_executable_permissions(path)
    }
}
