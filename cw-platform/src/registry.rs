//! Platform registry for detecting and providing platform implementations.

use crate::traits::PlatformProvider;
use std::sync::Arc;

#[cfg(target_os = "macos")]
use crate::providers::MacOSPlatform;

#[cfg(windows)]
use crate::providers::WindowsPlatform;

#[cfg(all(unix, not(target_os = "macos")))]
use crate::providers::UnixPlatform;

/// Platform registry for detecting the current platform and creating providers.
pub struct PlatformRegistry;

impl PlatformRegistry {
    /// Get the platform provider for the current operating system.
    pub fn current() -> Arc<dyn PlatformProvider> {
        #[cfg(target_os = "macos")]
        return Arc::new(MacOSPlatform);

        #[cfg(windows)]
        return Arc::new(WindowsPlatform);

        #[cfg(all(unix, not(target_os = "macos")))]
        return Arc::new(UnixPlatform);

        #[cfg(not(any(unix, windows)))]
        compile_error!("Unsupported platform - only Unix-like and Windows platforms are supported");
    }

    /// Get the current platform name as a string.
    pub fn current_platform_name() -> &'static str {
        Self::current().name()
    }
}
