//! cwctl installer library.
//!
//! Locates the platform-specific `cwctl` shipped with the bridge and
//! extracts it into `~/.codewind/<version>/` on first use.

pub mod installer;

pub use installer::{BundledExecutable, CWCTL};
