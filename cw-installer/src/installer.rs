// Standard library
use std::env;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

// External crates
use cw_config::CliConfig;
use cw_core::error::{CwError, Result};
use cw_messages::{msg, MESSAGES};
use cw_platform::PlatformRegistry;
use fs2::FileExt;
use tracing::{debug, info, warn};

/// Base name of the bundled executable
pub const CWCTL: &str = "cwctl";

const LOCK_FILE: &str = ".cwctl.lock";
const RESOURCES_DIR: &str = "resources";

/// Serializes extraction inside this process; the file lock covers other processes.
static EXTRACT_LOCK: Mutex<()> = Mutex::new(());

/// The `cwctl` executable shipped alongside the bridge, and where it gets installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundledExecutable {
    resource_dir: PathBuf,
    install_base: PathBuf,
    version: String,
}

impl BundledExecutable {
    pub fn new(
        resource_dir: impl Into<PathBuf>,
        install_base: impl Into<PathBuf>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            resource_dir: resource_dir.into(),
            install_base: install_base.into(),
            version: version.into(),
        }
    }

    /// Resolve resource and install locations from configuration, falling back
    /// to `<exe dir>/resources` and `~/.codewind`.
    pub fn from_config(config: &CliConfig) -> Result<Self> {
        let resource_dir = match &config.resource_dir {
            Some(dir) => dir.clone(),
            None => default_resource_dir()?,
        };
        let install_base = match &config.install_dir {
            Some(dir) => dir.clone(),
            None => cw_core::user_paths::install_base_dir().map_err(|e| {
                warn!(error = %e, "no install directory");
                CwError::install(io::ErrorKind::NotFound, e.to_string())
            })?,
        };
        let version = config.expected_version();
        validate_version(version)?;
        Ok(Self::new(resource_dir, install_base, version))
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// `<resource dir>/<os>/cwctl[.exe]`
    pub fn resource_path(&self) -> PathBuf {
        self.resource_dir
            .join(cw_platform::platform::resource_dir_name())
            .join(cw_platform::platform::executable_name(CWCTL))
    }

    /// `<install base>/<version>`
    pub fn install_dir(&self) -> PathBuf {
        self.install_base.join(&self.version)
    }

    pub fn installed_path(&self) -> PathBuf {
        self.install_dir()
            .join(cw_platform::platform::executable_name(CWCTL))
    }

    /// Return the installed executable, extracting it first if needed.
    ///
    /// Extraction is serialized in-process and across processes, and the
    /// executable only appears at its final path once fully written and
    /// marked executable.
    pub fn ensure_installed(&self) -> Result<PathBuf> {
        let target = self.installed_path();
        if target.is_file() {
            return Ok(target);
        }

        let _guard = EXTRACT_LOCK.lock().map_err(|_| {
            warn!("installer lock poisoned");
            CwError::Internal("installer lock poisoned".to_string())
        })?;

        let install_dir = self.install_dir();
        fs::create_dir_all(&install_dir).map_err(|e| {
            let message = msg!(
                MESSAGES.cli.install_dir_failed,
                path = install_dir.display().to_string(),
                error = e.to_string()
            );
            install_error(&e, message)
        })?;

        let _file_lock = acquire_file_lock(&install_dir.join(LOCK_FILE))?;

        // Another caller may have finished while we waited for the locks
        if target.is_file() {
            return Ok(target);
        }

        self.extract(&target)?;
        Ok(target)
    }

    fn extract(&self, target: &Path) -> Result<()> {
        let source = self.resource_path();
        if !source.is_file() {
            let message = msg!(
                MESSAGES.cli.executable_missing,
                path = source.display().to_string()
            );
            warn!("{}", message);
            return Err(CwError::install(io::ErrorKind::NotFound, message));
        }

        info!(
            platform = PlatformRegistry::current_platform_name(),
            "{}",
            msg!(
                MESSAGES.cli.extracting,
                version = self.version.as_str(),
                path = target.display().to_string()
            )
        );

        let staging = StagingFile::new(target.with_extension(format!("tmp-{}", std::process::id())));
        fs::copy(&source, staging.path()).map_err(|e| {
            install_error(
                &e,
                format!("Failed to copy {}: {}", source.display(), e),
            )
        })?;

        cw_platform::platform::set_executable_permissions(staging.path()).map_err(|e| {
            let message = msg!(
                MESSAGES.cli.permissions_failed,
                path = staging.path().display().to_string(),
                error = e.to_string()
            );
            install_error(&e, message)
        })?;

        staging.persist(target).map_err(|e| {
            install_error(
                &e,
                format!("Failed to move cwctl into {}: {}", target.display(), e),
            )
        })?;

        debug!(path = %target.display(), "cwctl extracted");
        Ok(())
    }
}

/// A partially installed executable. Removed on drop unless persisted.
struct StagingFile {
    path: PathBuf,
    persisted: bool,
}

impl StagingFile {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            persisted: false,
        }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn persist(mut self, target: &Path) -> io::Result<()> {
        fs::rename(&self.path, target)?;
        self.persisted = true;
        Ok(())
    }
}

impl Drop for StagingFile {
    fn drop(&mut self) {
        if !self.persisted && self.path.exists() {
            if let Err(e) = fs::remove_file(&self.path) {
                warn!(path = %self.path.display(), error = %e, "failed to remove staging file");
            }
        }
    }
}

/// The version names the install directory, so it must be one plain path component.
fn validate_version(version: &str) -> Result<()> {
    let plain = !version.is_empty()
        && version != "."
        && version != ".."
        && !version.contains(['/', '\\']);
    if plain {
        return Ok(());
    }
    let message = format!("Invalid expected version '{version}': must be a plain version string");
    warn!("{}", message);
    Err(CwError::Config(message))
}

fn install_error(err: &io::Error, message: String) -> CwError {
    warn!("{}", message);
    CwError::install(err.kind(), message)
}

fn acquire_file_lock(path: &Path) -> Result<File> {
    let lock_file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(path)
        .map_err(|e| install_error(&e, format!("Failed to open {}: {}", path.display(), e)))?;

    lock_file.lock_exclusive().map_err(|e| {
        install_error(
            &e,
            format!("Failed to acquire lock {}: {}", path.display(), e),
        )
    })?;

    Ok(lock_file)
}

/// `resources/` next to the running executable, searching upward so that
/// `target/debug/cwb` also finds a `resources/` at the workspace root.
fn default_resource_dir() -> Result<PathBuf> {
    let exe_path = env::current_exe().map_err(|e| {
        warn!(error = %e, "cannot locate the running executable");
        CwError::from(e)
    })?;
    for dir in exe_path.ancestors().skip(1) {
        let candidate = dir.join(RESOURCES_DIR);
        if candidate.is_dir() {
            return Ok(candidate);
        }
    }
    let fallback = exe_path
        .parent()
        .map(|p| p.join(RESOURCES_DIR))
        .unwrap_or_else(|| PathBuf::from(RESOURCES_DIR));
    Ok(fallback)
}
