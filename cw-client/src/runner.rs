//! The seam between operations and the operating system.
//!
//! Operations hand a [`CommandDescriptor`] and a [`WaitPolicy`] to a
//! [`CommandRunner`]. [`CliRunner`] really spawns `cwctl`; tests substitute
//! [`crate::mock::MockRunner`].

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use cw_config::CliConfig;
use cw_core::error::Result;
use cw_core::{process, ProcessResult, WaitPolicy};
use tracing::debug;

use crate::command::CommandDescriptor;

/// Runs one cwctl invocation to completion under a wait policy.
pub trait CommandRunner: Send + Sync {
    /// `Ok` means the process ran and exited, whatever its exit code.
    fn run(&self, command: &CommandDescriptor, policy: WaitPolicy) -> Result<ProcessResult>;
}

/// Spawns `cwctl` as a child process.
#[derive(Debug, Clone, Default)]
pub struct CliRunner {
    env: Vec<(OsString, OsString)>,
}

impl CliRunner {
    /// Environment additions for the current platform and `java_home`.
    pub fn new(java_home: Option<PathBuf>) -> Self {
        let mut env = Vec::new();
        if let Some(path) = cw_platform::platform::augmented_path(env::var_os("PATH").as_deref()) {
            debug!(path = %path.to_string_lossy(), "augmenting PATH for cwctl");
            env.push((OsString::from("PATH"), path));
        }
        if let Some(java_home) = java_home {
            env.push((OsString::from("JAVA_HOME"), java_home.into_os_string()));
        }
        Self { env }
    }

    pub fn from_config(config: &CliConfig) -> Self {
        Self::new(config.java_home.clone())
    }

    /// Variables set on top of the inherited environment.
    pub fn env(&self) -> &[(OsString, OsString)] {
        &self.env
    }
}

impl CommandRunner for CliRunner {
    fn run(&self, command: &CommandDescriptor, policy: WaitPolicy) -> Result<ProcessResult> {
        process::run(command.executable(), &command.to_args(), &self.env, policy)
    }
}

impl<R: CommandRunner + ?Sized> CommandRunner for std::sync::Arc<R> {
    fn run(&self, command: &CommandDescriptor, policy: WaitPolicy) -> Result<ProcessResult> {
        (**self).run(command, policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_java_home_is_exported() {
        let runner = CliRunner::new(Some(PathBuf::from("/opt/jdk")));
        assert!(runner
            .env()
            .iter()
            .any(|(k, v)| k == "JAVA_HOME" && v == "/opt/jdk"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_linux_leaves_path_alone() {
        let runner = CliRunner::new(None);
        assert!(runner.env().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_runs_real_process() {
        let command = CommandDescriptor::builder("sh")
            .subcommand(["-c"])
            .arg("printf '{\"status\":\"OK\"}'")
            .build();
        let result = CliRunner::default()
            .run(
                &command,
                WaitPolicy::new(std::time::Duration::from_millis(20), 250),
            )
            .unwrap();
        assert_eq!(result.stdout, r#"{"status":"OK"}"#);
    }
}
