//! The client every operation goes through.

use std::path::PathBuf;

use cw_config::{CliConfig, OperationClass};
use cw_core::error::Result;
use cw_core::WaitPolicy;
use cw_installer::BundledExecutable;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::command::{CommandBuilder, CommandDescriptor, INSECURE_FLAG, JSON_FLAG};
use crate::result::{interpret, Expect};
use crate::runner::{CliRunner, CommandRunner};
use crate::types::parse_payload;

/// Where the `cwctl` executable comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutableSource {
    /// Use this path as-is
    Fixed(PathBuf),
    /// Extract from the bundled resources on first use
    Bundled(BundledExecutable),
}

impl ExecutableSource {
    pub fn resolve(&self) -> Result<PathBuf> {
        match self {
            ExecutableSource::Fixed(path) => Ok(path.clone()),
            ExecutableSource::Bundled(bundle) => bundle.ensure_installed(),
        }
    }
}

/// Builds, runs and interprets cwctl invocations.
pub struct CwctlClient<R = CliRunner> {
    runner: R,
    executable: ExecutableSource,
    config: CliConfig,
}

impl CwctlClient<CliRunner> {
    /// A client that spawns the bundled cwctl described by `config`.
    pub fn from_config(config: CliConfig) -> Result<Self> {
        let bundle = BundledExecutable::from_config(&config)?;
        let runner = CliRunner::from_config(&config);
        Ok(Self::new(runner, ExecutableSource::Bundled(bundle), config))
    }
}

impl<R: CommandRunner> CwctlClient<R> {
    pub fn new(runner: R, executable: ExecutableSource, config: CliConfig) -> Self {
        Self {
            runner,
            executable,
            config,
        }
    }

    pub fn config(&self) -> &CliConfig {
        &self.config
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Runtime version this client expects cwctl to manage.
    pub fn expected_version(&self) -> &str {
        self.config.expected_version()
    }

    pub fn policy(&self, class: OperationClass) -> WaitPolicy {
        self.config.policy(class)
    }

    /// Start a command for `subcommand` with the global flags already set.
    pub fn command<I, S>(&self, subcommand: I) -> Result<CommandBuilder>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut builder = CommandDescriptor::builder(self.executable.resolve()?).global_flag(JSON_FLAG);
        if self.config.insecure {
            builder = builder.global_flag(INSECURE_FLAG);
        }
        Ok(builder.subcommand(subcommand))
    }

    /// Run `command` and return its payload.
    pub fn execute(
        &self,
        command: &CommandDescriptor,
        class: OperationClass,
        expect: Expect,
    ) -> Result<String> {
        let policy = self.policy(class);
        debug!(command = %command, ?class, "running cwctl");
        let result = self.runner.run(command, policy)?;
        interpret(&result, expect, &command.subcommand_display())
    }

    /// Run `command` and deserialize its payload.
    pub fn execute_json<T: DeserializeOwned>(
        &self,
        command: &CommandDescriptor,
        class: OperationClass,
        expect: Expect,
    ) -> Result<T> {
        let payload = self.execute(command, class, expect)?;
        parse_payload(&payload, &command.subcommand_display())
    }
}
