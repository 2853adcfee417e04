//! Local runtime lifecycle: status, install, start, stop and remove.

use cw_config::OperationClass;
use cw_core::error::Result;

use crate::client::CwctlClient;
use crate::result::Expect;
use crate::runner::CommandRunner;
use crate::status::InstallInfo;

impl<R: CommandRunner> CwctlClient<R> {
    /// `cwctl status`
    pub fn status(&self) -> Result<InstallInfo> {
        let cmd = self.command(["status"])?.build();
        let payload = self.execute(&cmd, OperationClass::Quick, Expect::STATUS_DOCUMENT)?;
        InstallInfo::parse(&payload, self.expected_version())
    }

    /// `cwctl install --tag <tag>`
    pub fn install(&self, tag: &str) -> Result<()> {
        self.tagged("install", tag)
    }

    /// `cwctl start --tag <tag>`
    pub fn start(&self, tag: &str) -> Result<()> {
        self.tagged("start", tag)
    }

    /// `cwctl stop-all`
    pub fn stop_all(&self) -> Result<()> {
        let cmd = self.command(["stop-all"])?.build();
        self.execute(&cmd, OperationClass::Long, Expect::ACTION)?;
        Ok(())
    }

    /// `cwctl remove --tag <tag>`
    pub fn remove(&self, tag: &str) -> Result<()> {
        self.tagged("remove", tag)
    }

    fn tagged(&self, subcommand: &str, tag: &str) -> Result<()> {
        let cmd = self.command([subcommand])?.option("--tag", tag).build();
        self.execute(&cmd, OperationClass::Long, Expect::ACTION)?;
        Ok(())
    }
}
