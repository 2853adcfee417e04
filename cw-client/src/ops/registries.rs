//! Image registry secrets used when building on remote runtimes.

use cw_config::OperationClass;
use cw_core::error::Result;

use super::CONID;
use crate::client::CwctlClient;
use crate::result::Expect;
use crate::runner::CommandRunner;
use crate::types::{parse_list, RegistrySecret};

impl<R: CommandRunner> CwctlClient<R> {
    pub fn list_registry_secrets(&self, conid: &str) -> Result<Vec<RegistrySecret>> {
        let cmd = self
            .command(["registrysecrets", "list"])?
            .option(CONID, conid)
            .build();
        let payload = self.execute(&cmd, OperationClass::Standard, Expect::PAYLOAD)?;
        parse_list(&payload, "registrysecrets", "registrysecrets list")
    }

    pub fn add_registry_secret(
        &self,
        conid: &str,
        address: &str,
        username: &str,
        password: &str,
    ) -> Result<()> {
        let cmd = self
            .command(["registrysecrets", "add"])?
            .option("--address", address)
            .option("--username", username)
            .option("--password", password)
            .option(CONID, conid)
            .build();
        self.execute(&cmd, OperationClass::Standard, Expect::ACTION)?;
        Ok(())
    }

    pub fn remove_registry_secret(&self, conid: &str, address: &str) -> Result<()> {
        let cmd = self
            .command(["registrysecrets", "remove"])?
            .option("--address", address)
            .option(CONID, conid)
            .build();
        self.execute(&cmd, OperationClass::Standard, Expect::ACTION)?;
        Ok(())
    }
}
