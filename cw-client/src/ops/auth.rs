//! Keyring credentials and access tokens for remote connections.

use cw_config::OperationClass;
use cw_core::error::Result;

use super::CONID;
use crate::client::CwctlClient;
use crate::result::Expect;
use crate::runner::CommandRunner;
use crate::token::AuthToken;

impl<R: CommandRunner> CwctlClient<R> {
    /// Store `username`/`password` in the OS keyring for `conid`.
    ///
    /// The password only ever appears masked in logs.
    pub fn update_keyring(&self, conid: &str, username: &str, password: &str) -> Result<()> {
        let cmd = self
            .command(["seckeyring", "update"])?
            .option(CONID, conid)
            .option("--username", username)
            .option("--password", password)
            .build();
        self.execute(&cmd, OperationClass::Standard, Expect::ACTION)?;
        Ok(())
    }

    /// Fetch a fresh access token. `created_at` is stamped on receipt.
    pub fn get_access_token(&self, conid: &str) -> Result<AuthToken> {
        let cmd = self
            .command(["sectoken", "get"])?
            .option(CONID, conid)
            .build();
        self.execute_json(&cmd, OperationClass::Standard, Expect::PAYLOAD)
    }
}
