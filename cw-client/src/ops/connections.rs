use cw_config::OperationClass;
use cw_core::error::Result;
use serde_json::Value;

use super::CONID;
use crate::client::CwctlClient;
use crate::result::Expect;
use crate::runner::CommandRunner;
use crate::types::{parse_list, parse_payload, unexpected_output, Connection};

impl<R: CommandRunner> CwctlClient<R> {
    pub fn list_connections(&self) -> Result<Vec<Connection>> {
        let cmd = self.command(["connections", "list"])?.build();
        let payload = self.execute(&cmd, OperationClass::Standard, Expect::PAYLOAD)?;
        parse_list(&payload, "connections", "connections list")
    }

    pub fn get_connection(&self, conid: &str) -> Result<Connection> {
        let cmd = self
            .command(["connections", "get"])?
            .option(CONID, conid)
            .build();
        self.execute_json(&cmd, OperationClass::Standard, Expect::PAYLOAD)
    }

    /// Register a remote runtime. Returns the new connection id.
    pub fn add_connection(&self, label: &str, url: &str, username: Option<&str>) -> Result<String> {
        let cmd = self
            .command(["connections", "add"])?
            .option("--label", label)
            .option("--url", url)
            .option_if("--username", username)
            .build();
        let payload = self.execute(&cmd, OperationClass::Standard, Expect::PAYLOAD)?;
        let value: Value = parse_payload(&payload, "connections add")?;
        value
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                unexpected_output(
                    "connections add",
                    format_args!("no id in {}", payload.trim()),
                )
            })
    }

    pub fn update_connection(
        &self,
        conid: &str,
        label: &str,
        url: &str,
        username: Option<&str>,
    ) -> Result<()> {
        let cmd = self
            .command(["connections", "update"])?
            .option(CONID, conid)
            .option("--label", label)
            .option("--url", url)
            .option_if("--username", username)
            .build();
        self.execute(&cmd, OperationClass::Standard, Expect::ACTION)?;
        Ok(())
    }

    pub fn remove_connection(&self, conid: &str) -> Result<()> {
        let cmd = self
            .command(["connections", "remove"])?
            .option(CONID, conid)
            .build();
        self.execute(&cmd, OperationClass::Standard, Expect::ACTION)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::client::{CwctlClient, ExecutableSource};
    use crate::mock::MockRunner;
    use crate::test_utils::captured_warnings;
    use cw_config::CliConfig;
    use cw_core::CwError;
    use std::path::PathBuf;

    #[test]
    fn test_add_without_id_is_logged() {
        let client = CwctlClient::new(
            MockRunner::new().ok(r#"{"status":"OK"}"#),
            ExecutableSource::Fixed(PathBuf::from("cwctl")),
            CliConfig::default(),
        );
        let mut added = None;
        let logs = captured_warnings(|| {
            added = Some(client.add_connection("remote", "https://gk.example.com", None));
        });
        assert!(matches!(added, Some(Err(CwError::Serialization(_)))));
        assert!(logs.contains("connections add: no id"));
    }
}
