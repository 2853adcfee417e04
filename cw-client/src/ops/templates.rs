use cw_config::OperationClass;
use cw_core::error::Result;

use super::CONID;
use crate::client::CwctlClient;
use crate::result::Expect;
use crate::runner::CommandRunner;
use crate::types::{parse_list, ProjectTemplate, TemplateRepo};

impl<R: CommandRunner> CwctlClient<R> {
    pub fn list_templates(&self, conid: &str, enabled_only: bool) -> Result<Vec<ProjectTemplate>> {
        let mut builder = self.command(["templates", "list"])?.option(CONID, conid);
        if enabled_only {
            builder = builder.flag("--showEnabledOnly");
        }
        let cmd = builder.build();
        let payload = self.execute(&cmd, OperationClass::Standard, Expect::PAYLOAD)?;
        parse_list(&payload, "templates", "templates list")
    }

    pub fn list_template_repos(&self, conid: &str) -> Result<Vec<TemplateRepo>> {
        let cmd = self
            .command(["templates", "repos", "list"])?
            .option(CONID, conid)
            .build();
        let payload = self.execute(&cmd, OperationClass::Standard, Expect::PAYLOAD)?;
        parse_list(&payload, "repos", "templates repos list")
    }

    pub fn add_template_repo(
        &self,
        conid: &str,
        url: &str,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<()> {
        let cmd = self
            .command(["templates", "repos", "add"])?
            .option(CONID, conid)
            .option("--url", url)
            .option_if("--name", name)
            .option_if("--description", description)
            .build();
        self.execute(&cmd, OperationClass::Standard, Expect::ACTION)?;
        Ok(())
    }

    pub fn remove_template_repo(&self, conid: &str, url: &str) -> Result<()> {
        let cmd = self
            .command(["templates", "repos", "remove"])?
            .option(CONID, conid)
            .option("--url", url)
            .build();
        self.execute(&cmd, OperationClass::Standard, Expect::ACTION)?;
        Ok(())
    }

    /// `templates repos enable` or `templates repos disable`.
    pub fn set_template_repo_enabled(&self, conid: &str, url: &str, enabled: bool) -> Result<()> {
        let action = if enabled { "enable" } else { "disable" };
        let cmd = self
            .command(["templates", "repos", action])?
            .option(CONID, conid)
            .option("--url", url)
            .build();
        self.execute(&cmd, OperationClass::Standard, Expect::ACTION)?;
        Ok(())
    }
}
