//! Project creation, validation, binding and removal.

use std::path::Path;

use cw_config::OperationClass;
use cw_core::error::Result;

use super::CONID;
use crate::client::CwctlClient;
use crate::result::Expect;
use crate::runner::CommandRunner;
use crate::types::{BindResult, ProjectInfo};

/// Arguments for `project bind`.
#[derive(Debug, Clone, Copy)]
pub struct BindRequest<'a> {
    pub name: &'a str,
    pub language: &'a str,
    pub project_type: &'a str,
    pub path: &'a Path,
}

impl<R: CommandRunner> CwctlClient<R> {
    /// Create a project at `path` from the template at `url`.
    pub fn create_project(&self, conid: &str, url: &str, path: &Path) -> Result<ProjectInfo> {
        let cmd = self
            .command(["project", "create"])?
            .option("--url", url)
            .option("--path", path_arg(path))
            .option(CONID, conid)
            .build();
        self.execute_json(&cmd, OperationClass::Long, Expect::PROJECT)
    }

    /// Detect the language and project type of an existing directory.
    pub fn validate_project(&self, conid: &str, path: &Path) -> Result<ProjectInfo> {
        let cmd = self
            .command(["project", "validate"])?
            .option("--path", path_arg(path))
            .option(CONID, conid)
            .build();
        self.execute_json(&cmd, OperationClass::Standard, Expect::PROJECT)
    }

    pub fn bind_project(&self, conid: &str, request: BindRequest<'_>) -> Result<BindResult> {
        let cmd = self
            .command(["project", "bind"])?
            .option("--name", request.name)
            .option("--language", request.language)
            .option("--type", request.project_type)
            .option("--path", path_arg(request.path))
            .option(CONID, conid)
            .build();
        self.execute_json(&cmd, OperationClass::Standard, Expect::PAYLOAD)
    }

    pub fn remove_project(&self, conid: &str, project_id: &str) -> Result<()> {
        let cmd = self
            .command(["project", "remove"])?
            .option("--id", project_id)
            .option(CONID, conid)
            .build();
        self.execute(&cmd, OperationClass::Standard, Expect::ACTION)?;
        Ok(())
    }
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
