use anyhow::{Context as _, Result};
use clap::CommandFactory;
use clap_complete::Shell;

use super::apply_cli_flags;
use crate::cli::{Args, ConfigSubcommand};
use cw_config::{CliConfig, ConfigLoader};
use cw_core::{cw_println, cw_success};
use cw_messages::MESSAGES;

pub fn handle_config_command(
    command: &ConfigSubcommand,
    args: &Args,
    loader: &ConfigLoader,
    config: &CliConfig,
) -> Result<()> {
    match command {
        ConfigSubcommand::Show => {
            let yaml = serde_yaml_ng::to_string(config).context("Failed to serialize config")?;
            cw_println!("# expected runtime version: {}", config.expected_version());
            cw_println!("{}", yaml.trim_end());
        }
        ConfigSubcommand::Path => {
            cw_println!("{}", loader.resolve_path()?.display());
        }
        ConfigSubcommand::Init => {
            // Environment overrides only apply to this process
            let mut stored = loader.load_file_or_default()?;
            apply_cli_flags(&mut stored, args);
            let path = loader.save(&stored)?;
            cw_success!("{} {}", MESSAGES.common.success, path.display());
        }
    }
    Ok(())
}

pub fn handle_completion(shell: Shell) -> Result<()> {
    let mut command = Args::command();
    clap_complete::generate(shell, &mut command, "cwb", &mut std::io::stdout());
    Ok(())
}
