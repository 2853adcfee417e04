// Command handlers for cwb

use anyhow::{Context as _, Result};
use serde::Serialize;
use tracing::debug;

use crate::cli::{Args, Command};
use cw_client::{CwctlClient, RuntimeManager};
use cw_config::{CliConfig, ConfigLoader};
use cw_core::cw_println;

pub mod auth;
pub mod config;
pub mod connections;
pub mod projects;
pub mod registries;
pub mod runtime;
pub mod templates;

/// State shared by the handlers of one invocation
pub struct Context {
    pub manager: RuntimeManager,
    pub json: bool,
}

impl Context {
    pub fn client(&self) -> &CwctlClient {
        self.manager.client()
    }

    /// Print `value` as JSON when `--json` was given, otherwise run `human`.
    pub fn emit<T, F>(&self, value: &T, human: F) -> Result<()>
    where
        T: Serialize + ?Sized,
        F: FnOnce(&T),
    {
        if self.json {
            print_json(value)
        } else {
            human(value);
            Ok(())
        }
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    cw_println!("{}", text);
    Ok(())
}

/// Load configuration, applying command-line overrides on top.
pub fn load_config(args: &Args) -> Result<(ConfigLoader, CliConfig)> {
    let loader = match &args.config {
        Some(path) => ConfigLoader::with_path(path),
        None => ConfigLoader::new(),
    };
    let mut config = loader.load()?;
    apply_cli_flags(&mut config, args);
    Ok((loader, config))
}

/// Settings given on the command line win over file and environment.
pub fn apply_cli_flags(config: &mut CliConfig, args: &Args) {
    if args.insecure {
        config.insecure = true;
    }
}

/// Main command dispatcher
pub fn execute_command(args: Args) -> Result<()> {
    // Commands that never touch cwctl
    match &args.command {
        Command::Completion { shell } => {
            debug!("Generating completions");
            return config::handle_completion(*shell);
        }
        Command::Config { command } => {
            let (loader, config) = load_config(&args)?;
            return config::handle_config_command(command, &args, &loader, &config);
        }
        _ => {}
    }

    let (_, config) = load_config(&args)?;
    let client = CwctlClient::from_config(config).context("Failed to locate cwctl")?;
    let ctx = Context {
        manager: RuntimeManager::new(client),
        json: args.json,
    };

    match args.command {
        Command::Status => runtime::handle_status(&ctx),
        Command::Install { tag } => runtime::handle_install(&ctx, tag.as_deref()),
        Command::Start { tag } => runtime::handle_start(&ctx, tag.as_deref()),
        Command::Stop => runtime::handle_stop(&ctx),
        Command::Remove { tag } => runtime::handle_remove(&ctx, tag.as_deref()),
        Command::Connections { command } => connections::handle_connections_command(&ctx, command),
        Command::Login {
            conid,
            username,
            password,
        } => auth::handle_login(&ctx, &conid, &username, password),
        Command::Token { conid } => auth::handle_token(&ctx, &conid),
        Command::Templates {
            conid,
            enabled_only,
        } => templates::handle_templates(&ctx, &conid, enabled_only),
        Command::Repos { command } => templates::handle_repos_command(&ctx, command),
        Command::Project { command } => projects::handle_project_command(&ctx, command),
        Command::Secrets { command } => registries::handle_secrets_command(&ctx, command),
        Command::Completion { .. } | Command::Config { .. } => Ok(()),
    }
}

/// Read a password interactively when it was not given on the command line.
pub fn password_or_prompt(password: Option<String>, prompt: &str) -> Result<String> {
    match password {
        Some(password) => Ok(password),
        None => dialoguer::Password::new()
            .with_prompt(prompt)
            .interact()
            .context("Failed to read password"),
    }
}
