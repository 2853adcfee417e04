// CLI argument parsing and definitions

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Connection id used when `--conid` is omitted
pub const DEFAULT_CONID: &str = "local";

#[derive(Debug, Clone, Parser)]
#[command(name = "cwb")]
#[command(about = "Drive the cwctl development runtime from the terminal")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to a custom config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Skip TLS verification for remote connections
    #[arg(long, global = true)]
    pub insecure: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show local runtime status
    Status,
    /// Install the local runtime images
    Install {
        /// Version tag (defaults to the expected version)
        #[arg(long)]
        tag: Option<String>,
    },
    /// Start the local runtime, installing it first if needed
    Start {
        #[arg(long)]
        tag: Option<String>,
    },
    /// Stop all runtime containers
    Stop,
    /// Remove the local runtime images
    Remove {
        #[arg(long)]
        tag: Option<String>,
    },
    /// Manage connections to runtimes
    Connections {
        #[command(subcommand)]
        command: ConnectionsSubcommand,
    },
    /// Store credentials for a connection
    Login {
        #[arg(long, default_value = DEFAULT_CONID)]
        conid: String,
        #[arg(long)]
        username: String,
        /// Prompted for when omitted
        #[arg(long, env = "CW_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Print an access token for a connection
    Token {
        #[arg(long, default_value = DEFAULT_CONID)]
        conid: String,
    },
    /// List project templates
    Templates {
        #[arg(long, default_value = DEFAULT_CONID)]
        conid: String,
        /// Only templates from enabled repositories
        #[arg(long)]
        enabled_only: bool,
    },
    /// Manage template repositories
    Repos {
        #[command(subcommand)]
        command: ReposSubcommand,
    },
    /// Create, bind and remove projects
    Project {
        #[command(subcommand)]
        command: ProjectSubcommand,
    },
    /// Manage image registry secrets
    Secrets {
        #[command(subcommand)]
        command: SecretsSubcommand,
    },
    /// Show the effective configuration
    Config {
        #[command(subcommand)]
        command: ConfigSubcommand,
    },
    /// Generate shell completion scripts
    Completion {
        shell: Shell,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ConnectionsSubcommand {
    /// List connections
    List,
    /// Show one connection
    Get { conid: String },
    /// Add a remote connection
    Add {
        #[arg(long)]
        label: String,
        #[arg(long)]
        url: String,
        #[arg(long)]
        username: Option<String>,
    },
    /// Change a connection's label, URL or user
    Update {
        conid: String,
        #[arg(long)]
        label: String,
        #[arg(long)]
        url: String,
        #[arg(long)]
        username: Option<String>,
    },
    /// Remove a connection
    Remove { conid: String },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ReposSubcommand {
    /// List template repositories
    List {
        #[arg(long, default_value = DEFAULT_CONID)]
        conid: String,
    },
    /// Add a template repository
    Add {
        url: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, default_value = DEFAULT_CONID)]
        conid: String,
    },
    /// Remove a template repository
    Remove {
        url: String,
        #[arg(long, default_value = DEFAULT_CONID)]
        conid: String,
    },
    /// Enable a template repository
    Enable {
        url: String,
        #[arg(long, default_value = DEFAULT_CONID)]
        conid: String,
    },
    /// Disable a template repository
    Disable {
        url: String,
        #[arg(long, default_value = DEFAULT_CONID)]
        conid: String,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ProjectSubcommand {
    /// Create a project from a template
    Create {
        /// Template URL
        #[arg(long)]
        url: String,
        #[arg(long)]
        path: PathBuf,
        #[arg(long, default_value = DEFAULT_CONID)]
        conid: String,
    },
    /// Detect the language and type of a directory
    Validate {
        #[arg(long)]
        path: PathBuf,
        #[arg(long, default_value = DEFAULT_CONID)]
        conid: String,
    },
    /// Bind an existing directory as a project
    Bind {
        #[arg(long)]
        name: String,
        #[arg(long)]
        language: String,
        #[arg(long = "type")]
        project_type: String,
        #[arg(long)]
        path: PathBuf,
        #[arg(long, default_value = DEFAULT_CONID)]
        conid: String,
    },
    /// Remove a project
    Remove {
        #[arg(long)]
        id: String,
        #[arg(long, default_value = DEFAULT_CONID)]
        conid: String,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum SecretsSubcommand {
    /// List registry secrets
    List {
        #[arg(long, default_value = DEFAULT_CONID)]
        conid: String,
    },
    /// Add a registry secret
    Add {
        address: String,
        #[arg(long)]
        username: String,
        #[arg(long, env = "CW_REGISTRY_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        #[arg(long, default_value = DEFAULT_CONID)]
        conid: String,
    },
    /// Remove a registry secret
    Remove {
        address: String,
        #[arg(long, default_value = DEFAULT_CONID)]
        conid: String,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ConfigSubcommand {
    /// Print the merged configuration as YAML
    Show,
    /// Print the config file location
    Path,
    /// Write the current settings to the config file
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_project_bind() {
        let args = Args::try_parse_from([
            "cwb", "project", "bind", "--name", "app", "--language", "java", "--type", "liberty",
            "--path", "/w/app",
        ])
        .unwrap();
        match args.command {
            Command::Project {
                command:
                    ProjectSubcommand::Bind {
                        project_type,
                        conid,
                        ..
                    },
            } => {
                assert_eq!(project_type, "liberty");
                assert_eq!(conid, DEFAULT_CONID);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::try_parse_from(["cwb", "status", "--json", "--insecure"]).unwrap();
        assert!(args.json);
        assert!(args.insecure);
    }
}
