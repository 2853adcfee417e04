//! Typed operations over the `cwctl` command-line tool.
//!
//! A [`CwctlClient`] assembles an argument vector with [`CommandBuilder`],
//! hands it to a [`CommandRunner`] with a wait policy, and interprets the
//! result: JSON `error` and `status` fields are checked before the exit
//! code, because cwctl can exit 0 while reporting failure.
//!
//! [`RuntimeManager`] layers state on top: the latest [`InstallInfo`]
//! snapshot, cached [`AuthToken`]s per connection and a
//! [`ListenerRegistry`] for change notifications.
//!
//! ```no_run
//! use cw_client::CwctlClient;
//! use cw_config::ConfigLoader;
//!
//! # fn main() -> anyhow::Result<()> {
//! let client = CwctlClient::from_config(ConfigLoader::new().load()?)?;
//! let info = client.status()?;
//! println!("{} {:?}", info.status(), info.url());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod command;
pub mod mock;
pub mod ops;
pub mod registry;
pub mod result;
pub mod runner;
pub mod runtime;
pub mod status;
pub mod token;
pub mod types;

pub use client::{CwctlClient, ExecutableSource};
pub use command::{CommandBuilder, CommandDescriptor};
pub use ops::BindRequest;
pub use registry::{ListenerHandle, ListenerKey, ListenerRegistry, UpdateEvent};
pub use result::{interpret, Expect, StatusResponse};
pub use runner::{CliRunner, CommandRunner};
pub use runtime::RuntimeManager;
pub use status::{InstallInfo, InstallStatus, MIN_SUPPORTED_VERSION};
pub use token::AuthToken;
pub use types::{
    BindResult, Connection, ProjectDetails, ProjectInfo, ProjectTemplate, RegistrySecret,
    TemplateRepo, LOCAL_CONNECTION_ID,
};
