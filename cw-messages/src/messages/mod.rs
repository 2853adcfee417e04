//! Central registry for all user-facing message templates.
//!
//! Organized by domain:
//! - `cli` - Process execution and result interpretation messages
//! - `runtime` - Local runtime install/start/stop and status messages
//! - `connection` - Connection, template, registry and project messages
//! - `common` - Shared/reusable messages across commands
//!
//! Templates use `{variable}` syntax for runtime values, which are
//! substituted by the `MessageBuilder`.
//!
//! ```rust
//! use cw_messages::MESSAGES;
//!
//! let msg = MESSAGES.runtime.status_started;
//! ```

mod cli;
mod common;
mod connection;
mod runtime;

pub use cli::{CliMessages, CLI_MESSAGES};
pub use common::{CommonMessages, COMMON_MESSAGES};
pub use connection::{ConnectionMessages, CONNECTION_MESSAGES};
pub use runtime::{RuntimeMessages, RUNTIME_MESSAGES};

/// Unified messages struct containing all domain-specific message modules
pub struct Messages {
    pub cli: CliMessages,
    pub runtime: RuntimeMessages,
    pub connection: ConnectionMessages,
    pub common: CommonMessages,
}

/// Global messages constant - main entry point for all message templates
pub const MESSAGES: Messages = Messages {
    cli: CLI_MESSAGES,
    runtime: RUNTIME_MESSAGES,
    connection: CONNECTION_MESSAGES,
    common: COMMON_MESSAGES,
};
