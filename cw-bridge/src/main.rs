// External crates
use clap::Parser;
use tracing::debug;

// Internal imports
use cw_core::{cw_error, cw_warning};
use cw_messages::{msg, MESSAGES};

// Local modules
mod cli;
mod commands;

use cli::Args;
use commands::execute_command;

fn main() {
    let args = Args::parse();

    // Library failures are reported once below; keep their warn logs for --debug
    let default_filter = if args.debug { "debug" } else { "error" };
    if cw_logging::init_with_defaults(default_filter).is_err() {
        cw_warning!("{}", MESSAGES.common.logging_init_failed);
    }

    debug!(command = ?args.command, "starting cwb");

    if let Err(e) = execute_command(args) {
        cw_error!("{}", msg!(MESSAGES.common.error_generic, error = format!("{:#}", e)));
        std::process::exit(1);
    }
}
