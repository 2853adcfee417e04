use anyhow::Result;
use serde_json::json;

use super::Context;
use crate::cli::ConnectionsSubcommand;
use cw_client::Connection;
use cw_core::{cw_println, cw_success};
use cw_messages::{msg, MESSAGES};

pub fn handle_connections_command(ctx: &Context, command: ConnectionsSubcommand) -> Result<()> {
    let messages = &MESSAGES.connection;
    match command {
        ConnectionsSubcommand::List => {
            let connections = ctx.client().list_connections()?;
            ctx.emit(&connections, |connections| {
                if connections.is_empty() {
                    cw_println!("{}", messages.connections_empty);
                }
                for connection in connections {
                    print_connection(connection);
                }
            })
        }
        ConnectionsSubcommand::Get { conid } => {
            let connection = ctx.client().get_connection(&conid)?;
            ctx.emit(&connection, print_connection)
        }
        ConnectionsSubcommand::Add {
            label,
            url,
            username,
        } => {
            let conid = ctx
                .client()
                .add_connection(&label, &url, username.as_deref())?;
            ctx.emit(&json!({ "id": conid }), |_| {
                cw_success!(
                    "{}",
                    msg!(messages.connection_added, label = label.as_str(), conid = conid.as_str())
                );
            })
        }
        ConnectionsSubcommand::Update {
            conid,
            label,
            url,
            username,
        } => {
            ctx.manager
                .update_connection(&conid, &label, &url, username.as_deref())?;
            cw_success!("{}", msg!(messages.connection_updated, conid = conid));
            Ok(())
        }
        ConnectionsSubcommand::Remove { conid } => {
            ctx.manager.remove_connection(&conid)?;
            cw_success!("{}", msg!(messages.connection_removed, conid = conid));
            Ok(())
        }
    }
}

fn print_connection(connection: &Connection) {
    let url = if connection.url.is_empty() {
        "-"
    } else {
        connection.url.as_str()
    };
    cw_println!("{:<12} {:<28} {}", connection.id, connection.label, url);
}
