use anyhow::Result;

use super::{password_or_prompt, Context};
use crate::cli::SecretsSubcommand;
use cw_core::{cw_println, cw_success};
use cw_messages::{msg, MESSAGES};

pub fn handle_secrets_command(ctx: &Context, command: SecretsSubcommand) -> Result<()> {
    let messages = &MESSAGES.connection;
    match command {
        SecretsSubcommand::List { conid } => {
            let secrets = ctx.client().list_registry_secrets(&conid)?;
            ctx.emit(&secrets, |secrets| {
                for secret in secrets {
                    cw_println!("{:<40} {}", secret.address, secret.username);
                }
            })
        }
        SecretsSubcommand::Add {
            address,
            username,
            password,
            conid,
        } => {
            let password = password_or_prompt(password, "Registry password")?;
            ctx.client()
                .add_registry_secret(&conid, &address, &username, &password)?;
            cw_success!("{}", msg!(messages.registry_secret_added, address = address));
            Ok(())
        }
        SecretsSubcommand::Remove { address, conid } => {
            ctx.client().remove_registry_secret(&conid, &address)?;
            cw_success!("{}", msg!(messages.registry_secret_removed, address = address));
            Ok(())
        }
    }
}
