use anyhow::Result;

use super::{password_or_prompt, Context};
use cw_core::{cw_println, cw_success};
use cw_messages::{msg, MESSAGES};

pub fn handle_login(
    ctx: &Context,
    conid: &str,
    username: &str,
    password: Option<String>,
) -> Result<()> {
    let password = password_or_prompt(password, "Password")?;
    ctx.manager.update_credentials(conid, username, &password)?;
    cw_success!(
        "{}",
        msg!(
            MESSAGES.connection.credentials_updated,
            username = username,
            conid = conid
        )
    );
    Ok(())
}

pub fn handle_token(ctx: &Context, conid: &str) -> Result<()> {
    let token = ctx.manager.access_token(conid)?;
    ctx.emit(&token, |token| cw_println!("{}", token.access_token))
}
