use anyhow::Result;

use super::Context;
use crate::cli::ReposSubcommand;
use cw_client::TemplateRepo;
use cw_core::{cw_println, cw_success};
use cw_messages::{msg, MESSAGES};

pub fn handle_templates(ctx: &Context, conid: &str, enabled_only: bool) -> Result<()> {
    let templates = ctx.client().list_templates(conid, enabled_only)?;
    ctx.emit(&templates, |templates| {
        if templates.is_empty() {
            cw_println!("{}", MESSAGES.connection.templates_empty);
        }
        for template in templates {
            cw_println!(
                "{:<32} {:<10} {:<12} {}",
                template.label,
                template.language,
                template.project_type,
                template.url
            );
        }
    })
}

pub fn handle_repos_command(ctx: &Context, command: ReposSubcommand) -> Result<()> {
    let messages = &MESSAGES.connection;
    match command {
        ReposSubcommand::List { conid } => {
            let repos = ctx.client().list_template_repos(&conid)?;
            ctx.emit(&repos, |repos| repos.iter().for_each(print_repo))
        }
        ReposSubcommand::Add {
            url,
            name,
            description,
            conid,
        } => {
            ctx.client().add_template_repo(
                &conid,
                &url,
                name.as_deref(),
                description.as_deref(),
            )?;
            cw_success!("{}", msg!(messages.repo_added, url = url));
            Ok(())
        }
        ReposSubcommand::Remove { url, conid } => {
            ctx.client().remove_template_repo(&conid, &url)?;
            cw_success!("{}", msg!(messages.repo_removed, url = url));
            Ok(())
        }
        ReposSubcommand::Enable { url, conid } => toggle(ctx, &conid, url, true),
        ReposSubcommand::Disable { url, conid } => toggle(ctx, &conid, url, false),
    }
}

fn toggle(ctx: &Context, conid: &str, url: String, enabled: bool) -> Result<()> {
    ctx.client().set_template_repo_enabled(conid, &url, enabled)?;
    let state = if enabled { "enabled" } else { "disabled" };
    cw_success!(
        "{}",
        msg!(MESSAGES.connection.repo_toggled, url = url, state = state)
    );
    Ok(())
}

fn print_repo(repo: &TemplateRepo) {
    let marker = if repo.enabled { "●" } else { "○" };
    let name = repo
        .name
        .as_deref()
        .or(repo.description.as_deref())
        .unwrap_or("");
    cw_println!("{} {:<48} {}", marker, repo.url, name);
}
