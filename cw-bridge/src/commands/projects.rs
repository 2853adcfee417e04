use anyhow::Result;

use super::Context;
use crate::cli::ProjectSubcommand;
use cw_client::{BindRequest, ProjectInfo};
use cw_core::{cw_println, cw_success};
use cw_messages::{msg, MESSAGES};

pub fn handle_project_command(ctx: &Context, command: ProjectSubcommand) -> Result<()> {
    let messages = &MESSAGES.connection;
    match command {
        ProjectSubcommand::Create { url, path, conid } => {
            let info = ctx.client().create_project(&conid, &url, &path)?;
            ctx.emit(&info, |info| {
                cw_success!(
                    "{}",
                    msg!(messages.project_created, path = info.project_path.as_str())
                );
                print_details(info);
            })
        }
        ProjectSubcommand::Validate { path, conid } => {
            let info = ctx.client().validate_project(&conid, &path)?;
            ctx.emit(&info, print_details)
        }
        ProjectSubcommand::Bind {
            name,
            language,
            project_type,
            path,
            conid,
        } => {
            let result = ctx.client().bind_project(
                &conid,
                BindRequest {
                    name: &name,
                    language: &language,
                    project_type: &project_type,
                    path: &path,
                },
            )?;
            ctx.manager.connection_changed(&conid);
            ctx.emit(&result, |result| {
                cw_success!(
                    "{}",
                    msg!(
                        messages.project_bound,
                        name = name.as_str(),
                        id = result.project_id.as_str()
                    )
                );
            })
        }
        ProjectSubcommand::Remove { id, conid } => {
            ctx.manager.remove_project(&conid, &id)?;
            cw_success!("{}", msg!(messages.project_removed, id = id));
            Ok(())
        }
    }
}

fn print_details(info: &ProjectInfo) {
    cw_println!("   Language: {}", info.result.language);
    cw_println!("   Type:     {}", info.result.project_type);
    if let Some(build_type) = &info.result.build_type {
        cw_println!("   Build:    {}", build_type);
    }
}
