//! Local runtime lifecycle handlers

use anyhow::Result;
use serde_json::json;

use super::Context;
use cw_client::InstallInfo;
use cw_core::{cw_println, cw_progress, cw_success, cw_warning};
use cw_messages::categories::{OperationMessages, RUNTIME_OPS};
use cw_messages::{msg, MESSAGES};

pub fn handle_status(ctx: &Context) -> Result<()> {
    let info = ctx.manager.refresh();
    if ctx.json {
        return super::print_json(&status_json(&info));
    }
    print_status(&info);
    Ok(())
}

fn status_json(info: &InstallInfo) -> serde_json::Value {
    json!({
        "status": format!("{:?}", info.status()).to_lowercase(),
        "url": info.url(),
        "expectedVersion": info.expected_version(),
        "supportedVersion": info.supported_version(),
        "installed": info.is_installed(),
        "started": info.is_started(),
        "installedVersions": info.installed_versions(),
        "startedVersions": info.started_versions(),
    })
}

fn print_status(info: &InstallInfo) {
    let runtime = &MESSAGES.runtime;
    cw_println!("{}", runtime.status_header);
    cw_println!("   {}", info.status());
    if let Some(url) = info.url() {
        cw_println!("{}", msg!(runtime.status_url, url = url));
    }
    if info.has_installed_versions() {
        cw_println!(
            "{}",
            msg!(
                runtime.status_installed_versions,
                versions = info.installed_versions().join(", ")
            )
        );
        if !info.is_installed() {
            cw_warning!(
                "{}",
                msg!(runtime.status_not_supported, version = info.expected_version())
            );
        }
    }
}

pub fn handle_install(ctx: &Context, tag: Option<&str>) -> Result<()> {
    lifecycle(ctx, &RUNTIME_OPS.install, tag, |tag| match tag {
        Some(tag) => ctx.client().install(tag).map(|()| ctx.manager.refresh()),
        None => ctx.manager.install(),
    })
}

pub fn handle_start(ctx: &Context, tag: Option<&str>) -> Result<()> {
    lifecycle(ctx, &RUNTIME_OPS.start, tag, |tag| match tag {
        Some(tag) => ctx.client().start(tag).map(|()| ctx.manager.refresh()),
        None => ctx.manager.ensure_started(),
    })
}

pub fn handle_stop(ctx: &Context) -> Result<()> {
    lifecycle(ctx, &RUNTIME_OPS.stop, None, |_| ctx.manager.stop())
}

pub fn handle_remove(ctx: &Context, tag: Option<&str>) -> Result<()> {
    lifecycle(ctx, &RUNTIME_OPS.remove, tag, |tag| match tag {
        Some(tag) => ctx.client().remove(tag).map(|()| ctx.manager.refresh()),
        None => ctx.manager.remove(),
    })
}

fn lifecycle<F>(ctx: &Context, messages: &OperationMessages, tag: Option<&str>, op: F) -> Result<()>
where
    F: FnOnce(Option<&str>) -> cw_core::Result<std::sync::Arc<InstallInfo>>,
{
    let shown_tag = tag.unwrap_or_else(|| ctx.client().expected_version());
    cw_progress!("{}", msg!(messages.starting, tag = shown_tag));

    match op(tag) {
        Ok(info) => {
            cw_success!("{}", messages.success);
            if ctx.json {
                super::print_json(&status_json(&info))?;
            }
            Ok(())
        }
        Err(e) => {
            cw_warning!("{}", msg!(messages.failed, tag = shown_tag));
            Err(e.into())
        }
    }
}
