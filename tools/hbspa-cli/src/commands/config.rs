//! Configuration management commands.

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CONFIG_FILE_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.info("[api]");
    ctx.output.kv("base_url", &ctx.config.api.base_url);

    ctx.output.info("[storage]");
    ctx.output.kv("path", &ctx.storage_path().display().to_string());

    let preview = &ctx.config.preview;
    ctx.output.info("[preview]");
    ctx.output.kv("variant", preview.variant.as_str());
    ctx.output.kv("item_limit", &preview.item_limit.to_string());
    ctx.output.kv("locale", &preview.locale);
    ctx.output.kv("currency", preview.currency.code());
    ctx.output.kv("page_path", &preview.page_path);
    ctx.output.kv("cart_url", preview.cart_url());

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let path = ctx.cwd.join(CONFIG_FILE_NAMES[0]);
    if path.exists() && !force {
        bail!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        );
    }

    std::fs::write(&path, generate_default_config())?;
    ctx.output
        .success(&format!("Created {}", path.display()));
    Ok(())
}
