//! Configuration management commands.

use std::fs;

use anyhow::{anyhow, bail, Context as _, Result};
use storefront_commerce::Currency;

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force, currency } => init_config(force, &currency, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");

    ctx.output.info("[cart]");
    ctx.output.kv("path", &ctx.config.cart.path.display().to_string());
    ctx.output.kv("currency", ctx.config.cart.currency.code());
    ctx.output.kv("resolved path", &ctx.cart_path.display().to_string());

    ctx.output.info("[log]");
    ctx.output.kv("level", &ctx.config.log.level);
    ctx.output.kv("format", ctx.config.log.format.as_str());

    Ok(())
}

fn init_config(force: bool, currency: &str, ctx: &Context) -> Result<()> {
    let currency =
        Currency::from_code(currency).ok_or_else(|| anyhow!("Unknown currency: {}", currency))?;
    let config_path = ctx.cwd.join("storefront.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let content = generate_default_config("cart.json", currency);
    fs::write(&config_path, content)
        .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}
