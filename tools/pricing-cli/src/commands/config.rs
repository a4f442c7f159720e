//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CONFIG_FILE_NAMES};
use crate::context::{Context, LOG_ENV_VAR};
use crate::input::load_records;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");

    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    // Pricing section
    ctx.output.info("[pricing]");
    ctx.output.kv("currency", &ctx.config.pricing.currency);
    ctx.output
        .kv("default_delivery", &ctx.config.pricing.default_delivery);
    if let Some(ref catalog) = ctx.config.pricing.catalog {
        ctx.output.kv("catalog", catalog);
    }

    // Logging section
    ctx.output.info("[logging]");
    ctx.output.kv("level", &ctx.config.logging.level);
    ctx.output.kv("json", &ctx.config.logging.json.to_string());
    if let Ok(filter) = std::env::var(LOG_ENV_VAR) {
        ctx.output.list_item(&format!("{} overrides level: {}", LOG_ENV_VAR, filter));
    }

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_FILE_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    if let Err(e) = ctx.config.currency() {
        errors.push(format!("{:#}", e));
    } else if let Err(e) = ctx.config.default_delivery() {
        errors.push(format!("{:#}", e));
    }

    match &ctx.config.pricing.catalog {
        Some(catalog) => {
            let path = ctx.resolve_config_path(catalog);
            if !path.exists() {
                errors.push(format!("pricing.catalog not found: {}", path.display()));
            } else if let Err(e) = load_records(&path) {
                errors.push(format!("{:#}", e));
            }
        }
        None => warnings.push("pricing.catalog is not set; pass --catalog".to_string()),
    }

    if let Err(e) = tracing_subscriber::EnvFilter::try_new(&ctx.config.logging.level) {
        errors.push(format!("logging.level is not a valid filter: {}", e));
    }

    // Print results
    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}
