//! CLI command implementations.

pub mod config;
pub mod price;
pub mod promotions;

use clap::{Args, Subcommand};

/// Arguments for the price command.
#[derive(Args)]
pub struct PriceArgs {
    /// Cart file (JSON or TOML).
    pub cart: String,

    /// Promotion code as the customer typed it.
    #[arg(short = 'p', long)]
    pub code: Option<String>,

    /// Promotion catalog file (default: pricing.catalog from config).
    #[arg(long)]
    pub catalog: Option<String>,

    /// Fallback delivery cost in major units (default: pricing.default_delivery).
    #[arg(short, long)]
    pub delivery: Option<String>,
}

/// Arguments for the promotions command.
#[derive(Args)]
pub struct PromotionsArgs {
    /// Promotion catalog file (default: pricing.catalog from config).
    #[arg(long)]
    pub catalog: Option<String>,

    /// Show only active promotions.
    #[arg(short, long)]
    pub active: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
