//! CLI configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use turbo_pricing::{Currency, Money};

/// Config file names searched from the working directory upwards.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["turbo-price.toml", ".turbo-price.toml", "turbo-price.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricingCliConfig {
    /// Pricing defaults.
    #[serde(default)]
    pub pricing: PricingConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PricingCliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        Self::parse(&content, path.ends_with(".json"))
            .with_context(|| format!("Failed to parse config file: {}", path))
    }

    /// Parse config content, as JSON or TOML.
    pub fn parse(content: &str, json: bool) -> Result<Self> {
        if json {
            Ok(serde_json::from_str(content)?)
        } else {
            Ok(toml::from_str(content)?)
        }
    }

    /// Currency carts and catalogs are priced in.
    pub fn currency(&self) -> Result<Currency> {
        Currency::from_code(&self.pricing.currency)
            .with_context(|| format!("Unsupported currency: {}", self.pricing.currency))
    }

    /// Delivery cost used when no cart item carries a delivery hint.
    pub fn default_delivery(&self) -> Result<Money> {
        let currency = self.currency()?;
        let delivery = Money::parse(&self.pricing.default_delivery, currency).with_context(|| {
            format!(
                "Invalid pricing.default_delivery: {}",
                self.pricing.default_delivery
            )
        })?;

        if delivery.is_negative() {
            anyhow::bail!("pricing.default_delivery must not be negative");
        }

        Ok(delivery)
    }
}

/// Pricing defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// ISO currency code (default: TND).
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Fallback delivery cost in major units (default: 8.000).
    #[serde(default = "default_delivery")]
    pub default_delivery: String,

    /// Promotion catalog file used when `--catalog` is not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,
}

fn default_currency() -> String {
    Currency::TND.code().to_string()
}

fn default_delivery() -> String {
    "8.000".to_string()
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            default_delivery: default_delivery(),
            catalog: None,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `TURBO_PRICE_LOG` is unset (default: warn).
    #[serde(default = "default_level")]
    pub level: String,

    /// Emit log lines as JSON.
    #[serde(default)]
    pub json: bool,
}

fn default_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

/// Generate a default turbo-price.toml config file.
pub fn generate_default_config() -> String {
    r#"# Pricing CLI configuration

[pricing]
currency = "TND"
# Used when no cart item carries its own delivery cost
default_delivery = "8.000"
# catalog = "promotions.json"

[logging]
# Overridden by the TURBO_PRICE_LOG environment variable
level = "warn"
json = false
"#
    .to_string()
}
