//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{PricingCliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Environment variable holding the log filter.
pub const LOG_ENV_VAR: &str = "TURBO_PRICE_LOG";

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: PricingCliConfig,
    /// Path the configuration was loaded from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (PricingCliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (PricingCliConfig::default(), None),
            }
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(PricingCliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = PricingCliConfig::load(config_path.to_str()?) {
                        return Some((config, config_path));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Install the tracing subscriber.
    ///
    /// `TURBO_PRICE_LOG` wins over the configured level; `--verbose` raises
    /// the configured level to debug. Logs go to stderr so JSON output on
    /// stdout stays parseable.
    pub fn init_tracing(&self, verbose: bool) -> Result<()> {
        let level = if verbose {
            "debug"
        } else {
            self.config.logging.level.as_str()
        };
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(level));

        let json = self.config.logging.json;
        tracing_subscriber::registry()
            .with(filter)
            .with(json.then(|| fmt::layer().json().with_writer(std::io::stderr)))
            .with((!json).then(|| fmt::layer().with_writer(std::io::stderr)))
            .try_init()
            .context("Failed to initialize logging")
    }

    /// Catalog file from `--catalog`, falling back to `pricing.catalog`.
    ///
    /// `--catalog` is relative to the working directory; `pricing.catalog`
    /// is relative to the config file it was read from.
    pub fn catalog_path(&self, arg: Option<&str>) -> Result<PathBuf> {
        if let Some(path) = arg {
            return Ok(self.resolve_path(path));
        }
        match &self.config.pricing.catalog {
            Some(path) => Ok(self.resolve_config_path(path)),
            None => anyhow::bail!("No promotion catalog given. Pass --catalog or set pricing.catalog."),
        }
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        self.cwd.join(path)
    }

    /// Resolve a path taken from the config file relative to that file's
    /// directory. Without a config file this is the working directory.
    pub fn resolve_config_path(&self, path: &str) -> PathBuf {
        let base = self
            .config_path
            .as_ref()
            .and_then(|config| self.cwd.join(config).parent().map(Path::to_path_buf))
            .unwrap_or_else(|| self.cwd.clone());
        base.join(path)
    }
}
