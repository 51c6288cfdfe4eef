//! # Shell Configuration
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`STOREFRONT_*`)
//! 2. Config file (`shell.toml`)
//! 3. Defaults (this file)
//!
//! ## Config File Location
//! - Path given on the command line, else
//! - `STOREFRONT_CONFIG`, else
//! - the platform config dir (e.g. `~/.config/storefront/shell.toml`)
//!
//! A missing file is not an error. Configuration is read-only after startup.
//!
//! ## Example
//! ```toml
//! store_name = "Hardware Store"
//! currency_symbol = "$"
//! currency_decimals = 2
//! log_filter = "info,storefront_core=trace"
//! ```

use std::path::{Path, PathBuf};

use rust_decimal::RoundingStrategy;
use serde::{Deserialize, Serialize};
use storefront_core::Money;
use tracing::{debug, info, warn};

use crate::error::{ShellError, ShellResult};

/// Longest accepted store name.
const MAX_STORE_NAME_LEN: usize = 100;

/// No real currency shows more places than this.
const MAX_CURRENCY_DECIMALS: u8 = 4;

/// Shell configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Title shown on the login screen
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    /// Tracing filter used when `RUST_LOG` is unset
    pub log_filter: Option<String>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        ShellConfig {
            store_name: "Hardware Store".to_string(),
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
            log_filter: None,
        }
    }
}

impl ShellConfig {
    /// Loads configuration from file and environment.
    ///
    /// ## Loading Order
    /// 1. Start with defaults
    /// 2. Override with the config file (if it exists)
    /// 3. Override with environment variables
    /// 4. Validate
    pub fn load(config_path: Option<PathBuf>) -> ShellResult<Self> {
        let mut config = Self::default();

        let path = config_path
            .or_else(|| std::env::var_os("STOREFRONT_CONFIG").map(PathBuf::from))
            .or_else(Self::default_config_path);

        if let Some(path) = path {
            if path.exists() {
                info!(?path, "Loading shell config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Reads and parses one config file, without env overrides.
    pub fn from_file(path: &Path) -> ShellResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ShellError::ConfigLoadFailed(format!("{}: {}", path.display(), e)))?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ShellResult<()> {
        let name = self.store_name.trim();
        if name.is_empty() {
            return Err(ShellError::InvalidConfig(
                "store_name must not be empty".to_string(),
            ));
        }
        if name.chars().count() > MAX_STORE_NAME_LEN {
            return Err(ShellError::InvalidConfig(format!(
                "store_name must be at most {} characters",
                MAX_STORE_NAME_LEN
            )));
        }
        if self.currency_decimals > MAX_CURRENCY_DECIMALS {
            return Err(ShellError::InvalidConfig(format!(
                "currency_decimals must be at most {}",
                MAX_CURRENCY_DECIMALS
            )));
        }
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `STOREFRONT_*` overrides from a variable lookup.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(name) = lookup("STOREFRONT_STORE_NAME") {
            debug!(store_name = %name, "Overriding store name from environment");
            self.store_name = name;
        }

        if let Some(symbol) = lookup("STOREFRONT_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }

        if let Some(decimals) = lookup("STOREFRONT_CURRENCY_DECIMALS") {
            match decimals.parse() {
                Ok(d) => self.currency_decimals = d,
                Err(_) => warn!(value = %decimals, "Ignoring invalid STOREFRONT_CURRENCY_DECIMALS"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "storefront", "storefront")
            .map(|dirs| dirs.config_dir().join("shell.toml"))
    }

    /// Formats a cent amount as a currency string.
    ///
    /// Amounts are always cents; they are rescaled to `currency_decimals`,
    /// rounding half away from zero when fewer places are shown. The only
    /// place amounts are rounded.
    ///
    /// ```text
    ///   1999 cents, decimals = 0  ──►  "$20"
    ///   1999 cents, decimals = 2  ──►  "$19.99"
    ///   1999 cents, decimals = 3  ──►  "$19.990"
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        let decimals = u32::from(self.currency_decimals);
        let amount = Money::from_cents(cents)
            .to_decimal()
            .round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);

        // a value that rounds to zero shows no sign
        let sign = if amount.is_sign_negative() && !amount.is_zero() {
            "-"
        } else {
            ""
        };

        format!(
            "{}{}{:.prec$}",
            sign,
            self.currency_symbol,
            amount.abs(),
            prec = decimals as usize
        )
    }
}
