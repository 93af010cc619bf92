//! CLI configuration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use storefront_commerce::{CartConfig, Currency};

/// CLI configuration file (`storefront.toml`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Cart storage configuration.
    #[serde(default)]
    pub cart: CartSection,

    /// Logging configuration.
    #[serde(default)]
    pub log: LogConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Engine settings derived from this file.
    pub fn cart_config(&self) -> CartConfig {
        CartConfig {
            currency: self.cart.currency,
        }
    }
}

/// Where the cart lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartSection {
    /// Cart file, relative to the working directory.
    #[serde(default = "default_cart_path")]
    pub path: PathBuf,

    /// Currency for a cart file that does not exist yet.
    #[serde(default)]
    pub currency: Currency,
}

fn default_cart_path() -> PathBuf {
    PathBuf::from("cart.json")
}

impl Default for CartSection {
    fn default() -> Self {
        Self {
            path: default_cart_path(),
            currency: Currency::default(),
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default level when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

fn default_level() -> String {
    "warn".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Human,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Human => "human",
            LogFormat::Json => "json",
        }
    }
}

/// Generate a default storefront.toml config file.
pub fn generate_default_config(cart_path: &str, currency: Currency) -> String {
    format!(
        r#"# Storefront cart configuration

[cart]
path = "{cart_path}"
currency = "{currency}"

[log]
# Overridden by RUST_LOG.
level = "warn"
# "human" or "json"
format = "human"
"#,
        cart_path = cart_path,
        currency = currency.code()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config: CliConfig = toml::from_str(&generate_default_config("carts/main.json", Currency::GBP)).unwrap();
        assert_eq!(config.cart.path, PathBuf::from("carts/main.json"));
        assert_eq!(config.cart.currency, Currency::GBP);
        assert_eq!(config.log, LogConfig::default());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: CliConfig = toml::from_str("[log]\nformat = \"json\"\n").unwrap();
        assert_eq!(config.cart, CartSection::default());
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn test_cart_config() {
        let config: CliConfig = toml::from_str("[cart]\ncurrency = \"PLN\"\n").unwrap();
        assert_eq!(config.cart_config().currency, Currency::PLN);
    }
}
