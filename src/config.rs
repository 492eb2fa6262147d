//! User configuration, read from `config.toml`.

use crate::currency::{CurrencyPair, DEFAULT_CURRENCIES};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const APP_DIR: &str = "ratecalc";

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Currency the calculator result is entered in.
    pub from: String,
    /// Currency the result is converted to.
    pub to: String,
    /// Saved exchange-rate API response. Defaults to the cache directory.
    pub rates_file: Option<PathBuf>,
    /// Currencies offered for selection.
    pub currencies: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            from: "TWD".to_string(),
            to: "USD".to_string(),
            rates_file: None,
            currencies: DEFAULT_CURRENCIES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Config {
    /// Default location: `$XDG_CONFIG_HOME/ratecalc/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
    }

    /// Load the config from `path`, or the default location.
    ///
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path.map(Path::to_path_buf).or_else(Self::default_path) else {
            warn!("no config directory, using defaults");
            return Ok(Self::default());
        };

        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = Self::parse(&text)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        for code in [&config.from, &config.to] {
            if !config.currencies.contains(code) {
                warn!(%code, "currency is not in the configured list");
            }
        }
        Ok(config)
    }

    /// Where the rate table is read from.
    pub fn rates_path(&self) -> Option<PathBuf> {
        self.rates_file
            .clone()
            .or_else(|| dirs::cache_dir().map(|dir| dir.join(APP_DIR).join("rates.json")))
    }

    pub fn pair(&self) -> CurrencyPair {
        CurrencyPair::new(&self.from, &self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_config() {
        let config = Config::parse("from = \"JPY\"\nrates_file = \"/tmp/rates.json\"\n").unwrap();
        assert_eq!(config.from, "JPY");
        assert_eq!(config.to, "USD");
        assert_eq!(config.rates_path(), Some(PathBuf::from("/tmp/rates.json")));
        assert_eq!(config.pair(), CurrencyPair::new("JPY", "USD"));
    }

    #[test]
    fn test_currency_list() {
        let config = Config::parse("currencies = [\"GBP\", \"USD\"]\nfrom = \"GBP\"\n").unwrap();
        assert_eq!(config.currencies, vec!["GBP", "USD"]);
    }

    #[test]
    fn test_malformed_config() {
        assert!(Config::parse("from = 3").is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = Config::load(Some(Path::new("/nonexistent/ratecalc.toml"))).unwrap();
        assert_eq!(config, Config::default());
    }
}
