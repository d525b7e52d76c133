//! Persisted CLI defaults.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use terra_core::{Coins, Dec, LcdClientConfig};

pub const DEFAULT_URL: &str = "https://lcd.terra.dev";
pub const DEFAULT_CHAIN_ID: &str = "columbus-4";

/// Configuration error type.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Other configuration error.
    #[error("{0}")]
    Other(String),
}

/// Node settings read from `config.json`. Every field may be omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default = "default_chain_id")]
    pub chain_id: String,
    /// Coin list string, e.g. `0.015uluna,0.1ukrw`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_prices: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_adjustment: Option<Dec>,
}

fn default_url() -> String {
    DEFAULT_URL.to_string()
}

fn default_chain_id() -> String {
    DEFAULT_CHAIN_ID.to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            chain_id: default_chain_id(),
            gas_prices: None,
            gas_adjustment: None,
        }
    }
}

/// Values given on the command line. Set fields win over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub url: Option<String>,
    pub chain_id: Option<String>,
    pub gas_prices: Option<Coins>,
    pub gas_adjustment: Option<Dec>,
}

impl CliConfig {
    /// Merge command line values over this config and build the client config.
    pub fn resolve(self, overrides: Overrides) -> Result<LcdClientConfig, ConfigError> {
        let mut config = LcdClientConfig::new(
            overrides.url.unwrap_or(self.url),
            overrides.chain_id.unwrap_or(self.chain_id),
        );

        let gas_prices = match (overrides.gas_prices, self.gas_prices) {
            (Some(prices), _) => Some(prices),
            (None, Some(prices)) => Some(
                prices
                    .parse::<Coins>()
                    .map_err(|e| ConfigError::Other(format!("gas_prices: {e}")))?,
            ),
            (None, None) => None,
        };
        if let Some(prices) = gas_prices {
            config = config.with_gas_prices(prices);
        }

        if let Some(adjustment) = overrides.gas_adjustment.or(self.gas_adjustment) {
            config = config.with_gas_adjustment(adjustment);
        }

        Ok(config)
    }
}

/// Get the config directory.
pub fn get_config_dir() -> Result<PathBuf, ConfigError> {
    ProjectDirs::from("money", "terra", "terra")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| ConfigError::Other("Could not determine config directory".to_string()))
}

/// Get the config file path.
pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    get_config_dir().map(|dir| dir.join("config.json"))
}

/// Load configuration from `path`, or from the default location.
/// A missing file yields the defaults.
pub fn load_config(path: Option<&Path>) -> Result<CliConfig, ConfigError> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => get_config_path()?,
    };
    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(CliConfig::default());
    }

    let content = fs::read_to_string(&path)?;
    let config = serde_json::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("terra-cli-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_defaults() {
        let config = CliConfig::default();
        assert_eq!(config.url, "https://lcd.terra.dev");
        assert_eq!(config.chain_id, "columbus-4");

        let lcd = config.resolve(Overrides::default()).unwrap();
        assert_eq!(lcd, LcdClientConfig::new(DEFAULT_URL, DEFAULT_CHAIN_ID));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: CliConfig = serde_json::from_str(r#"{"chain_id":"tequila-0004"}"#).unwrap();
        assert_eq!(config.url, DEFAULT_URL);
        assert_eq!(config.chain_id, "tequila-0004");
        assert!(config.gas_prices.is_none());
    }

    #[test]
    fn test_flags_override_file() {
        let config = CliConfig {
            url: "http://file.example".to_string(),
            chain_id: "columbus-3".to_string(),
            gas_prices: Some("0.015uluna".to_string()),
            gas_adjustment: Some("1.2".parse().unwrap()),
        };
        let overrides = Overrides {
            chain_id: Some("columbus-4".to_string()),
            gas_adjustment: Some("1.4".parse().unwrap()),
            ..Default::default()
        };

        let lcd = config.resolve(overrides).unwrap();
        assert_eq!(lcd.url, "http://file.example");
        assert_eq!(lcd.chain_id, "columbus-4");
        assert_eq!(lcd.gas_prices.unwrap().to_string(), "0.015uluna");
        assert_eq!(lcd.gas_adjustment.unwrap().to_string(), "1.4");
    }

    #[test]
    fn test_invalid_gas_prices_in_file() {
        let config = CliConfig {
            gas_prices: Some("lots".to_string()),
            ..Default::default()
        };
        let err = config.resolve(Overrides::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Other(ref msg) if msg.starts_with("gas_prices")));
    }

    #[test]
    fn test_load_missing_file() {
        let path = temp_path("missing");
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_load_file() {
        let path = temp_path("load");
        fs::write(
            &path,
            r#"{"url":"http://127.0.0.1:1317","chain_id":"localterra","gas_adjustment":"1.5"}"#,
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.url, "http://127.0.0.1:1317");
        assert_eq!(config.chain_id, "localterra");
        assert_eq!(config.gas_adjustment, Some("1.5".parse().unwrap()));
    }

    #[test]
    fn test_load_corrupted_file() {
        let path = temp_path("corrupted");
        fs::write(&path, "{ not json").unwrap();

        let result = load_config(Some(&path));
        fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(ConfigError::Json(_))));
    }
}
