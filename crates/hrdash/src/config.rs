//! Configuration management for hrdash.
//!
//! Configuration is loaded with figment from defaults, a TOML file and
//! `HRDASH_`-prefixed environment variables.

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::bookmarks::BOOKMARKS_KEY;
use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "hrdash";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "hrdash.db";

/// Application configuration.
///
/// Sources, highest precedence first:
/// 1. Environment variables (prefixed with `HRDASH_`, sections split on `__`)
/// 2. TOML config file at `~/.config/hrdash/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Record provider configuration.
    pub provider: ProviderConfig,
    /// Local storage configuration.
    pub storage: StorageConfig,
    /// Listing configuration.
    pub display: DisplayConfig,
}

/// Where employee records come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Base URL of the users API.
    pub base_url: String,
    /// Number of users requested per listing.
    pub limit: usize,
    /// HTTP timeout in seconds.
    pub timeout_secs: u64,
    /// Read users from this JSON file instead of the API.
    pub source_file: Option<PathBuf>,
    /// Seed for the synthetic enrichment. Random when unset.
    pub seed: Option<u64>,
}

/// Local storage configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/hrdash/hrdash.db`
    pub database_path: Option<PathBuf>,
    /// Storage key holding the bookmark set.
    pub bookmarks_key: String,
}

/// Listing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Employees per listing page.
    pub page_size: usize,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://dummyjson.com".to_string(),
            limit: 20,
            timeout_secs: 30,
            source_file: None,
            seed: None,
        }
    }
}

impl ProviderConfig {
    /// HTTP timeout as a Duration.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            bookmarks_key: BOOKMARKS_KEY.to_string(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { page_size: 8 }
    }
}

impl Config {
    /// Load configuration with an optional custom config path.
    ///
    /// A missing file is not an error; defaults apply.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);
        Self::from_figment(
            Figment::new()
                .merge(Serialized::defaults(Config::default()))
                .merge(Toml::file(&config_file))
                .merge(Env::prefixed("HRDASH_").split("__")),
        )
    }

    fn from_figment(figment: Figment) -> Result<Self> {
        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.provider.source_file.is_none() {
            let url = self.provider.base_url.trim();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(Error::ConfigValidation {
                    message: format!("provider.base_url must be an http(s) URL, got '{url}'"),
                });
            }
        }

        if self.provider.limit == 0 {
            return Err(Error::ConfigValidation {
                message: "provider.limit must be greater than 0".to_string(),
            });
        }

        if self.provider.timeout_secs == 0 {
            return Err(Error::ConfigValidation {
                message: "provider.timeout_secs must be greater than 0".to_string(),
            });
        }

        if self.storage.bookmarks_key.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "storage.bookmarks_key cannot be empty".to_string(),
            });
        }

        if self.display.page_size == 0 {
            return Err(Error::ConfigValidation {
                message: "display.page_size must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }

}
