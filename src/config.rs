//! Storefront configuration, read from TOML.
//!
//! Lookup order: the file named by `GROCER_CONFIG`, else `grocer.toml` in the working
//! directory. A missing file means defaults; every section and field is optional.
//!
//! ```toml
//! [branding]
//! name = "Grocer"
//! tagline = "Fresh groceries at your door"
//!
//! [fetch]
//! timeout_ms = 8000
//!
//! [store]
//! buffer_size = 32
//!
//! [backend]          # omit to serve from the in-process stores
//! url = "https://project.example.co"
//! anon_key = "public-anon-key"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const CONFIG_ENV: &str = "GROCER_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "grocer.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Cannot write config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Branding {
    pub name: String,
    pub tagline: String,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            name: "Grocer".to_string(),
            tagline: "Fresh groceries at your door".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Upper bound for one screen fetch cycle.
    pub timeout_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout_ms: 8000 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Request queue length of each record store.
    pub buffer_size: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { buffer_size: 32 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    pub branding: Branding,
    pub fetch: FetchConfig,
    pub store: StoreConfig,
    pub backend: Option<BackendConfig>,
}

impl StorefrontConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.fetch.timeout_ms == 0 {
            return Err(ConfigError::Invalid("fetch.timeout_ms must be positive".into()));
        }
        if self.store.buffer_size == 0 {
            return Err(ConfigError::Invalid("store.buffer_size must be positive".into()));
        }
        if let Some(backend) = &self.backend {
            if backend.url.trim().is_empty() {
                return Err(ConfigError::Invalid("backend.url must not be empty".into()));
            }
        }
        Ok(())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch.timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = StorefrontConfig::from_toml_str("").unwrap();
        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(config.fetch_timeout(), Duration::from_millis(8000));
        assert!(config.backend.is_none());
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config = StorefrontConfig::from_toml_str(
            r#"
            [branding]
            name = "Basket Bros"

            [fetch]
            timeout_ms = 1500

            [backend]
            url = "https://shop.example.co"
            anon_key = "k"
            "#,
        )
        .unwrap();
        assert_eq!(config.branding.name, "Basket Bros");
        assert_eq!(config.branding.tagline, Branding::default().tagline);
        assert_eq!(config.fetch.timeout_ms, 1500);
        assert_eq!(config.store.buffer_size, 32);
        assert_eq!(config.backend.unwrap().anon_key, "k");
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            StorefrontConfig::from_toml_str("[fetch]\ntimeout_ms = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            StorefrontConfig::from_toml_str("[fetch]\ntimeout_ms = \"soon\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_gives_defaults_and_save_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grocer.toml");

        assert_eq!(StorefrontConfig::load_from(&path).unwrap(), StorefrontConfig::default());

        let mut config = StorefrontConfig::default();
        config.fetch.timeout_ms = 250;
        config.save_to(&path).unwrap();
        assert_eq!(StorefrontConfig::load_from(&path).unwrap(), config);
    }
}
