//! API configuration

use serde::Deserialize;

use domain_claimant::{ClaimantError, StaticAddressLookup};
use infra_store::StoreBackend;

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// JSON file backing the draft store; empty keeps drafts in memory
    pub store_path: String,
    /// JSON address book replacing the built-in table; empty uses the built-in one
    pub address_book_path: String,
    /// Log level
    pub log_level: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            store_path: String::new(),
            address_book_path: String::new(),
            log_level: "info".to_string(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `WIZARD_`-prefixed environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("WIZARD"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn store_backend(&self) -> StoreBackend {
        StoreBackend::from_path(&self.store_path)
    }

    /// Loads the configured address book, or the built-in one
    pub fn address_lookup(&self) -> Result<StaticAddressLookup, ClaimantError> {
        let path = self.address_book_path.trim();
        if path.is_empty() {
            Ok(StaticAddressLookup::builtin())
        } else {
            StaticAddressLookup::from_path(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.server_addr(), "0.0.0.0:8080");
        assert_eq!(config.store_backend(), StoreBackend::Memory);
        assert!(!config.address_lookup().unwrap().is_empty());
    }

    #[test]
    fn test_missing_address_book_is_an_error() {
        let config = ApiConfig {
            address_book_path: "/definitely/not/here.json".to_string(),
            ..Default::default()
        };
        assert!(config.address_lookup().is_err());
    }
}
