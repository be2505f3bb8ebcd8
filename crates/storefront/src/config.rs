//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//! - `CARTWHEEL_HOST` - Bind address (default: 127.0.0.1)
//! - `CARTWHEEL_PORT` - Listen port (default: 3000)
//! - `CARTWHEEL_CATALOG_URL` - Product catalog API base URL (default: <https://dummyjson.com>)
//! - `CARTWHEEL_DATA_DIR` - Directory holding persisted session slots (default: .cartwheel)
//! - `CARTWHEEL_STORAGE_SLOT` - Name of the session slot (default: `cart_app_data`)
//! - `CARTWHEEL_CHECKOUT_DELAY_MS` - Simulated payment delay in milliseconds (default: 2000)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default slot name; matches the key the browser storefront wrote to.
pub const DEFAULT_STORAGE_SLOT: &str = "cart_app_data";

/// Default public catalog.
pub const DEFAULT_CATALOG_URL: &str = "https://dummyjson.com";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Base URL of the product catalog API
    pub catalog_url: Url,
    /// Directory that holds slot files
    pub data_dir: PathBuf,
    /// Slot name the session is persisted under
    pub storage_slot: String,
    /// How long checkout pretends to process a payment
    pub checkout_delay: Duration,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any value is present but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = get("CARTWHEEL_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| invalid("CARTWHEEL_HOST", e))?;
        let port = get("CARTWHEEL_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| invalid("CARTWHEEL_PORT", e))?;
        let catalog_url = parse_catalog_url(&get("CARTWHEEL_CATALOG_URL", DEFAULT_CATALOG_URL))?;
        let data_dir = PathBuf::from(get("CARTWHEEL_DATA_DIR", ".cartwheel"));
        let storage_slot = get("CARTWHEEL_STORAGE_SLOT", DEFAULT_STORAGE_SLOT);
        validate_slot_name(&storage_slot)?;
        let delay_ms = get("CARTWHEEL_CHECKOUT_DELAY_MS", "2000")
            .parse::<u64>()
            .map_err(|e| invalid("CARTWHEEL_CHECKOUT_DELAY_MS", e))?;

        Ok(Self {
            host,
            port,
            catalog_url,
            data_dir,
            storage_slot,
            checkout_delay: Duration::from_millis(delay_ms),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Path of the file backing the session slot.
    #[must_use]
    pub fn slot_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json", self.storage_slot))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn invalid(key: &str, err: impl ToString) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), err.to_string())
}

/// Parse the catalog base URL. Only http(s) is accepted.
fn parse_catalog_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| invalid("CARTWHEEL_CATALOG_URL", e))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(
            "CARTWHEEL_CATALOG_URL",
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(url)
}

/// Slot names become file names, so keep them to a safe alphabet.
fn validate_slot_name(slot: &str) -> Result<(), ConfigError> {
    if slot.is_empty() {
        return Err(invalid("CARTWHEEL_STORAGE_SLOT", "cannot be empty"));
    }
    if let Some(bad) = slot
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
    {
        return Err(invalid(
            "CARTWHEEL_STORAGE_SLOT",
            format!("invalid character '{bad}'"),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.catalog_url.as_str(), "https://dummyjson.com/");
        assert_eq!(config.storage_slot, DEFAULT_STORAGE_SLOT);
        assert_eq!(config.checkout_delay, Duration::from_secs(2));
        assert_eq!(
            config.slot_path(),
            PathBuf::from(".cartwheel/cart_app_data.json")
        );
    }

    #[test]
    fn test_overrides() {
        let config = StorefrontConfig::from_lookup(lookup(&[
            ("CARTWHEEL_HOST", "0.0.0.0"),
            ("CARTWHEEL_PORT", "8080"),
            ("CARTWHEEL_CATALOG_URL", "http://localhost:9000/api/"),
            ("CARTWHEEL_DATA_DIR", "/tmp/cw"),
            ("CARTWHEEL_STORAGE_SLOT", "tab-2"),
            ("CARTWHEEL_CHECKOUT_DELAY_MS", "0"),
        ]))
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.catalog_url.host_str(), Some("localhost"));
        assert_eq!(config.slot_path(), PathBuf::from("/tmp/cw/tab-2.json"));
        assert_eq!(config.checkout_delay, Duration::ZERO);
    }

    #[test]
    fn test_invalid_port() {
        let err = StorefrontConfig::from_lookup(lookup(&[("CARTWHEEL_PORT", "http")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref k, _) if k == "CARTWHEEL_PORT"));
    }

    #[test]
    fn test_catalog_url_scheme() {
        let err = StorefrontConfig::from_lookup(lookup(&[(
            "CARTWHEEL_CATALOG_URL",
            "ftp://dummyjson.com",
        )]))
        .unwrap_err();
        assert!(err.to_string().contains("unsupported scheme"));
    }

    #[test]
    fn test_slot_name_must_be_file_safe() {
        for bad in ["", "../etc/passwd", "cart data"] {
            assert!(
                StorefrontConfig::from_lookup(lookup(&[("CARTWHEEL_STORAGE_SLOT", bad)])).is_err(),
                "{bad:?} should be rejected"
            );
        }
    }
}
