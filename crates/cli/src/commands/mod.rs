//! Command implementations.
//!
//! Session commands take the store explicitly so they run the same against
//! the file slot or an in-memory one.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod wishlist;

use cartwheel_core::CartItem;
use cartwheel_storefront::catalog::CatalogClient;
use cartwheel_storefront::config::StorefrontConfig;
use cartwheel_storefront::session::{JsonFileStorage, SessionStore};
use thiserror::Error;

/// Errors raised by the commands themselves, before the store is touched.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Cart and wishlist changes need a logged-in user.
    #[error("Please login first")]
    NotLoggedIn,
}

/// Everything a command may need, built from the environment.
pub struct Context {
    pub config: StorefrontConfig,
    pub store: SessionStore,
    pub catalog: CatalogClient,
}

impl Context {
    /// Load configuration, open the session slot and build the catalog
    /// client.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid or the catalog URL
    /// cannot be used.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        let config = StorefrontConfig::from_env()?;
        let storage = JsonFileStorage::new(config.slot_path());
        tracing::debug!(path = %storage.path().display(), "Opening session slot");
        let store = SessionStore::open(storage);
        let catalog = CatalogClient::new(&config.catalog_url)?;
        Ok(Self {
            config,
            store,
            catalog,
        })
    }
}

/// One cart or wishlist line for terminal output.
pub(crate) fn format_line(item: &CartItem) -> String {
    format!(
        "#{:<5} {} x {} @ {} = {}",
        item.id.as_i64(),
        item.quantity,
        item.title,
        item.price,
        item.line_total()
    )
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use cartwheel_core::Quantity;

    use super::*;

    #[test]
    fn test_format_line() {
        let item = test_support::product(12, 1_999).with_quantity(Quantity::new(3).unwrap());
        assert_eq!(format_line(&item), "#12    3 x Product 12 @ $19.99 = $59.97");
    }
}
