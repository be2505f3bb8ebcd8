//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::{CatalogClient, CatalogError};
use crate::config::StorefrontConfig;
use crate::session::SharedSession;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Holds the configuration, the catalog
/// client, and the one session store every session route acts on.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogClient,
    session: SharedSession,
}

impl AppState {
    /// Create the application state, building a catalog client from the
    /// configured base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog client cannot be built.
    pub fn new(config: StorefrontConfig, session: SharedSession) -> Result<Self, CatalogError> {
        let catalog = CatalogClient::new(&config.catalog_url)?;
        Ok(Self::with_parts(config, catalog, session))
    }

    /// Assemble state from already-built parts.
    #[must_use]
    pub fn with_parts(
        config: StorefrontConfig,
        catalog: CatalogClient,
        session: SharedSession,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                session,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog API client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Get a reference to the shared session store.
    #[must_use]
    pub fn session(&self) -> &SharedSession {
        &self.inner.session
    }
}
