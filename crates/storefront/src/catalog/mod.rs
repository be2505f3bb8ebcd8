//! Product catalog API client.
//!
//! # Architecture
//!
//! - Plain REST over `reqwest`, JSON bodies decoded with `serde_json`
//! - The catalog is the source of truth for product data; nothing is cached
//! - Reads are best-effort: no retries, callers decide how to degrade
//!
//! # Example
//!
//! ```rust,ignore
//! use cartwheel_storefront::catalog::CatalogClient;
//!
//! let client = CatalogClient::new(&config.catalog_url)?;
//!
//! let page = client.search("phone", 5).await?;
//! let product = client.product(page.products[0].id).await?;
//! let payload = product.to_cart_product();
//! ```

mod types;

pub use types::{Category, Product, ProductPage};

use std::sync::Arc;

use cartwheel_core::ProductId;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

/// Products fetched for the shop listing before local filtering.
pub const SHOP_PAGE_LIMIT: u32 = 100;

/// Products shown on the home page.
pub const FEATURED_LIMIT: u32 = 8;

/// Results returned by the navbar search.
pub const SUGGEST_LIMIT: u32 = 5;

/// Queries shorter than this are not sent to the catalog.
pub const SUGGEST_MIN_CHARS: usize = 2;

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Response body did not match the expected shape.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Base URL cannot carry path segments.
    #[error("Invalid catalog URL: {0}")]
    InvalidBaseUrl(String),
}

/// Client for the product catalog API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl CatalogClient {
    /// Create a new catalog client rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be a base or the HTTP client fails
    /// to build.
    pub fn new(base_url: &Url) -> Result<Self, CatalogError> {
        if base_url.cannot_be_a_base() {
            return Err(CatalogError::InvalidBaseUrl(base_url.to_string()));
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("cartwheel/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                base_url: base_url.clone(),
            }),
        })
    }

    /// The configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Build `base/segments...?query`. Segments are percent-encoded.
    fn endpoint(&self, segments: &[&str], query: &[(&str, String)]) -> Url {
        let mut url = self.inner.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        url
    }

    /// GET `url` and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, CatalogError> {
        debug!(%url, "catalog request");
        let response = self.inner.client.get(url.clone()).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(url.path().to_string()));
        }

        // Read as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Catalog API returned non-success status"
            );
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse catalog response"
            );
            CatalogError::Parse(e.to_string())
        })
    }

    /// List products, `limit` at a time starting at `skip`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or decoding fails.
    #[instrument(skip(self))]
    pub async fn list_products(&self, limit: u32, skip: u32) -> Result<ProductPage, CatalogError> {
        let url = self.endpoint(
            &["products"],
            &[("limit", limit.to_string()), ("skip", skip.to_string())],
        );
        self.get_json(url).await
    }

    /// Fetch one product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for an unknown id, or another error
    /// if the request or decoding fails.
    #[instrument(skip(self))]
    pub async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        let url = self.endpoint(&["products", &id.to_string()], &[]);
        self.get_json(url).await
    }

    /// List all categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or decoding fails.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<Category>, CatalogError> {
        let url = self.endpoint(&["products", "categories"], &[]);
        self.get_json(url).await
    }

    /// Products in one category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or decoding fails.
    #[instrument(skip(self))]
    pub async fn products_by_category(&self, slug: &str) -> Result<ProductPage, CatalogError> {
        let url = self.endpoint(&["products", "category", slug], &[]);
        self.get_json(url).await
    }

    /// Full-text search, at most `limit` results.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or decoding fails.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str, limit: u32) -> Result<ProductPage, CatalogError> {
        let url = self.endpoint(
            &["products", "search"],
            &[("q", query.to_string()), ("limit", limit.to_string())],
        );
        self.get_json(url).await
    }

    /// Navbar search: short queries return nothing without a request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or decoding fails.
    pub async fn suggest(&self, query: &str) -> Result<Vec<Product>, CatalogError> {
        let query = query.trim();
        if query.chars().count() < SUGGEST_MIN_CHARS {
            return Ok(Vec::new());
        }
        Ok(self.search(query, SUGGEST_LIMIT).await?.products)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> CatalogClient {
        CatalogClient::new(&Url::parse(base).unwrap()).unwrap()
    }

    #[test]
    fn test_endpoint_from_root() {
        let c = client("https://dummyjson.com");
        assert_eq!(
            c.endpoint(&["products", "7"], &[]).as_str(),
            "https://dummyjson.com/products/7"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let c = client("http://localhost:9000/api/");
        assert_eq!(
            c.endpoint(&["products", "categories"], &[]).as_str(),
            "http://localhost:9000/api/products/categories"
        );

        let c = client("http://localhost:9000/api");
        assert_eq!(
            c.endpoint(&["products"], &[("limit", "8".to_string())]).as_str(),
            "http://localhost:9000/api/products?limit=8"
        );
    }

    #[test]
    fn test_endpoint_encodes_user_input() {
        let c = client("https://dummyjson.com");
        let url = c.endpoint(
            &["products", "search"],
            &[("q", "red & blue".to_string()), ("limit", "5".to_string())],
        );
        assert_eq!(url.query(), Some("q=red+%26+blue&limit=5"));

        let url = c.endpoint(&["products", "category", "../admin"], &[]);
        assert!(!url.path().ends_with("/admin"));
    }

    #[test]
    fn test_rejects_non_base_url() {
        let url = Url::parse("mailto:shop@example.com").unwrap();
        assert!(matches!(
            CatalogClient::new(&url),
            Err(CatalogError::InvalidBaseUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_suggest_short_query_skips_request() {
        // Port 9 (discard) is never contacted for short queries.
        let c = client("http://127.0.0.1:9");
        assert!(c.suggest(" a ").await.unwrap().is_empty());
        assert!(c.suggest("").await.unwrap().is_empty());
    }

    #[test]
    fn test_error_display() {
        let err = CatalogError::Api {
            status: 503,
            message: "maintenance".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 503 - maintenance");
        assert_eq!(
            CatalogError::NotFound("/products/0".to_string()).to_string(),
            "Not found: /products/0"
        );
    }
}
