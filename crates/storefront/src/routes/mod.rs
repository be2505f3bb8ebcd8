//! HTTP route handlers for storefront.
//!
//! Every handler speaks JSON. Session routes all act on the one shared
//! session store held in [`AppState`].
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//!
//! # Catalog
//! GET  /featured               - Home page products
//! GET  /products               - Catalog page (?limit=&skip=)
//! GET  /products/{id}          - Product detail
//! GET  /categories             - Category list
//! GET  /categories/{slug}      - Products in a category
//! GET  /search                 - Navbar suggestions (?q=)
//! GET  /shop                   - Filtered shop listing (?category=&q=&sort=)
//!
//! # Session
//! GET  /session                - Full session state with derived counts
//! POST /session/actions        - Dispatch a raw session action
//!
//! # Auth
//! POST /auth/login             - Log in with a name and email
//! POST /auth/logout            - Log out
//! GET  /account                - Profile of the logged-in user
//!
//! # Cart
//! GET  /cart                   - Cart lines and totals
//! GET  /cart/count             - Cart badge count
//! POST /cart/add               - Add one unit (requires login)
//! POST /cart/update            - Increment or decrement a line
//! POST /cart/remove            - Remove a line
//!
//! # Wishlist
//! GET  /wishlist               - Wishlist entries
//! POST /wishlist/toggle        - Add or remove (requires login)
//!
//! # Checkout
//! GET  /checkout               - Order summary
//! POST /checkout               - Place a simulated order
//! ```
//!
//! Unknown paths answer 404, and malformed request input answers 400, both
//! with the same `{ "error": ... }` body as every other failure.

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod products;
pub mod session;
pub mod wishlist;

use axum::{
    Router,
    http::Uri,
    routing::{get, post},
};

use crate::error::AppError;
use crate::state::AppState;

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/featured", get(products::featured))
        .route("/products", get(products::index))
        .route("/products/{id}", get(products::show))
        .route("/categories", get(products::categories))
        .route("/categories/{slug}", get(products::category))
        .route("/search", get(products::suggest))
        .route("/shop", get(products::shop))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::show))
        .route("/toggle", post(wishlist::toggle))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(catalog_routes())
        .route("/session", get(session::show))
        .route("/session/actions", post(session::dispatch))
        .nest("/auth", auth_routes())
        .route("/account", get(auth::account))
        .nest("/cart", cart_routes())
        .nest("/wishlist", wishlist_routes())
        .route("/checkout", get(checkout::summary).post(checkout::place))
        .fallback(not_found)
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use cartwheel_core::MemoryStorage;
    use serde_json::json;

    use super::test_support::{app, get, post, state_with};

    #[tokio::test]
    async fn test_unknown_path_is_json_404() {
        let app = app(state_with(Arc::new(MemoryStorage::new())));
        let (status, body) = get(&app, "/no/such/page").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Not found: /no/such/page");
    }

    #[tokio::test]
    async fn test_malformed_body_is_json_400() {
        let app = app(state_with(Arc::new(MemoryStorage::new())));
        let (status, body) = post(&app, "/cart/remove", &json!({ "id": "seven" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Bad request: "));
    }

    #[tokio::test]
    async fn test_bad_path_and_query_are_json_400() {
        let app = app(state_with(Arc::new(MemoryStorage::new())));

        let (status, body) = get(&app, "/products/abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        let (status, body) = get(&app, "/products?limit=lots").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }
}
