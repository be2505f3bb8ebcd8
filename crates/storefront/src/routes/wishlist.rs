//! Wishlist route handlers.

use axum::{Json, extract::State};
use cartwheel_core::{CartProduct, SessionAction, WishlistItem};
use serde::Serialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::extract::AppJson;
use crate::state::AppState;

/// Wishlist entries after a read or toggle.
#[derive(Debug, Serialize)]
pub struct WishlistView {
    pub items: Vec<WishlistItem>,
    /// Whether the toggled product is now wishlisted. Absent on plain reads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wishlisted: Option<bool>,
}

#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<WishlistView> {
    let store = state.session().lock().await;
    Json(WishlistView {
        items: store.state().wishlist().to_vec(),
        wishlisted: None,
    })
}

/// Add the product if absent, remove it if present. Requires a logged-in
/// user.
#[instrument(skip(state, product), fields(product_id = %product.id))]
pub async fn toggle(
    State(state): State<AppState>,
    AppJson(product): AppJson<CartProduct>,
) -> Result<Json<WishlistView>> {
    let id = product.id;
    let mut store = state.session().lock().await;
    if !store.state().is_logged_in() {
        return Err(AppError::login_required());
    }
    let session = store.dispatch(SessionAction::ToggleWishlist(product));
    Ok(Json(WishlistView {
        items: session.wishlist().to_vec(),
        wishlisted: Some(session.in_wishlist(id)),
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use cartwheel_core::MemoryStorage;
    use serde_json::json;

    use crate::routes::test_support::{app, get, post, product, snapshot, state_with};

    #[tokio::test]
    async fn test_toggle_requires_login() {
        let state = state_with(Arc::new(MemoryStorage::new()));
        let app = app(state.clone());

        let body = serde_json::to_value(product(4, 1_299)).unwrap();
        let (status, _) = post(&app, "/wishlist/toggle", &body).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(snapshot(&state).await.wishlist().is_empty());
    }

    #[tokio::test]
    async fn test_toggle_twice_restores() {
        let app = app(state_with(Arc::new(MemoryStorage::new())));
        post(
            &app,
            "/auth/login",
            &json!({ "name": "Ada", "email": "ada@example.com" }),
        )
        .await;

        let body = serde_json::to_value(product(4, 1_299)).unwrap();
        let (status, view) = post(&app, "/wishlist/toggle", &body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["wishlisted"], true);
        assert_eq!(view["items"][0]["quantity"], 1);

        let (_, view) = post(&app, "/wishlist/toggle", &body).await;
        assert_eq!(view["wishlisted"], false);

        let (_, view) = get(&app, "/wishlist").await;
        assert_eq!(view, json!({ "items": [] }));
    }
}
