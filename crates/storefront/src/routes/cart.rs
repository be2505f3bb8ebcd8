//! Cart route handlers.
//!
//! Mutations return the updated cart so clients can re-render without a
//! second request.

use axum::{Json, extract::State};
use cartwheel_core::{CartProduct, Direction, ProductId, SessionAction};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::checkout::CheckoutSummary;
use crate::error::{AppError, Result};
use crate::extract::AppJson;
use crate::state::AppState;

/// Update quantity request.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub id: ProductId,
    #[serde(alias = "type")]
    pub direction: Direction,
}

/// Remove line request.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub id: ProductId,
}

/// Cart badge count.
#[derive(Debug, Serialize)]
pub struct CartCount {
    pub count: u64,
}

/// Cart lines and totals.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<CheckoutSummary> {
    let store = state.session().lock().await;
    Json(CheckoutSummary::from_state(store.state()))
}

#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> Json<CartCount> {
    let store = state.session().lock().await;
    Json(CartCount {
        count: store.state().item_count(),
    })
}

/// Add one unit of a product. Requires a logged-in user.
#[instrument(skip(state, product), fields(product_id = %product.id))]
pub async fn add(
    State(state): State<AppState>,
    AppJson(product): AppJson<CartProduct>,
) -> Result<Json<CheckoutSummary>> {
    let mut store = state.session().lock().await;
    if !store.state().is_logged_in() {
        return Err(AppError::login_required());
    }
    let session = store.dispatch(SessionAction::AddToCart(product));
    Ok(Json(CheckoutSummary::from_state(session)))
}

/// Increment or decrement a line. Decrementing at one is a no-op.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    AppJson(form): AppJson<UpdateCartForm>,
) -> Json<CheckoutSummary> {
    let mut store = state.session().lock().await;
    let session = store.dispatch(SessionAction::UpdateQuantity {
        id: form.id,
        direction: form.direction,
    });
    Json(CheckoutSummary::from_state(session))
}

/// Remove a line entirely.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    AppJson(form): AppJson<RemoveFromCartForm>,
) -> Json<CheckoutSummary> {
    let mut store = state.session().lock().await;
    let session = store.dispatch(SessionAction::RemoveFromCart(form.id));
    Json(CheckoutSummary::from_state(session))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use cartwheel_core::{MemoryStorage, SessionState, SessionStorage};
    use serde_json::{Value, json};

    use crate::routes::test_support::{app, get, post, product, snapshot, state_with};

    async fn login(app: &axum::Router) {
        post(
            app,
            "/auth/login",
            &json!({ "name": "Ada", "email": "ada@example.com" }),
        )
        .await;
    }

    fn body_of(id: i64, cents: i64) -> Value {
        serde_json::to_value(product(id, cents)).unwrap()
    }

    #[tokio::test]
    async fn test_add_requires_login() {
        let storage = Arc::new(MemoryStorage::new());
        let state = state_with(Arc::clone(&storage));
        let app = app(state.clone());

        let (status, body) = post(&app, "/cart/add", &body_of(1, 999)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Please login first");
        assert_eq!(snapshot(&state).await, SessionState::default());
        assert_eq!(storage.raw(), None);
    }

    #[tokio::test]
    async fn test_login_add_show() {
        let storage = Arc::new(MemoryStorage::new());
        let app = app(state_with(Arc::clone(&storage)));
        login(&app).await;

        post(&app, "/cart/add", &body_of(1, 999)).await;
        post(&app, "/cart/add", &body_of(2, 1_499)).await;
        let (status, body) = post(&app, "/cart/add", &body_of(1, 999)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["items"].as_array().unwrap().len(), 2);
        assert_eq!(body["items"][0]["quantity"], 2);

        let (_, body) = get(&app, "/cart").await;
        assert_eq!(body["item_count"], 3);
        assert_eq!(body["subtotal"], json!(34.97));
        assert_eq!(body["total"], json!(34.97));
        assert_eq!(body["shipping"], "FREE");

        let (_, body) = get(&app, "/cart/count").await;
        assert_eq!(body["count"], 3);

        assert_eq!(storage.load().item_count(), 3);
    }

    #[tokio::test]
    async fn test_update_and_remove() {
        let state = state_with(Arc::new(MemoryStorage::new()));
        let app = app(state.clone());
        login(&app).await;
        post(&app, "/cart/add", &body_of(7, 100)).await;

        let (_, body) = post(&app, "/cart/update", &json!({ "id": 7, "direction": "dec" })).await;
        assert_eq!(body["items"][0]["quantity"], 1);

        let (_, body) = post(&app, "/cart/update", &json!({ "id": 7, "type": "inc" })).await;
        assert_eq!(body["items"][0]["quantity"], 2);

        let (_, body) = post(&app, "/cart/remove", &json!({ "id": 99 })).await;
        assert_eq!(body["item_count"], 2);

        let (_, body) = post(&app, "/cart/remove", &json!({ "id": 7 })).await;
        assert_eq!(body["items"], json!([]));
        assert_eq!(snapshot(&state).await.item_count(), 0);
    }
}
