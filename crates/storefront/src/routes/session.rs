//! Raw session access: the whole state, and actions dispatched as data.

use axum::{Json, extract::State};
use cartwheel_core::{Price, SessionAction, SessionState};
use serde::Serialize;
use tracing::instrument;

use crate::extract::AppJson;
use crate::state::AppState;

/// Full session state plus the counts the navbar shows.
#[derive(Debug, Serialize)]
pub struct SessionView {
    #[serde(flatten)]
    pub state: SessionState,
    pub item_count: u64,
    pub wishlist_count: usize,
    pub subtotal: Price,
    pub logged_in: bool,
}

impl From<&SessionState> for SessionView {
    fn from(state: &SessionState) -> Self {
        Self {
            state: state.clone(),
            item_count: state.item_count(),
            wishlist_count: state.wishlist().len(),
            subtotal: state.subtotal(),
            logged_in: state.is_logged_in(),
        }
    }
}

/// Current session.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<SessionView> {
    let store = state.session().lock().await;
    Json(SessionView::from(store.state()))
}

/// Dispatch any session action as-is and return the resulting session.
///
/// No login checks are applied here; the store itself never enforces them.
#[instrument(skip(state, action), fields(action = action.name()))]
pub async fn dispatch(
    State(state): State<AppState>,
    AppJson(action): AppJson<SessionAction>,
) -> Json<SessionView> {
    let mut store = state.session().lock().await;
    Json(SessionView::from(store.dispatch(action)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use cartwheel_core::{MemoryStorage, SessionStorage};
    use serde_json::json;

    use crate::routes::test_support::{app, get, post, state_with};

    #[tokio::test]
    async fn test_empty_session() {
        let app = app(state_with(Arc::new(MemoryStorage::new())));
        let (status, body) = get(&app, "/session").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["items"], json!([]));
        assert_eq!(body["user"], json!(null));
        assert_eq!(body["item_count"], 0);
        assert_eq!(body["logged_in"], false);
    }

    #[tokio::test]
    async fn test_actions_dispatch_and_persist() {
        let storage = Arc::new(MemoryStorage::new());
        let app = app(state_with(Arc::clone(&storage)));

        let add = json!({
            "type": "addToCart",
            "payload": { "id": 3, "title": "Powder Canister", "price": 14.99, "thumbnail": "p.webp" }
        });
        post(&app, "/session/actions", &add).await;
        let (status, body) = post(&app, "/session/actions", &add).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["item_count"], 2);
        assert_eq!(body["subtotal"], json!(29.98));

        let dec = json!({ "type": "updateQuantity", "payload": { "id": 3, "type": "dec" } });
        let (_, body) = post(&app, "/session/actions", &dec).await;
        assert_eq!(body["items"][0]["quantity"], 1);

        assert_eq!(storage.load().item_count(), 1);
    }

    #[tokio::test]
    async fn test_unknown_action_rejected() {
        let app = app(state_with(Arc::new(MemoryStorage::new())));
        let (status, body) =
            post(&app, "/session/actions", &json!({ "type": "emptyCart" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("emptyCart"));
    }

    #[tokio::test]
    async fn test_huge_price_saturates_instead_of_failing() {
        let app = app(state_with(Arc::new(MemoryStorage::new())));
        let add = json!({
            "type": "addToCart",
            "payload": { "id": 1, "title": "Vault", "price": 7e28, "thumbnail": "v.webp" }
        });
        post(&app, "/session/actions", &add).await;
        let (status, body) = post(&app, "/session/actions", &add).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["item_count"], 2);

        let (status, body) = get(&app, "/cart").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["subtotal"].as_f64().unwrap() > 7e28);
    }
}
