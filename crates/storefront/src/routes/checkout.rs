//! Checkout route handlers.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::checkout::{self, CheckoutError, CheckoutSummary, OrderConfirmation, ShippingDetails};
use crate::error::Result;
use crate::extract::AppJson;
use crate::state::AppState;

/// Order summary; 400 when the cart is empty.
#[instrument(skip(state))]
pub async fn summary(State(state): State<AppState>) -> Result<Json<CheckoutSummary>> {
    let store = state.session().lock().await;
    if store.state().items().is_empty() {
        return Err(CheckoutError::EmptyCart.into());
    }
    Ok(Json(CheckoutSummary::from_state(store.state())))
}

/// Place a simulated order.
///
/// The session lock is released before the payment delay starts.
#[instrument(skip(state, details))]
pub async fn place(
    State(state): State<AppState>,
    AppJson(details): AppJson<ShippingDetails>,
) -> Result<Json<OrderConfirmation>> {
    let snapshot = state.session().lock().await.state().clone();
    let confirmation =
        checkout::place_order(&snapshot, &details, state.config().checkout_delay).await?;
    Ok(Json(confirmation))
}
