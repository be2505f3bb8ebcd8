//! Simulated checkout.
//!
//! There is no payment provider. Placing an order validates the shipping
//! form, waits for the configured delay to mimic payment processing, and
//! returns a confirmation. The cart is left as it is.

use std::time::Duration;

use cartwheel_core::{CartItem, Email, EmailError, Price, SessionState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument};
use uuid::Uuid;

/// Shown to the shopper once the simulated payment completes.
pub const CONFIRMATION_MESSAGE: &str = "Order Placed Successfully! Thank you for shopping.";

/// Errors that stop an order from being placed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("Your cart is empty")]
    EmptyCart,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),
}

/// Shipping form as submitted. Every field is required.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ShippingDetails {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// Shipping form after validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShippingAddress {
    pub full_name: String,
    pub email: Email,
    pub phone: String,
    pub address: String,
}

impl ShippingDetails {
    /// Check required fields and the email shape.
    ///
    /// # Errors
    ///
    /// Returns the first missing field, or an invalid email.
    pub fn validate(&self) -> Result<ShippingAddress, CheckoutError> {
        let full_name = required("full_name", &self.full_name)?;
        let email = required("email", &self.email)?;
        let phone = required("phone", &self.phone)?;
        let address = required("address", &self.address)?;

        Ok(ShippingAddress {
            full_name,
            email: Email::parse(&email)?,
            phone,
            address,
        })
    }
}

fn required(name: &'static str, value: &str) -> Result<String, CheckoutError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CheckoutError::MissingField(name));
    }
    Ok(value.to_string())
}

/// Order summary shown next to the checkout form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutSummary {
    pub items: Vec<CartItem>,
    pub item_count: u64,
    pub subtotal: Price,
    /// Shipping is always free.
    pub shipping: &'static str,
    pub total: Price,
}

impl CheckoutSummary {
    #[must_use]
    pub fn from_state(state: &SessionState) -> Self {
        let subtotal = state.subtotal();
        Self {
            items: state.items().to_vec(),
            item_count: state.item_count(),
            subtotal,
            shipping: "FREE",
            total: subtotal,
        }
    }
}

/// Result of a simulated order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderConfirmation {
    pub order_number: Uuid,
    pub placed_at: DateTime<Utc>,
    pub ship_to: ShippingAddress,
    pub summary: CheckoutSummary,
    pub message: &'static str,
}

/// Validate, wait `delay`, and confirm.
///
/// Takes a snapshot of the session so callers don't hold the store while
/// the simulated payment runs.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] for an empty cart, or a form
/// validation error.
#[instrument(skip(state, details))]
pub async fn place_order(
    state: &SessionState,
    details: &ShippingDetails,
    delay: Duration,
) -> Result<OrderConfirmation, CheckoutError> {
    if state.items().is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    let ship_to = details.validate()?;
    let summary = CheckoutSummary::from_state(state);

    info!(items = summary.item_count, "Processing payment...");
    tokio::time::sleep(delay).await;

    let confirmation = OrderConfirmation {
        order_number: Uuid::new_v4(),
        placed_at: Utc::now(),
        ship_to,
        summary,
        message: CONFIRMATION_MESSAGE,
    };
    info!(
        order_number = %confirmation.order_number,
        items = confirmation.summary.item_count,
        total = %confirmation.summary.total,
        "Order placed"
    );
    Ok(confirmation)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use cartwheel_core::{CartProduct, ProductId};

    use super::*;

    fn details() -> ShippingDetails {
        ShippingDetails {
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "555-0100".to_string(),
            address: "12 Analytical Row".to_string(),
        }
    }

    fn cart() -> SessionState {
        let mut state = SessionState::default();
        let lamp = CartProduct {
            id: ProductId::new(8),
            title: "Lamp".to_string(),
            price: Price::from_cents(2_550).unwrap(),
            thumbnail: "lamp.webp".to_string(),
        };
        state.add_to_cart(lamp.clone());
        state.add_to_cart(lamp);
        state
    }

    #[test]
    fn test_validate_requires_every_field() {
        let mut form = details();
        form.phone = "   ".to_string();
        assert_eq!(form.validate(), Err(CheckoutError::MissingField("phone")));

        let empty = ShippingDetails::default();
        assert_eq!(empty.validate(), Err(CheckoutError::MissingField("full_name")));
    }

    #[test]
    fn test_validate_checks_email() {
        let mut form = details();
        form.email = "ada.example.com".to_string();
        assert_eq!(
            form.validate(),
            Err(CheckoutError::InvalidEmail(EmailError::AtSymbol))
        );
    }

    #[test]
    fn test_summary_totals() {
        let summary = CheckoutSummary::from_state(&cart());
        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.subtotal, Price::from_cents(5_100).unwrap());
        assert_eq!(summary.total, summary.subtotal);
        assert_eq!(summary.shipping, "FREE");
    }

    #[tokio::test]
    async fn test_empty_cart_rejected() {
        let result = place_order(&SessionState::default(), &details(), Duration::ZERO).await;
        assert_eq!(result, Err(CheckoutError::EmptyCart));
    }

    #[tokio::test]
    async fn test_place_order_leaves_cart_intact() {
        let state = cart();
        let confirmation = place_order(&state, &details(), Duration::ZERO)
            .await
            .unwrap();

        assert_eq!(confirmation.summary.total, Price::from_cents(5_100).unwrap());
        assert_eq!(confirmation.ship_to.email.as_str(), "ada@example.com");
        assert_eq!(confirmation.message, CONFIRMATION_MESSAGE);
        assert_eq!(state.item_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_place_order_waits_for_delay() {
        let start = tokio::time::Instant::now();
        place_order(&cart(), &details(), Duration::from_secs(2))
            .await
            .unwrap();
        assert!(start.elapsed() >= Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_order_fails_before_payment_delay() {
        let start = tokio::time::Instant::now();

        let empty = place_order(&SessionState::default(), &details(), Duration::from_secs(2)).await;
        assert_eq!(empty, Err(CheckoutError::EmptyCart));

        let incomplete = place_order(&cart(), &ShippingDetails::default(), Duration::from_secs(2)).await;
        assert_eq!(incomplete, Err(CheckoutError::MissingField("full_name")));

        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
