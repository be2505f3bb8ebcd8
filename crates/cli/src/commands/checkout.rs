//! Simulated checkout from the terminal.

use std::time::Duration;

use cartwheel_storefront::checkout::{self, CheckoutError, OrderConfirmation, ShippingDetails};
use cartwheel_storefront::session::SessionStore;

/// Place an order for the current cart. The cart is not cleared.
///
/// # Errors
///
/// Returns an error for an empty cart or an incomplete shipping form.
pub async fn place(
    store: &SessionStore,
    details: &ShippingDetails,
    delay: Duration,
) -> Result<OrderConfirmation, CheckoutError> {
    let confirmation = checkout::place_order(store.state(), details, delay).await?;

    tracing::info!("{}", confirmation.message);
    tracing::info!("Order number: {}", confirmation.order_number);
    tracing::info!(
        "Shipping to {}, {}",
        confirmation.ship_to.full_name,
        confirmation.ship_to.address
    );
    tracing::info!(
        "Total: {} ({} item(s), shipping {})",
        confirmation.summary.total,
        confirmation.summary.item_count,
        confirmation.summary.shipping
    );
    Ok(confirmation)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use cartwheel_core::SessionAction;

    use super::*;
    use crate::commands::test_support::{product, store};

    fn details() -> ShippingDetails {
        ShippingDetails {
            full_name: "Sam Doe".to_string(),
            email: "sam@example.com".to_string(),
            phone: "555-0101".to_string(),
            address: "1 Main St".to_string(),
        }
    }

    #[tokio::test]
    async fn test_place_keeps_cart() {
        let mut store = store();
        store.dispatch(SessionAction::AddToCart(product(2, 1_250)));

        let confirmation = place(&store, &details(), Duration::ZERO).await.unwrap();
        assert_eq!(confirmation.summary.item_count, 1);
        assert_eq!(store.state().item_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_cart() {
        let result = place(&store(), &details(), Duration::ZERO).await;
        assert_eq!(result.unwrap_err(), CheckoutError::EmptyCart);
    }
}
