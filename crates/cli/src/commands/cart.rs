//! Cart commands.

use cartwheel_core::{CartProduct, Direction, ProductId, SessionAction};
use cartwheel_storefront::checkout::CheckoutSummary;
use cartwheel_storefront::session::SessionStore;

use super::{CommandError, format_line};

/// Print the cart and return its summary.
pub fn show(store: &SessionStore) -> CheckoutSummary {
    let summary = CheckoutSummary::from_state(store.state());
    if summary.items.is_empty() {
        tracing::info!("Your cart is empty");
        return summary;
    }
    for item in &summary.items {
        tracing::info!("{}", format_line(item));
    }
    tracing::info!(
        "{} item(s), subtotal {}, shipping {}, total {}",
        summary.item_count,
        summary.subtotal,
        summary.shipping,
        summary.total
    );
    summary
}

/// Add one unit of `product`. Requires a logged-in user.
///
/// # Errors
///
/// Returns [`CommandError::NotLoggedIn`] when nobody is logged in.
pub fn add(store: &mut SessionStore, product: CartProduct) -> Result<(), CommandError> {
    if !store.state().is_logged_in() {
        return Err(CommandError::NotLoggedIn);
    }
    let title = product.title.clone();
    let id = product.id;
    let state = store.dispatch(SessionAction::AddToCart(product));
    let quantity = state.item(id).map_or(0, |item| item.quantity.get());
    tracing::info!("Added {title} (now {quantity} in cart)");
    Ok(())
}

pub fn remove(store: &mut SessionStore, id: ProductId) {
    let present = store.state().item(id).is_some();
    store.dispatch(SessionAction::RemoveFromCart(id));
    if present {
        tracing::info!("Removed product {id} from cart");
    } else {
        tracing::info!("Product {id} is not in the cart");
    }
}

/// Move a line's quantity one step. Decrementing at one leaves it at one.
pub fn step(store: &mut SessionStore, id: ProductId, direction: Direction) {
    let state = store.dispatch(SessionAction::UpdateQuantity { id, direction });
    match state.item(id) {
        Some(item) => tracing::info!("{}", format_line(item)),
        None => tracing::info!("Product {id} is not in the cart"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use cartwheel_core::Price;

    use super::*;
    use crate::commands::test_support::{logged_in_store, product, store};

    #[test]
    fn test_add_requires_login() {
        let mut store = store();
        assert!(matches!(
            add(&mut store, product(1, 100)),
            Err(CommandError::NotLoggedIn)
        ));
        assert!(store.state().items().is_empty());
    }

    #[test]
    fn test_add_step_remove() {
        let mut store = logged_in_store();
        add(&mut store, product(1, 250)).unwrap();
        add(&mut store, product(1, 250)).unwrap();
        step(&mut store, ProductId::new(1), Direction::Increment);
        assert_eq!(show(&store).subtotal, Price::from_cents(750).unwrap());

        step(&mut store, ProductId::new(1), Direction::Decrement);
        step(&mut store, ProductId::new(1), Direction::Decrement);
        step(&mut store, ProductId::new(1), Direction::Decrement);
        assert_eq!(store.state().item_count(), 1);

        remove(&mut store, ProductId::new(1));
        assert_eq!(show(&store).item_count, 0);
    }
}
