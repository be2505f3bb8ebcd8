//! Wishlist commands.

use cartwheel_core::{CartProduct, SessionAction};
use cartwheel_storefront::session::SessionStore;

use super::{CommandError, format_line};

pub fn show(store: &SessionStore) -> usize {
    let wishlist = store.state().wishlist();
    if wishlist.is_empty() {
        tracing::info!("Your wishlist is empty");
    }
    for item in wishlist {
        tracing::info!("{}", format_line(item));
    }
    wishlist.len()
}

/// Add `product` if absent, remove it if present. Returns whether it is
/// now wishlisted.
///
/// # Errors
///
/// Returns [`CommandError::NotLoggedIn`] when nobody is logged in.
pub fn toggle(store: &mut SessionStore, product: CartProduct) -> Result<bool, CommandError> {
    if !store.state().is_logged_in() {
        return Err(CommandError::NotLoggedIn);
    }
    let id = product.id;
    let title = product.title.clone();
    let wishlisted = store
        .dispatch(SessionAction::ToggleWishlist(product))
        .in_wishlist(id);
    if wishlisted {
        tracing::info!("Added {title} to wishlist");
    } else {
        tracing::info!("Removed {title} from wishlist");
    }
    Ok(wishlisted)
}
