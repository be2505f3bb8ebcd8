//! Session aggregate and its invariants.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::action::{Direction, SessionAction};
use crate::types::{Price, ProductId, Quantity};

/// The locally signed-in shopper. No credentials, no verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
}

impl User {
    /// First letter of each word in the name, uppercased.
    #[must_use]
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// Product fields needed to put something in the cart or wishlist.
///
/// This is a cart line without its quantity; hosts build it from a catalog
/// product when the shopper clicks "add".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartProduct {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub thumbnail: String,
}

impl CartProduct {
    /// Turn this product into a line with the given quantity.
    #[must_use]
    pub fn with_quantity(self, quantity: Quantity) -> CartItem {
        CartItem {
            id: self.id,
            title: self.title,
            price: self.price,
            thumbnail: self.thumbnail,
            quantity,
        }
    }
}

/// One cart line. Unique by `id` within [`SessionState::items`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub thumbnail: String,
    pub quantity: Quantity,
}

impl CartItem {
    /// `price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// Wishlist entries share the cart line shape; their quantity is always 1.
pub type WishlistItem = CartItem;

/// Cart items, wishlist and current user.
///
/// Fields are private so the uniqueness and quantity invariants can only be
/// changed through the actions below. Serializes to the persisted layout:
///
/// ```json
/// { "items": [...], "wishlist": [...], "user": { "name": "...", "email": "..." } | null }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SessionState {
    items: Vec<CartItem>,
    wishlist: Vec<WishlistItem>,
    user: Option<User>,
}

impl SessionState {
    /// Cart lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Wishlist entries in insertion order.
    #[must_use]
    pub fn wishlist(&self) -> &[WishlistItem] {
        &self.wishlist
    }

    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    /// The cart line for `id`, if any.
    #[must_use]
    pub fn item(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id == id)
    }

    #[must_use]
    pub fn in_wishlist(&self, id: ProductId) -> bool {
        self.wishlist.iter().any(|i| i.id == id)
    }

    /// Total units across all lines (the cart badge number).
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity.get())).sum()
    }

    /// Sum of every line's `price × quantity`.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }

    // =========================================================================
    // Actions
    // =========================================================================

    /// Apply one action in place.
    pub fn apply(&mut self, action: SessionAction) {
        match action {
            SessionAction::Login(user) => self.login(user),
            SessionAction::Logout => self.logout(),
            SessionAction::AddToCart(product) => self.add_to_cart(product),
            SessionAction::RemoveFromCart(id) => self.remove_from_cart(id),
            SessionAction::UpdateQuantity { id, direction } => self.update_quantity(id, direction),
            SessionAction::ToggleWishlist(product) => self.toggle_wishlist(product),
        }
    }

    pub fn login(&mut self, user: User) {
        self.user = Some(user);
    }

    /// Clears user, cart and wishlist.
    pub fn logout(&mut self) {
        self.user = None;
        self.items.clear();
        self.wishlist.clear();
    }

    /// Bump the existing line for `product.id`, or append a new line of 1.
    pub fn add_to_cart(&mut self, product: CartProduct) {
        match self.items.iter_mut().find(|i| i.id == product.id) {
            Some(item) => item.quantity = item.quantity.increment(),
            None => self.items.push(product.with_quantity(Quantity::ONE)),
        }
    }

    pub fn remove_from_cart(&mut self, id: ProductId) {
        self.items.retain(|i| i.id != id);
    }

    /// Step a line's quantity. Decrementing a line of 1 leaves it at 1;
    /// removal is always explicit.
    pub fn update_quantity(&mut self, id: ProductId, direction: Direction) {
        let Some(item) = self.items.iter_mut().find(|i| i.id == id) else {
            return;
        };
        match direction {
            Direction::Increment => item.quantity = item.quantity.increment(),
            Direction::Decrement => {
                if let Some(quantity) = item.quantity.decrement() {
                    item.quantity = quantity;
                }
            }
        }
    }

    /// Remove `product.id` from the wishlist if present, otherwise append it.
    pub fn toggle_wishlist(&mut self, product: CartProduct) {
        match self.wishlist.iter().position(|i| i.id == product.id) {
            Some(index) => {
                self.wishlist.remove(index);
            }
            None => self.wishlist.push(product.with_quantity(Quantity::ONE)),
        }
    }

    // =========================================================================
    // Persistence format
    // =========================================================================

    /// Serialize to the persisted JSON layout.
    ///
    /// # Errors
    ///
    /// Returns an error only if serialization itself fails, which the
    /// session types never trigger in practice.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Rebuild state from a persisted slot value.
    ///
    /// Never fails: input that isn't a JSON object yields the empty state,
    /// and each field that is missing or malformed falls back to its own
    /// empty value. Duplicate ids keep their first occurrence.
    #[must_use]
    pub fn rehydrate(raw: &str) -> Self {
        let Ok(Value::Object(mut fields)) = serde_json::from_str::<Value>(raw) else {
            return Self::default();
        };

        let items = take_lines(&mut fields, "items");
        let wishlist = take_lines(&mut fields, "wishlist")
            .into_iter()
            .map(|mut item| {
                item.quantity = Quantity::ONE;
                item
            })
            .collect();
        let user = fields
            .remove("user")
            .and_then(|v| serde_json::from_value(v).ok());

        Self {
            items,
            wishlist,
            user,
        }
    }
}

fn take_lines(fields: &mut Map<String, Value>, key: &str) -> Vec<CartItem> {
    let lines: Vec<CartItem> = fields
        .remove(key)
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default();

    let mut unique: Vec<CartItem> = Vec::with_capacity(lines.len());
    for line in lines {
        if !unique.iter().any(|u| u.id == line.id) {
            unique.push(line);
        }
    }
    unique
}
