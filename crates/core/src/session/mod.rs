//! The shopping session: cart lines, wishlist and the signed-in user.
//!
//! [`SessionState`] is a plain value. It changes only through
//! [`SessionAction`]s applied by [`reduce`] (or the matching `&mut self`
//! methods), and it is persisted through a [`SessionStorage`] port that the
//! host chooses. Nothing in this module performs I/O.
//!
//! # Example
//!
//! ```
//! use cartwheel_core::{CartProduct, Direction, Price, ProductId, SessionAction, SessionState, reduce};
//!
//! let mascara = CartProduct {
//!     id: ProductId::new(1),
//!     title: "Essence Mascara Lash Princess".to_string(),
//!     price: Price::from_cents(999).unwrap(),
//!     thumbnail: "https://cdn.dummyjson.com/thumb.webp".to_string(),
//! };
//!
//! let state = reduce(SessionState::default(), SessionAction::AddToCart(mascara.clone()));
//! let state = reduce(state, SessionAction::AddToCart(mascara));
//! assert_eq!(state.item_count(), 2);
//!
//! let state = reduce(state, SessionAction::UpdateQuantity {
//!     id: ProductId::new(1),
//!     direction: Direction::Decrement,
//! });
//! assert_eq!(state.item_count(), 1);
//! ```

mod action;
mod state;
mod storage;

pub use action::{Direction, ParseDirectionError, SessionAction, reduce};
pub use state::{CartItem, CartProduct, SessionState, User, WishlistItem};
pub use storage::{MemoryStorage, SessionStorage, StorageError};
